use serde::{Deserialize, Serialize};

/// Identifier wrapper for candidate yacht classes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ClassId(pub String);

/// Identifier wrapper for interview questions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct QuestionId(pub String);

/// Phase tag marking the fixed opening set of questions.
pub const OPENING_PHASE: i32 = 1;

/// A single interview question as authored in the catalog.
///
/// Options arrive in whatever shape the upstream editors produced; see
/// [`super::normalize_options`] for the uniform view the engine consumes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    pub id: QuestionId,
    pub text: String,
    #[serde(default)]
    pub phase: i32,
    #[serde(default)]
    pub priority: i32,
    #[serde(default)]
    pub options: OptionSpec,
}

/// Heterogeneous encodings the upstream catalog uses for question options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OptionSpec {
    /// A list of label/id records, possibly a single record whose label is a
    /// delimiter-joined string.
    Structured(Vec<RawOption>),
    /// A raw delimiter-joined string.
    Inline(String),
    /// Anything else; normalizes to an empty option list.
    Other(serde_json::Value),
}

impl Default for OptionSpec {
    fn default() -> Self {
        OptionSpec::Structured(Vec::new())
    }
}

/// One option record as authored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawOption {
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

/// Uniform selectable option presented to the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerOption {
    pub id: String,
    pub label: String,
}

/// Rule mapping one (question, answer) pair to score and exclusion
/// adjustments. Several effects may reference the same question; every effect
/// matching the chosen option applies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Effect {
    pub question_id: QuestionId,
    pub option: String,
    #[serde(default)]
    pub exclude: Vec<ClassId>,
    #[serde(default)]
    pub up: Vec<ClassId>,
    #[serde(default)]
    pub down: Vec<ClassId>,
}

/// Catalog entry describing one candidate class.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassProfile {
    pub class_id: ClassId,
    pub name: String,
    #[serde(default)]
    pub summary: String,
}

/// Per-class follow-up material surfaced with the final recommendation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClassGuide {
    #[serde(default)]
    pub tips: Vec<String>,
    #[serde(default)]
    pub links: Vec<GuideLink>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuideLink {
    pub label: String,
    pub href: String,
}
