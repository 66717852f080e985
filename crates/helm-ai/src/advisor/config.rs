use serde::{Deserialize, Serialize};

/// Tunables governing the question budget and the early-stop rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterviewConfig {
    /// Hard cap on questions asked per session.
    pub max_questions: usize,
    /// Minimum gap between the top two contenders for an early stop.
    pub decisive_lead: i32,
    /// Early stop only applies once the field has narrowed to this many
    /// classes; a wide field must be thinned by exclusions first.
    pub narrow_field: usize,
}

impl Default for InterviewConfig {
    fn default() -> Self {
        Self {
            max_questions: 15,
            decisive_lead: 2,
            narrow_field: 3,
        }
    }
}
