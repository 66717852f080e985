//! Static catalog of questions, answer effects, candidate classes, and
//! per-class follow-up material. Loaded once at startup and read-only for the
//! lifetime of the process.

pub mod domain;
mod options;
mod sheet;

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

pub use domain::{
    AnswerOption, ClassGuide, ClassId, ClassProfile, Effect, GuideLink, OptionSpec, Question,
    QuestionId, RawOption, OPENING_PHASE,
};
pub use options::normalize_options;
pub use sheet::{EffectImportError, EffectSheetImporter};

const QUESTIONS_FILE: &str = "questions.json";
const EFFECTS_FILE: &str = "effects.json";
const CLASSES_FILE: &str = "classes.json";
const GUIDES_FILE: &str = "tips_links.json";
const SETTINGS_FILE: &str = "config.json";

/// Immutable bundle of catalog collections.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    questions: Vec<Question>,
    effects: Vec<Effect>,
    classes: Vec<ClassProfile>,
    guides: BTreeMap<ClassId, ClassGuide>,
    #[serde(default)]
    settings: CatalogSettings,
}

/// Deployment settings shipped alongside the catalog data.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CatalogSettings {
    #[serde(rename = "webhookUrl", default, skip_serializing_if = "Option::is_none")]
    pub webhook_url: Option<String>,
}

impl Catalog {
    pub fn new(
        questions: Vec<Question>,
        effects: Vec<Effect>,
        classes: Vec<ClassProfile>,
        guides: BTreeMap<ClassId, ClassGuide>,
        settings: CatalogSettings,
    ) -> Self {
        Self {
            questions,
            effects,
            classes,
            guides,
            settings,
        }
    }

    /// Reads the five catalog files from a data directory. `config.json` is
    /// optional; every other file must parse.
    pub fn from_dir<P: AsRef<Path>>(dir: P) -> Result<Self, CatalogError> {
        let dir = dir.as_ref();

        let questions: Vec<Question> = read_json(dir, QUESTIONS_FILE)?;
        let effects: Vec<Effect> = read_json(dir, EFFECTS_FILE)?;
        let classes: Vec<ClassProfile> = read_json(dir, CLASSES_FILE)?;
        let guides: BTreeMap<ClassId, ClassGuide> = read_json(dir, GUIDES_FILE)?;

        let settings = match std::fs::read(dir.join(SETTINGS_FILE)) {
            Ok(bytes) => serde_json::from_slice(&bytes).map_err(|source| CatalogError::Json {
                name: SETTINGS_FILE,
                source,
            })?,
            Err(_) => CatalogSettings::default(),
        };

        Ok(Self::new(questions, effects, classes, guides, settings))
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn effects(&self) -> &[Effect] {
        &self.effects
    }

    pub fn classes(&self) -> &[ClassProfile] {
        &self.classes
    }

    pub fn question(&self, id: &QuestionId) -> Option<&Question> {
        self.questions.iter().find(|question| question.id == *id)
    }

    pub fn class(&self, id: &ClassId) -> Option<&ClassProfile> {
        self.classes.iter().find(|class| class.class_id == *id)
    }

    pub fn guides(&self) -> &BTreeMap<ClassId, ClassGuide> {
        &self.guides
    }

    pub fn settings(&self) -> &CatalogSettings {
        &self.settings
    }
}

fn read_json<T: serde::de::DeserializeOwned>(
    dir: &Path,
    name: &'static str,
) -> Result<T, CatalogError> {
    let bytes =
        std::fs::read(dir.join(name)).map_err(|source| CatalogError::Io { name, source })?;
    serde_json::from_slice(&bytes).map_err(|source| CatalogError::Json { name, source })
}

/// Error raised while loading catalog data.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("failed to read catalog file {name}: {source}")]
    Io {
        name: &'static str,
        source: std::io::Error,
    },
    #[error("invalid JSON in catalog file {name}: {source}")]
    Json {
        name: &'static str,
        source: serde_json::Error,
    },
}
