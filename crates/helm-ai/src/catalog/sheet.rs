use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Deserializer};

use super::domain::{ClassId, Effect, QuestionId};

/// Imports answer effects from the spreadsheet export the catalog editors
/// maintain. Class lists live in semicolon-delimited cells; blank cells mean
/// the effect leaves that dimension untouched.
pub struct EffectSheetImporter;

#[derive(Debug)]
pub enum EffectImportError {
    Io(std::io::Error),
    Csv(csv::Error),
}

impl std::fmt::Display for EffectImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EffectImportError::Io(err) => write!(f, "failed to read effect sheet: {}", err),
            EffectImportError::Csv(err) => write!(f, "invalid effect sheet data: {}", err),
        }
    }
}

impl std::error::Error for EffectImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            EffectImportError::Io(err) => Some(err),
            EffectImportError::Csv(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for EffectImportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for EffectImportError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

impl EffectSheetImporter {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Vec<Effect>, EffectImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Vec<Effect>, EffectImportError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);
        let mut effects = Vec::new();

        for record in csv_reader.deserialize::<EffectRow>() {
            let row = record?;
            // Duplicate rows stay duplicated: several effects per question are
            // legal and each matching effect applies.
            effects.push(Effect {
                question_id: QuestionId(row.question_id),
                option: row.option,
                exclude: split_classes(row.exclude.as_deref()),
                up: split_classes(row.up.as_deref()),
                down: split_classes(row.down.as_deref()),
            });
        }

        Ok(effects)
    }
}

#[derive(Debug, Deserialize)]
struct EffectRow {
    #[serde(rename = "Question ID")]
    question_id: String,
    #[serde(rename = "Option")]
    option: String,
    #[serde(rename = "Exclude", default, deserialize_with = "empty_string_as_none")]
    exclude: Option<String>,
    #[serde(rename = "Up", default, deserialize_with = "empty_string_as_none")]
    up: Option<String>,
    #[serde(rename = "Down", default, deserialize_with = "empty_string_as_none")]
    down: Option<String>,
}

fn split_classes(cell: Option<&str>) -> Vec<ClassId> {
    cell.map(|value| {
        value
            .split(';')
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .map(|part| ClassId(part.to_string()))
            .collect()
    })
    .unwrap_or_default()
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}
