use once_cell::sync::Lazy;
use regex::Regex;

use super::domain::{AnswerOption, OptionSpec, Question};

// Separators accepted inside a raw delimited string.
static INLINE_SEPARATORS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\n|\||;|,").expect("valid separator pattern"));

// A single structured record may carry every option in its label, joined by
// the separators above or by enumeration markers like " 1)", " 2.", " 3-".
static LABEL_SEPARATORS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\n|\||;|,|\s\d+\)|\s\d+\.|\s\d+-").expect("valid separator pattern"));

/// Parses the heterogeneous option encodings into a uniform ordered list.
///
/// Upstream editors are not consistent: options may arrive as a list of
/// label/id records, as one record whose label joins every option, or as a
/// plain delimited string. Unrecognized shapes yield an empty list rather
/// than an error.
pub fn normalize_options(question: &Question) -> Vec<AnswerOption> {
    match &question.options {
        OptionSpec::Structured(raw)
            if raw.len() == 1 && LABEL_SEPARATORS.is_match(&raw[0].label) =>
        {
            split_into_options(&raw[0].label, &LABEL_SEPARATORS)
        }
        OptionSpec::Structured(raw) => raw
            .iter()
            .map(|option| {
                let label = option.label.trim().to_string();
                AnswerOption {
                    id: option.id.clone().unwrap_or_else(|| label.clone()),
                    label,
                }
            })
            .collect(),
        OptionSpec::Inline(raw) => split_into_options(raw, &INLINE_SEPARATORS),
        OptionSpec::Other(_) => Vec::new(),
    }
}

fn split_into_options(raw: &str, separators: &Regex) -> Vec<AnswerOption> {
    separators
        .split(raw)
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .enumerate()
        .map(|(index, label)| AnswerOption {
            id: (index + 1).to_string(),
            label: label.to_string(),
        })
        .collect()
}
