use super::session::Session;
use crate::catalog::{Effect, QuestionId};

/// Applies every effect matching the answered question and chosen option.
///
/// Matching is exact string equality after trimming both sides; case and
/// punctuation must agree. An option with no matching effect is a silent
/// no-op. Effects commute: exclusions are set-union and score changes are
/// integer addition, so application order is irrelevant.
pub fn apply_answer(
    session: &mut Session,
    effects: &[Effect],
    question_id: &QuestionId,
    option_label: &str,
) {
    let chosen = option_label.trim();

    for effect in effects {
        if effect.question_id != *question_id || effect.option.trim() != chosen {
            continue;
        }

        for class_id in &effect.exclude {
            session.excluded.insert(class_id.clone());
        }
        for class_id in &effect.up {
            *session.scores.entry(class_id.clone()).or_insert(0) += 1;
        }
        for class_id in &effect.down {
            *session.scores.entry(class_id.clone()).or_insert(0) -= 1;
        }
    }
}
