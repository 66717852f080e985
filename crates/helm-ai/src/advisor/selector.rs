use std::collections::BTreeSet;

use super::session::Session;
use crate::catalog::{ClassId, Effect, Question, OPENING_PHASE};

/// Returns every opening-phase question sorted descending by priority.
///
/// The sort is stable, so catalog order breaks priority ties. These are asked
/// strictly before any adaptive question.
pub fn opening_questions(questions: &[Question]) -> Vec<&Question> {
    let mut opening: Vec<&Question> = questions
        .iter()
        .filter(|question| question.phase == OPENING_PHASE)
        .collect();
    opening.sort_by(|a, b| b.priority.cmp(&a.priority));
    opening
}

/// Chooses the unasked adaptive question with the greatest discriminative
/// impact: the number of distinct classes still in contention that any of its
/// effects could move. Ties fall to the higher priority, then to catalog
/// position (first encountered wins). Returns `None` when no unasked adaptive
/// question remains.
///
/// Weighting by still-alive classes keeps the question budget away from
/// distinctions exclusion has already resolved.
pub fn pick_next_question<'a>(
    session: &Session,
    questions: &'a [Question],
    effects: &[Effect],
) -> Option<&'a Question> {
    let mut best: Option<&Question> = None;
    let mut best_impact = 0usize;

    for question in questions {
        if question.phase == OPENING_PHASE || session.asked.contains(&question.id) {
            continue;
        }

        let impact = question_impact(session, question, effects);
        let better = match best {
            None => true,
            Some(current) => {
                impact > best_impact || (impact == best_impact && question.priority > current.priority)
            }
        };
        if better {
            best = Some(question);
            best_impact = impact;
        }
    }

    best
}

fn question_impact(session: &Session, question: &Question, effects: &[Effect]) -> usize {
    let mut reachable: BTreeSet<&ClassId> = BTreeSet::new();
    for effect in effects {
        if effect.question_id != question.id {
            continue;
        }
        for class_id in effect
            .exclude
            .iter()
            .chain(effect.up.iter())
            .chain(effect.down.iter())
        {
            if !session.is_excluded(class_id) {
                reachable.insert(class_id);
            }
        }
    }
    reachable.len()
}
