use super::config::InterviewConfig;
use super::session::Session;

/// Decides whether the session has enough signal to terminate.
///
/// Hard stop once the question budget is spent. Early stop once the leader is
/// decisively ahead of the runner-up AND the field has narrowed: a wide field
/// must first be thinned by exclusions, regardless of lead size.
pub fn should_stop(session: &Session, config: &InterviewConfig) -> bool {
    if session.asked.len() >= config.max_questions {
        return true;
    }

    let mut alive_scores: Vec<i32> = session
        .scores
        .iter()
        .filter(|(class_id, _)| !session.is_excluded(class_id))
        .map(|(_, score)| *score)
        .collect();
    alive_scores.sort_unstable_by(|a, b| b.cmp(a));

    if alive_scores.len() >= 2 {
        let lead = alive_scores[0] - alive_scores[1];
        if lead >= config.decisive_lead && alive_scores.len() <= config.narrow_field {
            return true;
        }
    }

    false
}
