//! The interview engine: session state, answer-effect application, question
//! selection, stop evaluation, and recommendation synthesis, plus the service
//! facade and HTTP router that drive it.

mod config;
mod effects;
mod outcome;
mod selector;
mod session;
mod stopping;

pub mod router;
pub mod service;
pub mod store;

#[cfg(test)]
mod tests;

pub use config::InterviewConfig;
pub use effects::apply_answer;
pub use outcome::{conclude, InterviewConclusion, Recommendation};
pub use router::interview_router;
pub use selector::{opening_questions, pick_next_question};
pub use service::{
    InterviewService, QuestionView, ServiceError, TurnOutcome, TurnStart, TurnStep,
};
pub use session::Session;
pub use stopping::should_stop;
pub use store::{
    InterviewStatus, SessionId, SessionRecord, SessionStatusView, SessionStore, StoreError,
};

use std::sync::Arc;

use crate::catalog::{Catalog, Question, QuestionId};

/// Stateless facade binding a loaded catalog to the interview rules. One
/// engine serves any number of independent sessions.
pub struct InterviewEngine {
    catalog: Arc<Catalog>,
    config: InterviewConfig,
}

impl InterviewEngine {
    pub fn new(catalog: Arc<Catalog>, config: InterviewConfig) -> Self {
        Self { catalog, config }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn config(&self) -> &InterviewConfig {
        &self.config
    }

    /// Initializes a session with every catalog class in contention.
    pub fn start_session(&self, language: Option<String>) -> Session {
        let session = Session::new(self.catalog.classes());
        match language {
            Some(language) => session.with_language(language),
            None => session,
        }
    }

    /// The question a fresh session opens with: the highest-priority opening
    /// question, or the first catalog question if no opening phase exists.
    pub fn first_question(&self) -> Option<&Question> {
        opening_questions(self.catalog.questions())
            .into_iter()
            .next()
            .or_else(|| self.catalog.questions().first())
    }

    /// Records the answer in the session history and applies every matching
    /// effect.
    pub fn record_answer(
        &self,
        session: &mut Session,
        question_id: &QuestionId,
        option_label: &str,
    ) {
        session.record_answer(question_id, option_label);
        apply_answer(session, self.catalog.effects(), question_id, option_label);
    }

    pub fn should_stop(&self, session: &Session) -> bool {
        should_stop(session, &self.config)
    }

    /// The next question to ask: any unasked opening question first (in
    /// priority order), then the adaptive pick. `None` once the catalog is
    /// exhausted.
    pub fn next_question(&self, session: &Session) -> Option<&Question> {
        let remaining_opening = opening_questions(self.catalog.questions())
            .into_iter()
            .find(|question| !session.asked.contains(&question.id));
        remaining_opening
            .or_else(|| pick_next_question(session, self.catalog.questions(), self.catalog.effects()))
    }

    pub fn conclude(&self, session: &Session) -> InterviewConclusion {
        conclude(session, self.catalog.classes(), self.catalog.guides())
    }
}
