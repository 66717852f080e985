use serde::{Deserialize, Serialize};

use super::outcome::InterviewConclusion;
use super::session::Session;
use crate::catalog::QuestionId;

/// Identifier wrapper for interview sessions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SessionId(pub String);

/// High level status tracked for a stored session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InterviewStatus {
    InProgress,
    Concluded,
}

impl InterviewStatus {
    pub const fn label(self) -> &'static str {
        match self {
            InterviewStatus::InProgress => "in_progress",
            InterviewStatus::Concluded => "concluded",
        }
    }
}

/// Store record containing the session, the pending question, and the
/// conclusion once one exists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionRecord {
    pub session_id: SessionId,
    pub session: Session,
    pub pending_question: Option<QuestionId>,
    pub status: InterviewStatus,
    pub conclusion: Option<InterviewConclusion>,
}

impl SessionRecord {
    pub fn status_view(&self) -> SessionStatusView {
        SessionStatusView {
            session_id: self.session_id.clone(),
            status: self.status.label(),
            questions_asked: self.session.asked.len(),
            classes_in_contention: self.session.alive_classes().len(),
            conclusion: self.conclusion.clone(),
        }
    }
}

/// Storage abstraction so the service module can be exercised in isolation.
pub trait SessionStore: Send + Sync {
    fn insert(&self, record: SessionRecord) -> Result<SessionRecord, StoreError>;
    fn update(&self, record: SessionRecord) -> Result<(), StoreError>;
    fn fetch(&self, id: &SessionId) -> Result<Option<SessionRecord>, StoreError>;
}

/// Error enumeration for store failures.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("session already exists")]
    Conflict,
    #[error("session not found")]
    NotFound,
    #[error("session store unavailable: {0}")]
    Unavailable(String),
}

/// Sanitized representation of a session's exposed state.
#[derive(Debug, Clone, Serialize)]
pub struct SessionStatusView {
    pub session_id: SessionId,
    pub status: &'static str,
    pub questions_asked: usize,
    pub classes_in_contention: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conclusion: Option<InterviewConclusion>,
}
