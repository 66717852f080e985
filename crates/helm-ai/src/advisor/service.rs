use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::Utc;
use serde::Serialize;

use super::store::{
    InterviewStatus, SessionId, SessionRecord, SessionStatusView, SessionStore, StoreError,
};
use super::{InterviewConclusion, InterviewEngine};
use crate::analytics::{AnalyticsSink, InterviewEvent};
use crate::catalog::{normalize_options, AnswerOption, Question, QuestionId};
use crate::commentary::{CommentaryProvider, RemarkRequest};

/// Service composing the engine, the session store, and the side-channel
/// collaborators. One instance serves every concurrent session; each session
/// has exactly one writer per turn.
pub struct InterviewService<S, A, C> {
    engine: Arc<InterviewEngine>,
    store: Arc<S>,
    analytics: Arc<A>,
    commentary: Arc<C>,
}

static SESSION_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_session_id() -> SessionId {
    let id = SESSION_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    SessionId(format!("session-{id:06}"))
}

impl<S, A, C> InterviewService<S, A, C>
where
    S: SessionStore + 'static,
    A: AnalyticsSink + 'static,
    C: CommentaryProvider + 'static,
{
    pub fn new(engine: Arc<InterviewEngine>, store: Arc<S>, analytics: Arc<A>, commentary: Arc<C>) -> Self {
        Self {
            engine,
            store,
            analytics,
            commentary,
        }
    }

    pub fn engine(&self) -> &InterviewEngine {
        &self.engine
    }

    /// Opens a new session and returns its first question.
    pub fn start(&self, language: Option<String>) -> Result<TurnStart, ServiceError> {
        let session = self.engine.start_session(language);
        let first = self.engine.first_question().cloned();

        let record = SessionRecord {
            session_id: next_session_id(),
            session,
            pending_question: first.as_ref().map(|question| question.id.clone()),
            status: InterviewStatus::InProgress,
            conclusion: None,
        };

        let stored = self.store.insert(record)?;
        Ok(TurnStart {
            session: stored.status_view(),
            question: first.as_ref().map(QuestionView::of),
        })
    }

    /// Advances a session by one answered question: apply effects, evaluate
    /// the stop rule, then either select the next question or conclude.
    /// Commentary and analytics ride along without ever failing the turn.
    pub async fn answer(
        &self,
        session_id: &SessionId,
        question_id: &QuestionId,
        option_label: &str,
    ) -> Result<TurnOutcome, ServiceError> {
        let mut record = self
            .store
            .fetch(session_id)?
            .ok_or(StoreError::NotFound)?;

        if record.status == InterviewStatus::Concluded {
            return Err(ServiceError::SessionConcluded(record.session_id));
        }

        let pending = record.pending_question.clone();
        if pending.as_ref() != Some(question_id) {
            return Err(ServiceError::UnexpectedQuestion {
                pending,
                received: question_id.clone(),
            });
        }

        let question_text = self
            .engine
            .catalog()
            .question(question_id)
            .map(|question| question.text.clone())
            .unwrap_or_default();
        let answer = option_label.trim().to_string();

        self.engine
            .record_answer(&mut record.session, question_id, option_label);

        let remark = self
            .commentary
            .remark(&RemarkRequest {
                question: question_text.clone(),
                answer: answer.clone(),
                language: record.session.user_language.clone(),
            })
            .await;

        self.dispatch(InterviewEvent::Step {
            ts: Utc::now(),
            question_id: question_id.clone(),
            question_text,
            answer,
            commentary: remark.clone(),
            scores: record.session.scores.clone(),
        });

        let step = if self.engine.should_stop(&record.session) {
            self.conclude_turn(&mut record)
        } else if let Some(next) = self.engine.next_question(&record.session) {
            let view = QuestionView::of(next);
            record.pending_question = Some(next.id.clone());
            TurnStep::NextQuestion { question: view }
        } else {
            self.conclude_turn(&mut record)
        };

        self.store.update(record.clone())?;

        Ok(TurnOutcome {
            session: record.status_view(),
            commentary: remark,
            step,
        })
    }

    /// Fetch a session snapshot for API responses.
    pub fn get(&self, session_id: &SessionId) -> Result<SessionRecord, ServiceError> {
        let record = self
            .store
            .fetch(session_id)?
            .ok_or(StoreError::NotFound)?;
        Ok(record)
    }

    fn conclude_turn(&self, record: &mut SessionRecord) -> TurnStep {
        let conclusion = self.engine.conclude(&record.session);
        record.status = InterviewStatus::Concluded;
        record.pending_question = None;
        record.conclusion = Some(conclusion.clone());

        self.dispatch(InterviewEvent::Result {
            ts: Utc::now(),
            conclusion: conclusion.clone(),
            answers: record.session.answers.clone(),
            asked: record.session.asked.clone(),
            scores: record.session.scores.clone(),
        });

        TurnStep::Concluded { conclusion }
    }

    // Analytics delivery is fire-and-forget; the turn never waits on it.
    fn dispatch(&self, event: InterviewEvent) {
        let analytics = Arc::clone(&self.analytics);
        tokio::spawn(async move {
            analytics.record(event).await;
        });
    }
}

/// Error raised by the interview service.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("session {0:?} already concluded")]
    SessionConcluded(SessionId),
    #[error("answer targets question {received:?} but {pending:?} is pending")]
    UnexpectedQuestion {
        pending: Option<QuestionId>,
        received: QuestionId,
    },
}

/// Question as surfaced to the user, options normalized.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuestionView {
    pub id: QuestionId,
    pub text: String,
    pub options: Vec<AnswerOption>,
}

impl QuestionView {
    pub fn of(question: &Question) -> Self {
        Self {
            id: question.id.clone(),
            text: question.text.clone(),
            options: normalize_options(question),
        }
    }
}

/// Response payload for a freshly opened session.
#[derive(Debug, Clone, Serialize)]
pub struct TurnStart {
    pub session: SessionStatusView,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub question: Option<QuestionView>,
}

/// Response payload for one answered question.
#[derive(Debug, Clone, Serialize)]
pub struct TurnOutcome {
    pub session: SessionStatusView,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub commentary: Option<String>,
    #[serde(flatten)]
    pub step: TurnStep,
}

/// What the interview does next after an answer.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "step", rename_all = "snake_case")]
pub enum TurnStep {
    NextQuestion { question: QuestionView },
    Concluded { conclusion: InterviewConclusion },
}
