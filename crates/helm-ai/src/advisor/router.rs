use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use serde_json::json;

use super::service::{InterviewService, ServiceError};
use super::store::{SessionId, SessionStore, StoreError};
use crate::analytics::AnalyticsSink;
use crate::catalog::QuestionId;
use crate::commentary::CommentaryProvider;

/// Router builder exposing HTTP endpoints for the interview flow.
pub fn interview_router<S, A, C>(service: Arc<InterviewService<S, A, C>>) -> Router
where
    S: SessionStore + 'static,
    A: AnalyticsSink + 'static,
    C: CommentaryProvider + 'static,
{
    Router::new()
        .route("/api/v1/interview/sessions", post(start_handler::<S, A, C>))
        .route(
            "/api/v1/interview/sessions/:session_id",
            get(status_handler::<S, A, C>),
        )
        .route(
            "/api/v1/interview/sessions/:session_id/answers",
            post(answer_handler::<S, A, C>),
        )
        .with_state(service)
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct StartSessionRequest {
    #[serde(default)]
    language: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct AnswerRequest {
    question_id: String,
    option: String,
}

pub(crate) async fn start_handler<S, A, C>(
    State(service): State<Arc<InterviewService<S, A, C>>>,
    payload: Option<axum::Json<StartSessionRequest>>,
) -> Response
where
    S: SessionStore + 'static,
    A: AnalyticsSink + 'static,
    C: CommentaryProvider + 'static,
{
    let request = payload.map(|axum::Json(body)| body).unwrap_or_default();
    match service.start(request.language) {
        Ok(start) => (StatusCode::CREATED, axum::Json(start)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn answer_handler<S, A, C>(
    State(service): State<Arc<InterviewService<S, A, C>>>,
    Path(session_id): Path<String>,
    axum::Json(request): axum::Json<AnswerRequest>,
) -> Response
where
    S: SessionStore + 'static,
    A: AnalyticsSink + 'static,
    C: CommentaryProvider + 'static,
{
    let session_id = SessionId(session_id);
    let question_id = QuestionId(request.question_id);

    match service.answer(&session_id, &question_id, &request.option).await {
        Ok(outcome) => (StatusCode::OK, axum::Json(outcome)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn status_handler<S, A, C>(
    State(service): State<Arc<InterviewService<S, A, C>>>,
    Path(session_id): Path<String>,
) -> Response
where
    S: SessionStore + 'static,
    A: AnalyticsSink + 'static,
    C: CommentaryProvider + 'static,
{
    let session_id = SessionId(session_id);
    match service.get(&session_id) {
        Ok(record) => (StatusCode::OK, axum::Json(record.status_view())).into_response(),
        Err(error) => error_response(error),
    }
}

fn error_response(error: ServiceError) -> Response {
    let status = match &error {
        ServiceError::Store(StoreError::NotFound) => StatusCode::NOT_FOUND,
        ServiceError::Store(StoreError::Conflict) => StatusCode::CONFLICT,
        ServiceError::Store(StoreError::Unavailable(_)) => StatusCode::INTERNAL_SERVER_ERROR,
        ServiceError::SessionConcluded(_) => StatusCode::CONFLICT,
        ServiceError::UnexpectedQuestion { .. } => StatusCode::UNPROCESSABLE_ENTITY,
    };

    let payload = json!({
        "error": error.to_string(),
    });
    (status, axum::Json(payload)).into_response()
}
