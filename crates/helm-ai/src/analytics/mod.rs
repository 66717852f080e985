//! Best-effort analytics delivery. Events mirror what the interview surfaces
//! to the user: one `step` per answered question and one `result` when the
//! session concludes. Delivery failures are swallowed; they must never reach
//! the interview flow.

use std::collections::BTreeMap;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::debug;

use crate::advisor::InterviewConclusion;
use crate::catalog::{ClassId, QuestionId};

const DELIVERY_TIMEOUT: Duration = Duration::from_secs(5);

/// Payload shipped to the analytics sink after each turn.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InterviewEvent {
    Step {
        ts: DateTime<Utc>,
        question_id: QuestionId,
        question_text: String,
        answer: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        commentary: Option<String>,
        scores: BTreeMap<ClassId, i32>,
    },
    Result {
        ts: DateTime<Utc>,
        conclusion: InterviewConclusion,
        answers: BTreeMap<QuestionId, String>,
        asked: Vec<QuestionId>,
        scores: BTreeMap<ClassId, i32>,
    },
}

#[async_trait]
pub trait AnalyticsSink: Send + Sync {
    /// Records one event. Implementations must swallow their own failures.
    async fn record(&self, event: InterviewEvent);
}

/// Sink used when analytics is disabled.
#[derive(Debug, Default, Clone)]
pub struct NullSink;

#[async_trait]
impl AnalyticsSink for NullSink {
    async fn record(&self, _event: InterviewEvent) {}
}

/// Posts events as JSON to a configured webhook. Without a URL the sink is
/// disabled; with one, delivery is attempted once with a short timeout.
pub struct WebhookSink {
    client: reqwest::Client,
    url: Option<String>,
}

impl WebhookSink {
    pub fn new(url: Option<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(DELIVERY_TIMEOUT)
            .build()
            .unwrap_or_default();
        Self { client, url }
    }
}

#[async_trait]
impl AnalyticsSink for WebhookSink {
    async fn record(&self, event: InterviewEvent) {
        let Some(url) = &self.url else {
            return;
        };

        match self.client.post(url).json(&event).send().await {
            Ok(response) if !response.status().is_success() => {
                debug!("analytics webhook returned {}", response.status());
            }
            Ok(_) => {}
            Err(err) => debug!("analytics delivery failed: {err}"),
        }
    }
}
