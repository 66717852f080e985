//! Courtesy-remark collaborator. After each answer the interview may surface a
//! one-line acknowledgement fetched from a text-generation provider. The
//! remark is purely cosmetic: every failure path yields `None` and the
//! decision flow proceeds regardless.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::CommentaryConfig;

const REMARK_TIMEOUT: Duration = Duration::from_secs(8);
const TEMPERATURE: f32 = 0.5;

const SYSTEM_PROMPT: &str = "You are a concise, courteous yacht advisor. \
Tone: refined, calm, premium. No emojis. 1-2 sentences max. After each user \
answer, acknowledge politely and add one tasteful, practical fact from \
yachting relevant to the topic of the question.";

/// Inputs offered to the provider for one remark.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RemarkRequest {
    pub question: String,
    pub answer: String,
    pub language: String,
}

#[async_trait]
pub trait CommentaryProvider: Send + Sync {
    /// Produces a short remark, or `None` on any failure or timeout.
    async fn remark(&self, request: &RemarkRequest) -> Option<String>;
}

/// Provider used when commentary is disabled.
#[derive(Debug, Default, Clone)]
pub struct NoCommentary;

#[async_trait]
impl CommentaryProvider for NoCommentary {
    async fn remark(&self, _request: &RemarkRequest) -> Option<String> {
        None
    }
}

/// Chat-completions backed provider. Construction never fails: without an API
/// key the provider stays disabled and answers `None`.
pub struct ChatCommentary {
    client: reqwest::Client,
    api_key: Option<String>,
    model: String,
    endpoint: String,
}

impl ChatCommentary {
    pub fn from_config(config: &CommentaryConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(REMARK_TIMEOUT)
            .build()
            .unwrap_or_default();

        Self {
            client,
            api_key: config.api_key.clone(),
            model: config.model.clone(),
            endpoint: config.endpoint.clone(),
        }
    }

    fn user_prompt(request: &RemarkRequest) -> String {
        format!(
            "User language: {}\nQuestion: {}\nUser answer: {}\n\nReturn ONLY the comment text (1-2 sentences).",
            request.language, request.question, request.answer
        )
    }
}

#[async_trait]
impl CommentaryProvider for ChatCommentary {
    async fn remark(&self, request: &RemarkRequest) -> Option<String> {
        let api_key = self.api_key.as_ref()?;

        let body = ChatRequest {
            model: &self.model,
            temperature: TEMPERATURE,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: SYSTEM_PROMPT.to_string(),
                },
                ChatMessage {
                    role: "user",
                    content: Self::user_prompt(request),
                },
            ],
        };

        let response = match self
            .client
            .post(&self.endpoint)
            .bearer_auth(api_key)
            .json(&body)
            .send()
            .await
        {
            Ok(response) => response,
            Err(err) => {
                debug!("commentary request failed: {err}");
                return None;
            }
        };

        if !response.status().is_success() {
            debug!("commentary provider returned {}", response.status());
            return None;
        }

        let parsed: ChatResponse = match response.json().await {
            Ok(parsed) => parsed,
            Err(err) => {
                debug!("commentary response unreadable: {err}");
                return None;
            }
        };

        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .map(|text| text.trim().to_string())
            .filter(|text| !text.is_empty())
    }
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    temperature: f32,
    messages: Vec<ChatMessage>,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: &'static str,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_prompt_carries_language_question_and_answer() {
        let prompt = ChatCommentary::user_prompt(&RemarkRequest {
            question: "Sail or motor?".to_string(),
            answer: "Sail".to_string(),
            language: "fr".to_string(),
        });
        assert!(prompt.contains("User language: fr"));
        assert!(prompt.contains("Question: Sail or motor?"));
        assert!(prompt.contains("User answer: Sail"));
    }

    #[tokio::test]
    async fn provider_without_key_stays_silent() {
        let provider = ChatCommentary::from_config(&CommentaryConfig {
            api_key: None,
            model: "gpt-4o-mini".to_string(),
            endpoint: "https://api.openai.com/v1/chat/completions".to_string(),
        });
        let remark = provider
            .remark(&RemarkRequest {
                question: "Q".to_string(),
                answer: "A".to_string(),
                language: "en".to_string(),
            })
            .await;
        assert!(remark.is_none());
    }
}
