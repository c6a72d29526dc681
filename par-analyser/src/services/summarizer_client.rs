//! Summarization service client
//!
//! Talks to an OpenAI-compatible chat-completions endpoint. One attempt per
//! call, no retry. The returned text is handed to the feedback aggregator
//! unchanged; this client makes no assumption about its format.

use async_trait::async_trait;
use par_common::config::SummarizerConfig;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

const USER_AGENT: &str = concat!("par-analyser/", env!("CARGO_PKG_VERSION"));

/// Summarization client errors
#[derive(Debug, Error)]
pub enum SummarizerError {
    #[error("Summarizer API key not configured")]
    NotConfigured,

    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("API error {0}: {1}")]
    ApiError(u16, String),

    #[error("Parse error: {0}")]
    ParseError(String),
}

/// External text summarization service
#[async_trait]
pub trait Summarizer: Send + Sync {
    /// Send one system instruction plus user body, return the reply text
    async fn summarize(&self, system: &str, user: &str) -> Result<String, SummarizerError>;
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: Option<ChatReply>,
}

#[derive(Debug, Deserialize)]
struct ChatReply {
    content: Option<String>,
}

/// Chat-completions API client
pub struct ChatCompletionsClient {
    http_client: reqwest::Client,
    endpoint: String,
    model: String,
    api_key: Option<String>,
}

impl ChatCompletionsClient {
    /// Build a client; a missing key only fails at call time
    pub fn new(config: &SummarizerConfig, api_key: Option<String>) -> Result<Self, SummarizerError> {
        let http_client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| SummarizerError::NetworkError(e.to_string()))?;

        Ok(Self {
            http_client,
            endpoint: format!("{}/chat/completions", config.base_url.trim_end_matches('/')),
            model: config.model.clone(),
            api_key,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }
}

#[async_trait]
impl Summarizer for ChatCompletionsClient {
    async fn summarize(&self, system: &str, user: &str) -> Result<String, SummarizerError> {
        let api_key = self.api_key.as_deref().ok_or(SummarizerError::NotConfigured)?;

        let request = ChatRequest {
            model: &self.model,
            messages: [
                ChatMessage { role: "system", content: system },
                ChatMessage { role: "user", content: user },
            ],
        };

        tracing::debug!(
            endpoint = %self.endpoint,
            model = %self.model,
            body_chars = user.len(),
            "Requesting summarization"
        );

        let response = self
            .http_client
            .post(&self.endpoint)
            .bearer_auth(api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| SummarizerError::NetworkError(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(SummarizerError::ApiError(status.as_u16(), error_text));
        }

        let reply: ChatResponse = response
            .json()
            .await
            .map_err(|e| SummarizerError::ParseError(e.to_string()))?;

        let content = reply
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message)
            .and_then(|message| message.content)
            .unwrap_or_default();

        tracing::info!(reply_chars = content.len(), "Summarization reply received");

        Ok(content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_joins_base_url() {
        let config = SummarizerConfig {
            base_url: "http://localhost:9000/v1/".to_string(),
            ..SummarizerConfig::default()
        };
        let client = ChatCompletionsClient::new(&config, Some("k".into())).unwrap();
        assert_eq!(client.endpoint(), "http://localhost:9000/v1/chat/completions");
        assert!(client.is_configured());
    }

    #[tokio::test]
    async fn test_missing_key_fails_without_request() {
        let client = ChatCompletionsClient::new(&SummarizerConfig::default(), None).unwrap();
        let result = client.summarize("system", "user").await;
        assert!(matches!(result, Err(SummarizerError::NotConfigured)));
    }

    #[test]
    fn test_reply_without_content_is_empty() {
        let reply: ChatResponse =
            serde_json::from_str(r#"{"choices":[{"message":{"role":"assistant"}}]}"#).unwrap();
        let content = reply
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message)
            .and_then(|m| m.content);
        assert!(content.is_none());
    }

    #[test]
    fn test_request_serialization() {
        let request = ChatRequest {
            model: "deepseek-v3",
            messages: [
                ChatMessage { role: "system", content: "s" },
                ChatMessage { role: "user", content: "u" },
            ],
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["model"], "deepseek-v3");
        assert_eq!(value["messages"][0]["role"], "system");
        assert_eq!(value["messages"][1]["content"], "u");
    }
}
