//! OpenAI-compatible chat completion client
//!
//! Defaults to OpenRouter, but any endpoint that accepts
//! `{model, messages}` and answers with `choices[0].message.content` works.

use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::config::LlmConfig;
use crate::error::{CompletionError, Result};
use crate::providers::{ApiCredentials, CompletionProvider};

/// Model used when neither the config nor the backend names one
pub const DEFAULT_MODEL: &str = "google/gemini-2.0-flash-exp:free";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ChatCompletionRequest<'a> {
    pub model: &'a str,
    pub messages: Vec<ChatMessage>,
}

#[derive(Debug, Deserialize)]
pub struct ChatCompletionResponse {
    #[serde(default)]
    pub choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
pub struct ChatChoice {
    pub message: ChatMessage,
}

impl ChatCompletionResponse {
    /// Text of the first choice
    pub fn into_text(self) -> Result<String> {
        self.choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| CompletionError::EmptyChoices.into())
    }
}

/// Map a non-2xx status to an error
///
/// The message keeps the `<code> <reason>` shape, e.g. `API error: 429 Too Many Requests`.
pub fn status_error(status: StatusCode) -> CompletionError {
    let text = match status.canonical_reason() {
        Some(reason) => format!("{} {}", status.as_u16(), reason),
        None => status.as_u16().to_string(),
    };

    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => CompletionError::Unauthorized(text),
        _ => CompletionError::Status(text),
    }
}

/// Completion client for OpenRouter and compatible endpoints
pub struct OpenRouterClient {
    client: Client,
    endpoint: String,
    referer: Option<String>,
}

impl OpenRouterClient {
    pub fn new(config: &LlmConfig, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| CompletionError::Network(e.to_string()))?;

        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
            referer: config.referer.clone(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl CompletionProvider for OpenRouterClient {
    async fn complete(&self, credentials: &ApiCredentials, prompt: &str) -> Result<String> {
        let request = ChatCompletionRequest {
            model: &credentials.model,
            messages: vec![ChatMessage::user(prompt)],
        };

        tracing::debug!(
            model = %credentials.model,
            prompt_chars = prompt.chars().count(),
            "Sending completion request"
        );

        let mut builder = self
            .client
            .post(&self.endpoint)
            .header(AUTHORIZATION, credentials.bearer())
            .header(CONTENT_TYPE, "application/json")
            .json(&request);

        if let Some(referer) = &self.referer {
            builder = builder.header("HTTP-Referer", referer);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| CompletionError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(status = status.as_u16(), body = %body, "Completion request failed");
            return Err(status_error(status).into());
        }

        let body = response
            .text()
            .await
            .map_err(|e| CompletionError::Network(e.to_string()))?;

        let parsed: ChatCompletionResponse =
            serde_json::from_str(&body).map_err(|e| CompletionError::Decode(e.to_string()))?;

        let text = parsed.into_text()?;
        tracing::debug!(response_chars = text.chars().count(), "Completion received");
        Ok(text)
    }
}
