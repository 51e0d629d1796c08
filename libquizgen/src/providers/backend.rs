//! HTTP client for the companion backend
//!
//! Every endpoint answers with a JSON envelope carrying `success` and, on
//! failure, `error`. Failures are usually sent with HTTP 500, so the body is
//! inspected before the status code.

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::config::BackendConfig;
use crate::error::{BackendError, Result};
use crate::providers::openrouter::DEFAULT_MODEL;
use crate::providers::{ApiCredentials, ContentBackend, ScrapedPage, Transcript};
use crate::types::Language;

#[derive(Debug, Deserialize)]
struct Envelope {
    #[serde(default)]
    success: Option<bool>,
    #[serde(default)]
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ConfigResponse {
    #[serde(default)]
    openrouter_api_key: Option<String>,
    #[serde(default)]
    model_name: Option<String>,
}

#[derive(Debug, Serialize)]
struct TranscriptRequest<'a> {
    video_url: &'a str,
    languages: Vec<&'static str>,
}

#[derive(Debug, Deserialize)]
struct TranscriptResponse {
    transcript: String,
    #[serde(default)]
    method: Option<String>,
    #[serde(default)]
    snippet_count: Option<u64>,
    #[serde(default)]
    language: Option<String>,
}

#[derive(Debug, Serialize)]
struct ScrapeRequest<'a> {
    website_url: &'a str,
}

#[derive(Debug, Deserialize)]
struct ScrapeResponse {
    content: String,
    #[serde(default)]
    metadata: Option<PageMetadata>,
}

#[derive(Debug, Deserialize)]
struct PageMetadata {
    #[serde(default)]
    title: Option<String>,
}

#[derive(Debug, Deserialize)]
struct PromptResponse {
    prompt: String,
}

/// Languages to request a transcript in, most preferred first
pub fn transcript_languages(language: Language) -> Vec<&'static str> {
    vec![language.code(), "en"]
}

/// Turn a status code and body into a typed payload
///
/// An envelope with `success: false` wins over the status code so that the
/// backend's own error message reaches the user.
pub(crate) fn interpret<T: DeserializeOwned>(status: u16, body: &str, fallback: &str) -> Result<T> {
    let ok = (200..300).contains(&status);

    if let Ok(envelope) = serde_json::from_str::<Envelope>(body) {
        let failed = envelope.success == Some(false) || (!ok && envelope.error.is_some());
        if failed {
            let message = envelope
                .error
                .filter(|e| !e.trim().is_empty())
                .unwrap_or_else(|| fallback.to_string());
            return Err(BackendError::Rejected(message).into());
        }
    }

    if !ok {
        return Err(BackendError::Status {
            status,
            message: fallback.to_string(),
        }
        .into());
    }

    serde_json::from_str(body).map_err(|e| BackendError::Decode(e.to_string()).into())
}

/// Backend reached over HTTP
pub struct HttpBackend {
    client: Client,
    base_url: String,
}

impl HttpBackend {
    pub fn new(config: &BackendConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| BackendError::Network(e.to_string()))?;

        Ok(Self {
            client,
            base_url: config.url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    async fn read<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
        fallback: &str,
    ) -> Result<T> {
        let response = request
            .send()
            .await
            .map_err(|e| BackendError::Network(e.to_string()))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| BackendError::Network(e.to_string()))?;

        tracing::debug!(status, bytes = body.len(), "Backend responded");
        interpret(status, &body, fallback)
    }
}

#[async_trait]
impl ContentBackend for HttpBackend {
    async fn fetch_config(&self) -> Result<ApiCredentials> {
        let url = self.endpoint("api/config");
        tracing::debug!("Fetching completion credentials from {}", url);

        let config: ConfigResponse = self
            .read(self.client.get(&url), "Failed to fetch API configuration")
            .await?;

        let api_key = config
            .openrouter_api_key
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| BackendError::Rejected("OpenRouter API key not configured".to_string()))?;

        let model = config
            .model_name
            .filter(|model| !model.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_MODEL.to_string());

        Ok(ApiCredentials::new(api_key, model))
    }

    async fn fetch_transcript(&self, video_url: &str, language: Language) -> Result<Transcript> {
        let request = TranscriptRequest {
            video_url,
            languages: transcript_languages(language),
        };

        let response: TranscriptResponse = self
            .read(
                self.client.post(self.endpoint("api/transcript")).json(&request),
                "Failed to fetch transcript",
            )
            .await?;

        tracing::info!(
            snippets = response.snippet_count.unwrap_or_default(),
            language = response.language.as_deref().unwrap_or("unknown"),
            "Transcript loaded"
        );

        Ok(Transcript {
            text: response.transcript,
            method: response.method,
            snippet_count: response.snippet_count,
            language: response.language,
        })
    }

    async fn scrape_website(&self, website_url: &str) -> Result<ScrapedPage> {
        let request = ScrapeRequest { website_url };

        let response: ScrapeResponse = self
            .read(
                self.client.post(self.endpoint("api/scrape-website")).json(&request),
                "Failed to scrape website",
            )
            .await?;

        let title = response
            .metadata
            .and_then(|m| m.title)
            .filter(|t| !t.trim().is_empty());

        Ok(ScrapedPage {
            content: response.content,
            title,
        })
    }

    async fn fetch_prompt(&self, template_name: &str) -> Result<String> {
        let url = self.endpoint(&format!("api/prompt/{}", template_name));
        let response: PromptResponse = self
            .read(self.client.get(&url), "Failed to fetch prompt template")
            .await?;
        Ok(response.prompt)
    }

    async fn health_check(&self) -> Result<()> {
        let _: serde_json::Value = self
            .read(self.client.get(self.endpoint("health")), "Backend is unhealthy")
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::QuizgenError;

    #[test]
    fn test_success_false_uses_backend_message() {
        let body = r#"{"success": false, "error": "RapidAPI key not configured."}"#;
        let err = interpret::<TranscriptResponse>(500, body, "Failed to fetch transcript").unwrap_err();
        match err {
            QuizgenError::Backend(BackendError::Rejected(message)) => {
                assert_eq!(message, "RapidAPI key not configured.")
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_error_without_success_flag_on_bad_status() {
        let body = r#"{"error": "Website URL is required"}"#;
        let err = interpret::<ScrapeResponse>(400, body, "Failed to scrape website").unwrap_err();
        assert_eq!(err.to_string(), "Backend error: Website URL is required");
    }

    #[test]
    fn test_non_json_error_body_reports_status() {
        let err = interpret::<PromptResponse>(502, "<html>Bad gateway</html>", "Failed to fetch prompt template")
            .unwrap_err();
        assert!(matches!(
            err,
            QuizgenError::Backend(BackendError::Status { status: 502, .. })
        ));
    }

    #[test]
    fn test_success_payload_decodes() {
        let body = r#"{
            "success": true,
            "transcript": "hello world",
            "method": "rapidapi",
            "snippet_count": 2,
            "language": "en"
        }"#;
        let response: TranscriptResponse = interpret(200, body, "x").unwrap();
        assert_eq!(response.transcript, "hello world");
        assert_eq!(response.snippet_count, Some(2));
    }

    #[test]
    fn test_missing_field_is_decode_error() {
        let err = interpret::<PromptResponse>(200, r#"{"success": true}"#, "x").unwrap_err();
        assert!(matches!(err, QuizgenError::Backend(BackendError::Decode(_))));
    }

    #[test]
    fn test_transcript_languages_fall_back_to_english() {
        assert_eq!(transcript_languages(Language::Indonesian), vec!["id", "en"]);
        assert_eq!(transcript_languages(Language::English), vec!["en", "en"]);
    }

    #[test]
    fn test_endpoint_joins_without_double_slash() {
        let backend = HttpBackend::new(&BackendConfig {
            url: "http://localhost:5000/".to_string(),
            timeout_secs: 5,
        })
        .unwrap();
        assert_eq!(backend.endpoint("api/config"), "http://localhost:5000/api/config");
    }
}
