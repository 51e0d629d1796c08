//! Mock collaborators for testing
//!
//! Configurable stand-ins for the backend and the completion endpoint. They
//! simulate successes, rejections, outages and latency, and record what they
//! were asked so tests can verify the generation flow without network access.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::time::sleep;

use crate::error::{BackendError, CompletionError, Result};
use crate::providers::{ApiCredentials, CompletionProvider, ContentBackend, ScrapedPage, Transcript};
use crate::types::Language;

/// Configuration for mock backend behavior
#[derive(Debug, Clone)]
pub struct MockBackendConfig {
    /// Key handed out by `/api/config`; `None` simulates an unconfigured backend
    pub api_key: Option<String>,

    pub model: String,

    pub transcript: String,

    pub page_content: String,

    pub page_title: Option<String>,

    /// Prompt templates by name
    pub prompts: HashMap<String, String>,

    /// Every call fails with this backend message
    pub rejection: Option<String>,

    /// Every call fails as if the server were down
    pub unreachable: bool,

    /// Delay before answering (simulates network latency)
    pub delay: Duration,

    pub config_calls: Arc<Mutex<usize>>,

    /// Transcript requests that were made (for verification)
    pub transcript_requests: Arc<Mutex<Vec<(String, Language)>>>,

    /// Website URLs that were scraped (for verification)
    pub scraped_urls: Arc<Mutex<Vec<String>>>,

    /// Prompt template names that were requested (for verification)
    pub prompt_requests: Arc<Mutex<Vec<String>>>,
}

impl Default for MockBackendConfig {
    fn default() -> Self {
        let mut prompts = HashMap::new();
        prompts.insert(
            "quiz_topic".to_string(),
            "Generate {{numQuestions}} multiple-choice questions about {{topic}} in {{language}}. \
             Respond with {\"questions\": [...]} only."
                .to_string(),
        );
        prompts.insert(
            "flashcards_topic".to_string(),
            "Generate {{numCards}} flash cards about {{topic}} in {{language}}. \
             Respond with {\"cards\": [...]} only."
                .to_string(),
        );

        Self {
            api_key: Some("mock-api-key".to_string()),
            model: "mock/model".to_string(),
            transcript: "Photosynthesis converts light energy into chemical energy.".to_string(),
            page_content: "# Rust\nRust is a systems programming language.".to_string(),
            page_title: Some("Rust".to_string()),
            prompts,
            rejection: None,
            unreachable: false,
            delay: Duration::from_millis(0),
            config_calls: Arc::new(Mutex::new(0)),
            transcript_requests: Arc::new(Mutex::new(Vec::new())),
            scraped_urls: Arc::new(Mutex::new(Vec::new())),
            prompt_requests: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

/// Mock backend for testing
pub struct MockBackend {
    config: MockBackendConfig,
}

impl MockBackend {
    pub fn new(config: MockBackendConfig) -> Self {
        Self { config }
    }

    /// A backend that answers every call successfully
    pub fn success() -> Self {
        Self::new(MockBackendConfig::default())
    }

    /// A backend whose `/api/config` has no key configured
    pub fn without_key() -> Self {
        Self::new(MockBackendConfig {
            api_key: None,
            ..Default::default()
        })
    }

    /// A backend that rejects every call with `message`
    pub fn rejecting(message: &str) -> Self {
        Self::new(MockBackendConfig {
            rejection: Some(message.to_string()),
            ..Default::default()
        })
    }

    /// A backend that cannot be reached
    pub fn unreachable() -> Self {
        Self::new(MockBackendConfig {
            unreachable: true,
            ..Default::default()
        })
    }

    pub fn with_transcript(transcript: &str) -> Self {
        Self::new(MockBackendConfig {
            transcript: transcript.to_string(),
            ..Default::default()
        })
    }

    pub fn config_call_count(&self) -> usize {
        *self.config.config_calls.lock().unwrap()
    }

    pub fn transcript_requests(&self) -> Vec<(String, Language)> {
        self.config.transcript_requests.lock().unwrap().clone()
    }

    pub fn scraped_urls(&self) -> Vec<String> {
        self.config.scraped_urls.lock().unwrap().clone()
    }

    pub fn prompt_requests(&self) -> Vec<String> {
        self.config.prompt_requests.lock().unwrap().clone()
    }

    async fn respond(&self) -> Result<()> {
        if !self.config.delay.is_zero() {
            sleep(self.config.delay).await;
        }

        if self.config.unreachable {
            return Err(BackendError::Network("connection refused".to_string()).into());
        }

        if let Some(message) = &self.config.rejection {
            return Err(BackendError::Rejected(message.clone()).into());
        }

        Ok(())
    }
}

#[async_trait]
impl ContentBackend for MockBackend {
    async fn fetch_config(&self) -> Result<ApiCredentials> {
        *self.config.config_calls.lock().unwrap() += 1;
        self.respond().await?;

        match &self.config.api_key {
            Some(key) => Ok(ApiCredentials::new(key.clone(), self.config.model.clone())),
            None => Err(BackendError::Rejected("OpenRouter API key not configured".to_string()).into()),
        }
    }

    async fn fetch_transcript(&self, video_url: &str, language: Language) -> Result<Transcript> {
        self.config
            .transcript_requests
            .lock()
            .unwrap()
            .push((video_url.to_string(), language));
        self.respond().await?;

        Ok(Transcript {
            text: self.config.transcript.clone(),
            method: Some("mock".to_string()),
            snippet_count: Some(1),
            language: Some(language.code().to_string()),
        })
    }

    async fn scrape_website(&self, website_url: &str) -> Result<ScrapedPage> {
        self.config
            .scraped_urls
            .lock()
            .unwrap()
            .push(website_url.to_string());
        self.respond().await?;

        Ok(ScrapedPage {
            content: self.config.page_content.clone(),
            title: self.config.page_title.clone(),
        })
    }

    async fn fetch_prompt(&self, template_name: &str) -> Result<String> {
        self.config
            .prompt_requests
            .lock()
            .unwrap()
            .push(template_name.to_string());
        self.respond().await?;

        self.config
            .prompts
            .get(template_name)
            .cloned()
            .ok_or_else(|| {
                BackendError::Status {
                    status: 404,
                    message: format!("Unknown prompt template: {}", template_name),
                }
                .into()
            })
    }

    async fn health_check(&self) -> Result<()> {
        self.respond().await
    }
}

/// Configuration for mock completion behavior
#[derive(Debug, Clone)]
pub struct MockCompletionConfig {
    /// Text returned for every prompt
    pub reply: String,

    /// Error returned instead of `reply`
    pub failure: Option<CompletionError>,

    pub delay: Duration,

    /// Prompts that were sent (for verification)
    pub prompts: Arc<Mutex<Vec<String>>>,

    /// Models that were requested (for verification)
    pub models: Arc<Mutex<Vec<String>>>,
}

impl Default for MockCompletionConfig {
    fn default() -> Self {
        Self {
            reply: sample_quiz_json(3),
            failure: None,
            delay: Duration::from_millis(0),
            prompts: Arc::new(Mutex::new(Vec::new())),
            models: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

/// Mock completion endpoint for testing
pub struct MockCompletion {
    config: MockCompletionConfig,
}

impl MockCompletion {
    pub fn new(config: MockCompletionConfig) -> Self {
        Self { config }
    }

    /// Reply with `text` to every prompt
    pub fn replying(text: impl Into<String>) -> Self {
        Self::new(MockCompletionConfig {
            reply: text.into(),
            ..Default::default()
        })
    }

    /// Fail every call with `error`
    pub fn failing(error: CompletionError) -> Self {
        Self::new(MockCompletionConfig {
            failure: Some(error),
            ..Default::default()
        })
    }

    pub fn with_delay(text: impl Into<String>, delay: Duration) -> Self {
        Self::new(MockCompletionConfig {
            reply: text.into(),
            delay,
            ..Default::default()
        })
    }

    pub fn call_count(&self) -> usize {
        self.config.prompts.lock().unwrap().len()
    }

    pub fn prompts(&self) -> Vec<String> {
        self.config.prompts.lock().unwrap().clone()
    }

    pub fn models(&self) -> Vec<String> {
        self.config.models.lock().unwrap().clone()
    }
}

#[async_trait]
impl CompletionProvider for MockCompletion {
    async fn complete(&self, credentials: &ApiCredentials, prompt: &str) -> Result<String> {
        self.config.prompts.lock().unwrap().push(prompt.to_string());
        self.config
            .models
            .lock()
            .unwrap()
            .push(credentials.model.clone());

        if !self.config.delay.is_zero() {
            sleep(self.config.delay).await;
        }

        match &self.config.failure {
            Some(error) => Err(error.clone().into()),
            None => Ok(self.config.reply.clone()),
        }
    }
}

/// A fenced completion carrying `count` well-formed questions
///
/// Question `i` has option `i % 4` as its correct answer.
pub fn sample_quiz_json(count: usize) -> String {
    let questions: Vec<serde_json::Value> = (0..count)
        .map(|i| {
            serde_json::json!({
                "question": format!("Question {}?", i + 1),
                "options": ["Alpha", "Bravo", "Charlie", "Delta"],
                "correctAnswer": i % 4,
                "explanation": format!("Explanation {}", i + 1),
            })
        })
        .collect();

    format!(
        "```json\n{}\n```",
        serde_json::json!({ "questions": questions })
    )
}

/// A bare completion carrying `count` flashcards
pub fn sample_flashcards_json(count: usize) -> String {
    let cards: Vec<serde_json::Value> = (0..count)
        .map(|i| {
            serde_json::json!({
                "front": format!("Term {}", i + 1),
                "back": format!("Definition {}", i + 1),
            })
        })
        .collect();

    serde_json::json!({ "cards": cards }).to_string()
}
