//! Remote collaborators used during generation
//!
//! Two seams sit behind traits so the generation service can run against
//! real HTTP clients or the in-crate mocks:
//!
//! - [`ContentBackend`]: the companion backend that hands out credentials,
//!   fetches YouTube transcripts, scrapes websites and serves topic prompts
//! - [`CompletionProvider`]: an OpenAI-compatible chat completion endpoint
//!
//! # Examples
//!
//! ```no_run
//! use libquizgen::config::Config;
//! use libquizgen::providers::{backend::HttpBackend, ContentBackend};
//! use libquizgen::types::Language;
//!
//! # async fn example() -> libquizgen::error::Result<()> {
//! let config = Config::default();
//! let backend = HttpBackend::new(&config.backend)?;
//!
//! let transcript = backend
//!     .fetch_transcript("https://www.youtube.com/watch?v=dQw4w9WgXcQ", Language::English)
//!     .await?;
//! println!("{} characters of transcript", transcript.text.len());
//! # Ok(())
//! # }
//! ```

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};

use crate::error::Result;
use crate::types::Language;

pub mod backend;
pub mod openrouter;

// Mocks ship in all builds so integration tests and the TUI tests can use them
pub mod mock;

/// API key and model for the completion endpoint
pub struct ApiCredentials {
    api_key: SecretString,
    pub model: String,
}

impl ApiCredentials {
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            api_key: SecretString::from(api_key.into()),
            model: model.into(),
        }
    }

    /// Value for the `Authorization` header
    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.api_key.expose_secret())
    }

    pub fn has_key(&self) -> bool {
        !self.api_key.expose_secret().trim().is_empty()
    }
}

impl std::fmt::Debug for ApiCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiCredentials")
            .field("api_key", &"[REDACTED]")
            .field("model", &self.model)
            .finish()
    }
}

/// A fetched YouTube transcript
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transcript {
    pub text: String,
    /// Retrieval method reported by the backend
    pub method: Option<String>,
    pub snippet_count: Option<u64>,
    pub language: Option<String>,
}

/// Main content of a scraped web page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScrapedPage {
    pub content: String,
    pub title: Option<String>,
}

/// Companion backend
#[async_trait]
pub trait ContentBackend: Send + Sync {
    /// Fetch the completion API key and model name
    ///
    /// # Errors
    ///
    /// Returns `BackendError::Rejected` when the backend has no key configured.
    async fn fetch_config(&self) -> Result<ApiCredentials>;

    /// Fetch the transcript of a single YouTube video
    ///
    /// The backend is asked for `language` first and English second.
    async fn fetch_transcript(&self, video_url: &str, language: Language) -> Result<Transcript>;

    /// Scrape the main content of a website
    async fn scrape_website(&self, website_url: &str) -> Result<ScrapedPage>;

    /// Fetch a named prompt template such as `quiz_topic`
    async fn fetch_prompt(&self, template_name: &str) -> Result<String>;

    /// Check that the backend is reachable
    async fn health_check(&self) -> Result<()>;
}

/// Chat completion endpoint
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Send `prompt` as a single user message and return the reply text
    ///
    /// # Errors
    ///
    /// - `CompletionError::Unauthorized` for 401/403
    /// - `CompletionError::Status` for any other non-2xx status
    /// - `CompletionError::EmptyChoices` when the reply has no choices
    async fn complete(&self, credentials: &ApiCredentials, prompt: &str) -> Result<String>;
}
