//! Generation service
//!
//! Runs one generation attempt from a setup form to a parsed deck:
//!
//! 1. validate the form
//! 2. resolve completion credentials (config first, then the backend)
//! 3. gather content for the chosen source
//! 4. render the prompt, call the completion endpoint, parse the reply
//!
//! Every attempt emits `GenerationStarted` followed by progress events and
//! exactly one of `GenerationCompleted` or `GenerationFailed`. Nothing is
//! retried.

use std::io::ErrorKind;
use std::sync::Arc;

use secrecy::ExposeSecret;
use tracing::{info, warn};

use crate::config::Config;
use crate::error::{BackendError, InputError, Result};
use crate::parser::parse_deck;
use crate::prompt::{content_template, render, topic_template_name, PromptVars};
use crate::providers::openrouter::DEFAULT_MODEL;
use crate::providers::{ApiCredentials, CompletionProvider, ContentBackend};
use crate::service::events::{Event, EventBus, GenerationStage};
use crate::service::validation::ValidationService;
use crate::types::{ContentSource, ContentType, GeneratedDeck, GenerationRequest};
use crate::validation::{sanitize_text, sanitize_url};

/// Outcome of a successful attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationResponse {
    pub generation_id: String,
    pub deck: GeneratedDeck,
}

/// Identifier for a new generation attempt
pub fn new_generation_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

#[derive(Clone)]
pub struct GenerationService {
    config: Arc<Config>,
    backend: Arc<dyn ContentBackend>,
    completion: Arc<dyn CompletionProvider>,
    validation: ValidationService,
    event_bus: EventBus,
}

impl GenerationService {
    pub fn new(
        config: Arc<Config>,
        backend: Arc<dyn ContentBackend>,
        completion: Arc<dyn CompletionProvider>,
        event_bus: EventBus,
    ) -> Self {
        let validation = ValidationService::new(Arc::clone(&config));
        Self {
            config,
            backend,
            completion,
            validation,
            event_bus,
        }
    }

    /// Run one attempt under a fresh generation id
    pub async fn generate(&self, request: GenerationRequest) -> Result<GenerationResponse> {
        self.generate_with_id(new_generation_id(), request).await
    }

    /// Run one attempt under a caller-chosen id
    ///
    /// Lets a caller subscribe and filter events before the attempt starts.
    pub async fn generate_with_id(
        &self,
        generation_id: String,
        request: GenerationRequest,
    ) -> Result<GenerationResponse> {
        info!(
            generation_id = %generation_id,
            source = %request.source,
            content_type = request.content_type.label(),
            count = request.count,
            "Generation started"
        );

        self.event_bus.emit(Event::GenerationStarted {
            generation_id: generation_id.clone(),
            source: request.source,
            content_type: request.content_type,
        });

        match self.run(&generation_id, &request).await {
            Ok(deck) => {
                info!(generation_id = %generation_id, items = deck.len(), "Generation completed");
                self.event_bus.emit(Event::GenerationCompleted {
                    generation_id: generation_id.clone(),
                    deck: deck.clone(),
                });
                Ok(GenerationResponse {
                    generation_id,
                    deck,
                })
            }
            Err(e) => {
                warn!(generation_id = %generation_id, error = %e, "Generation failed");
                self.event_bus.emit(Event::GenerationFailed {
                    generation_id,
                    error: e.to_string(),
                });
                Err(e)
            }
        }
    }

    async fn run(&self, generation_id: &str, request: &GenerationRequest) -> Result<GeneratedDeck> {
        self.validation.validate(&request.into()).into_result()?;

        self.progress(
            generation_id,
            GenerationStage::Credentials,
            "Loading API configuration...",
        );
        let credentials = self.resolve_credentials().await?;

        let prompt = self.build_prompt(generation_id, request).await?;

        let noun = match request.content_type {
            ContentType::Quiz => "quiz",
            ContentType::Flashcards => "flash cards",
        };
        self.progress(
            generation_id,
            GenerationStage::Generating,
            &format!("Generating {}...", noun),
        );
        let reply = self.completion.complete(&credentials, &prompt).await?;

        self.progress(generation_id, GenerationStage::Parsing, "Parsing response...");
        Ok(parse_deck(&reply, request.content_type)?)
    }

    fn progress(&self, generation_id: &str, stage: GenerationStage, message: &str) {
        tracing::debug!(generation_id, ?stage, "{}", message);
        self.event_bus.emit(Event::GenerationProgress {
            generation_id: generation_id.to_string(),
            stage,
            message: message.to_string(),
        });
    }

    /// Credentials from `[llm]` when a key is configured, else from the backend
    ///
    /// A configured model overrides whatever the backend suggests.
    pub async fn resolve_credentials(&self) -> Result<ApiCredentials> {
        let llm = &self.config.llm;

        let configured_key = llm
            .api_key
            .as_ref()
            .map(|k| k.expose_secret())
            .filter(|k| !k.trim().is_empty());
        if let Some(key) = configured_key {
            let model = llm.model.clone().unwrap_or_else(|| DEFAULT_MODEL.to_string());
            tracing::debug!(model = %model, "Using API key from config");
            return Ok(ApiCredentials::new(key, model));
        }

        let mut credentials = self.backend.fetch_config().await?;
        if let Some(model) = llm.model.as_ref().filter(|m| !m.trim().is_empty()) {
            credentials.model = model.clone();
        }
        Ok(credentials)
    }

    async fn build_prompt(&self, generation_id: &str, request: &GenerationRequest) -> Result<String> {
        let vars = PromptVars::new(request.content_type, request.count, request.language);

        if request.source == ContentSource::Topic {
            let topic = sanitize_text(&request.input);
            self.progress(
                generation_id,
                GenerationStage::FetchingContent,
                "Loading prompt template...",
            );
            let template = self
                .backend
                .fetch_prompt(topic_template_name(request.content_type))
                .await?;
            return Ok(render(&template, &vars.with_topic(topic)));
        }

        let content = self.gather_content(generation_id, request).await?;
        Ok(render(
            content_template(request.content_type),
            &vars.with_content(content),
        ))
    }

    /// Text of the document, transcript or page behind a non-topic request
    pub async fn gather_content(&self, generation_id: &str, request: &GenerationRequest) -> Result<String> {
        match request.source {
            ContentSource::Document => {
                self.progress(generation_id, GenerationStage::FetchingContent, "Reading document...");
                read_document(&request.input).await
            }
            ContentSource::Youtube => {
                self.progress(
                    generation_id,
                    GenerationStage::FetchingContent,
                    "Fetching YouTube transcript...",
                );
                let url = sanitize_url(&request.input);
                let transcript = self.backend.fetch_transcript(&url, request.language).await?;
                non_empty(transcript.text, "transcript")
            }
            ContentSource::Website => {
                self.progress(
                    generation_id,
                    GenerationStage::FetchingContent,
                    "Scraping website content...",
                );
                let url = sanitize_url(&request.input);
                let page = self.backend.scrape_website(&url).await?;
                info!(
                    title = page.title.as_deref().unwrap_or("Content extracted"),
                    "Website content loaded"
                );
                non_empty(page.content, "website content")
            }
            ContentSource::Topic => Ok(sanitize_text(&request.input)),
        }
    }
}

fn non_empty(text: String, what: &'static str) -> Result<String> {
    if text.trim().is_empty() {
        return Err(BackendError::EmptyContent(what).into());
    }
    Ok(text)
}

/// Read a document as UTF-8 text
///
/// Missing and empty files are reported the same way as an empty path.
pub async fn read_document(path: &str) -> Result<String> {
    let path = shellexpand::tilde(path.trim()).to_string();

    let text = match tokio::fs::read_to_string(&path).await {
        Ok(text) => text,
        Err(e) if e.kind() == ErrorKind::NotFound => return Err(InputError::MissingDocument.into()),
        Err(e) => return Err(InputError::UnreadableDocument(e.to_string()).into()),
    };

    if text.trim().is_empty() {
        return Err(InputError::MissingDocument.into());
    }

    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LlmConfig;
    use crate::error::QuizgenError;
    use crate::providers::mock::{MockBackend, MockBackendConfig, MockCompletion};
    use crate::types::Language;
    use secrecy::SecretString;

    fn service_with(config: Config, backend: MockBackend) -> GenerationService {
        GenerationService::new(
            Arc::new(config),
            Arc::new(backend),
            Arc::new(MockCompletion::replying("{}")),
            EventBus::new(16),
        )
    }

    #[tokio::test]
    async fn test_configured_key_skips_backend() {
        let config = Config {
            llm: LlmConfig {
                api_key: Some(SecretString::from("sk-local")),
                ..Default::default()
            },
            ..Default::default()
        };
        let backend_config = MockBackendConfig::default();
        let calls = Arc::clone(&backend_config.config_calls);
        let service = service_with(config, MockBackend::new(backend_config));

        let credentials = service.resolve_credentials().await.unwrap();
        assert_eq!(credentials.model, DEFAULT_MODEL);
        assert_eq!(credentials.bearer(), "Bearer sk-local");
        assert_eq!(*calls.lock().unwrap(), 0);
    }

    #[tokio::test]
    async fn test_configured_model_overrides_backend_model() {
        let config = Config {
            llm: LlmConfig {
                model: Some("meta-llama/llama-3.1-8b-instruct".to_string()),
                ..Default::default()
            },
            ..Default::default()
        };
        let service = service_with(config, MockBackend::success());

        let credentials = service.resolve_credentials().await.unwrap();
        assert_eq!(credentials.model, "meta-llama/llama-3.1-8b-instruct");
        assert_eq!(credentials.bearer(), "Bearer mock-api-key");
    }

    #[tokio::test]
    async fn test_backend_without_key_fails() {
        let service = service_with(Config::default(), MockBackend::without_key());
        let err = service.resolve_credentials().await.unwrap_err();
        assert!(err.to_string().contains("OpenRouter API key not configured"));
    }

    #[tokio::test]
    async fn test_blank_transcript_is_rejected() {
        let service = service_with(Config::default(), MockBackend::with_transcript(" \n "));
        let request = GenerationRequest {
            source: ContentSource::Youtube,
            content_type: ContentType::Quiz,
            language: Language::English,
            count: 5,
            input: "https://www.youtube.com/watch?v=dQw4w9WgXcQ".to_string(),
        };

        let err = service.gather_content("gen-1", &request).await.unwrap_err();
        assert!(matches!(
            err,
            QuizgenError::Backend(BackendError::EmptyContent("transcript"))
        ));
        assert!(!err.is_inline());
    }

    #[tokio::test]
    async fn test_blank_page_is_rejected() {
        let backend = MockBackend::new(MockBackendConfig {
            page_content: String::new(),
            ..Default::default()
        });
        let service = service_with(Config::default(), backend);
        let request = GenerationRequest {
            source: ContentSource::Website,
            content_type: ContentType::Flashcards,
            language: Language::English,
            count: 5,
            input: "https://www.rust-lang.org".to_string(),
        };

        let err = service.gather_content("gen-1", &request).await.unwrap_err();
        assert_eq!(
            err.to_string(),
            "Backend error: The website content came back empty. Please try another source."
        );
    }

    #[tokio::test]
    async fn test_read_document_missing_and_empty() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.txt");
        let err = read_document(missing.to_str().unwrap()).await.unwrap_err();
        assert_eq!(err.to_string(), "Please upload a document first");

        let empty = dir.path().join("empty.txt");
        std::fs::write(&empty, "  \n").unwrap();
        let err = read_document(empty.to_str().unwrap()).await.unwrap_err();
        assert_eq!(err.to_string(), "Please upload a document first");
    }

    #[tokio::test]
    async fn test_read_document_rejects_binary() {
        let dir = tempfile::tempdir().unwrap();
        let binary = dir.path().join("image.png");
        std::fs::write(&binary, [0x89, 0x50, 0x4e, 0x47, 0xff, 0xfe]).unwrap();

        let err = read_document(binary.to_str().unwrap()).await.unwrap_err();
        assert!(err.to_string().starts_with("Error reading file:"));
    }
}
