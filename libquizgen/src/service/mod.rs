//! Service layer for Quizgen
//!
//! A small, testable API over the providers that any front end (the TUI
//! today) can drive without duplicating logic.
//!
//! # Architecture
//!
//! `QuizgenService` is a facade coordinating:
//!
//! - `GenerationService`: one generation attempt from form to deck
//! - `ValidationService`: real-time setup form validation
//! - `EventBus`: progress event distribution
//!
//! # Example
//!
//! ```no_run
//! use libquizgen::service::QuizgenService;
//! use libquizgen::types::{ContentSource, ContentType, GenerationRequest, Language};
//!
//! # async fn example() -> libquizgen::Result<()> {
//! let service = QuizgenService::new()?;
//!
//! let response = service
//!     .generation()
//!     .generate(GenerationRequest {
//!         source: ContentSource::Topic,
//!         content_type: ContentType::Quiz,
//!         language: Language::English,
//!         count: 5,
//!         input: "The French Revolution".to_string(),
//!     })
//!     .await?;
//!
//! println!("Generated {} questions", response.deck.len());
//! # Ok(())
//! # }
//! ```

pub mod events;
pub mod generation;
pub mod validation;

use std::sync::Arc;
use std::time::Duration;

use self::events::{EventBus, EventReceiver};
use self::generation::GenerationService;
use self::validation::ValidationService;
use crate::providers::backend::HttpBackend;
use crate::providers::openrouter::OpenRouterClient;
use crate::providers::{CompletionProvider, ContentBackend};
use crate::{Config, Result};

/// Main service facade
///
/// Sub-services share the same `Arc<Config>` and event bus.
pub struct QuizgenService {
    config: Arc<Config>,
    backend: Arc<dyn ContentBackend>,
    generation: GenerationService,
    validation: ValidationService,
    event_bus: EventBus,
}

impl QuizgenService {
    /// Create a service from the default configuration file
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be loaded or an HTTP
    /// client cannot be built.
    pub fn new() -> Result<Self> {
        let config = Config::load()?;
        Self::from_config(config)
    }

    /// Create a service talking to the configured backend and completion endpoint
    pub fn from_config(config: Config) -> Result<Self> {
        let backend = HttpBackend::new(&config.backend)?;
        let completion =
            OpenRouterClient::new(&config.llm, Duration::from_secs(config.backend.timeout_secs))?;

        tracing::debug!(
            backend = backend.base_url(),
            endpoint = completion.endpoint(),
            "Service initialized"
        );

        Ok(Self::with_providers(
            config,
            Arc::new(backend),
            Arc::new(completion),
        ))
    }

    /// Create a service over explicit providers (mocks in tests)
    pub fn with_providers(
        config: Config,
        backend: Arc<dyn ContentBackend>,
        completion: Arc<dyn CompletionProvider>,
    ) -> Self {
        let config = Arc::new(config);
        let event_bus = EventBus::new(100);

        let generation = GenerationService::new(
            Arc::clone(&config),
            Arc::clone(&backend),
            completion,
            event_bus.clone(),
        );
        let validation = ValidationService::new(Arc::clone(&config));

        Self {
            config,
            backend,
            generation,
            validation,
            event_bus,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn generation(&self) -> &GenerationService {
        &self.generation
    }

    pub fn validation(&self) -> &ValidationService {
        &self.validation
    }

    /// Check that the backend answers `GET /health`
    pub async fn health_check(&self) -> Result<()> {
        self.backend.health_check().await
    }

    /// Subscribe to service events
    ///
    /// Only events emitted after this call are received.
    pub fn subscribe(&self) -> EventReceiver {
        self.event_bus.subscribe()
    }
}
