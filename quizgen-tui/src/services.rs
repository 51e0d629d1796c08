//! Service layer adapter for the TUI
//!
//! Bridges the async [`QuizgenService`] to the synchronous event loop.
//!
//! # Architecture
//!
//! - `ServiceHandle`: owns the service and a tokio runtime
//! - Generation: spawned on the runtime; progress comes back over a
//!   crossbeam channel as [`GenerationUpdate`]s
//! - Health: a one-shot backend check on the same kind of channel
//!
//! # Example
//!
//! ```no_run
//! use libquizgen::{Config, ContentSource, ContentType, GenerationRequest, Language};
//! use quizgen_tui::services::{GenerationUpdate, ServiceHandle};
//!
//! # fn example() -> quizgen_tui::error::Result<()> {
//! let services = ServiceHandle::new(Config::default())?;
//!
//! let (generation_id, updates) = services.generate(GenerationRequest {
//!     source: ContentSource::Topic,
//!     content_type: ContentType::Flashcards,
//!     language: Language::English,
//!     count: 10,
//!     input: "Photosynthesis".to_string(),
//! });
//!
//! for update in updates.iter() {
//!     if update.is_terminal() {
//!         break;
//!     }
//! }
//! # Ok(())
//! # }
//! ```

use std::sync::Arc;

use crossbeam_channel::{unbounded, Receiver, Sender};
use libquizgen::service::events::{Event, EventReceiver};
use libquizgen::service::generation::new_generation_id;
use libquizgen::service::QuizgenService;
use libquizgen::{Config, GeneratedDeck, GenerationRequest};
use tokio::sync::broadcast::error::RecvError;

use crate::app::Action;
use crate::error::Result;

/// What the event loop hears about one generation attempt
///
/// Exactly one `Completed` or `Failed` arrives per attempt.
#[derive(Debug, Clone)]
pub enum GenerationUpdate {
    Progress { message: String },
    Completed { deck: GeneratedDeck },
    Failed { error: String, inline: bool },
}

impl GenerationUpdate {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, GenerationUpdate::Progress { .. })
    }
}

impl From<GenerationUpdate> for Action {
    fn from(update: GenerationUpdate) -> Self {
        match update {
            GenerationUpdate::Progress { message } => Action::GenerationProgress { message },
            GenerationUpdate::Completed { deck } => Action::GenerationSucceeded { deck },
            GenerationUpdate::Failed { error, inline } => Action::GenerationFailed { error, inline },
        }
    }
}

/// Result of the startup backend check
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendHealth {
    Healthy,
    Unavailable(String),
}

impl BackendHealth {
    /// Status bar text
    pub fn status_message(&self, backend_url: &str) -> String {
        match self {
            BackendHealth::Healthy => format!("Backend connected: {}", backend_url),
            BackendHealth::Unavailable(error) => format!("Backend unavailable: {}", error),
        }
    }
}

/// Service handle for TUI operations
pub struct ServiceHandle {
    service: Arc<QuizgenService>,
    runtime: tokio::runtime::Runtime,
}

impl ServiceHandle {
    /// Build the service from `config` with HTTP providers
    ///
    /// # Errors
    ///
    /// Returns an error if the tokio runtime or the HTTP clients cannot be
    /// created.
    pub fn new(config: Config) -> Result<Self> {
        let service = QuizgenService::from_config(config)?;
        Self::from_service(service)
    }

    /// Wrap an existing service (mock providers in tests)
    pub fn from_service(service: QuizgenService) -> Result<Self> {
        let runtime = tokio::runtime::Runtime::new()?;
        Ok(Self {
            service: Arc::new(service),
            runtime,
        })
    }

    pub fn config(&self) -> &Config {
        self.service.config()
    }

    /// Spawn one generation attempt
    ///
    /// Returns immediately with the attempt's id and a receiver for its
    /// updates. Failures are reported through the channel, never here.
    pub fn generate(&self, request: GenerationRequest) -> (String, Receiver<GenerationUpdate>) {
        let (tx, rx) = unbounded();
        let generation_id = new_generation_id();

        // Subscribe before spawning so no progress event is missed
        let events = self.service.subscribe();
        self.runtime
            .spawn(forward_progress(events, generation_id.clone(), tx.clone()));

        let service = Arc::clone(&self.service);
        let id = generation_id.clone();
        self.runtime.spawn(async move {
            let update = match service.generation().generate_with_id(id, request).await {
                Ok(response) => GenerationUpdate::Completed {
                    deck: response.deck,
                },
                Err(e) => GenerationUpdate::Failed {
                    inline: e.is_inline(),
                    error: e.to_string(),
                },
            };
            if tx.send(update).is_err() {
                tracing::debug!("Generation receiver dropped before completion");
            }
        });

        (generation_id, rx)
    }

    /// Check the backend in the background
    pub fn check_health(&self) -> Receiver<BackendHealth> {
        let (tx, rx) = unbounded();
        let service = Arc::clone(&self.service);

        self.runtime.spawn(async move {
            let health = match service.health_check().await {
                Ok(()) => BackendHealth::Healthy,
                Err(e) => {
                    tracing::warn!(error = %e, "Backend health check failed");
                    BackendHealth::Unavailable(e.to_string())
                }
            };
            let _ = tx.send(health);
        });

        rx
    }
}

/// Forward progress events for one attempt until it ends
async fn forward_progress(
    mut events: EventReceiver,
    generation_id: String,
    tx: Sender<GenerationUpdate>,
) {
    loop {
        match events.recv().await {
            Ok(event) if event.generation_id() != generation_id => {}
            Ok(event) if event.is_terminal() => break,
            Ok(Event::GenerationProgress { message, .. }) => {
                if tx.send(GenerationUpdate::Progress { message }).is_err() {
                    break;
                }
            }
            Ok(_) => {}
            Err(RecvError::Lagged(skipped)) => {
                tracing::warn!("Event receiver lagged, skipped {} events", skipped);
            }
            Err(RecvError::Closed) => break,
        }
    }
}
