//! Event system for generation progress
//!
//! This module provides an in-process event bus for distributing progress
//! events to subscribers without blocking the generation task.
//!
//! # Architecture
//!
//! The event bus uses `tokio::sync::broadcast` for multi-subscriber support.
//! The generation service emits events while it runs; the terminal UI turns
//! them into reducer actions.
//!
//! If no subscribers exist, events are dropped immediately. Subscribers can
//! lag without blocking emitters.
//!
//! # Example
//!
//! ```no_run
//! use libquizgen::service::events::{Event, EventBus, GenerationStage};
//!
//! # async fn example() {
//! let event_bus = EventBus::new(100);
//! let mut receiver = event_bus.subscribe();
//!
//! event_bus.emit(Event::GenerationProgress {
//!     generation_id: "abc123".to_string(),
//!     stage: GenerationStage::FetchingContent,
//!     message: "Fetching YouTube transcript...".to_string(),
//! });
//!
//! if let Ok(event) = receiver.recv().await {
//!     println!("Received: {:?}", event);
//! }
//! # }
//! ```

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

use crate::types::{ContentSource, ContentType, GeneratedDeck};

/// Event receiver type alias
pub type EventReceiver = broadcast::Receiver<Event>;

/// Event bus for distributing progress events
#[derive(Clone)]
pub struct EventBus {
    sender: broadcast::Sender<Event>,
}

impl EventBus {
    /// Create a new event bus with the specified capacity
    ///
    /// The capacity determines how many events can be buffered per subscriber
    /// before older events are dropped (if the subscriber is lagging).
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Subscribe to events emitted after this call
    pub fn subscribe(&self) -> EventReceiver {
        self.sender.subscribe()
    }

    /// Emit an event to all subscribers
    ///
    /// Never blocks. With no subscribers the event is dropped.
    pub fn emit(&self, event: Event) {
        // send() only fails when nobody is listening
        let _ = self.sender.send(event);
    }

    /// Get the number of active subscribers
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

/// Step of a generation attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GenerationStage {
    Credentials,
    FetchingContent,
    Generating,
    Parsing,
}

impl GenerationStage {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Credentials => "Loading API configuration",
            Self::FetchingContent => "Fetching content",
            Self::Generating => "Generating",
            Self::Parsing => "Reading response",
        }
    }
}

/// Events emitted while a generation attempt runs
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    GenerationStarted {
        generation_id: String,
        source: ContentSource,
        content_type: ContentType,
    },

    GenerationProgress {
        generation_id: String,
        stage: GenerationStage,
        /// Human-readable status line (e.g. "Scraping website content...")
        message: String,
    },

    GenerationCompleted {
        generation_id: String,
        deck: GeneratedDeck,
    },

    GenerationFailed {
        generation_id: String,
        /// Display text of the error
        error: String,
    },
}

impl Event {
    pub fn generation_id(&self) -> &str {
        match self {
            Event::GenerationStarted { generation_id, .. }
            | Event::GenerationProgress { generation_id, .. }
            | Event::GenerationCompleted { generation_id, .. }
            | Event::GenerationFailed { generation_id, .. } => generation_id,
        }
    }

    /// Whether this event ends its generation attempt
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            Event::GenerationCompleted { .. } | Event::GenerationFailed { .. }
        )
    }
}
