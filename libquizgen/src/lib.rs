//! Quizgen - quizzes and flashcards from documents, videos, websites and topics
//!
//! This library holds everything that is not terminal drawing: input
//! validation, prompt rendering, the backend and completion clients, parsing
//! of model replies, and the study session state machine.

pub mod config;
pub mod error;
pub mod logging;
pub mod parser;
pub mod prompt;
pub mod providers;
pub mod service;
pub mod session;
pub mod types;
pub mod validation;

// Re-export commonly used types
pub use config::Config;
pub use error::{QuizgenError, Result};
pub use session::{Session, View, ViewKind};
pub use types::{
    ContentSource, ContentType, Flashcard, GeneratedDeck, GenerationRequest, Language, QuizQuestion,
};
