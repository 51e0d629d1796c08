//! quizgen-tui library
//!
//! Exports the application state, reducer and rendering for testing.

pub mod app;
pub mod error;
pub mod services;
pub mod terminal;
pub mod ui;

// Re-export commonly used types
pub use app::{reduce, Action, AppState, SetupField};
pub use error::{Result, TuiError};
