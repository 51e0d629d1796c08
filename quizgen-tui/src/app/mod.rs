//! Application module
//!
//! - Actions: what can happen
//! - State: what is true right now
//! - Reducer: pure function (State, Action) -> State
//!
//! The study session itself lives in [`libquizgen::Session`]; the state here
//! wraps it together with the setup form, overlays and generation status.

pub mod actions;
pub mod event;
pub mod reducer;
pub mod state;

pub use actions::Action;
pub use reducer::reduce;
pub use state::{AppState, GenerationState, SetupField, SetupState, StatusBarState, UiConfig};
