//! Actions for the reducer pattern
//!
//! All state transitions are triggered by actions. Key events are mapped to
//! the higher-level actions below by the reducer itself.

use crossterm::event::KeyEvent;
use libquizgen::GeneratedDeck;

/// Actions that trigger state transitions
#[derive(Debug, Clone)]
pub enum Action {
    // === UI Events ===
    /// Keyboard input event
    Key(KeyEvent),

    /// Periodic tick, drives the busy spinner
    Tick,

    /// Terminal resize event
    Resize(u16, u16),

    // === Global ===
    Quit,
    ShowHelp,
    HideHelp,
    DismissError,
    SetStatus(String),

    // === Setup ===
    /// Text of the input field changed
    SetupInputChanged(String),
    FocusNext,
    FocusPrevious,
    NextSource,
    PreviousSource,
    ToggleContentType,
    ToggleLanguage,
    IncrementCount,
    DecrementCount,

    /// Ctrl+G; queues a generation when the form is valid
    GenerateRequested,

    // === Generation ===
    /// The attempt was spawned under this id
    GenerationStarted { generation_id: String },

    GenerationProgress { message: String },

    GenerationSucceeded { deck: GeneratedDeck },

    /// `inline` errors belong next to the input field instead of an overlay
    GenerationFailed { error: String, inline: bool },

    // === Quiz ===
    SelectOption(usize),
    /// Advance, or finish on the last question
    NextQuestion,
    StopRequested,
    ConfirmStop,
    CancelStop,

    // === Flashcards ===
    NextCard,
    PreviousCard,
    FlipCard,

    // === Results ===
    ScrollUp,
    ScrollDown,
    Reset,
}
