//! Study session state
//!
//! A [`Session`] owns whichever view is active and all of that view's data.
//! It starts in [`View::Setup`] and moves between views only through its
//! named entry points:
//!
//! ```text
//! setup ──quiz_ready──────▶ quiz ──finish_quiz──▶ results
//!   ▲  ──flashcards_ready─▶ flashcards            │
//!   │                         │                   │
//!   └── stop + confirm_stop ──┴── stop ◀── reset ─┘
//! ```
//!
//! An entry point that does not apply to the active view is a no-op and
//! returns `false` (or [`StopOutcome::Ignored`]).
//!
//! # Examples
//!
//! ```
//! use libquizgen::session::{Session, ViewKind};
//! use libquizgen::types::QuizQuestion;
//!
//! let mut session = Session::new();
//! session.quiz_ready(vec![QuizQuestion {
//!     question: "2 + 2?".into(),
//!     options: vec!["3".into(), "4".into(), "5".into(), "22".into()],
//!     correct_answer: 1,
//!     explanation: String::new(),
//! }]);
//!
//! session.select_option(1);
//! session.finish_quiz();
//!
//! assert_eq!(session.kind(), ViewKind::Results);
//! assert_eq!(session.results().map(|r| r.percentage_label()), Some("100.0".to_string()));
//! ```

use serde::Serialize;

use crate::types::{Flashcard, GeneratedDeck, QuizQuestion};

pub mod flashcards;
pub mod quiz;
pub mod results;

pub use flashcards::FlashcardRunner;
pub use quiz::{OptionState, QuizRunner};
pub use results::{QuestionOutcome, QuizResults};

/// Prompt shown before a quiz is abandoned
pub const STOP_QUIZ_PROMPT: &str = "Are you sure you want to stop the quiz? Your progress will be lost.";

/// Position within a quiz or deck
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Progress {
    /// 1-based
    pub position: usize,
    pub total: usize,
    /// 0-100, rounded
    pub percent: u8,
}

impl Progress {
    pub fn new(position: usize, total: usize, completed: usize) -> Self {
        let percent = if total == 0 {
            0
        } else {
            (completed as f64 / total as f64 * 100.0).round().min(100.0) as u8
        };

        Self {
            position,
            total,
            percent,
        }
    }
}

/// The active view and the data it owns
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum View {
    #[default]
    Setup,
    Quiz(QuizRunner),
    Flashcards(FlashcardRunner),
    Results(QuizResults),
}

/// Discriminant of [`View`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewKind {
    Setup,
    Quiz,
    Flashcards,
    Results,
}

impl ViewKind {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Setup => "Setup",
            Self::Quiz => "Quiz",
            Self::Flashcards => "Flash Cards",
            Self::Results => "Results",
        }
    }
}

impl View {
    pub fn kind(&self) -> ViewKind {
        match self {
            View::Setup => ViewKind::Setup,
            View::Quiz(_) => ViewKind::Quiz,
            View::Flashcards(_) => ViewKind::Flashcards,
            View::Results(_) => ViewKind::Results,
        }
    }
}

/// What a stop request did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopOutcome {
    /// Back in setup
    Stopped,
    /// The quiz is still running until [`Session::confirm_stop`]
    ConfirmationRequired,
    /// Nothing to stop
    Ignored,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Session {
    view: View,
    stop_pending: bool,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> &View {
        &self.view
    }

    pub fn kind(&self) -> ViewKind {
        self.view.kind()
    }

    pub fn quiz(&self) -> Option<&QuizRunner> {
        match &self.view {
            View::Quiz(quiz) => Some(quiz),
            _ => None,
        }
    }

    pub fn flashcards(&self) -> Option<&FlashcardRunner> {
        match &self.view {
            View::Flashcards(cards) => Some(cards),
            _ => None,
        }
    }

    pub fn results(&self) -> Option<&QuizResults> {
        match &self.view {
            View::Results(results) => Some(results),
            _ => None,
        }
    }

    /// Whether a quiz stop is waiting for confirmation
    pub fn stop_pending(&self) -> bool {
        self.stop_pending
    }

    fn enter(&mut self, view: View) {
        tracing::debug!(from = ?self.kind(), to = ?view.kind(), "View transition");
        self.view = view;
        self.stop_pending = false;
    }

    // === Setup ===

    /// Start a quiz from setup; empty question lists are ignored
    pub fn quiz_ready(&mut self, questions: Vec<QuizQuestion>) -> bool {
        if self.kind() != ViewKind::Setup {
            return false;
        }
        match QuizRunner::new(questions) {
            Some(runner) => {
                self.enter(View::Quiz(runner));
                true
            }
            None => false,
        }
    }

    /// Start browsing flashcards from setup; empty decks are ignored
    pub fn flashcards_ready(&mut self, cards: Vec<Flashcard>) -> bool {
        if self.kind() != ViewKind::Setup {
            return false;
        }
        match FlashcardRunner::new(cards) {
            Some(runner) => {
                self.enter(View::Flashcards(runner));
                true
            }
            None => false,
        }
    }

    pub fn deck_ready(&mut self, deck: GeneratedDeck) -> bool {
        match deck {
            GeneratedDeck::Quiz(questions) => self.quiz_ready(questions),
            GeneratedDeck::Flashcards(cards) => self.flashcards_ready(cards),
        }
    }

    // === Quiz ===

    pub fn select_option(&mut self, option: usize) -> bool {
        if self.stop_pending {
            return false;
        }
        match &mut self.view {
            View::Quiz(quiz) => quiz.select(option),
            _ => false,
        }
    }

    pub fn next_question(&mut self) -> bool {
        if self.stop_pending {
            return false;
        }
        match &mut self.view {
            View::Quiz(quiz) => quiz.advance(),
            _ => false,
        }
    }

    /// Score the quiz and show results once the last question is answered
    pub fn finish_quiz(&mut self) -> bool {
        if self.stop_pending {
            return false;
        }
        let results = match &self.view {
            View::Quiz(quiz) => quiz.finish(),
            _ => None,
        };

        match results {
            Some(results) => {
                tracing::info!(score = results.score, total = results.total, "Quiz finished");
                self.enter(View::Results(results));
                true
            }
            None => false,
        }
    }

    /// Advance, or finish when the last question is answered
    pub fn next_or_finish(&mut self) -> bool {
        self.next_question() || self.finish_quiz()
    }

    // === Flashcards ===

    pub fn next_card(&mut self) -> bool {
        match &mut self.view {
            View::Flashcards(cards) => cards.next(),
            _ => false,
        }
    }

    pub fn previous_card(&mut self) -> bool {
        match &mut self.view {
            View::Flashcards(cards) => cards.previous(),
            _ => false,
        }
    }

    pub fn flip_card(&mut self) -> bool {
        match &mut self.view {
            View::Flashcards(cards) => {
                cards.flip();
                true
            }
            _ => false,
        }
    }

    // === Leaving ===

    /// Stop the running quiz or flashcards
    ///
    /// Flashcards stop immediately. A quiz waits for [`Session::confirm_stop`].
    pub fn stop(&mut self) -> StopOutcome {
        match self.kind() {
            ViewKind::Flashcards => {
                self.enter(View::Setup);
                StopOutcome::Stopped
            }
            ViewKind::Quiz => {
                self.stop_pending = true;
                StopOutcome::ConfirmationRequired
            }
            _ => StopOutcome::Ignored,
        }
    }

    /// Discard the quiz after a stop request
    pub fn confirm_stop(&mut self) -> bool {
        if !self.stop_pending || self.kind() != ViewKind::Quiz {
            return false;
        }
        tracing::info!("Quiz stopped before completion");
        self.enter(View::Setup);
        true
    }

    /// Keep the quiz running after a stop request
    pub fn cancel_stop(&mut self) -> bool {
        std::mem::take(&mut self.stop_pending)
    }

    /// Leave the results view, discarding everything
    pub fn reset(&mut self) -> bool {
        if self.kind() != ViewKind::Results {
            return false;
        }
        self.enter(View::Setup);
        true
    }
}
