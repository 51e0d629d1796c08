//! End-to-end quiz flow through the reducer
//!
//! Setup -> generation -> quiz -> results -> setup, plus stopping a quiz
//! with and without confirming.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use libquizgen::{GeneratedDeck, QuizQuestion, ViewKind};
use quizgen_tui::app::{reduce, Action, AppState};

fn key(c: char) -> Action {
    Action::Key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE))
}

fn enter() -> Action {
    Action::Key(KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE))
}

fn questions() -> Vec<QuizQuestion> {
    (0..3)
        .map(|i| QuizQuestion {
            question: format!("Question {}", i + 1),
            options: vec!["A0".into(), "A1".into(), "A2".into(), "A3".into()],
            correct_answer: i,
            explanation: format!("Because of reason {}", i + 1),
        })
        .collect()
}

fn started_quiz() -> AppState {
    let state = reduce(
        AppState::new(),
        Action::SetupInputChanged("~/lecture.md".to_string()),
    );
    let state = reduce(state, Action::GenerateRequested);
    let state = reduce(
        state,
        Action::GenerationStarted {
            generation_id: "gen-1".to_string(),
        },
    );
    reduce(
        state,
        Action::GenerationSucceeded {
            deck: GeneratedDeck::Quiz(questions()),
        },
    )
}

#[test]
fn test_full_quiz_scores_two_of_three() {
    let mut state = started_quiz();
    assert_eq!(state.view(), ViewKind::Quiz);

    for answer in ['a', 'a', 'c'] {
        state = reduce(state, key(answer));
        state = reduce(state, enter());
    }

    assert_eq!(state.view(), ViewKind::Results);
    let results = state.session.results().unwrap();
    assert_eq!(results.score, 2);
    assert_eq!(results.percentage_label(), "66.7");

    let missed: Vec<_> = results.incorrect().collect();
    assert_eq!(missed.len(), 1);
    assert_eq!(missed[0].your_answer(), "A. A0");
    assert_eq!(missed[0].correct_answer_label(), "B. A1");
    assert_eq!(missed[0].explanation.as_deref(), Some("Because of reason 2"));
}

#[test]
fn test_second_selection_is_ignored() {
    let state = reduce(started_quiz(), key('b'));
    let state = reduce(state, key('a'));

    let quiz = state.session.quiz().unwrap();
    assert_eq!(quiz.selected(), Some(1));
}

#[test]
fn test_stop_asks_and_can_be_cancelled() {
    let state = reduce(started_quiz(), key('a'));
    let state = reduce(state, key('s'));
    assert!(state.session.stop_pending());
    assert_eq!(state.view(), ViewKind::Quiz);

    // Frozen while the prompt is up
    let state = reduce(state, enter());
    assert_eq!(state.session.quiz().unwrap().current_index(), 0);

    let state = reduce(state, key('n'));
    assert!(!state.session.stop_pending());
    assert_eq!(state.view(), ViewKind::Quiz);
    assert_eq!(state.session.quiz().unwrap().selected(), Some(0));
}

#[test]
fn test_esc_cancels_stop() {
    let state = reduce(started_quiz(), key('s'));
    let state = reduce(state, Action::Key(KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE)));

    assert!(!state.session.stop_pending());
    assert_eq!(state.view(), ViewKind::Quiz);
}

#[test]
fn test_confirmed_stop_discards_quiz() {
    let state = reduce(started_quiz(), key('a'));
    let state = reduce(state, key('s'));
    let state = reduce(state, key('y'));

    assert_eq!(state.view(), ViewKind::Setup);
    assert!(state.session.quiz().is_none());
    assert_eq!(state.status.message.as_deref(), Some("Quiz stopped"));
    // The form keeps what the user entered
    assert_eq!(state.setup.input, "~/lecture.md");
}

#[test]
fn test_reset_from_results_returns_to_setup() {
    let mut state = started_quiz();
    for answer in ['a', 'b', 'c'] {
        state = reduce(state, key(answer));
        state = reduce(state, enter());
    }
    assert_eq!(state.session.results().unwrap().percentage_label(), "100.0");

    let state = reduce(state, Action::Key(KeyEvent::new(KeyCode::Down, KeyModifiers::NONE)));
    assert_eq!(state.results_scroll, 1);

    let state = reduce(state, key('r'));
    assert_eq!(state.view(), ViewKind::Setup);
    assert!(state.session.results().is_none());
    assert_eq!(state.results_scroll, 0);
}

#[test]
fn test_results_scroll_stops_at_last_line() {
    let mut state = started_quiz();
    for answer in ['a', 'a', 'c'] {
        state = reduce(state, key(answer));
        state = reduce(state, enter());
    }
    // Two correct answers at 4 lines each, one miss with an explanation at 5
    assert_eq!(state.results_line_count(), 13);

    let down = Action::Key(KeyEvent::new(KeyCode::Down, KeyModifiers::NONE));
    for _ in 0..50 {
        state = reduce(state, down.clone());
    }
    assert_eq!(state.results_scroll, 12);

    let state = reduce(state, Action::Key(KeyEvent::new(KeyCode::Up, KeyModifiers::NONE)));
    assert_eq!(state.results_scroll, 11);
}

#[test]
fn test_failed_generation_keeps_setup_usable() {
    let state = reduce(
        AppState::new(),
        Action::SetupInputChanged("~/lecture.md".to_string()),
    );
    let state = reduce(state, Action::GenerateRequested);
    let state = reduce(
        state,
        Action::GenerationFailed {
            error: "Generation failed: Could not find valid JSON".to_string(),
            inline: false,
        },
    );

    assert_eq!(state.view(), ViewKind::Setup);
    assert!(state.error.is_some());

    let state = reduce(state, Action::Key(KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE)));
    let state = reduce(state, Action::GenerateRequested);
    assert!(state.generation.busy);
}
