//! Test application initialization
//!
//! Verifies the defaults the app boots with, including those read from the
//! environment and from the `[defaults]` config section.

use libquizgen::config::DefaultsConfig;
use libquizgen::{ContentSource, ContentType, Language, ViewKind};
use quizgen_tui::app::{AppState, SetupField};
use serial_test::serial;

#[test]
fn test_app_initializes_to_setup_view() {
    let state = AppState::new();

    assert_eq!(state.view(), ViewKind::Setup);
    assert!(!state.should_quit);
}

#[test]
fn test_no_overlays_on_boot() {
    let state = AppState::new();

    assert!(!state.help_visible);
    assert!(state.error.is_none());
    assert!(!state.session.stop_pending());
}

#[test]
fn test_setup_starts_on_empty_input() {
    let state = AppState::new();

    assert_eq!(state.setup.focus, SetupField::Input);
    assert_eq!(state.setup.input, "");
    assert!(!state.setup.is_valid());
    assert!(state.setup.visible_input_error().is_none());
}

#[test]
fn test_not_generating_on_boot() {
    let state = AppState::new();

    assert!(!state.generation.busy);
    assert!(state.pending_generation.is_none());
    assert!(!state.can_generate());
}

#[test]
fn test_setup_follows_config_defaults() {
    let defaults = DefaultsConfig {
        source: ContentSource::Topic,
        content_type: ContentType::Flashcards,
        language: Language::Indonesian,
        num_questions: 8,
        num_cards: 15,
    };
    let state = AppState::with_defaults(&defaults);

    assert_eq!(state.setup.source, ContentSource::Topic);
    assert_eq!(state.setup.content_type, ContentType::Flashcards);
    assert_eq!(state.setup.language, Language::Indonesian);
    assert_eq!(state.setup.count(), 15);
    assert_eq!(state.setup.input_title(), "Topic");
}

#[test]
#[serial]
fn test_colors_disabled_with_no_color_env() {
    std::env::set_var("NO_COLOR", "1");
    let state = AppState::new();
    std::env::remove_var("NO_COLOR");

    assert!(!state.config.colors_enabled);
    assert!(!state.config.unicode_enabled);
}

#[test]
#[serial]
fn test_colors_disabled_with_quizgen_env() {
    std::env::set_var("QUIZGEN_TUI_NO_COLOR", "1");
    let state = AppState::new();
    std::env::remove_var("QUIZGEN_TUI_NO_COLOR");

    assert!(!state.config.colors_enabled);
}

#[test]
#[serial]
fn test_tick_rate_from_env() {
    std::env::set_var("QUIZGEN_TUI_TICK_MS", "250");
    let state = AppState::new();
    std::env::remove_var("QUIZGEN_TUI_TICK_MS");

    assert_eq!(state.config.tick_rate_ms, 250);
}

#[test]
#[serial]
fn test_tick_rate_default_100ms() {
    std::env::remove_var("QUIZGEN_TUI_TICK_MS");
    let state = AppState::new();

    assert_eq!(state.config.tick_rate_ms, 100);
}
