//! Pure reducer function for state transitions
//!
//! `(State, Action) -> State`, with no I/O. Spawning a generation is left to
//! the event loop: the reducer only queues the request in
//! [`AppState::pending_generation`].

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use libquizgen::session::StopOutcome;
use libquizgen::{ContentSource, ViewKind};

use super::actions::Action;
use super::state::{clamp_count, AppState, GenerationState, SetupField, SetupState, StatusBarState};

/// Pure reducer function
///
/// Takes current state and an action, returns new state. Deterministic and
/// free of side effects.
pub fn reduce(state: AppState, action: Action) -> AppState {
    match action {
        // === UI Events ===
        Action::Key(key) => handle_key(state, key),
        Action::Tick => {
            if !state.generation.busy {
                return state;
            }
            AppState {
                generation: GenerationState {
                    spinner_frame: state.generation.spinner_frame.wrapping_add(1),
                    ..state.generation
                },
                ..state
            }
        }
        Action::Resize(_, _) => state,

        // === Global ===
        Action::Quit => AppState {
            should_quit: true,
            ..state
        },
        Action::ShowHelp => AppState {
            help_visible: true,
            ..state
        },
        Action::HideHelp => AppState {
            help_visible: false,
            ..state
        },
        Action::DismissError => AppState {
            error: None,
            ..state
        },
        Action::SetStatus(message) => AppState {
            status: StatusBarState {
                message: Some(message),
            },
            ..state
        },

        // === Setup ===
        Action::SetupInputChanged(input) => update_setup(state, |setup| SetupState {
            input,
            touched: true,
            ..setup
        }),
        Action::FocusNext => update_setup(state, |setup| SetupState {
            focus: setup.focus.next(),
            ..setup
        }),
        Action::FocusPrevious => update_setup(state, |setup| SetupState {
            focus: setup.focus.previous(),
            ..setup
        }),
        Action::NextSource => update_setup(state, |setup| SetupState {
            source: setup.source.next(),
            ..setup
        }),
        Action::PreviousSource => update_setup(state, |setup| SetupState {
            source: previous_source(setup.source),
            ..setup
        }),
        Action::ToggleContentType => update_setup(state, |setup| SetupState {
            content_type: setup.content_type.toggle(),
            ..setup
        }),
        Action::ToggleLanguage => update_setup(state, |setup| SetupState {
            language: setup.language.toggle(),
            ..setup
        }),
        Action::IncrementCount => update_setup(state, |mut setup| {
            let count = clamp_count(setup.count().saturating_add(1), setup.max_count());
            setup.set_count(count);
            setup
        }),
        Action::DecrementCount => update_setup(state, |mut setup| {
            let count = clamp_count(setup.count().saturating_sub(1), setup.max_count());
            setup.set_count(count);
            setup
        }),
        Action::GenerateRequested => request_generation(state),

        // === Generation ===
        Action::GenerationStarted { generation_id } => AppState {
            generation: GenerationState {
                generation_id: Some(generation_id),
                ..state.generation
            },
            ..state
        },
        Action::GenerationProgress { message } => {
            if !state.generation.busy {
                return state;
            }
            AppState {
                generation: GenerationState {
                    message: Some(message),
                    ..state.generation
                },
                ..state
            }
        }
        Action::GenerationSucceeded { deck } => {
            let mut session = state.session;
            let items = deck.len();
            let label = deck.content_type().label();

            if session.deck_ready(deck) {
                AppState {
                    session,
                    generation: GenerationState::default(),
                    results_scroll: 0,
                    status: StatusBarState {
                        message: Some(format!("{} ready: {} items", label, items)),
                    },
                    ..state
                }
            } else {
                AppState {
                    session,
                    generation: GenerationState::default(),
                    error: Some("Nothing was generated. Please try again.".to_string()),
                    ..state
                }
            }
        }
        Action::GenerationFailed { error, inline } => {
            let generation = GenerationState::default();
            if inline {
                AppState {
                    setup: SetupState {
                        input_error: Some(error),
                        touched: true,
                        ..state.setup
                    },
                    generation,
                    ..state
                }
            } else {
                AppState {
                    error: Some(error),
                    generation,
                    ..state
                }
            }
        }

        // === Quiz ===
        Action::SelectOption(option) => update_session(state, |session| {
            session.select_option(option);
        }),
        Action::NextQuestion => update_session(state, |session| {
            session.next_or_finish();
        }),
        Action::StopRequested => {
            let mut session = state.session;
            let message = match session.stop() {
                StopOutcome::Stopped => Some("Flash cards closed".to_string()),
                StopOutcome::ConfirmationRequired | StopOutcome::Ignored => state.status.message,
            };
            AppState {
                session,
                status: StatusBarState { message },
                ..state
            }
        }
        Action::ConfirmStop => {
            let mut session = state.session;
            if !session.confirm_stop() {
                return AppState { session, ..state };
            }
            AppState {
                session,
                status: StatusBarState {
                    message: Some("Quiz stopped".to_string()),
                },
                ..state
            }
        }
        Action::CancelStop => update_session(state, |session| {
            session.cancel_stop();
        }),

        // === Flashcards ===
        Action::NextCard => update_session(state, |session| {
            session.next_card();
        }),
        Action::PreviousCard => update_session(state, |session| {
            session.previous_card();
        }),
        Action::FlipCard => update_session(state, |session| {
            session.flip_card();
        }),

        // === Results ===
        Action::ScrollUp => AppState {
            results_scroll: state.results_scroll.saturating_sub(1),
            ..state
        },
        Action::ScrollDown => AppState {
            results_scroll: state
                .results_scroll
                .saturating_add(1)
                .min(state.max_results_scroll()),
            ..state
        },
        Action::Reset => {
            let mut session = state.session;
            session.reset();
            AppState {
                session,
                results_scroll: 0,
                status: StatusBarState::default(),
                ..state
            }
        }
    }
}

/// Apply a setup change and revalidate; ignored while generating
fn update_setup(state: AppState, change: impl FnOnce(SetupState) -> SetupState) -> AppState {
    if state.generation.busy || state.view() != ViewKind::Setup {
        return state;
    }
    AppState {
        setup: change(state.setup).validated(),
        ..state
    }
}

fn update_session(state: AppState, change: impl FnOnce(&mut libquizgen::Session)) -> AppState {
    let mut session = state.session;
    change(&mut session);
    AppState { session, ..state }
}

fn previous_source(source: ContentSource) -> ContentSource {
    let all = ContentSource::ALL;
    let index = all.iter().position(|s| *s == source).unwrap_or(0);
    all[(index + all.len() - 1) % all.len()]
}

/// Queue the setup form for generation, or surface why it cannot run
fn request_generation(state: AppState) -> AppState {
    if state.generation.busy || state.view() != ViewKind::Setup {
        return state;
    }

    let setup = SetupState {
        touched: true,
        ..state.setup
    }
    .validated();

    if !setup.is_valid() {
        return AppState { setup, ..state };
    }

    let request = setup.request();
    AppState {
        setup,
        generation: GenerationState {
            busy: true,
            generation_id: None,
            message: Some("Starting...".to_string()),
            spinner_frame: 0,
        },
        status: StatusBarState::default(),
        pending_generation: Some(request),
        ..state
    }
}

/// Handle keyboard input
///
/// Maps keys to high-level actions. This is where keybindings are defined.
pub fn handle_key(state: AppState, key: KeyEvent) -> AppState {
    // Global keybindings (work everywhere)
    match (key.code, key.modifiers) {
        (KeyCode::Char('c'), KeyModifiers::CONTROL) => {
            return reduce(state, Action::Quit);
        }

        (KeyCode::F(1), _) => {
            let action = if state.help_visible {
                Action::HideHelp
            } else {
                Action::ShowHelp
            };
            return reduce(state, action);
        }

        (KeyCode::Esc, _) if state.error.is_some() => {
            return reduce(state, Action::DismissError);
        }

        (KeyCode::Esc, _) if state.help_visible => {
            return reduce(state, Action::HideHelp);
        }

        (KeyCode::Esc, _) if state.session.stop_pending() => {
            return reduce(state, Action::CancelStop);
        }

        (KeyCode::Char('q'), KeyModifiers::NONE) if state.can_quit() => {
            return reduce(state, Action::Quit);
        }

        _ => {}
    }

    // Overlays swallow everything else
    if state.overlay_visible() {
        return state;
    }

    match state.view() {
        ViewKind::Setup => handle_setup_key(state, key),
        ViewKind::Quiz => handle_quiz_key(state, key),
        ViewKind::Flashcards => handle_flashcards_key(state, key),
        ViewKind::Results => handle_results_key(state, key),
    }
}

fn handle_setup_key(state: AppState, key: KeyEvent) -> AppState {
    if state.generation.busy {
        return state;
    }

    match (key.code, key.modifiers) {
        (KeyCode::Char('g'), KeyModifiers::CONTROL) => reduce(state, Action::GenerateRequested),
        (KeyCode::Tab, _) => reduce(state, Action::FocusNext),
        (KeyCode::BackTab, _) => reduce(state, Action::FocusPrevious),
        (KeyCode::Enter, _) if state.setup.focus == SetupField::Input => {
            reduce(state, Action::GenerateRequested)
        }
        _ => match state.setup.focus {
            SetupField::Source => match key.code {
                KeyCode::Right | KeyCode::Char(' ') => reduce(state, Action::NextSource),
                KeyCode::Left => reduce(state, Action::PreviousSource),
                _ => state,
            },
            SetupField::ContentType => match key.code {
                KeyCode::Left | KeyCode::Right | KeyCode::Char(' ') => {
                    reduce(state, Action::ToggleContentType)
                }
                _ => state,
            },
            SetupField::Language => match key.code {
                KeyCode::Left | KeyCode::Right | KeyCode::Char(' ') => {
                    reduce(state, Action::ToggleLanguage)
                }
                _ => state,
            },
            SetupField::Count => match key.code {
                KeyCode::Up | KeyCode::Right | KeyCode::Char('+') => {
                    reduce(state, Action::IncrementCount)
                }
                KeyCode::Down | KeyCode::Left | KeyCode::Char('-') => {
                    reduce(state, Action::DecrementCount)
                }
                _ => state,
            },
            // Text editing is handled by the textarea in the event loop
            SetupField::Input => state,
        },
    }
}

fn handle_quiz_key(state: AppState, key: KeyEvent) -> AppState {
    if state.session.stop_pending() {
        return match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') => reduce(state, Action::ConfirmStop),
            KeyCode::Char('n') | KeyCode::Char('N') => reduce(state, Action::CancelStop),
            _ => state,
        };
    }

    match key.code {
        KeyCode::Char(c @ 'a'..='d') => reduce(state, Action::SelectOption(c as usize - 'a' as usize)),
        KeyCode::Char(c @ '1'..='4') => reduce(state, Action::SelectOption(c as usize - '1' as usize)),
        KeyCode::Enter | KeyCode::Char('n') => reduce(state, Action::NextQuestion),
        KeyCode::Char('s') => reduce(state, Action::StopRequested),
        _ => state,
    }
}

fn handle_flashcards_key(state: AppState, key: KeyEvent) -> AppState {
    match key.code {
        KeyCode::Right => reduce(state, Action::NextCard),
        KeyCode::Left => reduce(state, Action::PreviousCard),
        KeyCode::Char(' ') => reduce(state, Action::FlipCard),
        KeyCode::Char('s') => reduce(state, Action::StopRequested),
        _ => state,
    }
}

fn handle_results_key(state: AppState, key: KeyEvent) -> AppState {
    match key.code {
        KeyCode::Char('r') => reduce(state, Action::Reset),
        KeyCode::Up => reduce(state, Action::ScrollUp),
        KeyCode::Down => reduce(state, Action::ScrollDown),
        _ => state,
    }
}
