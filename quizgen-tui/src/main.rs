//! quizgen-tui - Terminal UI for Quizgen
//!
//! Generates quizzes and flash cards from a document, a YouTube video, a
//! website or a topic, then runs them in the terminal.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use crossbeam_channel::Receiver;
use libquizgen::config::resolve_data_path;
use libquizgen::logging::{LogFormat, LogTarget, LoggingConfig};
use libquizgen::{Config, QuizgenError};
use quizgen_tui::{
    app::{event::EventHandler, event::TuiEvent, reduce, Action, AppState},
    services::{BackendHealth, GenerationUpdate, ServiceHandle},
    terminal::{install_panic_hook, restore_terminal, setup_terminal, Tui},
    ui::{self, InputField},
    TuiError,
};

#[derive(Parser, Debug)]
#[command(name = "quizgen-tui", version)]
#[command(about = "Generate quizzes and flash cards and study them in the terminal", long_about = None)]
struct Cli {
    /// Configuration file (default: ~/.config/quizgen/config.toml)
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Backend base URL, overriding the config file
    #[arg(long, value_name = "URL", env = "QUIZGEN_BACKEND_URL")]
    backend_url: Option<String>,

    /// Log file (default: <data dir>/quizgen/quizgen-tui.log)
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,

    /// Log format (text, json or pretty)
    #[arg(long, default_value = "text", env = "QUIZGEN_LOG_FORMAT")]
    log_format: LogFormat,

    /// Log level when RUST_LOG is unset
    #[arg(long, default_value = "info", env = "QUIZGEN_LOG_LEVEL")]
    log_level: String,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {:#}", e);
        std::process::exit(exit_code(&e));
    }
}

fn exit_code(error: &anyhow::Error) -> i32 {
    if let Some(e) = error.downcast_ref::<TuiError>() {
        return e.exit_code();
    }
    if let Some(e) = error.downcast_ref::<QuizgenError>() {
        return e.exit_code();
    }
    1
}

fn run(cli: Cli) -> anyhow::Result<()> {
    // The terminal is ours, so logs always go to a file
    let log_file = match cli.log_file {
        Some(path) => path,
        None => resolve_data_path()?.join("quizgen-tui.log"),
    };
    LoggingConfig::new(cli.log_format, cli.log_level, cli.verbose)
        .with_target(LogTarget::File(log_file.clone()))
        .init()
        .with_context(|| format!("Failed to open log file {}", log_file.display()))?;

    let mut config = match cli.config {
        Some(ref path) => Config::load_from_path(path)
            .with_context(|| format!("Failed to load {}", path.display()))?,
        None => Config::load()?,
    };
    if let Some(url) = cli.backend_url.filter(|u| !u.trim().is_empty()) {
        config.backend.url = url;
        config.validate()?;
    }

    tracing::info!(backend = %config.backend.url, "Starting quizgen-tui");
    let services = ServiceHandle::new(config)?;

    install_panic_hook();
    let mut terminal = setup_terminal()?;
    let result = run_app(&mut terminal, &services);
    restore_terminal(&mut terminal)?;

    result?;
    Ok(())
}

fn run_app(terminal: &mut Tui, services: &ServiceHandle) -> quizgen_tui::Result<()> {
    let mut state = AppState::with_defaults(&services.config().defaults);
    let mut input = InputField::new();
    let event_handler = EventHandler::new(state.config.tick_rate_ms);

    let mut health_rx: Option<Receiver<BackendHealth>> = Some(services.check_health());
    let mut generation_rx: Option<Receiver<GenerationUpdate>> = None;

    loop {
        input.sync_style(&state);
        terminal.draw(|frame| ui::render(frame, &state, &input))?;

        let action = match event_handler.next()? {
            // Typed characters belong to the input field while it has focus
            TuiEvent::Key(key) if state.input_focused() && InputField::accepts(&key) => {
                match input.input(key) {
                    Some(text) => Action::SetupInputChanged(text),
                    None => Action::Tick,
                }
            }
            other => other.into(),
        };
        state = reduce(state, action);

        if let Some(request) = state.pending_generation.take() {
            let (generation_id, rx) = services.generate(request);
            tracing::debug!(generation_id = %generation_id, "Generation spawned");
            state = reduce(state, Action::GenerationStarted { generation_id });
            generation_rx = Some(rx);
        }

        if let Some(ref rx) = generation_rx {
            let mut finished = false;
            while let Ok(update) = rx.try_recv() {
                finished |= update.is_terminal();
                state = reduce(state, update.into());
            }
            if finished {
                generation_rx = None;
            }
        }

        if let Some(ref rx) = health_rx {
            if let Ok(health) = rx.try_recv() {
                let message = health.status_message(&services.config().backend.url);
                state = reduce(state, Action::SetStatus(message));
                health_rx = None;
            }
        }

        if state.should_quit {
            break;
        }
    }

    tracing::info!("Exiting quizgen-tui");
    Ok(())
}
