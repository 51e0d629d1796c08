//! UI rendering
//!
//! Render functions read state and draw; they never change it.

mod input;
mod results;
mod setup;
mod study;

pub use input::InputField;

use libquizgen::session::STOP_QUIZ_PROMPT;
use libquizgen::ViewKind;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::app::AppState;

const SPINNER_UNICODE: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];
const SPINNER_ASCII: [&str; 4] = ["|", "/", "-", "\\"];

/// Render the application UI
pub fn render(frame: &mut Frame, state: &AppState, input: &InputField) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Header
            Constraint::Min(5),    // View
            Constraint::Length(3), // Status bar
        ])
        .split(frame.size());

    render_header(frame, chunks[0], state);

    match state.view() {
        ViewKind::Setup => setup::render(frame, chunks[1], state, input),
        ViewKind::Quiz => study::render_quiz(frame, chunks[1], state),
        ViewKind::Flashcards => study::render_flashcards(frame, chunks[1], state),
        ViewKind::Results => results::render(frame, chunks[1], state),
    }

    render_status_bar(frame, chunks[2], state);

    if state.session.stop_pending() {
        render_confirm_overlay(frame, frame.size(), state);
    }

    if state.help_visible {
        render_help_overlay(frame, frame.size(), state);
    }

    if let Some(ref error) = state.error {
        render_error_overlay(frame, frame.size(), error, state);
    }
}

/// Foreground style that respects `NO_COLOR`
pub(crate) fn fg(state: &AppState, color: Color) -> Style {
    if state.config.colors_enabled {
        Style::default().fg(color)
    } else {
        Style::default()
    }
}

/// Current spinner glyph
pub(crate) fn spinner(state: &AppState) -> &'static str {
    let frame = state.generation.spinner_frame;
    if state.config.unicode_enabled {
        SPINNER_UNICODE[frame % SPINNER_UNICODE.len()]
    } else {
        SPINNER_ASCII[frame % SPINNER_ASCII.len()]
    }
}

/// Check and cross marks with an ASCII fallback
pub(crate) fn mark(state: &AppState, ok: bool) -> &'static str {
    match (state.config.unicode_enabled, ok) {
        (true, true) => "✓",
        (true, false) => "✗",
        (false, true) => "+",
        (false, false) => "x",
    }
}

fn render_header(frame: &mut Frame, area: Rect, state: &AppState) {
    let mut spans = vec![
        Span::styled(" Quizgen ", fg(state, Color::Cyan).add_modifier(Modifier::BOLD)),
        Span::raw("| "),
        Span::raw(state.view().label()),
    ];
    if state.generation.busy {
        spans.push(Span::raw("  "));
        spans.push(Span::styled(spinner(state), fg(state, Color::Yellow)));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// Key hints for the active view
fn hints(state: &AppState) -> &'static str {
    if state.generation.busy {
        return "Generating... | F1: Help";
    }
    match state.view() {
        ViewKind::Setup if state.input_focused() => {
            "Ctrl+G/Enter: Generate | Tab: Next field | F1: Help | Ctrl+C: Quit"
        }
        ViewKind::Setup => "Ctrl+G: Generate | Tab: Next field | ←/→: Change | F1: Help | q: Quit",
        ViewKind::Quiz if state.session.stop_pending() => "y: Stop quiz | n: Keep going",
        ViewKind::Quiz => "a-d: Answer | Enter: Next | s: Stop | F1: Help | q: Quit",
        ViewKind::Flashcards => "←/→: Navigate | Space: Flip | s: Stop | F1: Help | q: Quit",
        ViewKind::Results => "↑/↓: Scroll | r: New session | F1: Help | q: Quit",
    }
}

fn render_status_bar(frame: &mut Frame, area: Rect, state: &AppState) {
    let mut lines = Vec::new();

    if let Some(ref message) = state.status.message {
        lines.push(Line::from(Span::styled(message.as_str(), fg(state, Color::Green))));
    }
    lines.push(Line::from(Span::styled(hints(state), fg(state, Color::Gray))));

    let status = Paragraph::new(lines).block(Block::default().borders(Borders::TOP));
    frame.render_widget(status, area);
}

fn render_help_overlay(frame: &mut Frame, area: Rect, state: &AppState) {
    let popup_area = centered_rect(60, 70, area);

    let heading = |text: &'static str| Line::from(Span::styled(text, Style::default().add_modifier(Modifier::BOLD)));
    let help_text = vec![
        heading("Keyboard Shortcuts"),
        Line::from(""),
        heading("Global"),
        Line::from("  q        Quit (not while generating or typing)"),
        Line::from("  Ctrl+C   Quit"),
        Line::from("  F1       Toggle help"),
        Line::from("  Esc      Dismiss overlays"),
        Line::from(""),
        heading("Setup"),
        Line::from("  Tab      Next field (Shift+Tab: previous)"),
        Line::from("  ←/→      Change source, type or language"),
        Line::from("  ↑/↓      Change count"),
        Line::from("  Ctrl+G   Generate"),
        Line::from(""),
        heading("Quiz"),
        Line::from("  a-d, 1-4 Choose an answer"),
        Line::from("  Enter, n Next question / finish"),
        Line::from("  s        Stop (asks for confirmation)"),
        Line::from(""),
        heading("Flash Cards"),
        Line::from("  ←/→      Previous / next card"),
        Line::from("  Space    Flip card"),
        Line::from("  s        Stop"),
        Line::from(""),
        heading("Results"),
        Line::from("  r        Start over"),
    ];

    let help = Paragraph::new(help_text)
        .block(
            Block::default()
                .title(" Help ")
                .borders(Borders::ALL)
                .border_style(fg(state, Color::Cyan)),
        )
        .wrap(Wrap { trim: false });

    frame.render_widget(Clear, popup_area);
    frame.render_widget(help, popup_area);
}

fn render_error_overlay(frame: &mut Frame, area: Rect, error: &str, state: &AppState) {
    let popup_area = centered_rect(70, 30, area);

    let error_text = vec![
        Line::from(Span::styled("Error", fg(state, Color::Red).add_modifier(Modifier::BOLD))),
        Line::from(""),
        Line::from(error),
        Line::from(""),
        Line::from("Press Esc to dismiss"),
    ];

    let error_widget = Paragraph::new(error_text)
        .block(
            Block::default()
                .title(" Error ")
                .borders(Borders::ALL)
                .border_style(fg(state, Color::Red)),
        )
        .wrap(Wrap { trim: false })
        .alignment(Alignment::Center);

    frame.render_widget(Clear, popup_area);
    frame.render_widget(error_widget, popup_area);
}

fn render_confirm_overlay(frame: &mut Frame, area: Rect, state: &AppState) {
    let popup_area = centered_rect(50, 25, area);

    let text = vec![
        Line::from(""),
        Line::from(STOP_QUIZ_PROMPT),
        Line::from(""),
        Line::from(vec![
            Span::styled("y", fg(state, Color::Red).add_modifier(Modifier::BOLD)),
            Span::raw(": stop   "),
            Span::styled("n", fg(state, Color::Green).add_modifier(Modifier::BOLD)),
            Span::raw(": keep going"),
        ]),
    ];

    let confirm = Paragraph::new(text)
        .block(
            Block::default()
                .title(" Stop quiz? ")
                .borders(Borders::ALL)
                .border_style(fg(state, Color::Yellow)),
        )
        .wrap(Wrap { trim: true })
        .alignment(Alignment::Center);

    frame.render_widget(Clear, popup_area);
    frame.render_widget(confirm, popup_area);
}

/// Helper to create centered rectangle
pub(crate) fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::{reduce, Action};
    use libquizgen::{GeneratedDeck, QuizQuestion};
    use ratatui::{backend::TestBackend, Terminal};

    fn draw(state: &AppState) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        let mut input = InputField::new();
        input.sync_style(state);
        terminal.draw(|frame| render(frame, state, &input)).unwrap();

        let buffer = terminal.backend().buffer();
        let mut text = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                text.push_str(buffer.get(x, y).symbol());
            }
            text.push('\n');
        }
        text
    }

    #[test]
    fn test_setup_view_renders_form() {
        let screen = draw(&AppState::new());
        assert!(screen.contains("Quizgen"));
        assert!(screen.contains("Document path"));
        assert!(screen.contains("Language"));
    }

    #[test]
    fn test_error_overlay_renders() {
        let state = AppState {
            error: Some("Network error".to_string()),
            ..AppState::new()
        };
        assert!(draw(&state).contains("Network error"));
    }

    fn finished_quiz() -> AppState {
        let question = |text: &str, correct_answer: usize| QuizQuestion {
            question: text.to_string(),
            options: vec!["Paris".into(), "Rome".into(), "Madrid".into(), "Berlin".into()],
            correct_answer,
            explanation: format!("{} explained", text),
        };
        let deck = GeneratedDeck::Quiz(vec![
            question("Capital of France?", 0),
            question("Capital of Italy?", 1),
        ]);

        [
            Action::SetupInputChanged("~/geo.md".to_string()),
            Action::GenerateRequested,
            Action::GenerationSucceeded { deck },
            Action::SelectOption(0),
            Action::NextQuestion,
            Action::SelectOption(3),
            Action::NextQuestion,
        ]
        .into_iter()
        .fold(AppState::new(), reduce)
    }

    #[test]
    fn test_results_show_correct_answer_for_every_question() {
        let state = finished_quiz();
        assert_eq!(state.view(), ViewKind::Results);

        let screen = draw(&state);
        assert!(screen.contains("Correct answer: A. Paris"));
        assert!(screen.contains("Correct answer: B. Rome"));
        assert!(screen.contains("Your answer: D. Berlin"));
        // Explanations only for the miss
        assert!(!screen.contains("Capital of France? explained"));
        assert!(screen.contains("Capital of Italy? explained"));
    }

    #[test]
    fn test_breakdown_length_matches_scroll_bound() {
        let state = finished_quiz();
        let results = state.session.results().unwrap();

        let lines = results::breakdown_lines(&state, results);
        assert_eq!(lines.len(), usize::from(state.results_line_count()));
        assert_eq!(state.results_line_count(), 9);
    }

    #[test]
    fn test_centered_rect_is_inside() {
        let area = Rect::new(0, 0, 100, 50);
        let popup = centered_rect(60, 40, area);
        assert_eq!(popup.width, 60);
        assert_eq!(popup.height, 20);
        assert!(popup.x >= 20 && popup.y >= 15);
    }
}
