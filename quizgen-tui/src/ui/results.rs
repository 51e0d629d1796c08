//! Results view

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use libquizgen::session::QuizResults;

use super::{fg, mark};
use crate::app::AppState;

pub(super) fn render(frame: &mut Frame, area: Rect, state: &AppState) {
    let Some(results) = state.session.results() else {
        return;
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(4), Constraint::Min(3)])
        .split(area);

    let score_color = if results.percentage() >= 70.0 {
        Color::Green
    } else if results.percentage() >= 40.0 {
        Color::Yellow
    } else {
        Color::Red
    };

    let summary = Paragraph::new(vec![
        Line::from(Span::styled(
            format!("You scored {} / {}", results.score, results.total),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            format!("{}%", results.percentage_label()),
            fg(state, score_color).add_modifier(Modifier::BOLD),
        )),
    ])
    .block(Block::default().title(" Results ").borders(Borders::ALL))
    .alignment(Alignment::Center);
    frame.render_widget(summary, chunks[0]);

    let lines = breakdown_lines(state, results);
    let breakdown = Paragraph::new(lines)
        .block(Block::default().title(" Breakdown ").borders(Borders::ALL))
        .wrap(Wrap { trim: false })
        .scroll((state.results_scroll, 0));
    frame.render_widget(breakdown, chunks[1]);
}

/// One block per question: question, your answer, correct answer, then the
/// explanation for misses
pub(super) fn breakdown_lines(state: &AppState, results: &QuizResults) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    for outcome in &results.outcomes {
        let (symbol, color) = if outcome.is_correct {
            (mark(state, true), Color::Green)
        } else {
            (mark(state, false), Color::Red)
        };

        lines.push(Line::from(vec![
            Span::styled(format!("{} ", symbol), fg(state, color).add_modifier(Modifier::BOLD)),
            Span::styled(
                format!("{}. {}", outcome.number, outcome.question),
                Style::default().add_modifier(Modifier::BOLD),
            ),
        ]));
        lines.push(Line::from(format!("   Your answer: {}", outcome.your_answer())));
        lines.push(Line::from(Span::styled(
            format!("   Correct answer: {}", outcome.correct_answer_label()),
            fg(state, Color::Green),
        )));
        if let Some(explanation) = outcome.shown_explanation() {
            lines.push(Line::from(Span::styled(
                format!("   {}", explanation),
                fg(state, Color::Gray),
            )));
        }
        lines.push(Line::from(""));
    }
    lines
}
