//! Quiz and flash card views

use libquizgen::session::{OptionState, Progress};
use libquizgen::types::option_label;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph, Wrap},
    Frame,
};

use super::{fg, mark};
use crate::app::AppState;

fn progress_gauge<'a>(state: &AppState, progress: Progress, noun: &str) -> Gauge<'a> {
    Gauge::default()
        .block(Block::default().borders(Borders::ALL))
        .gauge_style(fg(state, Color::Cyan))
        .percent(u16::from(progress.percent))
        .label(format!(
            "{} {} of {} ({}%)",
            noun, progress.position, progress.total, progress.percent
        ))
}

pub(super) fn render_quiz(frame: &mut Frame, area: Rect, state: &AppState) {
    let Some(quiz) = state.session.quiz() else {
        return;
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(5)])
        .split(area);

    frame.render_widget(progress_gauge(state, quiz.progress(), "Question"), chunks[0]);

    let question = quiz.current_question();
    let mut lines = vec![
        Line::from(Span::styled(
            question.question.as_str(),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ];

    for (index, option) in question.options.iter().enumerate() {
        let (style, suffix) = match quiz.option_state(index) {
            OptionState::Open => (Style::default(), ""),
            OptionState::Correct => (fg(state, Color::Green).add_modifier(Modifier::BOLD), mark(state, true)),
            OptionState::Incorrect => (fg(state, Color::Red).add_modifier(Modifier::BOLD), mark(state, false)),
            OptionState::Locked => (fg(state, Color::DarkGray), ""),
        };
        lines.push(Line::from(Span::styled(
            format!("  {}. {} {}", option_label(index), option, suffix),
            style,
        )));
    }

    if let Some(selected) = quiz.selected() {
        lines.push(Line::from(""));
        let verdict = if question.is_correct(selected) {
            Span::styled("Correct!", fg(state, Color::Green).add_modifier(Modifier::BOLD))
        } else {
            Span::styled(
                format!("Incorrect. The answer is {}.", option_label(question.correct_answer)),
                fg(state, Color::Red).add_modifier(Modifier::BOLD),
            )
        };
        lines.push(Line::from(verdict));

        if let Some(explanation) = quiz.revealed_explanation().filter(|e| !e.is_empty()) {
            lines.push(Line::from(explanation));
        }

        lines.push(Line::from(""));
        let next = if quiz.is_last() {
            "Press Enter to see your results"
        } else {
            "Press Enter for the next question"
        };
        lines.push(Line::from(Span::styled(next, fg(state, Color::Gray))));
    }

    let body = Paragraph::new(lines)
        .block(Block::default().title(" Quiz ").borders(Borders::ALL))
        .wrap(Wrap { trim: false });
    frame.render_widget(body, chunks[1]);
}

pub(super) fn render_flashcards(frame: &mut Frame, area: Rect, state: &AppState) {
    let Some(deck) = state.session.flashcards() else {
        return;
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(5)])
        .split(area);

    frame.render_widget(progress_gauge(state, deck.progress(), "Card"), chunks[0]);

    let (side, color) = if deck.is_flipped() {
        (" Back ", Color::Magenta)
    } else {
        (" Front ", Color::Cyan)
    };

    let mut lines = vec![Line::from(""), Line::from(deck.visible_text()), Line::from("")];
    let nav = format!(
        "{}  Space: flip  {}",
        if deck.has_previous() { "← previous" } else { "          " },
        if deck.has_next() { "next →" } else { "      " },
    );
    lines.push(Line::from(Span::styled(nav, fg(state, Color::Gray))));

    let card = Paragraph::new(lines)
        .block(
            Block::default()
                .title(side)
                .borders(Borders::ALL)
                .border_style(fg(state, color)),
        )
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    frame.render_widget(card, chunks[1]);
}
