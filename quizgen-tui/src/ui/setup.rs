//! Setup form

use libquizgen::{ContentSource, ContentType, Language};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use super::{fg, mark, spinner, InputField};
use crate::app::{AppState, SetupField};

pub(super) fn render(frame: &mut Frame, area: Rect, state: &AppState, input: &InputField) {
    let block = Block::default().title(" New session ").borders(Borders::ALL);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4), // Selectors
            Constraint::Length(1),
            Constraint::Length(3), // Input
            Constraint::Length(2), // Inline errors
            Constraint::Min(1),    // Busy indicator / hint
        ])
        .split(inner);

    let setup = &state.setup;
    let selectors = vec![
        selector_line(
            state,
            SetupField::Source,
            ContentSource::ALL
                .iter()
                .map(|s| (s.label().to_string(), *s == setup.source))
                .collect(),
        ),
        selector_line(
            state,
            SetupField::ContentType,
            [ContentType::Quiz, ContentType::Flashcards]
                .iter()
                .map(|t| (t.label().to_string(), *t == setup.content_type))
                .collect(),
        ),
        selector_line(
            state,
            SetupField::Language,
            [Language::English, Language::Indonesian]
                .iter()
                .map(|l| (l.display_name().to_string(), *l == setup.language))
                .collect(),
        ),
        selector_line(
            state,
            SetupField::Count,
            vec![(
                format!("{} (1-{})", setup.count(), setup.max_count()),
                true,
            )],
        ),
    ];
    frame.render_widget(Paragraph::new(selectors), chunks[0]);

    input.render(frame, chunks[2]);

    let errors: Vec<Line> = setup
        .visible_input_error()
        .into_iter()
        .chain(setup.count_error.as_deref())
        .map(|error| {
            Line::from(Span::styled(
                format!("{} {}", mark(state, false), error),
                fg(state, Color::Red),
            ))
        })
        .collect();
    frame.render_widget(Paragraph::new(errors).wrap(Wrap { trim: true }), chunks[3]);

    let footer = if state.generation.busy {
        let message = state.generation.message.as_deref().unwrap_or("Working...");
        Line::from(vec![
            Span::styled(spinner(state), fg(state, Color::Yellow)),
            Span::raw(" "),
            Span::styled(message, fg(state, Color::Yellow)),
        ])
    } else if state.setup.is_valid() {
        Line::from(Span::styled(
            format!("{} Ready. Press Ctrl+G to generate.", mark(state, true)),
            fg(state, Color::Green),
        ))
    } else {
        Line::from("")
    };
    frame.render_widget(Paragraph::new(footer), chunks[4]);
}

/// `Label:  [A]  B  C`, with the focused label highlighted
fn selector_line(state: &AppState, field: SetupField, options: Vec<(String, bool)>) -> Line<'static> {
    let focused = state.setup.focus == field && !state.generation.busy;
    let label_style = if focused {
        fg(state, Color::Cyan).add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    };

    let mut spans = vec![
        Span::styled(if focused { "> " } else { "  " }, label_style),
        Span::styled(format!("{:<10}", field.label()), label_style),
    ];

    for (text, selected) in options {
        if selected {
            spans.push(Span::styled(
                format!("[{}]", text),
                fg(state, Color::Green).add_modifier(Modifier::BOLD),
            ));
        } else {
            spans.push(Span::styled(format!(" {} ", text), fg(state, Color::DarkGray)));
        }
        spans.push(Span::raw(" "));
    }

    Line::from(spans)
}
