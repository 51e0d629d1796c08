//! Setup input field backed by tui-textarea
//!
//! The textarea owns the cursor and editing; the reducer only ever sees the
//! resulting text through `Action::SetupInputChanged`.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    widgets::{Block, Borders},
    Frame,
};
use tui_textarea::TextArea;

use crate::app::{AppState, SetupField};

/// Single-line input for the document path, URL or topic
pub struct InputField<'a> {
    textarea: TextArea<'a>,
}

impl<'a> Default for InputField<'a> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> InputField<'a> {
    pub fn new() -> Self {
        let mut textarea = TextArea::default();
        textarea.set_cursor_line_style(Style::default());
        Self { textarea }
    }

    /// Current text
    pub fn text(&self) -> String {
        self.textarea.lines().join("")
    }

    /// Whether a key belongs to the textarea rather than the reducer
    pub fn accepts(key: &KeyEvent) -> bool {
        !matches!(
            (key.code, key.modifiers),
            (KeyCode::Enter, _)
                | (KeyCode::Tab, _)
                | (KeyCode::BackTab, _)
                | (KeyCode::Esc, _)
                | (KeyCode::F(_), _)
                | (KeyCode::Char('g'), KeyModifiers::CONTROL)
                | (KeyCode::Char('c'), KeyModifiers::CONTROL)
        )
    }

    /// Feed a key to the textarea; returns the new text when it changed
    pub fn input(&mut self, key: KeyEvent) -> Option<String> {
        if !Self::accepts(&key) {
            return None;
        }
        self.textarea.input(key).then(|| self.text())
    }

    /// Update the block and placeholder to match the form
    pub fn sync_style(&mut self, state: &AppState) {
        let setup = &state.setup;
        let focused = setup.focus == SetupField::Input;

        let border_color = if state.generation.busy {
            Color::Yellow
        } else if setup.visible_input_error().is_some() {
            Color::Red
        } else if focused {
            Color::Cyan
        } else {
            Color::Gray
        };

        let mut block = Block::default()
            .title(format!(" {} ", setup.input_title()))
            .borders(Borders::ALL);
        if state.config.colors_enabled {
            block = block.border_style(Style::default().fg(border_color));
        }
        self.textarea.set_block(block);
        self.textarea.set_placeholder_text(setup.input_placeholder());

        let cursor = if focused && !state.generation.busy {
            Style::default().add_modifier(Modifier::REVERSED)
        } else {
            Style::default()
        };
        self.textarea.set_cursor_style(cursor);
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        frame.render_widget(self.textarea.widget(), area);
    }
}
