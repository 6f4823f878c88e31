//! TextField — a labeled single-line input wrapping tui-input.

use ratatui::crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use tui_input::{backend::crossterm::EventHandler, Input};

use crate::theme::{C_INPUT_FG, C_MUTED, C_SECONDARY};

pub enum FieldAction {
    Changed(String),
    Confirmed,
    Cancelled,
}

pub struct TextField {
    input: Input,
    label: &'static str,
    placeholder: &'static str,
}

impl TextField {
    pub fn new(label: &'static str, placeholder: &'static str) -> Self {
        Self {
            input: Input::default(),
            label,
            placeholder,
        }
    }

    pub fn set_value(&mut self, value: &str) {
        self.input = Input::new(value.to_string());
    }

    pub fn text(&self) -> &str {
        self.input.value()
    }

    /// Handle a key event.
    ///
    /// Esc behaviour follows the two-step convention:
    ///   - with text: clear it, emit `Changed("")`
    ///   - already empty: emit `Cancelled` (caller moves focus away)
    pub fn handle_key(&mut self, key: KeyEvent) -> FieldAction {
        match key.code {
            KeyCode::Esc => {
                if self.input.value().is_empty() {
                    FieldAction::Cancelled
                } else {
                    self.input = Input::default();
                    FieldAction::Changed(String::new())
                }
            }
            KeyCode::Enter => FieldAction::Confirmed,
            _ => {
                self.input
                    .handle_event(&ratatui::crossterm::event::Event::Key(key));
                FieldAction::Changed(self.input.value().to_string())
            }
        }
    }

    /// Render as `label: value` on one line; shows the cursor when active.
    pub fn draw(&self, frame: &mut Frame, area: Rect, active: bool) {
        let label_width = self.label.len() as u16 + 2;
        let avail = area.width.saturating_sub(label_width + 1) as usize;
        let scroll = self.input.visual_scroll(avail);
        let value = self.input.value();

        let value_span = if value.is_empty() {
            Span::styled(self.placeholder, Style::default().fg(C_MUTED))
        } else {
            Span::styled(
                value[scroll..].to_string(),
                Style::default().fg(C_INPUT_FG),
            )
        };

        let line = Line::from(vec![
            Span::styled(format!("{}: ", self.label), Style::default().fg(C_SECONDARY)),
            value_span,
        ]);
        frame.render_widget(Paragraph::new(line), area);

        if active {
            let cursor_x = area.x + label_width + (self.input.visual_cursor() - scroll) as u16;
            frame.set_cursor_position((cursor_x.min(area.x + area.width.saturating_sub(1)), area.y));
        }
    }
}
