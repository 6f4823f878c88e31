//! SearchBar — the two free-text filter inputs (genre, country).
//!
//! Edits emit `GenreChanged` / `CountryChanged` (pure filter updates, no
//! fetch); Enter in either field submits the search.

use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyEventKind};
use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::action::{Action, ComponentId};
use crate::app::ViewState;
use crate::component::Component;
use crate::theme::{C_ACCENT, C_MUTED};
use crate::widgets::pane_chrome::pane_chrome;
use crate::widgets::text_field::{FieldAction, TextField};

#[derive(Debug, Clone, Copy, PartialEq)]
enum Field {
    Genre,
    Country,
}

pub struct SearchBar {
    genre: TextField,
    country: TextField,
    active: Field,
}

impl SearchBar {
    pub fn new() -> Self {
        Self {
            genre: TextField::new("genre", "rock, jazz, salsa…"),
            country: TextField::new("country", "Ecuador, Spain…"),
            active: Field::Genre,
        }
    }

    /// Preload both inputs (session restore). Does not emit actions; the
    /// caller is responsible for syncing the controller's filter.
    pub fn set_values(&mut self, genre: &str, country: &str) {
        self.genre.set_value(genre);
        self.country.set_value(country);
    }

    pub fn values(&self) -> (&str, &str) {
        (self.genre.text(), self.country.text())
    }

    /// Fixed height: two input rows + hint row + borders.
    pub const HEIGHT: u16 = 5;
}

impl Component for SearchBar {
    fn handle_key(&mut self, key: KeyEvent, _state: &ViewState) -> Vec<Action> {
        if key.kind == KeyEventKind::Release {
            return vec![];
        }

        // Up/Down hop between the two fields.
        match key.code {
            KeyCode::Up | KeyCode::Down => {
                self.active = match self.active {
                    Field::Genre => Field::Country,
                    Field::Country => Field::Genre,
                };
                return vec![];
            }
            _ => {}
        }

        let field = match self.active {
            Field::Genre => &mut self.genre,
            Field::Country => &mut self.country,
        };
        match field.handle_key(key) {
            FieldAction::Changed(text) => match self.active {
                Field::Genre => vec![Action::GenreChanged(text)],
                Field::Country => vec![Action::CountryChanged(text)],
            },
            FieldAction::Confirmed => vec![Action::SubmitSearch],
            FieldAction::Cancelled => vec![Action::FocusPane(ComponentId::Results)],
        }
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect, focused: bool, _state: &ViewState) {
        let block = pane_chrome("search", Some('1'), focused);
        let inner = block.inner(area);
        frame.render_widget(block, area);
        if inner.height < 2 {
            return;
        }

        let row = |i: u16| Rect {
            y: inner.y + i,
            height: 1,
            ..inner
        };
        self.genre
            .draw(frame, row(0), focused && self.active == Field::Genre);
        self.country
            .draw(frame, row(1), focused && self.active == Field::Country);

        if inner.height >= 3 {
            let hint = Line::from(vec![
                Span::styled("enter", Style::default().fg(C_ACCENT)),
                Span::styled(" search · ", Style::default().fg(C_MUTED)),
                Span::styled("↑↓", Style::default().fg(C_ACCENT)),
                Span::styled(" field · ", Style::default().fg(C_MUTED)),
                Span::styled("esc", Style::default().fg(C_ACCENT)),
                Span::styled(" clear", Style::default().fg(C_MUTED)),
            ]);
            frame.render_widget(Paragraph::new(hint), row(2));
        }
    }
}
