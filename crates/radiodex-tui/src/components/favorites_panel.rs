//! FavoritesPanel — the persisted favorites, mirroring the results layout.

use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyEventKind};
use ratatui::{
    layout::Rect,
    text::Span,
    widgets::{List, ListItem, ListState, Paragraph},
    Frame,
};

use crate::action::Action;
use crate::app::ViewState;
use crate::component::Component;
use crate::components::station_row;
use crate::theme::style_muted;
use crate::widgets::pane_chrome::pane_chrome;

pub struct FavoritesPanel {
    selected: usize,
    list_state: ListState,
}

impl FavoritesPanel {
    pub fn new() -> Self {
        Self {
            selected: 0,
            list_state: ListState::default(),
        }
    }

    fn clamp(&mut self, len: usize) {
        if len == 0 {
            self.selected = 0;
        } else if self.selected >= len {
            self.selected = len - 1;
        }
    }
}

impl Component for FavoritesPanel {
    fn handle_key(&mut self, key: KeyEvent, state: &ViewState) -> Vec<Action> {
        if key.kind == KeyEventKind::Release {
            return vec![];
        }
        self.clamp(state.favorites.len());

        match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                self.selected = self.selected.saturating_sub(1);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                if self.selected + 1 < state.favorites.len() {
                    self.selected += 1;
                }
            }
            KeyCode::Home | KeyCode::Char('g') => self.selected = 0,
            KeyCode::End | KeyCode::Char('G') => {
                self.selected = state.favorites.len().saturating_sub(1)
            }

            KeyCode::Enter => {
                if let Some(st) = state.favorites.get(self.selected) {
                    return if state.is_playing(&st.url_resolved) {
                        vec![Action::Stop]
                    } else {
                        vec![Action::Play(st.clone())]
                    };
                }
            }
            KeyCode::Char('f') | KeyCode::Delete => {
                if let Some(st) = state.favorites.get(self.selected) {
                    return vec![Action::ToggleFavorite(st.clone())];
                }
            }
            KeyCode::Char('y') => {
                if let Some(st) = state.favorites.get(self.selected) {
                    return vec![Action::CopyToClipboard(st.url_resolved.clone())];
                }
            }
            _ => {}
        }
        vec![]
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect, focused: bool, state: &ViewState) {
        let title = if state.favorites.is_empty() {
            "favorites".to_string()
        } else {
            format!("favorites ({})", state.favorites.len())
        };
        let block = pane_chrome(&title, Some('3'), focused);
        let inner = block.inner(area);
        frame.render_widget(block, area);
        if inner.height == 0 {
            return;
        }

        if state.favorites.is_empty() {
            frame.render_widget(
                Paragraph::new(Span::styled(
                    "  press f on a station to keep it here",
                    style_muted(),
                )),
                inner,
            );
            return;
        }

        self.clamp(state.favorites.len());
        let items: Vec<ListItem> = state
            .favorites
            .iter()
            .enumerate()
            .map(|(i, st)| {
                station_row(
                    st,
                    i == self.selected && focused,
                    state.is_playing(&st.url_resolved),
                    true,
                    inner.width,
                )
            })
            .collect();

        let list = List::new(items).highlight_symbol("");
        self.list_state.select(Some(self.selected));
        frame.render_stateful_widget(list, inner, &mut self.list_state);
    }
}
