//! Results — the paginated station list for the current search.

use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyEventKind};
use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{List, ListItem, ListState, Paragraph},
    Frame,
};

use radiodex_core::controller::Phase;

use crate::action::Action;
use crate::app::ViewState;
use crate::component::Component;
use crate::components::station_row;
use crate::theme::{style_muted, C_ACCENT, C_MUTED, C_SECONDARY, C_TOAST_ERROR};
use crate::widgets::pane_chrome::pane_chrome;

pub struct Results {
    selected: usize,
    list_state: ListState,
}

impl Results {
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

    fn selected_station(&self, state: &ViewState) -> Option<Action> {
        state.results.get(self.selected).map(|st| {
            if state.is_playing(&st.url_resolved) {
                Action::Stop
            } else {
                Action::Play(st.clone())
            }
        })
    }

    fn footer_line(&self, state: &ViewState) -> Line<'static> {
        let on_first_page = state.page <= 1;
        let prev_style = if on_first_page {
            Style::default().fg(C_MUTED)
        } else {
            Style::default().fg(C_ACCENT)
        };
        let mut spans = vec![
            Span::styled("‹h prev", prev_style),
            Span::styled(
                format!("  page {}  ", state.page),
                Style::default().fg(C_SECONDARY),
            ),
            Span::styled("next l›", Style::default().fg(C_ACCENT)),
        ];
        if state.phase == Phase::Failed {
            spans.push(Span::styled(
                "   search failed — showing last results",
                Style::default().fg(C_TOAST_ERROR),
            ));
        }
        Line::from(spans)
    }
}

impl Component for Results {
    fn handle_key(&mut self, key: KeyEvent, state: &ViewState) -> Vec<Action> {
        if key.kind == KeyEventKind::Release {
            return vec![];
        }
        self.clamp(state.results.len());

        match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                self.selected = self.selected.saturating_sub(1);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                if self.selected + 1 < state.results.len() {
                    self.selected += 1;
                }
            }
            KeyCode::Home | KeyCode::Char('g') => self.selected = 0,
            KeyCode::End | KeyCode::Char('G') => {
                self.selected = state.results.len().saturating_sub(1)
            }

            KeyCode::Enter => {
                if let Some(action) = self.selected_station(state) {
                    return vec![action];
                }
            }
            KeyCode::Char('f') | KeyCode::Char(' ') => {
                if let Some(st) = state.results.get(self.selected) {
                    return vec![Action::ToggleFavorite(st.clone())];
                }
            }
            KeyCode::Char('y') => {
                if let Some(st) = state.results.get(self.selected) {
                    return vec![Action::CopyToClipboard(st.url_resolved.clone())];
                }
            }

            // Pagination: the controller no-ops targets below 1, so prev
            // on page 1 is safely inert.
            KeyCode::Left | KeyCode::Char('h') => {
                if state.has_searched() {
                    return vec![Action::GoToPage(state.page as i64 - 1)];
                }
            }
            KeyCode::Right | KeyCode::Char('l') => {
                if state.has_searched() {
                    return vec![Action::GoToPage(state.page as i64 + 1)];
                }
            }
            _ => {}
        }
        vec![]
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect, focused: bool, state: &ViewState) {
        let block = pane_chrome("stations", Some('2'), focused);
        let inner = block.inner(area);
        frame.render_widget(block, area);
        if inner.height == 0 {
            return;
        }

        if state.results.is_empty() {
            let msg = match state.phase {
                Phase::Idle => "  enter a genre or country, then press Enter",
                Phase::Loading => "  searching…",
                Phase::Loaded => "  no playable stations for this search",
                Phase::Failed => "  search failed — try again",
            };
            frame.render_widget(Paragraph::new(Span::styled(msg, style_muted())), inner);
            if state.has_searched() && inner.height > 1 {
                let footer = Rect {
                    y: inner.y + inner.height - 1,
                    height: 1,
                    ..inner
                };
                frame.render_widget(Paragraph::new(self.footer_line(state)), footer);
            }
            return;
        }

        self.clamp(state.results.len());
        let list_area = Rect {
            height: inner.height.saturating_sub(1),
            ..inner
        };
        let items: Vec<ListItem> = state
            .results
            .iter()
            .enumerate()
            .map(|(i, st)| {
                station_row(
                    st,
                    i == self.selected && focused,
                    state.is_playing(&st.url_resolved),
                    state.is_favorite(&st.url_resolved),
                    list_area.width,
                )
            })
            .collect();

        let list = List::new(items).highlight_symbol("");
        self.list_state.select(Some(self.selected));
        frame.render_stateful_widget(list, list_area, &mut self.list_state);

        let footer = Rect {
            y: inner.y + inner.height - 1,
            height: 1,
            ..inner
        };
        frame.render_widget(Paragraph::new(self.footer_line(state)), footer);
    }
}
