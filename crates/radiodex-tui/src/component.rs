//! Component trait — the interface every UI panel implements.
//!
//! Components are self-contained: they own their cursor/selection state
//! and render themselves from the read-only `ViewState` snapshot. They
//! never mutate shared state directly — they return `Vec<Action>` and the
//! App event-loop dispatches those.

use ratatui::crossterm::event::KeyEvent;
use ratatui::{layout::Rect, Frame};

use crate::action::Action;
use crate::app::ViewState;

pub trait Component {
    /// Handle a key event. Called when this component has focus.
    fn handle_key(&mut self, key: KeyEvent, state: &ViewState) -> Vec<Action>;

    /// Render the component into `area`.
    fn draw(&mut self, frame: &mut Frame, area: Rect, focused: bool, state: &ViewState);
}
