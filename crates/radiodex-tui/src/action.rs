//! Action enum — all user-initiated intents and internal events.

use radiodex_core::station::StationRecord;

/// Unique identifier for a focusable component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentId {
    SearchBar,
    Results,
    Favorites,
}

/// All actions that can flow through the system.
/// Components produce Actions; the App dispatches them.
#[derive(Debug, Clone)]
pub enum Action {
    // ── Search / pagination ─────────────────────────────────────────────────
    GenreChanged(String),
    CountryChanged(String),
    SubmitSearch,
    /// Request an absolute page. The controller ignores targets below 1,
    /// which is what keeps "previous" inert on page 1.
    GoToPage(i64),

    // ── Playback ────────────────────────────────────────────────────────────
    Play(StationRecord),
    Stop,

    // ── Favorites ───────────────────────────────────────────────────────────
    ToggleFavorite(StationRecord),

    // ── Navigation ──────────────────────────────────────────────────────────
    FocusNext,
    FocusPrev,
    FocusPane(ComponentId),

    // ── Misc ────────────────────────────────────────────────────────────────
    CopyToClipboard(String),
    Quit,
}
