//! App — component-based event loop.
//!
//! - `App` owns the `SearchController` and all components; components see
//!   a read-only `ViewState` snapshot and return `Vec<Action>`.
//! - A `tokio::mpsc` channel carries `AppMessage` events in from the
//!   input pump and from fetch tasks.
//! - Directory fetches run on spawned tasks holding a `FetchTicket`; the
//!   outcome comes back as `FetchDone` and only commits if the ticket is
//!   still the latest (the controller discards superseded responses).

use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use ratatui::crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Terminal,
};
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

use radiodex_core::controller::{Advisory, FetchTicket, Phase, SearchController};
use radiodex_core::directory::{DirectoryClient, DirectoryError};
use radiodex_core::station::StationRecord;

use crate::action::{Action, ComponentId};
use crate::component::Component;
use crate::components::{
    favorites_panel::FavoritesPanel, results::Results, search_bar::SearchBar,
};
use crate::focus::FocusRing;
use crate::player::Player;
use crate::theme::{C_ACCENT, C_MUTED};
use crate::widgets::toast::{Severity, ToastManager};

// ── Internal event bus ────────────────────────────────────────────────────────

enum AppMessage {
    Event(Event),
    FetchDone {
        ticket: FetchTicket,
        outcome: Result<Vec<StationRecord>, DirectoryError>,
    },
}

// ── Read-only snapshot for components ────────────────────────────────────────

/// What components may read. Rebuilt from the controller whenever its
/// revision moves; components never touch the controller directly.
pub struct ViewState {
    pub phase: Phase,
    pub page: u32,
    pub results: Vec<StationRecord>,
    pub favorites: Vec<StationRecord>,
    pub playing_url: Option<String>,
}

impl ViewState {
    pub fn is_playing(&self, url: &str) -> bool {
        self.playing_url.as_deref() == Some(url)
    }

    pub fn is_favorite(&self, url: &str) -> bool {
        self.favorites.iter().any(|s| s.url_resolved == url)
    }

    /// True once any search has been issued this session.
    pub fn has_searched(&self) -> bool {
        self.phase != Phase::Idle
    }
}

// ── Session persistence ───────────────────────────────────────────────────────

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize, Default)]
struct UiSessionState {
    genre: String,
    country: String,
    focused_component: String,
}

// ── App ───────────────────────────────────────────────────────────────────────

pub struct App {
    controller: SearchController,
    directory: Arc<DirectoryClient>,
    player: Player,

    search_bar: SearchBar,
    results: Results,
    favorites: FavoritesPanel,
    focus: FocusRing,

    toast: ToastManager,
    view: ViewState,
    seen_revision: u64,

    msg_tx: Option<mpsc::Sender<AppMessage>>,
    ui_state_path: PathBuf,
    should_quit: bool,
}

impl App {
    pub fn new(
        mut controller: SearchController,
        directory: DirectoryClient,
        ui_state_path: PathBuf,
    ) -> Self {
        let mut search_bar = SearchBar::new();
        let mut focus = FocusRing::new(vec![
            ComponentId::SearchBar,
            ComponentId::Results,
            ComponentId::Favorites,
        ]);

        // Restore last session's filter text and focused pane.
        let session: UiSessionState = std::fs::read_to_string(&ui_state_path)
            .ok()
            .and_then(|raw| serde_json::from_str(&raw).ok())
            .unwrap_or_default();
        search_bar.set_values(&session.genre, &session.country);
        controller.set_genre(session.genre.clone());
        controller.set_country(session.country.clone());
        match session.focused_component.as_str() {
            "results" => focus.set(ComponentId::Results),
            "favorites" => focus.set(ComponentId::Favorites),
            _ => {}
        }

        let view = ViewState {
            phase: controller.phase(),
            page: controller.page(),
            results: Vec::new(),
            favorites: controller.favorites().to_vec(),
            playing_url: None,
        };
        let seen_revision = controller.revision();

        Self {
            controller,
            directory: Arc::new(directory),
            player: Player::new(),
            search_bar,
            results: Results::new(),
            favorites: FavoritesPanel::new(),
            focus,
            toast: ToastManager::new(),
            view,
            seen_revision,
            msg_tx: None,
            ui_state_path,
            should_quit: false,
        }
    }

    // ── Main run loop ─────────────────────────────────────────────────────────

    pub async fn run(mut self) -> anyhow::Result<()> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let (tx, mut rx) = mpsc::channel::<AppMessage>(256);
        self.msg_tx = Some(tx.clone());

        // ── Background task: keyboard events ─────────────────────────────────
        let event_tx = tx.clone();
        tokio::task::spawn_blocking(move || loop {
            match event::read() {
                Ok(ev) => {
                    if event_tx.blocking_send(AppMessage::Event(ev)).is_err() {
                        break;
                    }
                }
                Err(_) => break,
            }
        });

        // Toast expiry + spinner animation.
        let mut toast_tick = tokio::time::interval(Duration::from_millis(100));
        toast_tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

        // Notice mpv exits so the playing marker stays honest.
        let mut player_tick = tokio::time::interval(Duration::from_secs(1));
        player_tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

        info!("radiodex UI running");
        let mut needs_redraw = true;
        loop {
            if needs_redraw {
                self.refresh_view();
                terminal.draw(|f| self.draw(f))?;
            }
            needs_redraw = false;

            if self.should_quit {
                break;
            }

            tokio::select! {
                Some(msg) = rx.recv() => {
                    needs_redraw = self.handle_message(msg).await;
                    // Drain whatever queued up behind it (typing bursts).
                    while let Ok(next) = rx.try_recv() {
                        needs_redraw |= self.handle_message(next).await;
                    }
                }
                _ = toast_tick.tick() => {
                    if !self.toast.is_empty() {
                        self.toast.tick();
                        needs_redraw = true;
                    }
                }
                _ = player_tick.tick() => {
                    let was = self.player.current_url().map(str::to_string);
                    self.player.reap();
                    needs_redraw = was.as_deref() != self.player.current_url();
                }
            }
        }

        self.save_session();
        self.player.stop();

        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;
        info!("radiodex UI stopped");
        Ok(())
    }

    // ── Message handling ─────────────────────────────────────────────────────

    async fn handle_message(&mut self, msg: AppMessage) -> bool {
        match msg {
            AppMessage::Event(Event::Key(key)) => {
                let actions = self.route_key(key);
                for action in actions {
                    self.dispatch(action).await;
                }
                true
            }
            AppMessage::Event(Event::Resize(_, _)) => true,
            AppMessage::Event(_) => false,
            AppMessage::FetchDone { ticket, outcome } => {
                self.on_fetch_done(ticket, outcome);
                true
            }
        }
    }

    fn route_key(&mut self, key: KeyEvent) -> Vec<Action> {
        if key.kind == KeyEventKind::Release {
            return vec![];
        }

        // Global keys first.
        match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                return vec![Action::Quit];
            }
            KeyCode::Tab => return vec![Action::FocusNext],
            KeyCode::BackTab => return vec![Action::FocusPrev],
            _ => {}
        }

        // Printable shortcuts only apply outside the text inputs.
        if !self.focus.is_focused(ComponentId::SearchBar) {
            match key.code {
                KeyCode::Char('q') => return vec![Action::Quit],
                KeyCode::Char('/') | KeyCode::Char('1') => {
                    return vec![Action::FocusPane(ComponentId::SearchBar)];
                }
                KeyCode::Char('2') => return vec![Action::FocusPane(ComponentId::Results)],
                KeyCode::Char('3') => return vec![Action::FocusPane(ComponentId::Favorites)],
                KeyCode::Char('s') => return vec![Action::Stop],
                _ => {}
            }
        }

        match self.focus.current() {
            Some(ComponentId::SearchBar) => self.search_bar.handle_key(key, &self.view),
            Some(ComponentId::Results) => self.results.handle_key(key, &self.view),
            Some(ComponentId::Favorites) => self.favorites.handle_key(key, &self.view),
            None => vec![],
        }
    }

    async fn dispatch(&mut self, action: Action) {
        match action {
            Action::GenreChanged(text) => self.controller.set_genre(text),
            Action::CountryChanged(text) => self.controller.set_country(text),

            Action::SubmitSearch => {
                let ticket = self.controller.begin_search();
                self.toast.spinner("searching…");
                self.spawn_fetch(ticket);
            }
            Action::GoToPage(target) => {
                if let Some(ticket) = self.controller.go_to_page(target) {
                    self.toast.spinner(format!("loading page {}…", ticket.page));
                    self.spawn_fetch(ticket);
                }
            }

            Action::Play(station) => match self.player.play(&station.url_resolved) {
                Ok(()) => self.toast.info(format!("playing {}", station.name)),
                Err(e) => {
                    error!("playback failed: {e:#}");
                    self.toast.error(format!("playback failed: {e}"));
                }
            },
            Action::Stop => self.player.stop(),

            Action::ToggleFavorite(station) => {
                self.controller.toggle_favorite(&station);
                if self.controller.is_favorite(&station) {
                    self.toast.info(format!("★ {}", station.name));
                } else {
                    self.toast.info(format!("removed {}", station.name));
                }
            }

            Action::FocusNext => self.focus.next(),
            Action::FocusPrev => self.focus.prev(),
            Action::FocusPane(id) => self.focus.set(id),

            Action::CopyToClipboard(text) => {
                match arboard::Clipboard::new().and_then(|mut cb| cb.set_text(text)) {
                    Ok(()) => self.toast.info("stream URL copied"),
                    Err(e) => {
                        warn!("clipboard unavailable: {e}");
                        self.toast.warning("clipboard unavailable");
                    }
                }
            }

            Action::Quit => self.should_quit = true,
        }
    }

    fn spawn_fetch(&self, ticket: FetchTicket) {
        let Some(tx) = self.msg_tx.clone() else {
            return;
        };
        let directory = self.directory.clone();
        tokio::spawn(async move {
            let outcome = directory.search(&ticket.filter, ticket.page).await;
            let _ = tx.send(AppMessage::FetchDone { ticket, outcome }).await;
        });
    }

    fn on_fetch_done(
        &mut self,
        ticket: FetchTicket,
        outcome: Result<Vec<StationRecord>, DirectoryError>,
    ) {
        if !self.controller.commit(&ticket, outcome) {
            // Superseded response; the newer request owns the spinner.
            debug!(generation = ticket.generation, "stale fetch ignored");
            return;
        }
        match self.controller.take_advisory() {
            None => {
                let count = self.controller.results().len();
                self.toast.resolve_spinner(
                    Severity::Success,
                    format!("{} stations · page {}", count, self.controller.page()),
                );
            }
            Some(Advisory::NoResults) => {
                self.toast
                    .resolve_spinner(Severity::Warning, "no playable stations for this search");
            }
            Some(Advisory::SearchFailed(msg)) => {
                self.toast.resolve_spinner(Severity::Error, msg);
            }
        }
    }

    // ── View sync / session ──────────────────────────────────────────────────

    fn refresh_view(&mut self) {
        if self.controller.revision() != self.seen_revision {
            self.seen_revision = self.controller.revision();
            self.view.phase = self.controller.phase();
            self.view.page = self.controller.page();
            self.view.results = self.controller.results().to_vec();
            self.view.favorites = self.controller.favorites().to_vec();
        }
        self.view.playing_url = self.player.current_url().map(str::to_string);
    }

    fn save_session(&self) {
        let (genre, country) = self.search_bar.values();
        let session = UiSessionState {
            genre: genre.to_string(),
            country: country.to_string(),
            focused_component: match self.focus.current() {
                Some(ComponentId::Results) => "results",
                Some(ComponentId::Favorites) => "favorites",
                _ => "search",
            }
            .to_string(),
        };
        match serde_json::to_string_pretty(&session) {
            Ok(json) => {
                if let Err(e) = std::fs::write(&self.ui_state_path, json) {
                    warn!("failed to save session state: {e}");
                }
            }
            Err(e) => warn!("failed to serialize session state: {e}"),
        }
    }

    // ── Drawing ──────────────────────────────────────────────────────────────

    fn draw(&mut self, frame: &mut ratatui::Frame) {
        let area = frame.area();
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(SearchBar::HEIGHT),
                Constraint::Min(8),
                Constraint::Percentage(30),
                Constraint::Length(1),
            ])
            .split(area);

        let focused = |id| self.focus.is_focused(id);
        self.search_bar
            .draw(frame, rows[0], focused(ComponentId::SearchBar), &self.view);
        self.results
            .draw(frame, rows[1], focused(ComponentId::Results), &self.view);
        self.favorites
            .draw(frame, rows[2], focused(ComponentId::Favorites), &self.view);

        self.draw_status_line(frame, rows[3]);
        self.toast.draw(frame, area);
    }

    fn draw_status_line(&self, frame: &mut ratatui::Frame, area: Rect) {
        let playing = self
            .view
            .playing_url
            .as_deref()
            .and_then(|url| {
                self.view
                    .results
                    .iter()
                    .chain(self.view.favorites.iter())
                    .find(|s| s.url_resolved == url)
            })
            .map(|s| s.name.clone());

        let mut spans = vec![
            Span::styled(" tab", Style::default().fg(C_ACCENT)),
            Span::styled(" panes · ", Style::default().fg(C_MUTED)),
            Span::styled("enter", Style::default().fg(C_ACCENT)),
            Span::styled(" play · ", Style::default().fg(C_MUTED)),
            Span::styled("f", Style::default().fg(C_ACCENT)),
            Span::styled(" favorite · ", Style::default().fg(C_MUTED)),
            Span::styled("h/l", Style::default().fg(C_ACCENT)),
            Span::styled(" pages · ", Style::default().fg(C_MUTED)),
            Span::styled("q", Style::default().fg(C_ACCENT)),
            Span::styled(" quit", Style::default().fg(C_MUTED)),
        ];
        if let Some(name) = playing {
            spans.push(Span::styled("   ▶ ", crate::theme::style_playing()));
            spans.push(Span::styled(name, crate::theme::style_playing()));
        }
        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }
}
