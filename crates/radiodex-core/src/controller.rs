//! SearchController — the state machine coordinating filter, pagination,
//! results and favorites.
//!
//! The controller is synchronous and owns no I/O. Issuing a fetch hands
//! the caller a [`FetchTicket`]; the caller runs the directory request on
//! its own task and feeds the outcome back through [`commit`]. Only the
//! ticket from the most recent `begin_search` / `go_to_page` call may
//! commit — a response to a superseded ticket is discarded on arrival,
//! so an out-of-order slow response can never clobber a newer one.
//!
//! [`commit`]: SearchController::commit

use tracing::{debug, info};

use crate::directory::{DirectoryError, Filter};
use crate::favorites::FavoritesStore;
use crate::station::StationRecord;

/// Lifecycle of the search view. The machine cycles for the session:
/// `Idle → Loading → {Loaded, Failed} → Loading → …`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    Loading,
    Loaded,
    Failed,
}

/// One-shot user-visible advisory. Not an error channel: `NoResults`
/// accompanies a successful-but-empty page, while `SearchFailed` comes
/// with the `Failed` phase.
#[derive(Debug, Clone, PartialEq)]
pub enum Advisory {
    NoResults,
    SearchFailed(String),
}

/// Authorization to run one fetch. Carries a snapshot of the filter and
/// the target page so later filter edits cannot leak into an in-flight
/// request.
#[derive(Debug, Clone)]
pub struct FetchTicket {
    pub generation: u64,
    pub page: u32,
    pub filter: Filter,
}

pub struct SearchController {
    filter: Filter,
    page: u32,
    results: Vec<StationRecord>,
    phase: Phase,
    generation: u64,
    advisory: Option<Advisory>,
    favorites: FavoritesStore,
    revision: u64,
}

impl SearchController {
    pub fn new(favorites: FavoritesStore) -> Self {
        Self {
            filter: Filter::default(),
            page: 1,
            results: Vec::new(),
            phase: Phase::Idle,
            generation: 0,
            advisory: None,
            favorites,
            revision: 0,
        }
    }

    // ── Filter edits (pure state, never trigger a fetch) ─────────────────

    pub fn set_genre(&mut self, genre: impl Into<String>) {
        self.filter.genre = genre.into();
        self.touch();
    }

    pub fn set_country(&mut self, country: impl Into<String>) {
        self.filter.country = country.into();
        self.touch();
    }

    pub fn filter(&self) -> &Filter {
        &self.filter
    }

    // ── Fetch issuance ───────────────────────────────────────────────────

    /// Explicit user-initiated query: enter `Loading` and reset to page 1.
    /// Issuing while already loading supersedes the in-flight request.
    pub fn begin_search(&mut self) -> FetchTicket {
        self.page = 1;
        self.issue(1)
    }

    /// Request a specific page. `target < 1` is a no-op (guards the
    /// "previous" control on page 1): no ticket, no state change.
    /// The committed page only moves on a successful response.
    pub fn go_to_page(&mut self, target: i64) -> Option<FetchTicket> {
        if target < 1 {
            return None;
        }
        Some(self.issue(target as u32))
    }

    fn issue(&mut self, page: u32) -> FetchTicket {
        self.generation += 1;
        self.phase = Phase::Loading;
        self.touch();
        debug!(generation = self.generation, page, "fetch issued");
        FetchTicket {
            generation: self.generation,
            page,
            filter: self.filter.clone(),
        }
    }

    // ── Response arrival ─────────────────────────────────────────────────

    /// Feed a fetch outcome back into the machine. Returns `false` when
    /// the ticket was superseded and the outcome discarded untouched.
    ///
    /// On success the results are replaced wholesale — an empty page is a
    /// valid terminal page, committed like any other, with a `NoResults`
    /// advisory. On failure the previous results (and page) stay visible
    /// and a `SearchFailed` advisory is raised.
    pub fn commit(
        &mut self,
        ticket: &FetchTicket,
        outcome: Result<Vec<StationRecord>, DirectoryError>,
    ) -> bool {
        if ticket.generation != self.generation {
            debug!(
                stale = ticket.generation,
                latest = self.generation,
                "discarding superseded response"
            );
            return false;
        }

        match outcome {
            Ok(stations) => {
                if stations.is_empty() {
                    self.advisory = Some(Advisory::NoResults);
                }
                info!(page = ticket.page, count = stations.len(), "results committed");
                self.results = stations;
                self.page = ticket.page;
                self.phase = Phase::Loaded;
            }
            Err(e) => {
                info!(page = ticket.page, error = %e, "search failed");
                self.advisory = Some(Advisory::SearchFailed(e.to_string()));
                self.phase = Phase::Failed;
            }
        }
        self.touch();
        true
    }

    /// Take the pending advisory, if any. One-shot.
    pub fn take_advisory(&mut self) -> Option<Advisory> {
        self.advisory.take()
    }

    // ── Favorites ────────────────────────────────────────────────────────

    /// Delegates to the store; results/page/loading are untouched.
    pub fn toggle_favorite(&mut self, station: &StationRecord) {
        self.favorites.toggle(station);
        self.touch();
    }

    pub fn favorites(&self) -> &[StationRecord] {
        self.favorites.stations()
    }

    pub fn is_favorite(&self, station: &StationRecord) -> bool {
        self.favorites.contains(&station.url_resolved)
    }

    // ── Read surface for the view ────────────────────────────────────────

    pub fn results(&self) -> &[StationRecord] {
        &self.results
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_loading(&self) -> bool {
        self.phase == Phase::Loading
    }

    /// Monotonic change counter — the view redraws when this moves.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    fn touch(&mut self) {
        self.revision += 1;
    }
}
