//! Catalog search state machine.
//!
//! [`CatalogState::handle`] is a pure reducer: it applies one
//! [`CatalogEvent`] and returns the [`CatalogCommand`] the caller must run, if
//! any. The caller performs the I/O (see [`run_fetch_cycle`]) and feeds the
//! outcome back as another event.
//!
//! ## Transitions
//!
//! | From | Event | To | Command |
//! |------|-------|----|---------|
//! | Idle | Mount | LoadingBreeds | LoadBreeds |
//! | LoadingBreeds | BreedsLoaded / BreedsFailed | LoadingResults | FetchResults |
//! | LoadingResults, Ready, Errored | Filter / page change | LoadingResults | FetchResults |
//! | LoadingResults | ResultsLoaded (latest seq) | Ready | - |
//! | LoadingResults | ResultsFailed (latest seq) | Errored | - |
//!
//! Every `FetchResults` carries a fresh sequence number. Completions for any
//! other sequence number are stale and dropped.

use std::time::Instant;

use tracing::{debug, info, warn};

use crate::defaults;
use crate::favorites::Favorites;
use crate::logging;
use crate::models::{Dog, DogId};
use crate::pagination::{total_pages, PageWindow};
use crate::query::{FilterUpdate, SearchQuery};
use crate::traits::DogGateway;

/// Lifecycle phase of the catalog view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogPhase {
    Idle,
    LoadingBreeds,
    LoadingResults,
    Ready,
    Errored,
}

/// Handle for one search-then-resolve fetch cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    pub seq: u64,
    pub query: SearchQuery,
}

/// Inputs to the catalog state machine.
#[derive(Debug, Clone, PartialEq)]
pub enum CatalogEvent {
    Mount,
    BreedsLoaded(Vec<String>),
    BreedsFailed(String),
    Filter(FilterUpdate),
    /// Jump to a 1-based page.
    GoToPage(u32),
    NextPage,
    PrevPage,
    ResultsLoaded {
        seq: u64,
        total: u64,
        dogs: Vec<Dog>,
    },
    ResultsFailed {
        seq: u64,
        error: String,
    },
    ToggleFavorite(DogId),
}

/// Work the caller must perform after a transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogCommand {
    LoadBreeds,
    FetchResults(FetchTicket),
}

/// Complete catalog view state.
#[derive(Debug, Clone)]
pub struct CatalogState {
    phase: CatalogPhase,
    breeds: Vec<String>,
    query: SearchQuery,
    total: u64,
    dogs: Vec<Dog>,
    favorites: Favorites,
    error: Option<String>,
    last_seq: u64,
}

impl Default for CatalogState {
    fn default() -> Self {
        Self::new(SearchQuery::default())
    }
}

impl CatalogState {
    /// Fresh state that will start from `initial` once mounted.
    pub fn new(initial: SearchQuery) -> Self {
        Self {
            phase: CatalogPhase::Idle,
            breeds: Vec::new(),
            query: initial,
            total: 0,
            dogs: Vec::new(),
            favorites: Favorites::new(),
            error: None,
            last_seq: 0,
        }
    }

    pub fn phase(&self) -> CatalogPhase {
        self.phase
    }

    pub fn breeds(&self) -> &[String] {
        &self.breeds
    }

    pub fn query(&self) -> &SearchQuery {
        &self.query
    }

    pub fn total(&self) -> u64 {
        self.total
    }

    pub fn dogs(&self) -> &[Dog] {
        &self.dogs
    }

    pub fn favorites(&self) -> &Favorites {
        &self.favorites
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn current_page(&self) -> u32 {
        self.query.current_page()
    }

    pub fn total_pages(&self) -> u32 {
        total_pages(self.total, self.query.size)
    }

    pub fn page_window(&self) -> PageWindow {
        PageWindow::new(self.current_page(), self.total_pages())
    }

    /// The pagination control is only shown when results span several pages.
    pub fn shows_pagination(&self) -> bool {
        self.total > u64::from(self.query.size)
    }

    /// Results header, e.g. `Found 57 dogs • Page 1 of 3`.
    pub fn summary(&self) -> String {
        format!(
            "Found {} dogs • Page {} of {}",
            self.total,
            self.current_page(),
            self.total_pages()
        )
    }

    /// Filter and page changes are accepted once the breed phase is over.
    pub fn accepts_query_changes(&self) -> bool {
        matches!(
            self.phase,
            CatalogPhase::LoadingResults | CatalogPhase::Ready | CatalogPhase::Errored
        )
    }

    /// Apply one event, returning the command the caller must run.
    pub fn handle(&mut self, event: CatalogEvent) -> Option<CatalogCommand> {
        match event {
            CatalogEvent::Mount => {
                if self.phase != CatalogPhase::Idle {
                    debug!(subsystem = logging::CATALOG, phase = ?self.phase, "Ignoring repeated mount");
                    return None;
                }
                self.phase = CatalogPhase::LoadingBreeds;
                Some(CatalogCommand::LoadBreeds)
            }
            CatalogEvent::BreedsLoaded(breeds) => {
                if self.phase != CatalogPhase::LoadingBreeds {
                    return None;
                }
                debug!(subsystem = logging::CATALOG, result_count = breeds.len(), "Breeds loaded");
                self.breeds = breeds;
                Some(self.begin_fetch())
            }
            CatalogEvent::BreedsFailed(error) => {
                if self.phase != CatalogPhase::LoadingBreeds {
                    return None;
                }
                warn!(
                    subsystem = logging::CATALOG,
                    error = %error,
                    "Failed to fetch breeds, continuing without breed filter options"
                );
                self.breeds.clear();
                Some(self.begin_fetch())
            }
            CatalogEvent::Filter(update) => {
                if !self.accepts_query_changes() {
                    debug!(subsystem = logging::CATALOG, phase = ?self.phase, "Filter change before breeds loaded, ignored");
                    return None;
                }
                self.query.apply(update);
                Some(self.begin_fetch())
            }
            CatalogEvent::GoToPage(page) => {
                if !self.accepts_query_changes() {
                    return None;
                }
                let page = page.clamp(1, self.total_pages().max(1));
                self.query.go_to_page(page);
                Some(self.begin_fetch())
            }
            CatalogEvent::NextPage => {
                if !self.accepts_query_changes() || !self.page_window().has_next() {
                    return None;
                }
                let page = self.current_page() + 1;
                self.handle(CatalogEvent::GoToPage(page))
            }
            CatalogEvent::PrevPage => {
                if !self.accepts_query_changes() || self.current_page() <= 1 {
                    return None;
                }
                let page = self.current_page() - 1;
                self.handle(CatalogEvent::GoToPage(page))
            }
            CatalogEvent::ResultsLoaded { seq, total, dogs } => {
                if !self.is_current(seq) {
                    return None;
                }
                info!(
                    subsystem = logging::CATALOG,
                    seq,
                    total,
                    result_count = dogs.len(),
                    "Search results ready"
                );
                self.phase = CatalogPhase::Ready;
                self.total = total;
                self.dogs = dogs;
                self.error = None;
                None
            }
            CatalogEvent::ResultsFailed { seq, error } => {
                if !self.is_current(seq) {
                    return None;
                }
                warn!(subsystem = logging::CATALOG, seq, error = %error, "Failed to fetch dogs");
                self.phase = CatalogPhase::Errored;
                self.total = 0;
                self.dogs.clear();
                self.error = Some(error);
                None
            }
            CatalogEvent::ToggleFavorite(id) => {
                let now_favorite = self.favorites.toggle(&id);
                debug!(subsystem = logging::CATALOG, dog_id = %id, favorite = now_favorite, "Favorite toggled");
                None
            }
        }
    }

    fn begin_fetch(&mut self) -> CatalogCommand {
        self.last_seq += 1;
        self.phase = CatalogPhase::LoadingResults;
        debug!(
            subsystem = logging::CATALOG,
            seq = self.last_seq,
            from = self.query.from,
            sort = %self.query.sort,
            "Issuing search"
        );
        CatalogCommand::FetchResults(FetchTicket {
            seq: self.last_seq,
            query: self.query.clone(),
        })
    }

    fn is_current(&self, seq: u64) -> bool {
        if self.phase == CatalogPhase::LoadingResults && seq == self.last_seq {
            return true;
        }
        warn!(
            subsystem = logging::CATALOG,
            seq,
            latest = self.last_seq,
            "Discarding stale search response"
        );
        false
    }
}

/// Run one search-then-resolve cycle for a ticket.
///
/// Ids are resolved only after the search succeeds. The returned event is
/// meant to be fed straight back into [`CatalogState::handle`].
pub async fn run_fetch_cycle(gateway: &dyn DogGateway, ticket: &FetchTicket) -> CatalogEvent {
    let start = Instant::now();
    let seq = ticket.seq;

    let page = match gateway.search_dog_ids(&ticket.query).await {
        Ok(page) => page,
        Err(e) => {
            return CatalogEvent::ResultsFailed {
                seq,
                error: e.to_string(),
            }
        }
    };

    let event = match gateway.fetch_dogs_by_ids(&page.result_ids).await {
        Ok(dogs) => CatalogEvent::ResultsLoaded {
            seq,
            total: page.total,
            dogs,
        },
        Err(e) => CatalogEvent::ResultsFailed {
            seq,
            error: e.to_string(),
        },
    };

    let elapsed = start.elapsed().as_millis() as u64;
    if elapsed > defaults::SLOW_REQUEST_MS {
        warn!(
            subsystem = logging::CATALOG,
            seq,
            duration_ms = elapsed,
            slow = true,
            "Slow fetch cycle"
        );
    }
    event
}
