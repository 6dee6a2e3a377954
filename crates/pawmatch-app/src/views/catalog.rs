//! Catalog view: search, filter, paginate and collect favorites.

use std::sync::Arc;

use tracing::{debug, info, instrument, warn};

use pawmatch_core::{
    logging, run_fetch_cycle, CatalogCommand, CatalogEvent, CatalogState, Dog, DogGateway,
    DogId, Navigate, Route, SearchQuery, SessionStore,
};

/// Shown when "find match" is requested without favorites.
pub const NO_FAVORITES_MESSAGE: &str = "Please select at least one favorite dog!";

pub struct CatalogView {
    gateway: Arc<dyn DogGateway>,
    session: SessionStore,
    state: CatalogState,
    notice: Option<String>,
}

impl CatalogView {
    /// Create an unmounted catalog that will start from `initial`.
    pub fn new(gateway: Arc<dyn DogGateway>, session: SessionStore, initial: SearchQuery) -> Self {
        Self {
            gateway,
            session,
            state: CatalogState::new(initial),
            notice: None,
        }
    }

    pub fn state(&self) -> &CatalogState {
        &self.state
    }

    /// One-shot message for the user, cleared by the next dispatch.
    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    pub fn user_name(&self) -> Option<String> {
        self.session.current().map(|s| s.name)
    }

    /// Load breeds, then the first page of results.
    pub async fn mount(&mut self) -> Option<Navigate> {
        self.dispatch(CatalogEvent::Mount).await
    }

    /// Apply an event and run every command it triggers until the state
    /// machine settles.
    #[instrument(skip_all, fields(subsystem = logging::CATALOG, op = "dispatch"))]
    pub async fn dispatch(&mut self, event: CatalogEvent) -> Option<Navigate> {
        if let Some(nav) = self.require_session() {
            return Some(nav);
        }
        self.notice = None;

        let mut next = self.state.handle(event);
        while let Some(command) = next {
            let outcome = self.execute(&command).await;
            next = self.state.handle(outcome);
        }
        None
    }

    /// Perform one command against the gateway and report its outcome as
    /// the event to feed back into the state machine.
    pub async fn execute(&self, command: &CatalogCommand) -> CatalogEvent {
        match command {
            CatalogCommand::LoadBreeds => match self.gateway.list_breeds().await {
                Ok(breeds) => CatalogEvent::BreedsLoaded(breeds),
                Err(e) => CatalogEvent::BreedsFailed(e.user_message()),
            },
            CatalogCommand::FetchResults(ticket) => {
                run_fetch_cycle(self.gateway.as_ref(), ticket).await
            }
        }
    }

    /// Resolve a `fav` argument: an id on the current page, or a 1-based
    /// card number.
    pub fn find_dog(&self, reference: &str) -> Option<&Dog> {
        let dogs = self.state.dogs();
        dogs.iter()
            .find(|d| d.id.as_str() == reference)
            .or_else(|| {
                reference
                    .parse::<usize>()
                    .ok()
                    .and_then(|n| n.checked_sub(1))
                    .and_then(|i| dogs.get(i))
            })
    }

    /// Toggle a dog shown on the current page. Returns the new membership,
    /// or `None` when the reference matches no visible dog.
    pub async fn toggle_favorite(&mut self, reference: &str) -> Option<bool> {
        let id: DogId = self.find_dog(reference)?.id.clone();
        self.dispatch(CatalogEvent::ToggleFavorite(id.clone())).await;
        Some(self.state.favorites().contains(&id))
    }

    /// Request the match view with the current favorites.
    pub fn find_match(&mut self) -> Option<Navigate> {
        if self.state.favorites().is_empty() {
            debug!(subsystem = logging::CATALOG, "Match requested without favorites");
            self.notice = Some(NO_FAVORITES_MESSAGE.to_string());
            return None;
        }
        info!(
            subsystem = logging::CATALOG,
            input_count = self.state.favorites().len(),
            "Finding match"
        );
        Some(Navigate::ToMatch(self.state.favorites().clone()))
    }

    /// End the session. The remote call is best-effort; the local session
    /// is always cleared.
    #[instrument(skip_all, fields(subsystem = logging::CATALOG, op = "logout"))]
    pub async fn logout(&mut self) -> Navigate {
        if let Err(e) = self.gateway.end_session().await {
            warn!(error = %e, "Logout error, clearing local session anyway");
        }
        self.session.logout();
        Navigate::To(Route::Entry)
    }

    fn require_session(&self) -> Option<Navigate> {
        if self.session.is_authenticated() {
            None
        } else {
            debug!(subsystem = logging::CATALOG, "No session, redirecting to entry");
            Some(Navigate::To(Route::Entry))
        }
    }
}
