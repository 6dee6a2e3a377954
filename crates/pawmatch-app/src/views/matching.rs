//! Match view: submit favorites and show the single matched dog.

use std::sync::Arc;

use tracing::debug;

use pawmatch_core::{
    logging, resolve_match, DogGateway, Favorites, MatchState, Navigate, Route, SessionStore,
};

pub struct MatchView {
    gateway: Arc<dyn DogGateway>,
    session: SessionStore,
    favorites: Favorites,
    state: MatchState,
}

impl MatchView {
    pub fn new(gateway: Arc<dyn DogGateway>, session: SessionStore, favorites: Favorites) -> Self {
        let state = MatchState::enter(&session, &favorites);
        Self {
            gateway,
            session,
            favorites,
            state,
        }
    }

    pub fn state(&self) -> &MatchState {
        &self.state
    }

    pub fn user_name(&self) -> Option<String> {
        self.session.current().map(|s| s.name)
    }

    /// Run the match once. Redirects are returned without touching the
    /// gateway; a settled view is left as is.
    pub async fn load(&mut self) -> Option<Navigate> {
        match &self.state {
            MatchState::Redirect(route) => {
                debug!(subsystem = logging::MATCH, route = %route, "Redirecting from match view");
                Some(Navigate::To(*route))
            }
            MatchState::Loading => {
                self.state = resolve_match(self.gateway.as_ref(), &self.favorites).await;
                None
            }
            MatchState::Ready(_) | MatchState::Errored(_) => None,
        }
    }

    /// "Search more dogs" / "try again": back to a fresh catalog.
    pub fn back(&self) -> Navigate {
        Navigate::To(Route::Catalog)
    }
}
