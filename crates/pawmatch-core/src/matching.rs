//! Match view state machine.
//!
//! Entry checks run before any remote call: no session redirects to the entry
//! view, no favorites redirects to the catalog. Otherwise the favorites are
//! submitted to the remote matcher and the returned id is resolved to a dog.

use tracing::{error, info};

use crate::defaults;
use crate::favorites::Favorites;
use crate::logging;
use crate::models::Dog;
use crate::routes::Route;
use crate::session::SessionStore;
use crate::traits::DogGateway;

/// Message shown when either match call fails.
pub const MATCH_FAILED_MESSAGE: &str = "Failed to find your perfect match. Please try again.";

/// Lifecycle of one match view instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchState {
    Loading,
    Ready(Dog),
    /// Failed; the view offers a way back to the catalog.
    Errored(String),
    /// Terminal: the view must not render and navigates away instead.
    Redirect(Route),
}

impl MatchState {
    /// Initial state for a match view entered with `favorites`.
    pub fn enter(session: &SessionStore, favorites: &Favorites) -> Self {
        if !session.is_authenticated() {
            return MatchState::Redirect(Route::Entry);
        }
        if favorites.is_empty() {
            return MatchState::Redirect(Route::Catalog);
        }
        MatchState::Loading
    }

    pub fn matched_dog(&self) -> Option<&Dog> {
        match self {
            MatchState::Ready(dog) => Some(dog),
            _ => None,
        }
    }
}

/// Compute the match and resolve it to a dog record.
pub async fn resolve_match(gateway: &dyn DogGateway, favorites: &Favorites) -> MatchState {
    let match_id = match gateway.compute_match(favorites.ids()).await {
        Ok(id) => id,
        Err(e) => {
            error!(subsystem = logging::MATCH, op = "compute_match", error = %e, "Failed to find match");
            return MatchState::Errored(MATCH_FAILED_MESSAGE.to_string());
        }
    };

    match gateway.fetch_dogs_by_ids(std::slice::from_ref(&match_id)).await {
        Ok(dogs) => match dogs.into_iter().next() {
            Some(dog) => {
                info!(subsystem = logging::MATCH, dog_id = %dog.id, "Match resolved");
                MatchState::Ready(dog)
            }
            None => {
                error!(subsystem = logging::MATCH, dog_id = %match_id, "Matched dog could not be resolved");
                MatchState::Errored(MATCH_FAILED_MESSAGE.to_string())
            }
        },
        Err(e) => {
            error!(subsystem = logging::MATCH, op = "fetch_dogs_by_ids", error = %e, "Failed to resolve match");
            MatchState::Errored(MATCH_FAILED_MESSAGE.to_string())
        }
    }
}

/// Short description of the matched dog.
pub fn match_blurb(dog: &Dog) -> String {
    format!(
        "Based on your favorites, {} is the ideal companion for you. This {} is {} years old and located in {}.",
        dog.name, dog.breed, dog.age, dog.zip_code
    )
}

/// `mailto:` link for contacting the shelter about the matched dog.
pub fn adoption_link(dog: &Dog) -> String {
    let subject = format!("Interested in {}", dog.name);
    format!(
        "mailto:{}?subject={}",
        defaults::ADOPTION_EMAIL,
        urlencoding::encode(&subject)
    )
}
