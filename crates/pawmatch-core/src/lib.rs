//! # pawmatch-core
//!
//! Core types, state machines, and the remote gateway abstraction for the
//! pawmatch dog adoption client.
//!
//! This crate performs no I/O of its own. The catalog and match state machines
//! describe what to fetch; callers run the fetches through a [`DogGateway`]
//! and feed the outcome back in.

pub mod catalog;
pub mod defaults;
pub mod error;
pub mod favorites;
pub mod logging;
pub mod matching;
pub mod models;
pub mod pagination;
pub mod query;
pub mod routes;
pub mod session;
pub mod traits;

// Re-export commonly used types at crate root
pub use catalog::{
    run_fetch_cycle, CatalogCommand, CatalogEvent, CatalogPhase, CatalogState, FetchTicket,
};
pub use error::{Error, Result, LOGIN_FAILED_MESSAGE};
pub use favorites::Favorites;
pub use matching::{adoption_link, match_blurb, resolve_match, MatchState, MATCH_FAILED_MESSAGE};
pub use models::*;
pub use pagination::{total_pages, PageWindow};
pub use query::{parse_age_input, parse_zip_input, FilterSet, FilterUpdate, SearchQuery};
pub use routes::{Navigate, Route};
pub use session::SessionStore;
pub use traits::*;
