//! Core traits for pawmatch abstractions.
//!
//! The remote dog service is reached only through [`DogGateway`], so views and
//! state machines can run against the HTTP implementation or an in-memory stub.

use async_trait::async_trait;

use crate::error::Result;
use crate::models::{Dog, DogId, SearchResultPage};
use crate::query::SearchQuery;

// =============================================================================
// REMOTE GATEWAY
// =============================================================================

/// The operations the client needs from the remote dog service.
///
/// Implementations log every request and every failure and never retry; a
/// failure reaches the calling view exactly once.
#[async_trait]
pub trait DogGateway: Send + Sync {
    /// Establish a server-side session.
    ///
    /// Rejections are reported as [`crate::Error::Auth`] carrying the server's
    /// message, or [`crate::error::LOGIN_FAILED_MESSAGE`] when it gave none.
    async fn authenticate(&self, name: &str, email: &str) -> Result<()>;

    /// End the server-side session. Callers treat this as best-effort.
    async fn end_session(&self) -> Result<()>;

    /// All breed names, in server order.
    async fn list_breeds(&self) -> Result<Vec<String>>;

    /// One page of dog ids matching the query. Filtering, sorting and paging
    /// happen on the server.
    async fn search_dog_ids(&self, query: &SearchQuery) -> Result<SearchResultPage>;

    /// Resolve a non-empty id batch to dog records, in input order.
    async fn fetch_dogs_by_ids_remote(&self, ids: &[DogId]) -> Result<Vec<Dog>>;

    /// The single dog id the remote matching algorithm picks from the favorites.
    async fn compute_match(&self, favorite_ids: &[DogId]) -> Result<DogId>;

    /// Resolve ids to dog records. An empty batch returns immediately without
    /// touching the remote service.
    async fn fetch_dogs_by_ids(&self, ids: &[DogId]) -> Result<Vec<Dog>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        self.fetch_dogs_by_ids_remote(ids).await
    }
}
