//! # pawmatch-client
//!
//! Gateway implementations for the remote dog service.
//!
//! This crate provides:
//! - [`FetchGateway`]: the HTTP implementation of [`pawmatch_core::DogGateway`]
//! - [`ClientConfig`]: base URL and timeout, from code or environment
//! - `mock::StubGateway`: an in-memory gateway (feature `mock`)
//!
//! # Example
//!
//! ```rust,no_run
//! use pawmatch_client::{ClientConfig, FetchGateway};
//! use pawmatch_core::{DogGateway, SearchQuery};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() {
//!     let gateway = FetchGateway::new(ClientConfig::from_env().unwrap()).unwrap();
//!     gateway.authenticate("Ada", "ada@example.com").await.unwrap();
//!     let page = gateway.search_dog_ids(&SearchQuery::default()).await.unwrap();
//!     let dogs = gateway.fetch_dogs_by_ids(&page.result_ids).await.unwrap();
//! }
//! ```

pub mod config;
pub mod fetch;

// In-memory stub gateway for testing
#[cfg(any(test, feature = "mock"))]
pub mod mock;

pub use config::{ClientConfig, ConfigError};
pub use fetch::FetchGateway;

#[cfg(any(test, feature = "mock"))]
pub use mock::{sample_dogs, StubGateway, StubOperation};
