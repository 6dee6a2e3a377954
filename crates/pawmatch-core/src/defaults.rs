//! Centralized default constants for pawmatch.
//!
//! **This module is the single source of truth** for shared default values.
//! Crates reference these constants instead of defining their own magic numbers.

// =============================================================================
// REMOTE SERVICE
// =============================================================================

/// Base URL of the remote dog service.
pub const API_URL: &str = "https://frontend-take-home-service.fetch.com";

/// Environment variable overriding [`API_URL`].
pub const ENV_API_URL: &str = "PAWMATCH_API_URL";

/// Environment variable setting an explicit request timeout in seconds.
/// Unset means the transport default applies.
pub const ENV_TIMEOUT_SECS: &str = "PAWMATCH_TIMEOUT_SECS";

/// Environment variable overriding [`PAGE_SIZE`].
pub const ENV_PAGE_SIZE: &str = "PAWMATCH_PAGE_SIZE";

// =============================================================================
// PAGINATION
// =============================================================================

/// Number of dogs requested per catalog page.
pub const PAGE_SIZE: u32 = 25;

/// Default page offset.
pub const PAGE_OFFSET: u32 = 0;

/// Maximum number of consecutive page numbers shown by the pagination control.
pub const PAGE_WINDOW: u32 = 5;

// =============================================================================
// SEARCH
// =============================================================================

/// Sort key applied to a fresh or cleared query.
pub const SORT: &str = "breed:asc";

// =============================================================================
// MATCH
// =============================================================================

/// Address used for the "contact for adoption" link.
pub const ADOPTION_EMAIL: &str = "adoption@fetch.com";

// =============================================================================
// LOGGING
// =============================================================================

/// Calls slower than this are logged at WARN.
pub const SLOW_REQUEST_MS: u64 = 3000;
