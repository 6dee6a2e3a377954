//! Structured logging conventions for pawmatch.
//!
//! Every event carries a `subsystem` field set from the constants below, so
//! output can be filtered the same way across crates.
//!
//! ## Log Level Contract
//!
//! | Level | Usage |
//! |-------|-------|
//! | ERROR | A user-visible operation failed |
//! | WARN  | Recoverable issue, fallback applied (breed list, logout, stale result) |
//! | INFO  | Lifecycle events (login, logout, navigation), operation completions |
//! | DEBUG | Outgoing requests, state transitions, query changes |
//! | TRACE | Per-item data (individual dog records) |
//!
//! ## Field Names
//!
//! | Field | Meaning |
//! |-------|---------|
//! | `subsystem` | One of the subsystem values below |
//! | `component` | Part of a subsystem, e.g. `fetch`, `stub` |
//! | `op` | Logical operation, e.g. `search_dog_ids`, `submit` |
//! | `method`, `path`, `status` | Outgoing request and its response |
//! | `seq` | Fetch ticket sequence number |
//! | `duration_ms` | Wall-clock duration |
//! | `result_count`, `total`, `input_count` | Sizes of results and batches |
//! | `error` | Error message of a failed operation |

// ─── Subsystem values ──────────────────────────────────────────────────────

/// Remote gateway calls.
pub const GATEWAY: &str = "gateway";

/// Catalog view and its state machine.
pub const CATALOG: &str = "catalog";

/// Match view.
pub const MATCH: &str = "match";

/// Entry (login) view and the session store.
pub const ENTRY: &str = "entry";

/// Interactive shell.
pub const SHELL: &str = "shell";

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_subsystem_values_are_distinct_lowercase() {
        let values = [GATEWAY, CATALOG, MATCH, ENTRY, SHELL];
        let unique: HashSet<_> = values.iter().collect();
        assert_eq!(unique.len(), values.len());
        assert!(values
            .iter()
            .all(|v| v.chars().all(|c| c.is_ascii_lowercase())));
    }
}
