//! Session store shared by the views.
//!
//! The store is an explicit, cloneable handle passed into every view that
//! needs it. It only records the client's belief that it is logged in; the
//! remote service validates the session cookie on every call.

use std::sync::{Arc, RwLock};

use tracing::info;

use crate::models::Session;

/// Cloneable handle to the current session.
#[derive(Debug, Clone, Default)]
pub struct SessionStore {
    inner: Arc<RwLock<Option<Session>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the current session unconditionally.
    pub fn login(&self, session: Session) {
        info!(
            subsystem = crate::logging::ENTRY,
            op = "login",
            name = %session.name,
            "Session started"
        );
        *self.write() = Some(session);
    }

    /// Clear the current session, returning the one that ended.
    pub fn logout(&self) -> Option<Session> {
        let ended = self.write().take();
        if let Some(session) = &ended {
            info!(
                subsystem = crate::logging::ENTRY,
                op = "logout",
                duration_ms = session.age().num_milliseconds(),
                "Session cleared"
            );
        }
        ended
    }

    pub fn current(&self) -> Option<Session> {
        self.read().clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.read().is_some()
    }

    // A panicking writer cannot leave a half-written Option behind, so a
    // poisoned lock still holds a valid value.
    fn read(&self) -> std::sync::RwLockReadGuard<'_, Option<Session>> {
        self.inner.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, Option<Session>> {
        self.inner.write().unwrap_or_else(|e| e.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_store_is_empty() {
        let store = SessionStore::new();
        assert!(store.current().is_none());
        assert!(!store.is_authenticated());
    }

    #[test]
    fn test_login_then_logout() {
        let store = SessionStore::new();
        store.login(Session::new("Ada", "ada@example.com"));
        let session = store.current().unwrap();
        assert_eq!(session.name, "Ada");
        assert_eq!(session.email, "ada@example.com");

        store.logout();
        assert!(store.current().is_none());
    }

    #[test]
    fn test_logout_returns_ended_session() {
        let store = SessionStore::new();
        let session = Session::new("Ada", "ada@example.com");
        let started_at = session.started_at;
        store.login(session);

        let ended = store.logout().unwrap();
        assert_eq!(ended.started_at, started_at);
        assert!(ended.age() >= chrono::Duration::zero());
        assert!(store.logout().is_none());
    }

    #[test]
    fn test_login_replaces_existing_session() {
        let store = SessionStore::new();
        store.login(Session::new("Ada", "ada@example.com"));
        store.login(Session::new("Grace", "grace@example.com"));
        assert_eq!(store.current().unwrap().name, "Grace");
    }

    #[test]
    fn test_clones_share_state() {
        let store = SessionStore::new();
        let view_handle = store.clone();
        store.login(Session::new("Ada", "ada@example.com"));
        assert!(view_handle.is_authenticated());
        view_handle.logout();
        assert!(!store.is_authenticated());
    }

    #[test]
    fn test_logout_without_session_is_noop() {
        let store = SessionStore::new();
        store.logout();
        assert!(!store.is_authenticated());
    }
}
