//! Entry (login) view.

use std::sync::Arc;

use tracing::{error, instrument, warn};

use pawmatch_core::{
    logging, DogGateway, Error, Navigate, Route, Session, SessionStore, LOGIN_FAILED_MESSAGE,
};

/// Shown when a required field is blank.
pub const MISSING_FIELDS_MESSAGE: &str = "Please enter both your name and email.";

pub struct EntryView {
    gateway: Arc<dyn DogGateway>,
    session: SessionStore,
    error: Option<String>,
}

impl EntryView {
    pub fn new(gateway: Arc<dyn DogGateway>, session: SessionStore) -> Self {
        Self {
            gateway,
            session,
            error: None,
        }
    }

    /// Message from the last failed submission.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Submit the login form.
    ///
    /// On success the session store is populated and the catalog is
    /// requested. On failure the view keeps the message and stays put.
    #[instrument(skip_all, fields(subsystem = logging::ENTRY, op = "submit"))]
    pub async fn submit(&mut self, name: &str, email: &str) -> Option<Navigate> {
        self.error = None;

        let (name, email) = (name.trim(), email.trim());
        if name.is_empty() || email.is_empty() {
            self.error = Some(MISSING_FIELDS_MESSAGE.to_string());
            return None;
        }

        match self.gateway.authenticate(name, email).await {
            Ok(()) => {
                self.session.login(Session::new(name, email));
                Some(Navigate::To(Route::Catalog))
            }
            Err(Error::Auth(message)) => {
                warn!(error = %message, "Login rejected");
                self.error = Some(message);
                None
            }
            Err(e) => {
                error!(error = %e, "Login failed");
                self.error = Some(LOGIN_FAILED_MESSAGE.to_string());
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pawmatch_client::{StubGateway, StubOperation};

    fn view(gateway: &StubGateway, session: &SessionStore) -> EntryView {
        EntryView::new(Arc::new(gateway.clone()), session.clone())
    }

    #[tokio::test]
    async fn test_successful_login_populates_session() {
        let gateway = StubGateway::new();
        let session = SessionStore::new();
        let mut entry = view(&gateway, &session);

        let nav = entry.submit("  Ada ", "ada@example.com").await;
        assert_eq!(nav, Some(Navigate::To(Route::Catalog)));
        assert!(entry.error().is_none());

        let current = session.current().unwrap();
        assert_eq!(current.name, "Ada");
        assert_eq!(current.email, "ada@example.com");
    }

    #[tokio::test]
    async fn test_blank_fields_rejected_without_call() {
        let gateway = StubGateway::new();
        let session = SessionStore::new();
        let mut entry = view(&gateway, &session);

        assert!(entry.submit("   ", "ada@example.com").await.is_none());
        assert_eq!(entry.error(), Some(MISSING_FIELDS_MESSAGE));
        assert!(entry.submit("Ada", "").await.is_none());

        assert_eq!(gateway.call_count(StubOperation::Authenticate), 0);
        assert!(!session.is_authenticated());
    }

    #[tokio::test]
    async fn test_rejection_shows_server_message() {
        let gateway = StubGateway::new().with_rejected_login(Some("Email is not valid"));
        let session = SessionStore::new();
        let mut entry = view(&gateway, &session);

        assert!(entry.submit("Ada", "nope").await.is_none());
        assert_eq!(entry.error(), Some("Email is not valid"));
        assert!(!session.is_authenticated());
    }

    #[tokio::test]
    async fn test_transport_failure_shows_generic_message() {
        let gateway = StubGateway::new().with_failure(StubOperation::Authenticate);
        let session = SessionStore::new();
        let mut entry = view(&gateway, &session);

        assert!(entry.submit("Ada", "ada@example.com").await.is_none());
        assert_eq!(entry.error(), Some(LOGIN_FAILED_MESSAGE));
    }

    #[tokio::test]
    async fn test_resubmit_clears_previous_error() {
        let gateway = StubGateway::new();
        let session = SessionStore::new();
        let mut entry = view(&gateway, &session);

        entry.submit("", "").await;
        assert!(entry.error().is_some());
        entry.submit("Ada", "ada@example.com").await;
        assert!(entry.error().is_none());
    }
}
