//! Error types for pawmatch.

use thiserror::Error;

/// Result type alias using pawmatch's Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Generic login failure shown when the server gives no reason.
pub const LOGIN_FAILED_MESSAGE: &str = "Login failed. Please try again.";

/// Core error type for pawmatch operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Login rejected by the remote service
    #[error("Authentication failed: {0}")]
    Auth(String),

    /// Transport failure (connection refused, DNS, TLS, timeout)
    #[error("Network error: {0}")]
    Network(String),

    /// Remote service answered with a non-success status
    #[error("Remote service returned {status}: {body}")]
    Status { status: u16, body: String },

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl Error {
    /// Message suitable for showing to the user.
    ///
    /// Authentication errors carry the server's own message verbatim; every
    /// other variant keeps its diagnostic prefix.
    pub fn user_message(&self) -> String {
        match self {
            Error::Auth(msg) => msg.clone(),
            other => other.to_string(),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            Error::Serialization(e.to_string())
        } else {
            Error::Network(e.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_auth() {
        let err = Error::Auth("bad email".to_string());
        assert_eq!(err.to_string(), "Authentication failed: bad email");
    }

    #[test]
    fn test_error_display_network() {
        let err = Error::Network("connection refused".to_string());
        assert_eq!(err.to_string(), "Network error: connection refused");
    }

    #[test]
    fn test_error_display_status() {
        let err = Error::Status {
            status: 503,
            body: "unavailable".to_string(),
        };
        assert_eq!(err.to_string(), "Remote service returned 503: unavailable");
    }

    #[test]
    fn test_error_display_config() {
        let err = Error::Config("bad url".to_string());
        assert_eq!(err.to_string(), "Configuration error: bad url");
    }

    #[test]
    fn test_user_message_auth_is_verbatim() {
        let err = Error::Auth(LOGIN_FAILED_MESSAGE.to_string());
        assert_eq!(err.user_message(), LOGIN_FAILED_MESSAGE);
    }

    #[test]
    fn test_user_message_other_keeps_prefix() {
        let err = Error::InvalidInput("page 0".to_string());
        assert_eq!(err.user_message(), "Invalid input: page 0");
    }

    #[test]
    fn test_from_serde_json_error() {
        let json_err = serde_json::from_str::<i32>("not a number").unwrap_err();
        let err: Error = json_err.into();
        match err {
            Error::Serialization(msg) => assert!(!msg.is_empty()),
            _ => panic!("Expected Serialization error"),
        }
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send<T: Send>() {}
        fn assert_sync<T: Sync>() {}

        assert_send::<Error>();
        assert_sync::<Error>();
    }
}
