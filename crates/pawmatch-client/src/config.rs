//! Gateway configuration.
//!
//! Values come from explicit construction, environment variables, or the
//! defaults in [`pawmatch_core::defaults`], in that order of precedence.

use pawmatch_core::defaults;
use thiserror::Error;

/// Errors raised while reading gateway configuration.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{var} must be a positive integer, got '{value}'")]
    InvalidNumber { var: &'static str, value: String },

    #[error("base URL must start with http:// or https://, got '{0}'")]
    InvalidBaseUrl(String),

    #[error("timeout must be at least 1 second, got {0}")]
    InvalidTimeout(u64),
}

impl From<ConfigError> for pawmatch_core::Error {
    fn from(e: ConfigError) -> Self {
        pawmatch_core::Error::Config(e.to_string())
    }
}

/// Configuration for [`crate::FetchGateway`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL of the remote dog service, without trailing slash.
    pub base_url: String,
    /// Request timeout in seconds. `None` leaves the transport default.
    pub timeout_seconds: Option<u64>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: defaults::API_URL.to_string(),
            timeout_seconds: None,
        }
    }
}

impl ClientConfig {
    /// Build from environment variables, falling back to defaults.
    ///
    /// | Variable | Default |
    /// |----------|---------|
    /// | `PAWMATCH_API_URL` | `https://frontend-take-home-service.fetch.com` |
    /// | `PAWMATCH_TIMEOUT_SECS` | (unset, transport default) |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Build from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(url) = lookup(defaults::ENV_API_URL).filter(|v| !v.trim().is_empty()) {
            config.base_url = url;
        }
        if let Some(raw) = lookup(defaults::ENV_TIMEOUT_SECS).filter(|v| !v.trim().is_empty()) {
            let secs = raw
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|s| *s > 0)
                .ok_or(ConfigError::InvalidNumber {
                    var: defaults::ENV_TIMEOUT_SECS,
                    value: raw.clone(),
                })?;
            config.timeout_seconds = Some(secs);
        }

        config.validate()
    }

    /// Normalize the base URL, check its scheme and reject a zero timeout.
    pub fn validate(mut self) -> Result<Self, ConfigError> {
        if let Some(0) = self.timeout_seconds {
            return Err(ConfigError::InvalidTimeout(0));
        }
        let trimmed = self.base_url.trim().trim_end_matches('/').to_string();
        if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
            return Err(ConfigError::InvalidBaseUrl(self.base_url));
        }
        self.base_url = trimmed;
        Ok(self)
    }
}
