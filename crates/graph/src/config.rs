//! Graph API credentials and endpoint settings.
//!
//! Loaded once at startup by [`GraphConfig::from_env`] and shared behind an
//! `Arc`; business logic never reads the environment itself.

use std::time::Duration;

/// Graph API version used when `GRAPH_API_VERSION` is not set.
pub const DEFAULT_GRAPH_API_VERSION: &str = "v21.0";

/// Graph API host used when `GRAPH_API_BASE_URL` is not set.
pub const DEFAULT_GRAPH_BASE_URL: &str = "https://graph.facebook.com";

/// Per-call timeout used when `REQUEST_TIMEOUT_MS` is not set.
pub const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 15_000;

// ---------------------------------------------------------------------------
// Error
// ---------------------------------------------------------------------------

/// Error raised while loading [`GraphConfig`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A required variable is unset or empty.
    #[error("Missing required env var {0}")]
    Missing(&'static str),

    /// A variable is set but cannot be parsed.
    #[error("{var} must be a positive number of milliseconds, got '{value}'")]
    Invalid { var: &'static str, value: String },
}

// ---------------------------------------------------------------------------
// GraphConfig
// ---------------------------------------------------------------------------

/// Credentials and endpoint settings for the Instagram Graph API.
#[derive(Clone)]
pub struct GraphConfig {
    /// Long-lived access token sent as `access_token` on every call.
    pub access_token: String,
    /// Instagram Business account id that owns the media.
    pub account_id: String,
    /// Path prefix such as `v21.0`.
    pub api_version: String,
    /// Scheme and host, without a trailing slash.
    pub base_url: String,
    /// Upper bound for each individual remote call.
    pub request_timeout: Duration,
}

impl GraphConfig {
    /// Build a config with default version, host, and timeout.
    pub fn new(access_token: impl Into<String>, account_id: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            account_id: account_id.into(),
            api_version: DEFAULT_GRAPH_API_VERSION.to_string(),
            base_url: DEFAULT_GRAPH_BASE_URL.to_string(),
            request_timeout: Duration::from_millis(DEFAULT_REQUEST_TIMEOUT_MS),
        }
    }

    /// Load configuration from environment variables.
    ///
    /// | Env Var              | Required | Default                      |
    /// |----------------------|----------|------------------------------|
    /// | `IG_ACCESS_TOKEN`    | **yes**  | --                           |
    /// | `IG_USER_ID`         | **yes**  | --                           |
    /// | `REQUEST_TIMEOUT_MS` | no       | `15000`                      |
    /// | `GRAPH_API_VERSION`  | no       | `v21.0`                      |
    /// | `GRAPH_API_BASE_URL` | no       | `https://graph.facebook.com` |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// Empty values are treated as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let access_token = var("IG_ACCESS_TOKEN").ok_or(ConfigError::Missing("IG_ACCESS_TOKEN"))?;
        let account_id = var("IG_USER_ID").ok_or(ConfigError::Missing("IG_USER_ID"))?;

        let timeout_ms = match var("REQUEST_TIMEOUT_MS") {
            Some(raw) => match raw.trim().parse::<u64>() {
                Ok(ms) if ms > 0 => ms,
                _ => {
                    return Err(ConfigError::Invalid {
                        var: "REQUEST_TIMEOUT_MS",
                        value: raw,
                    })
                }
            },
            None => DEFAULT_REQUEST_TIMEOUT_MS,
        };

        let api_version =
            var("GRAPH_API_VERSION").unwrap_or_else(|| DEFAULT_GRAPH_API_VERSION.to_string());
        let base_url = var("GRAPH_API_BASE_URL")
            .unwrap_or_else(|| DEFAULT_GRAPH_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string();

        Ok(Self {
            access_token,
            account_id,
            api_version,
            base_url,
            request_timeout: Duration::from_millis(timeout_ms),
        })
    }

    /// Full URL for a versioned Graph API path, e.g. `{id}/media`.
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}/{}", self.base_url, self.api_version, path)
    }
}

impl std::fmt::Debug for GraphConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GraphConfig")
            .field("access_token", &"<redacted>")
            .field("account_id", &self.account_id)
            .field("api_version", &self.api_version)
            .field("base_url", &self.base_url)
            .field("request_timeout", &self.request_timeout)
            .finish()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
