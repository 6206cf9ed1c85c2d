//! API connection and engine configuration.
//!
//! Credentials arrive as two opaque strings (key + base URL); this module
//! never parses or derives them beyond URL well-formedness.

use std::env;
use std::time::Duration;

use secrecy::SecretString;
use thiserror::Error;
use url::Url;

/// Default per-request timeout, matching the remote API's slow tail.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Local outbound ceiling in requests per rolling second.
pub const DEFAULT_REQUESTS_PER_SECOND: u32 = 5;

/// Bounded retry budget for transient failures.
pub const DEFAULT_MAX_RETRIES: u32 = 2;

/// Hard ceiling on pages aggregated by an exhaustive fetch.
pub const DEFAULT_PAGE_CAP: u32 = 50;

/// Environment variable holding the API key.
pub const ENV_API_KEY: &str = "DASSIGNIES_API_KEY";

/// Environment variable holding the API base URL.
pub const ENV_API_URL: &str = "DASSIGNIES_API_URL";

/// Configuration loading failures.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable {name}")]
    MissingEnv { name: &'static str },

    #[error("invalid base URL {url:?}: {source}")]
    InvalidUrl {
        url: String,
        source: url::ParseError,
    },
}

/// Connection and engine settings for the Legifrance search API.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    base_url: Url,
    api_key: SecretString,
    /// Per-request timeout
    pub timeout: Duration,
    /// Local outbound request ceiling (requests per rolling second)
    pub requests_per_second: u32,
    /// Retries allowed per request on transient failures
    pub max_retries: u32,
    /// Page cap for exhaustive retrieval
    pub page_cap: u32,
}

impl ApiConfig {
    /// Create a configuration from an API key and base URL.
    ///
    /// A base URL without a trailing slash would make [`Url::join`] replace
    /// the last path segment, so one is appended here.
    pub fn new(api_key: impl Into<String>, base_url: &str) -> Result<Self, ConfigError> {
        let normalized = if base_url.ends_with('/') {
            base_url.to_string()
        } else {
            format!("{base_url}/")
        };
        let base_url = Url::parse(&normalized).map_err(|source| ConfigError::InvalidUrl {
            url: normalized,
            source,
        })?;

        Ok(Self {
            base_url,
            api_key: SecretString::from(api_key.into()),
            timeout: DEFAULT_TIMEOUT,
            requests_per_second: DEFAULT_REQUESTS_PER_SECOND,
            max_retries: DEFAULT_MAX_RETRIES,
            page_cap: DEFAULT_PAGE_CAP,
        })
    }

    /// Load configuration from `DASSIGNIES_API_KEY` and `DASSIGNIES_API_URL`.
    pub fn from_env() -> Result<Self, ConfigError> {
        let key = env::var(ENV_API_KEY).map_err(|_| ConfigError::MissingEnv { name: ENV_API_KEY })?;
        let url = env::var(ENV_API_URL).map_err(|_| ConfigError::MissingEnv { name: ENV_API_URL })?;
        Self::new(key, &url)
    }

    /// Set the per-request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the local outbound request ceiling.
    pub fn requests_per_second(mut self, rate: u32) -> Self {
        self.requests_per_second = rate.max(1);
        self
    }

    /// Set the transient-failure retry budget.
    pub fn max_retries(mut self, retries: u32) -> Self {
        self.max_retries = retries;
        self
    }

    /// Set the exhaustive-retrieval page cap.
    pub fn page_cap(mut self, cap: u32) -> Self {
        self.page_cap = cap.max(1);
        self
    }

    /// Base URL of the remote search API (always ends with a slash).
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// API key credential. Exposed only at the request boundary.
    pub fn api_key(&self) -> &SecretString {
        &self.api_key
    }
}
