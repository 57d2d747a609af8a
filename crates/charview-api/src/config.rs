//! Public configuration for the catalog API client.
//!
//! `ApiClientConfig` is what callers build; the client turns it into its
//! internal settings after validating the base URL.

use std::time::Duration;

use url::Url;

/// Endpoint used when no (valid) base URL is configured.
pub const DEFAULT_BASE_URL: &str = "https://rickandmortyapi.com/api";

/// Environment variable holding the API base URL.
pub const BASE_URL_ENV: &str = "CHARVIEW_API_URL";

/// Configuration for the catalog API client.
///
/// Start from [`ApiClientConfig::new`] (or `from_env`) and chain `with_*`.
///
/// # Example
///
/// ```
/// use charview_api::ApiClientConfig;
/// use std::time::Duration;
///
/// let config = ApiClientConfig::new()
///     .with_timeout(Duration::from_secs(5))
///     .with_user_agent("my-app/1.0");
/// ```
#[derive(Debug, Clone)]
pub struct ApiClientConfig {
    /// API root, without the `/character` suffix
    pub(crate) base_url: String,
    pub(crate) user_agent: String,
    /// Per-request timeout; expiry is not retried
    pub(crate) timeout: Duration,
    /// Extra attempts after a 5xx or dropped connection
    pub(crate) max_retries: u8,
    /// First backoff delay, doubled on each retry
    pub(crate) retry_base_delay: Duration,
}

impl Default for ApiClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            user_agent: concat!("charview-api/", env!("CARGO_PKG_VERSION")).to_string(),
            timeout: Duration::from_secs(10),
            max_retries: 2,
            retry_base_delay: Duration::from_millis(300),
        }
    }
}

impl ApiClientConfig {
    /// Public endpoint, 10 s timeout, 2 retries from 300 ms.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Defaults, with the base URL taken from `CHARVIEW_API_URL` if set.
    #[must_use]
    pub fn from_env() -> Self {
        let config = Self::default();
        match std::env::var(BASE_URL_ENV) {
            Ok(url) if !url.trim().is_empty() => config.with_base_url(url.trim()),
            _ => config,
        }
    }

    /// Set the base URL of the API.
    ///
    /// Defaults to `https://rickandmortyapi.com/api`. Validated when the
    /// client is built; see [`validate_base_url`].
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    #[must_use]
    pub fn with_user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = agent.into();
        self
    }

    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    #[must_use]
    pub const fn with_max_retries(mut self, max_retries: u8) -> Self {
        self.max_retries = max_retries;
        self
    }

    #[must_use]
    pub const fn with_retry_delay(mut self, base_delay: Duration) -> Self {
        self.retry_base_delay = base_delay;
        self
    }

    /// Configured base URL, as given.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

/// Accept a base URL only if it parses and is either HTTPS or a local
/// development server.
pub fn validate_base_url(candidate: &str) -> Option<Url> {
    let url = Url::parse(candidate).ok()?;
    (candidate.starts_with("https://") || candidate.starts_with("http://localhost")).then_some(url)
}
