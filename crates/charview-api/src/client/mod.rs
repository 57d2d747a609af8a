//! Catalog client for listing and looking up characters.
//!
//! This module provides the main client interface for interacting with the
//! catalog API.

mod characters;

use crate::config::{ApiClientConfig, validate_base_url};
use crate::error::ApiResult;
use crate::http::{HttpBackend, ReqwestBackend};
use crate::models::{ApiConfig, default_base_url};
use tracing::warn;

// ============================================================================
// Type Aliases
// ============================================================================

/// Default catalog client using the reqwest HTTP backend.
pub type RemoteCatalogClient = CatalogClient<ReqwestBackend>;

// ============================================================================
// Client
// ============================================================================

/// Client for the character catalog API.
///
/// This client is generic over an HTTP backend, allowing for easy testing.
/// Use `RemoteCatalogClient` for production code and talk to it through the
/// `CatalogClientPort` trait.
pub struct CatalogClient<B: HttpBackend> {
    pub(crate) backend: B,
    pub(crate) config: ApiConfig,
}

impl RemoteCatalogClient {
    /// Create a new client with the given configuration.
    ///
    /// An invalid base URL is not an error: it is logged and the public
    /// endpoint is used instead.
    pub fn new(config: &ApiClientConfig) -> ApiResult<Self> {
        let internal_config = Self::to_internal_config(config);
        let backend = ReqwestBackend::new(&internal_config)?;
        Ok(Self {
            backend,
            config: internal_config,
        })
    }

    /// Create a new client with configuration from the environment.
    pub fn from_env() -> ApiResult<Self> {
        Self::new(&ApiClientConfig::from_env())
    }

    fn to_internal_config(config: &ApiClientConfig) -> ApiConfig {
        let base_url = validate_base_url(&config.base_url).unwrap_or_else(|| {
            warn!(
                target: "charview.api",
                base_url = %config.base_url,
                "Invalid API URL detected. Using default public API."
            );
            default_base_url()
        });

        ApiConfig {
            base_url,
            user_agent: config.user_agent.clone(),
            timeout: config.timeout,
            max_retries: config.max_retries,
            retry_base_delay_ms: u64::try_from(config.retry_base_delay.as_millis())
                .unwrap_or(u64::MAX),
        }
    }
}

impl<B: HttpBackend> CatalogClient<B> {
    /// Create a new client with a custom backend.
    ///
    /// Use this for testing with a fake backend.
    #[cfg(test)]
    pub(crate) const fn with_backend(config: ApiConfig, backend: B) -> Self {
        Self { backend, config }
    }

    /// Base URL requests go to, after validation.
    pub const fn base_url(&self) -> &url::Url {
        &self.config.base_url
    }
}
