//! Catalog configuration and validation.

use serde::{Deserialize, Serialize};

use crate::domain::{DEFAULT_PAGE_SIZE, REMOTE_PAGE_SIZE};

/// Default cap on remote requests issued for one virtual page.
pub const DEFAULT_MAX_REMOTE_PAGES_PER_VIEW: u32 = 10;

/// Configuration for a catalog session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// Records per page the session starts with.
    pub page_size: u32,
    /// Fixed page size of the remote API.
    pub remote_page_size: u32,
    /// Upper bound on remote pages fetched in parallel for one view.
    pub max_remote_pages_per_view: u32,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            remote_page_size: REMOTE_PAGE_SIZE,
            max_remote_pages_per_view: DEFAULT_MAX_REMOTE_PAGES_PER_VIEW,
        }
    }
}

impl CatalogConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size;
        self
    }

    #[must_use]
    pub const fn with_remote_page_size(mut self, remote_page_size: u32) -> Self {
        self.remote_page_size = remote_page_size;
        self
    }

    #[must_use]
    pub const fn with_max_remote_pages_per_view(mut self, max: u32) -> Self {
        self.max_remote_pages_per_view = max;
        self
    }

    /// Largest page size the fan-out cap allows.
    pub const fn max_page_size(&self) -> u32 {
        self.remote_page_size
            .saturating_mul(self.max_remote_pages_per_view.saturating_sub(1))
    }
}

/// Configuration validation error.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("Page size must be greater than zero")]
    ZeroPageSize,

    #[error("Remote page size must be greater than zero")]
    ZeroRemotePageSize,

    #[error("Page size {page_size} needs more than {max} remote requests per page")]
    PageSizeTooLarge { page_size: u32, max: u32 },
}

/// Validate configuration values.
pub fn validate_config(config: &CatalogConfig) -> Result<(), ConfigError> {
    if config.page_size == 0 {
        return Err(ConfigError::ZeroPageSize);
    }
    if config.remote_page_size == 0 {
        return Err(ConfigError::ZeroRemotePageSize);
    }
    validate_page_size(config, config.page_size)
}

/// Check that `page_size` can be materialized within the fan-out cap.
///
/// An unaligned virtual page can straddle one more remote page than
/// `page_size / remote_page_size`, hence the `- 1` in the bound.
pub fn validate_page_size(config: &CatalogConfig, page_size: u32) -> Result<(), ConfigError> {
    if page_size == 0 {
        return Err(ConfigError::ZeroPageSize);
    }
    if page_size > config.max_page_size() {
        return Err(ConfigError::PageSizeTooLarge {
            page_size,
            max: config.max_remote_pages_per_view,
        });
    }
    Ok(())
}
