//! Error types for catalog port operations.

use thiserror::Error;

/// Errors from catalog port operations.
///
/// Implementation-specific errors (HTTP, JSON, URL) are mapped to these at
/// the adapter boundary.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogPortError {
    /// Transport failure, timeout or unexpected HTTP status.
    #[error("Network error: {message}")]
    Network {
        /// Description of the network error
        message: String,
    },

    /// The API answered with a malformed payload.
    #[error("Invalid API response: {message}")]
    InvalidResponse {
        /// What was invalid
        message: String,
    },

    /// The requested resource does not exist.
    #[error("Not found: {resource}")]
    NotFound {
        /// What was looked up
        resource: String,
    },

    /// The client is misconfigured (bad base URL and the like).
    #[error("Configuration error: {message}")]
    Configuration {
        /// What's wrong with the configuration
        message: String,
    },
}

/// Result type alias for catalog port operations.
pub type CatalogPortResult<T> = Result<T, CatalogPortError>;
