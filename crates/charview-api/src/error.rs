//! Internal error types for catalog API operations.
//!
//! These errors are internal to `charview-api` and are mapped to core port
//! errors at the boundary.

use thiserror::Error;

/// Result type alias for catalog API operations.
pub type ApiResult<T> = Result<T, ApiError>;

/// Errors related to catalog API operations.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Non-success status other than 404.
    #[error("Catalog API request failed with status {status}: {url}")]
    ApiRequestFailed {
        status: u16,
        url: String,
    },

    /// The API answered 404.
    #[error("Nothing found at {url}")]
    NotFound { url: String },

    /// The body parsed but does not have the expected shape.
    #[error("Invalid response from catalog API: {message}")]
    InvalidResponse {
        message: String,
    },

    /// Transport failure, including timeouts.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// The body is not valid JSON for the expected type.
    #[error("JSON parsing error: {0}")]
    JsonParse(#[from] serde_json::Error),
}
