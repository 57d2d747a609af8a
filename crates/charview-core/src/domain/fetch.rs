//! Fetch lifecycle state surfaced to the view.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Why the last fetch failed.
///
/// Remote 404s never show up here; they settle as an empty page.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FetchError {
    /// Transport failure, timeout or unexpected status.
    #[error("Network error. Please check your connection and try again. ({message})")]
    Network { message: String },

    /// The API answered with a payload that breaks its contract.
    #[error("An unexpected error occurred while loading characters.")]
    InvalidResponse { message: String },

    /// Navigation asked for a page below 1.
    #[error("Invalid page number: {page}")]
    InvalidPage { page: u32 },

    /// The page size needs more remote requests than one view may issue.
    #[error("Page size {page_size} is too large (at most {max} per page)")]
    PageSizeTooLarge { page_size: u32, max: u32 },
}

impl FetchError {
    /// Whether offering a retry makes sense.
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::Network { .. })
    }

    /// Underlying detail, for logs.
    pub fn detail(&self) -> String {
        match self {
            Self::Network { message } | Self::InvalidResponse { message } => message.clone(),
            Self::InvalidPage { page } => format!("page {page}"),
            Self::PageSizeTooLarge { page_size, max } => {
                format!("page size {page_size} over cap {max}")
            }
        }
    }
}

/// Loading and error flags.
///
/// Once a fetch settles, `loading` and `error` are never both set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FetchState {
    pub loading: bool,
    pub error: Option<FetchError>,
}

impl FetchState {
    pub const fn is_idle(&self) -> bool {
        !self.loading
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_network_errors_are_retryable() {
        assert!(
            FetchError::Network {
                message: "timeout".into()
            }
            .is_retryable()
        );
        assert!(
            !FetchError::InvalidResponse {
                message: "missing results".into()
            }
            .is_retryable()
        );
        assert!(!FetchError::InvalidPage { page: 0 }.is_retryable());
        assert!(
            !FetchError::PageSizeTooLarge {
                page_size: 500,
                max: 180
            }
            .is_retryable()
        );
    }

    #[test]
    fn test_invalid_response_message_is_generic() {
        let err = FetchError::InvalidResponse {
            message: "missing field `results`".into(),
        };
        assert!(!err.to_string().contains("results"));
        assert!(err.detail().contains("results"));
    }

    #[test]
    fn test_default_state_is_idle() {
        let state = FetchState::default();
        assert!(state.is_idle());
        assert!(state.error.is_none());
    }
}
