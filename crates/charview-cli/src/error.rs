//! CLI-specific error types and mappings.
//!
//! Fetch and port errors from core are mapped to exit codes and user-facing
//! messages here.

use charview_api::ApiError;
use charview_core::{CatalogPortError, ConfigError, FetchError};
use thiserror::Error;

/// CLI-specific error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Argument validation error.
    #[error("Invalid arguments: {0}")]
    Arguments(String),

    /// The catalog could not be reached.
    #[error("{0}")]
    Network(String),

    /// The catalog answered with something unusable.
    #[error("{0}")]
    InvalidResponse(String),

    /// The requested record does not exist.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Terminal IO error.
    #[error("IO error: {0}")]
    Io(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl CliError {
    /// Map error to appropriate exit code.
    ///
    /// Exit codes follow Unix conventions:
    /// - 0: Success
    /// - 2: Misuse of shell command (invalid arguments)
    /// - 64-78: Reserved for specific error categories (see sysexits.h)
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Arguments(_) => 2,        // EX_USAGE
            Self::NotFound(_) => 66,        // EX_NOINPUT
            Self::Network(_) => 69,         // EX_UNAVAILABLE
            Self::Io(_) => 74,              // EX_IOERR
            Self::InvalidResponse(_) => 76, // EX_PROTOCOL
            Self::Config(_) => 78,          // EX_CONFIG
        }
    }
}

impl From<FetchError> for CliError {
    fn from(err: FetchError) -> Self {
        match err {
            FetchError::Network { .. } => Self::Network(err.to_string()),
            FetchError::InvalidResponse { .. } => Self::InvalidResponse(err.to_string()),
            FetchError::InvalidPage { .. } | FetchError::PageSizeTooLarge { .. } => {
                Self::Arguments(err.to_string())
            }
        }
    }
}

impl From<CatalogPortError> for CliError {
    fn from(err: CatalogPortError) -> Self {
        match err {
            CatalogPortError::NotFound { resource } => Self::NotFound(resource),
            CatalogPortError::Network { .. } | CatalogPortError::InvalidResponse { .. } => {
                charview_core::fetch_error_from_port(err).into()
            }
            CatalogPortError::Configuration { message } => Self::Config(message),
        }
    }
}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        Self::Arguments(err.to_string())
    }
}

impl From<ApiError> for CliError {
    fn from(err: ApiError) -> Self {
        Self::Config(err.to_string())
    }
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<rustyline::error::ReadlineError> for CliError {
    fn from(err: rustyline::error::ReadlineError) -> Self {
        Self::Io(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes() {
        assert_eq!(CliError::Arguments(String::new()).exit_code(), 2);
        assert_eq!(CliError::Network(String::new()).exit_code(), 69);
        assert_eq!(CliError::Config(String::new()).exit_code(), 78);
        assert_eq!(CliError::NotFound(String::new()).exit_code(), 66);
    }

    #[test]
    fn test_fetch_errors_keep_user_message() {
        let err = CliError::from(FetchError::Network {
            message: "timed out".to_string(),
        });
        assert_eq!(err.exit_code(), 69);
        assert!(err.to_string().starts_with("Network error."));

        let err = CliError::from(FetchError::InvalidPage { page: 0 });
        assert_eq!(err.exit_code(), 2);

        let err = CliError::from(FetchError::PageSizeTooLarge {
            page_size: 500,
            max: 180,
        });
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn test_port_not_found() {
        let err = CliError::from(CatalogPortError::NotFound {
            resource: "character/9999".to_string(),
        });
        assert!(matches!(err, CliError::NotFound(ref r) if r == "character/9999"));
    }

    #[test]
    fn test_page_size_error_is_an_argument_error() {
        let err = CliError::from(ConfigError::PageSizeTooLarge {
            page_size: 500,
            max: 10,
        });
        assert_eq!(err.exit_code(), 2);
    }
}
