//! HTTP client for the character catalog API.
//!
//! [`RemoteCatalogClient`] implements `charview_core::CatalogClientPort`
//! over reqwest. Wire types, URL building and retry logic stay internal;
//! consumers only see core types.

#![deny(unsafe_code)]
#![deny(unused_crate_dependencies)]
// Allow private types in public type alias - RemoteCatalogClient is meant to
// be used through the CatalogClientPort trait, not its generic structure
#![allow(private_interfaces)]

mod client;
mod config;
mod error;
mod http;
mod models;
mod parsing;
mod port;
mod url;

// ============================================================================
// Public API
// ============================================================================

// Client
pub use client::RemoteCatalogClient;

// Configuration
pub use config::{ApiClientConfig, BASE_URL_ENV, DEFAULT_BASE_URL, validate_base_url};

// Errors (construction only; requests report `CatalogPortError`)
pub use error::ApiError;
