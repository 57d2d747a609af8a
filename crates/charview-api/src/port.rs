//! Port trait implementation for `CatalogClient`.
//!
//! This module implements the core-owned `CatalogClientPort` trait for
//! `CatalogClient`, mapping internal errors to port errors.

use async_trait::async_trait;
use charview_core::{
    CatalogClientPort, CatalogPage, CatalogPortError, CatalogPortResult, Character, CharacterId,
    FilterSet,
};

use crate::client::CatalogClient;
use crate::error::ApiError;
use crate::http::HttpBackend;

// ============================================================================
// Error Mapping
// ============================================================================

/// Convert internal `ApiError` to core `CatalogPortError`.
fn map_error(err: ApiError) -> CatalogPortError {
    match err {
        ApiError::ApiRequestFailed { status, url } => CatalogPortError::Network {
            message: format!("API request failed with status {status}: {url}"),
        },
        ApiError::NotFound { url } => CatalogPortError::NotFound { resource: url },
        ApiError::InvalidResponse { message } => CatalogPortError::InvalidResponse { message },
        ApiError::Network(e) => CatalogPortError::Network {
            message: e.to_string(),
        },
        ApiError::InvalidUrl(e) => CatalogPortError::Configuration {
            message: e.to_string(),
        },
        ApiError::JsonParse(e) => CatalogPortError::InvalidResponse {
            message: e.to_string(),
        },
    }
}

// ============================================================================
// Port Implementation
// ============================================================================

#[async_trait]
impl<B: HttpBackend + Send + Sync> CatalogClientPort for CatalogClient<B> {
    async fn fetch_page(&self, page: u32, filters: &FilterSet) -> CatalogPortResult<CatalogPage> {
        self.list_characters(page, filters).await.map_err(map_error)
    }

    async fn fetch_character(&self, id: CharacterId) -> CatalogPortResult<Character> {
        self.get_character(id).await.map_err(map_error)
    }
}
