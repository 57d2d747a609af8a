//! Catalog client port trait.

use super::error::CatalogPortResult;
use super::types::CatalogPage;
use crate::domain::{Character, CharacterId, FilterSet};
use async_trait::async_trait;

/// Port trait for the remote character catalog.
///
/// The orchestrator talks to the catalog only through this trait. The
/// implementation lives in `charview-api`.
///
/// # Design
///
/// - Uses core-owned types, never wire types
/// - Returns `CatalogPortError` for all failures
/// - A list request for a page past the end (remote 404) is a successful
///   empty page, not an error
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CatalogClientPort: Send + Sync {
    /// Fetch one remote page (1-based, fixed server-side size).
    ///
    /// Blank filter fields must not constrain the request.
    async fn fetch_page(&self, page: u32, filters: &FilterSet) -> CatalogPortResult<CatalogPage>;

    /// Fetch a single character by id.
    async fn fetch_character(&self, id: CharacterId) -> CatalogPortResult<Character>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    // Verify the trait is object-safe
    fn _assert_object_safe(_: Arc<dyn CatalogClientPort>) {}
}
