//! Core domain types.
//!
//! These types describe what the catalog holds, independent of how it is
//! fetched or rendered.
//!
//! # Structure
//!
//! - `character` - Records (`Character`, `CharacterStatus`)
//! - `filters` - Filter values and partial updates
//! - `pagination` - Page bookkeeping and the remote page size
//! - `sorting` - Table sort column and direction
//! - `fetch` - Loading/error flags and the error taxonomy

mod character;
mod fetch;
mod filters;
mod pagination;
mod sorting;

pub use character::{Character, CharacterId, CharacterStatus};
pub use fetch::{FetchError, FetchState};
pub use filters::{FilterField, FilterPatch, FilterSet};
pub use pagination::{
    DEFAULT_PAGE_SIZE, PAGE_SIZE_OPTIONS, PaginationPatch, PaginationState, REMOTE_PAGE_SIZE,
    total_pages_for,
};
pub use sorting::{SortDirection, SortField, SortState};
