//! Core of the character catalog viewer.
//!
//! Domain types, the observable [`CatalogStore`], the [`FetchOrchestrator`]
//! that keeps it in sync with the remote API, the filter draft controller
//! and the read-only projections front-ends render. Nothing here knows about
//! HTTP; the remote API sits behind [`CatalogClientPort`].

#![deny(unused_crate_dependencies)]

pub mod domain;
pub mod draft;
pub mod events;
pub mod intents;
pub mod orchestrator;
pub mod ports;
pub mod projection;
pub mod settings;
pub mod store;

// Re-export commonly used types for convenience
pub use domain::{
    Character, CharacterId, CharacterStatus, DEFAULT_PAGE_SIZE, FetchError, FetchState,
    FilterField, FilterPatch, FilterSet, PAGE_SIZE_OPTIONS, PaginationPatch, PaginationState,
    REMOTE_PAGE_SIZE, SortDirection, SortField, SortState, total_pages_for,
};
pub use draft::FilterDraftController;
pub use events::{BroadcastFetchEvents, FetchEvent, FetchEvents, NoopFetchEvents};
pub use orchestrator::{
    FetchKey, FetchOrchestrator, FetchOutcome, OrchestratorHandle, PageWindow,
    fetch_error_from_port,
};
pub use ports::{CatalogClientPort, CatalogPage, CatalogPortError, CatalogPortResult};
pub use projection::{Banner, CatalogView, CharacterDetail, StatusTone};
pub use settings::{
    CatalogConfig, ConfigError, DEFAULT_MAX_REMOTE_PAGES_PER_VIEW, validate_config,
    validate_page_size,
};
pub use store::{CatalogState, CatalogStore, StoreBatch, StoreError};

// Only the integration tests use this one
#[cfg(test)]
use tokio_test as _;
