//! Port definitions (trait abstractions) for external systems.
//!
//! Ports define the interfaces that the core expects from infrastructure.
//! They contain no transport details and use only domain types.

pub mod catalog;

pub use catalog::{CatalogClientPort, CatalogPage, CatalogPortError, CatalogPortResult};
#[cfg(test)]
pub use catalog::MockCatalogClientPort;
