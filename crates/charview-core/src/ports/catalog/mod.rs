//! Remote catalog port definitions.
//!
//! This module defines the port trait and DTOs for talking to the character
//! API. The HTTP implementation lives in `charview-api`.

mod client;
mod error;
mod types;

pub use client::CatalogClientPort;
#[cfg(test)]
pub use client::MockCatalogClientPort;
pub use error::{CatalogPortError, CatalogPortResult};
pub use types::CatalogPage;
