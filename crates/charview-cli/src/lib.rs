//! Terminal front-end for the character catalog.
//!
//! `charview list`, `charview show` and the interactive `charview browse`
//! render the catalog store through `charview_core::projection`.

#![deny(unsafe_code)]
#![deny(unused_crate_dependencies)]

// Only the binary uses these
use dotenvy as _;
use tracing_subscriber as _;

pub mod bootstrap;
pub mod commands;
pub mod error;
pub mod handlers;
pub mod parser;
pub mod presentation;

#[cfg(test)]
mod testing;

// Re-export primary types for convenient access
pub use bootstrap::{CliConfig, CliContext, bootstrap, compose};
pub use commands::{Commands, QueryArgs};
pub use error::CliError;
pub use parser::Cli;
