//! Main CLI parser and top-level argument handling.
//!
//! This module defines the root CLI structure with global options.

use clap::Parser;

use crate::commands::Commands;

/// Command-line interface for the character catalog viewer.
///
/// This is the top-level parser that handles global options and dispatches
/// to subcommands.
#[derive(Parser)]
#[command(name = "charview")]
#[command(about = "Browse the Rick and Morty character catalog")]
#[command(version)]
pub struct Cli {
    /// Base URL of the catalog API (https, or http://localhost)
    #[arg(long = "api-url", env = "CHARVIEW_API_URL", global = true)]
    pub api_url: Option<String>,

    /// Enable verbose/debug output
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}
