//! Shared CLI presentation utilities.
//!
//! This module provides reusable display and formatting functions
//! for consistent CLI output across commands.
//!
//! # Guidelines
//!
//! - Keep this module format-only: no domain transforms
//! - Fallback labels and summaries come from `charview_core::projection`

pub mod character_display;
pub mod tables;

// Re-export commonly used items
pub use character_display::{
    banner_text, display_character_detail, format_filters, print_catalog_view,
};
pub use tables::{print_character_table, print_separator, truncate_string};
