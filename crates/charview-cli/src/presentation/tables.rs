//! Table formatting utilities for CLI output.

use std::sync::Arc;

use charview_core::Character;
use charview_core::projection::{UNKNOWN, UNKNOWN_NAME};

/// Truncates a string to a maximum length in characters, adding "..." if
/// needed.
///
/// # Examples
///
/// ```rust
/// use charview_cli::presentation::truncate_string;
///
/// assert_eq!(truncate_string("Hello", 10), "Hello");
/// assert_eq!(truncate_string("Hello World", 8), "Hello...");
/// ```
pub fn truncate_string(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{kept}...")
    }
}

/// Print a horizontal separator line.
pub fn print_separator(width: usize) {
    println!("{}", "-".repeat(width));
}

/// The cell text for `value`, or `fallback` when it is blank.
pub fn or_fallback<'a>(value: &'a str, fallback: &'a str) -> &'a str {
    let trimmed = value.trim();
    if trimmed.is_empty() { fallback } else { trimmed }
}

const TABLE_WIDTH: usize = 78;

/// Header line of the character table.
pub fn table_header() -> String {
    format!(
        "{:<5} {:<26} {:<8} {:<14} {:<12} {:>8}",
        "ID", "Name", "Status", "Species", "Gender", "Episodes"
    )
}

/// One row of the character table.
pub fn table_row(character: &Character) -> String {
    format!(
        "{:<5} {:<26} {:<8} {:<14} {:<12} {:>8}",
        character.id,
        truncate_string(or_fallback(&character.name, UNKNOWN_NAME), 25),
        character.status.label(),
        truncate_string(or_fallback(&character.species, UNKNOWN), 13),
        truncate_string(or_fallback(&character.gender, UNKNOWN), 11),
        character.episode_count,
    )
}

/// Print `rows` as a table.
pub fn print_character_table(rows: &[Arc<Character>]) {
    println!("{}", table_header());
    print_separator(TABLE_WIDTH);
    for row in rows {
        println!("{}", table_row(row));
    }
}
