//! Read-only projections of catalog state for rendering.
//!
//! Front-ends render these instead of poking at `CatalogState` directly, so
//! fallback labels and summary text stay the same everywhere.

use std::sync::Arc;

use crate::domain::{Character, CharacterStatus, FetchError};
use crate::store::CatalogState;

/// Label used when a record has no usable name.
pub const UNKNOWN_NAME: &str = "Unknown Character";

/// Label used for any other missing text field.
pub const UNKNOWN: &str = "Unknown";

/// Colour family a status badge is drawn in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusTone {
    Success,
    Error,
    Warning,
}

impl StatusTone {
    pub const fn for_status(status: CharacterStatus) -> Self {
        match status {
            CharacterStatus::Alive => Self::Success,
            CharacterStatus::Dead => Self::Error,
            CharacterStatus::Unknown => Self::Warning,
        }
    }
}

fn or_unknown(value: &str, fallback: &'static str) -> String {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        fallback.to_string()
    } else {
        trimmed.to_string()
    }
}

/// Detail view of one record with every fallback applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CharacterDetail {
    pub id: u32,
    pub name: String,
    pub status: CharacterStatus,
    pub tone: StatusTone,
    pub species: String,
    pub gender: String,
    pub origin: String,
    pub location: String,
    pub image: Option<String>,
    pub episode_count: usize,
    pub created: String,
}

impl CharacterDetail {
    pub fn from_character(character: &Character) -> Self {
        Self {
            id: character.id,
            name: or_unknown(&character.name, UNKNOWN_NAME),
            status: character.status,
            tone: StatusTone::for_status(character.status),
            species: or_unknown(&character.species, UNKNOWN),
            gender: or_unknown(&character.gender, UNKNOWN),
            origin: or_unknown(&character.origin_name, UNKNOWN),
            location: or_unknown(&character.location_name, UNKNOWN),
            image: (!character.image.trim().is_empty()).then(|| character.image.clone()),
            episode_count: character.episode_count,
            created: character.created.map_or_else(
                || UNKNOWN.to_string(),
                |created| created.format("%Y-%m-%d").to_string(),
            ),
        }
    }
}

/// "Showing X-Y of Z", or `None` when nothing matched.
pub fn range_summary_text(state: &CatalogState) -> Option<String> {
    state
        .pagination
        .range_summary()
        .map(|(start, end, total)| format!("Showing {start}-{end} of {total}"))
}

/// "Page X of Y", never claiming fewer than one page.
pub fn page_label(state: &CatalogState) -> String {
    format!(
        "Page {} of {}",
        state.pagination.current_page,
        state.pagination.last_page()
    )
}

/// What the view should show in place of (or above) the table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Banner {
    Loading,
    /// User-facing message and whether a retry is offered.
    Error { message: String, retryable: bool },
    Empty,
}

/// Snapshot of everything a table view renders.
#[derive(Debug, Clone)]
pub struct CatalogView {
    /// Current page in table order.
    pub rows: Vec<Arc<Character>>,
    pub selected: Option<CharacterDetail>,
    pub banner: Option<Banner>,
    pub summary: Option<String>,
    pub page_label: String,
    pub has_previous: bool,
    pub has_next: bool,
    pub active_filter_count: usize,
}

impl CatalogView {
    pub fn from_state(state: &CatalogState) -> Self {
        let banner = if state.fetch.loading {
            Some(Banner::Loading)
        } else if let Some(ref error) = state.fetch.error {
            Some(banner_for_error(error))
        } else if state.records.is_empty() {
            Some(Banner::Empty)
        } else {
            None
        };

        Self {
            rows: state.sorted_records(),
            selected: state
                .selected
                .as_deref()
                .map(CharacterDetail::from_character),
            banner,
            summary: range_summary_text(state),
            page_label: page_label(state),
            has_previous: state.pagination.has_previous(),
            has_next: state.pagination.has_next(),
            active_filter_count: state.filters.active_count(),
        }
    }
}

fn banner_for_error(error: &FetchError) -> Banner {
    Banner::Error {
        message: error.to_string(),
        retryable: error.is_retryable(),
    }
}
