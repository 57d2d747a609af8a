//! Character domain types.
//!
//! A `Character` is the record the catalog shows. It is immutable once
//! fetched and shared between the record list and the selection as
//! `Arc<Character>`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique, positive character identifier assigned by the remote API.
pub type CharacterId = u32;

// ─────────────────────────────────────────────────────────────────────────────
// Status
// ─────────────────────────────────────────────────────────────────────────────

/// Life status of a character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CharacterStatus {
    Alive,
    Dead,
    #[default]
    Unknown,
}

impl CharacterStatus {
    /// Parse the API's status string.
    ///
    /// Matching is case-insensitive; anything other than `alive` or `dead`
    /// is `Unknown`.
    pub fn from_api(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "alive" => Self::Alive,
            "dead" => Self::Dead,
            _ => Self::Unknown,
        }
    }

    /// Value sent to the API's `status` filter.
    pub const fn as_api_param(self) -> &'static str {
        match self {
            Self::Alive => "alive",
            Self::Dead => "dead",
            Self::Unknown => "unknown",
        }
    }

    /// Display label.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Alive => "Alive",
            Self::Dead => "Dead",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for CharacterStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Character
// ─────────────────────────────────────────────────────────────────────────────

/// A character record as held by the catalog store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Character {
    /// Remote identifier.
    pub id: CharacterId,
    /// Display name.
    pub name: String,
    /// Life status.
    pub status: CharacterStatus,
    /// Species (e.g. "Human", "Alien").
    pub species: String,
    /// Gender as reported by the API.
    pub gender: String,
    /// Name of the origin location.
    pub origin_name: String,
    /// Name of the last known location.
    pub location_name: String,
    /// Avatar image URL.
    pub image: String,
    /// Number of episodes the character appears in.
    pub episode_count: usize,
    /// When the record was created upstream.
    pub created: Option<DateTime<Utc>>,
}

impl Character {
    /// Minimal record, mostly useful for tests and fixtures.
    pub fn new(id: CharacterId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            status: CharacterStatus::Unknown,
            species: String::new(),
            gender: String::new(),
            origin_name: String::new(),
            location_name: String::new(),
            image: String::new(),
            episode_count: 0,
            created: None,
        }
    }

    #[must_use]
    pub const fn with_status(mut self, status: CharacterStatus) -> Self {
        self.status = status;
        self
    }

    #[must_use]
    pub fn with_species(mut self, species: impl Into<String>) -> Self {
        self.species = species.into();
        self
    }

    #[must_use]
    pub fn with_gender(mut self, gender: impl Into<String>) -> Self {
        self.gender = gender.into();
        self
    }
}
