//! Sort state for the record table.
//!
//! Sorting reorders the records of the current page in the view; it never
//! triggers a fetch.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use super::character::Character;

/// Column a table can be sorted by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortField {
    Id,
    Name,
    Status,
    Species,
    Gender,
    Episodes,
}

impl SortField {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::Name => "name",
            Self::Status => "status",
            Self::Species => "species",
            Self::Gender => "gender",
            Self::Episodes => "episodes",
        }
    }

    fn compare(self, a: &Character, b: &Character) -> Ordering {
        match self {
            Self::Id => a.id.cmp(&b.id),
            Self::Name => cmp_text(&a.name, &b.name),
            Self::Status => cmp_text(a.status.label(), b.status.label()),
            Self::Species => cmp_text(&a.species, &b.species),
            Self::Gender => cmp_text(&a.gender, &b.gender),
            Self::Episodes => a.episode_count.cmp(&b.episode_count),
        }
    }
}

fn cmp_text(a: &str, b: &str) -> Ordering {
    a.to_lowercase().cmp(&b.to_lowercase())
}

impl fmt::Display for SortField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "id" => Ok(Self::Id),
            "name" => Ok(Self::Name),
            "status" => Ok(Self::Status),
            "species" => Ok(Self::Species),
            "gender" => Ok(Self::Gender),
            "episodes" | "episode" => Ok(Self::Episodes),
            other => Err(format!("unknown sort field '{other}'")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    #[must_use]
    pub const fn flipped(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }
}

/// Active sort column and direction. No field means server order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SortState {
    pub field: Option<SortField>,
    pub direction: SortDirection,
}

impl SortState {
    /// Select `field`. Selecting the active field again flips the direction;
    /// a different field starts ascending.
    pub fn toggle(&mut self, field: SortField) {
        if self.field == Some(field) {
            self.direction = self.direction.flipped();
        } else {
            self.field = Some(field);
            self.direction = SortDirection::Asc;
        }
    }

    /// Sort `records` in place. Stable, so ties keep server order.
    pub fn apply(&self, records: &mut [Arc<Character>]) {
        let Some(field) = self.field else {
            return;
        };
        records.sort_by(|a, b| {
            let ord = field.compare(a, b);
            match self.direction {
                SortDirection::Asc => ord,
                SortDirection::Desc => ord.reverse(),
            }
        });
    }
}
