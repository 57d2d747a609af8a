//! Filter types for catalog queries.
//!
//! An empty string means "no constraint" for that field. `FilterSet` has
//! value semantics: the committed copy in the store and the draft copy in
//! the draft controller never share storage.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One of the four filterable fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterField {
    Name,
    Status,
    Species,
    Gender,
}

impl FilterField {
    /// All fields in display order.
    pub const ALL: [Self; 4] = [Self::Name, Self::Status, Self::Species, Self::Gender];

    /// Query parameter name used by the remote API.
    pub const fn as_param(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Status => "status",
            Self::Species => "species",
            Self::Gender => "gender",
        }
    }
}

impl fmt::Display for FilterField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_param())
    }
}

impl FromStr for FilterField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "name" => Ok(Self::Name),
            "status" => Ok(Self::Status),
            "species" => Ok(Self::Species),
            "gender" => Ok(Self::Gender),
            other => Err(format!(
                "unknown filter field '{other}' (expected name, status, species or gender)"
            )),
        }
    }
}

/// A complete set of filter values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterSet {
    pub name: String,
    pub status: String,
    pub species: String,
    pub gender: String,
}

impl FilterSet {
    /// Filters with every field unset.
    pub fn cleared() -> Self {
        Self::default()
    }

    /// Read one field.
    pub fn get(&self, field: FilterField) -> &str {
        match field {
            FilterField::Name => &self.name,
            FilterField::Status => &self.status,
            FilterField::Species => &self.species,
            FilterField::Gender => &self.gender,
        }
    }

    /// Overwrite one field.
    pub fn set(&mut self, field: FilterField, value: impl Into<String>) {
        let value = value.into();
        match field {
            FilterField::Name => self.name = value,
            FilterField::Status => self.status = value,
            FilterField::Species => self.species = value,
            FilterField::Gender => self.gender = value,
        }
    }

    /// Builder form of [`FilterSet::set`].
    #[must_use]
    pub fn with(mut self, field: FilterField, value: impl Into<String>) -> Self {
        self.set(field, value);
        self
    }

    /// Fields that constrain the query, with their trimmed values.
    ///
    /// Whitespace-only values count as unset.
    pub fn active(&self) -> impl Iterator<Item = (FilterField, &str)> {
        FilterField::ALL.into_iter().filter_map(|field| {
            let value = self.get(field).trim();
            (!value.is_empty()).then_some((field, value))
        })
    }

    /// Number of fields that constrain the query.
    pub fn active_count(&self) -> usize {
        self.active().count()
    }

    /// Whether no field constrains the query.
    pub fn is_unconstrained(&self) -> bool {
        self.active_count() == 0
    }

    /// Apply a partial update. Fields absent from the patch keep their value.
    pub fn merge(&mut self, patch: &FilterPatch) {
        if let Some(ref name) = patch.name {
            self.name.clone_from(name);
        }
        if let Some(ref status) = patch.status {
            self.status.clone_from(status);
        }
        if let Some(ref species) = patch.species {
            self.species.clone_from(species);
        }
        if let Some(ref gender) = patch.gender {
            self.gender.clone_from(gender);
        }
    }
}

/// Partial filter update.
///
/// `None` leaves a field alone; `Some(String::new())` clears it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterPatch {
    pub name: Option<String>,
    pub status: Option<String>,
    pub species: Option<String>,
    pub gender: Option<String>,
}

impl FilterPatch {
    /// Patch touching a single field.
    pub fn field(field: FilterField, value: impl Into<String>) -> Self {
        let mut patch = Self::default();
        let value = Some(value.into());
        match field {
            FilterField::Name => patch.name = value,
            FilterField::Status => patch.status = value,
            FilterField::Species => patch.species = value,
            FilterField::Gender => patch.gender = value,
        }
        patch
    }

    /// Patch that clears every field.
    pub fn clear_all() -> Self {
        Self::replace_with(&FilterSet::cleared())
    }

    /// Patch that overwrites every field with the given set.
    pub fn replace_with(filters: &FilterSet) -> Self {
        Self {
            name: Some(filters.name.clone()),
            status: Some(filters.status.clone()),
            species: Some(filters.species.clone()),
            gender: Some(filters.gender.clone()),
        }
    }

    /// Whether the patch touches no field.
    pub const fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.status.is_none()
            && self.species.is_none()
            && self.gender.is_none()
    }
}

impl From<FilterSet> for FilterPatch {
    fn from(filters: FilterSet) -> Self {
        Self::replace_with(&filters)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_active_skips_blank_values() {
        let filters = FilterSet::cleared()
            .with(FilterField::Name, "rick")
            .with(FilterField::Species, "   ");

        let active: Vec<_> = filters.active().collect();
        assert_eq!(active, vec![(FilterField::Name, "rick")]);
        assert_eq!(filters.active_count(), 1);
        assert!(!filters.is_unconstrained());
        assert!(FilterSet::cleared().is_unconstrained());
    }

    #[test]
    fn test_merge_only_touches_patched_fields() {
        let mut filters = FilterSet::cleared()
            .with(FilterField::Name, "rick")
            .with(FilterField::Status, "alive");

        filters.merge(&FilterPatch::field(FilterField::Status, ""));

        assert_eq!(filters.name, "rick");
        assert_eq!(filters.status, "");
    }

    #[test]
    fn test_clear_all_patch() {
        let mut filters = FilterSet::cleared()
            .with(FilterField::Name, "morty")
            .with(FilterField::Gender, "male");
        filters.merge(&FilterPatch::clear_all());
        assert_eq!(filters, FilterSet::cleared());
    }

    #[test]
    fn test_filter_field_from_str() {
        assert_eq!("Name".parse::<FilterField>(), Ok(FilterField::Name));
        assert_eq!("gender".parse::<FilterField>(), Ok(FilterField::Gender));
        assert!("episode".parse::<FilterField>().is_err());
    }

    #[test]
    fn test_empty_patch() {
        assert!(FilterPatch::default().is_empty());
        assert!(!FilterPatch::field(FilterField::Name, "x").is_empty());
    }
}
