//! Internal API response types for the character catalog.
//!
//! These types are internal to `charview-api` and are not exposed to
//! consumers. External consumers should use the domain types defined in
//! `charview-core`.

use std::time::Duration;

use chrono::{DateTime, Utc};
use charview_core::{Character, CharacterStatus};
use serde::{Deserialize, Serialize};
use url::Url;

use crate::config::DEFAULT_BASE_URL;

// ============================================================================
// Configuration (used internally, see config.rs for public config)
// ============================================================================

/// Internal configuration for the catalog client.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Validated base URL (default: <https://rickandmortyapi.com/api>)
    pub base_url: Url,
    /// User agent string for HTTP requests
    pub user_agent: String,
    /// Request timeout (default: 10s)
    pub timeout: Duration,
    /// Maximum number of retry attempts for transient errors (default: 2)
    pub max_retries: u8,
    /// Base delay in milliseconds for exponential backoff (default: 300)
    pub retry_base_delay_ms: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            user_agent: concat!("charview-api/", env!("CARGO_PKG_VERSION")).to_string(),
            timeout: Duration::from_secs(10),
            max_retries: 2,
            retry_base_delay_ms: 300,
        }
    }
}

pub fn default_base_url() -> Url {
    Url::parse(DEFAULT_BASE_URL).expect("default catalog API URL is valid")
}

// ============================================================================
// Wire Types
// ============================================================================

/// `{name, url}` reference to a location.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiLocationRef {
    pub name: String,
    pub url: String,
}

/// A character as the API serves it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiCharacter {
    pub id: u32,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub species: String,
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub gender: String,
    #[serde(default)]
    pub origin: ApiLocationRef,
    #[serde(default)]
    pub location: ApiLocationRef,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub episode: Vec<String>,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub created: String,
}

impl ApiCharacter {
    /// Convert to the core record type.
    ///
    /// An unparseable `created` timestamp is dropped rather than rejected.
    pub fn into_character(self) -> Character {
        let created = DateTime::parse_from_rfc3339(&self.created)
            .ok()
            .map(|created| created.with_timezone(&Utc));

        Character {
            id: self.id,
            name: self.name,
            status: CharacterStatus::from_api(&self.status),
            species: self.species,
            gender: self.gender,
            origin_name: self.origin.name,
            location_name: self.location.name,
            image: self.image,
            episode_count: self.episode.len(),
            created,
        }
    }
}

/// Pagination block of a list response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiInfo {
    pub count: u64,
    pub pages: u32,
    pub next: Option<String>,
    pub prev: Option<String>,
}
