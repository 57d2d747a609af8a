//! URL construction helpers for the catalog API.
//!
//! Pure functions, so every request is built the same way.

use crate::models::ApiConfig;
use charview_core::{CharacterId, FilterSet};
use url::Url;

/// Append `segment` to the base URL's path.
fn endpoint(config: &ApiConfig, segment: &str) -> Url {
    let mut url = config.base_url.clone();
    let base_path = url.path().trim_end_matches('/').to_string();
    url.set_path(&format!("{base_path}/{segment}"));
    url.set_query(None);
    url
}

/// Build the list URL for one remote page.
///
/// Only filters with a non-blank value are sent, trimmed.
pub fn build_character_page_url(config: &ApiConfig, page: u32, filters: &FilterSet) -> Url {
    let mut url = endpoint(config, "character");

    let mut query = format!("page={page}");
    for (field, value) in filters.active() {
        query.push_str(&format!(
            "&{}={}",
            field.as_param(),
            urlencoding::encode(value)
        ));
    }
    url.set_query(Some(&query));

    url
}

/// Build the URL for a single character.
pub fn build_character_url(config: &ApiConfig, id: CharacterId) -> Url {
    endpoint(config, &format!("character/{id}"))
}
