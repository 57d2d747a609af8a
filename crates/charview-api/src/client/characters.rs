//! Character list and lookup requests.

use charview_core::{CatalogPage, Character, CharacterId, FilterSet};
use tracing::debug;

use super::CatalogClient;
use crate::error::{ApiError, ApiResult};
use crate::http::HttpBackend;
use crate::parsing::{parse_character, parse_character_page};
use crate::url::{build_character_page_url, build_character_url};

impl<B: HttpBackend> CatalogClient<B> {
    /// Fetch one remote page of characters.
    ///
    /// The API answers 404 when nothing matches (or the page is past the
    /// end); that comes back as an empty page.
    pub async fn list_characters(&self, page: u32, filters: &FilterSet) -> ApiResult<CatalogPage> {
        let url = build_character_page_url(&self.config, page, filters);
        debug!(target: "charview.api", %url, "Fetching character page");

        match self.backend.get_json(&url).await {
            Ok(json) => parse_character_page(json),
            Err(ApiError::NotFound { .. }) => {
                debug!(target: "charview.api", %url, "No characters matched");
                Ok(CatalogPage::empty())
            }
            Err(err) => Err(err),
        }
    }

    /// Fetch a single character. A 404 stays an error here.
    pub async fn get_character(&self, id: CharacterId) -> ApiResult<Character> {
        let url = build_character_url(&self.config, id);
        debug!(target: "charview.api", %url, "Fetching character");

        let json = self.backend.get_json(&url).await?;
        parse_character(json)
    }
}
