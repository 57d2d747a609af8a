//! Show command handler.

use anyhow::Result;
use charview_core::{CharacterDetail, CharacterId};

use crate::bootstrap::CliContext;
use crate::error::CliError;
use crate::presentation::display_character_detail;

/// Fetch one character by id and print its details.
///
/// A missing id is an error here (exit code 66), unlike an empty list page.
pub async fn execute(ctx: &CliContext, id: CharacterId) -> Result<CharacterDetail> {
    let character = ctx
        .client()
        .fetch_character(id)
        .await
        .map_err(CliError::from)?;

    let detail = CharacterDetail::from_character(&character);
    display_character_detail(&detail, None);
    Ok(detail)
}
