//! JSON parsing functions for catalog API responses.
//!
//! Sync functions that turn raw JSON into core types. The list payload is
//! checked by hand so a missing `results` array reads as a contract
//! violation instead of a serde error.

use crate::error::{ApiError, ApiResult};
use crate::models::{ApiCharacter, ApiInfo};
use charview_core::{CatalogPage, Character};
use serde_json::Value;

/// Parse one character object.
pub fn parse_character(json: Value) -> ApiResult<Character> {
    let wire: ApiCharacter = serde_json::from_value(json)?;
    Ok(wire.into_character())
}

/// Parse a `{info, results}` list payload.
///
/// A missing `info` block falls back to the size of `results`.
pub fn parse_character_page(json: Value) -> ApiResult<CatalogPage> {
    let Value::Object(mut body) = json else {
        return Err(ApiError::InvalidResponse {
            message: "expected a JSON object".to_string(),
        });
    };

    let Some(Value::Array(results)) = body.remove("results") else {
        return Err(ApiError::InvalidResponse {
            message: "missing results array".to_string(),
        });
    };

    let records = results
        .into_iter()
        .map(parse_character)
        .collect::<ApiResult<Vec<_>>>()?;

    let info = match body.remove("info") {
        Some(info) => serde_json::from_value::<ApiInfo>(info)?,
        None => ApiInfo {
            count: u64::try_from(records.len()).unwrap_or(u64::MAX),
            pages: u32::from(!records.is_empty()),
            ..ApiInfo::default()
        },
    };

    Ok(CatalogPage {
        records,
        total_count: info.count,
        total_pages: info.pages,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn character_json(id: u32) -> Value {
        json!({
            "id": id,
            "name": format!("Rick {id}"),
            "status": "Alive",
            "species": "Human",
            "gender": "Male",
            "origin": {"name": "Earth (C-137)", "url": ""},
            "location": {"name": "Earth", "url": ""},
            "image": "",
            "episode": ["https://rickandmortyapi.com/api/episode/1"],
            "url": "",
            "created": "2017-11-04T18:48:46.250Z"
        })
    }

    #[test]
    fn test_parse_page() {
        let json = json!({
            "info": {"count": 45, "pages": 3, "next": "https://rickandmortyapi.com/api/character?page=2", "prev": null},
            "results": (1..=20).map(character_json).collect::<Vec<_>>()
        });

        let page = parse_character_page(json).unwrap();
        assert_eq!(page.records.len(), 20);
        assert_eq!(page.total_count, 45);
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.records[0].name, "Rick 1");
    }

    #[test]
    fn test_missing_results_is_invalid() {
        let json = json!({"info": {"count": 45, "pages": 3}});
        let err = parse_character_page(json).unwrap_err();
        assert!(matches!(err, ApiError::InvalidResponse { ref message } if message.contains("results")));
    }

    #[test]
    fn test_results_not_an_array_is_invalid() {
        let json = json!({"results": {"id": 1}});
        assert!(matches!(
            parse_character_page(json),
            Err(ApiError::InvalidResponse { .. })
        ));
    }

    #[test]
    fn test_non_object_is_invalid() {
        assert!(matches!(
            parse_character_page(json!([1, 2, 3])),
            Err(ApiError::InvalidResponse { .. })
        ));
    }

    #[test]
    fn test_missing_info_counts_results() {
        let json = json!({"results": [character_json(1), character_json(2)]});
        let page = parse_character_page(json).unwrap();
        assert_eq!(page.total_count, 2);
        assert_eq!(page.total_pages, 1);
    }

    #[test]
    fn test_bad_record_is_a_parse_error() {
        let json = json!({"results": [{"name": "no id"}]});
        assert!(matches!(
            parse_character_page(json),
            Err(ApiError::JsonParse(_))
        ));
    }

    #[test]
    fn test_parse_character() {
        let character = parse_character(character_json(5)).unwrap();
        assert_eq!(character.id, 5);
        assert_eq!(character.episode_count, 1);
    }
}
