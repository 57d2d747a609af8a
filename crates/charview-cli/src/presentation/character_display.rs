//! Character detail and catalog view rendering.

use charview_core::{Banner, CatalogView, CharacterDetail, FilterSet, StatusTone};

use super::tables::print_character_table;

/// Status text prefixed with a marker for its tone.
pub fn status_badge(detail: &CharacterDetail) -> String {
    let marker = match detail.tone {
        StatusTone::Success => "+",
        StatusTone::Error => "x",
        StatusTone::Warning => "?",
    };
    format!("[{marker}] {}", detail.status.label())
}

/// Detail lines for one character.
pub fn detail_lines(detail: &CharacterDetail) -> Vec<String> {
    let mut lines = vec![
        format!("  ID: {}", detail.id),
        format!("  Name: {}", detail.name),
        format!("  Status: {}", status_badge(detail)),
        format!("  Species: {}", detail.species),
        format!("  Gender: {}", detail.gender),
        format!("  Origin: {}", detail.origin),
        format!("  Location: {}", detail.location),
        format!("  Episodes: {}", detail.episode_count),
        format!("  Created: {}", detail.created),
    ];
    if let Some(ref image) = detail.image {
        lines.push(format!("  Image: {image}"));
    }
    lines
}

/// Display a character's details to stdout.
pub fn display_character_detail(detail: &CharacterDetail, title: Option<&str>) {
    if let Some(title) = title {
        println!("{title}");
    }
    for line in detail_lines(detail) {
        println!("{line}");
    }
}

/// Text shown in place of (or above) the table.
pub fn banner_text(banner: &Banner) -> String {
    match banner {
        Banner::Loading => "Loading characters...".to_string(),
        Banner::Error { message, retryable } => {
            if *retryable {
                format!("{message}\nType 'retry' to try again.")
            } else {
                message.clone()
            }
        }
        Banner::Empty => "No characters found matching your criteria.".to_string(),
    }
}

/// Active filters as `field=value` pairs, or `none`.
pub fn format_filters(filters: &FilterSet) -> String {
    let parts: Vec<String> = filters
        .active()
        .map(|(field, value)| format!("{field}={value}"))
        .collect();
    if parts.is_empty() {
        "none".to_string()
    } else {
        parts.join(", ")
    }
}

/// Footer under the table: range summary and page label.
pub fn footer_text(view: &CatalogView) -> String {
    match view.summary {
        Some(ref summary) => format!("{summary}  |  {}", view.page_label),
        None => view.page_label.clone(),
    }
}

/// Print the whole table view: banner or table, footer, and the selected
/// character if any.
pub fn print_catalog_view(view: &CatalogView) {
    match view.banner {
        Some(ref banner @ (Banner::Loading | Banner::Empty)) => println!("{}", banner_text(banner)),
        Some(ref banner @ Banner::Error { .. }) => {
            println!("{}", banner_text(banner));
            if !view.rows.is_empty() {
                println!();
                print_character_table(&view.rows);
            }
        }
        None => print_character_table(&view.rows),
    }

    println!();
    println!("{}", footer_text(view));

    if let Some(ref selected) = view.selected {
        println!();
        display_character_detail(selected, Some("Selected character:"));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use charview_core::{Character, CharacterStatus, FilterField};

    #[test]
    fn test_status_badge() {
        let alive = CharacterDetail::from_character(
            &Character::new(1, "Rick").with_status(CharacterStatus::Alive),
        );
        assert_eq!(status_badge(&alive), "[+] Alive");

        let dead = CharacterDetail::from_character(
            &Character::new(2, "Birdperson").with_status(CharacterStatus::Dead),
        );
        assert_eq!(status_badge(&dead), "[x] Dead");

        let unknown = CharacterDetail::from_character(&Character::new(3, "Mr. Poopybutthole"));
        assert_eq!(status_badge(&unknown), "[?] unknown");
    }

    #[test]
    fn test_detail_lines_skip_missing_image() {
        let detail = CharacterDetail::from_character(&Character::new(7, ""));
        let lines = detail_lines(&detail);
        assert!(lines.iter().any(|l| l == "  Name: Unknown Character"));
        assert!(lines.iter().any(|l| l == "  Origin: Unknown"));
        assert!(!lines.iter().any(|l| l.contains("Image")));
    }

    #[test]
    fn test_detail_lines_with_image() {
        let mut character = Character::new(1, "Rick Sanchez");
        character.image = "https://rickandmortyapi.com/api/character/avatar/1.jpeg".to_string();
        let lines = detail_lines(&CharacterDetail::from_character(&character));
        assert!(lines.last().unwrap().ends_with("avatar/1.jpeg"));
    }

    #[test]
    fn test_banner_text() {
        let retryable = Banner::Error {
            message: "Network error.".to_string(),
            retryable: true,
        };
        assert!(banner_text(&retryable).contains("retry"));

        let fatal = Banner::Error {
            message: "An unexpected error occurred while loading characters.".to_string(),
            retryable: false,
        };
        assert!(!banner_text(&fatal).contains("retry"));
        assert!(banner_text(&Banner::Empty).starts_with("No characters found"));
    }

    #[test]
    fn test_format_filters() {
        assert_eq!(format_filters(&FilterSet::cleared()), "none");
        let filters = FilterSet::cleared()
            .with(FilterField::Name, "rick")
            .with(FilterField::Status, "alive");
        assert_eq!(format_filters(&filters), "name=rick, status=alive");
    }
}
