//! Core-owned DTOs for catalog operations.

use serde::{Deserialize, Serialize};

use crate::domain::Character;

/// One remote page of characters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogPage {
    /// Records on this page, in server order.
    pub records: Vec<Character>,
    /// Records matching the filters across all pages.
    pub total_count: u64,
    /// Remote pages available for the filters.
    pub total_pages: u32,
}

impl CatalogPage {
    /// Zero-result page; what a remote 404 normalizes to.
    pub const fn empty() -> Self {
        Self {
            records: Vec::new(),
            total_count: 0,
            total_pages: 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_page() {
        let page = CatalogPage::empty();
        assert!(page.is_empty());
        assert_eq!(page.total_count, 0);
        assert_eq!(page.total_pages, 0);
        assert_eq!(page, CatalogPage::default());
    }
}
