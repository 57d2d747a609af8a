//! Pagination state.

use serde::{Deserialize, Serialize};

/// Page size the remote API always uses.
pub const REMOTE_PAGE_SIZE: u32 = 20;

/// Page size a new session starts with.
pub const DEFAULT_PAGE_SIZE: u32 = 20;

/// Page sizes offered by the view.
pub const PAGE_SIZE_OPTIONS: [u32; 3] = [10, 20, 50];

/// Pagination sub-state of the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginationState {
    /// 1-based page currently shown.
    pub current_page: u32,
    /// Pages available at the current page size (0 when nothing matched).
    pub total_pages: u32,
    /// Records per page.
    pub page_size: u32,
    /// Records matching the committed filters.
    pub total_count: u64,
}

impl Default for PaginationState {
    fn default() -> Self {
        Self::with_page_size(DEFAULT_PAGE_SIZE)
    }
}

impl PaginationState {
    /// Fresh state on page 1 with nothing fetched yet.
    pub const fn with_page_size(page_size: u32) -> Self {
        Self {
            current_page: 1,
            total_pages: 0,
            page_size,
            total_count: 0,
        }
    }

    /// Highest page the view may show; never below 1.
    pub fn last_page(&self) -> u32 {
        self.total_pages.max(1)
    }

    pub fn has_next(&self) -> bool {
        self.current_page < self.total_pages
    }

    pub const fn has_previous(&self) -> bool {
        self.current_page > 1
    }

    /// Apply a partial update. Callers validate the patch first.
    pub fn merge(&mut self, patch: &PaginationPatch) {
        if let Some(page) = patch.current_page {
            self.current_page = page;
        }
        if let Some(total) = patch.total_pages {
            self.total_pages = total;
        }
        if let Some(size) = patch.page_size {
            self.page_size = size;
        }
        if let Some(count) = patch.total_count {
            self.total_count = count;
        }
    }

    /// 1-based inclusive range of records on the current page plus the
    /// total, for "Showing X-Y of Z".
    ///
    /// Returns `None` when nothing matched or the page lies past the end.
    pub fn range_summary(&self) -> Option<(u64, u64, u64)> {
        if self.total_count == 0 || self.current_page == 0 {
            return None;
        }
        let size = u64::from(self.page_size);
        let start = u64::from(self.current_page - 1) * size + 1;
        if start > self.total_count {
            return None;
        }
        let end = (u64::from(self.current_page) * size).min(self.total_count);
        Some((start, end, self.total_count))
    }
}

/// Number of pages needed to show `total_count` records `page_size` at a time.
pub fn total_pages_for(total_count: u64, page_size: u32) -> u32 {
    if page_size == 0 {
        return 0;
    }
    let pages = total_count.div_ceil(u64::from(page_size));
    u32::try_from(pages).unwrap_or(u32::MAX)
}

/// Partial pagination update.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PaginationPatch {
    pub current_page: Option<u32>,
    pub total_pages: Option<u32>,
    pub page_size: Option<u32>,
    pub total_count: Option<u64>,
}

impl PaginationPatch {
    /// Move to `page`.
    pub const fn page(page: u32) -> Self {
        Self {
            current_page: Some(page),
            total_pages: None,
            page_size: None,
            total_count: None,
        }
    }

    /// Back to page 1.
    pub const fn first_page() -> Self {
        Self::page(1)
    }

    /// New page size.
    pub const fn page_size(size: u32) -> Self {
        Self {
            current_page: None,
            total_pages: None,
            page_size: Some(size),
            total_count: None,
        }
    }

    /// Totals reported by a settled fetch.
    pub const fn totals(total_pages: u32, total_count: u64) -> Self {
        Self {
            current_page: None,
            total_pages: Some(total_pages),
            page_size: None,
            total_count: Some(total_count),
        }
    }

    #[must_use]
    pub const fn and_page(mut self, page: u32) -> Self {
        self.current_page = Some(page);
        self
    }
}
