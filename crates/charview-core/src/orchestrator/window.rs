//! Mapping of a virtual page onto fixed-size remote pages.

use std::ops::RangeInclusive;

/// Remote pages covering one virtual page, plus where the page starts
/// inside their concatenation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    pub first_remote_page: u32,
    pub last_remote_page: u32,
    /// Records to skip at the front of the concatenated remote pages.
    pub offset: usize,
    /// Records in the virtual page.
    pub len: usize,
}

impl PageWindow {
    /// Window for 1-based `page` of `page_size` records over remote pages of
    /// `remote_page_size`.
    ///
    /// Returns `None` for page 0, a zero size, or a page so far out that the
    /// remote page number overflows.
    pub fn for_page(page: u32, page_size: u32, remote_page_size: u32) -> Option<Self> {
        if page == 0 || page_size == 0 || remote_page_size == 0 {
            return None;
        }
        let size = u64::from(page_size);
        let remote = u64::from(remote_page_size);

        let start = u64::from(page - 1) * size;
        let end = start + size;
        let first = start / remote + 1;
        let last = (end - 1) / remote + 1;
        let offset = start - (first - 1) * remote;

        Some(Self {
            first_remote_page: u32::try_from(first).ok()?,
            last_remote_page: u32::try_from(last).ok()?,
            offset: usize::try_from(offset).ok()?,
            len: usize::try_from(size).ok()?,
        })
    }

    pub const fn remote_pages(&self) -> RangeInclusive<u32> {
        self.first_remote_page..=self.last_remote_page
    }

    pub const fn remote_page_count(&self) -> u32 {
        self.last_remote_page - self.first_remote_page + 1
    }

    /// Cut this page out of the concatenated remote records.
    pub fn slice<T>(&self, concatenated: Vec<T>) -> Vec<T> {
        concatenated
            .into_iter()
            .skip(self.offset)
            .take(self.len)
            .collect()
    }
}
