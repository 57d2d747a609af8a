//! User intents expressed as atomic store commits.
//!
//! The store only knows field-local rules. Rules that tie fields together
//! (a filter change or a page size change returns to page 1) are applied
//! here, each as one [`CatalogStore::batch`], so subscribers never observe
//! the new filters paired with the old page.

use crate::domain::{FilterPatch, PaginationPatch, SortField};
use crate::settings::{CatalogConfig, ConfigError, validate_page_size};
use crate::store::{CatalogStore, StoreError};

impl From<StoreError> for ConfigError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::InvalidPageSize => Self::ZeroPageSize,
        }
    }
}

/// Commit new filters and return to page 1.
pub fn commit_filters(store: &CatalogStore, patch: &FilterPatch) {
    store.update(|b| {
        b.merge_filters(patch);
        // first_page never carries a page size, so this cannot fail
        let _ = b.merge_pagination(&PaginationPatch::first_page());
    });
}

/// Clear every filter and return to page 1.
pub fn clear_filters(store: &CatalogStore) {
    commit_filters(store, &FilterPatch::clear_all());
}

/// Jump to `page`.
///
/// Page 0 is stored as asked; the next fetch reports it as an invalid page.
pub fn go_to_page(store: &CatalogStore, page: u32) {
    store.update(|b| {
        // page() never carries a page size, so this cannot fail
        let _ = b.merge_pagination(&PaginationPatch::page(page));
    });
}

/// Advance one page if there is a next page. Returns whether it moved.
pub fn next_page(store: &CatalogStore) -> bool {
    store.update(|b| {
        let pagination = b.state().pagination;
        if !pagination.has_next() {
            return false;
        }
        b.merge_pagination(&PaginationPatch::page(pagination.current_page + 1))
            .is_ok()
    })
}

/// Go back one page if not on page 1. Returns whether it moved.
pub fn previous_page(store: &CatalogStore) -> bool {
    store.update(|b| {
        let pagination = b.state().pagination;
        if !pagination.has_previous() {
            return false;
        }
        b.merge_pagination(&PaginationPatch::page(pagination.current_page - 1))
            .is_ok()
    })
}

/// Switch to `size` records per page and return to page 1.
pub fn change_page_size(
    store: &CatalogStore,
    config: &CatalogConfig,
    size: u32,
) -> Result<(), ConfigError> {
    validate_page_size(config, size)?;
    store.batch(|b| b.merge_pagination(&PaginationPatch::page_size(size).and_page(1)))?;
    Ok(())
}

/// Sort the table by `field`, flipping the direction if it is already the
/// sort column.
pub fn toggle_sort(store: &CatalogStore, field: SortField) {
    store.toggle_sort(field);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::FilterField;

    fn store_on_page(page: u32, total_pages: u32) -> CatalogStore {
        let store = CatalogStore::new(&CatalogConfig::default());
        let totals = PaginationPatch::totals(total_pages, u64::from(total_pages) * 20);
        store.merge_pagination(&totals.and_page(page)).unwrap();
        store
    }

    #[test]
    fn test_commit_filters_resets_page_in_one_notification() {
        let store = store_on_page(3, 5);
        let mut rx = store.subscribe();
        rx.mark_unchanged();

        commit_filters(&store, &FilterPatch::field(FilterField::Name, "rick"));

        assert!(rx.has_changed().unwrap());
        let state = rx.borrow_and_update().clone();
        assert_eq!(state.filters.name, "rick");
        assert_eq!(state.pagination.current_page, 1);
        assert!(!rx.has_changed().unwrap());
    }

    #[test]
    fn test_clear_filters() {
        let store = store_on_page(2, 5);
        commit_filters(&store, &FilterPatch::field(FilterField::Status, "dead"));
        go_to_page(&store, 2);

        clear_filters(&store);

        let state = store.snapshot();
        assert!(state.filters.is_unconstrained());
        assert_eq!(state.pagination.current_page, 1);
    }

    #[test]
    fn test_next_and_previous_respect_bounds() {
        let store = store_on_page(1, 2);
        assert!(!previous_page(&store));
        assert!(next_page(&store));
        assert_eq!(store.snapshot().pagination.current_page, 2);
        assert!(!next_page(&store));
        assert!(previous_page(&store));
        assert_eq!(store.snapshot().pagination.current_page, 1);
    }

    #[test]
    fn test_change_page_size_resets_page() {
        let store = store_on_page(3, 5);
        change_page_size(&store, &CatalogConfig::default(), 50).unwrap();

        let state = store.snapshot();
        assert_eq!(state.pagination.page_size, 50);
        assert_eq!(state.pagination.current_page, 1);
    }

    #[test]
    fn test_change_page_size_rejects_invalid_sizes() {
        let store = store_on_page(3, 5);
        let config = CatalogConfig::default().with_max_remote_pages_per_view(2);

        assert_eq!(
            change_page_size(&store, &config, 0),
            Err(ConfigError::ZeroPageSize)
        );
        assert!(matches!(
            change_page_size(&store, &config, 50),
            Err(ConfigError::PageSizeTooLarge { .. })
        ));

        let state = store.snapshot();
        assert_eq!(state.pagination.page_size, 20);
        assert_eq!(state.pagination.current_page, 3);
    }

    #[test]
    fn test_go_to_page_zero_is_stored() {
        let store = store_on_page(2, 5);
        go_to_page(&store, 0);
        assert_eq!(store.snapshot().pagination.current_page, 0);
    }
}
