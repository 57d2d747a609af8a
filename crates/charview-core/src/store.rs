//! Catalog state container.
//!
//! `CatalogStore` is the single source of truth for one catalog session. It
//! is created once at the application boundary and shared as
//! `Arc<CatalogStore>`. Every committed mutation publishes a new snapshot
//! through a `watch` channel, so subscribers always see whole states and a
//! slow subscriber only ever sees the latest one.
//!
//! # Mutations
//!
//! Each operation is a replace-or-merge over one sub-state. `batch` applies
//! several of them as a single commit: validation runs against a scratch
//! copy and nothing is published unless the whole batch succeeds.
//!
//! The store's only rules are field-local (`page_size > 0`). Cross-field
//! rules such as "changing filters returns to page 1" live in
//! [`crate::intents`].

use std::sync::Arc;

use thiserror::Error;
use tokio::sync::watch;

use crate::domain::{
    Character, CharacterId, FetchError, FetchState, FilterPatch, FilterSet, PaginationPatch,
    PaginationState, SortField, SortState,
};
use crate::settings::CatalogConfig;

/// Store validation error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("Page size must be greater than zero")]
    InvalidPageSize,
}

/// Full catalog state, as seen by subscribers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogState {
    /// Records of the current page, in server order.
    pub records: Vec<Arc<Character>>,
    /// Record shown in the detail view. May outlive the page it came from.
    pub selected: Option<Arc<Character>>,
    /// Committed filters; these drive fetches.
    pub filters: FilterSet,
    pub pagination: PaginationState,
    pub sorting: SortState,
    pub fetch: FetchState,
}

impl CatalogState {
    /// Empty session state on page 1.
    pub fn new(page_size: u32) -> Self {
        Self {
            pagination: PaginationState::with_page_size(page_size),
            ..Self::default()
        }
    }

    /// Current page records in table order (sorting applied).
    pub fn sorted_records(&self) -> Vec<Arc<Character>> {
        let mut records = self.records.clone();
        self.sorting.apply(&mut records);
        records
    }

    pub fn find_record(&self, id: CharacterId) -> Option<&Arc<Character>> {
        self.records.iter().find(|record| record.id == id)
    }
}

/// Mutation handle passed to [`CatalogStore::batch`] and
/// [`CatalogStore::update`].
///
/// Works on a scratch copy of the state. Closures receiving it must not call
/// back into the store.
pub struct StoreBatch<'a> {
    state: &'a mut CatalogState,
}

impl StoreBatch<'_> {
    /// State as modified so far in this batch.
    pub fn state(&self) -> &CatalogState {
        self.state
    }

    /// Replace the record list wholesale. The selection is left alone.
    pub fn replace_records<I>(&mut self, records: I)
    where
        I: IntoIterator<Item = Character>,
    {
        self.state.records = records.into_iter().map(Arc::new).collect();
    }

    pub fn set_selected(&mut self, selected: Option<Arc<Character>>) {
        self.state.selected = selected;
    }

    pub fn set_loading(&mut self, loading: bool) {
        self.state.fetch.loading = loading;
    }

    pub fn set_error(&mut self, error: Option<FetchError>) {
        self.state.fetch.error = error;
    }

    pub fn merge_filters(&mut self, patch: &FilterPatch) {
        self.state.filters.merge(patch);
    }

    /// Merge a pagination patch. A zero page size is rejected before
    /// anything is touched.
    pub fn merge_pagination(&mut self, patch: &PaginationPatch) -> Result<(), StoreError> {
        if patch.page_size == Some(0) {
            return Err(StoreError::InvalidPageSize);
        }
        self.state.pagination.merge(patch);
        Ok(())
    }

    pub fn toggle_sort(&mut self, field: SortField) {
        self.state.sorting.toggle(field);
    }
}

/// Injectable, observable state container for a catalog session.
pub struct CatalogStore {
    state: watch::Sender<CatalogState>,
}

impl CatalogStore {
    /// Create a store with an empty session for `config`.
    pub fn new(config: &CatalogConfig) -> Self {
        Self::with_state(CatalogState::new(config.page_size))
    }

    /// Create a store seeded with `state`.
    pub fn with_state(state: CatalogState) -> Self {
        let (state, _) = watch::channel(state);
        Self { state }
    }

    /// Clone of the current state.
    pub fn snapshot(&self) -> CatalogState {
        self.state.borrow().clone()
    }

    /// Read the current state without cloning it.
    pub fn read<R>(&self, f: impl FnOnce(&CatalogState) -> R) -> R {
        f(&self.state.borrow())
    }

    /// Subscribe to state changes. The receiver starts at the current state.
    pub fn subscribe(&self) -> watch::Receiver<CatalogState> {
        self.state.subscribe()
    }

    pub fn subscriber_count(&self) -> usize {
        self.state.receiver_count()
    }

    /// Apply several mutations as one commit.
    ///
    /// If `f` returns an error the state is left exactly as it was and no
    /// subscriber is notified. Subscribers are also not notified when the
    /// batch changed nothing.
    pub fn batch<T, E>(
        &self,
        f: impl FnOnce(&mut StoreBatch<'_>) -> Result<T, E>,
    ) -> Result<T, E> {
        let mut outcome = None;
        self.state.send_if_modified(|current| {
            let mut next = current.clone();
            let result = f(&mut StoreBatch { state: &mut next });
            let changed = result.is_ok() && next != *current;
            if changed {
                *current = next;
            }
            outcome = Some(result);
            changed
        });
        outcome.expect("send_if_modified runs its closure exactly once")
    }

    /// Infallible form of [`CatalogStore::batch`].
    pub fn update<T>(&self, f: impl FnOnce(&mut StoreBatch<'_>) -> T) -> T {
        let mut outcome = None;
        self.state.send_if_modified(|current| {
            let mut next = current.clone();
            let value = f(&mut StoreBatch { state: &mut next });
            let changed = next != *current;
            if changed {
                *current = next;
            }
            outcome = Some(value);
            changed
        });
        outcome.expect("send_if_modified runs its closure exactly once")
    }

    // ── single-operation shorthands ─────────────────────────────────────────

    pub fn replace_records<I>(&self, records: I)
    where
        I: IntoIterator<Item = Character>,
    {
        self.update(|b| b.replace_records(records));
    }

    pub fn set_selected(&self, selected: Option<Arc<Character>>) {
        self.update(|b| b.set_selected(selected));
    }

    /// Select a record of the current page by id.
    ///
    /// Returns `false` (and leaves the selection alone) if the id is not on
    /// the current page.
    pub fn select_by_id(&self, id: CharacterId) -> bool {
        self.update(|b| {
            let found = b.state().find_record(id).cloned();
            let hit = found.is_some();
            if hit {
                b.set_selected(found);
            }
            hit
        })
    }

    pub fn clear_selection(&self) {
        self.set_selected(None);
    }

    pub fn set_loading(&self, loading: bool) {
        self.update(|b| b.set_loading(loading));
    }

    pub fn set_error(&self, error: Option<FetchError>) {
        self.update(|b| b.set_error(error));
    }

    pub fn merge_filters(&self, patch: &FilterPatch) {
        self.update(|b| b.merge_filters(patch));
    }

    pub fn merge_pagination(&self, patch: &PaginationPatch) -> Result<(), StoreError> {
        self.batch(|b| b.merge_pagination(patch))
    }

    pub fn toggle_sort(&self, field: SortField) {
        self.update(|b| b.toggle_sort(field));
    }
}
