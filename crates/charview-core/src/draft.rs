//! Filter drafts.
//!
//! The filter form edits a private copy of the committed filters. Nothing
//! reaches the store (and nothing is fetched) until the draft is applied.

use std::sync::Arc;

use crate::domain::{FilterField, FilterPatch, FilterSet};
use crate::intents;
use crate::store::CatalogStore;

/// Holds an uncommitted copy of the filters for one form.
pub struct FilterDraftController {
    store: Arc<CatalogStore>,
    draft: Option<FilterSet>,
}

impl FilterDraftController {
    pub const fn new(store: Arc<CatalogStore>) -> Self {
        Self { store, draft: None }
    }

    /// Start a draft from the committed filters, discarding any open one.
    pub fn open_draft(&mut self) -> &FilterSet {
        let committed = self.store.read(|state| state.filters.clone());
        self.draft.insert(committed)
    }

    /// Change one field of the draft, opening a draft first if needed.
    pub fn edit_draft(&mut self, field: FilterField, value: impl Into<String>) {
        if self.draft.is_none() {
            self.open_draft();
        }
        if let Some(draft) = self.draft.as_mut() {
            draft.set(field, value);
        }
    }

    /// Commit the draft as the new filters (returning to page 1) and close it.
    ///
    /// Returns the applied filters, or `None` if no draft was open.
    pub fn apply_draft(&mut self) -> Option<FilterSet> {
        let draft = self.draft.take()?;
        intents::commit_filters(&self.store, &FilterPatch::replace_with(&draft));
        Some(draft)
    }

    /// Drop the draft without touching the store.
    pub fn cancel_draft(&mut self) {
        self.draft = None;
    }

    /// Reset every filter and apply immediately.
    pub fn clear_and_apply(&mut self) {
        self.draft = None;
        intents::clear_filters(&self.store);
    }

    /// What the form shows: the draft if one is open, else the committed
    /// filters.
    pub fn current(&self) -> FilterSet {
        self.draft
            .clone()
            .unwrap_or_else(|| self.store.read(|state| state.filters.clone()))
    }

    pub const fn draft(&self) -> Option<&FilterSet> {
        self.draft.as_ref()
    }

    pub const fn is_open(&self) -> bool {
        self.draft.is_some()
    }

    /// Whether applying the draft would change the committed filters.
    pub fn pending_changes(&self) -> bool {
        self.draft
            .as_ref()
            .is_some_and(|draft| self.store.read(|state| state.filters != *draft))
    }
}
