//! Fetch orchestration.
//!
//! [`FetchOrchestrator`] turns the committed `(filters, page, page_size)` of
//! a [`CatalogStore`] into records. Every fetch gets a generation number;
//! only the newest generation may commit, so a slow stale response can never
//! overwrite a newer one.
//!
//! # Virtual pages
//!
//! The remote API pages in fixed blocks of [`CatalogConfig::remote_page_size`].
//! Any other page size is materialized client-side: the orchestrator fetches
//! the remote pages the virtual page overlaps (in parallel, all-or-nothing),
//! concatenates them and slices the page out. See [`PageWindow`].
//!
//! # Run modes
//!
//! - [`FetchOrchestrator::refresh`] fetches the current state and waits for
//!   it to settle, following a page clamp with a fetch of the page it landed
//!   on. Used by one-shot commands and for retry.
//! - [`FetchOrchestrator::spawn`] subscribes to the store and starts a fetch
//!   whenever the fetch key changes, including once at startup. A clamp is a
//!   key change, so the follow-up fetch comes from the subscription.
//!
//! A page past the end never settles as an empty success: the clamp commit
//! only moves the page and keeps `loading` set until the real page lands.

mod window;

pub use window::PageWindow;

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use futures_util::future::try_join_all;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::domain::{Character, FetchError, FilterSet, PaginationPatch, total_pages_for};
use crate::events::{FetchEvent, FetchEvents, NoopFetchEvents};
use crate::ports::{CatalogClientPort, CatalogPage, CatalogPortError};
use crate::settings::{CatalogConfig, ConfigError, validate_config};
use crate::store::{CatalogState, CatalogStore, StoreError};

/// The state a fetch depends on. A change to any of it needs a new fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchKey {
    pub filters: FilterSet,
    pub page: u32,
    pub page_size: u32,
}

impl FetchKey {
    pub fn of(state: &CatalogState) -> Self {
        Self {
            filters: state.filters.clone(),
            page: state.pagination.current_page,
            page_size: state.pagination.page_size,
        }
    }
}

/// How a fetch ended, from the caller's point of view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    /// Records and totals were committed.
    Committed { records: usize, total_pages: u32 },
    /// The error was committed; records were left alone.
    Failed(FetchError),
    /// A newer fetch started meanwhile; nothing was committed.
    Discarded,
}

/// How one fetch attempt ended.
enum Attempt {
    Settled(FetchOutcome),
    /// The page was past the end and has been moved; nothing else changed.
    Clamped { last_page: u32 },
}

/// One materialized virtual page.
struct PageView {
    records: Vec<Character>,
    total_count: u64,
    total_pages: u32,
}

enum CommitError {
    Superseded,
    Store(StoreError),
}

impl From<StoreError> for CommitError {
    fn from(err: StoreError) -> Self {
        Self::Store(err)
    }
}

/// Map a port error onto the error the view shows.
///
/// `NotFound` is normally absorbed as an empty page before it gets here.
pub fn fetch_error_from_port(err: CatalogPortError) -> FetchError {
    match err {
        CatalogPortError::Network { message } | CatalogPortError::Configuration { message } => {
            FetchError::Network { message }
        }
        CatalogPortError::InvalidResponse { message } => FetchError::InvalidResponse { message },
        CatalogPortError::NotFound { resource } => FetchError::InvalidResponse {
            message: format!("not found: {resource}"),
        },
    }
}

/// Keeps a [`CatalogStore`] in sync with the remote catalog.
pub struct FetchOrchestrator {
    store: Arc<CatalogStore>,
    client: Arc<dyn CatalogClientPort>,
    events: Arc<dyn FetchEvents>,
    config: CatalogConfig,
    generation: AtomicU64,
}

impl FetchOrchestrator {
    /// # Errors
    ///
    /// Returns the [`ConfigError`] from [`validate_config`] if `config` cannot
    /// drive a fetch.
    pub fn new(
        store: Arc<CatalogStore>,
        client: Arc<dyn CatalogClientPort>,
        config: CatalogConfig,
    ) -> Result<Self, ConfigError> {
        validate_config(&config)?;
        Ok(Self {
            store,
            client,
            events: Arc::new(NoopFetchEvents),
            config,
            generation: AtomicU64::new(0),
        })
    }

    #[must_use]
    pub fn with_events(mut self, events: Arc<dyn FetchEvents>) -> Self {
        self.events = events;
        self
    }

    pub const fn store(&self) -> &Arc<CatalogStore> {
        &self.store
    }

    pub const fn config(&self) -> &CatalogConfig {
        &self.config
    }

    /// Generation of the most recently started fetch (0 before the first).
    pub fn current_generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }

    /// Fetch the page the store currently asks for and wait for it to settle.
    ///
    /// Each clamp moves the page down, so this ends by page 1 at the latest.
    pub async fn refresh(&self) -> FetchOutcome {
        loop {
            match self.fetch_once().await {
                Attempt::Settled(outcome) => return outcome,
                Attempt::Clamped { last_page } => {
                    debug!(target: "charview.fetch", last_page, "Fetching the clamped page");
                }
            }
        }
    }

    /// Re-run the fetch for the current state. Same as [`Self::refresh`].
    pub async fn retry(&self) -> FetchOutcome {
        self.refresh().await
    }

    async fn fetch_once(&self) -> Attempt {
        let (generation, key) = self.store.update(|b| {
            let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
            b.set_error(None);
            b.set_loading(true);
            (generation, FetchKey::of(b.state()))
        });

        debug!(
            target: "charview.fetch",
            generation,
            page = key.page,
            page_size = key.page_size,
            filters = key.filters.active_count(),
            "Fetch started"
        );
        self.events.emit(FetchEvent::Started {
            generation,
            page: key.page,
            page_size: key.page_size,
        });

        match self.materialize(&key).await {
            Ok(view) => self.commit_view(generation, &key, view),
            Err(err) => Attempt::Settled(self.commit_failure(generation, &key, err)),
        }
    }

    async fn materialize(&self, key: &FetchKey) -> Result<PageView, FetchError> {
        // The store accepts any non-zero size; the fan-out cap is held here
        let max = self.config.max_page_size();
        if key.page_size > max {
            warn!(
                target: "charview.fetch",
                page_size = key.page_size,
                max,
                cap = self.config.max_remote_pages_per_view,
                "Page size exceeds the per-view request cap"
            );
            return Err(FetchError::PageSizeTooLarge {
                page_size: key.page_size,
                max,
            });
        }

        let window =
            PageWindow::for_page(key.page, key.page_size, self.config.remote_page_size)
                .ok_or(FetchError::InvalidPage { page: key.page })?;

        let pages = try_join_all(
            window
                .remote_pages()
                .map(|page| self.fetch_remote_page(page, &key.filters)),
        )
        .await?;

        let total_count = pages.iter().map(|p| p.total_count).max().unwrap_or(0);
        let concatenated: Vec<_> = pages.into_iter().flat_map(|p| p.records).collect();

        Ok(PageView {
            records: window.slice(concatenated),
            total_count,
            total_pages: total_pages_for(total_count, key.page_size),
        })
    }

    async fn fetch_remote_page(
        &self,
        page: u32,
        filters: &FilterSet,
    ) -> Result<CatalogPage, FetchError> {
        match self.client.fetch_page(page, filters).await {
            Ok(page) => Ok(page),
            Err(CatalogPortError::NotFound { .. }) => {
                debug!(target: "charview.fetch", page, "Remote page not found, treating as empty");
                Ok(CatalogPage::empty())
            }
            Err(err) => Err(fetch_error_from_port(err)),
        }
    }

    fn commit_view(&self, generation: u64, key: &FetchKey, view: PageView) -> Attempt {
        let records = view.records.len();
        let total_pages = view.total_pages;
        let last_page = total_pages.max(1);

        let result = self.store.batch(|b| -> Result<bool, CommitError> {
            if !self.is_current(generation, key, b.state()) {
                return Err(CommitError::Superseded);
            }
            let totals = PaginationPatch::totals(view.total_pages, view.total_count);
            if key.page > last_page {
                // Records and loading stay as they are until the moved page lands
                b.merge_pagination(&totals.and_page(last_page))?;
                return Ok(true);
            }
            b.replace_records(view.records);
            b.merge_pagination(&totals)?;
            b.set_loading(false);
            Ok(false)
        });

        match result {
            Ok(true) => {
                debug!(
                    target: "charview.fetch",
                    generation,
                    page = key.page,
                    last_page,
                    "Page past the end, moved to last page"
                );
                Attempt::Clamped { last_page }
            }
            Ok(false) => {
                debug!(
                    target: "charview.fetch",
                    generation,
                    records,
                    total_pages,
                    "Fetch committed"
                );
                self.events.emit(FetchEvent::Completed {
                    generation,
                    records,
                    total_pages,
                });
                Attempt::Settled(FetchOutcome::Committed {
                    records,
                    total_pages,
                })
            }
            Err(CommitError::Superseded) => Attempt::Settled(self.discard(generation)),
            Err(CommitError::Store(err)) => {
                warn!(target: "charview.fetch", generation, %err, "Could not commit fetch");
                Attempt::Settled(self.commit_failure(
                    generation,
                    key,
                    FetchError::InvalidResponse {
                        message: err.to_string(),
                    },
                ))
            }
        }
    }

    fn commit_failure(&self, generation: u64, key: &FetchKey, error: FetchError) -> FetchOutcome {
        let result = self.store.batch(|b| {
            if !self.is_current(generation, key, b.state()) {
                return Err(CommitError::Superseded);
            }
            b.set_error(Some(error.clone()));
            b.set_loading(false);
            Ok(())
        });

        match result {
            Ok(()) => {
                warn!(
                    target: "charview.fetch",
                    generation,
                    detail = %error.detail(),
                    "Fetch failed"
                );
                self.events.emit(FetchEvent::Failed {
                    generation,
                    error: error.clone(),
                });
                FetchOutcome::Failed(error)
            }
            Err(_) => self.discard(generation),
        }
    }

    fn discard(&self, generation: u64) -> FetchOutcome {
        debug!(
            target: "charview.fetch",
            generation,
            latest = self.current_generation(),
            "Discarding stale fetch result"
        );
        self.events.emit(FetchEvent::Discarded { generation });
        FetchOutcome::Discarded
    }

    fn is_current(&self, generation: u64, key: &FetchKey, state: &CatalogState) -> bool {
        self.generation.load(Ordering::SeqCst) == generation && FetchKey::of(state) == *key
    }

    /// Start following the store: fetch now, then again whenever the fetch
    /// key changes.
    ///
    /// Each fetch runs in its own task so a newer key never waits for an
    /// older request. A clamp changes the key, which is what fetches the
    /// moved page here. The returned handle stops following when shut down or
    /// dropped; fetches already in flight still settle.
    pub fn spawn(self: Arc<Self>) -> OrchestratorHandle {
        let cancel = CancellationToken::new();
        let token = cancel.clone();
        let mut rx = self.store.subscribe();

        let task = tokio::spawn(async move {
            let mut last_key: Option<FetchKey> = None;
            loop {
                let key = FetchKey::of(&rx.borrow_and_update());
                if last_key.as_ref() != Some(&key) {
                    last_key = Some(key);
                    let orchestrator = Arc::clone(&self);
                    tokio::spawn(async move {
                        orchestrator.fetch_once().await;
                    });
                }

                tokio::select! {
                    biased;

                    () = token.cancelled() => break,

                    changed = rx.changed() => {
                        if changed.is_err() {
                            break;
                        }
                    }
                }
            }
            debug!(target: "charview.fetch", "Orchestrator stopped following the store");
        });

        OrchestratorHandle {
            cancel,
            task: Some(task),
        }
    }
}

/// Handle to a running [`FetchOrchestrator::spawn`] loop.
pub struct OrchestratorHandle {
    cancel: CancellationToken,
    task: Option<JoinHandle<()>>,
}

impl OrchestratorHandle {
    /// Stop following the store and wait for the loop to exit.
    pub async fn shutdown(mut self) {
        self.cancel.cancel();
        if let Some(task) = self.task.take() {
            let _ = task.await;
        }
    }
}

impl Drop for OrchestratorHandle {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}
