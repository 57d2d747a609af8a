//! List command handler.
//!
//! Fetches one page of characters and prints it as a table.

use anyhow::Result;
use charview_core::{CatalogStore, CatalogView, FetchOutcome, FilterPatch, intents};

use crate::bootstrap::CliContext;
use crate::commands::QueryArgs;
use crate::error::CliError;
use crate::presentation::print_catalog_view;

/// Execute the list command.
///
/// A page past the end lands on the last page that exists.
///
/// # Errors
///
/// Returns a [`CliError`] (inside `anyhow`) if the fetch fails; the error
/// carries the exit code.
pub async fn execute(ctx: &CliContext, page: u32, query: &QueryArgs) -> Result<()> {
    seed_query(ctx.store(), query);
    intents::go_to_page(ctx.store(), page);

    if let FetchOutcome::Failed(err) = ctx.orchestrator().refresh().await {
        return Err(CliError::from(err).into());
    }

    print_catalog_view(&CatalogView::from_state(&ctx.store().snapshot()));
    Ok(())
}

/// Commit the filters and sort order from the command line.
pub fn seed_query(store: &CatalogStore, query: &QueryArgs) {
    let filters = query.filters();
    if !filters.is_unconstrained() {
        intents::commit_filters(store, &FilterPatch::replace_with(&filters));
    }
    if let Some(field) = query.sort {
        intents::toggle_sort(store, field);
        if query.desc {
            intents::toggle_sort(store, field);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bootstrap::compose;
    use crate::testing::FakeCatalog;
    use charview_core::{CatalogConfig, CatalogState, NoopFetchEvents, SortDirection, SortField};
    use std::sync::Arc;
    use tokio_test::{assert_err, assert_ok};

    fn context(fake: &Arc<FakeCatalog>, config: CatalogConfig) -> CliContext {
        compose(config, fake.clone(), Arc::new(NoopFetchEvents)).unwrap()
    }

    fn ids(state: &CatalogState) -> Vec<u32> {
        state.records.iter().map(|c| c.id).collect()
    }

    fn exit_code(err: &anyhow::Error) -> i32 {
        err.downcast_ref::<CliError>().unwrap().exit_code()
    }

    #[tokio::test]
    async fn test_list_second_page() {
        let fake = Arc::new(FakeCatalog::with_count(45));
        let ctx = context(&fake, CatalogConfig::default());

        assert_ok!(execute(&ctx, 2, &QueryArgs::default()).await);

        let state = ctx.store().snapshot();
        assert_eq!(ids(&state), (21..=40).collect::<Vec<_>>());
        assert_eq!(state.pagination.total_pages, 3);
        assert_eq!(fake.requested_pages(), vec![2]);
    }

    #[tokio::test]
    async fn test_list_large_page_spans_remote_pages() {
        let fake = Arc::new(FakeCatalog::with_count(45));
        let query = QueryArgs {
            page_size: Some(50),
            ..QueryArgs::default()
        };
        let ctx = context(&fake, query.catalog_config());

        assert_ok!(execute(&ctx, 1, &query).await);

        let mut pages = fake.requested_pages();
        pages.sort_unstable();
        assert_eq!(pages, vec![1, 2, 3]);
        assert_eq!(ctx.store().read(|s| s.records.len()), 45);
    }

    #[tokio::test]
    async fn test_list_filters_are_sent() {
        let fake = Arc::new(FakeCatalog::with_count(45));
        let ctx = context(&fake, CatalogConfig::default());
        let query = QueryArgs {
            name: Some("rick".to_string()),
            ..QueryArgs::default()
        };

        assert_ok!(execute(&ctx, 1, &query).await);

        assert_eq!(fake.last_filters().unwrap().name, "rick");
        let state = ctx.store().snapshot();
        assert_eq!(state.pagination.total_count, 15);
        assert!(state.records.iter().all(|c| c.name.starts_with("Rick")));
    }

    #[tokio::test]
    async fn test_list_past_the_end_lands_on_a_real_page() {
        let fake = Arc::new(FakeCatalog::with_count(45));
        let ctx = context(&fake, CatalogConfig::default());

        assert_ok!(execute(&ctx, 9, &QueryArgs::default()).await);

        let state = ctx.store().snapshot();
        assert_eq!(state.pagination.current_page, 1);
        assert_eq!(state.records.len(), 20);
        assert_eq!(fake.requested_pages(), vec![9, 1]);
    }

    #[tokio::test]
    async fn test_list_wide_page_past_the_end_is_filled() {
        let fake = Arc::new(FakeCatalog::with_count(45));
        let query = QueryArgs {
            page_size: Some(50),
            ..QueryArgs::default()
        };
        let ctx = context(&fake, query.catalog_config());

        assert_ok!(execute(&ctx, 2, &query).await);

        let state = ctx.store().snapshot();
        assert_eq!(state.pagination.current_page, 1);
        assert_eq!(ids(&state), (1..=45).collect::<Vec<_>>());
        assert!(!state.fetch.loading);
    }

    #[tokio::test]
    async fn test_list_network_failure_exit_code() {
        let fake = Arc::new(FakeCatalog::with_count(45));
        fake.set_failing(true);
        let ctx = context(&fake, CatalogConfig::default());

        let err = assert_err!(execute(&ctx, 1, &QueryArgs::default()).await);

        assert_eq!(exit_code(&err), 69);
        assert!(ctx.store().read(|s| s.fetch.error.is_some()));
    }

    #[tokio::test]
    async fn test_list_page_zero_is_rejected() {
        let fake = Arc::new(FakeCatalog::with_count(45));
        let ctx = context(&fake, CatalogConfig::default());

        let err = assert_err!(execute(&ctx, 0, &QueryArgs::default()).await);

        assert_eq!(exit_code(&err), 2);
        assert_eq!(fake.request_count(), 0);
    }

    #[test]
    fn test_seed_query_sort_desc() {
        let store = CatalogStore::new(&CatalogConfig::default());
        let query = QueryArgs {
            sort: Some(SortField::Name),
            desc: true,
            ..QueryArgs::default()
        };

        seed_query(&store, &query);

        let sorting = store.read(|s| s.sorting);
        assert_eq!(sorting.field, Some(SortField::Name));
        assert_eq!(sorting.direction, SortDirection::Desc);
    }
}
