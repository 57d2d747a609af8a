//! Browse command handler.
//!
//! Interactive session: the orchestrator follows the store in the
//! background while the user pages, filters and selects from a prompt.

use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use charview_core::{
    CatalogState, CatalogView, CharacterId, FetchKey, FilterDraftController, FilterField,
    SortField, intents,
};
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use tracing::{debug, warn};

use super::list::seed_query;
use crate::bootstrap::CliContext;
use crate::commands::QueryArgs;
use crate::error::CliError;
use crate::presentation::{format_filters, print_catalog_view};

/// How long to wait for a fetch before showing whatever the store holds.
const SETTLE_TIMEOUT: Duration = Duration::from_secs(60);

const HELP: &str = "\
Commands:
  next | n                 next page
  prev | p                 previous page
  page N                   jump to page N
  size N                   records per page (back to page 1)
  filter FIELD [VALUE]     edit the filter draft (name, status, species, gender)
  apply                    apply the filter draft (back to page 1)
  cancel                   discard the filter draft
  clear                    clear all filters and apply
  sort FIELD               sort by id, name, status, species, gender or episodes
  select ID                show details for a character on this page
  close                    hide the details
  retry                    fetch the current page again
  show                     print the current page
  help                     this text
  quit                     leave";

/// One parsed prompt line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BrowseCommand {
    Next,
    Previous,
    Page(u32),
    Size(u32),
    Filter(FilterField, String),
    Apply,
    Cancel,
    Clear,
    Sort(SortField),
    Select(CharacterId),
    Close,
    Retry,
    Show,
    Help,
    Quit,
}

impl BrowseCommand {
    /// Parse a prompt line. Blank lines are `Ok(None)`.
    pub fn parse(line: &str) -> Result<Option<Self>, String> {
        let mut words = line.split_whitespace();
        let Some(word) = words.next() else {
            return Ok(None);
        };
        let args: Vec<&str> = words.collect();

        let command = match word.to_ascii_lowercase().as_str() {
            "next" | "n" => Self::Next,
            "prev" | "previous" | "p" => Self::Previous,
            "page" => Self::Page(number_arg(&args, "page N")?),
            "size" => Self::Size(number_arg(&args, "size N")?),
            "filter" | "f" => {
                let Some(field) = args.first() else {
                    return Err("usage: filter FIELD [VALUE]".to_string());
                };
                Self::Filter(field.parse()?, args[1..].join(" "))
            }
            "apply" => Self::Apply,
            "cancel" => Self::Cancel,
            "clear" => Self::Clear,
            "sort" => {
                let Some(field) = args.first() else {
                    return Err("usage: sort FIELD".to_string());
                };
                Self::Sort(field.parse()?)
            }
            "select" => Self::Select(number_arg(&args, "select ID")?),
            "close" => Self::Close,
            "retry" | "r" => Self::Retry,
            "show" | "ls" => Self::Show,
            "help" | "h" | "?" => Self::Help,
            "quit" | "exit" | "q" => Self::Quit,
            other => {
                return Err(format!(
                    "Unknown command '{other}'. Type 'help' for a list of commands."
                ));
            }
        };
        Ok(Some(command))
    }
}

fn number_arg<T: FromStr>(args: &[&str], usage: &str) -> Result<T, String> {
    args.first()
        .and_then(|arg| arg.parse().ok())
        .ok_or_else(|| format!("usage: {usage}"))
}

/// Whether the session keeps going after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Continue,
    Quit,
}

/// A fetch has settled. A clamped page keeps `loading` set until the page it
/// moved to has landed.
const fn is_settled(state: &CatalogState) -> bool {
    !state.fetch.loading
}

/// State of one interactive session.
pub struct BrowseSession<'a> {
    ctx: &'a CliContext,
    draft: FilterDraftController,
}

impl<'a> BrowseSession<'a> {
    pub fn new(ctx: &'a CliContext) -> Self {
        Self {
            ctx,
            draft: FilterDraftController::new(Arc::clone(ctx.store())),
        }
    }

    pub const fn draft(&self) -> &FilterDraftController {
        &self.draft
    }

    /// Prompt text, with a `*` while a draft has unapplied changes.
    pub fn prompt(&self) -> String {
        let page = self.ctx.store().read(|s| s.pagination.current_page);
        let marker = if self.draft.pending_changes() { "*" } else { "" };
        format!("charview p{page}{marker}> ")
    }

    /// Run one command, wait for any fetch it caused and render the result.
    pub async fn run(&mut self, command: BrowseCommand) -> Step {
        let ctx = self.ctx;
        let store = ctx.store();
        let before_generation = ctx.orchestrator().current_generation();
        let before_key = store.read(FetchKey::of);
        let mut fetched = false;

        match command {
            BrowseCommand::Next => {
                if !intents::next_page(store) {
                    println!("Already on the last page.");
                    return Step::Continue;
                }
            }
            BrowseCommand::Previous => {
                if !intents::previous_page(store) {
                    println!("Already on the first page.");
                    return Step::Continue;
                }
            }
            BrowseCommand::Page(page) => intents::go_to_page(store, page),
            BrowseCommand::Size(size) => {
                if let Err(err) = intents::change_page_size(store, &ctx.config, size) {
                    println!("{err}");
                    return Step::Continue;
                }
            }
            BrowseCommand::Filter(field, value) => {
                self.draft.edit_draft(field, value);
                self.print_filters();
                return Step::Continue;
            }
            BrowseCommand::Apply => {
                if self.draft.apply_draft().is_none() {
                    println!("No filter draft open. Start one with 'filter FIELD VALUE'.");
                    return Step::Continue;
                }
            }
            BrowseCommand::Cancel => {
                self.draft.cancel_draft();
                self.print_filters();
                return Step::Continue;
            }
            BrowseCommand::Clear => self.draft.clear_and_apply(),
            BrowseCommand::Sort(field) => intents::toggle_sort(store, field),
            BrowseCommand::Select(id) => {
                if !store.select_by_id(id) {
                    println!("Character {id} is not on this page.");
                    return Step::Continue;
                }
            }
            BrowseCommand::Close => store.clear_selection(),
            BrowseCommand::Retry => {
                ctx.orchestrator().retry().await;
                fetched = true;
            }
            BrowseCommand::Show => {}
            BrowseCommand::Help => {
                println!("{HELP}");
                return Step::Continue;
            }
            BrowseCommand::Quit => return Step::Quit,
        }

        if fetched || store.read(FetchKey::of) != before_key {
            self.settle(before_generation).await;
        }
        self.render();
        Step::Continue
    }

    /// Wait until a fetch newer than `before` has settled.
    pub async fn settle(&self, before: u64) {
        let orchestrator = self.ctx.orchestrator();
        let mut rx = self.ctx.store().subscribe();
        let waited = tokio::time::timeout(
            SETTLE_TIMEOUT,
            rx.wait_for(|state| orchestrator.current_generation() > before && is_settled(state)),
        )
        .await;

        match waited {
            Ok(Ok(_)) => {}
            Ok(Err(_)) => debug!("Store closed while waiting for a fetch"),
            Err(_) => warn!("Still loading after {}s", SETTLE_TIMEOUT.as_secs()),
        }
    }

    /// Print the table view for the current state.
    pub fn render(&self) {
        let state = self.ctx.store().snapshot();
        println!();
        print_catalog_view(&CatalogView::from_state(&state));
        if let Some(field) = state.sorting.field {
            println!("Sorted by {field} ({:?})", state.sorting.direction);
        }
        self.print_filters();
    }

    fn print_filters(&self) {
        let committed = self.ctx.store().read(|s| s.filters.clone());
        println!("Filters: {}", format_filters(&committed));
        if let Some(draft) = self.draft.draft() {
            if self.draft.pending_changes() {
                println!("Draft:   {} (type 'apply' or 'cancel')", format_filters(draft));
            }
        }
    }
}

/// Execute the browse command.
///
/// Runs until `quit`, Ctrl-C or Ctrl-D. The background orchestrator is shut
/// down on every exit path.
pub async fn execute(ctx: &CliContext, query: &QueryArgs) -> Result<()> {
    seed_query(ctx.store(), query);

    let before = ctx.orchestrator().current_generation();
    let handle = Arc::clone(ctx.orchestrator()).spawn();
    let mut session = BrowseSession::new(ctx);
    session.settle(before).await;
    session.render();
    println!("Type 'help' for commands.");

    let result = prompt_loop(&mut session).await;
    handle.shutdown().await;
    result
}

async fn prompt_loop(session: &mut BrowseSession<'_>) -> Result<()> {
    let mut editor = DefaultEditor::new().map_err(CliError::from)?;

    loop {
        let prompt = session.prompt();
        let line = tokio::task::block_in_place(|| editor.readline(&prompt));

        let line = match line {
            Ok(line) => line,
            Err(ReadlineError::Interrupted | ReadlineError::Eof) => return Ok(()),
            Err(err) => return Err(CliError::from(err).into()),
        };
        let _ = editor.add_history_entry(line.as_str());

        match BrowseCommand::parse(&line) {
            Ok(None) => {}
            Ok(Some(command)) => {
                if session.run(command).await == Step::Quit {
                    return Ok(());
                }
            }
            Err(message) => println!("{message}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bootstrap::compose;
    use crate::testing::FakeCatalog;
    use charview_core::{
        CatalogConfig, NoopFetchEvents, OrchestratorHandle, SortDirection,
    };

    struct Harness {
        fake: Arc<FakeCatalog>,
        ctx: CliContext,
    }

    impl Harness {
        async fn start(count: u32) -> (Self, OrchestratorHandle) {
            let fake = Arc::new(FakeCatalog::with_count(count));
            let ctx = compose(
                CatalogConfig::default(),
                fake.clone(),
                Arc::new(NoopFetchEvents),
            )
            .unwrap();
            let handle = Arc::clone(ctx.orchestrator()).spawn();
            BrowseSession::new(&ctx).settle(0).await;
            (Self { fake, ctx }, handle)
        }

        fn ids(&self) -> Vec<u32> {
            self.ctx
                .store()
                .read(|s| s.records.iter().map(|c| c.id).collect())
        }

        fn page(&self) -> u32 {
            self.ctx.store().read(|s| s.pagination.current_page)
        }
    }

    #[test]
    fn test_parse_navigation() {
        assert_eq!(BrowseCommand::parse("next"), Ok(Some(BrowseCommand::Next)));
        assert_eq!(BrowseCommand::parse(" P "), Ok(Some(BrowseCommand::Previous)));
        assert_eq!(BrowseCommand::parse("page 4"), Ok(Some(BrowseCommand::Page(4))));
        assert_eq!(BrowseCommand::parse("size 50"), Ok(Some(BrowseCommand::Size(50))));
        assert_eq!(BrowseCommand::parse("   "), Ok(None));
    }

    #[test]
    fn test_parse_filter_keeps_spaces_in_value() {
        assert_eq!(
            BrowseCommand::parse("filter name rick sanchez"),
            Ok(Some(BrowseCommand::Filter(
                FilterField::Name,
                "rick sanchez".to_string()
            )))
        );
        assert_eq!(
            BrowseCommand::parse("filter status"),
            Ok(Some(BrowseCommand::Filter(FilterField::Status, String::new())))
        );
    }

    #[test]
    fn test_parse_errors() {
        assert!(BrowseCommand::parse("page").is_err());
        assert!(BrowseCommand::parse("page two").is_err());
        assert!(BrowseCommand::parse("filter height tall").is_err());
        assert!(BrowseCommand::parse("sort").is_err());
        assert!(BrowseCommand::parse("dance").is_err());
    }

    #[test]
    fn test_parse_sort_and_select() {
        assert_eq!(
            BrowseCommand::parse("sort episodes"),
            Ok(Some(BrowseCommand::Sort(SortField::Episodes)))
        );
        assert_eq!(
            BrowseCommand::parse("select 12"),
            Ok(Some(BrowseCommand::Select(12)))
        );
    }

    #[tokio::test]
    async fn test_session_pages_through_catalog() {
        let (h, handle) = Harness::start(45).await;
        let mut session = BrowseSession::new(&h.ctx);
        assert_eq!(h.ids(), (1..=20).collect::<Vec<_>>());

        assert_eq!(session.run(BrowseCommand::Next).await, Step::Continue);
        assert_eq!(h.page(), 2);
        assert_eq!(h.ids(), (21..=40).collect::<Vec<_>>());

        session.run(BrowseCommand::Next).await;
        assert_eq!(h.ids(), (41..=45).collect::<Vec<_>>());

        let requests = h.fake.request_count();
        session.run(BrowseCommand::Next).await;
        assert_eq!(h.page(), 3);
        assert_eq!(h.fake.request_count(), requests);

        session.run(BrowseCommand::Previous).await;
        assert_eq!(h.page(), 2);

        handle.shutdown().await;
    }

    #[tokio::test]
    async fn test_draft_edits_wait_for_apply() {
        let (h, handle) = Harness::start(45).await;
        let mut session = BrowseSession::new(&h.ctx);
        session.run(BrowseCommand::Page(2)).await;
        let requests = h.fake.request_count();

        session
            .run(BrowseCommand::Filter(FilterField::Name, "rick".to_string()))
            .await;
        assert_eq!(h.fake.request_count(), requests);
        assert!(session.draft().pending_changes());
        assert!(session.prompt().ends_with("*> "));
        assert_eq!(h.page(), 2);

        session.run(BrowseCommand::Apply).await;
        assert_eq!(h.page(), 1);
        assert_eq!(h.fake.last_filters().unwrap().name, "rick");
        assert_eq!(h.ctx.store().read(|s| s.pagination.total_count), 15);
        assert!(!session.draft().is_open());

        handle.shutdown().await;
    }

    #[tokio::test]
    async fn test_cancel_keeps_committed_filters() {
        let (h, handle) = Harness::start(45).await;
        let mut session = BrowseSession::new(&h.ctx);

        session
            .run(BrowseCommand::Filter(FilterField::Species, "Alien".to_string()))
            .await;
        session.run(BrowseCommand::Cancel).await;

        assert!(h.ctx.store().read(|s| s.filters.is_unconstrained()));
        assert!(!session.draft().is_open());

        handle.shutdown().await;
    }

    #[tokio::test]
    async fn test_size_change_returns_to_first_page() {
        let (h, handle) = Harness::start(45).await;
        let mut session = BrowseSession::new(&h.ctx);
        session.run(BrowseCommand::Page(3)).await;

        session.run(BrowseCommand::Size(10)).await;

        assert_eq!(h.page(), 1);
        assert_eq!(h.ids(), (1..=10).collect::<Vec<_>>());
        assert_eq!(h.ctx.store().read(|s| s.pagination.total_pages), 5);

        session.run(BrowseCommand::Size(0)).await;
        assert_eq!(h.ctx.store().read(|s| s.pagination.page_size), 10);

        handle.shutdown().await;
    }

    #[tokio::test]
    async fn test_select_and_close() {
        let (h, handle) = Harness::start(45).await;
        let mut session = BrowseSession::new(&h.ctx);

        session.run(BrowseCommand::Select(99)).await;
        assert!(h.ctx.store().read(|s| s.selected.is_none()));

        session.run(BrowseCommand::Select(3)).await;
        let selected = h.ctx.store().read(|s| s.selected.as_ref().map(|c| c.id));
        assert_eq!(selected, Some(3));

        session.run(BrowseCommand::Close).await;
        assert!(h.ctx.store().read(|s| s.selected.is_none()));

        handle.shutdown().await;
    }

    #[tokio::test]
    async fn test_sort_toggles_without_fetching() {
        let (h, handle) = Harness::start(45).await;
        let mut session = BrowseSession::new(&h.ctx);
        let requests = h.fake.request_count();

        session.run(BrowseCommand::Sort(SortField::Id)).await;
        session.run(BrowseCommand::Sort(SortField::Id)).await;

        let sorting = h.ctx.store().read(|s| s.sorting);
        assert_eq!(sorting.direction, SortDirection::Desc);
        let first = h.ctx.store().read(|s| s.sorted_records()[0].id);
        assert_eq!(first, 20);
        assert_eq!(h.fake.request_count(), requests);

        handle.shutdown().await;
    }

    #[tokio::test]
    async fn test_retry_recovers_after_failure() {
        let (h, handle) = Harness::start(45).await;
        let mut session = BrowseSession::new(&h.ctx);

        h.fake.set_failing(true);
        session.run(BrowseCommand::Next).await;
        let state = h.ctx.store().snapshot();
        assert!(state.fetch.error.as_ref().is_some_and(|e| e.is_retryable()));
        assert_eq!(h.ids(), (1..=20).collect::<Vec<_>>());

        h.fake.set_failing(false);
        session.run(BrowseCommand::Retry).await;
        let state = h.ctx.store().snapshot();
        assert!(state.fetch.error.is_none());
        assert_eq!(h.ids(), (21..=40).collect::<Vec<_>>());

        handle.shutdown().await;
    }

    #[tokio::test]
    async fn test_quit() {
        let (h, handle) = Harness::start(5).await;
        let mut session = BrowseSession::new(&h.ctx);
        assert_eq!(session.run(BrowseCommand::Quit).await, Step::Quit);
        handle.shutdown().await;
    }

    #[tokio::test]
    async fn test_page_past_the_end_settles_on_a_full_page() {
        let (h, handle) = Harness::start(45).await;
        let mut session = BrowseSession::new(&h.ctx);

        session.run(BrowseCommand::Size(50)).await;
        session.run(BrowseCommand::Page(2)).await;

        let state = h.ctx.store().snapshot();
        assert_eq!(state.pagination.current_page, 1);
        assert_eq!(state.records.len(), 45);
        assert!(is_settled(&state));
        handle.shutdown().await;
    }
}
