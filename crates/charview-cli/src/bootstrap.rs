//! CLI bootstrap - the composition root.
//!
//! This module is the ONLY place where the store, the orchestrator and the
//! remote client are wired together. Command handlers receive the composed
//! [`CliContext`].

use std::sync::Arc;

use anyhow::Result;
use charview_api::{ApiClientConfig, RemoteCatalogClient};
use charview_core::{
    CatalogClientPort, CatalogConfig, CatalogStore, FetchEvents, FetchOrchestrator,
    NoopFetchEvents,
};
use tracing::debug;

use crate::error::CliError;

/// Bootstrap configuration for the CLI.
#[derive(Debug, Clone)]
pub struct CliConfig {
    /// Remote client settings.
    pub api: ApiClientConfig,
    /// Session settings (page size, fan-out cap).
    pub catalog: CatalogConfig,
}

impl CliConfig {
    /// Config from the environment, with an optional `--api-url` override.
    pub fn from_env(api_url: Option<&str>) -> Self {
        let api = ApiClientConfig::from_env();
        let api = match api_url {
            Some(url) => api.with_base_url(url),
            None => api,
        };
        Self {
            api,
            catalog: CatalogConfig::default(),
        }
    }

    #[must_use]
    pub fn with_catalog(mut self, catalog: CatalogConfig) -> Self {
        self.catalog = catalog;
        self
    }
}

/// Fully composed application context for CLI commands.
pub struct CliContext {
    /// The session state.
    pub store: Arc<CatalogStore>,
    /// Fetch orchestrator bound to `store`.
    pub orchestrator: Arc<FetchOrchestrator>,
    /// Remote catalog, for lookups outside the store.
    pub client: Arc<dyn CatalogClientPort>,
    /// Validated session settings.
    pub config: CatalogConfig,
}

impl CliContext {
    pub const fn store(&self) -> &Arc<CatalogStore> {
        &self.store
    }

    pub const fn orchestrator(&self) -> &Arc<FetchOrchestrator> {
        &self.orchestrator
    }

    pub const fn client(&self) -> &Arc<dyn CatalogClientPort> {
        &self.client
    }
}

/// Bootstrap the CLI application against the remote API.
pub fn bootstrap(config: &CliConfig) -> Result<CliContext> {
    let client = RemoteCatalogClient::new(&config.api).map_err(CliError::from)?;
    debug!(base_url = %client.base_url(), "Catalog client ready");
    compose(config.catalog, Arc::new(client), Arc::new(NoopFetchEvents))
}

/// Wire a store and orchestrator around `client`.
///
/// Exposed separately so sessions can run against any catalog port.
pub fn compose(
    catalog: CatalogConfig,
    client: Arc<dyn CatalogClientPort>,
    events: Arc<dyn FetchEvents>,
) -> Result<CliContext> {
    let store = Arc::new(CatalogStore::new(&catalog));
    let orchestrator = Arc::new(
        FetchOrchestrator::new(Arc::clone(&store), Arc::clone(&client), catalog)
            .map_err(CliError::from)?
            .with_events(events),
    );

    Ok(CliContext {
        store,
        orchestrator,
        client,
        config: catalog,
    })
}
