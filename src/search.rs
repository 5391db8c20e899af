//! Search orchestration.

use std::sync::Arc;
use std::time::Instant;

use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::dispatcher::dispatch;
use crate::response::assemble;
use crate::{
    Aggregator, EngineFailure, EngineRegistry, Result, SearchOptions, SearchQuery, SearchResponse,
};

/// Meta search engine that fans a query out to registered engines.
///
/// Cloning is cheap; clones share the registry.
#[derive(Debug, Clone)]
pub struct Search {
    registry: Arc<EngineRegistry>,
}

impl Search {
    /// Creates a search over the process-wide built-in registry.
    pub fn new() -> Self {
        Self::with_registry(EngineRegistry::global())
    }

    /// Creates a search over a custom registry.
    pub fn with_registry(registry: Arc<EngineRegistry>) -> Self {
        Self { registry }
    }

    /// Returns the registry.
    pub fn registry(&self) -> &EngineRegistry {
        &self.registry
    }

    /// Performs a search across the selected engines.
    ///
    /// Fails only on an invalid request; engine failures are reported in
    /// [`SearchResponse::errors`].
    pub async fn search(&self, query: &str, options: SearchOptions) -> Result<SearchResponse> {
        self.search_with_cancel(query, options, &CancellationToken::new())
            .await
    }

    /// Same as [`Search::search`], but stops early with
    /// [`crate::SearchError::Cancelled`] once `cancel` fires.
    pub async fn search_with_cancel(
        &self,
        query: &str,
        options: SearchOptions,
        cancel: &CancellationToken,
    ) -> Result<SearchResponse> {
        let query = SearchQuery::new(query)?;
        self.run(&query, options, cancel).await
    }

    /// Searches with a prepared query carrying language, safesearch or page hints.
    pub async fn search_query(
        &self,
        query: &SearchQuery,
        options: SearchOptions,
        cancel: &CancellationToken,
    ) -> Result<SearchResponse> {
        self.run(query, options, cancel).await
    }

    async fn run(
        &self,
        query: &SearchQuery,
        options: SearchOptions,
        cancel: &CancellationToken,
    ) -> Result<SearchResponse> {
        options.validate()?;
        let engines = self.registry.resolve(options.engines.as_deref())?;

        let start = Instant::now();
        debug!("Searching {} engines", engines.len());

        let outcomes = dispatch(
            query,
            &engines,
            options.timeout,
            options.proxy.as_deref(),
            cancel,
        )
        .await?;

        let failures: Vec<EngineFailure> = outcomes
            .iter()
            .filter_map(|o| o.result.as_ref().err().cloned())
            .collect();
        let results = Aggregator::new()
            .with_limit(options.limit)
            .aggregate(outcomes);

        Ok(assemble(results, failures, start))
    }
}

impl Default for Search {
    fn default() -> Self {
        Self::new()
    }
}
