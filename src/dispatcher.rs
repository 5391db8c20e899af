//! Concurrent fan-out of one query to every selected engine.

use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Duration;

use futures::FutureExt;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::{BackendError, EngineFailure, EngineSpec, RawHit, Result, SearchError, SearchQuery};

/// What one engine produced.
#[derive(Debug, Clone, PartialEq)]
pub struct EngineOutcome {
    /// Canonical shortcut of the engine.
    pub engine: String,
    /// Ranked hits, or the reason there are none.
    pub result: std::result::Result<Vec<RawHit>, EngineFailure>,
}

/// Runs `query` against every engine in parallel and waits for all of them.
///
/// Each engine runs as its own task under `timeout`, counted from the
/// moment that task starts. Outcomes come back in completion order with
/// every hit's `rank` set to its position in the engine's list. Engine
/// errors, timeouts and panics become [`EngineFailure`]s.
///
/// Returns [`SearchError::Cancelled`] if `cancel` fires first; all running
/// tasks are aborted. Dropping the returned future aborts them as well.
pub async fn dispatch(
    query: &SearchQuery,
    engines: &[EngineSpec],
    timeout: Duration,
    proxy: Option<&str>,
    cancel: &CancellationToken,
) -> Result<Vec<EngineOutcome>> {
    if cancel.is_cancelled() {
        return Err(SearchError::Cancelled);
    }

    let query = Arc::new(query.clone());
    let proxy: Option<Arc<str>> = proxy.map(Arc::from);
    let names: Vec<String> = engines.iter().map(|e| e.shortcut().to_string()).collect();

    debug!(
        "Dispatching query '{}' to {} engines",
        query.text(),
        engines.len()
    );

    let mut units = JoinSet::new();
    for (index, spec) in engines.iter().enumerate() {
        let engine = Arc::clone(spec.engine());
        let query = Arc::clone(&query);
        let proxy = proxy.clone();

        units.spawn(async move {
            let search = tokio::time::timeout(timeout, engine.search(&query, timeout, proxy.as_deref()));
            let result = match AssertUnwindSafe(search).catch_unwind().await {
                Ok(Ok(result)) => result,
                Ok(Err(_elapsed)) => Err(BackendError::Timeout(timeout)),
                Err(_panic) => Err(BackendError::Other("engine task panicked".to_string())),
            };
            (index, result)
        });
    }

    let mut outcomes = Vec::with_capacity(engines.len());
    loop {
        let joined = tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                warn!("Search cancelled with {} engines still running", units.len());
                units.abort_all();
                return Err(SearchError::Cancelled);
            }
            joined = units.join_next() => joined,
        };

        let Some(joined) = joined else { break };
        let (index, result) = match joined {
            Ok(unit) => unit,
            Err(e) => {
                // Only reachable if the runtime is shutting down.
                warn!("Engine task aborted: {}", e);
                continue;
            }
        };

        let engine = names[index].clone();
        let result = match result {
            Ok(hits) => {
                debug!("Engine {} returned {} results", engine, hits.len());
                Ok(ranked(hits))
            }
            Err(e) => {
                warn!(engine = %engine, error = %e, "Engine failed");
                Err(EngineFailure::new(&engine, e.to_string()))
            }
        };
        outcomes.push(EngineOutcome { engine, result });
    }

    Ok(outcomes)
}

fn ranked(hits: Vec<RawHit>) -> Vec<RawHit> {
    hits.into_iter()
        .enumerate()
        .map(|(rank, mut hit)| {
            hit.rank = rank;
            hit
        })
        .collect()
}
