//! Per-request search options.

use std::time::Duration;

use crate::{Result, SearchConfig, SearchError};

/// Default per-engine timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Options for a single search call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchOptions {
    /// Engine shortcuts to query. `None` selects the registry defaults.
    pub engines: Option<Vec<String>>,
    /// Maximum number of results to return. `None` returns all of them.
    pub limit: Option<usize>,
    /// Timeout for each engine, measured from that engine's own start.
    pub timeout: Duration,
    /// Proxy URL passed to every engine call.
    pub proxy: Option<String>,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            engines: None,
            limit: None,
            timeout: DEFAULT_TIMEOUT,
            proxy: None,
        }
    }
}

impl SearchOptions {
    /// Creates options with every default.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds timeout and proxy from a configuration.
    pub fn from_config(config: &SearchConfig) -> Self {
        Self {
            timeout: config.timeout(),
            proxy: config.proxy.clone(),
            ..Self::default()
        }
    }

    /// Selects engines by shortcut.
    pub fn with_engines<I, S>(mut self, engines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.engines = Some(engines.into_iter().map(Into::into).collect());
        self
    }

    /// Sets the result limit.
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Sets the per-engine timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets the proxy URL.
    pub fn with_proxy(mut self, proxy: impl Into<String>) -> Self {
        self.proxy = Some(proxy.into());
        self
    }

    pub(crate) fn validate(&self) -> Result<()> {
        if self.limit == Some(0) {
            return Err(SearchError::invalid("limit must be greater than 0"));
        }
        if self.timeout.is_zero() {
            return Err(SearchError::invalid("timeout must be greater than 0"));
        }
        Ok(())
    }
}
