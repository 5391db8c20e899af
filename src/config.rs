//! Search configuration.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::fetcher::DEFAULT_USER_AGENT;
use crate::{Result, SearchError};

/// Process-level settings for the built-in engines and request defaults.
///
/// Every field has a default, so a partial JSON document is enough.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SearchConfig {
    /// Shortcuts used when a request does not name any engines.
    pub default_engines: Vec<String>,
    /// Per-engine timeout in seconds.
    pub timeout_secs: u64,
    /// User agent sent by the built-in engines.
    pub user_agent: String,
    /// Wikipedia language edition used when a query carries no language hint.
    pub wikipedia_language: String,
    /// Proxy applied to every request unless the request names its own.
    pub proxy: Option<String>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            default_engines: vec!["ddg".to_string(), "wiki".to_string()],
            timeout_secs: 10,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            wikipedia_language: "en".to_string(),
            proxy: None,
        }
    }
}

impl SearchConfig {
    /// Parses a configuration from a JSON string.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| SearchError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Loads a configuration from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Config`] if the file cannot be read, parsed or
    /// fails validation.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| SearchError::Config(format!("{}: {}", path.display(), e)))?;
        Self::from_json(&content)
    }

    /// Checks the values serde cannot.
    pub fn validate(&self) -> Result<()> {
        if self.timeout_secs == 0 {
            return Err(SearchError::Config(
                "timeout_secs must be greater than 0".to_string(),
            ));
        }
        if self.default_engines.is_empty() {
            return Err(SearchError::Config(
                "default_engines cannot be empty".to_string(),
            ));
        }
        if self.user_agent.trim().is_empty() {
            return Err(SearchError::Config("user_agent cannot be empty".to_string()));
        }
        Ok(())
    }

    /// The per-engine timeout as a [`Duration`].
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}
