//! Search engine trait and configuration.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::{BackendResult, RawHit, SearchQuery};

/// Identity of a search engine inside a registry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Display name of the engine.
    pub name: String,
    /// Canonical short identifier (e.g., "ddg" for DuckDuckGo). Used to
    /// attribute results and failures.
    pub shortcut: String,
    /// Additional shortcuts that select the same engine.
    #[serde(default)]
    pub aliases: Vec<String>,
}

impl EngineConfig {
    /// Creates a config with a display name and canonical shortcut.
    pub fn new(name: impl Into<String>, shortcut: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            shortcut: shortcut.into(),
            aliases: Vec::new(),
        }
    }

    /// Adds an alias shortcut.
    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.aliases.push(alias.into());
        self
    }

    /// Returns the canonical shortcut followed by every alias.
    pub fn shortcuts(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.shortcut.as_str()).chain(self.aliases.iter().map(String::as_str))
    }
}

/// The capability every search backend exposes.
///
/// A backend takes a query, the deadline its unit of work runs under and an
/// optional proxy URL, and returns its hits in its own ranking order. How it
/// fetches and parses a provider's page is its own business. A backend that
/// cannot honor the proxy must fail instead of ignoring it.
#[async_trait]
pub trait Engine: Send + Sync {
    /// Returns the engine configuration.
    fn config(&self) -> &EngineConfig;

    /// Performs a search and returns hits in provider order.
    async fn search(
        &self,
        query: &SearchQuery,
        deadline: Duration,
        proxy: Option<&str>,
    ) -> BackendResult<Vec<RawHit>>;

    /// Returns the engine name.
    fn name(&self) -> &str {
        &self.config().name
    }

    /// Returns the canonical shortcut.
    fn shortcut(&self) -> &str {
        &self.config().shortcut
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_engine_config_new() {
        let config = EngineConfig::new("DuckDuckGo", "ddg");
        assert_eq!(config.name, "DuckDuckGo");
        assert_eq!(config.shortcut, "ddg");
        assert!(config.aliases.is_empty());
    }

    #[test]
    fn test_engine_config_default() {
        let config = EngineConfig::default();
        assert_eq!(config.name, "");
        assert_eq!(config.shortcut, "");
        assert!(config.aliases.is_empty());
    }

    #[test]
    fn test_engine_config_shortcuts() {
        let config = EngineConfig::new("360 Search", "360").with_alias("so360");
        let shortcuts: Vec<_> = config.shortcuts().collect();
        assert_eq!(shortcuts, vec!["360", "so360"]);
    }

    #[test]
    fn test_engine_config_serialization() {
        let config = EngineConfig::new("Test", "t").with_alias("tt");
        let json = serde_json::to_string(&config).unwrap();
        assert!(json.contains("\"name\":\"Test\""));
        assert!(json.contains("\"shortcut\":\"t\""));
        assert!(json.contains("\"aliases\":[\"tt\"]"));
    }

    #[test]
    fn test_engine_config_deserialization_default_aliases() {
        let json = r#"{"name":"Test","shortcut":"t"}"#;
        let config: EngineConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.name, "Test");
        assert!(config.aliases.is_empty());
    }
}
