//! Engine registry and shortcut resolution.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, OnceLock};

use crate::engines::{BingChina, Brave, DuckDuckGo, So360, Sogou, Wikipedia};
use crate::{Engine, EngineConfig, Result, SearchConfig, SearchError};

/// A registered engine: its identity plus the backend that serves it.
#[derive(Clone)]
pub struct EngineSpec {
    engine: Arc<dyn Engine>,
}

impl EngineSpec {
    /// Wraps a backend.
    pub fn new(engine: Arc<dyn Engine>) -> Self {
        Self { engine }
    }

    /// Returns the engine configuration.
    pub fn config(&self) -> &EngineConfig {
        self.engine.config()
    }

    /// Returns the display name.
    pub fn name(&self) -> &str {
        self.engine.name()
    }

    /// Returns the canonical shortcut, used for attribution.
    pub fn shortcut(&self) -> &str {
        self.engine.shortcut()
    }

    /// Returns the backend.
    pub fn engine(&self) -> &Arc<dyn Engine> {
        &self.engine
    }
}

impl fmt::Debug for EngineSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EngineSpec")
            .field("config", self.config())
            .finish()
    }
}

/// Immutable table of engines keyed by every shortcut they answer to.
///
/// Lookups are ASCII case-insensitive. Once built, a registry never changes,
/// so it can be shared across concurrent searches without locking.
#[derive(Debug)]
pub struct EngineRegistry {
    specs: Vec<EngineSpec>,
    index: HashMap<String, usize>,
    defaults: Vec<usize>,
}

/// Builder for [`EngineRegistry`].
#[derive(Default)]
pub struct EngineRegistryBuilder {
    engines: Vec<Arc<dyn Engine>>,
    defaults: Option<Vec<String>>,
}

impl EngineRegistryBuilder {
    /// Registers an engine.
    pub fn register<E: Engine + 'static>(self, engine: E) -> Self {
        self.register_arc(Arc::new(engine))
    }

    /// Registers an engine that is already shared.
    pub fn register_arc(mut self, engine: Arc<dyn Engine>) -> Self {
        self.engines.push(engine);
        self
    }

    /// Sets the shortcuts used when a request names no engines.
    ///
    /// Without this every registered engine is a default.
    pub fn with_defaults<I, S>(mut self, shortcuts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.defaults = Some(shortcuts.into_iter().map(Into::into).collect());
        self
    }

    /// Builds the registry.
    ///
    /// # Errors
    ///
    /// [`SearchError::DuplicateShortcut`] if two engines claim the same
    /// shortcut, [`SearchError::Config`] if a default names no engine.
    pub fn build(self) -> Result<EngineRegistry> {
        let (registry, problems) = assemble(self.engines, self.defaults);
        match problems.into_iter().next() {
            Some(problem) => Err(problem),
            None => Ok(registry),
        }
    }
}

impl EngineRegistry {
    /// Starts an empty registry.
    pub fn builder() -> EngineRegistryBuilder {
        EngineRegistryBuilder::default()
    }

    /// The built-in engines with default settings.
    pub fn builtin() -> Self {
        let config = SearchConfig::default();
        let (registry, problems) = assemble(
            builtin_engines(&config),
            Some(config.default_engines.clone()),
        );
        debug_assert!(problems.is_empty(), "invalid built-in registry: {:?}", problems);
        registry
    }

    /// The built-in engines configured from `config`.
    pub fn from_config(config: &SearchConfig) -> Result<Self> {
        config.validate()?;
        builtin_engines(config)
            .into_iter()
            .fold(Self::builder(), EngineRegistryBuilder::register_arc)
            .with_defaults(config.default_engines.iter().cloned())
            .build()
    }

    /// The process-wide built-in registry, built on first use.
    pub fn global() -> Arc<EngineRegistry> {
        static GLOBAL: OnceLock<Arc<EngineRegistry>> = OnceLock::new();
        Arc::clone(GLOBAL.get_or_init(|| Arc::new(Self::builtin())))
    }

    /// Every registered engine in registration order.
    pub fn engines(&self) -> &[EngineSpec] {
        &self.specs
    }

    /// Returns the engine a shortcut selects, if any.
    pub fn get(&self, shortcut: &str) -> Option<&EngineSpec> {
        self.lookup(shortcut).map(|i| &self.specs[i])
    }

    /// Returns whether the engine with this canonical shortcut is a default.
    pub fn is_default(&self, shortcut: &str) -> bool {
        self.lookup(shortcut)
            .is_some_and(|i| self.defaults.contains(&i))
    }

    /// Resolves requested shortcuts to the engines to dispatch.
    ///
    /// `None` selects the defaults. The result keeps first-mention order and
    /// holds each engine once, however many of its shortcuts were named.
    ///
    /// # Errors
    ///
    /// [`SearchError::InvalidRequest`] if the list is empty or names an
    /// unknown shortcut. The message quotes the shortcut as given.
    pub fn resolve(&self, shortcuts: Option<&[String]>) -> Result<Vec<EngineSpec>> {
        let Some(shortcuts) = shortcuts else {
            return Ok(self.pick(&self.defaults));
        };

        if shortcuts.is_empty() {
            return Err(SearchError::invalid("no engines specified"));
        }

        let mut picked = Vec::with_capacity(shortcuts.len());
        for shortcut in shortcuts {
            let i = self.lookup(shortcut).ok_or_else(|| {
                SearchError::invalid(format!("unknown engine shortcut '{}'", shortcut))
            })?;
            if !picked.contains(&i) {
                picked.push(i);
            }
        }

        Ok(self.pick(&picked))
    }

    fn lookup(&self, shortcut: &str) -> Option<usize> {
        self.index.get(&shortcut.to_ascii_lowercase()).copied()
    }

    fn pick(&self, indices: &[usize]) -> Vec<EngineSpec> {
        indices.iter().map(|&i| self.specs[i].clone()).collect()
    }
}

fn builtin_engines(config: &SearchConfig) -> Vec<Arc<dyn Engine>> {
    let ua = config.user_agent.as_str();
    vec![
        Arc::new(DuckDuckGo::new().with_user_agent(ua)),
        Arc::new(
            Wikipedia::new()
                .with_user_agent(ua)
                .with_language(config.wikipedia_language.as_str()),
        ),
        Arc::new(Brave::new().with_user_agent(ua)),
        Arc::new(Sogou::new().with_user_agent(ua)),
        Arc::new(So360::new().with_user_agent(ua)),
        Arc::new(BingChina::new().with_user_agent(ua)),
    ]
}

/// Indexes `engines`, collecting every conflict instead of stopping at the first.
fn assemble(
    engines: Vec<Arc<dyn Engine>>,
    defaults: Option<Vec<String>>,
) -> (EngineRegistry, Vec<SearchError>) {
    let mut problems = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();
    let specs: Vec<EngineSpec> = engines.into_iter().map(EngineSpec::new).collect();

    for (i, spec) in specs.iter().enumerate() {
        for shortcut in spec.config().shortcuts() {
            match index.get(&shortcut.to_ascii_lowercase()) {
                Some(&existing) if existing != i => {
                    problems.push(SearchError::DuplicateShortcut {
                        shortcut: shortcut.to_string(),
                        first: specs[existing].name().to_string(),
                        second: spec.name().to_string(),
                    });
                }
                Some(_) => {}
                None => {
                    index.insert(shortcut.to_ascii_lowercase(), i);
                }
            }
        }
    }

    let mut registry = EngineRegistry {
        specs,
        index,
        defaults: Vec::new(),
    };

    registry.defaults = match defaults {
        None => (0..registry.specs.len()).collect(),
        Some(shortcuts) => {
            let mut picked = Vec::new();
            for shortcut in shortcuts {
                match registry.lookup(&shortcut) {
                    Some(i) if !picked.contains(&i) => picked.push(i),
                    Some(_) => {}
                    None => problems.push(SearchError::Config(format!(
                        "default engine '{}' is not registered",
                        shortcut
                    ))),
                }
            }
            picked
        }
    };

    (registry, problems)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{BackendResult, RawHit, SearchQuery};
    use async_trait::async_trait;
    use std::time::Duration;

    struct StubEngine {
        config: EngineConfig,
    }

    impl StubEngine {
        fn new(name: &str, shortcut: &str, aliases: &[&str]) -> Self {
            let config = aliases
                .iter()
                .fold(EngineConfig::new(name, shortcut), |c, a| c.with_alias(*a));
            Self { config }
        }
    }

    #[async_trait]
    impl Engine for StubEngine {
        fn config(&self) -> &EngineConfig {
            &self.config
        }

        async fn search(
            &self,
            _query: &SearchQuery,
            _deadline: Duration,
            _proxy: Option<&str>,
        ) -> BackendResult<Vec<RawHit>> {
            Ok(vec![])
        }
    }

    fn registry() -> EngineRegistry {
        EngineRegistry::builder()
            .register(StubEngine::new("DuckDuckGo", "ddg", &["duckduckgo"]))
            .register(StubEngine::new("Wikipedia", "wiki", &["wikipedia"]))
            .register(StubEngine::new("360 Search", "360", &["so360"]))
            .with_defaults(["ddg", "wiki"])
            .build()
            .unwrap()
    }

    fn shortcuts(specs: &[EngineSpec]) -> Vec<&str> {
        specs.iter().map(EngineSpec::shortcut).collect()
    }

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_resolve_defaults_when_absent() {
        let resolved = registry().resolve(None).unwrap();
        assert_eq!(shortcuts(&resolved), vec!["ddg", "wiki"]);
    }

    #[test]
    fn test_resolve_empty_list_is_invalid() {
        let err = registry().resolve(Some(&[])).unwrap_err();
        assert!(matches!(err, SearchError::InvalidRequest(ref m) if m == "no engines specified"));
    }

    #[test]
    fn test_resolve_unknown_names_shortcut_verbatim() {
        let requested = strings(&["ddg", "NoSuchEngine"]);
        let err = registry().resolve(Some(&requested)).unwrap_err();
        assert!(matches!(err, SearchError::InvalidRequest(ref m) if m.contains("NoSuchEngine")));
    }

    #[test]
    fn test_resolve_aliases_are_equivalent() {
        let reg = registry();
        let by_short = reg.resolve(Some(&strings(&["ddg"]))).unwrap();
        let by_alias = reg.resolve(Some(&strings(&["duckduckgo"]))).unwrap();
        assert_eq!(shortcuts(&by_short), shortcuts(&by_alias));
    }

    #[test]
    fn test_resolve_deduplicates_aliases() {
        let resolved = registry()
            .resolve(Some(&strings(&["360", "so360", "wiki", "360"])))
            .unwrap();
        assert_eq!(shortcuts(&resolved), vec!["360", "wiki"]);
    }

    #[test]
    fn test_resolve_is_case_insensitive() {
        let resolved = registry().resolve(Some(&strings(&["DDG", "WikiPedia"]))).unwrap();
        assert_eq!(shortcuts(&resolved), vec!["ddg", "wiki"]);
    }

    #[test]
    fn test_resolve_is_idempotent() {
        let reg = registry();
        let requested = strings(&["wiki", "ddg"]);
        let first = reg.resolve(Some(&requested)).unwrap();
        let second = reg.resolve(Some(&requested)).unwrap();
        assert_eq!(shortcuts(&first), shortcuts(&second));
    }

    #[test]
    fn test_build_rejects_duplicate_shortcut() {
        let err = EngineRegistry::builder()
            .register(StubEngine::new("Bing", "bing", &[]))
            .register(StubEngine::new("Bing China", "bing_cn", &["BING"]))
            .build()
            .unwrap_err();
        match err {
            SearchError::DuplicateShortcut {
                shortcut,
                first,
                second,
            } => {
                assert_eq!(shortcut, "BING");
                assert_eq!(first, "Bing");
                assert_eq!(second, "Bing China");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_build_rejects_unknown_default() {
        let err = EngineRegistry::builder()
            .register(StubEngine::new("Wikipedia", "wiki", &[]))
            .with_defaults(["ddg"])
            .build()
            .unwrap_err();
        assert!(matches!(err, SearchError::Config(ref m) if m.contains("'ddg'")));
    }

    #[test]
    fn test_build_without_defaults_uses_all() {
        let reg = EngineRegistry::builder()
            .register(StubEngine::new("A", "a", &[]))
            .register(StubEngine::new("B", "b", &[]))
            .build()
            .unwrap();
        assert_eq!(shortcuts(&reg.resolve(None).unwrap()), vec!["a", "b"]);
    }

    #[test]
    fn test_get_and_is_default() {
        let reg = registry();
        assert_eq!(reg.get("so360").map(EngineSpec::name), Some("360 Search"));
        assert!(reg.get("google").is_none());
        assert!(reg.is_default("ddg"));
        assert!(!reg.is_default("360"));
    }

    #[test]
    fn test_builtin_registry() {
        let reg = EngineRegistry::builtin();
        assert_eq!(
            shortcuts(reg.engines()),
            vec!["ddg", "wiki", "brave", "sogou", "360", "bing_cn"]
        );
        for alias in ["duckduckgo", "wikipedia", "so360", "bing"] {
            assert!(reg.get(alias).is_some(), "missing alias {alias}");
        }
        assert_eq!(shortcuts(&reg.resolve(None).unwrap()), vec!["ddg", "wiki"]);
    }

    #[test]
    fn test_from_config_uses_configured_defaults() {
        let config = SearchConfig {
            default_engines: vec!["bing".to_string(), "sogou".to_string()],
            ..Default::default()
        };
        let reg = EngineRegistry::from_config(&config).unwrap();
        assert_eq!(shortcuts(&reg.resolve(None).unwrap()), vec!["bing_cn", "sogou"]);
    }

    #[test]
    fn test_from_config_rejects_unknown_default() {
        let config = SearchConfig {
            default_engines: vec!["google".to_string()],
            ..Default::default()
        };
        assert!(matches!(
            EngineRegistry::from_config(&config),
            Err(SearchError::Config(_))
        ));
    }

    #[test]
    fn test_global_is_shared() {
        let a = EngineRegistry::global();
        let b = EngineRegistry::global();
        assert!(Arc::ptr_eq(&a, &b));
    }
}
