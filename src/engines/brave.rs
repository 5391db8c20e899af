//! Brave search engine implementation.

use std::time::Duration;

use async_trait::async_trait;
use scraper::Html;

use super::{element_text, selector};
use crate::fetcher::{HttpFetcher, DEFAULT_USER_AGENT};
use crate::query::SafeSearch;
use crate::{BackendResult, Engine, EngineConfig, RawHit, SearchQuery};

/// Brave search engine.
pub struct Brave {
    config: EngineConfig,
    user_agent: String,
}

impl Brave {
    /// Creates a new Brave engine.
    pub fn new() -> Self {
        Self {
            config: EngineConfig::new("Brave", "brave"),
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }

    /// Sets the user agent sent with every request.
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Creates with custom configuration.
    pub fn with_config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }
}

impl Default for Brave {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Engine for Brave {
    fn config(&self) -> &EngineConfig {
        &self.config
    }

    async fn search(
        &self,
        query: &SearchQuery,
        deadline: Duration,
        proxy: Option<&str>,
    ) -> BackendResult<Vec<RawHit>> {
        let fetcher = HttpFetcher::new(&self.user_agent, deadline, proxy)?;
        let html = fetcher.fetch(&search_url(query)).await?;
        parse_results(&html)
    }
}

fn search_url(query: &SearchQuery) -> String {
    let safesearch = match query.safesearch {
        SafeSearch::Off => "off",
        SafeSearch::Moderate => "moderate",
        SafeSearch::Strict => "strict",
    };
    let mut url = format!(
        "https://search.brave.com/search?q={}&safesearch={}",
        urlencoding::encode(query.text()),
        safesearch
    );
    if query.page > 1 {
        url.push_str(&format!("&offset={}", query.page - 1));
    }
    url
}

fn parse_results(html: &str) -> BackendResult<Vec<RawHit>> {
    let document = Html::parse_document(html);

    let result_selector = selector(r#"div.snippet[data-type="web"]"#)?;
    let title_selector = selector(".search-snippet-title")?;
    let desc_selector = selector(".generic-snippet .content, .snippet-description")?;
    let url_selector = selector(r#"a[href^="http"]"#)?;

    let mut results = Vec::new();

    for element in document.select(&result_selector) {
        let title = element
            .select(&title_selector)
            .next()
            .map(element_text)
            .unwrap_or_default();

        let url = element
            .select(&url_selector)
            .next()
            .and_then(|e| e.value().attr("href"))
            .unwrap_or_default()
            .to_string();

        let content = element
            .select(&desc_selector)
            .next()
            .map(element_text)
            .unwrap_or_default();

        if !url.is_empty() && !title.is_empty() {
            results.push(RawHit::new(url, title, content));
        }
    }

    Ok(results)
}
