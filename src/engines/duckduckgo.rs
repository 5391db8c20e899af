//! DuckDuckGo search engine implementation.

use std::time::Duration;

use async_trait::async_trait;
use scraper::Html;

use super::{element_text, selector};
use crate::fetcher::{HttpFetcher, DEFAULT_USER_AGENT};
use crate::query::SafeSearch;
use crate::{BackendResult, Engine, EngineConfig, RawHit, SearchQuery};

/// DuckDuckGo search engine, via its HTML-only endpoint.
pub struct DuckDuckGo {
    config: EngineConfig,
    user_agent: String,
}

impl DuckDuckGo {
    /// Creates a new DuckDuckGo engine.
    pub fn new() -> Self {
        Self {
            config: EngineConfig::new("DuckDuckGo", "ddg").with_alias("duckduckgo"),
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

impl Default for DuckDuckGo {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Engine for DuckDuckGo {
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
    let mut url = format!(
        "https://html.duckduckgo.com/html/?q={}",
        urlencoding::encode(query.text())
    );
    // kp: 1 = strict, -1 = moderate, -2 = off
    let kp = match query.safesearch {
        SafeSearch::Strict => "1",
        SafeSearch::Moderate => "-1",
        SafeSearch::Off => "-2",
    };
    url.push_str("&kp=");
    url.push_str(kp);
    if let Some(ref language) = query.language {
        url.push_str("&kl=");
        url.push_str(&urlencoding::encode(language));
    }
    url
}

fn parse_results(html: &str) -> BackendResult<Vec<RawHit>> {
    let document = Html::parse_document(html);
    let result_selector = selector(".result")?;
    let title_selector = selector(".result__title a")?;
    let snippet_selector = selector(".result__snippet")?;

    let mut results = Vec::new();

    for element in document.select(&result_selector) {
        let Some(title_elem) = element.select(&title_selector).next() else {
            continue;
        };

        let title = element_text(title_elem);
        let href = title_elem.value().attr("href").unwrap_or_default();
        let url = if href.starts_with("//duckduckgo.com/l/") {
            extract_redirect_url(href).unwrap_or_else(|| href.to_string())
        } else {
            href.to_string()
        };

        let content = element
            .select(&snippet_selector)
            .next()
            .map(element_text)
            .unwrap_or_default();

        if !url.is_empty() && !title.is_empty() {
            results.push(RawHit::new(url, title, content));
        }
    }

    Ok(results)
}

fn extract_redirect_url(url: &str) -> Option<String> {
    let url = url.trim_start_matches("//duckduckgo.com/l/?uddg=");
    let end = url.find('&').unwrap_or(url.len());
    let decoded = urlencoding::decode(&url[..end]).ok()?;
    Some(decoded.into_owned())
}
