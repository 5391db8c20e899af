//! Bing China search engine implementation.

use std::time::Duration;

use async_trait::async_trait;
use scraper::Html;

use super::{element_text, selector};
use crate::fetcher::{HttpFetcher, DEFAULT_USER_AGENT};
use crate::{BackendResult, Engine, EngineConfig, RawHit, SearchQuery};

/// Bing China search engine (必应中国).
pub struct BingChina {
    config: EngineConfig,
    user_agent: String,
}

impl BingChina {
    /// Creates a new Bing China engine.
    pub fn new() -> Self {
        Self {
            config: EngineConfig::new("Bing China", "bing_cn").with_alias("bing"),
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

impl Default for BingChina {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Engine for BingChina {
    fn config(&self) -> &EngineConfig {
        &self.config
    }

    async fn search(
        &self,
        query: &SearchQuery,
        deadline: Duration,
        proxy: Option<&str>,
    ) -> BackendResult<Vec<RawHit>> {
        let url = search_url(query);

        let fetcher = HttpFetcher::new(&self.user_agent, deadline, proxy)?;
        let html = fetcher.fetch(&url).await?;
        parse_results(&html)
    }
}

fn search_url(query: &SearchQuery) -> String {
    let first = u64::from(query.page.saturating_sub(1)) * 10 + 1;
    format!(
        "https://cn.bing.com/search?q={}&first={}",
        urlencoding::encode(query.text()),
        first
    )
}

fn parse_results(html: &str) -> BackendResult<Vec<RawHit>> {
    let document = Html::parse_document(html);

    let result_selector = selector("li.b_algo")?;
    let title_selector = selector("h2 a")?;
    let snippet_selector = selector(".b_caption p, .b_algoSlug")?;

    let mut results = Vec::new();

    for element in document.select(&result_selector) {
        let Some(title_elem) = element.select(&title_selector).next() else {
            continue;
        };

        let title = element_text(title_elem);
        let url = title_elem.value().attr("href").unwrap_or_default().to_string();

        let content = element
            .select(&snippet_selector)
            .next()
            .map(element_text)
            .unwrap_or_default();

        if !title.is_empty() && url.starts_with("http") {
            results.push(RawHit::new(url, title, content));
        }
    }

    Ok(results)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bing_china_new() {
        let engine = BingChina::new();
        assert_eq!(engine.name(), "Bing China");
        assert_eq!(engine.shortcut(), "bing_cn");
        assert_eq!(engine.config().aliases, vec!["bing"]);
    }

    #[test]
    fn test_search_url_paging() {
        let first = SearchQuery::new("rust").unwrap();
        assert!(search_url(&first).ends_with("&first=1"));
        let third = SearchQuery::new("rust").unwrap().with_page(3);
        assert!(search_url(&third).ends_with("&first=21"));
        let last = SearchQuery::new("rust").unwrap().with_page(u32::MAX);
        assert!(search_url(&last).ends_with("&first=42949672941"));
    }

    #[test]
    fn test_bing_china_with_config() {
        let engine = BingChina::new().with_config(EngineConfig::new("Custom Bing", "cb"));
        assert_eq!(engine.name(), "Custom Bing");
    }

    #[test]
    fn test_bing_china_parse_results_empty() {
        let results = parse_results("<html><body></body></html>").unwrap();
        assert!(results.is_empty());
    }

    #[test]
    fn test_bing_china_parse_results_with_data() {
        let html = r#"
        <html><body><ol id="b_results">
        <li class="b_algo">
            <h2><a href="https://www.rust-lang.org/">Rust Programming Language</a></h2>
            <div class="b_caption"><p>Build reliable and efficient software.</p></div>
        </li>
        <li class="b_algo">
            <h2><a href="/ck/a?relative">Relative link</a></h2>
        </li>
        <li class="b_algo">
            <h2><a href="https://crates.io/">crates.io</a></h2>
            <div class="b_algoSlug">The Rust community's crate registry.</div>
        </li>
        </ol></body></html>
        "#;
        let results = parse_results(html).unwrap();
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].url, "https://www.rust-lang.org/");
        assert_eq!(results[0].content, "Build reliable and efficient software.");
        assert_eq!(results[1].url, "https://crates.io/");
        assert_eq!(results[1].content, "The Rust community's crate registry.");
    }
}
