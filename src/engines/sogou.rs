//! Sogou search engine implementation.

use std::time::Duration;

use async_trait::async_trait;
use scraper::Html;

use super::{element_text, selector};
use crate::fetcher::{HttpFetcher, DEFAULT_USER_AGENT};
use crate::{BackendResult, Engine, EngineConfig, RawHit, SearchQuery};

const BASE_URL: &str = "https://www.sogou.com";

/// Sogou search engine (搜狗).
pub struct Sogou {
    config: EngineConfig,
    user_agent: String,
}

impl Sogou {
    /// Creates a new Sogou engine.
    pub fn new() -> Self {
        Self {
            config: EngineConfig::new("Sogou", "sogou"),
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

impl Default for Sogou {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Engine for Sogou {
    fn config(&self) -> &EngineConfig {
        &self.config
    }

    async fn search(
        &self,
        query: &SearchQuery,
        deadline: Duration,
        proxy: Option<&str>,
    ) -> BackendResult<Vec<RawHit>> {
        let url = format!(
            "{}/web?query={}&page={}",
            BASE_URL,
            urlencoding::encode(query.text()),
            query.page
        );

        let fetcher = HttpFetcher::new(&self.user_agent, deadline, proxy)?;
        let html = fetcher.fetch(&url).await?;
        parse_results(&html)
    }
}

fn parse_results(html: &str) -> BackendResult<Vec<RawHit>> {
    let document = Html::parse_document(html);

    let result_selector = selector("div.vrwrap, div.rb")?;
    let title_selector = selector("h3 a, .vr-title a")?;
    let snippet_selector = selector(".str-text, .str_info, .space-txt")?;

    let mut results = Vec::new();

    for element in document.select(&result_selector) {
        let Some(title_elem) = element.select(&title_selector).next() else {
            continue;
        };

        let title = element_text(title_elem);
        let href = title_elem.value().attr("href").unwrap_or_default();
        // Result links are site-relative redirects.
        let url = if href.starts_with('/') {
            format!("{}{}", BASE_URL, href)
        } else {
            href.to_string()
        };

        let content = element
            .select(&snippet_selector)
            .next()
            .map(element_text)
            .unwrap_or_default();

        if !href.is_empty() && !title.is_empty() {
            results.push(RawHit::new(url, title, content));
        }
    }

    Ok(results)
}
