//! 360 Search engine implementation.

use std::time::Duration;

use async_trait::async_trait;
use scraper::Html;

use super::{element_text, selector};
use crate::fetcher::{HttpFetcher, DEFAULT_USER_AGENT};
use crate::{BackendResult, Engine, EngineConfig, RawHit, SearchQuery};

/// 360 Search engine (360搜索).
pub struct So360 {
    config: EngineConfig,
    user_agent: String,
}

impl So360 {
    /// Creates a new 360 Search engine.
    pub fn new() -> Self {
        Self {
            config: EngineConfig::new("360 Search", "360").with_alias("so360"),
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

impl Default for So360 {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Engine for So360 {
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
            "https://www.so.com/s?q={}&pn={}",
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

    let result_selector = selector("li.res-list")?;
    let title_selector = selector("h3 a")?;
    let snippet_selector = selector(".res-desc, .res-rich")?;

    let mut results = Vec::new();

    for element in document.select(&result_selector) {
        let Some(title_elem) = element.select(&title_selector).next() else {
            continue;
        };

        let title = element_text(title_elem);

        // 360 Search stores the real URL in data-mdurl, falling back to href
        let url = title_elem
            .value()
            .attr("data-mdurl")
            .or_else(|| title_elem.value().attr("href"))
            .unwrap_or_default()
            .to_string();

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
