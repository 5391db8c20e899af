//! Wikipedia search engine implementation.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;

use crate::fetcher::{HttpFetcher, DEFAULT_USER_AGENT};
use crate::{BackendResult, Engine, EngineConfig, RawHit, ResultType, SearchQuery};

/// Wikipedia search engine using the MediaWiki API.
pub struct Wikipedia {
    config: EngineConfig,
    user_agent: String,
    language: String,
}

impl Wikipedia {
    /// Creates a new Wikipedia engine.
    pub fn new() -> Self {
        Self {
            config: EngineConfig::new("Wikipedia", "wiki").with_alias("wikipedia"),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            language: "en".to_string(),
        }
    }

    /// Sets the Wikipedia language.
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
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

    /// The wiki language used for `query`: its language hint's primary
    /// subtag if that is a plain alphanumeric subtag, the configured
    /// language otherwise.
    ///
    /// The subtag becomes part of the request host, so anything else is
    /// ignored.
    fn language_for<'a>(&'a self, query: &'a SearchQuery) -> &'a str {
        query
            .language
            .as_deref()
            .and_then(|l| l.split(['-', '_']).next())
            .filter(|l| is_language_subtag(l))
            .unwrap_or(&self.language)
    }
}

impl Default for Wikipedia {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Deserialize)]
struct WikiResponse {
    query: Option<WikiQuery>,
}

#[derive(Deserialize)]
struct WikiQuery {
    search: Vec<WikiSearchResult>,
}

#[derive(Deserialize)]
struct WikiSearchResult {
    title: String,
    snippet: String,
    timestamp: Option<String>,
}

#[async_trait]
impl Engine for Wikipedia {
    fn config(&self) -> &EngineConfig {
        &self.config
    }

    async fn search(
        &self,
        query: &SearchQuery,
        deadline: Duration,
        proxy: Option<&str>,
    ) -> BackendResult<Vec<RawHit>> {
        let language = self.language_for(query);
        let offset = page_offset(query.page);
        let url = format!(
            "https://{}.wikipedia.org/w/api.php?action=query&list=search&srsearch={}&format=json&srlimit=10&sroffset={}",
            language,
            urlencoding::encode(query.text()),
            offset
        );

        let fetcher = HttpFetcher::new(&self.user_agent, deadline, proxy)?;
        let response: WikiResponse = fetcher.fetch_json(&url).await?;

        Ok(into_hits(response, language))
    }
}

fn is_language_subtag(tag: &str) -> bool {
    !tag.is_empty() && tag.len() <= 12 && tag.bytes().all(|b| b.is_ascii_alphanumeric())
}

fn page_offset(page: u32) -> u64 {
    u64::from(page.saturating_sub(1)) * 10
}

fn into_hits(response: WikiResponse, language: &str) -> Vec<RawHit> {
    response
        .query
        .map(|q| {
            q.search
                .into_iter()
                .map(|item| {
                    let url = format!(
                        "https://{}.wikipedia.org/wiki/{}",
                        language,
                        urlencoding::encode(&item.title.replace(' ', "_"))
                    );
                    let content = strip_html_tags(&item.snippet);
                    let hit = RawHit::new(url, item.title, content).with_type(ResultType::Web);
                    match item.timestamp {
                        Some(ts) => hit.with_published_date(ts),
                        None => hit,
                    }
                })
                .collect()
        })
        .unwrap_or_default()
}

fn strip_html_tags(html: &str) -> String {
    let mut result = String::new();
    let mut in_tag = false;

    for c in html.chars() {
        match c {
            '<' => in_tag = true,
            '>' => in_tag = false,
            _ if !in_tag => result.push(c),
            _ => {}
        }
    }

    result
}
