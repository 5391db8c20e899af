//! Search query representation.

use serde::{Deserialize, Serialize};

use crate::{Result, SearchError};

/// Safe search level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SafeSearch {
    /// No filtering.
    #[default]
    Off = 0,
    /// Moderate filtering.
    Moderate = 1,
    /// Strict filtering.
    Strict = 2,
}

/// A validated search query.
///
/// The text always contains at least one non-whitespace character; it is
/// stored trimmed. Everything else is an optional hint for the backends
/// that understand it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchQuery {
    /// The search terms.
    query: String,
    /// Language/locale (e.g., "en-US").
    pub language: Option<String>,
    /// Safe search level.
    pub safesearch: SafeSearch,
    /// Page number (1-indexed).
    pub page: u32,
}

impl SearchQuery {
    /// Creates a new search query, rejecting empty or whitespace-only text.
    pub fn new(query: impl Into<String>) -> Result<Self> {
        let query = query.into();
        let trimmed = query.trim();
        if trimmed.is_empty() {
            return Err(SearchError::invalid("query cannot be empty"));
        }

        Ok(Self {
            query: trimmed.to_string(),
            language: None,
            safesearch: SafeSearch::Off,
            page: 1,
        })
    }

    /// Returns the query text.
    pub fn text(&self) -> &str {
        &self.query
    }

    /// Sets the language/locale.
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    /// Sets the safe search level.
    pub fn with_safesearch(mut self, level: SafeSearch) -> Self {
        self.safesearch = level;
        self
    }

    /// Sets the page number. Page 0 is treated as page 1.
    pub fn with_page(mut self, page: u32) -> Self {
        self.page = page.max(1);
        self
    }
}
