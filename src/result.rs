//! Search result types.

use serde::{Deserialize, Serialize};

/// Type of search result.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResultType {
    /// Standard web result.
    #[default]
    Web,
    /// Image result.
    Image,
    /// Video result.
    Video,
    /// News article.
    News,
    /// Map/location result.
    Map,
    /// File download.
    File,
    /// Direct answer.
    Answer,
    /// Infobox (rich information panel).
    Infobox,
    /// Suggestion.
    Suggestion,
}

/// A single hit as returned by one backend, before merging.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawHit {
    /// Result URL.
    pub url: String,
    /// Result title.
    pub title: String,
    /// Result description/snippet.
    pub content: String,
    /// Type of result.
    pub result_type: ResultType,
    /// Thumbnail URL (for images/videos).
    pub thumbnail: Option<String>,
    /// Published date (for news).
    pub published_date: Option<String>,
    /// Zero-based position in the backend's own result list.
    ///
    /// Assigned by the dispatcher from the order the backend returned.
    #[serde(default)]
    pub rank: usize,
}

impl RawHit {
    /// Creates a new hit.
    pub fn new(url: impl Into<String>, title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            title: title.into(),
            content: content.into(),
            result_type: ResultType::Web,
            thumbnail: None,
            published_date: None,
            rank: 0,
        }
    }

    /// Sets the result type.
    pub fn with_type(mut self, result_type: ResultType) -> Self {
        self.result_type = result_type;
        self
    }

    /// Sets the thumbnail URL.
    pub fn with_thumbnail(mut self, thumbnail: impl Into<String>) -> Self {
        self.thumbnail = Some(thumbnail.into());
        self
    }

    /// Sets the published date.
    pub fn with_published_date(mut self, date: impl Into<String>) -> Self {
        self.published_date = Some(date.into());
        self
    }
}

/// A deduplicated, scored result after cross-engine aggregation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MergedResult {
    /// Normalized URL; the deduplication key.
    pub url: String,
    /// Result title.
    pub title: String,
    /// Result description/snippet.
    pub content: String,
    /// Type of result.
    pub result_type: ResultType,
    /// Canonical names of the engines that returned this result, in the
    /// order they were merged. Never contains duplicates.
    pub engines: Vec<String>,
    /// Relevance score.
    pub score: f64,
    /// Thumbnail URL (for images/videos).
    pub thumbnail: Option<String>,
    /// Published date (for news).
    pub published_date: Option<String>,
}

impl MergedResult {
    /// Starts a merged result from the first hit seen for `url`.
    pub(crate) fn from_hit(url: String, hit: RawHit) -> Self {
        Self {
            url,
            title: hit.title,
            content: hit.content,
            result_type: hit.result_type,
            engines: Vec::new(),
            score: 0.0,
            thumbnail: hit.thumbnail,
            published_date: hit.published_date,
        }
    }

    /// Records `engine` as a contributor unless it already is one.
    pub(crate) fn add_engine(&mut self, engine: &str) {
        if !self.engines.iter().any(|e| e == engine) {
            self.engines.push(engine.to_string());
        }
    }
}
