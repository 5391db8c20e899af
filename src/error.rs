//! Error types for the search library.
//!
//! Two layers: [`SearchError`] is what a caller of [`crate::Search`] can
//! see, [`BackendError`] is what a single engine reports. Backend errors are
//! always flattened into an [`crate::EngineFailure`] and never escape a
//! search call.

use std::time::Duration;

use thiserror::Error;

/// Result type alias for search operations.
pub type Result<T> = std::result::Result<T, SearchError>;

/// Result type alias for a single backend call.
pub type BackendResult<T> = std::result::Result<T, BackendError>;

/// Errors that can end a search call.
#[derive(Error, Debug)]
pub enum SearchError {
    /// The request was malformed: empty query, empty or unknown engine
    /// selection, zero limit or zero timeout.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// The caller cancelled the request before every engine finished.
    #[error("Search cancelled")]
    Cancelled,

    /// Two engines claimed the same shortcut while building a registry.
    #[error("Shortcut '{shortcut}' is claimed by both '{first}' and '{second}'")]
    DuplicateShortcut {
        shortcut: String,
        first: String,
        second: String,
    },

    /// Invalid configuration.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl SearchError {
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidRequest(message.into())
    }
}

/// Errors reported by a single search backend.
#[derive(Error, Debug)]
pub enum BackendError {
    /// HTTP request failed.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The provider answered with a non-success status.
    #[error("Unexpected HTTP status {0}")]
    Status(u16),

    /// Failed to parse response.
    #[error("Failed to parse response: {0}")]
    Parse(String),

    /// The proxy could not be used for this engine.
    #[error("Proxy error: {0}")]
    Proxy(String),

    /// The engine did not finish within its deadline.
    #[error("Engine timeout after {}ms", .0.as_millis())]
    Timeout(Duration),

    /// Generic error.
    #[error("{0}")]
    Other(String),
}
