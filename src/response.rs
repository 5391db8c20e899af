//! Search response types and assembly.

use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

use crate::MergedResult;

/// One engine that failed or timed out during a search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineFailure {
    /// Canonical shortcut of the engine.
    pub engine: String,
    /// Human-readable reason.
    pub message: String,
}

impl EngineFailure {
    /// Creates a failure record.
    pub fn new(engine: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            engine: engine.into(),
            message: message.into(),
        }
    }
}

/// The outcome of a search call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResponse {
    /// Merged results in relevance order.
    pub results: Vec<MergedResult>,
    /// Number of results; always `results.len()`.
    pub count: usize,
    /// Time from dispatch start to aggregation end.
    #[serde(rename = "duration_ms", with = "millis")]
    pub duration: Duration,
    /// Engines that failed, in the order they finished.
    pub errors: Vec<EngineFailure>,
}

impl SearchResponse {
    /// Returns true if at least one engine failed.
    pub fn is_partial(&self) -> bool {
        !self.errors.is_empty()
    }
}

/// Builds the response, measuring elapsed time from `start`.
pub fn assemble(
    results: Vec<MergedResult>,
    errors: Vec<EngineFailure>,
    start: Instant,
) -> SearchResponse {
    SearchResponse {
        count: results.len(),
        results,
        duration: start.elapsed(),
        errors,
    }
}

mod millis {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(duration.as_millis() as u64)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_millis)
    }
}
