//! # metasearch-core
//!
//! An embeddable meta search library.
//!
//! One query is sent to several search engines at once, and their answers
//! are merged into a single ranked list:
//!
//! - Engines are selected by shortcut or alias from an immutable registry
//! - Every engine runs as its own task under a per-engine timeout
//! - Results are deduplicated on a normalized URL and scored by rank
//! - A failing engine is reported next to the results, never instead of them
//!
//! ## Example
//!
//! ```rust,no_run
//! use metasearch_core::{Search, SearchOptions};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let search = Search::new();
//!     let options = SearchOptions::new().with_engines(["ddg", "wiki"]).with_limit(10);
//!
//!     let response = search.search("rust programming", options).await?;
//!
//!     for result in &response.results {
//!         println!("{}: {}", result.title, result.url);
//!     }
//!     for failure in &response.errors {
//!         eprintln!("{} failed: {}", failure.engine, failure.message);
//!     }
//!     Ok(())
//! }
//! ```

mod aggregator;
mod config;
mod dispatcher;
mod engine;
mod error;
mod fetcher;
mod options;
mod proxy;
mod query;
mod registry;
mod response;
mod result;
mod search;
mod url_normalize;

pub mod engines;

pub use aggregator::Aggregator;
pub use config::SearchConfig;
pub use dispatcher::{dispatch, EngineOutcome};
pub use engine::{Engine, EngineConfig};
pub use error::{BackendError, BackendResult, Result, SearchError};
pub use fetcher::{HttpFetcher, DEFAULT_USER_AGENT};
pub use options::{SearchOptions, DEFAULT_TIMEOUT};
pub use proxy::{ProxyConfig, ProxyProtocol};
pub use query::{SafeSearch, SearchQuery};
pub use registry::{EngineRegistry, EngineRegistryBuilder, EngineSpec};
pub use response::{assemble, EngineFailure, SearchResponse};
pub use result::{MergedResult, RawHit, ResultType};
pub use search::Search;
pub use url_normalize::normalize_url;

pub use tokio_util::sync::CancellationToken;
