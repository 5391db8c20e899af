//! Result aggregation and ranking.

use std::cmp::Ordering;
use std::collections::hash_map::Entry;
use std::collections::HashMap;

use tracing::debug;

use crate::url_normalize::normalize_url;
use crate::{EngineOutcome, MergedResult};

/// Merges per-engine hits into one deduplicated, scored list.
#[derive(Debug, Clone, Copy, Default)]
pub struct Aggregator {
    limit: Option<usize>,
}

impl Aggregator {
    /// Creates an aggregator that keeps every result.
    pub fn new() -> Self {
        Self::default()
    }

    /// Keeps at most `limit` results.
    pub fn with_limit(mut self, limit: Option<usize>) -> Self {
        self.limit = limit;
        self
    }

    /// Aggregates engine outcomes. Failed outcomes contribute nothing.
    ///
    /// This performs:
    /// 1. Deduplication on the normalized URL
    /// 2. Merging, where the first hit seen for a URL supplies its metadata
    /// 3. Scoring: the sum of `1 / (1 + rank)` over every merged hit
    /// 4. A stable sort by descending score, so ties keep creation order
    /// 5. Truncation to the limit
    pub fn aggregate(&self, outcomes: Vec<EngineOutcome>) -> Vec<MergedResult> {
        let mut keys: HashMap<String, usize> = HashMap::new();
        let mut merged: Vec<MergedResult> = Vec::new();

        for outcome in outcomes {
            let Ok(hits) = outcome.result else {
                continue;
            };

            for hit in hits {
                let score = position_score(hit.rank);
                let index = match keys.entry(normalize_url(&hit.url)) {
                    Entry::Occupied(entry) => *entry.get(),
                    Entry::Vacant(entry) => {
                        let index = merged.len();
                        merged.push(MergedResult::from_hit(entry.key().clone(), hit));
                        entry.insert(index);
                        index
                    }
                };

                let result = &mut merged[index];
                result.score += score;
                result.add_engine(&outcome.engine);
            }
        }

        debug!("Aggregated {} unique results", merged.len());

        merged.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));

        if let Some(limit) = self.limit {
            merged.truncate(limit);
        }
        merged
    }
}

fn position_score(rank: usize) -> f64 {
    1.0 / (1.0 + rank as f64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{EngineFailure, RawHit};

    fn ranked(hits: Vec<RawHit>) -> Vec<RawHit> {
        hits.into_iter()
            .enumerate()
            .map(|(rank, mut hit)| {
                hit.rank = rank;
                hit
            })
            .collect()
    }

    fn ok(engine: &str, hits: Vec<RawHit>) -> EngineOutcome {
        EngineOutcome {
            engine: engine.to_string(),
            result: Ok(ranked(hits)),
        }
    }

    fn failed(engine: &str) -> EngineOutcome {
        EngineOutcome {
            engine: engine.to_string(),
            result: Err(EngineFailure::new(engine, "boom")),
        }
    }

    fn hit(url: &str, title: &str) -> RawHit {
        RawHit::new(url, title, "Content")
    }

    #[test]
    fn test_aggregate_empty_results() {
        assert!(Aggregator::new().aggregate(vec![]).is_empty());
    }

    #[test]
    fn test_aggregate_single_engine() {
        let results = Aggregator::new().aggregate(vec![ok("engine1", vec![hit("https://example.com", "Title")])]);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].engines, vec!["engine1"]);
        assert_eq!(results[0].score, 1.0);
    }

    #[test]
    fn test_aggregate_skips_failures() {
        let results = Aggregator::new().aggregate(vec![
            failed("bad"),
            ok("good", vec![hit("https://example.com", "Title")]),
        ]);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].engines, vec!["good"]);
    }

    #[test]
    fn test_aggregate_deduplicates_by_normalized_url() {
        let results = Aggregator::new().aggregate(vec![
            ok(
                "engine1",
                vec![
                    hit("https://example.com/page", "Title 1"),
                    hit("https://other.com", "Other"),
                ],
            ),
            ok(
                "engine2",
                vec![hit("HTTPS://Example.com:443/page/?utm_source=x", "Title 2 Longer")],
            ),
        ]);

        assert_eq!(results.len(), 2);
        let example = results
            .iter()
            .find(|r| r.url == "https://example.com/page")
            .unwrap();
        assert_eq!(example.engines, vec!["engine1", "engine2"]);
    }

    #[test]
    fn test_aggregate_first_hit_keeps_metadata() {
        let results = Aggregator::new().aggregate(vec![
            ok("engine1", vec![hit("https://example.com", "Short")]),
            ok(
                "engine2",
                vec![hit("https://example.com", "Longer Title Here")
                    .with_thumbnail("https://example.com/thumb.jpg")
                    .with_published_date("2024-01-15")],
            ),
        ]);

        assert_eq!(results[0].title, "Short");
        assert!(results[0].thumbnail.is_none());
        assert!(results[0].published_date.is_none());
    }

    #[test]
    fn test_score_is_sum_of_reciprocal_ranks() {
        let results = Aggregator::new().aggregate(vec![
            ok("engine1", vec![hit("https://example.com", "Title")]),
            ok(
                "engine2",
                vec![hit("https://other.com", "Other"), hit("https://example.com", "Title")],
            ),
        ]);

        let example = results.iter().find(|r| r.url == "https://example.com").unwrap();
        assert!((example.score - 1.5).abs() < f64::EPSILON);
        let other = results.iter().find(|r| r.url == "https://other.com").unwrap();
        assert!((other.score - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_results_sorted_by_score() {
        let results = Aggregator::new().aggregate(vec![
            ok(
                "engine1",
                vec![hit("https://single.com", "Single"), hit("https://both.com", "Both")],
            ),
            ok("engine2", vec![hit("https://both.com", "Both")]),
        ]);

        assert_eq!(results[0].url, "https://both.com");
        assert_eq!(results[0].engines.len(), 2);
    }

    #[test]
    fn test_position_affects_score() {
        let results = Aggregator::new().aggregate(vec![ok(
            "engine1",
            vec![
                hit("https://first.com", "First"),
                hit("https://second.com", "Second"),
                hit("https://third.com", "Third"),
            ],
        )]);

        assert!(results[0].score > results[1].score);
        assert!(results[1].score > results[2].score);
        assert_eq!(results[0].url, "https://first.com");
    }

    #[test]
    fn test_ties_keep_creation_order() {
        let results = Aggregator::new().aggregate(vec![
            ok("engine1", vec![hit("https://a.com", "A")]),
            ok("engine2", vec![hit("https://b.com", "B")]),
            ok("engine3", vec![hit("https://c.com", "C")]),
        ]);

        let urls: Vec<&str> = results.iter().map(|r| r.url.as_str()).collect();
        assert_eq!(urls, vec!["https://a.com", "https://b.com", "https://c.com"]);
    }

    #[test]
    fn test_multi_engine_hit_outscores_single() {
        let results = Aggregator::new().aggregate(vec![
            ok(
                "engine1",
                vec![hit("https://x.com", "X"), hit("https://shared.com", "Shared")],
            ),
            ok(
                "engine2",
                vec![hit("https://y.com", "Y"), hit("https://shared.com", "Shared")],
            ),
        ]);

        let shared = results.iter().find(|r| r.url == "https://shared.com").unwrap();
        let single = results.iter().find(|r| r.url == "https://x.com").unwrap();
        assert!(shared.score >= single.score);
    }

    #[test]
    fn test_limit_truncates_after_sort() {
        let hits = (0..5)
            .map(|i| hit(&format!("https://example.com/{i}"), "T"))
            .collect();
        let results = Aggregator::new()
            .with_limit(Some(2))
            .aggregate(vec![ok("engine1", hits)]);

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].url, "https://example.com/0");
        assert_eq!(results[1].url, "https://example.com/1");
    }

    #[test]
    fn test_same_engine_listed_once() {
        let results = Aggregator::new().aggregate(vec![ok(
            "engine1",
            vec![hit("https://example.com/", "A"), hit("https://example.com", "B")],
        )]);

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].engines, vec!["engine1"]);
        assert!((results[0].score - 1.5).abs() < f64::EPSILON);
    }
}
