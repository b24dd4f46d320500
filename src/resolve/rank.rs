use std::collections::HashSet;

use super::similarity::similarity;
use super::types::{HitBatch, ScoredCandidate};

/// Added to the title similarity when the snippet mentions the term.
///
/// Uncalibrated; overridable through `Settings::snippet_bonus`.
pub const SNIPPET_MATCH_BONUS: f64 = 0.2;

/// Flattens batches in origin priority order, keeping arrival order within an origin.
pub fn merge_batches(mut batches: Vec<HitBatch>) -> Vec<HitBatch> {
    batches.sort_by_key(|b| b.origin);
    batches
}

/// Deduplicates by title (first occurrence wins), scores against `term`,
/// and sorts descending by score. Ties keep their merge order.
pub fn rank(batches: Vec<HitBatch>, term: &str, snippet_bonus: f64) -> Vec<ScoredCandidate> {
    let needle = term.to_lowercase();
    let mut seen = HashSet::new();
    let mut candidates = Vec::new();

    for batch in merge_batches(batches) {
        for hit in batch.hits {
            if !seen.insert(hit.title.clone()) {
                continue;
            }
            let bonus = if hit.snippet.to_lowercase().contains(&needle) {
                snippet_bonus
            } else {
                0.0
            };
            candidates.push(ScoredCandidate {
                relevance_score: similarity(term, &hit.title) + bonus,
                title: hit.title,
                snippet: hit.snippet,
                origin: batch.origin,
            });
        }
    }

    candidates.sort_by(|a, b| b.relevance_score.total_cmp(&a.relevance_score));
    candidates
}
