use serde::Serialize;

use crate::wiki::types::RawHit;

/// The strategy that produced a batch of hits.
///
/// Declaration order is merge priority: when two batches contain the same
/// title, the hit from the earlier origin is the one that survives dedup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum QueryOrigin {
    /// English label of the first knowledge-base entity matching the term.
    KnowledgeBase,
    /// Machine translation of the term.
    Translated,
    /// The term verbatim.
    Raw,
    /// The term wrapped in double quotes.
    Quoted,
    /// First character upper-cased, remainder lower-cased.
    Capitalized,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedQuery {
    pub text: String,
    pub origin: QueryOrigin,
}

#[derive(Debug, Clone)]
pub struct HitBatch {
    pub origin: QueryOrigin,
    pub hits: Vec<RawHit>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoredCandidate {
    pub title: String,
    pub snippet: String,
    pub origin: QueryOrigin,
    pub relevance_score: f64,
}
