use tracing::info;

use super::aggregate::aggregate;
use super::plan::plan;
use super::rank::rank;
use super::term::SearchTerm;
use super::types::{PlannedQuery, ScoredCandidate};
use crate::translate::{self, TranslationOutcome, Translator};
use crate::wiki::{ArticleSearch, EntityLookup};

/// Everything a single resolution produced, best candidate first.
#[derive(Debug, Clone)]
pub struct Resolution {
    pub term: SearchTerm,
    pub translation: Option<TranslationOutcome>,
    pub plan: Vec<PlannedQuery>,
    pub entity_label: Option<String>,
    pub candidates: Vec<ScoredCandidate>,
}

impl Resolution {
    pub fn best(&self) -> Option<&ScoredCandidate> {
        self.candidates.first()
    }

    /// No provider produced a candidate. A "no match" outcome, not a failure.
    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    /// Runner-up candidates after the best one.
    pub fn alternatives(&self, n: usize) -> &[ScoredCandidate] {
        let end = self.candidates.len().min(n + 1);
        self.candidates.get(1..end).unwrap_or_default()
    }

    pub fn search_terms_used(&self) -> Vec<&str> {
        self.plan.iter().map(|q| q.text.as_str()).collect()
    }
}

/// Stateless match-resolution engine over injected providers.
pub struct MatchEngine<T, S, K> {
    translators: Vec<T>,
    search: S,
    entities: K,
    snippet_bonus: f64,
}

impl<T, S, K> MatchEngine<T, S, K>
where
    T: Translator,
    S: ArticleSearch,
    K: EntityLookup,
{
    pub fn new(translators: Vec<T>, search: S, entities: K, snippet_bonus: f64) -> Self {
        Self {
            translators,
            search,
            entities,
            snippet_bonus,
        }
    }

    pub async fn find_best_match(&self, term: &SearchTerm) -> Resolution {
        let translation = translate::resolve(&self.translators, term.as_str()).await;
        let plan = plan(term.as_str(), translation.as_ref());
        let aggregation = aggregate(&self.search, &self.entities, &plan, term.as_str()).await;
        let candidates = rank(aggregation.batches, term.as_str(), self.snippet_bonus);

        info!(
            term = %term,
            translated = translation.as_ref().map(|t| t.translated_text.as_str()),
            candidates = candidates.len(),
            best = candidates.first().map(|c| c.title.as_str()),
            "resolution complete"
        );

        Resolution {
            term: term.clone(),
            translation,
            plan,
            entity_label: aggregation.entity_label,
            candidates,
        }
    }
}
