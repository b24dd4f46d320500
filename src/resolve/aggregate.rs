use std::collections::HashSet;

use futures::future::join_all;
use tracing::{debug, info, warn};

use super::rank::merge_batches;
use super::types::{HitBatch, PlannedQuery, QueryOrigin};
use crate::wiki::{ArticleSearch, EntityLookup};

#[derive(Debug)]
pub struct Aggregation {
    /// Hit batches in merge priority order.
    pub batches: Vec<HitBatch>,
    /// Knowledge-base label that triggered the bonus search, if any.
    pub entity_label: Option<String>,
}

/// Runs every distinct plan query and the knowledge-base bonus query concurrently.
///
/// A failed request contributes nothing; the result order depends only on
/// query origins, never on completion order.
pub async fn aggregate<S, K>(
    search: &S,
    entities: &K,
    plan: &[PlannedQuery],
    term: &str,
) -> Aggregation
where
    S: ArticleSearch,
    K: EntityLookup,
{
    let mut issued = HashSet::new();
    let distinct: Vec<&PlannedQuery> = plan
        .iter()
        .filter(|q| issued.insert(q.text.as_str()))
        .collect();

    let plan_searches = join_all(
        distinct
            .iter()
            .map(|q| async move { (*q, search.search(&q.text).await) }),
    );

    let (outcomes, bonus) = tokio::join!(plan_searches, knowledge_base_batch(search, entities, term));

    let mut batches = Vec::with_capacity(outcomes.len() + 1);
    let entity_label = bonus.map(|(label, batch)| {
        batches.push(batch);
        label
    });

    for (query, outcome) in outcomes {
        match outcome {
            Ok(hits) => batches.push(HitBatch {
                origin: query.origin,
                hits,
            }),
            Err(e) => warn!(query = %query.text, error = %e, "search failed (continuing)"),
        }
    }

    Aggregation {
        batches: merge_batches(batches),
        entity_label,
    }
}

async fn knowledge_base_batch<S, K>(search: &S, entities: &K, term: &str) -> Option<(String, HitBatch)>
where
    S: ArticleSearch,
    K: EntityLookup,
{
    let entity = match entities.lookup_entity(term).await {
        Ok(Some(entity)) => entity,
        Ok(None) => {
            debug!(term, "no knowledge-base entity");
            return None;
        }
        Err(e) => {
            warn!(term, error = %e, "knowledge-base lookup failed");
            return None;
        }
    };

    if entity.label.to_lowercase() == term.to_lowercase() {
        debug!(label = %entity.label, "entity label matches term, no bonus query");
        return None;
    }

    match search.search(&entity.label).await {
        Ok(hits) => {
            info!(
                label = %entity.label,
                description = entity.description.as_deref().unwrap_or(""),
                count = hits.len(),
                "knowledge-base bonus search complete"
            );
            Some((
                entity.label,
                HitBatch {
                    origin: QueryOrigin::KnowledgeBase,
                    hits,
                },
            ))
        }
        Err(e) => {
            warn!(label = %entity.label, error = %e, "knowledge-base bonus search failed");
            None
        }
    }
}
