use super::types::{PlannedQuery, QueryOrigin};
use crate::translate::TranslationOutcome;

/// Expands one term into the ordered list of search queries.
///
/// Translation first, then the literal term, the exact-phrase variant and the
/// capitalized variant. Entries may repeat (e.g. "Einstein" is already capitalized).
pub fn plan(term: &str, translation: Option<&TranslationOutcome>) -> Vec<PlannedQuery> {
    let mut queries = Vec::with_capacity(4);

    if let Some(t) = translation {
        queries.push(PlannedQuery {
            text: t.translated_text.clone(),
            origin: QueryOrigin::Translated,
        });
    }

    queries.push(PlannedQuery {
        text: term.to_string(),
        origin: QueryOrigin::Raw,
    });
    queries.push(PlannedQuery {
        text: format!("\"{term}\""),
        origin: QueryOrigin::Quoted,
    });
    queries.push(PlannedQuery {
        text: capitalize(term),
        origin: QueryOrigin::Capitalized,
    });

    queries
}

fn capitalize(term: &str) -> String {
    let mut chars = term.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.as_str().to_lowercase().chars())
            .collect(),
        None => String::new(),
    }
}
