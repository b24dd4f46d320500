//! Match resolution: translation, query planning, multi-source aggregation and ranking.

pub(crate) mod aggregate;
mod engine;
pub(crate) mod plan;
pub(crate) mod rank;
pub mod similarity;
mod term;
pub mod types;

pub use engine::{MatchEngine, Resolution};
pub use rank::SNIPPET_MATCH_BONUS;
pub use term::{SearchTerm, TermError};
