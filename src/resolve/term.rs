use std::fmt;

/// Stringified placeholders that upstream callers pass when no keyword was bound.
const SENTINELS: &[&str] = &["undefined", "null", "[object Object]"];

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum TermError {
    #[error("keyword is required and must not be empty")]
    Empty,

    #[error("keyword '{0}' is a placeholder, not a real value")]
    Sentinel(String),
}

/// A trimmed, non-empty keyword. Immutable once parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchTerm(String);

impl SearchTerm {
    pub fn parse(raw: &str) -> Result<Self, TermError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(TermError::Empty);
        }
        if SENTINELS.contains(&trimmed) {
            return Err(TermError::Sentinel(trimmed.to_string()));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SearchTerm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
