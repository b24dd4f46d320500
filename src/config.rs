//! Runtime settings: provider endpoints, limits, timeouts and the API contact string.
//!
//! Environment variables:
//! - `WIKIMATCH_CONTACT_NAME` / `WIKIMATCH_CONTACT_EMAIL`: sent as `Api-User-Agent`
//!   per the Wikimedia user-agent policy (optional)
//! - `WIKIMATCH_MYMEMORY_URL`, `WIKIMATCH_LIBRETRANSLATE_URL`: translation endpoints
//! - `WIKIMATCH_WIKIPEDIA_URL`, `WIKIMATCH_COMMONS_URL`, `WIKIMATCH_WIKIDATA_URL`: `api.php` endpoints

use std::env;
use std::fmt;
use std::time::Duration;

use crate::resolve::SNIPPET_MATCH_BONUS;
use crate::translate::{libretranslate, mymemory};

pub const WIKIPEDIA_API: &str = "https://en.wikipedia.org/w/api.php";
pub const COMMONS_API: &str = "https://commons.wikimedia.org/w/api.php";
pub const WIKIDATA_API: &str = "https://www.wikidata.org/w/api.php";

#[derive(Debug, thiserror::Error)]
#[error("config error: {0}")]
pub struct ConfigError(String);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Contact {
    pub name: String,
    pub email: Option<String>,
}

impl fmt::Display for Contact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.email {
            Some(email) => write!(f, "{} ({email})", self.name),
            None => f.write_str(&self.name),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Settings {
    /// `srlimit` for article searches.
    pub search_limit: usize,
    /// `limit` for knowledge-base entity searches.
    pub entity_limit: usize,
    /// `srlimit` for the Commons file search.
    pub commons_limit: usize,
    /// Commons images kept after filtering.
    pub max_extra_images: usize,
    /// Per-request timeout for every provider call.
    pub request_timeout: Duration,
    pub snippet_bonus: f64,
    pub contact: Option<Contact>,
    pub wikipedia_url: String,
    pub commons_url: String,
    pub wikidata_url: String,
    pub mymemory_url: String,
    pub libretranslate_url: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            search_limit: 10,
            entity_limit: 5,
            commons_limit: 10,
            max_extra_images: 5,
            request_timeout: Duration::from_secs(20),
            snippet_bonus: SNIPPET_MATCH_BONUS,
            contact: None,
            wikipedia_url: WIKIPEDIA_API.to_string(),
            commons_url: COMMONS_API.to_string(),
            wikidata_url: WIKIDATA_API.to_string(),
            mymemory_url: mymemory::DEFAULT_BASE_URL.to_string(),
            libretranslate_url: libretranslate::DEFAULT_BASE_URL.to_string(),
        }
    }
}

impl Settings {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let contact = env_value("WIKIMATCH_CONTACT_NAME").map(|name| Contact {
            name,
            email: env_value("WIKIMATCH_CONTACT_EMAIL"),
        });
        Self {
            contact,
            wikipedia_url: env_value("WIKIMATCH_WIKIPEDIA_URL").unwrap_or(defaults.wikipedia_url),
            commons_url: env_value("WIKIMATCH_COMMONS_URL").unwrap_or(defaults.commons_url),
            wikidata_url: env_value("WIKIMATCH_WIKIDATA_URL").unwrap_or(defaults.wikidata_url),
            mymemory_url: env_value("WIKIMATCH_MYMEMORY_URL").unwrap_or(defaults.mymemory_url),
            libretranslate_url: env_value("WIKIMATCH_LIBRETRANSLATE_URL")
                .unwrap_or(defaults.libretranslate_url),
            ..defaults
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.search_limit == 0 || self.entity_limit == 0 || self.commons_limit == 0 {
            return Err(ConfigError("search limits must be greater than 0".into()));
        }
        if self.request_timeout.is_zero() {
            return Err(ConfigError("request timeout must be greater than 0".into()));
        }
        if !self.snippet_bonus.is_finite() || self.snippet_bonus < 0.0 {
            return Err(ConfigError(format!(
                "snippet bonus must be a non-negative number, got {}",
                self.snippet_bonus
            )));
        }
        for url in [
            &self.wikipedia_url,
            &self.commons_url,
            &self.wikidata_url,
            &self.mymemory_url,
            &self.libretranslate_url,
        ] {
            url::Url::parse(url).map_err(|e| ConfigError(format!("invalid endpoint '{url}': {e}")))?;
        }
        Ok(())
    }
}

fn env_value(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let settings = Settings::default();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.search_limit, 10);
        assert_eq!(settings.entity_limit, 5);
        assert_eq!(settings.max_extra_images, 5);
        assert!((settings.snippet_bonus - 0.2).abs() < f64::EPSILON);
    }

    #[test]
    fn zero_limit_rejected() {
        let settings = Settings {
            search_limit: 0,
            ..Default::default()
        };
        assert!(settings.validate().unwrap_err().to_string().contains("limits"));
    }

    #[test]
    fn zero_timeout_rejected() {
        let settings = Settings {
            request_timeout: Duration::ZERO,
            ..Default::default()
        };
        assert!(settings.validate().unwrap_err().to_string().contains("timeout"));
    }

    #[test]
    fn negative_bonus_rejected() {
        let settings = Settings {
            snippet_bonus: -0.1,
            ..Default::default()
        };
        assert!(settings.validate().is_err());

        let settings = Settings {
            snippet_bonus: f64::NAN,
            ..Default::default()
        };
        assert!(settings.validate().is_err());
    }

    #[test]
    fn bad_endpoint_rejected() {
        let settings = Settings {
            wikidata_url: "not a url".into(),
            ..Default::default()
        };
        assert!(settings.validate().unwrap_err().to_string().contains("not a url"));
    }

    #[test]
    fn contact_formats_like_user_agent_comment() {
        let full = Contact {
            name: "ImageBot".into(),
            email: Some("ops@example.org".into()),
        };
        assert_eq!(full.to_string(), "ImageBot (ops@example.org)");

        let name_only = Contact {
            name: "ImageBot".into(),
            email: None,
        };
        assert_eq!(name_only.to_string(), "ImageBot");
    }
}
