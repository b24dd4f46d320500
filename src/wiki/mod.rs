//! Clients for the MediaWiki action API (Wikipedia, Wikimedia Commons) and Wikidata entity search.

pub mod mediawiki;
pub mod types;
pub mod wikidata;

use std::time::Duration;

use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::config::Settings;
use types::{ApiError, Entity, RawHit};

const MAX_RETRIES: u32 = 3;
const INITIAL_BACKOFF_MS: u64 = 500;

#[derive(Debug, thiserror::Error)]
pub enum WikiError {
    #[error("API error ({code}): {message}")]
    Api { code: u16, message: String },

    #[error("unexpected response body: {0}")]
    Malformed(String),

    #[error("invalid endpoint URL: {0}")]
    InvalidEndpoint(#[from] url::ParseError),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}

/// Full-text article search. Implemented by `MediaWikiClient`; fakes in tests.
pub trait ArticleSearch {
    async fn search(&self, query: &str) -> Result<Vec<RawHit>, WikiError>;
}

/// Structured knowledge-base lookup returning the best English-labelled entity.
pub trait EntityLookup {
    async fn lookup_entity(&self, text: &str) -> Result<Option<Entity>, WikiError>;
}

/// One `api.php` endpoint plus the request policy shared by every call to it.
#[derive(Clone)]
pub struct Endpoint {
    http: Client,
    base_url: String,
    api_user_agent: Option<String>,
    timeout: Duration,
    initial_backoff_ms: u64,
}

impl Endpoint {
    pub fn new(http: Client, base_url: &str, settings: &Settings) -> Self {
        Self {
            http,
            base_url: base_url.to_string(),
            api_user_agent: settings.contact.as_ref().map(ToString::to_string),
            timeout: settings.request_timeout,
            initial_backoff_ms: INITIAL_BACKOFF_MS,
        }
    }

    #[cfg(test)]
    pub(crate) fn with_base_url(http: Client, base_url: &str) -> Self {
        Self {
            http,
            base_url: base_url.to_string(),
            api_user_agent: Some("tester (tester@example.com)".into()),
            timeout: Duration::from_secs(5),
            initial_backoff_ms: 0,
        }
    }

    pub(crate) async fn get_json<T: DeserializeOwned>(
        &self,
        params: &[(&str, &str)],
    ) -> Result<T, WikiError> {
        let mut last_err = None;
        for attempt in 0..MAX_RETRIES {
            match self.get_once(params).await {
                Ok(body) => return Ok(body),
                Err(e) if is_retriable(&e) => {
                    last_err = Some(e);
                    if attempt + 1 < MAX_RETRIES {
                        let delay_ms = jittered_backoff(self.initial_backoff_ms, attempt);
                        debug!(
                            attempt = attempt + 1,
                            delay_ms, "retrying after server error"
                        );
                        tokio::time::sleep(Duration::from_millis(delay_ms)).await;
                    }
                }
                Err(e) => return Err(e),
            }
        }
        Err(last_err.unwrap_or_else(|| WikiError::Malformed("no attempt made".into())))
    }

    async fn get_once<T: DeserializeOwned>(&self, params: &[(&str, &str)]) -> Result<T, WikiError> {
        let url = Url::parse_with_params(
            &self.base_url,
            params.iter().copied().chain([("format", "json")]),
        )?;

        let mut request = self
            .http
            .get(url)
            .header("User-Agent", crate::USER_AGENT)
            .timeout(self.timeout);
        if let Some(ref contact) = self.api_user_agent {
            request = request.header("Api-User-Agent", contact);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(WikiError::Api {
                code: status.as_u16(),
                message: format!("HTTP {status}: {}", truncate(&text, 200)),
            });
        }

        let text = response.text().await?;
        serde_json::from_str(&text).map_err(|e| WikiError::Malformed(e.to_string()))
    }
}

/// Turns an `error` object embedded in a 2xx body into a `WikiError`.
pub(crate) fn check_api_error(error: Option<ApiError>) -> Result<(), WikiError> {
    match error {
        None => Ok(()),
        Some(err) => Err(WikiError::Malformed(format!(
            "{}: {}",
            err.code.as_deref().unwrap_or("unknown"),
            err.info.as_deref().unwrap_or("no details")
        ))),
    }
}

fn is_retriable(e: &WikiError) -> bool {
    matches!(e, WikiError::Api { code: 500..=599, .. })
}

/// Equal jitter backoff: base/2 + rand(0, base/2).
fn jittered_backoff(initial_ms: u64, attempt: u32) -> u64 {
    let base = initial_ms * 2u64.pow(attempt);
    let half = base / 2;
    half + fastrand::u64(..half.max(1))
}

fn truncate(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}
