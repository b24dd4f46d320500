//! Machine translation of the search term into English through an ordered provider chain.

pub mod libretranslate;
pub mod mymemory;
mod types;

use tracing::{debug, info, warn};

use libretranslate::LibreTranslateClient;
use mymemory::MyMemoryClient;

#[derive(Debug, thiserror::Error)]
pub enum TranslateError {
    #[error("API error ({code}): {message}")]
    Api { code: u16, message: String },

    #[error("provider rejected request: {0}")]
    Rejected(String),

    #[error("unexpected response body: {0}")]
    Malformed(String),

    #[error("invalid endpoint URL: {0}")]
    InvalidEndpoint(#[from] url::ParseError),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}

/// A translation service that renders arbitrary-language text into English.
///
/// `Ok(None)` means the provider answered but had nothing usable to offer.
pub trait Translator {
    fn name(&self) -> &str;
    async fn translate(&self, text: &str) -> Result<Option<String>, TranslateError>;
}

/// The English rendering chosen for a term and the provider that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationOutcome {
    pub translated_text: String,
    pub provider_name: String,
}

/// Production providers, dispatched by variant.
#[derive(Clone)]
pub enum TranslatorBackend {
    MyMemory(MyMemoryClient),
    LibreTranslate(LibreTranslateClient),
}

impl Translator for TranslatorBackend {
    fn name(&self) -> &str {
        match self {
            TranslatorBackend::MyMemory(c) => c.name(),
            TranslatorBackend::LibreTranslate(c) => c.name(),
        }
    }

    async fn translate(&self, text: &str) -> Result<Option<String>, TranslateError> {
        match self {
            TranslatorBackend::MyMemory(c) => c.translate(text).await,
            TranslatorBackend::LibreTranslate(c) => c.translate(text).await,
        }
    }
}

/// Asks each provider in priority order and keeps the first rendering that
/// differs (case-insensitively) from the term. Provider failures are skipped.
pub async fn resolve<T: Translator>(translators: &[T], term: &str) -> Option<TranslationOutcome> {
    let folded = term.to_lowercase();

    for translator in translators {
        let provider = translator.name();
        match translator.translate(term).await {
            Ok(Some(text)) => {
                let text = text.trim();
                if text.is_empty() || text.to_lowercase() == folded {
                    debug!(provider, "translation identical to input");
                    continue;
                }
                info!(provider, term, translated = text, "term translated");
                return Some(TranslationOutcome {
                    translated_text: text.to_string(),
                    provider_name: provider.to_string(),
                });
            }
            Ok(None) => debug!(provider, "provider returned no translation"),
            Err(e) => warn!(provider, error = %e, "translation provider unavailable"),
        }
    }

    None
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::sync::Mutex;

    /// Scripted translator that records every call.
    pub(crate) struct MockTranslator {
        name: &'static str,
        reply: Mutex<Option<Result<Option<String>, TranslateError>>>,
        pub(crate) calls: Mutex<Vec<String>>,
    }

    impl MockTranslator {
        pub(crate) fn ok(name: &'static str, text: &str) -> Self {
            Self::with_reply(name, Ok(Some(text.to_string())))
        }

        pub(crate) fn failing(name: &'static str) -> Self {
            Self::with_reply(
                name,
                Err(TranslateError::Api {
                    code: 503,
                    message: "down".into(),
                }),
            )
        }

        pub(crate) fn empty(name: &'static str) -> Self {
            Self::with_reply(name, Ok(None))
        }

        fn with_reply(name: &'static str, reply: Result<Option<String>, TranslateError>) -> Self {
            Self {
                name,
                reply: Mutex::new(Some(reply)),
                calls: Mutex::new(Vec::new()),
            }
        }

        pub(crate) fn call_count(&self) -> usize {
            self.calls.lock().unwrap().len()
        }
    }

    impl Translator for MockTranslator {
        fn name(&self) -> &str {
            self.name
        }

        async fn translate(&self, text: &str) -> Result<Option<String>, TranslateError> {
            self.calls.lock().unwrap().push(text.to_string());
            self.reply
                .lock()
                .unwrap()
                .take()
                .unwrap_or(Ok(None))
        }
    }

    #[tokio::test]
    async fn first_success_wins_and_short_circuits() {
        let chain = [
            MockTranslator::ok("first", "Dog"),
            MockTranslator::ok("second", "Hound"),
        ];
        let outcome = resolve(&chain, "Pies").await.unwrap();
        assert_eq!(outcome.translated_text, "Dog");
        assert_eq!(outcome.provider_name, "first");
        assert_eq!(chain[1].call_count(), 0);
    }

    #[tokio::test]
    async fn failures_fall_through_to_next_provider() {
        let chain = [
            MockTranslator::failing("first"),
            MockTranslator::ok("second", "Dog"),
        ];
        let outcome = resolve(&chain, "Pies").await.unwrap();
        assert_eq!(outcome.provider_name, "second");
        assert_eq!(chain[0].call_count(), 1);
    }

    #[tokio::test]
    async fn identical_translation_is_not_usable() {
        let chain = [
            MockTranslator::ok("first", "  EINSTEIN "),
            MockTranslator::empty("second"),
        ];
        assert!(resolve(&chain, "Einstein").await.is_none());
        assert_eq!(chain[1].call_count(), 1);
    }

    #[tokio::test]
    async fn all_failing_yields_none() {
        let chain = [MockTranslator::failing("a"), MockTranslator::failing("b")];
        assert!(resolve(&chain, "Pies").await.is_none());
    }

    #[tokio::test]
    async fn empty_chain_yields_none() {
        let chain: [MockTranslator; 0] = [];
        assert!(resolve(&chain, "Pies").await.is_none());
    }

    #[tokio::test]
    async fn translation_is_trimmed() {
        let chain = [MockTranslator::ok("first", "  Dog\n")];
        let outcome = resolve(&chain, "Pies").await.unwrap();
        assert_eq!(outcome.translated_text, "Dog");
    }

    #[test]
    fn backend_names() {
        let http = reqwest::Client::new();
        let timeout = std::time::Duration::from_secs(1);
        let mm = TranslatorBackend::MyMemory(MyMemoryClient::new(
            http.clone(),
            mymemory::DEFAULT_BASE_URL,
            timeout,
        ));
        let lt = TranslatorBackend::LibreTranslate(LibreTranslateClient::new(
            http,
            libretranslate::DEFAULT_BASE_URL,
            timeout,
        ));
        assert_eq!(mm.name(), "MyMemory API");
        assert_eq!(lt.name(), "LibreTranslate");
    }
}
