use std::time::Duration;

use reqwest::Client;

use super::types::{LibreTranslateRequest, LibreTranslateResponse};
use super::{TranslateError, Translator};

pub const DEFAULT_BASE_URL: &str = "https://libretranslate.com";

#[derive(Clone)]
pub struct LibreTranslateClient {
    http: Client,
    base_url: String,
    timeout: Duration,
}

impl LibreTranslateClient {
    pub fn new(http: Client, base_url: &str, timeout: Duration) -> Self {
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout,
        }
    }
}

impl Translator for LibreTranslateClient {
    fn name(&self) -> &str {
        "LibreTranslate"
    }

    async fn translate(&self, text: &str) -> Result<Option<String>, TranslateError> {
        let request = LibreTranslateRequest {
            q: text,
            source: "auto",
            target: "en",
            format: "text",
        };

        let response = self
            .http
            .post(format!("{}/translate", self.base_url))
            .header("User-Agent", crate::USER_AGENT)
            .json(&request)
            .timeout(self.timeout)
            .send()
            .await?;

        let status = response.status();
        let raw = response.text().await?;
        let body = serde_json::from_str::<LibreTranslateResponse>(&raw);

        if !status.is_success() {
            let message = body
                .ok()
                .and_then(|b| b.error)
                .unwrap_or_else(|| format!("HTTP {status}"));
            return Err(TranslateError::Api {
                code: status.as_u16(),
                message,
            });
        }

        let body = body.map_err(|e| TranslateError::Malformed(e.to_string()))?;
        if let Some(error) = body.error {
            return Err(TranslateError::Rejected(error));
        }

        Ok(body
            .translated_text
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty()))
    }
}

#[cfg(test)]
mod http_tests {
    use super::*;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client(server: &MockServer) -> LibreTranslateClient {
        LibreTranslateClient::new(Client::new(), &server.uri(), Duration::from_secs(5))
    }

    #[tokio::test]
    async fn posts_auto_to_english_request() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/translate"))
            .and(body_json(serde_json::json!({
                "q": "Hund",
                "source": "auto",
                "target": "en",
                "format": "text"
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "translatedText": "Dog"
            })))
            .mount(&server)
            .await;

        let out = client(&server).translate("Hund").await.unwrap();
        assert_eq!(out.as_deref(), Some("Dog"));
    }

    #[tokio::test]
    async fn api_key_error_is_surfaced_as_api_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
                "error": "Visit https://portal.libretranslate.com to get an API key"
            })))
            .mount(&server)
            .await;

        let err = client(&server).translate("Hund").await.unwrap_err();
        match err {
            TranslateError::Api { code, message } => {
                assert_eq!(code, 400);
                assert!(message.contains("API key"));
            }
            other => panic!("expected Api(400), got: {other:?}"),
        }
    }

    #[tokio::test]
    async fn garbage_body_is_malformed() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let err = client(&server).translate("Hund").await.unwrap_err();
        assert!(matches!(err, TranslateError::Malformed(_)));
    }
}
