use std::time::Duration;

use reqwest::Client;
use tracing::debug;
use url::Url;

use super::types::MyMemoryResponse;
use super::{TranslateError, Translator};

pub const DEFAULT_BASE_URL: &str = "https://api.mymemory.translated.net";

#[derive(Clone)]
pub struct MyMemoryClient {
    http: Client,
    base_url: String,
    timeout: Duration,
}

impl MyMemoryClient {
    pub fn new(http: Client, base_url: &str, timeout: Duration) -> Self {
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout,
        }
    }
}

impl Translator for MyMemoryClient {
    fn name(&self) -> &str {
        "MyMemory API"
    }

    async fn translate(&self, text: &str) -> Result<Option<String>, TranslateError> {
        let url = Url::parse_with_params(
            &format!("{}/get", self.base_url),
            &[("q", text), ("langpair", "auto|en")],
        )?;

        let response = self
            .http
            .get(url)
            .header("User-Agent", crate::USER_AGENT)
            .timeout(self.timeout)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(TranslateError::Api {
                code: status.as_u16(),
                message: format!("HTTP {status}"),
            });
        }

        let text_body = response.text().await?;
        let body: MyMemoryResponse = serde_json::from_str(&text_body)
            .map_err(|e| TranslateError::Malformed(e.to_string()))?;

        if body.status_code() != Some(200) {
            return Err(TranslateError::Rejected(
                body.response_details
                    .unwrap_or_else(|| format!("responseStatus {:?}", body.response_status)),
            ));
        }

        let data = body.response_data;
        let confidence = data.as_ref().and_then(|d| d.confidence.clone());
        let translated = data
            .and_then(|d| d.translated_text)
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty());

        debug!(?confidence, "mymemory translation received");
        Ok(translated)
    }
}
