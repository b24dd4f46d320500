use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MyMemoryResponse {
    pub response_data: Option<MyMemoryData>,
    /// Sent as a number on success but sometimes as a string ("403") on failure.
    pub response_status: Option<serde_json::Value>,
    pub response_details: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MyMemoryData {
    pub translated_text: Option<String>,
    #[serde(rename = "match")]
    pub confidence: Option<serde_json::Value>,
}

impl MyMemoryResponse {
    pub fn status_code(&self) -> Option<u64> {
        match self.response_status.as_ref()? {
            serde_json::Value::Number(n) => n.as_u64(),
            serde_json::Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct LibreTranslateRequest<'a> {
    pub q: &'a str,
    pub source: &'a str,
    pub target: &'a str,
    pub format: &'a str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LibreTranslateResponse {
    pub translated_text: Option<String>,
    pub error: Option<String>,
}
