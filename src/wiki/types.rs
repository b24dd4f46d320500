use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct QueryResponse<T> {
    pub query: Option<T>,
    pub error: Option<ApiError>,
}

#[derive(Debug, Deserialize)]
pub struct ApiError {
    pub code: Option<String>,
    pub info: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub search: Vec<SearchEntry>,
}

#[derive(Debug, Deserialize)]
pub struct SearchEntry {
    pub title: String,
    #[serde(default)]
    pub snippet: String,
}

/// `prop=...&titles=...` responses, keyed by page id (negative for missing pages).
#[derive(Debug, Deserialize)]
pub struct PagesQuery {
    #[serde(default)]
    pub pages: BTreeMap<String, PageEntry>,
}

#[derive(Debug, Deserialize)]
pub struct PageEntry {
    pub title: Option<String>,
    pub missing: Option<serde_json::Value>,
    pub invalid: Option<serde_json::Value>,
    pub original: Option<OriginalImage>,
    pub imageinfo: Option<Vec<ImageInfoEntry>>,
}

#[derive(Debug, Deserialize)]
pub struct OriginalImage {
    pub source: String,
}

#[derive(Debug, Deserialize)]
pub struct ImageInfoEntry {
    pub url: Option<String>,
    #[serde(default)]
    pub extmetadata: HashMap<String, MetadataField>,
}

#[derive(Debug, Deserialize)]
pub struct MetadataField {
    pub value: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
pub struct EntitySearchResponse {
    pub search: Option<Vec<EntityEntry>>,
    pub error: Option<ApiError>,
}

#[derive(Debug, Deserialize)]
pub struct EntityEntry {
    pub label: Option<String>,
    pub description: Option<String>,
}

/// A candidate article returned by full-text search. `title` is the identity key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RawHit {
    pub title: String,
    pub snippet: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entity {
    pub label: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageImage {
    Missing,
    Found { source: Option<String> },
}

/// File page with its `imageinfo` reduced to plain string metadata.
#[derive(Debug, Clone, Default)]
pub struct FileInfo {
    pub title: String,
    pub url: Option<String>,
    pub metadata: HashMap<String, String>,
}

impl FileInfo {
    pub fn meta(&self, key: &str) -> Option<&str> {
        self.metadata
            .get(key)
            .map(String::as_str)
            .filter(|v| !v.trim().is_empty())
    }
}

impl From<PageEntry> for FileInfo {
    fn from(page: PageEntry) -> Self {
        let info = page.imageinfo.and_then(|v| v.into_iter().next());
        let (url, metadata) = match info {
            Some(info) => {
                let metadata = info
                    .extmetadata
                    .into_iter()
                    .filter_map(|(key, field)| {
                        let text = match field.value? {
                            serde_json::Value::String(s) => s,
                            serde_json::Value::Null => return None,
                            other => other.to_string(),
                        };
                        Some((key, text))
                    })
                    .collect();
                (info.url, metadata)
            }
            None => (None, HashMap::new()),
        };
        Self {
            title: page.title.unwrap_or_default(),
            url,
            metadata,
        }
    }
}
