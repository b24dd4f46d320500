use serde::Serialize;

use crate::wiki::types::FileInfo;

pub const UNKNOWN: &str = "Unknown";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImageRecord {
    pub url: String,
    pub attribution: String,
    pub license: String,
    pub description: String,
}

impl ImageRecord {
    /// An image we could not fetch metadata for.
    pub fn unattributed(url: String) -> Self {
        Self {
            url,
            attribution: UNKNOWN.to_string(),
            license: UNKNOWN.to_string(),
            description: String::new(),
        }
    }

    /// Attribution and license from `extmetadata`, falling back field by field.
    pub fn from_file_info(info: &FileInfo, url: String) -> Self {
        let attribution = info
            .meta("Attribution")
            .or_else(|| info.meta("Artist"))
            .map_or_else(|| UNKNOWN.to_string(), render);
        let license = info
            .meta("LicenseShortName")
            .or_else(|| info.meta("License"))
            .map_or_else(|| UNKNOWN.to_string(), render);
        let description = info
            .meta("ImageDescription")
            .map(render)
            .unwrap_or_else(|| info.title.clone());

        Self {
            url,
            attribution,
            license,
            description,
        }
    }
}

/// Commons metadata is free-form HTML; markup is converted to Markdown.
fn render(value: &str) -> String {
    if value.contains('<') {
        html2md::rewrite_html(value, false).trim().to_string()
    } else {
        value.trim().to_string()
    }
}
