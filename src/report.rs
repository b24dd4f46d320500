//! Caller-facing output: the JSON match report and its Markdown rendering.

use serde::Serialize;

use crate::harvest::{Harvest, ImageRecord};
use crate::resolve::Resolution;
use crate::wiki::WikiError;

const ALTERNATIVES: usize = 3;

/// What happened on the image side after resolution.
#[derive(Debug)]
pub enum ImageStatus {
    /// Images were not requested, or there was no page to harvest.
    Skipped,
    Failed(WikiError),
    Harvested(Harvest),
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchReport {
    pub keyword: String,
    pub queried_keywords: QueriedKeywords,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub relevance_score: Option<f64>,
    pub alternative_matches: Vec<Alternative>,
    pub images: Vec<ImageRecord>,
    pub image_count: usize,
    pub error: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QueriedKeywords {
    pub original: String,
    pub translated: Option<String>,
    pub translation_method: Option<String>,
    pub knowledge_base_label: Option<String>,
    pub search_terms_used: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct Alternative {
    pub title: String,
    pub score: f64,
}

impl MatchReport {
    pub fn build(resolution: &Resolution, images: ImageStatus) -> Self {
        let keyword = resolution.term.to_string();
        let queried_keywords = QueriedKeywords {
            original: keyword.clone(),
            translated: resolution
                .translation
                .as_ref()
                .map(|t| t.translated_text.clone()),
            translation_method: resolution
                .translation
                .as_ref()
                .map(|t| t.provider_name.clone()),
            knowledge_base_label: resolution.entity_label.clone(),
            search_terms_used: resolution
                .search_terms_used()
                .into_iter()
                .map(String::from)
                .collect(),
        };

        let Some(best) = resolution.best() else {
            return Self {
                error: Some(format!("No Wikipedia articles found for keyword: {keyword}")),
                keyword,
                queried_keywords,
                page_title: None,
                relevance_score: None,
                alternative_matches: Vec::new(),
                images: Vec::new(),
                image_count: 0,
            };
        };

        let alternative_matches = resolution
            .alternatives(ALTERNATIVES)
            .iter()
            .map(|c| Alternative {
                title: c.title.clone(),
                score: round2(c.relevance_score),
            })
            .collect();

        let (images, error) = match images {
            ImageStatus::Skipped => (Vec::new(), None),
            ImageStatus::Failed(e) => (Vec::new(), Some(format!("Wikipedia API error: {e}"))),
            ImageStatus::Harvested(Harvest::PageNotFound) => (
                Vec::new(),
                Some(format!("Page not found for keyword: {keyword}")),
            ),
            ImageStatus::Harvested(Harvest::Images(images)) => {
                let error = images
                    .is_empty()
                    .then(|| "No images found for this keyword".to_string());
                (images, error)
            }
        };

        Self {
            page_title: Some(best.title.clone()),
            relevance_score: Some(round2(best.relevance_score)),
            alternative_matches,
            image_count: images.len(),
            images,
            error,
            keyword,
            queried_keywords,
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn to_markdown(&self) -> String {
        let mut output = format!("# Match: {}\n\n", one_line(&self.keyword));

        match (&self.page_title, self.relevance_score) {
            (Some(title), Some(score)) => {
                output.push_str(&format!("**Best match:** {} (relevance {score:.2})\n\n", one_line(title)));
            }
            _ => output.push_str("**Best match:** none\n\n"),
        }

        let q = &self.queried_keywords;
        if let (Some(translated), Some(method)) = (&q.translated, &q.translation_method) {
            output.push_str(&format!("Translated to \"{}\" via {method}.\n", one_line(translated)));
        }
        if let Some(label) = &q.knowledge_base_label {
            output.push_str(&format!("Wikidata label: \"{}\".\n", one_line(label)));
        }
        output.push_str(&format!("Queries: {}\n\n", q.search_terms_used.join(", ")));

        if !self.alternative_matches.is_empty() {
            output.push_str("## Alternatives\n\n");
            for alt in &self.alternative_matches {
                output.push_str(&format!("- {} ({:.2})\n", one_line(&alt.title), alt.score));
            }
            output.push('\n');
        }

        if !self.images.is_empty() {
            output.push_str(&format!("## Images ({})\n\n", self.image_count));
            for image in &self.images {
                let label = if image.description.is_empty() {
                    &image.url
                } else {
                    &image.description
                };
                output.push_str(&format!(
                    "- [{}]({}) | {} | {}\n",
                    escape_link(&one_line(label)),
                    escape_link(&image.url),
                    one_line(&image.license),
                    one_line(&image.attribution),
                ));
            }
            output.push('\n');
        }

        if let Some(error) = &self.error {
            output.push_str(&format!("> **Note:** {}\n", one_line(error)));
        }

        output
    }
}

fn round2(score: f64) -> f64 {
    (score * 100.0).round() / 100.0
}

/// Backslash-escapes the characters that terminate Markdown link text or targets.
fn escape_link(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        if matches!(c, '[' | ']' | '(' | ')') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

/// Collapses line breaks so a value cannot escape its list item or heading.
fn one_line(s: &str) -> String {
    s.split(['\n', '\r'])
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}
