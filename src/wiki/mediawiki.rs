use tracing::debug;

use super::types::{FileInfo, PageImage, PagesQuery, QueryResponse, RawHit, SearchQuery};
use super::{ArticleSearch, Endpoint, WikiError, check_api_error};

/// The File: namespace, where Commons keeps media descriptions.
const FILE_NAMESPACE: &str = "6";

/// Client for a MediaWiki `api.php` endpoint (English Wikipedia or Wikimedia Commons).
#[derive(Clone)]
pub struct MediaWikiClient {
    endpoint: Endpoint,
    search_limit: usize,
}

impl MediaWikiClient {
    pub fn new(endpoint: Endpoint, search_limit: usize) -> Self {
        Self {
            endpoint,
            search_limit,
        }
    }

    /// `list=search` over articles, in the order the wiki ranks them.
    pub async fn search_articles(&self, query: &str, limit: usize) -> Result<Vec<RawHit>, WikiError> {
        self.search_in(query, limit, None).await
    }

    /// `list=search` restricted to the File: namespace.
    pub async fn search_files(&self, query: &str, limit: usize) -> Result<Vec<RawHit>, WikiError> {
        self.search_in(query, limit, Some(FILE_NAMESPACE)).await
    }

    async fn search_in(
        &self,
        query: &str,
        limit: usize,
        namespace: Option<&str>,
    ) -> Result<Vec<RawHit>, WikiError> {
        let limit = limit.to_string();
        let mut params = vec![
            ("action", "query"),
            ("list", "search"),
            ("srsearch", query),
            ("srlimit", limit.as_str()),
        ];
        if let Some(ns) = namespace {
            params.push(("srnamespace", ns));
        }

        let body: QueryResponse<SearchQuery> = self.endpoint.get_json(&params).await?;
        check_api_error(body.error)?;

        let hits: Vec<RawHit> = body
            .query
            .map(|q| q.search)
            .unwrap_or_default()
            .into_iter()
            .map(|entry| RawHit {
                title: entry.title,
                snippet: entry.snippet,
            })
            .collect();

        debug!(query, count = hits.len(), "mediawiki search complete");
        Ok(hits)
    }

    /// Original-resolution lead image of a page (`prop=pageimages`).
    pub async fn page_image(&self, title: &str) -> Result<PageImage, WikiError> {
        let params = [
            ("action", "query"),
            ("prop", "pageimages"),
            ("piprop", "original"),
            ("titles", title),
        ];
        let body: QueryResponse<PagesQuery> = self.endpoint.get_json(&params).await?;
        check_api_error(body.error)?;

        let page = body
            .query
            .and_then(|q| q.pages.into_values().next())
            .ok_or_else(|| WikiError::Malformed("no page in pageimages response".into()))?;

        if page.missing.is_some() || page.invalid.is_some() {
            return Ok(PageImage::Missing);
        }
        Ok(PageImage::Found {
            source: page.original.map(|o| o.source),
        })
    }

    /// URL and extended metadata for each file title, fetched in one request.
    pub async fn image_info(&self, titles: &[String]) -> Result<Vec<FileInfo>, WikiError> {
        if titles.is_empty() {
            return Ok(Vec::new());
        }
        let joined = titles.join("|");
        let params = [
            ("action", "query"),
            ("prop", "imageinfo"),
            ("iiprop", "url|extmetadata"),
            ("titles", joined.as_str()),
        ];
        let body: QueryResponse<PagesQuery> = self.endpoint.get_json(&params).await?;
        check_api_error(body.error)?;

        Ok(body
            .query
            .map(|q| q.pages.into_values().map(FileInfo::from).collect())
            .unwrap_or_default())
    }
}

impl ArticleSearch for MediaWikiClient {
    async fn search(&self, query: &str) -> Result<Vec<RawHit>, WikiError> {
        self.search_articles(query, self.search_limit).await
    }
}
