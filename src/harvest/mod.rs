//! Image harvesting for a resolved article: its lead image plus filtered Commons photos.

mod filter;
mod metadata;

pub use metadata::ImageRecord;

use futures::future::OptionFuture;
use tracing::{debug, warn};

use crate::wiki::WikiError;
use crate::wiki::mediawiki::MediaWikiClient;
use crate::wiki::types::PageImage;
use filter::{file_name_from_url, select_photos};

#[derive(Debug, Clone, PartialEq)]
pub enum Harvest {
    /// The wiki reports the page as missing or its title as invalid.
    PageNotFound,
    Images(Vec<ImageRecord>),
}

pub struct Harvester {
    wikipedia: MediaWikiClient,
    commons: MediaWikiClient,
    commons_limit: usize,
    max_extra_images: usize,
}

impl Harvester {
    pub fn new(
        wikipedia: MediaWikiClient,
        commons: MediaWikiClient,
        commons_limit: usize,
        max_extra_images: usize,
    ) -> Self {
        Self {
            wikipedia,
            commons,
            commons_limit,
            max_extra_images,
        }
    }

    /// Lead image first, then Commons photos. Only the page lookup itself can fail.
    pub async fn harvest(&self, page_title: &str) -> Result<Harvest, WikiError> {
        let source = match self.wikipedia.page_image(page_title).await? {
            PageImage::Missing => return Ok(Harvest::PageNotFound),
            PageImage::Found { source } => source,
        };

        let lead = OptionFuture::from(source.map(|src| self.lead_image(src)));
        let (lead, extra) = tokio::join!(lead, self.commons_images(page_title));

        let images: Vec<ImageRecord> = lead.into_iter().chain(extra).collect();
        debug!(page_title, count = images.len(), "harvest complete");
        Ok(Harvest::Images(images))
    }

    async fn lead_image(&self, source: String) -> ImageRecord {
        let Some(file_name) = file_name_from_url(&source) else {
            return ImageRecord::unattributed(source);
        };

        match self.wikipedia.image_info(&[format!("File:{file_name}")]).await {
            Ok(infos) => match infos.into_iter().find(|i| i.url.is_some()) {
                Some(info) => ImageRecord::from_file_info(&info, source),
                None => ImageRecord::unattributed(source),
            },
            Err(e) => {
                warn!(file = %file_name, error = %e, "lead image metadata unavailable");
                ImageRecord::unattributed(source)
            }
        }
    }

    async fn commons_images(&self, page_title: &str) -> Vec<ImageRecord> {
        let hits = match self.commons.search_files(page_title, self.commons_limit).await {
            Ok(hits) => hits,
            Err(e) => {
                warn!(page_title, error = %e, "commons search failed");
                return Vec::new();
            }
        };

        let titles = select_photos(&hits, self.max_extra_images);
        if titles.is_empty() {
            return Vec::new();
        }

        match self.commons.image_info(&titles).await {
            Ok(infos) => infos
                .into_iter()
                .filter_map(|info| {
                    let url = info.url.clone()?;
                    Some(ImageRecord::from_file_info(&info, url))
                })
                .collect(),
            Err(e) => {
                warn!(page_title, error = %e, "commons image info failed");
                Vec::new()
            }
        }
    }
}
