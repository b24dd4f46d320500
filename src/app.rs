use reqwest::Client;
use tracing::{info, warn};

use crate::config::Settings;
use crate::harvest::Harvester;
use crate::report::{ImageStatus, MatchReport};
use crate::resolve::{MatchEngine, SearchTerm};
use crate::translate::TranslatorBackend;
use crate::translate::libretranslate::LibreTranslateClient;
use crate::translate::mymemory::MyMemoryClient;
use crate::wiki::Endpoint;
use crate::wiki::mediawiki::MediaWikiClient;
use crate::wiki::wikidata::WikidataClient;

type ProductionEngine = MatchEngine<TranslatorBackend, MediaWikiClient, WikidataClient>;

/// Resolution engine and image harvester wired to the live providers.
pub struct WikiMatch {
    engine: ProductionEngine,
    harvester: Harvester,
}

impl WikiMatch {
    pub fn new(http: Client, settings: &Settings) -> Self {
        let endpoint = |base_url: &str| Endpoint::new(http.clone(), base_url, settings);

        let wikipedia = MediaWikiClient::new(endpoint(&settings.wikipedia_url), settings.search_limit);
        let commons = MediaWikiClient::new(endpoint(&settings.commons_url), settings.commons_limit);
        let wikidata = WikidataClient::new(endpoint(&settings.wikidata_url), settings.entity_limit);

        let translators = vec![
            TranslatorBackend::MyMemory(MyMemoryClient::new(
                http.clone(),
                &settings.mymemory_url,
                settings.request_timeout,
            )),
            TranslatorBackend::LibreTranslate(LibreTranslateClient::new(
                http.clone(),
                &settings.libretranslate_url,
                settings.request_timeout,
            )),
        ];

        Self {
            engine: MatchEngine::new(translators, wikipedia.clone(), wikidata, settings.snippet_bonus),
            harvester: Harvester::new(
                wikipedia,
                commons,
                settings.commons_limit,
                settings.max_extra_images,
            ),
        }
    }

    /// Resolves `term` and, when asked, harvests images for the best match.
    pub async fn lookup(&self, term: &SearchTerm, with_images: bool) -> MatchReport {
        let resolution = self.engine.find_best_match(term).await;

        let images = match resolution.best() {
            Some(best) if with_images => match self.harvester.harvest(&best.title).await {
                Ok(harvest) => ImageStatus::Harvested(harvest),
                Err(e) => {
                    warn!(page = %best.title, error = %e, "image harvest failed");
                    ImageStatus::Failed(e)
                }
            },
            _ => ImageStatus::Skipped,
        };

        let report = MatchReport::build(&resolution, images);
        info!(
            page = report.page_title.as_deref(),
            images = report.image_count,
            "lookup complete"
        );
        report
    }
}
