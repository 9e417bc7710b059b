use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::app::error::Result;
use crate::checkpoint::{CheckpointStore, FileCheckpointStore};
use crate::config::Config;
use crate::extract::{Extractor, SiteExtractor};
use crate::fetcher::{Fetcher, HttpFetcher};
use crate::output::PRODUCTS_TABLE;
use crate::scraper::{ChromeReviewCollector, ReviewCollector};
use crate::walker::PaginationWalker;

pub struct AppContext {
    pub config: Config,
    pub store: Arc<FileCheckpointStore>,
    pub fetcher: Arc<dyn Fetcher + Send + Sync>,
    pub extractor: Arc<dyn Extractor>,
    pub collector: Arc<dyn ReviewCollector>,
}

impl AppContext {
    pub fn new(config_path: Option<&Path>) -> Result<Self> {
        let config = Config::load(config_path)?;
        Self::from_config(config)
    }

    pub fn from_config(config: Config) -> Result<Self> {
        let store = Arc::new(FileCheckpointStore::new(&config.output.data_dir)?);
        let fetcher: Arc<dyn Fetcher + Send + Sync> = Arc::new(HttpFetcher::new(&config.fetch)?);
        let extractor: Arc<dyn Extractor> =
            Arc::new(SiteExtractor::new(&config.selectors, &config.site.base_url)?);
        let collector: Arc<dyn ReviewCollector> = Arc::new(ChromeReviewCollector::new(
            config.scraper.clone(),
            extractor.clone(),
        ));

        Ok(Self {
            config,
            store,
            fetcher,
            extractor,
            collector,
        })
    }

    pub fn walker(&self) -> PaginationWalker {
        let store: Arc<dyn CheckpointStore + Send + Sync> = self.store.clone();
        PaginationWalker::new(
            self.fetcher.clone(),
            self.extractor.clone(),
            self.collector.clone(),
            store,
            self.config.output.data_dir.clone(),
            self.config.site.start_url(),
        )
    }

    pub fn products_table(&self) -> PathBuf {
        self.config.output.data_dir.join(PRODUCTS_TABLE)
    }
}
