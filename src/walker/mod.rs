//! Resumable walk over the paginated catalog.
//!
//! The walker fetches one listing page at a time and processes its entries in
//! order. After each entry the checkpoint pair is saved, so an interrupted
//! walk resumes at the first unprocessed entry: pages that were finished are
//! skipped whole, and positions below the last marker are skipped on the
//! page in progress.

use std::path::PathBuf;
use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::app::Result;
use crate::checkpoint::CheckpointStore;
use crate::domain::{EntryDecision, ListingFields, ProductRecord, ResumeCursor};
use crate::extract::Extractor;
use crate::fetcher::Fetcher;
use crate::output;
use crate::scraper::ReviewCollector;

/// Counters for one call to [`PaginationWalker::walk`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WalkSummary {
    pub pages: usize,
    pub processed: usize,
    pub skipped: usize,
}

pub struct PaginationWalker {
    fetcher: Arc<dyn Fetcher + Send + Sync>,
    extractor: Arc<dyn Extractor>,
    collector: Arc<dyn ReviewCollector>,
    store: Arc<dyn CheckpointStore + Send + Sync>,
    reviews_dir: PathBuf,
    start_url: String,
}

impl PaginationWalker {
    pub fn new(
        fetcher: Arc<dyn Fetcher + Send + Sync>,
        extractor: Arc<dyn Extractor>,
        collector: Arc<dyn ReviewCollector>,
        store: Arc<dyn CheckpointStore + Send + Sync>,
        reviews_dir: PathBuf,
        start_url: String,
    ) -> Self {
        Self {
            fetcher,
            extractor,
            collector,
            store,
            reviews_dir,
            start_url,
        }
    }

    pub async fn walk(&self) -> Result<WalkSummary> {
        let checkpoint = self.store.load()?;
        let mut cursor = ResumeCursor::new(checkpoint.markers, self.start_url.clone());
        let mut summary = WalkSummary::default();
        let mut page_size: Option<usize> = None;

        info!(
            "Starting walk at {} ({} entries already processed, {} pages complete)",
            cursor.page_url,
            cursor.markers.processed_count(),
            cursor.markers.completed_pages()
        );

        loop {
            let html = self.fetcher.fetch(&cursor.page_url).await?;
            let page = self.extractor.parse_listing(&html)?;
            summary.pages += 1;

            let size = *page_size.get_or_insert(page.len());
            if page.len() != size && page.next_url.is_some() {
                warn!(
                    "Page {} has {} entries, expected {}",
                    cursor.page_index,
                    page.len(),
                    size
                );
            }
            info!(
                "Page {}: {} entries at {}",
                cursor.page_index,
                page.len(),
                cursor.page_url
            );

            let page_len = page.len();
            for (position, entry) in page.entries.into_iter().enumerate() {
                let position = position as u32;

                // Reload each time: the pair on disk is the source of truth.
                let mut checkpoint = self.store.load()?;
                cursor.markers = checkpoint.markers.clone();

                match cursor.decide(position) {
                    EntryDecision::SkipPage => {
                        debug!("Page {} already scraped, moving on", cursor.page_index);
                        summary.skipped += page_len - position as usize;
                        break;
                    }
                    EntryDecision::SkipEntry => {
                        debug!(
                            "Entry {} on page {} already scraped (last marker {})",
                            position,
                            cursor.page_index,
                            cursor.markers.last()
                        );
                        summary.skipped += 1;
                        continue;
                    }
                    EntryDecision::Process => {}
                }

                let product_id = cursor.product_id(position);
                info!(
                    "Scraping product {} (page {}, entry {}, last marker {})",
                    product_id,
                    cursor.page_index,
                    position,
                    cursor.markers.last()
                );

                let record = self.process_entry(entry?, product_id).await?;

                checkpoint.products.push(record);
                checkpoint.markers.advance(position, page_len);
                self.store.save(&checkpoint)?;
                cursor.markers = checkpoint.markers;
                summary.processed += 1;
            }

            match page.next_url {
                Some(next) => cursor.next_page(next, page_len),
                None => break,
            }
        }

        info!(
            "Walk finished: {} pages, {} processed, {} skipped",
            summary.pages, summary.processed, summary.skipped
        );
        Ok(summary)
    }

    async fn process_entry(&self, listing: ListingFields, product_id: usize) -> Result<ProductRecord> {
        let detail = self.collector.collect(&listing.link, product_id).await?;
        let path = output::write_reviews(&self.reviews_dir, product_id, &detail.reviews)?;
        debug!("Wrote {} reviews to {}", detail.reviews.len(), path.display());

        Ok(ProductRecord::new(listing, detail.aggregates))
    }
}
