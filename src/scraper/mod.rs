//! Browser-driven review collection.
//!
//! Product detail pages load their reviews a page at a time behind a
//! "show more" control, so they are read through a real browser rather
//! than the listing fetcher.
//!
//! # Architecture
//!
//! ```text
//! detail URL → browser session → expand reviews → page HTML → Extractor → ReviewPage
//! ```
//!
//! # Usage
//!
//! ```rust,ignore
//! use huffscrape::scraper::{ChromeReviewCollector, ReviewCollector, ScraperConfig};
//!
//! let collector = ChromeReviewCollector::new(ScraperConfig::default(), extractor);
//! let page = collector.collect("https://example.com/products/item", 1).await?;
//! ```

mod chrome;
mod config;
mod expand;

pub use chrome::ChromeReviewCollector;
pub use config::ScraperConfig;

use crate::app::Result;
use crate::domain::ReviewPage;
use async_trait::async_trait;

/// Trait for review collection implementations
#[async_trait]
pub trait ReviewCollector: Send + Sync {
    /// Open a product detail page, expand every review, and read it.
    ///
    /// `product_id` is the 1-based position of the product across the walk.
    async fn collect(&self, url: &str, product_id: usize) -> Result<ReviewPage>;
}
