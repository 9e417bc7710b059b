//! CSS selectors for the storefront and its review widget.
//!
//! Every selector the crate uses lives here so a markup change only touches
//! this file (or the `[selectors]` table in the config file).

use scraper::Selector;
use serde::Deserialize;

use crate::app::{Result, ScrapeError};

/// Selector strings, overridable from config.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SiteSelectors {
    // Listing page
    pub listing_entry: String,
    pub entry_meta: String,
    pub title: String,
    pub flavor_tags: String,
    pub review_summary: String,
    pub review_count: String,
    pub review_score: String,
    pub price: String,
    pub next_page: String,

    // Detail page
    pub show_more: String,
    pub description: String,
    pub recommend: String,
    /// Aggregate bars in flavor, sweetness, lasting order.
    pub aggregate_bars: [String; 3],
    pub review: String,
    pub review_rating: String,
    pub review_date: String,
    pub review_head: String,
    pub review_body: String,
    /// Per-review scores in flavor, sweetness, lasting order.
    pub review_scores: [String; 3],
}

impl Default for SiteSelectors {
    fn default() -> Self {
        let aggregate_bar = |row: u8| {
            format!(
                ".okeReviews-reviewsAggregate-primary > div:nth-of-type(2) > div:nth-of-type(1) \
                 > table tr:nth-of-type({row}) > td:nth-of-type(2) > div:nth-of-type(1) \
                 > div:nth-of-type(1) > div:nth-of-type(1)"
            )
        };
        let review_score = |row: u8| {
            format!(
                "article > div:nth-of-type(2) > div:nth-of-type(3) > table \
                 tr:nth-of-type({row}) > td > div > span"
            )
        };

        Self {
            listing_entry: "product-item".to_string(),
            entry_meta: "div.product-item-meta".to_string(),
            title: "a.product-item-meta__title".to_string(),
            flavor_tags: "div.flavor-tags".to_string(),
            review_summary: "div.okeReviews-reviewsSummary".to_string(),
            review_count: "span[aria-hidden=\"true\"]".to_string(),
            review_score: "span.okeReviews-a11yText".to_string(),
            price: "div.product-item-meta__price-list-container span.price".to_string(),
            next_page: "a[class=\"pagination__nav-item\"][aria-label=\"Next\"]".to_string(),

            show_more: ".okeReviews-reviews-showMore".to_string(),
            description: ".product-tabs__tab-item-content.rte > ul:nth-of-type(1)".to_string(),
            recommend: ".okeReviews-reviewsAggregate-primary > div:nth-of-type(1) > span:nth-of-type(1)"
                .to_string(),
            aggregate_bars: [aggregate_bar(1), aggregate_bar(2), aggregate_bar(3)],
            review: ".okeReviews-reviews-review".to_string(),
            review_rating: "article > div:nth-of-type(2) > div:nth-of-type(1) > div:nth-of-type(1) \
                            > div:nth-of-type(1) > span:nth-of-type(1)"
                .to_string(),
            review_date: "article > div:nth-of-type(2) > div:nth-of-type(1) > div:nth-of-type(2) \
                          > span:nth-of-type(2)"
                .to_string(),
            review_head: "article > div:nth-of-type(2) > div:nth-of-type(2) > h2".to_string(),
            review_body: "article > div:nth-of-type(2) > div:nth-of-type(2) > div:nth-of-type(1) \
                          > div:nth-of-type(1)"
                .to_string(),
            review_scores: [review_score(1), review_score(2), review_score(3)],
        }
    }
}

/// Parsed form of [`SiteSelectors`].
#[derive(Debug, Clone)]
pub struct CompiledSelectors {
    pub listing_entry: Selector,
    pub entry_meta: Selector,
    pub title: Selector,
    pub flavor_tags: Selector,
    pub review_summary: Selector,
    pub review_count: Selector,
    pub review_score: Selector,
    pub price: Selector,
    pub next_page: Selector,
    pub description: Selector,
    pub recommend: Selector,
    pub aggregate_bars: [Selector; 3],
    pub review: Selector,
    pub review_rating: Selector,
    pub review_date: Selector,
    pub review_head: Selector,
    pub review_body: Selector,
    pub review_scores: [Selector; 3],
}

fn compile(selector: &str) -> Result<Selector> {
    Selector::parse(selector).map_err(|e| ScrapeError::Selector {
        selector: selector.to_string(),
        reason: e.to_string(),
    })
}

fn compile_three(selectors: &[String; 3]) -> Result<[Selector; 3]> {
    Ok([
        compile(&selectors[0])?,
        compile(&selectors[1])?,
        compile(&selectors[2])?,
    ])
}

impl SiteSelectors {
    pub fn compile(&self) -> Result<CompiledSelectors> {
        // show_more is handed to the browser as-is; parse it anyway so a
        // typo fails at startup rather than after the first listing page.
        compile(&self.show_more)?;

        Ok(CompiledSelectors {
            listing_entry: compile(&self.listing_entry)?,
            entry_meta: compile(&self.entry_meta)?,
            title: compile(&self.title)?,
            flavor_tags: compile(&self.flavor_tags)?,
            review_summary: compile(&self.review_summary)?,
            review_count: compile(&self.review_count)?,
            review_score: compile(&self.review_score)?,
            price: compile(&self.price)?,
            next_page: compile(&self.next_page)?,
            description: compile(&self.description)?,
            recommend: compile(&self.recommend)?,
            aggregate_bars: compile_three(&self.aggregate_bars)?,
            review: compile(&self.review)?,
            review_rating: compile(&self.review_rating)?,
            review_date: compile(&self.review_date)?,
            review_head: compile(&self.review_head)?,
            review_body: compile(&self.review_body)?,
            review_scores: compile_three(&self.review_scores)?,
        })
    }
}
