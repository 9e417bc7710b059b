//! Site-specific extraction.
//!
//! Everything that knows about the storefront markup lives behind the
//! [`Extractor`] trait. The walker and the review collector only see
//! domain types.
//!
//! ```text
//! listing HTML → Extractor::parse_listing → ListingPage (fields + next link)
//! detail HTML  → Extractor::parse_detail  → ReviewPage (aggregates + reviews)
//! ```

pub mod date;
pub mod detail;
pub mod listing;
pub mod product;
mod selectors;
mod site;

pub use listing::ListingPage;
pub use selectors::{CompiledSelectors, SiteSelectors};
pub use site::SiteExtractor;

use std::sync::LazyLock;

use regex::Regex;
use scraper::ElementRef;

use crate::app::Result;
use crate::domain::ReviewPage;

pub trait Extractor: Send + Sync {
    fn parse_listing(&self, html: &str) -> Result<ListingPage>;
    fn parse_detail(&self, html: &str) -> ReviewPage;
    /// CSS selector of the "show more reviews" control.
    fn show_more_selector(&self) -> &str;
}

static NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+(?:\.\d+)?").expect("number pattern"));
static INTEGER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d+").expect("integer pattern"));

/// First decimal number in `text`.
pub(crate) fn first_number(text: &str) -> Option<f64> {
    NUMBER.find(text).and_then(|m| m.as_str().parse().ok())
}

/// First run of digits in `text`.
pub(crate) fn first_integer(text: &str) -> Option<u32> {
    INTEGER.find(text).and_then(|m| m.as_str().parse().ok())
}

/// Concatenated, trimmed text of an element.
pub(crate) fn element_text(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}
