use scraper::Html;
use url::Url;

use crate::app::Result;
use crate::domain::ListingFields;
use crate::extract::product::extract_product;
use crate::extract::CompiledSelectors;

/// One parsed catalog page.
#[derive(Debug)]
pub struct ListingPage {
    /// Entries in page order. A malformed entry keeps its slot so positions
    /// stay aligned with the page.
    pub entries: Vec<Result<ListingFields>>,
    pub next_url: Option<String>,
}

impl ListingPage {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

pub fn parse_listing(html: &str, selectors: &CompiledSelectors, base_url: &Url) -> Result<ListingPage> {
    let doc = Html::parse_document(html);

    let entries = doc
        .select(&selectors.listing_entry)
        .map(|entry| extract_product(entry, selectors, base_url))
        .collect();

    let next_url = doc
        .select(&selectors.next_page)
        .find_map(|a| a.value().attr("href"))
        .map(|href| base_url.join(href.trim()))
        .transpose()?
        .map(|u| u.to_string());

    Ok(ListingPage { entries, next_url })
}
