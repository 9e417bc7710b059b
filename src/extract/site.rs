use url::Url;

use crate::app::Result;
use crate::domain::ReviewPage;
use crate::extract::detail::parse_detail;
use crate::extract::listing::{parse_listing, ListingPage};
use crate::extract::{CompiledSelectors, Extractor, SiteSelectors};

/// [`Extractor`] for the storefront, driven by configurable selectors.
pub struct SiteExtractor {
    selectors: CompiledSelectors,
    show_more: String,
    base_url: Url,
}

impl SiteExtractor {
    pub fn new(selectors: &SiteSelectors, base_url: &str) -> Result<Self> {
        Ok(Self {
            selectors: selectors.compile()?,
            show_more: selectors.show_more.clone(),
            base_url: Url::parse(base_url)?,
        })
    }
}

impl Extractor for SiteExtractor {
    fn parse_listing(&self, html: &str) -> Result<ListingPage> {
        parse_listing(html, &self.selectors, &self.base_url)
    }

    fn parse_detail(&self, html: &str) -> ReviewPage {
        parse_detail(html, &self.selectors)
    }

    fn show_more_selector(&self) -> &str {
        &self.show_more
    }
}
