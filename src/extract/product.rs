use std::sync::LazyLock;

use regex::Regex;
use scraper::ElementRef;
use url::Url;

use crate::app::{Result, ScrapeError};
use crate::domain::ListingFields;
use crate::extract::{element_text, first_integer, first_number, CompiledSelectors};

static NICOTINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+\.?\d*)%").expect("nicotine pattern"));

/// Read the listing fields of one catalog entry.
///
/// Only the title link is required; everything else degrades to an absent
/// or zero value when the markup is missing.
pub fn extract_product(
    entry: ElementRef<'_>,
    selectors: &CompiledSelectors,
    base_url: &Url,
) -> Result<ListingFields> {
    let meta = entry
        .select(&selectors.entry_meta)
        .next()
        .unwrap_or(entry);

    let title = meta
        .select(&selectors.title)
        .next()
        .ok_or_else(|| ScrapeError::Extract("listing entry has no title link".to_string()))?;

    let name = element_text(title);
    let href = title
        .value()
        .attr("href")
        .map(str::trim)
        .ok_or_else(|| ScrapeError::Extract(format!("title link of {:?} has no href", name)))?;
    let link = base_url.join(href)?.to_string();

    let brand = name.split_whitespace().next().unwrap_or_default().to_string();
    let nicotine_pct = NICOTINE
        .captures(&name)
        .and_then(|c| c[1].parse().ok())
        .unwrap_or(0.0);

    let puffs = meta
        .select(&selectors.flavor_tags)
        .next()
        .and_then(|tags| first_integer(&element_text(tags)));

    let summary = meta.select(&selectors.review_summary).next();
    let review_count = summary
        .and_then(|s| s.select(&selectors.review_count).next())
        .and_then(|span| first_integer(&element_text(span)))
        .unwrap_or(0);
    let score = summary
        .and_then(|s| s.select(&selectors.review_score).next())
        .and_then(|span| first_number(&element_text(span)));

    let price = meta
        .select(&selectors.price)
        .next()
        .and_then(|span| first_number(&element_text(span).replace(',', "")));

    if puffs.is_none() || price.is_none() {
        tracing::warn!(
            "Incomplete listing for {}: puffs={:?} price={:?}",
            name,
            puffs,
            price
        );
    }

    Ok(ListingFields {
        brand,
        name,
        nicotine_pct,
        puffs,
        price,
        review_count,
        score,
        link,
    })
}
