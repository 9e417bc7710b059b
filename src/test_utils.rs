//! Fixtures and fakes shared by unit tests.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::app::{Result, ScrapeError};
use crate::domain::{DateBucket, DetailAggregates, ProductRecord, ReviewPage, ReviewRecord};
use crate::fetcher::{FetchError, Fetcher};
use crate::scraper::ReviewCollector;

pub const BASE_URL: &str = "https://shop.test/";

pub fn product(name: &str) -> ProductRecord {
    ProductRecord {
        brand: name.split_whitespace().next().unwrap_or_default().to_string(),
        name: name.to_string(),
        capacity_ml: Some(13.0),
        nicotine_pct: 5.0,
        puffs: Some(5000),
        price: Some(17.99),
        review_count: 212,
        score: Some(4.9),
        recommend_pct: Some(96.0),
        flavor: Some(88.0),
        sweetness: Some(72.5),
        lasting: Some(91.0),
        link: format!("{}products/{}", BASE_URL, name.len()),
    }
}

/// One `product-item` as the catalog renders it.
pub fn listing_entry_html(name: &str, href: &str, reviews: Option<(u32, f64)>) -> String {
    let summary = reviews
        .map(|(count, score)| {
            format!(
                r#"<div class="okeReviews-reviewsSummary">
                    <span aria-hidden="true">({count})</span>
                    <span class="okeReviews-a11yText">Rated {score} out of 5 stars</span>
                </div>"#
            )
        })
        .unwrap_or_default();

    format!(
        r#"<product-item class="product-item">
            <div class="product-item-meta">
                <a class="product-item-meta__title" href="{href}">{name}</a>
                <div class="flavor-tags"><span>5000 Puffs</span></div>
                {summary}
                <div class="product-item-meta__price-list-container">
                    <div class="price-list"><span class="price">$17.99</span></div>
                </div>
            </div>
        </product-item>"#
    )
}

/// `count` entries named "Device N 5%" starting after `offset`, plus pagination.
pub fn listing_page_html(offset: usize, count: usize, next_href: Option<&str>) -> String {
    let mut html = String::from(
        r#"<a class="pagination__nav-item" aria-label="Previous" href="/prev">‹</a>"#,
    );
    for i in 0..count {
        let n = offset + i + 1;
        html.push_str(&listing_entry_html(
            &format!("Device {} 5%", n),
            &format!("/products/device-{}", n),
            Some((n as u32, 4.5)),
        ));
    }
    if let Some(href) = next_href {
        html.push_str(&format!(
            r#"<a class="pagination__nav-item" aria-label="Next" href="{href}">›</a>"#
        ));
    }
    html
}

pub struct ReviewFixture {
    pub rating: f64,
    pub date: String,
    pub head: String,
    pub body: String,
    pub scores: Option<[f64; 3]>,
}

/// A product detail page after every review has been expanded.
pub fn detail_page_html(
    description: Option<&str>,
    aggregate: Option<(f64, [f64; 3])>,
    reviews: &[ReviewFixture],
) -> String {
    let description = description
        .map(|items| {
            format!(r#"<div class="product-tabs__tab-item-content rte"><p>Specs</p><ul>{items}</ul></div>"#)
        })
        .unwrap_or_default();

    let aggregate = aggregate
        .map(|(recommend, bars)| {
            let rows: String = ["Flavor", "Sweetness", "Long Lasting"]
                .iter()
                .zip(bars)
                .map(|(label, width)| {
                    format!(
                        r#"<tr><td>{label}</td><td><div><div><div style="width: {width}%;"></div></div></div></td></tr>"#
                    )
                })
                .collect();
            format!(
                r#"<div class="okeReviews-reviewsAggregate-primary">
                    <div><span>{recommend}%</span><span> would recommend</span></div>
                    <div><div><table><tbody>{rows}</tbody></table></div></div>
                </div>"#
            )
        })
        .unwrap_or_default();

    let reviews: String = reviews
        .iter()
        .map(|r| {
            let scores = r
                .scores
                .map(|s| {
                    format!(
                        r#"<div><table><tbody>
                            <tr><td><div><span>Flavor {}</span></div></td></tr>
                            <tr><td><div><span>Sweetness {}</span></div></td></tr>
                            <tr><td><div><span>Long Lasting {}</span></div></td></tr>
                        </tbody></table></div>"#,
                        s[0], s[1], s[2]
                    )
                })
                .unwrap_or_default();
            format!(
                r#"<div class="okeReviews-reviews-review">
                    <article>
                        <div>Verified Buyer</div>
                        <div>
                            <div>
                                <div><div><span>Rated {rating} out of 5</span></div></div>
                                <div><span>Posted</span><span>{date}</span></div>
                            </div>
                            <div>
                                <h2>{head}</h2>
                                <div><div>{body}</div></div>
                            </div>
                            {scores}
                        </div>
                    </article>
                </div>"#,
                rating = r.rating,
                date = r.date,
                head = r.head,
                body = r.body,
            )
        })
        .collect();

    format!(
        r#"<html><body>{description}{aggregate}<div class="okeReviews-reviews">{reviews}</div></body></html>"#
    )
}

/// Serves generated listing pages keyed by URL.
pub struct FakeFetcher {
    pages: HashMap<String, String>,
    failures: Mutex<HashMap<String, FetchError>>,
}

impl FakeFetcher {
    pub fn page_url(index: usize) -> String {
        format!("{}collections/test?page={}", BASE_URL, index + 1)
    }

    /// One listing page per element of `sizes`, linked by "Next".
    pub fn with_pages(sizes: &[usize]) -> Self {
        let mut pages = HashMap::new();
        let mut offset = 0;
        for (i, &size) in sizes.iter().enumerate() {
            let next = (i + 1 < sizes.len()).then(|| format!("/collections/test?page={}", i + 2));
            pages.insert(
                Self::page_url(i),
                listing_page_html(offset, size, next.as_deref()),
            );
            offset += size;
        }
        Self {
            pages,
            failures: Mutex::new(HashMap::new()),
        }
    }

    /// Fail the next fetch of page `index` with `error`.
    pub fn fail_page(&self, index: usize, error: FetchError) {
        self.failures
            .lock()
            .unwrap()
            .insert(Self::page_url(index), error);
    }
}

#[async_trait]
impl Fetcher for FakeFetcher {
    async fn fetch(&self, url: &str) -> std::result::Result<String, FetchError> {
        if let Some(err) = self.failures.lock().unwrap().remove(url) {
            return Err(err);
        }
        Ok(self
            .pages
            .get(url)
            .unwrap_or_else(|| panic!("unexpected fetch of {}", url))
            .clone())
    }
}

/// Records every product id it is asked for and can be told to start failing.
pub struct FakeCollector {
    seen: Mutex<Vec<usize>>,
    limit: Mutex<usize>,
}

impl Default for FakeCollector {
    fn default() -> Self {
        Self {
            seen: Mutex::new(Vec::new()),
            limit: Mutex::new(usize::MAX),
        }
    }
}

impl FakeCollector {
    /// Succeed for the first `calls` collections in total, fail after that.
    pub fn fail_after(&self, calls: usize) {
        *self.limit.lock().unwrap() = calls;
    }

    pub fn seen_ids(&self) -> Vec<usize> {
        self.seen.lock().unwrap().clone()
    }
}

#[async_trait]
impl ReviewCollector for FakeCollector {
    async fn collect(&self, _url: &str, product_id: usize) -> Result<ReviewPage> {
        let calls = {
            let mut seen = self.seen.lock().unwrap();
            seen.push(product_id);
            seen.len()
        };
        if calls > *self.limit.lock().unwrap() {
            return Err(ScrapeError::Browser("browser crashed".into()));
        }

        Ok(ReviewPage {
            aggregates: DetailAggregates {
                capacity_ml: Some(13.0),
                recommend_pct: Some(95.0),
                flavor: Some(90.0),
                sweetness: Some(80.0),
                lasting: Some(70.0),
            },
            reviews: vec![ReviewRecord {
                rating: Some(5.0),
                date_text: "6 months".into(),
                date_bucket: DateBucket::FiveMonthsToOneYear,
                head: "Good".into(),
                body: "Would buy again.".into(),
                flavor: None,
                sweetness: None,
                lasting: None,
            }],
        })
    }
}
