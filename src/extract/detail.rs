use std::sync::LazyLock;

use regex::Regex;
use scraper::{ElementRef, Html, Selector};

use crate::domain::{DetailAggregates, ReviewPage, ReviewRecord};
use crate::extract::date::{classify, relative_phrase};
use crate::extract::{element_text, first_number, CompiledSelectors};

static CAPACITY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+(?:\.\d+)?)\s?mL").expect("capacity pattern"));

/// Parse a fully expanded product detail page.
pub fn parse_detail(html: &str, selectors: &CompiledSelectors) -> ReviewPage {
    let doc = Html::parse_document(html);
    let root = doc.root_element();

    let aggregates = parse_aggregates(root, selectors);
    let reviews = doc
        .select(&selectors.review)
        .map(|review| parse_review(review, selectors))
        .collect();

    ReviewPage {
        aggregates,
        reviews,
    }
}

fn parse_aggregates(root: ElementRef<'_>, selectors: &CompiledSelectors) -> DetailAggregates {
    let capacity_ml = root
        .select(&selectors.description)
        .next()
        .map(element_text)
        .and_then(|text| {
            CAPACITY
                .captures(&text)
                .and_then(|c| c[1].parse().ok())
        });

    let recommend = root.select(&selectors.recommend).next();
    let recommend_pct = recommend.and_then(|span| first_number(&element_text(span)));

    // Sub-score bars only exist alongside the recommendation summary.
    let bar = |selector: &Selector| -> Option<f64> {
        recommend?;
        root.select(selector)
            .next()
            .and_then(|div| div.value().attr("style"))
            .and_then(first_number)
    };
    let [flavor_bar, sweet_bar, lasting_bar] = &selectors.aggregate_bars;

    DetailAggregates {
        capacity_ml,
        recommend_pct,
        flavor: bar(flavor_bar),
        sweetness: bar(sweet_bar),
        lasting: bar(lasting_bar),
    }
}

fn parse_review(review: ElementRef<'_>, selectors: &CompiledSelectors) -> ReviewRecord {
    let text_of = |selector: &Selector| {
        review
            .select(selector)
            .next()
            .map(element_text)
            .unwrap_or_default()
    };
    // Reviews older than the sub-score rollout have no score table; they get
    // `None` in their own row instead of borrowing a neighbour's score.
    let score_of = |selector: &Selector| {
        review
            .select(selector)
            .next()
            .and_then(|span| first_number(&element_text(span)))
    };

    let raw_date = text_of(&selectors.review_date);
    let date_text = relative_phrase(&raw_date)
        .map(str::to_string)
        .unwrap_or_else(|| raw_date.clone());
    let [flavor, sweetness, lasting] = &selectors.review_scores;

    ReviewRecord {
        rating: first_number(&text_of(&selectors.review_rating)),
        date_bucket: classify(&raw_date),
        date_text,
        head: text_of(&selectors.review_head),
        body: text_of(&selectors.review_body),
        flavor: score_of(flavor),
        sweetness: score_of(sweetness),
        lasting: score_of(lasting),
    }
}
