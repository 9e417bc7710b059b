use serde::{Deserialize, Serialize};

/// Fields read from one listing entry on a catalog page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListingFields {
    pub brand: String,
    pub name: String,
    pub nicotine_pct: f64,
    pub puffs: Option<u32>,
    pub price: Option<f64>,
    pub review_count: u32,
    pub score: Option<f64>,
    pub link: String,
}

/// Aggregates that only the detail page carries.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DetailAggregates {
    pub capacity_ml: Option<f64>,
    pub recommend_pct: Option<f64>,
    pub flavor: Option<f64>,
    pub sweetness: Option<f64>,
    pub lasting: Option<f64>,
}

/// One scraped product. Built once per listing entry and never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductRecord {
    pub brand: String,
    pub name: String,
    pub capacity_ml: Option<f64>,
    pub nicotine_pct: f64,
    pub puffs: Option<u32>,
    pub price: Option<f64>,
    pub review_count: u32,
    pub score: Option<f64>,
    pub recommend_pct: Option<f64>,
    pub flavor: Option<f64>,
    pub sweetness: Option<f64>,
    pub lasting: Option<f64>,
    pub link: String,
}

impl ProductRecord {
    pub fn new(listing: ListingFields, detail: DetailAggregates) -> Self {
        Self {
            brand: listing.brand,
            name: listing.name,
            capacity_ml: detail.capacity_ml,
            nicotine_pct: listing.nicotine_pct,
            puffs: listing.puffs,
            price: listing.price,
            review_count: listing.review_count,
            score: listing.score,
            recommend_pct: detail.recommend_pct,
            flavor: detail.flavor,
            sweetness: detail.sweetness,
            lasting: detail.lasting,
            link: listing.link,
        }
    }
}
