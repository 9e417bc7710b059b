//! CSV tables.
//!
//! `df_info.csv` holds every scraped product; `df_review_{id}.csv` holds the
//! reviews of one product. Both carry a 1-based leading id column, and absent
//! values are written as empty cells.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::app::{Result, ScrapeError};
use crate::domain::{DateBucket, ProductRecord, ReviewRecord};

pub const PRODUCTS_TABLE: &str = "df_info.csv";

pub fn reviews_table_name(product_id: usize) -> String {
    format!("df_review_{}.csv", product_id)
}

#[derive(Debug, Serialize, Deserialize)]
struct ProductRow {
    #[serde(rename = "Product_id")]
    id: usize,
    #[serde(rename = "Brand")]
    brand: String,
    #[serde(rename = "Name")]
    name: String,
    #[serde(rename = "Capacity(mL)")]
    capacity_ml: Option<f64>,
    #[serde(rename = "Nicotine(%)")]
    nicotine_pct: f64,
    #[serde(rename = "Puffs")]
    puffs: Option<u32>,
    #[serde(rename = "Price($)")]
    price: Option<f64>,
    #[serde(rename = "Review_count")]
    review_count: u32,
    #[serde(rename = "Score")]
    score: Option<f64>,
    #[serde(rename = "Recommend(%)")]
    recommend_pct: Option<f64>,
    #[serde(rename = "Flavor")]
    flavor: Option<f64>,
    #[serde(rename = "Sweet")]
    sweetness: Option<f64>,
    #[serde(rename = "Lasting")]
    lasting: Option<f64>,
    #[serde(rename = "Link")]
    link: String,
}

impl ProductRow {
    fn new(id: usize, p: &ProductRecord) -> Self {
        Self {
            id,
            brand: p.brand.clone(),
            name: p.name.clone(),
            capacity_ml: p.capacity_ml,
            nicotine_pct: p.nicotine_pct,
            puffs: p.puffs,
            price: p.price,
            review_count: p.review_count,
            score: p.score,
            recommend_pct: p.recommend_pct,
            flavor: p.flavor,
            sweetness: p.sweetness,
            lasting: p.lasting,
            link: p.link.clone(),
        }
    }

    fn into_record(self) -> (usize, ProductRecord) {
        (
            self.id,
            ProductRecord {
                brand: self.brand,
                name: self.name,
                capacity_ml: self.capacity_ml,
                nicotine_pct: self.nicotine_pct,
                puffs: self.puffs,
                price: self.price,
                review_count: self.review_count,
                score: self.score,
                recommend_pct: self.recommend_pct,
                flavor: self.flavor,
                sweetness: self.sweetness,
                lasting: self.lasting,
                link: self.link,
            },
        )
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct ReviewRow {
    #[serde(rename = "Review_id")]
    id: usize,
    #[serde(rename = "Ratings")]
    rating: Option<f64>,
    #[serde(rename = "Dates")]
    date_text: String,
    #[serde(rename = "Date_Category")]
    date_category: String,
    #[serde(rename = "Heads")]
    head: String,
    #[serde(rename = "Texts")]
    body: String,
    #[serde(rename = "Flavor")]
    flavor: Option<f64>,
    #[serde(rename = "Sweet")]
    sweetness: Option<f64>,
    #[serde(rename = "Lasting")]
    lasting: Option<f64>,
}

impl ReviewRow {
    fn new(id: usize, r: &ReviewRecord) -> Self {
        Self {
            id,
            rating: r.rating,
            date_text: r.date_text.clone(),
            date_category: r.date_bucket.label().to_string(),
            head: r.head.clone(),
            body: r.body.clone(),
            flavor: r.flavor,
            sweetness: r.sweetness,
            lasting: r.lasting,
        }
    }

    fn into_record(self) -> Result<(usize, ReviewRecord)> {
        let date_bucket = DateBucket::from_label(&self.date_category).ok_or_else(|| {
            ScrapeError::Extract(format!("unknown date category {:?}", self.date_category))
        })?;
        Ok((
            self.id,
            ReviewRecord {
                rating: self.rating,
                date_text: self.date_text,
                date_bucket,
                head: self.head,
                body: self.body,
                flavor: self.flavor,
                sweetness: self.sweetness,
                lasting: self.lasting,
            },
        ))
    }
}

/// Write the aggregate product table, numbering rows from 1.
pub fn write_products(path: &Path, products: &[ProductRecord]) -> Result<()> {
    ensure_parent(path)?;
    let mut writer = csv::Writer::from_path(path)?;
    if products.is_empty() {
        writer.write_record(PRODUCT_HEADERS)?;
    }
    for (i, product) in products.iter().enumerate() {
        writer.serialize(ProductRow::new(i + 1, product))?;
    }
    writer.flush()?;
    Ok(())
}

pub fn read_products(path: &Path) -> Result<Vec<(usize, ProductRecord)>> {
    let mut reader = csv::Reader::from_path(path)?;
    reader
        .deserialize::<ProductRow>()
        .map(|row| -> Result<(usize, ProductRecord)> { Ok(row?.into_record()) })
        .collect()
}

/// Write one product's review table as `df_review_{product_id}.csv` in `dir`.
pub fn write_reviews(dir: &Path, product_id: usize, reviews: &[ReviewRecord]) -> Result<PathBuf> {
    fs::create_dir_all(dir)?;
    let path = dir.join(reviews_table_name(product_id));
    let mut writer = csv::Writer::from_path(&path)?;
    if reviews.is_empty() {
        writer.write_record(REVIEW_HEADERS)?;
    }
    for (i, review) in reviews.iter().enumerate() {
        writer.serialize(ReviewRow::new(i + 1, review))?;
    }
    writer.flush()?;
    Ok(path)
}

pub fn read_reviews(path: &Path) -> Result<Vec<(usize, ReviewRecord)>> {
    let mut reader = csv::Reader::from_path(path)?;
    reader
        .deserialize::<ReviewRow>()
        .map(|row| -> Result<(usize, ReviewRecord)> { row?.into_record() })
        .collect()
}

const PRODUCT_HEADERS: [&str; 14] = [
    "Product_id",
    "Brand",
    "Name",
    "Capacity(mL)",
    "Nicotine(%)",
    "Puffs",
    "Price($)",
    "Review_count",
    "Score",
    "Recommend(%)",
    "Flavor",
    "Sweet",
    "Lasting",
    "Link",
];

const REVIEW_HEADERS: [&str; 9] = [
    "Review_id",
    "Ratings",
    "Dates",
    "Date_Category",
    "Heads",
    "Texts",
    "Flavor",
    "Sweet",
    "Lasting",
];

fn ensure_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    Ok(())
}
