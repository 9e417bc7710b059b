//! Resumable walk state.
//!
//! A checkpoint is the pair of the visited-marker sequence and the product
//! records scraped so far. The two halves are always loaded and saved
//! together; a store must never hand out one without the other.

mod file;
mod memory;

pub use file::FileCheckpointStore;
pub use memory::MemoryCheckpointStore;

use chrono::{DateTime, Utc};

use crate::app::{Result, ScrapeError};
use crate::domain::{ProductRecord, VisitedMarkers};

#[derive(Debug, Clone, PartialEq)]
pub struct Checkpoint {
    pub markers: VisitedMarkers,
    pub products: Vec<ProductRecord>,
    pub saved_at: Option<DateTime<Utc>>,
}

impl Checkpoint {
    pub fn fresh() -> Self {
        Self {
            markers: VisitedMarkers::new(),
            products: Vec::new(),
            saved_at: None,
        }
    }

    /// Both halves must describe the same number of processed entries.
    pub fn validate(&self) -> Result<()> {
        let expected = self.markers.processed_count();
        if expected != self.products.len() {
            return Err(ScrapeError::Checkpoint(format!(
                "markers record {} processed entries but {} products are stored",
                expected,
                self.products.len()
            )));
        }
        Ok(())
    }
}

impl Default for Checkpoint {
    fn default() -> Self {
        Self::fresh()
    }
}

pub trait CheckpointStore {
    /// Reset to an empty walk: markers `[0]`, no products.
    fn init(&self) -> Result<()>;
    fn load(&self) -> Result<Checkpoint>;
    fn save(&self, checkpoint: &Checkpoint) -> Result<()>;
}
