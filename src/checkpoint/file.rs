use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::app::{Result, ScrapeError};
use crate::checkpoint::{Checkpoint, CheckpointStore};
use crate::domain::{ProductRecord, VisitedMarkers};

pub const MARKERS_FILE: &str = "visited_product.json";
pub const PRODUCTS_FILE: &str = "visited_product_dict.json";

#[derive(Serialize, Deserialize)]
struct MarkersDoc {
    markers: Vec<u32>,
    saved_at: Option<DateTime<Utc>>,
}

/// Checkpoint kept as two JSON files in the data directory.
pub struct FileCheckpointStore {
    dir: PathBuf,
}

impl FileCheckpointStore {
    pub fn new<P: AsRef<Path>>(dir: P) -> Result<Self> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    pub fn markers_path(&self) -> PathBuf {
        self.dir.join(MARKERS_FILE)
    }

    pub fn products_path(&self) -> PathBuf {
        self.dir.join(PRODUCTS_FILE)
    }

    fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
        let content = fs::read_to_string(path).map_err(|e| {
            ScrapeError::Checkpoint(format!("Failed to read {}: {}", path.display(), e))
        })?;
        serde_json::from_str(&content).map_err(|e| {
            ScrapeError::Checkpoint(format!("Corrupt checkpoint {}: {}", path.display(), e))
        })
    }

    /// Write through a sibling temp file so a crash never leaves a torn file.
    fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
        let tmp = path.with_extension("json.tmp");
        let content = serde_json::to_vec_pretty(value)?;
        fs::write(&tmp, content)?;
        fs::rename(&tmp, path)?;
        Ok(())
    }

    /// Products go first, so an interrupted save leaves at most one extra
    /// product next to the previous markers. `load` drops that record.
    fn write_pair(&self, markers: &VisitedMarkers, products: &[ProductRecord]) -> Result<()> {
        let doc = MarkersDoc {
            markers: markers.values().to_vec(),
            saved_at: Some(Utc::now()),
        };
        Self::write_json(&self.products_path(), &products)?;
        Self::write_json(&self.markers_path(), &doc)?;
        Ok(())
    }
}

impl CheckpointStore for FileCheckpointStore {
    fn init(&self) -> Result<()> {
        tracing::info!("Initializing checkpoint in {}", self.dir.display());
        self.write_pair(&VisitedMarkers::new(), &[])
    }

    fn load(&self) -> Result<Checkpoint> {
        let doc: MarkersDoc = Self::read_json(&self.markers_path())?;
        let mut products: Vec<ProductRecord> = Self::read_json(&self.products_path())?;

        let markers = VisitedMarkers::from_values(doc.markers).ok_or_else(|| {
            ScrapeError::Checkpoint(format!(
                "Empty marker sequence in {}",
                self.markers_path().display()
            ))
        })?;

        if products.len() == markers.processed_count() + 1 {
            tracing::warn!(
                "Dropping product saved after the last marker in {}; it will be processed again",
                self.products_path().display()
            );
            products.truncate(markers.processed_count());
        }

        let checkpoint = Checkpoint {
            markers,
            products,
            saved_at: doc.saved_at,
        };
        checkpoint.validate()?;
        Ok(checkpoint)
    }

    fn save(&self, checkpoint: &Checkpoint) -> Result<()> {
        checkpoint.validate()?;
        self.write_pair(&checkpoint.markers, &checkpoint.products)
    }
}
