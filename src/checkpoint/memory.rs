use std::sync::Mutex;

use chrono::Utc;

use crate::app::{Result, ScrapeError};
use crate::checkpoint::{Checkpoint, CheckpointStore};

/// Checkpoint store that lives only as long as the process.
pub struct MemoryCheckpointStore {
    state: Mutex<Checkpoint>,
}

impl MemoryCheckpointStore {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(Checkpoint::fresh()),
        }
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Checkpoint>> {
        self.state
            .lock()
            .map_err(|e| ScrapeError::Checkpoint(format!("Checkpoint lock poisoned: {}", e)))
    }
}

impl Default for MemoryCheckpointStore {
    fn default() -> Self {
        Self::new()
    }
}

impl CheckpointStore for MemoryCheckpointStore {
    fn init(&self) -> Result<()> {
        *self.lock()? = Checkpoint::fresh();
        Ok(())
    }

    fn load(&self) -> Result<Checkpoint> {
        let checkpoint = self.lock()?.clone();
        checkpoint.validate()?;
        Ok(checkpoint)
    }

    fn save(&self, checkpoint: &Checkpoint) -> Result<()> {
        checkpoint.validate()?;
        let mut saved = checkpoint.clone();
        saved.saved_at = Some(Utc::now());
        *self.lock()? = saved;
        Ok(())
    }
}
