use thiserror::Error;

use crate::config::ConfigError;
use crate::fetcher::FetchError;

#[derive(Error, Debug)]
pub enum ScrapeError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Listing fetch failed: {0}")]
    Fetch(#[from] FetchError),

    #[error("Checkpoint error: {0}")]
    Checkpoint(String),

    #[error("Extraction error: {0}")]
    Extract(String),

    #[error("Browser error: {0}")]
    Browser(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid selector {selector:?}: {reason}")]
    Selector { selector: String, reason: String },

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl ScrapeError {
    /// True when the checkpoint is untouched and a rerun can pick up where this one stopped.
    pub fn is_resumable(&self) -> bool {
        match self {
            ScrapeError::Fetch(e) => e.is_transient(),
            _ => false,
        }
    }
}

pub type Result<T> = std::result::Result<T, ScrapeError>;
