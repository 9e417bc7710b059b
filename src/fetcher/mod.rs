pub mod http_fetcher;

pub use http_fetcher::HttpFetcher;

use async_trait::async_trait;
use thiserror::Error;

/// Why a listing page could not be fetched.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("timed out fetching {url}")]
    Timeout { url: String },

    #[error("too many redirects fetching {url}")]
    TooManyRedirects { url: String },

    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}

impl FetchError {
    pub fn from_reqwest(url: &str, err: reqwest::Error) -> Self {
        let url = url.to_string();
        if err.is_timeout() {
            FetchError::Timeout { url }
        } else if err.is_redirect() {
            FetchError::TooManyRedirects { url }
        } else {
            FetchError::Request { url, source: err }
        }
    }

    /// Timeouts and redirect loops are conditions a later run may not hit.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            FetchError::Timeout { .. } | FetchError::TooManyRedirects { .. }
        )
    }
}

#[async_trait]
pub trait Fetcher {
    /// Fetch a listing page and return its HTML.
    async fn fetch(&self, url: &str) -> Result<String, FetchError>;
}
