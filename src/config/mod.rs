//! Configuration management for huffscrape.
//!
//! Configuration is read from `~/.config/huffscrape/config.toml` unless a
//! path is given on the command line. If the file doesn't exist, a default
//! configuration with comments is created.

use crate::extract::SiteSelectors;
use crate::scraper::ScraperConfig;
use serde::Deserialize;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Main configuration struct.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub site: SiteConfig,
    pub output: OutputConfig,
    pub fetch: FetchConfig,
    pub scraper: ScraperConfig,
    pub selectors: SiteSelectors,
}

/// Where the catalog lives.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    pub base_url: String,
    pub collection_path: String,
    pub sort_by: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            base_url: "https://www.huffandpuffers.com/".to_string(),
            collection_path: "/collections/disposable-salt-nicotine-devices".to_string(),
            sort_by: "best-selling".to_string(),
        }
    }
}

impl SiteConfig {
    /// First listing page of the walk.
    pub fn start_url(&self) -> String {
        let base = self.base_url.trim_end_matches('/');
        let path = self.collection_path.trim_start_matches('/');
        if self.sort_by.is_empty() {
            format!("{}/{}", base, path)
        } else {
            format!("{}/{}?sort_by={}", base, path, self.sort_by)
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Directory for checkpoint files and CSV tables (default: ./data)
    pub data_dir: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("./data"),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    /// Listing page request timeout in seconds (default: 30)
    pub timeout_secs: u64,
    pub user_agent: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 30,
            user_agent: concat!("huffscrape/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl Config {
    /// Load configuration from `path`, or from the default path when `None`.
    ///
    /// If the config file doesn't exist, creates a default one with comments.
    /// If the config file exists but is invalid, returns an error.
    /// Missing fields in the config file will use default values.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let config_path = match path {
            Some(p) => p.to_path_buf(),
            None => Self::default_config_path()?,
        };

        if !config_path.exists() {
            Self::create_default_config(&config_path)?;
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path).map_err(|e| ConfigError::Io {
            path: config_path.clone(),
            source: e,
        })?;

        Self::parse(&content).map_err(|e| ConfigError::Parse {
            path: config_path,
            source: e,
        })
    }

    pub fn parse(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Get the default config file path: `~/.config/huffscrape/config.toml`
    pub fn default_config_path() -> Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
        Ok(config_dir.join("huffscrape").join("config.toml"))
    }

    /// Create a default config file with comments.
    fn create_default_config(path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| ConfigError::Io {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let mut file = fs::File::create(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        file.write_all(Self::default_config_content().as_bytes())
            .map_err(|e| ConfigError::Io {
                path: path.to_path_buf(),
                source: e,
            })?;

        Ok(())
    }

    /// Generate the default config file content with comments.
    fn default_config_content() -> String {
        r##"# huffscrape configuration
#
# Any key left out falls back to its built-in default. Site selectors can be
# overridden under [selectors] when the storefront markup changes.

[site]
base_url = "https://www.huffandpuffers.com/"
collection_path = "/collections/disposable-salt-nicotine-devices"
sort_by = "best-selling"

[output]
# Checkpoint files and CSV tables are written here
data_dir = "./data"

[fetch]
# Listing page request timeout in seconds
timeout_secs = 30

[scraper]
# Run browser in headless mode (no visible window)
headless = true

# Hide navigator.webdriver from the page
stealth = true

# How long to wait for each "show more" button before giving up (seconds)
expand_timeout_secs = 25

# How often to look for the button while waiting (milliseconds)
poll_interval_ms = 250

# Upper bound on "show more" clicks per product
max_expansions = 500
"##
        .to_string()
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Could not determine config directory")]
    NoConfigDir,

    #[error("Failed to read/write config file at {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_deserializes() {
        let content = Config::default_config_content();
        let config = Config::parse(&content).expect("Default config should be valid TOML");

        assert_eq!(config.site.sort_by, "best-selling");
        assert_eq!(config.output.data_dir, PathBuf::from("./data"));
        assert_eq!(config.scraper.expand_timeout_secs, 25);
        assert_eq!(config.selectors.show_more, ".okeReviews-reviews-showMore");
    }

    #[test]
    fn test_partial_config() {
        let content = r##"
[site]
base_url = "http://127.0.0.1:8080/"

[selectors]
listing_entry = "li.product"
"##;
        let config = Config::parse(content).expect("Partial config should work");

        assert_eq!(config.site.base_url, "http://127.0.0.1:8080/");
        assert_eq!(config.selectors.listing_entry, "li.product");
        // Default value
        assert_eq!(config.selectors.title, "a.product-item-meta__title");
        assert!(config.scraper.headless);
    }

    #[test]
    fn test_empty_config() {
        let config = Config::parse("").expect("Empty config should work");
        assert_eq!(config.fetch.timeout_secs, 30);
    }

    #[test]
    fn test_start_url() {
        let site = SiteConfig::default();
        assert_eq!(
            site.start_url(),
            "https://www.huffandpuffers.com/collections/disposable-salt-nicotine-devices?sort_by=best-selling"
        );

        let unsorted = SiteConfig {
            sort_by: String::new(),
            ..SiteConfig::default()
        };
        assert!(!unsorted.start_url().contains("sort_by"));
    }

    #[test]
    fn test_load_creates_default_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let config = Config::load(Some(&path)).unwrap();
        assert!(path.exists());
        assert_eq!(config.scraper.max_expansions, 500);

        let reloaded = Config::load(Some(&path)).unwrap();
        assert_eq!(reloaded.site.base_url, config.site.base_url);
    }

    #[test]
    fn test_load_invalid_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[site\nbase_url = ").unwrap();

        let err = Config::load(Some(&path)).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }
}
