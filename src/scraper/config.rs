use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration for the browser that expands and reads product reviews
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScraperConfig {
    /// Whether to run the browser in headless mode (default: true)
    pub headless: bool,

    /// Hide automation markers such as navigator.webdriver (default: true)
    pub stealth: bool,

    /// Page load timeout in seconds (default: 30)
    pub timeout_secs: u64,

    /// How long to wait for each "show more" control in seconds (default: 25)
    pub expand_timeout_secs: u64,

    /// Polling interval while waiting for the control in milliseconds (default: 250)
    pub poll_interval_ms: u64,

    /// Maximum "show more" clicks per product (default: 500)
    pub max_expansions: usize,

    /// User agent string to use
    pub user_agent: Option<String>,
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            headless: true,
            stealth: true,
            timeout_secs: 30,
            expand_timeout_secs: 25,
            poll_interval_ms: 250,
            max_expansions: 500,
            user_agent: Some(
                "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 \
                 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36"
                    .to_string(),
            ),
        }
    }
}

impl ScraperConfig {
    /// Get the page load timeout as a Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Get the per-attempt expansion wait as a Duration
    pub fn expand_timeout(&self) -> Duration {
        Duration::from_secs(self.expand_timeout_secs)
    }

    /// Get the polling interval as a Duration
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms.max(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_values() {
        let config = ScraperConfig::default();
        assert!(config.headless);
        assert!(config.stealth);
        assert_eq!(config.timeout_secs, 30);
        assert_eq!(config.expand_timeout_secs, 25);
        assert_eq!(config.max_expansions, 500);
        assert!(config.user_agent.is_some());
    }

    #[test]
    fn test_durations() {
        let config = ScraperConfig::default();
        assert_eq!(config.timeout(), Duration::from_secs(30));
        assert_eq!(config.expand_timeout(), Duration::from_secs(25));
        assert_eq!(config.poll_interval(), Duration::from_millis(250));
    }

    #[test]
    fn test_zero_poll_interval_is_clamped() {
        let config = ScraperConfig {
            poll_interval_ms: 0,
            ..Default::default()
        };
        assert_eq!(config.poll_interval(), Duration::from_millis(1));
    }
}
