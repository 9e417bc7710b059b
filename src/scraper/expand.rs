use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::app::Result;
use crate::scraper::config::ScraperConfig;

/// The "show more" control on a product page.
#[async_trait]
pub(crate) trait ShowMoreControl: Send + Sync {
    /// Whether the control is present, visible and enabled right now.
    async fn is_clickable(&self) -> bool;

    async fn click(&self) -> Result<()>;
}

/// Bounds for one expansion run.
#[derive(Debug, Clone, Copy)]
pub(crate) struct ExpandLimits {
    /// How long to wait for the control to become clickable before each click
    pub wait: Duration,
    pub poll: Duration,
    pub max_clicks: usize,
}

impl From<&ScraperConfig> for ExpandLimits {
    fn from(config: &ScraperConfig) -> Self {
        Self {
            wait: config.expand_timeout(),
            poll: config.poll_interval(),
            max_clicks: config.max_expansions,
        }
    }
}

/// Click the control until it stays unclickable for `limits.wait`, a click
/// fails, or `limits.max_clicks` is reached. Returns the number of clicks.
pub(crate) async fn expand_all<C>(control: &C, limits: &ExpandLimits) -> usize
where
    C: ShowMoreControl + ?Sized,
{
    let mut clicks = 0;

    while clicks < limits.max_clicks {
        let wait = wait_until_clickable(control, limits.poll);
        if tokio::time::timeout(limits.wait, wait).await.is_err() {
            debug!("Show-more control not clickable within {:?}", limits.wait);
            break;
        }

        if let Err(e) = control.click().await {
            debug!("Show-more click failed: {}", e);
            break;
        }
        clicks += 1;
    }

    if clicks == limits.max_clicks {
        warn!("Stopped expanding reviews after {} clicks", clicks);
    }
    clicks
}

async fn wait_until_clickable<C>(control: &C, poll: Duration)
where
    C: ShowMoreControl + ?Sized,
{
    while !control.is_clickable().await {
        tokio::time::sleep(poll).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::ScrapeError;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Control that accepts `available` clicks and then stops being clickable.
    struct FakeControl {
        available: usize,
        fail_click: bool,
        attempts: AtomicUsize,
        clicks: AtomicUsize,
        checks: AtomicUsize,
    }

    impl FakeControl {
        fn new(available: usize) -> Self {
            Self {
                available,
                fail_click: false,
                attempts: AtomicUsize::new(0),
                clicks: AtomicUsize::new(0),
                checks: AtomicUsize::new(0),
            }
        }

        fn failing() -> Self {
            Self {
                fail_click: true,
                ..Self::new(usize::MAX)
            }
        }
    }

    #[async_trait]
    impl ShowMoreControl for FakeControl {
        async fn is_clickable(&self) -> bool {
            self.checks.fetch_add(1, Ordering::SeqCst);
            self.clicks.load(Ordering::SeqCst) < self.available
        }

        async fn click(&self) -> Result<()> {
            self.attempts.fetch_add(1, Ordering::SeqCst);
            if self.fail_click {
                return Err(ScrapeError::Browser("element is not interactable".to_string()));
            }
            self.clicks.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    fn limits(max_clicks: usize) -> ExpandLimits {
        ExpandLimits {
            wait: Duration::from_millis(30),
            poll: Duration::from_millis(1),
            max_clicks,
        }
    }

    #[test]
    fn test_stops_when_control_goes_away() {
        let control = FakeControl::new(3);
        let clicks = tokio_test::block_on(expand_all(&control, &limits(500)));

        assert_eq!(clicks, 3);
        assert_eq!(control.clicks.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn test_disabled_control_is_never_clicked() {
        let control = FakeControl::new(0);
        let clicks = tokio_test::block_on(expand_all(&control, &limits(500)));

        assert_eq!(clicks, 0);
        assert_eq!(control.attempts.load(Ordering::SeqCst), 0);
        // Polled repeatedly until the wait ran out.
        assert!(control.checks.load(Ordering::SeqCst) > 1);
    }

    #[test]
    fn test_click_failure_ends_loop() {
        let control = FakeControl::failing();
        let clicks = tokio_test::block_on(expand_all(&control, &limits(500)));

        assert_eq!(clicks, 0);
        assert_eq!(control.attempts.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_stops_at_max_clicks() {
        let control = FakeControl::new(usize::MAX);
        let clicks = tokio_test::block_on(expand_all(&control, &limits(5)));

        assert_eq!(clicks, 5);
        assert_eq!(control.clicks.load(Ordering::SeqCst), 5);
    }

    #[test]
    fn test_limits_from_config() {
        let config = ScraperConfig {
            expand_timeout_secs: 7,
            poll_interval_ms: 0,
            max_expansions: 12,
            ..ScraperConfig::default()
        };
        let limits = ExpandLimits::from(&config);

        assert_eq!(limits.wait, Duration::from_secs(7));
        assert_eq!(limits.poll, Duration::from_millis(1));
        assert_eq!(limits.max_clicks, 12);
    }
}
