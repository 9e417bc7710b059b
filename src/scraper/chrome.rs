use std::sync::Arc;

use async_trait::async_trait;
use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::page::Page;
use futures::StreamExt;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::app::{Result, ScrapeError};
use crate::domain::ReviewPage;
use crate::extract::Extractor;
use crate::scraper::config::ScraperConfig;
use crate::scraper::expand::{expand_all, ExpandLimits, ShowMoreControl};
use crate::scraper::ReviewCollector;

/// A launched browser plus the task pumping its CDP events.
struct BrowserSession {
    browser: Browser,
    handler: JoinHandle<()>,
}

impl BrowserSession {
    async fn launch(config: &ScraperConfig) -> Result<Self> {
        let mut builder = BrowserConfig::builder()
            .arg("--no-sandbox")
            .arg("--disable-gpu")
            .arg("--disable-dev-shm-usage")
            .arg("--disable-software-rasterizer")
            .request_timeout(config.timeout());

        if !config.headless {
            builder = builder.with_head();
        }

        let browser_config = builder
            .build()
            .map_err(|e| ScrapeError::Browser(format!("Failed to build browser config: {}", e)))?;

        let (browser, mut handler) = Browser::launch(browser_config)
            .await
            .map_err(|e| ScrapeError::Browser(format!(
                "Failed to launch browser: {}. Is Chrome or Chromium installed and in PATH?",
                e
            )))?;

        let handler = tokio::spawn(async move {
            while let Some(_event) = handler.next().await {}
        });

        Ok(Self { browser, handler })
    }

    /// Shut the browser down. Failures are logged, never returned.
    async fn close(mut self) {
        if let Err(e) = self.browser.close().await {
            warn!("Failed to close browser: {}", e);
        }
        if let Err(e) = self.browser.wait().await {
            warn!("Failed to wait for browser exit: {}", e);
        }
        self.handler.abort();
    }
}

/// Chrome-based review collector using chromiumoxide.
///
/// Each product gets its own browser session, which is closed whether or not
/// collection succeeds.
pub struct ChromeReviewCollector {
    config: ScraperConfig,
    extractor: Arc<dyn Extractor>,
}

impl ChromeReviewCollector {
    pub fn new(config: ScraperConfig, extractor: Arc<dyn Extractor>) -> Self {
        Self { config, extractor }
    }

    async fn open_page(&self, browser: &Browser, url: &str) -> Result<Page> {
        let page = browser
            .new_page("about:blank")
            .await
            .map_err(|e| ScrapeError::Browser(format!("Failed to create page: {}", e)))?;

        if self.config.stealth {
            page.enable_stealth_mode()
                .await
                .map_err(|e| ScrapeError::Browser(format!("Failed to enable stealth mode: {}", e)))?;
        }

        if let Some(ref ua) = self.config.user_agent {
            page.set_user_agent(ua)
                .await
                .map_err(|e| ScrapeError::Browser(format!("Failed to set user agent: {}", e)))?;
        }

        page.goto(url)
            .await
            .map_err(|e| ScrapeError::Browser(format!("Failed to open {}: {}", url, e)))?;

        page.wait_for_navigation()
            .await
            .map_err(|e| ScrapeError::Browser(format!("Navigation failed: {}", e)))?;

        Ok(page)
    }

    /// Click "show more" until it stops being clickable or stops accepting clicks.
    async fn expand_reviews(&self, page: &Page) -> usize {
        let control = PageControl {
            page: page.clone(),
            selector: self.extractor.show_more_selector().to_string(),
        };
        expand_all(&control, &ExpandLimits::from(&self.config)).await
    }

    async fn read_expanded(&self, browser: &Browser, url: &str) -> Result<String> {
        let page = self.open_page(browser, url).await?;
        let clicks = self.expand_reviews(&page).await;
        debug!("Expanded reviews {} times on {}", clicks, url);

        let html = page
            .content()
            .await
            .map_err(|e| ScrapeError::Browser(format!("Failed to read page content: {}", e)))?;

        if let Err(e) = page.close().await {
            debug!("Failed to close page: {}", e);
        }
        Ok(html)
    }
}

/// The show-more control as seen through a live page.
struct PageControl {
    page: Page,
    selector: String,
}

#[async_trait]
impl ShowMoreControl for PageControl {
    async fn is_clickable(&self) -> bool {
        let script = clickable_script(&self.selector);
        match self.page.evaluate(script.as_str()).await {
            Ok(result) => result.into_value::<bool>().unwrap_or(false),
            Err(e) => {
                debug!("Clickability check for '{}' failed: {}", self.selector, e);
                false
            }
        }
    }

    async fn click(&self) -> Result<()> {
        let element = self
            .page
            .find_element(self.selector.as_str())
            .await
            .map_err(|e| ScrapeError::Browser(format!("'{}' not found: {}", self.selector, e)))?;
        element
            .click()
            .await
            .map_err(|e| ScrapeError::Browser(format!("Failed to click '{}': {}", self.selector, e)))?;
        Ok(())
    }
}

/// JS expression that is true when `selector` matches a visible, enabled element.
fn clickable_script(selector: &str) -> String {
    let selector = serde_json::Value::from(selector);
    format!(
        r#"(() => {{
            const el = document.querySelector({selector});
            if (!el || el.disabled || el.getAttribute('aria-disabled') === 'true') return false;
            const style = window.getComputedStyle(el);
            if (style.visibility === 'hidden' || style.pointerEvents === 'none') return false;
            const rect = el.getBoundingClientRect();
            return rect.width > 0 && rect.height > 0;
        }})()"#
    )
}

#[async_trait]
impl ReviewCollector for ChromeReviewCollector {
    async fn collect(&self, url: &str, product_id: usize) -> Result<ReviewPage> {
        let session = BrowserSession::launch(&self.config).await?;
        let html = self.read_expanded(&session.browser, url).await;
        session.close().await;

        let page = self.extractor.parse_detail(&html?);
        debug!(
            "Product {}: {} reviews from {}",
            product_id,
            page.reviews.len(),
            url
        );
        Ok(page)
    }
}
