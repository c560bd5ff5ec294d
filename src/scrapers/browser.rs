use crate::scrapers::traits::{PageFetcher, RenderedPage};
use crate::scrapers::types::ScoutConfig;
use anyhow::{Context, Result};
use async_trait::async_trait;
use headless_chrome::{Browser, LaunchOptions};
use std::thread;
use std::time::Duration;
use tracing::{debug, info};
use url::Url;

/// Clicks the consent banner if the site shows one
const ACCEPT_COOKIES_JS: &str = r#"
    const button = document.querySelector('#onetrust-accept-btn-handler, button[id*="accept"]');
    if (button) button.click();
"#;

/// Page fetcher backed by headless Chrome, so listing and profile pages come
/// back with their client-side content rendered.
pub struct BrowserFetcher {
    browser: Browser,
    render_wait: Duration,
}

impl BrowserFetcher {
    /// Launch a headless browser
    pub fn new(config: &ScoutConfig) -> Result<Self> {
        info!("Launching headless Chrome...");

        let options = LaunchOptions::default_builder()
            .headless(true)
            .idle_browser_timeout(config.request_timeout.max(Duration::from_secs(30)) * 4)
            .build()
            .context("Failed to build launch options")?;

        let browser = Browser::new(options).context("Failed to launch Chrome browser")?;

        Ok(Self {
            browser,
            render_wait: config.render_wait,
        })
    }

    /// Blocking render of one page in a fresh tab
    fn render(browser: &Browser, url: &Url, render_wait: Duration) -> Result<String> {
        let tab = browser.new_tab().context("Failed to open browser tab")?;

        tab.navigate_to(url.as_str())
            .with_context(|| format!("Failed to navigate to {url}"))?;
        tab.wait_until_navigated()
            .with_context(|| format!("Navigation to {url} did not finish"))?;

        // Give the page's scripts time to populate the DOM
        thread::sleep(render_wait);

        if let Err(e) = tab.evaluate(ACCEPT_COOKIES_JS, false) {
            debug!(url = %url, "Cookie banner script failed: {}", e);
        }

        let html = tab.get_content().context("Failed to read rendered HTML")?;

        if let Err(e) = tab.close(true) {
            debug!(url = %url, "Failed to close tab: {}", e);
        }

        Ok(html)
    }
}

#[async_trait]
impl PageFetcher for BrowserFetcher {
    async fn fetch(&self, url: &Url) -> Result<RenderedPage> {
        debug!(url = %url, "Rendering page");

        let browser = self.browser.clone();
        let target = url.clone();
        let render_wait = self.render_wait;

        let html = tokio::task::spawn_blocking(move || Self::render(&browser, &target, render_wait))
            .await
            .context("Browser render task panicked")??;

        debug!(url = %url, bytes = html.len(), "Rendered page");

        Ok(RenderedPage {
            url: url.clone(),
            html,
        })
    }

    fn fetcher_name(&self) -> &'static str {
        "headless-chrome"
    }
}
