//! Rendering backends.
//!
//! [`WebDriverRenderer`] drives a headless Chrome through a WebDriver server
//! (usually `chromedriver` listening on `localhost:9515`, see `WEBDRIVER_URL`).
//! The server itself is not started here; it must already be running. Each
//! render asks it for a new session, which launches a dedicated Chrome
//! process, and deletes that session before returning, whether rendering
//! succeeded or not. Nothing survives between runs.

use super::Renderer;
use fantoccini::{Client, ClientBuilder, Locator};
use serde_json::json;
use std::error::Error;
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tracing::{info, instrument, warn};
use url::Url;

/// Chrome flags for a container-friendly headless session.
pub const CHROME_ARGS: [&str; 4] = [
    "--headless",
    "--no-sandbox",
    "--disable-dev-shm-usage",
    "--disable-gpu",
];

/// Build the WebDriver capabilities requesting headless Chrome.
pub fn chrome_capabilities() -> serde_json::Map<String, serde_json::Value> {
    let mut caps = serde_json::Map::new();
    caps.insert("browserName".to_string(), json!("chrome"));
    caps.insert("goog:chromeOptions".to_string(), json!({ "args": CHROME_ARGS }));
    caps
}

/// Renders pages in a fresh headless Chrome session per call.
#[derive(Debug, Clone)]
pub struct WebDriverRenderer {
    webdriver_url: String,
    ready_selector: String,
    timeout: Duration,
}

impl WebDriverRenderer {
    /// # Arguments
    ///
    /// * `webdriver_url` - WebDriver server endpoint, e.g. `http://localhost:9515`
    /// * `ready_selector` - CSS selector that must match before the page counts as rendered
    /// * `timeout` - How long to wait for `ready_selector`
    pub fn new(webdriver_url: impl Into<String>, ready_selector: impl Into<String>, timeout: Duration) -> Self {
        Self {
            webdriver_url: webdriver_url.into(),
            ready_selector: ready_selector.into(),
            timeout,
        }
    }

    async fn capture(&self, client: &Client, url: &Url) -> Result<String, Box<dyn Error>> {
        client.goto(url.as_str()).await?;

        let t0 = Instant::now();
        client
            .wait()
            .at_most(self.timeout)
            .for_element(Locator::Css(self.ready_selector.as_str()))
            .await?;
        info!(
            waited_ms = t0.elapsed().as_millis() as u64,
            selector = %self.ready_selector,
            "Page content ready"
        );

        Ok(client.source().await?)
    }
}

impl Renderer for WebDriverRenderer {
    #[instrument(level = "info", skip_all, fields(%url, webdriver = %self.webdriver_url))]
    async fn render(&self, url: &Url) -> Result<String, Box<dyn Error>> {
        let client = ClientBuilder::native()
            .capabilities(chrome_capabilities())
            .connect(&self.webdriver_url)
            .await?;
        info!("Browser session started");

        let rendered = self.capture(&client, url).await;

        match client.close().await {
            Ok(()) => info!("Browser session closed"),
            Err(e) => warn!(error = %e, "Failed to close browser session"),
        }

        let html = rendered?;
        info!(bytes = html.len(), "Captured rendered page");
        Ok(html)
    }
}

/// Serves markup that was rendered earlier and saved to disk.
#[derive(Debug, Clone)]
pub struct FileRenderer {
    path: PathBuf,
}

impl FileRenderer {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl Renderer for FileRenderer {
    #[instrument(level = "info", skip_all, fields(%url, path = %self.path.display()))]
    async fn render(&self, url: &Url) -> Result<String, Box<dyn Error>> {
        let html = tokio::fs::read_to_string(&self.path).await?;
        info!(bytes = html.len(), "Loaded rendered page from file");
        Ok(html)
    }
}
