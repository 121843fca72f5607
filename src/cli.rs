//! Command-line interface definitions.
//!
//! Every option is optional: running the binary with no arguments performs a
//! default run against the gov.br portal. Options that are commonly set by a
//! deployment platform also read from environment variables.

use clap::Parser;
use std::path::PathBuf;

/// Collect gov.br news for a keyword and forward them to a webhook.
///
/// # Examples
///
/// ```sh
/// # Default run, delivery endpoint from the environment
/// WEBHOOK_URL=https://n8n.example/webhook/cebas cebas_scraper
///
/// # Different keyword, remote WebDriver, settings file
/// cebas_scraper --search-term "assistência social" \
///     --webdriver-url http://selenium:4444 --config ./cebas.yaml
///
/// # Extract from a page saved earlier, no browser needed
/// cebas_scraper --html-file ./page.html
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Optional path to a YAML settings file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Endpoint receiving the collected articles; delivery is skipped when unset
    #[arg(long, env = "WEBHOOK_URL")]
    pub webhook_url: Option<String>,

    /// WebDriver server used to drive headless Chrome
    #[arg(long, env = "WEBDRIVER_URL")]
    pub webdriver_url: Option<String>,

    /// Keyword searched on the portal
    #[arg(short, long, env = "CEBAS_SEARCH_TERM")]
    pub search_term: Option<String>,

    /// Seconds to wait for search results to render
    #[arg(long)]
    pub render_timeout_secs: Option<u64>,

    /// Seconds allowed for the webhook request
    #[arg(long)]
    pub delivery_timeout_secs: Option<u64>,

    /// Read already-rendered markup from this file instead of launching a browser
    #[arg(long)]
    pub html_file: Option<PathBuf>,
}
