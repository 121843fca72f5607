//! # CEBAS Scraper
//!
//! Collects news articles matching a keyword from the gov.br news portal and
//! forwards them to a webhook, typically a workflow engine such as n8n.
//!
//! ## Usage
//!
//! ```sh
//! WEBHOOK_URL=https://n8n.example/webhook/cebas cebas_scraper
//! ```
//!
//! A WebDriver server (e.g. `chromedriver --port=9515`) must be reachable at
//! `WEBDRIVER_URL` unless `--html-file` is given.
//!
//! ## Architecture
//!
//! Each invocation performs exactly one run, strictly in sequence:
//! 1. **Fetching**: Render the search page in headless Chrome and wait for results
//! 2. **Extraction**: Pull title, link and description from every result
//! 3. **Delivery**: POST all records in one JSON envelope to the webhook
//!
//! Scheduling is left to the caller (cron, a platform scheduler, ...). Nothing
//! is kept between runs and the process exits successfully whatever the outcome.

use clap::Parser;
use std::error::Error;
use tracing::{debug, error, info};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

mod cli;
mod config;
mod models;
mod outputs;
mod pipeline;
mod scrapers;
mod utils;

use cli::Cli;
use config::Settings;
use outputs::webhook::WebhookNotifier;
use pipeline::{RunReport, RunStatus};
use scrapers::browser::{FileRenderer, WebDriverRenderer};
use scrapers::govbr::{self, GovBrExtractor};

/// Selector whose presence marks the search results as rendered.
const READY_SELECTOR: &str = "article";

#[tokio::main(flavor = "current_thread")]
async fn main() {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let args = Cli::parse();
    debug!(?args, "Parsed CLI arguments");

    match collect(&args).await {
        Ok(report) => summarize(&report),
        Err(e) => error!(error = %e, "Scraper could not start; no articles collected"),
    }
}

async fn collect(args: &Cli) -> Result<RunReport, Box<dyn Error>> {
    let settings = Settings::resolve(args)?;
    let search_url = govbr::search_url(&settings.search_url, &settings.search_term)?;
    let extractor = GovBrExtractor::new(&settings.portal_origin)?;
    let notifier = WebhookNotifier::new(
        settings.webhook_url.clone(),
        settings.delivery_timeout(),
        settings.source_label.clone(),
    )?;
    info!(
        %search_url,
        webhook_configured = notifier.is_enabled(),
        "Starting scraper"
    );

    let report = match &args.html_file {
        Some(path) => {
            let renderer = FileRenderer::new(path);
            pipeline::run(&renderer, &extractor, &notifier, &search_url).await
        }
        None => {
            let renderer = WebDriverRenderer::new(
                settings.webdriver_url.clone(),
                READY_SELECTOR,
                settings.render_timeout(),
            );
            pipeline::run(&renderer, &extractor, &notifier, &search_url).await
        }
    };
    Ok(report)
}

fn summarize(report: &RunReport) {
    match &report.status {
        RunStatus::Completed => info!(found = report.records.len(), "Run completed"),
        RunStatus::Aborted { reason } => error!(%reason, "Run aborted; no articles collected"),
    }
}
