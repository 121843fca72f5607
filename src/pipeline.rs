//! One collection run: render → extract → deliver.
//!
//! [`run`] never fails. Whatever goes wrong is contained in the stage where
//! it happened and reported through [`RunReport`]:
//!
//! - a rendering failure aborts the run with no records
//! - a container missing fields still yields a record with fallbacks
//! - a delivery problem is recorded in [`RunReport::delivery`] and leaves
//!   the records untouched

use crate::models::ArticleRecord;
use crate::outputs::webhook::{DeliveryOutcome, WebhookNotifier};
use crate::scrapers::Renderer;
use crate::scrapers::govbr::GovBrExtractor;
use std::time::Instant;
use tracing::{error, info, instrument};
use url::Url;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunStatus {
    /// The page was rendered and extracted.
    Completed,
    /// The page could not be obtained; no records were produced.
    Aborted { reason: String },
}

#[derive(Debug)]
pub struct RunReport {
    pub status: RunStatus,
    pub records: Vec<ArticleRecord>,
    /// `None` when delivery was never attempted because nothing was found.
    pub delivery: Option<DeliveryOutcome>,
}

impl RunReport {
    fn aborted(reason: String) -> Self {
        Self {
            status: RunStatus::Aborted { reason },
            records: Vec::new(),
            delivery: None,
        }
    }
}

/// Execute a single run against `search_url`.
#[instrument(level = "info", skip_all, fields(%search_url))]
pub async fn run<R: Renderer>(
    renderer: &R,
    extractor: &GovBrExtractor,
    notifier: &WebhookNotifier,
    search_url: &Url,
) -> RunReport {
    let t0 = Instant::now();
    info!("Fetching search results");

    let html = match renderer.render(search_url).await {
        Ok(html) => html,
        Err(e) => {
            error!(error = %e, "Failed to render search results; aborting run");
            return RunReport::aborted(e.to_string());
        }
    };

    let records = extractor.extract(&html);
    info!(found = records.len(), "Search results processed");

    let delivery = if records.is_empty() {
        None
    } else {
        Some(notifier.notify(&records).await)
    };

    info!(
        elapsed_ms = t0.elapsed().as_millis() as u64,
        delivery = ?delivery,
        "Run finished"
    );

    RunReport {
        status: RunStatus::Completed,
        records,
        delivery,
    }
}
