//! Webhook delivery of collected articles.
//!
//! One run produces at most one `POST` to the configured endpoint carrying a
//! [`NotificationEnvelope`]. Delivery is fire-and-forget: there is no retry,
//! and every failure is reported through [`DeliveryOutcome`] instead of an
//! error so that extraction results are never lost to a delivery problem.

use crate::models::{ArticleRecord, NotificationEnvelope};
use crate::utils::{non_blank, truncate_for_log};
use reqwest::StatusCode;
use std::error::Error;
use std::time::{Duration, Instant};
use tracing::{error, info, instrument, warn};

/// What happened to a delivery attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeliveryOutcome {
    /// No endpoint configured; nothing was sent.
    Disabled,
    /// The endpoint answered `200 OK`.
    Delivered,
    /// The endpoint answered with any other status.
    Rejected { status: u16, body: String },
    /// The request never completed (connect error, DNS, timeout, ...).
    Failed { reason: String },
}

/// Posts collected articles to a webhook.
#[derive(Debug, Clone)]
pub struct WebhookNotifier {
    client: reqwest::Client,
    endpoint: Option<String>,
    source_label: String,
}

impl WebhookNotifier {
    /// Create a notifier.
    ///
    /// # Arguments
    ///
    /// * `endpoint` - Destination URL; `None` or blank disables delivery
    /// * `timeout` - Upper bound for the whole request
    /// * `source_label` - Value of the `fonte` field in the payload
    pub fn new(
        endpoint: Option<String>,
        timeout: Duration,
        source_label: impl Into<String>,
    ) -> Result<Self, Box<dyn Error>> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            endpoint: non_blank(endpoint),
            source_label: source_label.into(),
        })
    }

    pub fn is_enabled(&self) -> bool {
        self.endpoint.is_some()
    }

    /// Send `articles` to the endpoint in a single request.
    #[instrument(level = "info", skip_all, fields(count = articles.len()))]
    pub async fn notify(&self, articles: &[ArticleRecord]) -> DeliveryOutcome {
        let Some(endpoint) = self.endpoint.as_deref() else {
            warn!("WEBHOOK_URL not configured; skipping delivery");
            return DeliveryOutcome::Disabled;
        };

        let envelope = NotificationEnvelope::new(articles, &self.source_label);
        let t0 = Instant::now();

        let response = match self.client.post(endpoint).json(&envelope).send().await {
            Ok(response) => response,
            Err(e) => {
                error!(
                    %endpoint,
                    elapsed_ms = t0.elapsed().as_millis() as u64,
                    timeout = e.is_timeout(),
                    error = %e,
                    "Webhook delivery failed"
                );
                return DeliveryOutcome::Failed {
                    reason: e.to_string(),
                };
            }
        };

        let status = response.status();
        if status == StatusCode::OK {
            info!(
                %endpoint,
                elapsed_ms = t0.elapsed().as_millis() as u64,
                "Articles delivered to webhook"
            );
            return DeliveryOutcome::Delivered;
        }

        let body = response.text().await.unwrap_or_default();
        warn!(
            %endpoint,
            status = status.as_u16(),
            body = %truncate_for_log(&body, 500),
            "Webhook answered with unexpected status"
        );
        DeliveryOutcome::Rejected {
            status: status.as_u16(),
            body,
        }
    }
}
