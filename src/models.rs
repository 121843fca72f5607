//! Data models for collected articles and the webhook payload.
//!
//! This module defines the two structures that leave the process:
//! - [`ArticleRecord`]: One news item pulled from the search results page
//! - [`NotificationEnvelope`]: The JSON body posted to the delivery endpoint
//!
//! Field names on the wire are Portuguese (`titulo`, `descricao`, ...) because
//! the downstream workflows consuming the webhook were built against them.

use chrono::{DateTime, Local};
use serde::Serialize;

/// A single article collected from the search results page.
///
/// Every field is always populated. Missing markup is replaced by the
/// extractor's fallback values before a record is built.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArticleRecord {
    /// Headline text, or the placeholder title when the heading is absent.
    #[serde(rename = "titulo")]
    pub title: String,
    /// Absolute URL of the article.
    pub link: String,
    /// Summary paragraph, empty when absent.
    #[serde(rename = "descricao")]
    pub description: String,
    /// When this record was extracted.
    #[serde(rename = "data_coleta")]
    pub collected_at: DateTime<Local>,
}

/// Payload delivered to the webhook once per run.
#[derive(Debug, Serialize)]
pub struct NotificationEnvelope<'a> {
    #[serde(rename = "noticias")]
    pub articles: &'a [ArticleRecord],
    pub timestamp: DateTime<Local>,
    #[serde(rename = "fonte")]
    pub source: &'a str,
}

impl<'a> NotificationEnvelope<'a> {
    /// Wrap `articles` with the current time and the given source label.
    pub fn new(articles: &'a [ArticleRecord], source: &'a str) -> Self {
        Self {
            articles,
            timestamp: Local::now(),
            source,
        }
    }
}
