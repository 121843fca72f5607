//! Run settings.
//!
//! Settings are resolved in three layers, later ones winning:
//! built-in defaults, an optional YAML file, then command-line flags and
//! environment variables.
//!
//! ```yaml
//! search_term: CEBAS
//! webhook_url: https://n8n.example/webhook/cebas
//! render_timeout_secs: 10
//! delivery_timeout_secs: 30
//! ```

use crate::cli::Cli;
use crate::utils::non_blank;
use serde::Deserialize;
use std::error::Error;
use std::path::Path;
use std::time::Duration;
use tracing::{info, instrument};

pub const DEFAULT_SEARCH_URL: &str = "https://www.gov.br/pt-br/noticias";
pub const DEFAULT_SEARCH_TERM: &str = "CEBAS";
pub const DEFAULT_PORTAL_ORIGIN: &str = "https://www.gov.br";
pub const DEFAULT_WEBDRIVER_URL: &str = "http://localhost:9515";
pub const DEFAULT_SOURCE_LABEL: &str = "Railway CEBAS Scraper";
pub const DEFAULT_RENDER_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_DELIVERY_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Search endpoint, without the keyword.
    pub search_url: String,
    pub search_term: String,
    /// Origin relative article links are resolved against.
    pub portal_origin: String,
    pub webdriver_url: String,
    /// Delivery endpoint; `None` disables delivery.
    pub webhook_url: Option<String>,
    pub render_timeout_secs: u64,
    pub delivery_timeout_secs: u64,
    /// Value sent as `fonte` in the payload.
    pub source_label: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            search_url: DEFAULT_SEARCH_URL.to_string(),
            search_term: DEFAULT_SEARCH_TERM.to_string(),
            portal_origin: DEFAULT_PORTAL_ORIGIN.to_string(),
            webdriver_url: DEFAULT_WEBDRIVER_URL.to_string(),
            webhook_url: None,
            render_timeout_secs: DEFAULT_RENDER_TIMEOUT_SECS,
            delivery_timeout_secs: DEFAULT_DELIVERY_TIMEOUT_SECS,
            source_label: DEFAULT_SOURCE_LABEL.to_string(),
        }
    }
}

impl Settings {
    /// Parse settings from YAML; missing keys keep their defaults.
    pub fn from_yaml(yaml: &str) -> Result<Self, Box<dyn Error>> {
        let settings: Settings = serde_yaml::from_str(yaml)?;
        Ok(settings.normalized())
    }

    /// Load settings from a YAML file.
    #[instrument(level = "info", skip_all, fields(path = %path.display()))]
    pub fn load(path: &Path) -> Result<Self, Box<dyn Error>> {
        let yaml = std::fs::read_to_string(path)?;
        let settings = Self::from_yaml(&yaml)?;
        info!("Loaded settings file");
        Ok(settings)
    }

    /// Resolve the settings for a run from defaults, the optional settings
    /// file named by `cli`, and the flag/environment overrides.
    pub fn resolve(cli: &Cli) -> Result<Self, Box<dyn Error>> {
        let base = match &cli.config {
            Some(path) => Self::load(path)?,
            None => Self::default(),
        };
        Ok(base.with_overrides(cli))
    }

    /// Apply flag and environment overrides on top of `self`.
    pub fn with_overrides(mut self, cli: &Cli) -> Self {
        if let Some(url) = non_blank(cli.webhook_url.clone()) {
            self.webhook_url = Some(url);
        }
        if let Some(url) = non_blank(cli.webdriver_url.clone()) {
            self.webdriver_url = url;
        }
        if let Some(term) = non_blank(cli.search_term.clone()) {
            self.search_term = term;
        }
        if let Some(secs) = cli.render_timeout_secs {
            self.render_timeout_secs = secs;
        }
        if let Some(secs) = cli.delivery_timeout_secs {
            self.delivery_timeout_secs = secs;
        }
        self.normalized()
    }

    pub fn render_timeout(&self) -> Duration {
        Duration::from_secs(self.render_timeout_secs)
    }

    pub fn delivery_timeout(&self) -> Duration {
        Duration::from_secs(self.delivery_timeout_secs)
    }

    fn normalized(mut self) -> Self {
        self.webhook_url = non_blank(self.webhook_url.take());
        self
    }
}
