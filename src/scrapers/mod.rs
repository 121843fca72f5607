//! Fetching and parsing of the news search results.
//!
//! Collection happens in two steps:
//!
//! 1. **Rendering**: a [`Renderer`] turns the search URL into the markup the
//!    page has after its client-side scripts ran
//! 2. **Extraction**: [`govbr::GovBrExtractor`] walks that markup and builds
//!    one record per result container
//!
//! # Renderers
//!
//! | Renderer | Module | Notes |
//! |----------|--------|-------|
//! | [`browser::WebDriverRenderer`] | [`browser`] | Headless Chrome over WebDriver |
//! | [`browser::FileRenderer`] | [`browser`] | Markup saved to disk, for offline runs |

use std::error::Error;
use url::Url;

pub mod browser;
pub mod govbr;

/// Produces the rendered markup for a page.
///
/// Implementors own whatever resources rendering needs and must release them
/// before returning, whether or not rendering succeeded.
pub trait Renderer {
    /// Render `url` and return the resulting document markup.
    async fn render(&self, url: &Url) -> Result<String, Box<dyn Error>>;
}
