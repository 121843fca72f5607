//! Delivery of collected articles to downstream consumers.
//!
//! # Submodules
//!
//! - [`webhook`]: Posts the articles of a run as one JSON envelope
//!
//! # Payload
//!
//! ```text
//! {
//!   "noticias": [ { "titulo", "link", "descricao", "data_coleta" }, ... ],
//!   "timestamp": "2024-05-06T14:30:00.123-03:00",
//!   "fonte": "Railway CEBAS Scraper"
//! }
//! ```

pub mod webhook;
