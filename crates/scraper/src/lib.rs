//! Psytrance event scraping.
//!
//! This crate provides:
//! - An HTTP fetch layer with browser-like headers and split timeouts
//! - Heuristic extraction of events from listing HTML
//! - Keyword relevance classification and detail-page enrichment
//! - Source pipelines (Clubberia, psytrance listings, major festivals)
//! - A cache-aside [`EventService`] that always yields a usable result

pub mod classify;
pub mod dedupe;
pub mod enrich;
pub mod extract;
pub mod fallback;
pub mod fetch;
pub mod orchestrator;
pub mod sources;

pub use fetch::{FetchClient, FetchConfig};
pub use orchestrator::EventService;
pub use sources::Source;
