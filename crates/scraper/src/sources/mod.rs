//! Event sources.
//!
//! Each source owns its site-specific pipeline and always yields a usable
//! result set: scraped events when the upstream cooperates, synthesized
//! fallbacks when it does not.

use psyfind_core::{AppConfig, Event};

use crate::fetch::FetchClient;

pub mod clubberia;
pub mod festivals;
pub mod listings;
pub mod songkick;

/// A scrapeable event source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Source {
    /// Clubberia's psychedelic-trance listing (Tokyo club nights).
    Clubberia,
    /// Eventbrite-style psytrance search listings.
    Psytrance,
    /// Major festivals via the Songkick API.
    Major,
}

impl Source {
    pub fn parse(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "clubberia" => Some(Self::Clubberia),
            "psytrance" => Some(Self::Psytrance),
            "major" | "festivals" => Some(Self::Major),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Clubberia => "clubberia",
            Self::Psytrance => "psytrance",
            Self::Major => "major",
        }
    }
}

impl std::fmt::Display for Source {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Run the full pipeline for a source. Never fails: sources degrade to
/// synthesized events on upstream errors.
pub async fn scrape(source: Source, client: &FetchClient, config: &AppConfig) -> Vec<Event> {
    match source {
        Source::Clubberia => clubberia::scrape(client, config).await,
        Source::Psytrance => listings::scrape(client, config).await,
        Source::Major => festivals::scrape(client, config).await,
    }
}
