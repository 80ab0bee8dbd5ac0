//! The event record produced by every extraction pipeline.

use serde::{Deserialize, Serialize};

/// A single event listing.
///
/// Produced by a field extractor or the fallback synthesizer, optionally
/// refined by detail-page enrichment, and never changed once it has passed
/// deduplication. `id` is stable within one pipeline run only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: String,
    pub title: String,
    /// Canonical `YYYY/MM/DD`, or a generated future date when parsing failed.
    pub date: String,
    pub place: String,
    pub url: String,
    pub image: String,
    pub genre: String,
    pub description: String,

    /// Estimated venue capacity. Festival sources only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub capacity: Option<u64>,

    /// Number of billed performers. Festival sources only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub artist_count: Option<u64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
}

impl Event {
    /// Identity key for deduplication.
    pub fn identity(&self) -> (String, String) {
        (self.title.clone(), self.date.clone())
    }

    /// The validity gate applied before an event enters the pipeline:
    /// a real title (longer than 3 chars), a date, and a place.
    pub fn is_valid(&self) -> bool {
        self.title.len() > 3 && !self.date.is_empty() && !self.place.is_empty()
    }
}

impl Default for Event {
    fn default() -> Self {
        Self {
            id: String::new(),
            title: String::new(),
            date: String::new(),
            place: String::new(),
            url: String::new(),
            image: String::new(),
            genre: "Unknown".to_string(),
            description: String::new(),
            capacity: None,
            artist_count: None,
            city: None,
            country: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_event(title: &str, date: &str, place: &str) -> Event {
        Event {
            title: title.to_string(),
            date: date.to_string(),
            place: place.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_validity_gate() {
        assert!(make_event("Goa Night", "2026/09/01", "WOMB, Shibuya").is_valid());
        assert!(!make_event("abc", "2026/09/01", "WOMB").is_valid());
        assert!(!make_event("Goa Night", "", "WOMB").is_valid());
        assert!(!make_event("Goa Night", "2026/09/01", "").is_valid());
    }

    #[test]
    fn test_identity_is_title_and_date() {
        let a = make_event("Goa Night", "2026/09/01", "WOMB");
        let b = make_event("Goa Night", "2026/09/01", "Contact");
        assert_eq!(a.identity(), b.identity());
    }

    #[test]
    fn test_optional_fields_skipped_in_json() {
        let event = make_event("Goa Night", "2026/09/01", "WOMB");
        let json = serde_json::to_string(&event).unwrap();
        assert!(!json.contains("capacity"));
        assert!(!json.contains("artist_count"));
    }
}
