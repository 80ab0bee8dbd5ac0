//! Detail-page enrichment.
//!
//! A best-effort second pass over an event's own detail page: re-derive
//! the genre from full-page text, and opportunistically pick up a longer
//! description and a more specific venue. Modeled as a pure function so
//! the pipeline stages stay composable; fetch failures upstream simply
//! skip the call.

use psyfind_core::Event;
use scraper::{Html, Selector};

const DESCRIPTION_SELECTORS: &[&str] = &[
    ".event-description",
    ".description",
    r#"[class*="description"]"#,
    "p",
];

const VENUE_SELECTORS: &[&str] = &[".venue-name", ".location", r#"[class*="venue"]"#];

const MAX_DESCRIPTION_CHARS: usize = 500;

/// Whether a detail fetch is worth attempting for this URL.
///
/// Placeholder anchors and URLs outside the events section are skipped.
pub fn should_fetch(url: &str) -> bool {
    !url.is_empty() && url != "#" && url.contains("events")
}

/// Full-page text of a detail document, whitespace-collapsed.
pub fn page_text(html: &str) -> String {
    let doc = Html::parse_document(html);
    doc.root_element()
        .text()
        .collect::<Vec<_>>()
        .join(" ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Genre priority over full-page text: explicit psy terms beat goa beat
/// generic trance; then the house/techno/disco bucket; then Other.
pub fn derive_genre(full_text: &str) -> String {
    let lowered = full_text.to_lowercase();

    if ["psy", "psychedelic", "goa", "trance"].iter().any(|kw| lowered.contains(kw)) {
        if lowered.contains("psychedelic") || lowered.contains("psy") {
            return "Psychedelic Trance".to_string();
        }
        if lowered.contains("goa") {
            return "Goa Trance".to_string();
        }
        if lowered.contains("trance") {
            return "Trance".to_string();
        }
        return "Electronic".to_string();
    }

    if ["house", "techno", "disco"].iter().any(|kw| lowered.contains(kw)) {
        if lowered.contains("house") {
            return "House".to_string();
        }
        if lowered.contains("techno") {
            return "Techno".to_string();
        }
        if lowered.contains("disco") {
            return "Disco".to_string();
        }
        return "Electronic".to_string();
    }

    "Other".to_string()
}

/// Refine an event from its detail page. Only `genre`, `description`,
/// and `place` may change; first match wins per field.
pub fn enrich(event: &Event, detail_html: &str) -> Event {
    let doc = Html::parse_document(detail_html);
    let mut enriched = event.clone();

    let full_text = doc
        .root_element()
        .text()
        .collect::<Vec<_>>()
        .join(" ");
    enriched.genre = derive_genre(&full_text);

    for selector_str in DESCRIPTION_SELECTORS {
        let selector = Selector::parse(selector_str).expect("invalid selector");
        if let Some(element) = doc.select(&selector).next() {
            let text = element
                .text()
                .collect::<Vec<_>>()
                .join(" ")
                .split_whitespace()
                .collect::<Vec<_>>()
                .join(" ");
            if !text.is_empty() && text.chars().count() > enriched.description.chars().count() {
                enriched.description = text.chars().take(MAX_DESCRIPTION_CHARS).collect();
                break;
            }
        }
    }

    for selector_str in VENUE_SELECTORS {
        let selector = Selector::parse(selector_str).expect("invalid selector");
        if let Some(element) = doc.select(&selector).next() {
            let text = element
                .text()
                .collect::<Vec<_>>()
                .join(" ")
                .trim()
                .to_string();
            if text.chars().count() > 2 {
                enriched.place = text;
                break;
            }
        }
    }

    enriched
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_event() -> Event {
        Event {
            id: "ev-1".to_string(),
            title: "Vitamin".to_string(),
            date: "2026/09/01".to_string(),
            place: "Tokyo, Japan".to_string(),
            url: "https://clubberia.com/ja/events/123".to_string(),
            description: "Event: Vitamin at Tokyo, Japan".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_should_fetch() {
        assert!(should_fetch("https://clubberia.com/ja/events/123"));
        assert!(!should_fetch(""));
        assert!(!should_fetch("#"));
        assert!(!should_fetch("https://clubberia.com/about"));
    }

    #[test]
    fn test_genre_priority() {
        assert_eq!(derive_genre("a psychedelic trance allnighter"), "Psychedelic Trance");
        assert_eq!(derive_genre("goa classics revival"), "Goa Trance");
        assert_eq!(derive_genre("uplifting trance session"), "Trance");
        assert_eq!(derive_genre("deep house with techno"), "House");
        assert_eq!(derive_genre("warehouse techno"), "House"); // substring hit
        assert_eq!(derive_genre("italo disco night"), "Disco");
        assert_eq!(derive_genre("string quartet recital"), "Other");
    }

    #[test]
    fn test_enrich_sets_genre_from_page_text() {
        let html = "<html><body><h1>Goa revival</h1><span>all night goa classics</span></body></html>";
        let enriched = enrich(&make_event(), html);
        assert_eq!(enriched.genre, "Goa Trance");
    }

    #[test]
    fn test_enrich_takes_longer_description_only() {
        let html = r#"
            <html><body>
                <div class="event-description">A deep psychedelic journey through the forest
                with live sets until sunrise and chill ambient on the second floor.</div>
            </body></html>
        "#;
        let event = make_event();
        let enriched = enrich(&event, html);
        assert!(enriched.description.len() > event.description.len());
        assert!(enriched.description.contains("psychedelic journey"));
    }

    #[test]
    fn test_enrich_keeps_description_when_candidate_shorter() {
        let html = r#"<html><body><p>short</p></body></html>"#;
        let event = make_event();
        let enriched = enrich(&event, html);
        assert_eq!(enriched.description, event.description);
    }

    #[test]
    fn test_enrich_overwrites_place_with_specific_venue() {
        let html = r#"<html><body><div class="venue-name">WOMB, Shibuya</div></body></html>"#;
        let enriched = enrich(&make_event(), html);
        assert_eq!(enriched.place, "WOMB, Shibuya");
    }

    #[test]
    fn test_enrich_never_touches_title_or_date() {
        let html = r#"<html><body><h1>Completely Different</h1><time>1999/01/01</time></body></html>"#;
        let event = make_event();
        let enriched = enrich(&event, html);
        assert_eq!(enriched.title, event.title);
        assert_eq!(enriched.date, event.date);
        assert_eq!(enriched.id, event.id);
    }

    #[test]
    fn test_description_truncated_at_limit() {
        let long = "x".repeat(800);
        let html = format!(r#"<html><body><p>{long}</p></body></html>"#);
        let enriched = enrich(&make_event(), &html);
        assert_eq!(enriched.description.chars().count(), MAX_DESCRIPTION_CHARS);
    }
}
