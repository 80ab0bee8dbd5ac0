//! Keyword relevance classification.
//!
//! Two levels: a basic allow-list substring match, and a strict mode that
//! requires a positive allow-list hit. The deny-list only short-circuits
//! borderline cases faster; it is never an independent accept path.

use psyfind_core::Event;

/// Psy/trance-adjacent terms, English and Japanese.
pub const ALLOWED_KEYWORDS: &[&str] = &[
    "psy",
    "psychedelic",
    "goa",
    "forest",
    "フルオン",
    "サイケ",
    "ハイテック",
    "psybient",
    "サイビエント",
    "trance",
    "トランス",
    "psytrance",
    "progressive",
    "プログレッシブ",
    "hitech",
    "darkpsy",
    "full-on",
    "minimal",
    "ミニマル",
    "ambient",
    "アンビエント",
];

/// Clearly unrelated genres used to reject borderline events quickly.
pub const EXCLUDE_KEYWORDS: &[&str] = &[
    "jpop",
    "j-pop",
    "jazz",
    "rock",
    "punk",
    "metal",
    "classical",
    "演歌",
    "カラオケ",
    "アイドル",
    "ポップス",
];

/// Basic relevance: any single allow-list hit in the text.
pub fn is_relevant(text: &str) -> bool {
    if text.is_empty() {
        return false;
    }
    let lowered = text.to_lowercase();
    ALLOWED_KEYWORDS.iter().any(|keyword| lowered.contains(keyword))
}

/// The allow-list terms found in the text, for diagnostics.
pub fn matches(text: &str) -> Vec<&'static str> {
    if text.is_empty() {
        return Vec::new();
    }
    let lowered = text.to_lowercase();
    ALLOWED_KEYWORDS
        .iter()
        .filter(|keyword| lowered.contains(*keyword))
        .copied()
        .collect()
}

fn combined_text(event: &Event) -> String {
    format!(
        "{} {} {} {}",
        event.title, event.description, event.genre, event.place
    )
}

/// Strict relevance over an event's combined text fields.
///
/// A positive allow-list hit is required; without one the event is
/// rejected whether or not a deny term is present.
pub fn is_relevant_strict(event: &Event) -> bool {
    let combined = combined_text(event);

    if is_relevant(&combined) {
        return true;
    }

    let lowered = combined.to_lowercase();
    for exclude in EXCLUDE_KEYWORDS {
        if lowered.contains(exclude) {
            return false;
        }
    }

    false
}

/// Filter a result set down to strictly relevant events. Events whose
/// genre is still `Unknown`/`Other` get no benefit of the doubt.
pub fn filter_events(events: &[Event]) -> Vec<Event> {
    events
        .iter()
        .filter(|event| {
            if !is_relevant_strict(event) {
                return false;
            }
            let genre = event.genre.to_lowercase();
            if genre == "unknown" || genre == "other" {
                return is_relevant_strict(event);
            }
            true
        })
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_event(title: &str, description: &str, genre: &str, place: &str) -> Event {
        Event {
            title: title.to_string(),
            description: description.to_string(),
            genre: genre.to_string(),
            place: place.to_string(),
            date: "2026/09/01".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_basic_relevance() {
        assert!(is_relevant("Psychedelic Trance Night"));
        assert!(is_relevant("サイケデリック・パーティー"));
        assert!(!is_relevant("Smooth evening of standards"));
        assert!(!is_relevant(""));
    }

    #[test]
    fn test_matches_lists_terms() {
        let found = matches("Progressive psytrance event");
        assert!(found.contains(&"progressive"));
        assert!(found.contains(&"psytrance"));
        assert!(found.contains(&"psy"));
        assert!(matches("").is_empty());
    }

    #[test]
    fn test_strict_accepts_allow_hit() {
        let event = make_event("Goa Trance Classics", "Old school goa trance", "Goa", "Underground Club");
        assert!(is_relevant_strict(&event));
    }

    #[test]
    fn test_strict_rejects_deny_only() {
        let event = make_event("Jazz Night", "Smooth jazz evening", "Jazz", "Jazz Bar");
        assert!(!is_relevant_strict(&event));
    }

    #[test]
    fn test_strict_rejects_no_match_either_way() {
        let event = make_event("Open Mic", "Acoustic evening", "Folk", "Cafe");
        assert!(!is_relevant_strict(&event));
    }

    #[test]
    fn test_filter_events() {
        let events = vec![
            make_event("Psychedelic Trance Night", "Progressive psytrance", "Psytrance", "WOMB, Tokyo"),
            make_event("J-POP Night", "Japanese pop music", "J-Pop", "Karaoke Bar"),
            make_event("Goa Trance Classics", "Old school goa", "Goa", "Underground Club"),
            make_event("Jazz Night", "Smooth jazz", "Jazz", "Jazz Bar"),
        ];

        let filtered = filter_events(&events);
        assert_eq!(filtered.len(), 2);
        assert!(filtered.iter().all(|e| e.genre != "Jazz" && e.genre != "J-Pop"));
    }

    #[test]
    fn test_filter_unknown_genre_requires_strict_pass() {
        let events = vec![
            make_event("Goa Gathering", "forest stage all night", "Unknown", "Chiba"),
            make_event("Secret Party", "a night out", "Unknown", "Tokyo"),
        ];

        let filtered = filter_events(&events);
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].title, "Goa Gathering");
    }
}
