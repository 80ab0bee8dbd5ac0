//! Synthesized fallback events.
//!
//! When a source fails outright or returns too few results, we top up
//! with plausible synthesized events built from real artists and venues.
//! Synthesized ids carry a `mock-` prefix so callers can tell them apart
//! from scraped ones.

use psyfind_core::Event;
use rand::seq::SliceRandom;

use crate::extract::{date, placeholder_image};

const CLUB_ARTISTS: &[&str] = &[
    "Astrix",
    "Vini Vici",
    "Captain Hook",
    "Avalon",
    "Neelix",
    "Liquid Soul",
    "Interactive Noise",
    "Freedom Fighters",
    "Coming Soon",
    "Infected Mushroom",
    "Ace Ventura",
    "Symbolic",
    "Vertical Mode",
    "Ghost Rider",
    "Perfect Stranger",
];

const TOKYO_CLUB_VENUES: &[&str] = &[
    "WOMB, Shibuya",
    "ageHa, Shimbashi",
    "Contact, Shibuya",
    "Sound Museum Vision, Shibuya",
    "CIRCUS Tokyo, Shibuya",
    "Camelot, Shibuya",
    "Atom, Shibuya",
    "Air, Ginza",
    "UNIT, Daikanyama",
    "Fai, Shibuya",
    "Club STORM, Shibuya",
    "Harlem, Shibuya",
];

const CLUB_EVENT_TYPES: &[&str] = &[
    "Psychedelic Journey",
    "Progressive Night",
    "Goa Classics",
    "Forest Gathering",
    "Full-On Experience",
    "Hitech Madness",
    "Trance Unity",
    "Psychedelic Adventure",
];

const LISTING_ARTISTS: &[&str] = &[
    "AMAKUSA",
    "Gotalien",
    "Earthspace",
    "Azax Syndrom",
    "Hypnotic Oriental Express",
    "Hilight Tribe",
    "Vini Vici",
    "Astrix",
    "Captain Hook",
    "Avalon",
    "Neelix",
    "Liquid Soul",
    "Coming Soon",
    "Freedom Fighters",
    "Interactive Noise",
];

const CLUB_BATCH: usize = 8;
const LISTING_BATCH: usize = 8;

/// Synthesize a batch of club-night events with random future dates.
pub fn club_events() -> Vec<Event> {
    let mut rng = rand::thread_rng();
    let mut events = Vec::with_capacity(CLUB_BATCH);

    for i in 0..CLUB_BATCH {
        // Pools are non-empty consts, choose cannot fail.
        let artist = CLUB_ARTISTS.choose(&mut rng).copied().unwrap_or("Astrix");
        let venue = TOKYO_CLUB_VENUES
            .choose(&mut rng)
            .copied()
            .unwrap_or("WOMB, Shibuya");
        let event_type = CLUB_EVENT_TYPES
            .choose(&mut rng)
            .copied()
            .unwrap_or("Psychedelic Journey");

        let club = venue.split(',').next().unwrap_or(venue);
        events.push(Event {
            id: format!("mock-{}", 5000 + i),
            title: format!("{artist} presents {event_type}"),
            date: date::future_date(),
            place: venue.to_string(),
            url: format!("https://clubberia.com/ja/events/psychedelic-{i}"),
            image: placeholder_image(),
            genre: "Psychedelic Trance".to_string(),
            description: format!(
                "Experience the psychedelic journey with {artist} at {club}. \
                 An unforgettable night of {}!",
                event_type.to_lowercase()
            ),
            ..Default::default()
        });
    }

    events
}

/// Synthesize psytrance listing events with varied title templates.
pub fn listing_events() -> Vec<Event> {
    let mut rng = rand::thread_rng();
    let mut events = Vec::with_capacity(LISTING_BATCH);

    for i in 0..LISTING_BATCH {
        let artist = LISTING_ARTISTS.choose(&mut rng).copied().unwrap_or("AMAKUSA");
        let venue = TOKYO_CLUB_VENUES
            .choose(&mut rng)
            .copied()
            .unwrap_or("WOMB, Shibuya");
        let event_type = CLUB_EVENT_TYPES
            .choose(&mut rng)
            .copied()
            .unwrap_or("Trance Unity");

        let titles = [
            format!("{artist} presents {event_type}"),
            format!("{event_type} feat. {artist}"),
            format!("Tokyo {event_type} with {artist}"),
            format!("{artist} - {event_type}"),
            format!("Psychedelic Night: {artist}"),
        ];
        let title = titles
            .choose(&mut rng)
            .cloned()
            .unwrap_or_else(|| titles[0].clone());

        let club = venue.split(',').next().unwrap_or(venue);
        let genre_head = event_type.split_whitespace().next().unwrap_or("Psychedelic");
        events.push(Event {
            id: format!("mock-{}", 4000 + i),
            title,
            date: date::future_date(),
            place: format!("{venue}, Tokyo"),
            url: format!("https://www.eventbrite.com/e/psytrance-tokyo-{i}"),
            image: placeholder_image(),
            genre: format!("{genre_head} Psytrance"),
            description: format!(
                "Join us for an unforgettable {} featuring {artist} at {club} in Tokyo. \
                 Experience the psychedelic journey!",
                event_type.to_lowercase()
            ),
            ..Default::default()
        });
    }

    events
}

/// Well-known major festivals, used when the festival API comes up short.
/// Dates are synthesized so the entries always land in the future.
pub fn festival_events() -> Vec<Event> {
    let entries: [(&str, &str, &str, &str, &str, u64, u64, &str, &str); 5] = [
        (
            "tomorrowland",
            "Tomorrowland",
            "De Schorre, Boom, Belgium",
            "https://www.tomorrowland.com",
            "Electronic Festival",
            400_000,
            200,
            "Boom",
            "Belgium",
        ),
        (
            "ultra",
            "Ultra Music Festival",
            "Bayfront Park, Miami, USA",
            "https://ultramusicfestival.com",
            "Electronic Festival",
            165_000,
            150,
            "Miami",
            "USA",
        ),
        (
            "creamfields",
            "Creamfields",
            "Daresbury, Cheshire, UK",
            "https://www.creamfields.com",
            "Electronic Festival",
            70_000,
            120,
            "Cheshire",
            "UK",
        ),
        (
            "ozora",
            "Ozora Festival",
            "Dádpuszta, Hungary",
            "https://ozora.eu",
            "Psychedelic Trance Festival",
            40_000,
            80,
            "Dádpuszta",
            "Hungary",
        ),
        (
            "awakenings",
            "Awakenings Festival",
            "Spaarnwoude, Netherlands",
            "https://awakenings.nl",
            "Techno Festival",
            80_000,
            100,
            "Amsterdam",
            "Netherlands",
        ),
    ];

    entries
        .into_iter()
        .map(
            |(slug, title, place, url, genre, capacity, artist_count, city, country)| Event {
                id: format!("mock-{slug}"),
                title: title.to_string(),
                date: date::future_date(),
                place: place.to_string(),
                url: url.to_string(),
                image: placeholder_image(),
                genre: genre.to_string(),
                description: format!(
                    "Major music festival featuring {artist_count} artists in {city}, {country}"
                ),
                capacity: Some(capacity),
                artist_count: Some(artist_count),
                city: Some(city.to_string()),
                country: Some(country.to_string()),
            },
        )
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_club_events_shape() {
        let events = club_events();
        assert_eq!(events.len(), CLUB_BATCH);
        for event in &events {
            assert!(event.id.starts_with("mock-"));
            assert!(event.is_valid());
            assert_eq!(event.genre, "Psychedelic Trance");
            assert!(date::parse_canonical(&event.date).is_some());
            assert!(event.capacity.is_none());
        }
    }

    #[test]
    fn test_listing_events_shape() {
        let events = listing_events();
        assert_eq!(events.len(), LISTING_BATCH);
        for event in &events {
            assert!(event.id.starts_with("mock-"));
            assert!(event.genre.ends_with("Psytrance"));
            assert!(event.place.contains("Tokyo"));
        }
    }

    #[test]
    fn test_festival_events_carry_scale_fields() {
        let events = festival_events();
        assert_eq!(events.len(), 5);
        for event in &events {
            assert!(event.id.starts_with("mock-"));
            assert!(event.capacity.is_some());
            assert!(event.artist_count.is_some());
            assert!(event.city.is_some());
            assert!(event.country.is_some());
            assert!(date::parse_canonical(&event.date).is_some());
        }
        assert!(events.iter().any(|e| e.title.contains("Ozora")));
    }
}
