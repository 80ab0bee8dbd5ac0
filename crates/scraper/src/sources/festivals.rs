//! Major-festival discovery via the Songkick API.
//!
//! Sweeps a set of genre queries plus the major cities of each region,
//! then keeps only festivals that look genuinely large: a famous name,
//! a big lineup, or a big venue.

use psyfind_core::{AppConfig, Event};

use crate::sources::songkick::{SongkickClient, SongkickConfig};
use crate::fetch::FetchClient;
use crate::{dedupe, fallback};

const SEARCH_QUERIES: &[&str] = &[
    "electronic music festival",
    "trance festival",
    "house festival",
    "techno festival",
    "edm festival",
    "psytrance festival",
];

const REGION_CITIES: &[(&str, &[&str])] = &[
    ("Europe", &["London", "Berlin", "Amsterdam", "Barcelona", "Paris"]),
    ("North America", &["New York", "Los Angeles", "Chicago", "Toronto", "Miami"]),
    ("Asia", &["Tokyo", "Seoul", "Bangkok", "Mumbai", "Beijing"]),
    ("Australia", &["Sydney", "Melbourne", "Brisbane"]),
];

/// Names that mark a festival as major regardless of reported size.
const MAJOR_FEST_KEYWORDS: &[&str] = &[
    "festival",
    "fest",
    "music festival",
    "electronic music festival",
    "tomorrowland",
    "ultra",
    "creamfields",
    "awakenings",
    "boom",
    "ozora",
    "burning man",
    "coachella",
    "glastonbury",
    "primavera",
    "sonar",
    "time warp",
    "nature one",
    "love parade",
    "qlimax",
];

const MIN_CAPACITY: u64 = 10_000;
const MIN_ARTISTS: u64 = 50;
const MIN_FESTIVALS: usize = 5;
const MAX_FESTIVALS: usize = 30;

/// Whether an event qualifies as a major festival.
pub fn is_major(event: &Event) -> bool {
    let title = event.title.to_lowercase();
    let artist_count = event.artist_count.unwrap_or(0);
    let capacity = event.capacity.unwrap_or(0);

    if MAJOR_FEST_KEYWORDS.iter().any(|kw| title.contains(kw)) {
        return true;
    }
    if artist_count >= MIN_ARTISTS {
        return true;
    }
    if capacity >= MIN_CAPACITY {
        return true;
    }
    // Named a festival with a real lineup, just not a famous one.
    title.contains("festival") && artist_count >= 20
}

async fn collect(client: &SongkickClient) -> Vec<Event> {
    let mut events: Vec<Event> = Vec::new();

    for query in SEARCH_QUERIES {
        match client.events_by_query(query).await {
            Ok(found) => events.extend(found.into_iter().map(|e| e.into_event())),
            Err(err) => tracing::warn!("festival query '{}' failed: {}", query, err),
        }
    }

    for (region, cities) in REGION_CITIES {
        for city in *cities {
            match client.events_by_city(city).await {
                Ok(found) => events.extend(found.into_iter().map(|e| e.into_event())),
                Err(err) => {
                    tracing::warn!("festival search in {} ({}) failed: {}", city, region, err);
                }
            }
        }
    }

    events
}

/// Shape raw API results into the final festival set: dedupe, keep the
/// majors, drop past dates, sort, top up thin results, cap.
fn finalize(events: Vec<Event>) -> Vec<Event> {
    let majors: Vec<Event> = dedupe::dedupe(events).into_iter().filter(is_major).collect();

    let mut festivals = dedupe::keep_future(majors);
    dedupe::sort_by_date(&mut festivals);

    if festivals.len() < MIN_FESTIVALS {
        tracing::info!("adding well-known festivals as fallback");
        festivals.extend(fallback::festival_events());
        dedupe::sort_by_date(&mut festivals);
    }

    festivals.truncate(MAX_FESTIVALS);
    festivals
}

/// Fetch and filter major festivals, topping up with well-known entries
/// when the API comes up short.
pub async fn scrape(_client: &FetchClient, config: &AppConfig) -> Vec<Event> {
    tracing::info!("fetching major festivals from songkick");

    let songkick = match SongkickClient::new(SongkickConfig::from_app_config(config)) {
        Ok(client) => client,
        Err(err) => {
            tracing::error!("failed to build songkick client: {}", err);
            return fallback::festival_events();
        }
    };

    let festivals = finalize(collect(&songkick).await);
    tracing::info!("songkick yielded {} major festivals", festivals.len());
    festivals
}
