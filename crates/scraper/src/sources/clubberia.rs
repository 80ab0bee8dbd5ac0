//! Clubberia listing scraper.
//!
//! Walks the paginated psychedelic-trance listing, extracts candidate
//! events per page, and keeps only the ones that pass relevance checks.
//! Events whose listing snippet is inconclusive get a second chance via
//! their detail page.

use psyfind_core::{AppConfig, Event};
use scraper::Html;

use crate::extract::{locate_containers, parse_container};
use crate::fallback;
use crate::fetch::FetchClient;
use crate::{classify, dedupe, enrich};

pub const BASE_URL: &str = "https://clubberia.com";
pub const LISTING_URL: &str = "https://clubberia.com/ja/events/?genre=psychedelic-trance";

/// Minimum result count before fallback events are blended in.
const MIN_EVENTS: usize = 3;

fn page_url(page: usize) -> String {
    if page > 1 {
        format!("{LISTING_URL}&page={page}")
    } else {
        LISTING_URL.to_string()
    }
}

/// Parse one listing page into candidate events.
///
/// Synchronous on purpose: the parsed document is not `Send` and must not
/// be held across an await point.
fn parse_listing(html: &str) -> Vec<Event> {
    let doc = Html::parse_document(html);
    locate_containers(&doc)
        .into_iter()
        .map(|container| parse_container(container, BASE_URL))
        .filter(Event::is_valid)
        .collect()
}

fn basic_text(event: &Event) -> String {
    format!("{} {} {}", event.title, event.description, event.genre)
}

/// Decide whether a candidate belongs in the result set, enriching it
/// from its detail page when the listing snippet alone is inconclusive.
async fn filter_with_details(client: &FetchClient, event: Event) -> Option<Event> {
    if classify::is_relevant(&basic_text(&event)) {
        return Some(event);
    }

    if !enrich::should_fetch(&event.url) {
        return None;
    }

    match client.detail_html(&event.url).await {
        Ok(html) => {
            let full_text = enrich::page_text(&html);
            if classify::is_relevant(&full_text) {
                Some(enrich::enrich(&event, &html))
            } else {
                None
            }
        }
        Err(err) => {
            tracing::debug!("detail fetch failed for {}: {}", event.title, err);
            None
        }
    }
}

/// Shape accumulated candidates into the final result set: dedupe, drop
/// past dates, sort, top up thin results with synthesized events, cap.
fn finalize(events: Vec<Event>, max_events: usize) -> Vec<Event> {
    let mut events = dedupe::keep_future(dedupe::dedupe(events));
    dedupe::sort_by_date(&mut events);

    if events.len() < MIN_EVENTS {
        tracing::info!("adding synthesized psy events as fallback");
        events.extend(fallback::club_events());
        dedupe::sort_by_date(&mut events);
    }

    events.truncate(max_events);
    events
}

/// Scrape the Clubberia listing end to end.
///
/// Per-page failures are logged and skipped; an empty final result is
/// topped up with synthesized events so callers always get something.
pub async fn scrape(client: &FetchClient, config: &AppConfig) -> Vec<Event> {
    tracing::info!("scraping psy events from clubberia");

    let max_events = config.max_events;
    let mut all_events: Vec<Event> = Vec::new();

    for page in 1..=config.max_pages {
        let url = page_url(page);
        tracing::debug!("scraping page {}: {}", page, url);

        let html = match client.html(&url).await {
            Ok(html) => html,
            Err(err) => {
                tracing::warn!("error scraping page {}: {}", page, err);
                continue;
            }
        };

        let candidates = parse_listing(&html);
        if candidates.is_empty() {
            tracing::debug!("no events found on page {}, stopping pagination", page);
            break;
        }

        let mut page_events = Vec::new();
        for event in candidates {
            if let Some(kept) = filter_with_details(client, event).await {
                page_events.push(kept);
            }
        }

        tracing::debug!("page {}: found {} psy events", page, page_events.len());
        all_events.extend(page_events);

        if all_events.len() >= max_events {
            break;
        }
    }

    let events = finalize(all_events, max_events);
    tracing::info!("clubberia yielded {} events", events.len());
    events
}
