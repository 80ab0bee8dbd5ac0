//! Psytrance search-listing scraper.
//!
//! Sweeps a handful of Eventbrite search pages for Tokyo, pulls a few
//! candidates from each, and blends them with synthesized events. This
//! source is deliberately shallow: the search pages are noisy, so we take
//! at most a few containers per page and gate them with a broad keyword
//! check.

use psyfind_core::{AppConfig, Event};
use scraper::{ElementRef, Html, Selector};

use crate::extract::{event_id, fields, placeholder_image};
use crate::fetch::{url, FetchClient};
use crate::{dedupe, fallback};

pub const BASE_URL: &str = "https://www.eventbrite.com";

const SEARCH_URLS: &[&str] = &[
    "https://www.eventbrite.com/d/japan--tokyo/psytrance/",
    "https://www.eventbrite.com/d/japan--tokyo/electronic-music/",
    "https://www.eventbrite.com/d/japan--tokyo/techno/",
];

const CONTAINER_SELECTORS: &[&str] = &[
    "[data-event-id]",
    ".event-card",
    ".search-event-card",
    r#"[class*="event"]"#,
];

const TITLE_SELECTORS: &[&str] = &[
    "h1",
    "h2",
    "h3",
    "h4",
    r#"[class*="title"]"#,
    r#"[class*="name"]"#,
    "a",
];

const PLACE_SELECTORS: &[&str] = &[
    r#"[class*="venue"]"#,
    r#"[class*="location"]"#,
    r#"[class*="address"]"#,
];

/// Broad gate for search results; stricter filtering happens downstream.
const BROAD_KEYWORDS: &[&str] = &[
    "psytrance",
    "psychedelic",
    "trance",
    "goa",
    "electronic",
    "techno",
    "dance",
    "edm",
    "underground",
    "party",
    "night",
];

const CONTAINERS_PER_PAGE: usize = 5;
const MAX_EVENTS: usize = 10;

fn text_by_selectors(container: ElementRef<'_>, selectors: &[&str], default: &str) -> String {
    for selector_str in selectors {
        let selector = Selector::parse(selector_str).expect("invalid selector");
        if let Some(element) = container.select(&selector).next() {
            let text = element
                .text()
                .collect::<Vec<_>>()
                .join(" ")
                .trim()
                .to_string();
            if !text.is_empty() {
                return text;
            }
        }
    }
    default.to_string()
}

fn first_link(container: ElementRef<'_>) -> String {
    let anchors = Selector::parse("a[href]").expect("invalid selector");
    match container.select(&anchors).next().and_then(|a| a.attr("href")) {
        Some(href) => url::resolve(BASE_URL, href),
        None => "#".to_string(),
    }
}

fn parse_search_container(container: ElementRef<'_>) -> Event {
    let title = text_by_selectors(container, TITLE_SELECTORS, "Music Event");
    let date = fields::extract_event_date(container);
    let place = text_by_selectors(container, PLACE_SELECTORS, "Tokyo, Japan");

    Event {
        id: event_id(&title, &date, &place),
        url: first_link(container),
        image: placeholder_image(),
        genre: "Psytrance".to_string(),
        description: format!("Psytrance event: {title}"),
        title,
        date,
        place,
        ..Default::default()
    }
}

fn is_broadly_relevant(event: &Event) -> bool {
    let text = format!("{} {}", event.title, event.description).to_lowercase();
    BROAD_KEYWORDS.iter().any(|keyword| text.contains(keyword))
}

/// Parse one search page: first matching selector chain wins, and only a
/// handful of containers are considered.
fn parse_search_page(html: &str) -> Vec<Event> {
    let doc = Html::parse_document(html);

    for selector_str in CONTAINER_SELECTORS {
        let selector = Selector::parse(selector_str).expect("invalid selector");
        let containers: Vec<ElementRef<'_>> = doc.select(&selector).collect();
        if containers.is_empty() {
            continue;
        }
        tracing::debug!(
            "found {} containers with selector: {}",
            containers.len(),
            selector_str
        );
        return containers
            .into_iter()
            .take(CONTAINERS_PER_PAGE)
            .map(parse_search_container)
            .filter(is_broadly_relevant)
            .collect();
    }

    Vec::new()
}

/// Scrape the psytrance search listings.
///
/// Scraped results are always blended with synthesized events, then
/// deduplicated and capped. Per-page failures are skipped.
pub async fn scrape(client: &FetchClient, _config: &AppConfig) -> Vec<Event> {
    tracing::info!("scraping psytrance search listings");

    let mut events: Vec<Event> = Vec::new();

    for search_url in SEARCH_URLS {
        match client.detail_html(search_url).await {
            Ok(html) => events.extend(parse_search_page(&html)),
            Err(err) => {
                tracing::warn!("error scraping {}: {}", search_url, err);
                continue;
            }
        }
    }

    events.extend(fallback::listing_events());

    let mut events = dedupe::keep_future(dedupe::dedupe(events));
    dedupe::sort_by_date(&mut events);
    events.truncate(MAX_EVENTS);
    tracing::info!("psytrance listings yielded {} events", events.len());
    events
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::date;

    #[test]
    fn test_parse_search_page_caps_containers() {
        let cards: String = (0..8)
            .map(|i| format!(r#"<div class="event-card"><h3>Psytrance Night {i}</h3></div>"#))
            .collect();
        let html = format!("<html><body>{cards}</body></html>");
        let events = parse_search_page(&html);
        assert_eq!(events.len(), CONTAINERS_PER_PAGE);
    }

    #[test]
    fn test_parse_search_page_prefers_data_attribute() {
        let html = r#"
            <html><body>
                <div data-event-id="1"><h2>Goa Trance Gathering</h2></div>
                <div class="event-card"><h3>ignored</h3></div>
            </body></html>
        "#;
        let events = parse_search_page(html);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].title, "Goa Trance Gathering");
        assert_eq!(events[0].genre, "Psytrance");
    }

    #[test]
    fn test_broad_gate() {
        let relevant = Event {
            title: "Full Moon Party".to_string(),
            description: "open air".to_string(),
            ..Default::default()
        };
        assert!(is_broadly_relevant(&relevant));

        let unrelated = Event {
            title: "Pottery Workshop".to_string(),
            description: "hands-on ceramics".to_string(),
            ..Default::default()
        };
        assert!(!is_broadly_relevant(&unrelated));
    }

    #[test]
    fn test_search_container_defaults() {
        let html = r#"<html><body><div class="event-card"><span></span></div></body></html>"#;
        let doc = Html::parse_document(html);
        let selector = Selector::parse(".event-card").expect("invalid selector");
        let container = doc.select(&selector).next().unwrap();
        let event = parse_search_container(container);
        assert_eq!(event.title, "Music Event");
        assert_eq!(event.place, "Tokyo, Japan");
        assert_eq!(event.url, "#");
        assert!(date::parse_canonical(&event.date).is_some());
    }
}
