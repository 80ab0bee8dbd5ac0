//! Per-field extraction strategies with validation and ordered fallbacks.
//!
//! Every field walks its own selector chain, takes the first candidate
//! that passes validation, then degrades through text heuristics down to
//! a generic placeholder. Nothing in here returns an error; a container
//! that yields nothing usable is rejected later by the validity gate.

use super::date;
use crate::fetch::resolve;
use psyfind_core::Event;
use rand::seq::SliceRandom;
use regex::Regex;
use scraper::{ElementRef, Selector};
use sha2::{Digest, Sha256};

const TITLE_SELECTORS: &[&str] = &[
    ".c-post__body h3",
    ".c-post__body p",
    ".c-post__frame h3",
    ".c-post__frame p",
    "h3",
    "h2",
    "h4",
];

const VENUE_SELECTORS: &[&str] = &[".c-post__body div", ".c-post__frame div", "div"];

const IMAGE_SELECTORS: &[&str] = &[".event-img", ".event-image", "img.event", "img"];

const LAZY_IMAGE_ATTRS: &[&str] = &["data-src", "data-original", "data-lazy"];

const KNOWN_VENUES: &[&str] = &[
    "ENTER", "WOMB", "ageHa", "Contact", "Vision", "CIRCUS", "Camelot", "Atom", "Air", "UNIT",
    "Fai", "STORM", "Harlem", "Club", "Bar", "shibuya", "shinjuku", "harajuku", "roppongi",
    "ginza", "omotesando",
];

const TOKYO_VENUES: &[&str] = &[
    "ENTER shibuya",
    "WOMB",
    "ageHa",
    "Contact",
    "Sound Museum Vision",
    "CIRCUS Tokyo",
    "Camelot",
    "Atom",
    "Air",
    "UNIT",
    "Fai",
    "Club STORM",
    "Harlem",
    "渋谷",
    "新宿",
    "原宿",
    "六本木",
    "銀座",
    "表参道",
];

pub const PLACEHOLDER_IMAGES: &[&str] = &[
    "https://images.unsplash.com/photo-1518005020951-eccb49447d0a?q=80&w=400&auto=format&fit=crop",
    "https://images.unsplash.com/photo-1517457375823-0706694789e8?q=80&w=400&auto=format&fit=crop",
    "https://images.unsplash.com/photo-1500382017468-9049ce8b650c?q=80&w=400&auto=format&fit=crop",
    "https://images.unsplash.com/photo-1493225457124-a3eb161ffa5f?q=80&w=400&auto=format&fit=crop",
    "https://images.unsplash.com/photo-1540039155733-5bb30b53aa14?q=80&w=400&auto=format&fit=crop",
    "https://images.unsplash.com/photo-1571266028243-d220c9b34652?q=80&w=400&auto=format&fit=crop",
];

/// One of the placeholder images, picked at random.
pub fn placeholder_image() -> String {
    PLACEHOLDER_IMAGES
        .choose(&mut rand::thread_rng())
        .expect("placeholder pool is non-empty")
        .to_string()
}

/// Element text with whitespace collapsed.
fn text_of(element: ElementRef<'_>) -> String {
    element
        .text()
        .collect::<Vec<_>>()
        .join(" ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Element text as trimmed, non-empty fragments (approximates lines).
fn lines_of(element: ElementRef<'_>) -> Vec<String> {
    element
        .text()
        .flat_map(|fragment| fragment.split('\n'))
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// Opaque event id, stable within one pipeline run.
pub fn event_id(title: &str, date: &str, place: &str) -> String {
    let digest = Sha256::digest(format!("{title}|{date}|{place}").as_bytes());
    format!("ev-{}", hex::encode(&digest[..4]))
}

/// Assemble an event from one container. The caller applies the validity
/// gate; this always produces something.
pub fn parse_container(container: ElementRef<'_>, base_url: &str) -> Event {
    let title = extract_title(container);
    let date = extract_event_date(container);
    let place = extract_place(container);
    let url = extract_url(container, base_url);
    let image = extract_image(container, base_url);

    let description = format!("Event: {title} at {place}");
    Event {
        id: event_id(&title, &date, &place),
        title,
        date,
        place,
        url,
        image,
        genre: "Unknown".to_string(),
        description,
        ..Default::default()
    }
}

// --- Title -----------------------------------------------------------------

pub fn extract_title(container: ElementRef<'_>) -> String {
    for selector_str in TITLE_SELECTORS {
        let selector = Selector::parse(selector_str).expect("invalid selector");
        for element in container.select(&selector) {
            let text = text_of(element);
            if is_valid_title(&text) {
                return text;
            }
        }
    }

    extract_title_from_text(container)
}

/// Reject bare dates, calendar tokens, navigation words, and lone genre
/// names posing as titles.
pub fn is_valid_title(text: &str) -> bool {
    let length = text.chars().count();
    if length < 2 || length > 200 {
        return false;
    }

    let skip_patterns = [
        r"^\d{4}[/-]\d{1,2}[/-]\d{1,2}",
        r"(?i)^(PREV|NEXT|WEEK|SUN|MON|TUE|WED|THU|FRI|SAT)",
        r"^\d{4}\s+\d{4}",
        r"^@\s*$",
        r"(?i)^(jan|feb|mar|apr|may|jun|jul|aug|sep|oct|nov|dec)",
        r"(?i)^(view|more|details?|info)$",
        r"(?i)^(house|techno|trance|disco)$",
        r"(?i)^\d{1,2}\.\d{1,2}(mon|tue|wed|thu|fri|sat|sun)?$",
    ];

    for pattern in skip_patterns {
        let re = Regex::new(pattern).expect("invalid regex");
        if re.is_match(text) {
            return false;
        }
    }

    // Calendar widgets leak their headers into otherwise plausible lines.
    let calendar = Regex::new(r"(?i)(PREV|NEXT|WEEK|SUN|MON|TUE|WED|THU|FRI|SAT)").expect("invalid regex");
    !calendar.is_match(text)
}

fn extract_title_from_text(container: ElementRef<'_>) -> String {
    let lines = lines_of(container);
    for line in lines.iter().take(10) {
        if is_valid_title(line) {
            return line.clone();
        }
    }

    // Sliding 2-4 word windows over the raw text.
    let text = lines.join(" ");
    let words: Vec<&str> = text.split_whitespace().collect();
    for start in 0..words.len() {
        for window in 2..=4usize {
            if start + window > words.len() {
                continue;
            }
            let candidate = words[start..start + window].join(" ");
            if candidate.chars().count() > 5 && is_valid_title(&candidate) {
                return candidate;
            }
        }
    }

    "Psychedelic Trance Event".to_string()
}

// --- Date ------------------------------------------------------------------

pub fn extract_event_date(container: ElementRef<'_>) -> String {
    let text = container.text().collect::<Vec<_>>().join(" ");
    if let Some(date) = date::extract_date(&text) {
        return date;
    }

    let time_selector = Selector::parse("time[datetime]").expect("invalid selector");
    if let Some(element) = container.select(&time_selector).next()
        && let Some(datetime) = element.value().attr("datetime")
        && let Some(date) = date::normalize(datetime)
    {
        return date;
    }

    date::future_date()
}

// --- Place -----------------------------------------------------------------

pub fn extract_place(container: ElementRef<'_>) -> String {
    for selector_str in VENUE_SELECTORS {
        let selector = Selector::parse(selector_str).expect("invalid selector");
        for element in container.select(&selector) {
            let text = text_of(element);
            if is_valid_venue(&text) {
                return clean_venue_name(&text);
            }
        }
    }

    extract_venue_from_text(container)
}

pub fn is_valid_venue(text: &str) -> bool {
    let length = text.chars().count();
    if length < 2 || length > 150 {
        return false;
    }

    // An "@" almost always introduces the venue.
    if text.contains('@') {
        return true;
    }

    let lowered = text.to_lowercase();
    KNOWN_VENUES
        .iter()
        .any(|venue| lowered.contains(&venue.to_lowercase()))
}

pub fn clean_venue_name(text: &str) -> String {
    if let Some((_, venue)) = text.split_once('@') {
        let venue = venue.trim();
        if !venue.is_empty() {
            return venue.to_string();
        }
    }

    let stripped = Regex::new(r"(?i)^(at|@)\s*")
        .expect("invalid regex")
        .replace(text, "");
    stripped.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn extract_venue_from_text(container: ElementRef<'_>) -> String {
    let text = lines_of(container).join("\n");

    let at_fragment = Regex::new(r"@\s*([^@\n]+)").expect("invalid regex");
    for caps in at_fragment.captures_iter(&text) {
        let venue = caps[1].trim();
        let length = venue.chars().count();
        if length > 2 && length < 50 {
            return venue.to_string();
        }
    }

    let lowered = text.to_lowercase();
    for venue in TOKYO_VENUES {
        if lowered.contains(&venue.to_lowercase()) {
            return if venue.contains("Tokyo") {
                venue.to_string()
            } else {
                format!("{venue}, Tokyo")
            };
        }
    }

    "Tokyo, Japan".to_string()
}

// --- URL -------------------------------------------------------------------

pub fn extract_url(container: ElementRef<'_>, base_url: &str) -> String {
    // The container itself may be the anchor.
    if container.value().name() == "a"
        && let Some(href) = container.value().attr("href")
    {
        return resolve(base_url, href);
    }

    // First qualifying direct child link; anchor-only hrefs are noise.
    for child in container.children().filter_map(ElementRef::wrap) {
        if child.value().name() == "a"
            && let Some(href) = child.value().attr("href")
            && !href.starts_with('#')
        {
            return resolve(base_url, href);
        }
    }

    // Any descendant link that looks like an event URL.
    let anchors = Selector::parse("a[href]").expect("invalid selector");
    for element in container.select(&anchors) {
        if let Some(href) = element.value().attr("href")
            && is_event_url(href)
        {
            return resolve(base_url, href);
        }
    }

    // An enclosing anchor, e.g. a whole card wrapped in <a>.
    for ancestor in container.ancestors().filter_map(ElementRef::wrap) {
        if ancestor.value().name() == "body" {
            break;
        }
        if ancestor.value().name() == "a"
            && let Some(href) = ancestor.value().attr("href")
            && is_event_url(href)
        {
            return resolve(base_url, href);
        }
    }

    resolve(base_url, "")
}

/// Whether an href points at an event page.
pub fn is_event_url(href: &str) -> bool {
    if href.is_empty() {
        return false;
    }

    let path_patterns = [r"(?i)/events/\d+", r"(?i)/events/[^/?]+", r"(?i)/event/", r"(?i)/party/"];
    for pattern in path_patterns {
        if Regex::new(pattern).expect("invalid regex").is_match(href) {
            return true;
        }
    }

    Regex::new(r"(?i)[?&](event|party|id)=\d+")
        .expect("invalid regex")
        .is_match(href)
}

// --- Image -----------------------------------------------------------------

pub fn extract_image(container: ElementRef<'_>, base_url: &str) -> String {
    for selector_str in IMAGE_SELECTORS {
        let selector = Selector::parse(selector_str).expect("invalid selector");
        if let Some(element) = container.select(&selector).next()
            && let Some(src) = element.value().attr("src")
        {
            return resolve(base_url, src);
        }
    }

    let img = Selector::parse("img").expect("invalid selector");
    if let Some(element) = container.select(&img).next() {
        for attr in LAZY_IMAGE_ATTRS {
            if let Some(src) = element.value().attr(attr) {
                return resolve(base_url, src);
            }
        }
    }

    placeholder_image()
}
