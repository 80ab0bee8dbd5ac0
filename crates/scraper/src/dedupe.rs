//! Result-set shaping: dedup, future filter, date ordering.

use std::collections::HashSet;

use psyfind_core::Event;

use crate::extract::date;

/// Drop events that repeat an already-seen `(title, date)` pair,
/// keeping the first occurrence. Order is otherwise preserved.
pub fn dedupe(events: Vec<Event>) -> Vec<Event> {
    let mut seen: HashSet<(String, String)> = HashSet::new();
    let before = events.len();
    let kept: Vec<Event> = events
        .into_iter()
        .filter(|event| seen.insert(event.identity()))
        .collect();
    if kept.len() < before {
        tracing::debug!("deduplicated {} -> {} events", before, kept.len());
    }
    kept
}

/// Keep events dated today or later. Unparseable dates are kept:
/// a bad parse should never hide a real upcoming event.
pub fn keep_future(events: Vec<Event>) -> Vec<Event> {
    let today = chrono::Local::now().date_naive();
    events
        .into_iter()
        .filter(|event| match date::parse_canonical(&event.date) {
            Some(parsed) => parsed >= today,
            None => true,
        })
        .collect()
}

/// Sort ascending by event date; unparseable dates sink to the end.
pub fn sort_by_date(events: &mut [Event]) {
    events.sort_by_key(|event| date::sort_key(&event.date));
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Local};

    fn make_event(title: &str, date: &str) -> Event {
        Event {
            title: title.to_string(),
            date: date.to_string(),
            place: "Tokyo".to_string(),
            ..Default::default()
        }
    }

    fn days_from_now(days: i64) -> String {
        (Local::now().date_naive() + Duration::days(days))
            .format("%Y/%m/%d")
            .to_string()
    }

    #[test]
    fn test_dedupe_keeps_first_occurrence() {
        let events = vec![
            make_event("Vitamin", "2026/09/01"),
            make_event("Vitamin", "2026/09/01"),
            make_event("Vitamin", "2026/09/02"),
        ];
        let deduped = dedupe(events);
        assert_eq!(deduped.len(), 2);
        assert_eq!(deduped[0].date, "2026/09/01");
        assert_eq!(deduped[1].date, "2026/09/02");
    }

    #[test]
    fn test_dedupe_is_idempotent() {
        let events = vec![
            make_event("A", "2026/09/01"),
            make_event("B", "2026/09/01"),
            make_event("A", "2026/09/01"),
        ];
        let once = dedupe(events);
        let twice = dedupe(once.clone());
        assert_eq!(once.len(), twice.len());
    }

    #[test]
    fn test_keep_future_drops_past_keeps_unparseable() {
        let events = vec![
            make_event("Past", "2020/01/01"),
            make_event("Future", &days_from_now(30)),
            make_event("Today", &days_from_now(0)),
            make_event("Mystery", "coming soon"),
        ];
        let kept = keep_future(events);
        let titles: Vec<&str> = kept.iter().map(|e| e.title.as_str()).collect();
        assert_eq!(titles, vec!["Future", "Today", "Mystery"]);
    }

    #[test]
    fn test_sort_unparseable_last() {
        let mut events = vec![
            make_event("Mystery", "tba"),
            make_event("Late", &days_from_now(60)),
            make_event("Soon", &days_from_now(7)),
        ];
        sort_by_date(&mut events);
        assert_eq!(events[0].title, "Soon");
        assert_eq!(events[1].title, "Late");
        assert_eq!(events[2].title, "Mystery");
    }
}
