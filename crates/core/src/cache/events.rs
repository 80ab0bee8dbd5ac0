//! Event-list cache namespace over [`TtlCache`].
//!
//! Each logical source owns an independent `"<source>_events"` key with an
//! independently configurable TTL. A shared `"last_update"` key records the
//! most recent successful write.

use super::{CacheStats, TtlCache};
use crate::event::Event;
use serde::Serialize;
use std::time::Duration;

pub const LAST_UPDATE_KEY: &str = "last_update";

/// Cache metadata surfaced by `GET /cache/info`.
#[derive(Debug, Clone, Serialize)]
pub struct CacheInfo {
    pub is_valid: bool,
    pub last_update: Option<String>,
    pub cache_age_seconds: Option<f64>,
    pub cache_stats: CacheStats,
}

/// Per-source event cache.
#[derive(Debug)]
pub struct EventCache {
    cache: TtlCache,
}

impl EventCache {
    pub fn new(default_ttl: Duration) -> Self {
        Self { cache: TtlCache::new(default_ttl) }
    }

    fn events_key(source: &str) -> String {
        format!("{source}_events")
    }

    /// Cached events for a source, or `None` on a miss.
    pub fn get_events(&self, source: &str) -> Option<Vec<Event>> {
        let value = self.cache.get(&Self::events_key(source))?;
        serde_json::from_value(value).ok()
    }

    /// Cached events for a source, expired entries included. Backs the
    /// serve-stale-while-refreshing path.
    pub fn get_events_stale(&self, source: &str) -> Option<Vec<Event>> {
        let value = self.cache.peek(&Self::events_key(source))?;
        serde_json::from_value(value).ok()
    }

    /// Store an event list and stamp `last_update`.
    pub fn set_events(&self, source: &str, events: &[Event], ttl: Option<Duration>) {
        let value = serde_json::to_value(events).unwrap_or_default();
        self.cache.set(&Self::events_key(source), value, ttl);
        self.cache.set(
            LAST_UPDATE_KEY,
            serde_json::Value::String(chrono::Utc::now().to_rfc3339()),
            ttl,
        );
    }

    pub fn last_update(&self) -> Option<String> {
        match self.cache.get(LAST_UPDATE_KEY)? {
            serde_json::Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Drop a source's events along with the update stamp.
    pub fn clear_events(&self, source: &str) {
        self.cache.delete(&Self::events_key(source));
        self.cache.delete(LAST_UPDATE_KEY);
    }

    /// Whether the source holds a still-valid event list.
    pub fn is_valid(&self, source: &str) -> bool {
        self.cache.has_valid(&Self::events_key(source))
    }

    pub fn cleanup_expired(&self) -> usize {
        self.cache.cleanup_expired()
    }

    pub fn info(&self, source: &str) -> CacheInfo {
        CacheInfo {
            is_valid: self.is_valid(source),
            last_update: self.last_update(),
            cache_age_seconds: self.cache.age_seconds(&Self::events_key(source)),
            cache_stats: self.cache.stats(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_events(n: usize) -> Vec<Event> {
        (0..n)
            .map(|i| Event {
                id: format!("ev-{i}"),
                title: format!("Trance Gathering {i}"),
                date: "2026/09/01".to_string(),
                place: "WOMB, Shibuya".to_string(),
                ..Default::default()
            })
            .collect()
    }

    #[test]
    fn test_round_trip() {
        let cache = EventCache::new(Duration::from_secs(60));
        let events = make_events(3);
        cache.set_events("clubberia", &events, None);

        let cached = cache.get_events("clubberia").unwrap();
        assert_eq!(cached, events);
        assert!(cache.is_valid("clubberia"));
        assert!(cache.last_update().is_some());
    }

    #[test]
    fn test_sources_are_independent() {
        let cache = EventCache::new(Duration::from_secs(60));
        cache.set_events("clubberia", &make_events(2), None);

        assert!(cache.get_events("psytrance").is_none());
        assert!(!cache.is_valid("psytrance"));
    }

    #[test]
    fn test_clear_removes_events_and_stamp() {
        let cache = EventCache::new(Duration::from_secs(60));
        cache.set_events("clubberia", &make_events(1), None);
        cache.clear_events("clubberia");

        assert!(cache.get_events("clubberia").is_none());
        assert!(cache.last_update().is_none());
    }

    #[test]
    fn test_info_reports_age_and_stats() {
        let cache = EventCache::new(Duration::from_secs(60));
        cache.set_events("clubberia", &make_events(1), None);

        let info = cache.info("clubberia");
        assert!(info.is_valid);
        assert!(info.cache_age_seconds.is_some());
        assert_eq!(info.cache_stats.total_items, 2); // events + last_update
        assert!(info
            .cache_stats
            .cache_keys
            .contains(&"clubberia_events".to_string()));
    }

    #[test]
    fn test_expired_source_reads_as_miss() {
        let cache = EventCache::new(Duration::from_secs(60));
        cache.set_events("clubberia", &make_events(1), Some(Duration::from_millis(10)));
        std::thread::sleep(Duration::from_millis(40));

        assert!(!cache.is_valid("clubberia"));
        assert!(cache.get_events_stale("clubberia").is_some());
        assert!(cache.get_events("clubberia").is_none());
    }
}
