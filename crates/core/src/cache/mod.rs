//! In-process TTL cache.
//!
//! A coarse-grained `Mutex<HashMap>` keyed by logical source. Expiry is
//! absolute (no sliding window): entries are checked lazily on read and
//! evicted by the read that discovers them, or by an explicit sweep.

mod events;

pub use events::{CacheInfo, EventCache, LAST_UPDATE_KEY};

use serde::Serialize;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

/// One cached value with its expiry bookkeeping.
#[derive(Debug, Clone)]
struct CacheEntry {
    value: Value,
    created_at: Instant,
    expires_at: Instant,
    last_accessed: Instant,
}

/// Aggregate cache statistics, as reported by `/cache/info`.
#[derive(Debug, Clone, Serialize)]
pub struct CacheStats {
    pub total_items: usize,
    pub valid_items: usize,
    pub expired_items: usize,
    pub cache_keys: Vec<String>,
}

/// TTL key/value cache over JSON values.
#[derive(Debug)]
pub struct TtlCache {
    entries: Mutex<HashMap<String, CacheEntry>>,
    default_ttl: Duration,
}

impl TtlCache {
    pub fn new(default_ttl: Duration) -> Self {
        Self { entries: Mutex::new(HashMap::new()), default_ttl }
    }

    /// Get a value, evicting it first if it has expired.
    ///
    /// Updates `last_accessed` on a hit; this does not extend the TTL.
    pub fn get(&self, key: &str) -> Option<Value> {
        let mut entries = self.entries.lock().expect("cache lock poisoned");
        let entry = entries.get_mut(key)?;

        if Instant::now() > entry.expires_at {
            entries.remove(key);
            return None;
        }

        entry.last_accessed = Instant::now();
        Some(entry.value.clone())
    }

    /// Get a value even if it has expired. Does not evict and does not
    /// touch `last_accessed`; used to serve stale data while a refresh
    /// runs in the background.
    pub fn peek(&self, key: &str) -> Option<Value> {
        let entries = self.entries.lock().expect("cache lock poisoned");
        entries.get(key).map(|entry| entry.value.clone())
    }

    /// Store a value with the given TTL (default TTL when `None`).
    pub fn set(&self, key: &str, value: Value, ttl: Option<Duration>) {
        let ttl = ttl.unwrap_or(self.default_ttl);
        let now = Instant::now();
        let entry = CacheEntry {
            value,
            created_at: now,
            expires_at: now + ttl,
            last_accessed: now,
        };
        self.entries
            .lock()
            .expect("cache lock poisoned")
            .insert(key.to_string(), entry);
    }

    /// Remove a key. Returns true if it was present.
    pub fn delete(&self, key: &str) -> bool {
        self.entries
            .lock()
            .expect("cache lock poisoned")
            .remove(key)
            .is_some()
    }

    pub fn clear(&self) {
        self.entries.lock().expect("cache lock poisoned").clear();
    }

    /// Sweep out expired entries. Returns the number removed.
    pub fn cleanup_expired(&self) -> usize {
        let now = Instant::now();
        let mut entries = self.entries.lock().expect("cache lock poisoned");
        let before = entries.len();
        entries.retain(|_, entry| now <= entry.expires_at);
        before - entries.len()
    }

    /// Whether a key holds a still-valid value. Does not evict.
    pub fn has_valid(&self, key: &str) -> bool {
        let entries = self.entries.lock().expect("cache lock poisoned");
        entries
            .get(key)
            .is_some_and(|entry| Instant::now() <= entry.expires_at)
    }

    pub fn stats(&self) -> CacheStats {
        let entries = self.entries.lock().expect("cache lock poisoned");
        let now = Instant::now();
        let total_items = entries.len();
        let expired_items = entries.values().filter(|e| now > e.expires_at).count();
        let mut cache_keys: Vec<String> = entries.keys().cloned().collect();
        cache_keys.sort();

        CacheStats {
            total_items,
            valid_items: total_items - expired_items,
            expired_items,
            cache_keys,
        }
    }

    /// Seconds since the entry was created, if present.
    pub fn age_seconds(&self, key: &str) -> Option<f64> {
        let entries = self.entries.lock().expect("cache lock poisoned");
        entries
            .get(key)
            .map(|entry| entry.created_at.elapsed().as_secs_f64())
    }
}
