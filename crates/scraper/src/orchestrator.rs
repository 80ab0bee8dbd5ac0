//! Cache-aside orchestration over the event sources.
//!
//! The service answers every request from cache when it can. A valid
//! entry is returned as-is; an expired entry is returned immediately
//! while a single background refresh re-scrapes the source; a true miss
//! scrapes inline. Sources never fail outright, so neither does this.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use psyfind_core::{AppConfig, CacheInfo, Error, Event, EventCache};

use crate::fetch::{FetchClient, FetchConfig};
use crate::sources::{self, Source};

/// Shared event service: one per process, cloned per task.
#[derive(Clone)]
pub struct EventService {
    cache: Arc<EventCache>,
    client: Arc<FetchClient>,
    config: Arc<AppConfig>,
    refreshing: Arc<AtomicBool>,
}

impl EventService {
    pub fn new(config: AppConfig) -> Result<Self, Error> {
        let fetch_config = FetchConfig {
            user_agent: config.user_agent.clone(),
            timeout: config.timeout(),
            detail_timeout: config.detail_timeout(),
            ..FetchConfig::default()
        };
        let client = FetchClient::new(fetch_config)?;
        let cache = EventCache::new(config.default_ttl());

        Ok(Self {
            cache: Arc::new(cache),
            client: Arc::new(client),
            config: Arc::new(config),
            refreshing: Arc::new(AtomicBool::new(false)),
        })
    }

    pub fn cache(&self) -> &EventCache {
        &self.cache
    }

    /// Whether a background refresh is currently running.
    pub fn is_refreshing(&self) -> bool {
        self.refreshing.load(Ordering::SeqCst)
    }

    /// Events for a source, cache-aside.
    ///
    /// `force` bypasses the cache and scrapes inline. Otherwise a valid
    /// cache entry wins; a stale one is served as-is while a background
    /// refresh runs; a miss scrapes inline.
    pub async fn get_events(&self, source: Source, force: bool) -> Vec<Event> {
        let key = source.as_str();

        if !force {
            if self.cache.is_valid(key) {
                if let Some(events) = self.cache.get_events(key) {
                    tracing::debug!("serving {} cached events for {}", events.len(), key);
                    return events;
                }
            }

            if let Some(stale) = self.cache.get_events_stale(key) {
                tracing::info!("serving {} stale events for {}, refreshing", stale.len(), key);
                self.spawn_refresh(source);
                return stale;
            }
        }

        self.refresh(source).await
    }

    /// Scrape a source now and cache the result.
    pub async fn refresh(&self, source: Source) -> Vec<Event> {
        let events = sources::scrape(source, &self.client, &self.config).await;
        if events.is_empty() {
            tracing::warn!("refresh of {} produced no events, cache left untouched", source);
            return events;
        }

        let ttl = self.config.ttl_for(source.as_str());
        self.cache.set_events(source.as_str(), &events, Some(ttl));
        tracing::info!("cached {} events for {}", events.len(), source);
        events
    }

    /// Claim the refresh slot. Returns false if a refresh is running.
    fn try_begin_refresh(&self) -> bool {
        self.refreshing
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_ok()
    }

    fn end_refresh(&self) {
        self.refreshing.store(false, Ordering::SeqCst);
    }

    /// Kick off a background refresh unless one is already running.
    /// Concurrent triggers are dropped, not queued.
    pub fn spawn_refresh(&self, source: Source) {
        if !self.try_begin_refresh() {
            tracing::debug!("refresh already in progress, skipping");
            return;
        }

        let service = self.clone();
        tokio::spawn(async move {
            let _ = service.refresh(source).await;
            service.end_refresh();
        });
    }

    pub fn cache_info(&self, source: Source) -> CacheInfo {
        self.cache.info(source.as_str())
    }

    /// Drop a source's cached events. Returns the cleared source name.
    pub fn clear_cache(&self, source: Source) -> &'static str {
        self.cache.clear_events(source.as_str());
        source.as_str()
    }
}
