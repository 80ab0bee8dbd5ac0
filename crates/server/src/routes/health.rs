//! Health check endpoint.

use axum::extract::State;
use axum::Json;
use chrono::Utc;
use psyfind_scraper::{EventService, Source};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub timestamp: String,
    pub cache_valid: bool,
    pub events_cached: usize,
    pub scraping_active: bool,
}

/// `GET /health`: process liveness plus cache and scrape status.
pub async fn health_check(State(service): State<EventService>) -> Json<HealthResponse> {
    let key = Source::Clubberia.as_str();
    let events_cached = service
        .cache()
        .get_events_stale(key)
        .map(|events| events.len())
        .unwrap_or(0);

    Json(HealthResponse {
        status: "healthy",
        timestamp: Utc::now().to_rfc3339(),
        cache_valid: service.cache().is_valid(key),
        events_cached,
        scraping_active: service.is_refreshing(),
    })
}
