//! Event listing and refresh endpoints.

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use psyfind_core::Event;
use psyfind_scraper::{classify, EventService};
use serde::{Deserialize, Serialize};

use super::parse_source;

fn default_source() -> String {
    "clubberia".to_string()
}

fn default_genre() -> String {
    "psy".to_string()
}

#[derive(Debug, Deserialize)]
pub struct EventsQuery {
    #[serde(default)]
    pub force_refresh: bool,
    #[serde(default = "default_source")]
    pub source: String,
    #[serde(default = "default_genre")]
    pub genre: String,
}

#[derive(Debug, Serialize)]
pub struct EventsResponse {
    pub success: bool,
    pub events: Vec<Event>,
    pub total: usize,
    pub source: &'static str,
    pub genre_filter: String,
    pub timestamp: String,
}

#[derive(Debug, Serialize)]
pub struct RefreshResponse {
    pub success: bool,
    pub message: String,
    pub source: &'static str,
    pub timestamp: String,
}

/// `GET /events` with optional `source`, `genre`, and `force_refresh`.
///
/// `genre=psy` applies the strict relevance filter; anything else returns
/// the source's results untouched.
pub async fn get_events(
    State(service): State<EventService>,
    Query(query): Query<EventsQuery>,
) -> Result<Json<EventsResponse>, (StatusCode, String)> {
    let source = parse_source(&query.source)?;

    let mut events = service.get_events(source, query.force_refresh).await;
    if query.genre == "psy" {
        let before = events.len();
        events = classify::filter_events(&events);
        tracing::debug!("filtered {} events to {} psy events", before, events.len());
    }

    Ok(Json(EventsResponse {
        success: true,
        total: events.len(),
        events,
        source: source.as_str(),
        genre_filter: query.genre,
        timestamp: Utc::now().to_rfc3339(),
    }))
}

#[derive(Debug, Deserialize)]
pub struct RefreshQuery {
    #[serde(default = "default_source")]
    pub source: String,
}

/// `POST /events/refresh`: start a background re-scrape and return
/// immediately. A refresh already in flight is not duplicated.
pub async fn refresh_events(
    State(service): State<EventService>,
    Query(query): Query<RefreshQuery>,
) -> Result<Json<RefreshResponse>, (StatusCode, String)> {
    let source = parse_source(&query.source)?;
    service.spawn_refresh(source);

    Ok(Json(RefreshResponse {
        success: true,
        message: "Cache refresh started in background".to_string(),
        source: source.as_str(),
        timestamp: Utc::now().to_rfc3339(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_source_rejects_unknown() {
        let err = parse_source("myspace").unwrap_err();
        assert_eq!(err.0, StatusCode::BAD_REQUEST);
        assert!(err.1.contains("myspace"));
    }

    #[test]
    fn test_query_defaults() {
        let query: EventsQuery = serde_json::from_str("{}").unwrap();
        assert_eq!(query.source, "clubberia");
        assert_eq!(query.genre, "psy");
        assert!(!query.force_refresh);
    }

    #[test]
    fn test_response_shape() {
        let response = EventsResponse {
            success: true,
            events: vec![],
            total: 0,
            source: "clubberia",
            genre_filter: "psy".to_string(),
            timestamp: Utc::now().to_rfc3339(),
        };
        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(value["success"], true);
        assert_eq!(value["total"], 0);
        assert_eq!(value["source"], "clubberia");
        assert!(value["events"].as_array().unwrap().is_empty());
    }
}
