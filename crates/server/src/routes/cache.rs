//! Cache inspection and invalidation endpoints.

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use psyfind_core::CacheInfo;
use psyfind_scraper::EventService;
use serde::{Deserialize, Serialize};

use super::parse_source;

fn default_source() -> String {
    "clubberia".to_string()
}

#[derive(Debug, Deserialize)]
pub struct CacheQuery {
    #[serde(default = "default_source")]
    pub source: String,
}

#[derive(Debug, Serialize)]
pub struct CacheInfoResponse {
    pub success: bool,
    pub cache_info: CacheInfo,
    pub timestamp: String,
}

#[derive(Debug, Serialize)]
pub struct CacheClearResponse {
    pub success: bool,
    pub message: String,
    pub source: &'static str,
    pub timestamp: String,
}

/// `GET /cache/info`: validity, last update, age, and key statistics.
pub async fn cache_info(
    State(service): State<EventService>,
    Query(query): Query<CacheQuery>,
) -> Result<Json<CacheInfoResponse>, (StatusCode, String)> {
    let source = parse_source(&query.source)?;

    Ok(Json(CacheInfoResponse {
        success: true,
        cache_info: service.cache_info(source),
        timestamp: Utc::now().to_rfc3339(),
    }))
}

/// `DELETE /cache`: drop a source's cached events.
pub async fn clear_cache(
    State(service): State<EventService>,
    Query(query): Query<CacheQuery>,
) -> Result<Json<CacheClearResponse>, (StatusCode, String)> {
    let source = parse_source(&query.source)?;
    let cleared = service.clear_cache(source);
    tracing::info!("cache cleared for {}", cleared);

    Ok(Json(CacheClearResponse {
        success: true,
        message: "Cache cleared successfully".to_string(),
        source: cleared,
        timestamp: Utc::now().to_rfc3339(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cache_query_default_source() {
        let query: CacheQuery = serde_json::from_str("{}").unwrap();
        assert_eq!(query.source, "clubberia");
    }

    #[test]
    fn test_parse_source_accepts_aliases() {
        assert!(parse_source("festivals").is_ok());
        assert!(parse_source("nope").is_err());
    }
}
