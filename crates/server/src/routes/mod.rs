//! REST surface for the psyfind API.

pub mod cache;
pub mod events;
pub mod health;

use axum::http::{HeaderValue, Method, StatusCode};
use axum::routing::{delete, get, post};
use axum::{Json, Router};
use psyfind_scraper::{EventService, Source};
use serde_json::{json, Value};
use tower_http::cors::{Any, CorsLayer};

/// Resolve a `source` query parameter or reject with 400.
pub(crate) fn parse_source(name: &str) -> Result<Source, (StatusCode, String)> {
    Source::parse(name).ok_or_else(|| {
        (
            StatusCode::BAD_REQUEST,
            format!("unknown source '{name}', expected clubberia, psytrance, or major"),
        )
    })
}

/// Build the application router with CORS applied.
pub fn router(service: EventService, allowed_origins: &[String]) -> Router {
    let cors = cors_layer(allowed_origins);

    Router::new()
        .route("/", get(root))
        .route("/events", get(events::get_events))
        .route("/events/refresh", post(events::refresh_events))
        .route("/cache/info", get(cache::cache_info))
        .route("/cache", delete(cache::clear_cache))
        .route("/health", get(health::health_check))
        .layer(cors)
        .with_state(service)
}

fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::DELETE])
        .allow_headers(Any);

    if allowed_origins.iter().any(|origin| origin == "*") {
        return cors.allow_origin(Any);
    }

    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();
    cors.allow_origin(origins)
}

/// API index: name, version, and the routes a client can call.
async fn root() -> Json<Value> {
    Json(json!({
        "message": "psyfind API",
        "version": env!("CARGO_PKG_VERSION"),
        "description": "Psytrance events from Tokyo, Japan",
        "endpoints": {
            "/events": "Get psytrance events",
            "/events?source=clubberia": "Get Clubberia events",
            "/events?source=major": "Get major festivals",
            "/events/refresh": "Force refresh events cache",
            "/cache/info": "Get cache information",
            "/health": "Health check",
        },
    }))
}
