//! psyfind API server entry point.
//!
//! Boots the HTTP server, warms the event cache in the background, and
//! serves the REST surface. Logging goes to stderr as structured JSON.

use anyhow::Result;
use psyfind_core::AppConfig;
use psyfind_scraper::{EventService, Source};
use tracing_subscriber::EnvFilter;

mod routes;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .json()
        .init();

    let config = AppConfig::load()?;
    tracing::info!("psyfind api starting up");

    let service = EventService::new(config.clone())?;

    // Warm the cache; a failure here only costs a later inline scrape.
    // Goes through the refresh guard so /health sees the scrape and a
    // concurrent refresh request is dropped rather than doubled.
    service.spawn_refresh(Source::Clubberia);

    let app = routes::router(service, &config.allowed_origins);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    tracing::info!("server running on http://{}", config.bind_addr);
    axum::serve(listener, app).await?;

    Ok(())
}
