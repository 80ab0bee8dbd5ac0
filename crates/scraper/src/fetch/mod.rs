//! HTTP fetch client for listing and detail pages.
//!
//! One `reqwest::Client` per scraper, with browser-like headers and a fixed
//! per-request timeout. Detail-page fetches use a shorter timeout so a slow
//! event page cannot stall a whole pagination run.

pub mod url;

pub use url::resolve;

use psyfind_core::Error;
use reqwest::Client;
use std::time::Duration;

/// Configuration for the fetch client.
#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// User agent string.
    pub user_agent: String,

    /// Accept-Language header value.
    pub accept_language: String,

    /// Timeout for listing-page requests (default: 15s).
    pub timeout: Duration,

    /// Timeout for detail-page requests (default: 10s).
    pub detail_timeout: Duration,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            user_agent: "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 \
                         (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36"
                .to_string(),
            accept_language: "ja,en-US;q=0.9,en;q=0.8".to_string(),
            timeout: Duration::from_millis(15_000),
            detail_timeout: Duration::from_millis(10_000),
        }
    }
}

/// HTTP client wrapper used by every source pipeline.
pub struct FetchClient {
    http: Client,
    config: FetchConfig,
}

impl FetchClient {
    /// Create a new fetch client with the given configuration.
    pub fn new(config: FetchConfig) -> Result<Self, Error> {
        let http = Client::builder()
            .user_agent(&config.user_agent)
            .timeout(config.timeout)
            .use_rustls_tls()
            .gzip(true)
            .brotli(true)
            .deflate(true)
            .build()
            .map_err(|e| Error::HttpError(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self { http, config })
    }

    /// Fetch a page and return its body text. Non-2xx is an error.
    pub async fn html(&self, url: &str) -> Result<String, Error> {
        self.get_text(url, self.config.timeout).await
    }

    /// Fetch a detail page under the shorter detail timeout.
    pub async fn detail_html(&self, url: &str) -> Result<String, Error> {
        self.get_text(url, self.config.detail_timeout).await
    }

    async fn get_text(&self, url: &str, timeout: Duration) -> Result<String, Error> {
        let response = self
            .http
            .get(url)
            .timeout(timeout)
            .header(
                "Accept",
                "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,*/*;q=0.8",
            )
            .header("Accept-Language", &self.config.accept_language)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::HttpError(format!("status {}", status.as_u16())));
        }

        let body = response.text().await.map_err(map_reqwest_error)?;

        tracing::debug!("fetched {} ({} bytes)", url, body.len());

        Ok(body)
    }

    pub fn config(&self) -> &FetchConfig {
        &self.config
    }
}

fn map_reqwest_error(e: reqwest::Error) -> Error {
    if e.is_timeout() {
        Error::FetchTimeout(e.to_string())
    } else {
        Error::HttpError(format!("network error: {}", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_config_default() {
        let config = FetchConfig::default();
        assert!(config.user_agent.contains("Mozilla"));
        assert_eq!(config.timeout, Duration::from_millis(15_000));
        assert_eq!(config.detail_timeout, Duration::from_millis(10_000));
        assert!(config.accept_language.starts_with("ja"));
    }

    #[tokio::test]
    async fn test_fetch_client_new() {
        let client = FetchClient::new(FetchConfig::default());
        assert!(client.is_ok());
    }
}
