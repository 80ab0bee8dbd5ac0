//! Songkick API client.
//!
//! Thin client for the Songkick events endpoint, used to discover
//! festivals by free-text query or by city. Responses are normalized
//! into domain events; anything the API leaves out gets a conservative
//! default rather than an error.
//!
//! ### Specification
//!
//! - **Endpoint**: `https://api.songkick.com/api/3.0/events.json`
//! - **Authentication**: `apikey` query parameter.
//! - **Search window**: today through one year out.

use chrono::{Duration as ChronoDuration, Local};
use psyfind_core::{AppConfig, Error, Event};
use serde::Deserialize;
use std::time::Duration;

use crate::extract::{date, placeholder_image};

/// Default base URL for the Songkick API.
const DEFAULT_BASE_URL: &str = "https://api.songkick.com/api/3.0";

/// Public demo key, overridable via configuration.
const DEMO_API_KEY: &str = "8xcJZgxFb88DJR8Q";

/// Request timeout.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);

const USER_AGENT: &str = "PsyFinder/1.0 (Music Festival Aggregator)";

/// Songkick client configuration.
#[derive(Debug, Clone)]
pub struct SongkickConfig {
    /// API key (`apikey` query parameter).
    pub api_key: String,
    /// Base URL (default: https://api.songkick.com/api/3.0).
    pub base_url: String,
    /// Request timeout (default: 15s).
    pub timeout: Duration,
}

impl Default for SongkickConfig {
    fn default() -> Self {
        Self {
            api_key: DEMO_API_KEY.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl SongkickConfig {
    pub fn from_app_config(config: &AppConfig) -> Self {
        Self {
            api_key: config
                .songkick_api_key
                .clone()
                .unwrap_or_else(|| DEMO_API_KEY.to_string()),
            ..Default::default()
        }
    }
}

/// Raw events envelope from the Songkick API.
#[derive(Debug, Deserialize)]
pub struct EventsResponse {
    #[serde(rename = "resultsPage")]
    pub results_page: ResultsPage,
}

#[derive(Debug, Deserialize)]
pub struct ResultsPage {
    #[serde(default)]
    pub results: Results,
}

#[derive(Debug, Default, Deserialize)]
pub struct Results {
    #[serde(default)]
    pub event: Vec<ApiEvent>,
}

/// Individual event as returned by the API.
#[derive(Debug, Deserialize)]
pub struct ApiEvent {
    pub id: u64,
    #[serde(rename = "displayName")]
    pub display_name: String,
    #[serde(default)]
    pub start: Option<StartDate>,
    #[serde(default)]
    pub venue: Option<Venue>,
    #[serde(default)]
    pub performance: Vec<Performance>,
    #[serde(default)]
    pub uri: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct StartDate {
    #[serde(default)]
    pub date: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Venue {
    #[serde(rename = "displayName", default)]
    pub display_name: Option<String>,
    #[serde(rename = "metroArea", default)]
    pub metro_area: Option<MetroArea>,
    #[serde(default)]
    pub capacity: Option<u64>,
}

#[derive(Debug, Deserialize)]
pub struct MetroArea {
    #[serde(rename = "displayName", default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub country: Option<Country>,
}

#[derive(Debug, Deserialize)]
pub struct Country {
    #[serde(rename = "displayName", default)]
    pub display_name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Performance {}

impl ApiEvent {
    /// Normalize into a domain event. Missing fields default instead of
    /// failing: an unknown venue is still a listable festival.
    pub fn into_event(self) -> Event {
        let venue = self.venue;
        let venue_name = venue
            .as_ref()
            .and_then(|v| v.display_name.clone())
            .unwrap_or_else(|| "Unknown Venue".to_string());
        let metro = venue.as_ref().and_then(|v| v.metro_area.as_ref());
        let city = metro
            .and_then(|m| m.display_name.clone())
            .unwrap_or_else(|| "Unknown City".to_string());
        let country = metro
            .and_then(|m| m.country.as_ref())
            .and_then(|c| c.display_name.clone())
            .unwrap_or_else(|| "Unknown Country".to_string());
        let capacity = venue.as_ref().and_then(|v| v.capacity);
        let artist_count = self.performance.len() as u64;

        let raw_date = self.start.and_then(|s| s.date).unwrap_or_default();
        let event_date = date::normalize(&raw_date).unwrap_or_else(date::future_date);

        Event {
            id: format!("songkick-{}", self.id),
            title: self.display_name,
            date: event_date,
            place: format!("{venue_name}, {city}, {country}"),
            url: self
                .uri
                .unwrap_or_else(|| format!("https://www.songkick.com/festivals/{}", self.id)),
            image: placeholder_image(),
            genre: "Electronic Festival".to_string(),
            description: format!(
                "Major music festival featuring {artist_count} artists in {city}, {country}"
            ),
            capacity,
            artist_count: Some(artist_count),
            city: Some(city),
            country: Some(country),
        }
    }
}

/// Songkick API client.
#[derive(Debug, Clone)]
pub struct SongkickClient {
    http: reqwest::Client,
    config: SongkickConfig,
}

impl SongkickClient {
    pub fn new(config: SongkickConfig) -> Result<Self, Error> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(USER_AGENT)
            .use_rustls_tls()
            .build()
            .map_err(|e| Error::HttpError(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self { http, config })
    }

    fn date_window() -> (String, String) {
        let today = Local::now().date_naive();
        let horizon = today + ChronoDuration::days(365);
        (
            today.format("%Y-%m-%d").to_string(),
            horizon.format("%Y-%m-%d").to_string(),
        )
    }

    async fn events(&self, extra: &[(&str, String)], per_page: u32) -> Result<Vec<ApiEvent>, Error> {
        let (min_date, max_date) = Self::date_window();
        let url = format!("{}/events.json", self.config.base_url);

        let mut query: Vec<(&str, String)> = vec![
            ("apikey", self.config.api_key.clone()),
            ("type", "Festival".to_string()),
            ("min_date", min_date),
            ("max_date", max_date),
            ("per_page", per_page.to_string()),
        ];
        query.extend(extra.iter().cloned());

        let response = self
            .http
            .get(&url)
            .query(&query)
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    Error::FetchTimeout(e.to_string())
                } else {
                    Error::HttpError(format!("network error: {}", e))
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::HttpError(format!("status {}", status.as_u16())));
        }

        let body: EventsResponse = response
            .json()
            .await
            .map_err(|e| Error::ParseFailed(format!("invalid JSON response: {}", e)))?;

        Ok(body.results_page.results.event)
    }

    /// Search festivals by free-text query.
    pub async fn events_by_query(&self, query: &str) -> Result<Vec<ApiEvent>, Error> {
        tracing::debug!("searching songkick: query={}", query);
        self.events(&[("query", query.to_string())], 50).await
    }

    /// Search festivals around a city.
    pub async fn events_by_city(&self, city: &str) -> Result<Vec<ApiEvent>, Error> {
        tracing::debug!("searching songkick: city={}", city);
        self.events(&[("location", format!("geo:{city}"))], 20).await
    }
}
