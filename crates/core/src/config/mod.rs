//! Application configuration with layered loading.
//!
//! Loading precedence (highest wins):
//! 1. Environment variables (PSYFIND_*)
//! 2. TOML config file (if PSYFIND_CONFIG_FILE set)
//! 3. Built-in defaults

use std::time::Duration;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};

mod validation;

pub use validation::ConfigError;

/// Application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// User-Agent string sent with scrape requests.
    ///
    /// Set via PSYFIND_USER_AGENT.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Timeout for listing-page requests, in milliseconds.
    ///
    /// Set via PSYFIND_TIMEOUT_MS.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Shorter timeout for per-event detail-page requests, in milliseconds.
    ///
    /// Set via PSYFIND_DETAIL_TIMEOUT_MS.
    #[serde(default = "default_detail_timeout_ms")]
    pub detail_timeout_ms: u64,

    /// Maximum result pages walked per source.
    ///
    /// Set via PSYFIND_MAX_PAGES.
    #[serde(default = "default_max_pages")]
    pub max_pages: usize,

    /// Accumulated-event ceiling that stops pagination early.
    ///
    /// Set via PSYFIND_MAX_EVENTS.
    #[serde(default = "default_max_events")]
    pub max_events: usize,

    /// Default cache TTL in seconds.
    ///
    /// Set via PSYFIND_DEFAULT_TTL_SECS.
    #[serde(default = "default_ttl_secs")]
    pub default_ttl_secs: u64,

    /// Cache TTL for the Clubberia source, in seconds.
    ///
    /// Set via PSYFIND_CLUBBERIA_TTL_SECS.
    #[serde(default = "default_clubberia_ttl_secs")]
    pub clubberia_ttl_secs: u64,

    /// Address the REST server binds to.
    ///
    /// Set via PSYFIND_BIND_ADDR.
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,

    /// Songkick-compatible API key for the festivals source.
    ///
    /// Set via PSYFIND_SONGKICK_API_KEY.
    #[serde(default)]
    pub songkick_api_key: Option<String>,

    /// CORS origins allowed by the REST layer (comma-separated in env).
    ///
    /// Set via PSYFIND_ALLOWED_ORIGINS.
    #[serde(default = "default_allowed_origins")]
    pub allowed_origins: Vec<String>,
}

fn default_user_agent() -> String {
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 \
     (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36"
        .into()
}

fn default_timeout_ms() -> u64 {
    15_000
}

fn default_detail_timeout_ms() -> u64 {
    10_000
}

fn default_max_pages() -> usize {
    5
}

fn default_max_events() -> usize {
    50
}

fn default_ttl_secs() -> u64 {
    3600
}

fn default_clubberia_ttl_secs() -> u64 {
    21_600
}

fn default_bind_addr() -> String {
    "0.0.0.0:8000".into()
}

fn default_allowed_origins() -> Vec<String> {
    vec![
        "http://localhost:8006".into(),
        "http://localhost:5173".into(),
    ]
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            user_agent: default_user_agent(),
            timeout_ms: default_timeout_ms(),
            detail_timeout_ms: default_detail_timeout_ms(),
            max_pages: default_max_pages(),
            max_events: default_max_events(),
            default_ttl_secs: default_ttl_secs(),
            clubberia_ttl_secs: default_clubberia_ttl_secs(),
            bind_addr: default_bind_addr(),
            songkick_api_key: None,
            allowed_origins: default_allowed_origins(),
        }
    }
}

impl AppConfig {
    /// Listing-page timeout as a Duration.
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Detail-page timeout as a Duration.
    pub fn detail_timeout(&self) -> Duration {
        Duration::from_millis(self.detail_timeout_ms)
    }

    pub fn default_ttl(&self) -> Duration {
        Duration::from_secs(self.default_ttl_secs)
    }

    /// Per-source cache TTL. Clubberia scrapes are expensive (a detail
    /// fetch per candidate event), so it keeps results six times longer.
    pub fn ttl_for(&self, source: &str) -> Duration {
        if source == "clubberia" {
            Duration::from_secs(self.clubberia_ttl_secs)
        } else {
            self.default_ttl()
        }
    }

    /// Load configuration from all sources with layered precedence.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the file cannot be read, values fail to
    /// parse, or validation rejects the merged result.
    pub fn load() -> Result<Self, ConfigError> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Ok(config_path) = std::env::var("PSYFIND_CONFIG_FILE") {
            figment = figment.merge(Toml::file(&config_path));
        }

        figment = figment.merge(
            Env::prefixed("PSYFIND_")
                .map(|key| key.as_str().to_lowercase().into())
                .split("__"),
        );

        let config: Self = figment.extract().map_err(|e| ConfigError::LoadFailed(e.to_string()))?;

        config.validate()?;

        Ok(config)
    }

    /// Deferred check for the festivals API key.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Missing` if the key is not set.
    pub fn require_songkick_api_key(&self) -> Result<&str, ConfigError> {
        self.songkick_api_key.as_deref().ok_or_else(|| ConfigError::Missing {
            field: "songkick_api_key".into(),
            hint: "Set PSYFIND_SONGKICK_API_KEY environment variable".into(),
        })
    }
}
