//! Application configuration
//!
//! Holds the OpenWeatherMap credential and the provider base URLs. The config
//! is built once at startup and handed to the API clients, so tests can
//! inject fake credentials without touching the process environment.

use std::env;

use thiserror::Error;

/// Environment variable holding the OpenWeatherMap API key
pub const API_KEY_ENV: &str = "OPENWEATHER_API_KEY";

/// Default base URL for the current-weather endpoint
pub const DEFAULT_WEATHER_BASE_URL: &str = "https://api.openweathermap.org/data/2.5";

/// Default base URL for the geocoding endpoint
pub const DEFAULT_GEO_BASE_URL: &str = "https://api.openweathermap.org/geo/1.0";

/// Errors related to application configuration
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// No API key was present in the environment at startup
    #[error("OpenWeatherMap API key is not configured")]
    MissingApiKey,
}

/// Configuration shared by the API clients
///
/// An absent key is allowed at construction time; clients surface
/// [`ConfigError::MissingApiKey`] when a fetch is attempted, before any
/// request is built.
#[derive(Debug, Clone)]
pub struct Config {
    api_key: Option<String>,
    /// Base URL for the current-weather endpoint
    pub weather_base_url: String,
    /// Base URL for the geocoding endpoint
    pub geo_base_url: String,
}

impl Config {
    /// Reads configuration from the process environment.
    pub fn from_env() -> Self {
        match env::var(API_KEY_ENV) {
            Ok(key) => Self::new(key),
            Err(_) => Self::unconfigured(),
        }
    }

    /// Creates a configuration with the given API key.
    ///
    /// An empty or whitespace-only key counts as unconfigured, matching how
    /// an unset environment variable behaves.
    pub fn new(api_key: impl Into<String>) -> Self {
        let api_key = api_key.into();
        Self {
            api_key: (!api_key.trim().is_empty()).then_some(api_key),
            weather_base_url: DEFAULT_WEATHER_BASE_URL.to_string(),
            geo_base_url: DEFAULT_GEO_BASE_URL.to_string(),
        }
    }

    /// Creates a configuration with no API key
    pub fn unconfigured() -> Self {
        Self {
            api_key: None,
            weather_base_url: DEFAULT_WEATHER_BASE_URL.to_string(),
            geo_base_url: DEFAULT_GEO_BASE_URL.to_string(),
        }
    }

    /// Returns the API key, or the error every provider call must surface
    /// before touching the network.
    pub fn api_key(&self) -> Result<&str, ConfigError> {
        self.api_key.as_deref().ok_or(ConfigError::MissingApiKey)
    }

    /// Whether an API key is present
    #[allow(dead_code)]
    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }
}
