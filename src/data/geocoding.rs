//! OpenWeatherMap geocoding API client
//!
//! Resolves free-text city names to coordinates and a canonical name/country
//! pair, and serves the best-effort suggestion lookups behind the search box.

use reqwest::{Client, StatusCode};
use serde::Deserialize;
use thiserror::Error;

use crate::config::{Config, ConfigError};

use super::{Location, SearchSuggestion};

/// Minimum query length before the geocoding endpoint is consulted
pub const MIN_QUERY_LEN: usize = 2;

/// Maximum number of autocomplete suggestions requested
pub const MAX_SUGGESTIONS: usize = 5;

/// Errors that can occur when resolving a city name
#[derive(Debug, Error)]
pub enum GeocodingError {
    /// The API key is missing; surfaced before any request is sent
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The provider returned zero matches for the query
    #[error("City not found")]
    NotFound(String),

    /// HTTP request failed
    #[error("Failed to find city: {0}")]
    RequestFailed(#[from] reqwest::Error),

    /// The provider answered with a non-success status
    #[error("Failed to find city: geocoding returned status {0}")]
    BadStatus(StatusCode),

    /// Failed to parse the JSON response
    #[error("Failed to parse geocoding response: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Client for the OpenWeatherMap geocoding endpoint
#[derive(Debug, Clone)]
pub struct GeocodingClient {
    http: Client,
    config: Config,
}

impl GeocodingClient {
    /// Creates a new client with its own HTTP connection pool
    pub fn new(config: Config) -> Self {
        Self {
            http: Client::new(),
            config,
        }
    }

    /// Creates a client reusing an existing HTTP connection pool
    pub fn with_client(http: Client, config: Config) -> Self {
        Self { http, config }
    }

    /// Resolves a free-text city name to its best geocoding match.
    ///
    /// # Arguments
    /// * `query` - City name as typed by the user
    ///
    /// # Returns
    /// * `Ok(Location)` - The first (best) match
    /// * `Err(GeocodingError::NotFound)` - The provider returned zero matches
    /// * `Err(_)` - Missing API key or a transport/parse failure
    pub async fn resolve(&self, query: &str) -> Result<Location, GeocodingError> {
        let matches = self.lookup(query, 1).await?;
        first_match(query, matches)
    }

    /// Fetches up to [`MAX_SUGGESTIONS`] autocomplete matches.
    ///
    /// Never fails: suggestions are a non-critical affordance, so a missing
    /// API key, a short query, or any transport problem yields an empty list.
    pub async fn suggest(&self, query: &str) -> Vec<SearchSuggestion> {
        self.try_suggest(query).await.unwrap_or_default()
    }

    /// Fallible variant of [`GeocodingClient::suggest`], kept separate so the
    /// swallowed failure stays observable in tests.
    pub async fn try_suggest(&self, query: &str) -> Result<Vec<SearchSuggestion>, GeocodingError> {
        if query.chars().count() < MIN_QUERY_LEN {
            return Ok(Vec::new());
        }
        self.lookup(query, MAX_SUGGESTIONS).await
    }

    async fn lookup(
        &self,
        query: &str,
        limit: usize,
    ) -> Result<Vec<SearchSuggestion>, GeocodingError> {
        let api_key = self.config.api_key()?;
        let url = format!("{}/direct", self.config.geo_base_url);
        let limit = limit.to_string();

        let response = self
            .http
            .get(&url)
            .query(&[("q", query), ("limit", limit.as_str()), ("appid", api_key)])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(GeocodingError::BadStatus(status));
        }

        let body = response.text().await?;
        parse_matches(&body)
    }
}

/// Picks the first match, or reports the query as not found
fn first_match(
    query: &str,
    matches: Vec<SearchSuggestion>,
) -> Result<Location, GeocodingError> {
    matches
        .into_iter()
        .next()
        .map(Location::from)
        .ok_or_else(|| GeocodingError::NotFound(query.to_string()))
}

/// Parses a `direct` geocoding response body into suggestions
fn parse_matches(body: &str) -> Result<Vec<SearchSuggestion>, GeocodingError> {
    let entries: Vec<GeoEntry> = serde_json::from_str(body)?;

    Ok(entries
        .into_iter()
        .map(|entry| SearchSuggestion {
            name: entry.name,
            country: entry.country,
            lat: entry.lat,
            lon: entry.lon,
        })
        .collect())
}

/// One entry of the geocoding `direct` response
///
/// The payload carries more (`local_names`, `state`); only the fields the app
/// uses are modeled.
#[derive(Debug, Deserialize)]
struct GeoEntry {
    name: String,
    country: String,
    lat: f64,
    lon: f64,
}
