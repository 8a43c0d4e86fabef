//! Core data models for Skycast
//!
//! This module contains the data types used throughout the application for
//! representing resolved locations, normalized current conditions, and
//! autocomplete suggestions, along with the API clients that produce them.

pub mod geocoding;
pub mod geolocate;
pub mod weather;

pub use geocoding::{GeocodingClient, GeocodingError};
pub use geolocate::{GeoPosition, GeolocateClient};
pub use weather::{WeatherClient, WeatherError};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Resolved identity of a place
///
/// Produced by geocoding (or taken from the weather payload for coordinate
/// lookups) and immutable once attached to a snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    /// Canonical place name, e.g. "London"
    pub name: String,
    /// ISO country code, e.g. "GB"
    pub country: String,
    /// Latitude coordinate
    pub lat: f64,
    /// Longitude coordinate
    pub lon: f64,
}

/// Point-in-time weather conditions, normalized from raw provider units
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentConditions {
    /// Temperature in whole degrees Celsius
    pub temperature: i32,
    /// Feels-like temperature in whole degrees Celsius
    pub feels_like: i32,
    /// Short condition label, e.g. "Clouds"
    pub condition: String,
    /// Longer condition description, e.g. "scattered clouds"
    pub description: String,
    /// Provider icon code, e.g. "03d"
    pub icon: String,
    /// Relative humidity percentage (0-100)
    pub humidity: u8,
    /// Wind speed in whole km/h
    pub wind_speed: i32,
    /// Wind direction in degrees
    pub wind_direction: u16,
    /// Atmospheric pressure in hPa
    pub pressure: u32,
    /// Visibility in whole km
    pub visibility: i32,
}

/// One normalized weather reading for a resolved location
///
/// The unit the display surface consumes. Recreated on every query; there is
/// no time series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    /// Where this reading was taken
    pub location: Location,
    /// The conditions at fetch time
    pub current: CurrentConditions,
    /// When this data was fetched
    pub fetched_at: DateTime<Utc>,
}

/// A single autocomplete match from the geocoding endpoint
///
/// Ephemeral; discarded once a selection is made.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchSuggestion {
    /// Place name, e.g. "London"
    pub name: String,
    /// ISO country code, e.g. "GB"
    pub country: String,
    /// Latitude coordinate
    pub lat: f64,
    /// Longitude coordinate
    pub lon: f64,
}

impl SearchSuggestion {
    /// Label shown in the suggestion panel, e.g. "London, GB"
    pub fn label(&self) -> String {
        format!("{}, {}", self.name, self.country)
    }
}

impl From<SearchSuggestion> for Location {
    fn from(suggestion: SearchSuggestion) -> Self {
        Location {
            name: suggestion.name,
            country: suggestion.country,
            lat: suggestion.lat,
            lon: suggestion.lon,
        }
    }
}
