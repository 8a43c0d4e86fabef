//! OpenWeatherMap current-weather API client
//!
//! Fetches current conditions by city name or coordinates and normalizes the
//! raw provider units into [`CurrentConditions`]: whole-degree temperatures,
//! km/h wind, km visibility.

use chrono::Utc;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use thiserror::Error;

use crate::config::{Config, ConfigError};

use super::geocoding::{GeocodingClient, GeocodingError};
use super::{CurrentConditions, Location, WeatherSnapshot};

/// Base URL for weather condition icon assets
const ICON_BASE_URL: &str = "https://openweathermap.org/img/wn";

/// Visibility in km reported when the provider omits the field
const DEFAULT_VISIBILITY_KM: i32 = 10;

/// Errors that can occur when fetching current conditions
#[derive(Debug, Error)]
pub enum WeatherError {
    /// The API key is missing; surfaced before any request is sent
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Geocoding produced zero matches for the requested city
    #[error("City not found")]
    NotFound(String),

    /// HTTP request failed
    #[error("Failed to fetch weather data: {0}")]
    RequestFailed(#[from] reqwest::Error),

    /// The provider answered with a non-success status
    #[error("Failed to fetch weather data: status {0}")]
    BadStatus(StatusCode),

    /// Failed to parse the JSON response
    #[error("Failed to parse weather response: {0}")]
    Parse(#[from] serde_json::Error),

    /// The weather-condition list in the response was empty
    #[error("Weather response contained no conditions")]
    MissingConditions,
}

impl From<GeocodingError> for WeatherError {
    fn from(err: GeocodingError) -> Self {
        match err {
            GeocodingError::Config(e) => WeatherError::Config(e),
            GeocodingError::NotFound(query) => WeatherError::NotFound(query),
            GeocodingError::RequestFailed(e) => WeatherError::RequestFailed(e),
            GeocodingError::BadStatus(status) => WeatherError::BadStatus(status),
            GeocodingError::Parse(e) => WeatherError::Parse(e),
        }
    }
}

/// Client for the OpenWeatherMap current-weather endpoint
#[derive(Debug, Clone)]
pub struct WeatherClient {
    http: Client,
    config: Config,
    geocoding: GeocodingClient,
}

impl WeatherClient {
    /// Creates a new client; the embedded geocoding client shares the same
    /// HTTP connection pool.
    pub fn new(config: Config) -> Self {
        let http = Client::new();
        let geocoding = GeocodingClient::with_client(http.clone(), config.clone());
        Self {
            http,
            config,
            geocoding,
        }
    }

    /// Fetches current conditions for a free-text city name.
    ///
    /// Resolves the city through geocoding first, then fetches by the
    /// resolved coordinates so the snapshot carries the canonical
    /// name/country pair.
    ///
    /// # Returns
    /// * `Ok(WeatherSnapshot)` - Normalized conditions for the best match
    /// * `Err(WeatherError::NotFound)` - Geocoding had zero matches
    /// * `Err(_)` - Missing API key or a transport/parse failure
    pub async fn fetch_by_city(&self, city: &str) -> Result<WeatherSnapshot, WeatherError> {
        self.config.api_key()?;

        let location = self.geocoding.resolve(city).await?;
        let raw = self.fetch_raw(location.lat, location.lon).await?;
        build_snapshot(raw, location)
    }

    /// Fetches current conditions for explicit coordinates, skipping
    /// geocoding. The location identity comes from the weather payload
    /// itself. Used for the geolocation-based initial load and for refresh.
    pub async fn fetch_by_coords(
        &self,
        lat: f64,
        lon: f64,
    ) -> Result<WeatherSnapshot, WeatherError> {
        let raw = self.fetch_raw(lat, lon).await?;
        let location = Location {
            name: raw.name.clone(),
            country: raw.sys.country.clone().unwrap_or_default(),
            lat,
            lon,
        };
        build_snapshot(raw, location)
    }

    async fn fetch_raw(&self, lat: f64, lon: f64) -> Result<OwCurrentResponse, WeatherError> {
        let api_key = self.config.api_key()?;
        let url = format!("{}/weather", self.config.weather_base_url);
        let lat = lat.to_string();
        let lon = lon.to_string();

        let response = self
            .http
            .get(&url)
            .query(&[
                ("lat", lat.as_str()),
                ("lon", lon.as_str()),
                ("appid", api_key),
                ("units", "metric"),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(WeatherError::BadStatus(status));
        }

        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }
}

/// Returns the URL of the 2x PNG asset for a provider icon code
pub fn icon_url(icon: &str) -> String {
    format!("{ICON_BASE_URL}/{icon}@2x.png")
}

fn build_snapshot(
    raw: OwCurrentResponse,
    location: Location,
) -> Result<WeatherSnapshot, WeatherError> {
    Ok(WeatherSnapshot {
        location,
        current: normalize(&raw)?,
        fetched_at: Utc::now(),
    })
}

/// Normalizes raw provider units into display units.
///
/// Temperatures round to whole degrees, wind speed converts from m/s to
/// km/h, visibility converts from meters to km (10 km when omitted), and
/// humidity/pressure/direction pass through unmodified. An empty condition
/// list is a malformed response.
fn normalize(raw: &OwCurrentResponse) -> Result<CurrentConditions, WeatherError> {
    let condition = raw.weather.first().ok_or(WeatherError::MissingConditions)?;

    Ok(CurrentConditions {
        temperature: raw.main.temp.round() as i32,
        feels_like: raw.main.feels_like.round() as i32,
        condition: condition.main.clone(),
        description: condition.description.clone(),
        icon: condition.icon.clone(),
        humidity: raw.main.humidity,
        wind_speed: (raw.wind.speed * 3.6).round() as i32,
        wind_direction: raw.wind.deg,
        pressure: raw.main.pressure,
        visibility: raw
            .visibility
            .map(|meters| (meters / 1000.0).round() as i32)
            .unwrap_or(DEFAULT_VISIBILITY_KM),
    })
}

/// Current-weather response, reduced to the fields the app uses
#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    name: String,
    sys: OwSys,
    main: OwMain,
    weather: Vec<OwCondition>,
    wind: OwWind,
    visibility: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct OwSys {
    country: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: f64,
    feels_like: f64,
    humidity: u8,
    pressure: u32,
}

#[derive(Debug, Deserialize)]
struct OwCondition {
    main: String,
    description: String,
    icon: String,
}

#[derive(Debug, Deserialize)]
struct OwWind {
    speed: f64,
    #[serde(default)]
    deg: u16,
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Sample current-weather response for London
    const VALID_RESPONSE: &str = r#"{
        "coord": {"lon": -0.1276, "lat": 51.5073},
        "weather": [
            {"id": 802, "main": "Clouds", "description": "scattered clouds", "icon": "03d"}
        ],
        "base": "stations",
        "main": {
            "temp": 18.46,
            "feels_like": 17.93,
            "temp_min": 17.2,
            "temp_max": 19.5,
            "pressure": 1012,
            "humidity": 72
        },
        "visibility": 10000,
        "wind": {"speed": 4.12, "deg": 202},
        "clouds": {"all": 40},
        "dt": 1726480800,
        "sys": {"country": "GB", "sunrise": 1726462511, "sunset": 1726508327},
        "timezone": 3600,
        "id": 2643743,
        "name": "London",
        "cod": 200
    }"#;

    fn parse_fixture(body: &str) -> OwCurrentResponse {
        serde_json::from_str(body).expect("Failed to parse fixture")
    }

    #[test]
    fn test_normalize_valid_response() {
        let raw = parse_fixture(VALID_RESPONSE);
        let current = normalize(&raw).expect("Failed to normalize");

        assert_eq!(current.temperature, 18);
        assert_eq!(current.feels_like, 18);
        assert_eq!(current.condition, "Clouds");
        assert_eq!(current.description, "scattered clouds");
        assert_eq!(current.icon, "03d");
        assert_eq!(current.humidity, 72);
        // 4.12 m/s * 3.6 = 14.832 km/h
        assert_eq!(current.wind_speed, 15);
        assert_eq!(current.wind_direction, 202);
        assert_eq!(current.pressure, 1012);
        assert_eq!(current.visibility, 10);
    }

    #[test]
    fn test_wind_speed_converts_ms_to_kmh() {
        let cases = [
            (0.0, 0),
            (1.0, 4),   // 3.6
            (2.57, 9),  // 9.252
            (5.5, 20),  // 19.8
            (10.0, 36), // 36.0
        ];

        for (ms, expected_kmh) in cases {
            let body = VALID_RESPONSE.replace("\"speed\": 4.12", &format!("\"speed\": {ms}"));
            let raw = parse_fixture(&body);
            let current = normalize(&raw).unwrap();
            assert_eq!(
                current.wind_speed, expected_kmh,
                "wind {ms} m/s should round to {expected_kmh} km/h"
            );
        }
    }

    #[test]
    fn test_visibility_converts_meters_to_km() {
        let cases = [(10000.0, 10), (9500.0, 10), (1234.0, 1), (500.0, 1), (400.0, 0)];

        for (meters, expected_km) in cases {
            let body =
                VALID_RESPONSE.replace("\"visibility\": 10000", &format!("\"visibility\": {meters}"));
            let raw = parse_fixture(&body);
            let current = normalize(&raw).unwrap();
            assert_eq!(
                current.visibility, expected_km,
                "visibility {meters} m should round to {expected_km} km"
            );
        }
    }

    #[test]
    fn test_missing_visibility_defaults_to_ten_km() {
        let body = VALID_RESPONSE.replace("\"visibility\": 10000,", "");
        let raw = parse_fixture(&body);
        let current = normalize(&raw).unwrap();

        assert_eq!(current.visibility, 10);
    }

    #[test]
    fn test_empty_condition_list_is_malformed() {
        let body = VALID_RESPONSE.replace(
            r#"[
            {"id": 802, "main": "Clouds", "description": "scattered clouds", "icon": "03d"}
        ]"#,
            "[]",
        );
        let raw = parse_fixture(&body);
        let result = normalize(&raw);

        assert!(matches!(result, Err(WeatherError::MissingConditions)));
    }

    #[test]
    fn test_missing_wind_direction_defaults_to_zero() {
        let body = VALID_RESPONSE.replace(r#""wind": {"speed": 4.12, "deg": 202}"#, r#""wind": {"speed": 4.12}"#);
        let raw = parse_fixture(&body);
        let current = normalize(&raw).unwrap();

        assert_eq!(current.wind_direction, 0);
    }

    #[test]
    fn test_build_snapshot_attaches_location() {
        let raw = parse_fixture(VALID_RESPONSE);
        let location = Location {
            name: "London".to_string(),
            country: "GB".to_string(),
            lat: 51.5073,
            lon: -0.1276,
        };

        let snapshot = build_snapshot(raw, location.clone()).expect("Failed to build snapshot");

        assert_eq!(snapshot.location, location);
        assert_eq!(snapshot.current.temperature, 18);
    }

    #[test]
    fn test_icon_url() {
        assert_eq!(
            icon_url("03d"),
            "https://openweathermap.org/img/wn/03d@2x.png"
        );
    }

    #[test]
    fn test_geocoding_errors_map_into_weather_taxonomy() {
        let not_found = WeatherError::from(GeocodingError::NotFound("Qwxyzstan123".to_string()));
        assert!(matches!(not_found, WeatherError::NotFound(ref q) if q == "Qwxyzstan123"));

        let config = WeatherError::from(GeocodingError::Config(ConfigError::MissingApiKey));
        assert!(matches!(
            config,
            WeatherError::Config(ConfigError::MissingApiKey)
        ));
    }

    #[tokio::test]
    async fn test_fetch_by_coords_without_key_is_a_config_error() {
        // The key check precedes any request building, so this must fail
        // without a network attempt.
        let client = WeatherClient::new(Config::unconfigured());

        let result = client.fetch_by_coords(51.5073, -0.1276).await;
        assert!(matches!(
            result,
            Err(WeatherError::Config(ConfigError::MissingApiKey))
        ));
    }

    #[tokio::test]
    async fn test_fetch_by_city_without_key_is_a_config_error() {
        let client = WeatherClient::new(Config::unconfigured());

        let result = client.fetch_by_city("London").await;
        assert!(matches!(
            result,
            Err(WeatherError::Config(ConfigError::MissingApiKey))
        ));
    }
}
