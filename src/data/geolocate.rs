//! IP-based geolocation
//!
//! The terminal analog of the browser geolocation prompt: asks ipapi.co for
//! the coordinates behind the current public IP. Strictly best-effort; any
//! failure means the caller falls back to the default city.

use reqwest::Client;
use serde::Deserialize;

/// Endpoint returning a JSON document describing the caller's IP
const IPAPI_URL: &str = "https://ipapi.co/json/";

/// Coordinates resolved from the caller's IP address
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoPosition {
    pub lat: f64,
    pub lon: f64,
}

/// ipapi.co response; every field is optional because the service answers
/// with partial documents for unresolvable addresses
#[derive(Debug, Deserialize)]
struct IpApiResponse {
    latitude: Option<f64>,
    longitude: Option<f64>,
}

/// Client for best-effort IP geolocation
#[derive(Debug, Clone, Default)]
pub struct GeolocateClient {
    http: Client,
}

impl GeolocateClient {
    pub fn new() -> Self {
        Self {
            http: Client::new(),
        }
    }

    /// Returns the coordinates behind the current public IP, or `None` when
    /// the lookup fails in any way.
    pub async fn locate(&self) -> Option<GeoPosition> {
        let response = self.http.get(IPAPI_URL).send().await.ok()?;
        if !response.status().is_success() {
            return None;
        }

        let body = response.text().await.ok()?;
        position_from(&body)
    }
}

/// Extracts a position from a response body; partial documents yield `None`
fn position_from(body: &str) -> Option<GeoPosition> {
    let parsed: IpApiResponse = serde_json::from_str(body).ok()?;
    Some(GeoPosition {
        lat: parsed.latitude?,
        lon: parsed.longitude?,
    })
}
