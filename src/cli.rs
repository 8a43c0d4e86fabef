//! Command-line interface parsing for Skycast
//!
//! This module handles parsing of CLI arguments using clap: an optional
//! positional city that skips geolocation on startup, and a flag to disable
//! IP geolocation entirely.

use clap::Parser;
use thiserror::Error;

/// Error types for CLI argument validation
#[derive(Debug, Error)]
pub enum CliError {
    /// A city argument was given but contains no usable text
    #[error("City name must not be empty")]
    EmptyCity,
}

/// Skycast - current weather conditions for cities worldwide
#[derive(Parser, Debug)]
#[command(name = "skycast")]
#[command(about = "Look up current weather conditions for cities worldwide")]
#[command(version)]
pub struct Cli {
    /// City to look up on startup instead of geolocating
    ///
    /// Examples:
    ///   skycast              # Geolocate, falling back to London
    ///   skycast Tokyo        # Start with Tokyo
    #[arg(value_name = "CITY")]
    pub city: Option<String>,

    /// Skip IP geolocation and start with the fallback city
    #[arg(long)]
    pub no_geolocate: bool,
}

/// Configuration derived from CLI arguments for application startup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StartupConfig {
    /// City to look up immediately; set when one was given on the command
    /// line (geolocation is skipped in that case)
    pub initial_city: Option<String>,
    /// Whether to attempt IP geolocation for the initial load
    pub geolocate: bool,
}

impl Default for StartupConfig {
    fn default() -> Self {
        Self {
            initial_city: None,
            geolocate: true,
        }
    }
}

impl StartupConfig {
    /// Creates a StartupConfig from parsed CLI arguments.
    ///
    /// # Returns
    /// * `Ok(StartupConfig)` with appropriate settings
    /// * `Err(CliError::EmptyCity)` if the city argument is blank
    pub fn from_cli(cli: &Cli) -> Result<Self, CliError> {
        match &cli.city {
            Some(raw) => {
                let city = raw.trim();
                if city.is_empty() {
                    return Err(CliError::EmptyCity);
                }
                Ok(Self {
                    initial_city: Some(city.to_string()),
                    geolocate: false,
                })
            }
            None => Ok(Self {
                initial_city: None,
                geolocate: !cli.no_geolocate,
            }),
        }
    }
}
