//! External Collaborators for the EHSGuard Engine
//!
//! ## Overview
//!
//! The calculation engine in `ehsguard-core` is pure: it takes numbers and
//! returns a report. Everything that talks to the outside world lives here:
//!
//! - **Weather**: current temperature, humidity and pressure for a city or a
//!   coordinate pair, fetched from OpenWeather over HTTP
//! - **Area risk**: whether recent hazard or SOS reports exist near the
//!   location, answered by whatever persistence layer the application has
//! - **Metrics service**: runs both lookups concurrently, feeds the engine
//!   and bundles the result
//!
//! ## Failure Model
//!
//! The weather provider is the only component with "hard" failures
//! (network, timeout, rate limit, malformed payload). The metrics service
//! never propagates them: a failed lookup is logged and the assessment is
//! produced with every weather-derived field empty. Noise and
//! personalization still work.
//!
//! ```text
//! request ──┬── WeatherProvider::current ──┐
//!           └── AreaRiskSource::area_at_risk ┴── join ── assess ── Assessment
//! ```
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use ehsguard_connectors::{
//!     http::OpenWeatherClient, weather::WeatherConfig, LocationQuery, MetricsRequest,
//!     MetricsService, NoAreaRisk,
//! };
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = OpenWeatherClient::new(WeatherConfig::from_env())?;
//! let service = MetricsService::new(client, NoAreaRisk);
//!
//! let request = MetricsRequest::new(LocationQuery::city("Pune")).with_noise(88.0, 120.0);
//! let assessment = service.assess(&request).await;
//! println!("{}", serde_json::to_string_pretty(&assessment)?);
//! # Ok(())
//! # }
//! ```

#[cfg(feature = "http")]
pub mod http;

pub mod service;
pub mod weather;

// Re-export common types
pub use service::{Assessment, MetricsRequest, MetricsService};
pub use weather::{WeatherConfig, WeatherError, WeatherSnapshot};

#[cfg(feature = "http")]
pub use http::OpenWeatherClient;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// City used when a request names neither a city nor coordinates
pub const DEFAULT_CITY: &str = "Pune";

/// Where to look up conditions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LocationQuery {
    /// City name, e.g. "Pune"
    City(String),
    /// Latitude/longitude in decimal degrees
    Coordinates {
        /// Latitude
        lat: f64,
        /// Longitude
        lon: f64,
    },
}

impl LocationQuery {
    /// Query by city name
    pub fn city(name: impl Into<String>) -> Self {
        LocationQuery::City(name.into())
    }

    /// Query by coordinates
    pub fn coordinates(lat: f64, lon: f64) -> Self {
        LocationQuery::Coordinates { lat, lon }
    }

    /// Pick a query from loose request parameters
    ///
    /// Coordinates win when both are present and finite; otherwise the city
    /// is used, falling back to [`DEFAULT_CITY`].
    pub fn from_params(city: Option<&str>, lat: Option<f64>, lon: Option<f64>) -> Self {
        match (lat, lon) {
            (Some(lat), Some(lon)) if lat.is_finite() && lon.is_finite() => {
                Self::coordinates(lat, lon)
            }
            _ => Self::city(city.unwrap_or(DEFAULT_CITY)),
        }
    }
}

/// Source of current weather conditions
#[async_trait]
pub trait WeatherProvider: Send + Sync {
    /// Current conditions at a location
    async fn current(&self, location: &LocationQuery) -> Result<WeatherSnapshot, WeatherError>;
}

/// Source of the auxiliary "area at risk" flag (recent hazard/SOS reports)
#[async_trait]
pub trait AreaRiskSource: Send + Sync {
    /// Whether the location currently has open hazard or SOS reports
    async fn area_at_risk(&self, location: &LocationQuery) -> bool;
}

/// Area-risk source for deployments without hazard reporting
#[derive(Debug, Default, Clone, Copy)]
pub struct NoAreaRisk;

#[async_trait]
impl AreaRiskSource for NoAreaRisk {
    async fn area_at_risk(&self, _location: &LocationQuery) -> bool {
        false
    }
}
