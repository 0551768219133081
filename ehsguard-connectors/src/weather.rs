//! Weather Snapshot, Errors and Configuration
//!
//! Provider-independent pieces of the weather lookup: the normalised
//! [`WeatherSnapshot`], the [`WeatherError`] taxonomy, [`WeatherConfig`], and
//! the pure functions that turn an OpenWeather payload into a snapshot. The
//! HTTP transport lives in [`http`](crate::http).
//!
//! ## Normalisation
//!
//! ```text
//! payload ── object? ── main block? ── temp/humidity/pressure? ── snapshot
//!               │            │                    │
//!        InvalidResponse  MissingMain       IncompleteData
//! ```
//!
//! Numeric fields are accepted as JSON numbers or numeric strings. When the
//! payload carries a `coord` block its lat/lon win over the request's.

use std::time::Duration;

use ehsguard_core::EnvironmentalReading;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::LocationQuery;

/// Environment variable holding the OpenWeather API key
pub const API_KEY_ENV: &str = "OPENWEATHER_API_KEY";

/// Current-weather endpoint
pub const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org/data/2.5/weather";

/// Per-request timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(6);

/// Retries after the first attempt
pub const DEFAULT_MAX_RETRIES: u32 = 2;

/// First retry delay; doubles per retry
pub const DEFAULT_BACKOFF: Duration = Duration::from_secs(1);

/// Weather lookup errors
#[derive(Debug, Clone, PartialEq, Error)]
pub enum WeatherError {
    /// No API key configured
    #[error("Missing API key: set OPENWEATHER_API_KEY")]
    MissingApiKey,

    /// City name is empty
    #[error("Invalid city: city name is empty")]
    InvalidCity,

    /// Coordinates are not finite or out of range
    #[error("Invalid coordinates: lat={lat}, lon={lon}")]
    InvalidCoords {
        /// Requested latitude
        lat: f64,
        /// Requested longitude
        lon: f64,
    },

    /// Provider unreachable after all retries
    #[error("Network error: {0}")]
    Network(String),

    /// Response body is not JSON
    #[error("Invalid JSON: {0}")]
    InvalidJson(String),

    /// Response is JSON but not an object
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Provider answered with a non-success status
    #[error("API error {status}: {message}")]
    Api {
        /// HTTP status
        status: u16,
        /// Provider's message, if any
        message: String,
    },

    /// Payload has no `main` block
    #[error("Response missing 'main' block")]
    MissingMain,

    /// Temperature, humidity or pressure absent or non-numeric
    #[error("Incomplete weather data: temp={temperature:?}, hum={humidity:?}, pres={pressure:?}")]
    IncompleteData {
        /// Parsed temperature
        temperature: Option<f64>,
        /// Parsed humidity
        humidity: Option<f64>,
        /// Parsed pressure
        pressure: Option<f64>,
    },

    /// Client misconfigured
    #[error("Configuration error: {0}")]
    Config(String),
}

impl WeatherError {
    /// Stable machine-readable code, e.g. for an API error payload
    pub fn code(&self) -> &'static str {
        match self {
            WeatherError::MissingApiKey => "missing_api_key",
            WeatherError::InvalidCity => "invalid_city",
            WeatherError::InvalidCoords { .. } => "invalid_coords",
            WeatherError::Network(_) => "network_error",
            WeatherError::InvalidJson(_) => "invalid_json",
            WeatherError::InvalidResponse(_) => "invalid_response",
            WeatherError::Api { .. } => "api_error",
            WeatherError::MissingMain => "missing_main",
            WeatherError::IncompleteData { .. } => "incomplete_weather_data",
            WeatherError::Config(_) => "config_error",
        }
    }
}

/// Normalised current conditions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    /// City as requested, or as named by the provider
    pub city: Option<String>,
    /// Air temperature (°C)
    pub temperature_c: f64,
    /// Relative humidity (%)
    pub humidity_pct: f64,
    /// Barometric pressure (hPa)
    pub pressure_hpa: f64,
    /// Latitude
    pub lat: Option<f64>,
    /// Longitude
    pub lon: Option<f64>,
}

impl WeatherSnapshot {
    /// Engine input carrying the weather fields; noise is left unknown
    pub fn to_reading(&self) -> EnvironmentalReading {
        EnvironmentalReading::new()
            .with_temperature(self.temperature_c)
            .with_humidity(self.humidity_pct)
            .with_pressure(self.pressure_hpa)
    }
}

/// Weather client configuration
#[derive(Clone)]
pub struct WeatherConfig {
    /// OpenWeather API key
    pub api_key: Option<String>,
    /// Endpoint URL
    pub base_url: String,
    /// Per-request timeout
    pub timeout: Duration,
    /// Retries on rate limiting or transport failure
    pub max_retries: u32,
    /// First retry delay
    pub backoff: Duration,
    /// User agent string
    pub user_agent: String,
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_BASE_URL.into(),
            timeout: DEFAULT_TIMEOUT,
            max_retries: DEFAULT_MAX_RETRIES,
            backoff: DEFAULT_BACKOFF,
            user_agent: format!("EHSGuard/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

// Keep the key out of logs
impl std::fmt::Debug for WeatherConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WeatherConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .field("max_retries", &self.max_retries)
            .field("backoff", &self.backoff)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

impl WeatherConfig {
    /// Configuration with an explicit API key
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::default().api_key(api_key)
    }

    /// Configuration with the key from `OPENWEATHER_API_KEY`, if set
    pub fn from_env() -> Self {
        Self {
            api_key: std::env::var(API_KEY_ENV).ok().filter(|key| !key.trim().is_empty()),
            ..Self::default()
        }
    }

    /// Set the API key
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Override the endpoint (e.g. a proxy or test server)
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set request timeout in seconds
    pub fn timeout_secs(mut self, secs: u64) -> Self {
        self.timeout = Duration::from_secs(secs);
        self
    }

    /// Set the number of retries
    pub fn max_retries(mut self, retries: u32) -> Self {
        self.max_retries = retries;
        self
    }

    /// Set the first retry delay
    pub fn backoff(mut self, delay: Duration) -> Self {
        self.backoff = delay;
        self
    }
}

/// Interpret a raw HTTP status and body from the current-weather endpoint
pub fn interpret_response(
    status: u16,
    body: &str,
    query: &LocationQuery,
) -> Result<WeatherSnapshot, WeatherError> {
    let data: Value =
        serde_json::from_str(body).map_err(|e| WeatherError::InvalidJson(e.to_string()))?;

    if status != 200 {
        let message = data
            .get("message")
            .and_then(Value::as_str)
            .unwrap_or("OpenWeather returned an error")
            .to_string();
        return Err(WeatherError::Api { status, message });
    }

    normalize(&data, query)
}

/// Normalise an OpenWeather current-weather payload
pub fn normalize(raw: &Value, query: &LocationQuery) -> Result<WeatherSnapshot, WeatherError> {
    let raw = raw
        .as_object()
        .ok_or_else(|| WeatherError::InvalidResponse("weather API returned a non-object".into()))?;

    let main = match raw.get("main").and_then(Value::as_object) {
        Some(main) if !main.is_empty() => main,
        _ => return Err(WeatherError::MissingMain),
    };

    let temperature = main.get("temp").and_then(coerce_f64);
    let humidity = main.get("humidity").and_then(coerce_f64);
    let pressure = main.get("pressure").and_then(coerce_f64);

    let (temperature_c, humidity_pct, pressure_hpa) = match (temperature, humidity, pressure) {
        (Some(t), Some(h), Some(p)) => (t, h, p),
        _ => {
            return Err(WeatherError::IncompleteData {
                temperature,
                humidity,
                pressure,
            })
        }
    };

    let (query_city, query_lat, query_lon) = match query {
        LocationQuery::City(name) => (Some(name.clone()), None, None),
        LocationQuery::Coordinates { lat, lon } => (None, Some(*lat), Some(*lon)),
    };

    let coord = raw.get("coord");
    let lat = coord.and_then(|c| c.get("lat")).and_then(coerce_f64).or(query_lat);
    let lon = coord.and_then(|c| c.get("lon")).and_then(coerce_f64).or(query_lon);

    let city = query_city.or_else(|| raw.get("name").and_then(Value::as_str).map(str::to_string));

    Ok(WeatherSnapshot {
        city,
        temperature_c,
        humidity_pct,
        pressure_hpa,
        lat,
        lon,
    })
}

/// Number or numeric string; anything else (including non-finite) is `None`
fn coerce_f64(value: &Value) -> Option<f64> {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    parsed.filter(|v| v.is_finite())
}
