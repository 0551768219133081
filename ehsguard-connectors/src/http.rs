//! OpenWeather HTTP Client
//!
//! ## Overview
//!
//! Fetches current conditions from the OpenWeather current-weather endpoint
//! (`units=metric`) with the lightweight blocking `ureq` client. Each attempt
//! runs on `tokio::task::spawn_blocking` so the async caller is never
//! stalled by socket I/O.
//!
//! ## Retries
//!
//! ```text
//! attempt   outcome               action
//! -------------------------------------------------------------
//! 1..n      429                   sleep(backoff), backoff *= 2
//! 1..n      transport error       sleep(backoff), backoff *= 2
//! last      429                   ApiError { status: 429 }
//! last      transport error       Network
//! any       other status          returned as-is
//! ```
//!
//! With the defaults (2 retries, 1 s backoff) a persistently rate-limited
//! lookup takes 3 attempts and about 3 s of sleeping.
//!
//! ## Security
//!
//! The API key is sent as the `appid` query parameter. It is never logged
//! and is redacted from `Debug` output of [`WeatherConfig`].
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use ehsguard_connectors::{
//!     http::OpenWeatherClient, weather::WeatherConfig, LocationQuery, WeatherProvider,
//! };
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = OpenWeatherClient::new(WeatherConfig::new("your-api-key").timeout_secs(4))?;
//! let snapshot = client.current(&LocationQuery::coordinates(18.52, 73.85)).await?;
//! println!("{:.1} °C at {:.0} hPa", snapshot.temperature_c, snapshot.pressure_hpa);
//! # Ok(())
//! # }
//! ```

use async_trait::async_trait;
use log::{info, warn};

use crate::{
    weather::{self, WeatherConfig, WeatherError, WeatherSnapshot},
    LocationQuery, WeatherProvider,
};

/// Result of a single request attempt
enum Attempt {
    /// Server answered (any status)
    Response { status: u16, body: String },
    /// Connection, DNS, TLS or timeout failure
    Transport(String),
}

/// OpenWeather client using the ureq agent
pub struct OpenWeatherClient {
    config: WeatherConfig,
    agent: ureq::Agent,
}

impl OpenWeatherClient {
    /// Create a new client
    ///
    /// The API key is checked per lookup, not here, so a client can be
    /// built before the key is provisioned.
    pub fn new(config: WeatherConfig) -> Result<Self, WeatherError> {
        if !config.base_url.starts_with("http://") && !config.base_url.starts_with("https://") {
            return Err(WeatherError::Config("Base URL must start with http:// or https://".into()));
        }

        let agent = ureq::AgentBuilder::new()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .build();

        Ok(Self { config, agent })
    }

    /// Configuration in use
    pub fn config(&self) -> &WeatherConfig {
        &self.config
    }

    /// Validate a query and turn it into request parameters (without the key)
    fn query_params(location: &LocationQuery) -> Result<Vec<(&'static str, String)>, WeatherError> {
        let mut params = match location {
            LocationQuery::City(name) => {
                let name = name.trim();
                if name.is_empty() {
                    return Err(WeatherError::InvalidCity);
                }
                vec![("q", name.to_string())]
            }
            LocationQuery::Coordinates { lat, lon } => {
                let (lat, lon) = (*lat, *lon);
                let in_range = lat.is_finite()
                    && lon.is_finite()
                    && (-90.0..=90.0).contains(&lat)
                    && (-180.0..=180.0).contains(&lon);
                if !in_range {
                    return Err(WeatherError::InvalidCoords { lat, lon });
                }
                vec![("lat", lat.to_string()), ("lon", lon.to_string())]
            }
        };
        params.push(("units", "metric".to_string()));
        Ok(params)
    }

    /// Run one GET on the blocking pool
    async fn attempt(
        &self,
        params: &[(&'static str, String)],
        api_key: &str,
    ) -> Result<Attempt, WeatherError> {
        let request = params
            .iter()
            .fold(self.agent.get(&self.config.base_url), |req, (name, value)| {
                req.query(name, value)
            })
            .query("appid", api_key);

        tokio::task::spawn_blocking(move || match request.call() {
            Ok(resp) => {
                let status = resp.status();
                match resp.into_string() {
                    Ok(body) => Attempt::Response { status, body },
                    Err(e) => Attempt::Transport(e.to_string()),
                }
            }
            Err(ureq::Error::Status(status, resp)) => Attempt::Response {
                status,
                body: resp.into_string().unwrap_or_default(),
            },
            Err(ureq::Error::Transport(e)) => Attempt::Transport(e.to_string()),
        })
        .await
        .map_err(|e| WeatherError::Network(e.to_string()))
    }

    /// GET with rate-limit and transport retries; returns status and body
    async fn fetch(
        &self,
        params: &[(&'static str, String)],
        api_key: &str,
    ) -> Result<(u16, String), WeatherError> {
        let retries = self.config.max_retries;
        let mut backoff = self.config.backoff;
        let mut attempt = 0;

        loop {
            let can_retry = attempt < retries;
            match self.attempt(params, api_key).await? {
                Attempt::Response { status: 429, .. } if can_retry => {
                    warn!(
                        "Rate limited by OpenWeather (429). Backing off {:.1}s (attempt {}/{})",
                        backoff.as_secs_f64(),
                        attempt + 1,
                        retries + 1
                    );
                }
                Attempt::Response { status, body } => return Ok((status, body)),
                Attempt::Transport(e) if can_retry => {
                    warn!(
                        "Network error on weather request (attempt {}/{}): {}",
                        attempt + 1,
                        retries + 1,
                        e
                    );
                }
                Attempt::Transport(e) => return Err(WeatherError::Network(e)),
            }

            tokio::time::sleep(backoff).await;
            backoff = backoff.saturating_mul(2);
            attempt += 1;
        }
    }
}

#[async_trait]
impl WeatherProvider for OpenWeatherClient {
    async fn current(&self, location: &LocationQuery) -> Result<WeatherSnapshot, WeatherError> {
        let api_key = self.config.api_key.as_deref().ok_or(WeatherError::MissingApiKey)?;
        let params = Self::query_params(location)?;

        info!("Requesting current weather for {:?}", location);
        let (status, body) = self.fetch(&params, api_key).await?;

        weather::interpret_response(status, &body, location)
    }
}
