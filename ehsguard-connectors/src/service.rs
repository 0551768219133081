//! Metrics Service
//!
//! Glue between the external collaborators and the calculation engine.
//! For one request the service:
//!
//! 1. Looks up current weather and the area-risk flag concurrently
//! 2. Merges the weather snapshot with the caller's noise inputs
//! 3. Runs [`Assessor::assess`] with the caller's health profile
//!
//! A failed weather lookup never fails the request. It is logged, its error
//! code is kept on the [`Assessment`], and every weather-derived report
//! field comes back empty.

use ehsguard_core::{Assessor, EnvironmentalReading, HealthProfile, Report};
use log::{info, warn};
use serde::Serialize;

use crate::{AreaRiskSource, LocationQuery, NoAreaRisk, WeatherProvider, WeatherSnapshot};

/// Inputs for one assessment
#[derive(Debug, Clone)]
pub struct MetricsRequest {
    /// Where to look up weather
    pub location: LocationQuery,
    /// Sound level (dB)
    pub noise_db: Option<f64>,
    /// Exposure duration (minutes)
    pub noise_minutes: Option<f64>,
    /// Health profile for personalization
    pub profile: Option<HealthProfile>,
}

impl MetricsRequest {
    /// Request for a location with no noise data and no profile
    pub fn new(location: LocationQuery) -> Self {
        Self {
            location,
            noise_db: None,
            noise_minutes: None,
            profile: None,
        }
    }

    /// Add a noise level (dB) and exposure time (minutes)
    pub fn with_noise(mut self, noise_db: f64, minutes: f64) -> Self {
        self.noise_db = Some(noise_db);
        self.noise_minutes = Some(minutes);
        self
    }

    /// Attach a health profile
    pub fn with_profile(mut self, profile: HealthProfile) -> Self {
        self.profile = Some(profile);
        self
    }
}

/// Weather, area flag and report for one request
#[derive(Debug, Clone, Serialize)]
pub struct Assessment {
    /// Location the request asked about
    pub location: LocationQuery,
    /// Weather used, if the lookup succeeded
    pub weather: Option<WeatherSnapshot>,
    /// Error code of a failed weather lookup
    pub weather_error: Option<&'static str>,
    /// Recent hazard/SOS reports near the location
    pub area_at_risk: bool,
    /// Personalized report
    pub report: Report,
}

/// Runs weather and area-risk lookups and assesses the result
pub struct MetricsService<W, A = NoAreaRisk> {
    weather: W,
    area: A,
    assessor: Assessor,
}

impl<W: WeatherProvider, A: AreaRiskSource> MetricsService<W, A> {
    /// Service with the default assessor
    pub fn new(weather: W, area: A) -> Self {
        Self {
            weather,
            area,
            assessor: Assessor::default(),
        }
    }

    /// Use a custom assessor (e.g. a finer safe-ascent scan)
    pub fn with_assessor(mut self, assessor: Assessor) -> Self {
        self.assessor = assessor;
        self
    }

    /// Assess one request
    pub async fn assess(&self, request: &MetricsRequest) -> Assessment {
        let location = &request.location;
        let (weather, area_at_risk) =
            tokio::join!(self.weather.current(location), self.area.area_at_risk(location));

        let (weather, weather_error) = match weather {
            Ok(snapshot) => (Some(snapshot), None),
            Err(e) => {
                warn!("Weather unavailable for {:?}; weather metrics degraded: {}", location, e);
                (None, Some(e.code()))
            }
        };

        let mut reading = weather
            .as_ref()
            .map(WeatherSnapshot::to_reading)
            .unwrap_or_else(EnvironmentalReading::new);
        reading.noise_db = request.noise_db;
        reading.noise_minutes = request.noise_minutes;

        let report = self.assessor.assess(&reading, request.profile.as_ref());
        info!(
            "Assessed {:?}: heat={}, oxygen={}, noise={}, area_at_risk={}",
            location, report.heat_level, report.oxygen_status, report.noise_status, area_at_risk
        );

        Assessment {
            location: location.clone(),
            weather,
            weather_error,
            area_at_risk,
            report,
        }
    }
}
