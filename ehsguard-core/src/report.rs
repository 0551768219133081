//! Report Assembly
//!
//! Runs the heat, altitude/oxygen and noise calculators over one reading and
//! merges their outputs into a flat [`Report`].
//!
//! ## Degradation
//!
//! Every field depends only on the inputs it needs:
//!
//! ```text
//! Field                   Needs
//! ---------------------------------------------------------
//! heat_index_c            temperature_c, humidity_pct
//! altitude_m              pressure_hpa
//! oxygen_pct              pressure_hpa
//! max_safe_altitude_m     pressure_hpa (+ profile floor)
//! extra_safe_ascent_m     altitude_m, max_safe_altitude_m
//! noise_dose_pct          noise_db, noise_minutes
//! min_safe_oxygen_pct     nothing (profile optional)
//! ```
//!
//! A missing input blanks only the fields in its rows.
//!
//! ## Rounding
//!
//! Numbers are rounded to 2 decimals here, at the report boundary. Chained
//! calculations (altitude → safe-ascent search, pressure → oxygen status)
//! run on unrounded intermediates.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    altitude::{self, AltitudeSearch, OxygenStatus},
    constants::thresholds::BASE_MIN_SAFE_OXYGEN_PCT,
    heat::{self, HeatLevel},
    noise::{self, NoiseStatus},
    profile::HealthProfile,
    traits::ValidReading,
    utils::round2_opt,
};

/// One set of ambient readings; any field may be unknown
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EnvironmentalReading {
    /// Air temperature (°C)
    pub temperature_c: Option<f64>,
    /// Relative humidity (%)
    pub humidity_pct: Option<f64>,
    /// Barometric pressure (hPa)
    pub pressure_hpa: Option<f64>,
    /// Sound level (dB)
    pub noise_db: Option<f64>,
    /// Exposure duration at that level (minutes)
    pub noise_minutes: Option<f64>,
}

impl EnvironmentalReading {
    /// Reading with every field unknown
    pub fn new() -> Self {
        Self::default()
    }

    /// Set air temperature (°C)
    pub fn with_temperature(mut self, temperature_c: f64) -> Self {
        self.temperature_c = Some(temperature_c);
        self
    }

    /// Set relative humidity (%)
    pub fn with_humidity(mut self, humidity_pct: f64) -> Self {
        self.humidity_pct = Some(humidity_pct);
        self
    }

    /// Set barometric pressure (hPa)
    pub fn with_pressure(mut self, pressure_hpa: f64) -> Self {
        self.pressure_hpa = Some(pressure_hpa);
        self
    }

    /// Set sound level (dB) and exposure time (minutes)
    pub fn with_noise(mut self, noise_db: f64, minutes: f64) -> Self {
        self.noise_db = Some(noise_db);
        self.noise_minutes = Some(minutes);
        self
    }

    /// Whether any weather-derived input is present
    pub fn has_weather(&self) -> bool {
        self.temperature_c.valid().is_some()
            || self.humidity_pct.valid().is_some()
            || self.pressure_hpa.valid().is_some()
    }
}

/// Personalized environmental-safety report
///
/// Numeric fields are independently optional and rounded to 2 decimals.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Report {
    /// Heat index (°C)
    pub heat_index_c: Option<f64>,
    /// Heat stress level
    pub heat_level: HeatLevel,
    /// Advisory for the heat level
    pub comfort_message: &'static str,
    /// Estimated altitude (m)
    pub altitude_m: Option<f64>,
    /// Effective oxygen availability (%)
    pub oxygen_pct: Option<f64>,
    /// Oxygen availability level
    pub oxygen_status: OxygenStatus,
    /// Highest altitude that keeps oxygen above the personal floor (m)
    pub max_safe_altitude_m: Option<f64>,
    /// Further ascent available from here (m)
    pub extra_safe_ascent_m: Option<f64>,
    /// Noise dose (% of daily limit)
    pub noise_dose_pct: Option<f64>,
    /// Noise exposure level
    pub noise_status: NoiseStatus,
    /// Guidance for the noise level
    pub noise_message: &'static str,
    /// Personal minimum safe oxygen availability (%)
    pub min_safe_oxygen_pct: f64,
}

/// Builds [`Report`]s with a configurable safe-ascent scan
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Assessor {
    search: AltitudeSearch,
}

impl Assessor {
    /// Assessor with the default scan (100 m steps up to 6000 m)
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a custom safe-ascent scan
    pub fn with_search(mut self, search: AltitudeSearch) -> Self {
        self.search = search;
        self
    }

    /// Scan configuration in use
    pub fn search(&self) -> &AltitudeSearch {
        &self.search
    }

    /// Compute every metric for a reading and optional profile
    pub fn assess(
        &self,
        reading: &EnvironmentalReading,
        profile: Option<&HealthProfile>,
    ) -> Report {
        let min_safe_oxygen_pct = profile
            .map(HealthProfile::min_safe_oxygen_pct)
            .unwrap_or(BASE_MIN_SAFE_OXYGEN_PCT);

        // Heat
        let heat_index_c = heat::heat_index(reading.temperature_c, reading.humidity_pct);
        let heat_level = heat::classify_heat(heat_index_c);
        if heat_index_c.is_none() {
            log_debug!(
                "Heat index unavailable (T={:?}, RH={:?})",
                reading.temperature_c,
                reading.humidity_pct
            );
        }

        // Altitude / oxygen
        let altitude_m = altitude::altitude_from_pressure(reading.pressure_hpa);
        let oxygen_pct = altitude::oxygen_availability(reading.pressure_hpa);
        let oxygen_status = altitude::classify_oxygen(oxygen_pct);
        let max_safe_altitude_m = self.search.limit(altitude_m, min_safe_oxygen_pct);
        let extra_safe_ascent_m = match (max_safe_altitude_m, altitude_m) {
            (Some(max_safe), Some(current)) => Some(max_safe - current),
            _ => None,
        };
        if altitude_m.is_none() {
            log_debug!("Altitude unavailable (P={:?})", reading.pressure_hpa);
        }

        // Noise
        let noise_dose_pct = noise::noise_dose_pct(reading.noise_db, reading.noise_minutes);
        let noise_status = noise::classify_noise(reading.noise_db, reading.noise_minutes);

        Report {
            heat_index_c: round2_opt(heat_index_c),
            heat_level,
            comfort_message: heat::comfort_message(heat_level),
            altitude_m: round2_opt(altitude_m),
            oxygen_pct: round2_opt(oxygen_pct),
            oxygen_status,
            max_safe_altitude_m: round2_opt(max_safe_altitude_m),
            extra_safe_ascent_m: round2_opt(extra_safe_ascent_m),
            noise_dose_pct: round2_opt(noise_dose_pct),
            noise_status,
            noise_message: noise::noise_message(noise_status),
            min_safe_oxygen_pct,
        }
    }
}

/// Compute a [`Report`] with the default configuration
///
/// Without a profile the 16.0% base oxygen floor is used.
pub fn assess(reading: &EnvironmentalReading, profile: Option<&HealthProfile>) -> Report {
    Assessor::default().assess(reading, profile)
}
