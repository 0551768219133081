//! Noise Exposure Dose
//!
//! ## Background
//!
//! Hearing damage depends on both level and duration. The exposure limit
//! used here is 85 dB for 8 hours, with a 3 dB exchange rate: every 3 dB
//! above the reference halves the permissible time.
//!
//! ```text
//! safe_hours = 8 / 2^((dB − 85) / 3)     for dB > 85
//! safe_hours = 8                         otherwise
//!
//! dose% = (minutes / 60) / safe_hours × 100
//! ```
//!
//! ```text
//! Level     Permissible time
//! ---------------------------
//! 85 dB     8 h
//! 88 dB     4 h
//! 94 dB     1 h
//! 100 dB    15 min
//! ```
//!
//! At extreme levels `2^steps` overflows and the permissible time collapses
//! to zero. Rather than report an infinite dose, the dose is pinned to a
//! sentinel of 9999%.
//!
//! ## Risk Levels
//!
//! ```text
//! Dose          Level
//! ----------------------
//! < 50%         Safe
//! 50 - < 100%   Caution
//! >= 100%       High Risk
//! ```

use core::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    constants::thresholds::{
        MINUTES_PER_HOUR, NOISE_DOSE_CAUTION_PCT, NOISE_DOSE_HIGH_RISK_PCT, NOISE_DOSE_SENTINEL_PCT,
        NOISE_EXCHANGE_RATE_DB, NOISE_REFERENCE_DB, NOISE_REFERENCE_HOURS,
    },
    traits::ValidReading,
    utils,
};

/// Noise exposure risk level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum NoiseStatus {
    /// Dose below 50%
    Safe,
    /// Dose from 50% up to (not including) 100%
    Caution,
    /// Dose of 100% or more
    #[cfg_attr(feature = "serde", serde(rename = "High Risk"))]
    HighRisk,
    /// Level or duration missing
    #[default]
    Unknown,
}

impl NoiseStatus {
    /// Label used in reports
    pub fn as_str(&self) -> &'static str {
        match self {
            NoiseStatus::Safe => "Safe",
            NoiseStatus::Caution => "Caution",
            NoiseStatus::HighRisk => "High Risk",
            NoiseStatus::Unknown => "Unknown",
        }
    }

    /// Parse a report label; anything unrecognised is `Unknown`
    pub fn from_label(label: &str) -> Self {
        match label {
            "Safe" => NoiseStatus::Safe,
            "Caution" => NoiseStatus::Caution,
            "High Risk" => NoiseStatus::HighRisk,
            _ => NoiseStatus::Unknown,
        }
    }

    /// Whether a dose could be computed
    pub fn is_known(&self) -> bool {
        !matches!(self, NoiseStatus::Unknown)
    }

    /// Guidance message for this level
    pub fn message(&self) -> &'static str {
        noise_message(*self)
    }
}

impl fmt::Display for NoiseStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Guidance per noise level
static NOISE_MESSAGES: [(NoiseStatus, &str); 3] = [
    (NoiseStatus::Safe, "Noise exposure is within safe limits."),
    (
        NoiseStatus::Caution,
        "Prolonged exposure at this noise level may cause hearing strain. Consider breaks or protection.",
    ),
    (
        NoiseStatus::HighRisk,
        "High risk of hearing damage! Limit exposure and use hearing protection.",
    ),
];

/// Shown when no noise level could be determined
pub const NOISE_UNAVAILABLE_MESSAGE: &str = "Noise exposure data is incomplete or unknown.";

/// Permissible exposure time (hours) at a sound level (dB)
///
/// May be `0.0` when the level is so high that the halving underflows.
pub fn permissible_exposure_hours(noise_db: Option<f64>) -> Option<f64> {
    let db = noise_db.valid()?;
    if db <= NOISE_REFERENCE_DB {
        return Some(NOISE_REFERENCE_HOURS);
    }

    let steps = (db - NOISE_REFERENCE_DB) / NOISE_EXCHANGE_RATE_DB;
    let divisor = libm::pow(2.0, steps);
    if divisor.is_finite() {
        Some(NOISE_REFERENCE_HOURS / divisor)
    } else {
        Some(0.0)
    }
}

/// Noise dose (% of the daily limit), rounded to 2 decimals
///
/// Negative exposure is treated as none. Returns `None` if either input is
/// missing or not finite; returns the 9999% sentinel when the permissible
/// time collapses to zero.
pub fn noise_dose_pct(noise_db: Option<f64>, exposure_minutes: Option<f64>) -> Option<f64> {
    let safe_hours = permissible_exposure_hours(noise_db)?;
    let minutes = exposure_minutes.valid()?.max(0.0);
    let exposure_hours = minutes / MINUTES_PER_HOUR;

    if safe_hours <= 0.0 {
        log_warn!("Noise dose: no permissible exposure at {:?} dB; reporting sentinel", noise_db);
        return Some(NOISE_DOSE_SENTINEL_PCT);
    }

    let dose = utils::round2(exposure_hours / safe_hours * 100.0);
    match utils::finite(dose) {
        Some(dose) => Some(dose),
        None => {
            log_warn!("Noise dose overflowed at {:?} dB; reporting sentinel", noise_db);
            Some(NOISE_DOSE_SENTINEL_PCT)
        }
    }
}

/// Classify noise exposure from level (dB) and duration (minutes)
pub fn classify_noise(noise_db: Option<f64>, exposure_minutes: Option<f64>) -> NoiseStatus {
    match noise_dose_pct(noise_db, exposure_minutes) {
        None => NoiseStatus::Unknown,
        Some(dose) if dose < NOISE_DOSE_CAUTION_PCT => NoiseStatus::Safe,
        Some(dose) if dose < NOISE_DOSE_HIGH_RISK_PCT => NoiseStatus::Caution,
        Some(_) => NoiseStatus::HighRisk,
    }
}

/// Human-friendly guidance for a noise level
pub fn noise_message(status: NoiseStatus) -> &'static str {
    NOISE_MESSAGES
        .iter()
        .find(|(s, _)| *s == status)
        .map(|(_, msg)| *msg)
        .unwrap_or(NOISE_UNAVAILABLE_MESSAGE)
}
