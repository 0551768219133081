//! Heat Stress Assessment with the NOAA Heat Index
//!
//! ## Physics Background
//!
//! The heat index ("feels-like" temperature) combines air temperature and
//! relative humidity into the temperature the human body perceives. Sweat
//! cools by evaporation; humid air slows evaporation, so the same air
//! temperature feels hotter as humidity rises.
//!
//! ### Rothfusz Regression
//!
//! NOAA's regression is defined in Fahrenheit:
//!
//! ```text
//! HI = c1 + c2·T + c3·R + c4·T·R + c5·T² + c6·R² + c7·T²·R + c8·T·R² + c9·T²·R²
//!
//! Where:
//! - T = air temperature (°F)
//! - R = relative humidity (%)
//! ```
//!
//! We convert °C → °F, evaluate, and convert back. The regression is fitted
//! for T ≥ 80°F (~26.7°C) and R ≥ 40%; NOAA adds adjustment terms at the
//! edges of that range. We skip the adjustments and evaluate the bare
//! polynomial everywhere, so results outside the fitted range are rough.
//!
//! ## Risk Levels
//!
//! ```text
//! Heat index (°C)     Level
//! ---------------------------
//! < 27.0              Safe
//! 27.0 - < 32.0       Caution
//! >= 32.0             Danger
//! missing             Unknown
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use ehsguard_core::heat::{heat_index, classify_heat, comfort_message, HeatLevel};
//!
//! let hi = heat_index(Some(35.0), Some(70.0));
//! assert_eq!(hi, Some(50.34));
//!
//! let level = classify_heat(hi);
//! assert_eq!(level, HeatLevel::Danger);
//! assert!(comfort_message(level).starts_with("High risk of heat stress"));
//! ```

use core::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    constants::{
        physics::{FAHRENHEIT_OFFSET, HEAT_INDEX_COEFFICIENTS},
        thresholds::{HEAT_CAUTION_C, HEAT_DANGER_C},
    },
    traits::ValidReading,
    utils,
};

/// Heat stress level derived from the heat index
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum HeatLevel {
    /// Heat index below 27°C
    Safe,
    /// Heat index from 27°C up to (not including) 32°C
    Caution,
    /// Heat index of 32°C or more
    Danger,
    /// No usable heat index
    #[default]
    Unknown,
}

impl HeatLevel {
    /// Label used in reports
    pub fn as_str(&self) -> &'static str {
        match self {
            HeatLevel::Safe => "Safe",
            HeatLevel::Caution => "Caution",
            HeatLevel::Danger => "Danger",
            HeatLevel::Unknown => "Unknown",
        }
    }

    /// Parse a report label; anything unrecognised is `Unknown`
    pub fn from_label(label: &str) -> Self {
        match label {
            "Safe" => HeatLevel::Safe,
            "Caution" => HeatLevel::Caution,
            "Danger" => HeatLevel::Danger,
            _ => HeatLevel::Unknown,
        }
    }

    /// Whether a heat index was available
    pub fn is_known(&self) -> bool {
        !matches!(self, HeatLevel::Unknown)
    }

    /// Advisory message for this level
    pub fn message(&self) -> &'static str {
        comfort_message(*self)
    }
}

impl fmt::Display for HeatLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Advisory messages per heat level
static COMFORT_MESSAGES: [(HeatLevel, &str); 3] = [
    (HeatLevel::Safe, "You are safe. Stay hydrated and enjoy your day."),
    (HeatLevel::Caution, "Avoid staying in direct sunlight for long periods."),
    (HeatLevel::Danger, "High risk of heat stress! Stay indoors and drink plenty of water."),
];

/// Shown when no heat level could be determined
pub const HEAT_UNAVAILABLE_MESSAGE: &str = "Heat data unavailable.";

/// Heat index in °C, rounded to 2 decimals
///
/// Humidity is clamped to `[0, 100]`. Returns `None` if either input is
/// missing or not finite.
pub fn heat_index(temp_c: Option<f64>, humidity_pct: Option<f64>) -> Option<f64> {
    let temp_c = temp_c.valid()?;
    let humidity = utils::clamp(humidity_pct.valid()?, 0.0, 100.0);

    let t = celsius_to_fahrenheit(temp_c);
    let r = humidity;
    let [c1, c2, c3, c4, c5, c6, c7, c8, c9] = HEAT_INDEX_COEFFICIENTS;

    let hi_f = c1
        + c2 * t
        + c3 * r
        + c4 * t * r
        + c5 * t * t
        + c6 * r * r
        + c7 * t * t * r
        + c8 * t * r * r
        + c9 * t * t * r * r;

    // Extreme temperatures can overflow the quadratic terms
    utils::finite(fahrenheit_to_celsius(hi_f)).map(utils::round2)
}

/// Classify a heat index (°C) into a [`HeatLevel`]
///
/// Boundaries are strict `<`: exactly 27.0 is Caution, exactly 32.0 is Danger.
pub fn classify_heat(heat_index_c: Option<f64>) -> HeatLevel {
    match heat_index_c.valid() {
        None => HeatLevel::Unknown,
        Some(hi) if hi < HEAT_CAUTION_C => HeatLevel::Safe,
        Some(hi) if hi < HEAT_DANGER_C => HeatLevel::Caution,
        Some(_) => HeatLevel::Danger,
    }
}

/// Human-readable comfort/safety message for a heat level
pub fn comfort_message(level: HeatLevel) -> &'static str {
    COMFORT_MESSAGES
        .iter()
        .find(|(l, _)| *l == level)
        .map(|(_, msg)| *msg)
        .unwrap_or(HEAT_UNAVAILABLE_MESSAGE)
}

fn celsius_to_fahrenheit(c: f64) -> f64 {
    c * 9.0 / 5.0 + FAHRENHEIT_OFFSET
}

fn fahrenheit_to_celsius(f: f64) -> f64 {
    (f - FAHRENHEIT_OFFSET) * 5.0 / 9.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hot_humid_day() {
        assert_eq!(heat_index(Some(35.0), Some(70.0)), Some(50.34));
        assert_eq!(heat_index(Some(30.0), Some(50.0)), Some(31.05));
    }

    #[test]
    fn humidity_is_clamped() {
        assert_eq!(heat_index(Some(25.0), Some(120.0)), heat_index(Some(25.0), Some(100.0)));
        assert_eq!(heat_index(Some(25.0), Some(-20.0)), heat_index(Some(25.0), Some(0.0)));
    }

    #[test]
    fn missing_or_invalid_inputs() {
        assert_eq!(heat_index(None, Some(50.0)), None);
        assert_eq!(heat_index(Some(25.0), None), None);
        assert_eq!(heat_index(Some(f64::NAN), Some(50.0)), None);
        assert_eq!(heat_index(Some(25.0), Some(f64::INFINITY)), None);
        assert_eq!(heat_index(Some(1e300), Some(50.0)), None);
    }

    #[test]
    fn classification_boundaries() {
        assert_eq!(classify_heat(Some(26.999)), HeatLevel::Safe);
        assert_eq!(classify_heat(Some(27.0)), HeatLevel::Caution);
        assert_eq!(classify_heat(Some(31.999)), HeatLevel::Caution);
        assert_eq!(classify_heat(Some(32.0)), HeatLevel::Danger);
        assert_eq!(classify_heat(None), HeatLevel::Unknown);
        assert_eq!(classify_heat(Some(f64::NAN)), HeatLevel::Unknown);
    }

    #[test]
    fn messages() {
        assert_eq!(
            comfort_message(HeatLevel::Safe),
            "You are safe. Stay hydrated and enjoy your day."
        );
        assert_eq!(
            comfort_message(HeatLevel::Caution),
            "Avoid staying in direct sunlight for long periods."
        );
        assert_eq!(comfort_message(HeatLevel::Unknown), HEAT_UNAVAILABLE_MESSAGE);
        assert_eq!(HeatLevel::from_label("Scorching").message(), HEAT_UNAVAILABLE_MESSAGE);
    }

    #[test]
    fn labels() {
        for level in [HeatLevel::Safe, HeatLevel::Caution, HeatLevel::Danger, HeatLevel::Unknown] {
            assert_eq!(HeatLevel::from_label(level.as_str()), level);
        }
        assert!(!HeatLevel::Unknown.is_known());
        assert!(HeatLevel::Danger.is_known());
    }
}
