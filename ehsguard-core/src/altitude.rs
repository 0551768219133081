//! Altitude, Oxygen Availability and Safe-Ascent Estimation
//!
//! ## Physics Background
//!
//! ### Altitude from Pressure
//!
//! Pressure falls with altitude following the barometric formula. In the
//! troposphere, with the standard lapse rate folded into two constants:
//!
//! ```text
//! h = 44330 × (1 − (P/P₀)^(1/5.255))        pressure → altitude
//! P = P₀ × (1 − h/44330)^5.255               altitude → pressure
//!
//! Where:
//! - P₀ = sea level pressure (1013.25 hPa)
//! - h = altitude above sea level (m)
//! ```
//!
//! The inverse is undefined once `1 − h/44330 ≤ 0`, i.e. at 44330 m and up.
//!
//! ### Oxygen Availability
//!
//! Air is ~21% oxygen at every altitude; what drops is the partial pressure.
//! We express that as an "effective oxygen" percentage scaled linearly by the
//! pressure ratio:
//!
//! ```text
//! O₂ = 21.0 × (P / P₀)
//! ```
//!
//! This is an awareness approximation: it ignores the non-linear oxygen
//! uptake of the body and acclimatization.
//!
//! ```text
//! Location        Altitude   Pressure    Effective O₂   Status
//! ---------------------------------------------------------------
//! Sea level       0 m        1013 hPa    21.0%          Safe
//! Denver          1600 m     835 hPa     17.3%          Mild Risk
//! La Paz          3640 m     650 hPa     13.5%          High Risk
//! ```
//!
//! ## Safe-Ascent Search
//!
//! Given the current altitude and a personal oxygen floor, we scan upward in
//! fixed steps (100 m by default) up to a ceiling (6000 m by default) and
//! report the last altitude whose oxygen still met the floor. The scan is a
//! plain loop with an iteration cap computed before it starts, so it always
//! terminates.
//!
//! The starting altitude always counts as reached: if it is already below
//! the floor, the start is returned unchanged.
//!
//! ```rust
//! use ehsguard_core::altitude::{altitude_from_pressure, find_safe_altitude_limit};
//!
//! let here = altitude_from_pressure(Some(1013.25));
//! assert_eq!(here, Some(0.0));
//!
//! // Healthy adult: floor of 16% effective oxygen
//! assert_eq!(find_safe_altitude_limit(here, 16.0), Some(2200.0));
//! ```

use core::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    constants::{
        physics::{
            BAROMETRIC_EXPONENT, BAROMETRIC_SCALE_HEIGHT_M, SEA_LEVEL_OXYGEN_PCT,
            SEA_LEVEL_PRESSURE_HPA,
        },
        thresholds::{
            ALTITUDE_SEARCH_MAX_M, ALTITUDE_SEARCH_MIN_STEP_M, ALTITUDE_SEARCH_STEP_M,
            OXYGEN_MILD_RISK_PCT, OXYGEN_SAFE_PCT,
        },
    },
    traits::{Validatable, ValidReading},
    utils,
};

/// Oxygen availability level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum OxygenStatus {
    /// 19.5% or more
    Safe,
    /// From 16.0% up to (not including) 19.5%
    #[cfg_attr(feature = "serde", serde(rename = "Mild Risk"))]
    MildRisk,
    /// Below 16.0%
    #[cfg_attr(feature = "serde", serde(rename = "High Risk"))]
    HighRisk,
    /// No usable oxygen estimate
    #[default]
    Unknown,
}

impl OxygenStatus {
    /// Label used in reports
    pub fn as_str(&self) -> &'static str {
        match self {
            OxygenStatus::Safe => "Safe",
            OxygenStatus::MildRisk => "Mild Risk",
            OxygenStatus::HighRisk => "High Risk",
            OxygenStatus::Unknown => "Unknown",
        }
    }

    /// Parse a report label; anything unrecognised is `Unknown`
    pub fn from_label(label: &str) -> Self {
        match label {
            "Safe" => OxygenStatus::Safe,
            "Mild Risk" => OxygenStatus::MildRisk,
            "High Risk" => OxygenStatus::HighRisk,
            _ => OxygenStatus::Unknown,
        }
    }

    /// Whether an oxygen estimate was available
    pub fn is_known(&self) -> bool {
        !matches!(self, OxygenStatus::Unknown)
    }
}

impl fmt::Display for OxygenStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Estimate altitude (m) from barometric pressure (hPa)
///
/// Returns `None` for missing, non-finite or non-positive pressure.
pub fn altitude_from_pressure(pressure_hpa: Option<f64>) -> Option<f64> {
    let pressure = pressure_hpa.valid().filter(|p| *p > 0.0)?;
    let ratio = pressure / SEA_LEVEL_PRESSURE_HPA;

    utils::finite(BAROMETRIC_SCALE_HEIGHT_M * (1.0 - libm::pow(ratio, 1.0 / BAROMETRIC_EXPONENT)))
}

/// Estimate pressure (hPa) at an altitude (m); inverse of [`altitude_from_pressure`]
///
/// Returns `None` for missing input or altitudes at or above 44330 m, where
/// the model has no defined pressure.
pub fn pressure_from_altitude(altitude_m: Option<f64>) -> Option<f64> {
    let altitude = altitude_m.valid()?;
    let term = 1.0 - altitude / BAROMETRIC_SCALE_HEIGHT_M;
    if term <= 0.0 {
        return None;
    }

    utils::finite(SEA_LEVEL_PRESSURE_HPA * libm::pow(term, BAROMETRIC_EXPONENT))
}

/// Effective oxygen availability (%) at a pressure (hPa)
///
/// Returns `None` for missing, non-finite or negative pressure.
pub fn oxygen_availability(pressure_hpa: Option<f64>) -> Option<f64> {
    let pressure = pressure_hpa.valid().filter(|p| *p >= 0.0)?;
    Some(SEA_LEVEL_OXYGEN_PCT * (pressure / SEA_LEVEL_PRESSURE_HPA))
}

/// Classify effective oxygen availability (%)
pub fn classify_oxygen(oxygen_pct: Option<f64>) -> OxygenStatus {
    match oxygen_pct.valid() {
        None => OxygenStatus::Unknown,
        Some(o2) if o2 >= OXYGEN_SAFE_PCT => OxygenStatus::Safe,
        Some(o2) if o2 >= OXYGEN_MILD_RISK_PCT => OxygenStatus::MildRisk,
        Some(_) => OxygenStatus::HighRisk,
    }
}

/// Configuration for the safe-ascent scan
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AltitudeSearch {
    /// Altitude increment per step (m)
    step_m: f64,

    /// Highest altitude the scan will consider (m)
    max_altitude_m: f64,
}

impl Default for AltitudeSearch {
    fn default() -> Self {
        Self {
            step_m: ALTITUDE_SEARCH_STEP_M,
            max_altitude_m: ALTITUDE_SEARCH_MAX_M,
        }
    }
}

impl AltitudeSearch {
    /// Scan with the default step up to a custom ceiling
    pub fn new(max_altitude_m: f64) -> Self {
        Self::default().with_max_altitude(max_altitude_m)
    }

    /// Set the step; anything below 1 m (or non-finite) becomes 1 m
    pub fn with_step(mut self, step_m: f64) -> Self {
        self.step_m = if step_m.is_valid() {
            step_m.max(ALTITUDE_SEARCH_MIN_STEP_M)
        } else {
            ALTITUDE_SEARCH_MIN_STEP_M
        };
        self
    }

    /// Set the ceiling
    pub fn with_max_altitude(mut self, max_altitude_m: f64) -> Self {
        self.max_altitude_m = max_altitude_m;
        self
    }

    /// Step size (m)
    pub fn step_m(&self) -> f64 {
        self.step_m
    }

    /// Ceiling (m)
    pub fn max_altitude_m(&self) -> f64 {
        self.max_altitude_m
    }

    /// Upper bound on loop iterations for a scan starting at `start_m`
    fn iteration_cap(&self, start_m: f64) -> usize {
        let span = (self.max_altitude_m - start_m) / self.step_m;
        if !span.is_valid() {
            return 0;
        }
        // Float-to-int `as` saturates, so huge spans cannot wrap
        (libm::trunc(span.max(0.0)) + 2.0) as usize
    }

    /// Highest altitude (m) reachable from `start_m` while effective oxygen
    /// stays at or above `min_safe_oxygen_pct`
    ///
    /// Negative starts are clamped to sea level. Returns `None` if the start
    /// or the floor is missing or non-finite.
    pub fn limit(&self, start_m: Option<f64>, min_safe_oxygen_pct: f64) -> Option<f64> {
        let start = start_m.valid()?.max(0.0);
        if !min_safe_oxygen_pct.is_valid() {
            return None;
        }

        let (last_safe, stop) = self.scan(start, min_safe_oxygen_pct, self.iteration_cap(start));
        match stop {
            ScanStop::StartBelowFloor => {
                log_warn!(
                    "Safe-ascent scan: start {} m already below oxygen floor {}%; reporting start",
                    start, min_safe_oxygen_pct
                );
            }
            ScanStop::IterationCap => {
                log_warn!(
                    "Safe-ascent scan from {} m hit its iteration cap at {} m",
                    start,
                    last_safe
                );
            }
            _ => {}
        }
        log_debug!("Safe-ascent scan from {} m stopped at {} m ({:?})", start, last_safe, stop);

        Some(last_safe)
    }

    /// Step upward from `start` for at most `cap` iterations
    ///
    /// Returns the last altitude that met the floor and why the scan ended.
    fn scan(&self, start: f64, min_safe_oxygen_pct: f64, cap: usize) -> (f64, ScanStop) {
        let mut current = start;
        let mut last_safe = start;

        for step in 0..cap {
            if current > self.max_altitude_m {
                return (last_safe, ScanStop::Ceiling);
            }
            let Some(oxygen) = oxygen_availability(pressure_from_altitude(Some(current))) else {
                return (last_safe, ScanStop::ModelLimit);
            };
            if oxygen < min_safe_oxygen_pct {
                let stop = if step == 0 { ScanStop::StartBelowFloor } else { ScanStop::BelowFloor };
                return (last_safe, stop);
            }
            last_safe = current;
            current += self.step_m;
        }

        (last_safe, ScanStop::IterationCap)
    }
}

/// Why a safe-ascent scan ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanStop {
    /// Next step would pass the ceiling
    Ceiling,
    /// Next step falls below the oxygen floor
    BelowFloor,
    /// The start itself is below the oxygen floor
    StartBelowFloor,
    /// Pressure model undefined at the next step
    ModelLimit,
    /// Iteration budget used up
    IterationCap,
}

/// Safe-ascent limit with the default 100 m step and 6000 m ceiling
///
/// See [`AltitudeSearch::limit`].
pub fn find_safe_altitude_limit(
    start_altitude_m: Option<f64>,
    min_safe_oxygen_pct: f64,
) -> Option<f64> {
    AltitudeSearch::default().limit(start_altitude_m, min_safe_oxygen_pct)
}

/// Safe-ascent limit with an explicit scan configuration
pub fn find_safe_altitude_limit_with(
    start_altitude_m: Option<f64>,
    min_safe_oxygen_pct: f64,
    search: &AltitudeSearch,
) -> Option<f64> {
    search.limit(start_altitude_m, min_safe_oxygen_pct)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64, tol: f64) -> bool {
        (a - b).abs() <= tol
    }

    #[test]
    fn sea_level() {
        assert_eq!(altitude_from_pressure(Some(1013.25)), Some(0.0));
        assert_eq!(oxygen_availability(Some(1013.25)), Some(21.0));
        assert_eq!(pressure_from_altitude(Some(0.0)), Some(1013.25));
        assert_eq!(classify_oxygen(Some(21.0)), OxygenStatus::Safe);
    }

    #[test]
    fn altitude_at_700_hpa() {
        let altitude = altitude_from_pressure(Some(700.0)).unwrap();
        assert!(approx(altitude, 3012.615, 0.01));

        let oxygen = oxygen_availability(Some(700.0)).unwrap();
        assert!(approx(oxygen, 14.5078, 0.001));
        assert_eq!(classify_oxygen(Some(oxygen)), OxygenStatus::HighRisk);
    }

    #[test]
    fn invalid_pressure() {
        assert_eq!(altitude_from_pressure(Some(0.0)), None);
        assert_eq!(altitude_from_pressure(Some(-5.0)), None);
        assert_eq!(altitude_from_pressure(None), None);
        assert_eq!(altitude_from_pressure(Some(f64::NAN)), None);
        assert_eq!(oxygen_availability(Some(-1.0)), None);
        assert_eq!(oxygen_availability(Some(f64::INFINITY)), None);
        assert_eq!(oxygen_availability(Some(0.0)), Some(0.0));
    }

    #[test]
    fn inverse_is_undefined_above_model_top() {
        assert_eq!(pressure_from_altitude(Some(44330.0)), None);
        assert_eq!(pressure_from_altitude(Some(50000.0)), None);
        assert!(pressure_from_altitude(Some(44329.0)).is_some());
        // Below sea level is fine
        assert!(pressure_from_altitude(Some(-430.0)).unwrap() > 1013.25);
    }

    #[test]
    fn round_trip() {
        for p in [1013.25, 900.0, 700.0, 500.0, 300.0, 50.0] {
            let h = altitude_from_pressure(Some(p));
            let back = pressure_from_altitude(h).unwrap();
            assert!(approx(back, p, 1e-6), "{} -> {:?} -> {}", p, h, back);
        }
    }

    #[test]
    fn oxygen_boundaries() {
        assert_eq!(classify_oxygen(Some(19.5)), OxygenStatus::Safe);
        assert_eq!(classify_oxygen(Some(19.49)), OxygenStatus::MildRisk);
        assert_eq!(classify_oxygen(Some(16.0)), OxygenStatus::MildRisk);
        assert_eq!(classify_oxygen(Some(15.99)), OxygenStatus::HighRisk);
        assert_eq!(classify_oxygen(None), OxygenStatus::Unknown);
    }

    #[test]
    fn search_from_sea_level() {
        assert_eq!(find_safe_altitude_limit(Some(0.0), 21.0), Some(0.0));
        assert_eq!(find_safe_altitude_limit(Some(0.0), 19.5), Some(600.0));
        assert_eq!(find_safe_altitude_limit(Some(0.0), 19.0), Some(800.0));
        assert_eq!(find_safe_altitude_limit(Some(0.0), 17.5), Some(1500.0));
        assert_eq!(find_safe_altitude_limit(Some(0.0), 16.0), Some(2200.0));
        assert_eq!(find_safe_altitude_limit(Some(0.0), 10.0), Some(5800.0));
    }

    #[test]
    fn search_stops_at_ceiling() {
        assert_eq!(find_safe_altitude_limit(Some(0.0), 0.0), Some(6000.0));
        assert_eq!(find_safe_altitude_limit(Some(5950.0), 0.0), Some(5950.0));

        let search = AltitudeSearch::new(8000.0);
        assert_eq!(search.limit(Some(0.0), 0.0), Some(8000.0));
    }

    #[test]
    fn search_start_is_always_reached() {
        // Already above the ceiling: start comes back unchanged
        assert_eq!(find_safe_altitude_limit(Some(7000.0), 10.0), Some(7000.0));
        // Already below the floor: start comes back unchanged
        assert_eq!(find_safe_altitude_limit(Some(3000.0), 19.5), Some(3000.0));
    }

    #[test]
    fn search_clamps_negative_start() {
        assert_eq!(find_safe_altitude_limit(Some(-250.0), 16.0), Some(2200.0));
    }

    #[test]
    fn search_rejects_invalid_input() {
        assert_eq!(find_safe_altitude_limit(None, 16.0), None);
        assert_eq!(find_safe_altitude_limit(Some(f64::NAN), 16.0), None);
        assert_eq!(find_safe_altitude_limit(Some(0.0), f64::NAN), None);
    }

    #[test]
    fn search_configuration() {
        let search = AltitudeSearch::default().with_step(0.0);
        assert_eq!(search.step_m(), 1.0);
        assert_eq!(search.max_altitude_m(), 6000.0);

        let coarse = AltitudeSearch::default().with_step(500.0);
        assert_eq!(find_safe_altitude_limit_with(Some(0.0), 16.0, &coarse), Some(2000.0));

        // A NaN ceiling gives no iterations rather than an endless scan
        let broken = AltitudeSearch::new(f64::NAN);
        assert_eq!(broken.limit(Some(100.0), 16.0), Some(100.0));
    }

    #[test]
    fn scan_reports_why_it_stopped() {
        let search = AltitudeSearch::default();
        let run = |start: f64, floor: f64| search.scan(start, floor, search.iteration_cap(start));

        assert_eq!(run(0.0, 16.0), (2200.0, ScanStop::BelowFloor));
        assert_eq!(run(0.0, 21.0), (0.0, ScanStop::BelowFloor));
        assert_eq!(run(0.0, 0.0), (6000.0, ScanStop::Ceiling));
        assert_eq!(run(3000.0, 19.5), (3000.0, ScanStop::StartBelowFloor));

        let beyond_model = AltitudeSearch::new(50_000.0).with_step(1000.0);
        let cap = beyond_model.iteration_cap(0.0);
        assert_eq!(beyond_model.scan(0.0, 0.0, cap), (44_000.0, ScanStop::ModelLimit));
    }

    #[test]
    fn scan_honours_iteration_cap() {
        let search = AltitudeSearch::default();
        // Three iterations reach 0, 100 and 200 m, then the budget is gone
        assert_eq!(search.scan(0.0, 0.0, 3), (200.0, ScanStop::IterationCap));
        assert_eq!(search.scan(500.0, 0.0, 0), (500.0, ScanStop::IterationCap));
        // The computed cap always leaves room to finish naturally
        assert_eq!(search.iteration_cap(0.0), 62);
    }
}
