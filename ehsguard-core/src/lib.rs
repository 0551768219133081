//! Core calculation engine for EHSGuard
//!
//! Turns ambient readings (temperature, humidity, barometric pressure, noise
//! level and exposure time) plus an optional health profile into a set of
//! personalized environmental-safety metrics.
//!
//! Key constraints:
//! - Pure and stateless: same inputs, same outputs, no I/O
//! - Never panics or errors on bad numbers: missing, NaN or infinite input
//!   degrades the affected field to `None` / `Unknown`
//! - No heap allocation, `no_std` friendly (math via `libm`)
//!
//! ```
//! use ehsguard_core::{assess, EnvironmentalReading, HealthProfile, HeatLevel, OxygenStatus};
//!
//! let reading = EnvironmentalReading::new()
//!     .with_temperature(35.0)
//!     .with_humidity(70.0)
//!     .with_pressure(700.0);
//! let profile = HealthProfile::new(Some(65)).with_condition("asthma");
//!
//! let report = assess(&reading, Some(&profile));
//! assert_eq!(report.heat_level, HeatLevel::Danger);
//! assert_eq!(report.oxygen_status, OxygenStatus::HighRisk);
//! assert_eq!(report.min_safe_oxygen_pct, 18.0);
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![deny(unsafe_code)]
#![warn(missing_docs)]

// Macros for optional logging
#[cfg(feature = "log")]
macro_rules! log_debug {
    ($($arg:tt)*) => { log::debug!($($arg)*) };
}

#[cfg(not(feature = "log"))]
macro_rules! log_debug {
    ($($arg:tt)*) => {};
}

#[cfg(feature = "log")]
macro_rules! log_warn {
    ($($arg:tt)*) => { log::warn!($($arg)*) };
}

#[cfg(not(feature = "log"))]
macro_rules! log_warn {
    ($($arg:tt)*) => {};
}

pub mod altitude;
pub mod constants;
pub mod errors;
pub mod heat;
pub mod noise;
pub mod profile;
pub mod report;
pub mod traits;
mod utils;

// Public API
pub use altitude::{
    altitude_from_pressure, classify_oxygen, find_safe_altitude_limit,
    find_safe_altitude_limit_with, oxygen_availability, pressure_from_altitude,
    AltitudeSearch, OxygenStatus,
};
pub use errors::{ProfileError, ProfileResult};
pub use heat::{classify_heat, comfort_message, heat_index, HeatLevel};
pub use noise::{
    classify_noise, noise_dose_pct, noise_message, permissible_exposure_hours, NoiseStatus,
};
pub use profile::{min_safe_oxygen, HealthProfile};
pub use report::{assess, Assessor, EnvironmentalReading, Report};
pub use traits::Validatable;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
