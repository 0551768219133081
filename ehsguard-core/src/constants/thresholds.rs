//! Risk Thresholds and Exposure References
//!
//! Boundaries used to turn the derived metrics into risk levels. All
//! comparisons that use these values are documented next to the classifier
//! that applies them (`<` for heat and noise, `>=` for oxygen).

// ===== HEAT =====

/// Heat index at or above which conditions are "Caution" (°C).
pub const HEAT_CAUTION_C: f64 = 27.0;

/// Heat index at or above which conditions are "Danger" (°C).
pub const HEAT_DANGER_C: f64 = 32.0;

// ===== OXYGEN =====

/// Oxygen availability at or above which the level is "Safe" (%).
///
/// Matches the common occupational definition of an oxygen-deficient
/// atmosphere (below 19.5%).
pub const OXYGEN_SAFE_PCT: f64 = 19.5;

/// Oxygen availability at or above which the level is "Mild Risk" (%).
pub const OXYGEN_MILD_RISK_PCT: f64 = 16.0;

// ===== NOISE =====

/// Reference sound level for the exposure limit (dB).
///
/// Source: NIOSH recommended exposure limit, 85 dBA over 8 hours
pub const NOISE_REFERENCE_DB: f64 = 85.0;

/// Permissible exposure at the reference level (hours).
pub const NOISE_REFERENCE_HOURS: f64 = 8.0;

/// Level increase that halves the permissible exposure time (dB).
pub const NOISE_EXCHANGE_RATE_DB: f64 = 3.0;

/// Dose below which exposure is "Safe" (%).
pub const NOISE_DOSE_CAUTION_PCT: f64 = 50.0;

/// Dose at or above which exposure is "High Risk" (%).
pub const NOISE_DOSE_HIGH_RISK_PCT: f64 = 100.0;

/// Dose reported when the permissible time collapses to zero (%).
///
/// Placeholder for "far beyond any safe limit"; it has no calibrated
/// meaning but keeps the report finite.
pub const NOISE_DOSE_SENTINEL_PCT: f64 = 9999.0;

/// Minutes per hour, for converting exposure durations.
pub const MINUTES_PER_HOUR: f64 = 60.0;

// ===== SAFE-ALTITUDE SEARCH =====

/// Altitude increment of the safe-ascent scan (m).
pub const ALTITUDE_SEARCH_STEP_M: f64 = 100.0;

/// Smallest step the scan accepts (m).
pub const ALTITUDE_SEARCH_MIN_STEP_M: f64 = 1.0;

/// Default ceiling of the safe-ascent scan (m).
pub const ALTITUDE_SEARCH_MAX_M: f64 = 6000.0;

// ===== PERSONALIZATION =====

/// Minimum safe oxygen availability for a profile with no risk factors (%).
pub const BASE_MIN_SAFE_OXYGEN_PCT: f64 = 16.0;

/// Age from which the senior adjustment applies (years).
pub const SENIOR_AGE_YEARS: u32 = 60;

/// Added to the oxygen floor for seniors (percentage points).
pub const SENIOR_OXYGEN_BUMP_PCT: f64 = 0.5;

/// Per-condition oxygen floors (%). Only the highest matching floor applies.
pub const CONDITION_OXYGEN_FLOORS: [(&str, f64); 3] = [
    ("asthma", 17.5),
    ("bronchitis", 18.0),
    ("copd", 19.0),
];
