//! Constants for EHSGuard Core
//!
//! Every numeric value the calculators depend on is defined here, with its
//! unit in the name and a note on where it comes from.
//!
//! ## Organization
//!
//! - **Physics**: atmosphere model and heat-index regression coefficients
//! - **Thresholds**: risk-level boundaries, exposure references, search limits
//!   and personalization floors
//!
//! ## Usage Guidelines
//!
//! 1. Always use these constants instead of magic numbers
//! 2. Use descriptive names that include units
//! 3. Reference the standard or approximation the value comes from

/// Atmosphere model and heat-index coefficients.
pub mod physics;

/// Classification boundaries, exposure references and personalization limits.
pub mod thresholds;

// Re-export commonly used constants for convenience
pub use physics::{
    SEA_LEVEL_PRESSURE_HPA, SEA_LEVEL_OXYGEN_PCT,
    BAROMETRIC_SCALE_HEIGHT_M, BAROMETRIC_EXPONENT,
};

pub use thresholds::{
    HEAT_CAUTION_C, HEAT_DANGER_C,
    OXYGEN_SAFE_PCT, OXYGEN_MILD_RISK_PCT,
    NOISE_REFERENCE_DB, NOISE_REFERENCE_HOURS, NOISE_EXCHANGE_RATE_DB,
    NOISE_DOSE_SENTINEL_PCT,
    ALTITUDE_SEARCH_STEP_M, ALTITUDE_SEARCH_MAX_M,
    BASE_MIN_SAFE_OXYGEN_PCT,
};
