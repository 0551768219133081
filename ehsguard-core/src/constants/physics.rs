//! Physical Constants for EHSGuard
//!
//! Atmosphere model and regression coefficients shared by the heat and
//! altitude calculators. The atmosphere values describe the simplified
//! barometric formula `h = 44330 × (1 − (P/P₀)^(1/5.255))`, which is the
//! troposphere form of the International Standard Atmosphere with the
//! lapse-rate terms folded into two constants.

// ===== ATMOSPHERE =====

/// Standard atmospheric pressure at sea level (hPa/mbar).
///
/// Reference pressure for altitude estimation and oxygen scaling.
///
/// Source: International Standard Atmosphere (ISA)
pub const SEA_LEVEL_PRESSURE_HPA: f64 = 1013.25;

/// Scale factor of the simplified barometric formula (m).
///
/// Equals T₀/L = 288.15 K / 0.0065 K/m, rounded. Altitudes at or above this
/// value have no defined pressure in the model.
///
/// Source: Barometric formula, troposphere (0-11km)
pub const BAROMETRIC_SCALE_HEIGHT_M: f64 = 44330.0;

/// Exponent of the simplified barometric formula (dimensionless).
///
/// Equals g×M/(R×L); its reciprocal (~0.1903) is used for pressure→altitude.
pub const BAROMETRIC_EXPONENT: f64 = 5.255;

/// Oxygen fraction of dry air at sea level (%).
///
/// Oxygen availability is scaled linearly from this value by the pressure
/// ratio. This is an awareness approximation, not a partial-pressure model.
pub const SEA_LEVEL_OXYGEN_PCT: f64 = 21.0;

// ===== HEAT INDEX (NOAA Rothfusz regression, °F) =====

/// Regression coefficients `c1..c9` for
/// `HI = c1 + c2·T + c3·R + c4·T·R + c5·T² + c6·R² + c7·T²·R + c8·T·R² + c9·T²·R²`
/// with T in °F and R in % relative humidity.
///
/// The low-humidity and high-humidity adjustment terms are not applied.
///
/// Source: NOAA National Weather Service, Technical Attachment SR 90-23
pub const HEAT_INDEX_COEFFICIENTS: [f64; 9] = [
    -42.379,
    2.04901523,
    10.14333127,
    -0.22475541,
    -0.00683783,
    -0.05481717,
    0.00122874,
    0.00085282,
    -0.00000199,
];

// ===== TEMPERATURE CONVERSION =====

/// Offset between the Fahrenheit and Celsius scales (°F at 0°C).
pub const FAHRENHEIT_OFFSET: f64 = 32.0;
