//! Common numeric helpers
//!
//! Pure functions used across the calculators. Rounding goes through `libm`
//! so the crate keeps working without `std`.

/// Round to two decimal places, half away from zero
///
/// Values too large to scale by 100 have no fractional part left and are
/// returned unchanged.
pub fn round2(value: f64) -> f64 {
    let scaled = value * 100.0;
    if !scaled.is_finite() {
        return value;
    }
    libm::round(scaled) / 100.0
}

/// Round an optional value to two decimal places
pub fn round2_opt(value: Option<f64>) -> Option<f64> {
    value.map(round2)
}

/// Clamp a value to `[min, max]`
pub fn clamp(value: f64, min: f64, max: f64) -> f64 {
    if value < min {
        min
    } else if value > max {
        max
    } else {
        value
    }
}

/// Keep a computed value only if it is finite
pub fn finite(value: f64) -> Option<f64> {
    if value.is_finite() {
        Some(value)
    } else {
        None
    }
}
