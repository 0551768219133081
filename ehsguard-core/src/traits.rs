//! Core traits shared by the calculators
//!
//! Keep them simple - every calculator takes primitive numbers and returns a
//! value, so the only shared behavior is deciding what counts as a usable
//! number.

/// Trait for values that can be validated
pub trait Validatable {
    /// Check if the value is physically valid (not NaN, infinite, etc)
    fn is_valid(&self) -> bool;
}

impl Validatable for f32 {
    fn is_valid(&self) -> bool {
        self.is_finite()
    }
}

impl Validatable for f64 {
    fn is_valid(&self) -> bool {
        self.is_finite()
    }
}

/// Extension for optional readings: absent and invalid collapse to `None`
pub trait ValidReading {
    /// The reading if present and valid
    fn valid(self) -> Option<f64>;
}

impl ValidReading for Option<f64> {
    fn valid(self) -> Option<f64> {
        self.filter(Validatable::is_valid)
    }
}
