//! Error Types for Health Profile Construction
//!
//! ## Design Philosophy
//!
//! The calculators in this crate never fail: a missing or non-finite input
//! degrades the affected metric to `None` (numbers) or `Unknown` (risk
//! levels). The only fallible API is building a [`HealthProfile`], whose
//! condition set lives in fixed-capacity storage.
//!
//! Like the calculators, the error type is kept small and `Copy`, with only
//! `&'static str` payloads, so it can be returned from `no_std` code and
//! stored without allocation.
//!
//! ```rust
//! use ehsguard_core::{HealthProfile, ProfileError};
//!
//! let mut profile = HealthProfile::new(Some(42));
//! match profile.add_condition("asthma") {
//!     Ok(_) => {}
//!     Err(ProfileError::TagTooLong { .. }) => { /* reject the form field */ }
//!     Err(ProfileError::TooManyConditions { .. }) => { /* ignore the rest */ }
//! }
//! ```
//!
//! [`HealthProfile`]: crate::profile::HealthProfile

use thiserror_no_std::Error;

/// Result type for profile operations
pub type ProfileResult<T> = Result<T, ProfileError>;

/// Health profile errors
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileError {
    /// Condition tag does not fit the fixed-size tag storage
    #[error("Condition tag longer than {max} bytes")]
    TagTooLong {
        /// Maximum tag length in bytes
        max: usize,
    },

    /// Condition set is already at capacity
    #[error("Too many conditions: capacity is {capacity}")]
    TooManyConditions {
        /// Maximum number of distinct conditions per profile
        capacity: usize,
    },
}

#[cfg(feature = "defmt")]
impl defmt::Format for ProfileError {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            Self::TagTooLong { max } => {
                defmt::write!(fmt, "Condition tag longer than {} bytes", max)
            }
            Self::TooManyConditions { capacity } => {
                defmt::write!(fmt, "Too many conditions (capacity {})", capacity)
            }
        }
    }
}
