//! Common fixtures for integration tests
//!
//! Realistic readings for a handful of places and situations, with the
//! report values they are expected to produce.

#![allow(dead_code)]

use ehsguard_core::{EnvironmentalReading, HealthProfile};

/// Tolerance for comparing values that went through `pow`
pub const TOLERANCE: f64 = 0.011;

/// Assert two floats agree within [`TOLERANCE`]
pub fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() <= TOLERANCE,
        "expected {expected}, got {actual}"
    );
}

/// Assert an optional float is present and agrees within [`TOLERANCE`]
pub fn assert_close_opt(actual: Option<f64>, expected: f64) {
    match actual {
        Some(actual) => assert_close(actual, expected),
        None => panic!("expected {expected}, got None"),
    }
}

/// Named reading used across tests
pub struct Scenario {
    pub name: &'static str,
    pub reading: EnvironmentalReading,
}

/// Standard atmosphere, pleasant indoor climate, quiet room
pub fn sea_level_office() -> Scenario {
    Scenario {
        name: "sea_level_office",
        reading: EnvironmentalReading::new()
            .with_temperature(22.0)
            .with_humidity(45.0)
            .with_pressure(1013.25)
            .with_noise(55.0, 480.0),
    }
}

/// Denver-like altitude (~1600 m), warm afternoon
pub fn mile_high_city() -> Scenario {
    Scenario {
        name: "mile_high_city",
        reading: EnvironmentalReading::new()
            .with_temperature(29.0)
            .with_humidity(60.0)
            .with_pressure(835.0),
    }
}

/// La Paz-like altitude (~3600 m)
pub fn high_plateau() -> Scenario {
    Scenario {
        name: "high_plateau",
        reading: EnvironmentalReading::new()
            .with_temperature(12.0)
            .with_humidity(40.0)
            .with_pressure(650.0),
    }
}

/// Tropical heat wave at sea level
pub fn tropical_heat_wave() -> Scenario {
    Scenario {
        name: "tropical_heat_wave",
        reading: EnvironmentalReading::new()
            .with_temperature(33.0)
            .with_humidity(80.0)
            .with_pressure(1000.0),
    }
}

/// Two hours at a loud concert, no weather data
pub fn concert() -> Scenario {
    Scenario {
        name: "concert",
        reading: EnvironmentalReading::new().with_noise(100.0, 120.0),
    }
}

/// Senior with COPD
pub fn senior_copd() -> HealthProfile {
    HealthProfile::new(Some(72)).with_condition("copd")
}

/// Adult with asthma
pub fn adult_asthma() -> HealthProfile {
    HealthProfile::new(Some(34)).with_condition("asthma")
}

pub fn all_scenarios() -> [Scenario; 5] {
    [
        sea_level_office(),
        mile_high_city(),
        high_plateau(),
        tropical_heat_wave(),
        concert(),
    ]
}
