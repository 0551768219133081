//! Integration tests for full report assembly
//!
//! Runs realistic readings and profiles through `assess` and checks the
//! flat report end to end.

mod common;

use ehsguard_core::{
    assess, find_safe_altitude_limit, heat::HEAT_UNAVAILABLE_MESSAGE, min_safe_oxygen,
    noise::NOISE_UNAVAILABLE_MESSAGE, EnvironmentalReading, HealthProfile, HeatLevel, NoiseStatus,
    OxygenStatus,
};

use common::{assert_close_opt, Scenario};

#[test]
fn test_hot_humid_input_is_danger() {
    let reading = EnvironmentalReading::new().with_temperature(35.0).with_humidity(70.0);
    let report = assess(&reading, None);

    assert_eq!(report.heat_level, HeatLevel::Danger);
    assert_eq!(
        report.comfort_message,
        "High risk of heat stress! Stay indoors and drink plenty of water."
    );
}

#[test]
fn test_700_hpa_is_high_risk() {
    let reading = EnvironmentalReading::new().with_pressure(700.0);
    let report = assess(&reading, None);

    assert_close_opt(report.altitude_m, 3012.62);
    assert_eq!(report.oxygen_pct, Some(14.51));
    assert_eq!(report.oxygen_status, OxygenStatus::HighRisk);
}

#[test]
fn test_sea_level_office() {
    let Scenario { reading, .. } = common::sea_level_office();
    let report = assess(&reading, None);

    assert_eq!(report.heat_index_c, Some(25.01));
    assert_eq!(report.heat_level, HeatLevel::Safe);
    assert_eq!(report.altitude_m, Some(0.0));
    assert_eq!(report.oxygen_pct, Some(21.0));
    assert_eq!(report.oxygen_status, OxygenStatus::Safe);
    assert_eq!(report.max_safe_altitude_m, Some(2200.0));
    assert_eq!(report.extra_safe_ascent_m, Some(2200.0));
    assert_eq!(report.noise_dose_pct, Some(100.0));
    assert_eq!(report.noise_status, NoiseStatus::HighRisk);
}

#[test]
fn test_mile_high_city() {
    let Scenario { reading, .. } = common::mile_high_city();
    let report = assess(&reading, None);

    assert_eq!(report.heat_level, HeatLevel::Caution);
    assert_close_opt(report.altitude_m, 1602.53);
    assert_eq!(report.oxygen_pct, Some(17.31));
    assert_eq!(report.oxygen_status, OxygenStatus::MildRisk);
    assert_close_opt(report.max_safe_altitude_m, 2202.53);
    assert_close_opt(report.extra_safe_ascent_m, 600.0);
}

#[test]
fn test_profile_changes_only_ascent_fields() {
    let Scenario { reading, .. } = common::tropical_heat_wave();
    let anonymous = assess(&reading, None);
    let bronchitis = HealthProfile::new(Some(45)).with_condition("bronchitis");
    let personal = assess(&reading, Some(&bronchitis));

    assert_eq!(personal.min_safe_oxygen_pct, 18.0);
    assert_close_opt(anonymous.extra_safe_ascent_m, 2100.0);
    assert_close_opt(personal.extra_safe_ascent_m, 1100.0);

    // Heat, oxygen and noise do not depend on the profile
    assert_eq!(anonymous.heat_index_c, personal.heat_index_c);
    assert_eq!(anonymous.heat_level, HeatLevel::Danger);
    assert_eq!(anonymous.oxygen_pct, personal.oxygen_pct);
    assert_eq!(anonymous.oxygen_status, personal.oxygen_status);
    assert_eq!(anonymous.noise_status, personal.noise_status);
}

#[test]
fn test_senior_copd_at_altitude_has_no_headroom() {
    let Scenario { reading, .. } = common::high_plateau();
    let report = assess(&reading, Some(&common::senior_copd()));

    assert_eq!(report.min_safe_oxygen_pct, 19.5);
    assert_eq!(report.oxygen_status, OxygenStatus::HighRisk);
    // Start is already below the floor; it is still reported as reached
    assert_eq!(report.max_safe_altitude_m, report.altitude_m);
    assert_eq!(report.extra_safe_ascent_m, Some(0.0));
}

#[test]
fn test_concert_without_weather() {
    let Scenario { reading, .. } = common::concert();
    let report = assess(&reading, Some(&common::adult_asthma()));

    // 100 dB allows 15 minutes; two hours is 8x the limit
    assert_eq!(report.noise_dose_pct, Some(800.0));
    assert_eq!(report.noise_status, NoiseStatus::HighRisk);

    assert_eq!(report.heat_index_c, None);
    assert_eq!(report.comfort_message, HEAT_UNAVAILABLE_MESSAGE);
    assert_eq!(report.altitude_m, None);
    assert_eq!(report.max_safe_altitude_m, None);
    assert_eq!(report.min_safe_oxygen_pct, 17.5);
}

#[test]
fn test_invalid_numbers_degrade_single_fields() {
    let reading = EnvironmentalReading {
        temperature_c: Some(f64::NAN),
        humidity_pct: Some(50.0),
        pressure_hpa: Some(-3.0),
        noise_db: Some(f64::INFINITY),
        noise_minutes: Some(30.0),
    };
    let report = assess(&reading, None);

    assert_eq!(report.heat_level, HeatLevel::Unknown);
    assert_eq!(report.altitude_m, None);
    assert_eq!(report.oxygen_status, OxygenStatus::Unknown);
    assert_eq!(report.noise_status, NoiseStatus::Unknown);
    assert_eq!(report.noise_message, NOISE_UNAVAILABLE_MESSAGE);
    assert_eq!(report.min_safe_oxygen_pct, 16.0);
}

#[test]
fn test_every_scenario_reports_finite_numbers() {
    for scenario in common::all_scenarios() {
        let report = assess(&scenario.reading, Some(&common::senior_copd()));
        let fields = [
            report.heat_index_c,
            report.altitude_m,
            report.oxygen_pct,
            report.max_safe_altitude_m,
            report.extra_safe_ascent_m,
            report.noise_dose_pct,
        ];
        for value in fields.into_iter().flatten() {
            assert!(value.is_finite(), "{}: non-finite value {}", scenario.name, value);
        }
    }
}

#[test]
fn test_documented_personalization_values() {
    assert_eq!(min_safe_oxygen(None, [""; 0]), 16.0);
    assert_eq!(min_safe_oxygen(Some(65), ["asthma"]), 18.0);
    assert_eq!(min_safe_oxygen(Some(30), ["asthma", "copd"]), 19.0);
}

#[test]
fn test_search_floor_equal_to_sea_level_oxygen() {
    // 21% is exactly sea-level oxygen: the start passes, the next step does not
    assert_eq!(find_safe_altitude_limit(Some(0.0), 21.0), Some(0.0));
}

#[cfg(feature = "serde")]
#[test]
fn test_report_serializes_flat() {
    let reading = EnvironmentalReading::new().with_pressure(700.0);
    let report = assess(&reading, None);
    let json = serde_json::to_value(&report).unwrap();

    assert_eq!(json["oxygen_status"], "High Risk");
    assert_eq!(json["heat_level"], "Unknown");
    assert!(json["heat_index_c"].is_null());
    assert_eq!(json["oxygen_pct"], 14.51);
    assert_eq!(json["min_safe_oxygen_pct"], 16.0);
    assert_eq!(json["noise_message"], NOISE_UNAVAILABLE_MESSAGE);
}

#[cfg(feature = "serde")]
#[test]
fn test_reading_deserializes_with_missing_fields() {
    let reading: EnvironmentalReading =
        serde_json::from_str(r#"{"temperature_c": 35.0, "humidity_pct": 70.0}"#).unwrap();

    assert_eq!(reading.pressure_hpa, None);
    assert_eq!(assess(&reading, None).heat_level, HeatLevel::Danger);
}
