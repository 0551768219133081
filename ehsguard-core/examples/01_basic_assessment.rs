//! Basic Assessment Example
//!
//! Runs one set of ambient readings through the engine and prints the
//! report.
//!
//! ## What You'll Learn
//!
//! - Building an `EnvironmentalReading` from optional sensor values
//! - Producing a `Report` with `assess`
//! - How missing inputs degrade only their own fields
//!
//! ## Running the Example
//!
//! ```bash
//! cargo run --example 01_basic_assessment
//! ```

use ehsguard_core::{assess, EnvironmentalReading, Report};

fn print_report(title: &str, report: &Report) {
    println!("{title}");
    println!("{}", "-".repeat(title.len()));
    println!("  Heat index:        {:?} °C ({})", report.heat_index_c, report.heat_level);
    println!("  Advice:            {}", report.comfort_message);
    println!("  Altitude:          {:?} m", report.altitude_m);
    println!("  Oxygen:            {:?} % ({})", report.oxygen_pct, report.oxygen_status);
    println!("  Max safe altitude: {:?} m", report.max_safe_altitude_m);
    println!("  Extra safe ascent: {:?} m", report.extra_safe_ascent_m);
    println!("  Noise dose:        {:?} % ({})", report.noise_dose_pct, report.noise_status);
    println!("  Noise advice:      {}", report.noise_message);
    println!("  Oxygen floor:      {} %", report.min_safe_oxygen_pct);
    println!();
}

fn main() {
    println!("EHSGuard Basic Assessment Example");
    println!("=================================\n");

    // Full set of readings: hot afternoon in a busy workshop
    let workshop = EnvironmentalReading::new()
        .with_temperature(31.0)
        .with_humidity(65.0)
        .with_pressure(1008.0)
        .with_noise(94.0, 45.0);
    print_report("Workshop, all sensors", &assess(&workshop, None));

    // Weather lookup failed: only the noise meter reported
    let noise_only = EnvironmentalReading::new().with_noise(94.0, 45.0);
    print_report("Workshop, weather unavailable", &assess(&noise_only, None));

    // Garbage from a faulty sensor is treated as unknown, never a crash
    let faulty = EnvironmentalReading {
        temperature_c: Some(f64::NAN),
        humidity_pct: Some(65.0),
        pressure_hpa: Some(0.0),
        ..EnvironmentalReading::new()
    };
    print_report("Faulty sensors", &assess(&faulty, None));
}
