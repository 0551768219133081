//! Personalized Safe-Ascent Example
//!
//! Shows how a health profile changes the oxygen floor and with it the
//! altitude a person can safely climb to.
//!
//! ## Running the Example
//!
//! ```bash
//! cargo run --example 02_personalized_ascent
//! ```

use ehsguard_core::{
    altitude_from_pressure, assess, AltitudeSearch, Assessor, EnvironmentalReading, HealthProfile,
};

fn main() {
    println!("EHSGuard Personalized Ascent Example");
    println!("====================================\n");

    // Trailhead at roughly 1600 m
    let trailhead = EnvironmentalReading::new().with_pressure(835.0);
    println!(
        "Trailhead altitude: {:.0} m\n",
        altitude_from_pressure(trailhead.pressure_hpa).unwrap_or_default()
    );

    let hikers = [
        ("Healthy adult", HealthProfile::new(Some(30))),
        ("Adult with asthma", HealthProfile::new(Some(30)).with_condition("asthma")),
        ("Senior with asthma", HealthProfile::new(Some(66)).with_condition("asthma")),
        (
            "Senior with COPD and bronchitis",
            HealthProfile::from_csv(Some(71), "copd,bronchitis"),
        ),
    ];

    println!("{:<34} {:>8} {:>12} {:>12}", "Hiker", "O2 floor", "Max safe", "Extra");
    for (name, profile) in &hikers {
        let report = assess(&trailhead, Some(profile));
        println!(
            "{:<34} {:>7}% {:>10.0} m {:>10.0} m",
            name,
            report.min_safe_oxygen_pct,
            report.max_safe_altitude_m.unwrap_or_default(),
            report.extra_safe_ascent_m.unwrap_or_default(),
        );
    }

    // Mountaineering: look further up with a finer step
    let expedition = Assessor::new().with_search(AltitudeSearch::new(9000.0).with_step(50.0));
    let report = expedition.assess(&trailhead, None);
    println!(
        "\nWith a 9000 m ceiling and 50 m steps, a healthy adult tops out at {:.0} m",
        report.max_safe_altitude_m.unwrap_or_default()
    );
}
