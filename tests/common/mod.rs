#![allow(dead_code)]

use orbsim::{
    BodyConfig, IntegratorConfig, ScenarioConfig, SeedingConfig, SimulationSettings, TimeRange,
    TrackerConfig, GRAVITATIONAL_CONSTANT,
};

/// Gravity multiplier that makes the effective constant 1 (natural units)
pub const UNIT_G: f64 = 1.0 / GRAVITATIONAL_CONSTANT;

/// Settings in natural units with a tiny degenerate-pair threshold
pub fn unit_settings(step: f64, integrator: IntegratorConfig) -> SimulationSettings {
    let mut s = SimulationSettings::with_step(TimeRange::seconds(step));
    s.gravity_multiplier = UNIT_G;
    s.integrator = integrator;
    s.min_separation = 1e-6;
    s
}

/// Period of a circular orbit of radius `r` around total mass `m` with G = `g`
pub fn circular_period(g: f64, m: f64, r: f64) -> f64 {
    2.0 * std::f64::consts::PI * (r * r * r / (g * m)).sqrt()
}

/// Primary of mass 1 at the origin, test particle on +z at distance `r`,
/// seeded onto a circular orbit
pub fn two_body_orbit(r: f64, steps_per_orbit: usize, integrator: IntegratorConfig) -> ScenarioConfig {
    let g = GRAVITATIONAL_CONSTANT * UNIT_G;
    let period = circular_period(g, 1.0 + 1e-12, r);
    let mut simulation = unit_settings(period / steps_per_orbit as f64, integrator);
    simulation.seeding = SeedingConfig::AllPairs;

    ScenarioConfig {
        simulation,
        bodies: vec![
            BodyConfig::at("primary", 1.0, [0.0, 0.0, 0.0]).without_seeding(),
            BodyConfig::at("particle", 1e-12, [0.0, 0.0, r]),
        ],
        trackers: vec![TrackerConfig::new("particle", "primary")],
    }
}

/// Three bodies with explicit velocities and no seeding
pub fn three_body(integrator: IntegratorConfig) -> ScenarioConfig {
    ScenarioConfig {
        simulation: unit_settings(1e-3, integrator),
        bodies: vec![
            BodyConfig::at("a", 3.0, [0.0, 0.0, 0.0]).with_velocity([0.05, 0.0, -0.1]),
            BodyConfig::at("b", 1.0, [4.0, 0.0, 0.0]).with_velocity([0.0, 0.8, 0.0]),
            BodyConfig::at("c", 2.0, [-3.0, 2.0, 1.0]).with_velocity([0.1, -0.5, 0.2]),
        ],
        trackers: vec![],
    }
}
