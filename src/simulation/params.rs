//! Numerical and physical parameters for the simulation
//!
//! `Parameters` holds validated runtime settings:
//! - fixed step size and time scale (both in seconds),
//! - gravitational constant after applying the configured multiplier,
//! - the catch-up cap and the degenerate-pair separation threshold

/// Physical gravitational constant in m³ kg⁻¹ s⁻²
pub const GRAVITATIONAL_CONSTANT: f64 = 6.674e-11;

#[derive(Debug, Clone, PartialEq)]
pub struct Parameters {
    pub step_duration: f64, // seconds of simulated time per step
    pub time_scale: f64, // simulated seconds per real second of input
    pub gravity_multiplier: f64, // dimensionless scale on GRAVITATIONAL_CONSTANT
    pub max_steps_per_second: f64, // stuck guard cap
    pub min_separation: f64, // pairs closer than this are skipped
    pub period_window: usize, // events averaged for rolling periods
}

impl Parameters {
    /// Effective gravitational constant
    #[allow(non_snake_case)]
    pub fn G(&self) -> f64 {
        GRAVITATIONAL_CONSTANT * self.gravity_multiplier
    }

    pub fn min_separation_sq(&self) -> f64 {
        self.min_separation * self.min_separation
    }
}
