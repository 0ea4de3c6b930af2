//! Configuration types for loading simulation scenarios from YAML.
//!
//! This module defines a thin, `serde`-deserializable representation of a
//! scenario. A scenario consists of:
//!
//! - [`SimulationSettings`] – integrator, step size, time scale, safety caps
//! - [`BodyConfig`]         – mass and initial state for each body
//! - [`TrackerConfig`]      – body pairs whose orbital period is measured
//! - [`ScenarioConfig`]     – top-level wrapper used to load a scenario from YAML
//!
//! # YAML format
//! A Sun/Earth/Moon scenario matching these types:
//!
//! ```yaml
//! simulation:
//!   gravity_multiplier: 1.0
//!   time_scale: { time: 10, unit: days }    # 10 simulated days per real second
//!   step_duration: { time: 60, unit: seconds }
//!   integrator: velocity_verlet              # or "euler"
//!   seeding: hierarchy                       # or "all_pairs"
//!
//! bodies:
//!   - name: Sun
//!     mass: 1.989e30
//!     position: [0.0, 0.0, 0.0]
//!     seed_velocity: false
//!   - name: Earth
//!     mass: 5.972e24
//!     relative_to: Sun
//!     offset: [0.0, 0.0, 1.496e11]
//!     orbits: Sun
//!   - name: Moon
//!     mass: 7.342e22
//!     relative_to: Earth
//!     offset: [0.0, 0.0, 3.844e8]
//!     orbits: Earth
//!
//! trackers:
//!   - body: Earth
//!     reference: Sun
//! ```
//!
//! The engine maps this configuration into its runtime scenario in
//! [`crate::simulation::scenario`], where every value is validated.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Unit of a [`TimeRange`]. Months are 30 days and years are 365 days.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum TimeUnit {
    #[default]
    Seconds,
    Hours,
    Days,
    Months,
    Years,
}

impl TimeUnit {
    pub fn seconds(self) -> f64 {
        match self {
            TimeUnit::Seconds => 1.0,
            TimeUnit::Hours => 60.0 * 60.0,
            TimeUnit::Days => 60.0 * 60.0 * 24.0,
            TimeUnit::Months => 60.0 * 60.0 * 24.0 * 30.0,
            TimeUnit::Years => 60.0 * 60.0 * 24.0 * 365.0,
        }
    }
}

/// A span of time written as a value and a unit, e.g. `{ time: 3, unit: days }`
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq)]
pub struct TimeRange {
    pub time: f64,
    #[serde(default)]
    pub unit: TimeUnit,
}

impl TimeRange {
    pub fn new(time: f64, unit: TimeUnit) -> Self {
        Self { time, unit }
    }

    pub fn seconds(time: f64) -> Self {
        Self::new(time, TimeUnit::Seconds)
    }

    /// Length of the span in seconds
    pub fn get(&self) -> f64 {
        self.time * self.unit.seconds()
    }
}

/// Which integrator the stepper uses
/// `integrator: "euler"` or `integrator: "velocity_verlet"`
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IntegratorConfig {
    #[serde(rename = "euler")] // Explicit (semi-implicit) Euler. First order, drifts on long runs
    Euler,

    #[default]
    #[serde(rename = "velocity_verlet", alias = "leapfrog")] // Velocity Verlet. Second order, symplectic
    VelocityVerlet,
}

/// How initial velocities are seeded for bodies without an explicit velocity
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum SeedingConfig {
    /// Every unordered pair contributes a circular-orbit speed to the lighter body
    #[default]
    AllPairs,
    /// Each body orbits only the parent named by its `orbits` field
    Hierarchy,
}

fn default_gravity_multiplier() -> f64 {
    1.0
}

fn default_time_scale() -> TimeRange {
    TimeRange::seconds(1.0)
}

fn default_up() -> [f64; 3] {
    [0.0, 1.0, 0.0]
}

fn default_max_steps_per_second() -> f64 {
    100_000_000.0
}

fn default_min_separation() -> f64 {
    1.0
}

fn default_period_window() -> usize {
    100
}

fn default_plane_normal() -> [f64; 3] {
    [0.0, 0.0, 1.0]
}

fn default_true() -> bool {
    true
}

/// Global numerical and physical parameters for a scenario
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct SimulationSettings {
    #[serde(default = "default_gravity_multiplier")]
    pub gravity_multiplier: f64, // scale applied to the physical constant 6.674e-11
    #[serde(default = "default_time_scale")]
    pub time_scale: TimeRange, // simulated seconds per real second of input
    pub step_duration: TimeRange, // fixed integration step
    #[serde(default)]
    pub integrator: IntegratorConfig,
    #[serde(default)]
    pub seeding: SeedingConfig,
    #[serde(default = "default_up")]
    pub up: [f64; 3], // axis used to build the tangent for velocity seeding
    #[serde(default = "default_max_steps_per_second")]
    pub max_steps_per_second: f64, // catch-up cap per real second of input
    #[serde(default = "default_min_separation")]
    pub min_separation: f64, // meters; closer pairs are skipped in the force pass
    #[serde(default = "default_period_window")]
    pub period_window: usize, // events averaged for the rolling orbital period
    #[serde(default)]
    pub body_slots: Option<usize>, // expected body count, if the caller pre-allocated slots
}

impl SimulationSettings {
    /// Settings with the given step and every other field at its default
    pub fn with_step(step_duration: TimeRange) -> Self {
        Self {
            gravity_multiplier: default_gravity_multiplier(),
            time_scale: default_time_scale(),
            step_duration,
            integrator: IntegratorConfig::default(),
            seeding: SeedingConfig::default(),
            up: default_up(),
            max_steps_per_second: default_max_steps_per_second(),
            min_separation: default_min_separation(),
            period_window: default_period_window(),
            body_slots: None,
        }
    }
}

/// Configuration for a single body's initial state
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct BodyConfig {
    pub name: String,
    pub mass: f64, // kg
    #[serde(default)]
    pub position: Option<[f64; 3]>, // absolute position in meters
    #[serde(default)]
    pub relative_to: Option<String>, // place relative to an earlier body...
    #[serde(default)]
    pub offset: [f64; 3], // ...at this offset in meters
    #[serde(default)]
    pub velocity: Option<[f64; 3]>, // explicit initial velocity, disables seeding for this body
    #[serde(default = "default_true")]
    pub seed_velocity: bool, // receive a seeded orbital velocity when no explicit one is given
    #[serde(default)]
    pub orbits: Option<String>, // parent body for hierarchy seeding
}

impl BodyConfig {
    /// Body at an absolute position that will receive a seeded velocity
    pub fn at(name: impl Into<String>, mass: f64, position: [f64; 3]) -> Self {
        Self {
            name: name.into(),
            mass,
            position: Some(position),
            relative_to: None,
            offset: [0.0; 3],
            velocity: None,
            seed_velocity: true,
            orbits: None,
        }
    }

    pub fn with_velocity(mut self, velocity: [f64; 3]) -> Self {
        self.velocity = Some(velocity);
        self
    }

    pub fn without_seeding(mut self) -> Self {
        self.seed_velocity = false;
        self
    }

    pub fn orbiting(mut self, parent: impl Into<String>) -> Self {
        self.orbits = Some(parent.into());
        self
    }
}

/// A (tracked, reference) pair whose plane crossings are logged
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct TrackerConfig {
    #[serde(default)]
    pub name: Option<String>, // defaults to the tracked body's name
    pub body: String,
    pub reference: String,
    #[serde(default = "default_plane_normal")]
    pub plane_normal: [f64; 3],
}

impl TrackerConfig {
    pub fn new(body: impl Into<String>, reference: impl Into<String>) -> Self {
        Self {
            name: None,
            body: body.into(),
            reference: reference.into(),
            plane_normal: default_plane_normal(),
        }
    }
}

/// Top-level scenario configuration loaded from YAML
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct ScenarioConfig {
    pub simulation: SimulationSettings,
    pub bodies: Vec<BodyConfig>,
    #[serde(default)]
    pub trackers: Vec<TrackerConfig>,
}

impl ScenarioConfig {
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_reader(reader)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let file = File::open(path.as_ref())?;
        Self::from_reader(BufReader::new(file))
    }
}
