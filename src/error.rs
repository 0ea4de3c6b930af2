//! Error types for scenario configuration and the running simulation.
//!
//! Configuration problems are fatal and surface from `initialize`; a stuck
//! catch-up loop surfaces from `advance`. Degenerate force pairs are never
//! errors (they are skipped inside the force pass).

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("scenario has no bodies")]
    EmptyBodySet,

    #[error("body `{name}` has non-positive mass {mass}")]
    NonPositiveMass { name: String, mass: f64 },

    #[error("scenario defines {found} bodies but {expected} body slots were declared")]
    BodyCountMismatch { expected: usize, found: usize },

    #[error("body name `{0}` is used more than once")]
    DuplicateBodyName(String),

    #[error("body `{body}` references unknown body `{reference}`")]
    UnknownReference { body: String, reference: String },

    #[error("body `{body}` references `{reference}`, which is defined later in the scenario")]
    ReferenceOrder { body: String, reference: String },

    #[error("body `{0}` references itself")]
    SelfReference(String),

    #[error("body `{0}` needs either `position` or `relative_to`")]
    MissingPosition(String),

    #[error("invalid value {value} for `{name}`")]
    InvalidParameter { name: &'static str, value: f64 },

    #[error("axis `{0}` must be a non-zero vector")]
    ZeroAxis(&'static str),

    #[error("body `{name}` has a non-finite {field}")]
    NonFiniteState { name: String, field: &'static str },

    #[error("body `{0}` names an `orbits` parent, which only hierarchy seeding uses")]
    OrbitsWithoutHierarchy(String),

    #[error("tracker `{tracker}` names unknown body `{body}`")]
    UnknownTrackedBody { tracker: String, body: String },
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum SimulationError {
    #[error(
        "simulation is stuck: {steps_needed} steps needed for {elapsed_real_seconds} s of input \
         (cap {max_steps}, time scale {time_scale}, step duration {step_duration} s); \
         lower the time scale or increase the step duration"
    )]
    Stuck {
        steps_needed: u64,
        max_steps: f64,
        elapsed_real_seconds: f64,
        time_scale: f64,
        step_duration: f64,
    },

    #[error("elapsed real time must be finite and non-negative, got {0}")]
    InvalidElapsed(f64),
}
