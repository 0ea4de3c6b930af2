pub mod simulation;
pub mod configuration;
pub mod benchmark;
pub mod error;

pub use simulation::states::{Body, BodyId, System, NVec3};
pub use simulation::forces::{gravitational_force, NewtonianGravity, PairCount};
pub use simulation::integrator::{euler_step, verlet_step, integrate_step, prime_accelerations};
pub use simulation::seeding::{circular_velocity, seed_all_pairs, seed_hierarchy, SeedPlan};
pub use simulation::orbits::{crossed_upward, rolling_period, OrbitalEventLog, PeriodTracker};
pub use simulation::clock::SimulationClock;
pub use simulation::params::{Parameters, GRAVITATIONAL_CONSTANT};
pub use simulation::engine::Engine;
pub use simulation::scenario::Scenario;
pub use simulation::stepper::{BodySnapshot, FrameResult, Simulation, Snapshot, TrackerSnapshot};

pub use configuration::config::{
    BodyConfig, IntegratorConfig, ScenarioConfig, SeedingConfig, SimulationSettings, TimeRange,
    TimeUnit, TrackerConfig,
};

pub use error::{ConfigError, SimulationError};

pub use benchmark::benchmark::{bench_curve, bench_integrators, BenchRow};
