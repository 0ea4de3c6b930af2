//! The simulation core.
//!
//! [`Simulation`] exclusively owns the body set, the clock and the period
//! trackers. A driver calls [`Simulation::advance`] once per display frame
//! with the elapsed real time; the call runs the whole fixed-step catch-up
//! loop before returning, after which the state can be read for
//! presentation. Nothing here is shared or global, and the core is not
//! meant to be driven from several threads at once.

use serde::Serialize;

use crate::configuration::config::{ScenarioConfig, TimeRange};
use crate::error::{ConfigError, SimulationError};
use crate::simulation::clock::SimulationClock;
use crate::simulation::engine::Engine;
use crate::simulation::forces::NewtonianGravity;
use crate::simulation::integrator::{integrate_step, prime_accelerations};
use crate::simulation::orbits::{OrbitalEventLog, PeriodTracker};
use crate::simulation::params::Parameters;
use crate::simulation::scenario::{non_negative, positive, Scenario};
use crate::simulation::states::{Body, BodyId, System};

/// What one `advance` call did
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FrameResult {
    pub steps: u64, // fixed steps run during this call
    pub real_time: f64, // current simulated real time
    pub last_step_time: f64, // end time of the latest completed step
    pub paused: bool, // paused by the caller or stalled by the stuck guard
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BodySnapshot {
    pub id: BodyId,
    pub name: String,
    pub mass: f64,
    pub position: [f64; 3],
    pub velocity: [f64; 3],
    pub acceleration: [f64; 3],
}

impl From<&Body> for BodySnapshot {
    fn from(b: &Body) -> Self {
        Self {
            id: b.id,
            name: b.name.clone(),
            mass: b.mass,
            position: b.x.into(),
            velocity: b.v.into(),
            acceleration: b.a.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrackerSnapshot {
    pub name: String,
    pub events: OrbitalEventLog,
    pub period: Option<f64>, // rolling average over the configured window
}

/// Consistent copy of everything presentation code reads after a frame
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub real_time: f64,
    pub last_step_time: f64,
    pub steps_taken: u64,
    pub paused: bool,
    pub stalled: bool,
    pub bodies: Vec<BodySnapshot>,
    pub trackers: Vec<TrackerSnapshot>,
}

#[derive(Debug, Clone)]
pub struct Simulation {
    config: ScenarioConfig,
    engine: Engine,
    parameters: Parameters,
    gravity: NewtonianGravity,
    system: System,
    initial: System,
    clock: SimulationClock,
    trackers: Vec<PeriodTracker>,
    paused: bool,
    stalled: bool,
}

impl Simulation {
    /// Build a simulation from a scenario; fails on any configuration error
    pub fn new(config: &ScenarioConfig) -> Result<Self, ConfigError> {
        let Scenario {
            engine,
            parameters,
            mut system,
            trackers,
        } = Scenario::build_scenario(config)?;

        let gravity = NewtonianGravity {
            G: parameters.G(),
            min_separation_sq: parameters.min_separation_sq(),
        };
        prime_accelerations(&mut system, &gravity);
        let clock = SimulationClock::new(parameters.step_duration);

        tracing::info!(
            bodies = system.len(),
            integrator = ?engine.integrator,
            step_duration = parameters.step_duration,
            time_scale = parameters.time_scale,
            "simulation initialized"
        );

        Ok(Self {
            config: config.clone(),
            engine,
            parameters,
            gravity,
            initial: system.clone(),
            system,
            clock,
            trackers,
            paused: false,
            stalled: false,
        })
    }

    /// Replace the whole simulation with a freshly built one.
    /// On error the current state is left untouched.
    pub fn initialize(&mut self, config: &ScenarioConfig) -> Result<(), ConfigError> {
        *self = Self::new(config)?;
        Ok(())
    }

    /// Re-run initialization with the current configuration, including any
    /// runtime changes made through the setters
    pub fn restart(&mut self) -> Result<(), ConfigError> {
        let config = self.config.clone();
        self.initialize(&config)
    }

    /// Advance real time by `elapsed_real_seconds * time_scale` and run every
    /// whole step that is now due.
    ///
    /// If the due steps exceed `elapsed_real_seconds * max_steps_per_second`,
    /// or the scaled time overflows, nothing is stepped, the time advance is
    /// rolled back, the simulation is marked stalled and
    /// [`SimulationError::Stuck`] is returned. A stalled or
    /// paused simulation ignores further ticks until it is re-initialized or
    /// resumed.
    pub fn advance(&mut self, elapsed_real_seconds: f64) -> Result<FrameResult, SimulationError> {
        if !elapsed_real_seconds.is_finite() || elapsed_real_seconds < 0.0 {
            return Err(SimulationError::InvalidElapsed(elapsed_real_seconds));
        }
        if self.paused || self.stalled {
            return Ok(self.frame(0));
        }

        let advance = elapsed_real_seconds * self.parameters.time_scale;
        let previous = self.clock.current_real_time();
        self.clock.accumulate(advance);

        // an overflowed clock or a saturated count can never be drained
        let steps_needed = self.clock.steps_needed();
        let max_steps = elapsed_real_seconds * self.parameters.max_steps_per_second;
        let unbounded = !self.clock.current_real_time().is_finite() || steps_needed == u64::MAX;
        if steps_needed > 0 && (unbounded || steps_needed as f64 > max_steps) {
            self.clock.restore(previous);
            self.stalled = true;
            let err = SimulationError::Stuck {
                steps_needed,
                max_steps,
                elapsed_real_seconds,
                time_scale: self.parameters.time_scale,
                step_duration: self.parameters.step_duration,
            };
            tracing::error!(%err, "catch-up aborted");
            return Err(err);
        }

        let mut steps = 0;
        while self.clock.has_pending_step() {
            self.step_once();
            steps += 1;
        }

        tracing::debug!(
            steps,
            real_time = self.clock.current_real_time(),
            last_step_time = self.clock.last_step_time(),
            "frame advanced"
        );

        Ok(self.frame(steps))
    }

    /// One fixed step: integrate, then check every tracker for a crossing
    fn step_once(&mut self) {
        let dt = self.clock.step_duration();

        for tracker in self.trackers.iter_mut() {
            tracker.begin_step(&self.system.bodies);
        }

        integrate_step(self.engine.integrator, &mut self.system, &self.gravity, dt);

        let step_end = self.clock.next_step_end();
        for tracker in self.trackers.iter_mut() {
            tracker.end_step(&self.system.bodies, step_end);
        }

        self.clock.complete_step();
    }

    fn frame(&self, steps: u64) -> FrameResult {
        FrameResult {
            steps,
            real_time: self.clock.current_real_time(),
            last_step_time: self.clock.last_step_time(),
            paused: self.is_paused(),
        }
    }

    pub fn pause(&mut self) {
        self.paused = true;
    }

    pub fn resume(&mut self) {
        self.paused = false;
    }

    /// Change the time scale. Takes effect on the next tick and survives `restart`.
    pub fn set_time_scale(&mut self, time_scale: TimeRange) -> Result<(), ConfigError> {
        self.parameters.time_scale = positive("time_scale", time_scale.get())?;
        self.config.simulation.time_scale = time_scale;
        Ok(())
    }

    /// Change the gravity multiplier. Takes effect on the next step and survives `restart`.
    pub fn set_gravity_multiplier(&mut self, multiplier: f64) -> Result<(), ConfigError> {
        self.parameters.gravity_multiplier = non_negative("gravity_multiplier", multiplier)?;
        self.gravity.G = self.parameters.G();
        // stored Verlet accelerations must match the new constant
        prime_accelerations(&mut self.system, &self.gravity);
        self.config.simulation.gravity_multiplier = multiplier;
        Ok(())
    }

    /// True when paused by the caller or stalled by the stuck guard
    pub fn is_paused(&self) -> bool {
        self.paused || self.stalled
    }

    pub fn is_stalled(&self) -> bool {
        self.stalled
    }

    pub fn config(&self) -> &ScenarioConfig {
        &self.config
    }

    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    pub fn parameters(&self) -> &Parameters {
        &self.parameters
    }

    pub fn gravity(&self) -> &NewtonianGravity {
        &self.gravity
    }

    pub fn system(&self) -> &System {
        &self.system
    }

    pub fn bodies(&self) -> &[Body] {
        &self.system.bodies
    }

    pub fn body(&self, id: BodyId) -> Option<&Body> {
        self.system.get(id)
    }

    pub fn body_by_name(&self, name: &str) -> Option<&Body> {
        self.system.find(name)
    }

    /// Bodies as they were right after initialization (seeded velocities, primed accelerations)
    pub fn initial_bodies(&self) -> &[Body] {
        &self.initial.bodies
    }

    pub fn real_time(&self) -> f64 {
        self.clock.current_real_time()
    }

    pub fn last_step_time(&self) -> f64 {
        self.clock.last_step_time()
    }

    pub fn steps_taken(&self) -> u64 {
        self.clock.steps_taken()
    }

    pub fn clock(&self) -> &SimulationClock {
        &self.clock
    }

    pub fn trackers(&self) -> &[PeriodTracker] {
        &self.trackers
    }

    pub fn orbital_events(&self, tracker: &str) -> Option<&OrbitalEventLog> {
        self.trackers
            .iter()
            .find(|t| t.name == tracker)
            .map(PeriodTracker::log)
    }

    /// Rolling average period (seconds) of a tracker over the configured window
    pub fn orbital_period(&self, tracker: &str) -> Option<f64> {
        self.orbital_events(tracker)?
            .rolling_period(self.parameters.period_window)
    }

    /// Kinetic plus gravitational potential energy
    pub fn total_energy(&self) -> f64 {
        self.system.kinetic_energy() + self.gravity.potential_energy(&self.system.bodies)
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            real_time: self.real_time(),
            last_step_time: self.last_step_time(),
            steps_taken: self.steps_taken(),
            paused: self.is_paused(),
            stalled: self.stalled,
            bodies: self.system.bodies.iter().map(BodySnapshot::from).collect(),
            trackers: self
                .trackers
                .iter()
                .map(|t| TrackerSnapshot {
                    name: t.name.clone(),
                    events: t.log().clone(),
                    period: t.log().rolling_period(self.parameters.period_window),
                })
                .collect(),
        }
    }
}
