//! Build fully-initialized simulation scenarios from configuration
//!
//! Takes a `ScenarioConfig` (YAML-facing) and produces a validated runtime
//! bundle containing:
//! - engine settings (`Engine`)
//! - numerical parameters (`Parameters`)
//! - system state (`System` with resolved positions and seeded velocities)
//! - period trackers (`PeriodTracker`)
//!
//! Any configuration problem aborts the build with a [`ConfigError`]; no
//! partially built scenario is ever returned.

use std::collections::HashMap;

use crate::configuration::config::{BodyConfig, ScenarioConfig, SeedingConfig, SimulationSettings};
use crate::error::ConfigError;
use crate::simulation::engine::Engine;
use crate::simulation::orbits::PeriodTracker;
use crate::simulation::params::Parameters;
use crate::simulation::seeding::{seed_all_pairs, seed_hierarchy, SeedPlan};
use crate::simulation::states::{Body, BodyId, NVec3, System};

/// A validated, ready-to-run initial condition
#[derive(Debug, Clone)]
pub struct Scenario {
    pub engine: Engine,
    pub parameters: Parameters,
    pub system: System,
    pub trackers: Vec<PeriodTracker>,
}

impl Scenario {
    pub fn build_scenario(cfg: &ScenarioConfig) -> Result<Self, ConfigError> {
        let parameters = build_parameters(&cfg.simulation)?;
        let engine = Engine {
            integrator: cfg.simulation.integrator,
            seeding: cfg.simulation.seeding,
            up: unit_axis(cfg.simulation.up, "up")?,
        };

        if cfg.bodies.is_empty() {
            return Err(ConfigError::EmptyBodySet);
        }
        if let Some(expected) = cfg.simulation.body_slots {
            if expected != cfg.bodies.len() {
                return Err(ConfigError::BodyCountMismatch {
                    expected,
                    found: cfg.bodies.len(),
                });
            }
        }

        // Name -> index for every body, so forward references can be told
        // apart from unknown ones
        let mut index: HashMap<&str, usize> = HashMap::with_capacity(cfg.bodies.len());
        for (i, bc) in cfg.bodies.iter().enumerate() {
            if index.insert(bc.name.as_str(), i).is_some() {
                return Err(ConfigError::DuplicateBodyName(bc.name.clone()));
            }
        }

        // Bodies: map `BodyConfig` -> runtime `Body`, resolving relative positions in order
        let mut bodies: Vec<Body> = Vec::with_capacity(cfg.bodies.len());
        let mut plan = SeedPlan::default();
        for (i, bc) in cfg.bodies.iter().enumerate() {
            if !(bc.mass > 0.0 && bc.mass.is_finite()) {
                return Err(ConfigError::NonPositiveMass {
                    name: bc.name.clone(),
                    mass: bc.mass,
                });
            }

            let x = match &bc.relative_to {
                Some(reference) => {
                    let r = resolve_earlier(&index, bc, reference, i)?;
                    bodies[r].x + finite(bc, "offset", bc.offset)?
                }
                None => match bc.position {
                    Some(p) => finite(bc, "position", p)?,
                    None => return Err(ConfigError::MissingPosition(bc.name.clone())),
                },
            };
            // finite parts can still overflow when summed
            let x = finite(bc, "position", x.into())?;

            let parent = match &bc.orbits {
                Some(_) if engine.seeding != SeedingConfig::Hierarchy => {
                    return Err(ConfigError::OrbitsWithoutHierarchy(bc.name.clone()));
                }
                Some(parent) => Some(resolve_earlier(&index, bc, parent, i)?),
                None => None,
            };

            let v = match bc.velocity {
                Some(v) => finite(bc, "velocity", v)?,
                None => NVec3::zeros(),
            };
            bodies.push(Body::new(BodyId(i as u32), bc.name.clone(), bc.mass, x, v));
            plan.seedable.push(bc.velocity.is_none() && bc.seed_velocity);
            plan.parents.push(parent);
        }

        let seeded = match engine.seeding {
            SeedingConfig::AllPairs => seed_all_pairs(
                &mut bodies,
                &plan,
                parameters.G(),
                &engine.up,
                parameters.min_separation,
            ),
            SeedingConfig::Hierarchy => seed_hierarchy(
                &mut bodies,
                &plan,
                parameters.G(),
                &engine.up,
                parameters.min_separation,
            ),
        };
        tracing::debug!(seeded, mode = ?engine.seeding, "initial velocities seeded");
        for (b, bc) in bodies.iter().zip(&cfg.bodies) {
            finite(bc, "seeded velocity", b.v.into())?;
        }

        let mut trackers = Vec::with_capacity(cfg.trackers.len());
        for tc in &cfg.trackers {
            let name = tc.name.clone().unwrap_or_else(|| tc.body.clone());
            let lookup = |body: &str| {
                index
                    .get(body)
                    .map(|&i| BodyId(i as u32))
                    .ok_or_else(|| ConfigError::UnknownTrackedBody {
                        tracker: name.clone(),
                        body: body.to_string(),
                    })
            };
            let body = lookup(&tc.body)?;
            let reference = lookup(&tc.reference)?;
            if body == reference {
                return Err(ConfigError::SelfReference(name));
            }
            let normal = unit_axis(tc.plane_normal, "plane_normal")?;
            trackers.push(PeriodTracker::new(name, body, reference, normal));
        }

        Ok(Self {
            engine,
            parameters,
            system: System::new(bodies),
            trackers,
        })
    }
}

fn build_parameters(s: &SimulationSettings) -> Result<Parameters, ConfigError> {
    let step_duration = s.step_duration.get();
    let time_scale = s.time_scale.get();

    positive("step_duration", step_duration)?;
    positive("time_scale", time_scale)?;
    positive("max_steps_per_second", s.max_steps_per_second)?;
    non_negative("gravity_multiplier", s.gravity_multiplier)?;
    non_negative("min_separation", s.min_separation)?;
    if s.period_window == 0 {
        return Err(ConfigError::InvalidParameter {
            name: "period_window",
            value: 0.0,
        });
    }

    Ok(Parameters {
        step_duration,
        time_scale,
        gravity_multiplier: s.gravity_multiplier,
        max_steps_per_second: s.max_steps_per_second,
        min_separation: s.min_separation,
        period_window: s.period_window,
    })
}

pub(crate) fn positive(name: &'static str, value: f64) -> Result<f64, ConfigError> {
    if value > 0.0 && value.is_finite() {
        Ok(value)
    } else {
        Err(ConfigError::InvalidParameter { name, value })
    }
}

pub(crate) fn non_negative(name: &'static str, value: f64) -> Result<f64, ConfigError> {
    if value >= 0.0 && value.is_finite() {
        Ok(value)
    } else {
        Err(ConfigError::InvalidParameter { name, value })
    }
}

fn unit_axis(axis: [f64; 3], name: &'static str) -> Result<NVec3, ConfigError> {
    NVec3::from(axis)
        .try_normalize(0.0)
        .filter(|v| v.iter().all(|c| c.is_finite()))
        .ok_or(ConfigError::ZeroAxis(name))
}

fn finite(bc: &BodyConfig, field: &'static str, v: [f64; 3]) -> Result<NVec3, ConfigError> {
    if v.iter().all(|c| c.is_finite()) {
        Ok(NVec3::from(v))
    } else {
        Err(ConfigError::NonFiniteState {
            name: bc.name.clone(),
            field,
        })
    }
}

/// Index of `reference`, which must be a different body defined before body `i`
fn resolve_earlier(
    index: &HashMap<&str, usize>,
    bc: &BodyConfig,
    reference: &str,
    i: usize,
) -> Result<usize, ConfigError> {
    match index.get(reference) {
        Some(&r) if r == i => Err(ConfigError::SelfReference(bc.name.clone())),
        Some(&r) if r > i => Err(ConfigError::ReferenceOrder {
            body: bc.name.clone(),
            reference: reference.to_string(),
        }),
        Some(&r) => Ok(r),
        None => Err(ConfigError::UnknownReference {
            body: bc.name.clone(),
            reference: reference.to_string(),
        }),
    }
}
