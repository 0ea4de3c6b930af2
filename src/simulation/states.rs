//! Core state types for the N-body simulation.
//!
//! - `Body`   – one point mass with its kinematic state and force accumulator
//! - `System` – the fixed set of bodies plus conserved-quantity diagnostics
//!
//! All quantities are SI: meters, kilograms, seconds.

use nalgebra::Vector3;
use serde::Serialize;

pub type NVec3 = Vector3<f64>;

/// Stable identity of a body within one simulation run.
/// Equal to the body's index in the set, assigned at initialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct BodyId(pub u32);

impl BodyId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Body {
    pub id: BodyId,
    pub name: String,
    pub mass: f64, // kg, always > 0
    pub x: NVec3,  // position
    pub v: NVec3,  // velocity
    pub a: NVec3,  // acceleration from the latest force pass (Verlet reuses it)
    pub force: NVec3, // per-step accumulator, zero between steps
}

impl Body {
    pub fn new(id: BodyId, name: impl Into<String>, mass: f64, x: NVec3, v: NVec3) -> Self {
        Self {
            id,
            name: name.into(),
            mass,
            x,
            v,
            a: NVec3::zeros(),
            force: NVec3::zeros(),
        }
    }

    pub fn momentum(&self) -> NVec3 {
        self.v * self.mass
    }

    pub fn kinetic_energy(&self) -> f64 {
        0.5 * self.mass * self.v.norm_squared()
    }

    pub fn speed(&self) -> f64 {
        self.v.norm()
    }

    pub fn distance_to(&self, other: &Body) -> f64 {
        (other.x - self.x).norm()
    }
}

/// The body set. Its size is fixed for the lifetime of a run.
#[derive(Debug, Clone, Default)]
pub struct System {
    pub bodies: Vec<Body>,
}

impl System {
    pub fn new(bodies: Vec<Body>) -> Self {
        Self { bodies }
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    pub fn get(&self, id: BodyId) -> Option<&Body> {
        self.bodies.get(id.index())
    }

    pub fn find(&self, name: &str) -> Option<&Body> {
        self.bodies.iter().find(|b| b.name == name)
    }

    pub fn total_mass(&self) -> f64 {
        self.bodies.iter().map(|b| b.mass).sum()
    }

    /// Vector sum of `m * v`; constant for an isolated system
    pub fn total_momentum(&self) -> NVec3 {
        self.bodies
            .iter()
            .map(Body::momentum)
            .fold(NVec3::zeros(), |acc, p| acc + p)
    }

    /// Total angular momentum `sum(m * x × v)` about the origin
    pub fn total_angular_momentum(&self) -> NVec3 {
        self.bodies
            .iter()
            .map(|b| b.x.cross(&b.v) * b.mass)
            .fold(NVec3::zeros(), |acc, l| acc + l)
    }

    pub fn kinetic_energy(&self) -> f64 {
        self.bodies.iter().map(Body::kinetic_energy).sum()
    }

    pub fn center_of_mass(&self) -> NVec3 {
        let m = self.total_mass();
        if m <= 0.0 {
            return NVec3::zeros();
        }
        self.bodies
            .iter()
            .map(|b| b.x * b.mass)
            .fold(NVec3::zeros(), |acc, x| acc + x)
            / m
    }
}
