//! Fixed-step time integrators for the N-body system
//!
//! Two schemes share the same per-step contract: accumulators are zeroed,
//! one pairwise force pass runs, forces are converted to accelerations once
//! per body, and the accumulators are cleared again before returning.
//!
//! - [`euler_step`]: velocity first, then position with the new velocity.
//!   First order; orbits visibly drift unless `dt` is tiny.
//! - [`verlet_step`]: velocity Verlet (leapfrog). Second order and
//!   symplectic, so energy stays bounded over long runs.

use super::forces::{NewtonianGravity, PairCount};
use super::states::{NVec3, System};
use crate::configuration::config::IntegratorConfig;

/// Advance the system one step of `dt` seconds with the selected scheme
pub fn integrate_step(
    method: IntegratorConfig,
    sys: &mut System,
    gravity: &NewtonianGravity,
    dt: f64,
) -> PairCount {
    match method {
        IntegratorConfig::Euler => euler_step(sys, gravity, dt),
        IntegratorConfig::VelocityVerlet => verlet_step(sys, gravity, dt),
    }
}

/// Fill every body's acceleration from the current positions.
/// Run once at initialization so the first Verlet step starts from a(t0).
pub fn prime_accelerations(sys: &mut System, gravity: &NewtonianGravity) -> PairCount {
    let count = gravity.accumulate_forces(&mut sys.bodies);
    for b in sys.bodies.iter_mut() {
        b.a = b.force / b.mass;
        b.force = NVec3::zeros();
    }
    count
}

/// Explicit Euler:
/// v_n+1 = v_n + (F_n / m) dt
/// x_n+1 = x_n + v_n+1 dt
pub fn euler_step(sys: &mut System, gravity: &NewtonianGravity, dt: f64) -> PairCount {
    if sys.bodies.is_empty() {
        return PairCount::default();
    }

    // forces at x_n
    let count = gravity.accumulate_forces(&mut sys.bodies);

    for b in sys.bodies.iter_mut() {
        let a = b.force / b.mass;
        b.v += a * dt;
        b.x += b.v * dt;
        b.a = a;
        b.force = NVec3::zeros();
    }

    count
}

/// Velocity Verlet, using the acceleration stored from the previous step:
/// x_n+1 = x_n + v_n dt + 1/2 a_n dt²
/// a_n+1 = F(x_n+1) / m
/// v_n+1 = v_n + 1/2 (a_n + a_n+1) dt
pub fn verlet_step(sys: &mut System, gravity: &NewtonianGravity, dt: f64) -> PairCount {
    if sys.bodies.is_empty() {
        return PairCount::default();
    }

    let half_dt = 0.5 * dt;
    let half_dt2 = 0.5 * dt * dt;

    // Drift with the previous acceleration
    for b in sys.bodies.iter_mut() {
        b.x += b.v * dt + b.a * half_dt2;
    }

    // Forces at the new positions
    let count = gravity.accumulate_forces(&mut sys.bodies);

    // Kick with the averaged acceleration, then keep a_n+1 for the next step
    for b in sys.bodies.iter_mut() {
        let a_new = b.force / b.mass;
        b.v += (b.a + a_new) * half_dt;
        b.a = a_new;
        b.force = NVec3::zeros();
    }

    count
}
