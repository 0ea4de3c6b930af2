//! Pairwise Newtonian gravity for the n-body engine
//!
//! Forces are written into each body's `force` accumulator. Every unordered
//! pair is visited exactly once (`i < j`), and the two halves of the pair
//! are applied as exact negations, so a pass over n bodies performs
//! `n * (n - 1) / 2` evaluations.

use super::states::{Body, NVec3};

/// Force exerted on `a` by `b`: `G * ma * mb / |Δ|²` along `Δ = b.x - a.x`.
///
/// Returns `None` when the bodies coincide, since the direction is then
/// undefined. Swapping the arguments yields the exact negation.
#[allow(non_snake_case)]
pub fn gravitational_force(a: &Body, b: &Body, G: f64) -> Option<NVec3> {
    let delta = b.x - a.x;
    let dist_sq = delta.norm_squared();
    if dist_sq == 0.0 {
        return None;
    }
    let direction = delta.try_normalize(0.0)?;
    let magnitude = G * (a.mass * b.mass) / dist_sq;
    Some(direction * magnitude)
}

/// Result of one accumulation pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PairCount {
    pub evaluated: usize,
    pub skipped: usize,
}

/// Direct O(n²) gravity over a small body set.
///
/// Pairs closer than `min_separation_sq` (squared meters) are treated as
/// degenerate and contribute nothing for that pass. The rule is applied
/// identically every step, so runs stay reproducible.
#[allow(non_snake_case)]
#[derive(Debug, Clone, Copy)]
pub struct NewtonianGravity {
    pub G: f64, // gravitational constant (already scaled)
    pub min_separation_sq: f64, // degenerate-pair threshold
}

impl NewtonianGravity {
    /// Zero every accumulator, then add the contribution of each unordered pair
    pub fn accumulate_forces(&self, bodies: &mut [Body]) -> PairCount {
        let mut count = PairCount::default();

        for b in bodies.iter_mut() {
            b.force = NVec3::zeros();
        }

        let n = bodies.len();
        for i in 0..n {
            for j in (i + 1)..n {
                let dist_sq = (bodies[j].x - bodies[i].x).norm_squared();
                if dist_sq < self.min_separation_sq {
                    tracing::trace!(i, j, dist_sq, "skipping degenerate pair");
                    count.skipped += 1;
                    continue;
                }

                // force on i due to j; j receives the negation
                match gravitational_force(&bodies[i], &bodies[j], self.G) {
                    Some(f) => {
                        bodies[i].force += f;
                        bodies[j].force -= f;
                        count.evaluated += 1;
                    }
                    None => count.skipped += 1,
                }
            }
        }

        count
    }

    /// Gravitational potential energy, each pair counted once.
    /// Degenerate pairs are left out, matching the force pass.
    pub fn potential_energy(&self, bodies: &[Body]) -> f64 {
        let mut energy = 0.0;
        for (i, a) in bodies.iter().enumerate() {
            for b in &bodies[i + 1..] {
                let dist_sq = (b.x - a.x).norm_squared();
                if dist_sq < self.min_separation_sq || dist_sq == 0.0 {
                    continue;
                }
                energy -= self.G * a.mass * b.mass / dist_sq.sqrt();
            }
        }
        energy
    }
}
