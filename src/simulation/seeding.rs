//! Initial orbital velocity seeding
//!
//! Bodies without an explicit velocity are given the circular-orbit speed
//! `sqrt(G (m_orbiter + m_reference) / r)` along `normalize(delta × up)`,
//! where `delta` points from the reference body to the orbiter.
//!
//! This approximates a bound multi-body configuration. It does not solve the
//! n-body initial value problem, so seeded orbits are only roughly circular
//! once a third body is present.

use super::states::{Body, NVec3};

/// Per-body seeding permissions and parents
#[derive(Debug, Clone, Default)]
pub struct SeedPlan {
    pub seedable: Vec<bool>, // false for explicit velocities and opted-out bodies
    pub parents: Vec<Option<usize>>, // hierarchy mode only; parent index < body index
}

/// Circular-orbit velocity of `orbiter` around `reference`, relative to the reference.
///
/// `None` when the bodies are closer than `min_separation` or the separation
/// is parallel to `up`, since no tangent direction exists then.
#[allow(non_snake_case)]
pub fn circular_velocity(
    orbiter: &Body,
    reference: &Body,
    G: f64,
    up: &NVec3,
    min_separation: f64,
) -> Option<NVec3> {
    let delta = orbiter.x - reference.x;
    let r = delta.norm();
    if r < min_separation || r == 0.0 {
        return None;
    }
    let direction = delta.cross(up).try_normalize(0.0)?;
    let speed = (G * (orbiter.mass + reference.mass) / r).sqrt();
    Some(direction * speed)
}

/// Sum a circular-orbit contribution over every unordered pair.
///
/// The lighter body of each pair is the orbiter; on equal mass the later
/// body orbits the earlier one. Returns the number of contributions applied.
#[allow(non_snake_case)]
pub fn seed_all_pairs(
    bodies: &mut [Body],
    plan: &SeedPlan,
    G: f64,
    up: &NVec3,
    min_separation: f64,
) -> usize {
    let n = bodies.len();
    let mut applied = 0;

    for i in 0..n {
        for j in (i + 1)..n {
            let (orbiter, reference) = if bodies[i].mass < bodies[j].mass {
                (i, j)
            } else {
                (j, i)
            };
            if !plan.seedable.get(orbiter).copied().unwrap_or(false) {
                continue;
            }

            match circular_velocity(&bodies[orbiter], &bodies[reference], G, up, min_separation) {
                Some(dv) => {
                    bodies[orbiter].v += dv;
                    applied += 1;
                }
                None => tracing::warn!(
                    orbiter = %bodies[orbiter].name,
                    reference = %bodies[reference].name,
                    "no tangent for seeding, pair skipped"
                ),
            }
        }
    }

    applied
}

/// Seed each body around its configured parent only, inheriting the parent's
/// velocity. Parents precede their children, so a parent is final by the
/// time its children are visited.
#[allow(non_snake_case)]
pub fn seed_hierarchy(
    bodies: &mut [Body],
    plan: &SeedPlan,
    G: f64,
    up: &NVec3,
    min_separation: f64,
) -> usize {
    let mut applied = 0;

    for child in 0..bodies.len() {
        if !plan.seedable.get(child).copied().unwrap_or(false) {
            continue;
        }
        let Some(parent) = plan.parents.get(child).copied().flatten() else {
            continue;
        };

        let parent_v = bodies[parent].v;
        match circular_velocity(&bodies[child], &bodies[parent], G, up, min_separation) {
            Some(dv) => {
                bodies[child].v += parent_v + dv;
                applied += 1;
            }
            None => tracing::warn!(
                body = %bodies[child].name,
                parent = %bodies[parent].name,
                "no tangent for seeding, body left unseeded"
            ),
        }
    }

    applied
}
