use std::time::Instant;

use crate::configuration::config::IntegratorConfig;
use crate::simulation::forces::NewtonianGravity;
use crate::simulation::integrator::{integrate_step, prime_accelerations};
use crate::simulation::params::GRAVITATIONAL_CONSTANT;
use crate::simulation::states::{Body, BodyId, NVec3, System};

/// Timing of one body count for both integrators
#[derive(Debug, Clone, Copy)]
pub struct BenchRow {
    pub n: usize,
    pub euler_us: f64, // microseconds per step
    pub verlet_us: f64,
    pub pairs: usize, // evaluated pairs per step
}

/// Helper to build a manual System of size `n`
/// Deterministic positions on an AU-scale shell, no rand needed
pub fn make_system(n: usize) -> System {
    const AU: f64 = 1.496e11;
    let bodies = (0..n)
        .map(|i| {
            let i_f = i as f64;
            let x = NVec3::new(
                (i_f * 0.37).sin() * 5.0 * AU,
                (i_f * 0.13).cos() * 5.0 * AU,
                (i_f * 0.07).sin() * 5.0 * AU,
            );
            Body::new(BodyId(i as u32), format!("body-{i}"), 1.0e24, x, NVec3::zeros())
        })
        .collect();
    System::new(bodies)
}

/// Time `steps` integration steps per body count for both schemes
pub fn bench_integrators(ns: &[usize], steps: usize) -> Vec<BenchRow> {
    let gravity = NewtonianGravity {
        G: GRAVITATIONAL_CONSTANT,
        min_separation_sq: 1.0,
    };
    let dt = 3600.0;
    let steps = steps.max(1);

    ns.iter()
        .map(|&n| {
            let mut template = make_system(n);
            let count = prime_accelerations(&mut template, &gravity);

            let time_method = |method: IntegratorConfig| {
                let mut sys = template.clone();
                // Warm up
                integrate_step(method, &mut sys, &gravity, dt);

                let t0 = Instant::now();
                for _ in 0..steps {
                    integrate_step(method, &mut sys, &gravity, dt);
                }
                t0.elapsed().as_secs_f64() * 1.0e6 / steps as f64
            };

            BenchRow {
                n,
                euler_us: time_method(IntegratorConfig::Euler),
                verlet_us: time_method(IntegratorConfig::VelocityVerlet),
                pairs: count.evaluated,
            }
        })
        .collect()
}

/// Print a CSV curve; paste the output into a spreadsheet to graph
pub fn bench_curve(ns: &[usize], steps: usize) {
    println!("N,pairs,euler_us,verlet_us");
    for row in bench_integrators(ns, steps) {
        println!("{},{},{:.3},{:.3}", row.n, row.pairs, row.euler_us, row.verlet_us);
    }
}
