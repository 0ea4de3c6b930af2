mod common;

use approx::assert_relative_eq;

use orbsim::{
    BodyConfig, IntegratorConfig, ScenarioConfig, Simulation, SimulationClock, SimulationError,
    TimeRange, TimeUnit,
};

use common::{three_body, unit_settings};

fn single_body(step: f64, time_scale: f64) -> ScenarioConfig {
    let mut simulation = unit_settings(step, IntegratorConfig::VelocityVerlet);
    simulation.time_scale = TimeRange::seconds(time_scale);
    ScenarioConfig {
        simulation,
        bodies: vec![BodyConfig::at("solo", 1.0, [0.0, 0.0, 0.0]).with_velocity([1.0, 0.0, 0.0])],
        trackers: vec![],
    }
}

// ==================================================================================
// Clock tests
// ==================================================================================

#[test]
fn clock_counts_whole_steps() {
    let mut clock = SimulationClock::new(0.25);
    clock.accumulate(1.1);

    assert_eq!(clock.steps_needed(), 4);
    assert!(clock.has_pending_step());

    for _ in 0..4 {
        clock.complete_step();
    }
    assert!(!clock.has_pending_step());
    assert_eq!(clock.steps_needed(), 0);
    assert_eq!(clock.last_step_time(), 1.0);
    assert_relative_eq!(clock.backlog(), 0.1, epsilon = 1e-12);
}

#[test]
fn clock_restore_is_exact() {
    let mut clock = SimulationClock::new(0.1);
    clock.accumulate(0.3);
    let saved = clock.current_real_time();
    clock.accumulate(123.456);
    clock.restore(saved);
    assert_eq!(clock.current_real_time(), saved);
}

// ==================================================================================
// Catch-up loop tests
// ==================================================================================

#[test]
fn step_count_is_independent_of_call_granularity() {
    for &(step, scale) in &[(0.01, 1.0), (0.01, 3.0), (0.003, 0.5), (0.25, 7.0)] {
        let total = 1.2345;

        let mut one = Simulation::new(&single_body(step, scale)).unwrap();
        one.advance(total).unwrap();

        let mut ten = Simulation::new(&single_body(step, scale)).unwrap();
        for _ in 0..10 {
            ten.advance(total / 10.0).unwrap();
        }

        let mut uneven = Simulation::new(&single_body(step, scale)).unwrap();
        for part in [0.5, 0.0001, 0.2344, 0.0, 0.5] {
            uneven.advance(part).unwrap();
        }

        assert_eq!(one.steps_taken(), ten.steps_taken(), "step {step} scale {scale}");
        assert_eq!(one.steps_taken(), uneven.steps_taken(), "step {step} scale {scale}");
        assert_relative_eq!(one.last_step_time(), ten.last_step_time(), epsilon = 1e-12);
        assert_relative_eq!(one.real_time(), ten.real_time(), epsilon = 1e-12);
        assert_eq!(one.bodies()[0].x, ten.bodies()[0].x);
        assert_eq!(one.bodies()[0].x, uneven.bodies()[0].x);
    }
}

#[test]
fn last_step_time_matches_floor_of_scaled_time() {
    let mut sim = Simulation::new(&single_body(0.01, 3.0)).unwrap();
    sim.advance(1.2345).unwrap();

    // 3.7035 s of simulated time at 0.01 s per step
    assert_eq!(sim.steps_taken(), 370);
    assert_relative_eq!(sim.last_step_time(), 3.70, epsilon = 1e-12);
    assert_relative_eq!(sim.real_time(), 3.7035, epsilon = 1e-12);
}

#[test]
fn backlog_is_drained_below_one_step() {
    let mut sim = Simulation::new(&three_body(IntegratorConfig::Euler)).unwrap();
    let step = sim.parameters().step_duration;

    for elapsed in [0.0, 0.0004, 0.0123, 0.5, 0.0009, 0.03] {
        let frame = sim.advance(elapsed).unwrap();
        let residue = frame.real_time - frame.last_step_time;
        assert!(residue >= 0.0);
        assert!(residue < step, "residue {residue} not below step {step}");
        assert!(!frame.paused);
    }
}

#[test]
fn zero_elapsed_runs_no_steps() {
    let mut sim = Simulation::new(&single_body(0.1, 1.0)).unwrap();
    let frame = sim.advance(0.0).unwrap();
    assert_eq!(frame.steps, 0);
    assert_eq!(sim.real_time(), 0.0);
}

#[test]
fn frame_reports_steps_run() {
    let mut sim = Simulation::new(&single_body(0.1, 1.0)).unwrap();
    let frame = sim.advance(0.35).unwrap();
    assert_eq!(frame.steps, 3);
    assert_relative_eq!(frame.last_step_time, 0.3, epsilon = 1e-12);
    assert_relative_eq!(frame.real_time, 0.35, epsilon = 1e-12);

    // residue plus new input completes a fourth step
    let frame = sim.advance(0.06).unwrap();
    assert_eq!(frame.steps, 1);
    assert_eq!(sim.steps_taken(), 4);
}

#[test]
fn negative_or_nan_elapsed_is_rejected() {
    let mut sim = Simulation::new(&single_body(0.1, 1.0)).unwrap();
    assert!(matches!(sim.advance(-0.1), Err(SimulationError::InvalidElapsed(_))));
    assert!(matches!(sim.advance(f64::NAN), Err(SimulationError::InvalidElapsed(_))));
    assert_eq!(sim.real_time(), 0.0);
    assert!(!sim.is_paused());
}

// ==================================================================================
// Stuck guard tests
// ==================================================================================

fn stuck_scenario() -> ScenarioConfig {
    // 100 steps per simulated second against a cap of 1000 per real second
    let mut cfg = single_body(0.01, 1.0);
    cfg.simulation.max_steps_per_second = 1000.0;
    cfg
}

#[test]
fn stuck_guard_rolls_back_and_pauses() {
    let mut sim = Simulation::new(&stuck_scenario()).unwrap();

    sim.advance(0.105).unwrap();
    assert_eq!(sim.steps_taken(), 10);
    let last_step = sim.last_step_time();
    let real_time = sim.real_time();
    let position = sim.bodies()[0].x;

    sim.set_time_scale(TimeRange::seconds(100.0)).unwrap();
    let err = sim.advance(1.0).unwrap_err();
    match err {
        SimulationError::Stuck {
            steps_needed,
            max_steps,
            elapsed_real_seconds,
            time_scale,
            step_duration,
        } => {
            assert!(steps_needed > 1000);
            assert_eq!(max_steps, 1000.0);
            assert_eq!(elapsed_real_seconds, 1.0);
            assert_eq!(time_scale, 100.0);
            assert_eq!(step_duration, 0.01);
        }
        other => panic!("unexpected error {other:?}"),
    }

    assert_eq!(sim.last_step_time(), last_step);
    assert_eq!(sim.real_time(), real_time);
    assert_eq!(sim.steps_taken(), 10);
    assert_eq!(sim.bodies()[0].x, position);
    assert!(sim.is_paused());
    assert!(sim.is_stalled());
}

#[test]
fn stuck_message_names_the_knobs() {
    let mut sim = Simulation::new(&stuck_scenario()).unwrap();
    sim.set_time_scale(TimeRange::seconds(100.0)).unwrap();
    let msg = sim.advance(1.0).unwrap_err().to_string();
    assert!(msg.contains("stuck"));
    assert!(msg.contains("time scale"));
    assert!(msg.contains("step duration"));
}

#[test]
fn stalled_simulation_ignores_ticks_until_reinitialized() {
    let mut sim = Simulation::new(&stuck_scenario()).unwrap();
    sim.set_time_scale(TimeRange::seconds(100.0)).unwrap();
    assert!(sim.advance(1.0).is_err());

    let frame = sim.advance(0.055).unwrap();
    assert!(frame.paused);
    assert_eq!(frame.steps, 0);
    assert_eq!(sim.real_time(), 0.0);

    // resume does not clear a stall
    sim.resume();
    assert!(sim.is_paused());

    // restart keeps the runtime time scale but clears the stall
    sim.restart().unwrap();
    assert!(!sim.is_stalled());
    assert_eq!(sim.parameters().time_scale, 100.0);

    sim.initialize(&stuck_scenario()).unwrap();
    assert!(!sim.is_paused());
    let frame = sim.advance(0.055).unwrap();
    assert_eq!(frame.steps, 5);
}

#[test]
fn huge_time_scale_trips_the_guard() {
    let mut cfg = single_body(1.0, 1.0);
    cfg.simulation.time_scale = TimeRange::new(1000.0, TimeUnit::Years);
    cfg.simulation.max_steps_per_second = 1e6;
    let mut sim = Simulation::new(&cfg).unwrap();

    assert!(matches!(sim.advance(1.0 / 60.0), Err(SimulationError::Stuck { .. })));
}

#[test]
fn overflowing_time_scale_trips_the_guard() {
    let mut cfg = single_body(1.0, 1e308);
    cfg.simulation.max_steps_per_second = 1e308;
    let mut sim = Simulation::new(&cfg).unwrap();

    // 10 s of input scales past f64::MAX
    match sim.advance(10.0) {
        Err(SimulationError::Stuck { steps_needed, .. }) => assert_eq!(steps_needed, u64::MAX),
        other => panic!("expected stuck, got {other:?}"),
    }
    assert_eq!(sim.real_time(), 0.0);
    assert_eq!(sim.steps_taken(), 0);
    assert!(sim.is_stalled());
}

#[test]
fn saturated_step_count_trips_the_guard() {
    let mut cfg = single_body(1.0, 1e300);
    cfg.simulation.max_steps_per_second = 1e308;
    let mut sim = Simulation::new(&cfg).unwrap();

    assert!(matches!(sim.advance(1.0), Err(SimulationError::Stuck { .. })));
    assert_eq!(sim.real_time(), 0.0);
}

// ==================================================================================
// Pause and runtime settings
// ==================================================================================

#[test]
fn pause_freezes_time() {
    let mut sim = Simulation::new(&single_body(0.1, 1.0)).unwrap();
    sim.advance(0.25).unwrap();
    sim.pause();

    let frame = sim.advance(5.0).unwrap();
    assert!(frame.paused);
    assert_eq!(frame.steps, 0);
    assert_relative_eq!(sim.real_time(), 0.25, epsilon = 1e-12);

    sim.resume();
    let frame = sim.advance(0.1).unwrap();
    assert!(!frame.paused);
    assert_eq!(sim.steps_taken(), 3);
}

#[test]
fn time_scale_change_applies_to_next_tick_and_restart() {
    let mut sim = Simulation::new(&single_body(0.1, 1.0)).unwrap();
    sim.set_time_scale(TimeRange::seconds(10.0)).unwrap();

    sim.advance(0.105).unwrap();
    assert_eq!(sim.steps_taken(), 10);

    sim.restart().unwrap();
    assert_eq!(sim.parameters().time_scale, 10.0);
    assert_eq!(sim.steps_taken(), 0);

    assert!(sim.set_time_scale(TimeRange::seconds(0.0)).is_err());
    assert_eq!(sim.parameters().time_scale, 10.0);
}

#[test]
fn gravity_multiplier_change_scales_forces() {
    let mut cfg = three_body(IntegratorConfig::VelocityVerlet);
    cfg.simulation.gravity_multiplier = 1.0;
    let mut sim = Simulation::new(&cfg).unwrap();
    let g0 = sim.gravity().G;

    sim.set_gravity_multiplier(2.0).unwrap();
    assert_relative_eq!(sim.gravity().G, 2.0 * g0, max_relative = 1e-15);
    assert!(sim.set_gravity_multiplier(-1.0).is_err());

    sim.restart().unwrap();
    assert_relative_eq!(sim.gravity().G, 2.0 * g0, max_relative = 1e-15);
}

#[test]
fn gravity_multiplier_change_rescales_stored_accelerations() {
    let mut sim = Simulation::new(&three_body(IntegratorConfig::VelocityVerlet)).unwrap();
    let before: Vec<_> = sim.bodies().iter().map(|b| b.a).collect();
    let multiplier = sim.parameters().gravity_multiplier;

    sim.set_gravity_multiplier(2.0 * multiplier).unwrap();
    for (b, a0) in sim.bodies().iter().zip(&before) {
        assert_relative_eq!(b.a, *a0 * 2.0, max_relative = 1e-12);
        assert_eq!(b.force, orbsim::NVec3::zeros());
    }

    sim.set_gravity_multiplier(0.0).unwrap();
    assert!(sim.bodies().iter().all(|b| b.a == orbsim::NVec3::zeros()));

    // with no gravity the next Verlet step is pure drift
    let x0 = sim.bodies()[1].x;
    let v0 = sim.bodies()[1].v;
    let step = sim.parameters().step_duration;
    sim.advance(step * 1.5).unwrap();
    assert_eq!(sim.steps_taken(), 1);
    assert_relative_eq!(sim.bodies()[1].x, x0 + v0 * step, epsilon = 1e-15);
    assert_eq!(sim.bodies()[1].v, v0);
}
