//! Simulation clock for the fixed-step catch-up loop
//!
//! `current_real_time` moves continuously with each tick's scaled input.
//! `last_step_time` only moves in whole `step_duration` increments and is
//! derived from an integer step counter, so it is always an exact multiple
//! of the step and never accumulates summation drift.

#[derive(Debug, Clone, PartialEq)]
pub struct SimulationClock {
    step_duration: f64,
    steps_taken: u64,
    current_real_time: f64,
}

impl SimulationClock {
    pub fn new(step_duration: f64) -> Self {
        Self {
            step_duration,
            steps_taken: 0,
            current_real_time: 0.0,
        }
    }

    pub fn step_duration(&self) -> f64 {
        self.step_duration
    }

    pub fn steps_taken(&self) -> u64 {
        self.steps_taken
    }

    pub fn current_real_time(&self) -> f64 {
        self.current_real_time
    }

    pub fn last_step_time(&self) -> f64 {
        self.steps_taken as f64 * self.step_duration
    }

    /// End time of the step that would run next
    pub fn next_step_end(&self) -> f64 {
        (self.steps_taken + 1) as f64 * self.step_duration
    }

    /// Simulated time not yet covered by whole steps
    pub fn backlog(&self) -> f64 {
        self.current_real_time - self.last_step_time()
    }

    pub fn accumulate(&mut self, advance: f64) {
        self.current_real_time += advance;
    }

    /// Restore `current_real_time` to a value saved before `accumulate`
    pub fn restore(&mut self, current_real_time: f64) {
        self.current_real_time = current_real_time;
    }

    /// Whole steps needed to drain the backlog; zero whenever the catch-up
    /// loop would not run
    pub fn steps_needed(&self) -> u64 {
        if !self.has_pending_step() {
            return 0;
        }
        let steps = (self.backlog() / self.step_duration).floor();
        if steps.is_finite() {
            (steps as u64).max(1)
        } else {
            u64::MAX
        }
    }

    pub fn has_pending_step(&self) -> bool {
        self.backlog() >= self.step_duration
    }

    pub fn complete_step(&mut self) {
        self.steps_taken += 1;
    }
}
