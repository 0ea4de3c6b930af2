//! Orbital-period telemetry
//!
//! A [`PeriodTracker`] watches one (tracked, reference) body pair. Each step
//! the tracked body's offset from the reference, projected on the tracker's
//! plane normal, is sampled before and after integration. A sign change
//! from negative to non-negative is one completed revolution, logged at the
//! step's end time. None of this feeds back into the integrator.

use serde::Serialize;

use super::states::{Body, BodyId, NVec3};

/// True when a signed plane offset went from below the plane to on/above it
pub fn crossed_upward(before: f64, after: f64) -> bool {
    before < 0.0 && after >= 0.0
}

/// Rolling average period over the latest `window` events.
///
/// With more than `window` events the span is measured from the event just
/// before the window, so exactly `window` whole periods are averaged. With
/// fewer, the span starts at simulation time zero.
pub fn rolling_period(events: &[f64], window: usize) -> Option<f64> {
    let k = events.len();
    let last = *events.last()?;
    if window == 0 {
        return None;
    }
    if k > window {
        Some((last - events[k - 1 - window]) / window as f64)
    } else {
        Some(last / k as f64)
    }
}

/// Append-only record of crossing times (simulated seconds)
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct OrbitalEventLog {
    events: Vec<f64>,
}

impl OrbitalEventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, time: f64) {
        self.events.push(time);
    }

    pub fn events(&self) -> &[f64] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn last(&self) -> Option<f64> {
        self.events.last().copied()
    }

    pub fn rolling_period(&self, window: usize) -> Option<f64> {
        rolling_period(&self.events, window)
    }
}

#[derive(Debug, Clone)]
pub struct PeriodTracker {
    pub name: String,
    pub body: BodyId,
    pub reference: BodyId,
    pub normal: NVec3, // unit normal of the reference plane
    log: OrbitalEventLog,
    before: f64, // plane offset sampled at the start of the current step
}

impl PeriodTracker {
    pub fn new(name: impl Into<String>, body: BodyId, reference: BodyId, normal: NVec3) -> Self {
        Self {
            name: name.into(),
            body,
            reference,
            normal,
            log: OrbitalEventLog::new(),
            before: 0.0,
        }
    }

    /// Signed distance of the tracked body from the plane through the reference body
    pub fn plane_offset(&self, bodies: &[Body]) -> f64 {
        let tracked = &bodies[self.body.index()];
        let reference = &bodies[self.reference.index()];
        (tracked.x - reference.x).dot(&self.normal)
    }

    /// Sample the pre-integration offset
    pub fn begin_step(&mut self, bodies: &[Body]) {
        self.before = self.plane_offset(bodies);
    }

    /// Sample the post-integration offset and log a crossing at `step_end`
    pub fn end_step(&mut self, bodies: &[Body], step_end: f64) -> bool {
        let after = self.plane_offset(bodies);
        self.observe(self.before, after, step_end)
    }

    /// Log `time` if the offsets describe an upward crossing
    pub fn observe(&mut self, before: f64, after: f64, time: f64) -> bool {
        if crossed_upward(before, after) {
            self.log.record(time);
            tracing::debug!(tracker = %self.name, time, "orbital crossing");
            true
        } else {
            false
        }
    }

    pub fn log(&self) -> &OrbitalEventLog {
        &self.log
    }
}
