//! Simulation tick
//!
//! One tick: integrate gravity and damping, advance the boundary rotation,
//! then detect and resolve contacts edge by edge. The core is timing-agnostic;
//! [`FixedStepper`] turns variable frame times into fixed ticks for callers
//! that want a steady rate.

use super::collision::resolve_boundary;
use super::state::{Body, SimState, TickReport};
use crate::consts::*;
use glam::Vec2;

/// Advance body velocity and position under gravity and air damping
///
/// Semi-implicit Euler: velocity first, then position with the new velocity.
#[inline]
pub fn integrate(body: &mut Body, gravity: Vec2, damping: f32, dt: f32) {
    body.vel += gravity * dt;
    body.vel *= damping;
    body.pos += body.vel * dt;
}

/// Advance the simulation state by one step of `dt` seconds
///
/// A `dt` that is not a positive finite number leaves the state untouched.
pub fn tick(state: &mut SimState, dt: f32) -> TickReport {
    if !(dt.is_finite() && dt > 0.0) {
        log::warn!("Ignoring tick with invalid dt {}", dt);
        return TickReport::default();
    }

    state.time_ticks += 1;

    integrate(&mut state.body, state.env.gravity, state.env.damping, dt);

    state.boundary.advance(dt);
    state.vertices = state.boundary.vertices();

    let contacts = resolve_boundary(&mut state.body, &state.boundary, &state.vertices);
    if !contacts.is_empty() {
        log::debug!(
            "tick {}: {} contact(s), body at {} moving {}",
            state.time_ticks,
            contacts.len(),
            state.body.pos,
            state.body.vel
        );
    }

    TickReport { contacts }
}

/// Fixed-timestep driver with an accumulator
#[derive(Debug, Clone)]
pub struct FixedStepper {
    /// Seconds per tick
    pub step: f32,
    /// Maximum ticks per `advance` call
    pub max_substeps: u32,
    accumulator: f32,
}

impl Default for FixedStepper {
    fn default() -> Self {
        Self::new(SIM_DT, MAX_SUBSTEPS)
    }
}

impl FixedStepper {
    pub fn new(step: f32, max_substeps: u32) -> Self {
        Self {
            step,
            max_substeps,
            accumulator: 0.0,
        }
    }

    /// Time carried over to the next frame
    #[inline]
    pub fn pending(&self) -> f32 {
        self.accumulator
    }

    /// Drop any carried-over time (after a pause or a reset)
    pub fn reset(&mut self) {
        self.accumulator = 0.0;
    }

    /// Run as many fixed ticks as the elapsed frame time allows
    ///
    /// Frame time is clamped to [`MAX_FRAME_DT`] and at most `max_substeps`
    /// ticks run; time beyond that is discarded to avoid a spiral of death.
    pub fn advance(&mut self, state: &mut SimState, frame_dt: f32) -> Vec<TickReport> {
        if !frame_dt.is_finite() || frame_dt <= 0.0 {
            return Vec::new();
        }
        self.accumulator += frame_dt.min(MAX_FRAME_DT);

        let mut reports = Vec::new();
        let mut substeps = 0;
        while self.accumulator >= self.step && substeps < self.max_substeps {
            reports.push(tick(state, self.step));
            self.accumulator -= self.step;
            substeps += 1;
        }
        if substeps == self.max_substeps {
            // Capped: drop the backlog instead of replaying it later
            self.accumulator = self.accumulator.min(self.step);
        }
        reports
    }
}
