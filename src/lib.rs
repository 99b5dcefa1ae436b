//! Hex Bounce - a ball bouncing inside a rotating polygon
//!
//! Core modules:
//! - `sim`: Deterministic simulation (integration, boundary geometry, collisions)
//! - `settings`: Validated construction surface (serde/JSON)
//! - `error`: Configuration errors
//!
//! Rendering, windowing and input widgets are left to the caller: it supplies
//! `dt` to [`sim::tick`] and reads the body and vertices back for display.

pub mod error;
pub mod settings;
pub mod sim;

pub use error::ConfigError;
pub use settings::Settings;

use glam::Vec2;

/// Simulation configuration constants
pub mod consts {
    use glam::Vec2;

    /// Fixed simulation timestep (120 Hz)
    pub const SIM_DT: f32 = 1.0 / 120.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Longest frame the stepper will try to catch up on
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Arena center (middle of an 800x600 view)
    pub const ARENA_CENTER: Vec2 = Vec2::new(400.0, 300.0);

    /// Boundary defaults
    pub const BOUNDARY_RADIUS: f32 = 250.0;
    pub const BOUNDARY_SIDES: u32 = 6;
    /// 30 degrees per second
    pub const BOUNDARY_ANGULAR_VELOCITY: f32 = std::f32::consts::PI / 6.0;

    /// Body defaults
    pub const BODY_RADIUS: f32 = 15.0;
    pub const BODY_START_VELOCITY: Vec2 = Vec2::new(200.0, -50.0);
    /// Bounciness (1.0 is perfectly elastic)
    pub const RESTITUTION: f32 = 0.8;
    /// Fraction of tangential relative speed kept on contact
    pub const WALL_FRICTION: f32 = 0.9;

    /// Gravity (pixels/s², +Y is down on screen)
    pub const GRAVITY: f32 = 500.0;
    pub const GRAVITY_MIN: f32 = 0.0;
    pub const GRAVITY_MAX: f32 = 1000.0;
    /// Air damping applied to velocity once per tick
    pub const AIR_DAMPING: f32 = 0.99;

    /// Below this center-to-contact distance the normal falls back to the edge normal
    pub const CONTACT_EPSILON: f32 = 1e-6;
    /// Squared edge length treated as a degenerate edge
    pub const DEGENERATE_EDGE_EPSILON: f32 = 1e-12;
}

/// Convert polar (r, theta) to cartesian (x, y)
#[inline]
pub fn polar_to_cartesian(r: f32, theta: f32) -> Vec2 {
    Vec2::new(r * theta.cos(), r * theta.sin())
}
