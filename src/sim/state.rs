//! Simulation state and core types
//!
//! `SimState` is the whole simulation context. The caller owns it and passes
//! it to [`super::tick`]; nothing in the crate holds global mutable state.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::polygon::Boundary;
use crate::error::ConfigError;
use crate::settings::Settings;

/// The bouncing body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Body {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    /// Fraction of normal relative speed kept (reflected) on contact
    pub restitution: f32,
    /// Fraction of tangential relative speed kept on contact
    pub friction: f32,
}

impl Body {
    /// Kinetic energy per unit mass
    #[inline]
    pub fn kinetic_energy(&self) -> f32 {
        0.5 * self.vel.length_squared()
    }
}

/// Forces acting on the body between contacts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Environment {
    pub gravity: Vec2,
    /// Multiplicative velocity damping per tick, in [0, 1]
    pub damping: f32,
    /// Allowed gravity magnitude range for runtime changes
    pub gravity_min: f32,
    pub gravity_max: f32,
}

/// One resolved contact, reported back to the caller (sound, particles, stats)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ContactEvent {
    /// Edge index (edge `i` joins vertex `i` and `i + 1`)
    pub edge: usize,
    pub point: Vec2,
    pub normal: Vec2,
    pub penetration: f32,
    /// Normal component of velocity relative to the wall, before response
    /// (negative when approaching)
    pub normal_speed_before: f32,
    /// Same component after response
    pub normal_speed_after: f32,
    pub tunneled: bool,
}

impl ContactEvent {
    /// Speed at which the body was closing on the wall
    #[inline]
    pub fn approach_speed(&self) -> f32 {
        (-self.normal_speed_before).max(0.0)
    }
}

/// Outcome of a single tick
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TickReport {
    /// Contacts in the order they were resolved
    pub contacts: Vec<ContactEvent>,
}

impl TickReport {
    /// No edge was touched this tick
    #[inline]
    pub fn is_free(&self) -> bool {
        self.contacts.is_empty()
    }
}

/// Complete simulation state (deterministic, serializable)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimState {
    pub body: Body,
    pub boundary: Boundary,
    pub env: Environment,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Vertices used by the most recent collision pass
    #[serde(skip)]
    pub(crate) vertices: Vec<Vec2>,
}

impl SimState {
    /// Build a simulation from validated settings
    pub fn new(settings: &Settings) -> Result<Self, ConfigError> {
        settings.validate()?;

        let boundary = Boundary::new(
            settings.boundary_center,
            settings.boundary_radius,
            settings.sides,
            settings.rotation,
            settings.angular_velocity,
        );
        let vertices = boundary.vertices();

        log::info!(
            "Simulation ready: {} sides, radius {}, body radius {}, gravity {}",
            settings.sides,
            settings.boundary_radius,
            settings.body_radius,
            settings.gravity
        );

        Ok(Self {
            body: Body {
                pos: settings.body_position,
                vel: settings.body_velocity,
                radius: settings.body_radius,
                restitution: settings.restitution,
                friction: settings.friction,
            },
            boundary,
            env: Environment {
                gravity: settings.gravity,
                damping: settings.damping,
                gravity_min: settings.gravity_min,
                gravity_max: settings.gravity_max,
            },
            time_ticks: 0,
            vertices,
        })
    }

    /// Boundary vertices as of the last tick (for rendering)
    #[inline]
    pub fn current_vertices(&self) -> &[Vec2] {
        &self.vertices
    }

    /// Raw bytes of [`Self::current_vertices`], ready for a vertex buffer upload
    #[inline]
    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(self.vertices.as_slice())
    }

    /// Recompute cached vertices from the boundary (after deserializing or editing it)
    pub fn refresh_vertices(&mut self) {
        self.vertices = self.boundary.vertices();
    }

    /// Change gravity at runtime
    ///
    /// The magnitude is clamped to the configured range and the direction is
    /// kept. A zero vector with a positive minimum points down (+Y).
    pub fn set_gravity(&mut self, gravity: Vec2) {
        if !gravity.is_finite() {
            log::warn!("Ignoring non-finite gravity {}", gravity);
            return;
        }
        let magnitude = gravity.length();
        let clamped = magnitude.clamp(self.env.gravity_min, self.env.gravity_max);
        let direction = if magnitude > 0.0 {
            gravity / magnitude
        } else {
            Vec2::Y
        };
        self.env.gravity = direction * clamped;
    }

    /// Slider-style gravity change: straight down with the given magnitude
    pub fn set_gravity_magnitude(&mut self, magnitude: f32) {
        if !magnitude.is_finite() {
            log::warn!("Ignoring non-finite gravity magnitude {}", magnitude);
            return;
        }
        let clamped = magnitude.clamp(self.env.gravity_min, self.env.gravity_max);
        self.env.gravity = Vec2::new(0.0, clamped);
    }

    /// Change how fast the boundary spins (radians per second)
    pub fn set_angular_velocity(&mut self, angular_velocity: f32) {
        if !angular_velocity.is_finite() {
            log::warn!("Ignoring non-finite angular velocity {}", angular_velocity);
            return;
        }
        self.boundary.angular_velocity = angular_velocity;
    }

    /// Kinetic energy of the body per unit mass
    #[inline]
    pub fn kinetic_energy(&self) -> f32 {
        self.body.kinetic_energy()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_from_defaults() {
        let state = SimState::new(&Settings::default()).unwrap();
        assert_eq!(state.time_ticks, 0);
        assert_eq!(state.current_vertices().len(), 6);
        assert_eq!(state.body.pos, Settings::default().body_position);
        // Two f32 per vertex
        assert_eq!(state.vertex_bytes().len(), 6 * 2 * 4);
    }

    #[test]
    fn test_new_rejects_invalid_settings() {
        let settings = Settings {
            sides: 2,
            ..Default::default()
        };
        assert_eq!(
            SimState::new(&settings).unwrap_err(),
            ConfigError::TooFewSides { sides: 2 }
        );
    }

    #[test]
    fn test_set_gravity_clamps_magnitude() {
        let mut state = SimState::new(&Settings::default()).unwrap();

        state.set_gravity(Vec2::new(0.0, 5000.0));
        assert!((state.env.gravity - Vec2::new(0.0, 1000.0)).length() < 1e-3);

        state.set_gravity(Vec2::new(300.0, 400.0));
        assert!((state.env.gravity - Vec2::new(300.0, 400.0)).length() < 1e-3);

        state.set_gravity(Vec2::new(f32::NAN, 1.0));
        assert!((state.env.gravity - Vec2::new(300.0, 400.0)).length() < 1e-3);
    }

    #[test]
    fn test_set_gravity_zero_with_positive_minimum() {
        let settings = Settings {
            gravity_min: 100.0,
            ..Default::default()
        };
        let mut state = SimState::new(&settings).unwrap();
        state.set_gravity(Vec2::ZERO);
        assert_eq!(state.env.gravity, Vec2::new(0.0, 100.0));
    }

    #[test]
    fn test_set_gravity_magnitude_like_slider() {
        let mut state = SimState::new(&Settings::default()).unwrap();
        state.set_gravity_magnitude(250.0);
        assert_eq!(state.env.gravity, Vec2::new(0.0, 250.0));
        state.set_gravity_magnitude(-20.0);
        assert_eq!(state.env.gravity, Vec2::new(0.0, 0.0));
        // Body is untouched by reconfiguration
        assert_eq!(state.body.pos, Settings::default().body_position);
    }

    #[test]
    fn test_set_angular_velocity() {
        let mut state = SimState::new(&Settings::default()).unwrap();
        state.set_angular_velocity(-1.0);
        assert_eq!(state.boundary.angular_velocity, -1.0);
        state.set_angular_velocity(f32::INFINITY);
        assert_eq!(state.boundary.angular_velocity, -1.0);
    }

    #[test]
    fn test_serde_roundtrip_refreshes_vertices() {
        let state = SimState::new(&Settings::default()).unwrap();
        let json = serde_json::to_string(&state).unwrap();
        let mut restored: SimState = serde_json::from_str(&json).unwrap();
        assert!(restored.current_vertices().is_empty());
        restored.refresh_vertices();
        assert_eq!(restored.current_vertices(), state.current_vertices());
    }
}
