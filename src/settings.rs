//! Simulation settings
//!
//! Everything needed to construct a [`crate::sim::SimState`]. Loaded from JSON
//! so a host application can keep presets on disk; missing fields fall back to
//! the defaults in [`crate::consts`].

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::ConfigError;
use crate::sim::polygon::Boundary;

/// Construction-time configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Body ===
    pub body_radius: f32,
    pub body_position: Vec2,
    pub body_velocity: Vec2,
    /// Bounciness (0.0 - 1.0)
    pub restitution: f32,
    /// Tangential speed kept on contact (0.0 - 1.0)
    pub friction: f32,

    // === Boundary ===
    pub boundary_center: Vec2,
    /// Center to vertex distance
    pub boundary_radius: f32,
    pub sides: u32,
    /// Initial rotation (radians)
    pub rotation: f32,
    /// Radians per second
    pub angular_velocity: f32,

    // === Environment ===
    pub gravity: Vec2,
    /// Range accepted by runtime gravity changes
    pub gravity_min: f32,
    pub gravity_max: f32,
    /// Velocity multiplier per tick (0.0 - 1.0)
    pub damping: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            body_radius: BODY_RADIUS,
            body_position: ARENA_CENTER,
            body_velocity: BODY_START_VELOCITY,
            restitution: RESTITUTION,
            friction: WALL_FRICTION,

            boundary_center: ARENA_CENTER,
            boundary_radius: BOUNDARY_RADIUS,
            sides: BOUNDARY_SIDES,
            rotation: 0.0,
            angular_velocity: BOUNDARY_ANGULAR_VELOCITY,

            gravity: Vec2::new(0.0, GRAVITY),
            gravity_min: GRAVITY_MIN,
            gravity_max: GRAVITY_MAX,
            damping: AIR_DAMPING,
        }
    }
}

fn check_finite(what: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::NonFinite { what })
    }
}

fn check_unit(what: &'static str, value: f32) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::OutOfUnitRange { what, value })
    }
}

impl Settings {
    /// Reject any configuration the simulation cannot start from
    pub fn validate(&self) -> Result<(), ConfigError> {
        let scalars = [
            ("body_radius", self.body_radius),
            ("body_position.x", self.body_position.x),
            ("body_position.y", self.body_position.y),
            ("body_velocity.x", self.body_velocity.x),
            ("body_velocity.y", self.body_velocity.y),
            ("restitution", self.restitution),
            ("friction", self.friction),
            ("boundary_center.x", self.boundary_center.x),
            ("boundary_center.y", self.boundary_center.y),
            ("boundary_radius", self.boundary_radius),
            ("rotation", self.rotation),
            ("angular_velocity", self.angular_velocity),
            ("gravity.x", self.gravity.x),
            ("gravity.y", self.gravity.y),
            ("gravity_min", self.gravity_min),
            ("gravity_max", self.gravity_max),
            ("damping", self.damping),
        ];
        for (what, value) in scalars {
            check_finite(what, value)?;
        }

        if self.sides < 3 {
            return Err(ConfigError::TooFewSides { sides: self.sides });
        }
        if self.body_radius <= 0.0 {
            return Err(ConfigError::NonPositiveRadius {
                what: "body_radius",
                value: self.body_radius,
            });
        }
        if self.boundary_radius <= 0.0 {
            return Err(ConfigError::NonPositiveRadius {
                what: "boundary_radius",
                value: self.boundary_radius,
            });
        }
        check_unit("damping", self.damping)?;
        check_unit("restitution", self.restitution)?;
        check_unit("friction", self.friction)?;

        if self.gravity_min < 0.0 || self.gravity_min > self.gravity_max {
            return Err(ConfigError::InvalidGravityRange {
                min: self.gravity_min,
                max: self.gravity_max,
            });
        }
        let magnitude = self.gravity.length();
        if magnitude < self.gravity_min || magnitude > self.gravity_max {
            return Err(ConfigError::GravityOutOfRange {
                magnitude,
                min: self.gravity_min,
                max: self.gravity_max,
            });
        }

        let boundary = self.boundary();
        let apothem = boundary.apothem();
        if self.body_radius >= apothem {
            return Err(ConfigError::BodyDoesNotFit {
                body_radius: self.body_radius,
                apothem,
            });
        }
        let (edge, clearance) = boundary.clearance(self.body_position);
        if clearance < self.body_radius {
            return Err(ConfigError::BodyOutsideBoundary { edge });
        }

        Ok(())
    }

    /// Boundary described by these settings
    pub fn boundary(&self) -> Boundary {
        Boundary::new(
            self.boundary_center,
            self.boundary_radius,
            self.sides,
            self.rotation,
            self.angular_velocity,
        )
    }

    /// Parse settings from JSON (missing fields use defaults) and validate them
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Serialize to pretty JSON
    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Perturb the launch velocity by up to `max_delta` per axis
    ///
    /// Same seed, same perturbation, so runs stay reproducible.
    pub fn jitter_launch(&mut self, seed: u64, max_delta: f32) {
        if max_delta <= 0.0 || !max_delta.is_finite() {
            return;
        }
        let mut rng = Pcg32::seed_from_u64(seed);
        let dx = rng.random_range(-max_delta..=max_delta);
        let dy = rng.random_range(-max_delta..=max_delta);
        self.body_velocity += Vec2::new(dx, dy);
        log::debug!("Launch jitter (seed {}): {}", seed, self.body_velocity);
    }
}
