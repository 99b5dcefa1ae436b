//! Deterministic simulation module
//!
//! All physics lives here. This module must be pure and deterministic:
//! - Caller-supplied timestep only
//! - Stable edge order (by vertex index)
//! - No rendering or platform dependencies

pub mod collision;
pub mod polygon;
pub mod state;
pub mod tick;

pub use collision::{
    Contact, closest_point_on_segment, detect_contact, resolve_boundary, resolve_contact,
};
pub use polygon::{Boundary, inward_normal, vertices};
pub use state::{Body, ContactEvent, Environment, SimState, TickReport};
pub use tick::{FixedStepper, integrate, tick};
