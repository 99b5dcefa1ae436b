//! Collision detection and response against the rotating boundary
//!
//! Each edge is tested with a clamped closest-point query. Response works in
//! the wall's local frame: the surface velocity induced by rotation is removed,
//! restitution and friction are applied, and the wall velocity is added back.

use glam::Vec2;

use super::polygon::{Boundary, inward_normal};
use super::state::{Body, ContactEvent};
use crate::consts::{CONTACT_EPSILON, DEGENERATE_EDGE_EPSILON};

/// A detected overlap between the body and one edge
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contact {
    /// Closest point on the edge
    pub point: Vec2,
    /// Segment parameter of `point` in [0, 1]
    pub t: f32,
    /// Distance from body center to `point`
    pub distance: f32,
    /// Unit normal pointing from the wall toward the body
    pub normal: Vec2,
    /// Overlap depth (radius - distance, or radius plus depth past the edge line when tunneled)
    pub penetration: f32,
    /// Body center had crossed the edge line to the outside
    pub tunneled: bool,
}

/// Project `p` onto segment `a -> b`, clamped to the segment
///
/// Returns the closest point and its parameter `t`. A degenerate segment
/// returns `(a, 0.0)`.
#[inline]
pub fn closest_point_on_segment(a: Vec2, b: Vec2, p: Vec2) -> (Vec2, f32) {
    let d = b - a;
    let len_sq = d.length_squared();
    if len_sq < DEGENERATE_EDGE_EPSILON {
        return (a, 0.0);
    }
    let t = ((p - a).dot(d) / len_sq).clamp(0.0, 1.0);
    (a + d * t, t)
}

/// Test a body against edge `a -> b` of a counter-clockwise polygon
pub fn detect_contact(a: Vec2, b: Vec2, center: Vec2, radius: f32) -> Option<Contact> {
    let (point, t) = closest_point_on_segment(a, b, center);
    let offset = center - point;
    let distance = offset.length();
    let edge_normal = inward_normal(a, b);
    let line_distance = (center - a).dot(edge_normal);
    let tunneled = line_distance < 0.0;

    if distance >= radius && !tunneled {
        return None;
    }

    let normal = if tunneled || distance <= CONTACT_EPSILON {
        // Degenerate edge too: any unit vector keeps the response finite
        if edge_normal == Vec2::ZERO {
            Vec2::Y
        } else {
            edge_normal
        }
    } else {
        offset / distance
    };

    let penetration = if tunneled {
        radius - line_distance
    } else {
        radius - distance
    };

    Some(Contact {
        point,
        t,
        distance,
        normal,
        penetration,
        tunneled,
    })
}

/// Apply restitution/friction for one contact and push the body out
pub fn resolve_contact(
    body: &mut Body,
    edge: usize,
    contact: &Contact,
    wall_velocity: Vec2,
) -> ContactEvent {
    let normal = contact.normal;
    let rel_vel = body.vel - wall_velocity;

    // Split relative velocity along the contact normal
    let normal_speed = rel_vel.dot(normal);
    let vn = normal * normal_speed;
    let vt = rel_vel - vn;

    let new_rel_vel = vn * -body.restitution + vt * body.friction;
    body.vel = new_rel_vel + wall_velocity;
    body.pos = contact.point + normal * body.radius;

    ContactEvent {
        edge,
        point: contact.point,
        normal,
        penetration: contact.penetration,
        normal_speed_before: normal_speed,
        normal_speed_after: new_rel_vel.dot(normal),
        tunneled: contact.tunneled,
    }
}

/// Test and resolve every edge in index order
///
/// Later edges see the position already corrected by earlier ones.
pub fn resolve_boundary(body: &mut Body, boundary: &Boundary, verts: &[Vec2]) -> Vec<ContactEvent> {
    let n = verts.len();
    let mut events = Vec::new();

    for i in 0..n {
        let a = verts[i];
        let b = verts[(i + 1) % n];
        if let Some(contact) = detect_contact(a, b, body.pos, body.radius) {
            let wall_vel = boundary.wall_velocity_at(contact.point);
            let event = resolve_contact(body, i, &contact, wall_vel);
            log::trace!(
                "edge {} contact: depth={:.4} vn {:.3} -> {:.3}",
                i,
                event.penetration,
                event.normal_speed_before,
                event.normal_speed_after
            );
            events.push(event);
        }
    }

    events
}
