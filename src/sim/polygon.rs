//! Rotating regular polygon boundary
//!
//! The boundary is defined by:
//! - center: rotation pivot
//! - radius: circumscribed radius (center to each vertex)
//! - sides: vertex count (>= 3)
//! - rotation / angular_velocity: current angle and its rate
//!
//! Vertices are derived, never stored here; callers recompute them per tick.

use glam::Vec2;
use serde::{Deserialize, Serialize};
use std::f32::consts::{PI, TAU};

use crate::polar_to_cartesian;

/// Compute polygon vertices in counter-clockwise angular order
///
/// Vertex `i` sits at angle `rotation + i * 2π / sides`.
pub fn vertices(center: Vec2, radius: f32, sides: u32, rotation: f32) -> Vec<Vec2> {
    let step = TAU / sides as f32;
    (0..sides)
        .map(|i| center + polar_to_cartesian(radius, rotation + i as f32 * step))
        .collect()
}

/// Unit normal of edge `a -> b` pointing into a counter-clockwise polygon
///
/// Returns zero for a degenerate edge.
#[inline]
pub fn inward_normal(a: Vec2, b: Vec2) -> Vec2 {
    (b - a).perp().normalize_or_zero()
}

/// A regular polygon spinning rigidly about its center
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Boundary {
    pub center: Vec2,
    /// Circumscribed radius
    pub radius: f32,
    pub sides: u32,
    /// Current angle (radians, not wrapped)
    pub rotation: f32,
    /// Radians per second
    pub angular_velocity: f32,
}

impl Boundary {
    pub fn new(center: Vec2, radius: f32, sides: u32, rotation: f32, angular_velocity: f32) -> Self {
        Self {
            center,
            radius,
            sides,
            rotation,
            angular_velocity,
        }
    }

    /// Current vertices
    pub fn vertices(&self) -> Vec<Vec2> {
        vertices(self.center, self.radius, self.sides, self.rotation)
    }

    /// Edges as cyclic vertex pairs, in vertex index order
    pub fn edges(&self) -> impl Iterator<Item = (Vec2, Vec2)> {
        let verts = self.vertices();
        let n = verts.len();
        (0..n).map(move |i| (verts[i], verts[(i + 1) % n]))
    }

    /// Advance rotation by one step
    #[inline]
    pub fn advance(&mut self, dt: f32) {
        self.rotation += self.angular_velocity * dt;
    }

    /// Inscribed radius (center to the middle of each edge)
    #[inline]
    pub fn apothem(&self) -> f32 {
        self.radius * (PI / self.sides as f32).cos()
    }

    /// Linear velocity of the rotating surface at a point
    #[inline]
    pub fn wall_velocity_at(&self, point: Vec2) -> Vec2 {
        let r = point - self.center;
        Vec2::new(-self.angular_velocity * r.y, self.angular_velocity * r.x)
    }

    /// Smallest signed distance from a point to the edge lines (positive inside)
    pub fn clearance(&self, point: Vec2) -> (usize, f32) {
        self.edges()
            .enumerate()
            .map(|(i, (a, b))| (i, (point - a).dot(inward_normal(a, b))))
            .fold((0, f32::INFINITY), |best, cur| if cur.1 < best.1 { cur } else { best })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hexagon_vertices() {
        let verts = vertices(Vec2::ZERO, 10.0, 6, 0.0);
        assert_eq!(verts.len(), 6);
        for (i, v) in verts.iter().enumerate() {
            assert!((v.length() - 10.0).abs() < 1e-4);
            let expected = (60.0 * i as f32).to_radians();
            let angle = v.y.atan2(v.x).rem_euclid(TAU);
            let diff = (angle - expected).abs();
            assert!(diff < 1e-4 || (TAU - diff) < 1e-4, "vertex {i} at {angle}");
        }
        assert!((verts[0] - Vec2::new(10.0, 0.0)).length() < 1e-4);
        assert!((verts[3] - Vec2::new(-10.0, 0.0)).length() < 1e-4);
    }

    #[test]
    fn test_vertices_follow_center_and_rotation() {
        let center = Vec2::new(400.0, 300.0);
        let verts = vertices(center, 100.0, 4, PI / 4.0);
        let expected = center + polar_to_cartesian(100.0, PI / 4.0);
        assert!((verts[0] - expected).length() < 1e-3);
    }

    #[test]
    fn test_inward_normal_points_inside() {
        let boundary = Boundary::new(Vec2::ZERO, 10.0, 6, 0.3, 0.0);
        for (a, b) in boundary.edges() {
            let mid = (a + b) * 0.5;
            let n = inward_normal(a, b);
            assert!((n.length() - 1.0).abs() < 1e-5);
            assert!(n.dot(boundary.center - mid) > 0.0);
        }
        assert_eq!(inward_normal(Vec2::ONE, Vec2::ONE), Vec2::ZERO);
    }

    #[test]
    fn test_edges_wrap_around() {
        let boundary = Boundary::new(Vec2::ZERO, 10.0, 5, 0.0, 0.0);
        let verts = boundary.vertices();
        let edges: Vec<_> = boundary.edges().collect();
        assert_eq!(edges.len(), 5);
        assert_eq!(edges[4], (verts[4], verts[0]));
    }

    #[test]
    fn test_wall_velocity() {
        let boundary = Boundary::new(Vec2::new(5.0, 5.0), 10.0, 6, 0.0, 2.0);
        // r = (10, 0): counter-clockwise spin moves the point toward +Y
        let v = boundary.wall_velocity_at(Vec2::new(15.0, 5.0));
        assert!((v - Vec2::new(0.0, 20.0)).length() < 1e-5);
        assert_eq!(boundary.wall_velocity_at(boundary.center), Vec2::ZERO);
    }

    #[test]
    fn test_advance_and_apothem() {
        let mut boundary = Boundary::new(Vec2::ZERO, 10.0, 6, 0.0, 0.5);
        boundary.advance(2.0);
        assert!((boundary.rotation - 1.0).abs() < 1e-6);
        assert!((boundary.apothem() - 10.0 * (PI / 6.0).cos()).abs() < 1e-5);
    }

    #[test]
    fn test_clearance() {
        let boundary = Boundary::new(Vec2::ZERO, 10.0, 4, 0.0, 0.0);
        let (_, inside) = boundary.clearance(Vec2::ZERO);
        assert!((inside - boundary.apothem()).abs() < 1e-4);
        let (_, outside) = boundary.clearance(Vec2::new(20.0, 0.0));
        assert!(outside < 0.0);
    }
}
