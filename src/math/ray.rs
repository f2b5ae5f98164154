//! Ray type and operations

use crate::core::types::Vec3;

/// A ray defined by origin and direction
#[derive(Clone, Copy, Debug)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    /// Create a new ray (direction should be normalized)
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self { origin, direction }
    }

    /// Get point along ray at parameter t
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }

    /// Intersect with the horizontal plane `y = plane_y`.
    /// Returns the ray parameter t, or None when the ray runs parallel
    /// to the plane or the hit lies behind the origin.
    pub fn intersect_plane_y(&self, plane_y: f32) -> Option<f32> {
        if self.direction.y.abs() < 1e-6 {
            return None;
        }
        let t = (plane_y - self.origin.y) / self.direction.y;
        if t < 0.0 {
            return None;
        }
        Some(t)
    }
}
