//! Pixel-to-plane projection for brush placement

use crate::core::camera::Camera;
use crate::core::types::{Vec2, Vec3};
use crate::math::Ray;

/// Pointer state reported by the host each tick
#[derive(Clone, Copy, Debug, Default)]
pub struct PointerState {
    /// Pixel position within the viewport (origin top-left)
    pub position: Vec2,
    /// Whether the sculpting input is held down
    pub active: bool,
}

/// Projects 2D viewport coordinates onto the horizontal reference plane.
///
/// The intersection is computed against the idealized `y = plane_y`
/// plane, not the displaced terrain surface, so on steep slopes the
/// projected brush center can sit off the visible surface. That is a
/// known limitation of plane picking, kept as-is rather than
/// special-cased.
#[derive(Clone, Copy, Debug)]
pub struct CursorProjector {
    /// Height of the reference plane
    pub plane_y: f32,
}

impl Default for CursorProjector {
    fn default() -> Self {
        Self { plane_y: 0.0 }
    }
}

impl CursorProjector {
    /// Create a projector against the plane `y = plane_y`
    pub fn new(plane_y: f32) -> Self {
        Self { plane_y }
    }

    /// Build a world-space ray from the camera through a viewport pixel
    pub fn ray_through(camera: &Camera, viewport: (f32, f32), pixel: Vec2) -> Ray {
        let ndc_x = (pixel.x / viewport.0) * 2.0 - 1.0;
        let ndc_y = -((pixel.y / viewport.1) * 2.0 - 1.0);

        // Unproject the pixel at the near and far planes (0..1 depth)
        let inv_vp = camera.view_projection_inverse();
        let near = inv_vp.project_point3(Vec3::new(ndc_x, ndc_y, 0.0));
        let far = inv_vp.project_point3(Vec3::new(ndc_x, ndc_y, 1.0));

        Ray::new(near, (far - near).normalize())
    }

    /// Project a viewport pixel onto the reference plane.
    /// None when the ray runs parallel to the plane or points away.
    pub fn project(
        &self,
        camera: &Camera,
        viewport: (f32, f32),
        pixel: Vec2,
    ) -> Option<Vec3> {
        let ray = Self::ray_through(camera, viewport, pixel);
        let t = ray.intersect_plane_y(self.plane_y)?;
        Some(ray.at(t))
    }
}
