//! Pointer-to-world projection
//!
//! Pointer events arrive in client pixels (origin top-left, y down). They
//! are mapped to normalized device coordinates, turned into a ray from the
//! camera and intersected with the `z = 0` world plane, which gives a stable
//! position regardless of how far the camera sits from that plane.

use crate::camera::Camera;
use crate::error::ProjectionError;
use crate::ray::Ray;
use glam::{Vec2, Vec3};

/// Rays whose `|direction.z|` falls below this are treated as edge-on
pub const PARALLEL_EPSILON: f32 = 1e-4;

/// Size of the surface pointer coordinates are measured against
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Result<Self, ProjectionError> {
        let viewport = Self { width, height };
        viewport.check()?;
        Ok(viewport)
    }

    fn check(&self) -> Result<(), ProjectionError> {
        let usable = |v: f32| v.is_finite() && v > 0.0;
        if usable(self.width) && usable(self.height) {
            Ok(())
        } else {
            Err(ProjectionError::EmptyViewport {
                width: self.width,
                height: self.height,
            })
        }
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width * 0.5, self.height * 0.5)
    }

    /// Pixel position to normalized device coordinates.
    ///
    /// Positions outside the viewport are clamped to its edge.
    pub fn to_ndc(&self, client_x: f32, client_y: f32) -> Result<Vec2, ProjectionError> {
        self.check()?;
        if !client_x.is_finite() || !client_y.is_finite() {
            return Err(ProjectionError::NonFinitePointer {
                x: client_x,
                y: client_y,
            });
        }

        let x = client_x.clamp(0.0, self.width);
        let y = client_y.clamp(0.0, self.height);
        Ok(Vec2::new(
            2.0 * x / self.width - 1.0,
            1.0 - 2.0 * y / self.height,
        ))
    }

    /// Camera ray through a pixel
    pub fn pointer_ray(
        &self,
        client_x: f32,
        client_y: f32,
        camera: &Camera,
    ) -> Result<Ray, ProjectionError> {
        let ndc = self.to_ndc(client_x, client_y)?;
        Ok(camera.ray_through_ndc(ndc))
    }
}

/// Project a pixel onto the `z = 0` world plane.
pub fn project(
    client_x: f32,
    client_y: f32,
    viewport: &Viewport,
    camera: &Camera,
) -> Result<Vec3, ProjectionError> {
    project_onto_plane(client_x, client_y, viewport, camera, 0.0)
}

/// Project a pixel onto the plane `z = plane_z`.
pub fn project_onto_plane(
    client_x: f32,
    client_y: f32,
    viewport: &Viewport,
    camera: &Camera,
    plane_z: f32,
) -> Result<Vec3, ProjectionError> {
    let ray = viewport.pointer_ray(client_x, client_y, camera)?;
    let t = ray
        .intersect_plane_z(plane_z, PARALLEL_EPSILON)
        .ok_or(ProjectionError::ParallelToPlane)?;
    if t <= 0.0 || !t.is_finite() {
        return Err(ProjectionError::BehindCamera);
    }
    Ok(ray.at(t))
}
