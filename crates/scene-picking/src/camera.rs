//! Camera system for 3D visualization

use crate::ray::Ray;
use glam::{Mat3, Mat4, Quat, Vec2, Vec3};

/// Orbit camera: looks at `target` from `distance` along `rotation * +Z`
#[derive(Clone, Debug, PartialEq)]
pub struct Camera {
    pub distance: f32,
    pub rotation: Quat,
    pub target: Vec3,
    pub aspect: f32,
    pub fovy: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl Camera {
    /// Landing page camera: five units back on +Z looking down -Z
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            distance: 5.0,
            rotation: Quat::IDENTITY,
            target: Vec3::ZERO,
            aspect: aspect(width, height),
            fovy: 75.0_f32.to_radians(),
            znear: 0.1,
            zfar: 100.0,
        }
    }

    /// Camera framing the portfolio scene
    pub fn scene(width: u32, height: u32) -> Self {
        let mut camera = Self::looking_at(Vec3::new(16.0, 12.0, 20.0), Vec3::new(0.0, 1.0, 0.0));
        camera.aspect = aspect(width, height);
        camera.fovy = 60.0_f32.to_radians();
        camera.zfar = 1000.0;
        camera
    }

    /// Camera at `position` facing `target`, keeping +Y up
    pub fn looking_at(position: Vec3, target: Vec3) -> Self {
        let offset = position - target;
        let distance = offset.length();
        let back = offset.try_normalize().unwrap_or(Vec3::Z);
        let right = Vec3::Y.cross(back).try_normalize().unwrap_or(Vec3::X);
        let up = back.cross(right);
        let rotation = Quat::from_mat3(&Mat3::from_cols(right, up, back)).normalize();

        Self {
            distance,
            rotation,
            target,
            ..Self::new(1, 1)
        }
    }

    pub fn position(&self) -> Vec3 {
        let offset = self.rotation * Vec3::new(0.0, 0.0, self.distance);
        self.target + offset
    }

    /// Unit vector the camera looks along
    pub fn forward(&self) -> Vec3 {
        self.rotation * Vec3::NEG_Z
    }

    pub fn rotate(&mut self, delta_x: f32, delta_y: f32) {
        let up = self.rotation * Vec3::Y;
        let yaw_rotation = Quat::from_axis_angle(up, delta_x);

        let right = self.rotation * Vec3::X;
        let pitch_rotation = Quat::from_axis_angle(right, -delta_y);

        self.rotation = yaw_rotation * pitch_rotation * self.rotation;
        self.rotation = self.rotation.normalize();
    }

    pub fn zoom(&mut self, delta: f32) {
        self.distance = (self.distance + delta).clamp(1.0, 50000.0);
    }

    pub fn view_matrix(&self) -> Mat4 {
        let rotation_matrix = Mat4::from_quat(self.rotation.conjugate());
        let translation_matrix = Mat4::from_translation(-self.position());
        rotation_matrix * translation_matrix
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fovy, self.aspect, self.znear, self.zfar)
    }

    pub fn build_view_projection_matrix(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    pub fn inverse_view_projection(&self) -> Mat4 {
        self.build_view_projection_matrix().inverse()
    }

    /// Map a normalized device coordinate (depth in [0, 1]) back to world space
    pub fn unproject(&self, ndc: Vec3) -> Vec3 {
        self.inverse_view_projection().project_point3(ndc)
    }

    /// Ray from the eye through a point in normalized device coordinates
    pub fn ray_through_ndc(&self, ndc: Vec2) -> Ray {
        let origin = self.position();
        let on_near_plane = self.unproject(ndc.extend(0.0));
        let direction = (on_near_plane - origin)
            .try_normalize()
            .unwrap_or_else(|| self.forward());
        Ray::new(origin, direction)
    }

    /// Zero-sized surfaces (minimized windows) keep the previous aspect.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.aspect = aspect(width, height);
    }
}

fn aspect(width: u32, height: u32) -> f32 {
    width.max(1) as f32 / height.max(1) as f32
}
