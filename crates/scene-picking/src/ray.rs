//! Rays and the primitive intersection tests used for picking
//!
//! Intersection routines return the ray parameter `t` of the nearest hit in
//! front of the origin. They accept non-normalized directions, so a ray
//! carried into a node's local space keeps the same parameterization as the
//! world-space ray it came from.

use glam::{Affine3A, Vec3};

/// Hits closer than this to the origin are treated as self-intersections
const T_EPSILON: f32 = 1e-6;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self { origin, direction }
    }

    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }

    /// Carry the ray through an affine transform without renormalizing.
    pub fn transformed(&self, transform: &Affine3A) -> Ray {
        Ray {
            origin: transform.transform_point3(self.origin),
            direction: transform.transform_vector3(self.direction),
        }
    }

    /// Parameter where the ray crosses the plane `z = plane_z`.
    ///
    /// Returns `None` if the ray runs parallel to the plane (within
    /// `epsilon` of zero in `direction.z`).
    pub fn intersect_plane_z(&self, plane_z: f32, epsilon: f32) -> Option<f32> {
        if self.direction.z.abs() < epsilon {
            return None;
        }
        Some((plane_z - self.origin.z) / self.direction.z)
    }

    pub fn intersect_sphere(&self, center: Vec3, radius: f32) -> Option<f32> {
        let oc = self.origin - center;
        let a = self.direction.length_squared();
        if a == 0.0 {
            return None;
        }
        let half_b = oc.dot(self.direction);
        let c = oc.length_squared() - radius * radius;
        let discriminant = half_b * half_b - a * c;
        if discriminant < 0.0 {
            return None;
        }

        let sqrt_d = discriminant.sqrt();
        let near = (-half_b - sqrt_d) / a;
        if near > T_EPSILON {
            return Some(near);
        }
        // origin inside the sphere
        let far = (-half_b + sqrt_d) / a;
        (far > T_EPSILON).then_some(far)
    }

    /// Slab test against an axis-aligned box
    pub fn intersect_aabb(&self, min: Vec3, max: Vec3) -> Option<f32> {
        let mut t_min = f32::NEG_INFINITY;
        let mut t_max = f32::INFINITY;

        for axis in 0..3 {
            let origin = self.origin[axis];
            let dir = self.direction[axis];
            if dir.abs() < f32::EPSILON {
                if origin < min[axis] || origin > max[axis] {
                    return None;
                }
                continue;
            }
            let inv = 1.0 / dir;
            let mut t0 = (min[axis] - origin) * inv;
            let mut t1 = (max[axis] - origin) * inv;
            if t0 > t1 {
                std::mem::swap(&mut t0, &mut t1);
            }
            t_min = t_min.max(t0);
            t_max = t_max.min(t1);
            if t_min > t_max {
                return None;
            }
        }

        if t_min > T_EPSILON {
            Some(t_min)
        } else if t_max > T_EPSILON {
            Some(t_max)
        } else {
            None
        }
    }

    /// Möller–Trumbore, double-sided
    pub fn intersect_triangle(&self, [a, b, c]: [Vec3; 3]) -> Option<f32> {
        let edge1 = b - a;
        let edge2 = c - a;
        let p = self.direction.cross(edge2);
        let det = edge1.dot(p);
        if det.abs() < 1e-9 {
            return None;
        }
        let inv_det = 1.0 / det;

        let s = self.origin - a;
        let u = s.dot(p) * inv_det;
        if !(0.0..=1.0).contains(&u) {
            return None;
        }

        let q = s.cross(edge1);
        let v = self.direction.dot(q) * inv_det;
        if v < 0.0 || u + v > 1.0 {
            return None;
        }

        let t = edge2.dot(q) * inv_det;
        (t > T_EPSILON).then_some(t)
    }
}
