//! Vertex layouts handed to the renderer
//!
//! Both types are plain `repr(C)` data so a backend can upload them with
//! `bytemuck::cast_slice` without any repacking.

use crate::constants::{TRAIL_INNER_COLOR, TRAIL_OUTER_COLOR};
use bytemuck::{Pod, Zeroable};
use glam::Vec3;

/// One trail point: world position plus age-derived alpha
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct TrailVertex {
    pub position: [f32; 3],
    pub alpha: f32,
}

impl TrailVertex {
    /// Sprite color at `dist` from the point center (0 at the center, 0.5 at
    /// the sprite edge): a gradient from [`TRAIL_INNER_COLOR`] to
    /// [`TRAIL_OUTER_COLOR`], faded out toward the rim and scaled by `alpha`.
    pub fn shade(&self, dist: f32) -> [f32; 4] {
        let dist = dist.max(0.0);
        let t = ((0.6 - dist) / 0.6).clamp(0.0, 1.0);
        let fade = t * t * (3.0 - 2.0 * t);
        let mix =
            |i: usize| TRAIL_INNER_COLOR[i] + (TRAIL_OUTER_COLOR[i] - TRAIL_INNER_COLOR[i]) * dist;
        [mix(0), mix(1), mix(2), fade * self.alpha]
    }
}

/// One burst or backdrop point
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct PointVertex {
    pub position: [f32; 3],
    /// Point size in world units
    pub size: f32,
    /// Linear RGBA; alpha carries the owning effect's opacity
    pub color: [f32; 4],
}

impl PointVertex {
    pub fn new(position: Vec3, size: f32, color: [f32; 4]) -> Self {
        Self {
            position: position.to_array(),
            size,
            color,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vertex_layouts_are_tightly_packed() {
        assert_eq!(std::mem::size_of::<TrailVertex>(), 16);
        assert_eq!(std::mem::size_of::<PointVertex>(), 32);

        let verts = [TrailVertex {
            position: [1.0, 2.0, 3.0],
            alpha: 0.5,
        }];
        let floats: &[f32] = bytemuck::cast_slice(&verts);
        assert_eq!(floats, &[1.0, 2.0, 3.0, 0.5]);
    }

    #[test]
    fn test_trail_sprite_gradient() {
        let v = TrailVertex {
            position: [0.0; 3],
            alpha: 0.5,
        };
        assert_eq!(v.shade(0.0), [0.2, 0.7, 1.0, 0.5]);

        let mid = v.shade(0.3);
        assert!((mid[0] - 0.32).abs() < 1e-6);
        assert!((mid[1] - 0.58).abs() < 1e-6);
        assert!((mid[3] - 0.25).abs() < 1e-6);

        // the fade reaches zero before the outer color is fully mixed in
        assert_eq!(v.shade(0.6)[3], 0.0);
        assert_eq!(v.shade(1.0)[2], 1.0);
    }
}
