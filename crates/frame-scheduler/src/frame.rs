//! Per-tick output handed to the renderer

use glam::{EulerRot, Quat, Vec3};
use particle_effects::{BurstDraw, BurstId, TrailVertex};
use scene_picking::ContentKey;

/// A click that landed on a tagged node; the panel layer shows `key`.
#[derive(Clone, Debug, PartialEq)]
pub struct HitEvent {
    pub key: ContentKey,
    pub point: Vec3,
}

/// Fully updated state after one tick
///
/// Trail and burst vertices are in world space and must not be turned with
/// the scene. The starfield hangs off the scene root, so its world
/// orientation is [`starfield_orientation`](Self::starfield_orientation).
#[derive(Clone, Debug, Default)]
pub struct Frame {
    /// Sequence number, starting at 1 for the first tick
    pub tick: u64,
    pub now_ms: f64,
    /// Accumulated auto-rotation of the scene root about +Y
    pub scene_rotation_y: f32,
    /// Backdrop `(x, y)` Euler rotation relative to the scene root
    pub starfield_rotation: (f32, f32),
    pub trail: Vec<TrailVertex>,
    pub bursts: Vec<BurstDraw>,
    /// Bursts that ended this tick; their GPU buffers can be released
    pub retired_bursts: Vec<BurstId>,
    pub hits: Vec<HitEvent>,
}

impl Frame {
    pub(crate) fn reset(&mut self, tick: u64, now_ms: f64) {
        self.tick = tick;
        self.now_ms = now_ms;
        self.trail.clear();
        self.bursts.clear();
        self.retired_bursts.clear();
        self.hits.clear();
    }

    /// Scene root rotation about +Y
    pub fn scene_orientation(&self) -> Quat {
        Quat::from_rotation_y(self.scene_rotation_y)
    }

    /// World orientation of the starfield: its own spin inside the rotating scene
    pub fn starfield_orientation(&self) -> Quat {
        let (x, y) = self.starfield_rotation;
        self.scene_orientation() * Quat::from_euler(EulerRot::XYZ, x, y, 0.0)
    }

    /// Points drawn this frame across the trail and all bursts
    pub fn point_count(&self) -> usize {
        self.trail.len() + self.bursts.iter().map(|b| b.vertices.len()).sum::<usize>()
    }
}

/// What a frame consumer wants the loop to do next
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoopControl {
    Continue,
    Stop,
}
