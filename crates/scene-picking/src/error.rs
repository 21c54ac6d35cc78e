//! Error types for pointer projection.

use thiserror::Error;

/// Reasons a pointer position cannot be mapped into the world
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum ProjectionError {
    /// Pointer coordinates were NaN or infinite
    #[error("non-finite pointer position ({x}, {y})")]
    NonFinitePointer { x: f32, y: f32 },

    /// The viewport has no area
    #[error("empty viewport {width}x{height}")]
    EmptyViewport { width: f32, height: f32 },

    /// The pointer ray never meets the target plane
    #[error("pointer ray is parallel to the projection plane")]
    ParallelToPlane,

    /// The target plane lies behind the camera
    #[error("projection plane is behind the camera")]
    BehindCamera,
}
