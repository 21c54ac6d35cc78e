//! Error types for building the animation context.

use particle_effects::ConfigError;
use scene_picking::ProjectionError;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum FxError {
    /// Effect or scheduler parameters failed validation
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),

    /// The initial viewport is unusable
    #[error("invalid viewport: {0}")]
    Viewport(#[from] ProjectionError),
}
