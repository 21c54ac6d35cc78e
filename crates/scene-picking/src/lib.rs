//! # Scene Picking
//!
//! Camera math, pointer projection and ray hit-testing against a tagged
//! scene graph.

pub mod camera;
pub mod error;
pub mod projector;
pub mod ray;
pub mod scene;
pub mod tags;

pub use camera::*;
pub use error::ProjectionError;
pub use hit_test::*;
pub use projector::*;
pub use ray::*;
pub use scene::*;
pub use tags::*;
