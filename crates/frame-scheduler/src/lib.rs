//! # Frame Scheduler
//!
//! Owns the animation context and advances every effect once per display
//! frame: pointer trail, click bursts, idle auto-rotation and the starfield.

pub mod auto_rotate;
pub mod context;
pub mod error;
pub mod frame;
pub mod input;
pub mod params;
pub mod scheduler;

pub use auto_rotate::*;
pub use context::*;
pub use error::FxError;
pub use frame::*;
pub use input::*;
pub use params::*;
pub use scheduler::*;
