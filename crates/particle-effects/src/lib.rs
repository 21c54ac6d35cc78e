//! # Particle Effects
//!
//! CPU-side particle effects for the portfolio scene: the fading mouse trail,
//! spark and firework bursts, and the drifting backdrop starfield.

pub mod burst;
pub mod color;
pub mod config;
pub mod constants;
pub mod error;
pub mod starfield;
pub mod trail;
pub mod vertex;

pub use burst::*;
pub use color::*;
pub use config::*;
pub use constants::*;
pub use error::ConfigError;
pub use starfield::*;
pub use trail::*;
pub use vertex::*;
