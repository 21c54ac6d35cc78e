//! Error types for effect configuration.

use thiserror::Error;

/// Errors raised when validating effect parameters
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// A count that must be positive was zero
    #[error("{0} must be greater than zero")]
    ZeroCount(&'static str),

    /// A numeric parameter was NaN or infinite
    #[error("{0} must be finite")]
    NotFinite(&'static str),

    /// A parameter was outside its allowed range
    #[error("{name} out of range: {value}")]
    OutOfRange { name: &'static str, value: f32 },

    /// A count exceeded what a single pool may hold
    #[error("{name} is {value}, above the limit of {max}")]
    TooLarge {
        name: &'static str,
        value: usize,
        max: usize,
    },

    /// A min/max pair was inverted
    #[error("{0}: minimum exceeds maximum")]
    InvertedRange(&'static str),
}

pub type Result<T> = std::result::Result<T, ConfigError>;
