//! Drift error types

use thiserror::Error;

/// Configuration errors
///
/// Every variant is a precondition violation detected when a unit is built
/// or reconfigured. Per-tick operations never produce these.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DriftError {
    /// Step count below one
    #[error("Step count must be at least 1, got {0}")]
    InvalidStepCount(usize),

    /// Follow speed outside (0, 1]
    #[error("Speed for point '{name}' must be in (0, 1], got {speed}")]
    InvalidSpeed { name: String, speed: f32 },

    /// Snap points not strictly increasing from 0 to 1
    #[error("Invalid snap points: {0}")]
    InvalidSnapPoints(String),

    /// Two tracked points share a name
    #[error("Tracked point '{0}' is already registered")]
    DuplicatePoint(String),

    /// Lookup of a tracked point that was never registered
    #[error("Tracked point '{0}' does not exist")]
    UnknownPoint(String),

    /// NaN or infinite value where a finite number is required
    #[error("Non-finite value for {0}")]
    NonFinite(&'static str),

    /// Any other invalid configuration value
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Result type for Drift configuration
pub type Result<T> = std::result::Result<T, DriftError>;
