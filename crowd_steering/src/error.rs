//! Error type for behaviour construction and agent integration.
//!
//! Steering itself never fails: degenerate geometry falls back to zero
//! output. Errors only arise from bad configuration or bad integrator input.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SteeringError {
    #[error("invalid value {value} for parameter `{name}`")]
    InvalidParameter { name: &'static str, value: f64 },

    #[error("a path needs at least one waypoint")]
    EmptyPath,

    #[error("time step must be finite and non-negative, got {0}")]
    InvalidTimeStep(f64),

    #[error("steering command contains a non-finite component")]
    NonFiniteCommand,
}

pub type SteeringResult<T> = Result<T, SteeringError>;

/// Checks that a parameter used as a divisor is finite and strictly positive.
pub(crate) fn require_positive(name: &'static str, value: f64) -> SteeringResult<f64> {
    if value.is_finite() && value > 0f64 {
        Ok(value)
    } else {
        Err(SteeringError::InvalidParameter { name, value })
    }
}

/// Checks that a limit or radius is finite and not negative.
pub(crate) fn require_non_negative(name: &'static str, value: f64) -> SteeringResult<f64> {
    if value.is_finite() && value >= 0f64 {
        Ok(value)
    } else {
        Err(SteeringError::InvalidParameter { name, value })
    }
}
