//! Error types for tick execution.

use thiserror::Error;

use fg_core::CoreError;

/// Result type for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;

/// Errors surfaced by the engine.
///
/// The precondition failures (`NotLoaded`, `InvalidDt`,
/// `StabilityViolation`) abort the tick before any state mutation; the
/// store is left exactly as the caller supplied it.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EngineError {
    /// `tick` called before any program was loaded.
    #[error("No program loaded")]
    NotLoaded,

    /// `tick` called with a non-positive time step.
    #[error("Invalid time step: dt = {dt} s (must be positive)")]
    InvalidDt { dt: f64 },

    /// The supplied time step exceeds a model's stable step.
    #[error("Stability violation: {model} requires dt <= {limit} s, but dt = {dt} s")]
    StabilityViolation { model: String, dt: f64, limit: f64 },

    /// A model or edge write violated a signal's declared unit.
    #[error(transparent)]
    Store(#[from] CoreError),
}
