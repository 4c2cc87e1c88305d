use thiserror::Error;

use crate::ids::SignalId;

/// Result type for core store operations.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors surfaced by the signal store.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    /// A write or validation disagreed with the signal's declared unit.
    #[error("Unit mismatch for signal {signal}: expected '{expected}', got '{got}'")]
    UnitMismatch {
        signal: SignalId,
        expected: String,
        got: String,
    },
}
