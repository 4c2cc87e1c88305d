//! Compile-time error types.

use thiserror::Error;

use fg_core::SignalId;

use crate::compiler::SignalOwner;

/// Result type for graph compilation.
pub type CompileResult<T> = Result<T, CompileError>;

/// Errors that abort a compile. No partial program is ever returned.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CompileError {
    /// Transform kind tag not recognized by `parse_transform`.
    #[error("Unknown transform type: {kind}")]
    UnknownTransformType { kind: String },

    /// Model kind tag not recognized by `parse_model`.
    #[error("Unknown model type: {kind}")]
    UnknownModelType { kind: String },

    /// A required parameter is absent.
    #[error("Missing required parameter at {context}/{name}")]
    MissingParameter { context: String, name: String },

    /// A parameter has the wrong variant type. Only int64 -> double
    /// coercion is permitted.
    #[error("Type error at {context}/{name}: expected {expected}, got {got}")]
    TypeError {
        context: String,
        name: String,
        expected: &'static str,
        got: &'static str,
    },

    /// A parameter is the right type but an unusable value.
    #[error("Invalid parameter at {context}/{name}: {reason}")]
    InvalidParameter {
        context: String,
        name: String,
        reason: String,
    },

    /// Two writers claim the same target signal.
    #[error("Multiple writers for signal '{path}' (id {signal}): '{existing}' conflicts with '{conflicting}'")]
    MultipleWriters {
        signal: SignalId,
        path: String,
        existing: SignalOwner,
        conflicting: SignalOwner,
    },

    /// A feedback loop with no delay edge on it.
    #[error("Cycle detected in non-delay subgraph: {}. Add a delay edge in the feedback path.", path.join(" -> "))]
    CycleDetected { path: Vec<String> },

    /// Rule condition did not match `<signal_path> <op> <number>`.
    #[error("Unsupported condition syntax for rule '{rule_id}': '{condition}'. Supported form: <signal_path> <op> <number>")]
    BadRuleCondition { rule_id: String, condition: String },

    /// The expected time step exceeds a model's stable step.
    #[error("Stability violation: {model} requires dt <= {limit} s, but dt = {dt} s")]
    StabilityViolation { model: String, dt: f64, limit: f64 },
}
