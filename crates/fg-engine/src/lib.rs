//! fg-engine: tick execution engine for FluxGraph.
//!
//! The engine owns a [`CompiledProgram`](fg_graph::CompiledProgram) and
//! advances it one fixed time step at a time through the five-stage tick,
//! queueing [`Command`]s for the host to drain. Determinism contract: for a
//! fixed spec, identical initial store, identical input writes and identical
//! `dt` sequence, two engines produce bit-identical store states and command
//! sequences at every tick.

pub mod command;
pub mod engine;
pub mod error;

// Re-exports
pub use command::Command;
pub use engine::Engine;
pub use error::{EngineError, EngineResult};
