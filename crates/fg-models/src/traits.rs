//! Core trait for physics model blocks.

use fg_core::{CoreResult, SignalId, SignalStore};

/// Stateful physics block driven by the engine's model stage.
///
/// Models read their input signals from the store, integrate forward by one
/// `dt`, and write their owned output signals (marking them physics-driven).
/// The store enforces unit contracts on those writes, which is the only way
/// a model tick can fail.
pub trait Model: Send + Sync + std::fmt::Debug {
    /// Advance the model by `dt` seconds.
    fn tick(&mut self, dt: f64, store: &mut SignalStore) -> CoreResult<()>;

    /// Reset to initial conditions.
    fn reset(&mut self);

    /// Maximum stable time step under the implied forward-integration
    /// scheme, in seconds. `f64::INFINITY` means unconditionally stable.
    fn stability_limit(&self) -> f64;

    /// Human-readable description used in diagnostics.
    fn describe(&self) -> String;

    /// Signals this model writes. The compiler registers each as a
    /// model-owned output in the single-writer map.
    fn output_signals(&self) -> Vec<SignalId>;
}
