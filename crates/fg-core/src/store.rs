//! Signal values and the central signal store.

use std::collections::{HashMap, HashSet};

use crate::error::{CoreError, CoreResult};
use crate::ids::SignalId;

/// Unit string every signal starts with and every empty unit normalizes to.
pub const DIMENSIONLESS: &str = "dimensionless";

/// A signal value with its unit metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct Signal {
    pub value: f64,
    pub unit: String,
}

impl Signal {
    /// Create a signal with an explicit unit.
    pub fn new(value: f64, unit: impl Into<String>) -> Self {
        Self {
            value,
            unit: unit.into(),
        }
    }
}

impl Default for Signal {
    fn default() -> Self {
        Self {
            value: 0.0,
            unit: DIMENSIONLESS.to_string(),
        }
    }
}

/// Central storage for all signal values and metadata.
///
/// Single-writer by design; no internal synchronization. Values live in a
/// dense vector indexed by the integer id: the namespace allocates ids
/// contiguously from zero, so the flat array is both the fastest and the
/// simplest representation.
///
/// Unit discipline: the first non-dimensionless write to a signal installs
/// its declared unit; every later write must agree with the declaration or
/// fails with [`CoreError::UnitMismatch`]. `clear()` wipes values but keeps
/// declarations (unit contracts belong to the graph, not to any one run).
#[derive(Debug, Clone, Default)]
pub struct SignalStore {
    signals: Vec<Option<Signal>>,
    physics_driven: HashSet<SignalId>,
    declared_units: HashMap<SignalId, String>,
}

impl SignalStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Write a signal value with unit metadata.
    ///
    /// Writes addressed to the invalid sentinel are silently dropped. An
    /// empty unit normalizes to `"dimensionless"`. On a unit conflict the
    /// store is left unchanged for this write.
    pub fn write(&mut self, id: SignalId, value: f64, unit: &str) -> CoreResult<()> {
        if !id.is_valid() {
            return Ok(());
        }

        let unit = if unit.is_empty() { DIMENSIONLESS } else { unit };

        // First non-dimensionless write declares the expected unit. Never
        // freeze the contract to "dimensionless": that is just the
        // unwritten/default state.
        if unit != DIMENSIONLESS && !self.declared_units.contains_key(&id) {
            self.declared_units.insert(id, unit.to_string());
        }

        if let Some(expected) = self.declared_units.get(&id) {
            if expected != unit {
                return Err(CoreError::UnitMismatch {
                    signal: id,
                    expected: expected.clone(),
                    got: unit.to_string(),
                });
            }
        }

        let index = id.index() as usize;
        if index >= self.signals.len() {
            self.signals.resize_with(index + 1, || None);
        }
        self.signals[index] = Some(Signal::new(value, unit));
        Ok(())
    }

    /// Read a signal (value + unit). Unknown and sentinel ids read as the
    /// default `(0.0, "dimensionless")`; reads never fail.
    pub fn read(&self, id: SignalId) -> Signal {
        self.get(id).cloned().unwrap_or_default()
    }

    /// Read only the value.
    pub fn read_value(&self, id: SignalId) -> f64 {
        self.get(id).map_or(0.0, |signal| signal.value)
    }

    /// Declare the expected unit for a signal directly.
    pub fn declare_unit(&mut self, id: SignalId, expected_unit: impl Into<String>) {
        self.declared_units.insert(id, expected_unit.into());
    }

    /// Check a unit against any declaration without writing.
    pub fn validate_unit(&self, id: SignalId, unit: &str) -> CoreResult<()> {
        let unit = if unit.is_empty() { DIMENSIONLESS } else { unit };
        if let Some(expected) = self.declared_units.get(&id) {
            if expected != unit {
                return Err(CoreError::UnitMismatch {
                    signal: id,
                    expected: expected.clone(),
                    got: unit.to_string(),
                });
            }
        }
        Ok(())
    }

    /// Mark or unmark a signal as driven by a physics model.
    pub fn mark_physics_driven(&mut self, id: SignalId, driven: bool) {
        if driven {
            self.physics_driven.insert(id);
        } else {
            self.physics_driven.remove(&id);
        }
    }

    /// Whether a physics model produces this signal's value.
    pub fn is_physics_driven(&self, id: SignalId) -> bool {
        self.physics_driven.contains(&id)
    }

    /// Pre-allocate storage for the expected number of signals.
    pub fn reserve(&mut self, max_signals: usize) {
        if max_signals > self.signals.len() {
            self.signals.reserve(max_signals - self.signals.len());
        }
    }

    /// Number of signals that currently hold a written value.
    pub fn len(&self) -> usize {
        self.signals.iter().flatten().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Wipe values and physics-driven flags. Declared units survive.
    pub fn clear(&mut self) {
        self.signals.clear();
        self.physics_driven.clear();
    }

    fn get(&self, id: SignalId) -> Option<&Signal> {
        if !id.is_valid() {
            return None;
        }
        self.signals.get(id.index() as usize)?.as_ref()
    }
}
