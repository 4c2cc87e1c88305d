//! Bidirectional interning of textual names to dense integer ids.
//!
//! Two namespaces share the same mechanics:
//! - [`SignalNamespace`] maps signal paths (e.g. `"chamber_air/temperature"`)
//!   to [`SignalId`]s.
//! - [`FunctionNamespace`] maps device and function names to
//!   [`DeviceId`]/[`FunctionId`]s for command routing, in separate id spaces.
//!
//! Thread contract: single-writer during graph setup/compilation, read-only
//! afterwards. Concurrent interning is not supported.

use std::collections::HashMap;

use crate::ids::{DeviceId, FunctionId, Id, SignalId};

/// Forward + reverse string table with monotonic 0-based id allocation.
#[derive(Debug, Clone, Default)]
struct Interner {
    name_to_id: HashMap<String, Id>,
    id_to_name: Vec<String>,
}

impl Interner {
    fn intern(&mut self, name: &str) -> Id {
        if let Some(&id) = self.name_to_id.get(name) {
            return id;
        }
        let id = Id::from_index(self.id_to_name.len() as u32);
        self.name_to_id.insert(name.to_string(), id);
        self.id_to_name.push(name.to_string());
        id
    }

    fn resolve(&self, name: &str) -> Id {
        self.name_to_id.get(name).copied().unwrap_or(Id::INVALID)
    }

    fn lookup(&self, id: Id) -> &str {
        if !id.is_valid() {
            return "";
        }
        self.id_to_name
            .get(id.index() as usize)
            .map_or("", String::as_str)
    }

    fn len(&self) -> usize {
        self.id_to_name.len()
    }

    fn clear(&mut self) {
        self.name_to_id.clear();
        self.id_to_name.clear();
    }
}

/// Maps signal paths to [`SignalId`]s and back.
#[derive(Debug, Clone, Default)]
pub struct SignalNamespace {
    paths: Interner,
}

impl SignalNamespace {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the existing id for a path or allocate the next free one.
    /// Idempotent. Used during graph compilation.
    pub fn intern(&mut self, path: &str) -> SignalId {
        self.paths.intern(path)
    }

    /// Pure lookup; returns the invalid sentinel for unknown paths.
    pub fn resolve(&self, path: &str) -> SignalId {
        self.paths.resolve(path)
    }

    /// Reverse lookup; returns the empty string for unknown ids.
    pub fn lookup(&self, id: SignalId) -> &str {
        self.paths.lookup(id)
    }

    /// Number of interned paths.
    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.len() == 0
    }

    /// All interned paths in id order (deterministic).
    pub fn all_paths(&self) -> Vec<String> {
        self.paths.id_to_name.clone()
    }

    /// Remove all entries and reset the id counter to zero.
    pub fn clear(&mut self) {
        self.paths.clear();
    }
}

/// Maps device and function names to ids for command routing.
///
/// Device and function ids are allocated independently; the same index in
/// each space refers to unrelated names.
#[derive(Debug, Clone, Default)]
pub struct FunctionNamespace {
    devices: Interner,
    functions: Interner,
}

impl FunctionNamespace {
    pub fn new() -> Self {
        Self::default()
    }

    /// Intern a device name (returns the existing id if already interned).
    pub fn intern_device(&mut self, name: &str) -> DeviceId {
        self.devices.intern(name)
    }

    /// Intern a function name (returns the existing id if already interned).
    pub fn intern_function(&mut self, name: &str) -> FunctionId {
        self.functions.intern(name)
    }

    /// Returns the invalid sentinel for unknown device names.
    pub fn resolve_device(&self, name: &str) -> DeviceId {
        self.devices.resolve(name)
    }

    /// Returns the invalid sentinel for unknown function names.
    pub fn resolve_function(&self, name: &str) -> FunctionId {
        self.functions.resolve(name)
    }

    /// Reverse lookup; empty string for unknown ids.
    pub fn lookup_device(&self, id: DeviceId) -> &str {
        self.devices.lookup(id)
    }

    /// Reverse lookup; empty string for unknown ids.
    pub fn lookup_function(&self, id: FunctionId) -> &str {
        self.functions.lookup(id)
    }

    /// Remove all entries and reset both id counters to zero.
    pub fn clear(&mut self) {
        self.devices.clear();
        self.functions.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn intern_is_idempotent() {
        let mut ns = SignalNamespace::new();
        let a = ns.intern("sensor/temp");
        let b = ns.intern("sensor/temp");
        assert_eq!(a, b);
        assert_eq!(ns.len(), 1);
    }

    #[test]
    fn ids_are_contiguous_from_zero() {
        let mut ns = SignalNamespace::new();
        assert_eq!(ns.intern("a").index(), 0);
        assert_eq!(ns.intern("b").index(), 1);
        assert_eq!(ns.intern("c").index(), 2);
    }

    #[test]
    fn intern_resolve_lookup_round_trip() {
        let mut ns = SignalNamespace::new();
        for path in ["a/b", "a/c", "x.y-z", "plain"] {
            let id = ns.intern(path);
            assert_eq!(ns.resolve(path), id);
            assert_eq!(ns.lookup(id), path);
        }
    }

    #[test]
    fn unknown_lookups_yield_sentinels() {
        let ns = SignalNamespace::new();
        assert_eq!(ns.resolve("nope"), Id::INVALID);
        assert_eq!(ns.lookup(Id::from_index(5)), "");
        assert_eq!(ns.lookup(Id::INVALID), "");
    }

    #[test]
    fn clear_resets_id_counter() {
        let mut ns = SignalNamespace::new();
        ns.intern("a");
        ns.intern("b");
        ns.clear();
        assert!(ns.is_empty());
        assert_eq!(ns.intern("fresh").index(), 0);
    }

    #[test]
    fn all_paths_in_id_order() {
        let mut ns = SignalNamespace::new();
        ns.intern("z");
        ns.intern("a");
        ns.intern("m");
        assert_eq!(ns.all_paths(), vec!["z", "a", "m"]);
    }

    #[test]
    fn device_and_function_id_spaces_are_separate() {
        let mut ns = FunctionNamespace::new();
        let dev = ns.intern_device("heater");
        let func = ns.intern_function("shutdown");
        assert_eq!(dev.index(), 0);
        assert_eq!(func.index(), 0);
        assert_eq!(ns.lookup_device(dev), "heater");
        assert_eq!(ns.lookup_function(func), "shutdown");
        assert_eq!(ns.resolve_device("shutdown"), Id::INVALID);
        assert_eq!(ns.resolve_function("heater"), Id::INVALID);
    }
}
