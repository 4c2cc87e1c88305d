//! Plain-data graph specification.
//!
//! These structs are the protocol-agnostic description a host hands to the
//! compiler: built programmatically, or read from JSON/YAML by `fg-loaders`
//! (the file schema is a literal translation of these types). Parameter maps
//! are `BTreeMap` so iteration order is deterministic for every diagnostic
//! and compilation step that walks them.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use fg_core::Variant;

/// Specification of a transform attached to an edge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct TransformSpec {
    /// Transform kind tag: `"linear"`, `"first_order_lag"`, `"delay"`, ...
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub params: BTreeMap<String, Variant>,
}

impl TransformSpec {
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            params: BTreeMap::new(),
        }
    }

    /// Add one parameter; chainable.
    pub fn with_param(mut self, name: impl Into<String>, value: impl Into<Variant>) -> Self {
        self.params.insert(name.into(), value.into());
        self
    }
}

/// Specification of a signal edge: source path, target path, transform.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeSpec {
    pub source: String,
    pub target: String,
    pub transform: TransformSpec,
}

impl EdgeSpec {
    pub fn new(source: impl Into<String>, target: impl Into<String>, transform: TransformSpec) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            transform,
        }
    }
}

/// Specification of a physics model instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelSpec {
    /// Unique model identifier, e.g. `"chamber_air"`.
    pub id: String,
    /// Model kind tag, e.g. `"thermal_mass"`.
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub params: BTreeMap<String, Variant>,
}

impl ModelSpec {
    pub fn new(id: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind: kind.into(),
            params: BTreeMap::new(),
        }
    }

    /// Add one parameter; chainable.
    pub fn with_param(mut self, name: impl Into<String>, value: impl Into<Variant>) -> Self {
        self.params.insert(name.into(), value.into());
        self
    }
}

/// One action a rule emits when its condition fires.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionSpec {
    /// Target device name, e.g. `"heater"`.
    pub device: String,
    /// Function to invoke on the device, e.g. `"shutdown"`.
    pub function: String,
    #[serde(default)]
    pub args: BTreeMap<String, Variant>,
}

/// Specification of a reactive rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleSpec {
    pub id: String,
    /// Condition of the form `<signal_path> <op> <number>`.
    pub condition: String,
    #[serde(default)]
    pub actions: Vec<ActionSpec>,
    /// Host-side error policy, carried through verbatim.
    #[serde(default)]
    pub on_error: String,
}

/// Complete graph specification.
///
/// Sequence order is preserved through compilation wherever it affects
/// determinism: models tick in spec order, delay edges execute in spec
/// order, rules evaluate in spec order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct GraphSpec {
    #[serde(default)]
    pub models: Vec<ModelSpec>,
    #[serde(default)]
    pub edges: Vec<EdgeSpec>,
    #[serde(default)]
    pub rules: Vec<RuleSpec>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transform_spec_builder() {
        let spec = TransformSpec::new("linear")
            .with_param("scale", 2.0)
            .with_param("offset", 1.0);
        assert_eq!(spec.kind, "linear");
        assert_eq!(spec.params.len(), 2);
    }

    #[test]
    fn graph_spec_json_round_trip() {
        let spec = GraphSpec {
            models: vec![ModelSpec::new("m", "thermal_mass").with_param("thermal_mass", 10.0)],
            edges: vec![EdgeSpec::new(
                "a",
                "b",
                TransformSpec::new("delay").with_param("delay_sec", 0.5),
            )],
            rules: vec![RuleSpec {
                id: "r1".to_string(),
                condition: "a > 1.0".to_string(),
                actions: vec![ActionSpec {
                    device: "dev".to_string(),
                    function: "stop".to_string(),
                    args: BTreeMap::new(),
                }],
                on_error: String::new(),
            }],
        };

        let text = serde_json::to_string(&spec).unwrap();
        let back: GraphSpec = serde_json::from_str(&text).unwrap();
        assert_eq!(back, spec);
    }

    #[test]
    fn missing_sections_default_to_empty() {
        let spec: GraphSpec = serde_json::from_str("{}").unwrap();
        assert!(spec.models.is_empty());
        assert!(spec.edges.is_empty());
        assert!(spec.rules.is_empty());
    }

    #[test]
    fn kind_serializes_as_type() {
        let spec = TransformSpec::new("deadband").with_param("threshold", 0.1);
        let text = serde_json::to_string(&spec).unwrap();
        assert!(text.contains("\"type\":\"deadband\""));
    }
}
