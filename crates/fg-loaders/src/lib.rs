//! fg-loaders: JSON and YAML graph file readers for FluxGraph.
//!
//! The file schema is a literal translation of
//! [`GraphSpec`](fg_graph::GraphSpec): top-level `models`, `edges` and
//! `rules` sequences whose entries match the spec structs field for field.
//! Parameter values are plain scalars (integer literals preferred for
//! integer fields). Schema errors carry a pointer-style path into the
//! document, e.g. `/edges/2/transform`.
//!
//! The loaders only translate; everything beyond shape (unknown types,
//! missing parameters, graph policy) is the compiler's job.

pub mod convert;

use std::path::Path;

use thiserror::Error;

use fg_graph::GraphSpec;

pub use convert::graph_spec_from_value;

/// Result type for loader operations.
pub type LoadResult<T> = Result<T, LoaderError>;

/// Errors surfaced while reading a graph file.
#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON syntax error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML syntax error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Structurally valid document that does not match the graph schema.
    #[error("Invalid graph file at {pointer}: {message}")]
    Schema { pointer: String, message: String },
}

/// Parse a graph specification from a JSON string.
pub fn from_json_str(text: &str) -> LoadResult<GraphSpec> {
    let value: serde_json::Value = serde_json::from_str(text)?;
    graph_spec_from_value(&value)
}

/// Parse a graph specification from a YAML string.
pub fn from_yaml_str(text: &str) -> LoadResult<GraphSpec> {
    let value: serde_json::Value = serde_yaml::from_str(text)?;
    graph_spec_from_value(&value)
}

/// Load a graph specification from a JSON file.
pub fn load_json(path: &Path) -> LoadResult<GraphSpec> {
    let content = std::fs::read_to_string(path)?;
    from_json_str(&content)
}

/// Load a graph specification from a YAML file.
pub fn load_yaml(path: &Path) -> LoadResult<GraphSpec> {
    let content = std::fs::read_to_string(path)?;
    from_yaml_str(&content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use fg_core::Variant;

    const GRAPH_JSON: &str = r#"{
        "models": [
            {
                "id": "chamber_air",
                "type": "thermal_mass",
                "params": {
                    "thermal_mass": 1000.0,
                    "heat_transfer_coeff": 10.0,
                    "initial_temp": 25.0,
                    "temp_signal": "chamber_air/temperature",
                    "power_signal": "chamber_air/heating_power",
                    "ambient_signal": "ambient"
                }
            }
        ],
        "edges": [
            {
                "source": "chamber_air/temperature",
                "target": "display/temperature",
                "transform": {
                    "type": "first_order_lag",
                    "params": { "tau_s": 0.5 }
                }
            }
        ],
        "rules": [
            {
                "id": "overtemp",
                "condition": "chamber_air/temperature >= 100.0",
                "actions": [
                    {
                        "device": "heater",
                        "function": "shutdown",
                        "args": { "code": 1 }
                    }
                ],
                "on_error": "log_and_continue"
            }
        ]
    }"#;

    #[test]
    fn json_graph_loads() {
        let spec = from_json_str(GRAPH_JSON).unwrap();
        assert_eq!(spec.models.len(), 1);
        assert_eq!(spec.edges.len(), 1);
        assert_eq!(spec.rules.len(), 1);

        let model = &spec.models[0];
        assert_eq!(model.kind, "thermal_mass");
        assert_eq!(model.params["thermal_mass"], Variant::F64(1000.0));

        let edge = &spec.edges[0];
        assert_eq!(edge.transform.kind, "first_order_lag");
        assert_eq!(edge.transform.params["tau_s"], Variant::F64(0.5));

        let rule = &spec.rules[0];
        assert_eq!(rule.on_error, "log_and_continue");
        // Integer literals load as int64, not double.
        assert_eq!(rule.actions[0].args["code"], Variant::I64(1));
    }

    #[test]
    fn yaml_graph_loads_identically() {
        let yaml = r#"
models:
  - id: chamber_air
    type: thermal_mass
    params:
      thermal_mass: 1000.0
      heat_transfer_coeff: 10.0
      initial_temp: 25.0
      temp_signal: chamber_air/temperature
      power_signal: chamber_air/heating_power
      ambient_signal: ambient
edges:
  - source: chamber_air/temperature
    target: display/temperature
    transform:
      type: first_order_lag
      params:
        tau_s: 0.5
rules:
  - id: overtemp
    condition: chamber_air/temperature >= 100.0
    actions:
      - device: heater
        function: shutdown
        args:
          code: 1
    on_error: log_and_continue
"#;
        assert_eq!(from_yaml_str(yaml).unwrap(), from_json_str(GRAPH_JSON).unwrap());
    }

    #[test]
    fn empty_document_is_an_empty_spec() {
        let spec = from_json_str("{}").unwrap();
        assert!(spec.models.is_empty());
        assert!(spec.edges.is_empty());
        assert!(spec.rules.is_empty());
    }

    #[test]
    fn missing_edge_field_reports_pointer() {
        let text = r#"{"edges": [
            {"source": "a", "target": "b", "transform": {"type": "linear"}},
            {"source": "a2", "transform": {"type": "linear"}}
        ]}"#;
        let err = from_json_str(text).unwrap_err();
        match err {
            LoaderError::Schema { pointer, message } => {
                assert_eq!(pointer, "/edges/1");
                assert!(message.contains("target"), "{message}");
            }
            other => panic!("expected Schema error, got {other}"),
        }
    }

    #[test]
    fn missing_transform_type_reports_pointer() {
        let text = r#"{"edges": [
            {"source": "a", "target": "b", "transform": {"params": {}}}
        ]}"#;
        let err = from_json_str(text).unwrap_err();
        match err {
            LoaderError::Schema { pointer, message } => {
                assert_eq!(pointer, "/edges/0/transform");
                assert!(message.contains("type"), "{message}");
            }
            other => panic!("expected Schema error, got {other}"),
        }
    }

    #[test]
    fn bad_parameter_value_reports_full_pointer() {
        let text = r#"{"models": [
            {"id": "m", "type": "thermal_mass", "params": {"thermal_mass": [1, 2]}}
        ]}"#;
        let err = from_json_str(text).unwrap_err();
        match err {
            LoaderError::Schema { pointer, .. } => {
                assert_eq!(pointer, "/models/0/params/thermal_mass");
            }
            other => panic!("expected Schema error, got {other}"),
        }
    }

    #[test]
    fn syntax_errors_surface_as_format_errors() {
        assert!(matches!(from_json_str("{not json"), Err(LoaderError::Json(_))));
        assert!(matches!(from_yaml_str("foo: [1, 2"), Err(LoaderError::Yaml(_))));
    }

    #[test]
    fn spec_serialization_round_trips_through_the_loader() {
        // The file schema is a literal translation of GraphSpec, so a
        // serialized spec reloads to an equal value.
        let spec = from_json_str(GRAPH_JSON).unwrap();
        let text = serde_json::to_string(&spec).unwrap();
        assert_eq!(from_json_str(&text).unwrap(), spec);
    }
}
