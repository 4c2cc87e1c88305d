//! File-level loading plus compilation of the loaded specification.

use std::io::Write;

use fg_core::{FunctionNamespace, SignalNamespace};
use fg_graph::compile;
use fg_loaders::{load_json, load_yaml};

const GRAPH_YAML: &str = r#"
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
    target: chamber_air/temp_filtered
    transform:
      type: first_order_lag
      params:
        tau_s: 1.0
rules:
  - id: overtemp
    condition: chamber_air/temp_filtered >= 100.0
    actions:
      - device: heater
        function: shutdown
"#;

#[test]
fn yaml_file_loads_and_compiles() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(GRAPH_YAML.as_bytes()).unwrap();

    let spec = load_yaml(file.path()).unwrap();
    assert_eq!(spec.models.len(), 1);
    assert_eq!(spec.edges.len(), 1);
    assert_eq!(spec.rules.len(), 1);

    let mut signal_ns = SignalNamespace::new();
    let mut func_ns = FunctionNamespace::new();
    let program = compile(&spec, &mut signal_ns, &mut func_ns, Some(0.1)).unwrap();
    assert_eq!(program.edges.len(), 1);
    assert_eq!(program.models.len(), 1);
    assert_eq!(program.rules.len(), 1);
    assert!(signal_ns.resolve("chamber_air/temperature").is_valid());
    assert!(func_ns.resolve_device("heater").is_valid());
}

#[test]
fn json_file_loads_and_compiles() {
    let json = r#"{
        "edges": [
            {
                "source": "input",
                "target": "output",
                "transform": {"type": "linear", "params": {"scale": 2.0, "offset": 1.0}}
            }
        ]
    }"#;
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(json.as_bytes()).unwrap();

    let spec = load_json(file.path()).unwrap();
    let mut signal_ns = SignalNamespace::new();
    let mut func_ns = FunctionNamespace::new();
    let program = compile(&spec, &mut signal_ns, &mut func_ns, None).unwrap();
    assert_eq!(program.edges.len(), 1);
}

#[test]
fn missing_file_is_an_io_error() {
    let err = load_json(std::path::Path::new("/no/such/graph.json")).unwrap_err();
    assert!(matches!(err, fg_loaders::LoaderError::Io(_)));
}
