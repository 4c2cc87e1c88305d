//! Shared tree-to-spec conversion.
//!
//! Both file formats are first parsed into a `serde_json::Value` (YAML
//! deserializes into the same value model), then hand-walked into a
//! [`GraphSpec`] so every schema error carries an exact pointer-style path
//! like `/edges/2/transform`.

use std::collections::BTreeMap;

use serde_json::{Map, Value};

use fg_core::Variant;
use fg_graph::{ActionSpec, EdgeSpec, GraphSpec, ModelSpec, RuleSpec, TransformSpec};

use crate::{LoadResult, LoaderError};

fn schema_error(pointer: impl Into<String>, message: impl Into<String>) -> LoaderError {
    LoaderError::Schema {
        pointer: pointer.into(),
        message: message.into(),
    }
}

fn value_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn as_object<'a>(value: &'a Value, pointer: &str) -> LoadResult<&'a Map<String, Value>> {
    value
        .as_object()
        .ok_or_else(|| schema_error(pointer, format!("expected object, got {}", value_type_name(value))))
}

fn require_str(object: &Map<String, Value>, key: &str, pointer: &str) -> LoadResult<String> {
    let value = object
        .get(key)
        .ok_or_else(|| schema_error(pointer, format!("missing required field '{key}'")))?;
    value
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| {
            schema_error(
                format!("{pointer}/{key}"),
                format!("expected string, got {}", value_type_name(value)),
            )
        })
}

fn optional_str(object: &Map<String, Value>, key: &str, pointer: &str) -> LoadResult<String> {
    match object.get(key) {
        None => Ok(String::new()),
        Some(value) => value.as_str().map(str::to_string).ok_or_else(|| {
            schema_error(
                format!("{pointer}/{key}"),
                format!("expected string, got {}", value_type_name(value)),
            )
        }),
    }
}

fn value_to_variant(value: &Value, pointer: &str) -> LoadResult<Variant> {
    match value {
        Value::Bool(b) => Ok(Variant::Bool(*b)),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Ok(Variant::I64(i))
            } else if let Some(f) = n.as_f64() {
                Ok(Variant::F64(f))
            } else {
                Err(schema_error(pointer, "number out of range"))
            }
        }
        Value::String(s) => Ok(Variant::Str(s.clone())),
        other => Err(schema_error(
            pointer,
            format!("unsupported type for a parameter value: {}", value_type_name(other)),
        )),
    }
}

/// Optional `<key>` object of scalar parameters.
fn parse_params(
    object: &Map<String, Value>,
    key: &str,
    pointer: &str,
) -> LoadResult<BTreeMap<String, Variant>> {
    let mut params = BTreeMap::new();
    if let Some(value) = object.get(key) {
        let map = as_object(value, &format!("{pointer}/{key}"))?;
        for (name, entry) in map {
            let entry_pointer = format!("{pointer}/{key}/{name}");
            params.insert(name.clone(), value_to_variant(entry, &entry_pointer)?);
        }
    }
    Ok(params)
}

fn parse_transform(value: &Value, pointer: &str) -> LoadResult<TransformSpec> {
    let object = as_object(value, pointer)?;
    Ok(TransformSpec {
        kind: require_str(object, "type", pointer)?,
        params: parse_params(object, "params", pointer)?,
    })
}

fn parse_edge(value: &Value, pointer: &str) -> LoadResult<EdgeSpec> {
    let object = as_object(value, pointer)?;
    let transform_value = object
        .get("transform")
        .ok_or_else(|| schema_error(pointer, "missing required field 'transform'"))?;
    Ok(EdgeSpec {
        source: require_str(object, "source", pointer)?,
        target: require_str(object, "target", pointer)?,
        transform: parse_transform(transform_value, &format!("{pointer}/transform"))?,
    })
}

fn parse_model(value: &Value, pointer: &str) -> LoadResult<ModelSpec> {
    let object = as_object(value, pointer)?;
    Ok(ModelSpec {
        id: require_str(object, "id", pointer)?,
        kind: require_str(object, "type", pointer)?,
        params: parse_params(object, "params", pointer)?,
    })
}

fn parse_action(value: &Value, pointer: &str) -> LoadResult<ActionSpec> {
    let object = as_object(value, pointer)?;
    Ok(ActionSpec {
        device: require_str(object, "device", pointer)?,
        function: require_str(object, "function", pointer)?,
        args: parse_params(object, "args", pointer)?,
    })
}

fn parse_rule(value: &Value, pointer: &str) -> LoadResult<RuleSpec> {
    let object = as_object(value, pointer)?;

    let mut actions = Vec::new();
    if let Some(actions_value) = object.get("actions") {
        let actions_pointer = format!("{pointer}/actions");
        let entries = actions_value
            .as_array()
            .ok_or_else(|| {
                schema_error(
                    actions_pointer.as_str(),
                    format!("expected array, got {}", value_type_name(actions_value)),
                )
            })?;
        for (index, entry) in entries.iter().enumerate() {
            actions.push(parse_action(entry, &format!("{actions_pointer}/{index}"))?);
        }
    }

    Ok(RuleSpec {
        id: require_str(object, "id", pointer)?,
        condition: require_str(object, "condition", pointer)?,
        actions,
        on_error: optional_str(object, "on_error", pointer)?,
    })
}

/// Convert a parsed document into a [`GraphSpec`].
///
/// Top-level `models`, `edges` and `rules` sequences are each optional;
/// entries translate field-for-field into the spec structs.
pub fn graph_spec_from_value(value: &Value) -> LoadResult<GraphSpec> {
    let root = as_object(value, "/")?;
    let mut spec = GraphSpec::default();

    if let Some(models) = root.get("models") {
        let entries = models
            .as_array()
            .ok_or_else(|| schema_error("/models", format!("expected array, got {}", value_type_name(models))))?;
        for (index, entry) in entries.iter().enumerate() {
            spec.models.push(parse_model(entry, &format!("/models/{index}"))?);
        }
    }

    if let Some(edges) = root.get("edges") {
        let entries = edges
            .as_array()
            .ok_or_else(|| schema_error("/edges", format!("expected array, got {}", value_type_name(edges))))?;
        for (index, entry) in entries.iter().enumerate() {
            spec.edges.push(parse_edge(entry, &format!("/edges/{index}"))?);
        }
    }

    if let Some(rules) = root.get("rules") {
        let entries = rules
            .as_array()
            .ok_or_else(|| schema_error("/rules", format!("expected array, got {}", value_type_name(rules))))?;
        for (index, entry) in entries.iter().enumerate() {
            spec.rules.push(parse_rule(entry, &format!("/rules/{index}"))?);
        }
    }

    Ok(spec)
}
