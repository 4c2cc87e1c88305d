//! Parameter and argument values.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Tagged value used for transform/model parameters and command arguments.
///
/// Exactly four alternatives; serialized untagged so JSON/YAML scalars map
/// directly and integer literals stay integers (`1` is `I64`, `1.0` is
/// `F64`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Variant {
    Bool(bool),
    I64(i64),
    F64(f64),
    Str(String),
}

impl Variant {
    /// Name of the alternative, for diagnostics.
    pub fn type_name(&self) -> &'static str {
        match self {
            Variant::Bool(_) => "bool",
            Variant::I64(_) => "int64",
            Variant::F64(_) => "double",
            Variant::Str(_) => "string",
        }
    }
}

impl From<bool> for Variant {
    fn from(v: bool) -> Self {
        Variant::Bool(v)
    }
}

impl From<i64> for Variant {
    fn from(v: i64) -> Self {
        Variant::I64(v)
    }
}

impl From<f64> for Variant {
    fn from(v: f64) -> Self {
        Variant::F64(v)
    }
}

impl From<&str> for Variant {
    fn from(v: &str) -> Self {
        Variant::Str(v.to_string())
    }
}

impl From<String> for Variant {
    fn from(v: String) -> Self {
        Variant::Str(v)
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Variant::Bool(v) => write!(f, "{v}"),
            Variant::I64(v) => write!(f, "{v}"),
            Variant::F64(v) => write!(f, "{v}"),
            Variant::Str(v) => write!(f, "{v}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn type_names() {
        assert_eq!(Variant::from(true).type_name(), "bool");
        assert_eq!(Variant::from(3_i64).type_name(), "int64");
        assert_eq!(Variant::from(3.0).type_name(), "double");
        assert_eq!(Variant::from("x").type_name(), "string");
    }

    #[test]
    fn untagged_integers_stay_integers() {
        let v: Variant = serde_json::from_str("42").unwrap();
        assert_eq!(v, Variant::I64(42));
        let v: Variant = serde_json::from_str("42.0").unwrap();
        assert_eq!(v, Variant::F64(42.0));
        let v: Variant = serde_json::from_str("true").unwrap();
        assert_eq!(v, Variant::Bool(true));
        let v: Variant = serde_json::from_str("\"on\"").unwrap();
        assert_eq!(v, Variant::Str("on".to_string()));
    }
}
