//! Typed access to transform/model parameter maps.
//!
//! Every accessor carries a context string (`transform[<type>]` or
//! `model[<id>:<type>]`) so failures point at the exact spec location.
//! The only implicit coercion is int64 -> double.

use std::collections::BTreeMap;

use fg_core::Variant;

use crate::error::{CompileError, CompileResult};

pub(crate) fn require<'a>(
    params: &'a BTreeMap<String, Variant>,
    name: &str,
    context: &str,
) -> CompileResult<&'a Variant> {
    params.get(name).ok_or_else(|| CompileError::MissingParameter {
        context: context.to_string(),
        name: name.to_string(),
    })
}

pub(crate) fn as_f64(value: &Variant, context: &str, name: &str) -> CompileResult<f64> {
    match value {
        Variant::F64(v) => Ok(*v),
        Variant::I64(v) => Ok(*v as f64),
        other => Err(CompileError::TypeError {
            context: context.to_string(),
            name: name.to_string(),
            expected: "number",
            got: other.type_name(),
        }),
    }
}

pub(crate) fn as_i64(value: &Variant, context: &str, name: &str) -> CompileResult<i64> {
    match value {
        Variant::I64(v) => Ok(*v),
        other => Err(CompileError::TypeError {
            context: context.to_string(),
            name: name.to_string(),
            expected: "int64",
            got: other.type_name(),
        }),
    }
}

pub(crate) fn as_str<'a>(value: &'a Variant, context: &str, name: &str) -> CompileResult<&'a str> {
    match value {
        Variant::Str(v) => Ok(v),
        other => Err(CompileError::TypeError {
            context: context.to_string(),
            name: name.to_string(),
            expected: "string",
            got: other.type_name(),
        }),
    }
}

pub(crate) fn required_f64(
    params: &BTreeMap<String, Variant>,
    name: &str,
    context: &str,
) -> CompileResult<f64> {
    as_f64(require(params, name, context)?, context, name)
}

pub(crate) fn required_i64(
    params: &BTreeMap<String, Variant>,
    name: &str,
    context: &str,
) -> CompileResult<i64> {
    as_i64(require(params, name, context)?, context, name)
}

pub(crate) fn required_str<'a>(
    params: &'a BTreeMap<String, Variant>,
    name: &str,
    context: &str,
) -> CompileResult<&'a str> {
    as_str(require(params, name, context)?, context, name)
}

pub(crate) fn optional_f64(
    params: &BTreeMap<String, Variant>,
    name: &str,
    context: &str,
    default: f64,
) -> CompileResult<f64> {
    match params.get(name) {
        Some(value) => as_f64(value, context, name),
        None => Ok(default),
    }
}

pub(crate) fn optional_i64(
    params: &BTreeMap<String, Variant>,
    name: &str,
    context: &str,
    default: i64,
) -> CompileResult<i64> {
    match params.get(name) {
        Some(value) => as_i64(value, context, name),
        None => Ok(default),
    }
}

/// Read `primary` if present, otherwise require `alias`. A missing value
/// reports the alias name, matching the parameter the schema documents.
pub(crate) fn aliased_f64(
    params: &BTreeMap<String, Variant>,
    primary: &str,
    alias: &str,
    context: &str,
) -> CompileResult<f64> {
    match params.get(primary) {
        Some(value) => as_f64(value, context, primary),
        None => required_f64(params, alias, context),
    }
}
