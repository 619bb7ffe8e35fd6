// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Raw configuration values.
//!
//! The launcher parses its configuration file into a generic value tree and
//! hands each instance's subtree to the encoder as-is. That tree is
//! represented with [`serde_json::Value`]; mappings keep the key order of the
//! source file (`preserve_order`), which the JSON format relies on.

pub use serde_json::{Map, Value};

/// A raw configuration value: scalar string, mapping, or anything else the
/// loader produced.
pub type RawConfig = Value;

/// A raw configuration mapping.
pub type RawMapping = Map<String, Value>;

/// Human-readable name of a value's shape, for error messages.
pub fn kind_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(n) if n.is_f64() => "float",
        Value::Number(_) => "integer",
        Value::String(_) => "string",
        Value::Array(_) => "list",
        Value::Object(_) => "mapping",
    }
}

/// Render a scalar as the text an author would have written for it.
///
/// Strings are returned without quotes; numbers and booleans use their
/// canonical form. Containers and `null` have no scalar text.
pub fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}
