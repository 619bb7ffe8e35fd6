// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Binding raw configuration values to dynamic protobuf messages.
//!
//! Uses prost-reflect so that any message type can be built from a mapping
//! without code generation. Coercion rules, by field kind:
//!
//! | Field kind                     | Accepted raw values                 |
//! |--------------------------------|-------------------------------------|
//! | `double`, `float`              | numbers                             |
//! | 32/64-bit signed and unsigned  | integers within the field's range   |
//! | `bool`                         | booleans                            |
//! | `string`                       | strings                             |
//! | `bytes`                        | hex strings                         |
//! | enum                           | value name or declared number       |
//! | message                        | mappings                            |
//! | `repeated`                     | lists of the above                  |
//! | `map<K, V>`                    | mappings, keys parsed as `K`        |
//!
//! `null` leaves a field unset.

use std::collections::HashMap;

use prost::Message;
use prost_reflect::{
    Cardinality, DynamicMessage, FieldDescriptor, Kind, MapKey, MessageDescriptor, OneofDescriptor,
};
use serde_json::Value;

use crate::core::value::{kind_name, RawMapping};
use crate::core::{CodecError, MessageValue, Result};

/// A message built from a raw configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct DynamicMessageValue {
    type_name: String,
    message: DynamicMessage,
}

impl DynamicMessageValue {
    /// The underlying dynamic message.
    pub fn as_dynamic(&self) -> &DynamicMessage {
        &self.message
    }
}

impl MessageValue for DynamicMessageValue {
    fn type_name(&self) -> &str {
        &self.type_name
    }

    fn serialize(&self) -> Vec<u8> {
        self.message.encode_to_vec()
    }
}

/// Builds dynamic messages of one root type.
pub(crate) struct Binder<'a> {
    root: &'a str,
    deny_unknown_fields: bool,
}

impl<'a> Binder<'a> {
    pub(crate) fn new(root: &'a str, deny_unknown_fields: bool) -> Self {
        Self {
            root,
            deny_unknown_fields,
        }
    }

    /// Build the root message.
    pub(crate) fn build(
        &self,
        descriptor: &MessageDescriptor,
        values: &RawMapping,
    ) -> Result<DynamicMessageValue> {
        let message = self.bind_message(descriptor, values, "")?;
        Ok(DynamicMessageValue {
            type_name: self.root.to_string(),
            message,
        })
    }

    fn bind_message(
        &self,
        descriptor: &MessageDescriptor,
        values: &RawMapping,
        path: &str,
    ) -> Result<DynamicMessage> {
        let mut message = DynamicMessage::new(descriptor.clone());
        let mut oneof_members: HashMap<String, String> = HashMap::new();

        for (key, raw) in values {
            let field_path = join_path(path, key);
            let Some(field) = descriptor.get_field_by_name(key) else {
                if self.deny_unknown_fields {
                    return Err(self.error(&field_path, "no such field in the message"));
                }
                tracing::debug!(
                    type_name = self.root,
                    field = %field_path,
                    "Ignoring unknown configuration key"
                );
                continue;
            };

            if raw.is_null() {
                continue;
            }

            if let Some(oneof) = declared_oneof(&field) {
                if let Some(previous) = oneof_members.insert(oneof.name().to_string(), key.clone())
                {
                    return Err(self.error(
                        &field_path,
                        format!(
                            "'{previous}' is already set and both belong to oneof '{}'",
                            oneof.name()
                        ),
                    ));
                }
            }

            let value = self.bind_field(&field, raw, &field_path)?;
            message
                .try_set_field(&field, value)
                .map_err(|e| self.error(&field_path, e.to_string()))?;
        }

        for field in descriptor.fields() {
            if field.cardinality() == Cardinality::Required && !message.has_field(&field) {
                return Err(self.error(
                    &join_path(path, field.name()),
                    "required field is missing",
                ));
            }
        }

        Ok(message)
    }

    fn bind_field(
        &self,
        field: &FieldDescriptor,
        raw: &Value,
        path: &str,
    ) -> Result<prost_reflect::Value> {
        if field.is_map() {
            let Kind::Message(entry) = field.kind() else {
                return Err(self.error(path, "map field without an entry message"));
            };
            let Value::Object(entries) = raw else {
                return Err(self.mismatch(path, "mapping", raw));
            };
            let key_kind = entry.map_entry_key_field().kind();
            let value_kind = entry.map_entry_value_field().kind();

            let mut map = HashMap::with_capacity(entries.len());
            for (key, value) in entries {
                let entry_path = join_path(path, key);
                let map_key = self.bind_map_key(&key_kind, key, &entry_path)?;
                let map_value = self.bind_single(&value_kind, value, &entry_path)?;
                map.insert(map_key, map_value);
            }
            Ok(prost_reflect::Value::Map(map))
        } else if field.is_list() {
            let Value::Array(items) = raw else {
                return Err(self.mismatch(path, "list", raw));
            };
            let kind = field.kind();
            let items = items
                .iter()
                .enumerate()
                .map(|(index, item)| self.bind_single(&kind, item, &format!("{path}[{index}]")))
                .collect::<Result<Vec<_>>>()?;
            Ok(prost_reflect::Value::List(items))
        } else {
            self.bind_single(&field.kind(), raw, path)
        }
    }

    fn bind_single(&self, kind: &Kind, raw: &Value, path: &str) -> Result<prost_reflect::Value> {
        match kind {
            Kind::Double => raw
                .as_f64()
                .map(prost_reflect::Value::F64)
                .ok_or_else(|| self.mismatch(path, "number", raw)),
            Kind::Float => {
                let v = raw
                    .as_f64()
                    .ok_or_else(|| self.mismatch(path, "number", raw))?;
                if v.is_finite() && v.abs() > f32::MAX as f64 {
                    return Err(self.error(path, format!("{v} is out of range for float")));
                }
                Ok(prost_reflect::Value::F32(v as f32))
            }
            Kind::Int32 | Kind::Sint32 | Kind::Sfixed32 => {
                let v = self.signed(raw, path)?;
                i32::try_from(v)
                    .map(prost_reflect::Value::I32)
                    .map_err(|_| self.error(path, format!("{v} is out of range for int32")))
            }
            Kind::Int64 | Kind::Sint64 | Kind::Sfixed64 => {
                self.signed(raw, path).map(prost_reflect::Value::I64)
            }
            Kind::Uint32 | Kind::Fixed32 => {
                let v = self.unsigned(raw, path)?;
                u32::try_from(v)
                    .map(prost_reflect::Value::U32)
                    .map_err(|_| self.error(path, format!("{v} is out of range for uint32")))
            }
            Kind::Uint64 | Kind::Fixed64 => {
                self.unsigned(raw, path).map(prost_reflect::Value::U64)
            }
            Kind::Bool => raw
                .as_bool()
                .map(prost_reflect::Value::Bool)
                .ok_or_else(|| self.mismatch(path, "boolean", raw)),
            Kind::String => raw
                .as_str()
                .map(|s| prost_reflect::Value::String(s.to_string()))
                .ok_or_else(|| self.mismatch(path, "string", raw)),
            Kind::Bytes => {
                let text = raw
                    .as_str()
                    .ok_or_else(|| self.mismatch(path, "hex string", raw))?;
                let bytes = hex::decode(text)
                    .map_err(|e| self.error(path, format!("invalid hex string: {e}")))?;
                Ok(prost_reflect::Value::Bytes(bytes.into()))
            }
            Kind::Enum(descriptor) => match raw {
                Value::String(name) => descriptor
                    .get_value_by_name(name)
                    .map(|v| prost_reflect::Value::EnumNumber(v.number()))
                    .ok_or_else(|| {
                        self.error(
                            path,
                            format!("'{name}' is not a value of {}", descriptor.full_name()),
                        )
                    }),
                Value::Number(_) => {
                    let number = self.signed(raw, path)?;
                    i32::try_from(number)
                        .ok()
                        .and_then(|n| descriptor.get_value(n))
                        .map(|v| prost_reflect::Value::EnumNumber(v.number()))
                        .ok_or_else(|| {
                            self.error(
                                path,
                                format!("{number} is not a value of {}", descriptor.full_name()),
                            )
                        })
                }
                other => Err(self.mismatch(path, "enum name or number", other)),
            },
            Kind::Message(descriptor) => {
                let Value::Object(fields) = raw else {
                    return Err(self.mismatch(path, "mapping", raw));
                };
                self.bind_message(descriptor, fields, path)
                    .map(prost_reflect::Value::Message)
            }
        }
    }

    fn bind_map_key(&self, kind: &Kind, key: &str, path: &str) -> Result<MapKey> {
        let invalid = |expected: &str| self.error(path, format!("map key '{key}' is not {expected}"));
        match kind {
            Kind::String => Ok(MapKey::String(key.to_string())),
            Kind::Bool => key.parse().map(MapKey::Bool).map_err(|_| invalid("a boolean")),
            Kind::Int32 | Kind::Sint32 | Kind::Sfixed32 => {
                key.parse().map(MapKey::I32).map_err(|_| invalid("an int32"))
            }
            Kind::Int64 | Kind::Sint64 | Kind::Sfixed64 => {
                key.parse().map(MapKey::I64).map_err(|_| invalid("an int64"))
            }
            Kind::Uint32 | Kind::Fixed32 => {
                key.parse().map(MapKey::U32).map_err(|_| invalid("a uint32"))
            }
            Kind::Uint64 | Kind::Fixed64 => {
                key.parse().map(MapKey::U64).map_err(|_| invalid("a uint64"))
            }
            other => Err(self.error(path, format!("unsupported map key kind {other:?}"))),
        }
    }

    fn signed(&self, raw: &Value, path: &str) -> Result<i64> {
        raw.as_i64().ok_or_else(|| self.mismatch(path, "integer", raw))
    }

    fn unsigned(&self, raw: &Value, path: &str) -> Result<u64> {
        raw.as_u64()
            .ok_or_else(|| self.mismatch(path, "non-negative integer", raw))
    }

    fn mismatch(&self, path: &str, expected: &str, raw: &Value) -> CodecError {
        self.error(path, format!("expected {expected}, found {}", kind_name(raw)))
    }

    fn error(&self, path: &str, reason: impl Into<String>) -> CodecError {
        CodecError::field_binding(self.root, path, reason)
    }
}

/// The oneof a field was declared in. The synthetic oneof wrapping a
/// proto3 `optional` field does not count.
pub(crate) fn declared_oneof(field: &FieldDescriptor) -> Option<OneofDescriptor> {
    if field.field_descriptor_proto().proto3_optional() {
        return None;
    }
    field.containing_oneof()
}

fn join_path(parent: &str, key: &str) -> String {
    if parent.is_empty() {
        key.to_string()
    } else {
        format!("{parent}.{key}")
    }
}
