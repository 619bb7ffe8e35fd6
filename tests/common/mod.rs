// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Common utilities for integration tests.

#![allow(dead_code)]

use std::cell::Cell;
use std::collections::HashMap;

use prost::Message;
use prost_types::field_descriptor_proto::{Label, Type as ProtoType};
use prost_types::{DescriptorProto, FieldDescriptorProto, FileDescriptorProto, FileDescriptorSet};
use serde_json::Value;
use speccodec::{
    ArtifactId, CodecError, FieldInfo, FieldLabel, InstanceSpec, MessageSchema, MessageTypeName,
    MessageValue, RawMapping, Result, SchemaResolver,
};

// ============================================================================
// Fixtures
// ============================================================================

/// An instance of the timestamping artifact with the given config.
pub fn instance(name: &str, config: Option<Value>) -> InstanceSpec {
    let spec = InstanceSpec::new(name, ArtifactId::new("timestamping", "0.1.0"));
    match config {
        Some(config) => spec.with_config(config),
        None => spec,
    }
}

/// A compiled descriptor set with `acme.tokens.Config`:
///
/// ```proto
/// syntax = "proto3";
/// package acme.tokens;
/// message Config {
///   string ticker = 1;
///   uint64 supply = 2;
///   repeated string admins = 3;
///   bytes seed = 4;
/// }
/// ```
pub fn tokens_descriptor_set() -> Vec<u8> {
    let field = |name: &str, number: i32, label: Label, ty: ProtoType| FieldDescriptorProto {
        name: Some(name.to_string()),
        number: Some(number),
        label: Some(label as i32),
        r#type: Some(ty as i32),
        json_name: Some(name.to_string()),
        ..Default::default()
    };

    FileDescriptorSet {
        file: vec![FileDescriptorProto {
            name: Some("acme/tokens.proto".to_string()),
            package: Some("acme.tokens".to_string()),
            message_type: vec![DescriptorProto {
                name: Some("Config".to_string()),
                field: vec![
                    field("ticker", 1, Label::Optional, ProtoType::String),
                    field("supply", 2, Label::Optional, ProtoType::Uint64),
                    field("admins", 3, Label::Repeated, ProtoType::String),
                    field("seed", 4, Label::Optional, ProtoType::Bytes),
                ],
                ..Default::default()
            }],
            syntax: Some("proto3".to_string()),
            ..Default::default()
        }],
    }
    .encode_to_vec()
}

/// Prost mirror of `acme.tokens.Config`, for checking built payloads.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct TokensConfig {
    #[prost(string, tag = "1")]
    pub ticker: ::prost::alloc::string::String,
    #[prost(uint64, tag = "2")]
    pub supply: u64,
    #[prost(string, repeated, tag = "3")]
    pub admins: ::prost::alloc::vec::Vec<::prost::alloc::string::String>,
    #[prost(bytes = "vec", tag = "4")]
    pub seed: ::prost::alloc::vec::Vec<u8>,
}

// ============================================================================
// In-memory schema table
// ============================================================================

/// A schema resolver backed by a plain table of type names.
///
/// Built messages serialize to `type_name|canonical JSON of the mapping`,
/// which makes it easy to check exactly what reached the schema.
#[derive(Default)]
pub struct TableResolver {
    schemas: HashMap<String, Vec<FieldInfo>>,
    lookups: Cell<usize>,
}

impl TableResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a type whose fields are all optional strings.
    pub fn with_type(mut self, type_name: &str, fields: &[&str]) -> Self {
        let fields = fields
            .iter()
            .enumerate()
            .map(|(i, name)| FieldInfo {
                name: name.to_string(),
                number: i as u32 + 1,
                type_name: "string".to_string(),
                label: FieldLabel::Optional,
                oneof: None,
            })
            .collect();
        self.schemas.insert(type_name.to_string(), fields);
        self
    }

    /// Number of `resolve` calls so far.
    pub fn lookups(&self) -> usize {
        self.lookups.get()
    }
}

impl SchemaResolver for TableResolver {
    type Schema = TableSchema;

    fn resolve(&self, type_name: &MessageTypeName) -> Result<TableSchema> {
        self.lookups.set(self.lookups.get() + 1);
        self.schemas
            .get(type_name.as_str())
            .map(|fields| TableSchema {
                type_name: type_name.to_string(),
                fields: fields.clone(),
            })
            .ok_or_else(|| CodecError::schema_not_found(type_name.as_str()))
    }
}

pub struct TableSchema {
    type_name: String,
    fields: Vec<FieldInfo>,
}

impl MessageSchema for TableSchema {
    type Message = TableMessage;

    fn type_name(&self) -> &str {
        &self.type_name
    }

    fn fields(&self) -> Vec<FieldInfo> {
        self.fields.clone()
    }

    fn build(&self, values: &RawMapping) -> Result<TableMessage> {
        for (key, value) in values {
            if self.get_field(key).is_none() {
                return Err(CodecError::field_binding(
                    &self.type_name,
                    key,
                    "no such field",
                ));
            }
            if !value.is_string() {
                return Err(CodecError::field_binding(
                    &self.type_name,
                    key,
                    "expected string",
                ));
            }
        }
        Ok(TableMessage {
            type_name: self.type_name.clone(),
            values: values.clone(),
        })
    }
}

pub struct TableMessage {
    type_name: String,
    values: RawMapping,
}

impl MessageValue for TableMessage {
    fn type_name(&self) -> &str {
        &self.type_name
    }

    fn serialize(&self) -> Vec<u8> {
        let json = serde_json::to_string(&self.values).unwrap_or_default();
        format!("{}|{}", self.type_name, json).into_bytes()
    }
}
