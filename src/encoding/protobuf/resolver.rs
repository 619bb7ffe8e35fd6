// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Schema resolver backed by a prost-reflect descriptor pool.

use std::sync::RwLock;

use prost::Message;
use prost_reflect::{DescriptorPool, FieldDescriptor, Kind, MessageDescriptor};
use prost_types::FileDescriptorSet;

use super::codec::{declared_oneof, Binder, DynamicMessageValue};
use crate::core::value::RawMapping;
use crate::core::{CodecError, MessageSchema, Result, SchemaResolver, TypeRegistry};
use crate::schema::builtin_types::builtin_file_descriptor_set;
use crate::schema::{FieldInfo, FieldLabel, MessageTypeName};

/// Resolves message types from compiled `FileDescriptorSet`s.
///
/// Resolved handles are cached, so repeated lookups of the same type are
/// cheap. Thread-safe: one resolver can serve encoders on several threads.
pub struct DescriptorResolver {
    pool: RwLock<DescriptorPool>,
    schemas: TypeRegistry<DescriptorSchema>,
    deny_unknown_fields: bool,
}

impl DescriptorResolver {
    /// Create a resolver that knows no types.
    pub fn new() -> Self {
        Self {
            pool: RwLock::new(DescriptorPool::new()),
            schemas: TypeRegistry::new(),
            deny_unknown_fields: true,
        }
    }

    /// Create a resolver that knows the builtin runtime messages.
    pub fn with_builtins() -> Result<Self> {
        let resolver = Self::new();
        resolver.add_descriptor_set(builtin_file_descriptor_set())?;
        Ok(resolver)
    }

    /// Create a resolver with the builtin messages and the given
    /// `FileDescriptorSet` binary data.
    pub fn from_file_descriptor_set(fds_bytes: &[u8]) -> Result<Self> {
        let resolver = Self::with_builtins()?;
        resolver.add_file_descriptor_set(fds_bytes)?;
        Ok(resolver)
    }

    /// Set whether building rejects keys that the message does not declare.
    pub fn with_deny_unknown_fields(mut self, deny: bool) -> Self {
        self.deny_unknown_fields = deny;
        self
    }

    /// Add `FileDescriptorSet` binary data to the resolver.
    pub fn add_file_descriptor_set(&self, fds_bytes: &[u8]) -> Result<()> {
        let fds = FileDescriptorSet::decode(fds_bytes).map_err(|e| {
            CodecError::invalid_schema(format!("Failed to decode FileDescriptorSet: {e}"))
        })?;
        self.add_descriptor_set(fds)
    }

    /// Add a decoded `FileDescriptorSet` to the resolver.
    pub fn add_descriptor_set(&self, fds: FileDescriptorSet) -> Result<()> {
        let mut pool = self
            .pool
            .write()
            .map_err(|e| CodecError::Other(format!("Descriptor pool lock poisoned: {e}")))?;
        pool.add_file_descriptor_set(fds).map_err(|e| {
            CodecError::invalid_schema(format!("Failed to build descriptor pool: {e}"))
        })?;
        tracing::debug!(
            messages = pool.all_messages().count(),
            "Descriptor set added"
        );
        Ok(())
    }

    /// Names of all message types the resolver knows, sorted.
    pub fn type_names(&self) -> Result<Vec<String>> {
        let pool = self
            .pool
            .read()
            .map_err(|e| CodecError::Other(format!("Descriptor pool lock poisoned: {e}")))?;
        let mut names: Vec<String> = pool
            .all_messages()
            .filter(|m| !m.is_map_entry())
            .map(|m| m.full_name().to_string())
            .collect();
        names.sort();
        Ok(names)
    }
}

impl Default for DescriptorResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl SchemaResolver for DescriptorResolver {
    type Schema = DescriptorSchema;

    fn resolve(&self, type_name: &MessageTypeName) -> Result<DescriptorSchema> {
        if let Some(schema) = self.schemas.get(type_name.as_str())? {
            return Ok(schema);
        }

        let descriptor = {
            let pool = self
                .pool
                .read()
                .map_err(|e| CodecError::Other(format!("Descriptor pool lock poisoned: {e}")))?;
            pool.get_message_by_name(type_name.as_str())
                .ok_or_else(|| CodecError::schema_not_found(type_name.as_str()))?
        };

        let schema = DescriptorSchema {
            descriptor,
            deny_unknown_fields: self.deny_unknown_fields,
        };
        self.schemas.register(type_name.as_str(), schema.clone())?;
        tracing::debug!(
            type_name = %type_name,
            cached = self.schemas.len()?,
            "Message type resolved"
        );
        Ok(schema)
    }
}

/// Handle to one message type of a descriptor pool.
#[derive(Debug, Clone)]
pub struct DescriptorSchema {
    descriptor: MessageDescriptor,
    deny_unknown_fields: bool,
}

impl DescriptorSchema {
    /// The underlying message descriptor.
    pub fn descriptor(&self) -> &MessageDescriptor {
        &self.descriptor
    }
}

impl MessageSchema for DescriptorSchema {
    type Message = DynamicMessageValue;

    fn type_name(&self) -> &str {
        self.descriptor.full_name()
    }

    fn fields(&self) -> Vec<FieldInfo> {
        self.descriptor.fields().map(|f| field_info(&f)).collect()
    }

    fn build(&self, values: &RawMapping) -> Result<DynamicMessageValue> {
        Binder::new(self.descriptor.full_name(), self.deny_unknown_fields)
            .build(&self.descriptor, values)
    }
}

fn field_info(field: &FieldDescriptor) -> FieldInfo {
    let type_name = if field.is_map() {
        match field.kind() {
            Kind::Message(entry) => format!(
                "map<{}, {}>",
                kind_type_name(&entry.map_entry_key_field().kind()),
                kind_type_name(&entry.map_entry_value_field().kind())
            ),
            other => kind_type_name(&other),
        }
    } else {
        kind_type_name(&field.kind())
    };

    let label = if field.is_list() || field.is_map() {
        FieldLabel::Repeated
    } else if field.cardinality() == prost_reflect::Cardinality::Required {
        FieldLabel::Required
    } else {
        FieldLabel::Optional
    };

    FieldInfo {
        name: field.name().to_string(),
        number: field.number(),
        type_name,
        label,
        oneof: declared_oneof(field).map(|o| o.name().to_string()),
    }
}

fn kind_type_name(kind: &Kind) -> String {
    match kind {
        Kind::Double => "double".to_string(),
        Kind::Float => "float".to_string(),
        Kind::Int32 => "int32".to_string(),
        Kind::Int64 => "int64".to_string(),
        Kind::Uint32 => "uint32".to_string(),
        Kind::Uint64 => "uint64".to_string(),
        Kind::Sint32 => "sint32".to_string(),
        Kind::Sint64 => "sint64".to_string(),
        Kind::Fixed32 => "fixed32".to_string(),
        Kind::Fixed64 => "fixed64".to_string(),
        Kind::Sfixed32 => "sfixed32".to_string(),
        Kind::Sfixed64 => "sfixed64".to_string(),
        Kind::Bool => "bool".to_string(),
        Kind::String => "string".to_string(),
        Kind::Bytes => "bytes".to_string(),
        Kind::Message(m) => m.full_name().to_string(),
        Kind::Enum(e) => e.full_name().to_string(),
    }
}
