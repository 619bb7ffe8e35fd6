// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Core registry traits for schema lookup and message building.
//!
//! The encoder never compiles schemas itself. It is handed a
//! [`SchemaResolver`] capability and only ever asks it three things:
//! resolve a type by name, build a message from a mapping, serialize it.
//! Production code uses the prost-reflect backed resolver in
//! [`crate::encoding::protobuf`]; tests substitute an in-memory table.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use super::error::{CodecError, Result};
use super::value::RawMapping;
use crate::schema::{FieldInfo, MessageTypeName};

/// A built message, ready to be serialized.
pub trait MessageValue {
    /// Fully-qualified type name of the message.
    fn type_name(&self) -> &str;

    /// Canonical binary encoding.
    ///
    /// Cannot fail: building the value already enforced well-formedness.
    fn serialize(&self) -> Vec<u8>;
}

/// Handle to a compiled message schema.
pub trait MessageSchema {
    /// The message values this schema builds.
    type Message: MessageValue;

    /// Fully-qualified type name of the schema.
    fn type_name(&self) -> &str;

    /// Declared fields in declaration order.
    fn fields(&self) -> Vec<FieldInfo>;

    /// Get a field by name.
    fn get_field(&self, name: &str) -> Option<FieldInfo> {
        self.fields().into_iter().find(|f| f.name == name)
    }

    /// Build a message from a mapping of field names to raw values.
    ///
    /// Fails with [`CodecError::FieldBinding`] when a value cannot be coerced
    /// to its field's type or a required field is missing.
    fn build(&self, values: &RawMapping) -> Result<Self::Message>;
}

/// Capability to look message schemas up by name.
pub trait SchemaResolver {
    /// The schema handles this resolver returns.
    type Schema: MessageSchema;

    /// Resolve a fully-qualified message type.
    ///
    /// Fails with [`CodecError::SchemaNotFound`] for unknown names.
    fn resolve(&self, type_name: &MessageTypeName) -> Result<Self::Schema>;
}

impl<R: SchemaResolver + ?Sized> SchemaResolver for &R {
    type Schema = R::Schema;

    fn resolve(&self, type_name: &MessageTypeName) -> Result<Self::Schema> {
        (**self).resolve(type_name)
    }
}

impl<R: SchemaResolver + ?Sized> SchemaResolver for Arc<R> {
    type Schema = R::Schema;

    fn resolve(&self, type_name: &MessageTypeName) -> Result<Self::Schema> {
        (**self).resolve(type_name)
    }
}

/// Thread-safe registry of resolved schema handles.
///
/// Uses RwLock for concurrent read access with exclusive write access, so a
/// single resolver can serve encoders on several threads.
pub struct TypeRegistry<T> {
    inner: RwLock<HashMap<String, T>>,
}

impl<T> TypeRegistry<T> {
    /// Create a new empty type registry.
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(HashMap::new()),
        }
    }

    /// Register a schema under the given name, replacing any previous one.
    pub fn register(&self, name: impl Into<String>, schema: T) -> Result<()> {
        let mut inner = self
            .inner
            .write()
            .map_err(|e| CodecError::Other(format!("Registry lock poisoned: {e}")))?;
        inner.insert(name.into(), schema);
        Ok(())
    }

    /// Get a schema by name.
    pub fn get(&self, name: &str) -> Result<Option<T>>
    where
        T: Clone,
    {
        let inner = self
            .inner
            .read()
            .map_err(|e| CodecError::Other(format!("Registry lock poisoned: {e}")))?;
        Ok(inner.get(name).cloned())
    }

    /// Get the number of registered schemas.
    pub(crate) fn len(&self) -> Result<usize> {
        let inner = self
            .inner
            .read()
            .map_err(|e| CodecError::Other(format!("Registry lock poisoned: {e}")))?;
        Ok(inner.len())
    }
}

impl<T> Default for TypeRegistry<T> {
    fn default() -> Self {
        Self::new()
    }
}
