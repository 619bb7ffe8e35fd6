// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Instance configuration encoding.
//!
//! A raw configuration takes one of two paths:
//!
//! - **custom**: a mapping carrying the reserved message type key. The key
//!   is removed, the named type is resolved through the injected
//!   [`SchemaResolver`], and the remaining mapping is bound to it.
//! - **standard**: anything else. The configuration is classified into a
//!   [`ConfigFormat`](crate::encoding::ConfigFormat) and wrapped in a
//!   `ServiceConfiguration` message.
//!
//! The reserved key always wins: a mapping that carries it is never
//! inspected for format keys.

use prost::Message;
use serde_json::Value;

use super::{InstanceSpec, LoadContext};
use crate::core::value::kind_name;
use crate::core::{
    CodecError, EncoderConfig, InstanceSpecLoadError, MessageSchema, MessageValue, RawMapping,
    Result, SchemaResolver,
};
use crate::encoding::{FormatDispatcher, ServiceConfiguration};
use crate::schema::MessageTypeName;

/// Encodes the configuration of service instances into payload bytes.
pub struct InstanceSpecEncoder<R> {
    resolver: R,
    config: EncoderConfig,
    dispatcher: FormatDispatcher,
}

enum Route {
    Custom {
        type_name: MessageTypeName,
        values: RawMapping,
    },
    Standard,
}

impl<R: SchemaResolver> InstanceSpecEncoder<R> {
    /// Create an encoder with the default configuration.
    pub fn new(resolver: R) -> Self {
        Self::with_config(resolver, EncoderConfig::default())
    }

    /// Create an encoder with an explicit configuration.
    pub fn with_config(resolver: R, config: EncoderConfig) -> Self {
        let dispatcher = FormatDispatcher::new().with_allow_extra_keys(config.allow_extra_keys);
        Self {
            resolver,
            config,
            dispatcher,
        }
    }

    /// Encoder settings.
    pub fn config(&self) -> &EncoderConfig {
        &self.config
    }

    /// The schema resolver used for custom message types.
    pub fn resolver(&self) -> &R {
        &self.resolver
    }

    /// Encode the configuration of one instance.
    ///
    /// Any failure is reported as an [`InstanceSpecLoadError`] naming the
    /// instance; no bytes are produced in that case.
    pub fn encode(
        &self,
        context: &LoadContext,
        instance: &InstanceSpec,
    ) -> std::result::Result<Vec<u8>, InstanceSpecLoadError> {
        match self.encode_config(context, instance) {
            Ok(bytes) => {
                tracing::debug!(
                    instance = %instance.name,
                    artifact = %instance.artifact,
                    bytes = bytes.len(),
                    "Instance configuration encoded"
                );
                Ok(bytes)
            }
            Err(cause) => Err(InstanceSpecLoadError::new(&instance.name, cause)),
        }
    }

    /// Encode every instance independently.
    ///
    /// A failure in one instance does not stop the others. Results keep the
    /// order of the input.
    pub fn encode_all<'a, I>(
        &self,
        context: &LoadContext,
        instances: I,
    ) -> Vec<(String, std::result::Result<Vec<u8>, InstanceSpecLoadError>)>
    where
        I: IntoIterator<Item = &'a InstanceSpec>,
    {
        instances
            .into_iter()
            .map(|instance| {
                let result = self.encode(context, instance);
                if let Err(e) = &result {
                    let fields = e
                        .cause
                        .log_fields()
                        .into_iter()
                        .map(|(k, v)| format!("{k}={v}"))
                        .collect::<Vec<_>>()
                        .join(" ");
                    tracing::warn!(
                        deployment = context.deployment().unwrap_or("-"),
                        instance = %instance.name,
                        kind = e.cause.kind(),
                        details = %fields,
                        "Failed to encode instance configuration"
                    );
                }
                (instance.name.clone(), result)
            })
            .collect()
    }

    fn encode_config(&self, context: &LoadContext, instance: &InstanceSpec) -> Result<Vec<u8>> {
        let raw = match &instance.config {
            None | Some(Value::Null) => return Err(CodecError::MissingConfiguration),
            Some(raw) => raw,
        };

        match self.route(raw)? {
            Route::Custom { type_name, values } => {
                tracing::debug!(
                    deployment = context.deployment().unwrap_or("-"),
                    instance = %instance.name,
                    message_type = %type_name,
                    "Encoding custom configuration"
                );
                let schema = self.resolver.resolve(&type_name)?;
                let message = schema.build(&values)?;
                Ok(message.serialize())
            }
            Route::Standard => {
                let (format, value) = self.dispatcher.dispatch(raw)?;
                tracing::debug!(
                    deployment = context.deployment().unwrap_or("-"),
                    instance = %instance.name,
                    message_type = %MessageTypeName::standard(),
                    format = %format,
                    "Encoding standard configuration"
                );
                Ok(ServiceConfiguration::new(format, value).encode_to_vec())
            }
        }
    }

    fn route(&self, raw: &Value) -> Result<Route> {
        let key = self.config.message_type_key.as_str();
        let Some(mapping) = raw.as_object() else {
            return Ok(Route::Standard);
        };
        let Some(type_value) = mapping.get(key) else {
            return Ok(Route::Standard);
        };

        let type_name = match type_value {
            Value::String(name) => MessageTypeName::parse(name).map_err(|e| {
                tracing::debug!(message_type = %name, error = %e, "Unusable message type name");
                CodecError::schema_not_found(name.as_str())
            })?,
            other => {
                return Err(CodecError::invalid_format(format!(
                    "'{key}' must be a string naming a message type, found {}",
                    kind_name(other)
                )))
            }
        };

        let values: RawMapping = mapping
            .iter()
            .filter(|(k, _)| k.as_str() != key)
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();

        Ok(Route::Custom { type_name, values })
    }
}
