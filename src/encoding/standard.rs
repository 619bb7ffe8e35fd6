// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Builtin runtime messages with static prost bindings.
//!
//! [`ServiceConfiguration`] is what the standard path of the encoder
//! produces, and [`ServiceConfigurationReader`] is the receiving side: it
//! gives a service typed access to the configuration it was started with.
//! Both match the descriptors in [`crate::schema::builtin_types`].

use std::collections::BTreeMap;
use std::fmt;

use prost::Message;
use serde::de::DeserializeOwned;

use crate::core::{CodecError, Result};
use crate::encoding::properties;
use crate::schema::{DEPLOY_ARGUMENTS_TYPE, STANDARD_MESSAGE_TYPE};

/// Format of a standard service configuration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
#[repr(i32)]
pub enum ConfigFormat {
    /// No format recorded
    None = 0,
    /// Free text
    Text = 1,
    /// JSON text
    Json = 2,
    /// `key=value` properties text
    Properties = 3,
}

impl ConfigFormat {
    /// Enum value name as declared in the schema.
    pub fn name(self) -> &'static str {
        match self {
            ConfigFormat::None => "NONE",
            ConfigFormat::Text => "TEXT",
            ConfigFormat::Json => "JSON",
            ConfigFormat::Properties => "PROPERTIES",
        }
    }
}

impl fmt::Display for ConfigFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The standard service configuration message.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ServiceConfiguration {
    /// How the consumer should interpret `value`
    #[prost(enumeration = "ConfigFormat", tag = "1")]
    pub format: i32,
    /// Configuration text
    #[prost(string, tag = "2")]
    pub value: ::prost::alloc::string::String,
}

impl ServiceConfiguration {
    /// Create a configuration with the given format and text.
    pub fn new(format: ConfigFormat, value: impl Into<String>) -> Self {
        Self {
            format: format as i32,
            value: value.into(),
        }
    }
}

/// Arguments the runtime needs to deploy an artifact.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct DeployArguments {
    /// File name of the artifact inside the runtime's artifact directory
    #[prost(string, tag = "1")]
    pub artifact_filename: ::prost::alloc::string::String,
}

impl DeployArguments {
    /// Decode deploy arguments from their binary encoding.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        Self::decode(bytes).map_err(|e| CodecError::decode(DEPLOY_ARGUMENTS_TYPE, e.to_string()))
    }
}

/// Typed access to a received standard configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceConfigurationReader {
    message: ServiceConfiguration,
}

impl ServiceConfigurationReader {
    /// Decode a configuration payload.
    ///
    /// Fails when the bytes are not a `ServiceConfiguration` or record a
    /// format this version does not know.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let message = ServiceConfiguration::decode(bytes)
            .map_err(|e| CodecError::decode(STANDARD_MESSAGE_TYPE, e.to_string()))?;
        if ConfigFormat::try_from(message.format).is_err() {
            return Err(CodecError::decode(
                STANDARD_MESSAGE_TYPE,
                format!("unknown configuration format {}", message.format),
            ));
        }
        Ok(Self { message })
    }

    /// The recorded format. `NONE` is rejected: a valid payload always has one.
    pub fn format(&self) -> Result<ConfigFormat> {
        match self.message.format() {
            ConfigFormat::None => Err(CodecError::wrong_format(
                "TEXT, JSON or PROPERTIES",
                ConfigFormat::None.name(),
            )),
            format => Ok(format),
        }
    }

    /// The configuration as plain text, whatever its format.
    pub fn as_text(&self) -> Result<&str> {
        self.format()?;
        Ok(&self.message.value)
    }

    /// Deserialize a JSON configuration.
    pub fn as_json<T: DeserializeOwned>(&self) -> Result<T> {
        self.require(ConfigFormat::Json)?;
        serde_json::from_str(&self.message.value)
            .map_err(|e| CodecError::decode(STANDARD_MESSAGE_TYPE, format!("invalid JSON: {e}")))
    }

    /// Parse a PROPERTIES configuration.
    pub fn as_properties(&self) -> Result<BTreeMap<String, String>> {
        self.require(ConfigFormat::Properties)?;
        Ok(properties::parse(&self.message.value))
    }

    fn require(&self, expected: ConfigFormat) -> Result<()> {
        let actual = self.format()?;
        if actual == expected {
            Ok(())
        } else {
            Err(CodecError::wrong_format(expected.name(), actual.name()))
        }
    }
}
