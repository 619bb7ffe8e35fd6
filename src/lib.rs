// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! # Speccodec
//!
//! Turns the human-written specs of a service deployment into the binary
//! payloads a service runtime expects.
//!
//! - **Instance configurations** are encoded either into the standard
//!   `exonum.java.ServiceConfiguration` message (TEXT, JSON or PROPERTIES)
//!   or into a custom protobuf message named by the `message_type` key.
//! - **Artifact specs** are encoded into `exonum.java.DeployArguments`.
//!
//! ## Architecture
//!
//! - `core/` - errors, raw values, encoder settings, the schema resolver traits
//! - `schema/` - message type names, field descriptions, builtin descriptors
//! - `encoding/` - format dispatch, text renderers, protobuf building
//! - `loader/` - the entry points called once per instance or artifact
//!
//! ## Example
//!
//! ```rust
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use serde_json::json;
//! use speccodec::{
//!     ArtifactId, DescriptorResolver, InstanceSpec, InstanceSpecEncoder, LoadContext,
//!     ServiceConfigurationReader,
//! };
//!
//! let encoder = InstanceSpecEncoder::new(DescriptorResolver::with_builtins()?);
//! let instance = InstanceSpec::new("timestamping", ArtifactId::new("timestamping", "0.1.0"))
//!     .with_config(json!({"properties": {"Truth": "Beauty"}}));
//!
//! let bytes = encoder.encode(&LoadContext::new(), &instance)?;
//! let reader = ServiceConfigurationReader::from_bytes(&bytes)?;
//! assert_eq!(reader.as_text()?, "Truth=Beauty");
//! # Ok(())
//! # }
//! ```

// Core types
pub mod core;

pub use core::{
    ArtifactSpecLoadError, CodecError, EncoderConfig, InstanceSpecLoadError, MessageSchema,
    MessageValue, RawConfig, RawMapping, Result, SchemaResolver,
};

// Payload encoding
pub mod encoding;

pub use encoding::{
    ConfigFormat, DeployArguments, DescriptorResolver, DescriptorSchema, DynamicMessageValue,
    FormatDispatcher, FormatPayload, ServiceConfiguration, ServiceConfigurationReader,
};

// Schema naming and builtin descriptors
pub mod schema;

pub use schema::{FieldInfo, FieldLabel, MessageTypeName, STANDARD_MESSAGE_TYPE};

// Loader entry points
pub mod loader;

pub use loader::{
    ArtifactId, ArtifactSpec, ArtifactSpecEncoder, InstanceSpec, InstanceSpecEncoder, LoadContext,
};
