// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Payload encoding.
//!
//! - [`format`] - format dispatch for standard configurations
//! - [`json`] / [`properties`] - the text stored in JSON and PROPERTIES payloads
//! - [`standard`] - the builtin runtime messages and the configuration reader
//! - [`protobuf`] - descriptor-backed schema resolution and message building

pub mod format;
pub mod json;
pub mod properties;
pub mod protobuf;
pub mod standard;

pub use format::{FormatDispatcher, FormatMismatch, FormatPayload};
pub use protobuf::{DescriptorResolver, DescriptorSchema, DynamicMessageValue};
pub use standard::{ConfigFormat, DeployArguments, ServiceConfiguration, ServiceConfigurationReader};
