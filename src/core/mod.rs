// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Core types used throughout speccodec.
//!
//! This module provides the foundational types for the library:
//! - [`CodecError`] and the loader boundary errors
//! - [`RawConfig`] - the raw configuration value handed over by the launcher
//! - [`SchemaResolver`] - the schema lookup capability
//! - [`EncoderConfig`] - encoder settings

pub mod config;
pub mod error;
pub mod registry;
pub mod value;

pub use config::EncoderConfig;
pub use error::{ArtifactSpecLoadError, CodecError, InstanceSpecLoadError, Result};
pub use registry::{MessageSchema, MessageValue, SchemaResolver, TypeRegistry};
pub use value::{RawConfig, RawMapping};
