// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Loader-facing entry points.
//!
//! The launcher reads its deployment file, then calls into this module once
//! per declared artifact and instance:
//! - [`ArtifactSpecEncoder`] produces the deploy arguments of an artifact,
//! - [`InstanceSpecEncoder`] produces the configuration payload of an instance.
//!
//! Both are pure: the same input always yields the same bytes, and a failure
//! never yields partial output.

pub mod artifact;
pub mod instance;

pub use artifact::{ArtifactSpec, ArtifactSpecEncoder, ARTIFACT_FILENAME_KEY};
pub use instance::InstanceSpecEncoder;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::core::{CodecError, RawConfig};

/// Identity of a code artifact, `name:version`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ArtifactId {
    /// Artifact name
    pub name: String,
    /// Artifact version
    pub version: String,
}

impl ArtifactId {
    /// Create an artifact identity.
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
        }
    }
}

impl fmt::Display for ArtifactId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.name, self.version)
    }
}

impl FromStr for ArtifactId {
    type Err = CodecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.rsplit_once(':') {
            Some((name, version)) if !name.is_empty() && !version.is_empty() => {
                Ok(Self::new(name, version))
            }
            _ => Err(CodecError::Other(format!(
                "invalid artifact id '{s}', expected 'name:version'"
            ))),
        }
    }
}

/// One service instance declared in a deployment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstanceSpec {
    /// Instance name, unique within the deployment
    pub name: String,
    /// Artifact providing the service
    pub artifact: ArtifactId,
    /// Raw configuration, if the author wrote one
    #[serde(default)]
    pub config: Option<RawConfig>,
}

impl InstanceSpec {
    /// Create an instance without configuration.
    pub fn new(name: impl Into<String>, artifact: ArtifactId) -> Self {
        Self {
            name: name.into(),
            artifact,
            config: None,
        }
    }

    /// Set the raw configuration.
    pub fn with_config(mut self, config: RawConfig) -> Self {
        self.config = Some(config);
        self
    }
}

/// Calling context passed by the launcher.
///
/// Encoding does not depend on it; it only labels log records.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadContext {
    deployment: Option<String>,
}

impl LoadContext {
    /// Create an anonymous context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a context for a named deployment.
    pub fn for_deployment(name: impl Into<String>) -> Self {
        Self {
            deployment: Some(name.into()),
        }
    }

    /// Deployment name, if known.
    pub fn deployment(&self) -> Option<&str> {
        self.deployment.as_deref()
    }
}
