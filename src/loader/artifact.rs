// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Artifact deploy arguments.

use prost::Message;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{ArtifactId, LoadContext};
use crate::core::value::kind_name;
use crate::core::{ArtifactSpecLoadError, CodecError, RawConfig, Result};
use crate::encoding::DeployArguments;

/// Key of the file name in a mapping-shaped artifact spec.
pub const ARTIFACT_FILENAME_KEY: &str = "artifact_filename";

/// One artifact declared in a deployment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArtifactSpec {
    /// Artifact identity
    pub artifact: ArtifactId,
    /// Either the artifact file name, or `{artifact_filename: ...}`
    #[serde(default)]
    pub spec: Option<RawConfig>,
}

impl ArtifactSpec {
    /// Create an artifact spec naming its file directly.
    pub fn new(artifact: ArtifactId, filename: impl Into<String>) -> Self {
        Self {
            artifact,
            spec: Some(Value::String(filename.into())),
        }
    }
}

/// Encodes artifact specs into `DeployArguments` payloads.
#[derive(Debug, Clone, Copy, Default)]
pub struct ArtifactSpecEncoder;

impl ArtifactSpecEncoder {
    /// Create an artifact spec encoder. It holds no state.
    pub fn new() -> Self {
        Self
    }

    /// Encode the deploy arguments of one artifact.
    pub fn encode(
        &self,
        context: &LoadContext,
        artifact: &ArtifactSpec,
    ) -> std::result::Result<Vec<u8>, ArtifactSpecLoadError> {
        let filename = filename(artifact.spec.as_ref())
            .map_err(|cause| ArtifactSpecLoadError::new(artifact.artifact.to_string(), cause))?;

        tracing::debug!(
            deployment = context.deployment().unwrap_or("-"),
            artifact = %artifact.artifact,
            filename = %filename,
            "Encoding deploy arguments"
        );

        Ok(DeployArguments {
            artifact_filename: filename,
        }
        .encode_to_vec())
    }
}

fn filename(spec: Option<&Value>) -> Result<String> {
    let name = match spec {
        None | Some(Value::Null) => return Err(CodecError::MissingConfiguration),
        Some(Value::String(name)) => name,
        Some(Value::Object(mapping)) => {
            if let Some(extra) = mapping.keys().find(|k| k.as_str() != ARTIFACT_FILENAME_KEY) {
                return Err(CodecError::invalid_format(format!(
                    "unexpected key '{extra}' in artifact spec"
                )));
            }
            match mapping.get(ARTIFACT_FILENAME_KEY) {
                Some(Value::String(name)) => name,
                Some(other) => {
                    return Err(CodecError::invalid_format(format!(
                        "'{ARTIFACT_FILENAME_KEY}' must be a string, found {}",
                        kind_name(other)
                    )))
                }
                None => {
                    return Err(CodecError::invalid_format(format!(
                        "artifact spec has no '{ARTIFACT_FILENAME_KEY}' key"
                    )))
                }
            }
        }
        Some(other) => {
            return Err(CodecError::invalid_format(format!(
                "artifact spec must be a file name or a mapping, found {}",
                kind_name(other)
            )))
        }
    };

    if name.trim().is_empty() {
        return Err(CodecError::invalid_format("artifact file name is empty"));
    }
    Ok(name.clone())
}
