// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Encode commands - produce the payloads of instances and artifacts.

use std::path::PathBuf;

use clap::Args;
use speccodec::{
    ArtifactId, ArtifactSpec, ArtifactSpecEncoder, EncoderConfig, InstanceSpec,
    InstanceSpecEncoder, LoadContext,
};

use crate::common::{load_resolver, read_config, Result};

/// Encode the configuration of one instance.
#[derive(Args, Clone, Debug)]
pub struct InstanceArgs {
    /// Instance name, reported in errors
    #[arg(short, long)]
    name: String,

    /// Artifact providing the service
    #[arg(short, long, default_value = "unknown:0.0.0")]
    artifact: String,

    /// Raw configuration as JSON (plain text is taken as TEXT). Read from
    /// stdin when omitted.
    #[arg(short, long)]
    config: Option<String>,

    /// Compiled FileDescriptorSet with custom message types
    #[arg(short, long, value_name = "FILE")]
    descriptors: Option<PathBuf>,

    /// Accept keys that a custom message does not declare
    #[arg(long)]
    allow_unknown_fields: bool,
}

impl InstanceArgs {
    pub fn run(self, config: EncoderConfig) -> Result<()> {
        let resolver = load_resolver(self.descriptors.as_deref(), self.allow_unknown_fields)?;
        let encoder = InstanceSpecEncoder::with_config(resolver, config);

        let raw = read_config(self.config.as_deref())?;
        let artifact: ArtifactId = self.artifact.parse()?;
        let mut instance = InstanceSpec::new(self.name, artifact);
        if !raw.is_null() {
            instance = instance.with_config(raw);
        }

        let bytes = encoder.encode(&LoadContext::new(), &instance)?;
        println!("{}", hex::encode(bytes));
        Ok(())
    }
}

/// Encode the deploy arguments of one artifact.
#[derive(Args, Clone, Debug)]
pub struct ArtifactArgs {
    /// Artifact identity, `name:version`
    #[arg(value_name = "NAME:VERSION")]
    artifact: String,

    /// Artifact file name
    #[arg(short, long)]
    filename: String,
}

impl ArtifactArgs {
    pub fn run(self) -> Result<()> {
        let spec = ArtifactSpec::new(self.artifact.parse()?, self.filename);
        let bytes = ArtifactSpecEncoder::new().encode(&LoadContext::new(), &spec)?;
        println!("{}", hex::encode(bytes));
        Ok(())
    }
}
