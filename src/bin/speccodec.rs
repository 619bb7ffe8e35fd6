// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! # Speccodec CLI
//!
//! Operator tool for checking deployment specs before a launch.
//!
//! ## Usage
//!
//! ```sh
//! # Encode an instance configuration
//! speccodec instance --name timestamping --config '{"text": "hello"}'
//!
//! # Encode a custom configuration read from stdin
//! speccodec instance --name tokens --descriptors tokens.fds < tokens.json
//!
//! # Encode deploy arguments
//! speccodec artifact tokens:1.0.0 --filename tokens-1.0.0.jar
//!
//! # Decode a standard payload
//! speccodec decode 0801120774657374696e67
//!
//! # List the fields of a message type
//! speccodec fields acme.tokens.Config --descriptors tokens.fds
//! ```

mod cmd;
mod common;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use cmd::{ArtifactArgs, DecodeArgs, FieldsArgs, InstanceArgs};
use common::{init_logging, Result};
use speccodec::EncoderConfig;

/// Speccodec - deployment spec encoder
///
/// Turns instance configurations and artifact specs into the payloads a
/// service runtime receives.
#[derive(Parser, Clone)]
#[command(name = "speccodec")]
#[command(about = "Encode and inspect service deployment payloads", long_about = None)]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(author = "ArcheBase")]
struct Cli {
    /// Log at debug level
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Encoder settings (TOML)
    #[arg(long, global = true, value_name = "FILE")]
    encoder_config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands
#[derive(Subcommand, Clone)]
enum Commands {
    /// Encode the configuration of one instance
    Instance(InstanceArgs),

    /// Encode the deploy arguments of one artifact
    Artifact(ArtifactArgs),

    /// Decode a standard configuration payload
    Decode(DecodeArgs),

    /// List the fields of a message type
    Fields(FieldsArgs),
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = match &cli.encoder_config {
        Some(path) => EncoderConfig::load(path)?,
        None => EncoderConfig::default(),
    };

    match cli.command {
        Commands::Instance(args) => args.run(config),
        Commands::Artifact(args) => args.run(),
        Commands::Decode(args) => args.run(),
        Commands::Fields(args) => args.run(),
    }
}

fn main() {
    let result = run();

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
