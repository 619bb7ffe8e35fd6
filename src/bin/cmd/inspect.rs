// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Inspect commands - decode payloads and describe message types.

use std::path::PathBuf;

use clap::Args;
use serde::Serialize;
use speccodec::{
    CodecError, FieldInfo, MessageSchema, MessageTypeName, SchemaResolver,
    ServiceConfigurationReader,
};

use crate::common::{load_resolver, parse_hex, Result};

/// Decode a standard configuration payload.
#[derive(Args, Clone, Debug)]
pub struct DecodeArgs {
    /// Payload as hex
    #[arg(value_name = "HEX")]
    payload: String,

    /// Output as JSON
    #[arg(short, long)]
    json: bool,
}

#[derive(Serialize)]
struct DecodedPayload<'a> {
    format: &'static str,
    value: &'a str,
}

impl DecodeArgs {
    pub fn run(self) -> Result<()> {
        let bytes = parse_hex(&self.payload)?;
        let reader = ServiceConfigurationReader::from_bytes(&bytes)?;
        let decoded = DecodedPayload {
            format: reader.format()?.name(),
            value: reader.as_text()?,
        };

        output_json_or(self.json, &decoded, || {
            println!("format: {}", decoded.format);
            println!("value:");
            println!("{}", decoded.value);
        })
    }
}

/// List the fields of a message type.
#[derive(Args, Clone, Debug)]
pub struct FieldsArgs {
    /// Fully-qualified message type
    #[arg(value_name = "TYPE")]
    type_name: String,

    /// Compiled FileDescriptorSet with custom message types
    #[arg(short, long, value_name = "FILE")]
    descriptors: Option<PathBuf>,

    /// Output as JSON
    #[arg(short, long)]
    json: bool,
}

#[derive(Serialize)]
struct FieldItem {
    name: String,
    number: u32,
    #[serde(rename = "type")]
    type_name: String,
    label: String,
    oneof: Option<String>,
}

impl From<FieldInfo> for FieldItem {
    fn from(field: FieldInfo) -> Self {
        Self {
            label: field.label.to_string(),
            name: field.name,
            number: field.number,
            type_name: field.type_name,
            oneof: field.oneof,
        }
    }
}

impl FieldsArgs {
    pub fn run(self) -> Result<()> {
        let resolver = load_resolver(self.descriptors.as_deref(), false)?;
        let type_name = MessageTypeName::parse(&self.type_name)?;
        let schema = match resolver.resolve(&type_name) {
            Ok(schema) => schema,
            Err(e @ CodecError::SchemaNotFound { .. }) => {
                let known = resolver.type_names()?;
                return Err(anyhow::anyhow!("{e}; known types: {}", known.join(", ")));
            }
            Err(e) => return Err(e.into()),
        };
        let fields = schema.fields();

        let items: Vec<FieldItem> = fields.iter().cloned().map(FieldItem::from).collect();
        output_json_or(self.json, &items, || {
            println!("message {} {{", schema.type_name());
            for field in &fields {
                println!("  {field};");
            }
            println!("}}");
        })
    }
}

fn output_json_or<T>(json: bool, value: &T, human_fn: impl FnOnce()) -> Result<()>
where
    T: Serialize,
{
    if json {
        println!("{}", serde_json::to_string_pretty(value)?);
    } else {
        human_fn();
    }
    Ok(())
}
