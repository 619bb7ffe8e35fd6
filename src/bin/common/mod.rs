// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Common utilities for CLI commands.

use std::io::{IsTerminal as _, Read as _};
use std::path::Path;

use anyhow::Context as _;
use serde_json::Value;
use speccodec::DescriptorResolver;
use tracing_subscriber::EnvFilter;

pub use anyhow::Result as CliResult;
pub type Result<T = ()> = CliResult<T>;

/// Install the log subscriber. `RUST_LOG` wins over `verbose`.
pub fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .try_init();
}

/// Build a resolver with the builtin messages plus an optional compiled
/// `FileDescriptorSet` file.
pub fn load_resolver(descriptors: Option<&Path>, allow_unknown_fields: bool) -> Result<DescriptorResolver> {
    let resolver = match descriptors {
        Some(path) => {
            let bytes = std::fs::read(path)
                .with_context(|| format!("cannot read descriptors {}", path.display()))?;
            DescriptorResolver::from_file_descriptor_set(&bytes)?
        }
        None => DescriptorResolver::with_builtins()?,
    };
    Ok(resolver.with_deny_unknown_fields(!allow_unknown_fields))
}

/// Parse a raw configuration from the argument, or from stdin when absent.
pub fn read_config(arg: Option<&str>) -> Result<Value> {
    let text = match arg {
        Some(text) => text.to_string(),
        None => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .context("cannot read configuration from stdin")?;
            text
        }
    };
    parse_config(&text)
}

/// Parse configuration text. Input that is not JSON is taken verbatim as
/// plain text.
pub fn parse_config(text: &str) -> Result<Value> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Ok(Value::Null);
    }
    Ok(serde_json::from_str(trimmed).unwrap_or_else(|_| Value::String(text.to_string())))
}

/// Decode hex input, ignoring whitespace and an optional `0x` prefix.
pub fn parse_hex(input: &str) -> Result<Vec<u8>> {
    let cleaned: String = input.chars().filter(|c| !c.is_whitespace()).collect();
    let cleaned = cleaned.strip_prefix("0x").unwrap_or(&cleaned);
    hex::decode(cleaned).context("invalid hex input")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_config_json() {
        assert_eq!(parse_config("{\"text\": \"a\"}").unwrap(), json!({"text": "a"}));
        assert_eq!(parse_config("\"quoted\"").unwrap(), json!("quoted"));
    }

    #[test]
    fn test_parse_config_plain_text_is_verbatim() {
        assert_eq!(parse_config("Truth=Beauty\n").unwrap(), json!("Truth=Beauty\n"));
        assert_eq!(parse_config("  indented\n").unwrap(), json!("  indented\n"));
    }

    #[test]
    fn test_parse_config_empty_is_null() {
        assert_eq!(parse_config("  \n").unwrap(), Value::Null);
    }

    #[test]
    fn test_parse_hex() {
        assert_eq!(parse_hex("0x0801").unwrap(), vec![0x08, 0x01]);
        assert_eq!(parse_hex("08 01\n12").unwrap(), vec![0x08, 0x01, 0x12]);
        assert!(parse_hex("zz").is_err());
    }
}
