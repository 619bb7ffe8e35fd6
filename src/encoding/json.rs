// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Canonical JSON text for JSON-format configurations.
//!
//! The runtime receives JSON configurations as text. The text is produced in
//! a single fixed layout so that the same configuration always yields the
//! same payload bytes:
//! - keys keep the order they had in the source file,
//! - items are separated by `", "` and keys from values by `": "`,
//! - everything sits on one line, followed by a single `\n`.

use std::io;

use serde::Serialize;
use serde_json::ser::{Formatter, Serializer};
use serde_json::Value;

use crate::core::{CodecError, Result};

/// Compact single-line formatter with a space after every separator.
#[derive(Debug, Default, Clone, Copy)]
struct SpacedFormatter;

impl Formatter for SpacedFormatter {
    fn begin_array_value<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_key<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_value<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        writer.write_all(b": ")
    }
}

/// Serialize a value to canonical JSON text, without the trailing newline.
pub fn to_canonical_string(value: &Value) -> Result<String> {
    let mut buf = Vec::new();
    let mut serializer = Serializer::with_formatter(&mut buf, SpacedFormatter);
    value
        .serialize(&mut serializer)
        .map_err(|e| CodecError::invalid_format(format!("cannot serialize JSON: {e}")))?;
    String::from_utf8(buf)
        .map_err(|e| CodecError::invalid_format(format!("JSON is not valid UTF-8: {e}")))
}

/// Serialize a value to the JSON text stored in a configuration payload.
pub fn to_config_text(value: &Value) -> Result<String> {
    let mut text = to_canonical_string(value)?;
    text.push('\n');
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_nested_layout() {
        let value = json!({"some": ["json", {}]});
        assert_eq!(to_canonical_string(&value).unwrap(), r#"{"some": ["json", {}]}"#);
    }

    #[test]
    fn test_config_text_has_trailing_newline() {
        let value = json!({"some": ["json", {}]});
        assert_eq!(to_config_text(&value).unwrap(), "{\"some\": [\"json\", {}]}\n");
    }

    #[test]
    fn test_multiple_keys_and_items() {
        let value: Value = serde_json::from_str(r#"{"b": [1, 2.5, true, null], "a": {"x": "y"}}"#)
            .unwrap();
        assert_eq!(
            to_canonical_string(&value).unwrap(),
            r#"{"b": [1, 2.5, true, null], "a": {"x": "y"}}"#
        );
    }

    #[test]
    fn test_empty_containers() {
        assert_eq!(to_canonical_string(&json!({})).unwrap(), "{}");
        assert_eq!(to_canonical_string(&json!([])).unwrap(), "[]");
    }

    #[test]
    fn test_scalars() {
        assert_eq!(to_canonical_string(&json!("text")).unwrap(), "\"text\"");
        assert_eq!(to_canonical_string(&json!(42)).unwrap(), "42");
        assert_eq!(to_canonical_string(&json!(null)).unwrap(), "null");
    }

    #[test]
    fn test_string_escaping() {
        let value = json!({"quote": "say \"hi\"\n"});
        assert_eq!(
            to_canonical_string(&value).unwrap(),
            r#"{"quote": "say \"hi\"\n"}"#
        );
    }
}
