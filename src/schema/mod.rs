// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Message schema naming and description.
//!
//! This module provides:
//! - [`MessageTypeName`] - a validated, fully-qualified protobuf type name
//! - [`FieldInfo`] - a resolver-independent description of a message field
//! - [`builtin_types`] - descriptors of the messages the runtime defines itself

pub mod builtin_types;
pub mod descriptor;

pub use builtin_types::{DEPLOY_ARGUMENTS_TYPE, STANDARD_MESSAGE_TYPE};
pub use descriptor::{FieldInfo, FieldLabel};

use std::fmt;
use std::str::FromStr;

use crate::core::{CodecError, Result};

/// A fully-qualified message type name such as `exonum.java.ServiceConfiguration`.
///
/// Each dot-separated segment must be a protobuf identifier. A single leading
/// dot (the absolute form used inside descriptors) is accepted and dropped.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MessageTypeName(String);

impl MessageTypeName {
    /// Parse and validate a type name.
    pub fn parse(name: &str) -> Result<Self> {
        let trimmed = name.strip_prefix('.').unwrap_or(name);
        if trimmed.is_empty() {
            return Err(CodecError::invalid_type_name(name, "name is empty"));
        }
        for segment in trimmed.split('.') {
            if !is_identifier(segment) {
                return Err(CodecError::invalid_type_name(
                    name,
                    format!("'{segment}' is not a valid identifier"),
                ));
            }
        }
        Ok(Self(trimmed.to_string()))
    }

    /// The name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The standard configuration message type.
    pub fn standard() -> Self {
        Self(STANDARD_MESSAGE_TYPE.to_string())
    }
}

fn is_identifier(segment: &str) -> bool {
    let mut chars = segment.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

impl FromStr for MessageTypeName {
    type Err = CodecError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for MessageTypeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for MessageTypeName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_qualified_name() {
        let name = MessageTypeName::parse("exonum.java.ServiceConfiguration").unwrap();
        assert_eq!(name.as_str(), "exonum.java.ServiceConfiguration");
    }

    #[test]
    fn test_parse_strips_leading_dot() {
        let name: MessageTypeName = ".acme.Config".parse().unwrap();
        assert_eq!(name.to_string(), "acme.Config");
    }

    #[test]
    fn test_parse_unqualified_name() {
        let name = MessageTypeName::parse("Config").unwrap();
        assert_eq!(name.as_str(), "Config");
    }

    #[test]
    fn test_parse_rejects_malformed_names() {
        for bad in ["", ".", "acme..Config", "acme.", "1acme.Config", "acme.Con-fig", "a b"] {
            let err = MessageTypeName::parse(bad).unwrap_err();
            assert!(
                matches!(err, CodecError::InvalidTypeName { .. }),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_standard_name() {
        assert_eq!(
            MessageTypeName::standard().as_str(),
            "exonum.java.ServiceConfiguration"
        );
    }
}
