// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Resolver-independent field descriptions.

use std::fmt;

/// Field label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldLabel {
    /// Singular field (proto3 implicit or proto2 `optional`)
    Optional,
    /// proto2 `required` field
    Required,
    /// `repeated` field, including map fields
    Repeated,
}

impl fmt::Display for FieldLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldLabel::Optional => write!(f, "optional"),
            FieldLabel::Required => write!(f, "required"),
            FieldLabel::Repeated => write!(f, "repeated"),
        }
    }
}

/// Information about a field in a message schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldInfo {
    /// Field name
    pub name: String,
    /// Field number
    pub number: u32,
    /// Type name: a scalar (`int32`, `string`), a fully-qualified message or
    /// enum name, or `map<K, V>`
    pub type_name: String,
    /// Field label
    pub label: FieldLabel,
    /// Name of the (non-synthetic) oneof group this field belongs to
    pub oneof: Option<String>,
}

impl FieldInfo {
    /// Whether the field is part of a oneof group.
    pub fn is_oneof_member(&self) -> bool {
        self.oneof.is_some()
    }
}

impl fmt::Display for FieldInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} = {}",
            self.label, self.type_name, self.name, self.number
        )?;
        if let Some(oneof) = &self.oneof {
            write!(f, " (oneof {oneof})")?;
        }
        Ok(())
    }
}
