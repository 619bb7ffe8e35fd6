// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Format dispatch for standard configurations.
//!
//! An author writes a standard configuration in one of two shapes:
//!
//! ```yaml
//! config: "free text"            # TEXT shorthand
//! config:
//!   json: {"some": ["json", {}]} # or `text: ...` / `properties: {k: v}`
//! ```
//!
//! [`FormatDispatcher::classify`] maps the raw value to a [`FormatPayload`]
//! in a single step; every shape lands in exactly one variant, including
//! [`FormatPayload::Invalid`]. [`FormatPayload::into_config`] then renders
//! the text stored in the payload.

use std::fmt;

use serde_json::Value;

use crate::core::value::{kind_name, RawMapping};
use crate::core::{CodecError, Result};
use crate::encoding::standard::ConfigFormat;
use crate::encoding::{json, properties};

/// Key selecting the TEXT format.
pub const TEXT_KEY: &str = "text";
/// Key selecting the JSON format.
pub const JSON_KEY: &str = "json";
/// Key selecting the PROPERTIES format.
pub const PROPERTIES_KEY: &str = "properties";

/// All recognized format keys, in precedence order for error messages.
pub const FORMAT_KEYS: [&str; 3] = [TEXT_KEY, JSON_KEY, PROPERTIES_KEY];

/// A raw standard configuration, classified by format.
#[derive(Debug, Clone, PartialEq)]
pub enum FormatPayload<'a> {
    /// Plain string, or the value of a `text` key
    Text(&'a str),
    /// Value of a `json` key
    Json(&'a Value),
    /// Value of a `properties` key
    Properties(&'a RawMapping),
    /// Shape that matches no format
    Invalid(FormatMismatch),
}

/// Why a raw value matches no format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormatMismatch {
    /// Neither a string nor a mapping
    UnsupportedShape {
        /// Shape of the value
        found: &'static str,
    },
    /// A mapping without any recognized key
    NoFormatKey {
        /// Keys the mapping does have
        keys: Vec<String>,
    },
    /// A mapping with several recognized keys
    AmbiguousFormatKeys {
        /// The recognized keys present
        keys: Vec<String>,
    },
    /// A mapping with keys besides its format key
    UnexpectedKeys {
        /// The format key
        format_key: &'static str,
        /// The other keys
        keys: Vec<String>,
    },
    /// A recognized key whose value has the wrong shape
    WrongValueShape {
        /// Path of the offending value
        key: String,
        /// Shape the format requires
        expected: &'static str,
        /// Shape that was found
        found: &'static str,
    },
}

impl fmt::Display for FormatMismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormatMismatch::UnsupportedShape { found } => write!(
                f,
                "expected a string or a mapping with one of {FORMAT_KEYS:?}, found {found}"
            ),
            FormatMismatch::NoFormatKey { keys } => write!(
                f,
                "mapping has none of the format keys {FORMAT_KEYS:?} (keys: {keys:?})"
            ),
            FormatMismatch::AmbiguousFormatKeys { keys } => {
                write!(f, "mapping has more than one format key: {keys:?}")
            }
            FormatMismatch::UnexpectedKeys { format_key, keys } => write!(
                f,
                "mapping with format key '{format_key}' has unexpected keys {keys:?}"
            ),
            FormatMismatch::WrongValueShape {
                key,
                expected,
                found,
            } => write!(f, "'{key}' must be a {expected}, found {found}"),
        }
    }
}

impl FormatPayload<'_> {
    /// Format tag of the payload, `None` if invalid.
    pub fn format(&self) -> Option<ConfigFormat> {
        match self {
            FormatPayload::Text(_) => Some(ConfigFormat::Text),
            FormatPayload::Json(_) => Some(ConfigFormat::Json),
            FormatPayload::Properties(_) => Some(ConfigFormat::Properties),
            FormatPayload::Invalid(_) => None,
        }
    }

    /// Render the format tag and the text stored in the configuration.
    pub fn into_config(self) -> Result<(ConfigFormat, String)> {
        match self {
            FormatPayload::Text(text) => Ok((ConfigFormat::Text, text.to_string())),
            FormatPayload::Json(value) => Ok((ConfigFormat::Json, json::to_config_text(value)?)),
            FormatPayload::Properties(entries) => {
                Ok((ConfigFormat::Properties, properties::render(entries)?))
            }
            FormatPayload::Invalid(mismatch) => Err(CodecError::invalid_format(mismatch.to_string())),
        }
    }
}

/// Classifies raw standard configurations.
#[derive(Debug, Clone, Copy, Default)]
pub struct FormatDispatcher {
    allow_extra_keys: bool,
}

impl FormatDispatcher {
    /// Create a dispatcher that rejects keys besides the format key.
    pub fn new() -> Self {
        Self::default()
    }

    /// Accept (and ignore) keys besides the format key.
    pub fn with_allow_extra_keys(mut self, allow: bool) -> Self {
        self.allow_extra_keys = allow;
        self
    }

    /// Classify a raw configuration value.
    pub fn classify<'a>(&self, raw: &'a Value) -> FormatPayload<'a> {
        let mapping = match raw {
            Value::String(text) => return FormatPayload::Text(text),
            Value::Object(mapping) => mapping,
            other => {
                return FormatPayload::Invalid(FormatMismatch::UnsupportedShape {
                    found: kind_name(other),
                })
            }
        };

        let present: Vec<&'static str> = FORMAT_KEYS
            .iter()
            .copied()
            .filter(|key| mapping.contains_key(*key))
            .collect();

        let format_key = match present.as_slice() {
            [] => {
                return FormatPayload::Invalid(FormatMismatch::NoFormatKey {
                    keys: mapping.keys().cloned().collect(),
                })
            }
            [key] => *key,
            _ => {
                return FormatPayload::Invalid(FormatMismatch::AmbiguousFormatKeys {
                    keys: present.iter().map(|k| k.to_string()).collect(),
                })
            }
        };

        if !self.allow_extra_keys && mapping.len() > 1 {
            return FormatPayload::Invalid(FormatMismatch::UnexpectedKeys {
                format_key,
                keys: mapping
                    .keys()
                    .filter(|k| k.as_str() != format_key)
                    .cloned()
                    .collect(),
            });
        }

        let value = &mapping[format_key];
        match (format_key, value) {
            (TEXT_KEY, Value::String(text)) => FormatPayload::Text(text),
            (JSON_KEY, value) => FormatPayload::Json(value),
            (PROPERTIES_KEY, Value::Object(entries)) => {
                match entries.iter().find(|(_, v)| !is_property_scalar(v)) {
                    Some((key, v)) => FormatPayload::Invalid(FormatMismatch::WrongValueShape {
                        key: format!("{PROPERTIES_KEY}.{key}"),
                        expected: "scalar",
                        found: kind_name(v),
                    }),
                    None => FormatPayload::Properties(entries),
                }
            }
            (key, value) => FormatPayload::Invalid(FormatMismatch::WrongValueShape {
                key: key.to_string(),
                expected: if key == TEXT_KEY { "string" } else { "mapping" },
                found: kind_name(value),
            }),
        }
    }

    /// Classify and render a raw configuration value.
    pub fn dispatch(&self, raw: &Value) -> Result<(ConfigFormat, String)> {
        self.classify(raw).into_config()
    }
}

fn is_property_scalar(value: &Value) -> bool {
    matches!(value, Value::String(_) | Value::Number(_) | Value::Bool(_))
}
