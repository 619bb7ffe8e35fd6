// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Encoder configuration.
//!
//! ```toml
//! message_type_key = "message_type"
//! allow_extra_keys = false
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::error::{CodecError, Result};

/// Default reserved key naming a custom message type.
pub const DEFAULT_MESSAGE_TYPE_KEY: &str = "message_type";

/// Settings of the instance spec encoder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EncoderConfig {
    /// Reserved configuration key whose value names a custom message type.
    pub message_type_key: String,
    /// Accept keys other than the format key in a standard-format mapping.
    pub allow_extra_keys: bool,
}

impl Default for EncoderConfig {
    fn default() -> Self {
        Self {
            message_type_key: DEFAULT_MESSAGE_TYPE_KEY.to_string(),
            allow_extra_keys: false,
        }
    }
}

impl EncoderConfig {
    /// Parse a configuration from TOML text. Missing keys keep their defaults.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text)
            .map_err(|e| CodecError::Other(format!("invalid encoder config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| {
            CodecError::Other(format!("cannot read encoder config {}: {e}", path.display()))
        })?;
        Self::from_toml_str(&text)
    }

    /// Set the reserved message type key.
    pub fn with_message_type_key(mut self, key: impl Into<String>) -> Self {
        self.message_type_key = key.into();
        self
    }

    /// Set whether a standard-format mapping may carry extra keys.
    pub fn with_allow_extra_keys(mut self, allow: bool) -> Self {
        self.allow_extra_keys = allow;
        self
    }

    fn validate(&self) -> Result<()> {
        if self.message_type_key.is_empty() {
            return Err(CodecError::Other(
                "invalid encoder config: message_type_key must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = EncoderConfig::default();
        assert_eq!(config.message_type_key, "message_type");
        assert!(!config.allow_extra_keys);
    }

    #[test]
    fn test_from_toml_partial() {
        let config = EncoderConfig::from_toml_str("allow_extra_keys = true\n").unwrap();
        assert_eq!(config.message_type_key, "message_type");
        assert!(config.allow_extra_keys);
    }

    #[test]
    fn test_from_toml_full() {
        let config = EncoderConfig::from_toml_str(
            "message_type_key = \"schema\"\nallow_extra_keys = true\n",
        )
        .unwrap();
        assert_eq!(config.message_type_key, "schema");
        assert!(config.allow_extra_keys);
    }

    #[test]
    fn test_from_toml_rejects_unknown_keys() {
        assert!(EncoderConfig::from_toml_str("colour = \"blue\"\n").is_err());
    }

    #[test]
    fn test_from_toml_rejects_empty_key() {
        let err = EncoderConfig::from_toml_str("message_type_key = \"\"\n").unwrap_err();
        assert!(err.to_string().contains("message_type_key"));
    }

    #[test]
    fn test_builder_methods() {
        let config = EncoderConfig::default()
            .with_message_type_key("type")
            .with_allow_extra_keys(true);
        assert_eq!(config.message_type_key, "type");
        assert!(config.allow_extra_keys);
    }

    #[test]
    fn test_load_missing_file() {
        let err = EncoderConfig::load("/nonexistent/speccodec.toml").unwrap_err();
        assert!(err.to_string().contains("cannot read encoder config"));
    }
}
