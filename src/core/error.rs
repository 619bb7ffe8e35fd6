// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Core error types for speccodec.
//!
//! Errors come in two layers:
//! - [`CodecError`] describes what went wrong while encoding a single value
//!   (missing configuration, unknown schema, bad format, field binding).
//! - [`InstanceSpecLoadError`] and [`ArtifactSpecLoadError`] are the only
//!   errors that cross the loader boundary. They always name the instance or
//!   artifact that failed and keep the [`CodecError`] as their source.

use thiserror::Error;

/// Errors that can occur while turning a raw configuration into a payload.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CodecError {
    /// The instance declared no configuration at all.
    #[error("no configuration provided")]
    MissingConfiguration,

    /// A message type name is not a valid dotted protobuf path.
    #[error("invalid message type name '{type_name}': {reason}")]
    InvalidTypeName {
        /// The rejected name
        type_name: String,
        /// Why it was rejected
        reason: String,
    },

    /// An explicitly named message type could not be resolved.
    #[error("message type not found: '{type_name}'")]
    SchemaNotFound {
        /// Type name that was not found
        type_name: String,
    },

    /// Descriptor definitions could not be loaded.
    #[error("invalid schema definitions: {reason}")]
    InvalidSchema {
        /// Loader error message
        reason: String,
    },

    /// A configuration value does not match any supported format.
    #[error("invalid configuration format: {reason}")]
    InvalidConfigurationFormat {
        /// What is wrong with the value
        reason: String,
    },

    /// A configuration value could not be bound to a message field.
    #[error("cannot bind field '{field}' of '{type_name}': {reason}")]
    FieldBinding {
        /// Message type being built
        type_name: String,
        /// Field path (dot separated for nested messages)
        field: String,
        /// Why binding failed
        reason: String,
    },

    /// Received bytes are not a valid encoding of the expected message.
    #[error("cannot decode '{type_name}': {message}")]
    Decode {
        /// Message type being decoded
        type_name: String,
        /// Decoder error message
        message: String,
    },

    /// A decoded configuration is not in the format the caller asked for.
    #[error("configuration has format {actual}, expected {expected}")]
    WrongFormat {
        /// Format requested by the caller
        expected: String,
        /// Format recorded in the payload
        actual: String,
    },

    /// Other error
    #[error("{0}")]
    Other(String),
}

impl CodecError {
    /// Create an invalid type name error.
    pub fn invalid_type_name(type_name: impl Into<String>, reason: impl Into<String>) -> Self {
        CodecError::InvalidTypeName {
            type_name: type_name.into(),
            reason: reason.into(),
        }
    }

    /// Create a "schema not found" error.
    pub fn schema_not_found(type_name: impl Into<String>) -> Self {
        CodecError::SchemaNotFound {
            type_name: type_name.into(),
        }
    }

    /// Create an invalid schema error.
    pub fn invalid_schema(reason: impl Into<String>) -> Self {
        CodecError::InvalidSchema {
            reason: reason.into(),
        }
    }

    /// Create an invalid configuration format error.
    pub fn invalid_format(reason: impl Into<String>) -> Self {
        CodecError::InvalidConfigurationFormat {
            reason: reason.into(),
        }
    }

    /// Create a field binding error.
    pub fn field_binding(
        type_name: impl Into<String>,
        field: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        CodecError::FieldBinding {
            type_name: type_name.into(),
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Create a decode error.
    pub fn decode(type_name: impl Into<String>, message: impl Into<String>) -> Self {
        CodecError::Decode {
            type_name: type_name.into(),
            message: message.into(),
        }
    }

    /// Create a wrong format error.
    pub fn wrong_format(expected: impl Into<String>, actual: impl Into<String>) -> Self {
        CodecError::WrongFormat {
            expected: expected.into(),
            actual: actual.into(),
        }
    }

    /// Short, stable name of the error kind.
    pub fn kind(&self) -> &'static str {
        match self {
            CodecError::MissingConfiguration => "MissingConfiguration",
            CodecError::InvalidTypeName { .. } => "InvalidTypeName",
            CodecError::SchemaNotFound { .. } => "SchemaNotFound",
            CodecError::InvalidSchema { .. } => "InvalidSchema",
            CodecError::InvalidConfigurationFormat { .. } => "InvalidConfigurationFormat",
            CodecError::FieldBinding { .. } => "FieldBindingError",
            CodecError::Decode { .. } => "Decode",
            CodecError::WrongFormat { .. } => "WrongFormat",
            CodecError::Other(_) => "Other",
        }
    }

    /// Get structured fields for logging.
    pub fn log_fields(&self) -> Vec<(&'static str, String)> {
        match self {
            CodecError::MissingConfiguration => Vec::new(),
            CodecError::InvalidTypeName { type_name, reason } => {
                vec![("type", type_name.clone()), ("reason", reason.clone())]
            }
            CodecError::SchemaNotFound { type_name } => vec![("type", type_name.clone())],
            CodecError::InvalidSchema { reason } => vec![("reason", reason.clone())],
            CodecError::InvalidConfigurationFormat { reason } => {
                vec![("reason", reason.clone())]
            }
            CodecError::FieldBinding {
                type_name,
                field,
                reason,
            } => vec![
                ("type", type_name.clone()),
                ("field", field.clone()),
                ("reason", reason.clone()),
            ],
            CodecError::Decode { type_name, message } => {
                vec![("type", type_name.clone()), ("message", message.clone())]
            }
            CodecError::WrongFormat { expected, actual } => {
                vec![("expected", expected.clone()), ("actual", actual.clone())]
            }
            CodecError::Other(msg) => vec![("message", msg.clone())],
        }
    }
}

/// Failure to produce the payload of one service instance.
///
/// The message always contains the instance name, so a caller processing
/// many instances can tell the operator which one is misconfigured.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("failed to load the spec of instance '{instance}': {cause}")]
pub struct InstanceSpecLoadError {
    /// Name of the instance that failed
    pub instance: String,
    /// Underlying error
    #[source]
    pub cause: CodecError,
}

impl InstanceSpecLoadError {
    /// Wrap a codec error for the named instance.
    pub fn new(instance: impl Into<String>, cause: CodecError) -> Self {
        Self {
            instance: instance.into(),
            cause,
        }
    }
}

/// Failure to produce the deploy arguments of one artifact.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("failed to load the spec of artifact '{artifact}': {cause}")]
pub struct ArtifactSpecLoadError {
    /// Artifact identifier, `name:version`
    pub artifact: String,
    /// Underlying error
    #[source]
    pub cause: CodecError,
}

impl ArtifactSpecLoadError {
    /// Wrap a codec error for the named artifact.
    pub fn new(artifact: impl Into<String>, cause: CodecError) -> Self {
        Self {
            artifact: artifact.into(),
            cause,
        }
    }
}

/// Result type for speccodec operations.
pub type Result<T> = std::result::Result<T, CodecError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_missing_configuration_error() {
        let err = CodecError::MissingConfiguration;
        assert_eq!(err.to_string(), "no configuration provided");
        assert_eq!(err.kind(), "MissingConfiguration");
        assert!(err.log_fields().is_empty());
    }

    #[test]
    fn test_schema_not_found_error() {
        let err = CodecError::schema_not_found("acme.Missing");
        assert!(matches!(err, CodecError::SchemaNotFound { .. }));
        assert_eq!(err.to_string(), "message type not found: 'acme.Missing'");
    }

    #[test]
    fn test_invalid_format_error() {
        let err = CodecError::invalid_format("no recognized format key");
        assert_eq!(
            err.to_string(),
            "invalid configuration format: no recognized format key"
        );
        assert_eq!(err.kind(), "InvalidConfigurationFormat");
    }

    #[test]
    fn test_field_binding_error() {
        let err = CodecError::field_binding("acme.Config", "port", "expected integer");
        assert_eq!(
            err.to_string(),
            "cannot bind field 'port' of 'acme.Config': expected integer"
        );
        assert_eq!(err.kind(), "FieldBindingError");
    }

    #[test]
    fn test_wrong_format_error() {
        let err = CodecError::wrong_format("JSON", "TEXT");
        assert_eq!(err.to_string(), "configuration has format TEXT, expected JSON");
    }

    #[test]
    fn test_log_fields_field_binding() {
        let err = CodecError::field_binding("acme.Config", "port", "reason");
        let fields = err.log_fields();
        assert_eq!(fields.len(), 3);
        assert_eq!(fields[0], ("type", "acme.Config".to_string()));
        assert_eq!(fields[1], ("field", "port".to_string()));
        assert_eq!(fields[2], ("reason", "reason".to_string()));
    }

    #[test]
    fn test_log_fields_decode() {
        let err = CodecError::decode("acme.Config", "truncated");
        let fields = err.log_fields();
        assert_eq!(fields.len(), 2);
        assert_eq!(fields[0].0, "type");
        assert_eq!(fields[1].1, "truncated");
    }

    #[test]
    fn test_instance_error_names_instance_and_keeps_cause() {
        let err = InstanceSpecLoadError::new("timestamping", CodecError::MissingConfiguration);
        let text = err.to_string();
        assert!(text.contains("timestamping"));
        assert!(text.contains("no configuration provided"));

        let source = err.source().expect("cause must be kept");
        assert_eq!(source.to_string(), "no configuration provided");
    }

    #[test]
    fn test_artifact_error_names_artifact() {
        let err = ArtifactSpecLoadError::new(
            "cryptocurrency:1.0.0",
            CodecError::invalid_format("missing artifact_filename"),
        );
        assert!(err.to_string().contains("cryptocurrency:1.0.0"));
        assert!(err.source().is_some());
    }

    #[test]
    fn test_error_clone() {
        let err1 = CodecError::schema_not_found("a.B");
        let err2 = err1.clone();
        assert_eq!(err1, err2);
    }
}
