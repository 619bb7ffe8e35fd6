// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Predefined runtime message types.
//!
//! The runtime defines two messages of its own that the launcher must be able
//! to produce without any externally compiled descriptors:
//!
//! ```text
//! package exonum.java;
//!
//! message ServiceConfiguration {
//!   enum Format { NONE = 0; TEXT = 1; JSON = 2; PROPERTIES = 3; }
//!   Format format = 1;
//!   string value = 2;
//! }
//!
//! message DeployArguments {
//!   string artifact_filename = 1;
//! }
//! ```
//!
//! They are described here as a `FileDescriptorProto` so the dynamic resolver
//! can serve them by name like any other type.

use prost_types::field_descriptor_proto::{Label, Type as ProtoType};
use prost_types::{
    DescriptorProto, EnumDescriptorProto, EnumValueDescriptorProto, FieldDescriptorProto,
    FileDescriptorProto, FileDescriptorSet,
};

/// Package of the builtin messages.
pub const BUILTIN_PACKAGE: &str = "exonum.java";

/// Type name of the standard configuration message.
pub const STANDARD_MESSAGE_TYPE: &str = "exonum.java.ServiceConfiguration";

/// Type name of the artifact deploy arguments message.
pub const DEPLOY_ARGUMENTS_TYPE: &str = "exonum.java.DeployArguments";

fn enum_value(name: &str, number: i32) -> EnumValueDescriptorProto {
    EnumValueDescriptorProto {
        name: Some(name.to_string()),
        number: Some(number),
        ..Default::default()
    }
}

fn field(name: &str, number: i32, ty: ProtoType) -> FieldDescriptorProto {
    FieldDescriptorProto {
        name: Some(name.to_string()),
        number: Some(number),
        label: Some(Label::Optional as i32),
        r#type: Some(ty as i32),
        json_name: Some(name.to_string()),
        ..Default::default()
    }
}

/// Create the `ServiceConfiguration` message type.
fn service_configuration() -> DescriptorProto {
    let format_enum = EnumDescriptorProto {
        name: Some("Format".to_string()),
        value: vec![
            enum_value("NONE", 0),
            enum_value("TEXT", 1),
            enum_value("JSON", 2),
            enum_value("PROPERTIES", 3),
        ],
        ..Default::default()
    };

    let mut format_field = field("format", 1, ProtoType::Enum);
    format_field.type_name = Some(format!(".{STANDARD_MESSAGE_TYPE}.Format"));

    DescriptorProto {
        name: Some("ServiceConfiguration".to_string()),
        field: vec![format_field, field("value", 2, ProtoType::String)],
        enum_type: vec![format_enum],
        ..Default::default()
    }
}

/// Create the `DeployArguments` message type.
fn deploy_arguments() -> DescriptorProto {
    DescriptorProto {
        name: Some("DeployArguments".to_string()),
        field: vec![field("artifact_filename", 1, ProtoType::String)],
        ..Default::default()
    }
}

/// File descriptor holding all builtin messages.
pub fn builtin_file_descriptor() -> FileDescriptorProto {
    FileDescriptorProto {
        name: Some("exonum/java/runtime.proto".to_string()),
        package: Some(BUILTIN_PACKAGE.to_string()),
        message_type: vec![service_configuration(), deploy_arguments()],
        syntax: Some("proto3".to_string()),
        ..Default::default()
    }
}

/// File descriptor set holding all builtin messages.
pub fn builtin_file_descriptor_set() -> FileDescriptorSet {
    FileDescriptorSet {
        file: vec![builtin_file_descriptor()],
    }
}
