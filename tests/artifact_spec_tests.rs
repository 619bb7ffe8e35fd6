// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Artifact deploy arguments tests.

use prost_reflect::{DescriptorPool, DynamicMessage};
use serde_json::json;
use speccodec::schema::builtin_types::builtin_file_descriptor_set;
use speccodec::{
    ArtifactId, ArtifactSpec, ArtifactSpecEncoder, CodecError, DeployArguments, LoadContext,
};

fn encode(spec: &ArtifactSpec) -> Vec<u8> {
    ArtifactSpecEncoder::new()
        .encode(&LoadContext::new(), spec)
        .unwrap()
}

#[test]
fn test_filename_round_trip() {
    let spec = ArtifactSpec::new(ArtifactId::new("tokens", "1.0.0"), "tokens-1.0.0.jar");
    let args = DeployArguments::from_bytes(&encode(&spec)).unwrap();
    assert_eq!(args.artifact_filename, "tokens-1.0.0.jar");
}

#[test]
fn test_payload_matches_builtin_descriptor() {
    let spec = ArtifactSpec::new(ArtifactId::new("tokens", "1.0.0"), "tokens-1.0.0.jar");
    let bytes = encode(&spec);

    let pool = DescriptorPool::from_file_descriptor_set(builtin_file_descriptor_set()).unwrap();
    let descriptor = pool
        .get_message_by_name("exonum.java.DeployArguments")
        .unwrap();
    let message = DynamicMessage::decode(descriptor, bytes.as_slice()).unwrap();
    let filename = message.get_field_by_name("artifact_filename").unwrap();
    assert_eq!(filename.as_str(), Some("tokens-1.0.0.jar"));
}

#[test]
fn test_deserialized_spec() {
    let spec: ArtifactSpec = serde_json::from_value(json!({
        "artifact": {"name": "tokens", "version": "1.0.0"},
        "spec": {"artifact_filename": "tokens.jar"}
    }))
    .unwrap();
    let args = DeployArguments::from_bytes(&encode(&spec)).unwrap();
    assert_eq!(args.artifact_filename, "tokens.jar");
}

#[test]
fn test_missing_spec_names_artifact() {
    let spec = ArtifactSpec {
        artifact: ArtifactId::new("tokens", "1.0.0"),
        spec: None,
    };
    let err = ArtifactSpecEncoder::new()
        .encode(&LoadContext::for_deployment("testnet"), &spec)
        .unwrap_err();
    assert_eq!(err.cause, CodecError::MissingConfiguration);
    assert_eq!(
        err.to_string(),
        "failed to load the spec of artifact 'tokens:1.0.0': no configuration provided"
    );
}
