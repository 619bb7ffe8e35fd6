// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Protobuf schema resolution and dynamic message building.

pub mod codec;
pub mod resolver;

pub use codec::DynamicMessageValue;
pub use resolver::{DescriptorResolver, DescriptorSchema};
