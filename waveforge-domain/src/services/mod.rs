// /////////////////////////////////////////////////////////////////////////////
// Waveforge
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! Domain service traits: the seams infrastructure implements.
//!
//! `plugin` defines the one dynamic-dispatch trait a plugin author
//! implements (`compute`); everything else about a plugin is static data in
//! [`crate::model::PluginDescriptor`]. `storage_backend` defines the
//! artifact-store port.

mod plugin;
mod storage_backend;

pub use plugin::{ExecutionContext, Plugin, StaticOutput};
pub use storage_backend::{ArtifactView, StorageBackend, StreamWriter};
