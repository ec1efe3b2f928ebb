// /////////////////////////////////////////////////////////////////////////////
// Waveforge
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! The data half of the domain model: plugin contracts, provenance,
//! streaming records, and on-disk metadata. All pure data — no I/O.

mod artifact_metadata;
mod cache_entry;
mod chunk;
mod lineage;
mod plugin;
mod resolved_config;
mod watch_signature;

pub use artifact_metadata::{
    ArtifactMetadata, Checksum, ChecksumAlgorithm, Compression, CompressionCodec, DtypeDescriptor, STORAGE_VERSION,
};
pub use cache_entry::CacheEntry;
pub use chunk::{check_monotonic_indices, check_no_overlap, Chunk, Record, Samples};
pub use lineage::{hash_lineage, Lineage};
pub use plugin::{
    Dependency, FieldDescriptor, OptionSpec, OptionType, OutputKind, OutputSchema, PluginDescriptor,
};
pub use resolved_config::{ConfigOrigin, ResolvedConfig, ResolvedOption};
pub use watch_signature::{stat_watched_file, WatchSignature, WatchedFile};
