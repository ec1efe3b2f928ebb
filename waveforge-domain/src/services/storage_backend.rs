// /////////////////////////////////////////////////////////////////////////////
// Waveforge
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! Storage backend port.
//!
//! Like `FileIOService` elsewhere in this lineage, this is an infrastructure
//! port: an I/O-bound trait that stays `async` even though the rest of the
//! domain layer is synchronous, because it models a side effect (durable
//! storage), not a CPU-bound business computation. The concrete memory-mapped
//! implementation lives in the infrastructure layer of `waveforge-core`.

use async_trait::async_trait;
use std::path::PathBuf;
use std::sync::Arc;

use crate::error::WaveforgeError;
use crate::model::ArtifactMetadata;
use crate::value_objects::RunId;

/// A loaded artifact: its sidecar metadata plus a view onto its raw bytes.
///
/// `bytes` is `Arc<dyn AsRef<[u8]>>` rather than `Vec<u8>` so the
/// infrastructure implementation can hand back a memory-mapped region
/// without an extra copy, while the domain layer stays free of a direct
/// `memmap2` dependency.
#[derive(Clone)]
pub struct ArtifactView {
    pub metadata: ArtifactMetadata,
    bytes: Arc<dyn AsRef<[u8]> + Send + Sync>,
}

impl std::fmt::Debug for ArtifactView {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ArtifactView")
            .field("metadata", &self.metadata)
            .field("bytes_len", &self.as_bytes().len())
            .finish()
    }
}

impl ArtifactView {
    pub fn new(metadata: ArtifactMetadata, bytes: Arc<dyn AsRef<[u8]> + Send + Sync>) -> Self {
        Self { metadata, bytes }
    }

    pub fn as_bytes(&self) -> &[u8] {
        (*self.bytes).as_ref()
    }
}

/// An in-progress streamed write, used by `save_stream` so chunk-at-a-time
/// producers (the Streaming Engine) can persist incrementally without
/// materializing the whole artifact in memory.
#[async_trait]
pub trait StreamWriter: Send {
    /// Appends one chunk's raw record bytes, bypassing the internal buffer
    /// when `bytes.len()` exceeds it.
    async fn append(&mut self, bytes: &[u8]) -> Result<(), WaveforgeError>;

    /// Writes final metadata (with the accumulated record count) and
    /// commits the artifact atomically. Consumes `self` so a writer cannot
    /// be finalized twice.
    async fn finalize(self: Box<Self>, metadata: ArtifactMetadata) -> Result<u64, WaveforgeError>;
}

/// Content-addressed artifact store backed by memory-mapped binary files +
/// JSON metadata, per §4.1.
#[async_trait]
pub trait StorageBackend: Send + Sync {
    async fn exists(&self, key: &str) -> bool;

    /// Writes `{path}.tmp` then renames atomically to `{path}.bin`;
    /// metadata likewise via `.json.tmp` then rename. Holds an exclusive
    /// advisory lock on `{path}.lock` for the duration; the lock is
    /// released on every exit path, including errors.
    async fn save(&self, key: &str, data: &[u8], metadata: ArtifactMetadata) -> Result<(), WaveforgeError>;

    /// Opens a buffered append writer for chunk-at-a-time persistence.
    async fn open_stream_writer(&self, key: &str) -> Result<Box<dyn StreamWriter>, WaveforgeError>;

    /// Memory-maps the binary file, validating file size against
    /// `count * record_size` and `storage_version`/schema against the
    /// current values.
    async fn load(&self, key: &str) -> Result<ArtifactView, WaveforgeError>;

    async fn load_metadata(&self, key: &str) -> Result<ArtifactMetadata, WaveforgeError>;

    async fn delete(&self, key: &str) -> Result<(), WaveforgeError>;

    async fn list_keys(&self, run_id: &RunId) -> Result<Vec<String>, WaveforgeError>;

    /// Isolated directory for a side-effect plugin's own outputs.
    fn side_effect_dir(&self, run_id: &RunId, plugin_name: &str) -> PathBuf;
}

/// Blanket delegation so a shared `Arc<dyn StorageBackend>` is itself a
/// `StorageBackend`, matching the pattern used for `FileIOService`.
#[async_trait]
impl StorageBackend for Arc<dyn StorageBackend> {
    async fn exists(&self, key: &str) -> bool {
        (**self).exists(key).await
    }

    async fn save(&self, key: &str, data: &[u8], metadata: ArtifactMetadata) -> Result<(), WaveforgeError> {
        (**self).save(key, data, metadata).await
    }

    async fn open_stream_writer(&self, key: &str) -> Result<Box<dyn StreamWriter>, WaveforgeError> {
        (**self).open_stream_writer(key).await
    }

    async fn load(&self, key: &str) -> Result<ArtifactView, WaveforgeError> {
        (**self).load(key).await
    }

    async fn load_metadata(&self, key: &str) -> Result<ArtifactMetadata, WaveforgeError> {
        (**self).load_metadata(key).await
    }

    async fn delete(&self, key: &str) -> Result<(), WaveforgeError> {
        (**self).delete(key).await
    }

    async fn list_keys(&self, run_id: &RunId) -> Result<Vec<String>, WaveforgeError> {
        (**self).list_keys(run_id).await
    }

    fn side_effect_dir(&self, run_id: &RunId, plugin_name: &str) -> PathBuf {
        (**self).side_effect_dir(run_id, plugin_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn artifact_view_exposes_underlying_bytes() {
        let bytes: Arc<dyn AsRef<[u8]> + Send + Sync> = Arc::new(vec![1u8, 2, 3]);
        let metadata = crate::model::ArtifactMetadata {
            storage_version: crate::model::STORAGE_VERSION,
            dtype_descr: serde_json::json!([]),
            count: 0,
            lineage: crate::model::Lineage {
                plugin_name: "a".into(),
                plugin_version: semver::Version::new(1, 0, 0),
                output_schema_descriptor: serde_json::json!(null),
                resolved_config_tracked_subset: Default::default(),
                depends_on: Default::default(),
            },
            plugin_version: semver::Version::new(1, 0, 0),
            watch_signature: None,
            checksum: None,
            compression: None,
            time_unit: None,
        };
        let view = ArtifactView::new(metadata, bytes);
        assert_eq!(view.as_bytes(), &[1, 2, 3]);
    }
}
