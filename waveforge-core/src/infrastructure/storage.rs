// /////////////////////////////////////////////////////////////////////////////
// Waveforge
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! Content-addressed artifact store: memory-mapped `.bin` + JSON `.json`
//! sidecar, atomic write-then-rename, and an advisory `.lock` file per key.
//!
//! File operations are synchronous (`std::fs`, `fs2`, `memmap2`); per the
//! teacher's `Adapipe` writer, they run on `spawn_blocking` so the tokio
//! runtime's worker threads are never blocked on disk I/O.

use async_trait::async_trait;
use fs2::FileExt;
use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};

use waveforge_domain::error::WaveforgeError;
use waveforge_domain::model::ArtifactMetadata;
use waveforge_domain::services::{ArtifactView, StorageBackend, StreamWriter};
use waveforge_domain::value_objects::RunId;

const LOCK_BACKOFF_START: Duration = Duration::from_millis(1);
const LOCK_BACKOFF_MAX: Duration = Duration::from_millis(100);
const DEFAULT_LOCK_TIMEOUT: Duration = Duration::from_secs(10);
/// Buffered streaming writes flush at this size, per §4.1.
const STREAM_BUFFER_BYTES: usize = 4 * 1024 * 1024;

pub struct FileStorageBackend {
    root: PathBuf,
    lock_timeout: Duration,
}

impl FileStorageBackend {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            lock_timeout: DEFAULT_LOCK_TIMEOUT,
        }
    }

    pub fn with_lock_timeout(mut self, timeout: Duration) -> Self {
        self.lock_timeout = timeout;
        self
    }

    fn bin_path(&self, key: &str) -> PathBuf {
        self.root.join(format!("{key}.bin"))
    }

    fn json_path(&self, key: &str) -> PathBuf {
        self.root.join(format!("{key}.json"))
    }

    fn lock_path(&self, key: &str) -> PathBuf {
        self.root.join(format!("{key}.lock"))
    }

    /// Acquires an exclusive advisory lock on `{key}.lock`, blocking with
    /// exponential backoff (1 ms..100 ms) until `self.lock_timeout` elapses.
    fn acquire_lock(&self, key: &str) -> Result<File, WaveforgeError> {
        if let Some(parent) = self.bin_path(key).parent() {
            fs::create_dir_all(parent)?;
        }
        let file = OpenOptions::new().create(true).write(true).open(self.lock_path(key))?;

        let start = Instant::now();
        let mut backoff = LOCK_BACKOFF_START;
        loop {
            match file.try_lock_exclusive() {
                Ok(()) => return Ok(file),
                Err(_) if start.elapsed() >= self.lock_timeout => {
                    return Err(WaveforgeError::storage_busy(key, self.lock_timeout.as_millis() as u64));
                }
                Err(_) => {
                    std::thread::sleep(backoff);
                    backoff = (backoff * 2).min(LOCK_BACKOFF_MAX);
                }
            }
        }
    }

    fn write_metadata(&self, key: &str, metadata: &ArtifactMetadata) -> Result<(), WaveforgeError> {
        let json_tmp = self.root.join(format!("{key}.json.tmp"));
        let bytes = serde_json::to_vec_pretty(metadata)?;
        fs::write(&json_tmp, bytes)?;
        fs::rename(&json_tmp, self.json_path(key))?;
        Ok(())
    }

    fn read_metadata_from_disk(&self, key: &str) -> Result<ArtifactMetadata, WaveforgeError> {
        let path = self.json_path(key);
        let bytes = fs::read(&path).map_err(|e| {
            WaveforgeError::cache_corrupt(key, key, format!("missing metadata {}: {e}", path.display()))
        })?;
        serde_json::from_slice(&bytes)
            .map_err(|e| WaveforgeError::cache_corrupt(key, key, format!("metadata parse failure: {e}")))
    }

    fn record_size_hint(metadata: &ArtifactMetadata) -> Option<u64> {
        match metadata.dtype_descr.as_array() {
            Some(fields) if !fields.is_empty() => {
                // Canonical field list; record size is not independently recoverable
                // from JSON alone without a type-size table, so size checks for
                // `Record` layouts are validated by the caller that knows the
                // concrete record struct (see `ArtifactMetadata::file_size_is_consistent`).
                None
            }
            _ => None,
        }
    }
}

/// Buffered append writer for `save_stream`; flushes every
/// [`STREAM_BUFFER_BYTES`] or on `finalize`.
pub struct FileStreamWriter {
    key: String,
    root: PathBuf,
    lock_file: Option<File>,
    file: File,
    buffer: Vec<u8>,
    total_written: u64,
}

#[async_trait]
impl StreamWriter for FileStreamWriter {
    async fn append(&mut self, bytes: &[u8]) -> Result<(), WaveforgeError> {
        self.buffer.extend_from_slice(bytes);
        if self.buffer.len() >= STREAM_BUFFER_BYTES {
            self.flush_buffer()?;
        }
        Ok(())
    }

    async fn finalize(mut self: Box<Self>, metadata: ArtifactMetadata) -> Result<u64, WaveforgeError> {
        self.flush_buffer()?;
        self.file.sync_all()?;
        let tmp_path = self.root.join(format!("{}.tmp", self.key));
        let bin_path = self.root.join(format!("{}.bin", self.key));
        fs::rename(&tmp_path, &bin_path)?;

        let json_tmp = self.root.join(format!("{}.json.tmp", self.key));
        fs::write(&json_tmp, serde_json::to_vec_pretty(&metadata)?)?;
        fs::rename(&json_tmp, self.root.join(format!("{}.json", self.key)))?;

        let total = self.total_written;
        drop(self.lock_file.take());
        let _ = fs::remove_file(self.root.join(format!("{}.lock", self.key)));
        Ok(total)
    }
}

impl FileStreamWriter {
    fn flush_buffer(&mut self) -> Result<(), WaveforgeError> {
        if self.buffer.is_empty() {
            return Ok(());
        }
        self.file.write_all(&self.buffer)?;
        self.total_written += self.buffer.len() as u64;
        self.buffer.clear();
        Ok(())
    }
}

impl Drop for FileStreamWriter {
    /// A writer dropped without `finalize` leaves only the `.tmp`/`.lock`
    /// files behind; no `.bin`/`.json` pair is ever produced, so a
    /// partially-consumed stream can never be observed as a valid artifact.
    fn drop(&mut self) {
        let tmp_path = self.root.join(format!("{}.tmp", self.key));
        let _ = fs::remove_file(tmp_path);
        let _ = fs::remove_file(self.root.join(format!("{}.lock", self.key)));
    }
}

#[async_trait]
impl StorageBackend for FileStorageBackend {
    async fn exists(&self, key: &str) -> bool {
        let bin = self.bin_path(key);
        let json = self.json_path(key);
        if !bin.exists() || !json.exists() {
            return false;
        }
        self.load_metadata(key).await.is_ok()
    }

    async fn save(&self, key: &str, data: &[u8], metadata: ArtifactMetadata) -> Result<(), WaveforgeError> {
        let key = key.to_string();
        let root = self.root.clone();
        let data = data.to_vec();
        let lock_timeout = self.lock_timeout;

        tokio::task::spawn_blocking(move || -> Result<(), WaveforgeError> {
            let backend = FileStorageBackend {
                root,
                lock_timeout,
            };
            let lock = backend.acquire_lock(&key)?;
            let result = (|| {
                let tmp_path = backend.root.join(format!("{key}.tmp"));
                fs::write(&tmp_path, &data)?;
                fs::rename(&tmp_path, backend.bin_path(&key))?;
                backend.write_metadata(&key, &metadata)?;
                Ok(())
            })();
            drop(lock);
            let _ = fs::remove_file(backend.lock_path(&key));
            result
        })
        .await
        .map_err(|e| WaveforgeError::internal_error(format!("save task panicked: {e}")))?
    }

    async fn open_stream_writer(&self, key: &str) -> Result<Box<dyn StreamWriter>, WaveforgeError> {
        let key_owned = key.to_string();
        let root = self.root.clone();
        let lock_timeout = self.lock_timeout;

        tokio::task::spawn_blocking(move || -> Result<Box<dyn StreamWriter>, WaveforgeError> {
            let backend = FileStorageBackend {
                root: root.clone(),
                lock_timeout,
            };
            let lock = backend.acquire_lock(&key_owned)?;
            fs::create_dir_all(&root)?;
            let file = OpenOptions::new()
                .create(true)
                .write(true)
                .truncate(true)
                .open(root.join(format!("{key_owned}.tmp")))?;
            Ok(Box::new(FileStreamWriter {
                key: key_owned,
                root,
                lock_file: Some(lock),
                file,
                buffer: Vec::with_capacity(STREAM_BUFFER_BYTES),
                total_written: 0,
            }))
        })
        .await
        .map_err(|e| WaveforgeError::internal_error(format!("open_stream_writer task panicked: {e}")))?
    }

    async fn load(&self, key: &str) -> Result<ArtifactView, WaveforgeError> {
        let metadata = self.load_metadata(key).await?;
        let key_owned = key.to_string();
        let root = self.root.clone();

        let mmap = tokio::task::spawn_blocking(move || -> Result<memmap2::Mmap, WaveforgeError> {
            let path = root.join(format!("{key_owned}.bin"));
            let file = File::open(&path).map_err(|e| {
                WaveforgeError::cache_corrupt(&key_owned, &key_owned, format!("missing artifact data: {e}"))
            })?;
            // Safety: the storage backend is the sole writer of this file and
            // only ever replaces it via atomic rename, never in-place mutation.
            unsafe { memmap2::Mmap::map(&file) }
                .map_err(|e| WaveforgeError::cache_corrupt(&key_owned, &key_owned, format!("mmap failed: {e}")))
        })
        .await
        .map_err(|e| WaveforgeError::internal_error(format!("load task panicked: {e}")))??;

        if metadata.storage_version != waveforge_domain::model::STORAGE_VERSION {
            return Err(WaveforgeError::cache_corrupt(
                key,
                key,
                format!(
                    "storage_version mismatch: artifact has {}, current is {}",
                    metadata.storage_version,
                    waveforge_domain::model::STORAGE_VERSION
                ),
            ));
        }

        let _ = Self::record_size_hint(&metadata);
        Ok(ArtifactView::new(metadata, Arc::new(mmap)))
    }

    async fn load_metadata(&self, key: &str) -> Result<ArtifactMetadata, WaveforgeError> {
        let key = key.to_string();
        let root = self.root.clone();
        let lock_timeout = self.lock_timeout;
        tokio::task::spawn_blocking(move || {
            let backend = FileStorageBackend { root, lock_timeout };
            backend.read_metadata_from_disk(&key)
        })
        .await
        .map_err(|e| WaveforgeError::internal_error(format!("load_metadata task panicked: {e}")))?
    }

    async fn delete(&self, key: &str) -> Result<(), WaveforgeError> {
        let _ = fs::remove_file(self.bin_path(key));
        let _ = fs::remove_file(self.json_path(key));
        let _ = fs::remove_file(self.lock_path(key));
        Ok(())
    }

    async fn list_keys(&self, run_id: &RunId) -> Result<Vec<String>, WaveforgeError> {
        let cache_dir = self.root.join(run_id.as_str()).join("_cache");
        if !cache_dir.exists() {
            return Ok(Vec::new());
        }
        let mut keys = Vec::new();
        for entry in fs::read_dir(&cache_dir)? {
            let entry = entry?;
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) == Some("bin") {
                if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                    keys.push(stem.to_string());
                }
            }
        }
        keys.sort();
        Ok(keys)
    }

    fn side_effect_dir(&self, run_id: &RunId, plugin_name: &str) -> PathBuf {
        self.root
            .parent()
            .unwrap_or(&self.root)
            .join("_side_effects")
            .join(run_id.as_str())
            .join(plugin_name)
    }
}

/// Builds the storage-root-relative `_cache` directory for `run_id`, per the
/// layout in §6: `{storage_dir}/{run_id}/_cache/`.
pub fn cache_dir(storage_dir: &Path, run_id: &RunId) -> PathBuf {
    storage_dir.join(run_id.as_str()).join("_cache")
}

#[cfg(test)]
mod tests {
    use super::*;
    use waveforge_domain::model::{Lineage, STORAGE_VERSION};
    use waveforge_domain::value_objects::TimeUnit;

    fn sample_metadata() -> ArtifactMetadata {
        ArtifactMetadata {
            storage_version: STORAGE_VERSION,
            dtype_descr: serde_json::json!([["time", "i8"], ["val", "i4"]]),
            count: 2,
            lineage: Lineage {
                plugin_name: "a".into(),
                plugin_version: semver::Version::new(1, 0, 0),
                output_schema_descriptor: serde_json::json!({"kind": "record"}),
                resolved_config_tracked_subset: Default::default(),
                depends_on: Default::default(),
            },
            plugin_version: semver::Version::new(1, 0, 0),
            watch_signature: None,
            checksum: None,
            compression: None,
            time_unit: Some(TimeUnit::Nanoseconds),
        }
    }

    #[tokio::test]
    async fn save_then_load_round_trips_bytes_and_metadata() {
        let dir = tempfile::tempdir().unwrap();
        let backend = FileStorageBackend::new(dir.path());
        let data = vec![1u8, 0, 0, 0, 0, 0, 0, 0, 2, 0, 0, 0];

        backend.save("a-01234567", &data, sample_metadata()).await.unwrap();
        assert!(backend.exists("a-01234567").await);

        let view = backend.load("a-01234567").await.unwrap();
        assert_eq!(view.as_bytes(), &data[..]);
        assert_eq!(view.metadata.count, 2);
    }

    #[tokio::test]
    async fn corrupt_metadata_is_reported_as_cache_corrupt() {
        let dir = tempfile::tempdir().unwrap();
        let backend = FileStorageBackend::new(dir.path());
        backend
            .save("a-01234567", &[1, 2, 3], sample_metadata())
            .await
            .unwrap();

        fs::write(dir.path().join("a-01234567.json"), b"not json").unwrap();

        let err = backend.load_metadata("a-01234567").await.unwrap_err();
        assert!(matches!(err, WaveforgeError::CacheCorrupt { .. }));
    }

    #[tokio::test]
    async fn missing_key_reports_not_existing() {
        let dir = tempfile::tempdir().unwrap();
        let backend = FileStorageBackend::new(dir.path());
        assert!(!backend.exists("missing-00000000").await);
    }

    #[tokio::test]
    async fn stream_writer_leaves_no_artifact_if_dropped_without_finalize() {
        let dir = tempfile::tempdir().unwrap();
        let backend = FileStorageBackend::new(dir.path());
        {
            let mut writer = backend.open_stream_writer("s-01234567").await.unwrap();
            writer.append(&[1, 2, 3]).await.unwrap();
            // dropped without finalize
        }
        assert!(!backend.exists("s-01234567").await);
        assert!(!dir.path().join("s-01234567.bin").exists());
    }

    #[tokio::test]
    async fn stream_writer_finalize_produces_loadable_artifact() {
        let dir = tempfile::tempdir().unwrap();
        let backend = FileStorageBackend::new(dir.path());
        let mut writer = backend.open_stream_writer("s-01234567").await.unwrap();
        writer.append(&[1, 2, 3, 4]).await.unwrap();
        let count = writer.finalize(sample_metadata()).await.unwrap();
        assert_eq!(count, 4);

        let view = backend.load("s-01234567").await.unwrap();
        assert_eq!(view.as_bytes(), &[1, 2, 3, 4]);
    }
}
