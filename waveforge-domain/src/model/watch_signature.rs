// /////////////////////////////////////////////////////////////////////////////
// Waveforge
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! SHA-1 watch signature over external input `(path, size, mtime)` triples,
//! used to invalidate cache entries when declared external inputs change.

use serde::{Deserialize, Serialize};
use sha1::{Digest, Sha1};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WatchedFile {
    pub path: String,
    pub size: u64,
    pub mtime_unix_nanos: i64,
}

#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct WatchSignature(String);

impl WatchSignature {
    pub fn compute(files: &[WatchedFile]) -> Self {
        let mut sorted: Vec<&WatchedFile> = files.iter().collect();
        sorted.sort_by(|a, b| a.path.cmp(&b.path));

        let mut hasher = Sha1::new();
        for file in sorted {
            hasher.update(file.path.as_bytes());
            hasher.update(file.size.to_le_bytes());
            hasher.update(file.mtime_unix_nanos.to_le_bytes());
        }
        Self(hex::encode(hasher.finalize()))
    }

    pub fn as_hex(&self) -> &str {
        &self.0
    }
}

/// Reads the current `(size, mtime)` for `path` to build a `WatchedFile`.
pub fn stat_watched_file(path: &Path) -> std::io::Result<WatchedFile> {
    let meta = std::fs::metadata(path)?;
    let mtime_unix_nanos = meta
        .modified()?
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_nanos() as i64)
        .unwrap_or(0);
    Ok(WatchedFile {
        path: path.to_string_lossy().into_owned(),
        size: meta.len(),
        mtime_unix_nanos,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn order_of_input_files_does_not_affect_signature() {
        let a = WatchedFile {
            path: "a".into(),
            size: 1,
            mtime_unix_nanos: 0,
        };
        let b = WatchedFile {
            path: "b".into(),
            size: 2,
            mtime_unix_nanos: 0,
        };
        assert_eq!(
            WatchSignature::compute(&[a.clone(), b.clone()]),
            WatchSignature::compute(&[b, a])
        );
    }

    #[test]
    fn size_change_changes_signature() {
        let a = WatchedFile {
            path: "a".into(),
            size: 1,
            mtime_unix_nanos: 0,
        };
        let mut b = a.clone();
        b.size = 2;
        assert_ne!(WatchSignature::compute(&[a]), WatchSignature::compute(&[b]));
    }
}
