// /////////////////////////////////////////////////////////////////////////////
// Waveforge
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! Sidecar JSON metadata written alongside each artifact's `.bin` file.

use semver::Version;
use serde::{Deserialize, Serialize};

use super::Lineage;
use crate::value_objects::TimeUnit;

/// Current on-disk metadata schema version. Validated on every `load`;
/// any mismatch is a `CacheCorrupt`, never a silent upgrade.
pub const STORAGE_VERSION: u32 = 1;

#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChecksumAlgorithm {
    Sha1,
    Sha256,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Checksum {
    pub algorithm: ChecksumAlgorithm,
    pub value: String,
}

#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CompressionCodec {
    Zstd,
    Gzip,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Compression {
    pub codec: CompressionCodec,
    /// Codec-specific parameters (e.g. `{"level": 3}`), opaque to the
    /// storage backend beyond round-tripping them to the decompressor.
    pub params: serde_json::Value,
}

/// Canonical field-list for a structured array, or a textual descriptor for
/// non-array outputs, mirroring `OutputSchema::canonical_descriptor`.
pub type DtypeDescriptor = serde_json::Value;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArtifactMetadata {
    pub storage_version: u32,
    pub dtype_descr: DtypeDescriptor,
    pub count: u64,
    pub lineage: Lineage,
    pub plugin_version: Version,
    pub watch_signature: Option<String>,
    pub checksum: Option<Checksum>,
    pub compression: Option<Compression>,
    pub time_unit: Option<TimeUnit>,
}

impl ArtifactMetadata {
    /// Whether `file_size` is consistent with `count * record_size` for a
    /// fixed-size record layout. Always `true` for non-array (`Opaque`)
    /// outputs, which this backend does not size-check.
    pub fn file_size_is_consistent(&self, file_size: u64, record_size: Option<u64>) -> bool {
        match record_size {
            Some(size) => file_size == self.count * size,
            None => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn sample_lineage() -> Lineage {
        Lineage {
            plugin_name: "a".into(),
            plugin_version: Version::new(1, 0, 0),
            output_schema_descriptor: serde_json::json!({"kind": "opaque", "descriptor": "x"}),
            resolved_config_tracked_subset: BTreeMap::new(),
            depends_on: BTreeMap::new(),
        }
    }

    #[test]
    fn file_size_check_matches_record_layout() {
        let meta = ArtifactMetadata {
            storage_version: STORAGE_VERSION,
            dtype_descr: serde_json::json!([]),
            count: 2,
            lineage: sample_lineage(),
            plugin_version: Version::new(1, 0, 0),
            watch_signature: None,
            checksum: None,
            compression: None,
            time_unit: None,
        };
        assert!(meta.file_size_is_consistent(24, Some(12)));
        assert!(!meta.file_size_is_consistent(23, Some(12)));
    }

    #[test]
    fn file_size_check_is_permissive_for_opaque_outputs() {
        let meta = ArtifactMetadata {
            storage_version: STORAGE_VERSION,
            dtype_descr: serde_json::json!("opaque"),
            count: 0,
            lineage: sample_lineage(),
            plugin_version: Version::new(1, 0, 0),
            watch_signature: None,
            checksum: None,
            compression: None,
            time_unit: None,
        };
        assert!(meta.file_size_is_consistent(12345, None));
    }
}
