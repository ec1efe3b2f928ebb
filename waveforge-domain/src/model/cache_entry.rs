// /////////////////////////////////////////////////////////////////////////////
// Waveforge
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! Runtime view of one cached artifact, as surfaced by the cache-maintenance
//! tools' scanner and diagnostics.

use semver::Version;
use serde::{Deserialize, Serialize};

use super::Lineage;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheEntry {
    pub key: String,
    pub run_id: String,
    pub data_name: String,
    pub size_bytes: u64,
    pub mtime_unix_nanos: i64,
    pub lineage: Option<Lineage>,
    pub plugin_version: Option<Version>,
    pub on_disk: bool,
    pub in_memory: bool,
}
