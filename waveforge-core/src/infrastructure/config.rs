// /////////////////////////////////////////////////////////////////////////////
// Waveforge
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Runtime Configuration
//!
//! Layered configuration for the scheduler and storage backend: defaults,
//! an optional config file (TOML/YAML/JSON, chosen by extension), then
//! environment variables prefixed `WAVEFORGE_` (double underscore as the
//! nesting separator, e.g. `WAVEFORGE_STORAGE__LOCK_TIMEOUT_MS`).

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use waveforge_domain::error::WaveforgeError;
use waveforge_domain::value_objects::DEFAULT_HASH_PREFIX_LEN;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    pub storage_dir: PathBuf,
    pub lock_timeout_ms: u64,
    pub hash_prefix_len: usize,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            storage_dir: PathBuf::from("./waveforge-storage"),
            lock_timeout_ms: 10_000,
            hash_prefix_len: DEFAULT_HASH_PREFIX_LEN,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchedulerConfig {
    /// Defaults to `"DAQ"`, per §6.
    pub data_root: String,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            data_root: "DAQ".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RuntimeConfig {
    pub storage: StorageConfig,
    pub scheduler: SchedulerConfig,
}

impl RuntimeConfig {
    /// Builds configuration from defaults, an optional file, then
    /// `WAVEFORGE_`-prefixed environment variables, in ascending precedence.
    pub fn load(file: Option<&Path>) -> Result<Self, WaveforgeError> {
        let mut builder = config::Config::builder().add_source(
            config::Config::try_from(&RuntimeConfig::default())
                .map_err(|e| WaveforgeError::config_error("runtime", "config", e.to_string()))?,
        );

        if let Some(path) = file {
            builder = builder.add_source(config::File::from(path));
        }

        builder = builder.add_source(config::Environment::with_prefix("WAVEFORGE").separator("__"));

        let built = builder
            .build()
            .map_err(|e| WaveforgeError::config_error("runtime", "config", e.to_string()))?;

        built
            .try_deserialize()
            .map_err(|e| WaveforgeError::config_error("runtime", "config", e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_load_without_a_file() {
        let config = RuntimeConfig::load(None).unwrap();
        assert_eq!(config.scheduler.data_root, "DAQ");
        assert_eq!(config.storage.hash_prefix_len, DEFAULT_HASH_PREFIX_LEN);
    }
}
