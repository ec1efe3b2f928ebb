// /////////////////////////////////////////////////////////////////////////////
// Waveforge
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Domain Error System
//!
//! The tagged error sum type at the scheduler boundary. Every fallible public
//! entry point in this workspace returns `Result<T, WaveforgeError>`, or a
//! narrower error that converts into it via `#[from]`.
//!
//! ## Error Categories
//!
//! - **Configuration**: `ConfigError` — option validation, deprecated aliases.
//! - **Graph**: `DependencyError`, `CycleDetected` — plugin registry/DAG
//!   failures.
//! - **Concurrency**: `ReentrantExecution`, `StorageBusy`, `PluginTimeout`,
//!   `Cancelled`.
//! - **Storage**: `CacheCorrupt`, `SchemaMismatch`, `IoError`, `ReadError`.

use thiserror::Error;

/// Errors produced anywhere in the scheduling, storage, or streaming core.
///
/// `CacheCorrupt` and stale-lock conditions are recovered locally by the
/// caller (treated as a cache miss, triggering recompute); every other
/// variant propagates to the caller of `get_data` with the offending plugin
/// name and run id already attached by the constructor.
#[derive(Error, Debug, Clone)]
pub enum WaveforgeError {
    #[error("config error for plugin '{plugin}' option '{option}': {reason}")]
    ConfigError {
        plugin: String,
        option: String,
        reason: String,
    },

    #[error("dependency error: {0}")]
    DependencyError(String),

    #[error("cycle detected: {}", .cycle.join(" -> "))]
    CycleDetected { cycle: Vec<String> },

    #[error("reentrant execution of ({run_id}, {name}) on the same thread")]
    ReentrantExecution { run_id: String, name: String },

    #[error("cache corrupt for ({run_id}, {name}): {reason}")]
    CacheCorrupt {
        run_id: String,
        name: String,
        reason: String,
    },

    #[error("storage busy: lock on '{key}' not acquired within {timeout_ms}ms")]
    StorageBusy { key: String, timeout_ms: u64 },

    #[error("schema mismatch for plugin '{plugin}': {reason}")]
    SchemaMismatch { plugin: String, reason: String },

    #[error("plugin '{plugin}' timed out after {timeout_ms}ms")]
    PluginTimeout { plugin: String, timeout_ms: u64 },

    #[error("cancelled: {0}")]
    Cancelled(String),

    #[error("I/O error: {0}")]
    IoError(String),

    #[error("read error: {0}")]
    ReadError(String),

    #[error("internal error: {0}")]
    InternalError(String),
}

impl WaveforgeError {
    pub fn config_error(plugin: impl Into<String>, option: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::ConfigError {
            plugin: plugin.into(),
            option: option.into(),
            reason: reason.into(),
        }
    }

    pub fn dependency_error(msg: impl Into<String>) -> Self {
        Self::DependencyError(msg.into())
    }

    pub fn cycle_detected(cycle: Vec<String>) -> Self {
        Self::CycleDetected { cycle }
    }

    pub fn reentrant_execution(run_id: impl Into<String>, name: impl Into<String>) -> Self {
        Self::ReentrantExecution {
            run_id: run_id.into(),
            name: name.into(),
        }
    }

    pub fn cache_corrupt(run_id: impl Into<String>, name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::CacheCorrupt {
            run_id: run_id.into(),
            name: name.into(),
            reason: reason.into(),
        }
    }

    pub fn storage_busy(key: impl Into<String>, timeout_ms: u64) -> Self {
        Self::StorageBusy {
            key: key.into(),
            timeout_ms,
        }
    }

    pub fn schema_mismatch(plugin: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::SchemaMismatch {
            plugin: plugin.into(),
            reason: reason.into(),
        }
    }

    pub fn plugin_timeout(plugin: impl Into<String>, timeout_ms: u64) -> Self {
        Self::PluginTimeout {
            plugin: plugin.into(),
            timeout_ms,
        }
    }

    pub fn cancelled(msg: impl Into<String>) -> Self {
        Self::Cancelled(msg.into())
    }

    pub fn internal_error(msg: impl Into<String>) -> Self {
        Self::InternalError(msg.into())
    }

    /// Whether the scheduler should recover locally (treat as a cache miss
    /// and re-execute) rather than propagate to the caller.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, WaveforgeError::CacheCorrupt { .. } | WaveforgeError::StorageBusy { .. })
    }

    pub fn category(&self) -> &'static str {
        match self {
            WaveforgeError::ConfigError { .. } => "configuration",
            WaveforgeError::DependencyError(_) => "dependency",
            WaveforgeError::CycleDetected { .. } => "dag",
            WaveforgeError::ReentrantExecution { .. } => "concurrency",
            WaveforgeError::CacheCorrupt { .. } => "cache",
            WaveforgeError::StorageBusy { .. } => "storage",
            WaveforgeError::SchemaMismatch { .. } => "schema",
            WaveforgeError::PluginTimeout { .. } => "timeout",
            WaveforgeError::Cancelled(_) => "cancellation",
            WaveforgeError::IoError(_) => "io",
            WaveforgeError::ReadError(_) => "io",
            WaveforgeError::InternalError(_) => "internal",
        }
    }
}

impl From<std::io::Error> for WaveforgeError {
    fn from(err: std::io::Error) -> Self {
        WaveforgeError::IoError(err.to_string())
    }
}

impl From<serde_json::Error> for WaveforgeError {
    fn from(err: serde_json::Error) -> Self {
        WaveforgeError::ReadError(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cache_corrupt_is_recoverable() {
        let err = WaveforgeError::cache_corrupt("r1", "a", "size mismatch");
        assert!(err.is_recoverable());
        assert_eq!(err.category(), "cache");
    }

    #[test]
    fn cycle_detected_message_joins_path() {
        let err = WaveforgeError::cycle_detected(vec!["a".into(), "b".into(), "a".into()]);
        assert_eq!(err.to_string(), "cycle detected: a -> b -> a");
    }

    #[test]
    fn schema_mismatch_not_recoverable() {
        let err = WaveforgeError::schema_mismatch("plug", "missing field");
        assert!(!err.is_recoverable());
    }

    #[test]
    fn io_error_converts_from_std() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: WaveforgeError = io.into();
        assert_eq!(err.category(), "io");
    }
}
