// /////////////////////////////////////////////////////////////////////////////
// Waveforge
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Unix Exit Codes
//!
//! BSD `sysexits.h`-style exit codes, so scripts invoking `waveforge` can
//! branch on failure category instead of parsing stderr.

use std::fmt;
use waveforge_domain::error::WaveforgeError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// Successful termination (0)
    Success = 0,
    /// Catchall for errors not covered elsewhere (1)
    Error = 1,
    /// Command line usage error (64)
    UsageError = 64,
    /// Invalid input data (65)
    DataError = 65,
    /// Cannot open input, e.g. a missing run or cache key (66)
    NoInput = 66,
    /// A required service or resource is unavailable (69)
    Unavailable = 69,
    /// Internal software error (70)
    Software = 70,
    /// I/O error (74)
    IoError = 74,
    /// Invalid configuration (78)
    Config = 78,
    /// Terminated by Ctrl-C (130)
    Interrupted = 130,
    /// Terminated by SIGTERM (143)
    Terminated = 143,
}

impl ExitCode {
    pub fn as_i32(self) -> i32 {
        self as i32
    }

    /// Maps a [`WaveforgeError`] category to the closest `sysexits.h` code.
    pub fn from_waveforge_error(error: &WaveforgeError) -> Self {
        match error {
            WaveforgeError::ConfigError { .. } => ExitCode::Config,
            WaveforgeError::DependencyError(_) | WaveforgeError::CycleDetected { .. } => ExitCode::DataError,
            WaveforgeError::ReentrantExecution { .. } | WaveforgeError::StorageBusy { .. } => ExitCode::Unavailable,
            WaveforgeError::CacheCorrupt { .. } | WaveforgeError::SchemaMismatch { .. } => ExitCode::DataError,
            WaveforgeError::PluginTimeout { .. } => ExitCode::Unavailable,
            WaveforgeError::Cancelled(_) => ExitCode::Interrupted,
            WaveforgeError::IoError(_) | WaveforgeError::ReadError(_) => ExitCode::IoError,
            WaveforgeError::InternalError(_) => ExitCode::Software,
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            ExitCode::Success => "success",
            ExitCode::Error => "error",
            ExitCode::UsageError => "usage error",
            ExitCode::DataError => "data error",
            ExitCode::NoInput => "cannot open input",
            ExitCode::Unavailable => "service unavailable",
            ExitCode::Software => "internal software error",
            ExitCode::IoError => "I/O error",
            ExitCode::Config => "configuration error",
            ExitCode::Interrupted => "interrupted",
            ExitCode::Terminated => "terminated",
        }
    }

    pub fn is_success(self) -> bool {
        matches!(self, ExitCode::Success)
    }
}

impl fmt::Display for ExitCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.description(), self.as_i32())
    }
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> Self {
        code.as_i32()
    }
}

impl From<ExitCode> for std::process::ExitCode {
    fn from(code: ExitCode) -> Self {
        std::process::ExitCode::from(code.as_i32() as u8)
    }
}

/// Maps a [`WaveforgeError`] straight to its exit code.
pub fn map_error_to_exit_code(error: &WaveforgeError) -> ExitCode {
    ExitCode::from_waveforge_error(error)
}

/// Maps a command's `Result` to a process-level [`std::process::ExitCode`],
/// printing the error on failure.
pub fn result_to_exit_code(result: Result<(), WaveforgeError>) -> std::process::ExitCode {
    match result {
        Ok(()) => ExitCode::Success.into(),
        Err(e) => {
            eprintln!("error: {e}");
            map_error_to_exit_code(&e).into()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_is_zero() {
        assert_eq!(ExitCode::Success.as_i32(), 0);
        assert!(ExitCode::Success.is_success());
    }

    #[test]
    fn config_error_maps_to_config_exit_code() {
        let err = WaveforgeError::config_error("plug", "opt", "reason");
        assert_eq!(map_error_to_exit_code(&err), ExitCode::Config);
    }

    #[test]
    fn cancelled_maps_to_interrupted() {
        let err = WaveforgeError::cancelled("user requested shutdown");
        assert_eq!(map_error_to_exit_code(&err), ExitCode::Interrupted);
    }

    #[test]
    fn io_error_maps_to_io_exit_code() {
        let err = WaveforgeError::IoError("disk full".to_string());
        assert_eq!(map_error_to_exit_code(&err), ExitCode::IoError);
    }

    #[test]
    fn display_includes_numeric_code() {
        assert_eq!(ExitCode::UsageError.to_string(), "usage error (64)");
    }
}
