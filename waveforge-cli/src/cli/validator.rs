// /////////////////////////////////////////////////////////////////////////////
// Waveforge
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Secure Command-Line Argument Parsing
//!
//! Security-first validation applied to every parsed argument before it
//! reaches cache maintenance code: length limits, dangerous-pattern
//! detection, path canonicalization, and protected-directory checks.
//! Never applied to plugin execution or DAQ parsing — this crate exposes
//! cache maintenance only.

use std::path::{Path, PathBuf};
use thiserror::Error;

const MAX_ARG_COUNT: usize = 100;
const MAX_ARG_LENGTH: usize = 1000;
const MAX_PATH_LENGTH: usize = 4096;

const DANGEROUS_PATTERNS: &[&str] = &[
    "..", "~", "$", "`", ";", "&", "|", ">", "<", "\n", "\r", "\0",
];

const PROTECTED_DIRS: &[&str] = &[
    "/etc", "/bin", "/sbin", "/usr/bin", "/usr/sbin", "/boot", "/sys", "/proc", "/dev",
];

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("too many arguments (max {MAX_ARG_COUNT})")]
    TooManyArguments,

    #[error("argument too long (max {MAX_ARG_LENGTH} characters): {0}")]
    ArgumentTooLong(String),

    #[error("dangerous pattern detected in argument: {pattern} in {arg}")]
    DangerousPattern { pattern: String, arg: String },

    #[error("path exceeds maximum length (max {MAX_PATH_LENGTH})")]
    PathTooLong,

    #[error("access to protected system directory denied: {0}")]
    ProtectedDirectory(String),

    #[error("path does not exist: {0}")]
    PathNotFound(String),

    #[error("invalid path: {0}")]
    InvalidPath(String),

    #[error("invalid argument value for {arg}: {reason}")]
    InvalidValue { arg: String, reason: String },
}

pub struct SecureArgParser;

impl SecureArgParser {
    pub fn validate_argument(arg: &str) -> Result<(), ParseError> {
        if arg.len() > MAX_ARG_LENGTH {
            return Err(ParseError::ArgumentTooLong(arg.chars().take(50).collect::<String>() + "..."));
        }
        for pattern in DANGEROUS_PATTERNS {
            if arg.contains(pattern) {
                return Err(ParseError::DangerousPattern {
                    pattern: pattern.to_string(),
                    arg: arg.to_string(),
                });
            }
        }
        Ok(())
    }

    /// Validates and canonicalizes a path that must already exist, such as
    /// `--storage-dir` or a `--config` file.
    pub fn validate_path(path: &str) -> Result<PathBuf, ParseError> {
        Self::validate_argument(path).map_err(|e| match e {
            ParseError::ArgumentTooLong(_) => ParseError::InvalidPath(format!("path too long: {path}")),
            ParseError::DangerousPattern { pattern, .. } => {
                ParseError::InvalidPath(format!("path contains dangerous pattern '{pattern}': {path}"))
            }
            other => other,
        })?;

        let path_obj = Path::new(path);
        let canonical = path_obj.canonicalize().map_err(|e| {
            if !path_obj.exists() {
                ParseError::PathNotFound(path.to_string())
            } else {
                ParseError::InvalidPath(format!("{path}: {e}"))
            }
        })?;

        if canonical.to_string_lossy().len() > MAX_PATH_LENGTH {
            return Err(ParseError::PathTooLong);
        }

        for protected in PROTECTED_DIRS {
            if canonical.starts_with(protected) {
                return Err(ParseError::ProtectedDirectory(canonical.display().to_string()));
            }
        }

        Ok(canonical)
    }

    pub fn validate_optional_path(path: Option<&str>) -> Result<Option<PathBuf>, ParseError> {
        match path {
            Some(p) => Self::validate_path(p).map(Some),
            None => Ok(None),
        }
    }

    pub fn validate_argument_count(count: usize) -> Result<(), ParseError> {
        if count > MAX_ARG_COUNT {
            return Err(ParseError::TooManyArguments);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_safe_arguments() {
        assert!(SecureArgParser::validate_argument("safe-arg").is_ok());
        assert!(SecureArgParser::validate_argument("run_2024_01").is_ok());
    }

    #[test]
    fn rejects_too_long_arguments() {
        let long_arg = "a".repeat(MAX_ARG_LENGTH + 1);
        assert!(matches!(
            SecureArgParser::validate_argument(&long_arg),
            Err(ParseError::ArgumentTooLong(_))
        ));
    }

    #[test]
    fn detects_dangerous_patterns() {
        for dangerous in ["../etc/passwd", "~/.ssh/id_rsa", "$(whoami)", "`ls`", "a;rm -rf /"] {
            assert!(
                SecureArgParser::validate_argument(dangerous).is_err(),
                "expected rejection for {dangerous}"
            );
        }
    }

    #[test]
    fn validate_path_rejects_nonexistent_paths() {
        assert!(matches!(
            SecureArgParser::validate_path("/nonexistent/does-not-exist-xyz"),
            Err(ParseError::PathNotFound(_))
        ));
    }

    #[test]
    fn validate_path_accepts_existing_directory() {
        let dir = std::env::temp_dir();
        assert!(SecureArgParser::validate_path(&dir.to_string_lossy()).is_ok());
    }

    #[test]
    fn validate_path_rejects_protected_directories() {
        assert!(matches!(
            SecureArgParser::validate_path("/etc"),
            Err(ParseError::ProtectedDirectory(_))
        ));
    }

    #[test]
    fn validate_optional_path_passes_through_none() {
        assert!(matches!(SecureArgParser::validate_optional_path(None), Ok(None)));
    }
}
