// /////////////////////////////////////////////////////////////////////////////
// Waveforge
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! Opaque run identifier.
//!
//! Unlike `PipelineId` elsewhere in this lineage, a run id is not generated
//! by this system — it names a pre-existing dataset on disk (a DAQ run
//! directory) and is supplied by the caller. It is therefore a validated
//! newtype over `String`, not a ULID.

use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};

use crate::error::WaveforgeError;

/// Identifies a run: a set of inputs and their derived artifacts.
///
/// Valid run ids are non-empty and filesystem-safe (used verbatim as a
/// directory name under `storage_dir`): no path separators, no leading `.`,
/// no NUL bytes.
#[derive(Debug, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
pub struct RunId(String);

impl RunId {
    pub fn new(id: impl Into<String>) -> Result<Self, WaveforgeError> {
        let id = id.into();
        if id.is_empty() {
            return Err(WaveforgeError::internal_error("run_id must not be empty"));
        }
        if id.starts_with('.') || id.contains(['/', '\\', '\0']) {
            return Err(WaveforgeError::internal_error(format!(
                "run_id '{id}' is not filesystem-safe"
            )));
        }
        Ok(Self(id))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for RunId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for RunId {
    type Err = WaveforgeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl AsRef<str> for RunId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_plain_identifiers() {
        assert!(RunId::new("run_2024_01").is_ok());
    }

    #[test]
    fn rejects_empty() {
        assert!(RunId::new("").is_err());
    }

    #[test]
    fn rejects_path_separators() {
        assert!(RunId::new("../escape").is_err());
        assert!(RunId::new("a/b").is_err());
    }

    #[test]
    fn display_roundtrips_through_parse() {
        let id = RunId::new("r1").unwrap();
        let parsed: RunId = id.to_string().parse().unwrap();
        assert_eq!(id, parsed);
    }
}
