// /////////////////////////////////////////////////////////////////////////////
// Waveforge
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! Finalized option values used for one plugin execution.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Where a resolved option's value came from, in descending precedence.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfigOrigin {
    ExplicitPerPlugin,
    ExplicitGlobal,
    AdapterInferred,
    Default,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolvedOption {
    pub value: Value,
    pub origin: ConfigOrigin,
    pub track_in_lineage: bool,
}

/// All finalized option values for one plugin execution.
///
/// Two resolutions with identical lineage-participating values produce
/// identical lineage hashes regardless of origin ordering — origin is
/// metadata for diagnostics (`preview_execution`), not an input to hashing.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ResolvedConfig {
    pub options: BTreeMap<String, ResolvedOption>,
    /// Version string of the precedence table used, recorded so an
    /// alternate future precedence scheme is distinguishable in stored
    /// lineage without breaking hashes produced under this one.
    pub precedence_version: String,
}

impl ResolvedConfig {
    pub fn tracked_subset(&self) -> BTreeMap<String, Value> {
        self.options
            .iter()
            .filter(|(_, opt)| opt.track_in_lineage)
            .map(|(name, opt)| (name.clone(), opt.value.clone()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tracked_subset_excludes_untracked_options() {
        let mut cfg = ResolvedConfig::default();
        cfg.options.insert(
            "tracked".into(),
            ResolvedOption {
                value: serde_json::json!(1),
                origin: ConfigOrigin::Default,
                track_in_lineage: true,
            },
        );
        cfg.options.insert(
            "untracked".into(),
            ResolvedOption {
                value: serde_json::json!(2),
                origin: ConfigOrigin::Default,
                track_in_lineage: false,
            },
        );

        let subset = cfg.tracked_subset();
        assert_eq!(subset.len(), 1);
        assert!(subset.contains_key("tracked"));
    }

    #[test]
    fn tracked_subset_ignores_origin() {
        let mut explicit = ResolvedConfig::default();
        explicit.options.insert(
            "x".into(),
            ResolvedOption {
                value: serde_json::json!(1),
                origin: ConfigOrigin::ExplicitPerPlugin,
                track_in_lineage: true,
            },
        );
        let mut default = ResolvedConfig::default();
        default.options.insert(
            "x".into(),
            ResolvedOption {
                value: serde_json::json!(1),
                origin: ConfigOrigin::Default,
                track_in_lineage: true,
            },
        );

        assert_eq!(explicit.tracked_subset(), default.tracked_subset());
    }
}
