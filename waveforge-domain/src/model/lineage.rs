// /////////////////////////////////////////////////////////////////////////////
// Waveforge
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! Recursive provenance record and its canonical SHA-1 hash.
//!
//! For fixed inputs, fixed plugin version, fixed tracked config, and fixed
//! schema, `hash_lineage` is byte-stable across processes and hosts: it
//! canonicalizes the record (sorted keys, normalized numeric types) before
//! hashing so two semantically equal configs always hash identically.

use semver::Version;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sha1::{Digest, Sha1};
use std::collections::BTreeMap;

use crate::value_objects::LineageHash;

/// Recursive provenance of an artifact: plugin, version, tracked config,
/// schema, and its dependencies' lineage.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Lineage {
    pub plugin_name: String,
    pub plugin_version: Version,
    pub output_schema_descriptor: Value,
    /// Only options with `track_in_lineage == true`, already validated and
    /// unit-converted, serialized with normalized numeric types.
    pub resolved_config_tracked_subset: BTreeMap<String, Value>,
    pub depends_on: BTreeMap<String, Lineage>,
}

impl Lineage {
    /// Canonical JSON form: `BTreeMap` already sorts keys; this additionally
    /// walks nested lineages so the whole tree serializes deterministically.
    fn canonical_value(&self) -> Value {
        serde_json::json!({
            "plugin_name": self.plugin_name,
            "plugin_version": self.plugin_version.to_string(),
            "output_schema_descriptor": self.output_schema_descriptor,
            "resolved_config_tracked_subset": self.resolved_config_tracked_subset,
            "depends_on": self.depends_on
                .iter()
                .map(|(k, v)| (k.clone(), v.canonical_value()))
                .collect::<BTreeMap<_, _>>(),
        })
    }

    /// Names of every plugin transitively referenced by this lineage,
    /// including itself — used to invalidate memoized lineages/hashes when a
    /// plugin is re-registered or its configuration changes.
    pub fn transitive_plugin_names(&self) -> std::collections::BTreeSet<String> {
        let mut names = std::collections::BTreeSet::new();
        names.insert(self.plugin_name.clone());
        for child in self.depends_on.values() {
            names.extend(child.transitive_plugin_names());
        }
        names
    }
}

/// Hash a lineage record with SHA-1 over its canonical JSON serialization.
pub fn hash_lineage(lineage: &Lineage) -> LineageHash {
    let canonical = lineage.canonical_value();
    // serde_json's Map is a BTreeMap by default, so `to_string` on an
    // already-sorted Value yields a stable byte sequence.
    let bytes = serde_json::to_vec(&canonical).expect("canonical lineage value is always serializable");
    let mut hasher = Sha1::new();
    hasher.update(&bytes);
    let digest = hasher.finalize();
    LineageHash::from_hex(hex::encode(digest))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaf(name: &str, version: &str) -> Lineage {
        Lineage {
            plugin_name: name.into(),
            plugin_version: Version::parse(version).unwrap(),
            output_schema_descriptor: serde_json::json!({"kind": "opaque", "descriptor": "x"}),
            resolved_config_tracked_subset: BTreeMap::new(),
            depends_on: BTreeMap::new(),
        }
    }

    #[test]
    fn identical_lineages_hash_identically() {
        let a = leaf("p", "1.0.0");
        let b = leaf("p", "1.0.0");
        assert_eq!(hash_lineage(&a), hash_lineage(&b));
    }

    #[test]
    fn version_bump_changes_hash() {
        let a = leaf("p", "1.0.0");
        let b = leaf("p", "1.1.0");
        assert_ne!(hash_lineage(&a), hash_lineage(&b));
    }

    #[test]
    fn config_key_order_does_not_affect_hash() {
        let mut a = leaf("p", "1.0.0");
        a.resolved_config_tracked_subset.insert("b".into(), serde_json::json!(2));
        a.resolved_config_tracked_subset.insert("a".into(), serde_json::json!(1));

        let mut b = leaf("p", "1.0.0");
        b.resolved_config_tracked_subset.insert("a".into(), serde_json::json!(1));
        b.resolved_config_tracked_subset.insert("b".into(), serde_json::json!(2));

        assert_eq!(hash_lineage(&a), hash_lineage(&b));
    }

    #[test]
    fn dependency_lineage_participates_in_hash() {
        let mut with_dep = leaf("p", "1.0.0");
        with_dep.depends_on.insert("raw".into(), leaf("raw", "1.0.0"));

        let without_dep = leaf("p", "1.0.0");

        assert_ne!(hash_lineage(&with_dep), hash_lineage(&without_dep));
    }

    #[test]
    fn transitive_plugin_names_includes_self_and_deps() {
        let mut root = leaf("p", "1.0.0");
        root.depends_on.insert("raw".into(), leaf("raw", "1.0.0"));
        let names = root.transitive_plugin_names();
        assert!(names.contains("p"));
        assert!(names.contains("raw"));
    }

    #[test]
    fn hash_is_40_hex_characters() {
        let hash = hash_lineage(&leaf("p", "1.0.0"));
        assert_eq!(hash.as_hex().len(), 40);
        assert!(hash.as_hex().chars().all(|c| c.is_ascii_hexdigit()));
    }
}
