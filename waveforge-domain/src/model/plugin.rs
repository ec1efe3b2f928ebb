// /////////////////////////////////////////////////////////////////////////////
// Waveforge
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! The plugin contract: static descriptor data declared by plugin authors.
//!
//! A plugin author declares all metadata as static fields and all schemas as
//! data — dispatch is by name lookup against the registry, never by runtime
//! introspection.

use semver::{Version, VersionReq};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

use crate::value_objects::TimeUnit;

/// One input dependency, optionally constrained to a version range of the
/// producing plugin.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Dependency {
    pub name: String,
    pub version_req: Option<VersionReq>,
}

impl Dependency {
    pub fn unconstrained(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version_req: None,
        }
    }

    pub fn with_version(name: impl Into<String>, version_req: VersionReq) -> Self {
        Self {
            name: name.into(),
            version_req: Some(version_req),
        }
    }

    pub fn is_satisfied_by(&self, version: &Version) -> bool {
        self.version_req.as_ref().is_none_or(|req| req.matches(version))
    }
}

/// Declared data type of a single plugin option.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OptionType {
    Bool,
    Integer,
    Float,
    String,
}

/// Declaration of one configuration option a plugin accepts.
///
/// `validator` is not stored here (functions are not data); the
/// `ConfigResolver` calls back into the plugin's `validate_option` hook, or
/// applies the `OptionType` + numeric bounds declared here when no custom
/// validator is registered.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptionSpec {
    pub option_type: OptionType,
    pub default: Value,
    pub unit: Option<String>,
    pub deprecated: bool,
    pub alias_of: Option<String>,
    pub removed_in: Option<Version>,
    pub track_in_lineage: bool,
    pub min: Option<f64>,
    pub max: Option<f64>,
}

impl OptionSpec {
    pub fn new(option_type: OptionType, default: Value) -> Self {
        Self {
            option_type,
            default,
            unit: None,
            deprecated: false,
            alias_of: None,
            removed_in: None,
            track_in_lineage: true,
            min: None,
            max: None,
        }
    }
}

/// Whether a plugin produces one materialized value per run, or a stream of
/// `Chunk`s consumed lazily.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputKind {
    Static,
    Stream,
}

/// One field of a structured-record output layout.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldDescriptor {
    pub name: String,
    pub type_name: String,
    pub shape: Option<Vec<usize>>,
}

/// The declared shape of a plugin's output, used both for runtime validation
/// of `compute`'s return value and as an input to lineage canonicalization.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum OutputSchema {
    /// Fixed-size structured-array record, suitable for memory mapping.
    Record {
        fields: Vec<FieldDescriptor>,
        time_unit: Option<TimeUnit>,
    },
    /// Column-oriented tabular output.
    Columnar { columns: Vec<FieldDescriptor> },
    /// Opaque/non-array output identified only by a textual descriptor.
    Opaque { descriptor: String },
}

impl OutputSchema {
    /// Canonical textual form used when building lineage — stable field
    /// ordering regardless of declaration order.
    pub fn canonical_descriptor(&self) -> Value {
        match self {
            OutputSchema::Record { fields, time_unit } => {
                let mut sorted = fields.clone();
                sorted.sort_by(|a, b| a.name.cmp(&b.name));
                serde_json::json!({
                    "kind": "record",
                    "fields": sorted.iter().map(|f| (f.name.clone(), f.type_name.clone(), f.shape.clone())).collect::<Vec<_>>(),
                    "time_unit": time_unit,
                })
            }
            OutputSchema::Columnar { columns } => {
                let mut sorted = columns.clone();
                sorted.sort_by(|a, b| a.name.cmp(&b.name));
                serde_json::json!({
                    "kind": "columnar",
                    "columns": sorted.iter().map(|f| (f.name.clone(), f.type_name.clone())).collect::<Vec<_>>(),
                })
            }
            OutputSchema::Opaque { descriptor } => serde_json::json!({
                "kind": "opaque",
                "descriptor": descriptor,
            }),
        }
    }
}

/// Static descriptor for one registered plugin.
///
/// The dynamic `compute` behavior lives behind the `Plugin` trait
/// (`crate::services::plugin::Plugin`); this struct is the data half of the
/// contract and is what the registry, DAG, and lineage hasher operate on.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PluginDescriptor {
    pub provides: String,
    pub depends_on: Vec<Dependency>,
    pub options: BTreeMap<String, OptionSpec>,
    pub version: Version,
    pub output_kind: OutputKind,
    pub output_schema: OutputSchema,
    pub is_side_effect: bool,
}

impl PluginDescriptor {
    pub fn dependency_names(&self) -> impl Iterator<Item = &str> {
        self.depends_on.iter().map(|d| d.name.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_descriptor() -> PluginDescriptor {
        PluginDescriptor {
            provides: "a".into(),
            depends_on: vec![Dependency::unconstrained("raw")],
            options: BTreeMap::new(),
            version: Version::new(1, 0, 0),
            output_kind: OutputKind::Static,
            output_schema: OutputSchema::Record {
                fields: vec![
                    FieldDescriptor {
                        name: "val".into(),
                        type_name: "i4".into(),
                        shape: None,
                    },
                    FieldDescriptor {
                        name: "time".into(),
                        type_name: "i8".into(),
                        shape: None,
                    },
                ],
                time_unit: Some(TimeUnit::Nanoseconds),
            },
            is_side_effect: false,
        }
    }

    #[test]
    fn dependency_without_version_req_matches_anything() {
        let dep = Dependency::unconstrained("a");
        assert!(dep.is_satisfied_by(&Version::new(99, 0, 0)));
    }

    #[test]
    fn dependency_with_version_req_enforces_it() {
        let dep = Dependency::with_version("a", VersionReq::parse(">=2.0.0").unwrap());
        assert!(!dep.is_satisfied_by(&Version::new(1, 0, 0)));
        assert!(dep.is_satisfied_by(&Version::new(2, 1, 0)));
    }

    #[test]
    fn canonical_descriptor_is_stable_regardless_of_field_order() {
        let descriptor = sample_descriptor();
        let canonical = descriptor.output_schema.canonical_descriptor();
        // fields sorted alphabetically: time before val
        assert_eq!(canonical["fields"][0].as_array().unwrap()[0], "time");
        assert_eq!(canonical["fields"][1].as_array().unwrap()[0], "val");
    }

    #[test]
    fn dependency_names_iterates_depends_on() {
        let descriptor = sample_descriptor();
        let names: Vec<_> = descriptor.dependency_names().collect();
        assert_eq!(names, vec!["raw"]);
    }
}
