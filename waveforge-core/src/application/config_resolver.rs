// /////////////////////////////////////////////////////////////////////////////
// Waveforge
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! Configuration Resolver, per §4.2: turns raw user-supplied config plus a
//! plugin's declared [`OptionSpec`]s into a [`ResolvedConfig`], applying
//! precedence, validation, and deprecation policy.

use semver::Version;
use serde_json::Value;
use std::collections::BTreeMap;

use waveforge_domain::error::WaveforgeError;
use waveforge_domain::model::{ConfigOrigin, OptionSpec, OptionType, PluginDescriptor, ResolvedConfig, ResolvedOption};

/// Decision recorded in every `ResolvedConfig`, per §9's Open Question on
/// precedence: per-plugin explicit config outranks global explicit config.
pub const PRECEDENCE_VERSION: &str = "per-plugin-over-global/v1";

/// Raw user input: global options plus per-plugin overrides, as loaded from
/// a config file or CLI flags before any validation.
#[derive(Debug, Clone, Default)]
pub struct RawConfig {
    pub global: BTreeMap<String, Value>,
    pub per_plugin: BTreeMap<String, BTreeMap<String, Value>>,
}

/// Values an adapter has inferred for this run (e.g. sampling rate read
/// from a DAQ format spec) — rank 3 in the precedence order.
pub type InferredConfig = BTreeMap<String, Value>;

pub struct ConfigResolver;

impl ConfigResolver {
    /// Resolves every option `descriptor` declares, applying precedence:
    /// explicit per-plugin > explicit global > adapter-inferred > default.
    pub fn resolve(
        descriptor: &PluginDescriptor,
        raw: &RawConfig,
        inferred: &InferredConfig,
        current_version: &Version,
    ) -> Result<ResolvedConfig, WaveforgeError> {
        let mut options = BTreeMap::new();
        let per_plugin = raw.per_plugin.get(&descriptor.provides);

        for (name, spec) in &descriptor.options {
            if let Some(removed_in) = &spec.removed_in {
                if current_version >= removed_in && Self::alias_used(raw, descriptor, name, spec) {
                    return Err(WaveforgeError::config_error(
                        &descriptor.provides,
                        name,
                        format!("option removed in version {removed_in}; deprecated alias is no longer accepted"),
                    ));
                }
            }

            let (value, origin) = if let Some(v) = per_plugin.and_then(|m| m.get(name)) {
                (v.clone(), ConfigOrigin::ExplicitPerPlugin)
            } else if let Some(v) = raw.global.get(name) {
                (v.clone(), ConfigOrigin::ExplicitGlobal)
            } else if let Some(v) = inferred.get(name) {
                (v.clone(), ConfigOrigin::AdapterInferred)
            } else {
                (spec.default.clone(), ConfigOrigin::Default)
            };

            Self::validate(&descriptor.provides, name, spec, &value)?;

            options.insert(
                name.clone(),
                ResolvedOption {
                    value,
                    origin,
                    track_in_lineage: spec.track_in_lineage,
                },
            );
        }

        Ok(ResolvedConfig {
            options,
            precedence_version: PRECEDENCE_VERSION.to_string(),
        })
    }

    fn alias_used(raw: &RawConfig, descriptor: &PluginDescriptor, name: &str, spec: &OptionSpec) -> bool {
        let Some(alias) = &spec.alias_of else { return false };
        raw.per_plugin
            .get(&descriptor.provides)
            .is_some_and(|m| m.contains_key(alias))
            || raw.global.contains_key(alias)
            || name == alias
    }

    fn validate(plugin: &str, option: &str, spec: &OptionSpec, value: &Value) -> Result<(), WaveforgeError> {
        let type_ok = match spec.option_type {
            OptionType::Bool => value.is_boolean(),
            OptionType::Integer => value.is_i64() || value.is_u64(),
            OptionType::Float => value.is_number(),
            OptionType::String => value.is_string(),
        };
        if !type_ok {
            return Err(WaveforgeError::config_error(
                plugin,
                option,
                format!("expected {:?}, got {value}", spec.option_type),
            ));
        }

        if let Some(n) = value.as_f64() {
            if let Some(min) = spec.min {
                if n < min {
                    return Err(WaveforgeError::config_error(plugin, option, format!("{n} is below minimum {min}")));
                }
            }
            if let Some(max) = spec.max {
                if n > max {
                    return Err(WaveforgeError::config_error(plugin, option, format!("{n} is above maximum {max}")));
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap as Map;
    use waveforge_domain::model::{Dependency, OutputKind, OutputSchema};

    fn descriptor_with_option(name: &str, spec: OptionSpec) -> PluginDescriptor {
        let mut options = Map::new();
        options.insert(name.to_string(), spec);
        PluginDescriptor {
            provides: "p".into(),
            depends_on: Vec::<Dependency>::new(),
            options,
            version: Version::new(1, 0, 0),
            output_kind: OutputKind::Static,
            output_schema: OutputSchema::Opaque { descriptor: "x".into() },
            is_side_effect: false,
        }
    }

    #[test]
    fn per_plugin_value_outranks_global_value() {
        let descriptor = descriptor_with_option("threshold", OptionSpec::new(OptionType::Integer, serde_json::json!(0)));
        let mut raw = RawConfig::default();
        raw.global.insert("threshold".into(), serde_json::json!(1));
        raw.per_plugin
            .entry("p".into())
            .or_default()
            .insert("threshold".into(), serde_json::json!(2));

        let resolved = ConfigResolver::resolve(&descriptor, &raw, &Map::new(), &Version::new(1, 0, 0)).unwrap();
        let option = &resolved.options["threshold"];
        assert_eq!(option.value, serde_json::json!(2));
        assert_eq!(option.origin, ConfigOrigin::ExplicitPerPlugin);
    }

    #[test]
    fn falls_back_to_default_when_nothing_else_is_set() {
        let descriptor = descriptor_with_option("threshold", OptionSpec::new(OptionType::Integer, serde_json::json!(7)));
        let resolved =
            ConfigResolver::resolve(&descriptor, &RawConfig::default(), &Map::new(), &Version::new(1, 0, 0)).unwrap();
        assert_eq!(resolved.options["threshold"].value, serde_json::json!(7));
        assert_eq!(resolved.options["threshold"].origin, ConfigOrigin::Default);
    }

    #[test]
    fn type_mismatch_is_a_config_error() {
        let descriptor = descriptor_with_option("threshold", OptionSpec::new(OptionType::Integer, serde_json::json!(0)));
        let mut raw = RawConfig::default();
        raw.global.insert("threshold".into(), serde_json::json!("not a number"));
        let err = ConfigResolver::resolve(&descriptor, &raw, &Map::new(), &Version::new(1, 0, 0)).unwrap_err();
        assert!(matches!(err, WaveforgeError::ConfigError { .. }));
    }

    #[test]
    fn out_of_range_value_is_a_config_error() {
        let mut spec = OptionSpec::new(OptionType::Integer, serde_json::json!(5));
        spec.max = Some(10.0);
        let descriptor = descriptor_with_option("threshold", spec);
        let mut raw = RawConfig::default();
        raw.global.insert("threshold".into(), serde_json::json!(99));
        let err = ConfigResolver::resolve(&descriptor, &raw, &Map::new(), &Version::new(1, 0, 0)).unwrap_err();
        assert!(matches!(err, WaveforgeError::ConfigError { .. }));
    }
}
