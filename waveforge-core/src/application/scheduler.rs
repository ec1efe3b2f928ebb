// /////////////////////////////////////////////////////////////////////////////
// Waveforge
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! Context Scheduler, per §4.5: the canonical entry point a caller uses to
//! obtain a plugin's output for a run, with caching, lineage-based
//! invalidation, and dependency resolution folded into one call.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex};

use waveforge_domain::error::WaveforgeError;
use waveforge_domain::model::{hash_lineage, ArtifactMetadata, Lineage, OutputKind, STORAGE_VERSION};
use waveforge_domain::services::{ArtifactView, ExecutionContext, StorageBackend};
use waveforge_domain::value_objects::{CacheKey, RunId};

use super::config_resolver::{ConfigResolver, InferredConfig, RawConfig};
use super::plugin_registry::PluginRegistry;

/// One step of a dry-run plan, as returned by [`Context::preview_execution`].
#[derive(Debug, Clone)]
pub struct PlanStep {
    pub name: String,
    pub cache_key: String,
    pub would_recompute: bool,
}

#[derive(Debug, Clone, Default)]
pub struct PlanReport {
    pub steps: Vec<PlanStep>,
}

/// Critical-path and parallelism analysis, as returned by
/// [`Context::analyze_dependencies`].
#[derive(Debug, Clone)]
pub struct AnalysisReport {
    pub critical_path: Vec<String>,
    pub parallel_groups: Vec<BTreeSet<String>>,
    pub theoretical_speedup: f64,
}

/// Per-run scheduling state: the in-memory results cache and the
/// memoized lineage of every plugin computed so far in this run.
struct RunState {
    results: HashMap<String, ArtifactView>,
    lineages: HashMap<String, Lineage>,
}

impl RunState {
    fn new() -> Self {
        Self {
            results: HashMap::new(),
            lineages: HashMap::new(),
        }
    }
}

/// Orchestrates plugin execution for one or more runs against a shared
/// registry and storage backend. Holds no plugin-specific knowledge — every
/// decision is driven by the registered [`PluginDescriptor`]s.
pub struct Context {
    registry: Arc<PluginRegistry>,
    storage: Arc<dyn StorageBackend>,
    hash_prefix_len: usize,
    raw_config: RawConfig,
    cancelled: Arc<dyn Fn() -> bool + Send + Sync>,
    runs: Mutex<HashMap<String, Arc<Mutex<RunState>>>>,
}

impl Context {
    pub fn new(
        registry: Arc<PluginRegistry>,
        storage: Arc<dyn StorageBackend>,
        hash_prefix_len: usize,
        raw_config: RawConfig,
        cancelled: Arc<dyn Fn() -> bool + Send + Sync>,
    ) -> Self {
        Self {
            registry,
            storage,
            hash_prefix_len,
            raw_config,
            cancelled,
            runs: Mutex::new(HashMap::new()),
        }
    }

    fn run_state(&self, run_id: &RunId) -> Arc<Mutex<RunState>> {
        self.runs
            .lock()
            .unwrap()
            .entry(run_id.as_str().to_string())
            .or_insert_with(|| Arc::new(Mutex::new(RunState::new())))
            .clone()
    }

    /// Implements §4.5's eight-step algorithm. `Box::pin` is required
    /// because each dependency resolution recurses back into `get_data`.
    pub fn get_data<'a>(
        &'a self,
        run_id: &'a RunId,
        name: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<ArtifactView, WaveforgeError>> + Send + 'a>> {
        Box::pin(async move {
            if self.cancelled.as_ref()() {
                return Err(WaveforgeError::cancelled(format!("cancelled before computing '{name}'")));
            }

            let state = self.run_state(run_id);
            if let Some(view) = state.lock().unwrap().results.get(name).cloned() {
                return Ok(view);
            }

            let is_producer = self.registry.enter(run_id, name).await?;
            if !is_producer {
                // Another thread finished producing it while we waited.
                if let Some(view) = state.lock().unwrap().results.get(name).cloned() {
                    return Ok(view);
                }
            }

            let result = self.compute_and_cache(run_id, name, &state).await;

            if is_producer {
                self.registry.leave(run_id, name);
            }
            result
        })
    }

    async fn compute_and_cache(
        &self,
        run_id: &RunId,
        name: &str,
        state: &Arc<Mutex<RunState>>,
    ) -> Result<ArtifactView, WaveforgeError> {
        if let Some(view) = state.lock().unwrap().results.get(name).cloned() {
            return Ok(view);
        }

        let descriptor = self
            .registry
            .descriptor(name)
            .ok_or_else(|| WaveforgeError::dependency_error(format!("unknown plugin '{name}'")))?;
        let plugin = self.registry.plugin(name).expect("descriptor implies registration");

        let mut inputs = BTreeMap::new();
        let mut dependency_lineages = BTreeMap::new();
        for dep_name in descriptor.dependency_names() {
            let dep_view = self.get_data(run_id, dep_name).await?;
            dependency_lineages.insert(dep_name.to_string(), dep_view.metadata.lineage.clone());
            inputs.insert(dep_name.to_string(), dep_view);
        }

        let resolved_config =
            ConfigResolver::resolve(&descriptor, &self.raw_config, &InferredConfig::new(), &descriptor.version)?;

        let lineage = Lineage {
            plugin_name: descriptor.provides.clone(),
            plugin_version: descriptor.version.clone(),
            output_schema_descriptor: descriptor.output_schema.canonical_descriptor(),
            resolved_config_tracked_subset: resolved_config.tracked_subset(),
            depends_on: dependency_lineages,
        };
        let lineage_hash = hash_lineage(&lineage);
        let cache_key = CacheKey::new(name, &lineage_hash, self.hash_prefix_len);

        if self.storage.exists(cache_key.as_str()).await {
            match self.load_if_valid(&cache_key, &lineage_hash).await {
                Ok(view) => {
                    state.lock().unwrap().results.insert(name.to_string(), view.clone());
                    state.lock().unwrap().lineages.insert(name.to_string(), lineage);
                    return Ok(view);
                }
                Err(e) if e.is_recoverable() => {
                    tracing::warn!(plugin = name, error = %e, "cache entry invalid, recomputing");
                }
                Err(e) => return Err(e),
            }
        }

        if descriptor.output_kind != OutputKind::Static {
            return Err(WaveforgeError::internal_error(format!(
                "'{name}' is a stream plugin; use the streaming engine, not get_data"
            )));
        }

        let ctx = ExecutionContext {
            run_id: run_id.clone(),
            inputs,
            config: resolved_config,
            cancelled: self.cancelled.clone(),
        };

        let output = match plugin.compute_static(ctx).await {
            Ok(output) => output,
            Err(e) => return Err(e),
        };

        let metadata = ArtifactMetadata {
            storage_version: STORAGE_VERSION,
            dtype_descr: descriptor.output_schema.canonical_descriptor(),
            count: 1,
            lineage: lineage.clone(),
            plugin_version: descriptor.version.clone(),
            watch_signature: None,
            checksum: None,
            compression: None,
            time_unit: None,
        };

        self.storage.save(cache_key.as_str(), &output.bytes, metadata).await?;
        let view = self.storage.load(cache_key.as_str()).await?;

        state.lock().unwrap().results.insert(name.to_string(), view.clone());
        state.lock().unwrap().lineages.insert(name.to_string(), lineage);
        Ok(view)
    }

    /// Loads a cached artifact, rejecting it (as a recoverable `CacheCorrupt`)
    /// if its recorded lineage hash does not match what this call expects.
    async fn load_if_valid(&self, key: &CacheKey, expected_hash: &waveforge_domain::value_objects::LineageHash) -> Result<ArtifactView, WaveforgeError> {
        let view = self.storage.load(key.as_str()).await?;
        let on_disk_hash = hash_lineage(&view.metadata.lineage);
        if &on_disk_hash != expected_hash {
            return Err(WaveforgeError::cache_corrupt(
                "-",
                key.as_str(),
                "stored lineage hash does not match the key it was found under",
            ));
        }
        Ok(view)
    }

    /// Dry-runs the plan for `name` without computing anything: which
    /// transitive dependencies exist in cache already, and which would
    /// recompute.
    pub async fn preview_execution(&self, run_id: &RunId, name: &str) -> Result<PlanReport, WaveforgeError> {
        let order = self.registry.resolve(name)?;
        let mut steps = Vec::with_capacity(order.len());
        for plugin_name in order {
            let descriptor = self
                .registry
                .descriptor(&plugin_name)
                .ok_or_else(|| WaveforgeError::dependency_error(format!("unknown plugin '{plugin_name}'")))?;
            // A conservative preview: lineage cannot be computed without
            // already materializing dependencies, so a plugin is reported
            // as "would recompute" unless *some* cache entry for its name
            // exists at all under this run.
            let prefix = format!("{plugin_name}-");
            let keys = self.storage.list_keys(run_id).await.unwrap_or_default();
            let any_cached = keys.iter().any(|k| k.starts_with(&prefix));
            steps.push(PlanStep {
                name: plugin_name.clone(),
                cache_key: prefix,
                would_recompute: !any_cached,
            });
            let _ = descriptor;
        }
        Ok(PlanReport { steps })
    }

    /// Critical-path and parallel-group analysis, independent of any run's
    /// cache state — purely a function of the registered dependency graph.
    pub fn analyze_dependencies(&self, name: &str) -> Result<AnalysisReport, WaveforgeError> {
        let layers = self.registry.execution_layers(name)?;
        let critical_path = self.registry.resolve(name)?;
        let serial_steps: usize = layers.iter().map(|l| l.len()).sum();
        let parallel_steps = layers.len().max(1);
        let theoretical_speedup = serial_steps as f64 / parallel_steps as f64;
        Ok(AnalysisReport {
            critical_path,
            parallel_groups: layers,
            theoretical_speedup,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::collections::BTreeMap as Map;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use waveforge_domain::model::{Dependency, OutputSchema, PluginDescriptor};
    use waveforge_domain::services::{Plugin, StaticOutput};

    struct CountingPlugin {
        calls: Arc<AtomicUsize>,
        output: Vec<u8>,
    }

    #[async_trait]
    impl Plugin for CountingPlugin {
        async fn compute_static(&self, _ctx: ExecutionContext) -> Result<StaticOutput, WaveforgeError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(StaticOutput {
                bytes: self.output.clone(),
            })
        }
    }

    fn descriptor(name: &str, deps: Vec<&str>) -> PluginDescriptor {
        PluginDescriptor {
            provides: name.to_string(),
            depends_on: deps.into_iter().map(Dependency::unconstrained).collect(),
            options: Map::new(),
            version: semver::Version::new(1, 0, 0),
            output_kind: OutputKind::Static,
            output_schema: OutputSchema::Opaque { descriptor: "x".into() },
            is_side_effect: false,
        }
    }

    async fn setup() -> (Context, Arc<AtomicUsize>, Arc<AtomicUsize>, tempfile::TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let registry = Arc::new(PluginRegistry::new());
        let raw_calls = Arc::new(AtomicUsize::new(0));
        let derived_calls = Arc::new(AtomicUsize::new(0));

        registry
            .register(
                descriptor("raw", vec![]),
                Arc::new(CountingPlugin {
                    calls: raw_calls.clone(),
                    output: vec![1, 2, 3],
                }),
                false,
            )
            .unwrap();
        registry
            .register(
                descriptor("derived", vec!["raw"]),
                Arc::new(CountingPlugin {
                    calls: derived_calls.clone(),
                    output: vec![9, 9],
                }),
                false,
            )
            .unwrap();

        let storage = Arc::new(crate::infrastructure::storage::FileStorageBackend::new(dir.path()));
        let context = Context::new(registry, storage, 8, RawConfig::default(), Arc::new(|| false));
        (context, raw_calls, derived_calls, dir)
    }

    #[tokio::test]
    async fn get_data_resolves_dependencies_and_caches_results() {
        let (context, raw_calls, derived_calls, _dir) = setup().await;
        let run_id = RunId::new("r1").unwrap();

        let view = context.get_data(&run_id, "derived").await.unwrap();
        assert_eq!(view.as_bytes(), &[9, 9]);
        assert_eq!(raw_calls.load(Ordering::SeqCst), 1);
        assert_eq!(derived_calls.load(Ordering::SeqCst), 1);

        // Second call hits the in-memory cache; neither plugin recomputes.
        context.get_data(&run_id, "derived").await.unwrap();
        assert_eq!(raw_calls.load(Ordering::SeqCst), 1);
        assert_eq!(derived_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn cancelled_before_start_short_circuits() {
        let dir = tempfile::tempdir().unwrap();
        let registry = Arc::new(PluginRegistry::new());
        registry
            .register(
                descriptor("raw", vec![]),
                Arc::new(CountingPlugin {
                    calls: Arc::new(AtomicUsize::new(0)),
                    output: vec![],
                }),
                false,
            )
            .unwrap();
        let storage = Arc::new(crate::infrastructure::storage::FileStorageBackend::new(dir.path()));
        let context = Context::new(registry, storage, 8, RawConfig::default(), Arc::new(|| true));
        let run_id = RunId::new("r1").unwrap();
        let err = context.get_data(&run_id, "raw").await.unwrap_err();
        assert!(matches!(err, WaveforgeError::Cancelled(_)));
    }

    #[tokio::test]
    async fn analyze_dependencies_reports_layers_and_speedup() {
        let (context, ..) = setup().await;
        let report = context.analyze_dependencies("derived").unwrap();
        assert_eq!(report.critical_path, vec!["raw".to_string(), "derived".to_string()]);
        assert_eq!(report.parallel_groups.len(), 2);
        assert_eq!(report.theoretical_speedup, 1.0);
    }
}
