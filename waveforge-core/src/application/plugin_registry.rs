// /////////////////////////////////////////////////////////////////////////////
// Waveforge
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! Plugin registry: the stateful half of §4.4. Holds registered plugins,
//! validates on registration, and guards against re-entrant execution.
//! The pure DAG algorithms themselves live in
//! `waveforge_domain::dag` — this registry only implements
//! `waveforge_domain::dag::DependencyGraph` over its registered descriptors.

use std::collections::{BTreeSet, HashMap};
use std::sync::{Arc, Mutex};

use tokio::sync::Notify;
use waveforge_domain::dag::{self, DependencyGraph};
use waveforge_domain::error::WaveforgeError;
use waveforge_domain::model::PluginDescriptor;
use waveforge_domain::services::Plugin;
use waveforge_domain::value_objects::RunId;

struct RegisteredPlugin {
    descriptor: PluginDescriptor,
    plugin: Arc<dyn Plugin>,
}

struct InFlight {
    /// Thread id of the in-flight computation, to detect same-thread
    /// re-entrancy distinctly from cross-thread waiting.
    thread_id: std::thread::ThreadId,
    notify: Arc<Notify>,
}

/// Registers plugins by their declared `provides` name and arbitrates
/// concurrent access to `(run_id, name)` computations.
pub struct PluginRegistry {
    plugins: Mutex<HashMap<String, RegisteredPlugin>>,
    in_flight: Mutex<HashMap<(String, String), InFlight>>,
}

impl Default for PluginRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl PluginRegistry {
    pub fn new() -> Self {
        Self {
            plugins: Mutex::new(HashMap::new()),
            in_flight: Mutex::new(HashMap::new()),
        }
    }

    /// Registers `plugin` under `descriptor.provides`. Rejects a duplicate
    /// name unless `allow_override` is set. Dependency names are not
    /// validated here — §4.4 defers that check to execution time so
    /// registration order never matters.
    pub fn register(
        &self,
        descriptor: PluginDescriptor,
        plugin: Arc<dyn Plugin>,
        allow_override: bool,
    ) -> Result<(), WaveforgeError> {
        let mut plugins = self.plugins.lock().unwrap();
        if !allow_override && plugins.contains_key(&descriptor.provides) {
            return Err(WaveforgeError::dependency_error(format!(
                "plugin '{}' is already registered",
                descriptor.provides
            )));
        }
        plugins.insert(descriptor.provides.clone(), RegisteredPlugin { descriptor, plugin });
        Ok(())
    }

    pub fn descriptor(&self, name: &str) -> Option<PluginDescriptor> {
        self.plugins.lock().unwrap().get(name).map(|r| r.descriptor.clone())
    }

    pub fn plugin(&self, name: &str) -> Option<Arc<dyn Plugin>> {
        self.plugins.lock().unwrap().get(name).map(|r| r.plugin.clone())
    }

    pub fn resolve(&self, name: &str) -> Result<Vec<String>, WaveforgeError> {
        dag::resolve(self, name)
    }

    pub fn execution_layers(&self, name: &str) -> Result<Vec<BTreeSet<String>>, WaveforgeError> {
        dag::execution_layers(self, name)
    }

    /// Enters the re-entrancy guard for `(run_id, name)`. `Ok(true)` means
    /// the caller is the producer and must call [`leave`](Self::leave) when
    /// done; `Ok(false)` means another thread finished it while we waited
    /// and the caller should proceed straight to reading the result.
    pub async fn enter(&self, run_id: &RunId, name: &str) -> Result<bool, WaveforgeError> {
        let key = (run_id.as_str().to_string(), name.to_string());
        let current_thread = std::thread::current().id();

        loop {
            let notify = {
                let mut in_flight = self.in_flight.lock().unwrap();
                match in_flight.get(&key) {
                    None => {
                        in_flight.insert(
                            key,
                            InFlight {
                                thread_id: current_thread,
                                notify: Arc::new(Notify::new()),
                            },
                        );
                        return Ok(true);
                    }
                    Some(entry) if entry.thread_id == current_thread => {
                        return Err(WaveforgeError::reentrant_execution(run_id.as_str(), name));
                    }
                    Some(entry) => entry.notify.clone(),
                }
            };
            notify.notified().await;
            // Loop again: the producer may have finished, or another
            // waiter may have raced us to re-enter first.
        }
    }

    /// Releases the re-entrancy guard and wakes any waiters.
    pub fn leave(&self, run_id: &RunId, name: &str) {
        let key = (run_id.as_str().to_string(), name.to_string());
        if let Some(entry) = self.in_flight.lock().unwrap().remove(&key) {
            entry.notify.notify_waiters();
        }
    }
}

impl DependencyGraph for PluginRegistry {
    fn dependencies_of(&self, name: &str) -> Option<Vec<String>> {
        self.plugins
            .lock()
            .unwrap()
            .get(name)
            .map(|r| r.descriptor.dependency_names().map(str::to_string).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;
    use waveforge_domain::model::{OutputKind, OutputSchema};
    use waveforge_domain::services::{ExecutionContext, StaticOutput};

    struct NoopPlugin;

    #[async_trait::async_trait]
    impl Plugin for NoopPlugin {
        async fn compute_static(&self, _ctx: ExecutionContext) -> Result<StaticOutput, WaveforgeError> {
            Ok(StaticOutput { bytes: vec![] })
        }
    }

    fn descriptor(name: &str, deps: Vec<&str>) -> PluginDescriptor {
        PluginDescriptor {
            provides: name.to_string(),
            depends_on: deps
                .into_iter()
                .map(waveforge_domain::model::Dependency::unconstrained)
                .collect(),
            options: BTreeMap::new(),
            version: semver::Version::new(1, 0, 0),
            output_kind: OutputKind::Static,
            output_schema: OutputSchema::Opaque {
                descriptor: "x".into(),
            },
            is_side_effect: false,
        }
    }

    #[test]
    fn duplicate_registration_is_rejected_without_override() {
        let registry = PluginRegistry::new();
        registry.register(descriptor("a", vec![]), Arc::new(NoopPlugin), false).unwrap();
        let err = registry
            .register(descriptor("a", vec![]), Arc::new(NoopPlugin), false)
            .unwrap_err();
        assert!(matches!(err, WaveforgeError::DependencyError(_)));
    }

    #[test]
    fn override_allows_duplicate_registration() {
        let registry = PluginRegistry::new();
        registry.register(descriptor("a", vec![]), Arc::new(NoopPlugin), false).unwrap();
        registry.register(descriptor("a", vec![]), Arc::new(NoopPlugin), true).unwrap();
    }

    #[test]
    fn resolve_delegates_to_domain_dag() {
        let registry = PluginRegistry::new();
        registry.register(descriptor("raw", vec![]), Arc::new(NoopPlugin), false).unwrap();
        registry
            .register(descriptor("a", vec!["raw"]), Arc::new(NoopPlugin), false)
            .unwrap();
        assert_eq!(registry.resolve("a").unwrap(), vec!["raw", "a"]);
    }

    #[tokio::test]
    async fn second_entry_on_same_thread_is_reentrant_execution() {
        let registry = PluginRegistry::new();
        let run_id = RunId::new("r").unwrap();
        assert!(registry.enter(&run_id, "a").await.unwrap());
        let err = registry.enter(&run_id, "a").await.unwrap_err();
        assert!(matches!(err, WaveforgeError::ReentrantExecution { .. }));
        registry.leave(&run_id, "a");
    }
}
