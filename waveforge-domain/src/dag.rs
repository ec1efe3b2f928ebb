// /////////////////////////////////////////////////////////////////////////////
// Waveforge
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! Pure DAG algorithms over a plugin dependency graph: topological sort with
//! cycle detection, and execution-layer grouping for parallel dispatch.
//!
//! These functions take a [`DependencyGraph`] rather than the stateful
//! plugin registry so they stay free of locking/re-entrancy concerns — the
//! registry (in `waveforge-core`) implements the trait and holds the runtime
//! state (registered plugins, re-entrancy guard).

use std::collections::{BTreeMap, BTreeSet, HashMap};

use crate::error::WaveforgeError;

/// Read-only view of plugin dependency edges, by provided name.
pub trait DependencyGraph {
    /// Names this plugin directly depends on, or `None` if `name` is not
    /// registered.
    fn dependencies_of(&self, name: &str) -> Option<Vec<String>>;
}

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
enum Mark {
    Temporary,
    Permanent,
}

/// Topologically sorts the transitive dependencies of `name`, dependencies
/// before dependents, ending with `name` itself.
///
/// Uses DFS with temporary/permanent marks (never relies on a recursion
/// depth bound — cycles are caught by re-visiting a temporarily marked
/// node, regardless of graph depth).
pub fn resolve(graph: &impl DependencyGraph, name: &str) -> Result<Vec<String>, WaveforgeError> {
    let mut marks: HashMap<String, Mark> = HashMap::new();
    let mut order = Vec::new();
    let mut path = Vec::new();
    visit(graph, name, &mut marks, &mut order, &mut path)?;
    Ok(order)
}

fn visit(
    graph: &impl DependencyGraph,
    name: &str,
    marks: &mut HashMap<String, Mark>,
    order: &mut Vec<String>,
    path: &mut Vec<String>,
) -> Result<(), WaveforgeError> {
    match marks.get(name) {
        Some(Mark::Permanent) => return Ok(()),
        Some(Mark::Temporary) => {
            let mut cycle = path.clone();
            cycle.push(name.to_string());
            let start = cycle.iter().position(|n| n == name).unwrap_or(0);
            return Err(WaveforgeError::cycle_detected(cycle[start..].to_vec()));
        }
        None => {}
    }

    marks.insert(name.to_string(), Mark::Temporary);
    path.push(name.to_string());

    let deps = graph
        .dependencies_of(name)
        .ok_or_else(|| WaveforgeError::dependency_error(format!("unknown plugin '{name}'")))?;

    for dep in &deps {
        visit(graph, dep, marks, order, path)?;
    }

    path.pop();
    marks.insert(name.to_string(), Mark::Permanent);
    order.push(name.to_string());
    Ok(())
}

/// Groups the transitive dependency closure of `name` into layers by depth:
/// layer 0 has no unresolved dependencies, layer N depends only on layers
/// `< N`. Plugins within a layer are independent and may execute in
/// parallel.
pub fn execution_layers(graph: &impl DependencyGraph, name: &str) -> Result<Vec<BTreeSet<String>>, WaveforgeError> {
    let order = resolve(graph, name)?;
    let mut depth: BTreeMap<String, usize> = BTreeMap::new();

    for plugin in &order {
        let deps = graph.dependencies_of(plugin).unwrap_or_default();
        let plugin_depth = deps.iter().filter_map(|d| depth.get(d)).max().map_or(0, |d| d + 1);
        depth.insert(plugin.clone(), plugin_depth);
    }

    let max_depth = depth.values().copied().max().unwrap_or(0);
    let mut layers = vec![BTreeSet::new(); max_depth + 1];
    for (plugin, d) in depth {
        layers[d].insert(plugin);
    }
    Ok(layers)
}

#[cfg(test)]
mod tests {
    use super::*;

    struct MapGraph(BTreeMap<&'static str, Vec<&'static str>>);

    impl DependencyGraph for MapGraph {
        fn dependencies_of(&self, name: &str) -> Option<Vec<String>> {
            self.0.get(name).map(|deps| deps.iter().map(|s| s.to_string()).collect())
        }
    }

    #[test]
    fn resolve_orders_dependencies_before_dependents() {
        let graph = MapGraph(BTreeMap::from([("raw", vec![]), ("a", vec!["raw"]), ("b", vec!["a"])]));
        let order = resolve(&graph, "b").unwrap();
        assert_eq!(order, vec!["raw", "a", "b"]);
    }

    #[test]
    fn resolve_detects_direct_cycle() {
        let graph = MapGraph(BTreeMap::from([("a", vec!["b"]), ("b", vec!["a"])]));
        let err = resolve(&graph, "a").unwrap_err();
        match err {
            WaveforgeError::CycleDetected { cycle } => {
                assert!(cycle.contains(&"a".to_string()));
                assert!(cycle.contains(&"b".to_string()));
            }
            other => panic!("expected CycleDetected, got {other:?}"),
        }
    }

    #[test]
    fn resolve_detects_self_cycle() {
        let graph = MapGraph(BTreeMap::from([("a", vec!["a"])]));
        assert!(resolve(&graph, "a").is_err());
    }

    #[test]
    fn resolve_fails_on_unknown_dependency() {
        let graph = MapGraph(BTreeMap::from([("a", vec!["missing"])]));
        let err = resolve(&graph, "a").unwrap_err();
        assert!(matches!(err, WaveforgeError::DependencyError(_)));
    }

    #[test]
    fn execution_layers_groups_independent_plugins() {
        // raw -> a, raw -> c, a -> b : layers = {raw}, {a, c}, {b}
        let graph = MapGraph(BTreeMap::from([
            ("raw", vec![]),
            ("a", vec!["raw"]),
            ("c", vec!["raw"]),
            ("b", vec!["a"]),
        ]));
        let layers = execution_layers(&graph, "b").unwrap();
        assert_eq!(layers[0], BTreeSet::from(["raw".to_string()]));
        assert_eq!(layers[1], BTreeSet::from(["a".to_string(), "c".to_string()]));
        assert_eq!(layers[2], BTreeSet::from(["b".to_string()]));
    }

    #[test]
    fn diamond_dependency_does_not_duplicate_plugin_in_order() {
        let graph = MapGraph(BTreeMap::from([
            ("raw", vec![]),
            ("a", vec!["raw"]),
            ("c", vec!["raw"]),
            ("b", vec!["a", "c"]),
        ]));
        let order = resolve(&graph, "b").unwrap();
        assert_eq!(order.iter().filter(|n| *n == "raw").count(), 1);
    }
}
