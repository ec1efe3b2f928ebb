// /////////////////////////////////////////////////////////////////////////////
// Waveforge
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Waveforge Core
//!
//! The runtime half of the plugin-oriented DAG cache: the scheduler that
//! drives `get_data()`, the plugin registry and config resolver it
//! delegates to, cache maintenance tools, and the concrete infrastructure
//! (content-addressed storage, cancellation, configuration, logging,
//! metrics) that `waveforge_domain`'s ports describe but do not implement.
//!
//! ## Module Structure
//!
//! - [`application`] — orchestration with no I/O of its own beyond what it
//!   delegates to [`infrastructure`]:
//!   - [`application::Context`] — the `get_data()`/`preview_execution()`/
//!     `analyze_dependencies()` entry points.
//!   - [`application::PluginRegistry`] — plugin registration, dependency
//!     resolution, and re-entrancy guarding.
//!   - [`application::ConfigResolver`] — per-plugin/global/inferred/default
//!     configuration precedence.
//!   - [`application::CacheAnalyzer`], [`application::CacheDiagnostics`],
//!     [`application::CacheCleaner`], [`application::CacheStatsCollector`]
//!     — the cache maintenance tools exposed by the `waveforge` CLI.
//! - [`infrastructure`] — concrete implementations of the domain's ports
//!   plus the ambient engineering stack every binary in this workspace
//!   wires up at startup:
//!   - [`infrastructure::storage`] — `FileStorageBackend`, the memory-mapped
//!     artifact store.
//!   - [`infrastructure::cancellation`] — the `tokio::sync::Notify`-backed
//!     `CancellationToken` bridged into domain poll closures.
//!   - [`infrastructure::config`] — layered TOML/YAML/JSON + environment
//!     configuration.
//!   - [`infrastructure::logging`] — `tracing_subscriber` initialization.
//!   - [`infrastructure::metrics`] — the process-wide `prometheus` registry.
//!   - [`infrastructure::runtime`] — named `rayon::ThreadPool` profiles for
//!     CPU-bound plugin execution.
//!
//! ## Design Rules
//!
//! - Every fallible operation returns `waveforge_domain::WaveforgeError`.
//! - Blocking file I/O always runs on `tokio::task::spawn_blocking`; no
//!   async executor thread is ever blocked on disk access.
//! - `waveforge-core` depends on `waveforge-domain` but never the reverse;
//!   domain types stay free of `tokio`, `memmap2`, and every other
//!   infrastructure crate.

pub mod application;
pub mod infrastructure;

pub use application::{
    AnalysisReport, CacheAnalyzer, CacheCleaner, CacheDiagnostics, CacheStats, CacheStatsCollector, CleanupPlan,
    CleanupRequest, CleanupStrategy, ConfigResolver, Context, DiagnosticFinding, InferredConfig, IssueKind, PlanReport,
    PlanStep, PluginRegistry, RawConfig, Severity, StatsFormat, PRECEDENCE_VERSION,
};
pub use infrastructure::cancellation::CancellationToken;
pub use infrastructure::config::RuntimeConfig;
pub use infrastructure::storage::FileStorageBackend;
