// /////////////////////////////////////////////////////////////////////////////
// Waveforge
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! Application layer: the scheduler and its supporting services. Orchestrates
//! domain types and infrastructure ports but contains no I/O itself beyond
//! what it delegates to `infrastructure`.

mod cache_maintenance;
mod config_resolver;
mod plugin_registry;
mod scheduler;

pub use cache_maintenance::{
    CacheAnalyzer, CacheCleaner, CacheDiagnostics, CacheStats, CacheStatsCollector, CleanupPlan, CleanupRequest,
    CleanupStrategy, DiagnosticFinding, IssueKind, Severity, StatsFormat,
};
pub use config_resolver::{ConfigResolver, InferredConfig, RawConfig, PRECEDENCE_VERSION};
pub use plugin_registry::PluginRegistry;
pub use scheduler::{AnalysisReport, Context, PlanReport, PlanStep};
