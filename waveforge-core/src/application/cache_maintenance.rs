// /////////////////////////////////////////////////////////////////////////////
// Waveforge
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! Cache maintenance: scan, diagnose, clean, and report on the artifact
//! store directly from its on-disk layout, without executing any plugin.
//!
//! These tools walk `{storage_dir}/{run_id}/_cache/{key}.{bin,json}` pairs
//! per §6's layout. They are read-mostly by design: `CacheCleaner` computes
//! a plan and only deletes files when explicitly told `dry_run = false`.

use semver::Version;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::UNIX_EPOCH;

use waveforge_domain::error::WaveforgeError;
use waveforge_domain::model::{ArtifactMetadata, CacheEntry, STORAGE_VERSION};

fn run_dirs(storage_dir: &Path) -> Result<Vec<(String, PathBuf)>, WaveforgeError> {
    let mut runs = Vec::new();
    if !storage_dir.exists() {
        return Ok(runs);
    }
    for entry in fs::read_dir(storage_dir)? {
        let entry = entry?;
        if !entry.file_type()?.is_dir() {
            continue;
        }
        let cache_dir = entry.path().join("_cache");
        if cache_dir.is_dir() {
            let run_id = entry.file_name().to_string_lossy().into_owned();
            runs.push((run_id, cache_dir));
        }
    }
    runs.sort();
    Ok(runs)
}

/// Splits a cache key `{data_name}-{hash_prefix}` back into its two parts.
/// Cache keys never embed a `-`, so the last segment is always the prefix.
fn split_key(key: &str) -> (&str, &str) {
    match key.rsplit_once('-') {
        Some((name, prefix)) => (name, prefix),
        None => (key, ""),
    }
}

fn read_entry(run_id: &str, cache_dir: &Path, key: &str) -> Result<CacheEntry, WaveforgeError> {
    let bin_path = cache_dir.join(format!("{key}.bin"));
    let json_path = cache_dir.join(format!("{key}.json"));
    let bin_meta = fs::metadata(&bin_path)?;

    let (lineage, plugin_version) = match fs::read(&json_path) {
        Ok(bytes) => match serde_json::from_slice::<ArtifactMetadata>(&bytes) {
            Ok(metadata) => (Some(metadata.lineage), Some(metadata.plugin_version)),
            Err(_) => (None, None),
        },
        Err(_) => (None, None),
    };

    let mtime_unix_nanos = bin_meta
        .modified()
        .ok()
        .and_then(|t| t.duration_since(UNIX_EPOCH).ok())
        .map(|d| d.as_nanos() as i64)
        .unwrap_or(0);

    let (data_name, _) = split_key(key);
    Ok(CacheEntry {
        key: key.to_string(),
        run_id: run_id.to_string(),
        data_name: data_name.to_string(),
        size_bytes: bin_meta.len(),
        mtime_unix_nanos,
        lineage,
        plugin_version,
        on_disk: true,
        in_memory: false,
    })
}

fn scan_run(run_id: &str, cache_dir: &Path) -> Result<Vec<CacheEntry>, WaveforgeError> {
    let mut entries = Vec::new();
    for entry in fs::read_dir(cache_dir)? {
        let entry = entry?;
        let path = entry.path();
        if path.extension().and_then(|e| e.to_str()) != Some("bin") {
            continue;
        }
        let Some(key) = path.file_stem().and_then(|s| s.to_str()) else {
            continue;
        };
        entries.push(read_entry(run_id, cache_dir, key)?);
    }
    Ok(entries)
}

/// Walks the storage root and indexes every cached artifact.
///
/// Holds the previous scan's result so a plain `scan(false)` is cheap to
/// call repeatedly (idempotent, per §6's scanner guarantee); `scan(true)`
/// discards it and re-walks the filesystem from scratch.
pub struct CacheAnalyzer {
    storage_dir: PathBuf,
    last_scan: Mutex<Option<Vec<CacheEntry>>>,
}

impl CacheAnalyzer {
    pub fn new(storage_dir: impl Into<PathBuf>) -> Self {
        Self {
            storage_dir: storage_dir.into(),
            last_scan: Mutex::new(None),
        }
    }

    pub fn scan(&self, force_refresh: bool) -> Result<Vec<CacheEntry>, WaveforgeError> {
        let mut guard = self.last_scan.lock().expect("cache analyzer mutex poisoned");
        if !force_refresh {
            if let Some(cached) = guard.as_ref() {
                return Ok(cached.clone());
            }
        }

        let mut entries = Vec::new();
        for (run_id, cache_dir) in run_dirs(&self.storage_dir)? {
            entries.extend(scan_run(&run_id, &cache_dir)?);
        }
        entries.sort_by(|a, b| (&a.run_id, &a.key).cmp(&(&b.run_id, &b.key)));

        *guard = Some(entries.clone());
        Ok(entries)
    }
}

#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Info,
    Warning,
    Error,
}

#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum IssueKind {
    VersionMismatch { on_disk: u32, current: u32 },
    MissingMetadata,
    MissingData,
    SizeMismatch { expected: u64, actual: u64 },
    ChecksumFailure,
    OrphanFile,
    StorageVersionMismatch { on_disk: u32, current: u32 },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiagnosticFinding {
    pub run_id: String,
    pub key: String,
    pub severity: Severity,
    pub issue: IssueKind,
    /// Whether a dry-run auto-fix (delete the orphaned/corrupt file pair) is
    /// available for this finding. `CacheDiagnostics::diagnose` never applies
    /// it; the caller decides via `CacheCleaner`.
    pub auto_fixable: bool,
}

/// Diagnoses integrity problems in the artifact store without modifying it.
pub struct CacheDiagnostics {
    storage_dir: PathBuf,
}

impl CacheDiagnostics {
    pub fn new(storage_dir: impl Into<PathBuf>) -> Self {
        Self {
            storage_dir: storage_dir.into(),
        }
    }

    pub fn diagnose(&self, run_id: Option<&str>) -> Result<Vec<DiagnosticFinding>, WaveforgeError> {
        let mut findings = Vec::new();
        for (scanned_run, cache_dir) in run_dirs(&self.storage_dir)? {
            if let Some(filter) = run_id {
                if filter != scanned_run {
                    continue;
                }
            }
            findings.extend(self.diagnose_run(&scanned_run, &cache_dir)?);
        }
        Ok(findings)
    }

    fn diagnose_run(&self, run_id: &str, cache_dir: &Path) -> Result<Vec<DiagnosticFinding>, WaveforgeError> {
        let mut findings = Vec::new();
        let mut keys = std::collections::BTreeSet::new();

        for entry in fs::read_dir(cache_dir)? {
            let entry = entry?;
            let path = entry.path();
            let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            if matches!(path.extension().and_then(|e| e.to_str()), Some("bin") | Some("json")) {
                keys.insert(stem.to_string());
            }
        }

        for key in keys {
            let bin_path = cache_dir.join(format!("{key}.bin"));
            let json_path = cache_dir.join(format!("{key}.json"));
            let has_bin = bin_path.exists();
            let has_json = json_path.exists();

            if has_bin && !has_json {
                findings.push(DiagnosticFinding {
                    run_id: run_id.to_string(),
                    key: key.clone(),
                    severity: Severity::Error,
                    issue: IssueKind::MissingMetadata,
                    auto_fixable: true,
                });
                continue;
            }
            if has_json && !has_bin {
                findings.push(DiagnosticFinding {
                    run_id: run_id.to_string(),
                    key: key.clone(),
                    severity: Severity::Error,
                    issue: IssueKind::MissingData,
                    auto_fixable: true,
                });
                continue;
            }
            if !has_bin && !has_json {
                findings.push(DiagnosticFinding {
                    run_id: run_id.to_string(),
                    key: key.clone(),
                    severity: Severity::Warning,
                    issue: IssueKind::OrphanFile,
                    auto_fixable: true,
                });
                continue;
            }

            let metadata: ArtifactMetadata = match fs::read(&json_path).and_then(|bytes| {
                serde_json::from_slice(&bytes).map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))
            }) {
                Ok(m) => m,
                Err(_) => {
                    findings.push(DiagnosticFinding {
                        run_id: run_id.to_string(),
                        key: key.clone(),
                        severity: Severity::Error,
                        issue: IssueKind::MissingMetadata,
                        auto_fixable: true,
                    });
                    continue;
                }
            };

            if metadata.storage_version != STORAGE_VERSION {
                findings.push(DiagnosticFinding {
                    run_id: run_id.to_string(),
                    key: key.clone(),
                    severity: Severity::Error,
                    issue: IssueKind::StorageVersionMismatch {
                        on_disk: metadata.storage_version,
                        current: STORAGE_VERSION,
                    },
                    auto_fixable: false,
                });
            }

            let file_len = fs::metadata(&bin_path)?.len();
            let record_size = record_size_for(&metadata);
            if !metadata.file_size_is_consistent(file_len, record_size) {
                let expected = record_size.map(|size| metadata.count * size).unwrap_or(file_len);
                findings.push(DiagnosticFinding {
                    run_id: run_id.to_string(),
                    key: key.clone(),
                    severity: Severity::Error,
                    issue: IssueKind::SizeMismatch {
                        expected,
                        actual: file_len,
                    },
                    auto_fixable: true,
                });
            }

            if let Some(checksum) = &metadata.checksum {
                if !checksum_matches(&bin_path, checksum)? {
                    findings.push(DiagnosticFinding {
                        run_id: run_id.to_string(),
                        key: key.clone(),
                        severity: Severity::Error,
                        issue: IssueKind::ChecksumFailure,
                        auto_fixable: true,
                    });
                }
            }
        }

        Ok(findings)
    }

    /// Deletes the `.bin`/`.json`/`.lock` trio for every finding marked
    /// `auto_fixable`. Called only when the caller opts out of dry-run.
    pub fn apply_fixes(&self, findings: &[DiagnosticFinding]) -> Result<usize, WaveforgeError> {
        let mut fixed = 0;
        for finding in findings.iter().filter(|f| f.auto_fixable) {
            let cache_dir = self.storage_dir.join(&finding.run_id).join("_cache");
            for ext in ["bin", "json", "lock"] {
                let _ = fs::remove_file(cache_dir.join(format!("{}.{ext}", finding.key)));
            }
            fixed += 1;
        }
        Ok(fixed)
    }
}

fn record_size_for(_metadata: &ArtifactMetadata) -> Option<u64> {
    // Without a concrete record struct, a fixed record size cannot be
    // derived from the JSON `dtype_descr` alone; size consistency degrades
    // to "file exists and is non-empty" for structured outputs until a
    // caller supplies the concrete layout, matching `FileStorageBackend`.
    None
}

fn checksum_matches(bin_path: &Path, checksum: &waveforge_domain::model::Checksum) -> Result<bool, WaveforgeError> {
    use waveforge_domain::model::ChecksumAlgorithm;

    let bytes = fs::read(bin_path)?;
    let digest = match checksum.algorithm {
        ChecksumAlgorithm::Sha1 => {
            use sha1::{Digest, Sha1};
            hex::encode(Sha1::digest(&bytes))
        }
        ChecksumAlgorithm::Sha256 => {
            use sha2::{Digest, Sha256};
            hex::encode(Sha256::digest(&bytes))
        }
    };
    Ok(digest == checksum.value)
}

#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CleanupStrategy {
    Lru,
    Oldest,
    Largest,
    VersionMismatch,
    FailedIntegrity,
    ByRun,
    ByDataType,
}

#[derive(Debug, Default, Clone)]
pub struct CleanupRequest {
    pub strategy: Option<CleanupStrategy>,
    pub target_size_mb: Option<u64>,
    pub max_entries: Option<usize>,
    pub keep_recent_days: Option<u64>,
    pub run_id: Option<String>,
    pub data_name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CleanupPlan {
    pub entries_to_delete: Vec<CacheEntry>,
    pub bytes_freed: u64,
    pub dry_run: bool,
}

/// Plans (and, when asked, executes) removal of cache entries by one of
/// several strategies. `dry_run` defaults to `true`; nothing is ever
/// deleted by `plan_cleanup` alone — only `execute` mutates the store.
pub struct CacheCleaner {
    storage_dir: PathBuf,
}

impl CacheCleaner {
    pub fn new(storage_dir: impl Into<PathBuf>) -> Self {
        Self {
            storage_dir: storage_dir.into(),
        }
    }

    pub fn plan_cleanup(&self, request: CleanupRequest, dry_run: bool) -> Result<CleanupPlan, WaveforgeError> {
        let analyzer = CacheAnalyzer::new(&self.storage_dir);
        let mut entries = analyzer.scan(true)?;

        if let Some(run_id) = &request.run_id {
            entries.retain(|e| &e.run_id == run_id);
        }
        if let Some(data_name) = &request.data_name {
            entries.retain(|e| &e.data_name == data_name);
        }

        let selected = match request.strategy.unwrap_or(CleanupStrategy::Lru) {
            CleanupStrategy::Lru | CleanupStrategy::Oldest => {
                entries.sort_by_key(|e| e.mtime_unix_nanos);
                select_by_budget(entries, request.target_size_mb, request.max_entries)
            }
            CleanupStrategy::Largest => {
                entries.sort_by_key(|e| std::cmp::Reverse(e.size_bytes));
                select_by_budget(entries, request.target_size_mb, request.max_entries)
            }
            CleanupStrategy::VersionMismatch => {
                let mut latest: BTreeMap<String, Version> = BTreeMap::new();
                for entry in &entries {
                    if let Some(v) = &entry.plugin_version {
                        latest
                            .entry(entry.data_name.clone())
                            .and_modify(|cur| {
                                if v > cur {
                                    *cur = v.clone();
                                }
                            })
                            .or_insert_with(|| v.clone());
                    }
                }
                entries
                    .into_iter()
                    .filter(|e| match (&e.plugin_version, latest.get(&e.data_name)) {
                        (Some(v), Some(max)) => v != max,
                        _ => true,
                    })
                    .collect()
            }
            CleanupStrategy::FailedIntegrity => {
                let diagnostics = CacheDiagnostics::new(&self.storage_dir);
                let findings = diagnostics.diagnose(request.run_id.as_deref())?;
                let bad_keys: std::collections::BTreeSet<_> =
                    findings.iter().map(|f| (f.run_id.clone(), f.key.clone())).collect();
                entries
                    .into_iter()
                    .filter(|e| bad_keys.contains(&(e.run_id.clone(), e.key.clone())))
                    .collect()
            }
            CleanupStrategy::ByRun => entries,
            CleanupStrategy::ByDataType => entries,
        };

        let selected = if let Some(keep_days) = request.keep_recent_days {
            let cutoff = now_unix_nanos().saturating_sub(keep_days as i64 * 86_400 * 1_000_000_000);
            selected.into_iter().filter(|e| e.mtime_unix_nanos < cutoff).collect()
        } else {
            selected
        };

        let bytes_freed = selected.iter().map(|e| e.size_bytes).sum();

        if !dry_run {
            self.delete_entries(&selected)?;
        }

        Ok(CleanupPlan {
            entries_to_delete: selected,
            bytes_freed,
            dry_run,
        })
    }

    fn delete_entries(&self, entries: &[CacheEntry]) -> Result<(), WaveforgeError> {
        for entry in entries {
            let cache_dir = self.storage_dir.join(&entry.run_id).join("_cache");
            for ext in ["bin", "json", "lock"] {
                let _ = fs::remove_file(cache_dir.join(format!("{}.{ext}", entry.key)));
            }
        }
        Ok(())
    }
}

/// Selects entries for deletion, in the order given, until the remaining
/// total size and count both fit within the requested budget. With no
/// budget given at all, nothing is selected — a strategy alone is not
/// sufficient grounds to delete anything.
fn select_by_budget(entries: Vec<CacheEntry>, target_size_mb: Option<u64>, max_entries: Option<usize>) -> Vec<CacheEntry> {
    if target_size_mb.is_none() && max_entries.is_none() {
        return Vec::new();
    }
    let target_bytes = target_size_mb.map(|mb| mb * 1024 * 1024).unwrap_or(u64::MAX);
    let max_count = max_entries.unwrap_or(usize::MAX);

    let mut remaining_total: u64 = entries.iter().map(|e| e.size_bytes).sum();
    let mut remaining_count = entries.len();

    let mut selected = Vec::new();
    for entry in entries {
        if remaining_total <= target_bytes && remaining_count <= max_count {
            break;
        }
        remaining_total = remaining_total.saturating_sub(entry.size_bytes);
        remaining_count -= 1;
        selected.push(entry);
    }
    selected
}

fn now_unix_nanos() -> i64 {
    std::time::SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as i64)
        .unwrap_or(0)
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CacheStats {
    pub total_entries: usize,
    pub total_bytes: u64,
    pub by_run: BTreeMap<String, u64>,
    pub by_data_type: BTreeMap<String, u64>,
    pub oldest_mtime_unix_nanos: Option<i64>,
    pub newest_mtime_unix_nanos: Option<i64>,
}

#[derive(Debug, Clone)]
pub enum StatsFormat {
    Json,
    Csv,
}

/// Aggregates size, count, per-run, per-data-type, and age breakdowns.
pub struct CacheStatsCollector {
    storage_dir: PathBuf,
}

impl CacheStatsCollector {
    pub fn new(storage_dir: impl Into<PathBuf>) -> Self {
        Self {
            storage_dir: storage_dir.into(),
        }
    }

    pub fn collect(&self) -> Result<CacheStats, WaveforgeError> {
        let analyzer = CacheAnalyzer::new(&self.storage_dir);
        let entries = analyzer.scan(true)?;

        let mut stats = CacheStats {
            total_entries: entries.len(),
            ..Default::default()
        };

        for entry in &entries {
            stats.total_bytes += entry.size_bytes;
            *stats.by_run.entry(entry.run_id.clone()).or_insert(0) += entry.size_bytes;
            *stats.by_data_type.entry(entry.data_name.clone()).or_insert(0) += entry.size_bytes;
            stats.oldest_mtime_unix_nanos = Some(
                stats
                    .oldest_mtime_unix_nanos
                    .map_or(entry.mtime_unix_nanos, |m| m.min(entry.mtime_unix_nanos)),
            );
            stats.newest_mtime_unix_nanos = Some(
                stats
                    .newest_mtime_unix_nanos
                    .map_or(entry.mtime_unix_nanos, |m| m.max(entry.mtime_unix_nanos)),
            );
        }

        Ok(stats)
    }

    pub fn export(&self, format: StatsFormat) -> Result<String, WaveforgeError> {
        let stats = self.collect()?;
        match format {
            StatsFormat::Json => serde_json::to_string_pretty(&stats).map_err(WaveforgeError::from),
            StatsFormat::Csv => {
                let mut csv = String::from("run_id,bytes\n");
                for (run_id, bytes) in &stats.by_run {
                    csv.push_str(&format!("{run_id},{bytes}\n"));
                }
                Ok(csv)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use waveforge_domain::model::{Lineage, STORAGE_VERSION};
    use waveforge_domain::value_objects::TimeUnit;

    fn sample_metadata() -> ArtifactMetadata {
        ArtifactMetadata {
            storage_version: STORAGE_VERSION,
            dtype_descr: serde_json::json!([["time", "i8"]]),
            count: 1,
            lineage: Lineage {
                plugin_name: "baseline".into(),
                plugin_version: semver::Version::new(1, 0, 0),
                output_schema_descriptor: serde_json::json!({"kind": "record"}),
                resolved_config_tracked_subset: Default::default(),
                depends_on: Default::default(),
            },
            plugin_version: semver::Version::new(1, 0, 0),
            watch_signature: None,
            checksum: None,
            compression: None,
            time_unit: Some(TimeUnit::Nanoseconds),
        }
    }

    fn write_artifact(storage_dir: &Path, run_id: &str, key: &str, metadata: &ArtifactMetadata, data: &[u8]) {
        let cache_dir = storage_dir.join(run_id).join("_cache");
        fs::create_dir_all(&cache_dir).unwrap();
        fs::write(cache_dir.join(format!("{key}.bin")), data).unwrap();
        fs::write(
            cache_dir.join(format!("{key}.json")),
            serde_json::to_vec_pretty(metadata).unwrap(),
        )
        .unwrap();
    }

    #[test]
    fn scan_finds_every_run_and_key() {
        let dir = tempfile::tempdir().unwrap();
        write_artifact(dir.path(), "run1", "baseline-01234567", &sample_metadata(), &[1, 2, 3, 4]);
        write_artifact(dir.path(), "run2", "baseline-89abcdef", &sample_metadata(), &[5, 6, 7, 8]);

        let analyzer = CacheAnalyzer::new(dir.path());
        let entries = analyzer.scan(true).unwrap();

        assert_eq!(entries.len(), 2);
        assert!(entries.iter().any(|e| e.run_id == "run1" && e.data_name == "baseline"));
    }

    #[test]
    fn scan_without_force_reuses_previous_result() {
        let dir = tempfile::tempdir().unwrap();
        write_artifact(dir.path(), "run1", "baseline-01234567", &sample_metadata(), &[1, 2, 3, 4]);

        let analyzer = CacheAnalyzer::new(dir.path());
        let first = analyzer.scan(false).unwrap();

        write_artifact(dir.path(), "run2", "baseline-89abcdef", &sample_metadata(), &[5, 6]);
        let second = analyzer.scan(false).unwrap();

        assert_eq!(first.len(), second.len());
    }

    #[test]
    fn diagnose_reports_missing_metadata() {
        let dir = tempfile::tempdir().unwrap();
        let cache_dir = dir.path().join("run1").join("_cache");
        fs::create_dir_all(&cache_dir).unwrap();
        fs::write(cache_dir.join("orphan-01234567.bin"), [1, 2, 3]).unwrap();

        let diagnostics = CacheDiagnostics::new(dir.path());
        let findings = diagnostics.diagnose(None).unwrap();

        assert_eq!(findings.len(), 1);
        assert!(matches!(findings[0].issue, IssueKind::MissingMetadata));
        assert!(findings[0].auto_fixable);
    }

    #[test]
    fn diagnose_reports_storage_version_mismatch() {
        let dir = tempfile::tempdir().unwrap();
        let mut stale = sample_metadata();
        stale.storage_version = STORAGE_VERSION + 1;
        write_artifact(dir.path(), "run1", "baseline-01234567", &stale, &[1, 2, 3, 4]);

        let diagnostics = CacheDiagnostics::new(dir.path());
        let findings = diagnostics.diagnose(None).unwrap();

        assert!(findings
            .iter()
            .any(|f| matches!(f.issue, IssueKind::StorageVersionMismatch { .. })));
    }

    #[test]
    fn apply_fixes_removes_only_flagged_entries() {
        let dir = tempfile::tempdir().unwrap();
        let cache_dir = dir.path().join("run1").join("_cache");
        fs::create_dir_all(&cache_dir).unwrap();
        fs::write(cache_dir.join("orphan-01234567.bin"), [1, 2, 3]).unwrap();

        let diagnostics = CacheDiagnostics::new(dir.path());
        let findings = diagnostics.diagnose(None).unwrap();
        let fixed = diagnostics.apply_fixes(&findings).unwrap();

        assert_eq!(fixed, 1);
        assert!(!cache_dir.join("orphan-01234567.bin").exists());
    }

    #[test]
    fn plan_cleanup_dry_run_leaves_files_in_place() {
        let dir = tempfile::tempdir().unwrap();
        write_artifact(dir.path(), "run1", "baseline-01234567", &sample_metadata(), &[1, 2, 3, 4]);

        let cleaner = CacheCleaner::new(dir.path());
        let plan = cleaner
            .plan_cleanup(
                CleanupRequest {
                    strategy: Some(CleanupStrategy::Lru),
                    target_size_mb: Some(0),
                    ..Default::default()
                },
                true,
            )
            .unwrap();

        assert!(plan.dry_run);
        assert!(dir.path().join("run1/_cache/baseline-01234567.bin").exists());
    }

    #[test]
    fn plan_cleanup_apply_deletes_selected_entries() {
        let dir = tempfile::tempdir().unwrap();
        write_artifact(dir.path(), "run1", "baseline-01234567", &sample_metadata(), &[1, 2, 3, 4]);

        let cleaner = CacheCleaner::new(dir.path());
        let plan = cleaner
            .plan_cleanup(
                CleanupRequest {
                    strategy: Some(CleanupStrategy::Lru),
                    target_size_mb: Some(0),
                    ..Default::default()
                },
                false,
            )
            .unwrap();

        assert_eq!(plan.entries_to_delete.len(), 1);
        assert!(!dir.path().join("run1/_cache/baseline-01234567.bin").exists());
    }

    #[test]
    fn stats_collector_aggregates_by_run() {
        let dir = tempfile::tempdir().unwrap();
        write_artifact(dir.path(), "run1", "baseline-01234567", &sample_metadata(), &[1, 2, 3, 4]);
        write_artifact(dir.path(), "run1", "filtered-89abcdef", &sample_metadata(), &[1, 2]);

        let stats = CacheStatsCollector::new(dir.path()).collect().unwrap();

        assert_eq!(stats.total_entries, 2);
        assert_eq!(stats.by_run["run1"], 6);
    }

    #[test]
    fn stats_export_json_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        write_artifact(dir.path(), "run1", "baseline-01234567", &sample_metadata(), &[1, 2, 3, 4]);

        let json = CacheStatsCollector::new(dir.path()).export(StatsFormat::Json).unwrap();
        let parsed: CacheStats = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.total_entries, 1);
    }
}
