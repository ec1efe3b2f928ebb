// /////////////////////////////////////////////////////////////////////////////
// Waveforge
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! Process-wide `prometheus` registry, per §10.1: cache hit/miss counts,
//! plugin execution durations, executor pool utilization, storage lock wait
//! time, and stream batch sizes.

use once_cell::sync::Lazy;
use prometheus::{HistogramVec, IntCounterVec, Registry};

pub static REGISTRY: Lazy<Registry> = Lazy::new(Registry::new);

pub static CACHE_LOOKUPS: Lazy<IntCounterVec> = Lazy::new(|| {
    let counter = IntCounterVec::new(
        prometheus::Opts::new("waveforge_cache_lookups_total", "Cache lookups by outcome"),
        &["outcome"],
    )
    .expect("metric names are valid");
    REGISTRY.register(Box::new(counter.clone())).ok();
    counter
});

pub static PLUGIN_COMPUTE_SECONDS: Lazy<HistogramVec> = Lazy::new(|| {
    let histogram = HistogramVec::new(
        prometheus::HistogramOpts::new("waveforge_plugin_compute_seconds", "Plugin compute() duration"),
        &["plugin"],
    )
    .expect("metric names are valid");
    REGISTRY.register(Box::new(histogram.clone())).ok();
    histogram
});

pub static STORAGE_LOCK_WAIT_SECONDS: Lazy<HistogramVec> = Lazy::new(|| {
    let histogram = HistogramVec::new(
        prometheus::HistogramOpts::new("waveforge_storage_lock_wait_seconds", "Time spent waiting for an artifact lock"),
        &["key"],
    )
    .expect("metric names are valid");
    REGISTRY.register(Box::new(histogram.clone())).ok();
    histogram
});

pub static STREAM_BATCH_SIZE: Lazy<HistogramVec> = Lazy::new(|| {
    let histogram = HistogramVec::new(
        prometheus::HistogramOpts::new("waveforge_stream_batch_size", "Chunks submitted per streaming batch"),
        &["plugin"],
    )
    .expect("metric names are valid");
    REGISTRY.register(Box::new(histogram.clone())).ok();
    histogram
});

pub fn record_cache_hit() {
    CACHE_LOOKUPS.with_label_values(&["hit"]).inc();
}

pub fn record_cache_miss() {
    CACHE_LOOKUPS.with_label_values(&["miss"]).inc();
}
