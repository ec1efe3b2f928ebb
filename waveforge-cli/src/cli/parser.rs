// /////////////////////////////////////////////////////////////////////////////
// Waveforge
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! CLI structure and clap parsing. Security validation happens afterward,
//! in `validator`.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug, Clone)]
#[command(name = "waveforge")]
#[command(about = concat!("Cache maintenance tools for the waveforge DAG cache, v", env!("CARGO_PKG_VERSION")))]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Storage root to operate on
    #[arg(long, global = true, default_value = "./waveforge-storage")]
    pub storage_dir: PathBuf,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Walk the storage root and index every cached artifact
    Scan {
        /// Discard any previous scan and re-walk the filesystem
        #[arg(long)]
        force_refresh: bool,
    },
    /// Identify integrity issues: version mismatches, orphan files, checksum
    /// failures, and the like
    Diagnose {
        /// Restrict to one run
        #[arg(long)]
        run_id: Option<String>,
    },
    /// Plan (and, with --apply, execute) removal of cache entries
    Clean {
        #[arg(long, value_enum, default_value = "lru")]
        strategy: CleanStrategyArg,

        #[arg(long)]
        target_size_mb: Option<u64>,

        #[arg(long)]
        max_entries: Option<usize>,

        #[arg(long)]
        keep_recent_days: Option<u64>,

        #[arg(long)]
        run_id: Option<String>,

        #[arg(long)]
        data_name: Option<String>,

        /// Delete the selected entries instead of only reporting them
        #[arg(long)]
        apply: bool,
    },
    /// Aggregate size, count, per-run, and per-data-type statistics
    Stats {
        #[arg(long, value_enum, default_value = "json")]
        format: StatsFormatArg,
    },
}

#[derive(ValueEnum, Debug, Clone, Copy, Eq, PartialEq)]
#[value(rename_all = "kebab-case")]
pub enum CleanStrategyArg {
    Lru,
    Oldest,
    Largest,
    VersionMismatch,
    FailedIntegrity,
    ByRun,
    ByDataType,
}

#[derive(ValueEnum, Debug, Clone, Copy, Eq, PartialEq)]
#[value(rename_all = "lowercase")]
pub enum StatsFormatArg {
    Json,
    Csv,
}

pub fn parse_cli() -> Cli {
    Cli::parse()
}
