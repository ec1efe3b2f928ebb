// /////////////////////////////////////////////////////////////////////////////
// Waveforge
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! Entry point for the `waveforge` binary: cache maintenance only.

use std::process::ExitCode;

use waveforge_cli::shutdown::ShutdownCoordinator;
use waveforge_cli::signals::create_signal_handler;
use waveforge_cli::{bootstrap_cli, result_to_exit_code, ValidatedCli, ValidatedCommand};
use waveforge_core::application::{CacheAnalyzer, CacheCleaner, CacheDiagnostics, CacheStatsCollector};
use waveforge_domain::error::WaveforgeError;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = match bootstrap_cli() {
        Ok(cli) => cli,
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::from(64); // EX_USAGE
        }
    };

    init_logging(cli.verbose);

    let coordinator = ShutdownCoordinator::new(std::time::Duration::from_secs(5));
    let shutdown_token = coordinator.token();
    tokio::spawn(async move {
        create_signal_handler()
            .wait_for_signal(Box::new(move || {
                shutdown_token.cancel();
            }))
            .await;
    });

    result_to_exit_code(run(cli).await)
}

fn init_logging(verbose: bool) {
    let level = if verbose { tracing::Level::DEBUG } else { tracing::Level::INFO };
    let _ = tracing_subscriber::fmt().with_max_level(level).try_init();
}

async fn run(cli: ValidatedCli) -> Result<(), WaveforgeError> {
    match cli.command {
        ValidatedCommand::Scan { force_refresh } => {
            let analyzer = CacheAnalyzer::new(cli.storage_dir);
            let entries = analyzer.scan(force_refresh)?;
            println!("{}", serde_json::to_string_pretty(&entries).map_err(WaveforgeError::from)?);
            Ok(())
        }
        ValidatedCommand::Diagnose { run_id } => {
            let diagnostics = CacheDiagnostics::new(cli.storage_dir);
            let findings = diagnostics.diagnose(run_id.as_deref())?;
            println!("{}", serde_json::to_string_pretty(&findings).map_err(WaveforgeError::from)?);
            Ok(())
        }
        ValidatedCommand::Clean { request, apply } => {
            let cleaner = CacheCleaner::new(cli.storage_dir);
            let plan = cleaner.plan_cleanup(request, !apply)?;
            println!("{}", serde_json::to_string_pretty(&plan).map_err(WaveforgeError::from)?);
            Ok(())
        }
        ValidatedCommand::Stats { format } => {
            let collector = CacheStatsCollector::new(cli.storage_dir);
            println!("{}", collector.export(format)?);
            Ok(())
        }
    }
}
