// /////////////////////////////////////////////////////////////////////////////
// Waveforge
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Command-Line Interface
//!
//! Security-first CLI handling for the cache maintenance tools only —
//! never plugin execution or DAQ parsing.
//!
//! ## Architecture
//!
//! ```text
//! 1. parser::parse_cli()      Parse CLI with clap
//! 2. validate_cli()           Security validation
//! 3. ValidatedCli             Safe, validated config
//! ```
//!
//! ## Modules
//!
//! - `parser` — CLI structure and clap parsing.
//! - `validator` — `SecureArgParser`, the security validation layer.

pub mod parser;
pub mod validator;

pub use parser::{CleanStrategyArg, Cli, Commands, StatsFormatArg};
pub use validator::{ParseError, SecureArgParser};

use std::path::PathBuf;

use waveforge_core::application::{CleanupRequest, CleanupStrategy, StatsFormat};

/// Validated CLI configuration: every path canonicalized, every value
/// range-checked.
#[derive(Debug, Clone)]
pub struct ValidatedCli {
    pub command: ValidatedCommand,
    pub verbose: bool,
    pub storage_dir: PathBuf,
    pub config: Option<PathBuf>,
}

#[derive(Debug, Clone)]
pub enum ValidatedCommand {
    Scan {
        force_refresh: bool,
    },
    Diagnose {
        run_id: Option<String>,
    },
    Clean {
        request: CleanupRequest,
        apply: bool,
    },
    Stats {
        format: StatsFormat,
    },
}

pub fn parse_and_validate() -> Result<ValidatedCli, ParseError> {
    let cli = parser::parse_cli();
    validate_cli(cli)
}

fn validate_cli(cli: Cli) -> Result<ValidatedCli, ParseError> {
    let storage_dir = SecureArgParser::validate_path(&cli.storage_dir.to_string_lossy())?;

    let config = if let Some(ref path) = cli.config {
        Some(SecureArgParser::validate_path(&path.to_string_lossy())?)
    } else {
        None
    };

    let command = match cli.command {
        Commands::Scan { force_refresh } => ValidatedCommand::Scan { force_refresh },
        Commands::Diagnose { run_id } => {
            if let Some(ref id) = run_id {
                SecureArgParser::validate_argument(id)?;
            }
            ValidatedCommand::Diagnose { run_id }
        }
        Commands::Clean {
            strategy,
            target_size_mb,
            max_entries,
            keep_recent_days,
            run_id,
            data_name,
            apply,
        } => {
            if let Some(ref id) = run_id {
                SecureArgParser::validate_argument(id)?;
            }
            if let Some(ref name) = data_name {
                SecureArgParser::validate_argument(name)?;
            }
            if let Some(max) = max_entries {
                if max == 0 {
                    return Err(ParseError::InvalidValue {
                        arg: "max-entries".to_string(),
                        reason: "must be greater than 0".to_string(),
                    });
                }
            }

            ValidatedCommand::Clean {
                request: CleanupRequest {
                    strategy: Some(map_strategy(strategy)),
                    target_size_mb,
                    max_entries,
                    keep_recent_days,
                    run_id,
                    data_name,
                },
                apply,
            }
        }
        Commands::Stats { format } => ValidatedCommand::Stats {
            format: match format {
                StatsFormatArg::Json => StatsFormat::Json,
                StatsFormatArg::Csv => StatsFormat::Csv,
            },
        },
    };

    Ok(ValidatedCli {
        command,
        verbose: cli.verbose,
        storage_dir,
        config,
    })
}

fn map_strategy(arg: CleanStrategyArg) -> CleanupStrategy {
    match arg {
        CleanStrategyArg::Lru => CleanupStrategy::Lru,
        CleanStrategyArg::Oldest => CleanupStrategy::Oldest,
        CleanStrategyArg::Largest => CleanupStrategy::Largest,
        CleanStrategyArg::VersionMismatch => CleanupStrategy::VersionMismatch,
        CleanStrategyArg::FailedIntegrity => CleanupStrategy::FailedIntegrity,
        CleanStrategyArg::ByRun => CleanupStrategy::ByRun,
        CleanStrategyArg::ByDataType => CleanupStrategy::ByDataType,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_dangerous_run_id() {
        let cli = Cli {
            command: Commands::Diagnose {
                run_id: Some("../escape".to_string()),
            },
            verbose: false,
            storage_dir: std::env::temp_dir(),
            config: None,
        };
        assert!(validate_cli(cli).is_err());
    }

    #[test]
    fn accepts_scan_with_existing_storage_dir() {
        let cli = Cli {
            command: Commands::Scan { force_refresh: true },
            verbose: false,
            storage_dir: std::env::temp_dir(),
            config: None,
        };
        let validated = validate_cli(cli).unwrap();
        assert!(matches!(validated.command, ValidatedCommand::Scan { force_refresh: true }));
    }

    #[test]
    fn rejects_zero_max_entries() {
        let cli = Cli {
            command: Commands::Clean {
                strategy: CleanStrategyArg::Lru,
                target_size_mb: None,
                max_entries: Some(0),
                keep_recent_days: None,
                run_id: None,
                data_name: None,
                apply: false,
            },
            verbose: false,
            storage_dir: std::env::temp_dir(),
            config: None,
        };
        assert!(validate_cli(cli).is_err());
    }
}
