// /////////////////////////////////////////////////////////////////////////////
// Waveforge
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Waveforge CLI
//!
//! The bootstrap layer for the `waveforge` binary: CLI parsing and
//! security validation, configuration, signal handling and graceful
//! shutdown, platform abstraction, and Unix exit codes. It sits outside
//! `waveforge-domain`/`waveforge-core` and is the only crate allowed to
//! depend on both plus `clap`.
//!
//! This surface is scoped to the cache maintenance tools only — `scan`,
//! `diagnose`, `clean`, `stats` — never to plugin execution or DAQ
//! parsing, which run inside the scheduler itself.
//!
//! ## Module Structure
//!
//! - `cli` — clap parsing (`cli::parser`) and security validation
//!   (`cli::validator`), composed into `parse_and_validate`.
//! - `config` — `AppConfig`, the immutable bootstrap-phase configuration.
//! - `exit_code` — BSD `sysexits.h`-style exit codes derived from
//!   `WaveforgeError`.
//! - `logger` — a minimal logging trait for bootstrap-phase messages,
//!   before `waveforge-core`'s tracing subscriber is installed.
//! - `platform` — OS abstraction (Unix/Windows) for process metadata.
//! - `shutdown` — `ShutdownCoordinator` and its cancellation token.
//! - `signals` — SIGTERM/SIGINT/SIGHUP handling that drives shutdown.
//!
//! ## Usage
//!
//! ```no_run
//! use waveforge_cli::{bootstrap_cli, result_to_exit_code};
//!
//! #[tokio::main]
//! async fn main() -> std::process::ExitCode {
//!     let validated_cli = match bootstrap_cli() {
//!         Ok(cli) => cli,
//!         Err(e) => {
//!             eprintln!("CLI Error: {e}");
//!             return std::process::ExitCode::from(65); // EX_DATAERR
//!         }
//!     };
//!
//!     let result = run_application(validated_cli).await;
//!     result_to_exit_code(result)
//! }
//!
//! async fn run_application(
//!     _cli: waveforge_cli::ValidatedCli,
//! ) -> Result<(), waveforge_domain::error::WaveforgeError> {
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod config;
pub mod exit_code;
pub mod logger;
pub mod platform;
pub mod shutdown;
pub mod signals;

pub use cli::{parse_and_validate, ValidatedCli, ValidatedCommand};
pub use exit_code::{map_error_to_exit_code, result_to_exit_code, ExitCode};

/// Parses and security-validates CLI arguments.
///
/// Clap handles `--help`/`--version` itself and exits the process before
/// this returns in those cases.
///
/// # Errors
///
/// Returns [`cli::ParseError`] if an argument fails security validation
/// (dangerous pattern, protected directory, out-of-range value, ...).
pub fn bootstrap_cli() -> Result<ValidatedCli, cli::ParseError> {
    cli::parse_and_validate()
}
