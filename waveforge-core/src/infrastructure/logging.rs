// /////////////////////////////////////////////////////////////////////////////
// Waveforge
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! Process-wide `tracing` initialization. Called once, from the CLI's
//! bootstrap layer — never from a library path, so this crate stays usable
//! as a dependency without hijacking a host application's logging.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Installs an `EnvFilter` + formatting subscriber. `RUST_LOG` overrides the
/// default of `info` for this crate and `warn` elsewhere.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn,waveforge=info"));

    tracing_subscriber::registry().with(filter).with(fmt::layer()).init();
}
