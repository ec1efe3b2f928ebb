// /////////////////////////////////////////////////////////////////////////////
// Waveforge
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! Canonical time unit for a chunked artifact's `start`/`end`/`time` fields.
//!
//! The source mixes picoseconds (`timestamp`) and nanoseconds (`time`)
//! depending on plugin. This framework requires every `OutputSchema` for a
//! stream or time-indexed artifact to declare one canonical unit, persisted
//! into artifact metadata, so mixing never happens silently.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeUnit {
    Picoseconds,
    Nanoseconds,
}

impl TimeUnit {
    /// Conversion factor to picoseconds.
    pub const fn picos_per_unit(self) -> i64 {
        match self {
            TimeUnit::Picoseconds => 1,
            TimeUnit::Nanoseconds => 1_000,
        }
    }

    pub fn convert(self, value: i64, to: TimeUnit) -> i64 {
        if self == to {
            return value;
        }
        value * self.picos_per_unit() / to.picos_per_unit()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nanoseconds_to_picoseconds() {
        assert_eq!(TimeUnit::Nanoseconds.convert(5, TimeUnit::Picoseconds), 5_000);
    }

    #[test]
    fn identity_conversion_is_noop() {
        assert_eq!(TimeUnit::Picoseconds.convert(42, TimeUnit::Picoseconds), 42);
    }
}
