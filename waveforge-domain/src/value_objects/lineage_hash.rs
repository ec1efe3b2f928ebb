// /////////////////////////////////////////////////////////////////////////////
// Waveforge
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! The full SHA-1 hex digest of a canonicalized [`crate::model::Lineage`], and
//! the filesystem-safe cache key derived from its prefix.

use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};

pub const DEFAULT_HASH_PREFIX_LEN: usize = 8;

/// Full 40-character hex SHA-1 digest of a lineage record.
#[derive(Debug, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct LineageHash(String);

impl LineageHash {
    pub fn from_hex(hex: impl Into<String>) -> Self {
        Self(hex.into())
    }

    pub fn as_hex(&self) -> &str {
        &self.0
    }

    /// Hex prefix of `len` characters used as the cache-key suffix.
    pub fn prefix(&self, len: usize) -> &str {
        &self.0[..len.min(self.0.len())]
    }
}

impl Display for LineageHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The filesystem-safe string `{name}-{lineage_hash_prefix}` identifying an
/// artifact within a run.
#[derive(Debug, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct CacheKey(String);

impl CacheKey {
    pub fn new(name: &str, hash: &LineageHash, prefix_len: usize) -> Self {
        Self(format!("{name}-{}", hash.prefix(prefix_len)))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefix_truncates_to_requested_length() {
        let hash = LineageHash::from_hex("0123456789abcdef0123456789abcdef01234567");
        assert_eq!(hash.prefix(8), "01234567");
    }

    #[test]
    fn prefix_clamps_to_hash_length() {
        let hash = LineageHash::from_hex("abcd");
        assert_eq!(hash.prefix(8), "abcd");
    }

    #[test]
    fn cache_key_formats_name_and_prefix() {
        let hash = LineageHash::from_hex("0123456789abcdef0123456789abcdef01234567");
        let key = CacheKey::new("a", &hash, DEFAULT_HASH_PREFIX_LEN);
        assert_eq!(key.as_str(), "a-01234567");
    }
}
