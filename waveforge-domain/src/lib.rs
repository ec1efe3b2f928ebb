// /////////////////////////////////////////////////////////////////////////////
// Waveforge
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Waveforge Domain
//!
//! Pure, reusable business logic for the plugin-oriented DAG cache: the
//! plugin contract, provenance (lineage) hashing, the streaming chunk model,
//! and dependency-graph algorithms. Independent of any storage engine,
//! runtime, or CLI.
//!
//! ## Module Structure
//!
//! - [`error`] — [`WaveforgeError`], the single tagged error sum type
//!   crossing every port boundary in this system.
//! - [`value_objects`] — immutable, self-validating identifiers and
//!   measures: [`value_objects::RunId`], [`value_objects::TimeUnit`],
//!   [`value_objects::LineageHash`], [`value_objects::CacheKey`].
//! - [`model`] — the data half of the domain: plugin descriptors,
//!   [`model::Lineage`] and its canonical hash, [`model::Chunk`]/
//!   [`model::Record`], on-disk [`model::ArtifactMetadata`], and
//!   [`model::ResolvedConfig`].
//! - [`services`] — the seams infrastructure implements:
//!   [`services::Plugin`] (the behavior half of the plugin contract) and
//!   [`services::StorageBackend`] (the artifact store port).
//! - [`dag`] — pure topological-sort and execution-layer algorithms over a
//!   [`dag::DependencyGraph`].
//!
//! ## Design Rules
//!
//! - No I/O besides the infrastructure ports in [`services`], which stay
//!   `async` because they model side effects, not computation.
//! - Lineage hashing is canonical and deterministic: identical tracked
//!   inputs always hash identically, regardless of field declaration order
//!   or map insertion order.
//! - Every fallible domain operation returns [`error::WaveforgeError`].

pub mod dag;
pub mod error;
pub mod model;
pub mod services;
pub mod value_objects;

pub use error::WaveforgeError;
pub use value_objects::{CacheKey, LineageHash, RunId, TimeUnit};
