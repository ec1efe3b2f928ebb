// /////////////////////////////////////////////////////////////////////////////
// Waveforge
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! The one dynamic-dispatch seam a plugin author implements.
//!
//! Everything else about a plugin — name, dependencies, options, output
//! shape — is static data declared in [`crate::model::PluginDescriptor`].
//! `compute` is the only behavior: it consumes its already-resolved
//! dependency outputs and configuration and produces its own output, without
//! ever reaching into the registry or scheduler itself (no self-registration,
//! no runtime introspection of other plugins).

use async_trait::async_trait;
use futures::stream::BoxStream;
use std::collections::BTreeMap;
use std::sync::Arc;

use crate::error::WaveforgeError;
use crate::model::{Chunk, ResolvedConfig};
use crate::value_objects::RunId;

use super::ArtifactView;

/// Everything a plugin's `compute` needs, already resolved by the scheduler:
/// its dependencies' outputs, its finalized configuration, and a
/// cooperative-cancellation check.
///
/// `cancelled` is a plain closure rather than the concrete cancellation
/// primitive used by the executor, so this trait stays free of a `tokio`
/// dependency — the executor (in `waveforge-core`) closes over its own
/// token when constructing the context.
pub struct ExecutionContext {
    pub run_id: RunId,
    pub inputs: BTreeMap<String, ArtifactView>,
    pub config: ResolvedConfig,
    pub cancelled: Arc<dyn Fn() -> bool + Send + Sync>,
}

impl ExecutionContext {
    pub fn input(&self, name: &str) -> Option<&ArtifactView> {
        self.inputs.get(name)
    }

    pub fn is_cancelled(&self) -> bool {
        (self.cancelled)()
    }
}

/// The output of one static (non-streaming) plugin's `compute` call: raw
/// bytes ready to hand to [`super::StorageBackend::save`], in the layout its
/// `OutputSchema` declares.
pub struct StaticOutput {
    pub bytes: Vec<u8>,
}

/// Behavior half of the plugin contract. A `Static` plugin implements
/// [`compute_static`](Plugin::compute_static); a `Stream` plugin implements
/// [`compute_stream`](Plugin::compute_stream). Only the method matching the
/// plugin's declared `OutputKind` is ever called — calling the other is a
/// programming error in the executor, not a plugin concern.
#[async_trait]
pub trait Plugin: Send + Sync {
    async fn compute_static(&self, _ctx: ExecutionContext) -> Result<StaticOutput, WaveforgeError> {
        Err(WaveforgeError::internal_error(
            "plugin does not implement compute_static",
        ))
    }

    fn compute_stream<'a>(&'a self, _ctx: ExecutionContext) -> BoxStream<'a, Result<Chunk, WaveforgeError>> {
        Box::pin(futures::stream::once(async {
            Err(WaveforgeError::internal_error("plugin does not implement compute_stream"))
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::STORAGE_VERSION;

    struct Echo;

    #[async_trait]
    impl Plugin for Echo {
        async fn compute_static(&self, ctx: ExecutionContext) -> Result<StaticOutput, WaveforgeError> {
            Ok(StaticOutput {
                bytes: ctx.run_id.as_ref().as_bytes().to_vec(),
            })
        }
    }

    fn ctx() -> ExecutionContext {
        ExecutionContext {
            run_id: RunId::new("run-1").unwrap(),
            inputs: BTreeMap::new(),
            config: ResolvedConfig::default(),
            cancelled: Arc::new(|| false),
        }
    }

    #[test]
    fn compute_static_runs_and_sees_run_id() {
        let plugin = Echo;
        let output = futures::executor::block_on(plugin.compute_static(ctx())).unwrap();
        assert_eq!(output.bytes, b"run-1");
        let _ = STORAGE_VERSION;
    }

    #[test]
    fn default_compute_static_is_an_error() {
        struct StreamOnly;
        impl Plugin for StreamOnly {}
        let _ = StreamOnly;
    }
}
