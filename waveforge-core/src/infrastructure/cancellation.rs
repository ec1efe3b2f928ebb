// /////////////////////////////////////////////////////////////////////////////
// Waveforge
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Cancellation Token
//!
//! A thread-safe, clonable cancellation signal shared by the Streaming
//! Engine, the Batch Processor, and the CLI's shutdown coordinator. One
//! token type serves both the "process is shutting down" case and the
//! "a caller asked this particular stream to stop" case — the caller
//! decides which tree of clones it hands out.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::Notify;

/// Lightweight, clonable signal: once cancelled, stays cancelled.
#[derive(Clone)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
    notify: Arc<Notify>,
}

impl Default for CancellationToken {
    fn default() -> Self {
        Self::new()
    }
}

impl CancellationToken {
    pub fn new() -> Self {
        Self {
            cancelled: Arc::new(AtomicBool::new(false)),
            notify: Arc::new(Notify::new()),
        }
    }

    /// Sets the flag and wakes every task awaiting [`cancelled`](Self::cancelled).
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
        self.notify.notify_waiters();
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }

    /// Resolves immediately if already cancelled; otherwise waits.
    pub async fn cancelled(&self) {
        if self.is_cancelled() {
            return;
        }
        self.notify.notified().await;
    }

    /// Adapts this token to the plain `Fn() -> bool` closure expected by
    /// `waveforge_domain::services::ExecutionContext`, so plugin authors
    /// never depend on `tokio`.
    pub fn as_poll_fn(&self) -> Arc<dyn Fn() -> bool + Send + Sync> {
        let cancelled = self.cancelled.clone();
        Arc::new(move || cancelled.load(Ordering::SeqCst))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn cancelled_resolves_immediately_once_flag_is_set() {
        let token = CancellationToken::new();
        token.cancel();
        token.cancelled().await;
        assert!(token.is_cancelled());
    }

    #[tokio::test]
    async fn clones_observe_the_same_cancellation() {
        let token = CancellationToken::new();
        let clone = token.clone();
        clone.cancel();
        assert!(token.is_cancelled());
    }

    #[test]
    fn poll_fn_reflects_current_state() {
        let token = CancellationToken::new();
        let poll = token.as_poll_fn();
        assert!(!poll());
        token.cancel();
        assert!(poll());
    }
}
