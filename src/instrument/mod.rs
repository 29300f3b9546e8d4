// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Process-wide instrumentation controller
//!
//! `enable()` swaps a logging interceptor into every transport stack's
//! dispatch slot, keeping the original entry point so `disable()` can
//! restore it. A stored original being `Some` is the one source of truth
//! for "this stack is patched": enabling twice never overwrites the true
//! original, and disabling without enabling is a no-op.

use std::sync::Arc;

use lazy_static::lazy_static;
use parking_lot::Mutex;

use crate::logger::TrafficLogger;
use crate::transport::{self, Dispatch, InstrumentedDispatch};

#[cfg(feature = "blocking")]
use crate::transport::{BlockingDispatch, InstrumentedBlockingDispatch};

/// Stored original entry points, one slot per stack.
/// Invariant: `Some` if and only if that stack is currently patched.
#[derive(Default)]
struct StoredOriginals {
    async_stack: Option<Arc<dyn Dispatch>>,
    pool_stack: Option<Arc<dyn Dispatch>>,
    #[cfg(feature = "blocking")]
    blocking_stack: Option<Arc<dyn BlockingDispatch>>,
}

/// Process-scoped patch bookkeeping
pub struct InstrumentationState {
    originals: Mutex<StoredOriginals>,
}

lazy_static! {
    static ref STATE: InstrumentationState = InstrumentationState {
        originals: Mutex::new(StoredOriginals::default()),
    };
}

/// Enable instrumentation on every transport stack with a logger writing
/// to the process diagnostic stream. Idempotent.
pub fn enable() {
    enable_with(TrafficLogger::new());
}

/// Enable instrumentation with a custom logger.
///
/// Stacks that are already instrumented are left untouched; their stored
/// original (and the logger installed with it) is never overwritten.
pub fn enable_with(logger: TrafficLogger) {
    let logger = Arc::new(logger);
    let mut originals = STATE.originals.lock();
    let mut installed = 0usize;

    if originals.async_stack.is_none() {
        let stack = transport::async_stack();
        let original = stack.current();
        stack.install(Arc::new(InstrumentedDispatch::new(
            Arc::clone(&original),
            Arc::clone(&logger),
        )));
        originals.async_stack = Some(original);
        installed += 1;
    }

    if originals.pool_stack.is_none() {
        let stack = transport::pool_stack();
        let original = stack.current();
        stack.install(Arc::new(InstrumentedDispatch::new(
            Arc::clone(&original),
            Arc::clone(&logger),
        )));
        originals.pool_stack = Some(original);
        installed += 1;
    }

    #[cfg(feature = "blocking")]
    if originals.blocking_stack.is_none() {
        let stack = transport::blocking_stack();
        let original = stack.current();
        stack.install(Arc::new(InstrumentedBlockingDispatch::new(
            Arc::clone(&original),
            Arc::clone(&logger),
        )));
        originals.blocking_stack = Some(original);
        installed += 1;
    }

    if installed > 0 {
        tracing::info!(stacks = installed, "HTTP request/response instrumentation enabled");
    }
}

/// Restore every stack's original entry point. Idempotent; a no-op
/// without a prior `enable()`.
pub fn disable() {
    let mut originals = STATE.originals.lock();
    let mut restored = 0usize;

    if let Some(original) = originals.async_stack.take() {
        transport::async_stack().install(original);
        restored += 1;
    }
    if let Some(original) = originals.pool_stack.take() {
        transport::pool_stack().install(original);
        restored += 1;
    }
    #[cfg(feature = "blocking")]
    if let Some(original) = originals.blocking_stack.take() {
        transport::blocking_stack().install(original);
        restored += 1;
    }

    if restored > 0 {
        tracing::info!(stacks = restored, "HTTP request/response instrumentation disabled");
    }
}

/// Check whether instrumentation is currently active
pub fn is_enabled() -> bool {
    STATE.originals.lock().async_stack.is_some()
}
