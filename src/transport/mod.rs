// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Transport stacks and interception
//!
//! Every outgoing request flows through exactly one dispatch entry point
//! per stack ([`Dispatch`] for the async and pool stacks,
//! [`BlockingDispatch`] for the blocking stack). The entry point is held in
//! a swappable slot, which is where the instrumentation controller installs
//! and removes the logging interceptor.

mod dispatch;
mod instrumented;
mod stacks;

pub use dispatch::{ClientDispatch, Dispatch};
pub use instrumented::{InstrumentedDispatch, DEFAULT_MAX_CAPTURE_BYTES};
pub use stacks::{async_stack, pool_stack, AsyncTransport, StackKind};

#[cfg(feature = "blocking")]
pub use dispatch::{BlockingClientDispatch, BlockingDispatch};
#[cfg(feature = "blocking")]
pub use instrumented::InstrumentedBlockingDispatch;
#[cfg(feature = "blocking")]
pub use stacks::{blocking_stack, BlockingTransport};
