// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! # httptap - Transparent HTTP Traffic Instrumentation
//!
//! Intercepts every outgoing HTTP request and response issued through its
//! transport stacks and emits structured, redacted diagnostic log blocks,
//! with distinct banners for OAuth/token-exchange traffic. Callers observe
//! byte-identical request/response/error semantics with or without
//! instrumentation.
//!
//! ## Features
//!
//! - Three transport stacks: async, connection-pool, blocking
//! - Process-wide `enable()` / `disable()`, idempotent and reversible
//! - Sensitive header redaction before anything is logged
//! - OAuth traffic classification with grep-friendly banners
//! - Buffered response bodies: logging never consumes a stream
//! - Fault-isolated logging: a render or sink failure never fails a call
//!
//! ## Example
//!
//! ```rust,no_run
//! use httptap::{instrument, transport};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     instrument::enable();
//!
//!     let response = transport::async_stack()
//!         .get("https://example.com/api/messages")
//!         .await?;
//!     println!("{}", response.status_code());
//!
//!     instrument::disable();
//!     Ok(())
//! }
//! ```

pub mod classify;
pub mod error;
pub mod http;
pub mod instrument;
pub mod logger;
pub mod record;
pub mod sanitize;
pub mod transport;

// Re-exports for convenience

// Activation API
pub use instrument::{disable, enable, enable_with, is_enabled};

// Errors
pub use error::{Error, Result};

// HTTP model
pub use http::{Request, Response};

// Records and classification
pub use classify::{classify, Classification};
pub use record::{BodyCapture, ErrorRecord, RequestRecord, ResponseRecord};

// Logging
pub use logger::{SharedBuffer, TrafficLogger};

// Sanitization
pub use sanitize::{sanitize_headers, REDACTION_MARKER};

// Transports
pub use transport::{async_stack, pool_stack, AsyncTransport, StackKind};
#[cfg(feature = "blocking")]
pub use transport::{blocking_stack, BlockingTransport};

/// httptap version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
