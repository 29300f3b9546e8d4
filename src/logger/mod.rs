// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Structured traffic logging
//!
//! Renders request/response/error records as delimited, human-readable
//! blocks on a line-oriented sink. Banner lines and field labels are stable
//! strings so operators can grep them reliably; OAuth-classified traffic
//! gets visually distinct banners.
//!
//! The logger is fault-isolated by construction: blocks are formatted into
//! a `String` (infallible) and sink write errors are discarded, so a
//! logging failure can never change the behavior of an instrumented call.

mod render;

use std::fmt::Write as _;
use std::io::{self, Write};
use std::sync::Arc;

use parking_lot::Mutex;

use crate::record::{BodyCapture, ErrorRecord, RequestRecord, ResponseRecord};
use render::{render_body, render_headers};

/// Structured logger for HTTP traffic records
pub struct TrafficLogger {
    sink: Mutex<Box<dyn Write + Send>>,
    redact_oauth_bodies: bool,
}

impl TrafficLogger {
    /// Create a logger writing to the process diagnostic stream (stderr)
    pub fn new() -> Self {
        Self::with_sink(Box::new(io::stderr()))
    }

    /// Create a logger writing to a custom sink
    pub fn with_sink(sink: Box<dyn Write + Send>) -> Self {
        Self {
            sink: Mutex::new(sink),
            redact_oauth_bodies: false,
        }
    }

    /// Mask sensitive parameter values in OAuth-classified bodies.
    ///
    /// Off by default: header values are always redacted, but body content
    /// is rendered as sent, which means OAuth client secrets in transit
    /// appear in the log. Enable this to close that gap.
    pub fn redact_oauth_bodies(mut self, redact: bool) -> Self {
        self.redact_oauth_bodies = redact;
        self
    }

    /// Log an outgoing request
    pub fn log_request(&self, record: &RequestRecord) {
        let oauth = record.classification.is_oauth();
        let mut block = String::new();
        if oauth {
            let _ = writeln!(block, "=== OAUTH HTTP REQUEST ===");
        } else {
            let _ = writeln!(block, "=== Outgoing HTTP Request ===");
        }
        let _ = writeln!(block, "Request ID: {}", record.id);
        let _ = writeln!(block, "Method: {}", record.method);
        let _ = writeln!(block, "URL: {}", record.url);
        let _ = writeln!(block, "Headers: {}", render_headers(&record.headers));
        match record.body.as_deref() {
            Some(body) => {
                let _ = writeln!(
                    block,
                    "Body: {}",
                    render_body(body, oauth, self.redact_oauth_bodies)
                );
            }
            None => {
                let _ = writeln!(block, "Body: (empty)");
            }
        }
        if oauth {
            let _ = writeln!(block, "=== END OAUTH REQUEST ===");
        } else {
            let _ = writeln!(block, "=== End Request ===");
        }
        self.emit(&block);
    }

    /// Log a completed response
    pub fn log_response(&self, record: &ResponseRecord) {
        let oauth = record.classification.is_oauth();
        let mut block = String::new();
        if oauth {
            let _ = writeln!(block, "=== OAUTH HTTP RESPONSE ===");
        } else {
            let _ = writeln!(block, "=== HTTP Response ===");
        }
        let _ = writeln!(block, "Request ID: {}", record.id);
        let _ = writeln!(block, "Status Code: {}", record.status);
        let _ = writeln!(block, "Response Time: {:.2}ms", record.elapsed_ms);
        let _ = writeln!(block, "Headers: {}", render_headers(&record.headers));
        match &record.body {
            BodyCapture::Captured(body) => {
                let _ = writeln!(
                    block,
                    "Body: {}",
                    render_body(body, oauth, self.redact_oauth_bodies)
                );
            }
            BodyCapture::Unavailable(reason) => {
                let _ = writeln!(block, "Body: {}", reason);
            }
        }
        if oauth {
            let _ = writeln!(block, "=== END OAUTH RESPONSE ===");
        } else {
            let _ = writeln!(block, "=== End Response ===");
        }
        self.emit(&block);
    }

    /// Log a call that failed before a response was obtained
    pub fn log_error(&self, record: &ErrorRecord) {
        let mut block = String::new();
        let _ = writeln!(block, "=== HTTP Request Failed ===");
        let _ = writeln!(block, "Request ID: {}", record.id);
        let _ = writeln!(block, "Error: {}", record.error);
        let _ = writeln!(block, "Response Time: {:.2}ms", record.elapsed_ms);
        let _ = writeln!(block, "=== End Error ===");
        self.emit(&block);
    }

    /// Write one block to the sink; write failures are ignored
    fn emit(&self, block: &str) {
        let mut sink = self.sink.lock();
        let _ = sink.write_all(block.as_bytes());
        let _ = sink.flush();
    }
}

impl Default for TrafficLogger {
    fn default() -> Self {
        Self::new()
    }
}

/// In-memory sink that can be inspected after logging.
///
/// Cloning shares the underlying buffer, so a clone handed to
/// [`TrafficLogger::with_sink`] stays readable from the original.
#[derive(Clone, Default)]
pub struct SharedBuffer {
    inner: Arc<Mutex<Vec<u8>>>,
}

impl SharedBuffer {
    /// Create an empty buffer
    pub fn new() -> Self {
        Self::default()
    }

    /// Current buffer contents, lossily decoded
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.inner.lock()).into_owned()
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.inner.lock().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
