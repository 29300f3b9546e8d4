// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Logging interceptors
//!
//! An instrumented dispatcher wraps a stack's original entry point: it
//! snapshots and logs the request, times the forwarded call, logs the
//! response or error, and returns the original result untouched. All
//! per-call state is local to the call; the wrapper holds nothing mutable.

use std::sync::Arc;
use std::time::Instant;

use async_trait::async_trait;

use crate::error::Result;
use crate::http::{Request, Response};
use crate::logger::TrafficLogger;
use crate::record::{
    collapse_headers, next_request_id, BodyCapture, ErrorRecord, RequestRecord, ResponseRecord,
};
use crate::transport::Dispatch;

#[cfg(feature = "blocking")]
use crate::transport::BlockingDispatch;

/// Response bodies above this size are not captured for logging
pub const DEFAULT_MAX_CAPTURE_BYTES: usize = 1024 * 1024;

/// Capture a buffered response body for logging, best effort
fn capture_body(response: &Response, max_bytes: usize) -> BodyCapture {
    if response.body.len() > max_bytes {
        tracing::debug!(
            bytes = response.body.len(),
            limit = max_bytes,
            "response body exceeds capture limit"
        );
        BodyCapture::Unavailable(format!(
            "[body not captured: {} bytes exceeds {} byte capture limit]",
            response.body.len(),
            max_bytes
        ))
    } else {
        BodyCapture::Captured(response.body.clone())
    }
}

/// Build the response record for a completed call
fn response_record(
    request: &RequestRecord,
    response: &Response,
    elapsed_ms: f64,
    max_capture: usize,
) -> ResponseRecord {
    ResponseRecord {
        id: request.id.clone(),
        status: response.status.as_u16(),
        headers: collapse_headers(&response.headers),
        body: capture_body(response, max_capture),
        elapsed_ms,
        classification: request.classification,
    }
}

/// Interceptor around an async stack's dispatch entry point
pub struct InstrumentedDispatch {
    inner: Arc<dyn Dispatch>,
    logger: Arc<TrafficLogger>,
    max_capture_bytes: usize,
}

impl InstrumentedDispatch {
    /// Wrap an entry point with the given logger
    pub fn new(inner: Arc<dyn Dispatch>, logger: Arc<TrafficLogger>) -> Self {
        Self {
            inner,
            logger,
            max_capture_bytes: DEFAULT_MAX_CAPTURE_BYTES,
        }
    }

    /// Set the response body capture limit
    pub fn max_capture_bytes(mut self, max: usize) -> Self {
        self.max_capture_bytes = max;
        self
    }
}

#[async_trait]
impl Dispatch for InstrumentedDispatch {
    async fn dispatch(&self, request: Request) -> Result<Response> {
        let record = RequestRecord::from_request(next_request_id(), &request);
        self.logger.log_request(&record);

        let start = Instant::now();
        let result = self.inner.dispatch(request).await;
        let elapsed_ms = start.elapsed().as_secs_f64() * 1000.0;

        match result {
            Ok(response) => {
                self.logger.log_response(&response_record(
                    &record,
                    &response,
                    elapsed_ms,
                    self.max_capture_bytes,
                ));
                Ok(response)
            }
            Err(e) => {
                self.logger.log_error(&ErrorRecord {
                    id: record.id,
                    error: e.to_string(),
                    elapsed_ms,
                });
                Err(e)
            }
        }
    }
}

/// Interceptor around the blocking stack's dispatch entry point
#[cfg(feature = "blocking")]
pub struct InstrumentedBlockingDispatch {
    inner: Arc<dyn BlockingDispatch>,
    logger: Arc<TrafficLogger>,
    max_capture_bytes: usize,
}

#[cfg(feature = "blocking")]
impl InstrumentedBlockingDispatch {
    /// Wrap an entry point with the given logger
    pub fn new(inner: Arc<dyn BlockingDispatch>, logger: Arc<TrafficLogger>) -> Self {
        Self {
            inner,
            logger,
            max_capture_bytes: DEFAULT_MAX_CAPTURE_BYTES,
        }
    }
}

#[cfg(feature = "blocking")]
impl BlockingDispatch for InstrumentedBlockingDispatch {
    fn dispatch(&self, request: Request) -> Result<Response> {
        let record = RequestRecord::from_request(next_request_id(), &request);
        self.logger.log_request(&record);

        let start = Instant::now();
        let result = self.inner.dispatch(request);
        let elapsed_ms = start.elapsed().as_secs_f64() * 1000.0;

        match result {
            Ok(response) => {
                self.logger.log_response(&response_record(
                    &record,
                    &response,
                    elapsed_ms,
                    self.max_capture_bytes,
                ));
                Ok(response)
            }
            Err(e) => {
                self.logger.log_error(&ErrorRecord {
                    id: record.id,
                    error: e.to_string(),
                    elapsed_ms,
                });
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logger::SharedBuffer;
    use crate::transport::ClientDispatch;
    use wiremock::matchers::{body_string, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn instrumented(buffer: &SharedBuffer) -> InstrumentedDispatch {
        let logger = Arc::new(TrafficLogger::with_sink(Box::new(buffer.clone())));
        InstrumentedDispatch::new(Arc::new(ClientDispatch::new().unwrap()), logger)
    }

    #[tokio::test]
    async fn test_response_passes_through_unchanged() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/data"))
            .respond_with(
                ResponseTemplate::new(201)
                    .insert_header("x-custom", "marker")
                    .set_body_string("payload"),
            )
            .mount(&server)
            .await;

        let url = format!("{}/data", server.uri());

        let plain = ClientDispatch::new().unwrap();
        let bare = plain.dispatch(Request::get(&url).unwrap()).await.unwrap();

        let buffer = SharedBuffer::new();
        let wrapped = instrumented(&buffer);
        let logged = wrapped.dispatch(Request::get(&url).unwrap()).await.unwrap();

        assert_eq!(logged.status_code(), bare.status_code());
        assert_eq!(logged.bytes(), bare.bytes());
        assert_eq!(logged.header("x-custom"), bare.header("x-custom"));
    }

    #[tokio::test]
    async fn test_oauth_token_exchange_logging() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/common/oauth2/v2.0/token"))
            .and(header("authorization", "Basic abc123"))
            .and(body_string(
                "grant_type=client_credentials&client_id=abc&client_secret=xyz",
            ))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "access_token": "tok_value",
                "token_type": "Bearer",
            })))
            .mount(&server)
            .await;

        let buffer = SharedBuffer::new();
        let wrapped = instrumented(&buffer);
        let request = Request::post(format!("{}/common/oauth2/v2.0/token", server.uri()))
            .unwrap()
            .header("authorization", "Basic abc123")
            .form(&[
                ("grant_type", "client_credentials"),
                ("client_id", "abc"),
                ("client_secret", "xyz"),
            ]);

        let response = wrapped.dispatch(request).await.unwrap();
        assert_eq!(response.status_code(), 200);
        let value: serde_json::Value = response.json().unwrap();
        assert_eq!(value["access_token"], "tok_value");

        let out = buffer.contents();
        assert!(out.contains("=== OAUTH HTTP REQUEST ==="));
        assert!(out.contains("=== END OAUTH REQUEST ==="));
        assert!(out.contains("\"authorization\": \"[REDACTED]\""));
        assert!(!out.contains("Basic abc123"));
        // Body redaction is out of scope by default; the form body logs raw
        assert!(out.contains("grant_type=client_credentials&client_id=abc&client_secret=xyz"));
        assert!(out.contains("=== OAUTH HTTP RESPONSE ==="));
        assert!(out.contains("Status Code: 200"));
        assert!(out.contains("Response Time: "));
    }

    #[tokio::test]
    async fn test_transport_failure_logged_and_propagated() {
        let buffer = SharedBuffer::new();
        let wrapped = instrumented(&buffer);
        let request = Request::get("http://127.0.0.1:1/unreachable").unwrap();

        let result = wrapped.dispatch(request).await;
        assert!(matches!(result, Err(crate::error::Error::Http(_))));

        let out = buffer.contents();
        assert!(out.contains("=== HTTP Request Failed ==="));
        assert!(out.contains("Request ID: req_"));
        assert!(out.contains("Error: "));
        assert!(out.contains("Response Time: "));
        assert!(out.contains("=== End Error ==="));
    }

    #[tokio::test]
    async fn test_oversize_body_capture_skipped() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/big"))
            .respond_with(ResponseTemplate::new(200).set_body_string("x".repeat(64)))
            .mount(&server)
            .await;

        let buffer = SharedBuffer::new();
        let logger = Arc::new(TrafficLogger::with_sink(Box::new(buffer.clone())));
        let wrapped =
            InstrumentedDispatch::new(Arc::new(ClientDispatch::new().unwrap()), logger)
                .max_capture_bytes(16);

        let response = wrapped
            .dispatch(Request::get(format!("{}/big", server.uri())).unwrap())
            .await
            .unwrap();

        // Caller still sees the full body
        assert_eq!(response.body_len(), 64);
        let out = buffer.contents();
        assert!(out.contains("Body: [body not captured: 64 bytes exceeds 16 byte capture limit]"));
    }

    #[cfg(feature = "blocking")]
    #[tokio::test]
    async fn test_blocking_interceptor_passthrough() {
        use crate::transport::{BlockingClientDispatch, BlockingDispatch as _};

        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/sync"))
            .respond_with(ResponseTemplate::new(200).set_body_string("sync-ok"))
            .mount(&server)
            .await;

        let url = format!("{}/sync", server.uri());
        let buffer = SharedBuffer::new();
        let logger = Arc::new(TrafficLogger::with_sink(Box::new(buffer.clone())));

        let response = tokio::task::spawn_blocking(move || {
            let wrapped = InstrumentedBlockingDispatch::new(
                Arc::new(BlockingClientDispatch::new().unwrap()),
                logger,
            );
            wrapped.dispatch(Request::get(url).unwrap())
        })
        .await
        .unwrap()
        .unwrap();

        assert_eq!(response.status_code(), 200);
        assert_eq!(response.text().unwrap(), "sync-ok");
        let out = buffer.contents();
        assert!(out.contains("=== Outgoing HTTP Request ==="));
        assert!(out.contains("Status Code: 200"));
    }
}
