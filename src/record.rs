// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Traffic records
//!
//! Immutable per-call records correlating a request with its response or
//! error through a process-unique identifier. Records exist only to be
//! rendered by the logger; they are never persisted or sent over the wire.

use std::sync::atomic::{AtomicU64, Ordering};

use bytes::Bytes;
use reqwest::header::HeaderMap;

use crate::classify::{classify, Classification};
use crate::http::Request;

/// Generate the next process-unique request identifier
pub fn next_request_id() -> String {
    static COUNTER: AtomicU64 = AtomicU64::new(1);
    format!("req_{}", COUNTER.fetch_add(1, Ordering::Relaxed))
}

/// Collapse a header map into an ordered list of name/value pairs.
///
/// Duplicate names collapse to the last-written value, keeping the
/// position of the first occurrence. Values that are not valid UTF-8
/// render as an empty string.
pub fn collapse_headers(headers: &HeaderMap) -> Vec<(String, String)> {
    let mut collapsed: Vec<(String, String)> = Vec::new();
    for (name, value) in headers.iter() {
        let name = name.to_string();
        let value = value.to_str().unwrap_or("").to_string();
        match collapsed.iter_mut().find(|(n, _)| *n == name) {
            Some(entry) => entry.1 = value,
            None => collapsed.push((name, value)),
        }
    }
    collapsed
}

/// Outgoing request snapshot, created at call entry
#[derive(Debug, Clone)]
pub struct RequestRecord {
    /// Request identifier, unique within the process run
    pub id: String,
    /// HTTP method
    pub method: String,
    /// Request URL
    pub url: String,
    /// Collapsed request headers
    pub headers: Vec<(String, String)>,
    /// Request body
    pub body: Option<Bytes>,
    /// Classification tag
    pub classification: Classification,
}

impl RequestRecord {
    /// Snapshot a request at call entry
    pub fn from_request(id: impl Into<String>, request: &Request) -> Self {
        let headers = collapse_headers(&request.headers);
        let url = request.url.to_string();
        let classification = classify(&url, &headers, request.body.as_deref());
        Self {
            id: id.into(),
            method: request.method.to_string(),
            url,
            headers,
            body: request.body.clone(),
            classification,
        }
    }
}

/// Best-effort capture of a response body for logging
#[derive(Debug, Clone)]
pub enum BodyCapture {
    /// Body bytes buffered for rendering
    Captured(Bytes),
    /// Capture skipped or failed; the string says why
    Unavailable(String),
}

/// Response snapshot, created at call completion
#[derive(Debug, Clone)]
pub struct ResponseRecord {
    /// Identifier of the originating request
    pub id: String,
    /// HTTP status code
    pub status: u16,
    /// Collapsed response headers
    pub headers: Vec<(String, String)>,
    /// Captured response body
    pub body: BodyCapture,
    /// Elapsed time in milliseconds, monotonic clock delta
    pub elapsed_ms: f64,
    /// Classification inherited from the request
    pub classification: Classification,
}

/// Record of a call that failed before a response was obtained
#[derive(Debug, Clone)]
pub struct ErrorRecord {
    /// Identifier of the originating request
    pub id: String,
    /// Error description
    pub error: String,
    /// Elapsed time in milliseconds
    pub elapsed_ms: f64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::header::{HeaderName, HeaderValue};
    use std::collections::HashSet;

    #[test]
    fn test_request_ids_unique() {
        let ids: HashSet<String> = (0..100).map(|_| next_request_id()).collect();
        assert_eq!(ids.len(), 100);
        assert!(ids.iter().all(|id| id.starts_with("req_")));
    }

    #[test]
    fn test_collapse_headers_last_write_wins() {
        let mut headers = HeaderMap::new();
        headers.append(
            HeaderName::from_static("x-trace"),
            HeaderValue::from_static("first"),
        );
        headers.append(
            HeaderName::from_static("accept"),
            HeaderValue::from_static("*/*"),
        );
        headers.append(
            HeaderName::from_static("x-trace"),
            HeaderValue::from_static("second"),
        );

        let collapsed = collapse_headers(&headers);
        assert_eq!(collapsed.len(), 2);
        assert_eq!(collapsed[0], ("x-trace".to_string(), "second".to_string()));
        assert_eq!(collapsed[1], ("accept".to_string(), "*/*".to_string()));
    }

    #[test]
    fn test_record_classifies_from_request() {
        let request = Request::post("https://login.example.com/oauth2/v2.0/token")
            .unwrap()
            .form(&[("grant_type", "client_credentials")]);
        let record = RequestRecord::from_request(next_request_id(), &request);
        assert!(record.classification.is_oauth());
        assert_eq!(record.method, "POST");
    }
}
