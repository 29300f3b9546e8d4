// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Rendering helpers for log blocks
//!
//! Every function here is total: unparseable or non-UTF-8 input degrades to
//! a lossy raw string instead of failing the surrounding call.

use serde_json::{Map, Value};

use crate::sanitize::{is_sensitive_header, sanitize_headers, REDACTION_MARKER};

/// Render headers as a pretty JSON-style object, sanitized, order preserved
pub fn render_headers(headers: &[(String, String)]) -> String {
    let sanitized = sanitize_headers(headers);
    if sanitized.is_empty() {
        return "{}".to_string();
    }

    let mut out = String::from("{\n");
    for (i, (name, value)) in sanitized.iter().enumerate() {
        out.push_str("  ");
        out.push_str(&json_string(name));
        out.push_str(": ");
        out.push_str(&json_string(value));
        if i + 1 < sanitized.len() {
            out.push(',');
        }
        out.push('\n');
    }
    out.push('}');
    out
}

/// Render a body for logging.
///
/// JSON bodies pretty-print; URL-encoded OAuth form bodies render as raw
/// encoded text; everything else renders as a lossy raw string. With
/// `redact` set, OAuth-classified bodies have sensitive parameter values
/// masked in both JSON and form encodings.
pub fn render_body(body: &[u8], oauth: bool, redact: bool) -> String {
    if body.is_empty() {
        return "(empty)".to_string();
    }

    if let Ok(mut value) = serde_json::from_slice::<Value>(body) {
        if oauth && redact {
            value = redact_json(value);
        }
        return serde_json::to_string_pretty(&value)
            .unwrap_or_else(|_| String::from_utf8_lossy(body).into_owned());
    }

    let text = String::from_utf8_lossy(body).into_owned();
    if oauth && redact && looks_like_form(&text) {
        return redact_form(&text);
    }
    text
}

/// Recognize a URL-encoded token-exchange body
fn looks_like_form(text: &str) -> bool {
    text.contains("grant_type") || text.contains("client_id")
}

/// Mask sensitive parameter values in a URL-encoded form body
fn redact_form(text: &str) -> String {
    text.split('&')
        .map(|pair| match pair.split_once('=') {
            Some((key, _)) if is_sensitive_header(key) => {
                format!("{}={}", key, REDACTION_MARKER)
            }
            _ => pair.to_string(),
        })
        .collect::<Vec<_>>()
        .join("&")
}

/// Mask sensitive keys in a JSON body, recursively
fn redact_json(value: Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut out = Map::new();
            for (key, val) in map {
                if is_sensitive_header(&key) {
                    out.insert(key, Value::String(REDACTION_MARKER.to_string()));
                } else {
                    out.insert(key, redact_json(val));
                }
            }
            Value::Object(out)
        }
        Value::Array(arr) => Value::Array(arr.into_iter().map(redact_json).collect()),
        other => other,
    }
}

/// JSON-escape a string, falling back to a quoted raw copy
fn json_string(s: &str) -> String {
    serde_json::to_string(s).unwrap_or_else(|_| format!("\"{}\"", s))
}
