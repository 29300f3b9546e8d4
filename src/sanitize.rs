// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Header sanitization
//!
//! Masks sensitive header values before anything reaches a log sink. Pure
//! function over its input; the sanitizer never touches request bodies
//! (see [`crate::logger`] for the OAuth body redaction option).

/// Placeholder substituted for any sensitive header value
pub const REDACTION_MARKER: &str = "[REDACTED]";

/// Headers whose lower-cased name is redacted on exact match
const SENSITIVE_HEADERS: &[&str] = &[
    "auth",
    "authorization",
    "x-api-key",
    "x-auth-token",
    "cookie",
    "set-cookie",
    "x-csrf-token",
    "x-forwarded-for",
];

/// Name fragments that force redaction regardless of the fixed set
const SENSITIVE_FRAGMENTS: &[&str] = &["token", "secret", "password", "key"];

/// Check whether a header name is sensitive
pub fn is_sensitive_header(name: &str) -> bool {
    let lower = name.to_lowercase();
    SENSITIVE_HEADERS.contains(&lower.as_str())
        || SENSITIVE_FRAGMENTS.iter().any(|f| lower.contains(f))
}

/// Return a copy of the headers with sensitive values replaced by
/// [`REDACTION_MARKER`]. Non-matching entries pass through unchanged,
/// order preserved.
pub fn sanitize_headers(headers: &[(String, String)]) -> Vec<(String, String)> {
    headers
        .iter()
        .map(|(name, value)| {
            if is_sensitive_header(name) {
                (name.clone(), REDACTION_MARKER.to_string())
            } else {
                (name.clone(), value.clone())
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_fixed_set_redacted() {
        let out = sanitize_headers(&headers(&[
            ("Authorization", "Bearer abc123"),
            ("Cookie", "session=1"),
            ("X-Api-Key", "k"),
            ("X-Forwarded-For", "10.0.0.1"),
        ]));
        for (_, value) in &out {
            assert_eq!(value, REDACTION_MARKER);
        }
    }

    #[test]
    fn test_fragment_match_redacted() {
        let out = sanitize_headers(&headers(&[
            ("X-Refresh-Token", "abc"),
            ("My-Secret-Header", "abc"),
            ("Account-Password", "abc"),
            ("Subscription-Key", "abc"),
        ]));
        for (_, value) in &out {
            assert_eq!(value, REDACTION_MARKER);
        }
    }

    #[test]
    fn test_case_insensitive() {
        let out = sanitize_headers(&headers(&[("AUTHORIZATION", "x"), ("x-AUTH-token", "y")]));
        assert_eq!(out[0].1, REDACTION_MARKER);
        assert_eq!(out[1].1, REDACTION_MARKER);
    }

    #[test]
    fn test_passthrough_preserves_order_and_values() {
        let input = headers(&[
            ("Content-Type", "application/json"),
            ("Accept", "*/*"),
            ("User-Agent", "httptap"),
        ]);
        let out = sanitize_headers(&input);
        assert_eq!(out, input);
    }

    #[test]
    fn test_original_values_never_survive() {
        let out = sanitize_headers(&headers(&[("Authorization", "Basic abc123")]));
        assert!(!out.iter().any(|(_, v)| v.contains("abc123")));
    }

    #[test]
    fn test_no_side_effects() {
        let input = headers(&[("Cookie", "secret=1")]);
        let _ = sanitize_headers(&input);
        assert_eq!(input[0].1, "secret=1");
    }
}
