// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! OAuth traffic classification
//!
//! Heuristic inspection of URL, headers, and body to tag a request as
//! token-exchange traffic. This is not a protocol parser: false positives
//! and negatives only affect log formatting, never request forwarding.

use serde::{Deserialize, Serialize};

/// Classification tag assigned to each request/response pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Classification {
    /// Ordinary application traffic
    Normal,
    /// OAuth/token-exchange traffic
    OAuth,
}

impl Classification {
    /// Check if this is OAuth-classified traffic
    pub fn is_oauth(&self) -> bool {
        matches!(self, Classification::OAuth)
    }
}

/// URL substrings associated with identity/token endpoints
const OAUTH_URL_MARKERS: &[&str] = &[
    "/oauth",
    "/token",
    "/auth",
    "/login",
    "login.microsoftonline.com",
    "accounts.google.com",
    "/v2.0/token",
    "/common/oauth2",
];

/// Parameter names typical of OAuth token exchanges
const OAUTH_BODY_MARKERS: &[&str] = &[
    "grant_type",
    "client_id",
    "client_secret",
    "access_token",
    "refresh_token",
    "authorization_code",
    "client_credentials",
];

/// Classify a request from its URL, headers, and body.
///
/// Decision order, first match wins:
/// 1. URL contains a known identity/token endpoint marker.
/// 2. An `Authorization` header value contains `bearer`.
/// 3. The body, stringified, contains an OAuth parameter name.
pub fn classify(url: &str, headers: &[(String, String)], body: Option<&[u8]>) -> Classification {
    let url_lower = url.to_lowercase();
    if OAUTH_URL_MARKERS.iter().any(|m| url_lower.contains(m)) {
        return Classification::OAuth;
    }

    for (name, value) in headers {
        if name.eq_ignore_ascii_case("authorization") && value.to_lowercase().contains("bearer") {
            return Classification::OAuth;
        }
    }

    if let Some(body) = body {
        let body_lower = String::from_utf8_lossy(body).to_lowercase();
        if OAUTH_BODY_MARKERS.iter().any(|m| body_lower.contains(m)) {
            return Classification::OAuth;
        }
    }

    Classification::Normal
}
