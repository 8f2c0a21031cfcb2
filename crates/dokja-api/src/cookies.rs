// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Session cookie helpers.
//!
//! The session token travels in an `HttpOnly` cookie for browser flows
//! and in the `Authorization` header for API clients; these helpers cover
//! the cookie side without pulling in a cookie-jar dependency.

use axum::http::header::{AUTHORIZATION, COOKIE};
use axum::http::HeaderMap;

/// Extracts a named cookie's value from the request headers.
///
/// Multiple `Cookie` headers and `;`-separated pairs are both handled;
/// the first match wins.
pub fn cookie_value(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| {
            let (key, value) = pair.trim().split_once('=')?;
            (key == name).then(|| value.to_string())
        })
        .next()
}

/// Extracts a bearer token from the `Authorization` header.
pub fn bearer_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer ").map(|s| s.to_string()))
}

/// Builds a `Set-Cookie` value for the session cookie.
///
/// `HttpOnly` keeps the token away from page scripts; `SameSite=Lax`
/// still allows the top-level navigation back from the Telegram widget.
pub fn format_session_cookie(name: &str, token: &str, max_age_secs: i64, secure: bool) -> String {
    let mut cookie = format!(
        "{}={}; Path=/; Max-Age={}; HttpOnly; SameSite=Lax",
        name, token, max_age_secs
    );
    if secure {
        cookie.push_str("; Secure");
    }
    cookie
}

/// Builds a `Set-Cookie` value that clears the session cookie.
pub fn format_clear_cookie(name: &str, secure: bool) -> String {
    format_session_cookie(name, "", 0, secure)
}

// =============================================================================
// Tests
// =============================================================================
