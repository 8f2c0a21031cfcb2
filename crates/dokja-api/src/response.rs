// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Typed API response bodies.

use serde::{Deserialize, Serialize};

use crate::store::Comment;

// =============================================================================
// Health
// =============================================================================

/// Health check response.
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Overall status.
    pub status: String,
    /// Version string.
    pub version: String,
}

impl HealthResponse {
    /// Creates a healthy response.
    pub fn healthy() -> Self {
        Self {
            status: "ok".to_string(),
            version: crate::VERSION.to_string(),
        }
    }
}

// =============================================================================
// Session
// =============================================================================

/// Response to a successful login.
///
/// The token also travels in the session cookie; it is returned in the
/// body so API clients that prefer the bearer header can pick it up.
#[derive(Debug, Serialize, Deserialize)]
pub struct SessionResponse {
    /// The signed session token.
    pub token: String,
    /// Token type (always "Bearer").
    pub token_type: String,
    /// Seconds until the token expires.
    pub expires_in: i64,
}

impl SessionResponse {
    /// Creates a new session response.
    pub fn new(token: String, expires_in: i64) -> Self {
        Self {
            token,
            token_type: "Bearer".to_string(),
            expires_in,
        }
    }
}

// =============================================================================
// Comments
// =============================================================================

/// A page of comments plus pagination metadata.
#[derive(Debug, Serialize, Deserialize)]
pub struct CommentListResponse {
    /// The comments on this page, newest first.
    pub comments: Vec<Comment>,
    /// Pagination metadata.
    pub meta: PageMeta,
}

/// Pagination metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageMeta {
    /// Total number of items.
    pub total: u64,
    /// Page number (1-indexed).
    pub page: u32,
    /// Items per page.
    pub per_page: u32,
    /// Total pages.
    pub total_pages: u32,
}

impl PageMeta {
    /// Creates pagination metadata.
    pub fn new(total: u64, page: u32, per_page: u32) -> Self {
        let total_pages = ((total as f64) / (per_page as f64)).ceil() as u32;
        Self {
            total,
            page,
            per_page,
            total_pages,
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
