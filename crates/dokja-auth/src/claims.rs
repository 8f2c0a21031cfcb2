// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Token claims and the verified principal derived from them.

use chrono::Utc;
use serde::{Deserialize, Serialize};

/// Role string carried by administrative tokens.
pub const ADMIN_ROLE: &str = "admin";

// =============================================================================
// Claims
// =============================================================================

/// The structured data carried inside a token's payload segment.
///
/// `sub` is the numeric Telegram user id; display fields come straight
/// from the login widget payload and are optional. `exp` is always
/// compared against the wall clock at verification time, never cached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: the Telegram user id.
    pub sub: i64,

    /// Expiration time (Unix timestamp, seconds).
    pub exp: i64,

    /// Issued-at time (Unix timestamp, seconds).
    pub iat: i64,

    /// User's first name, as reported by Telegram.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,

    /// Telegram username (without the `@`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,

    /// Avatar URL.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,

    /// Role string; only `"admin"` carries meaning.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

impl Claims {
    /// Creates claims for a user, expiring `ttl_secs` from now.
    pub fn new(user_id: i64, ttl_secs: i64) -> Self {
        let now = Utc::now().timestamp();

        Self {
            sub: user_id,
            exp: now + ttl_secs,
            iat: now,
            first_name: None,
            username: None,
            photo_url: None,
            role: None,
        }
    }

    /// Creates admin claims, expiring `ttl_secs` from now.
    pub fn admin(user_id: i64, ttl_secs: i64) -> Self {
        Self::new(user_id, ttl_secs).with_role(ADMIN_ROLE)
    }

    /// Sets the role.
    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.role = Some(role.into());
        self
    }

    /// Sets the first name.
    pub fn with_first_name(mut self, name: impl Into<String>) -> Self {
        self.first_name = Some(name.into());
        self
    }

    /// Sets the username.
    pub fn with_username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    /// Sets the avatar URL.
    pub fn with_photo_url(mut self, url: impl Into<String>) -> Self {
        self.photo_url = Some(url.into());
        self
    }

    /// Sets an explicit expiry timestamp.
    pub fn with_expiry(mut self, exp: i64) -> Self {
        self.exp = exp;
        self
    }

    /// Returns `true` if the claims carry the admin role.
    pub fn is_admin(&self) -> bool {
        self.role.as_deref() == Some(ADMIN_ROLE)
    }

    /// Returns `true` if `exp` is in the past.
    pub fn is_expired(&self) -> bool {
        self.exp < Utc::now().timestamp()
    }
}

// =============================================================================
// Principal
// =============================================================================

/// The verified identity produced by successful authentication.
///
/// A `Principal` exists only as the output of verification; the core never
/// persists one. Downstream handlers may store associated records, but
/// that is their concern.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    /// Telegram user id.
    pub id: i64,
    /// Display name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    /// Telegram username.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    /// Avatar URL.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
    /// Role string, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

impl Principal {
    /// Builds a principal from verified claims.
    pub fn from_claims(claims: &Claims) -> Self {
        Self {
            id: claims.sub,
            first_name: claims.first_name.clone(),
            username: claims.username.clone(),
            photo_url: claims.photo_url.clone(),
            role: claims.role.clone(),
        }
    }

    /// Returns `true` if the principal holds the admin role.
    pub fn is_admin(&self) -> bool {
        self.role.as_deref() == Some(ADMIN_ROLE)
    }

    /// Returns the best display name available.
    pub fn display_name(&self) -> String {
        self.first_name
            .clone()
            .or_else(|| self.username.clone())
            .unwrap_or_else(|| format!("user-{}", self.id))
    }
}

// =============================================================================
// Tests
// =============================================================================
