// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Telegram Login Widget payload verification.
//!
//! Telegram signs the widget callback with HMAC-SHA-256 where the key is
//! `SHA256(bot_token)` and the message is the `key=value` pairs of every
//! field except `hash`, sorted by key and joined with newlines. This
//! module checks that signature and the payload's freshness; on success
//! the fields feed a freshly issued session token.

use std::collections::BTreeMap;
use std::time::Duration;

use chrono::Utc;
use ring::{digest, hmac};
use serde::{Deserialize, Serialize};

use crate::error::{AuthError, AuthResult};

/// Default freshness bound for `auth_date`.
pub const DEFAULT_MAX_AGE: Duration = Duration::from_secs(86_400);

/// Tolerated forward clock skew, in seconds.
const MAX_CLOCK_SKEW_SECS: i64 = 60;

// =============================================================================
// TelegramLogin
// =============================================================================

/// Fields delivered by the Telegram login widget callback.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelegramLogin {
    /// Telegram user id.
    pub id: i64,

    /// When Telegram authenticated the user (Unix seconds).
    pub auth_date: i64,

    /// Hex-encoded HMAC-SHA-256 tag over the other fields.
    pub hash: String,

    /// User's first name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,

    /// User's last name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,

    /// Telegram username.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,

    /// Avatar URL.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
}

impl TelegramLogin {
    /// Builds the data-check string the hash covers: every present field
    /// except `hash`, as `key=value`, sorted by key, newline-joined.
    fn data_check_string(&self) -> String {
        let mut fields = BTreeMap::new();
        fields.insert("auth_date", self.auth_date.to_string());
        fields.insert("id", self.id.to_string());

        if let Some(v) = &self.first_name {
            fields.insert("first_name", v.clone());
        }
        if let Some(v) = &self.last_name {
            fields.insert("last_name", v.clone());
        }
        if let Some(v) = &self.username {
            fields.insert("username", v.clone());
        }
        if let Some(v) = &self.photo_url {
            fields.insert("photo_url", v.clone());
        }

        fields
            .iter()
            .map(|(key, value)| format!("{key}={value}"))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

// =============================================================================
// TelegramVerifier
// =============================================================================

/// Verifies Telegram login payloads against the bot token.
///
/// Like the session authenticator, an unset bot token fails closed: every
/// login attempt is rejected rather than waved through.
pub struct TelegramVerifier {
    key: Option<hmac::Key>,
    max_age: Duration,
}

impl TelegramVerifier {
    /// Creates a verifier for the given bot token.
    pub fn new(bot_token: &str) -> Self {
        let key = if bot_token.is_empty() {
            tracing::warn!("telegram bot token is empty; all logins will be rejected");
            None
        } else {
            let key_bytes = digest::digest(&digest::SHA256, bot_token.as_bytes());
            Some(hmac::Key::new(hmac::HMAC_SHA256, key_bytes.as_ref()))
        };

        Self {
            key,
            max_age: DEFAULT_MAX_AGE,
        }
    }

    /// Sets the freshness bound for `auth_date`.
    pub fn with_max_age(mut self, max_age: Duration) -> Self {
        self.max_age = max_age;
        self
    }

    /// Verifies a login payload's hash and freshness.
    pub fn verify(&self, login: &TelegramLogin) -> AuthResult<()> {
        self.verify_at(login, Utc::now().timestamp())
    }

    /// Clock-injected variant of [`Self::verify`].
    pub fn verify_at(&self, login: &TelegramLogin, now: i64) -> AuthResult<()> {
        let key = self.key.as_ref().ok_or(AuthError::MissingConfiguration)?;

        let tag = hex::decode(&login.hash).map_err(|_| AuthError::LoginRejected)?;
        hmac::verify(key, login.data_check_string().as_bytes(), &tag)
            .map_err(|_| AuthError::LoginRejected)?;

        let age = now.saturating_sub(login.auth_date);
        if age > self.max_age.as_secs() as i64 {
            return Err(AuthError::LoginExpired);
        }
        if login.auth_date > now + MAX_CLOCK_SKEW_SECS {
            return Err(AuthError::LoginExpired);
        }

        Ok(())
    }

    /// Signs a payload the way Telegram would.
    ///
    /// Only useful for tests and local tooling; production payloads are
    /// signed by Telegram itself.
    pub fn sign(&self, login: &mut TelegramLogin) -> AuthResult<()> {
        let key = self.key.as_ref().ok_or(AuthError::MissingConfiguration)?;
        let tag = hmac::sign(key, login.data_check_string().as_bytes());
        login.hash = hex::encode(tag.as_ref());
        Ok(())
    }
}

impl std::fmt::Debug for TelegramVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TelegramVerifier")
            .field("has_token", &self.key.is_some())
            .field("max_age", &self.max_age)
            .finish()
    }
}

// =============================================================================
// Tests
// =============================================================================
