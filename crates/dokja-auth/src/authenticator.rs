// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Session authentication.
//!
//! The authenticator ties the codec and the signature verifier together
//! and applies the trust policy: expiry, role scope, fail-closed secrets.
//!
//! Every failure collapses to [`AuthOutcome::Unauthenticated`] at the
//! public boundary. Whether a token was missing, malformed, forged,
//! expired, or merely under-privileged is logged at debug level and is
//! otherwise unobservable, so the API cannot be used as a validity oracle.

use chrono::Utc;

use crate::claims::{Claims, Principal, ADMIN_ROLE};
use crate::codec::{decode_segment, encode_segment, RawToken, TokenHeader};
use crate::error::{AuthError, AuthResult};
use crate::signature;

// =============================================================================
// AuthOutcome
// =============================================================================

/// The result of an authentication attempt.
///
/// Two terminal states, nothing in between: each call is independent and
/// no session object survives it besides the token itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthOutcome {
    /// The token verified; here is who presented it.
    Authenticated(Principal),
    /// The token did not verify. No reason is disclosed.
    Unauthenticated,
}

impl AuthOutcome {
    /// Returns `true` for the authenticated variant.
    pub fn is_authenticated(&self) -> bool {
        matches!(self, AuthOutcome::Authenticated(_))
    }

    /// Consumes the outcome, yielding the principal if authenticated.
    pub fn principal(self) -> Option<Principal> {
        match self {
            AuthOutcome::Authenticated(principal) => Some(principal),
            AuthOutcome::Unauthenticated => None,
        }
    }
}

// =============================================================================
// Verification scope
// =============================================================================

/// How much privilege a verification call demands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AuthScope {
    /// Any valid session token.
    User,
    /// A valid session token whose claims carry `role == "admin"`.
    Admin,
}

// =============================================================================
// SessionAuthenticator
// =============================================================================

/// Verifies session tokens against a single shared secret.
///
/// An empty secret is accepted at construction but makes every
/// verification fail closed; a site misconfigured without a secret must
/// never degrade into trusting unverified tokens.
#[derive(Clone)]
pub struct SessionAuthenticator {
    secret: Vec<u8>,
}

impl SessionAuthenticator {
    /// Creates an authenticator over the given shared secret.
    pub fn new(secret: impl Into<Vec<u8>>) -> Self {
        let secret = secret.into();
        if secret.is_empty() {
            tracing::warn!("session secret is empty; all tokens will be rejected");
        } else if secret.len() < 32 {
            tracing::warn!("session secret is shorter than recommended (32 bytes)");
        }

        Self { secret }
    }

    /// Returns `true` if a non-empty secret is configured.
    pub fn has_secret(&self) -> bool {
        !self.secret.is_empty()
    }

    /// Encodes and signs a token for the given claims.
    pub fn issue(&self, claims: &Claims) -> AuthResult<String> {
        if self.secret.is_empty() {
            return Err(AuthError::MissingConfiguration);
        }

        let header = serde_json::to_vec(&TokenHeader::hs256())
            .map_err(|e| AuthError::Encoding(e.to_string()))?;
        let payload =
            serde_json::to_vec(claims).map_err(|e| AuthError::Encoding(e.to_string()))?;

        let signing_input = format!("{}.{}", encode_segment(&header), encode_segment(&payload));
        let tag = signature::sign(&signing_input, &self.secret);

        Ok(format!("{}.{}", signing_input, encode_segment(&tag)))
    }

    /// Authenticates an end-user token.
    pub fn authenticate(&self, raw_token: Option<&str>) -> AuthOutcome {
        self.check(raw_token, AuthScope::User)
    }

    /// Authenticates an admin token: same verification plus a role check.
    pub fn authenticate_admin(&self, raw_token: Option<&str>) -> AuthOutcome {
        self.check(raw_token, AuthScope::Admin)
    }

    fn check(&self, raw_token: Option<&str>, scope: AuthScope) -> AuthOutcome {
        match self.verify(raw_token, scope) {
            Ok(principal) => AuthOutcome::Authenticated(principal),
            Err(reason) => {
                tracing::debug!(%reason, "session token rejected");
                AuthOutcome::Unauthenticated
            }
        }
    }

    /// Full verification pipeline, carrying the specific rejection reason.
    ///
    /// The reason never crosses the public boundary; see [`Self::check`].
    fn verify(&self, raw_token: Option<&str>, scope: AuthScope) -> AuthResult<Principal> {
        let raw = raw_token.ok_or(AuthError::NoToken)?;
        if self.secret.is_empty() {
            return Err(AuthError::MissingConfiguration);
        }

        let token = RawToken::parse(raw)?;

        let header_bytes = decode_segment(&token.header)?;
        let header: TokenHeader =
            serde_json::from_slice(&header_bytes).map_err(|_| AuthError::MalformedToken)?;
        if !header.is_supported() {
            return Err(AuthError::UnsupportedAlgorithm);
        }

        let tag = decode_segment(&token.signature)?;
        if !signature::verify(&token.signing_input(), &tag, &self.secret) {
            return Err(AuthError::InvalidSignature);
        }

        let payload = decode_segment(&token.payload)?;
        let claims: Claims =
            serde_json::from_slice(&payload).map_err(|_| AuthError::MalformedClaims)?;

        if claims.exp < Utc::now().timestamp() {
            return Err(AuthError::Expired);
        }

        if scope == AuthScope::Admin && claims.role.as_deref() != Some(ADMIN_ROLE) {
            return Err(AuthError::InsufficientRole);
        }

        Ok(Principal::from_claims(&claims))
    }
}

impl std::fmt::Debug for SessionAuthenticator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionAuthenticator")
            .field("has_secret", &self.has_secret())
            .finish()
    }
}

// =============================================================================
// Tests
// =============================================================================
