// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Error types for the verification core.
//!
//! Every variant here is an *internal* reason. The public authentication
//! boundary collapses all of them into a single `Unauthenticated` outcome
//! so that callers (and clients probing the API) cannot distinguish why a
//! token was rejected. The variants exist for logging and tests only.

use thiserror::Error;

/// Result type alias for core operations.
pub type AuthResult<T> = Result<T, AuthError>;

/// Reasons a token or login payload can be rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    /// No token was presented at all.
    #[error("no token presented")]
    NoToken,

    /// The token does not consist of exactly three non-empty segments.
    #[error("token is structurally malformed")]
    MalformedToken,

    /// A segment is not valid base64url.
    #[error("token segment is not valid base64url")]
    MalformedSegment,

    /// The header declares an algorithm other than HMAC-SHA-256.
    #[error("token header declares an unsupported algorithm")]
    UnsupportedAlgorithm,

    /// The payload is not a valid claims object.
    #[error("token claims are not valid")]
    MalformedClaims,

    /// The signature does not match the header and payload.
    #[error("token signature is invalid")]
    InvalidSignature,

    /// The token's expiry timestamp is in the past.
    #[error("token is expired")]
    Expired,

    /// Admin scope was required but the token carries no admin role.
    #[error("token lacks the required role")]
    InsufficientRole,

    /// No secret is configured; every check fails closed.
    #[error("no session secret is configured")]
    MissingConfiguration,

    /// Claims could not be serialized while issuing a token.
    #[error("failed to encode claims: {0}")]
    Encoding(String),

    /// A Telegram login payload failed hash verification.
    #[error("login payload failed verification")]
    LoginRejected,

    /// A Telegram login payload is older than the freshness bound.
    #[error("login payload is stale")]
    LoginExpired,
}
