// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! # dokja-auth
//!
//! Session verification core for the dokja reading platform.
//!
//! This crate implements the pieces of the site that actually have
//! correctness requirements:
//!
//! - Compact token codec (three base64url segments joined by dots)
//! - HMAC-SHA-256 signature verification with constant-time comparison
//! - Session authentication with expiry and role checks
//! - Telegram login payload verification
//! - Per-principal fixed-window rate limiting
//!
//! The crate has no HTTP dependencies; mapping outcomes to status codes
//! is the caller's job (see `dokja-api`).

#![warn(missing_docs)]
#![deny(unsafe_code)]

pub mod authenticator;
pub mod claims;
pub mod codec;
pub mod error;
pub mod rate_limit;
pub mod signature;
pub mod telegram;

pub use authenticator::{AuthOutcome, SessionAuthenticator};
pub use claims::{Claims, Principal, ADMIN_ROLE};
pub use codec::RawToken;
pub use error::{AuthError, AuthResult};
pub use rate_limit::RateLimiter;
pub use telegram::{TelegramLogin, TelegramVerifier};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
