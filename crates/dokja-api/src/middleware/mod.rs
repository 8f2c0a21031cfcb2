// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Middleware for the API server.
//!
//! - [`AuthLayer`]: session token verification (cookie or bearer)
//! - [`RateLimitLayer`]: per-principal write limiting

mod auth;
mod rate_limit;

pub use auth::{AuthLayer, AuthMiddleware, AuthSession};
pub use rate_limit::{RateLimitLayer, RateLimitMiddleware};
