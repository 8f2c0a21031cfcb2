// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! # dokja-api
//!
//! HTTP API server for the dokja reading platform.
//!
//! This crate maps the verification core (`dokja-auth`) onto an axum
//! router: session middleware, per-principal rate limiting on writes,
//! Telegram login, and the comment endpoints the core protects.
//! Authentication failures are always 401 with an opaque body; rate
//! limiting is 429 with `Retry-After`.

#![warn(missing_docs)]
#![deny(unsafe_code)]

pub mod config;
pub mod cookies;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod response;
pub mod server;
pub mod state;
pub mod store;

pub use config::{ApiConfig, AuthConfig, CorsConfig, RateLimitConfig};
pub use error::{ApiError, ApiResult};
pub use middleware::{AuthLayer, AuthSession, RateLimitLayer};
pub use server::ApiServer;
pub use state::{AppState, AppStateBuilder};
pub use store::{Comment, CommentStore, MemoryCommentStore};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
