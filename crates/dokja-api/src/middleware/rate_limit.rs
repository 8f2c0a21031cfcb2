// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Per-principal write limiting middleware.
//!
//! Applies to mutating methods only. The layer sits inside the auth
//! layer, so by the time it runs the request already carries its
//! [`AuthSession`]: authentication completes before the limiter is
//! consulted, and the limiter is consulted before any mutating handler
//! executes. Anonymous mutating requests pass through uncharged; the
//! handler's extractor rejects them with 401.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use axum::{
    body::Body,
    http::{Method, Request},
    response::{IntoResponse, Response},
};
use tower::{Layer, Service};

use dokja_auth::RateLimiter;

use crate::error::ApiError;
use crate::middleware::AuthSession;

// =============================================================================
// RateLimitLayer
// =============================================================================

/// Layer wrapping services with per-principal write limiting.
#[derive(Clone)]
pub struct RateLimitLayer {
    limiter: Arc<RateLimiter>,
}

impl RateLimitLayer {
    /// Creates a rate limit layer sharing the given limiter.
    pub fn new(limiter: Arc<RateLimiter>) -> Self {
        Self { limiter }
    }
}

impl<S> Layer<S> for RateLimitLayer {
    type Service = RateLimitMiddleware<S>;

    fn layer(&self, inner: S) -> Self::Service {
        RateLimitMiddleware {
            inner,
            limiter: self.limiter.clone(),
        }
    }
}

// =============================================================================
// RateLimitMiddleware
// =============================================================================

/// Middleware for per-principal write limiting.
#[derive(Clone)]
pub struct RateLimitMiddleware<S> {
    inner: S,
    limiter: Arc<RateLimiter>,
}

fn is_mutating(method: &Method) -> bool {
    matches!(
        *method,
        Method::POST | Method::PUT | Method::PATCH | Method::DELETE
    )
}

impl<S> Service<Request<Body>> for RateLimitMiddleware<S>
where
    S: Service<Request<Body>, Response = Response> + Clone + Send + 'static,
    S::Future: Send + 'static,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, req: Request<Body>) -> Self::Future {
        let limiter = self.limiter.clone();
        let mut inner = self.inner.clone();

        Box::pin(async move {
            if is_mutating(req.method()) {
                let principal_id = req
                    .extensions()
                    .get::<AuthSession>()
                    .and_then(|session| session.principal())
                    .map(|principal| principal.id);

                if let Some(principal_id) = principal_id {
                    if !limiter.allow(principal_id) {
                        let retry_after = limiter.retry_after(principal_id);
                        tracing::debug!(
                            principal_id,
                            retry_after = ?retry_after,
                            "write rejected by rate limiter"
                        );
                        return Ok(ApiError::rate_limited(retry_after).into_response());
                    }
                }
            }

            inner.call(req).await
        })
    }
}

// =============================================================================
// Tests
// =============================================================================
