// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Session authentication middleware.
//!
//! Two modes over the same verification core:
//!
//! - **Session mode** (the default, applied to the whole router): reads
//!   the session cookie or a bearer token, verifies it, and attaches an
//!   [`AuthSession`] to the request. It never rejects — public reads go
//!   through as [`AuthSession::Anonymous`] and the extractors decide.
//! - **Admin mode** (applied to the admin subrouter): bearer token only,
//!   admin-scoped verification, and an immediate uniform 401 when the
//!   outcome is anything but an admin principal.
//!
//! Verification always completes before the inner service is called;
//! nothing downstream runs against an unchecked token.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use axum::{
    body::Body,
    http::Request,
    response::{IntoResponse, Response},
};
use tower::{Layer, Service};

use dokja_auth::{AuthOutcome, Principal, SessionAuthenticator};

use crate::cookies::{bearer_token, cookie_value};
use crate::error::ApiError;

// =============================================================================
// AuthSession
// =============================================================================

/// Authentication result attached to every request.
#[derive(Debug, Clone)]
pub enum AuthSession {
    /// A verified principal.
    Authenticated(Principal),
    /// No token, or a token that did not verify. Which of the two it was
    /// is not recorded here.
    Anonymous,
}

impl AuthSession {
    /// Returns the principal, if authenticated.
    pub fn principal(&self) -> Option<&Principal> {
        match self {
            AuthSession::Authenticated(principal) => Some(principal),
            AuthSession::Anonymous => None,
        }
    }
}

// =============================================================================
// AuthLayer
// =============================================================================

/// Layer wrapping services with session authentication.
#[derive(Clone)]
pub struct AuthLayer {
    authenticator: Arc<SessionAuthenticator>,
    cookie_name: Arc<String>,
    admin_only: bool,
}

impl AuthLayer {
    /// Creates the session-mode layer.
    pub fn new(authenticator: Arc<SessionAuthenticator>, cookie_name: impl Into<String>) -> Self {
        Self {
            authenticator,
            cookie_name: Arc::new(cookie_name.into()),
            admin_only: false,
        }
    }

    /// Creates the admin-mode layer (bearer only, rejects on failure).
    pub fn admin(authenticator: Arc<SessionAuthenticator>) -> Self {
        Self {
            authenticator,
            cookie_name: Arc::new(String::new()),
            admin_only: true,
        }
    }
}

impl<S> Layer<S> for AuthLayer {
    type Service = AuthMiddleware<S>;

    fn layer(&self, inner: S) -> Self::Service {
        AuthMiddleware {
            inner,
            authenticator: self.authenticator.clone(),
            cookie_name: self.cookie_name.clone(),
            admin_only: self.admin_only,
        }
    }
}

// =============================================================================
// AuthMiddleware
// =============================================================================

/// Middleware for session authentication.
#[derive(Clone)]
pub struct AuthMiddleware<S> {
    inner: S,
    authenticator: Arc<SessionAuthenticator>,
    cookie_name: Arc<String>,
    admin_only: bool,
}

impl<S> Service<Request<Body>> for AuthMiddleware<S>
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

    fn call(&mut self, mut req: Request<Body>) -> Self::Future {
        let authenticator = self.authenticator.clone();
        let cookie_name = self.cookie_name.clone();
        let admin_only = self.admin_only;
        let mut inner = self.inner.clone();

        Box::pin(async move {
            let outcome = if admin_only {
                let token = bearer_token(req.headers());
                authenticator.authenticate_admin(token.as_deref())
            } else {
                let token = cookie_value(req.headers(), &cookie_name)
                    .or_else(|| bearer_token(req.headers()));
                authenticator.authenticate(token.as_deref())
            };

            match outcome {
                AuthOutcome::Authenticated(principal) => {
                    req.extensions_mut()
                        .insert(AuthSession::Authenticated(principal));
                }
                AuthOutcome::Unauthenticated if admin_only => {
                    return Ok(ApiError::unauthenticated().into_response());
                }
                AuthOutcome::Unauthenticated => {
                    req.extensions_mut().insert(AuthSession::Anonymous);
                }
            }

            inner.call(req).await
        })
    }
}

// =============================================================================
// Tests
// =============================================================================
