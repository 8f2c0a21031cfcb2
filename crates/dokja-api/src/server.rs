// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! API server implementation.

use std::time::Duration;

use axum::{
    extract::DefaultBodyLimit,
    http::{header, Method},
    routing::{delete, get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing::info;

use crate::config::ApiConfig;
use crate::error::{ApiError, ApiResult};
use crate::handlers;
use crate::middleware::{AuthLayer, RateLimitLayer};
use crate::state::AppState;

// =============================================================================
// ApiServer
// =============================================================================

/// The API server.
///
/// Entry point for building the router and running the HTTP server.
pub struct ApiServer {
    state: AppState,
}

impl ApiServer {
    /// Creates a new API server over the given state.
    pub fn new(state: AppState) -> Self {
        Self { state }
    }

    /// Creates the router with all routes and middleware.
    ///
    /// Layer order matters: the session auth layer wraps everything, so a
    /// request is authenticated (or marked anonymous) before the
    /// route-level rate limit layer decides whether a write may proceed.
    pub fn router(&self) -> Router {
        let config = &self.state.config;

        let session_auth = AuthLayer::new(
            self.state.authenticator.clone(),
            config.auth.cookie_name.clone(),
        );
        let admin_auth = AuthLayer::admin(self.state.authenticator.clone());
        let rate_limit = RateLimitLayer::new(self.state.rate_limiter.clone());

        // Comment writes are rate limited; the method check inside the
        // layer leaves the public GET untouched.
        let comment_routes = Router::new()
            .route(
                "/api/v1/chapters/{chapter_id}/comments",
                get(handlers::list_comments).post(handlers::create_comment),
            )
            .route(
                "/api/v1/comments/{comment_id}",
                delete(handlers::delete_comment),
            )
            .layer(rate_limit.clone());

        // Moderation: admin bearer tokens only
        let admin_routes = Router::new()
            .route(
                "/api/v1/admin/comments/{comment_id}",
                delete(handlers::admin_delete_comment),
            )
            .layer(ServiceBuilder::new().layer(admin_auth).layer(rate_limit));

        let middleware_stack = ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(CompressionLayer::new())
            .layer(TimeoutLayer::new(config.request_timeout))
            .layer(create_cors_layer(config))
            .layer(session_auth);

        Router::new()
            .route("/health", get(handlers::health))
            .route("/api/v1/auth/telegram", post(handlers::telegram_login))
            .route("/api/v1/auth/me", get(handlers::current_user))
            .route("/api/v1/auth/logout", post(handlers::logout))
            .merge(comment_routes)
            .merge(admin_routes)
            .layer(middleware_stack)
            .layer(DefaultBodyLimit::max(config.max_body_size))
            .with_state(self.state.clone())
    }

    /// Runs the server until the listener fails.
    pub async fn run(self) -> ApiResult<()> {
        let addr = self.state.config.socket_addr();
        let router = self.router();

        info!("starting API server on {}", addr);

        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .map_err(|e| ApiError::internal(format!("failed to bind {addr}: {e}")))?;

        axum::serve(listener, router)
            .await
            .map_err(|e| ApiError::internal(format!("server error: {e}")))?;

        Ok(())
    }

    /// Runs the server with graceful shutdown.
    pub async fn run_with_shutdown(
        self,
        shutdown_signal: impl std::future::Future<Output = ()> + Send + 'static,
    ) -> ApiResult<()> {
        let addr = self.state.config.socket_addr();
        let router = self.router();

        info!("starting API server on {}", addr);

        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .map_err(|e| ApiError::internal(format!("failed to bind {addr}: {e}")))?;

        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown_signal)
            .await
            .map_err(|e| ApiError::internal(format!("server error: {e}")))?;

        info!("API server shutdown complete");

        Ok(())
    }

    /// Returns the address the server will bind to.
    pub fn addr(&self) -> std::net::SocketAddr {
        self.state.config.socket_addr()
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Creates the CORS layer from configuration.
fn create_cors_layer(config: &ApiConfig) -> CorsLayer {
    let cors = &config.cors;

    let mut layer = CorsLayer::new().max_age(Duration::from_secs(cors.max_age));

    if cors.allowed_origins.contains(&"*".to_string()) {
        layer = layer.allow_origin(Any);
    } else {
        let origins: Vec<header::HeaderValue> = cors
            .allowed_origins
            .iter()
            .filter_map(|origin| origin.parse().ok())
            .collect();
        layer = layer.allow_origin(origins);
    }

    let methods: Vec<Method> = cors
        .allowed_methods
        .iter()
        .filter_map(|m| m.parse().ok())
        .collect();
    layer = layer.allow_methods(methods);

    layer = layer.allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE, header::ACCEPT]);

    if cors.allow_credentials {
        layer = layer.allow_credentials(true);
    }

    layer
}

// =============================================================================
// Tests
// =============================================================================
