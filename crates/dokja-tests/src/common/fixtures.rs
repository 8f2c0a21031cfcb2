// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Test fixtures: secrets, tokens, routers, and request builders.

use axum::body::Body;
use axum::http::{header, Request, Response, StatusCode};
use axum::Router;
use chrono::Utc;

use dokja_api::{ApiConfig, ApiServer, AppState, AuthConfig};
use dokja_auth::{Claims, SessionAuthenticator, TelegramLogin, TelegramVerifier};

/// Session secret used across the integration suite.
pub const TEST_SECRET: &str = "integration-test-secret-with-plenty-of-bytes";

/// Bot token used for signing fake Telegram payloads.
pub const TEST_BOT_TOKEN: &str = "110201543:AAHdqTcvCH1vGWJxfSeofSAs0K5PALDsaw";

/// Creates an authenticator over [`TEST_SECRET`].
pub fn authenticator() -> SessionAuthenticator {
    SessionAuthenticator::new(TEST_SECRET)
}

/// Issues a user token for the given id.
pub fn user_token(user_id: i64) -> String {
    authenticator()
        .issue(&Claims::new(user_id, 3600))
        .expect("issue user token")
}

/// Issues an admin token for the given id.
pub fn admin_token(user_id: i64) -> String {
    authenticator()
        .issue(&Claims::admin(user_id, 3600))
        .expect("issue admin token")
}

/// Issues a token that expired long ago (signature still valid).
pub fn expired_token(user_id: i64) -> String {
    authenticator()
        .issue(&Claims::new(user_id, 3600).with_expiry(1))
        .expect("issue expired token")
}

/// Builds a signed Telegram login payload for the given user.
pub fn telegram_payload(user_id: i64, username: &str) -> TelegramLogin {
    let mut login = TelegramLogin {
        id: user_id,
        auth_date: Utc::now().timestamp(),
        hash: String::new(),
        first_name: None,
        last_name: None,
        username: Some(username.to_string()),
        photo_url: None,
    };
    TelegramVerifier::new(TEST_BOT_TOKEN)
        .sign(&mut login)
        .expect("sign telegram payload");
    login
}

/// Default test configuration: real secret, small rate limit window.
pub fn test_config() -> ApiConfig {
    let mut config = ApiConfig::default().with_auth(
        AuthConfig::new(TEST_SECRET)
            .with_bot_token(TEST_BOT_TOKEN),
    );
    config.auth.secure_cookies = false;
    config
}

/// Builds a router over a fresh in-memory state.
pub fn test_router() -> Router {
    router_with_config(test_config())
}

/// Builds a router from the given configuration.
pub fn router_with_config(config: ApiConfig) -> Router {
    let state = AppState::builder()
        .config(config)
        .build()
        .expect("build test state");
    ApiServer::new(state).router()
}

// =============================================================================
// Request builders
// =============================================================================

/// Builds a GET request.
pub fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .expect("build request")
}

/// Builds a request with a JSON body.
pub fn json_request(method: &str, uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .expect("build request")
}

/// Attaches a session cookie to a request.
pub fn with_session_cookie(mut request: Request<Body>, token: &str) -> Request<Body> {
    let value = format!("dokja_session={token}");
    request.headers_mut().insert(
        header::COOKIE,
        value.parse().expect("cookie header value"),
    );
    request
}

/// Attaches a bearer token to a request.
pub fn with_bearer(mut request: Request<Body>, token: &str) -> Request<Body> {
    let value = format!("Bearer {token}");
    request.headers_mut().insert(
        header::AUTHORIZATION,
        value.parse().expect("authorization header value"),
    );
    request
}

// =============================================================================
// Response helpers
// =============================================================================

/// Reads a response body as a JSON value.
pub async fn json_body(response: Response<Body>) -> serde_json::Value {
    use http_body_util::BodyExt;

    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("collect body")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("parse body as json")
}

/// Asserts a response is the uniform 401 and returns its body.
pub async fn assert_unauthenticated(response: Response<Body>) -> serde_json::Value {
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = json_body(response).await;
    assert!(body.get("error").is_some(), "401 body must carry an error field");
    body
}
