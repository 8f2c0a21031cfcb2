// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Session handlers: Telegram login, current user, logout.

use axum::{
    extract::State,
    http::header::SET_COOKIE,
    response::{AppendHeaders, IntoResponse},
    Json,
};

use dokja_auth::{AuthError, Claims, Principal, TelegramLogin};

use crate::cookies::{format_clear_cookie, format_session_cookie};
use crate::error::{ApiError, ApiResult};
use crate::extractors::Viewer;
use crate::response::SessionResponse;
use crate::state::AppState;

// =============================================================================
// Telegram login
// =============================================================================

/// POST /api/v1/auth/telegram
///
/// Verifies a Telegram login widget payload and issues a session token.
/// The token is set as the session cookie and returned in the body for
/// clients that prefer the bearer header.
///
/// A rejected payload gets the same uniform 401 as any other
/// authentication failure.
pub async fn telegram_login(
    State(state): State<AppState>,
    Json(login): Json<TelegramLogin>,
) -> ApiResult<impl IntoResponse> {
    state.telegram().verify(&login).map_err(|reason| {
        tracing::debug!(%reason, user_id = login.id, "telegram login rejected");
        ApiError::unauthenticated()
    })?;

    let auth = &state.config.auth;
    let mut claims = Claims::new(login.id, auth.session_ttl_secs);
    if let Some(name) = &login.first_name {
        claims = claims.with_first_name(name);
    }
    if let Some(username) = &login.username {
        claims = claims.with_username(username);
    }
    if let Some(url) = &login.photo_url {
        claims = claims.with_photo_url(url);
    }

    let token = state.auth().issue(&claims).map_err(|reason| match reason {
        AuthError::MissingConfiguration => ApiError::unauthenticated(),
        other => ApiError::internal(format!("failed to issue session token: {other}")),
    })?;

    tracing::info!(user_id = login.id, "user logged in via telegram");

    let cookie = format_session_cookie(
        &auth.cookie_name,
        &token,
        auth.session_ttl_secs,
        auth.secure_cookies,
    );

    Ok((
        AppendHeaders([(SET_COOKIE, cookie)]),
        Json(SessionResponse::new(token, auth.session_ttl_secs)),
    ))
}

// =============================================================================
// Current user
// =============================================================================

/// GET /api/v1/auth/me
///
/// Returns the authenticated principal.
pub async fn current_user(Viewer(principal): Viewer) -> Json<Principal> {
    Json(principal)
}

// =============================================================================
// Logout
// =============================================================================

/// POST /api/v1/auth/logout
///
/// Clears the session cookie. Tokens are not tracked server-side, so
/// there is nothing else to invalidate; the cookie simply goes away and
/// the token ages out at `exp`.
pub async fn logout(State(state): State<AppState>) -> impl IntoResponse {
    let auth = &state.config.auth;
    let cookie = format_clear_cookie(&auth.cookie_name, auth.secure_cookies);

    (
        AppendHeaders([(SET_COOKIE, cookie)]),
        Json(serde_json::json!({ "success": true })),
    )
}
