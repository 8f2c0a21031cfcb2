// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! # API Integration Tests
//!
//! Router-level tests of the HTTP surface:
//!
//! - 401/429 mapping with the uniform error body
//! - Cookie and bearer token carriers
//! - Telegram login flow
//! - Comment CRUD with rate limiting and moderation

use axum::http::{header, StatusCode};
use tower::ServiceExt;

use dokja_tests::common::fixtures::{
    self, admin_token, assert_unauthenticated, expired_token, get, json_body, json_request,
    test_router, user_token, with_bearer, with_session_cookie,
};

// =============================================================================
// Health
// =============================================================================

#[tokio::test]
async fn test_health_is_public() {
    let response = test_router().oneshot(get("/health")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["status"], "ok");
}

// =============================================================================
// Authentication surface
// =============================================================================

#[tokio::test]
async fn test_me_requires_authentication() {
    let response = test_router()
        .oneshot(get("/api/v1/auth/me"))
        .await
        .unwrap();
    assert_unauthenticated(response).await;
}

#[tokio::test]
async fn test_me_accepts_cookie_and_bearer() {
    let router = test_router();
    let token = user_token(42);

    let via_cookie = router
        .clone()
        .oneshot(with_session_cookie(get("/api/v1/auth/me"), &token))
        .await
        .unwrap();
    assert_eq!(via_cookie.status(), StatusCode::OK);
    assert_eq!(json_body(via_cookie).await["id"], 42);

    let via_bearer = router
        .oneshot(with_bearer(get("/api/v1/auth/me"), &token))
        .await
        .unwrap();
    assert_eq!(via_bearer.status(), StatusCode::OK);
    assert_eq!(json_body(via_bearer).await["id"], 42);
}

#[tokio::test]
async fn test_auth_failures_are_indistinguishable() {
    let router = test_router();

    // No token, garbage token, expired token, valid-signature-wrong-scope:
    // the rejection must be byte-identical for all of them
    let no_token = router.clone().oneshot(get("/api/v1/auth/me")).await.unwrap();
    let garbage = router
        .clone()
        .oneshot(with_bearer(get("/api/v1/auth/me"), "abc.def"))
        .await
        .unwrap();
    let expired = router
        .clone()
        .oneshot(with_bearer(get("/api/v1/auth/me"), &expired_token(1)))
        .await
        .unwrap();
    let wrong_scope = router
        .oneshot(with_bearer(
            json_request(
                "DELETE",
                "/api/v1/admin/comments/0192a1b2-0000-7000-8000-000000000000",
                serde_json::json!({}),
            ),
            &user_token(1),
        ))
        .await
        .unwrap();

    let bodies = [
        assert_unauthenticated(no_token).await,
        assert_unauthenticated(garbage).await,
        assert_unauthenticated(expired).await,
        assert_unauthenticated(wrong_scope).await,
    ];

    for body in &bodies[1..] {
        assert_eq!(body, &bodies[0]);
    }
}

// =============================================================================
// Telegram login flow
// =============================================================================

#[tokio::test]
async fn test_telegram_login_issues_session() {
    let router = test_router();
    let payload = fixtures::telegram_payload(7_654_321, "mina_reads");

    let response = router
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/v1/auth/telegram",
            serde_json::to_value(&payload).unwrap(),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let set_cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .expect("login must set the session cookie")
        .to_str()
        .unwrap()
        .to_string();
    assert!(set_cookie.starts_with("dokja_session="));
    assert!(set_cookie.contains("HttpOnly"));

    // The returned token works as a bearer credential
    let body = json_body(response).await;
    let token = body["token"].as_str().unwrap();

    let me = router
        .oneshot(with_bearer(get("/api/v1/auth/me"), token))
        .await
        .unwrap();
    assert_eq!(me.status(), StatusCode::OK);
    assert_eq!(json_body(me).await["id"], 7_654_321);
}

#[tokio::test]
async fn test_telegram_login_rejects_tampered_payload() {
    let mut payload = fixtures::telegram_payload(7_654_321, "mina_reads");
    payload.username = Some("impostor".to_string());

    let response = test_router()
        .oneshot(json_request(
            "POST",
            "/api/v1/auth/telegram",
            serde_json::to_value(&payload).unwrap(),
        ))
        .await
        .unwrap();

    assert_unauthenticated(response).await;
}

#[tokio::test]
async fn test_logout_clears_cookie() {
    let response = test_router()
        .oneshot(json_request(
            "POST",
            "/api/v1/auth/logout",
            serde_json::json!({}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let set_cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .unwrap()
        .to_str()
        .unwrap();
    assert!(set_cookie.contains("Max-Age=0"));
}

// =============================================================================
// Comments
// =============================================================================

#[tokio::test]
async fn test_comment_listing_is_public() {
    let response = test_router()
        .oneshot(get("/api/v1/chapters/12/comments"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["comments"].as_array().unwrap().len(), 0);
    assert_eq!(body["meta"]["total"], 0);
}

#[tokio::test]
async fn test_posting_requires_authentication() {
    let response = test_router()
        .oneshot(json_request(
            "POST",
            "/api/v1/chapters/12/comments",
            serde_json::json!({ "body": "재밌어요" }),
        ))
        .await
        .unwrap();

    assert_unauthenticated(response).await;
}

#[tokio::test]
async fn test_post_then_list_round_trip() {
    let router = test_router();
    let token = user_token(42);

    let response = router
        .clone()
        .oneshot(with_session_cookie(
            json_request(
                "POST",
                "/api/v1/chapters/12/comments",
                serde_json::json!({ "body": "이번 화 연출 미쳤다" }),
            ),
            &token,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let created = json_body(response).await;
    assert_eq!(created["author_id"], 42);

    let listing = router
        .oneshot(get("/api/v1/chapters/12/comments"))
        .await
        .unwrap();
    let body = json_body(listing).await;
    assert_eq!(body["meta"]["total"], 1);
    assert_eq!(body["comments"][0]["body"], "이번 화 연출 미쳤다");
}

#[tokio::test]
async fn test_empty_comment_rejected() {
    let response = test_router()
        .oneshot(with_session_cookie(
            json_request(
                "POST",
                "/api/v1/chapters/12/comments",
                serde_json::json!({ "body": "   " }),
            ),
            &user_token(1),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_sixth_write_in_window_is_rate_limited() {
    let router = test_router();
    let token = user_token(42);

    for attempt in 0..5 {
        let response = router
            .clone()
            .oneshot(with_session_cookie(
                json_request(
                    "POST",
                    "/api/v1/chapters/12/comments",
                    serde_json::json!({ "body": format!("comment {attempt}") }),
                ),
                &token,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED, "attempt {attempt}");
    }

    let response = router
        .clone()
        .oneshot(with_session_cookie(
            json_request(
                "POST",
                "/api/v1/chapters/12/comments",
                serde_json::json!({ "body": "one too many" }),
            ),
            &token,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
    assert!(response.headers().contains_key("Retry-After"));
    let body = json_body(response).await;
    assert!(body.get("error").is_some());

    // Another principal is unaffected
    let response = router
        .oneshot(with_session_cookie(
            json_request(
                "POST",
                "/api/v1/chapters/12/comments",
                serde_json::json!({ "body": "different reader" }),
            ),
            &user_token(43),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
}

#[tokio::test]
async fn test_reads_are_not_rate_limited() {
    let router = test_router();

    for _ in 0..20 {
        let response = router
            .clone()
            .oneshot(get("/api/v1/chapters/12/comments"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }
}

#[tokio::test]
async fn test_author_can_delete_own_comment_only() {
    let router = test_router();
    let author = user_token(42);
    let stranger = user_token(99);

    let created = router
        .clone()
        .oneshot(with_session_cookie(
            json_request(
                "POST",
                "/api/v1/chapters/12/comments",
                serde_json::json!({ "body": "지울 댓글" }),
            ),
            &author,
        ))
        .await
        .unwrap();
    let comment_id = json_body(created).await["id"].as_str().unwrap().to_string();

    // A different reader may not delete it
    let forbidden = router
        .clone()
        .oneshot(with_session_cookie(
            json_request(
                "DELETE",
                &format!("/api/v1/comments/{comment_id}"),
                serde_json::json!({}),
            ),
            &stranger,
        ))
        .await
        .unwrap();
    assert_eq!(forbidden.status(), StatusCode::FORBIDDEN);

    // The author may
    let deleted = router
        .clone()
        .oneshot(with_session_cookie(
            json_request(
                "DELETE",
                &format!("/api/v1/comments/{comment_id}"),
                serde_json::json!({}),
            ),
            &author,
        ))
        .await
        .unwrap();
    assert_eq!(deleted.status(), StatusCode::OK);

    let listing = router
        .oneshot(get("/api/v1/chapters/12/comments"))
        .await
        .unwrap();
    assert_eq!(json_body(listing).await["meta"]["total"], 0);
}

// =============================================================================
// Moderation
// =============================================================================

#[tokio::test]
async fn test_admin_can_remove_any_comment() {
    let router = test_router();

    let created = router
        .clone()
        .oneshot(with_session_cookie(
            json_request(
                "POST",
                "/api/v1/chapters/12/comments",
                serde_json::json!({ "body": "스포일러 포함" }),
            ),
            &user_token(42),
        ))
        .await
        .unwrap();
    let comment_id = json_body(created).await["id"].as_str().unwrap().to_string();

    // User token over the admin route: uniform 401
    let rejected = router
        .clone()
        .oneshot(with_bearer(
            json_request(
                "DELETE",
                &format!("/api/v1/admin/comments/{comment_id}"),
                serde_json::json!({}),
            ),
            &user_token(1),
        ))
        .await
        .unwrap();
    assert_unauthenticated(rejected).await;

    // Admin bearer token succeeds
    let removed = router
        .clone()
        .oneshot(with_bearer(
            json_request(
                "DELETE",
                &format!("/api/v1/admin/comments/{comment_id}"),
                serde_json::json!({}),
            ),
            &admin_token(1),
        ))
        .await
        .unwrap();
    assert_eq!(removed.status(), StatusCode::OK);

    let listing = router
        .oneshot(get("/api/v1/chapters/12/comments"))
        .await
        .unwrap();
    assert_eq!(json_body(listing).await["meta"]["total"], 0);
}

// =============================================================================
// Fail closed
// =============================================================================

#[tokio::test]
async fn test_unconfigured_secret_rejects_all_tokens() {
    let mut config = fixtures::test_config();
    config.auth.session_secret = String::new();
    let router = fixtures::router_with_config(config);

    // A token minted under the normal test secret is worthless here
    let response = router
        .oneshot(with_bearer(get("/api/v1/auth/me"), &user_token(1)))
        .await
        .unwrap();
    assert_unauthenticated(response).await;
}
