// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! # Authentication Integration Tests
//!
//! End-to-end tests of the verification core:
//!
//! - Token round trips and secret isolation
//! - Expiry and tamper detection
//! - Admin scope enforcement
//! - The collapse of every failure into one outcome
//! - Telegram login payload verification

use dokja_auth::{
    AuthOutcome, Claims, RawToken, SessionAuthenticator, TelegramVerifier,
};
use dokja_tests::common::fixtures;

// =============================================================================
// Round trips
// =============================================================================

#[test]
fn test_issue_verify_round_trip_preserves_identity() {
    let auth = fixtures::authenticator();
    let claims = Claims::new(7_654_321, 3600)
        .with_first_name("Mina")
        .with_username("mina_reads")
        .with_photo_url("https://t.me/i/userpic/320/mina.jpg");

    let token = auth.issue(&claims).unwrap();
    let principal = auth.authenticate(Some(&token)).principal().unwrap();

    assert_eq!(principal.id, 7_654_321);
    assert_eq!(principal.first_name.as_deref(), Some("Mina"));
    assert_eq!(principal.username.as_deref(), Some("mina_reads"));
    assert!(!principal.is_admin());
}

#[test]
fn test_token_has_three_base64url_segments() {
    let token = fixtures::user_token(1);
    let raw = RawToken::parse(&token).unwrap();

    assert!(!raw.header.is_empty());
    assert!(!raw.payload.is_empty());
    assert!(!raw.signature.is_empty());
    // The wire format never uses the standard alphabet or padding
    assert!(!token.contains('+'));
    assert!(!token.contains('/'));
    assert!(!token.contains('='));
}

#[test]
fn test_verification_with_different_secret_fails() {
    let token = fixtures::user_token(1);

    let other = SessionAuthenticator::new("a-different-secret-also-long-enough!");
    assert_eq!(other.authenticate(Some(&token)), AuthOutcome::Unauthenticated);
}

// =============================================================================
// Expiry and tampering
// =============================================================================

#[test]
fn test_expired_token_rejected() {
    let auth = fixtures::authenticator();
    let token = fixtures::expired_token(1);

    assert_eq!(auth.authenticate(Some(&token)), AuthOutcome::Unauthenticated);
}

#[test]
fn test_two_segment_token_rejected_without_panicking() {
    let auth = fixtures::authenticator();
    assert_eq!(auth.authenticate(Some("abc.def")), AuthOutcome::Unauthenticated);
}

#[test]
fn test_payload_tampering_detected() {
    let auth = fixtures::authenticator();
    let token = fixtures::user_token(42);
    let parts: Vec<&str> = token.split('.').collect();

    // Flip one character of the encoded payload
    let mut payload: Vec<u8> = parts[1].bytes().collect();
    payload[0] = if payload[0] == b'A' { b'B' } else { b'A' };
    let tampered = format!(
        "{}.{}.{}",
        parts[0],
        String::from_utf8(payload).unwrap(),
        parts[2]
    );

    assert_eq!(
        auth.authenticate(Some(&tampered)),
        AuthOutcome::Unauthenticated
    );
}

#[test]
fn test_signature_from_other_token_rejected() {
    let auth = fixtures::authenticator();
    let token_a = fixtures::user_token(1);
    let token_b = fixtures::user_token(2);

    let a: Vec<&str> = token_a.split('.').collect();
    let b: Vec<&str> = token_b.split('.').collect();
    let spliced = format!("{}.{}.{}", a[0], a[1], b[2]);

    assert_eq!(
        auth.authenticate(Some(&spliced)),
        AuthOutcome::Unauthenticated
    );
}

// =============================================================================
// Admin scope
// =============================================================================

#[test]
fn test_admin_scope_rejects_user_role() {
    let auth = fixtures::authenticator();
    let token = auth
        .issue(&Claims::new(1, 3600).with_role("user"))
        .unwrap();

    // The same token passes user-scoped verification...
    assert!(auth.authenticate(Some(&token)).is_authenticated());
    // ...and fails admin-scoped verification
    assert_eq!(
        auth.authenticate_admin(Some(&token)),
        AuthOutcome::Unauthenticated
    );
}

#[test]
fn test_admin_token_passes_both_scopes() {
    let auth = fixtures::authenticator();
    let token = fixtures::admin_token(9);

    assert!(auth.authenticate(Some(&token)).is_authenticated());
    let principal = auth.authenticate_admin(Some(&token)).principal().unwrap();
    assert!(principal.is_admin());
}

// =============================================================================
// Fail closed, collapse
// =============================================================================

#[test]
fn test_empty_secret_rejects_everything() {
    let closed = SessionAuthenticator::new("");
    let token = fixtures::user_token(1);

    assert_eq!(closed.authenticate(Some(&token)), AuthOutcome::Unauthenticated);
    assert_eq!(closed.authenticate(None), AuthOutcome::Unauthenticated);
    assert!(closed.issue(&Claims::new(1, 3600)).is_err());
}

#[test]
fn test_every_failure_is_the_same_outcome() {
    let auth = fixtures::authenticator();

    let failures = [
        auth.authenticate(None),
        auth.authenticate(Some("")),
        auth.authenticate(Some("only-one-segment")),
        auth.authenticate(Some("abc.def")),
        auth.authenticate(Some("a.b.c.d")),
        auth.authenticate(Some("!!!.???.###")),
        auth.authenticate(Some(&fixtures::expired_token(1))),
        auth.authenticate_admin(Some(&fixtures::user_token(1))),
    ];

    for outcome in failures {
        assert_eq!(outcome, AuthOutcome::Unauthenticated);
    }
}

// =============================================================================
// Telegram login
// =============================================================================

#[test]
fn test_telegram_payload_round_trip() {
    let verifier = TelegramVerifier::new(fixtures::TEST_BOT_TOKEN);
    let login = fixtures::telegram_payload(7_654_321, "mina_reads");

    assert!(verifier.verify(&login).is_ok());
}

#[test]
fn test_telegram_payload_tamper_rejected() {
    let verifier = TelegramVerifier::new(fixtures::TEST_BOT_TOKEN);
    let mut login = fixtures::telegram_payload(7_654_321, "mina_reads");
    login.id += 1;

    assert!(verifier.verify(&login).is_err());
}

#[test]
fn test_telegram_stale_payload_rejected() {
    let verifier = TelegramVerifier::new(fixtures::TEST_BOT_TOKEN);
    let mut login = fixtures::telegram_payload(7_654_321, "mina_reads");
    login.auth_date -= 2 * 86_400;
    TelegramVerifier::new(fixtures::TEST_BOT_TOKEN)
        .sign(&mut login)
        .unwrap();

    assert!(verifier.verify(&login).is_err());
}
