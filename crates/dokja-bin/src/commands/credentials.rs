// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Credential tooling: secret generation and token minting.
//!
//! There is no admin web console; admin tokens come from `mint-token`
//! and go into the `Authorization: Bearer` header of moderation calls.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use ring::rand::{SecureRandom, SystemRandom};

use dokja_api::ApiConfig;
use dokja_auth::{Claims, SessionAuthenticator};

use crate::cli::{Cli, GenSecretArgs, MintTokenArgs};
use crate::error::{BinError, BinResult};

/// Minimum accepted secret length in bytes.
const MIN_SECRET_BYTES: usize = 32;

/// Generates a random session signing secret.
pub fn gen_secret(args: GenSecretArgs) -> BinResult<()> {
    if args.length < MIN_SECRET_BYTES {
        return Err(BinError::Credential(format!(
            "secret must be at least {MIN_SECRET_BYTES} bytes, got {}",
            args.length
        )));
    }

    let mut bytes = vec![0u8; args.length];
    SystemRandom::new()
        .fill(&mut bytes)
        .map_err(|_| BinError::Credential("system random source failed".to_string()))?;

    println!("{}", URL_SAFE_NO_PAD.encode(&bytes));
    Ok(())
}

/// Issues a signed session token using the configured secret.
pub fn mint_token(cli: &Cli, args: MintTokenArgs) -> BinResult<()> {
    let config = ApiConfig::load(&cli.config)
        .map_err(|e| BinError::Configuration(format!("{}: {}", cli.config.display(), e)))?;

    if config.auth.session_secret.is_empty() {
        return Err(BinError::Credential(
            "no session secret configured; set DOKJA_SESSION_SECRET or session_secret".to_string(),
        ));
    }
    if args.ttl <= 0 {
        return Err(BinError::Credential("ttl must be positive".to_string()));
    }

    let authenticator = SessionAuthenticator::new(config.auth.session_secret.as_bytes());

    let claims = if args.admin {
        Claims::admin(args.user_id, args.ttl)
    } else {
        Claims::new(args.user_id, args.ttl)
    };

    let token = authenticator.issue(&claims)?;
    println!("{token}");
    Ok(())
}

// =============================================================================
// Tests
// =============================================================================
