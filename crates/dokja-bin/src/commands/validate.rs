// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Implementation of the `validate` command.

use dokja_api::ApiConfig;

use crate::cli::Cli;
use crate::error::{BinError, BinResult};

/// Parses and validates the configuration file without starting the
/// server.
pub fn validate(cli: &Cli) -> BinResult<()> {
    let config = ApiConfig::load(&cli.config)
        .map_err(|e| BinError::Configuration(format!("{}: {}", cli.config.display(), e)))?;

    config
        .validate()
        .map_err(|e| BinError::Configuration(e.to_string()))?;

    println!("{}: OK", cli.config.display());
    println!("  listen: {}", config.socket_addr());
    println!("  cookie: {}", config.auth.cookie_name);
    println!(
        "  rate limit: {} actions / {}s",
        config.rate_limit.max_actions, config.rate_limit.window_secs
    );
    println!(
        "  session secret: {}",
        if config.auth.session_secret.is_empty() {
            "NOT SET (all logins and writes will be rejected)"
        } else {
            "set"
        }
    );
    println!(
        "  telegram bot token: {}",
        if config.auth.telegram_bot_token.is_empty() {
            "NOT SET (logins will be rejected)"
        } else {
            "set"
        }
    );

    Ok(())
}
