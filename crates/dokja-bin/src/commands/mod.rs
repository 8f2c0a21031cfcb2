// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! CLI command implementations.
//!
//! - `run`: Start the API server
//! - `validate`: Validate configuration file
//! - `version`: Show version information
//! - `gen-secret`: Generate a session signing secret
//! - `mint-token`: Issue a signed session token

mod credentials;
mod run;
mod validate;
mod version;

pub use credentials::{gen_secret, mint_token};
pub use run::run;
pub use validate::validate;
pub use version::version;

use crate::cli::{Cli, Commands};
use crate::error::BinResult;

/// Executes the appropriate command based on CLI arguments.
pub async fn execute(cli: Cli) -> BinResult<()> {
    match cli.effective_command() {
        Commands::Run(args) => run::run(&cli, args).await,
        Commands::Validate => validate::validate(&cli),
        Commands::Version => version::version(),
        Commands::GenSecret(args) => credentials::gen_secret(args),
        Commands::MintToken(args) => credentials::mint_token(&cli, args),
    }
}
