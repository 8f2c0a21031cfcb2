// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! CLI argument parsing and command definitions.
//!
//! - `run`: Start the server (default)
//! - `validate`: Validate configuration file
//! - `version`: Show version information
//! - `gen-secret`: Generate a session signing secret
//! - `mint-token`: Issue a signed session token

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

// =============================================================================
// Main CLI Structure
// =============================================================================

/// dokja - reading platform backend
///
/// Serves the comment API behind Telegram login, session token
/// verification, and per-user write limiting.
#[derive(Parser, Debug)]
#[command(
    name = "dokja",
    author = "Sylvex <contact@sylvex.io>",
    version = crate::VERSION,
    about = "dokja reading platform backend",
    long_about = None,
    propagate_version = true
)]
pub struct Cli {
    /// Configuration file path
    #[arg(
        short,
        long,
        default_value = "dokja.yaml",
        env = "DOKJA_CONFIG",
        global = true
    )]
    pub config: PathBuf,

    /// Log level (trace, debug, info, warn, error)
    #[arg(
        short,
        long,
        default_value = "info",
        env = "DOKJA_LOG_LEVEL",
        global = true
    )]
    pub log_level: String,

    /// Log format (text, json, compact)
    #[arg(long, default_value = "text", env = "DOKJA_LOG_FORMAT", global = true)]
    pub log_format: LogFormat,

    /// Enable quiet mode (minimal output)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

// =============================================================================
// Subcommands
// =============================================================================

/// Available subcommands for the dokja CLI.
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Start the API server
    ///
    /// This is the default command when no subcommand is specified.
    Run(RunArgs),

    /// Validate the configuration file
    ///
    /// Parses and validates the configuration without starting the
    /// server. Useful for checking configuration before deployment.
    Validate,

    /// Show version information
    Version,

    /// Generate a session signing secret
    ///
    /// Produces a cryptographically random secret suitable for
    /// `session_secret` / `DOKJA_SESSION_SECRET`.
    #[command(name = "gen-secret")]
    GenSecret(GenSecretArgs),

    /// Issue a signed session token
    ///
    /// Signs a token with the configured secret, for moderation tooling
    /// and smoke tests. There is no admin web console; this is how admin
    /// credentials are produced.
    #[command(name = "mint-token")]
    MintToken(MintTokenArgs),
}

// =============================================================================
// Command Arguments
// =============================================================================

/// Arguments for the `run` command.
#[derive(Args, Debug, Default, Clone)]
pub struct RunArgs {
    /// Override the listen port
    #[arg(short, long, env = "DOKJA_PORT")]
    pub port: Option<u16>,
}

/// Arguments for the `gen-secret` command.
#[derive(Args, Debug, Default, Clone)]
pub struct GenSecretArgs {
    /// Secret length in bytes before encoding
    #[arg(long, default_value = "32")]
    pub length: usize,
}

/// Arguments for the `mint-token` command.
#[derive(Args, Debug, Clone)]
pub struct MintTokenArgs {
    /// Telegram user id to mint the token for
    #[arg(short, long)]
    pub user_id: i64,

    /// Mint an admin token
    #[arg(long)]
    pub admin: bool,

    /// Token lifetime in seconds
    #[arg(short, long, default_value = "3600")]
    pub ttl: i64,
}

// =============================================================================
// Enums
// =============================================================================

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum LogFormat {
    /// Human-readable text format
    #[default]
    Text,
    /// JSON format for structured logging
    Json,
    /// Compact format for minimal output
    Compact,
}

// =============================================================================
// Helper Methods
// =============================================================================

impl Cli {
    /// Parse CLI arguments from the command line.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Get the effective command, defaulting to `Run` if none specified.
    pub fn effective_command(&self) -> Commands {
        self.command
            .clone()
            .unwrap_or_else(|| Commands::Run(RunArgs::default()))
    }

    /// Get the effective log level based on flags.
    pub fn effective_log_level(&self) -> &str {
        if self.quiet {
            "warn"
        } else if self.verbose {
            "debug"
        } else {
            &self.log_level
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_command() {
        let cli = Cli::parse_from(["dokja"]);
        assert!(cli.command.is_none());
        assert!(matches!(cli.effective_command(), Commands::Run(_)));
    }

    #[test]
    fn test_run_command_with_port() {
        let cli = Cli::parse_from(["dokja", "run", "-p", "9090"]);
        if let Some(Commands::Run(args)) = cli.command {
            assert_eq!(args.port, Some(9090));
        } else {
            panic!("Expected Run command");
        }
    }

    #[test]
    fn test_config_path() {
        let cli = Cli::parse_from(["dokja", "-c", "/etc/dokja/config.yaml"]);
        assert_eq!(cli.config, PathBuf::from("/etc/dokja/config.yaml"));
    }

    #[test]
    fn test_quiet_and_verbose_levels() {
        let cli = Cli::parse_from(["dokja", "-q"]);
        assert_eq!(cli.effective_log_level(), "warn");

        let cli = Cli::parse_from(["dokja", "-v"]);
        assert_eq!(cli.effective_log_level(), "debug");

        let cli = Cli::parse_from(["dokja", "-l", "trace"]);
        assert_eq!(cli.effective_log_level(), "trace");
    }

    #[test]
    fn test_gen_secret_command() {
        let cli = Cli::parse_from(["dokja", "gen-secret", "--length", "64"]);
        if let Some(Commands::GenSecret(args)) = cli.command {
            assert_eq!(args.length, 64);
        } else {
            panic!("Expected GenSecret command");
        }
    }

    #[test]
    fn test_mint_token_command() {
        let cli = Cli::parse_from(["dokja", "mint-token", "--user-id", "42", "--admin"]);
        if let Some(Commands::MintToken(args)) = cli.command {
            assert_eq!(args.user_id, 42);
            assert!(args.admin);
            assert_eq!(args.ttl, 3600);
        } else {
            panic!("Expected MintToken command");
        }
    }
}
