// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! # dokja-bin
//!
//! CLI binary for the dokja reading platform.
//!
//! This crate provides the `dokja` binary:
//!
//! - CLI argument parsing with clap
//! - Server runtime orchestration
//! - Graceful shutdown handling
//! - Logging initialization
//! - Command implementations (run, validate, version, gen-secret,
//!   mint-token)
//!
//! ## Usage
//!
//! ```bash
//! # Start the server (default command)
//! dokja
//!
//! # Start with custom config
//! dokja -c /etc/dokja/config.yaml
//!
//! # Validate configuration
//! dokja validate
//!
//! # Generate a session secret
//! dokja gen-secret
//!
//! # Mint an admin token for moderation tooling
//! dokja mint-token --user-id 1 --admin
//! ```

#![warn(missing_docs)]
#![deny(unsafe_code)]

pub mod cli;
pub mod commands;
pub mod error;
pub mod logging;
pub mod runtime;
pub mod shutdown;

pub use cli::{Cli, Commands};
pub use error::{BinError, BinResult};
pub use logging::init_logging;
pub use runtime::{Runtime, RuntimeBuilder};
pub use shutdown::ShutdownCoordinator;

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
