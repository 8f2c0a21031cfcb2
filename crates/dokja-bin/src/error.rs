// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Error types for the dokja binary.

use thiserror::Error;

/// Result type alias for dokja-bin operations.
pub type BinResult<T> = Result<T, BinError>;

/// Errors that can occur in the dokja binary.
#[derive(Debug, Error)]
pub enum BinError {
    /// Configuration error.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Credential tooling error.
    #[error("Credential error: {0}")]
    Credential(String),

    /// Runtime error.
    #[error("Runtime error: {0}")]
    Runtime(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// API error.
    #[error("API error: {0}")]
    Api(#[from] dokja_api::ApiError),

    /// Core error.
    #[error("Auth error: {0}")]
    Auth(#[from] dokja_auth::AuthError),
}

// =============================================================================
// Tests
// =============================================================================
