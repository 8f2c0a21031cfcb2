// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Server runtime assembly.
//!
//! Loads configuration, builds the application state, starts the
//! rate-limit sweeper, and runs the API server under the shutdown
//! coordinator.

use std::path::{Path, PathBuf};

use tracing::info;

use dokja_api::{ApiConfig, ApiServer, AppState};

use crate::error::{BinError, BinResult};
use crate::shutdown::ShutdownCoordinator;

// =============================================================================
// Runtime
// =============================================================================

/// The assembled server runtime.
pub struct Runtime {
    state: AppState,
    shutdown: ShutdownCoordinator,
}

impl Runtime {
    /// Creates a builder.
    pub fn builder() -> RuntimeBuilder {
        RuntimeBuilder::new()
    }

    /// Runs the server until a shutdown signal arrives.
    pub async fn run(self) -> BinResult<()> {
        // The limiter map only grows on the request path; reclaim stale
        // windows in the background.
        self.state
            .limiter()
            .start_sweep_task(self.state.config.rate_limit.sweep_interval());

        let server = ApiServer::new(self.state);
        let signal = self.shutdown.shutdown_signal();

        info!("dokja v{} ready", crate::VERSION);
        server.run_with_shutdown(signal).await?;

        Ok(())
    }
}

// =============================================================================
// RuntimeBuilder
// =============================================================================

/// Builder for the server runtime.
pub struct RuntimeBuilder {
    config_path: Option<PathBuf>,
    port_override: Option<u16>,
}

impl RuntimeBuilder {
    /// Creates a new builder.
    pub fn new() -> Self {
        Self {
            config_path: None,
            port_override: None,
        }
    }

    /// Sets the configuration file path.
    pub fn config_path(mut self, path: impl AsRef<Path>) -> Self {
        self.config_path = Some(path.as_ref().to_path_buf());
        self
    }

    /// Overrides the listen port.
    pub fn port(mut self, port: Option<u16>) -> Self {
        self.port_override = port;
        self
    }

    /// Loads configuration and builds the runtime.
    pub fn build(self) -> BinResult<Runtime> {
        let path = self
            .config_path
            .unwrap_or_else(|| PathBuf::from("dokja.yaml"));

        let mut config = ApiConfig::load(&path)
            .map_err(|e| BinError::Configuration(format!("{}: {}", path.display(), e)))?;

        if let Some(port) = self.port_override {
            config = config.with_port(port);
        }

        let state = AppState::builder().config(config).build()?;

        Ok(Runtime {
            state,
            shutdown: ShutdownCoordinator::new(),
        })
    }
}

impl Default for RuntimeBuilder {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_build_with_missing_config_file() {
        let runtime = RuntimeBuilder::new()
            .config_path("/definitely/not/here.yaml")
            .build();
        assert!(runtime.is_ok());
    }

    #[test]
    fn test_build_with_port_override() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "port: 8080").unwrap();

        let runtime = RuntimeBuilder::new()
            .config_path(file.path())
            .port(Some(9999))
            .build()
            .unwrap();

        assert_eq!(runtime.state.config.port, 9999);
    }

    #[test]
    fn test_build_rejects_invalid_config() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "rate_limit:\n  max_actions: 0").unwrap();

        assert!(RuntimeBuilder::new()
            .config_path(file.path())
            .build()
            .is_err());
    }
}
