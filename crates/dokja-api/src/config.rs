// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! API server configuration.
//!
//! Configuration is loaded from a YAML file and then overlaid with
//! environment variables for the two secrets, so deployments never have
//! to write credentials to disk:
//!
//! ```text
//! DOKJA_SESSION_SECRET=...
//! DOKJA_TELEGRAM_BOT_TOKEN=...
//! DOKJA_PORT=9090
//! ```

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{ApiError, ApiResult};

// =============================================================================
// ApiConfig
// =============================================================================

/// Configuration for the API server.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Server host address.
    pub host: IpAddr,
    /// Server port.
    pub port: u16,
    /// CORS configuration.
    pub cors: CorsConfig,
    /// Session and login configuration.
    pub auth: AuthConfig,
    /// Rate limiting configuration.
    pub rate_limit: RateLimitConfig,
    /// Request timeout.
    #[serde(with = "duration_secs")]
    pub request_timeout: Duration,
    /// Graceful shutdown timeout.
    #[serde(with = "duration_secs")]
    pub shutdown_timeout: Duration,
    /// Maximum request body size in bytes.
    pub max_body_size: usize,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::new(0, 0, 0, 0)),
            port: 8080,
            cors: CorsConfig::default(),
            auth: AuthConfig::default(),
            rate_limit: RateLimitConfig::default(),
            request_timeout: Duration::from_secs(30),
            shutdown_timeout: Duration::from_secs(30),
            max_body_size: 64 * 1024,
        }
    }
}

impl ApiConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a YAML file, then applies environment
    /// overrides. A missing file yields the defaults (still subject to
    /// the environment), so a bare `DOKJA_SESSION_SECRET=... dokja run`
    /// works without any file at all.
    pub fn load(path: impl AsRef<Path>) -> ApiResult<Self> {
        let path = path.as_ref();

        let mut config = if path.exists() {
            let raw = std::fs::read_to_string(path)
                .map_err(|e| ApiError::internal(format!("failed to read {}: {}", path.display(), e)))?;
            serde_yaml::from_str(&raw)
                .map_err(|e| ApiError::internal(format!("failed to parse {}: {}", path.display(), e)))?
        } else {
            tracing::info!(path = %path.display(), "config file not found, using defaults");
            Self::default()
        };

        config.apply_env_overrides();
        Ok(config)
    }

    /// Overlays settings from the environment.
    pub fn apply_env_overrides(&mut self) {
        if let Ok(secret) = std::env::var("DOKJA_SESSION_SECRET") {
            self.auth.session_secret = secret;
        }
        if let Ok(token) = std::env::var("DOKJA_TELEGRAM_BOT_TOKEN") {
            self.auth.telegram_bot_token = token;
        }
        if let Ok(port) = std::env::var("DOKJA_PORT") {
            match port.parse() {
                Ok(port) => self.port = port,
                Err(_) => tracing::warn!(%port, "ignoring unparseable DOKJA_PORT"),
            }
        }
    }

    /// Returns the socket address to bind to.
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Sets the host address.
    pub fn with_host(mut self, host: IpAddr) -> Self {
        self.host = host;
        self
    }

    /// Sets the port.
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Sets the auth configuration.
    pub fn with_auth(mut self, auth: AuthConfig) -> Self {
        self.auth = auth;
        self
    }

    /// Sets the rate limit configuration.
    pub fn with_rate_limit(mut self, rate_limit: RateLimitConfig) -> Self {
        self.rate_limit = rate_limit;
        self
    }

    /// Validates the configuration.
    ///
    /// Missing secrets are warnings, not errors: the authenticator fails
    /// closed without them, and read-only deployments are legitimate.
    pub fn validate(&self) -> ApiResult<()> {
        if self.auth.session_secret.is_empty() {
            tracing::warn!("session secret is not configured; logins and writes will be rejected");
        } else if self.auth.session_secret.len() < 32 {
            tracing::warn!("session secret is shorter than recommended (32 bytes)");
        }
        if self.auth.telegram_bot_token.is_empty() {
            tracing::warn!("telegram bot token is not configured; logins will be rejected");
        }
        if self.auth.cookie_name.is_empty() {
            return Err(ApiError::internal("session cookie name must not be empty"));
        }
        if self.auth.session_ttl_secs <= 0 {
            return Err(ApiError::internal("session TTL must be positive"));
        }
        if self.rate_limit.max_actions == 0 {
            return Err(ApiError::internal("rate limit max_actions must be positive"));
        }
        if self.rate_limit.window_secs == 0 {
            return Err(ApiError::internal("rate limit window must be positive"));
        }
        Ok(())
    }
}

// =============================================================================
// AuthConfig
// =============================================================================

/// Session and Telegram login configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    /// Shared secret for signing session tokens.
    #[serde(skip_serializing)]
    pub session_secret: String,
    /// Telegram bot token for login payload verification.
    #[serde(skip_serializing)]
    pub telegram_bot_token: String,
    /// Session lifetime in seconds.
    pub session_ttl_secs: i64,
    /// Name of the session cookie.
    pub cookie_name: String,
    /// Maximum accepted age of a Telegram login payload, in seconds.
    pub login_max_age_secs: u64,
    /// Whether to mark the session cookie `Secure`.
    pub secure_cookies: bool,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            session_secret: String::new(), // Must be set by deployment
            telegram_bot_token: String::new(),
            session_ttl_secs: 7 * 86_400,
            cookie_name: "dokja_session".to_string(),
            login_max_age_secs: 86_400,
            secure_cookies: true,
        }
    }
}

impl AuthConfig {
    /// Creates a configuration with the given session secret.
    pub fn new(session_secret: impl Into<String>) -> Self {
        Self {
            session_secret: session_secret.into(),
            ..Default::default()
        }
    }

    /// Sets the Telegram bot token.
    pub fn with_bot_token(mut self, token: impl Into<String>) -> Self {
        self.telegram_bot_token = token.into();
        self
    }

    /// Sets the session lifetime.
    pub fn with_session_ttl(mut self, ttl: Duration) -> Self {
        self.session_ttl_secs = ttl.as_secs() as i64;
        self
    }
}

// =============================================================================
// RateLimitConfig
// =============================================================================

/// Configuration for the per-principal write limiter.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RateLimitConfig {
    /// Actions allowed per principal per window.
    pub max_actions: u32,
    /// Window length in seconds.
    pub window_secs: u64,
    /// Interval between sweeps of stale entries, in seconds.
    pub sweep_interval_secs: u64,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            max_actions: 5,
            window_secs: 60,
            sweep_interval_secs: 300,
        }
    }
}

impl RateLimitConfig {
    /// Returns the window as a `Duration`.
    pub fn window(&self) -> Duration {
        Duration::from_secs(self.window_secs)
    }

    /// Returns the sweep interval as a `Duration`.
    pub fn sweep_interval(&self) -> Duration {
        Duration::from_secs(self.sweep_interval_secs)
    }
}

// =============================================================================
// CorsConfig
// =============================================================================

/// CORS (Cross-Origin Resource Sharing) configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CorsConfig {
    /// Allowed origins.
    pub allowed_origins: Vec<String>,
    /// Allowed methods.
    pub allowed_methods: Vec<String>,
    /// Whether to allow credentials (required for cookie logins).
    pub allow_credentials: bool,
    /// Max age for preflight cache (seconds).
    pub max_age: u64,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: vec!["*".to_string()],
            allowed_methods: vec![
                "GET".to_string(),
                "POST".to_string(),
                "DELETE".to_string(),
                "OPTIONS".to_string(),
            ],
            allow_credentials: false,
            max_age: 3600,
        }
    }
}

// =============================================================================
// duration_secs serde module
// =============================================================================

mod duration_secs {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        duration.as_secs().serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let secs = u64::deserialize(deserializer)?;
        Ok(Duration::from_secs(secs))
    }
}

// =============================================================================
// Tests
// =============================================================================
