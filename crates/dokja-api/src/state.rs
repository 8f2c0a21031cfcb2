// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Application state shared across handlers.

use std::sync::Arc;

use dokja_auth::{RateLimiter, SessionAuthenticator, TelegramVerifier};

use crate::config::ApiConfig;
use crate::error::ApiResult;
use crate::store::{CommentStore, MemoryCommentStore};

// =============================================================================
// AppState
// =============================================================================

/// Application state shared across all handlers.
///
/// The rate limiter is constructed once per process and handed to the
/// middleware by reference; every gated write consults the same map.
#[derive(Clone)]
pub struct AppState {
    /// API configuration.
    pub config: Arc<ApiConfig>,
    /// Session token authenticator.
    pub authenticator: Arc<SessionAuthenticator>,
    /// Telegram login verifier.
    pub telegram: Arc<TelegramVerifier>,
    /// Per-principal write limiter.
    pub rate_limiter: Arc<RateLimiter>,
    /// Comment storage.
    pub comments: Arc<dyn CommentStore>,
}

impl AppState {
    /// Creates a new app state builder.
    pub fn builder() -> AppStateBuilder {
        AppStateBuilder::new()
    }

    /// Returns the authenticator.
    pub fn auth(&self) -> &SessionAuthenticator {
        &self.authenticator
    }

    /// Returns the Telegram verifier.
    pub fn telegram(&self) -> &TelegramVerifier {
        &self.telegram
    }

    /// Returns the rate limiter.
    pub fn limiter(&self) -> &Arc<RateLimiter> {
        &self.rate_limiter
    }

    /// Returns the comment store.
    pub fn comments(&self) -> &Arc<dyn CommentStore> {
        &self.comments
    }
}

// =============================================================================
// AppStateBuilder
// =============================================================================

/// Builder for constructing [`AppState`].
///
/// Components not provided explicitly are built from the configuration.
#[derive(Default)]
pub struct AppStateBuilder {
    config: Option<ApiConfig>,
    authenticator: Option<Arc<SessionAuthenticator>>,
    telegram: Option<Arc<TelegramVerifier>>,
    rate_limiter: Option<Arc<RateLimiter>>,
    comments: Option<Arc<dyn CommentStore>>,
}

impl AppStateBuilder {
    /// Creates a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the configuration.
    pub fn config(mut self, config: ApiConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Sets the authenticator.
    pub fn authenticator(mut self, authenticator: Arc<SessionAuthenticator>) -> Self {
        self.authenticator = Some(authenticator);
        self
    }

    /// Sets the Telegram verifier.
    pub fn telegram_verifier(mut self, telegram: Arc<TelegramVerifier>) -> Self {
        self.telegram = Some(telegram);
        self
    }

    /// Sets the rate limiter.
    pub fn rate_limiter(mut self, rate_limiter: Arc<RateLimiter>) -> Self {
        self.rate_limiter = Some(rate_limiter);
        self
    }

    /// Sets the comment store.
    pub fn comment_store(mut self, comments: Arc<dyn CommentStore>) -> Self {
        self.comments = Some(comments);
        self
    }

    /// Builds the state, filling gaps from the configuration.
    pub fn build(self) -> ApiResult<AppState> {
        let config = self.config.unwrap_or_default();
        config.validate()?;

        let authenticator = self.authenticator.unwrap_or_else(|| {
            Arc::new(SessionAuthenticator::new(
                config.auth.session_secret.as_bytes(),
            ))
        });

        let telegram = self.telegram.unwrap_or_else(|| {
            Arc::new(
                TelegramVerifier::new(&config.auth.telegram_bot_token)
                    .with_max_age(std::time::Duration::from_secs(
                        config.auth.login_max_age_secs,
                    )),
            )
        });

        let rate_limiter = self.rate_limiter.unwrap_or_else(|| {
            Arc::new(RateLimiter::new(
                config.rate_limit.max_actions,
                config.rate_limit.window(),
            ))
        });

        let comments = self
            .comments
            .unwrap_or_else(|| Arc::new(MemoryCommentStore::new()));

        Ok(AppState {
            config: Arc::new(config),
            authenticator,
            telegram,
            rate_limiter,
            comments,
        })
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AuthConfig;

    #[test]
    fn test_build_from_config() {
        let config = ApiConfig::default()
            .with_auth(AuthConfig::new("test-secret-key-that-is-long-enough!"));

        let state = AppState::builder().config(config).build().unwrap();
        assert!(state.auth().has_secret());
    }

    #[test]
    fn test_build_rejects_invalid_config() {
        let mut config = ApiConfig::default();
        config.rate_limit.max_actions = 0;

        assert!(AppState::builder().config(config).build().is_err());
    }

    #[test]
    fn test_explicit_components_win() {
        let limiter = Arc::new(RateLimiter::new(2, std::time::Duration::from_secs(10)));
        let state = AppState::builder()
            .rate_limiter(limiter.clone())
            .build()
            .unwrap();

        assert!(Arc::ptr_eq(state.limiter(), &limiter));
    }
}
