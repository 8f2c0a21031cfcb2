// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! API error types and HTTP mapping.
//!
//! The wire shape is deliberately flat: every failure is
//! `{"error": "<message>"}` with the status carrying the category.
//! Authentication failures share a single message regardless of cause —
//! the distinction lives in debug logs only.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::store::StoreError;

/// Result type alias for API operations.
pub type ApiResult<T> = Result<T, ApiError>;

// =============================================================================
// ApiError
// =============================================================================

/// API error type with HTTP status code mapping.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Authentication failed (401). One variant for every reason.
    #[error("unauthenticated")]
    Unauthenticated,

    /// Rate limit exceeded (429).
    #[error("rate limit exceeded")]
    RateLimited {
        /// Seconds until the principal's window resets.
        retry_after: Option<u64>,
    },

    /// Resource not found (404).
    #[error("resource not found: {resource}")]
    NotFound {
        /// The resource that was not found.
        resource: String,
    },

    /// The caller may not act on this resource (403).
    #[error("forbidden: {message}")]
    Forbidden {
        /// Error message.
        message: String,
    },

    /// Bad request (400).
    #[error("bad request: {message}")]
    BadRequest {
        /// Error message.
        message: String,
    },

    /// Validation error (422).
    #[error("validation error: {message}")]
    Validation {
        /// Error message.
        message: String,
    },

    /// Internal server error (500).
    #[error("internal error: {message}")]
    Internal {
        /// Error message (for logging, not user-facing).
        message: String,
    },
}

impl ApiError {
    // =========================================================================
    // Constructors
    // =========================================================================

    /// Creates the uniform authentication failure.
    pub fn unauthenticated() -> Self {
        Self::Unauthenticated
    }

    /// Creates a rate limit exceeded error.
    pub fn rate_limited(retry_after: Option<u64>) -> Self {
        Self::RateLimited { retry_after }
    }

    /// Creates a not found error.
    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::NotFound {
            resource: resource.into(),
        }
    }

    /// Creates a forbidden error.
    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::Forbidden {
            message: message.into(),
        }
    }

    /// Creates a bad request error.
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest {
            message: message.into(),
        }
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Creates an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    // =========================================================================
    // Properties
    // =========================================================================

    /// Returns the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Unauthenticated => StatusCode::UNAUTHORIZED,
            ApiError::RateLimited { .. } => StatusCode::TOO_MANY_REQUESTS,
            ApiError::NotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::Forbidden { .. } => StatusCode::FORBIDDEN,
            ApiError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            ApiError::Validation { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Returns a user-facing message.
    ///
    /// Authentication failures always produce the same message, so the
    /// response body cannot serve as a token-validity oracle.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Unauthenticated => "인증이 필요합니다".to_string(),
            ApiError::RateLimited { retry_after } => {
                if let Some(seconds) = retry_after {
                    format!("요청 한도를 초과했습니다. {}초 후 다시 시도해주세요", seconds)
                } else {
                    "요청 한도를 초과했습니다".to_string()
                }
            }
            ApiError::NotFound { resource } => format!("{}을(를) 찾을 수 없습니다", resource),
            ApiError::Forbidden { .. } => "접근 권한이 없습니다".to_string(),
            ApiError::BadRequest { message } => message.clone(),
            ApiError::Validation { message } => format!("입력 검증 실패: {}", message),
            ApiError::Internal { .. } => "서버 내부 오류가 발생했습니다".to_string(),
        }
    }

    /// Returns `true` if this error should be logged at error level.
    pub fn is_server_error(&self) -> bool {
        matches!(self, ApiError::Internal { .. })
    }
}

// =============================================================================
// IntoResponse Implementation
// =============================================================================

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if self.is_server_error() {
            tracing::error!(error = %self, status = %status, "server error");
        } else {
            tracing::debug!(error = %self, status = %status, "client error");
        }

        let body = ErrorBody {
            error: self.user_message(),
        };

        let mut response = (status, Json(body)).into_response();

        if let ApiError::RateLimited {
            retry_after: Some(seconds),
        } = &self
        {
            if let Ok(value) = seconds.to_string().parse() {
                response.headers_mut().insert("Retry-After", value);
            }
        }

        response
    }
}

// =============================================================================
// Error body
// =============================================================================

/// The uniform JSON error body.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Human-readable error message.
    pub error: String,
}

// =============================================================================
// From Implementations
// =============================================================================

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound => ApiError::not_found("댓글"),
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
