// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Custom extractors for API handlers.

use axum::{
    extract::{FromRequestParts, Query},
    http::request::Parts,
};

use dokja_auth::Principal;

use crate::error::ApiError;
use crate::middleware::AuthSession;

// =============================================================================
// Viewer
// =============================================================================

/// Extractor for authenticated requests.
///
/// Pulls the verified [`Principal`] out of the request extensions.
/// Rejects with the uniform 401 when the request is anonymous — like the
/// authenticator itself, it never says why.
///
/// # Example
///
/// ```rust,ignore
/// async fn handler(Viewer(principal): Viewer) -> impl IntoResponse {
///     format!("안녕하세요, {}", principal.display_name())
/// }
/// ```
pub struct Viewer(pub Principal);

impl<S> FromRequestParts<S> for Viewer
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthSession>()
            .and_then(|session| session.principal())
            .cloned()
            .map(Viewer)
            .ok_or_else(ApiError::unauthenticated)
    }
}

// =============================================================================
// Pagination
// =============================================================================

/// Query parameters for pagination.
#[derive(Debug, Clone, serde::Deserialize)]
pub struct PaginationParams {
    /// Page number (1-indexed).
    #[serde(default = "default_page")]
    pub page: u32,
    /// Items per page.
    #[serde(default = "default_per_page")]
    pub per_page: u32,
}

fn default_page() -> u32 {
    1
}

fn default_per_page() -> u32 {
    20
}

impl PaginationParams {
    /// Returns the offset into the result set.
    pub fn offset(&self) -> usize {
        (self.page.saturating_sub(1) as usize) * self.per_page as usize
    }

    /// Returns the page size, capped at 100.
    pub fn limit(&self) -> usize {
        self.per_page.min(100) as usize
    }

    /// Validates the pagination parameters.
    pub fn validate(&self) -> Result<(), ApiError> {
        if self.page == 0 {
            return Err(ApiError::validation("page는 1 이상이어야 합니다"));
        }
        if self.per_page == 0 || self.per_page > 100 {
            return Err(ApiError::validation("per_page는 1에서 100 사이여야 합니다"));
        }
        Ok(())
    }
}

impl Default for PaginationParams {
    fn default() -> Self {
        Self {
            page: 1,
            per_page: 20,
        }
    }
}

/// Extractor for pagination parameters.
pub struct Pagination(pub PaginationParams);

impl<S> FromRequestParts<S> for Pagination
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(params) = Query::<PaginationParams>::from_request_parts(parts, state)
            .await
            .map_err(|e| ApiError::bad_request(format!("invalid pagination parameters: {e}")))?;

        params.validate()?;
        Ok(Pagination(params))
    }
}

// =============================================================================
// Tests
// =============================================================================
