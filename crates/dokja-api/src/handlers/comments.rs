// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Comment handlers.
//!
//! Reads are public; writes arrive here only after the auth and rate
//! limit layers have had their say.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::error::{ApiError, ApiResult};
use crate::extractors::{Pagination, Viewer};
use crate::response::{CommentListResponse, PageMeta};
use crate::state::AppState;
use crate::store::Comment;

/// Longest accepted comment body, in characters.
const MAX_COMMENT_CHARS: usize = 2000;

// =============================================================================
// List
// =============================================================================

/// GET /api/v1/chapters/{chapter_id}/comments
///
/// Returns one page of a chapter's comments, newest first. Public.
pub async fn list_comments(
    State(state): State<AppState>,
    Path(chapter_id): Path<i64>,
    Pagination(params): Pagination,
) -> ApiResult<Json<CommentListResponse>> {
    let (comments, total) = state
        .comments()
        .list_by_chapter(chapter_id, params.offset(), params.limit())
        .await?;

    Ok(Json(CommentListResponse {
        comments,
        meta: PageMeta::new(total as u64, params.page, params.per_page),
    }))
}

// =============================================================================
// Create
// =============================================================================

/// Create comment request body.
#[derive(Debug, Deserialize)]
pub struct CreateCommentRequest {
    /// Comment text.
    pub body: String,
}

/// POST /api/v1/chapters/{chapter_id}/comments
///
/// Posts a comment as the authenticated principal.
pub async fn create_comment(
    State(state): State<AppState>,
    Path(chapter_id): Path<i64>,
    Viewer(principal): Viewer,
    Json(request): Json<CreateCommentRequest>,
) -> ApiResult<impl IntoResponse> {
    let body = request.body.trim();
    if body.is_empty() {
        return Err(ApiError::validation("댓글 내용을 입력해주세요"));
    }
    if body.chars().count() > MAX_COMMENT_CHARS {
        return Err(ApiError::validation("댓글이 너무 깁니다"));
    }

    let comment = Comment::new(chapter_id, &principal, body);
    state.comments().insert(comment.clone()).await?;

    tracing::debug!(
        comment_id = %comment.id,
        chapter_id,
        author_id = principal.id,
        "comment posted"
    );

    Ok((StatusCode::CREATED, Json(comment)))
}

// =============================================================================
// Delete
// =============================================================================

/// DELETE /api/v1/comments/{comment_id}
///
/// Deletes the principal's own comment.
pub async fn delete_comment(
    State(state): State<AppState>,
    Path(comment_id): Path<Uuid>,
    Viewer(principal): Viewer,
) -> ApiResult<impl IntoResponse> {
    let comment = state.comments().get(comment_id).await?;

    if comment.author_id != principal.id && !principal.is_admin() {
        return Err(ApiError::forbidden("not the comment author"));
    }

    state.comments().delete(comment_id).await?;

    tracing::debug!(
        comment_id = %comment_id,
        author_id = comment.author_id,
        deleted_by = principal.id,
        "comment deleted"
    );

    Ok(Json(serde_json::json!({ "success": true })))
}
