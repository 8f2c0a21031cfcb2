// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Moderation handlers.
//!
//! These routes sit behind the admin-mode auth layer: the request only
//! gets here with a verified admin bearer token.

use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};
use uuid::Uuid;

use crate::error::ApiResult;
use crate::extractors::Viewer;
use crate::state::AppState;

/// DELETE /api/v1/admin/comments/{comment_id}
///
/// Removes any comment, regardless of author.
pub async fn admin_delete_comment(
    State(state): State<AppState>,
    Path(comment_id): Path<Uuid>,
    Viewer(admin): Viewer,
) -> ApiResult<impl IntoResponse> {
    let comment = state.comments().get(comment_id).await?;
    state.comments().delete(comment_id).await?;

    tracing::info!(
        comment_id = %comment_id,
        author_id = comment.author_id,
        admin_id = admin.id,
        "comment removed by moderator"
    );

    Ok(Json(serde_json::json!({ "success": true })))
}
