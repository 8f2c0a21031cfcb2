// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Comment storage.
//!
//! The hosted SQL database behind the production site is out of scope
//! here, so persistence sits behind a trait. [`MemoryCommentStore`] is
//! the in-process implementation used by the server and the tests.

mod memory;

pub use memory::MemoryCommentStore;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use dokja_auth::Principal;

// =============================================================================
// Comment
// =============================================================================

/// A reader comment on a chapter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    /// Comment id.
    pub id: Uuid,
    /// Chapter the comment belongs to.
    pub chapter_id: i64,
    /// Telegram user id of the author.
    pub author_id: i64,
    /// Author display name captured at posting time.
    pub author_name: String,
    /// Comment text.
    pub body: String,
    /// When the comment was posted.
    pub created_at: DateTime<Utc>,
}

impl Comment {
    /// Creates a new comment by the given principal.
    pub fn new(chapter_id: i64, author: &Principal, body: impl Into<String>) -> Self {
        Self {
            id: Uuid::now_v7(),
            chapter_id,
            author_id: author.id,
            author_name: author.display_name(),
            body: body.into(),
            created_at: Utc::now(),
        }
    }
}

// =============================================================================
// StoreError
// =============================================================================

/// Errors from the comment store.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// No comment with the given id exists.
    #[error("comment not found")]
    NotFound,
}

// =============================================================================
// CommentStore
// =============================================================================

/// Storage seam for comments.
#[async_trait]
pub trait CommentStore: Send + Sync {
    /// Inserts a comment.
    async fn insert(&self, comment: Comment) -> Result<(), StoreError>;

    /// Returns one page of a chapter's comments (newest first) and the
    /// chapter's total comment count.
    async fn list_by_chapter(
        &self,
        chapter_id: i64,
        offset: usize,
        limit: usize,
    ) -> Result<(Vec<Comment>, usize), StoreError>;

    /// Fetches a comment by id.
    async fn get(&self, id: Uuid) -> Result<Comment, StoreError>;

    /// Deletes a comment by id.
    async fn delete(&self, id: Uuid) -> Result<(), StoreError>;
}
