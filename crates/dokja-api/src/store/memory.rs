// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! In-memory comment store.

use async_trait::async_trait;
use parking_lot::RwLock;
use uuid::Uuid;

use super::{Comment, CommentStore, StoreError};

/// Thread-safe, insertion-ordered in-memory store.
#[derive(Debug, Default)]
pub struct MemoryCommentStore {
    comments: RwLock<Vec<Comment>>,
}

impl MemoryCommentStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of comments across all chapters.
    pub fn len(&self) -> usize {
        self.comments.read().len()
    }

    /// Returns `true` if the store holds no comments.
    pub fn is_empty(&self) -> bool {
        self.comments.read().is_empty()
    }
}

#[async_trait]
impl CommentStore for MemoryCommentStore {
    async fn insert(&self, comment: Comment) -> Result<(), StoreError> {
        self.comments.write().push(comment);
        Ok(())
    }

    async fn list_by_chapter(
        &self,
        chapter_id: i64,
        offset: usize,
        limit: usize,
    ) -> Result<(Vec<Comment>, usize), StoreError> {
        let comments = self.comments.read();

        // Insertion order is chronological; walk it backwards for newest-first
        let matching: Vec<&Comment> = comments
            .iter()
            .rev()
            .filter(|c| c.chapter_id == chapter_id)
            .collect();

        let total = matching.len();
        let page = matching
            .into_iter()
            .skip(offset)
            .take(limit)
            .cloned()
            .collect();

        Ok((page, total))
    }

    async fn get(&self, id: Uuid) -> Result<Comment, StoreError> {
        self.comments
            .read()
            .iter()
            .find(|c| c.id == id)
            .cloned()
            .ok_or(StoreError::NotFound)
    }

    async fn delete(&self, id: Uuid) -> Result<(), StoreError> {
        let mut comments = self.comments.write();
        let before = comments.len();
        comments.retain(|c| c.id != id);

        if comments.len() == before {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }
}

// =============================================================================
// Tests
// =============================================================================
