//! Driving port for post and comment mutations.
//!
//! The requester is always the identity established by the session; the
//! implementation enforces existence and ownership rules.

use async_trait::async_trait;

use crate::domain::{Comment, CommentId, Error, Post, PostId, UserId};

/// Request to publish a post.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatePostRequest {
    pub title: String,
    pub content: String,
    pub author_id: UserId,
}

/// Request to delete a post.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeletePostRequest {
    pub post_id: PostId,
    pub requester_id: UserId,
}

/// Request to comment on a post.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateCommentRequest {
    pub post_id: PostId,
    pub content: String,
    pub author_id: UserId,
}

/// Request to delete a comment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeleteCommentRequest {
    pub post_id: PostId,
    pub comment_id: CommentId,
    pub requester_id: UserId,
}

/// Driving port for content mutations.
///
/// # Check order
///
/// - `create_post`: title, content, author existence, then persistence.
/// - `delete_post`: post existence, ownership, then deletion.
/// - `create_comment`: content, post existence, author existence, then
///   persistence.
/// - `delete_comment`: post existence, requester existence, then the scoped
///   delete. A scoped miss is reported as `Forbidden`.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ContentCommand: Send + Sync {
    /// Publish a post owned by `author_id`.
    async fn create_post(&self, request: CreatePostRequest) -> Result<Post, Error>;

    /// Delete a post owned by the requester; comments go with it.
    async fn delete_post(&self, request: DeletePostRequest) -> Result<(), Error>;

    /// Attach a comment to an existing post.
    async fn create_comment(&self, request: CreateCommentRequest) -> Result<Comment, Error>;

    /// Delete the requester's own comment on the given post.
    async fn delete_comment(&self, request: DeleteCommentRequest) -> Result<(), Error>;
}
