//! Storage gateway for posts and their comments.

use async_trait::async_trait;

use crate::domain::{Comment, CommentId, NewComment, NewPost, Post, PostId, UserId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by post repository adapters.
    pub enum PostPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "post repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "post repository query failed: {message}",
    }
}

/// Outcome of an ownership-scoped delete.
///
/// `NoMatch` means the filter matched zero rows. Callers cannot tell which
/// part of the filter failed, and that is the point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScopedDeleteOutcome {
    /// Exactly the targeted row was removed.
    Deleted,
    /// Nothing matched the combined filter.
    NoMatch,
}

/// Storage gateway for posts and comments.
///
/// Listings carry the owner's display name. Deleting a post removes its
/// comments through the store's cascade.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PostRepository: Send + Sync {
    /// Insert a post and return it with id, timestamp, and owner name.
    async fn create(&self, post: &NewPost) -> Result<Post, PostPersistenceError>;

    /// All posts, newest first.
    async fn find_all(&self) -> Result<Vec<Post>, PostPersistenceError>;

    /// Fetch a single post.
    async fn find_by_id(&self, id: PostId) -> Result<Option<Post>, PostPersistenceError>;

    /// Remove a post unconditionally. Ownership is checked by the caller.
    async fn delete(&self, id: PostId) -> Result<(), PostPersistenceError>;

    /// Insert a comment and return it with id, timestamp, and author name.
    async fn create_comment(&self, comment: &NewComment) -> Result<Comment, PostPersistenceError>;

    /// Comments of a post, oldest first. Unknown posts yield an empty list.
    async fn find_comments_by_post_id(
        &self,
        post_id: PostId,
    ) -> Result<Vec<Comment>, PostPersistenceError>;

    /// Delete the comment only when id, parent post, and author all match.
    async fn delete_comment(
        &self,
        post_id: PostId,
        comment_id: CommentId,
        author_id: UserId,
    ) -> Result<ScopedDeleteOutcome, PostPersistenceError>;
}
