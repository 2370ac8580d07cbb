//! Driving port for reading posts and comments.

use async_trait::async_trait;

use crate::domain::{Comment, Error, Post, PostId};

/// Read-side use-cases for content. None of them require authentication.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ContentQuery: Send + Sync {
    /// Every post, newest first.
    async fn list_posts(&self) -> Result<Vec<Post>, Error>;

    /// A single post, or `None` when it does not exist.
    async fn get_post(&self, post_id: PostId) -> Result<Option<Post>, Error>;

    /// Comments of a post, oldest first; empty for unknown posts.
    async fn list_comments(&self, post_id: PostId) -> Result<Vec<Comment>, Error>;
}
