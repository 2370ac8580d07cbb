//! Content domain service: post and comment lifecycle rules.
//!
//! Implements both content driving ports over the post and user storage
//! gateways. Validation runs before any lookup, existence before ownership,
//! and ownership before mutation; every check short-circuits.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::ports::{
    ContentCommand, ContentQuery, CreateCommentRequest, CreatePostRequest, DeleteCommentRequest,
    DeletePostRequest, PostPersistenceError, PostRepository, ScopedDeleteOutcome,
    UserPersistenceError, UserRepository,
};
use crate::domain::{Comment, Error, NewComment, NewPost, Post, PostId, UserId};

const TITLE_REQUIRED: &str = "el título es requerido";
const CONTENT_REQUIRED: &str = "el contenido es requerido";
const USER_NOT_FOUND: &str = "usuario no encontrado";
const POST_NOT_FOUND: &str = "post no encontrado";
const POST_DELETE_FORBIDDEN: &str = "no tienes permiso para eliminar este post";
const COMMENT_DELETE_FORBIDDEN: &str =
    "no tienes permiso para eliminar este comentario o no existe";

/// Content service implementing [`ContentCommand`] and [`ContentQuery`].
#[derive(Clone)]
pub struct ContentService<P, U> {
    posts: Arc<P>,
    users: Arc<U>,
}

impl<P, U> ContentService<P, U> {
    /// Create a new service with the given repositories.
    pub fn new(posts: Arc<P>, users: Arc<U>) -> Self {
        Self { posts, users }
    }
}

impl<P, U> ContentService<P, U>
where
    P: PostRepository,
    U: UserRepository,
{
    fn map_post_error(error: PostPersistenceError) -> Error {
        match error {
            PostPersistenceError::Connection { message } => {
                Error::service_unavailable(format!("post repository unavailable: {message}"))
            }
            PostPersistenceError::Query { message } => {
                Error::internal(format!("post repository error: {message}"))
            }
        }
    }

    fn map_user_error(error: UserPersistenceError) -> Error {
        match error {
            UserPersistenceError::Connection { message } => {
                Error::service_unavailable(format!("user repository unavailable: {message}"))
            }
            UserPersistenceError::Query { message }
            | UserPersistenceError::DuplicateEmail { email: message } => {
                Error::internal(format!("user repository error: {message}"))
            }
        }
    }

    async fn require_post(&self, post_id: PostId) -> Result<Post, Error> {
        self.posts
            .find_by_id(post_id)
            .await
            .map_err(Self::map_post_error)?
            .ok_or_else(|| Error::not_found(POST_NOT_FOUND))
    }

    async fn require_user(&self, user_id: UserId) -> Result<(), Error> {
        self.users
            .find_by_id(user_id)
            .await
            .map_err(Self::map_user_error)?
            .map(|_| ())
            .ok_or_else(|| Error::not_found(USER_NOT_FOUND))
    }
}

#[async_trait]
impl<P, U> ContentCommand for ContentService<P, U>
where
    P: PostRepository,
    U: UserRepository,
{
    async fn create_post(&self, request: CreatePostRequest) -> Result<Post, Error> {
        let CreatePostRequest {
            title,
            content,
            author_id,
        } = request;
        if title.is_empty() {
            return Err(Error::invalid_request(TITLE_REQUIRED));
        }
        if content.is_empty() {
            return Err(Error::invalid_request(CONTENT_REQUIRED));
        }
        self.require_user(author_id).await?;

        let new_post = NewPost {
            title,
            content,
            user_id: author_id,
        };
        self.posts
            .create(&new_post)
            .await
            .map_err(Self::map_post_error)
    }

    async fn delete_post(&self, request: DeletePostRequest) -> Result<(), Error> {
        let post = self.require_post(request.post_id).await?;
        if post.user_id != request.requester_id {
            return Err(Error::forbidden(POST_DELETE_FORBIDDEN));
        }
        self.posts
            .delete(request.post_id)
            .await
            .map_err(Self::map_post_error)
    }

    async fn create_comment(&self, request: CreateCommentRequest) -> Result<Comment, Error> {
        let CreateCommentRequest {
            post_id,
            content,
            author_id,
        } = request;
        if content.is_empty() {
            return Err(Error::invalid_request(CONTENT_REQUIRED));
        }
        self.require_post(post_id).await?;
        self.require_user(author_id).await?;

        let new_comment = NewComment {
            post_id,
            user_id: author_id,
            content,
        };
        self.posts
            .create_comment(&new_comment)
            .await
            .map_err(Self::map_post_error)
    }

    async fn delete_comment(&self, request: DeleteCommentRequest) -> Result<(), Error> {
        self.require_post(request.post_id).await?;
        self.require_user(request.requester_id).await?;

        let outcome = self
            .posts
            .delete_comment(request.post_id, request.comment_id, request.requester_id)
            .await
            .map_err(Self::map_post_error)?;
        match outcome {
            ScopedDeleteOutcome::Deleted => Ok(()),
            ScopedDeleteOutcome::NoMatch => Err(Error::forbidden(COMMENT_DELETE_FORBIDDEN)),
        }
    }
}

#[async_trait]
impl<P, U> ContentQuery for ContentService<P, U>
where
    P: PostRepository,
    U: UserRepository,
{
    async fn list_posts(&self) -> Result<Vec<Post>, Error> {
        self.posts.find_all().await.map_err(Self::map_post_error)
    }

    async fn get_post(&self, post_id: PostId) -> Result<Option<Post>, Error> {
        self.posts
            .find_by_id(post_id)
            .await
            .map_err(Self::map_post_error)
    }

    async fn list_comments(&self, post_id: PostId) -> Result<Vec<Comment>, Error> {
        self.posts
            .find_comments_by_post_id(post_id)
            .await
            .map_err(Self::map_post_error)
    }
}

#[cfg(test)]
#[path = "content_service_tests.rs"]
mod tests;
