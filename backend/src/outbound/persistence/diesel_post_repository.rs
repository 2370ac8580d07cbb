//! PostgreSQL-backed `PostRepository` implementation using Diesel ORM.
//!
//! Posts and comments are read joined with `users` so every model carries the
//! owner's display name. Removing a post relies on `ON DELETE CASCADE` to
//! drop its comments.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::pooled_connection::bb8::PooledConnection;
use diesel_async::{AsyncPgConnection, RunQueryDsl};

use crate::domain::ports::{PostPersistenceError, PostRepository, ScopedDeleteOutcome};
use crate::domain::{
    Comment, CommentId, NewComment, NewPost, NonPositiveIdError, Post, PostId, UserId,
};

use super::diesel_error_mapping::{map_diesel_error, map_pool_error};
use super::models::{CommentRow, NewCommentRow, NewPostRow, PostRow};
use super::pool::{DbPool, PoolError};
use super::schema::{comments, posts, users};

/// Diesel-backed implementation of the `PostRepository` port.
#[derive(Clone)]
pub struct DieselPostRepository {
    pool: DbPool,
}

impl DieselPostRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    async fn conn(
        &self,
    ) -> Result<PooledConnection<'_, AsyncPgConnection>, PostPersistenceError> {
        self.pool.get().await.map_err(pool_error)
    }
}

fn pool_error(error: PoolError) -> PostPersistenceError {
    map_pool_error(error, PostPersistenceError::connection)
}

fn diesel_error(error: diesel::result::Error) -> PostPersistenceError {
    map_diesel_error(
        error,
        PostPersistenceError::query,
        PostPersistenceError::connection,
    )
}

fn invalid_id(table: &'static str, raw: i32) -> impl Fn(NonPositiveIdError) -> PostPersistenceError {
    move |err| PostPersistenceError::query(format!("stored {table} id {raw} is invalid: {err}"))
}

fn invalid_user_id(raw: i32) -> PostPersistenceError {
    PostPersistenceError::query(format!("stored user id {raw} is invalid"))
}

fn row_to_post((row, username): (PostRow, String)) -> Result<Post, PostPersistenceError> {
    Ok(Post {
        id: PostId::new(row.id).map_err(invalid_id("post", row.id))?,
        title: row.title,
        content: row.content,
        user_id: UserId::new(row.user_id).map_err(|_| invalid_user_id(row.user_id))?,
        username,
        created_at: row.created_at,
    })
}

fn row_to_comment(
    (row, username): (CommentRow, String),
) -> Result<Comment, PostPersistenceError> {
    Ok(Comment {
        id: CommentId::new(row.id).map_err(invalid_id("comment", row.id))?,
        post_id: PostId::new(row.post_id).map_err(invalid_id("post", row.post_id))?,
        user_id: UserId::new(row.user_id).map_err(|_| invalid_user_id(row.user_id))?,
        username,
        content: row.content,
        created_at: row.created_at,
    })
}

/// Look up the display name of `user_id` for freshly inserted rows.
async fn username_of(
    conn: &mut AsyncPgConnection,
    user_id: i32,
) -> Result<String, PostPersistenceError> {
    users::table
        .find(user_id)
        .select(users::username)
        .first::<String>(conn)
        .await
        .map_err(diesel_error)
}

#[async_trait]
impl PostRepository for DieselPostRepository {
    async fn create(&self, post: &NewPost) -> Result<Post, PostPersistenceError> {
        let mut conn = self.conn().await?;

        let new_row = NewPostRow {
            title: &post.title,
            content: &post.content,
            user_id: post.user_id.get(),
        };
        let row = diesel::insert_into(posts::table)
            .values(&new_row)
            .returning(PostRow::as_returning())
            .get_result::<PostRow>(&mut conn)
            .await
            .map_err(diesel_error)?;
        let username = username_of(&mut conn, row.user_id).await?;

        row_to_post((row, username))
    }

    async fn find_all(&self) -> Result<Vec<Post>, PostPersistenceError> {
        let mut conn = self.conn().await?;

        let rows = posts::table
            .inner_join(users::table)
            .select((PostRow::as_select(), users::username))
            .order((posts::created_at.desc(), posts::id.desc()))
            .load::<(PostRow, String)>(&mut conn)
            .await
            .map_err(diesel_error)?;

        rows.into_iter().map(row_to_post).collect()
    }

    async fn find_by_id(&self, id: PostId) -> Result<Option<Post>, PostPersistenceError> {
        let mut conn = self.conn().await?;

        let row = posts::table
            .inner_join(users::table)
            .filter(posts::id.eq(id.get()))
            .select((PostRow::as_select(), users::username))
            .first::<(PostRow, String)>(&mut conn)
            .await
            .optional()
            .map_err(diesel_error)?;

        row.map(row_to_post).transpose()
    }

    async fn delete(&self, id: PostId) -> Result<(), PostPersistenceError> {
        let mut conn = self.conn().await?;

        diesel::delete(posts::table.find(id.get()))
            .execute(&mut conn)
            .await
            .map_err(diesel_error)?;
        Ok(())
    }

    async fn create_comment(&self, comment: &NewComment) -> Result<Comment, PostPersistenceError> {
        let mut conn = self.conn().await?;

        let new_row = NewCommentRow {
            post_id: comment.post_id.get(),
            user_id: comment.user_id.get(),
            content: &comment.content,
        };
        let row = diesel::insert_into(comments::table)
            .values(&new_row)
            .returning(CommentRow::as_returning())
            .get_result::<CommentRow>(&mut conn)
            .await
            .map_err(diesel_error)?;
        let username = username_of(&mut conn, row.user_id).await?;

        row_to_comment((row, username))
    }

    async fn find_comments_by_post_id(
        &self,
        post_id: PostId,
    ) -> Result<Vec<Comment>, PostPersistenceError> {
        let mut conn = self.conn().await?;

        let rows = comments::table
            .inner_join(users::table)
            .filter(comments::post_id.eq(post_id.get()))
            .select((CommentRow::as_select(), users::username))
            .order((comments::created_at.asc(), comments::id.asc()))
            .load::<(CommentRow, String)>(&mut conn)
            .await
            .map_err(diesel_error)?;

        rows.into_iter().map(row_to_comment).collect()
    }

    async fn delete_comment(
        &self,
        post_id: PostId,
        comment_id: CommentId,
        author_id: UserId,
    ) -> Result<ScopedDeleteOutcome, PostPersistenceError> {
        let mut conn = self.conn().await?;

        let affected = diesel::delete(
            comments::table
                .filter(comments::id.eq(comment_id.get()))
                .filter(comments::post_id.eq(post_id.get()))
                .filter(comments::user_id.eq(author_id.get())),
        )
        .execute(&mut conn)
        .await
        .map_err(diesel_error)?;

        Ok(if affected == 0 {
            ScopedDeleteOutcome::NoMatch
        } else {
            ScopedDeleteOutcome::Deleted
        })
    }
}
