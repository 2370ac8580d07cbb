//! In-memory adapters for tests.
//!
//! These implement the repository ports with the same observable behaviour as
//! the Diesel adapters: serial identifiers, unique emails, owner usernames
//! resolved at read time, cascading comment removal, and scoped comment
//! deletes. They are compiled for unit tests and for integration tests via
//! the `test-support` feature.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::ports::{
    PostPersistenceError, PostRepository, ScopedDeleteOutcome, UserPersistenceError,
    UserRepository,
};
use crate::domain::{Comment, CommentId, NewComment, NewPost, NewUser, Post, PostId, User, UserId};

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

fn next_id(counter: &Mutex<i32>) -> i32 {
    let mut guard = lock(counter);
    *guard += 1;
    *guard
}

/// User store keyed by serial id with a unique email constraint.
#[derive(Default)]
pub struct InMemoryUserRepository {
    users: Mutex<Vec<User>>,
    last_id: Mutex<i32>,
}

impl InMemoryUserRepository {
    /// Current display name of `id`, if the user exists.
    pub fn username_of(&self, id: UserId) -> Option<String> {
        lock(&self.users)
            .iter()
            .find(|user| user.id() == id)
            .map(|user| user.username().as_ref().to_owned())
    }

    /// Number of stored users.
    pub fn len(&self) -> usize {
        lock(&self.users).len()
    }

    /// Whether no user has been stored.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: &NewUser) -> Result<User, UserPersistenceError> {
        let mut users = lock(&self.users);
        if users.iter().any(|existing| existing.email() == &user.email) {
            return Err(UserPersistenceError::duplicate_email(user.email.as_ref()));
        }
        let id = UserId::new(next_id(&self.last_id))
            .map_err(|err| UserPersistenceError::query(err.to_string()))?;
        let created = User::new(
            id,
            user.email.clone(),
            user.username.clone(),
            user.password_hash.clone(),
            Utc::now(),
        );
        users.push(created.clone());
        Ok(created)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserPersistenceError> {
        Ok(lock(&self.users)
            .iter()
            .find(|user| user.email().as_ref() == email)
            .cloned())
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, UserPersistenceError> {
        Ok(lock(&self.users).iter().find(|user| user.id() == id).cloned())
    }
}

#[derive(Clone)]
struct PostRecord {
    id: PostId,
    title: String,
    content: String,
    user_id: UserId,
    created_at: DateTime<Utc>,
}

#[derive(Clone)]
struct CommentRecord {
    id: CommentId,
    post_id: PostId,
    user_id: UserId,
    content: String,
    created_at: DateTime<Utc>,
}

/// Post and comment store that resolves owner usernames through a shared
/// [`InMemoryUserRepository`].
pub struct InMemoryPostRepository {
    users: Arc<InMemoryUserRepository>,
    posts: Mutex<Vec<PostRecord>>,
    comments: Mutex<Vec<CommentRecord>>,
    last_post_id: Mutex<i32>,
    last_comment_id: Mutex<i32>,
}

impl InMemoryPostRepository {
    /// Create an empty store reading usernames from `users`.
    pub fn new(users: Arc<InMemoryUserRepository>) -> Self {
        Self {
            users,
            posts: Mutex::new(Vec::new()),
            comments: Mutex::new(Vec::new()),
            last_post_id: Mutex::new(0),
            last_comment_id: Mutex::new(0),
        }
    }

    /// Number of stored comments across every post.
    pub fn comment_count(&self) -> usize {
        lock(&self.comments).len()
    }

    fn username(&self, id: UserId) -> Result<String, PostPersistenceError> {
        self.users
            .username_of(id)
            .ok_or_else(|| PostPersistenceError::query(format!("user {id} does not exist")))
    }

    fn hydrate_post(&self, record: &PostRecord) -> Result<Post, PostPersistenceError> {
        Ok(Post {
            id: record.id,
            title: record.title.clone(),
            content: record.content.clone(),
            user_id: record.user_id,
            username: self.username(record.user_id)?,
            created_at: record.created_at,
        })
    }

    fn hydrate_comment(&self, record: &CommentRecord) -> Result<Comment, PostPersistenceError> {
        Ok(Comment {
            id: record.id,
            post_id: record.post_id,
            user_id: record.user_id,
            username: self.username(record.user_id)?,
            content: record.content.clone(),
            created_at: record.created_at,
        })
    }
}

#[async_trait]
impl PostRepository for InMemoryPostRepository {
    async fn create(&self, post: &NewPost) -> Result<Post, PostPersistenceError> {
        // Mirrors the posts.user_id foreign key.
        self.username(post.user_id)?;
        let id = PostId::new(next_id(&self.last_post_id))
            .map_err(|err| PostPersistenceError::query(err.to_string()))?;
        let record = PostRecord {
            id,
            title: post.title.clone(),
            content: post.content.clone(),
            user_id: post.user_id,
            created_at: Utc::now(),
        };
        lock(&self.posts).push(record.clone());
        self.hydrate_post(&record)
    }

    async fn find_all(&self) -> Result<Vec<Post>, PostPersistenceError> {
        let mut records = lock(&self.posts).clone();
        records.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.id.get().cmp(&a.id.get()))
        });
        records.iter().map(|record| self.hydrate_post(record)).collect()
    }

    async fn find_by_id(&self, id: PostId) -> Result<Option<Post>, PostPersistenceError> {
        let record = lock(&self.posts).iter().find(|post| post.id == id).cloned();
        record.map(|record| self.hydrate_post(&record)).transpose()
    }

    async fn delete(&self, id: PostId) -> Result<(), PostPersistenceError> {
        lock(&self.posts).retain(|post| post.id != id);
        lock(&self.comments).retain(|comment| comment.post_id != id);
        Ok(())
    }

    async fn create_comment(&self, comment: &NewComment) -> Result<Comment, PostPersistenceError> {
        self.username(comment.user_id)?;
        if !lock(&self.posts).iter().any(|post| post.id == comment.post_id) {
            return Err(PostPersistenceError::query(format!(
                "post {} does not exist",
                comment.post_id
            )));
        }
        let id = CommentId::new(next_id(&self.last_comment_id))
            .map_err(|err| PostPersistenceError::query(err.to_string()))?;
        let record = CommentRecord {
            id,
            post_id: comment.post_id,
            user_id: comment.user_id,
            content: comment.content.clone(),
            created_at: Utc::now(),
        };
        lock(&self.comments).push(record.clone());
        self.hydrate_comment(&record)
    }

    async fn find_comments_by_post_id(
        &self,
        post_id: PostId,
    ) -> Result<Vec<Comment>, PostPersistenceError> {
        let mut records: Vec<CommentRecord> = lock(&self.comments)
            .iter()
            .filter(|comment| comment.post_id == post_id)
            .cloned()
            .collect();
        records.sort_by(|a, b| {
            a.created_at
                .cmp(&b.created_at)
                .then_with(|| a.id.get().cmp(&b.id.get()))
        });
        records
            .iter()
            .map(|record| self.hydrate_comment(record))
            .collect()
    }

    async fn delete_comment(
        &self,
        post_id: PostId,
        comment_id: CommentId,
        author_id: UserId,
    ) -> Result<ScopedDeleteOutcome, PostPersistenceError> {
        let mut comments = lock(&self.comments);
        let before = comments.len();
        comments.retain(|comment| {
            !(comment.id == comment_id && comment.post_id == post_id && comment.user_id == author_id)
        });
        if comments.len() == before {
            Ok(ScopedDeleteOutcome::NoMatch)
        } else {
            Ok(ScopedDeleteOutcome::Deleted)
        }
    }
}
