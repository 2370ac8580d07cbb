//! Posts and comments.
//!
//! Both are read models assembled by the storage gateway: they carry the
//! owner's display name alongside the owner id so listings need no extra
//! lookups. Neither is ever updated after creation.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::UserId;

/// Validation error for numeric content identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NonPositiveIdError;

impl fmt::Display for NonPositiveIdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "identifier must be a positive integer")
    }
}

impl std::error::Error for NonPositiveIdError {}

macro_rules! positive_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(try_from = "i32", into = "i32")]
        pub struct $name(i32);

        impl $name {
            /// Validate and construct the identifier.
            pub fn new(id: i32) -> Result<Self, NonPositiveIdError> {
                if id <= 0 {
                    return Err(NonPositiveIdError);
                }
                Ok(Self(id))
            }

            /// Raw integer value as stored in the database.
            pub fn get(self) -> i32 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<$name> for i32 {
            fn from(value: $name) -> Self {
                value.0
            }
        }

        impl TryFrom<i32> for $name {
            type Error = NonPositiveIdError;

            fn try_from(value: i32) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }
    };
}

positive_id! {
    /// Identifier of a post.
    PostId
}

positive_id! {
    /// Identifier of a comment.
    CommentId
}

/// A published post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: PostId,
    pub title: String,
    pub content: String,
    pub user_id: UserId,
    /// Display name of the owner at read time.
    pub username: String,
    pub created_at: DateTime<Utc>,
}

/// A comment attached to a post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub id: CommentId,
    pub post_id: PostId,
    pub user_id: UserId,
    /// Display name of the author at read time.
    pub username: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

/// Data required to insert a post.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPost {
    pub title: String,
    pub content: String,
    pub user_id: UserId,
}

/// Data required to insert a comment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewComment {
    pub post_id: PostId,
    pub user_id: UserId,
    pub content: String,
}
