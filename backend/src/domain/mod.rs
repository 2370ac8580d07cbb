//! Domain primitives, aggregates, and services.
//!
//! Purpose: Define strongly typed domain entities used by the API and
//! persistence layers, and the services that enforce the blogging rules.
//! Keep types immutable and document invariants and serialisation contracts
//! (serde) in each type's Rustdoc.
//!
//! Public surface:
//! - Error (alias to `error::Error`) — API error response payload.
//! - ErrorCode (alias to `error::ErrorCode`) — stable error identifier.
//! - User (alias to `user::User`) — registered account without its hash.
//! - Post / Comment — content read models carrying the owner's name.
//! - IdentityServiceImpl / ContentService — port implementations wired by
//!   the server.

pub mod auth;
pub mod content;
pub mod content_service;
pub mod error;
pub mod identity_service;
pub mod ports;
pub mod trace_id;
pub mod user;

pub use self::auth::{CredentialsValidationError, LoginCredentials, Registration};
pub use self::content::{
    Comment, CommentId, NewComment, NewPost, NonPositiveIdError, Post, PostId,
};
pub use self::content_service::ContentService;
pub use self::error::{Error, ErrorCode, ErrorValidationError, TRACE_ID_HEADER};
pub use self::identity_service::IdentityServiceImpl;
pub use self::trace_id::TraceId;
pub use self::user::{
    DisplayName, Email, NewUser, PasswordHash, User, UserId,
    UserValidationError,
};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use blog_backend::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::forbidden("nope"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
