//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driven ports (`UserRepository`, `PostRepository`, `PasswordHasher`) are
//! implemented by outbound adapters. Driving ports (`IdentityService`,
//! `ContentCommand`, `ContentQuery`) are implemented by domain services and
//! consumed by inbound adapters.

mod macros;
pub(crate) use macros::define_port_error;

mod content_command;
mod content_query;
mod identity_service;
mod password_hasher;
mod post_repository;
mod user_repository;

#[cfg(test)]
pub use content_command::MockContentCommand;
pub use content_command::{
    ContentCommand, CreateCommentRequest, CreatePostRequest, DeleteCommentRequest,
    DeletePostRequest,
};
#[cfg(test)]
pub use content_query::MockContentQuery;
pub use content_query::ContentQuery;
#[cfg(test)]
pub use identity_service::MockIdentityService;
pub use identity_service::IdentityService;
#[cfg(test)]
pub use password_hasher::MockPasswordHasher;
pub use password_hasher::{PasswordHashError, PasswordHasher};
#[cfg(test)]
pub use post_repository::MockPostRepository;
pub use post_repository::{PostPersistenceError, PostRepository, ScopedDeleteOutcome};
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{UserPersistenceError, UserRepository};
