//! Driving port for registration and login.
//!
//! Inbound adapters call this port to create accounts and verify credentials
//! without importing persistence or hashing infrastructure, which keeps HTTP
//! handler tests deterministic.

use async_trait::async_trait;

use crate::domain::{Error, LoginCredentials, Registration, User};

/// Domain use-case port for identity.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IdentityService: Send + Sync {
    /// Create a new account.
    ///
    /// Fails with `InvalidRequest` when the email is already registered.
    async fn register(&self, registration: &Registration) -> Result<User, Error>;

    /// Verify credentials and return the matching user.
    ///
    /// Fails with `Unauthorized` when the email is unknown or the password
    /// does not verify; both cases share one message.
    async fn login(&self, credentials: &LoginCredentials) -> Result<User, Error>;
}
