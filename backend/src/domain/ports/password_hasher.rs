//! Port for one-way credential hashing.
//!
//! The identity service never sees the algorithm; it asks for a hash when a
//! user registers and for a verdict when one logs in.

use crate::domain::PasswordHash;

use super::define_port_error;

define_port_error! {
    /// Failures raised by password hashing adapters.
    pub enum PasswordHashError {
        /// Hashing the secret failed.
        Hash { message: String } => "password hashing failed: {message}",
        /// The stored hash could not be parsed.
        MalformedHash { message: String } => "stored password hash is malformed: {message}",
    }
}

/// Hash and verify secrets.
///
/// Implementations are CPU-bound and synchronous; callers on an async runtime
/// decide whether to offload them.
#[cfg_attr(test, mockall::automock)]
pub trait PasswordHasher: Send + Sync {
    /// Produce a salted hash of `secret`.
    fn hash(&self, secret: &str) -> Result<PasswordHash, PasswordHashError>;

    /// Return `Ok(true)` when `secret` matches `hash`, `Ok(false)` on mismatch.
    fn verify(&self, secret: &str, hash: &PasswordHash) -> Result<bool, PasswordHashError>;
}
