//! Identity domain service: registration and credential verification.

use std::sync::Arc;

use async_trait::async_trait;
use zeroize::Zeroizing;

use crate::domain::ports::{
    IdentityService, PasswordHashError, PasswordHasher, UserPersistenceError, UserRepository,
};
use crate::domain::{Error, LoginCredentials, NewUser, PasswordHash, Registration, User};

const EMAIL_TAKEN: &str = "el email ya está registrado";
const INVALID_CREDENTIALS: &str = "credenciales inválidas";

/// Identity service implementing the [`IdentityService`] driving port.
#[derive(Clone)]
pub struct IdentityServiceImpl<U, H> {
    users: Arc<U>,
    hasher: Arc<H>,
}

impl<U, H> IdentityServiceImpl<U, H> {
    /// Create a new service with the given user repository and hasher.
    pub fn new(users: Arc<U>, hasher: Arc<H>) -> Self {
        Self { users, hasher }
    }
}

impl<U, H> IdentityServiceImpl<U, H>
where
    U: UserRepository,
    H: PasswordHasher + 'static,
{
    fn map_user_error(error: UserPersistenceError) -> Error {
        match error {
            UserPersistenceError::Connection { message } => {
                Error::service_unavailable(format!("user repository unavailable: {message}"))
            }
            UserPersistenceError::Query { message } => {
                Error::internal(format!("user repository error: {message}"))
            }
            UserPersistenceError::DuplicateEmail { .. } => Error::invalid_request(EMAIL_TAKEN),
        }
    }

    fn map_hash_error(error: PasswordHashError) -> Error {
        Error::internal(error.to_string())
    }

    /// Run a hasher call on the blocking pool; Argon2 is deliberately slow.
    async fn with_hasher<T, F>(&self, secret: &str, op: F) -> Result<T, Error>
    where
        T: Send + 'static,
        F: FnOnce(&H, &str) -> Result<T, PasswordHashError> + Send + 'static,
    {
        let hasher = Arc::clone(&self.hasher);
        let secret = Zeroizing::new(secret.to_owned());
        tokio::task::spawn_blocking(move || op(hasher.as_ref(), secret.as_str()))
            .await
            .map_err(|err| Error::internal(format!("password hashing task failed: {err}")))?
            .map_err(Self::map_hash_error)
    }
}

#[async_trait]
impl<U, H> IdentityService for IdentityServiceImpl<U, H>
where
    U: UserRepository,
    H: PasswordHasher + 'static,
{
    async fn register(&self, registration: &Registration) -> Result<User, Error> {
        let existing = self
            .users
            .find_by_email(registration.email().as_ref())
            .await
            .map_err(Self::map_user_error)?;
        if existing.is_some() {
            return Err(Error::invalid_request(EMAIL_TAKEN));
        }

        let password_hash: PasswordHash = self
            .with_hasher(registration.password(), |hasher, secret| hasher.hash(secret))
            .await?;

        let new_user = NewUser {
            email: registration.email().clone(),
            username: registration.username().clone(),
            password_hash,
        };
        self.users
            .create(&new_user)
            .await
            .map_err(Self::map_user_error)
    }

    async fn login(&self, credentials: &LoginCredentials) -> Result<User, Error> {
        let Some(user) = self
            .users
            .find_by_email(credentials.email())
            .await
            .map_err(Self::map_user_error)?
        else {
            return Err(Error::unauthorized(INVALID_CREDENTIALS));
        };

        let stored = user.password_hash().clone();
        let verified = self
            .with_hasher(credentials.password(), move |hasher, secret| {
                hasher.verify(secret, &stored)
            })
            .await?;
        if !verified {
            return Err(Error::unauthorized(INVALID_CREDENTIALS));
        }
        Ok(user)
    }
}

#[cfg(test)]
#[path = "identity_service_tests.rs"]
mod tests;
