//! Argon2id adapter for the `PasswordHasher` port.
//!
//! Hashes are stored as PHC strings (`$argon2id$v=19$...`) so the salt and
//! cost parameters travel with the hash and can change without a migration.

use argon2::Argon2;
use argon2::password_hash::{
    self, PasswordHash as PhcHash, PasswordHasher as _, PasswordVerifier as _, SaltString,
};
use rand::Rng;

use crate::domain::PasswordHash;
use crate::domain::ports::{PasswordHashError, PasswordHasher};

const SALT_LEN: usize = 16;

/// Argon2id hasher with the crate's default cost parameters.
#[derive(Clone, Default)]
pub struct Argon2PasswordHasher {
    argon2: Argon2<'static>,
}

impl Argon2PasswordHasher {
    /// Create a hasher using Argon2id defaults.
    pub fn new() -> Self {
        Self::default()
    }
}

fn generate_salt() -> Result<SaltString, PasswordHashError> {
    let bytes: [u8; SALT_LEN] = rand::thread_rng().r#gen();
    SaltString::encode_b64(&bytes).map_err(|err| PasswordHashError::hash(err.to_string()))
}

impl PasswordHasher for Argon2PasswordHasher {
    fn hash(&self, secret: &str) -> Result<PasswordHash, PasswordHashError> {
        let salt = generate_salt()?;
        let encoded = self
            .argon2
            .hash_password(secret.as_bytes(), &salt)
            .map_err(|err| PasswordHashError::hash(err.to_string()))?
            .to_string();
        PasswordHash::new(encoded).map_err(|err| PasswordHashError::hash(err.to_string()))
    }

    fn verify(&self, secret: &str, hash: &PasswordHash) -> Result<bool, PasswordHashError> {
        let parsed = PhcHash::new(hash.as_str())
            .map_err(|err| PasswordHashError::malformed_hash(err.to_string()))?;
        match self.argon2.verify_password(secret.as_bytes(), &parsed) {
            Ok(()) => Ok(true),
            Err(password_hash::Error::Password) => Ok(false),
            Err(err) => Err(PasswordHashError::malformed_hash(err.to_string())),
        }
    }
}
