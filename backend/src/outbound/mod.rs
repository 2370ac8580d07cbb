//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **persistence**: PostgreSQL-backed repositories using Diesel ORM
//! - **argon2_password_hasher**: Argon2id credential hashing
//!
//! Adapters are thin translators that convert between domain types and
//! infrastructure-specific representations. They contain no business logic.

mod argon2_password_hasher;
pub mod persistence;

pub use argon2_password_hasher::Argon2PasswordHasher;
