//! Authentication primitives: login credentials and registration requests.
//!
//! Keep inbound payload parsing outside the domain by exposing constructors
//! that validate string inputs before a handler talks to a port or service.

use std::fmt;

use zeroize::Zeroizing;

use crate::domain::{DisplayName, Email, UserValidationError};

/// Domain error returned when credential payload values are invalid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CredentialsValidationError {
    /// Email was missing or blank once trimmed.
    EmptyEmail,
    /// Email lacked a usable `local@domain` shape.
    InvalidEmail,
    /// Password was blank.
    EmptyPassword,
    /// Display name was missing or blank once trimmed.
    EmptyUsername,
    /// A user-level check that no credential field can trigger failed.
    Unexpected(UserValidationError),
}

impl fmt::Display for CredentialsValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyEmail => write!(f, "el email es requerido"),
            Self::InvalidEmail => write!(f, "el email no es válido"),
            Self::EmptyPassword => write!(f, "la contraseña es requerida"),
            Self::EmptyUsername => write!(f, "el nombre de usuario es requerido"),
            Self::Unexpected(source) => write!(f, "unexpected credential check failure: {source}"),
        }
    }
}

impl std::error::Error for CredentialsValidationError {}

impl CredentialsValidationError {
    /// Request field the failure refers to.
    pub fn field(&self) -> &'static str {
        match self {
            Self::EmptyEmail | Self::InvalidEmail => "email",
            Self::EmptyPassword => "password",
            Self::EmptyUsername => "username",
            Self::Unexpected(_) => "request",
        }
    }

    /// Stable machine-readable code for error details.
    pub fn code(&self) -> &'static str {
        match self {
            Self::EmptyEmail => "empty_email",
            Self::InvalidEmail => "invalid_email",
            Self::EmptyPassword => "empty_password",
            Self::EmptyUsername => "empty_username",
            Self::Unexpected(_) => "unexpected",
        }
    }
}

fn from_user_validation(err: UserValidationError) -> CredentialsValidationError {
    match err {
        UserValidationError::EmptyEmail => CredentialsValidationError::EmptyEmail,
        UserValidationError::InvalidEmail => CredentialsValidationError::InvalidEmail,
        UserValidationError::EmptyDisplayName => CredentialsValidationError::EmptyUsername,
        other @ (UserValidationError::NonPositiveId | UserValidationError::EmptyPasswordHash) => {
            CredentialsValidationError::Unexpected(other)
        }
    }
}

fn require_password(password: &str) -> Result<Zeroizing<String>, CredentialsValidationError> {
    if password.is_empty() {
        return Err(CredentialsValidationError::EmptyPassword);
    }
    Ok(Zeroizing::new(password.to_owned()))
}

/// Validated login credentials used by the identity service.
///
/// ## Invariants
/// - `email` is trimmed and must not be empty. Its shape is not checked so
///   that unknown addresses fail authentication rather than validation.
/// - `password` must be non-empty but keeps caller-provided whitespace.
///
/// # Examples
/// ```
/// use blog_backend::domain::LoginCredentials;
///
/// let creds = LoginCredentials::try_from_parts(" a@x.com ", "pw").unwrap();
/// assert_eq!(creds.email(), "a@x.com");
/// assert_eq!(creds.password(), "pw");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    email: String,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    /// Construct credentials from raw email/password inputs.
    pub fn try_from_parts(email: &str, password: &str) -> Result<Self, CredentialsValidationError> {
        let normalized = email.trim();
        if normalized.is_empty() {
            return Err(CredentialsValidationError::EmptyEmail);
        }
        Ok(Self {
            email: normalized.to_owned(),
            password: require_password(password)?,
        })
    }

    /// Email used to look the user up.
    pub fn email(&self) -> &str {
        self.email.as_str()
    }

    /// Password provided by the caller.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

/// Validated registration request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    email: Email,
    password: Zeroizing<String>,
    username: DisplayName,
}

impl Registration {
    /// Construct a registration from raw inputs, checking email, password,
    /// then display name.
    pub fn try_from_parts(
        email: &str,
        password: &str,
        username: &str,
    ) -> Result<Self, CredentialsValidationError> {
        let email = Email::new(email).map_err(from_user_validation)?;
        let password = require_password(password)?;
        let username = DisplayName::new(username).map_err(from_user_validation)?;
        Ok(Self {
            email,
            password,
            username,
        })
    }

    /// Email to register.
    pub fn email(&self) -> &Email {
        &self.email
    }

    /// Plain-text password; hash before persisting.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }

    /// Public display name.
    pub fn username(&self) -> &DisplayName {
        &self.username
    }
}
