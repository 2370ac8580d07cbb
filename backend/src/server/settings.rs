//! Server settings loaded via OrthoConfig.
//!
//! Values layer in the usual OrthoConfig order: defaults, configuration file,
//! `BLOG_*` environment variables, then command-line flags.

use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use actix_web::cookie::SameSite;
use ortho_config::OrthoConfig;
use serde::Deserialize;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_SESSION_KEY_FILE: &str = "/var/run/secrets/session_key";
const DEFAULT_POOL_MAX_SIZE: u32 = 10;

/// Errors raised when settings are present but unusable.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    /// No database URL was supplied.
    #[error("BLOG_DATABASE_URL must be set")]
    MissingDatabaseUrl,
    /// The bind address does not parse as `host:port`.
    #[error("invalid bind address '{value}': {source}")]
    InvalidBindAddr {
        value: String,
        #[source]
        source: std::net::AddrParseError,
    },
    /// The pool must hold at least one connection.
    #[error("pool_max_size must be at least 1")]
    EmptyPool,
    /// The `SameSite` policy is not one of `Strict`, `Lax` or `None`.
    #[error("invalid cookie_same_site '{value}': expected Strict|Lax|None")]
    InvalidSameSite { value: String },
    /// Browsers drop `SameSite=None` cookies that are not `Secure`.
    #[error("cookie_same_site=None requires cookie_secure")]
    InsecureSameSiteNone,
}

/// Runtime configuration for the HTTP server.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "BLOG")]
pub struct ServerSettings {
    /// PostgreSQL connection URL.
    pub database_url: Option<String>,
    /// Socket address the server listens on.
    pub bind_addr: Option<String>,
    /// File holding at least 64 bytes of session key material.
    pub session_key_file: Option<PathBuf>,
    /// Mark the session cookie `Secure`.
    #[ortho_config(default = true)]
    pub cookie_secure: bool,
    /// `SameSite` policy of the session cookie: `Strict`, `Lax` or `None`.
    pub cookie_same_site: Option<String>,
    /// Maximum number of pooled database connections.
    pub pool_max_size: Option<u32>,
    /// Fall back to a generated session key when the key file is missing.
    #[ortho_config(default = false)]
    pub allow_ephemeral_key: bool,
}

impl ServerSettings {
    /// The configured database URL.
    pub fn database_url(&self) -> Result<&str, SettingsError> {
        self.database_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
            .ok_or(SettingsError::MissingDatabaseUrl)
    }

    /// The parsed bind address, defaulting to `0.0.0.0:8080`.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let value = self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR);
        value
            .parse()
            .map_err(|source| SettingsError::InvalidBindAddr {
                value: value.to_owned(),
                source,
            })
    }

    /// The session key path, defaulting to the mounted secret location.
    pub fn session_key_file(&self) -> &Path {
        self.session_key_file
            .as_deref()
            .unwrap_or_else(|| Path::new(DEFAULT_SESSION_KEY_FILE))
    }

    /// The session cookie `SameSite` policy, defaulting to `Lax`.
    pub fn same_site(&self) -> Result<SameSite, SettingsError> {
        let Some(value) = self.cookie_same_site.as_deref() else {
            return Ok(SameSite::Lax);
        };
        match value.trim().to_ascii_lowercase().as_str() {
            "lax" => Ok(SameSite::Lax),
            "strict" => Ok(SameSite::Strict),
            "none" if self.cookie_secure => Ok(SameSite::None),
            "none" => Err(SettingsError::InsecureSameSiteNone),
            _ => Err(SettingsError::InvalidSameSite {
                value: value.to_owned(),
            }),
        }
    }

    /// The pool size, defaulting to 10 connections.
    pub fn pool_max_size(&self) -> Result<u32, SettingsError> {
        match self.pool_max_size.unwrap_or(DEFAULT_POOL_MAX_SIZE) {
            0 => Err(SettingsError::EmptyPool),
            size => Ok(size),
        }
    }
}
