//! HTTP inbound adapter exposing REST endpoints.
//!
//! Handlers stay thin: they extract the session user, parse path
//! identifiers, and forward to the driving ports held in [`state::HttpState`].

pub mod auth;
pub mod comments;
pub mod error;
pub mod health;
pub mod posts;
pub mod routes;
pub mod schemas;
pub mod session;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod validation;

pub use error::ApiResult;
pub use routes::api_scope;
