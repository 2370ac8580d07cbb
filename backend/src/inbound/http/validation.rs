//! Shared validation helpers for inbound HTTP adapters.
//!
//! Path identifiers arrive as raw strings so malformed values produce the
//! same `400 ID inválido` payload as non-positive ones, and JSON bodies that
//! fail to parse are answered with `400 JSON inválido`.

use actix_web::{HttpRequest, error::JsonPayloadError, web};
use serde_json::json;
use tracing::debug;

use crate::domain::{CommentId, Error, PostId};

pub(crate) const INVALID_ID: &str = "ID inválido";
pub(crate) const INVALID_JSON: &str = "JSON inválido";

/// Validation error codes reported in `details.code`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ValidationCode {
    InvalidId,
    InvalidJson,
}

impl ValidationCode {
    fn as_str(self) -> &'static str {
        match self {
            ValidationCode::InvalidId => "invalid_id",
            ValidationCode::InvalidJson => "invalid_json",
        }
    }
}

/// Newtype wrapper for HTTP field names to provide type safety.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    fn as_str(&self) -> &'static str {
        self.0
    }
}

fn invalid_id_error(field: FieldName, value: &str) -> Error {
    Error::invalid_request(INVALID_ID).with_details(json!({
        "field": field.as_str(),
        "value": value,
        "code": ValidationCode::InvalidId.as_str(),
    }))
}

fn parse_positive(value: &str, field: FieldName) -> Result<i32, Error> {
    value
        .parse::<i32>()
        .ok()
        .filter(|id| *id > 0)
        .ok_or_else(|| invalid_id_error(field, value))
}

pub(crate) fn parse_post_id(value: &str) -> Result<PostId, Error> {
    let field = FieldName::new("id");
    let raw = parse_positive(value, field)?;
    PostId::new(raw).map_err(|_| invalid_id_error(field, value))
}

pub(crate) fn parse_comment_id(value: &str) -> Result<CommentId, Error> {
    let field = FieldName::new("comment_id");
    let raw = parse_positive(value, field)?;
    CommentId::new(raw).map_err(|_| invalid_id_error(field, value))
}

fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    debug!(error = %err, "rejecting malformed JSON body");
    Error::invalid_request(INVALID_JSON)
        .with_details(json!({ "code": ValidationCode::InvalidJson.as_str() }))
        .into()
}

/// JSON extractor configuration shared by every body-accepting route.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(json_error_handler)
}
