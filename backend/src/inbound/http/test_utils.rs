//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::body::MessageBody;
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::ServiceResponse;
use actix_web::{HttpResponse, test, web};
use serde_json::Value;

use crate::domain::ports::{MockContentCommand, MockContentQuery, MockIdentityService};
use crate::domain::{Error, UserId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Build a session middleware configured for tests.
///
/// - Generates a fresh signing/encryption key per invocation.
/// - Sets the cookie name to `session` and disables the `Secure` flag for
///   local HTTP tests.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".to_owned())
        .cookie_secure(false)
        .build()
}

/// Extract the session cookie set by `response`.
///
/// # Panics
///
/// Panics when the response did not set a session cookie.
pub fn session_cookie<B>(response: &ServiceResponse<B>) -> Cookie<'static> {
    response
        .response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .map(Cookie::into_owned)
        .expect("session cookie set")
}

/// Build handler state from mocked driving ports.
pub fn mock_state(
    identity: MockIdentityService,
    content: MockContentCommand,
    content_query: MockContentQuery,
) -> web::Data<HttpState> {
    web::Data::new(HttpState::new(
        Arc::new(identity),
        Arc::new(content),
        Arc::new(content_query),
    ))
}

/// Test-only route that signs the caller in as the user id in the path.
pub async fn sign_in_as(session: SessionContext, id: web::Path<i32>) -> ApiResult<HttpResponse> {
    let user_id = UserId::new(id.into_inner())
        .map_err(|err| Error::invalid_request(err.to_string()))?;
    session.persist_user(user_id)?;
    Ok(HttpResponse::Ok().finish())
}

/// Read a JSON response body.
pub async fn read_json<B>(response: ServiceResponse<B>) -> Value
where
    B: MessageBody,
{
    let body = test::read_body(response).await;
    serde_json::from_slice(&body).expect("JSON body")
}
