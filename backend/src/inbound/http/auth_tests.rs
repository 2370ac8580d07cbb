//! Handler tests for the authentication endpoints.

use actix_web::http::StatusCode;
use actix_web::{App, test as actix_test, web};
use chrono::Utc;
use rstest::rstest;
use serde_json::{Value, json};

use super::*;
use crate::domain::ports::{MockContentCommand, MockContentQuery, MockIdentityService};
use crate::domain::{DisplayName, Email, PasswordHash, User, UserId};
use crate::inbound::http::test_utils::{
    mock_state, read_json, session_cookie, test_session_middleware,
};
use crate::inbound::http::validation::json_config;

fn alice() -> User {
    User::new(
        UserId::new(1).expect("fixture id"),
        Email::new("a@x.com").expect("fixture email"),
        DisplayName::new("alice").expect("fixture name"),
        PasswordHash::new("$argon2id$v=19$stub").expect("fixture hash"),
        Utc::now(),
    )
}

fn test_app(
    identity: MockIdentityService,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .wrap(test_session_middleware())
        .app_data(mock_state(
            identity,
            MockContentCommand::new(),
            MockContentQuery::new(),
        ))
        .app_data(json_config())
        .service(
            web::scope("/api")
                .service(register)
                .service(login)
                .service(logout),
        )
}

#[actix_web::test]
async fn register_returns_created_user_and_session() {
    let mut identity = MockIdentityService::new();
    identity
        .expect_register()
        .withf(|registration| {
            registration.email().as_ref() == "a@x.com"
                && registration.username().as_ref() == "alice"
                && registration.password() == "pw"
        })
        .times(1)
        .returning(|_| Ok(alice()));

    let app = actix_test::init_service(test_app(identity)).await;
    let request = actix_test::TestRequest::post()
        .uri("/api/auth/register")
        .set_json(json!({"email": "a@x.com", "password": "pw", "username": "alice"}))
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let _cookie = session_cookie(&response);
    let body = read_json(response).await;
    assert_eq!(body["id"], 1);
    assert_eq!(body["email"], "a@x.com");
    assert_eq!(body["username"], "alice");
    assert!(body.get("password").is_none());
    assert!(body.get("password_hash").is_none());
}

#[rstest]
#[case::missing_at(
    json!({"email": "ax.com", "password": "pw", "username": "alice"}),
    "email",
    "invalid_email"
)]
#[case::empty_password(
    json!({"email": "a@x.com", "password": "", "username": "alice"}),
    "password",
    "empty_password"
)]
#[case::blank_username(
    json!({"email": "a@x.com", "password": "pw", "username": "   "}),
    "username",
    "empty_username"
)]
#[actix_web::test]
async fn register_rejects_invalid_payloads_before_the_service(
    #[case] payload: Value,
    #[case] field: &str,
    #[case] code: &str,
) {
    let mut identity = MockIdentityService::new();
    identity.expect_register().times(0);

    let app = actix_test::init_service(test_app(identity)).await;
    let request = actix_test::TestRequest::post()
        .uri("/api/auth/register")
        .set_json(payload)
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = read_json(response).await;
    assert_eq!(body["code"], "invalid_request");
    assert_eq!(body["details"]["field"], field);
    assert_eq!(body["details"]["code"], code);
}

#[actix_web::test]
async fn register_surfaces_duplicate_email() {
    let mut identity = MockIdentityService::new();
    identity
        .expect_register()
        .times(1)
        .returning(|_| Err(Error::invalid_request("el email ya está registrado")));

    let app = actix_test::init_service(test_app(identity)).await;
    let request = actix_test::TestRequest::post()
        .uri("/api/auth/register")
        .set_json(json!({"email": "a@x.com", "password": "pw", "username": "alice"}))
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = read_json(response).await;
    assert_eq!(body["message"], "el email ya está registrado");
}

#[actix_web::test]
async fn malformed_json_is_rejected() {
    let mut identity = MockIdentityService::new();
    identity.expect_login().times(0);

    let app = actix_test::init_service(test_app(identity)).await;
    let request = actix_test::TestRequest::post()
        .uri("/api/auth/login")
        .insert_header(("content-type", "application/json"))
        .set_payload("{invalid json}")
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = read_json(response).await;
    assert_eq!(body["message"], "JSON inválido");
}

#[actix_web::test]
async fn login_returns_user_and_session() {
    let mut identity = MockIdentityService::new();
    identity
        .expect_login()
        .withf(|credentials| credentials.email() == "a@x.com" && credentials.password() == "pw")
        .times(1)
        .returning(|_| Ok(alice()));

    let app = actix_test::init_service(test_app(identity)).await;
    let request = actix_test::TestRequest::post()
        .uri("/api/auth/login")
        .set_json(json!({"email": "a@x.com", "password": "pw"}))
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::OK);
    let _cookie = session_cookie(&response);
    let body = read_json(response).await;
    assert_eq!(body["username"], "alice");
}

#[actix_web::test]
async fn login_failure_is_unauthorised_without_cookie() {
    let mut identity = MockIdentityService::new();
    identity
        .expect_login()
        .times(1)
        .returning(|_| Err(Error::unauthorized("credenciales inválidas")));

    let app = actix_test::init_service(test_app(identity)).await;
    let request = actix_test::TestRequest::post()
        .uri("/api/auth/login")
        .set_json(json!({"email": "a@x.com", "password": "nope"}))
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert!(
        response
            .response()
            .cookies()
            .all(|cookie| cookie.name() != "session")
    );
    let body = read_json(response).await;
    assert_eq!(body["code"], "unauthorized");
    assert_eq!(body["message"], "credenciales inválidas");
}

#[actix_web::test]
async fn login_service_failure_is_redacted() {
    let mut identity = MockIdentityService::new();
    identity
        .expect_login()
        .times(1)
        .returning(|_| Err(Error::internal("user repository error: syntax")));

    let app = actix_test::init_service(test_app(identity)).await;
    let request = actix_test::TestRequest::post()
        .uri("/api/auth/login")
        .set_json(json!({"email": "a@x.com", "password": "pw"}))
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = read_json(response).await;
    assert_eq!(body["message"], "Internal server error");
}

#[actix_web::test]
async fn logout_answers_no_content() {
    let app = actix_test::init_service(test_app(MockIdentityService::new())).await;
    let request = actix_test::TestRequest::post()
        .uri("/api/auth/logout")
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::NO_CONTENT);
}

#[rstest]
fn unexpected_credential_failures_are_internal() {
    let err = map_credentials_error(CredentialsValidationError::Unexpected(
        crate::domain::UserValidationError::EmptyPasswordHash,
    ));
    assert_eq!(err.code(), crate::domain::ErrorCode::InternalError);
    assert!(err.details().is_none());
}

#[rstest]
fn blank_username_maps_to_field_details() {
    let err = map_credentials_error(CredentialsValidationError::EmptyUsername);
    assert_eq!(err.code(), crate::domain::ErrorCode::InvalidRequest);
    assert_eq!(
        err.details(),
        Some(&json!({"field": "username", "code": "empty_username"}))
    );
}
