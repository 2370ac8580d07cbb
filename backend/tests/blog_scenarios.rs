//! End-to-end blog scenarios over the HTTP surface.
//!
//! The full actix stack (session cookies, trace middleware, JSON config, and
//! the `/api` routes) runs against the in-memory repositories, so these
//! tests exercise handler, service, and store behaviour together without a
//! database.

use std::sync::Arc;

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::ServiceResponse;
use actix_web::http::StatusCode;
use actix_web::{App, test, web};
use blog_backend::Trace;
use blog_backend::domain::ports::{
    ContentCommand, ContentQuery, CreateCommentRequest, CreatePostRequest, DeleteCommentRequest,
    UserRepository,
};
use blog_backend::domain::{
    CommentId, ContentService, DisplayName, Email, ErrorCode, IdentityServiceImpl, NewUser,
    PasswordHash, User, UserId,
};
use blog_backend::inbound::http::api_scope;
use blog_backend::inbound::http::state::HttpState;
use blog_backend::inbound::http::validation::json_config;
use blog_backend::outbound::Argon2PasswordHasher;
use blog_backend::test_support::{InMemoryPostRepository, InMemoryUserRepository};
use rstest::{fixture, rstest};
use serde_json::{Value, json};

struct Stores {
    users: Arc<InMemoryUserRepository>,
    posts: Arc<InMemoryPostRepository>,
}

#[fixture]
fn stores() -> Stores {
    let users = Arc::new(InMemoryUserRepository::default());
    let posts = Arc::new(InMemoryPostRepository::new(users.clone()));
    Stores { users, posts }
}

fn http_state(stores: &Stores) -> web::Data<HttpState> {
    let identity = Arc::new(IdentityServiceImpl::new(
        stores.users.clone(),
        Arc::new(Argon2PasswordHasher::new()),
    ));
    let content = Arc::new(ContentService::new(stores.posts.clone(), stores.users.clone()));
    web::Data::new(HttpState::new(identity, content.clone(), content))
}

fn session_of<B>(res: &ServiceResponse<B>) -> Cookie<'static> {
    res.response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .map(Cookie::into_owned)
        .expect("session cookie")
}

#[rstest]
#[actix_web::test]
async fn comment_lifecycle_enforces_authorship(stores: Stores) {
    let app = test::init_service(
        App::new()
            .app_data(http_state(&stores))
            .app_data(json_config())
            .wrap(Trace)
            .service(
                api_scope().wrap(
                    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
                        .cookie_name("session".to_owned())
                        .cookie_secure(false)
                        .build(),
                ),
            ),
    )
    .await;

    let register = |email: &str, username: &str| {
        test::TestRequest::post()
            .uri("/api/auth/register")
            .set_json(json!({"email": email, "password": "pw", "username": username}))
            .to_request()
    };

    let res = test::call_service(&app, register("a@x.com", "alice")).await;
    assert_eq!(res.status(), StatusCode::CREATED);
    let alice = session_of(&res);

    let res = test::call_service(&app, register("b@x.com", "bob")).await;
    assert_eq!(res.status(), StatusCode::CREATED);
    let bob = session_of(&res);

    let req = test::TestRequest::post()
        .uri("/api/posts")
        .cookie(alice.clone())
        .set_json(json!({"title": "Hola", "content": "Primer post"}))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::CREATED);
    let post: Value = test::read_body_json(res).await;
    assert_eq!(post["username"], "alice");
    let post_id = post["id"].as_i64().expect("post id");
    assert!(post_id > 0);

    let req = test::TestRequest::post()
        .uri(&format!("/api/posts/{post_id}/comments"))
        .cookie(alice.clone())
        .set_json(json!({"content": "Buen post"}))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::CREATED);
    let comment: Value = test::read_body_json(res).await;
    let comment_id = comment["id"].as_i64().expect("comment id");

    let delete_comment = |cookie: Cookie<'static>| {
        test::TestRequest::delete()
            .uri(&format!("/api/posts/{post_id}/comments/{comment_id}"))
            .cookie(cookie)
            .to_request()
    };

    let res = test::call_service(&app, delete_comment(bob)).await;
    assert_eq!(res.status(), StatusCode::FORBIDDEN);
    assert!(res.headers().contains_key("trace-id"));
    let body: Value = test::read_body_json(res).await;
    assert_eq!(
        body["message"],
        "no tienes permiso para eliminar este comentario o no existe"
    );

    let res = test::call_service(&app, delete_comment(alice)).await;
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["message"], "Comentario eliminado");

    let req = test::TestRequest::get()
        .uri(&format!("/api/posts/{post_id}/comments"))
        .to_request();
    let comments: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(comments, json!([]));
}

#[rstest]
#[actix_web::test]
async fn logout_ends_the_session(stores: Stores) {
    let app = test::init_service(
        App::new()
            .app_data(http_state(&stores))
            .app_data(json_config())
            .service(
                api_scope().wrap(
                    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
                        .cookie_name("session".to_owned())
                        .cookie_secure(false)
                        .build(),
                ),
            ),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/api/auth/register")
        .set_json(json!({"email": "a@x.com", "password": "pw", "username": "alice"}))
        .to_request();
    let res = test::call_service(&app, req).await;
    let alice = session_of(&res);

    let req = test::TestRequest::post()
        .uri("/api/auth/logout")
        .cookie(alice)
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::NO_CONTENT);
    let cleared = session_of(&res);
    assert_eq!(cleared.value(), "");

    let req = test::TestRequest::post()
        .uri("/api/posts")
        .cookie(cleared)
        .set_json(json!({"title": "t", "content": "c"}))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
}

#[rstest]
#[tokio::test]
async fn post_by_unknown_author_is_not_stored(stores: Stores) {
    let service = ContentService::new(stores.posts.clone(), stores.users.clone());

    let err = service
        .create_post(CreatePostRequest {
            title: "t".to_owned(),
            content: "c".to_owned(),
            author_id: UserId::new(999).expect("fixture id"),
        })
        .await
        .expect_err("unknown author");

    assert_eq!(err.code(), ErrorCode::NotFound);
    assert_eq!(err.message(), "usuario no encontrado");
    assert!(service.list_posts().await.expect("list").is_empty());
}

async fn seed_user(stores: &Stores, email: &str, username: &str) -> User {
    stores
        .users
        .create(&NewUser {
            email: Email::new(email).expect("fixture email"),
            username: DisplayName::new(username).expect("fixture name"),
            password_hash: PasswordHash::new("$argon2id$fixture").expect("fixture hash"),
        })
        .await
        .expect("user stored")
}

#[derive(Debug, Clone, Copy)]
enum WrongKey {
    Post,
    Comment,
    Author,
}

#[rstest]
#[case(WrongKey::Post)]
#[case(WrongKey::Comment)]
#[case(WrongKey::Author)]
#[tokio::test]
async fn mismatched_comment_keys_are_refused_alike(stores: Stores, #[case] wrong: WrongKey) {
    let service = ContentService::new(stores.posts.clone(), stores.users.clone());
    let alice = seed_user(&stores, "a@x.com", "alice").await;
    let bob = seed_user(&stores, "b@x.com", "bob").await;
    let publish = |title: &str| CreatePostRequest {
        title: title.to_owned(),
        content: "c".to_owned(),
        author_id: alice.id(),
    };
    let thread = service.create_post(publish("thread")).await.expect("post");
    let other = service.create_post(publish("other")).await.expect("post");
    let comment = service
        .create_comment(CreateCommentRequest {
            post_id: thread.id,
            content: "hola".to_owned(),
            author_id: alice.id(),
        })
        .await
        .expect("comment");

    let mut request = DeleteCommentRequest {
        post_id: thread.id,
        comment_id: comment.id,
        requester_id: alice.id(),
    };
    match wrong {
        WrongKey::Post => request.post_id = other.id,
        WrongKey::Comment => request.comment_id = CommentId::new(99).expect("fixture id"),
        WrongKey::Author => request.requester_id = bob.id(),
    }

    let err = service
        .delete_comment(request)
        .await
        .expect_err("mismatched keys");

    assert_eq!(err.code(), ErrorCode::Forbidden);
    assert_eq!(
        err.message(),
        "no tienes permiso para eliminar este comentario o no existe"
    );
    assert_eq!(stores.posts.comment_count(), 1);
    let remaining: Vec<CommentId> = service
        .list_comments(thread.id)
        .await
        .expect("comments")
        .iter()
        .map(|c| c.id)
        .collect();
    assert_eq!(remaining, vec![comment.id]);
}
