//! Route table for the `/api` scope.

use actix_web::{Scope, web};

use super::{auth, comments, posts};

/// Every JSON endpoint mounted under `/api`.
///
/// Callers wrap the scope with the session middleware and register
/// [`super::state::HttpState`] plus [`super::validation::json_config`] as app
/// data.
#[must_use]
pub fn api_scope() -> Scope {
    web::scope("/api")
        .service(auth::register)
        .service(auth::login)
        .service(auth::logout)
        .service(posts::list_posts)
        .service(posts::create_post)
        .service(posts::get_post)
        .service(posts::delete_post)
        .service(comments::list_comments)
        .service(comments::create_comment)
        .service(comments::delete_comment)
}
