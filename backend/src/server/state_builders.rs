//! Composition root for the HTTP state.
//!
//! Repositories are built once per process and shared by every worker; the
//! services receive them explicitly so nothing reaches for a global.

use std::sync::Arc;

use actix_web::web;

use blog_backend::domain::ports::{PasswordHasher, PostRepository, UserRepository};
use blog_backend::domain::{ContentService, IdentityServiceImpl};
use blog_backend::inbound::http::state::HttpState;
use blog_backend::outbound::Argon2PasswordHasher;
use blog_backend::outbound::persistence::{DbPool, DieselPostRepository, DieselUserRepository};

/// Wire services over arbitrary port implementations.
fn build_http_state_from<U, P, H>(users: Arc<U>, posts: Arc<P>, hasher: Arc<H>) -> HttpState
where
    U: UserRepository + 'static,
    P: PostRepository + 'static,
    H: PasswordHasher + 'static,
{
    let identity = Arc::new(IdentityServiceImpl::new(users.clone(), hasher));
    let content = Arc::new(ContentService::new(posts, users));
    HttpState::new(identity, content.clone(), content)
}

/// Build the HTTP state backed by PostgreSQL and Argon2id.
pub(super) fn build_http_state(pool: &DbPool) -> web::Data<HttpState> {
    web::Data::new(build_http_state_from(
        Arc::new(DieselUserRepository::new(pool.clone())),
        Arc::new(DieselPostRepository::new(pool.clone())),
        Arc::new(Argon2PasswordHasher::new()),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use blog_backend::domain::{LoginCredentials, Registration};
    use blog_backend::test_support::{InMemoryPostRepository, InMemoryUserRepository};
    use rstest::rstest;

    fn in_memory_state() -> HttpState {
        let users = Arc::new(InMemoryUserRepository::default());
        let posts = Arc::new(InMemoryPostRepository::new(users.clone()));
        build_http_state_from(users, posts, Arc::new(Argon2PasswordHasher::new()))
    }

    #[rstest]
    #[tokio::test]
    async fn wired_services_share_the_same_user_store() {
        let state = in_memory_state();
        let registration = Registration::try_from_parts("a@x.com", "pw", "alice")
            .expect("registration shape");
        let user = state
            .identity
            .register(&registration)
            .await
            .expect("register succeeds");

        let credentials =
            LoginCredentials::try_from_parts("a@x.com", "pw").expect("credentials shape");
        let logged_in = state.identity.login(&credentials).await.expect("login");
        assert_eq!(logged_in.id(), user.id());

        let post = state
            .content
            .create_post(blog_backend::domain::ports::CreatePostRequest {
                title: "T".to_owned(),
                content: "C".to_owned(),
                author_id: user.id(),
            })
            .await
            .expect("post created");
        assert_eq!(post.username, "alice");

        let listed = state.content_query.list_posts().await.expect("list");
        assert_eq!(listed.len(), 1);
    }
}
