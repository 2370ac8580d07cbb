//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{ContentCommand, ContentQuery, IdentityService};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub identity: Arc<dyn IdentityService>,
    pub content: Arc<dyn ContentCommand>,
    pub content_query: Arc<dyn ContentQuery>,
}

impl HttpState {
    /// Construct state from the three driving ports.
    ///
    /// # Examples
    /// ```ignore
    /// use std::sync::Arc;
    ///
    /// use blog_backend::domain::{ContentService, IdentityServiceImpl};
    /// use blog_backend::inbound::http::state::HttpState;
    /// use blog_backend::outbound::Argon2PasswordHasher;
    /// use blog_backend::test_support::{InMemoryPostRepository, InMemoryUserRepository};
    ///
    /// let users = Arc::new(InMemoryUserRepository::default());
    /// let posts = Arc::new(InMemoryPostRepository::new(users.clone()));
    /// let identity = Arc::new(IdentityServiceImpl::new(
    ///     users.clone(),
    ///     Arc::new(Argon2PasswordHasher::new()),
    /// ));
    /// let content = Arc::new(ContentService::new(posts, users));
    /// let state = HttpState::new(identity, content.clone(), content);
    /// let _query = state.content_query.clone();
    /// ```
    pub fn new(
        identity: Arc<dyn IdentityService>,
        content: Arc<dyn ContentCommand>,
        content_query: Arc<dyn ContentQuery>,
    ) -> Self {
        Self {
            identity,
            content,
            content_query,
        }
    }
}
