//! Post handlers.
//!
//! ```text
//! GET    /api/posts
//! POST   /api/posts       {"title":"Hola","content":"Mundo"}
//! GET    /api/posts/{id}
//! DELETE /api/posts/{id}
//! ```

use actix_web::{HttpResponse, delete, get, post, web};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::domain::{Error, Post};
use crate::domain::ports::{CreatePostRequest, DeletePostRequest};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::{ErrorSchema, MessageSchema, PostSchema};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::parse_post_id;

const POST_NOT_FOUND: &str = "post no encontrado";
const POST_DELETED: &str = "Post eliminado";

/// Body for `POST /api/posts`.
///
/// Emptiness is checked by the content service, so blank fields reach it
/// unchanged.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
pub struct CreatePostBody {
    #[serde(default)]
    #[schema(example = "Mi primer post")]
    pub title: String,
    #[serde(default)]
    #[schema(example = "Hola mundo")]
    pub content: String,
}

/// List every post, newest first.
#[utoipa::path(
    get,
    path = "/api/posts",
    responses(
        (status = 200, description = "Posts, newest first", body = [PostSchema]),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["posts"],
    operation_id = "listPosts",
    security([])
)]
#[get("/posts")]
pub async fn list_posts(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<Post>>> {
    let posts = state.content_query.list_posts().await?;
    Ok(web::Json(posts))
}

/// Publish a post as the signed-in user.
#[utoipa::path(
    post,
    path = "/api/posts",
    request_body = CreatePostBody,
    responses(
        (status = 201, description = "Post created", body = PostSchema),
        (status = 400, description = "Missing title or content", body = ErrorSchema),
        (status = 401, description = "Login required", body = ErrorSchema),
        (status = 404, description = "Author no longer exists", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["posts"],
    operation_id = "createPost"
)]
#[post("/posts")]
pub async fn create_post(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<CreatePostBody>,
) -> ApiResult<HttpResponse> {
    let author_id = session.require_user_id()?;
    let CreatePostBody { title, content } = payload.into_inner();
    let post = state
        .content
        .create_post(CreatePostRequest {
            title,
            content,
            author_id,
        })
        .await?;
    Ok(HttpResponse::Created().json(post))
}

/// Fetch a single post.
#[utoipa::path(
    get,
    path = "/api/posts/{id}",
    params(("id" = i32, Path, description = "Post identifier")),
    responses(
        (status = 200, description = "Post", body = PostSchema),
        (status = 400, description = "Invalid id", body = ErrorSchema),
        (status = 404, description = "Post not found", body = ErrorSchema)
    ),
    tags = ["posts"],
    operation_id = "getPost",
    security([])
)]
#[get("/posts/{id}")]
pub async fn get_post(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<Post>> {
    let post_id = parse_post_id(&path)?;
    state
        .content_query
        .get_post(post_id)
        .await?
        .map(web::Json)
        .ok_or_else(|| Error::not_found(POST_NOT_FOUND))
}

/// Delete a post owned by the signed-in user.
#[utoipa::path(
    delete,
    path = "/api/posts/{id}",
    params(("id" = i32, Path, description = "Post identifier")),
    responses(
        (status = 200, description = "Post deleted", body = MessageSchema),
        (status = 400, description = "Invalid id", body = ErrorSchema),
        (status = 401, description = "Login required", body = ErrorSchema),
        (status = 403, description = "Not the owner", body = ErrorSchema),
        (status = 404, description = "Post not found", body = ErrorSchema)
    ),
    tags = ["posts"],
    operation_id = "deletePost"
)]
#[delete("/posts/{id}")]
pub async fn delete_post(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let requester_id = session.require_user_id()?;
    let post_id = parse_post_id(&path)?;
    state
        .content
        .delete_post(DeletePostRequest {
            post_id,
            requester_id,
        })
        .await?;
    Ok(HttpResponse::Ok().json(json!({ "message": POST_DELETED })))
}

#[cfg(test)]
#[path = "posts_tests.rs"]
mod tests;
