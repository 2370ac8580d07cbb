//! Comment handlers nested under a post.
//!
//! ```text
//! GET    /api/posts/{id}/comments
//! POST   /api/posts/{id}/comments               {"content":"Buen post"}
//! DELETE /api/posts/{id}/comments/{comment_id}
//! ```

use actix_web::{HttpResponse, delete, get, post, web};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::domain::Comment;
use crate::domain::ports::{CreateCommentRequest, DeleteCommentRequest};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::{CommentSchema, ErrorSchema, MessageSchema};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{parse_comment_id, parse_post_id};

const COMMENT_DELETED: &str = "Comentario eliminado";

/// Body for `POST /api/posts/{id}/comments`.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
pub struct CreateCommentBody {
    #[serde(default)]
    #[schema(example = "Buen post")]
    pub content: String,
}

/// List the comments of a post, oldest first.
///
/// Unknown posts yield an empty list rather than `404`.
#[utoipa::path(
    get,
    path = "/api/posts/{id}/comments",
    params(("id" = i32, Path, description = "Post identifier")),
    responses(
        (status = 200, description = "Comments, oldest first", body = [CommentSchema]),
        (status = 400, description = "Invalid id", body = ErrorSchema)
    ),
    tags = ["comments"],
    operation_id = "listComments",
    security([])
)]
#[get("/posts/{id}/comments")]
pub async fn list_comments(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<Vec<Comment>>> {
    let post_id = parse_post_id(&path)?;
    let comments = state.content_query.list_comments(post_id).await?;
    Ok(web::Json(comments))
}

/// Comment on a post as the signed-in user.
#[utoipa::path(
    post,
    path = "/api/posts/{id}/comments",
    params(("id" = i32, Path, description = "Post identifier")),
    request_body = CreateCommentBody,
    responses(
        (status = 201, description = "Comment created", body = CommentSchema),
        (status = 400, description = "Invalid id or empty content", body = ErrorSchema),
        (status = 401, description = "Login required", body = ErrorSchema),
        (status = 404, description = "Post or author not found", body = ErrorSchema)
    ),
    tags = ["comments"],
    operation_id = "createComment"
)]
#[post("/posts/{id}/comments")]
pub async fn create_comment(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
    payload: web::Json<CreateCommentBody>,
) -> ApiResult<HttpResponse> {
    let author_id = session.require_user_id()?;
    let post_id = parse_post_id(&path)?;
    let comment = state
        .content
        .create_comment(CreateCommentRequest {
            post_id,
            content: payload.into_inner().content,
            author_id,
        })
        .await?;
    Ok(HttpResponse::Created().json(comment))
}

/// Delete one of the signed-in user's comments.
///
/// A comment that does not exist, belongs to another post, or belongs to
/// another user is reported as `403` with the same message.
#[utoipa::path(
    delete,
    path = "/api/posts/{id}/comments/{comment_id}",
    params(
        ("id" = i32, Path, description = "Post identifier"),
        ("comment_id" = i32, Path, description = "Comment identifier")
    ),
    responses(
        (status = 200, description = "Comment deleted", body = MessageSchema),
        (status = 400, description = "Invalid id", body = ErrorSchema),
        (status = 401, description = "Login required", body = ErrorSchema),
        (status = 403, description = "Not the author, or no such comment", body = ErrorSchema),
        (status = 404, description = "Post or requester not found", body = ErrorSchema)
    ),
    tags = ["comments"],
    operation_id = "deleteComment"
)]
#[delete("/posts/{id}/comments/{comment_id}")]
pub async fn delete_comment(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<(String, String)>,
) -> ApiResult<HttpResponse> {
    let requester_id = session.require_user_id()?;
    let (raw_post_id, raw_comment_id) = path.into_inner();
    let post_id = parse_post_id(&raw_post_id)?;
    let comment_id = parse_comment_id(&raw_comment_id)?;
    state
        .content
        .delete_comment(DeleteCommentRequest {
            post_id,
            comment_id,
            requester_id,
        })
        .await?;
    Ok(HttpResponse::Ok().json(json!({ "message": COMMENT_DELETED })))
}

#[cfg(test)]
#[path = "comments_tests.rs"]
mod tests;
