//! Comment mutation handlers.

use actix_web::{HttpResponse, web};

use blog_core::services::CommentInput;
use blog_shared::dto::{CreateCommentRequest, UpdateCommentRequest};

use crate::middleware::auth::Caller;
use crate::middleware::error::AppResult;
use crate::state::AppState;

/// POST /api/comments
pub async fn create_comment(
    state: web::Data<AppState>,
    caller: Caller,
    body: web::Json<CreateCommentRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    let input = CommentInput {
        post_slug: req.post_slug,
        email: req.email,
        comment: req.comment,
    };

    let payload = state.mutations.create_comment(&caller.0, input).await?;
    Ok(HttpResponse::Created().json(payload))
}

/// PUT /api/comments/{id}
pub async fn update_comment(
    state: web::Data<AppState>,
    caller: Caller,
    path: web::Path<i64>,
    body: web::Json<UpdateCommentRequest>,
) -> AppResult<HttpResponse> {
    let payload = state
        .mutations
        .update_comment(&caller.0, path.into_inner(), &body.comment)
        .await?;
    Ok(HttpResponse::Ok().json(payload))
}

/// DELETE /api/comments/{id}
pub async fn delete_comment(
    state: web::Data<AppState>,
    caller: Caller,
    path: web::Path<i64>,
) -> AppResult<HttpResponse> {
    let payload = state
        .mutations
        .delete_comment(&caller.0, path.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(payload))
}
