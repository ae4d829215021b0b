//! Post mutation handlers.

use actix_web::{HttpResponse, web};

use blog_core::services::PostInput;
use blog_shared::dto::PostRequest;

use crate::middleware::auth::Caller;
use crate::middleware::error::AppResult;
use crate::state::AppState;

fn into_input(req: PostRequest) -> PostInput {
    PostInput {
        title: req.title,
        content: req.content,
        tags: req.tags,
    }
}

/// POST /api/posts
pub async fn create_post(
    state: web::Data<AppState>,
    caller: Caller,
    body: web::Json<PostRequest>,
) -> AppResult<HttpResponse> {
    let payload = state
        .mutations
        .create_post(&caller.0, into_input(body.into_inner()))
        .await?;
    Ok(HttpResponse::Created().json(payload))
}

/// PUT /api/posts/{id}
pub async fn update_post(
    state: web::Data<AppState>,
    caller: Caller,
    path: web::Path<i64>,
    body: web::Json<PostRequest>,
) -> AppResult<HttpResponse> {
    let payload = state
        .mutations
        .update_post(&caller.0, path.into_inner(), into_input(body.into_inner()))
        .await?;
    Ok(HttpResponse::Ok().json(payload))
}

/// DELETE /api/posts/{id}
pub async fn delete_post(
    state: web::Data<AppState>,
    caller: Caller,
    path: web::Path<i64>,
) -> AppResult<HttpResponse> {
    let payload = state
        .mutations
        .delete_post(&caller.0, path.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(payload))
}

/// POST /api/posts/{id}/favorite
pub async fn toggle_favorite(
    state: web::Data<AppState>,
    caller: Caller,
    path: web::Path<i64>,
) -> AppResult<HttpResponse> {
    let payload = state
        .mutations
        .toggle_favorite(&caller.0, path.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(payload))
}
