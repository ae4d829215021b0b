//! Tag mutation handlers.

use actix_web::{HttpResponse, web};

use blog_core::services::TagInput;
use blog_shared::dto::TagRequest;

use crate::middleware::auth::Caller;
use crate::middleware::error::AppResult;
use crate::state::AppState;

fn into_input(req: TagRequest) -> TagInput {
    TagInput {
        name: req.name,
        slug: req.slug,
    }
}

/// POST /api/tags
pub async fn create_tag(
    state: web::Data<AppState>,
    caller: Caller,
    body: web::Json<TagRequest>,
) -> AppResult<HttpResponse> {
    let payload = state
        .mutations
        .create_tag(&caller.0, into_input(body.into_inner()))
        .await?;
    Ok(HttpResponse::Created().json(payload))
}

/// PUT /api/tags/{id}
pub async fn update_tag(
    state: web::Data<AppState>,
    caller: Caller,
    path: web::Path<i64>,
    body: web::Json<TagRequest>,
) -> AppResult<HttpResponse> {
    let payload = state
        .mutations
        .update_tag(&caller.0, path.into_inner(), into_input(body.into_inner()))
        .await?;
    Ok(HttpResponse::Ok().json(payload))
}

/// DELETE /api/tags/{id}
pub async fn delete_tag(
    state: web::Data<AppState>,
    caller: Caller,
    path: web::Path<i64>,
) -> AppResult<HttpResponse> {
    let payload = state
        .mutations
        .delete_tag(&caller.0, path.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(payload))
}
