/*
 * Responsibility
 * - /posts 系 handler
 * - 認可 (identity / ownership) は operation の chain 側で効く
 */
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde_json::{Value, json};

use crate::api::v1::dto::posts::{CreatePostRequest, UpdatePostRequest};
use crate::api::v1::extractors::Ctx;
use crate::error::AppError;
use crate::middleware::guard::OpArgs;
use crate::state::AppState;

pub async fn list_posts(
    State(state): State<AppState>,
    Ctx(ctx): Ctx,
) -> Result<Json<Value>, AppError> {
    let out = (state.ops.posts)(OpArgs::none(), ctx).await?;
    Ok(Json(out))
}

pub async fn get_post(
    State(state): State<AppState>,
    Ctx(ctx): Ctx,
    Path(post_id): Path<i64>,
) -> Result<Json<Value>, AppError> {
    let args = OpArgs::new(json!({ "post_id": post_id }));
    let out = (state.ops.post)(args, ctx).await?;

    Ok(Json(out))
}

pub async fn post_likes(
    State(state): State<AppState>,
    Ctx(ctx): Ctx,
    Path(post_id): Path<i64>,
) -> Result<Json<Value>, AppError> {
    let args = OpArgs::new(json!({ "post_id": post_id }));
    let out = (state.ops.like_givers)(args, ctx).await?;

    Ok(Json(out))
}

pub async fn create_post(
    State(state): State<AppState>,
    Ctx(ctx): Ctx,
    Json(req): Json<CreatePostRequest>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    req.validate()
        .map_err(|m| AppError::bad_request("INVALID_POST", m))?;

    let args = OpArgs::new(json!({ "title": req.title, "body": req.body }));
    let out = (state.ops.add_post)(args, ctx).await?;

    Ok((StatusCode::CREATED, Json(out)))
}

pub async fn update_post(
    State(state): State<AppState>,
    Ctx(ctx): Ctx,
    Path(post_id): Path<i64>,
    Json(req): Json<UpdatePostRequest>,
) -> Result<Json<Value>, AppError> {
    req.validate()
        .map_err(|m| AppError::bad_request("INVALID_POST", m))?;

    let args = OpArgs::new(json!({
        "post_id": post_id,
        "title": req.title,
        "body": req.body,
    }));
    let out = (state.ops.update_post)(args, ctx).await?;

    Ok(Json(out))
}

pub async fn like_post(
    State(state): State<AppState>,
    Ctx(ctx): Ctx,
    Path(post_id): Path<i64>,
) -> Result<Json<Value>, AppError> {
    let args = OpArgs::new(json!({ "post_id": post_id }));
    let out = (state.ops.like_post)(args, ctx).await?;

    Ok(Json(out))
}

pub async fn delete_post(
    State(state): State<AppState>,
    Ctx(ctx): Ctx,
    Path(post_id): Path<i64>,
) -> Result<Json<Value>, AppError> {
    let args = OpArgs::new(json!({ "post_id": post_id }));
    let out = (state.ops.delete_post)(args, ctx).await?;

    Ok(Json(out))
}
