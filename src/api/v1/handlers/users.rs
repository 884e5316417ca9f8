/*
 * Responsibility
 * - /users 系の read handler と /me 系の handler
 * - Path/Query/Json を extractor で受け、OpArgs に詰めて operation を呼ぶ
 */
use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde_json::{Value, json};

use crate::api::v1::dto::users::{AddFriendRequest, ListUsersQuery, UnitQuery, UpdateMyInfoRequest};
use crate::api::v1::extractors::Ctx;
use crate::error::AppError;
use crate::middleware::guard::OpArgs;
use crate::state::AppState;

pub async fn me(State(state): State<AppState>, Ctx(ctx): Ctx) -> Result<Json<Value>, AppError> {
    let out = (state.ops.me)(OpArgs::none(), ctx).await?;
    Ok(Json(out))
}

pub async fn update_my_info(
    State(state): State<AppState>,
    Ctx(ctx): Ctx,
    Json(req): Json<UpdateMyInfoRequest>,
) -> Result<Json<Value>, AppError> {
    req.validate()
        .map_err(|m| AppError::bad_request("INVALID_PROFILE", m))?;

    let args = OpArgs::new(json!({ "name": req.name, "age": req.age }));
    let out = (state.ops.update_my_info)(args, ctx).await?;

    Ok(Json(out))
}

pub async fn add_friend(
    State(state): State<AppState>,
    Ctx(ctx): Ctx,
    Json(req): Json<AddFriendRequest>,
) -> Result<Json<Value>, AppError> {
    let args = OpArgs::new(json!({ "user_id": req.user_id }));
    let out = (state.ops.add_friend)(args, ctx).await?;

    Ok(Json(out))
}

pub async fn list_users(
    State(state): State<AppState>,
    Ctx(ctx): Ctx,
    Query(query): Query<ListUsersQuery>,
) -> Result<Json<Value>, AppError> {
    let args = OpArgs::new(json!({ "name": query.name }));
    let out = (state.ops.users)(args, ctx).await?;

    Ok(Json(out))
}

pub async fn get_user(
    State(state): State<AppState>,
    Ctx(ctx): Ctx,
    Path(user_id): Path<i64>,
    Query(units): Query<UnitQuery>,
) -> Result<Json<Value>, AppError> {
    let args = OpArgs::new(json!({
        "user_id": user_id,
        "height_unit": units.height_unit,
        "weight_unit": units.weight_unit,
    }));
    let out = (state.ops.user)(args, ctx).await?;

    Ok(Json(out))
}

pub async fn user_friends(
    State(state): State<AppState>,
    Ctx(ctx): Ctx,
    Path(user_id): Path<i64>,
) -> Result<Json<Value>, AppError> {
    let args = OpArgs::new(json!({ "user_id": user_id }));
    let out = (state.ops.friends)(args, ctx).await?;

    Ok(Json(out))
}

pub async fn user_posts(
    State(state): State<AppState>,
    Ctx(ctx): Ctx,
    Path(user_id): Path<i64>,
) -> Result<Json<Value>, AppError> {
    let args = OpArgs::new(json!({ "user_id": user_id }));
    let out = (state.ops.user_posts)(args, ctx).await?;

    Ok(Json(out))
}
