/*
 * Responsibility
 * - POST /auth/signup, /auth/login
 * - DTO validation → operation 呼び出し (認可 chain は operation 側)
 */
use axum::{Json, extract::State, http::StatusCode};
use serde_json::{Value, json};

use crate::api::v1::dto::auth::{LoginRequest, SignupRequest};
use crate::api::v1::extractors::Ctx;
use crate::error::AppError;
use crate::middleware::guard::OpArgs;
use crate::state::AppState;

pub async fn signup(
    State(state): State<AppState>,
    Ctx(ctx): Ctx,
    Json(req): Json<SignupRequest>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    req.validate()
        .map_err(|m| AppError::bad_request("INVALID_SIGNUP", m))?;

    let args = OpArgs::new(json!({
        "email": req.email,
        "password": req.password,
        "name": req.name,
    }));
    let out = (state.ops.signup)(args, ctx).await?;

    Ok((StatusCode::CREATED, Json(out)))
}

pub async fn login(
    State(state): State<AppState>,
    Ctx(ctx): Ctx,
    Json(req): Json<LoginRequest>,
) -> Result<Json<Value>, AppError> {
    req.validate()
        .map_err(|m| AppError::bad_request("INVALID_LOGIN", m))?;

    let args = OpArgs::new(json!({
        "email": req.email,
        "password": req.password,
    }));
    let out = (state.ops.login)(args, ctx).await?;

    Ok(Json(out))
}
