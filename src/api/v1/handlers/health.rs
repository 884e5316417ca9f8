/*
 * Responsibility
 * - GET /health (疎通用)
 * - GET /hello (整形 chain を通る最小の operation)
 */
use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use serde_json::{Value, json};

use crate::api::v1::extractors::Ctx;
use crate::error::AppError;
use crate::middleware::guard::OpArgs;
use crate::state::AppState;

pub async fn health() -> impl IntoResponse {
    (StatusCode::OK, Json(json!({"status": "ok"})))
}

pub async fn hello(State(state): State<AppState>, Ctx(ctx): Ctx) -> Result<Json<Value>, AppError> {
    let out = (state.ops.hello)(OpArgs::none(), ctx).await?;
    Ok(Json(out))
}
