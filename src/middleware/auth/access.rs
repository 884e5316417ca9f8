//! Bearer credential → `Identity` を request extensions に入れる
//!
//! - credential なし: `Identity::Anonymous` のまま通す
//! - credential あり: 検証に成功すれば `Identity::Authenticated`、
//!   失敗すれば `SessionExpired` で fail-closed (匿名への silent fallback はしない)

use axum::{
    Router,
    body::Body,
    extract::State,
    http::{Request, header},
    middleware::{self, Next},
    response::Response,
};

use crate::context;
use crate::error::AppError;
use crate::state::AppState;

/// `/api/v1/*` に identity 解決を掛けるための middleware を適用する。
///
/// 例：
/// ```ignore
/// let v1 = api::v1::routes();
/// let v1 = middleware::auth::access::apply(v1, state.clone());
/// app = app.nest("/api/v1", v1);
/// ```
pub fn apply(router: Router<AppState>, state: AppState) -> Router<AppState> {
    // axum 0.8 の from_fn は State extractor を受け取れないため、`from_fn_with_state` で明示的に state を渡す
    router.layer(middleware::from_fn_with_state(state, access_middleware))
}

async fn access_middleware(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    // ヘッダが無いときだけ匿名。ヘッダがあるのに Bearer でなければ fail-closed。
    let bearer = match req.headers().get(header::AUTHORIZATION) {
        None => None,
        Some(value) => Some(
            value
                .to_str()
                .ok()
                .and_then(|v| v.strip_prefix("Bearer "))
                .ok_or_else(|| {
                    AppError::bad_request("INVALID_AUTHORIZATION", "expected a bearer token")
                })?,
        ),
    };

    let identity = context::resolve_identity(&state.auth, bearer)?;

    // middleware → extractor への受け渡し
    req.extensions_mut().insert(identity);

    Ok(next.run(req).await)
}
