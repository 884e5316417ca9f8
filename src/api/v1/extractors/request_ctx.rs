use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use crate::context::{Identity, RequestContext};
use crate::error::AppError;
use crate::state::AppState;

/// Handler で `RequestContext` を受け取るための extractor。
/// access middleware が `Identity` を request.extensions() に insert 済みである前提。
/// 見つからない場合は匿名として扱う (middleware が掛かっていない route では
/// どの操作も認可を通らない、fail-closed な既定値)。
pub struct Ctx(pub RequestContext);

impl FromRequestParts<AppState> for Ctx
where
    AppState: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let identity = parts
            .extensions
            .get::<Identity>()
            .cloned()
            .unwrap_or(Identity::Anonymous);

        Ok(Ctx(RequestContext::new(
            identity,
            state.store.clone(),
            state.auth.clone(),
        )))
    }
}
