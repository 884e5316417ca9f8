/*
 * Responsibility
 * - Router に紐づける共有コンテキスト (AppState)
 * - Clone 前提で持つ (内部は Arc/Clone cheap)
 */
use std::sync::Arc;

use crate::services::auth::AuthService;
use crate::services::social::Operations;
use crate::store::SocialStore;

#[derive(Clone)]
pub struct AppState {
    pub store: SocialStore,
    pub auth: Arc<AuthService>,
    pub ops: Arc<Operations>,
}

impl AppState {
    pub fn new(store: SocialStore, auth: Arc<AuthService>) -> Self {
        Self {
            store,
            auth,
            ops: Arc::new(Operations::build()),
        }
    }
}
