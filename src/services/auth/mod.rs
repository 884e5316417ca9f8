pub mod credential;
pub mod token;

use std::sync::Arc;

use crate::config::Config;

pub use credential::CredentialService;
pub use token::TokenService;

/// Process-level auth services, built once from config and shared through
/// the application state.
#[derive(Clone, Debug)]
pub struct AuthService {
    pub credentials: CredentialService,
    pub tokens: TokenService,
}

/// Factory: build `AuthService` from application `Config`.
pub fn build_auth_service(config: &Config) -> Arc<AuthService> {
    Arc::new(AuthService {
        credentials: CredentialService::new(config.bcrypt_cost),
        tokens: TokenService::new(&config.auth_secret, config.token_ttl_seconds),
    })
}
