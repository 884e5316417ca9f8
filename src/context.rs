/*
 * Responsibility
 * - リクエスト単位の文脈 (identity + store + auth services)
 * - bearer credential から identity を解決する
 */
use std::sync::Arc;

use crate::error::AppError;
use crate::services::auth::AuthService;
use crate::services::auth::token::Claims;
use crate::store::SocialStore;

/// Who is calling. Checked explicitly by every authorization check; there is
/// no nullable "maybe user" field anywhere else.
#[derive(Clone, Debug)]
pub enum Identity {
    Anonymous,
    Authenticated(Claims),
}

impl Identity {
    pub fn claims(&self) -> Option<&Claims> {
        match self {
            Identity::Anonymous => None,
            Identity::Authenticated(claims) => Some(claims),
        }
    }

    pub fn require(&self) -> Result<&Claims, AppError> {
        self.claims().ok_or(AppError::Unauthenticated)
    }

    pub fn is_anonymous(&self) -> bool {
        matches!(self, Identity::Anonymous)
    }
}

/// Everything an operation may touch for one request. Cheap to clone; the
/// store handle and service bundle are shared, the identity is per request.
#[derive(Clone, Debug)]
pub struct RequestContext {
    pub identity: Identity,
    pub store: SocialStore,
    pub auth: Arc<AuthService>,
}

impl RequestContext {
    pub fn new(identity: Identity, store: SocialStore, auth: Arc<AuthService>) -> Self {
        Self {
            identity,
            store,
            auth,
        }
    }
}

/// Resolve the caller identity from an optional bearer credential.
///
/// No credential yields an anonymous identity. A presented credential either
/// verifies into an authenticated identity or fails the request with
/// `SessionExpired`; presenting a credential never silently downgrades to
/// anonymous.
pub fn resolve_identity(
    auth: &AuthService,
    bearer: Option<&str>,
) -> Result<Identity, AppError> {
    match bearer {
        None => Ok(Identity::Anonymous),
        Some(token) => match auth.tokens.verify(token) {
            Ok(claims) => Ok(Identity::Authenticated(claims)),
            Err(err) => {
                tracing::warn!(error = %err, "bearer credential rejected");
                Err(AppError::SessionExpired)
            }
        },
    }
}
