/*
 * Responsibility
 * - 操作の前後に合成する認可チェック/整形の chain
 * - chain は起動時に一度だけ組む (per-call の動的 lookup はしない)
 */
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use serde_json::Value;

use crate::context::RequestContext;
use crate::error::AppError;

pub type OpResult = Result<Value, AppError>;
pub type OpFuture = Pin<Box<dyn Future<Output = OpResult> + Send>>;

/// A base operation, or a wrapped one; `wrap` returns the same shape it
/// takes, so chains nest.
pub type Handler = Arc<dyn Fn(OpArgs, RequestContext) -> OpFuture + Send + Sync>;

/// Arguments for one operation, already parsed out of the transport layer.
#[derive(Clone, Debug, Default)]
pub struct OpArgs(Value);

impl OpArgs {
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    pub fn none() -> Self {
        Self(Value::Null)
    }

    pub fn id(&self, key: &'static str) -> Result<i64, AppError> {
        self.0.get(key).and_then(Value::as_i64).ok_or_else(|| {
            AppError::bad_request(
                "MISSING_ARGUMENT",
                format!("argument \"{key}\" must be an integer id"),
            )
        })
    }

    pub fn str(&self, key: &'static str) -> Result<&str, AppError> {
        self.0.get(key).and_then(Value::as_str).ok_or_else(|| {
            AppError::bad_request(
                "MISSING_ARGUMENT",
                format!("argument \"{key}\" must be a string"),
            )
        })
    }

    pub fn opt_str(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(Value::as_str)
    }

    pub fn opt_i64(&self, key: &str) -> Option<i64> {
        self.0.get(key).and_then(Value::as_i64)
    }
}

/// Resolves the owner id of the resource named by `id_arg`, failing
/// `NotFound` when the resource does not exist.
pub type OwnerLookup = Arc<dyn Fn(&RequestContext, i64) -> Result<i64, AppError> + Send + Sync>;

pub struct OwnershipRule {
    pub id_arg: &'static str,
    pub owner_of: OwnerLookup,
}

/// One step of a chain. Pre-checks gate the base operation; `ShapeText` runs
/// after it. The two concerns compose independently and in any order
/// relative to each other, with one constraint: `RequireOwnership` belongs
/// after `RequireIdentity`, because ownership cannot be judged for an
/// anonymous caller (evaluated against one anyway, it refuses with
/// `Unauthenticated` rather than passing).
pub enum Check {
    /// Fail with `Unauthenticated` unless the context carries an identity.
    RequireIdentity,
    /// Fail with `Forbidden` unless the caller owns the target resource.
    RequireOwnership(OwnershipRule),
    /// Rewrite a textual result after the base operation ran. Results of any
    /// other type pass through untouched.
    ShapeText(fn(&str) -> String),
}

/// Adapt a plain async closure into a `Handler`.
pub fn op<F, Fut>(f: F) -> Handler
where
    F: Fn(OpArgs, RequestContext) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = OpResult> + Send + 'static,
{
    Arc::new(move |args, ctx| Box::pin(f(args, ctx)))
}

/// Compose a base operation with an ordered list of checks, built once at
/// startup. Pre-checks run in list order before the base operation;
/// post-transforms apply in list order to its result.
pub fn wrap(base: Handler, checks: Vec<Check>) -> Handler {
    let checks: Arc<[Check]> = checks.into();
    Arc::new(move |args: OpArgs, ctx: RequestContext| {
        let base = Arc::clone(&base);
        let checks = Arc::clone(&checks);
        Box::pin(async move {
            for check in checks.iter() {
                match check {
                    Check::RequireIdentity => {
                        ctx.identity.require()?;
                    }
                    Check::RequireOwnership(rule) => {
                        let caller_id = ctx.identity.require()?.id;
                        let resource_id = args.id(rule.id_arg)?;
                        let owner_id = (rule.owner_of)(&ctx, resource_id)?;
                        if owner_id != caller_id {
                            return Err(AppError::Forbidden);
                        }
                    }
                    Check::ShapeText(_) => {}
                }
            }

            let mut result = base(args, ctx).await?;

            for check in checks.iter() {
                if let Check::ShapeText(shape) = check {
                    if let Value::String(text) = &result {
                        result = Value::String(shape(text));
                    }
                }
            }

            Ok(result)
        })
    })
}
