//! User-side base operations: signup, login, profile reads and updates,
//! friend linking. Authorization is composed on top in `Operations::build`,
//! not here.

use crate::error::AppError;
use crate::middleware::guard::{Handler, op};
use crate::services::social::view::{TokenView, UserView, to_json};
use crate::store::units::{HeightUnit, WeightUnit};
use crate::store::{NewUser, UserPatch};

pub(super) fn hello() -> Handler {
    op(|_args, _ctx| async move { Ok(serde_json::Value::String("Hello World!".to_string())) })
}

pub(super) fn signup() -> Handler {
    op(|args, ctx| async move {
        let email = args.str("email")?.to_string();
        let password = args.str("password")?;
        let name = args.opt_str("name").map(str::to_string);

        // Hash before storing, always. The store rejects duplicate emails.
        let password_hash = ctx.auth.credentials.hash(password)?;
        let user = ctx.store.create_user(NewUser {
            email,
            password_hash,
            name,
            ..NewUser::default()
        })?;

        tracing::info!(user_id = user.id, "user signed up");
        to_json(UserView::from(user))
    })
}

pub(super) fn login() -> Handler {
    op(|args, ctx| async move {
        let email = args.str("email")?;
        let password = args.str("password")?;

        // An unknown email and a wrong password are the same failure to the
        // caller.
        let user = ctx
            .store
            .user_by_email(email)
            .map_err(|_| AppError::InvalidCredentials)?;
        if !ctx.auth.credentials.compare(password, &user.password_hash)? {
            return Err(AppError::InvalidCredentials);
        }

        let token = ctx
            .auth
            .tokens
            .sign(user.id, &user.email, user.name.as_deref())?;
        to_json(TokenView {
            token,
            expires_in: ctx.auth.tokens.ttl_seconds(),
        })
    })
}

pub(super) fn me() -> Handler {
    op(|_args, ctx| async move {
        let claims = ctx.identity.require()?;
        let user = ctx.store.user_by_id(claims.id)?;
        to_json(UserView::from(user))
    })
}

pub(super) fn update_my_info() -> Handler {
    op(|args, ctx| async move {
        let claims = ctx.identity.require()?;
        let patch = UserPatch {
            name: args.opt_str("name").map(str::to_string),
            age: args.opt_i64("age").map(|v| v as i32),
        };

        let user = ctx.store.update_user(claims.id, patch)?;
        to_json(UserView::from(user))
    })
}

pub(super) fn add_friend() -> Handler {
    op(|args, ctx| async move {
        let claims = ctx.identity.require()?;
        let friend_id = args.id("user_id")?;

        let user = ctx.store.add_friend(claims.id, friend_id)?;
        tracing::info!(user_id = user.id, friend_id, "friend pair linked");
        to_json(UserView::from(user))
    })
}

pub(super) fn list() -> Handler {
    op(|args, ctx| async move {
        let users = match args.opt_str("name") {
            Some(name) => vec![ctx.store.user_by_name(name)?],
            None => ctx.store.all_users(),
        };
        to_json(users.into_iter().map(UserView::from).collect::<Vec<_>>())
    })
}

pub(super) fn get() -> Handler {
    op(|args, ctx| async move {
        let user = ctx.store.user_by_id(args.id("user_id")?)?;

        let height_unit = match args.opt_str("height_unit") {
            Some(s) => s.parse::<HeightUnit>()?,
            None => HeightUnit::Centimetre,
        };
        let weight_unit = match args.opt_str("weight_unit") {
            Some(s) => s.parse::<WeightUnit>()?,
            None => WeightUnit::Kilogram,
        };

        to_json(UserView::with_units(user, height_unit, weight_unit))
    })
}

pub(super) fn friends() -> Handler {
    op(|args, ctx| async move {
        let user = ctx.store.user_by_id(args.id("user_id")?)?;
        let friends = ctx.store.users_by_ids(&user.friend_ids);
        to_json(friends.into_iter().map(UserView::from).collect::<Vec<_>>())
    })
}
