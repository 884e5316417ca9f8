//! Post-side base operations plus the ownership rule the mutating chains
//! are composed with.

use std::sync::Arc;

use crate::middleware::guard::{Check, Handler, OwnershipRule, op};
use crate::services::social::view::{PostView, UserView, to_json};
use crate::store::{NewPost, PostPatch};

/// Only the author of the post named by `post_id` may pass.
pub(super) fn author_only() -> Check {
    Check::RequireOwnership(OwnershipRule {
        id_arg: "post_id",
        owner_of: Arc::new(|ctx, id| Ok(ctx.store.post_by_id(id)?.author_id)),
    })
}

pub(super) fn list() -> Handler {
    op(|_args, ctx| async move {
        let posts = ctx.store.all_posts();
        to_json(posts.into_iter().map(PostView::from).collect::<Vec<_>>())
    })
}

pub(super) fn get() -> Handler {
    op(|args, ctx| async move {
        let post = ctx.store.post_by_id(args.id("post_id")?)?;
        to_json(PostView::from(post))
    })
}

pub(super) fn by_author() -> Handler {
    op(|args, ctx| async move {
        // 404 for an unknown user rather than an empty list.
        let user = ctx.store.user_by_id(args.id("user_id")?)?;
        let posts = ctx.store.posts_by_author(user.id);
        to_json(posts.into_iter().map(PostView::from).collect::<Vec<_>>())
    })
}

pub(super) fn like_givers() -> Handler {
    op(|args, ctx| async move {
        let post = ctx.store.post_by_id(args.id("post_id")?)?;
        let users = ctx.store.users_by_ids(&post.like_giver_ids);
        to_json(users.into_iter().map(UserView::from).collect::<Vec<_>>())
    })
}

pub(super) fn add() -> Handler {
    op(|args, ctx| async move {
        let claims = ctx.identity.require()?;
        let post = ctx.store.create_post(NewPost {
            author_id: claims.id,
            title: args.str("title")?.to_string(),
            body: args.opt_str("body").map(str::to_string),
        })?;

        tracing::info!(post_id = post.id, author_id = post.author_id, "post created");
        to_json(PostView::from(post))
    })
}

pub(super) fn update() -> Handler {
    op(|args, ctx| async move {
        let patch = PostPatch {
            title: args.opt_str("title").map(str::to_string),
            body: args.opt_str("body").map(str::to_string),
        };
        let post = ctx.store.update_post(args.id("post_id")?, patch)?;
        to_json(PostView::from(post))
    })
}

pub(super) fn like() -> Handler {
    op(|args, ctx| async move {
        let claims = ctx.identity.require()?;
        let post = ctx.store.toggle_like(args.id("post_id")?, claims.id)?;
        to_json(PostView::from(post))
    })
}

pub(super) fn delete() -> Handler {
    op(|args, ctx| async move {
        let post = ctx.store.delete_post(args.id("post_id")?)?;
        tracing::info!(post_id = post.id, "post deleted");
        to_json(PostView::from(post))
    })
}
