//! The operation dispatch table.
//!
//! Each operation is a base handler composed with its authorization chain
//! exactly once, at startup. The HTTP layer only parses arguments and picks
//! an entry; it never re-implements a check.

mod posts;
mod users;
mod view;

pub use view::{PostView, TokenView, UserView};

use crate::middleware::guard::{Check, Handler, wrap};

fn shout(s: &str) -> String {
    s.to_uppercase()
}

#[derive(Clone)]
pub struct Operations {
    pub hello: Handler,

    pub signup: Handler,
    pub login: Handler,

    pub me: Handler,
    pub update_my_info: Handler,
    pub add_friend: Handler,

    pub users: Handler,
    pub user: Handler,
    pub friends: Handler,
    pub user_posts: Handler,

    pub posts: Handler,
    pub post: Handler,
    pub like_givers: Handler,
    pub add_post: Handler,
    pub update_post: Handler,
    pub like_post: Handler,
    pub delete_post: Handler,
}

impl Operations {
    /// Build every chain. `RequireIdentity` always precedes
    /// `RequireOwnership`; that ordering is part of the chain contract.
    pub fn build() -> Self {
        Self {
            hello: wrap(users::hello(), vec![Check::ShapeText(shout)]),

            signup: users::signup(),
            login: users::login(),

            me: wrap(users::me(), vec![Check::RequireIdentity]),
            update_my_info: wrap(users::update_my_info(), vec![Check::RequireIdentity]),
            add_friend: wrap(users::add_friend(), vec![Check::RequireIdentity]),

            users: users::list(),
            user: users::get(),
            friends: users::friends(),
            user_posts: posts::by_author(),

            posts: posts::list(),
            post: posts::get(),
            like_givers: posts::like_givers(),
            add_post: wrap(posts::add(), vec![Check::RequireIdentity]),
            update_post: wrap(
                posts::update(),
                vec![Check::RequireIdentity, posts::author_only()],
            ),
            like_post: wrap(posts::like(), vec![Check::RequireIdentity]),
            delete_post: wrap(
                posts::delete(),
                vec![Check::RequireIdentity, posts::author_only()],
            ),
        }
    }
}
