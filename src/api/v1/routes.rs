/*
 * Responsibility
 * - v1 の URL 構造を定義
 * - /health, /auth, /me, /users, /posts を route
 * - identity 解決の middleware は app 側で router 全体に掛ける
 */
use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

use crate::api::v1::handlers::{
    auth::{login, signup},
    health::{health, hello},
    posts::{create_post, delete_post, get_post, like_post, list_posts, post_likes, update_post},
    users::{add_friend, get_user, list_users, me, update_my_info, user_friends, user_posts},
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .route("/hello", get(hello))
        .route("/auth/signup", post(signup))
        .route("/auth/login", post(login))
        .route("/me", get(me).put(update_my_info))
        .route("/me/friends", post(add_friend))
        .route("/users", get(list_users))
        .route("/users/{user_id}", get(get_user))
        .route("/users/{user_id}/friends", get(user_friends))
        .route("/users/{user_id}/posts", get(user_posts))
        .route("/posts", get(list_posts).post(create_post))
        .route(
            "/posts/{post_id}",
            get(get_post).put(update_post).delete(delete_post),
        )
        .route("/posts/{post_id}/like", post(like_post))
        .route("/posts/{post_id}/likes", get(post_likes))
}
