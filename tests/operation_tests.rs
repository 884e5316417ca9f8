//! End-to-end scenario against the library surface: the dispatch table built
//! by `Operations::build`, driven directly with contexts and arguments.

use std::sync::Arc;

use serde_json::json;

use social_api::context::{Identity, RequestContext};
use social_api::error::AppError;
use social_api::middleware::guard::OpArgs;
use social_api::services::auth::{AuthService, CredentialService, TokenService};
use social_api::services::social::Operations;
use social_api::store::{NewPost, NewUser, SocialStore, StoreError};

fn auth_service() -> Arc<AuthService> {
    Arc::new(AuthService {
        credentials: CredentialService::new(4),
        tokens: TokenService::new("test-secret", 3600),
    })
}

fn anonymous(store: &SocialStore, auth: &Arc<AuthService>) -> RequestContext {
    RequestContext::new(Identity::Anonymous, store.clone(), auth.clone())
}

fn as_user(store: &SocialStore, auth: &Arc<AuthService>, id: i64) -> RequestContext {
    let token = auth
        .tokens
        .sign(id, &format!("u{id}@x.com"), None)
        .unwrap();
    let claims = auth.tokens.verify(&token).unwrap();
    RequestContext::new(Identity::Authenticated(claims), store.clone(), auth.clone())
}

fn two_users_one_post(store: &SocialStore) -> (i64, i64, i64) {
    let a = store
        .create_user(NewUser {
            email: "a@x.com".to_string(),
            password_hash: "x".to_string(),
            ..NewUser::default()
        })
        .unwrap();
    let b = store
        .create_user(NewUser {
            email: "b@x.com".to_string(),
            password_hash: "x".to_string(),
            ..NewUser::default()
        })
        .unwrap();
    let post = store
        .create_post(NewPost {
            author_id: a.id,
            title: "first".to_string(),
            body: None,
        })
        .unwrap();
    (a.id, b.id, post.id)
}

#[tokio::test]
async fn likes_friends_and_ownership_scenario() {
    let store = SocialStore::new();
    let auth = auth_service();
    let ops = Operations::build();
    let (user1, user2, post_id) = two_users_one_post(&store);

    // A like from the second user lands once.
    let out = (ops.like_post)(
        OpArgs::new(json!({ "post_id": post_id })),
        as_user(&store, &auth, user2),
    )
    .await
    .unwrap();
    assert_eq!(out["like_giver_ids"], json!([user2]));

    // The same like again toggles back off.
    let out = (ops.like_post)(
        OpArgs::new(json!({ "post_id": post_id })),
        as_user(&store, &auth, user2),
    )
    .await
    .unwrap();
    assert_eq!(out["like_giver_ids"], json!([]));

    // Linking the two users shows up on both sides.
    let out = (ops.add_friend)(
        OpArgs::new(json!({ "user_id": user2 })),
        as_user(&store, &auth, user1),
    )
    .await
    .unwrap();
    assert_eq!(out["friend_ids"], json!([user2]));
    assert_eq!(
        store.user_by_id(user2).unwrap().friend_ids,
        [user1].into_iter().collect()
    );

    // Deleting someone else's post is forbidden, and leaves it in place.
    let err = (ops.delete_post)(
        OpArgs::new(json!({ "post_id": post_id })),
        as_user(&store, &auth, user2),
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::Forbidden));
    assert!(store.post_by_id(post_id).is_ok());

    // The author may delete it, after which the id no longer resolves.
    (ops.delete_post)(
        OpArgs::new(json!({ "post_id": post_id })),
        as_user(&store, &auth, user1),
    )
    .await
    .unwrap();
    assert_eq!(
        store.post_by_id(post_id).unwrap_err(),
        StoreError::NotFound("post")
    );
}

#[tokio::test]
async fn signup_then_login_round_trips() {
    let store = SocialStore::new();
    let auth = auth_service();
    let ops = Operations::build();

    let out = (ops.signup)(
        OpArgs::new(json!({
            "email": "new@x.com",
            "password": "123456",
            "name": "New",
        })),
        anonymous(&store, &auth),
    )
    .await
    .unwrap();
    assert_eq!(out["id"], json!(1));
    // The password hash never leaves the store.
    assert!(out.get("password_hash").is_none());

    let out = (ops.login)(
        OpArgs::new(json!({ "email": "new@x.com", "password": "123456" })),
        anonymous(&store, &auth),
    )
    .await
    .unwrap();
    assert_eq!(out["expires_in"], json!(3600));
    let token = out["token"].as_str().unwrap();

    let claims = auth.tokens.verify(token).unwrap();
    assert_eq!(claims.id, 1);
    assert_eq!(claims.email, "new@x.com");
    assert_eq!(claims.name.as_deref(), Some("New"));
}

#[tokio::test]
async fn login_failures_are_invalid_credentials() {
    let store = SocialStore::new();
    let auth = auth_service();
    let ops = Operations::build();

    (ops.signup)(
        OpArgs::new(json!({ "email": "new@x.com", "password": "123456" })),
        anonymous(&store, &auth),
    )
    .await
    .unwrap();

    for body in [
        json!({ "email": "new@x.com", "password": "wrong!" }),
        json!({ "email": "nobody@x.com", "password": "123456" }),
    ] {
        let err = (ops.login)(OpArgs::new(body), anonymous(&store, &auth))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::InvalidCredentials));
    }
}

#[tokio::test]
async fn gated_operations_refuse_anonymous_callers() {
    let store = SocialStore::new();
    let auth = auth_service();
    let ops = Operations::build();
    let (_, _, post_id) = two_users_one_post(&store);

    for (op, args) in [
        (ops.me.clone(), OpArgs::none()),
        (ops.add_post.clone(), OpArgs::new(json!({ "title": "t" }))),
        (ops.like_post.clone(), OpArgs::new(json!({ "post_id": post_id }))),
        (ops.delete_post.clone(), OpArgs::new(json!({ "post_id": post_id }))),
    ] {
        let err = op(args, anonymous(&store, &auth)).await.unwrap_err();
        assert!(matches!(err, AppError::Unauthenticated));
    }
}

#[tokio::test]
async fn unit_conversion_arguments_are_honored() {
    let store = social_api::store::seed::demo().unwrap();
    let auth = auth_service();
    let ops = Operations::build();

    let out = (ops.user)(
        OpArgs::new(json!({ "user_id": 1, "height_unit": "METRE", "weight_unit": "POUND" })),
        anonymous(&store, &auth),
    )
    .await
    .unwrap();
    assert_eq!(out["height"], json!(1.75));
    assert!((out["weight"].as_f64().unwrap() - 132.277_357).abs() < 1e-5);

    let err = (ops.user)(
        OpArgs::new(json!({ "user_id": 1, "height_unit": "FURLONG" })),
        anonymous(&store, &auth),
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::UnsupportedUnit(u) if u == "FURLONG"));
}

#[tokio::test]
async fn hello_is_shaped_uppercase() {
    let store = SocialStore::new();
    let auth = auth_service();
    let ops = Operations::build();

    let out = (ops.hello)(OpArgs::none(), anonymous(&store, &auth))
        .await
        .unwrap();
    assert_eq!(out, json!("HELLO WORLD!"));
}
