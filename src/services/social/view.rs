use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::error::AppError;
use crate::middleware::guard::OpResult;
use crate::store::units::{HeightUnit, WeightUnit};
use crate::store::{Post, User};

/// Caller-facing shape of a user. Never carries the password hash.
#[derive(Debug, Serialize)]
pub struct UserView {
    pub id: i64,
    pub email: String,
    pub name: Option<String>,
    pub age: Option<i32>,
    pub friend_ids: Vec<i64>,
    pub height: Option<f64>,
    pub weight: Option<f64>,
}

impl UserView {
    pub fn with_units(user: User, height_unit: HeightUnit, weight_unit: WeightUnit) -> Self {
        let height = user.height_in(height_unit);
        let weight = user.weight_in(weight_unit);
        Self {
            id: user.id,
            email: user.email,
            name: user.name,
            age: user.age,
            friend_ids: user.friend_ids.into_iter().collect(),
            height,
            weight,
        }
    }
}

impl From<User> for UserView {
    fn from(user: User) -> Self {
        // Base units unless the caller asked for something else.
        Self::with_units(user, HeightUnit::Centimetre, WeightUnit::Kilogram)
    }
}

#[derive(Debug, Serialize)]
pub struct PostView {
    pub id: i64,
    pub author_id: i64,
    pub title: String,
    pub body: Option<String>,
    pub like_giver_ids: Vec<i64>,
    pub created_at: DateTime<Utc>,
}

impl From<Post> for PostView {
    fn from(post: Post) -> Self {
        Self {
            id: post.id,
            author_id: post.author_id,
            title: post.title,
            body: post.body,
            like_giver_ids: post.like_giver_ids.into_iter().collect(),
            created_at: post.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct TokenView {
    pub token: String,
    pub expires_in: i64,
}

pub(super) fn to_json<T: Serialize>(value: T) -> OpResult {
    serde_json::to_value(value).map_err(|e| {
        tracing::error!(error = %e, "failed to serialize operation result");
        AppError::Internal
    })
}
