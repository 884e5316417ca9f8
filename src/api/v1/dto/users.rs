/*
 * Responsibility
 * - Users 系の request DTO と query パラメータ
 */
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct UpdateMyInfoRequest {
    pub name: Option<String>,
    pub age: Option<i32>,
}

impl UpdateMyInfoRequest {
    pub fn validate(&self) -> Result<(), &'static str> {
        if let Some(name) = &self.name
            && name.trim().is_empty()
        {
            return Err("name cannot be empty");
        }
        if let Some(age) = self.age
            && age < 0
        {
            return Err("age cannot be negative");
        }

        Ok(())
    }
}

#[derive(Debug, Deserialize)]
pub struct AddFriendRequest {
    pub user_id: i64,
}

#[derive(Debug, Default, Deserialize)]
pub struct ListUsersQuery {
    pub name: Option<String>,
}

/// Unit names arrive as plain strings; unknown values are the store's
/// `UnsupportedUnit` failure, not a deserialization error.
#[derive(Debug, Default, Deserialize)]
pub struct UnitQuery {
    pub height_unit: Option<String>,
    pub weight_unit: Option<String>,
}
