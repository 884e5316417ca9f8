/*
 * Responsibility
 * - User モデルと users 側の store 操作
 * - friend_ids の対称性は add_friend / delete_user だけが触る
 */
use std::collections::BTreeSet;

use crate::store::units::{HeightUnit, WeightUnit};
use crate::store::{SocialStore, StoreError};

#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: i64,
    pub email: String,
    pub password_hash: String,
    pub name: Option<String>,
    pub age: Option<i32>,
    /// Symmetric: if this set contains B, B's set contains this user.
    pub friend_ids: BTreeSet<i64>,
    /// Centimetres.
    pub height: Option<f64>,
    /// Kilograms.
    pub weight: Option<f64>,
}

impl User {
    pub fn height_in(&self, unit: HeightUnit) -> Option<f64> {
        self.height.map(|cm| unit.from_centimetres(cm))
    }

    pub fn weight_in(&self, unit: WeightUnit) -> Option<f64> {
        self.weight.map(|kg| unit.from_kilograms(kg))
    }
}

#[derive(Debug, Clone, Default)]
pub struct NewUser {
    pub email: String,
    pub password_hash: String,
    pub name: Option<String>,
    pub age: Option<i32>,
    pub height: Option<f64>,
    pub weight: Option<f64>,
}

/// Partial update; absent fields are left untouched. The id is not part of
/// the patch on purpose.
#[derive(Debug, Clone, Default)]
pub struct UserPatch {
    pub name: Option<String>,
    pub age: Option<i32>,
}

impl SocialStore {
    pub fn create_user(&self, new: NewUser) -> Result<User, StoreError> {
        let mut inner = self.write();
        if inner.users.values().any(|u| u.email == new.email) {
            return Err(StoreError::DuplicateEmail);
        }

        inner.next_user_id += 1;
        let id = inner.next_user_id;
        let user = User {
            id,
            email: new.email,
            password_hash: new.password_hash,
            name: new.name,
            age: new.age,
            friend_ids: BTreeSet::new(),
            height: new.height,
            weight: new.weight,
        };
        inner.users.insert(id, user.clone());

        Ok(user)
    }

    pub fn user_by_id(&self, id: i64) -> Result<User, StoreError> {
        self.read()
            .users
            .get(&id)
            .cloned()
            .ok_or(StoreError::NotFound("user"))
    }

    pub fn user_by_email(&self, email: &str) -> Result<User, StoreError> {
        self.read()
            .users
            .values()
            .find(|u| u.email == email)
            .cloned()
            .ok_or(StoreError::NotFound("user"))
    }

    pub fn user_by_name(&self, name: &str) -> Result<User, StoreError> {
        self.read()
            .users
            .values()
            .find(|u| u.name.as_deref() == Some(name))
            .cloned()
            .ok_or(StoreError::NotFound("user"))
    }

    pub fn all_users(&self) -> Vec<User> {
        self.read().users.values().cloned().collect()
    }

    /// Materialize a set of ids in store iteration order (ascending id).
    /// Unknown ids are skipped.
    pub fn users_by_ids(&self, ids: &BTreeSet<i64>) -> Vec<User> {
        self.read()
            .users
            .values()
            .filter(|u| ids.contains(&u.id))
            .cloned()
            .collect()
    }

    pub fn update_user(&self, id: i64, patch: UserPatch) -> Result<User, StoreError> {
        let mut inner = self.write();
        let user = inner.users.get_mut(&id).ok_or(StoreError::NotFound("user"))?;

        if let Some(name) = patch.name {
            user.name = Some(name);
        }
        if let Some(age) = patch.age {
            user.age = Some(age);
        }

        Ok(user.clone())
    }

    /// Remove a user. The removed id is also scrubbed from every other
    /// user's friend set in the same critical section, so the symmetry
    /// invariant never dangles. Posts authored by the user are kept.
    pub fn delete_user(&self, id: i64) -> Result<User, StoreError> {
        let mut inner = self.write();
        let removed = inner.users.remove(&id).ok_or(StoreError::NotFound("user"))?;
        for user in inner.users.values_mut() {
            user.friend_ids.remove(&id);
        }

        Ok(removed)
    }

    /// Link two users as friends, both directions, all or nothing.
    /// Returns the caller's updated record.
    pub fn add_friend(&self, user_id: i64, friend_id: i64) -> Result<User, StoreError> {
        let mut inner = self.write();
        if !inner.users.contains_key(&friend_id) {
            return Err(StoreError::NotFound("user"));
        }
        let me = inner.users.get(&user_id).ok_or(StoreError::NotFound("user"))?;
        if me.friend_ids.contains(&friend_id) {
            return Err(StoreError::AlreadyFriends);
        }

        if let Some(me) = inner.users.get_mut(&user_id) {
            me.friend_ids.insert(friend_id);
        }
        if let Some(friend) = inner.users.get_mut(&friend_id) {
            friend.friend_ids.insert(user_id);
        }

        inner
            .users
            .get(&user_id)
            .cloned()
            .ok_or(StoreError::NotFound("user"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(email: &str, name: &str) -> NewUser {
        NewUser {
            email: email.to_string(),
            password_hash: "x".to_string(),
            name: Some(name.to_string()),
            ..NewUser::default()
        }
    }

    #[test]
    fn ids_are_monotonic_from_one_and_never_reused() {
        let store = SocialStore::new();
        let a = store.create_user(user("a@x.com", "A")).unwrap();
        let b = store.create_user(user("b@x.com", "B")).unwrap();
        assert_eq!(a.id, 1);
        assert_eq!(b.id, 2);

        store.delete_user(b.id).unwrap();
        let c = store.create_user(user("c@x.com", "C")).unwrap();
        assert_eq!(c.id, 3);
    }

    #[test]
    fn duplicate_email_is_rejected() {
        let store = SocialStore::new();
        store.create_user(user("a@x.com", "A")).unwrap();
        let err = store.create_user(user("a@x.com", "A2")).unwrap_err();
        assert_eq!(err, StoreError::DuplicateEmail);
    }

    #[test]
    fn lookups() {
        let store = SocialStore::new();
        let a = store.create_user(user("a@x.com", "Ann")).unwrap();
        assert_eq!(store.user_by_id(a.id).unwrap().email, "a@x.com");
        assert_eq!(store.user_by_email("a@x.com").unwrap().id, a.id);
        assert_eq!(store.user_by_name("Ann").unwrap().id, a.id);
        assert_eq!(store.user_by_id(99).unwrap_err(), StoreError::NotFound("user"));
    }

    #[test]
    fn update_merges_only_present_fields() {
        let store = SocialStore::new();
        let a = store.create_user(user("a@x.com", "Ann")).unwrap();

        let updated = store
            .update_user(
                a.id,
                UserPatch {
                    age: Some(30),
                    ..UserPatch::default()
                },
            )
            .unwrap();
        assert_eq!(updated.name.as_deref(), Some("Ann"));
        assert_eq!(updated.age, Some(30));
    }

    #[test]
    fn add_friend_is_symmetric_and_not_repeatable() {
        let store = SocialStore::new();
        let a = store.create_user(user("a@x.com", "A")).unwrap();
        let b = store.create_user(user("b@x.com", "B")).unwrap();

        let me = store.add_friend(a.id, b.id).unwrap();
        assert!(me.friend_ids.contains(&b.id));
        assert!(store.user_by_id(b.id).unwrap().friend_ids.contains(&a.id));

        assert_eq!(
            store.add_friend(a.id, b.id).unwrap_err(),
            StoreError::AlreadyFriends
        );
        // The relation is one pair, whichever side asks.
        assert_eq!(
            store.add_friend(b.id, a.id).unwrap_err(),
            StoreError::AlreadyFriends
        );
    }

    #[test]
    fn add_friend_with_unknown_user_changes_nothing() {
        let store = SocialStore::new();
        let a = store.create_user(user("a@x.com", "A")).unwrap();

        assert_eq!(
            store.add_friend(a.id, 42).unwrap_err(),
            StoreError::NotFound("user")
        );
        assert!(store.user_by_id(a.id).unwrap().friend_ids.is_empty());
    }

    #[test]
    fn users_by_ids_returns_store_order() {
        let store = SocialStore::new();
        let a = store.create_user(user("a@x.com", "A")).unwrap();
        let b = store.create_user(user("b@x.com", "B")).unwrap();
        let c = store.create_user(user("c@x.com", "C")).unwrap();

        let ids: BTreeSet<i64> = [c.id, a.id, b.id].into_iter().collect();
        let got: Vec<i64> = store.users_by_ids(&ids).into_iter().map(|u| u.id).collect();
        assert_eq!(got, vec![a.id, b.id, c.id]);
    }

    #[test]
    fn delete_user_scrubs_friend_sets() {
        let store = SocialStore::new();
        let a = store.create_user(user("a@x.com", "A")).unwrap();
        let b = store.create_user(user("b@x.com", "B")).unwrap();
        store.add_friend(a.id, b.id).unwrap();

        store.delete_user(b.id).unwrap();
        assert!(store.user_by_id(a.id).unwrap().friend_ids.is_empty());
        assert_eq!(store.user_by_id(b.id).unwrap_err(), StoreError::NotFound("user"));
    }

    #[test]
    fn concurrent_friend_requests_leave_one_symmetric_pair() {
        let store = SocialStore::new();
        let a = store.create_user(user("a@x.com", "A")).unwrap();
        let b = store.create_user(user("b@x.com", "B")).unwrap();

        let handles: Vec<_> = [(a.id, b.id), (b.id, a.id)]
            .into_iter()
            .map(|(from, to)| {
                let store = store.clone();
                std::thread::spawn(move || store.add_friend(from, to))
            })
            .collect();
        let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();

        // Exactly one side wins; the loser sees AlreadyFriends.
        assert_eq!(results.iter().filter(|r| r.is_ok()).count(), 1);
        assert_eq!(
            results.iter().filter(|r| r.is_err()).count(),
            1,
        );
        assert!(store.user_by_id(a.id).unwrap().friend_ids.contains(&b.id));
        assert!(store.user_by_id(b.id).unwrap().friend_ids.contains(&a.id));
    }
}
