/*
 * Responsibility
 * - Post モデルと posts 側の store 操作
 * - like_giver_ids のトグルは 1 critical section で read-check-write
 */
use std::collections::BTreeSet;

use chrono::{DateTime, Utc};

use crate::store::{SocialStore, StoreError};

#[derive(Debug, Clone, PartialEq)]
pub struct Post {
    pub id: i64,
    pub author_id: i64,
    pub title: String,
    pub body: Option<String>,
    /// Set semantics: one entry per user, repeated likes toggle membership.
    pub like_giver_ids: BTreeSet<i64>,
    /// Set at creation, immutable afterwards.
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewPost {
    pub author_id: i64,
    pub title: String,
    pub body: Option<String>,
}

/// Partial update; id, author_id and created_at are not patchable.
#[derive(Debug, Clone, Default)]
pub struct PostPatch {
    pub title: Option<String>,
    pub body: Option<String>,
}

impl SocialStore {
    /// Create a post. The author must resolve to an existing user at the
    /// moment of creation; the check and the insert share one critical
    /// section.
    pub fn create_post(&self, new: NewPost) -> Result<Post, StoreError> {
        let mut inner = self.write();
        if !inner.users.contains_key(&new.author_id) {
            return Err(StoreError::NotFound("user"));
        }

        inner.next_post_id += 1;
        let id = inner.next_post_id;
        let post = Post {
            id,
            author_id: new.author_id,
            title: new.title,
            body: new.body,
            like_giver_ids: BTreeSet::new(),
            created_at: Utc::now(),
        };
        inner.posts.insert(id, post.clone());

        Ok(post)
    }

    pub fn post_by_id(&self, id: i64) -> Result<Post, StoreError> {
        self.read()
            .posts
            .get(&id)
            .cloned()
            .ok_or(StoreError::NotFound("post"))
    }

    pub fn all_posts(&self) -> Vec<Post> {
        self.read().posts.values().cloned().collect()
    }

    /// Materialize a set of ids in store iteration order (ascending id).
    pub fn posts_by_ids(&self, ids: &BTreeSet<i64>) -> Vec<Post> {
        self.read()
            .posts
            .values()
            .filter(|p| ids.contains(&p.id))
            .cloned()
            .collect()
    }

    pub fn posts_by_author(&self, author_id: i64) -> Vec<Post> {
        self.read()
            .posts
            .values()
            .filter(|p| p.author_id == author_id)
            .cloned()
            .collect()
    }

    pub fn update_post(&self, id: i64, patch: PostPatch) -> Result<Post, StoreError> {
        let mut inner = self.write();
        let post = inner.posts.get_mut(&id).ok_or(StoreError::NotFound("post"))?;

        if let Some(title) = patch.title {
            post.title = title;
        }
        if let Some(body) = patch.body {
            post.body = Some(body);
        }

        Ok(post.clone())
    }

    pub fn delete_post(&self, id: i64) -> Result<Post, StoreError> {
        self.write()
            .posts
            .remove(&id)
            .ok_or(StoreError::NotFound("post"))
    }

    /// Toggle a like: remove the user from the set when present, insert when
    /// absent. The read-check-write happens under one write lock, so racing
    /// toggles serialize and never lose an update.
    pub fn toggle_like(&self, post_id: i64, user_id: i64) -> Result<Post, StoreError> {
        let mut inner = self.write();
        let post = inner
            .posts
            .get_mut(&post_id)
            .ok_or(StoreError::NotFound("post"))?;

        if !post.like_giver_ids.remove(&user_id) {
            post.like_giver_ids.insert(user_id);
        }

        Ok(post.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::NewUser;

    fn store_with_author() -> (SocialStore, i64) {
        let store = SocialStore::new();
        let author = store
            .create_user(NewUser {
                email: "a@x.com".to_string(),
                password_hash: "x".to_string(),
                ..NewUser::default()
            })
            .unwrap();
        (store, author.id)
    }

    fn post(author_id: i64, title: &str) -> NewPost {
        NewPost {
            author_id,
            title: title.to_string(),
            body: Some("body".to_string()),
        }
    }

    #[test]
    fn create_requires_existing_author() {
        let store = SocialStore::new();
        let err = store.create_post(post(7, "hi")).unwrap_err();
        assert_eq!(err, StoreError::NotFound("user"));
    }

    #[test]
    fn create_then_delete_then_lookup_fails() {
        let (store, author) = store_with_author();
        let p = store.create_post(post(author, "hi")).unwrap();
        assert_eq!(p.id, 1);

        let removed = store.delete_post(p.id).unwrap();
        assert_eq!(removed.id, p.id);
        assert_eq!(store.post_by_id(p.id).unwrap_err(), StoreError::NotFound("post"));
    }

    #[test]
    fn update_keeps_id_and_created_at() {
        let (store, author) = store_with_author();
        let p = store.create_post(post(author, "before")).unwrap();

        let updated = store
            .update_post(
                p.id,
                PostPatch {
                    title: Some("after".to_string()),
                    ..PostPatch::default()
                },
            )
            .unwrap();
        assert_eq!(updated.id, p.id);
        assert_eq!(updated.title, "after");
        assert_eq!(updated.body, p.body);
        assert_eq!(updated.created_at, p.created_at);
    }

    #[test]
    fn toggle_like_round_trips() {
        let (store, author) = store_with_author();
        let p = store.create_post(post(author, "hi")).unwrap();

        let liked = store.toggle_like(p.id, author).unwrap();
        assert!(liked.like_giver_ids.contains(&author));

        let unliked = store.toggle_like(p.id, author).unwrap();
        assert_eq!(unliked.like_giver_ids, p.like_giver_ids);
    }

    #[test]
    fn concurrent_toggles_from_distinct_users_both_land() {
        let (store, author) = store_with_author();
        let other = store
            .create_user(NewUser {
                email: "b@x.com".to_string(),
                password_hash: "x".to_string(),
                ..NewUser::default()
            })
            .unwrap();
        let p = store.create_post(post(author, "hi")).unwrap();

        let handles: Vec<_> = [author, other.id]
            .into_iter()
            .map(|user_id| {
                let store = store.clone();
                std::thread::spawn(move || store.toggle_like(p.id, user_id).unwrap())
            })
            .collect();
        for h in handles {
            h.join().unwrap();
        }

        let likes = store.post_by_id(p.id).unwrap().like_giver_ids;
        assert_eq!(likes, [author, other.id].into_iter().collect());
    }

    #[test]
    fn racing_toggles_from_the_same_user_end_in_a_consistent_state() {
        let (store, author) = store_with_author();
        let p = store.create_post(post(author, "hi")).unwrap();

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let store = store.clone();
                std::thread::spawn(move || store.toggle_like(p.id, author).unwrap())
            })
            .collect();
        for h in handles {
            h.join().unwrap();
        }

        // An even number of toggles always returns to the empty set.
        assert!(store.post_by_id(p.id).unwrap().like_giver_ids.is_empty());
    }

    #[test]
    fn posts_by_ids_returns_store_order() {
        let (store, author) = store_with_author();
        let a = store.create_post(post(author, "a")).unwrap();
        let b = store.create_post(post(author, "b")).unwrap();

        let ids: BTreeSet<i64> = [b.id, a.id, 99].into_iter().collect();
        let got: Vec<i64> = store.posts_by_ids(&ids).into_iter().map(|p| p.id).collect();
        assert_eq!(got, vec![a.id, b.id]);
    }

    #[test]
    fn posts_by_author_filters() {
        let (store, author) = store_with_author();
        let other = store
            .create_user(NewUser {
                email: "b@x.com".to_string(),
                password_hash: "x".to_string(),
                ..NewUser::default()
            })
            .unwrap();
        store.create_post(post(author, "one")).unwrap();
        store.create_post(post(other.id, "two")).unwrap();
        store.create_post(post(author, "three")).unwrap();

        let titles: Vec<String> = store
            .posts_by_author(author)
            .into_iter()
            .map(|p| p.title)
            .collect();
        assert_eq!(titles, vec!["one".to_string(), "three".to_string()]);
    }
}
