/*
 * Responsibility
 * - Users / Posts のインメモリ状態を一元所有
 * - 全ての変更は store メソッド経由 (外部に可変参照を渡さない)
 * - 複数ステップの変更は 1 つの critical section で行う
 */
use std::collections::BTreeMap;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

mod error;
mod posts;
pub mod seed;
pub mod units;
mod users;

pub use error::StoreError;
pub use posts::{NewPost, Post, PostPatch};
pub use users::{NewUser, User, UserPatch};

/// Process-wide relational store for users and posts.
///
/// Cheap to clone; every clone points at the same state. One lock covers the
/// whole relational state so that cross-entity operations (friend pairs,
/// author checks at post creation) are single critical sections. Reads hold
/// the lock for their whole duration and return owned clones, so callers
/// always observe a consistent snapshot and never a set mid-mutation.
///
/// Ids are assigned from per-kind monotonic counters starting at 1 and are
/// never reused, even after deletion.
#[derive(Clone, Debug, Default)]
pub struct SocialStore {
    inner: Arc<RwLock<Inner>>,
}

#[derive(Debug, Default)]
struct Inner {
    users: BTreeMap<i64, User>,
    posts: BTreeMap<i64, Post>,
    next_user_id: i64,
    next_post_id: i64,
}

impl SocialStore {
    pub fn new() -> Self {
        Self::default()
    }

    // A poisoned lock can only mean a panic inside one of the critical
    // sections below; none of them panic between their first and last write.
    fn read(&self) -> RwLockReadGuard<'_, Inner> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Inner> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }
}
