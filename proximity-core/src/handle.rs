//! Shared, lock-protected engine for request handlers.

use std::sync::Arc;

use parking_lot::{RwLock, RwLockReadGuard};
use proximity_types::{RankedUser, Searcher, UserId};

use crate::engine::{EngineMetrics, EngineStats, SearchEngine};
use crate::entity::UserSearchEntity;

/// A cloneable handle to one engine.
///
/// Construct it once at startup and pass clones to every handler. Writers
/// hold the lock for a whole `add_user`, so a search never sees a user in
/// some tries but not others.
#[derive(Clone)]
pub struct SearchHandle {
    inner: Arc<RwLock<SearchEngine>>,
}

impl SearchHandle {
    /// Wraps an engine.
    pub fn new(engine: SearchEngine) -> Self {
        Self {
            inner: Arc::new(RwLock::new(engine)),
        }
    }

    /// Indexes a newly registered user.
    pub fn add_user(&self, entity: UserSearchEntity) {
        self.inner.write().add_user(entity);
    }

    /// Searches under the shared lock.
    pub fn search_users(&self, query: &str, searcher: &Searcher) -> Vec<RankedUser> {
        self.inner.read().search_users(query, searcher)
    }

    /// Friends of `user_id`.
    pub fn friends_of(&self, user_id: UserId) -> Vec<UserId> {
        self.inner.read().friends_of(user_id)
    }

    /// Structural statistics, taken under the shared lock.
    pub fn stats(&self) -> EngineStats {
        self.inner.read().stats()
    }

    /// Counters for users added and queries run.
    pub fn metrics(&self) -> EngineMetrics {
        self.inner.read().metrics()
    }

    /// Holds the shared lock for several reads in a row.
    pub fn read(&self) -> RwLockReadGuard<'_, SearchEngine> {
        self.inner.read()
    }
}

impl From<SearchEngine> for SearchHandle {
    fn from(engine: SearchEngine) -> Self {
        Self::new(engine)
    }
}

impl std::fmt::Debug for SearchHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let engine = self.inner.read();
        f.debug_struct("SearchHandle")
            .field("users", &engine.len())
            .field("config", engine.config())
            .finish()
    }
}
