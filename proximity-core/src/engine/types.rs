//! Engine state.

use std::sync::atomic::{AtomicU64, Ordering};

use proximity_types::{IndexField, SearchConfig, UserId};
use rustc_hash::{FxHashMap, FxHashSet};

use crate::analyzer::CaseFolder;
use crate::entity::UserSearchEntity;
use crate::radix::PrefixIndex;

/// Ids grouped under a case-folded city or country name.
pub type MembershipMap = FxHashMap<String, FxHashSet<UserId>>;

/// User search engine: four name tries plus the social graph used for ranking.
///
/// The engine is a plain value. Share it between request handlers through
/// [`SearchHandle`](crate::SearchHandle), which adds the locking that
/// [`add_user`](Self::add_user) needs while searches are running.
pub struct SearchEngine {
    pub(crate) indices: [PrefixIndex; IndexField::COUNT],
    /// Symmetric: if `b` is in `friendships[a]`, `a` is in `friendships[b]`.
    pub(crate) friendships: FxHashMap<UserId, FxHashSet<UserId>>,
    pub(crate) city_members: MembershipMap,
    pub(crate) country_members: MembershipMap,
    pub(crate) users: FxHashMap<UserId, UserSearchEntity>,
    pub(crate) folder: CaseFolder,
    pub(crate) config: SearchConfig,
    /// Atomic so searches can run under a shared borrow
    pub(crate) query_count: AtomicU64,
    pub(crate) users_added: u64,
}

impl Default for SearchEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl SearchEngine {
    /// Creates an empty engine with the default configuration.
    pub fn new() -> Self {
        Self::with_config(SearchConfig::default())
    }

    /// Creates an empty engine with custom configuration.
    pub fn with_config(config: SearchConfig) -> Self {
        let index = || {
            if config.case_sensitive_prefixes {
                PrefixIndex::new()
            } else {
                PrefixIndex::case_insensitive()
            }
        };

        Self {
            indices: [index(), index(), index(), index()],
            friendships: FxHashMap::default(),
            city_members: MembershipMap::default(),
            country_members: MembershipMap::default(),
            users: FxHashMap::default(),
            folder: CaseFolder::new(),
            config,
            query_count: AtomicU64::new(0),
            users_added: 0,
        }
    }

    /// Active configuration.
    #[inline(always)]
    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// The trie for `field`.
    #[inline(always)]
    pub fn index(&self, field: IndexField) -> &PrefixIndex {
        &self.indices[field.slot()]
    }

    /// Number of distinct users in the entity cache.
    #[inline(always)]
    #[must_use]
    pub fn len(&self) -> usize {
        self.users.len()
    }

    /// Returns `true` if no user has been added.
    #[inline(always)]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    /// Returns basic metrics about the engine's operation.
    #[inline(always)]
    #[must_use]
    pub fn metrics(&self) -> EngineMetrics {
        EngineMetrics {
            users_added: self.users_added,
            queries_executed: self.query_count.load(Ordering::Relaxed),
            cached_users: self.users.len() as u64,
        }
    }
}

/// Basic operational metrics for the search engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineMetrics {
    /// Total number of `add_user` calls, including repeated ids.
    pub users_added: u64,
    /// Total number of search queries executed.
    pub queries_executed: u64,
    /// Current number of distinct users in the entity cache.
    pub cached_users: u64,
}
