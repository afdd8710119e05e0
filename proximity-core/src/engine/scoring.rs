//! Ranking keys.

use proximity_types::UserId;
use rustc_hash::FxHashSet;

use crate::engine::types::SearchEngine;

/// Sort key for one candidate. Derived `Ord` compares fields in declaration
/// order: mutual friends, then same city, then same country.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub(crate) struct RankKey {
    pub mutual_friends: u32,
    pub same_city: bool,
    pub same_country: bool,
}

impl SearchEngine {
    /// Mutual friends of two users, read from the adjacency graph.
    ///
    /// This is the count ranking uses. Both sides come from the symmetric
    /// graph, which also holds friendships recorded after a user's entity
    /// was built. Neither user needs to be in the entity cache; an unknown id
    /// has no friends.
    pub fn mutual_friends(&self, a: UserId, b: UserId) -> u32 {
        match (self.friendships.get(&a), self.friendships.get(&b)) {
            (Some(a), Some(b)) => intersection_len(a, b),
            _ => 0,
        }
    }
}

/// Number of ids in both sets.
#[inline(always)]
pub(crate) fn intersection_len(a: &FxHashSet<UserId>, b: &FxHashSet<UserId>) -> u32 {
    let (small, large) = if a.len() <= b.len() { (a, b) } else { (b, a) };
    small.iter().filter(|id| large.contains(*id)).count() as u32
}
