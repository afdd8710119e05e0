//! Denormalized per-user search snapshot.

use proximity_types::{FriendshipState, UserId, UserRecord};
use rustc_hash::FxHashSet;

use crate::engine::scoring::intersection_len;

/// What the engine knows about one user.
///
/// `friends` is derived once, when the entity is built. Friendships accepted
/// later are not reflected here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserSearchEntity {
    pub id: UserId,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub city: String,
    pub country: String,
    pub friends: Vec<UserId>,
}

impl UserSearchEntity {
    /// Builds an entity from a storage record.
    ///
    /// Sent and received rows are merged in that order; only accepted rows
    /// count, each collapsed to the participant that is not this user.
    pub fn from_record(record: &UserRecord) -> Self {
        let friends = record
            .sent_friendships
            .iter()
            .chain(&record.received_friendships)
            .filter(|edge| edge.state == FriendshipState::Accepted)
            .map(|edge| edge.other_side(record.id))
            .collect();

        Self {
            id: record.id,
            username: record.username.clone(),
            first_name: record.first_name.clone(),
            last_name: record.last_name.clone(),
            city: record.city.clone(),
            country: record.country.clone(),
            friends,
        }
    }

    /// `"{first_name} {last_name}"`.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Number of distinct users in both this entity's `friends` and the
    /// friends `resolve` reports for `other_id`.
    ///
    /// `resolve` returning `None` means the other user is unknown: zero.
    ///
    /// This reads the friend list captured when the entity was built. Search
    /// ranks with [`SearchEngine::mutual_friends`](crate::SearchEngine::mutual_friends)
    /// instead, which reads the symmetric graph on both sides.
    pub fn mutual_friend_count<'a, F>(&self, other_id: UserId, resolve: F) -> u32
    where
        F: FnOnce(UserId) -> Option<&'a FxHashSet<UserId>>,
    {
        let Some(other) = resolve(other_id) else {
            return 0;
        };
        let mine: FxHashSet<UserId> = self.friends.iter().copied().collect();
        intersection_len(&mine, other)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proximity_types::FriendshipEdge;

    fn record(id: UserId) -> UserRecord {
        UserRecord {
            id,
            username: format!("user{id}"),
            first_name: "First".into(),
            last_name: "Last".into(),
            city: "Cluj".into(),
            country: "Romania".into(),
            sent_friendships: Vec::new(),
            received_friendships: Vec::new(),
        }
    }

    #[test]
    fn from_record_keeps_accepted_other_side() {
        let mut rec = record(1);
        rec.sent_friendships = vec![
            FriendshipEdge::accepted(1, 2),
            FriendshipEdge::new(1, 3, FriendshipState::Pending),
        ];
        rec.received_friendships = vec![
            FriendshipEdge::accepted(4, 1),
            FriendshipEdge::new(5, 1, FriendshipState::Declined),
        ];

        let entity = UserSearchEntity::from_record(&rec);
        assert_eq!(entity.friends, vec![2, 4]);
        assert_eq!(entity.username, "user1");
        assert_eq!(entity.full_name(), "First Last");
    }

    #[test]
    fn mutual_count_intersects() {
        let mut entity = UserSearchEntity::from_record(&record(1));
        entity.friends = vec![2, 3, 4];
        let other: FxHashSet<UserId> = [3, 4, 5].into_iter().collect();

        assert_eq!(entity.mutual_friend_count(9, |_| Some(&other)), 2);
    }

    #[test]
    fn mutual_count_ignores_repeated_friends() {
        let mut entity = UserSearchEntity::from_record(&record(1));
        entity.friends = vec![3, 3, 4];
        let other: FxHashSet<UserId> = [3].into_iter().collect();

        assert_eq!(entity.mutual_friend_count(9, |_| Some(&other)), 1);
    }

    #[test]
    fn mutual_count_unknown_other_is_zero() {
        let mut entity = UserSearchEntity::from_record(&record(1));
        entity.friends = vec![2, 3];

        assert_eq!(entity.mutual_friend_count(9, |_| None), 0);
    }
}
