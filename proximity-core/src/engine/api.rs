//! Public API for adding users and reading the social graph.

use std::time::Instant;

use proximity_types::{IndexField, SearchConfig, UserId, UserRecord};
use rustc_hash::FxHashSet;
use tracing::{info, trace};

use crate::engine::types::{MembershipMap, SearchEngine};
use crate::entity::UserSearchEntity;

impl SearchEngine {
    /// Builds an engine from a storage snapshot.
    ///
    /// Each record's accepted friendships are collapsed into a friend list
    /// (see [`UserSearchEntity::from_record`]) before it is added.
    pub fn from_records<'a, I>(records: I, config: SearchConfig) -> Self
    where
        I: IntoIterator<Item = &'a UserRecord>,
    {
        let started = Instant::now();
        let mut engine = Self::with_config(config);
        engine.add_users(records.into_iter().map(UserSearchEntity::from_record));
        info!(
            users = engine.len(),
            friendships = engine.friendship_count(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "search engine seeded"
        );
        engine
    }

    /// Indexes a user.
    ///
    /// Inserts the username, first name, last name and full name into their
    /// tries, caches the entity, files it under its city and country, and
    /// records every friend symmetrically. Adding the same id again indexes
    /// the new names alongside the old ones; nothing is removed.
    pub fn add_user(&mut self, entity: UserSearchEntity) {
        let id = entity.id;
        trace!(user_id = id, friends = entity.friends.len(), "indexing user");

        self.indices[IndexField::Username.slot()].insert(&entity.username, id);
        self.indices[IndexField::FirstName.slot()].insert(&entity.first_name, id);
        self.indices[IndexField::LastName.slot()].insert(&entity.last_name, id);
        self.indices[IndexField::FullName.slot()].insert(&entity.full_name(), id);

        self.file_under(Membership::City, &entity.city, id);
        self.file_under(Membership::Country, &entity.country, id);

        self.friendships.entry(id).or_default();
        for &friend_id in &entity.friends {
            self.add_friendship(id, friend_id);
        }

        self.users.insert(id, entity);
        self.users_added += 1;
    }

    /// Adds many users, in order.
    pub fn add_users<I>(&mut self, entities: I)
    where
        I: IntoIterator<Item = UserSearchEntity>,
    {
        for entity in entities {
            self.add_user(entity);
        }
    }

    fn add_friendship(&mut self, user_id: UserId, friend_id: UserId) {
        self.friendships.entry(user_id).or_default().insert(friend_id);
        self.friendships.entry(friend_id).or_default().insert(user_id);
    }

    fn file_under(&mut self, membership: Membership, name: &str, id: UserId) {
        let key = self.folder.fold(name);
        let map: &mut MembershipMap = match membership {
            Membership::City => &mut self.city_members,
            Membership::Country => &mut self.country_members,
        };
        match map.get_mut(&*key) {
            Some(ids) => {
                ids.insert(id);
            }
            None => {
                map.insert(key.into_owned(), FxHashSet::from_iter([id]));
            }
        }
    }

    /// Friends of `user_id` in the adjacency graph. Empty if unknown.
    pub fn friends_of(&self, user_id: UserId) -> Vec<UserId> {
        self.friendships
            .get(&user_id)
            .map(|friends| friends.iter().copied().collect())
            .unwrap_or_default()
    }

    /// Cached entity for `user_id`.
    #[inline]
    pub fn user(&self, user_id: UserId) -> Option<&UserSearchEntity> {
        self.users.get(&user_id)
    }

    /// Whether `user_id` is filed under `city`, ignoring case.
    pub fn lives_in_city(&self, user_id: UserId, city: &str) -> bool {
        Self::is_member(&self.city_members, &self.folder.fold(city), user_id)
    }

    /// Whether `user_id` is filed under `country`, ignoring case.
    pub fn lives_in_country(&self, user_id: UserId, country: &str) -> bool {
        Self::is_member(&self.country_members, &self.folder.fold(country), user_id)
    }

    #[inline]
    pub(crate) fn is_member(map: &MembershipMap, folded: &str, user_id: UserId) -> bool {
        map.get(folded).is_some_and(|ids| ids.contains(&user_id))
    }

    /// Number of undirected friendship edges.
    pub fn friendship_count(&self) -> usize {
        self.friendships.values().map(|friends| friends.len()).sum::<usize>() / 2
    }
}

#[derive(Clone, Copy)]
enum Membership {
    City,
    Country,
}
