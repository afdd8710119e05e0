//! End-to-end tests through the public API: seeding from a snapshot, the
//! search cascade, ranking, and concurrent use through `SearchHandle`.

use std::thread;

use proximity_core::{SearchEngine, SearchHandle, Snapshot, UserSearchEntity};
use proximity_types::{
    FriendshipEdge, FriendshipState, RankedUser, SearchConfig, Searcher, UserId, UserRecord,
};

fn record(id: UserId, username: &str, first: &str, last: &str, city: &str) -> UserRecord {
    UserRecord {
        id,
        username: username.into(),
        first_name: first.into(),
        last_name: last.into(),
        city: city.into(),
        country: "Romania".into(),
        sent_friendships: Vec::new(),
        received_friendships: Vec::new(),
    }
}

fn entity(id: UserId, username: &str) -> UserSearchEntity {
    UserSearchEntity {
        id,
        username: username.into(),
        first_name: "Runner".into(),
        last_name: format!("N{id}"),
        city: "Brasov".into(),
        country: "Romania".into(),
        friends: Vec::new(),
    }
}

/// Hikers around Cluj. 1 and 2 share friends 5 and 6; 3 shares only 5.
fn hiking_club() -> Vec<UserRecord> {
    let mut users = vec![
        record(1, "mihai.hikes", "Mihai", "Pop", "Cluj"),
        record(2, "mihaela", "Mihaela", "Rus", "Sibiu"),
        record(3, "mihnea", "Mihnea", "Stan", "Cluj"),
        record(4, "mircea", "Mircea", "Pop", "Cluj"),
        record(5, "ioana", "Ioana", "Dobre", "Cluj"),
        record(6, "radu", "Radu", "Mihai", "Iasi"),
    ];
    let edges = [
        FriendshipEdge::accepted(1, 5),
        FriendshipEdge::accepted(6, 1),
        FriendshipEdge::accepted(4, 5),
        FriendshipEdge::accepted(4, 6),
        FriendshipEdge::accepted(3, 5),
        FriendshipEdge::new(4, 3, FriendshipState::Pending),
        FriendshipEdge::new(2, 4, FriendshipState::Declined),
    ];
    for edge in edges {
        users[(edge.requester_id - 1) as usize].sent_friendships.push(edge);
        users[(edge.receiver_id - 1) as usize].received_friendships.push(edge);
    }
    users
}

#[test]
fn snapshot_round_trip_seeds_engine() {
    let snapshot = Snapshot {
        users: hiking_club(),
    };
    let json = serde_json::to_string(&snapshot).unwrap();
    let engine = Snapshot::from_reader(json.as_bytes())
        .unwrap()
        .build_engine(SearchConfig::default());

    assert_eq!(engine.len(), 6);
    assert_eq!(engine.friendship_count(), 5);
}

#[test]
fn ranks_by_mutual_then_city() {
    let engine = SearchEngine::from_records(&hiking_club(), SearchConfig::default());
    let searcher = Searcher::new(4, "Cluj", "Romania");

    let results = engine.search_users("mi", &searcher);

    // usernames starting with "mi": 1, 2, 3, 4
    // mutual with 4 ({5, 6}): 1 -> {5, 6} = 2, 3 -> {5} = 1, 4 -> 2, 2 -> 0
    // 1 and 4 tie on everything.
    assert_eq!(results.len(), 4);
    assert_eq!(results[2], RankedUser::new(3, 1));
    assert_eq!(results[3], RankedUser::new(2, 0));
    let mut top: Vec<UserId> = results[..2].iter().map(|r| r.user_id).collect();
    top.sort_unstable();
    assert_eq!(top, vec![1, 4]);
}

#[test]
fn cascade_hides_later_fields() {
    let engine = SearchEngine::from_records(&hiking_club(), SearchConfig::default());
    let searcher = Searcher::new(5, "Cluj", "Romania");

    // "Mihai" is user 6's last name, but no username starts with "Mihai" and
    // user 1's first name does, so only first names answer.
    let results = engine.search_users("Mihai", &searcher);
    let ids: Vec<UserId> = results.iter().map(|r| r.user_id).collect();
    assert_eq!(ids, vec![1]);

    // Last names answer only when no first name matches.
    let mut ids: Vec<UserId> = engine
        .search_users("Pop", &searcher)
        .iter()
        .map(|r| r.user_id)
        .collect();
    ids.sort_unstable();
    assert_eq!(ids, vec![1, 4]);
}

#[test]
fn deterministic_config_gives_total_order() {
    let engine = SearchEngine::from_records(&hiking_club(), SearchConfig::deterministic());
    let searcher = Searcher::new(4, "cluj", "romania");

    let results = engine.search_users("MI", &searcher);
    let ids: Vec<UserId> = results.iter().map(|r| r.user_id).collect();
    assert_eq!(ids, vec![1, 4, 3, 2]);
}

#[test]
fn concurrent_searches_and_registrations() {
    let handle = SearchHandle::new(SearchEngine::from_records(
        &hiking_club(),
        SearchConfig::default(),
    ));
    let searcher = Searcher::new(1, "Cluj", "Romania");

    thread::scope(|s| {
        for w in 0..2u32 {
            let handle = handle.clone();
            s.spawn(move || {
                for i in 0..200u32 {
                    let id = 1_000 + w * 1_000 + i;
                    handle.add_user(entity(id, &format!("trail{id}")));
                }
            });
        }
        for _ in 0..4 {
            let handle = handle.clone();
            let searcher = searcher.clone();
            s.spawn(move || {
                for _ in 0..200 {
                    let hits = handle.search_users("trail", &searcher);
                    assert!(hits.len() <= 400);
                    assert!(hits.iter().all(|h| h.mutual_friends == 0));
                }
            });
        }
    });

    assert_eq!(handle.search_users("trail", &searcher).len(), 400);
    assert_eq!(handle.stats().num_users, 406);
    assert_eq!(handle.metrics().queries_executed, 801);
}
