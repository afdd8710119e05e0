//! Prefix-trie user search ranked by social proximity.
//!
//! Users are indexed by username, first name, last name and full name in
//! four radix tries. A search walks the tries in that order and takes the
//! first non-empty match set, then ranks it against the searching user by
//! mutual friends, same city and same country.
//!
//! ```
//! use proximity_core::{SearchEngine, UserSearchEntity};
//! use proximity_types::Searcher;
//!
//! let mut engine = SearchEngine::new();
//! engine.add_user(UserSearchEntity {
//!     id: 1,
//!     username: "alice".into(),
//!     first_name: "Alice".into(),
//!     last_name: "Smith".into(),
//!     city: "Berlin".into(),
//!     country: "Germany".into(),
//!     friends: vec![],
//! });
//!
//! let hits = engine.search_users("ali", &Searcher::new(2, "Berlin", "Germany"));
//! assert_eq!(hits[0].user_id, 1);
//! ```

pub mod analyzer;
pub mod engine;
pub mod entity;
pub mod handle;
pub mod radix;
pub mod snapshot;

pub use engine::{EngineMetrics, EngineStats, SearchEngine};
pub use entity::UserSearchEntity;
pub use handle::SearchHandle;
pub use radix::{PrefixIndex, PrefixNode, PrefixStats};
pub use snapshot::{Snapshot, SnapshotError};
