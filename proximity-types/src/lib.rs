//! Core types for the Proximity user search engine.
//!
//! This crate holds the plain data shared between the engine and its
//! callers. Keeping types separate ensures:
//!
//! - **Storage independence**: Loaders build [`UserRecord`]s without pulling in the engine
//! - **Stable boundaries**: Request handlers see [`RankedUser`] and [`Searcher`] only
//! - **Clean config**: [`SearchConfig`] deserializes from any serde format

#![warn(missing_docs)]

use core::fmt;

use serde::{Deserialize, Serialize};

/// Unique user identifier, as assigned by the storage layer.
pub type UserId = u32;

/// A search hit: a user id and the number of friends it shares with the searcher.
///
/// The engine returns these already ranked. Callers join them against storage
/// to build full profiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RankedUser {
    /// Matched user.
    pub user_id: UserId,
    /// Size of the intersection between the searcher's and this user's friends.
    pub mutual_friends: u32,
}

impl RankedUser {
    /// Creates a new ranked hit.
    #[inline(always)]
    pub const fn new(user_id: UserId, mutual_friends: u32) -> Self {
        Self {
            user_id,
            mutual_friends,
        }
    }
}

impl fmt::Display for RankedUser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "user={} mutual={}", self.user_id, self.mutual_friends)
    }
}

/// The user performing a search.
///
/// Only the id, city and country take part in ranking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Searcher {
    /// Searching user's id.
    pub id: UserId,
    /// Searching user's city, compared case-insensitively.
    pub city: String,
    /// Searching user's country, compared case-insensitively.
    pub country: String,
}

impl Searcher {
    /// Creates a searcher.
    pub fn new(id: UserId, city: impl Into<String>, country: impl Into<String>) -> Self {
        Self {
            id,
            city: city.into(),
            country: country.into(),
        }
    }
}

/// An indexed name field.
///
/// `#[repr(u8)]` keeps the discriminant usable as an array slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum IndexField {
    /// Login handle.
    Username = 0,
    /// Given name.
    FirstName = 1,
    /// Family name.
    LastName = 2,
    /// `"{first} {last}"`.
    FullName = 3,
}

impl IndexField {
    /// Number of indexed fields.
    pub const COUNT: usize = 4;

    /// Lookup order used by search. The first field with any match wins.
    pub const CASCADE: [IndexField; Self::COUNT] = [
        IndexField::Username,
        IndexField::FirstName,
        IndexField::LastName,
        IndexField::FullName,
    ];

    /// Array slot for this field.
    #[inline(always)]
    pub const fn slot(self) -> usize {
        self as usize
    }

    /// Lowercase field name, as used in logs.
    pub const fn as_str(self) -> &'static str {
        match self {
            IndexField::Username => "username",
            IndexField::FirstName => "first_name",
            IndexField::LastName => "last_name",
            IndexField::FullName => "full_name",
        }
    }
}

impl fmt::Display for IndexField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lifecycle of a friendship request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FriendshipState {
    /// Sent, not yet answered.
    Pending,
    /// Accepted by the receiver. Only these edges reach the friendship graph.
    Accepted,
    /// Refused by the receiver.
    Declined,
}

/// A friendship row as persisted: requester, receiver and state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FriendshipEdge {
    /// User who sent the request.
    pub requester_id: UserId,
    /// User who received the request.
    pub receiver_id: UserId,
    /// Current state.
    pub state: FriendshipState,
}

impl FriendshipEdge {
    /// Creates an edge.
    pub const fn new(requester_id: UserId, receiver_id: UserId, state: FriendshipState) -> Self {
        Self {
            requester_id,
            receiver_id,
            state,
        }
    }

    /// Creates an accepted edge.
    pub const fn accepted(requester_id: UserId, receiver_id: UserId) -> Self {
        Self::new(requester_id, receiver_id, FriendshipState::Accepted)
    }

    /// Returns the participant that is not `user_id`.
    ///
    /// If `user_id` is the receiver this is the requester, otherwise the receiver.
    #[inline]
    pub const fn other_side(&self, user_id: UserId) -> UserId {
        if self.receiver_id == user_id {
            self.requester_id
        } else {
            self.receiver_id
        }
    }
}

/// A persisted user with its friendship rows, as loaded from storage at startup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    /// User id.
    pub id: UserId,
    /// Login handle.
    pub username: String,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Home city.
    #[serde(default)]
    pub city: String,
    /// Home country.
    #[serde(default)]
    pub country: String,
    /// Requests this user sent.
    #[serde(default)]
    pub sent_friendships: Vec<FriendshipEdge>,
    /// Requests this user received.
    #[serde(default)]
    pub received_friendships: Vec<FriendshipEdge>,
}

/// Search engine configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Whether name prefixes are matched case-sensitively.
    /// Default: true. City and country matching ignores case either way.
    pub case_sensitive_prefixes: bool,
    /// Whether candidates still tied after mutual friends, city and country
    /// are ordered by ascending user id. Default: false (discovery order).
    pub tiebreak_by_user_id: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self::source_compatible()
    }
}

impl SearchConfig {
    /// Case-sensitive prefixes, ties left in discovery order.
    pub const fn source_compatible() -> Self {
        Self {
            case_sensitive_prefixes: true,
            tiebreak_by_user_id: false,
        }
    }

    /// Case-insensitive prefixes and a total result order.
    pub const fn deterministic() -> Self {
        Self {
            case_sensitive_prefixes: false,
            tiebreak_by_user_id: true,
        }
    }
}
