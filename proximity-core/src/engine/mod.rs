//! User search engine.
//!
//! Four radix tries (username, first name, last name, full name) find
//! candidates by prefix. A symmetric friendship graph and case-folded
//! city/country membership maps rank them by social proximity.
//!
//! Search cascades: the first field with any match supplies all candidates.
//! Ranking keys, in priority order, are mutual friend count, same city and
//! same country, all descending.
//!
//! Threading:
//! - [`SearchEngine::search_users`] takes `&self` and may run concurrently
//!   with other searches. [`SearchEngine::add_user`] needs `&mut self`; use
//!   [`SearchHandle`](crate::SearchHandle) to share one engine between both.
//!
//! Users cannot be removed or re-derived after insertion.

mod api;
pub(crate) mod scoring;
mod search;
mod stats;
mod types;

pub use stats::EngineStats;
pub use types::{EngineMetrics, MembershipMap, SearchEngine};
