//! Search algorithm logic.

use std::sync::atomic::Ordering;

use proximity_types::{IndexField, RankedUser, Searcher, UserId};
use rustc_hash::FxHashSet;
use tracing::debug;

use crate::engine::scoring::RankKey;
use crate::engine::types::SearchEngine;

impl SearchEngine {
    /// Searches users by name prefix and ranks them by closeness to `searcher`.
    ///
    /// Fields are tried in [`IndexField::CASCADE`] order and the first one with
    /// any match supplies every candidate; later fields are not consulted.
    /// Candidates are ranked by mutual friends, then same city, then same
    /// country, all descending. Remaining ties keep discovery order unless
    /// [`tiebreak_by_user_id`](proximity_types::SearchConfig::tiebreak_by_user_id)
    /// is set. The searcher is not excluded.
    ///
    /// An empty query matches every username.
    pub fn search_users(&self, query: &str, searcher: &Searcher) -> Vec<RankedUser> {
        self.query_count.fetch_add(1, Ordering::Relaxed);

        let Some((field, matches)) = self.cascade(query) else {
            debug!(query_len = query.len(), "no field matched");
            return Vec::new();
        };

        let candidates = dedup_in_order(matches);
        debug!(
            query_len = query.len(),
            field = field.as_str(),
            candidates = candidates.len(),
            "ranking candidates"
        );

        self.rank(candidates, searcher)
    }

    /// Returns the first field whose trie has a match for `query`, with the raw ids.
    pub(crate) fn cascade(&self, query: &str) -> Option<(IndexField, Vec<UserId>)> {
        let mut matches = Vec::new();
        for field in IndexField::CASCADE {
            self.indices[field.slot()].search_into(query, &mut matches);
            if !matches.is_empty() {
                return Some((field, matches));
            }
        }
        None
    }

    fn rank(&self, candidates: Vec<UserId>, searcher: &Searcher) -> Vec<RankedUser> {
        let city = self.folder.fold(&searcher.city);
        let country = self.folder.fold(&searcher.country);

        let mut ranked: Vec<(RankKey, UserId)> = candidates
            .into_iter()
            .map(|id| {
                let key = RankKey {
                    mutual_friends: self.mutual_friends(searcher.id, id),
                    same_city: Self::is_member(&self.city_members, &city, id),
                    same_country: Self::is_member(&self.country_members, &country, id),
                };
                (key, id)
            })
            .collect();

        if self.config.tiebreak_by_user_id {
            ranked.sort_unstable_by(|a, b| b.0.cmp(&a.0).then_with(|| a.1.cmp(&b.1)));
        } else {
            // Stable, so ties stay in discovery order.
            ranked.sort_by(|a, b| b.0.cmp(&a.0));
        }

        ranked
            .into_iter()
            .map(|(key, id)| RankedUser::new(id, key.mutual_friends))
            .collect()
    }
}

fn dedup_in_order(ids: Vec<UserId>) -> Vec<UserId> {
    let mut seen = FxHashSet::default();
    seen.reserve(ids.len());
    ids.into_iter().filter(|id| seen.insert(*id)).collect()
}
