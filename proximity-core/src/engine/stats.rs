//! Statistics and EngineStats.

use proximity_types::IndexField;

use crate::engine::types::SearchEngine;
use crate::radix::PrefixStats;

/// A snapshot of engine statistics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineStats {
    /// Distinct users in the entity cache.
    pub num_users: usize,
    /// Users with an adjacency entry, including friends never added themselves.
    pub graph_nodes: usize,
    /// Undirected friendship edges.
    pub friendships: usize,
    /// Distinct case-folded cities.
    pub cities: usize,
    /// Distinct case-folded countries.
    pub countries: usize,
    /// Trie shape per field, in [`IndexField::CASCADE`] order.
    pub indices: [PrefixStats; IndexField::COUNT],
}

impl SearchEngine {
    /// Returns engine statistics. Walks every trie, so it is O(total nodes).
    pub fn stats(&self) -> EngineStats {
        EngineStats {
            num_users: self.users.len(),
            graph_nodes: self.friendships.len(),
            friendships: self.friendship_count(),
            cities: self.city_members.len(),
            countries: self.country_members.len(),
            indices: IndexField::CASCADE.map(|field| self.indices[field.slot()].stats()),
        }
    }
}

impl EngineStats {
    /// Stats for one field's trie.
    pub fn index(&self, field: IndexField) -> PrefixStats {
        self.indices[field.slot()]
    }

    /// Trie nodes across all fields.
    pub fn total_nodes(&self) -> usize {
        self.indices.iter().map(|s| s.nodes).sum()
    }
}

impl core::fmt::Display for EngineStats {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "{} users, {} friendships, {} cities, {} countries",
            self.num_users, self.friendships, self.cities, self.countries
        )?;
        for field in IndexField::CASCADE {
            write!(f, "; {}: {}", field, self.index(field))?;
        }
        Ok(())
    }
}
