//! Radix (PATRICIA) trie over one name field.
//!
//! Chains of single-child nodes are compressed into one edge carrying a
//! multi-character label, so both insert and lookup are O(k) in the key
//! length regardless of how many keys are stored.
//!
//! Keys map to user ids, not values: several users may share a key (two
//! "John"s), and the same `(key, id)` pair inserted twice is stored twice.
//! Callers deduplicate search output.

mod node;
#[cfg(test)]
mod proptests;

use std::collections::hash_map::Entry;

use proximity_types::UserId;

use crate::analyzer::CaseFolder;

pub use node::{PrefixNode, TerminalIds};
use node::common_prefix_len;

/// A prefix index over one field.
#[derive(Debug, Default)]
pub struct PrefixIndex {
    root: PrefixNode,
    folder: Option<CaseFolder>,
}

impl PrefixIndex {
    /// Creates an empty, case-sensitive index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty index that folds keys and prefixes to lowercase.
    pub fn case_insensitive() -> Self {
        Self {
            root: PrefixNode::default(),
            folder: Some(CaseFolder::new()),
        }
    }

    /// Whether keys are matched regardless of case.
    #[inline(always)]
    pub fn is_case_insensitive(&self) -> bool {
        self.folder.is_some()
    }

    /// Root node. Its label is always empty.
    #[inline(always)]
    pub fn root(&self) -> &PrefixNode {
        &self.root
    }

    /// Inserts `key` for `user_id`.
    ///
    /// Afterwards every prefix of `key` finds `user_id`. An empty key marks
    /// the root, so it is only reachable through the empty prefix.
    pub fn insert(&mut self, key: &str, user_id: UserId) {
        match self.folder {
            Some(folder) => {
                let folded = folder.fold(key);
                Self::insert_into(&mut self.root, &folded, user_id);
            }
            None => Self::insert_into(&mut self.root, key, user_id),
        }
    }

    fn insert_into(root: &mut PrefixNode, key: &str, user_id: UserId) {
        let mut node = root;
        let mut rest = key;

        loop {
            let Some(first) = rest.chars().next() else {
                node.mark_terminal(user_id);
                return;
            };

            match node.children.entry(first) {
                Entry::Vacant(slot) => {
                    slot.insert(PrefixNode::leaf(rest, user_id));
                    return;
                }
                Entry::Occupied(slot) => {
                    let child = slot.into_mut();
                    let shared = common_prefix_len(rest, &child.label);
                    if shared < child.label.len() {
                        child.split_at(shared);
                    }
                    rest = &rest[shared..];
                    node = child;
                }
            }
        }
    }

    /// Returns the ids of every key starting with `prefix`.
    ///
    /// The result is an unordered union and may repeat ids. An empty prefix
    /// returns every id stored in the index. A prefix that leaves the trie,
    /// including one that diverges halfway along an edge, returns nothing.
    pub fn search_by_prefix(&self, prefix: &str) -> Vec<UserId> {
        let mut out = Vec::new();
        self.search_into(prefix, &mut out);
        out
    }

    /// Like [`search_by_prefix`](Self::search_by_prefix), appending to `out`.
    pub fn search_into(&self, prefix: &str, out: &mut Vec<UserId>) {
        let folded;
        let prefix = match self.folder {
            Some(folder) => {
                folded = folder.fold(prefix);
                &*folded
            }
            None => prefix,
        };

        if let Some(node) = self.descend(prefix) {
            node.collect_into(out);
        }
    }

    /// Walks to the node under which every key starting with `prefix` lives.
    ///
    /// The walk may stop in the middle of an edge, in which case that edge's
    /// node is returned.
    fn descend(&self, prefix: &str) -> Option<&PrefixNode> {
        let mut node = &self.root;
        let mut rest = prefix;

        while let Some(first) = rest.chars().next() {
            let child = node.children.get(&first)?;
            let shared = common_prefix_len(rest, &child.label);
            if shared < child.label.len() && shared < rest.len() {
                return None;
            }
            rest = &rest[shared..];
            node = child;
        }

        Some(node)
    }

    /// Returns structural statistics for this index.
    pub fn stats(&self) -> PrefixStats {
        let mut stats = PrefixStats::default();
        let mut stack = vec![&self.root];
        while let Some(node) = stack.pop() {
            stats.nodes += 1;
            if node.is_terminal {
                stats.terminal_nodes += 1;
                stats.stored_ids += node.terminal_ids.len();
            }
            stack.extend(node.children.values());
        }
        stats
    }
}

/// A snapshot of one index's shape.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PrefixStats {
    /// Nodes including the root.
    pub nodes: usize,
    /// Nodes where at least one key ends.
    pub terminal_nodes: usize,
    /// Ids stored across all terminal nodes, duplicates included.
    pub stored_ids: usize,
}

impl core::fmt::Display for PrefixStats {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "{} nodes, {} terminal, {} ids",
            self.nodes, self.terminal_nodes, self.stored_ids
        )
    }
}
