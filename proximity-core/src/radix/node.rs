//! Edge-compressed trie node.

use std::mem;

use proximity_types::UserId;
use rustc_hash::FxHashMap;
use smallvec::SmallVec;

/// Ids ending at a node. Most keys belong to one or two users.
pub type TerminalIds = SmallVec<[UserId; 2]>;

/// A radix trie node.
///
/// `label` is the part of the key this node owns since the last branch point.
/// Children are keyed by the first `char` of their label, so no two children
/// share a first character.
#[derive(Debug, Default)]
pub struct PrefixNode {
    pub(crate) label: String,
    pub(crate) children: FxHashMap<char, PrefixNode>,
    pub(crate) terminal_ids: TerminalIds,
    pub(crate) is_terminal: bool,
}

impl PrefixNode {
    /// Creates a terminal leaf owning `label`.
    pub(crate) fn leaf(label: &str, user_id: UserId) -> Self {
        let mut terminal_ids = TerminalIds::new();
        terminal_ids.push(user_id);
        Self {
            label: label.to_owned(),
            children: FxHashMap::default(),
            terminal_ids,
            is_terminal: true,
        }
    }

    /// Label fragment owned by this node.
    #[inline(always)]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Whether at least one key ends exactly here.
    #[inline(always)]
    pub fn is_terminal(&self) -> bool {
        self.is_terminal
    }

    /// Ids of the users whose key ends here. Duplicates are kept.
    #[inline(always)]
    pub fn terminal_ids(&self) -> &[UserId] {
        &self.terminal_ids
    }

    /// Records that a key ends here.
    #[inline]
    pub(crate) fn mark_terminal(&mut self, user_id: UserId) {
        self.is_terminal = true;
        self.terminal_ids.push(user_id);
    }

    /// Splits this node's label at byte offset `at`.
    ///
    /// The node keeps `label[..at]` and becomes a non-terminal branch point.
    /// A new child takes `label[at..]` along with the old children, terminal
    /// flag and ids. `at` must be a char boundary strictly inside the label.
    pub(crate) fn split_at(&mut self, at: usize) {
        debug_assert!(at > 0 && at < self.label.len());
        let Some(first) = self.label[at..].chars().next() else {
            return;
        };
        let suffix = self.label.split_off(at);
        let tail = PrefixNode {
            label: suffix,
            children: mem::take(&mut self.children),
            terminal_ids: mem::take(&mut self.terminal_ids),
            is_terminal: mem::replace(&mut self.is_terminal, false),
        };
        self.children.insert(first, tail);
    }

    /// Appends the terminal ids of every node in this subtree to `out`.
    pub(crate) fn collect_into(&self, out: &mut Vec<UserId>) {
        let mut stack: Vec<&PrefixNode> = vec![self];
        while let Some(node) = stack.pop() {
            if node.is_terminal {
                out.extend_from_slice(&node.terminal_ids);
            }
            stack.extend(node.children.values());
        }
    }
}

/// Byte length of the longest common prefix of `a` and `b`, on char boundaries.
#[inline]
pub(crate) fn common_prefix_len(a: &str, b: &str) -> usize {
    a.char_indices()
        .zip(b.chars())
        .find(|((_, ca), cb)| ca != cb)
        .map(|((i, _), _)| i)
        .unwrap_or_else(|| {
            let shorter = if a.len() <= b.len() { a } else { b };
            // Every char of the shorter string matched.
            shorter.len()
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn common_prefix_ascii() {
        assert_eq!(common_prefix_len("alice", "alicia"), 4);
        assert_eq!(common_prefix_len("ali", "alice"), 3);
        assert_eq!(common_prefix_len("alice", "ali"), 3);
        assert_eq!(common_prefix_len("bob", "alice"), 0);
        assert_eq!(common_prefix_len("", "alice"), 0);
    }

    #[test]
    fn common_prefix_multibyte() {
        // 'ł' is two bytes.
        assert_eq!(common_prefix_len("łukasz", "łucja"), 3);
        assert_eq!(common_prefix_len("żółw", "żółć"), 6);
    }

    #[test]
    fn split_moves_payload_to_tail() {
        let mut node = PrefixNode::leaf("alice", 1);
        node.children.insert('x', PrefixNode::leaf("x", 9));

        node.split_at(3);

        assert_eq!(node.label(), "ali");
        assert!(!node.is_terminal());
        assert!(node.terminal_ids().is_empty());
        assert_eq!(node.children.len(), 1);

        let tail = &node.children[&'c'];
        assert_eq!(tail.label(), "ce");
        assert!(tail.is_terminal());
        assert_eq!(tail.terminal_ids(), &[1]);
        assert!(tail.children.contains_key(&'x'));
    }

    #[test]
    fn collect_walks_subtree() {
        let mut node = PrefixNode::leaf("a", 1);
        node.children.insert('b', PrefixNode::leaf("b", 2));
        node.children.get_mut(&'b').unwrap().mark_terminal(3);

        let mut out = Vec::new();
        node.collect_into(&mut out);
        out.sort_unstable();
        assert_eq!(out, vec![1, 2, 3]);
    }
}
