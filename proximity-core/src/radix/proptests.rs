use super::*;

use proptest::prelude::*;

/// Walks the trie checking structural invariants.
fn validate_trie(index: &PrefixIndex) {
    assert!(index.root().label().is_empty(), "root label must be empty");

    let mut stack: Vec<&PrefixNode> = vec![index.root()];
    while let Some(node) = stack.pop() {
        if !node.is_terminal() {
            assert!(
                node.terminal_ids().is_empty(),
                "non-terminal node carries ids"
            );
        }
        for (first, child) in &node.children {
            assert_eq!(
                child.label().chars().next(),
                Some(*first),
                "child keyed by wrong char"
            );
            stack.push(child);
        }
    }
}

fn key_strategy() -> impl Strategy<Value = String> {
    // Small alphabet so keys collide and edges split often. 'Σ' lowercases
    // differently at the end of a word when folded as a whole string.
    prop::string::string_regex("[abcÄΣ ]{0,8}").expect("valid regex")
}

/// Per-char lowercase, the model for a case-insensitive index.
fn lower(s: &str) -> String {
    s.chars().flat_map(char::to_lowercase).collect()
}

fn inserts_strategy() -> impl Strategy<Value = Vec<(String, UserId)>> {
    prop::collection::vec((key_strategy(), 0u32..64), 0..=200)
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        max_shrink_iters: 10_000,
        .. ProptestConfig::default()
    })]

    #[test]
    fn prop_every_prefix_finds_its_id(inserts in inserts_strategy()) {
        let mut index = PrefixIndex::new();
        for (key, id) in &inserts {
            index.insert(key, *id);
        }
        validate_trie(&index);

        for (key, id) in &inserts {
            for (end, _) in key.char_indices().skip(1).chain([(key.len(), ' ')]) {
                let prefix = &key[..end];
                let found = index.search_by_prefix(prefix);
                prop_assert!(found.contains(id), "{:?} missing id {} for key {:?}", prefix, id, key);
            }
        }
    }

    #[test]
    fn prop_matches_linear_scan(inserts in inserts_strategy(), probe in key_strategy()) {
        let mut index = PrefixIndex::new();
        for (key, id) in &inserts {
            index.insert(key, *id);
        }

        let mut expected: Vec<UserId> = inserts
            .iter()
            .filter(|(key, _)| key.starts_with(probe.as_str()))
            .map(|(_, id)| *id)
            .collect();
        expected.sort_unstable();

        let mut got = index.search_by_prefix(&probe);
        got.sort_unstable();

        prop_assert_eq!(got, expected);
    }

    #[test]
    fn prop_empty_prefix_is_total(inserts in inserts_strategy()) {
        let mut index = PrefixIndex::new();
        for (key, id) in &inserts {
            index.insert(key, *id);
        }

        let mut expected: Vec<UserId> = inserts.iter().map(|(_, id)| *id).collect();
        expected.sort_unstable();
        let mut got = index.search_by_prefix("");
        got.sort_unstable();

        prop_assert_eq!(got, expected);
        prop_assert_eq!(index.stats().stored_ids, inserts.len());
    }

    #[test]
    fn prop_case_insensitive_matches_folded_scan(inserts in inserts_strategy(), probe in key_strategy()) {
        let mut index = PrefixIndex::case_insensitive();
        for (key, id) in &inserts {
            index.insert(key, *id);
        }
        validate_trie(&index);

        let folded_probe = lower(&probe);
        let mut expected: Vec<UserId> = inserts
            .iter()
            .filter(|(key, _)| lower(key).starts_with(folded_probe.as_str()))
            .map(|(_, id)| *id)
            .collect();
        expected.sort_unstable();

        let mut got = index.search_by_prefix(&probe.to_uppercase());
        got.sort_unstable();

        prop_assert_eq!(got, expected);
    }

    #[test]
    fn prop_case_insensitive_keeps_every_prefix(inserts in inserts_strategy()) {
        let mut index = PrefixIndex::case_insensitive();
        for (key, id) in &inserts {
            index.insert(key, *id);
        }

        for (key, id) in &inserts {
            for (end, _) in key.char_indices().skip(1).chain([(key.len(), ' ')]) {
                let prefix = &key[..end];
                let found = index.search_by_prefix(prefix);
                prop_assert!(found.contains(id), "{:?} missing id {} for key {:?}", prefix, id, key);
            }
        }
    }
}
