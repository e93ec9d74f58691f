use super::*;

use proptest::prelude::*;
use std::collections::BTreeMap;
use std::fmt::Debug;

/// Walk the whole tree and check the structural rules that must hold
/// after every public operation.
fn validate_tree<V: PartialEq + Debug>(t: &RadixTree<V>) {
    let mut value_count = 0usize;
    validate_node(t, t.root(), true, &mut value_count);
    assert_eq!(
        value_count,
        t.len(),
        "reachable content count must match len"
    );
    assert_eq!(t.node_count(), t.root().node_count());
}

fn validate_node<V: PartialEq + Debug>(
    t: &RadixTree<V>,
    node: Subtrie<'_, V>,
    is_root: bool,
    value_count: &mut usize,
) {
    if is_root {
        assert!(node.suffix().is_empty(), "root must have an empty suffix");
    } else {
        assert!(
            !node.suffix().is_empty(),
            "only the root may have an empty suffix"
        );
        if node.content().is_none() {
            assert!(
                node.children().count() >= 2,
                "content-less node must keep >= 2 children: {:?}",
                node.chain()
            );
        }
    }

    if node.has_content() {
        *value_count += 1;
        let chain = node.chain();
        assert_eq!(
            t.get(&chain).ok(),
            node.content(),
            "chain must resolve back to the node's content"
        );
    }

    // Sibling disjointness: suffixes share a non-empty prefix iff they
    // start with the same character.
    let suffixes: Vec<&str> = node.children().map(|c| c.suffix()).collect();
    for (i, a) in suffixes.iter().enumerate() {
        for b in &suffixes[i + 1..] {
            assert_ne!(
                a.chars().next(),
                b.chars().next(),
                "sibling suffixes {a:?} and {b:?} overlap under {:?}",
                node.chain()
            );
        }
    }

    let child_sum: usize = node.children().map(|c| c.node_count()).sum();
    assert_eq!(node.node_count(), 1 + child_sum);

    for child in node.children() {
        validate_node(t, child, false, value_count);
    }
}

#[derive(Clone, Debug)]
enum Op {
    Insert(String, u64),
    Remove(String),
    Get(String),
}

fn key_strategy() -> impl Strategy<Value = String> + Clone {
    // A tiny alphabet makes shared prefixes, edge splits, and merges the
    // common case instead of a rarity. The empty key (root content) is
    // deliberately included.
    "[ab]{0,6}"
}

fn ops_strategy() -> impl Strategy<Value = Vec<Op>> {
    let key = key_strategy();
    let op = prop_oneof![
        50 => (key.clone(), any::<u64>()).prop_map(|(k, v)| Op::Insert(k, v)),
        25 => key.clone().prop_map(Op::Remove),
        25 => key.prop_map(Op::Get),
    ];
    prop::collection::vec(op, 0..=400)
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        .. ProptestConfig::default()
    })]

    #[test]
    fn prop_equivalence(ops in ops_strategy()) {
        let mut t: RadixTree<u64> = RadixTree::new();
        let mut m: BTreeMap<String, u64> = BTreeMap::new();

        for op in ops {
            match op {
                Op::Insert(key, value) => {
                    let old_t = t.insert(&key, value);
                    let old_m = m.insert(key, value);
                    prop_assert_eq!(old_t, old_m);
                }
                Op::Remove(key) => {
                    let old_t = t.remove(&key).ok();
                    let old_m = m.remove(&key);
                    prop_assert_eq!(old_t, old_m);
                }
                Op::Get(key) => {
                    let got_t = t.get(&key).ok().copied();
                    let got_m = m.get(&key).copied();
                    prop_assert_eq!(got_t, got_m);
                }
            }

            prop_assert_eq!(t.len(), m.len());
        }

        validate_tree(&t);
        let got: Vec<(String, u64)> = t.iter().map(|(k, v)| (k, *v)).collect();
        let expected: Vec<(String, u64)> = m.iter().map(|(k, v)| (k.clone(), *v)).collect();
        prop_assert_eq!(got, expected);

        // Draining every surviving key must leave exactly the bare root.
        for key in m.into_keys() {
            prop_assert!(t.remove(&key).is_ok());
        }
        validate_tree(&t);
        prop_assert_eq!(t.node_count(), 1);
        prop_assert!(t.root().is_terminal());
        prop_assert!(!t.root().has_content());
    }
}

fn for_each_permutation<T: Clone>(items: &[T], mut f: impl FnMut(Vec<T>)) {
    fn rec<T: Clone>(items: &[T], used: &mut [bool], out: &mut Vec<T>, f: &mut impl FnMut(Vec<T>)) {
        if out.len() == items.len() {
            f(out.clone());
            return;
        }
        for i in 0..items.len() {
            if used[i] {
                continue;
            }
            used[i] = true;
            out.push(items[i].clone());
            rec(items, used, out, f);
            out.pop();
            used[i] = false;
        }
    }

    let mut used = vec![false; items.len()];
    let mut out = Vec::with_capacity(items.len());
    rec(items, &mut used, &mut out, &mut f);
}

#[test]
fn exhaustive_insert_order_small_set() {
    let keys = ["a", "b", "ab", "abc", "abd", "ba"];

    for_each_permutation(&keys, |perm| {
        let mut t: RadixTree<u64> = RadixTree::new();
        let mut m: BTreeMap<String, u64> = BTreeMap::new();

        for (i, k) in perm.into_iter().enumerate() {
            let v = i as u64;
            assert_eq!(t.insert(k, v), m.insert(k.to_owned(), v));
        }

        validate_tree(&t);
        let got: Vec<(String, u64)> = t.iter().map(|(k, v)| (k, *v)).collect();
        let expected: Vec<(String, u64)> = m.iter().map(|(k, v)| (k.clone(), *v)).collect();
        assert_eq!(got, expected);
    });
}

#[test]
fn exhaustive_remove_order_small_set() {
    let keys = ["a", "b", "ab", "abc", "abd", "ba"];

    // Insert in a fixed order, then remove in all permutations. The tree
    // is rebuilt each time since removal consumes it.
    for_each_permutation(&keys, |perm| {
        let mut t: RadixTree<u64> = RadixTree::new();
        for (i, k) in keys.iter().enumerate() {
            t.insert(k, i as u64);
        }

        for (removed, k) in perm.iter().enumerate() {
            assert!(t.remove(k).is_ok());
            assert_eq!(t.len(), keys.len() - removed - 1);
            validate_tree(&t);
        }
        assert_eq!(t.node_count(), 1);
    });
}
