//! Property-based tests for the AVL map.
//!
//! Random sequences of insertions and removals are replayed against `BTreeMap`, checking after
//! each one that the tree stays ordered and balanced and that every stored balance factor agrees
//! with heights computed from scratch.

use positional_trees::binary_tree::Position;
use positional_trees::AvlMap;
use proptest::prelude::*;
use std::collections::BTreeMap;

#[derive(Clone, Debug)]
enum Op {
    Insert(u16, u32),
    Remove(u16),
}

fn arbitrary_op() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0..512u16, any::<u32>()).prop_map(|(key, value)| Op::Insert(key, value)),
        (0..512u16).prop_map(Op::Remove),
    ]
}

fn arbitrary_ops() -> impl Strategy<Value = Vec<Op>> {
    prop::collection::vec(arbitrary_op(), 0..200)
}

// Returns the height in nodes of the subtree at `p`, or `None` if a factor is off.
fn checked_height(map: &AvlMap<u16, u32>, p: Option<Position>) -> Option<i32> {
    let p = match p {
        Some(p) => p,
        None => return Some(0),
    };
    let tree = map.tree();
    let left = checked_height(map, tree.left(p).ok()?)?;
    let right = checked_height(map, tree.right(p).ok()?)?;
    let balance = map.balance_factor(p).ok()?;
    if balance != left - right || balance.abs() > 1 {
        return None;
    }
    Some(1 + left.max(right))
}

// Smallest number of nodes an AVL tree of the given height (in edges) can hold.
fn min_nodes(height: usize) -> usize {
    let (mut a, mut b) = (1, 2);
    for _ in 0..height {
        let next = a + b + 1;
        a = b;
        b = next;
    }
    a
}

proptest! {
    #[test]
    fn prop_matches_btree_map(ops in arbitrary_ops()) {
        let mut map = AvlMap::new();
        let mut expected = BTreeMap::new();

        for op in ops {
            match op {
                Op::Insert(key, value) => {
                    prop_assert_eq!(map.insert(key, value), expected.insert(key, value));
                },
                Op::Remove(key) => {
                    let removed = expected.remove(&key).map(|value| (key, value));
                    prop_assert_eq!(map.remove(&key).ok(), removed);
                },
            }
            prop_assert_eq!(map.len(), expected.len());
            prop_assert_eq!(map.tree().inorder().count(), map.len());
        }

        prop_assert_eq!(
            map.iter().collect::<Vec<(&u16, &u32)>>(),
            expected.iter().collect::<Vec<(&u16, &u32)>>()
        );
    }
}

proptest! {
    #[test]
    fn prop_balance_factors_are_exact(ops in arbitrary_ops()) {
        let mut map = AvlMap::new();

        for op in ops {
            match op {
                Op::Insert(key, value) => {
                    map.insert(key, value);
                },
                Op::Remove(key) => {
                    let _ = map.remove(&key);
                },
            }
            prop_assert!(checked_height(&map, map.tree().root()).is_some());
        }
    }
}

proptest! {
    #[test]
    fn prop_height_is_logarithmic(keys in prop::collection::vec(any::<u16>(), 1..300)) {
        let map: AvlMap<u16, u32> = keys.into_iter().map(|key| (key, 0)).collect();
        let height = map.tree().height(None).unwrap();
        prop_assert!(min_nodes(height) <= map.len());
    }
}

proptest! {
    #[test]
    fn prop_neighbors_are_sorted(keys in prop::collection::vec(any::<u16>(), 0..100)) {
        let map: AvlMap<u16, u32> = keys.into_iter().map(|key| (key, 0)).collect();

        let mut walked = Vec::new();
        let mut current = map.last();
        while let Some(p) = current {
            walked.push(*map.key(p).unwrap());
            current = map.before(p).unwrap();
        }
        walked.reverse();

        prop_assert_eq!(walked, map.keys().cloned().collect::<Vec<u16>>());
    }
}

proptest! {
    #[test]
    fn prop_into_iter_round_trip(
        entries in prop::collection::vec((any::<u16>(), any::<u32>()), 0..100)
    ) {
        let map: AvlMap<u16, u32> = entries.iter().cloned().collect();
        let expected: BTreeMap<u16, u32> = entries.into_iter().collect();

        let pairs: Vec<(u16, u32)> = map.into_iter().collect();
        prop_assert_eq!(&pairs, &expected.into_iter().collect::<Vec<(u16, u32)>>());

        let rebuilt: AvlMap<u16, u32> = pairs.into_iter().collect();
        prop_assert!(checked_height(&rebuilt, rebuilt.tree().root()).is_some());
    }
}
