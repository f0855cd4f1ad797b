//! Property-based tests for btree-index using proptest.

use btree_index::BTree;
use proptest::prelude::*;
use std::collections::BTreeMap;

#[derive(Debug, Clone)]
enum Op {
    Insert(i16, u8),
    Delete(i16),
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => (-200i16..200, any::<u8>()).prop_map(|(k, v)| Op::Insert(k, v)),
        2 => (-200i16..200).prop_map(Op::Delete),
    ]
}

proptest! {
    /// Any sequence of inserts and deletes agrees with BTreeMap and keeps the
    /// tree valid after every step.
    #[test]
    fn btree_matches_model(
        degree in 2usize..6,
        ops in prop::collection::vec(op_strategy(), 1..400)
    ) {
        let mut tree = BTree::new(degree).unwrap();
        let mut model = BTreeMap::new();

        for op in ops {
            match op {
                Op::Insert(k, v) => {
                    prop_assert_eq!(tree.insert(k, v), model.insert(k, v));
                }
                Op::Delete(k) => {
                    prop_assert_eq!(tree.delete(&k), model.remove(&k));
                }
            }
            prop_assert!(tree.validate().is_ok(), "{:?}", tree.validate());
        }

        prop_assert_eq!(tree.len(), model.len());
        for (k, v) in &model {
            prop_assert_eq!(tree.get(k), Some(v));
        }
    }

    /// Inserting distinct keys then deleting all of them finds each key
    /// exactly while present and never afterwards.
    #[test]
    fn btree_insert_delete_roundtrip(
        keys in prop::collection::btree_set(any::<i32>(), 1..300),
        degree in 2usize..5
    ) {
        let mut tree = BTree::new(degree).unwrap();
        for &key in &keys {
            prop_assert_eq!(tree.insert(key, key.wrapping_mul(3)), None);
        }
        for &key in &keys {
            prop_assert_eq!(tree.get(&key), Some(&key.wrapping_mul(3)));
        }
        for &key in &keys {
            prop_assert_eq!(tree.delete(&key), Some(key.wrapping_mul(3)));
        }
        for &key in &keys {
            prop_assert!(tree.search(&key).is_none());
        }
        prop_assert!(tree.is_empty());
        prop_assert!(tree.is_leaf_root());
    }

    /// All leaves sit at the same depth, which equals the reported height.
    #[test]
    fn btree_height_is_uniform(keys in prop::collection::vec(0u32..5000, 1..500)) {
        let mut tree = BTree::new(2).unwrap();
        for &key in &keys {
            tree.insert(key, ());
        }

        let mut depths = Vec::new();
        let mut stack = vec![(tree.root_id(), 1usize)];
        while let Some((id, depth)) = stack.pop() {
            let node = tree.get_node(id).unwrap();
            if node.is_leaf() {
                depths.push(depth);
            }
            stack.extend(node.children().iter().map(|&c| (c, depth + 1)));
        }
        prop_assert!(depths.iter().all(|&d| d == tree.height()));
    }
}
