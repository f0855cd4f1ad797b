use btree_index::BTree;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use std::collections::BTreeMap;

const SEED: u64 = 0x5eed_b7ee;

#[test]
fn test_random_operations_match_btreemap() {
    let mut rng = StdRng::seed_from_u64(SEED);

    for degree in [2, 3, 4, 7] {
        let mut tree = BTree::new(degree).unwrap();
        let mut model = BTreeMap::new();

        for step in 0..5_000 {
            let key: u16 = rng.gen_range(0..512);
            if rng.gen_bool(0.6) {
                let value: u32 = rng.gen();
                assert_eq!(tree.insert(key, value), model.insert(key, value));
            } else {
                assert_eq!(tree.delete(&key), model.remove(&key));
            }

            if step % 250 == 0 {
                tree.validate()
                    .unwrap_or_else(|e| panic!("degree {} step {}: {}", degree, step, e));
            }
        }

        assert_eq!(tree.len(), model.len());
        for key in 0..512u16 {
            assert_eq!(tree.get(&key), model.get(&key), "degree {} key {}", degree, key);
        }
        assert!(tree.validate().is_ok());
    }
}

#[test]
fn test_insertion_order_does_not_change_contents() {
    let mut rng = StdRng::seed_from_u64(SEED + 1);
    let mut keys: Vec<i64> = (0..1_000).map(|i| i * 3 - 700).collect();

    let mut reference = BTree::new(3).unwrap();
    for &key in &keys {
        reference.insert(key, key.to_string());
    }

    for _ in 0..5 {
        keys.shuffle(&mut rng);
        let mut tree = BTree::new(3).unwrap();
        for &key in &keys {
            tree.insert(key, key.to_string());
        }

        assert_eq!(tree.len(), reference.len());
        for &key in &keys {
            assert_eq!(tree.get(&key), reference.get(&key));
        }
        assert!(!tree.contains_key(&1));
        assert!(tree.validate().is_ok());
    }
}

#[test]
fn test_shuffled_drain_keeps_invariants() {
    let mut rng = StdRng::seed_from_u64(SEED + 2);
    let mut keys: Vec<u32> = (0..3_000).collect();
    keys.shuffle(&mut rng);

    let mut tree = BTree::new(2).unwrap();
    let mut model = BTreeMap::new();
    for &key in &keys {
        tree.insert(key, key);
        model.insert(key, key);
    }

    keys.shuffle(&mut rng);
    for (i, &key) in keys.iter().enumerate() {
        assert_eq!(tree.delete(&key), model.remove(&key));
        if i % 100 == 0 {
            assert!(tree.validate().is_ok(), "invalid after {} deletes", i + 1);
        }
    }

    assert!(tree.is_empty());
    assert!(tree.is_leaf_root());
    assert_eq!(tree.arena_stats().allocated_count, 1);
}
