//! Validation and debugging utilities for BTree.
//!
//! This module contains invariant checking, debugging utilities, and the
//! validation hook used by the checked insert and delete operations.

use std::fmt::{Debug, Write};

use crate::error::{BTreeError, BTreeResult, BTreeResultExt};
use crate::types::{BTree, NodeId};
use tracing::warn;

/// Facts gathered while walking the tree.
#[derive(Default)]
struct Walk {
    entries: usize,
    nodes: usize,
    leaf_depth: Option<usize>,
}

// ============================================================================
// VALIDATION METHODS
// ============================================================================

impl<K: Ord, V> BTree<K, V> {
    /// Check if the tree maintains B-tree invariants.
    /// Returns true if all invariants are satisfied.
    pub fn check_invariants(&self) -> bool {
        self.check_invariants_detailed().is_ok()
    }

    /// Check invariants with detailed error reporting.
    ///
    /// Verifies node occupancy against the minimum degree, key order within
    /// and across nodes, child counts, uniform leaf depth, and that the
    /// arena and entry count agree with what is reachable from the root.
    pub fn check_invariants_detailed(&self) -> BTreeResult<()> {
        let mut walk = Walk::default();
        self.check_node(self.root, None, None, 0, &mut walk)?;

        if walk.entries != self.len {
            return Err(BTreeError::corrupted_tree(
                "Entry count",
                &format!("{} reachable vs {} recorded", walk.entries, self.len),
            ));
        }

        let allocated = self.arena.len();
        if walk.nodes != allocated {
            return Err(BTreeError::arena_error(
                "Node consistency check",
                &format!("{} in tree vs {} in arena", walk.nodes, allocated),
            ));
        }

        Ok(())
    }

    /// Alias for check_invariants_detailed (for test compatibility).
    pub fn validate(&self) -> BTreeResult<()> {
        self.check_invariants_detailed()
    }

    /// Check if tree is in a valid state for `operation`.
    pub fn validate_for_operation(&self, operation: &str) -> BTreeResult<()> {
        self.check_invariants_detailed()
            .with_operation(operation)
            .map_err(|e| {
                warn!(operation, error = %e, "tree failed validation");
                BTreeError::data_integrity(operation, &e.to_string())
            })
    }

    /// Recursively check `id` and its subtree.
    ///
    /// Every key must lie strictly between `lower` and `upper`.
    fn check_node(
        &self,
        id: NodeId,
        lower: Option<&K>,
        upper: Option<&K>,
        depth: usize,
        walk: &mut Walk,
    ) -> BTreeResult<()> {
        let node = self.arena.get(id).ok_or_else(|| {
            BTreeError::arena_error("Node lookup", &format!("node {} is not allocated", id))
        })?;
        let context = format!("Node {}", id);
        let is_root = id == self.root;
        let max_entries = 2 * self.degree - 1;
        let min_entries = if is_root { 0 } else { self.degree - 1 };

        if node.keys.len() != node.values.len() {
            return Err(BTreeError::corrupted_tree(
                &context,
                &format!("{} keys but {} values", node.keys.len(), node.values.len()),
            ));
        }

        if node.len() < min_entries || node.len() > max_entries {
            return Err(BTreeError::corrupted_tree(
                &context,
                &format!(
                    "{} entries outside [{}, {}]",
                    node.len(),
                    min_entries,
                    max_entries
                ),
            ));
        }

        if node.keys.windows(2).any(|pair| pair[0] >= pair[1]) {
            return Err(BTreeError::corrupted_tree(&context, "keys out of order"));
        }

        if let (Some(lower), Some(first)) = (lower, node.keys.first()) {
            if first <= lower {
                return Err(BTreeError::corrupted_tree(&context, "key below subtree range"));
            }
        }
        if let (Some(upper), Some(last)) = (upper, node.keys.last()) {
            if last >= upper {
                return Err(BTreeError::corrupted_tree(&context, "key above subtree range"));
            }
        }

        walk.entries += node.len();
        walk.nodes += 1;

        if node.is_leaf() {
            if !node.children.is_empty() {
                return Err(BTreeError::corrupted_tree(&context, "leaf with children"));
            }
            return match walk.leaf_depth {
                None => {
                    walk.leaf_depth = Some(depth);
                    Ok(())
                }
                Some(expected) if expected == depth => Ok(()),
                Some(expected) => Err(BTreeError::corrupted_tree(
                    &context,
                    &format!("leaf at depth {} but others at {}", depth, expected),
                )),
            };
        }

        if node.is_empty() {
            return Err(BTreeError::corrupted_tree(&context, "internal node without keys"));
        }
        if node.children.len() != node.keys.len() + 1 {
            return Err(BTreeError::corrupted_tree(
                &context,
                &format!(
                    "{} keys but {} children",
                    node.keys.len(),
                    node.children.len()
                ),
            ));
        }

        for (i, &child) in node.children.iter().enumerate() {
            let child_lower = if i == 0 { lower } else { Some(&node.keys[i - 1]) };
            let child_upper = if i == node.keys.len() {
                upper
            } else {
                Some(&node.keys[i])
            };
            self.check_node(child, child_lower, child_upper, depth + 1, walk)?;
        }

        Ok(())
    }
}

// ============================================================================
// DEBUGGING AND TESTING UTILITIES
// ============================================================================

impl<K: Debug, V> BTree<K, V> {
    /// Render the node structure, one node per line, indented by depth.
    ///
    /// ```
    /// use btree_index::BTree;
    ///
    /// let mut tree = BTree::new(2).unwrap();
    /// for key in 1..=4 {
    ///     tree.insert(key, ());
    /// }
    /// assert_eq!(tree.dump_structure(), "[2]\n  [1]\n  [3, 4]\n");
    /// ```
    pub fn dump_structure(&self) -> String {
        let mut out = String::new();
        self.dump_node(self.root, 0, &mut out);
        out
    }

    /// Prints the node structure for debugging.
    pub fn print_structure(&self) {
        print!("{}", self.dump_structure());
    }

    fn dump_node(&self, id: NodeId, depth: usize, out: &mut String) {
        let node = self.node(id);
        // Writing into a String cannot fail.
        let _ = writeln!(out, "{}{:?}", "  ".repeat(depth), node.keys);
        for &child in &node.children {
            self.dump_node(child, depth + 1, out);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Node;

    fn tree_with(keys: std::ops::Range<i32>) -> BTree<i32, i32> {
        let mut tree = BTree::new(2).unwrap();
        for key in keys {
            tree.insert(key, key);
        }
        tree
    }

    #[test]
    fn test_fresh_and_populated_trees_validate() {
        assert!(BTree::<i32, i32>::new(2).unwrap().validate().is_ok());
        assert!(tree_with(0..100).validate().is_ok());
    }

    #[test]
    fn test_detects_unsorted_keys() {
        let mut tree = tree_with(0..3);
        let root = tree.root;
        tree.node_mut(root).keys.swap(0, 2);
        let err = tree.check_invariants_detailed().unwrap_err();
        assert!(err.to_string().contains("keys out of order"), "{}", err);
    }

    #[test]
    fn test_detects_underfull_node() {
        let mut tree = tree_with(0..10);
        let root = tree.root;
        let child = tree.node(root).children[0];
        let node = tree.node_mut(child);
        node.keys.clear();
        node.values.clear();
        node.children.clear();
        node.leaf = true;
        assert!(!tree.check_invariants());
    }

    #[test]
    fn test_detects_wrong_len() {
        let mut tree = tree_with(0..10);
        tree.len = 11;
        let err = tree.validate().unwrap_err();
        assert!(err.to_string().contains("Entry count"), "{}", err);
    }

    #[test]
    fn test_detects_leaked_node() {
        let mut tree = tree_with(0..10);
        tree.arena.allocate(Node::new_leaf(2));
        assert!(matches!(tree.validate(), Err(BTreeError::ArenaError(_))));
    }

    #[test]
    fn test_validate_for_operation_wraps_error() {
        let mut tree = tree_with(0..10);
        tree.len = 0;
        let err = tree.validate_for_operation("insert").unwrap_err();
        assert!(matches!(err, BTreeError::DataIntegrityError(_)));
        assert!(tree.try_insert(99, 99).is_err());
    }

    #[test]
    fn test_dump_structure() {
        let tree = tree_with(0..7);
        let dump = tree.dump_structure();
        assert_eq!(dump.lines().next(), Some("[1, 3]"));
        assert_eq!(dump.lines().count(), 4);
    }
}
