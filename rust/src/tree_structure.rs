//! Tree structure management operations for BTree.
//!
//! This module contains tree-level queries and maintenance: size, height,
//! node counts, arena statistics and clearing.

use crate::compact_arena::CompactArenaStats;
use crate::types::{BTree, Node, NodeId};

// ============================================================================
// TREE STRUCTURE OPERATIONS
// ============================================================================

impl<K, V> BTree<K, V> {
    /// Returns the number of entries in the tree.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the tree is empty.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns true if the root is a leaf node.
    pub fn is_leaf_root(&self) -> bool {
        self.node(self.root).is_leaf()
    }

    /// Number of levels; a lone root leaf has height 1.
    pub fn height(&self) -> usize {
        let mut height = 1;
        let mut current = self.node(self.root);
        while !current.is_leaf() {
            current = self.node(current.children[0]);
            height += 1;
        }
        height
    }

    /// Remove every entry, leaving an empty leaf root.
    pub fn clear(&mut self) {
        self.arena.clear();
        self.root = self.arena.allocate(Node::new_leaf(self.degree));
        self.len = 0;
    }

    /// Count the leaf and internal nodes reachable from the root.
    pub fn count_nodes_in_tree(&self) -> (usize, usize) {
        self.count_nodes_recursive(self.root)
    }

    fn count_nodes_recursive(&self, id: NodeId) -> (usize, usize) {
        let node = self.node(id);
        if node.is_leaf() {
            return (1, 0);
        }

        node.children
            .iter()
            .map(|&child| self.count_nodes_recursive(child))
            .fold((0, 1), |(leaves, internals), (l, i)| {
                (leaves + l, internals + i)
            })
    }

    /// Statistics for the node arena.
    pub fn arena_stats(&self) -> CompactArenaStats {
        self.arena.stats()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_len_tracks_inserts_and_deletes() {
        let mut tree = BTree::new(2).unwrap();
        assert!(tree.is_empty());
        for key in 0..10 {
            tree.insert(key, key);
        }
        tree.insert(3, 30);
        assert_eq!(tree.len(), 10);
        tree.delete(&3);
        tree.delete(&3);
        assert_eq!(tree.len(), 9);
    }

    #[test]
    fn test_height_grows_logarithmically() {
        let mut tree = BTree::new(2).unwrap();
        assert_eq!(tree.height(), 1);
        for key in 0..1000 {
            tree.insert(key, key);
        }
        // Every non-root node has at least two children at t = 2.
        let height = tree.height();
        assert!(height >= 5 && height <= 10, "height {}", height);
    }

    #[test]
    fn test_node_counts_match_arena() {
        let mut tree = BTree::new(3).unwrap();
        for key in 0..300 {
            tree.insert(key, key);
        }
        for key in (0..300).step_by(2) {
            tree.delete(&key);
        }

        let (leaves, internals) = tree.count_nodes_in_tree();
        assert!(leaves > 1);
        assert!(internals >= 1);
        assert_eq!(tree.arena_stats().allocated_count, leaves + internals);
    }

    #[test]
    fn test_clear() {
        let mut tree = BTree::new(2).unwrap();
        for key in 0..100 {
            tree.insert(key, key);
        }
        tree.clear();

        assert!(tree.is_empty());
        assert!(tree.is_leaf_root());
        assert_eq!(tree.count_nodes_in_tree(), (1, 0));
        assert_eq!(tree.get(&5), None);

        tree.insert(5, 50);
        assert_eq!(tree.get(&5), Some(&50));
    }
}
