//! Core types and data structures for BTree.
//!
//! This module contains the tree and node structures, the node id type used
//! for arena links, and the degree constants shared by the other modules.

use crate::compact_arena::CompactArena;

// ============================================================================
// CONSTANTS
// ============================================================================

/// Smallest legal minimum degree `t`.
pub const MIN_DEGREE: usize = 2;

/// Largest accepted minimum degree; keeps `2t` within `usize`.
pub const MAX_DEGREE: usize = usize::MAX / 2;

// ============================================================================
// TYPE DEFINITIONS
// ============================================================================

/// Node ID type for arena-based allocation
pub type NodeId = u32;

/// Id that never names an allocated node.
pub const NULL_NODE: NodeId = u32::MAX;

// ============================================================================
// CORE DATA STRUCTURES
// ============================================================================

/// Ordered key-value index backed by a B-tree of minimum degree `t`.
///
/// Every node other than the root holds between `t - 1` and `2t - 1`
/// entries, internal nodes with `k` entries have `k + 1` children, and all
/// leaves sit at the same depth. Unlike a B+ tree, values live in internal
/// nodes as well as leaves.
///
/// Insertion splits full nodes on the way down and deletion tops up thin
/// nodes on the way down, so neither operation ever walks back up the tree.
///
/// # Examples
///
/// ```
/// use btree_index::BTree;
///
/// let mut tree = BTree::new(2).unwrap();
/// for key in [10, 20, 5, 6, 12, 30, 7, 17] {
///     tree.insert(key, key * 10);
/// }
///
/// assert_eq!(tree.get(&6), Some(&60));
/// assert_eq!(tree.delete(&6), Some(60));
/// assert!(tree.search(&6).is_none());
/// assert!(tree.check_invariants());
/// ```
///
/// # Performance Characteristics
///
/// - **Insertion**: O(t log_t n)
/// - **Lookup**: O(log n)
/// - **Deletion**: O(t log_t n)
#[derive(Debug)]
pub struct BTree<K, V> {
    /// Minimum degree `t`; fixed at construction.
    pub(crate) degree: usize,
    /// The root node of the tree.
    pub(crate) root: NodeId,
    /// Number of entries stored across all nodes.
    pub(crate) len: usize,
    /// Storage for every node reachable from `root`.
    pub(crate) arena: CompactArena<Node<K, V>>,
}

/// A single B-tree node.
///
/// `keys[i]` and `values[i]` form one entry. For an internal node,
/// `children[i]` holds keys below `keys[i]` and `children[i + 1]` keys above.
///
/// Nodes are read-only outside the tree; only the tree reshapes them.
///
/// ```compile_fail
/// let mut node = btree_index::Node::<i32, i32>::default();
/// node.insert_entry(0, 1, 1);
/// ```
#[derive(Debug, Clone)]
pub struct Node<K, V> {
    pub(crate) keys: Vec<K>,
    pub(crate) values: Vec<V>,
    pub(crate) children: Vec<NodeId>,
    pub(crate) leaf: bool,
}

/// Location of an entry found by [`BTree::search`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchHit<'a, K, V> {
    /// Node holding the entry.
    pub node: NodeId,
    /// Position of the entry within that node.
    pub index: usize,
    /// Key stored at `index`.
    pub key: &'a K,
    /// Value paired with `key`.
    pub value: &'a V,
}
