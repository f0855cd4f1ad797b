//! Construction and initialization logic for BTree and nodes.
//!
//! This module contains degree validation, the constructors of the tree and
//! its nodes, and the `Default` implementations.

use crate::compact_arena::CompactArena;
use crate::error::{BTreeError, InitResult};
use crate::types::{BTree, Node, NodeId, MAX_DEGREE, MIN_DEGREE};
use tracing::debug;

/// Default minimum degree for B-tree nodes
pub const DEFAULT_DEGREE: usize = 8;

/// Upper bound on the entry slots reserved up front for a new node.
const RESERVED_ENTRIES: usize = 2 * 32 - 1;

/// Entry slots to reserve for a node of `degree`; larger nodes grow on demand.
fn entry_capacity(degree: usize) -> usize {
    (2 * degree - 1).min(RESERVED_ENTRIES)
}

impl<K, V> BTree<K, V> {
    /// Create an empty B-tree with minimum degree `degree`.
    ///
    /// Non-root nodes hold between `degree - 1` and `2 * degree - 1` entries.
    ///
    /// # Errors
    ///
    /// Returns `BTreeError::InvalidDegree` when `degree < 2` or
    /// `degree > MAX_DEGREE`.
    ///
    /// # Examples
    ///
    /// ```
    /// use btree_index::BTree;
    ///
    /// let tree = BTree::<i32, String>::new(3).unwrap();
    /// assert!(tree.is_empty());
    /// assert_eq!(tree.degree(), 3);
    ///
    /// assert!(BTree::<i32, String>::new(1).is_err());
    /// ```
    pub fn new(degree: usize) -> InitResult<Self> {
        validation::validate_degree(degree)?;
        Ok(Self::with_valid_degree(degree))
    }

    /// Build the empty tree for a degree that already passed validation.
    fn with_valid_degree(degree: usize) -> Self {
        let mut arena = CompactArena::new();
        let root = arena.allocate(Node::new_leaf(degree));
        debug!(degree, "created empty B-tree");

        Self {
            degree,
            root,
            len: 0,
            arena,
        }
    }

    /// Create a B-tree with [`DEFAULT_DEGREE`].
    pub fn with_default_degree() -> InitResult<Self> {
        Self::new(DEFAULT_DEGREE)
    }

    /// Create a B-tree whose degree suits roughly `expected_len` entries.
    pub fn with_expected_len(expected_len: usize) -> InitResult<Self> {
        Self::new(validation::recommended_degree(expected_len))
    }

    /// Minimum degree `t` this tree was built with.
    pub fn degree(&self) -> usize {
        self.degree
    }
}

impl<K: Ord, V> BTree<K, V> {
    /// Build a tree by inserting `entries` one at a time, in order.
    ///
    /// A later entry with an already-seen key overwrites the earlier value.
    ///
    /// ```
    /// use btree_index::BTree;
    ///
    /// let tree = BTree::from_entries(2, vec![("b", 2), ("a", 1), ("b", 3)]).unwrap();
    /// assert_eq!(tree.len(), 2);
    /// assert_eq!(tree.get(&"b"), Some(&3));
    /// ```
    pub fn from_entries<I>(degree: usize, entries: I) -> InitResult<Self>
    where
        I: IntoIterator<Item = (K, V)>,
    {
        let mut tree = Self::new(degree)?;
        tree.extend(entries);
        Ok(tree)
    }
}

impl<K: Ord, V> Extend<(K, V)> for BTree<K, V> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl<K, V> Node<K, V> {
    /// Creates an empty leaf, reserving room for a full node of `degree`
    /// when that is small.
    pub fn new_leaf(degree: usize) -> Self {
        Self {
            keys: Vec::with_capacity(entry_capacity(degree)),
            values: Vec::with_capacity(entry_capacity(degree)),
            children: Vec::new(),
            leaf: true,
        }
    }

    /// Creates an internal node with no entries and a single child.
    ///
    /// This is the shape of a freshly grown root just before its only child
    /// is split.
    pub fn new_root_above(degree: usize, child: NodeId) -> Self {
        let mut children = Vec::with_capacity(entry_capacity(degree) + 1);
        children.push(child);
        Self {
            keys: Vec::with_capacity(entry_capacity(degree)),
            values: Vec::with_capacity(entry_capacity(degree)),
            children,
            leaf: false,
        }
    }
}

// Default implementations
impl<K, V> Default for BTree<K, V> {
    /// Create a B-tree with default degree.
    fn default() -> Self {
        Self::with_valid_degree(DEFAULT_DEGREE)
    }
}

impl<K, V> Default for Node<K, V> {
    /// An empty leaf without reserved storage; fills freed arena slots.
    fn default() -> Self {
        Self {
            keys: Vec::new(),
            values: Vec::new(),
            children: Vec::new(),
            leaf: true,
        }
    }
}

/// Validation utilities for construction
pub mod validation {
    use super::*;

    /// Validate that a minimum degree can form a B-tree.
    pub fn validate_degree(degree: usize) -> InitResult<()> {
        if degree < MIN_DEGREE {
            Err(BTreeError::invalid_degree(degree, MIN_DEGREE))
        } else if degree > MAX_DEGREE {
            Err(BTreeError::degree_too_large(degree, MAX_DEGREE))
        } else {
            Ok(())
        }
    }

    /// Get the recommended minimum degree for an expected number of entries.
    ///
    /// Small trees keep nodes narrow; large trees trade wider nodes for
    /// fewer levels. Always at least `MIN_DEGREE`.
    pub fn recommended_degree(expected_entries: usize) -> usize {
        if expected_entries < 100 {
            MIN_DEGREE
        } else if expected_entries < 10_000 {
            DEFAULT_DEGREE
        } else if expected_entries < 1_000_000 {
            16
        } else {
            32
        }
    }
}
