//! GET operations for BTree.
//!
//! This module contains all the read operations for the B-tree: the
//! location-reporting `search`, the map-style accessors built on it, and the
//! arena accessors used by the rest of the crate.

use crate::error::{BTreeError, KeyResult};
use crate::types::{BTree, Node, NodeId, SearchHit};

impl<K: Ord, V> BTree<K, V> {
    // ============================================================================
    // PUBLIC GET OPERATIONS
    // ============================================================================

    /// Find the entry for `key`, reporting where it lives.
    ///
    /// Starting at the root, each node is binary searched for the first key
    /// not less than `key`. An equal key is a hit; otherwise the search ends
    /// at a leaf or continues into the child bracketing `key`.
    ///
    /// # Examples
    ///
    /// ```
    /// use btree_index::BTree;
    ///
    /// let mut tree = BTree::new(2).unwrap();
    /// tree.insert(1, "one");
    ///
    /// let hit = tree.search(&1).unwrap();
    /// assert_eq!(hit.value, &"one");
    /// assert_eq!(hit.index, 0);
    /// assert!(tree.search(&2).is_none());
    /// ```
    pub fn search(&self, key: &K) -> Option<SearchHit<'_, K, V>> {
        let mut current = self.root;

        loop {
            let node = self.node(current);
            match node.find_key(key) {
                Ok(index) => {
                    return Some(SearchHit {
                        node: current,
                        index,
                        key: &node.keys[index],
                        value: &node.values[index],
                    });
                }
                Err(_) if node.is_leaf() => return None,
                Err(index) => current = node.children[index],
            }
        }
    }

    /// Get a reference to the value associated with a key.
    ///
    /// ```
    /// use btree_index::BTree;
    ///
    /// let mut tree = BTree::new(2).unwrap();
    /// tree.insert(1, "one");
    /// assert_eq!(tree.get(&1), Some(&"one"));
    /// assert_eq!(tree.get(&2), None);
    /// ```
    pub fn get(&self, key: &K) -> Option<&V> {
        self.search(key).map(|hit| hit.value)
    }

    /// Check if key exists in the tree.
    pub fn contains_key(&self, key: &K) -> bool {
        self.search(key).is_some()
    }

    /// Get value for a key, returning an error if the key doesn't exist.
    ///
    /// ```
    /// use btree_index::BTree;
    ///
    /// let mut tree = BTree::new(2).unwrap();
    /// tree.insert(1, "one");
    /// assert_eq!(tree.get_item(&1).unwrap(), &"one");
    /// assert!(tree.get_item(&2).is_err());
    /// ```
    pub fn get_item(&self, key: &K) -> KeyResult<&V> {
        self.get(key).ok_or(BTreeError::KeyNotFound)
    }

    /// Get a mutable reference to the value for a key.
    ///
    /// ```
    /// use btree_index::BTree;
    ///
    /// let mut tree = BTree::new(2).unwrap();
    /// tree.insert(1, "one");
    /// if let Some(value) = tree.get_mut(&1) {
    ///     *value = "ONE";
    /// }
    /// assert_eq!(tree.get(&1), Some(&"ONE"));
    /// ```
    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        let (node, index) = self.search(key).map(|hit| (hit.node, hit.index))?;
        Some(&mut self.node_mut(node).values[index])
    }

    /// Get multiple keys, failing on the first one that is absent.
    pub fn get_many(&self, keys: &[K]) -> KeyResult<Vec<&V>> {
        keys.iter().map(|key| self.get_item(key)).collect()
    }
}

impl<K, V> BTree<K, V> {
    // ============================================================================
    // ARENA ACCESS
    // ============================================================================

    /// Id of the current root node.
    pub fn root_id(&self) -> NodeId {
        self.root
    }

    /// Look up a node by id, `None` if the slot is free.
    pub fn get_node(&self, id: NodeId) -> Option<&Node<K, V>> {
        self.arena.get(id)
    }

    /// Node behind an id the tree structure vouches for.
    ///
    /// # Panics
    ///
    /// Panics if `id` is not allocated, which means the tree is corrupted.
    #[inline]
    pub(crate) fn node(&self, id: NodeId) -> &Node<K, V> {
        &self.arena[id]
    }

    #[inline]
    pub(crate) fn node_mut(&mut self, id: NodeId) -> &mut Node<K, V> {
        &mut self.arena[id]
    }
}
