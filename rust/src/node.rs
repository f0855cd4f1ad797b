//! Node-level operations for BTree.
//!
//! Everything here touches a single node: locating a key, occupancy checks
//! against the minimum degree, splitting off the upper half, absorbing a
//! right sibling, and the entry moves used when borrowing from a sibling.
//! Coordinating several nodes is left to the insert and delete modules.

use crate::types::{Node, NodeId};

impl<K, V> Node<K, V> {
    // ============================================================================
    // STATUS CHECKS
    // ============================================================================

    /// Returns the number of entries in this node.
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn is_leaf(&self) -> bool {
        self.leaf
    }

    /// Returns true if this node holds `2t - 1` entries and must be split
    /// before an insert may descend into it.
    pub fn is_full(&self, degree: usize) -> bool {
        self.keys.len() >= 2 * degree - 1
    }

    /// Returns true if this node can give up an entry and stay at or above
    /// the `t - 1` minimum.
    pub fn can_donate(&self, degree: usize) -> bool {
        self.keys.len() >= degree
    }

    pub fn keys(&self) -> &[K] {
        &self.keys
    }

    pub fn values(&self) -> &[V] {
        &self.values
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    // ============================================================================
    // ENTRY MOVES
    // ============================================================================

    /// Insert an entry at `index`, shifting later entries right.
    pub(crate) fn insert_entry(&mut self, index: usize, key: K, value: V) {
        self.keys.insert(index, key);
        self.values.insert(index, value);
    }

    /// Remove the entry at `index`, shifting later entries left.
    pub(crate) fn remove_entry(&mut self, index: usize) -> (K, V) {
        (self.keys.remove(index), self.values.remove(index))
    }

    /// Overwrite the entry at `index`, returning the previous one.
    pub(crate) fn replace_entry(&mut self, index: usize, key: K, value: V) -> (K, V) {
        (
            std::mem::replace(&mut self.keys[index], key),
            std::mem::replace(&mut self.values[index], value),
        )
    }

    /// Remove the last entry.
    pub(crate) fn remove_last_entry(&mut self) -> (K, V) {
        let last = self.keys.len() - 1;
        self.remove_entry(last)
    }

    // ============================================================================
    // SPLITTING AND MERGING
    // ============================================================================

    /// Split a full node in place.
    ///
    /// `self` keeps entries `[0, t-2]` (and children `[0, t-1]`); the
    /// returned sibling takes entries `[t, 2t-2]` (and children `[t, 2t-1]`).
    /// Entry `t-1` is returned separately for promotion into the parent.
    pub(crate) fn split_upper(&mut self, degree: usize) -> (K, V, Node<K, V>) {
        debug_assert!(self.is_full(degree), "split of a node that is not full");

        let right_keys = self.keys.split_off(degree);
        let right_values = self.values.split_off(degree);
        let right_children = if self.leaf {
            Vec::new()
        } else {
            self.children.split_off(degree)
        };

        let (median_key, median_value) = self.remove_last_entry();

        let sibling = Node {
            keys: right_keys,
            values: right_values,
            children: right_children,
            leaf: self.leaf,
        };

        (median_key, median_value, sibling)
    }

    /// Append the parent separator and all of `right` onto this node.
    pub(crate) fn absorb(&mut self, separator_key: K, separator_value: V, mut right: Node<K, V>) {
        self.keys.push(separator_key);
        self.values.push(separator_value);
        self.keys.append(&mut right.keys);
        self.values.append(&mut right.values);
        self.children.append(&mut right.children);
    }

    // ============================================================================
    // BORROWING HELPERS
    // ============================================================================

    /// Take the first entry and, for an internal node, the first child
    /// (used when this is the right sibling).
    pub(crate) fn take_first(&mut self) -> (K, V, Option<NodeId>) {
        let (key, value) = self.remove_entry(0);
        let child = if self.leaf {
            None
        } else {
            Some(self.children.remove(0))
        };
        (key, value, child)
    }

    /// Take the last entry and, for an internal node, the last child
    /// (used when this is the left sibling).
    pub(crate) fn take_last(&mut self) -> (K, V, Option<NodeId>) {
        let (key, value) = self.remove_last_entry();
        let child = if self.leaf {
            None
        } else {
            self.children.pop()
        };
        (key, value, child)
    }

    /// Accept a rotated entry at the front (from the left sibling via the parent).
    pub(crate) fn push_front(&mut self, key: K, value: V, child: Option<NodeId>) {
        self.insert_entry(0, key, value);
        if let Some(child) = child {
            self.children.insert(0, child);
        }
    }

    /// Accept a rotated entry at the back (from the right sibling via the parent).
    pub(crate) fn push_back(&mut self, key: K, value: V, child: Option<NodeId>) {
        self.keys.push(key);
        self.values.push(value);
        if let Some(child) = child {
            self.children.push(child);
        }
    }
}

impl<K: Ord, V> Node<K, V> {
    /// Locate `key` in this node.
    ///
    /// `Ok(i)` means `keys[i] == key`. `Err(i)` is the index of the first key
    /// greater than `key`, which is also the index of the child whose range
    /// brackets it.
    pub fn find_key(&self, key: &K) -> Result<usize, usize> {
        self.keys.binary_search(key)
    }
}
