//! INSERT operations for BTree.
//!
//! Insertion is a single top-down pass. A full root is split before the
//! descent starts, and every full child is split before the descent enters
//! it, so the leaf that finally receives the entry always has room.

use std::cmp::Ordering;

use crate::error::{BTreeResultExt, ModifyResult};
use crate::types::{BTree, Node, NodeId};
use tracing::trace;

impl<K: Ord, V> BTree<K, V> {
    /// Insert a key-value pair into the tree.
    ///
    /// If the key is already present its value is replaced and the previous
    /// value returned; the key itself and the entry count are unchanged.
    ///
    /// # Examples
    ///
    /// ```
    /// use btree_index::BTree;
    ///
    /// let mut tree = BTree::new(2).unwrap();
    /// assert_eq!(tree.insert(1, "one"), None);
    /// assert_eq!(tree.insert(1, "uno"), Some("one"));
    /// assert_eq!(tree.len(), 1);
    /// ```
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        if self.node(self.root).is_full(self.degree) {
            self.grow_root();
        }

        let old_value = self.insert_nonfull(self.root, key, value);
        if old_value.is_none() {
            self.len += 1;
        }
        old_value
    }

    /// Insert with invariant checks before and after.
    ///
    /// Returns `DataIntegrityError` if either check fails.
    pub fn try_insert(&mut self, key: K, value: V) -> ModifyResult<Option<V>> {
        self.validate_for_operation("insert")?;
        let old_value = self.insert(key, value);
        self.validate_for_operation("insert")
            .with_context("after insert")?;
        Ok(old_value)
    }

    // ============================================================================
    // HELPERS FOR INSERT OPERATIONS
    // ============================================================================

    /// Put a new empty root above the full one and split the old root.
    fn grow_root(&mut self) {
        let old_root = self.root;
        let new_root = self
            .arena
            .allocate(Node::new_root_above(self.degree, old_root));
        self.root = new_root;
        trace!(target: "btree::grow", old_root, new_root, "root grew by one level");

        self.split_child(new_root, 0);
    }

    /// Descend from `start`, which must not be full, and place the entry.
    fn insert_nonfull(&mut self, start: NodeId, key: K, value: V) -> Option<V> {
        let degree = self.degree;
        let mut current = start;

        loop {
            let node = self.node_mut(current);
            let mut index = match node.find_key(&key) {
                Ok(index) => return Some(std::mem::replace(&mut node.values[index], value)),
                Err(index) => index,
            };

            if node.is_leaf() {
                node.insert_entry(index, key, value);
                return None;
            }

            let child = node.children[index];
            if self.node(child).is_full(degree) {
                self.split_child(current, index);

                // The promoted median now sits at `index`; it decides which
                // half to enter, or is itself the key.
                let node = self.node_mut(current);
                match key.cmp(&node.keys[index]) {
                    Ordering::Equal => {
                        return Some(std::mem::replace(&mut node.values[index], value));
                    }
                    Ordering::Greater => index += 1,
                    Ordering::Less => {}
                }
            }

            current = self.node(current).children[index];
        }
    }
}

impl<K, V> BTree<K, V> {
    /// Split the full child at `index` of `parent`.
    ///
    /// The child keeps its lower half, the median moves into `parent` at
    /// `index`, and a new right sibling holding the upper half is linked in
    /// at `index + 1`. `parent` must not be full.
    pub(crate) fn split_child(&mut self, parent: NodeId, index: usize) {
        let degree = self.degree;
        let child = self.node(parent).children[index];

        let (median_key, median_value, sibling) = self.node_mut(child).split_upper(degree);
        let sibling = self.arena.allocate(sibling);

        let parent_node = self.node_mut(parent);
        parent_node.insert_entry(index, median_key, median_value);
        parent_node.children.insert(index + 1, sibling);

        trace!(target: "btree::split", parent, child, sibling, "split full child");
    }
}
