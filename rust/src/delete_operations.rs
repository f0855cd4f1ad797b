//! DELETE operations for BTree.
//!
//! Deletion is a single top-down pass. Before the descent enters a child
//! holding only `t - 1` entries, that child is topped up by rotating an entry
//! in from a sibling or by merging it with a sibling. Any node the descent
//! reaches can therefore lose an entry without dropping below the minimum,
//! and nothing ever has to be repaired on the way back up.

use crate::error::{BTreeError, BTreeResultExt, ModifyResult};
use crate::types::{BTree, NodeId};
use tracing::trace;

impl<K: Ord, V> BTree<K, V> {
    /// Remove `key` from the tree, returning its value.
    ///
    /// Deleting an absent key is a no-op and returns `None`.
    ///
    /// # Examples
    ///
    /// ```
    /// use btree_index::BTree;
    ///
    /// let mut tree = BTree::new(2).unwrap();
    /// tree.insert(1, "one");
    /// assert_eq!(tree.delete(&1), Some("one"));
    /// assert_eq!(tree.delete(&1), None);
    /// assert!(tree.is_empty());
    /// ```
    pub fn delete(&mut self, key: &K) -> Option<V> {
        let removed = self.delete_from(self.root, key);
        self.collapse_root();
        if removed.is_some() {
            self.len -= 1;
        }
        removed
    }

    /// Delete with invariant checks before and after.
    ///
    /// Unlike `delete`, an absent key is reported as `KeyNotFound`.
    pub fn try_delete(&mut self, key: &K) -> ModifyResult<V> {
        self.validate_for_operation("delete")?;
        let value = self.delete(key).ok_or(BTreeError::KeyNotFound)?;
        self.validate_for_operation("delete")
            .with_context("after delete")?;
        Ok(value)
    }

    /// Delete `key` from the subtree rooted at `id`.
    ///
    /// `id` is the root or holds at least `t` entries.
    fn delete_from(&mut self, id: NodeId, key: &K) -> Option<V> {
        let degree = self.degree;
        let node = self.node(id);

        match node.find_key(key) {
            Ok(index) if node.is_leaf() => Some(self.node_mut(id).remove_entry(index).1),
            Ok(index) => self.delete_internal_entry(id, index, key),
            Err(_) if node.is_leaf() => None,
            Err(index) => {
                let mut child = node.children[index];
                if !self.node(child).can_donate(degree) {
                    child = self.fix_shortage(id, index);
                }
                self.delete_from(child, key)
            }
        }
    }

    /// Remove the entry at `index` of internal node `id`.
    fn delete_internal_entry(&mut self, id: NodeId, index: usize, key: &K) -> Option<V> {
        let degree = self.degree;
        let node = self.node(id);
        let left = node.children[index];
        let right = node.children[index + 1];

        if self.node(left).can_donate(degree) {
            let (pred_key, pred_value) = self.remove_max(left);
            let (_, value) = self.node_mut(id).replace_entry(index, pred_key, pred_value);
            Some(value)
        } else if self.node(right).can_donate(degree) {
            let (succ_key, succ_value) = self.remove_min(right);
            let (_, value) = self.node_mut(id).replace_entry(index, succ_key, succ_value);
            Some(value)
        } else {
            // The key becomes the middle entry of the merged node.
            self.merge_children(id, index);
            self.delete_from(left, key)
        }
    }
}

impl<K, V> BTree<K, V> {
    // ============================================================================
    // PREDECESSOR / SUCCESSOR REMOVAL
    // ============================================================================

    /// Remove and return the largest entry in the subtree rooted at `id`.
    ///
    /// `id` must hold at least `t` entries.
    fn remove_max(&mut self, id: NodeId) -> (K, V) {
        let degree = self.degree;
        let node = self.node(id);
        if node.is_leaf() {
            return self.node_mut(id).remove_last_entry();
        }

        let index = node.children.len() - 1;
        let mut child = node.children[index];
        if !self.node(child).can_donate(degree) {
            child = self.fix_shortage(id, index);
        }
        self.remove_max(child)
    }

    /// Remove and return the smallest entry in the subtree rooted at `id`.
    ///
    /// `id` must hold at least `t` entries.
    fn remove_min(&mut self, id: NodeId) -> (K, V) {
        let degree = self.degree;
        let node = self.node(id);
        if node.is_leaf() {
            return self.node_mut(id).remove_entry(0);
        }

        let mut child = node.children[0];
        if !self.node(child).can_donate(degree) {
            child = self.fix_shortage(id, 0);
        }
        self.remove_min(child)
    }

    // ============================================================================
    // REBALANCING
    // ============================================================================

    /// Bring child `index` of `parent` up to at least `t` entries.
    ///
    /// Prefers a rotation from the right sibling, then from the left, and
    /// merges only when neither sibling can spare an entry. Returns the node
    /// that now covers the child's key range, which differs from the
    /// original child when it was merged into its left sibling.
    pub(crate) fn fix_shortage(&mut self, parent: NodeId, index: usize) -> NodeId {
        let degree = self.degree;
        let node = self.node(parent);
        let has_right = index + 1 < node.children.len();

        if has_right && self.node(node.children[index + 1]).can_donate(degree) {
            self.borrow_from_right(parent, index);
            self.node(parent).children[index]
        } else if index > 0 && self.node(node.children[index - 1]).can_donate(degree) {
            self.borrow_from_left(parent, index);
            self.node(parent).children[index]
        } else if has_right {
            let merged = node.children[index];
            self.merge_children(parent, index);
            merged
        } else {
            let merged = node.children[index - 1];
            self.merge_children(parent, index - 1);
            merged
        }
    }

    /// Rotate the first entry of the right sibling through the parent into
    /// child `index`.
    pub(crate) fn borrow_from_right(&mut self, parent: NodeId, index: usize) {
        let node = self.node(parent);
        let child = node.children[index];
        let sibling = node.children[index + 1];

        let (key, value, moved_child) = self.node_mut(sibling).take_first();
        let (separator_key, separator_value) =
            self.node_mut(parent).replace_entry(index, key, value);
        self.node_mut(child)
            .push_back(separator_key, separator_value, moved_child);

        trace!(target: "btree::borrow", parent, child, sibling, side = "right", "rotated entry");
    }

    /// Rotate the last entry of the left sibling through the parent into
    /// child `index`.
    pub(crate) fn borrow_from_left(&mut self, parent: NodeId, index: usize) {
        let node = self.node(parent);
        let child = node.children[index];
        let sibling = node.children[index - 1];

        let (key, value, moved_child) = self.node_mut(sibling).take_last();
        let (separator_key, separator_value) =
            self.node_mut(parent).replace_entry(index - 1, key, value);
        self.node_mut(child)
            .push_front(separator_key, separator_value, moved_child);

        trace!(target: "btree::borrow", parent, child, sibling, side = "left", "rotated entry");
    }

    /// Merge child `index + 1` of `parent` and their separator into child
    /// `index`, freeing the right node.
    ///
    /// If `parent` is the root and is left without entries, the merged node
    /// replaces it as root.
    pub(crate) fn merge_children(&mut self, parent: NodeId, index: usize) {
        let parent_node = self.node_mut(parent);
        let left = parent_node.children[index];
        let right = parent_node.children.remove(index + 1);
        let (separator_key, separator_value) = parent_node.remove_entry(index);

        let right_node = self.arena.remove(right);
        self.node_mut(left)
            .absorb(separator_key, separator_value, right_node);

        trace!(target: "btree::merge", parent, left, right, "merged siblings");

        if parent == self.root && self.node(parent).is_empty() {
            self.arena.remove(parent);
            self.root = left;
            trace!(target: "btree::collapse", old_root = parent, new_root = left, "root shrank by one level");
        }
    }

    /// Replace an internal root that has run out of entries with its only
    /// child. An empty leaf root is left alone.
    pub(crate) fn collapse_root(&mut self) {
        let root = self.node(self.root);
        if root.is_empty() && !root.is_leaf() {
            let old_root = self.root;
            let new_root = root.children[0];
            self.arena.remove(old_root);
            self.root = new_root;
            trace!(target: "btree::collapse", old_root, new_root, "root shrank by one level");
        }
    }
}
