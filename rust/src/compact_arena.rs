//! Slot arena that owns every node of a `BTree`.
//!
//! Nodes refer to their children by `NodeId`. Freed slots go on a free list
//! and are handed out again by the next allocation, so a tree that grows and
//! shrinks repeatedly does not keep growing its backing storage.

use std::convert::TryFrom;
use std::ops::{Index, IndexMut};

use crate::types::{NodeId, NULL_NODE};

/// Occupancy snapshot of a `CompactArena`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompactArenaStats {
    pub total_slots: usize,
    pub allocated_count: usize,
    pub free_count: usize,
    /// Free slots as a fraction of all slots ever handed out.
    pub fragmentation: f64,
}

#[derive(Debug)]
pub struct CompactArena<T> {
    storage: Vec<T>,
    free_list: Vec<usize>,
    /// Parallel to `storage`; `false` marks a slot sitting on the free list.
    allocated_mask: Vec<bool>,
}

impl<T> CompactArena<T> {
    pub fn new() -> Self {
        Self {
            storage: Vec::new(),
            free_list: Vec::new(),
            allocated_mask: Vec::new(),
        }
    }

    /// Store `item` and return the id of its slot.
    #[inline]
    pub fn allocate(&mut self, item: T) -> NodeId {
        let index = if let Some(free_index) = self.free_list.pop() {
            self.storage[free_index] = item;
            self.allocated_mask[free_index] = true;
            free_index
        } else {
            let index = self.storage.len();
            self.storage.push(item);
            self.allocated_mask.push(true);
            index
        };

        // NULL_NODE is reserved, so ids stop one short of u32::MAX.
        let id = NodeId::try_from(index).expect("arena exhausted the NodeId space");
        assert_ne!(id, NULL_NODE, "arena exhausted the NodeId space");
        id
    }

    /// Free the slot behind `id` and hand back its contents.
    #[inline]
    pub fn deallocate(&mut self, id: NodeId) -> Option<T>
    where
        T: Default,
    {
        let index = self.slot(id)?;
        self.allocated_mask[index] = false;
        self.free_list.push(index);
        Some(std::mem::take(&mut self.storage[index]))
    }

    /// Like `deallocate`, for callers that hold `id` as a tree invariant.
    ///
    /// # Panics
    ///
    /// Panics if `id` is not allocated.
    pub fn remove(&mut self, id: NodeId) -> T
    where
        T: Default,
    {
        match self.deallocate(id) {
            Some(item) => item,
            None => panic!("node {} is not allocated", id),
        }
    }

    #[inline]
    pub fn get(&self, id: NodeId) -> Option<&T> {
        let index = self.slot(id)?;
        Some(&self.storage[index])
    }

    #[inline]
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut T> {
        let index = self.slot(id)?;
        Some(&mut self.storage[index])
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.slot(id).is_some()
    }

    pub fn stats(&self) -> CompactArenaStats {
        let allocated_count = self.len();
        let free_count = self.free_list.len();
        let total_slots = self.storage.len();
        let fragmentation = if total_slots > 0 {
            free_count as f64 / total_slots as f64
        } else {
            0.0
        };

        CompactArenaStats {
            total_slots,
            allocated_count,
            free_count,
            fragmentation,
        }
    }

    /// Number of live slots.
    pub fn len(&self) -> usize {
        self.storage.len() - self.free_list.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&mut self) {
        self.storage.clear();
        self.allocated_mask.clear();
        self.free_list.clear();
    }

    pub fn free_count(&self) -> usize {
        self.free_list.len()
    }

    fn slot(&self, id: NodeId) -> Option<usize> {
        if id == NULL_NODE {
            return None;
        }
        let index = usize::try_from(id).ok()?;
        if self.allocated_mask.get(index).copied().unwrap_or(false) {
            Some(index)
        } else {
            None
        }
    }
}

impl<T> Default for CompactArena<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Index<NodeId> for CompactArena<T> {
    type Output = T;

    fn index(&self, id: NodeId) -> &T {
        match self.get(id) {
            Some(item) => item,
            None => panic!("node {} is not allocated", id),
        }
    }
}

impl<T> IndexMut<NodeId> for CompactArena<T> {
    fn index_mut(&mut self, id: NodeId) -> &mut T {
        match self.get_mut(id) {
            Some(item) => item,
            None => panic!("node {} is not allocated", id),
        }
    }
}
