//! In-memory ordered key-value index built on a classic B-tree.
//!
//! [`BTree`] stores entries in nodes of a fixed minimum degree `t`. Insert
//! splits full nodes on the way down, and delete rebalances thin nodes on
//! the way down (rotating through the parent or merging siblings), so both
//! run in a single top-down pass and the tree stays perfectly balanced.
//!
//! ```
//! use btree_index::BTree;
//!
//! let mut tree = BTree::new(2).unwrap();
//! for (key, value) in [(10, "a"), (20, "b"), (5, "c")] {
//!     tree.insert(key, value);
//! }
//!
//! let hit = tree.search(&20).unwrap();
//! assert_eq!(hit.value, &"b");
//!
//! tree.delete(&20);
//! assert!(tree.search(&20).is_none());
//! assert!(tree.validate().is_ok());
//! ```
//!
//! Nodes live in an arena owned by the tree and link to their children by
//! [`NodeId`]. Structural changes emit `tracing` events at trace level under
//! the `btree::*` targets.

mod compact_arena;
mod construction;
mod delete_operations;
mod error;
mod get_operations;
mod insert_operations;
mod node;
mod tree_structure;
mod types;
mod validation;

pub use compact_arena::{CompactArena, CompactArenaStats};
pub use construction::validation::{recommended_degree, validate_degree};
pub use construction::DEFAULT_DEGREE;
pub use error::{BTreeError, BTreeResult, BTreeResultExt, InitResult, KeyResult, ModifyResult};
pub use types::{BTree, Node, NodeId, SearchHit, MAX_DEGREE, MIN_DEGREE, NULL_NODE};
