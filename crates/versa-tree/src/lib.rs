//! VersaTree - a versioned red-black ordered map.
//!
//! Every structural mutation (insert, delete) produces a new numbered
//! version while keeping every earlier version queryable. Reads (search,
//! successor, ordered traversal) can be directed at any past snapshot.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────┐
//! │                     VersaTree                        │
//! │                                                      │
//! │   current (v3) ──▶ snapshot (v2) ──▶ snapshot (v1)   │
//! │   ┌─────────┐      ┌─────────┐       ┌─────────┐     │
//! │   │ RbTree  │      │ RbTree  │       │ RbTree  │ ... │
//! │   │  arena  │      │  arena  │       │  arena  │     │
//! │   └─────────┘      └─────────┘       └─────────┘     │
//! └──────────────────────────────────────────────────────┘
//! ```
//!
//! Each version is a fully independent `RbTree`: nodes live in an arena
//! addressed by stable `NodeId` indices, with slot 0 reserved for the
//! shared always-black sentinel. Before every mutation the current arena
//! is cloned in full and frozen as the previous version.
//!
//! ## Performance caveat
//!
//! History is kept by deep copy, not by structural sharing: every mutation
//! clones the entire current tree, so retained memory grows as
//! O(versions × size). This matches the reference semantics this engine
//! reproduces and is a known performance defect, not a feature. A
//! path-copying scheme (clone only the O(log n) nodes on the mutation
//! path, share the rest) would preserve every observable per-version query
//! result at a fraction of the cost.
//!
//! ## Usage
//!
//! ```rust
//! use versa_tree::{Key, TraversalOrder, Version, VersaTree};
//!
//! let mut map = VersaTree::new();
//! for key in [10, 20, 5, 15] {
//!     map.insert(Key::new(key));
//! }
//!
//! assert_eq!(map.version(), Version::new(4));
//!
//! // The latest version holds all four keys, in order.
//! let keys: Vec<i64> = map
//!     .traverse(TraversalOrder::InOrder)
//!     .iter()
//!     .map(|e| e.key.as_i64())
//!     .collect();
//! assert_eq!(keys, vec![5, 10, 15, 20]);
//!
//! // Version 2 is still queryable and holds exactly {10, 20}.
//! let old: Vec<i64> = map
//!     .traverse_at(TraversalOrder::InOrder, Version::new(2))
//!     .iter()
//!     .map(|e| e.key.as_i64())
//!     .collect();
//! assert_eq!(old, vec![10, 20]);
//!
//! assert_eq!(map.successor(Key::new(10), Version::new(4)), Some(Key::new(15)));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

mod config;
mod error;

/// Node model: arena storage, colors, and the shared sentinel.
pub mod node;

/// The single-version red-black tree.
pub mod tree;

/// Ordered traversals producing structured entry sequences.
pub mod traverse;

/// The version chain tying snapshots together.
pub mod history;

pub use config::TreeConfig;
pub use error::{TreeError, TreeResult};
pub use history::VersaTree;
pub use node::{Color, NodeId};
pub use traverse::{TraversalEntry, TraversalOrder};
pub use tree::{NodeRef, RbTree};

// Re-export the shared newtypes so callers rarely need versa-common directly.
pub use versa_common::types::{Key, Version};
