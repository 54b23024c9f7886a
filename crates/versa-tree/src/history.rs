//! The version chain: a current tree plus frozen snapshots of every
//! earlier version.
//!
//! Before every mutation the current tree is cloned in full and pushed
//! onto the snapshot chain, newest first. Snapshots are immutable from
//! then on; nothing ever reclaims them, so retained memory grows with
//! every mutation (see the crate docs).

use tracing::debug;
use versa_common::types::{Key, Version};

use crate::config::TreeConfig;
use crate::error::TreeResult;
use crate::traverse::{TraversalEntry, TraversalOrder};
use crate::tree::{NodeRef, RbTree};

/// A versioned red-black ordered map.
///
/// Mutations always act on the current (latest) version and advance the
/// version counter by exactly one. That includes a delete of an absent
/// key, which reports `KeyNotFound` but still freezes a snapshot and
/// advances the counter. Queries can name any past version.
#[derive(Debug, Clone)]
pub struct VersaTree {
    current: RbTree,
    /// Frozen versions, newest first.
    snapshots: Vec<RbTree>,
}

impl VersaTree {
    /// Creates an empty map at version zero with the default configuration.
    pub fn new() -> Self {
        Self::with_config(TreeConfig::default())
    }

    /// Creates an empty map at version zero with the given configuration.
    pub fn with_config(config: TreeConfig) -> Self {
        Self {
            current: RbTree::new(config),
            snapshots: Vec::new(),
        }
    }

    /// The current version number.
    pub fn version(&self) -> Version {
        self.current.version()
    }

    /// Number of retained versions, the current one included.
    pub fn retained_versions(&self) -> usize {
        self.snapshots.len() + 1
    }

    /// Freezes the current tree as the previous version and advances the
    /// version counter.
    fn freeze(&mut self) {
        let snapshot = self.current.clone();
        self.snapshots.insert(0, snapshot);
        self.current.bump_version();
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Inserts `key` into a new version.
    ///
    /// An out-of-domain key is tolerated rather than rejected: the version
    /// still advances and the node is linked in, but every read treats it
    /// as absent.
    pub fn insert(&mut self, key: Key) {
        self.freeze();
        debug!(%key, version = %self.version(), "insert");
        self.current.insert(key);
    }

    /// Deletes `key` in a new version.
    ///
    /// Reports [`crate::TreeError::KeyNotFound`] if the key is absent; the
    /// version has still advanced by then, leaving a new version whose
    /// contents equal the previous one.
    pub fn delete(&mut self, key: Key) -> TreeResult<()> {
        self.freeze();
        debug!(%key, version = %self.version(), "delete");
        self.current.remove(key)
    }

    // =========================================================================
    // Version resolution and queries
    // =========================================================================

    /// Resolves a version number to a tree.
    ///
    /// The current version or anything newer resolves to the current tree.
    /// Older versions walk the snapshot chain; a version predating all
    /// retained snapshots resolves to the oldest one available, an
    /// approximation rather than an exact-match guarantee.
    pub fn resolve(&self, version: Version) -> &RbTree {
        if version >= self.current.version() {
            return &self.current;
        }
        let steps = self.current.version().steps_back_to(version) as usize;
        let index = (steps - 1).min(self.snapshots.len().saturating_sub(1));
        match self.snapshots.get(index) {
            Some(tree) => tree,
            None => &self.current,
        }
    }

    /// Looks up `key` in the current version.
    pub fn search(&self, key: Key) -> Option<NodeRef<'_>> {
        self.current.search(key)
    }

    /// Looks up `key` in the named version.
    pub fn search_at(&self, key: Key, version: Version) -> Option<NodeRef<'_>> {
        self.resolve(version).search(key)
    }

    /// The smallest key strictly greater than `key` in the named version,
    /// or `None` if no key is greater.
    pub fn successor(&self, key: Key, version: Version) -> Option<Key> {
        self.resolve(version).successor(key)
    }

    /// The largest key strictly smaller than `key` in the current version.
    /// No historical form is exposed.
    pub fn predecessor(&self, key: Key) -> Option<Key> {
        self.current.predecessor(key)
    }

    /// The smallest key in the current version.
    pub fn minimum(&self) -> Option<Key> {
        self.current.minimum()
    }

    /// The largest key in the current version.
    pub fn maximum(&self) -> Option<Key> {
        self.current.maximum()
    }

    /// Visits the current version in the given order.
    pub fn traverse(&self, order: TraversalOrder) -> Vec<TraversalEntry> {
        self.current.traverse(order)
    }

    /// Visits the named version in the given order.
    pub fn traverse_at(&self, order: TraversalOrder, version: Version) -> Vec<TraversalEntry> {
        self.resolve(version).traverse(order)
    }

    /// Number of live keys in the current version (O(n)).
    pub fn len(&self) -> usize {
        self.current.len()
    }

    /// Returns true if the current version is empty.
    pub fn is_empty(&self) -> bool {
        self.current.is_empty()
    }

    /// Checks invariants of the current version (for debugging/testing).
    pub fn validate(&self) -> TreeResult<()> {
        self.current.validate()
    }
}

impl Default for VersaTree {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn in_order_keys(tree: &RbTree) -> Vec<i64> {
        tree.traverse(TraversalOrder::InOrder)
            .iter()
            .map(|e| e.key.as_i64())
            .collect()
    }

    #[test]
    fn test_version_advances_per_mutation() {
        let mut map = VersaTree::new();
        assert_eq!(map.version(), Version::ZERO);
        map.insert(Key::new(10));
        assert_eq!(map.version(), Version::new(1));
        map.insert(Key::new(20));
        assert_eq!(map.version(), Version::new(2));
        let _ = map.delete(Key::new(10));
        assert_eq!(map.version(), Version::new(3));
    }

    #[test]
    fn test_version_advances_on_failed_delete() {
        let mut map = VersaTree::new();
        map.insert(Key::new(10));
        assert!(map.delete(Key::new(999)).is_err());
        // The counter advanced even though nothing changed structurally.
        assert_eq!(map.version(), Version::new(2));
        assert_eq!(in_order_keys(map.resolve(Version::new(2))), vec![10]);
    }

    #[test]
    fn test_past_versions_stay_queryable() {
        let mut map = VersaTree::new();
        for k in [10, 20, 5, 15] {
            map.insert(Key::new(k));
        }

        assert_eq!(in_order_keys(map.resolve(Version::ZERO)), Vec::<i64>::new());
        assert_eq!(in_order_keys(map.resolve(Version::new(1))), vec![10]);
        assert_eq!(in_order_keys(map.resolve(Version::new(2))), vec![10, 20]);
        assert_eq!(in_order_keys(map.resolve(Version::new(3))), vec![5, 10, 20]);
        assert_eq!(
            in_order_keys(map.resolve(Version::new(4))),
            vec![5, 10, 15, 20]
        );
    }

    #[test]
    fn test_resolve_future_version_is_current() {
        let mut map = VersaTree::new();
        map.insert(Key::new(10));
        assert_eq!(in_order_keys(map.resolve(Version::new(99))), vec![10]);
    }

    #[test]
    fn test_delete_preserves_old_version() {
        let mut map = VersaTree::new();
        map.insert(Key::new(10));
        map.insert(Key::new(20));
        map.delete(Key::new(10)).unwrap();

        assert!(map.search(Key::new(10)).is_none());
        assert!(map.search_at(Key::new(10), Version::new(2)).is_some());
    }

    #[test]
    fn test_successor_against_history() {
        let mut map = VersaTree::new();
        for k in [10, 20, 5, 15] {
            map.insert(Key::new(k));
        }
        assert_eq!(
            map.successor(Key::new(10), Version::new(4)),
            Some(Key::new(15))
        );
        // At version 2 only {10, 20} existed.
        assert_eq!(
            map.successor(Key::new(10), Version::new(2)),
            Some(Key::new(20))
        );
        assert_eq!(map.successor(Key::new(20), Version::new(4)), None);
    }

    #[test]
    fn test_predecessor_current_only() {
        let mut map = VersaTree::new();
        for k in [10, 20, 5, 15] {
            map.insert(Key::new(k));
        }
        assert_eq!(map.predecessor(Key::new(15)), Some(Key::new(10)));
        assert_eq!(map.predecessor(Key::new(5)), None);
    }

    #[test]
    fn test_retained_versions() {
        let mut map = VersaTree::new();
        assert_eq!(map.retained_versions(), 1);
        map.insert(Key::new(1));
        map.insert(Key::new(2));
        assert_eq!(map.retained_versions(), 3);
    }

    #[test]
    fn test_snapshots_are_independent() {
        let mut map = VersaTree::new();
        map.insert(Key::new(10));
        let before: Vec<i64> = in_order_keys(map.resolve(Version::new(1)));
        for k in [20, 5, 15] {
            map.insert(Key::new(k));
        }
        map.delete(Key::new(10)).unwrap();
        // The old snapshot never observed any of the later mutations.
        assert_eq!(in_order_keys(map.resolve(Version::new(1))), before);
    }
}
