//! The single-version red-black tree.
//!
//! `RbTree` holds one version's worth of nodes in an arena and implements
//! the balanced-tree algorithms: BST descent, left/right rotations, and
//! the insertion and deletion fixups that restore the red-black
//! invariants after a structural change.
//!
//! Domain validity threads through every read path: a node whose key
//! falls outside the configured open interval is treated as a dead end,
//! never traversed into. This guards reads against nodes created by
//! degenerate out-of-domain inserts.

use versa_common::types::{Key, Version};

use crate::config::TreeConfig;
use crate::error::{TreeError, TreeResult};
use crate::node::{Color, NodeArena, NodeId};

/// A borrowed handle to a node in a specific tree version.
#[derive(Debug, Clone, Copy)]
pub struct NodeRef<'a> {
    arena: &'a NodeArena,
    id: NodeId,
}

impl NodeRef<'_> {
    /// The node's key.
    pub fn key(&self) -> Key {
        self.arena.key(self.id)
    }

    /// The node's color.
    pub fn color(&self) -> Color {
        self.arena.color(self.id)
    }

    /// The node's arena id.
    pub fn id(&self) -> NodeId {
        self.id
    }
}

/// One version of the red-black tree.
///
/// Mutations take `&mut self`; reads take `&self`. The version chain in
/// [`crate::history::VersaTree`] clones whole `RbTree` values to freeze
/// snapshots, which is why everything here is `Clone`.
#[derive(Debug, Clone)]
pub struct RbTree {
    config: TreeConfig,
    arena: NodeArena,
    root: NodeId,
    version: Version,
}

impl RbTree {
    /// Creates an empty tree at version zero.
    pub fn new(config: TreeConfig) -> Self {
        Self {
            config,
            arena: NodeArena::new(),
            root: NodeId::NIL,
            version: Version::ZERO,
        }
    }

    /// This tree's version number.
    pub fn version(&self) -> Version {
        self.version
    }

    /// The configuration this tree was built with.
    pub fn config(&self) -> &TreeConfig {
        &self.config
    }

    /// Returns true if the tree holds no live node.
    pub fn is_empty(&self) -> bool {
        !self.is_live(self.root)
    }

    /// Number of live keys, counted by in-order traversal (O(n)).
    pub fn len(&self) -> usize {
        self.traverse(crate::traverse::TraversalOrder::InOrder).len()
    }

    pub(crate) fn bump_version(&mut self) {
        self.version = self.version.next();
    }

    pub(crate) fn arena(&self) -> &NodeArena {
        &self.arena
    }

    pub(crate) fn root_id(&self) -> NodeId {
        self.root
    }

    /// A node is live if it is not the sentinel and its key lies in the
    /// valid domain.
    pub(crate) fn is_live(&self, id: NodeId) -> bool {
        !id.is_nil() && self.config.contains(self.arena.key(id))
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Looks up `key`, returning a handle if present.
    ///
    /// Domain-invalid nodes terminate the descent as if the key were
    /// absent.
    pub fn search(&self, key: Key) -> Option<NodeRef<'_>> {
        let id = self.find(key);
        if id.is_nil() {
            None
        } else {
            Some(NodeRef {
                arena: &self.arena,
                id,
            })
        }
    }

    /// Returns true if `key` is present.
    pub fn contains(&self, key: Key) -> bool {
        !self.find(key).is_nil()
    }

    fn find(&self, key: Key) -> NodeId {
        let mut cur = self.root;
        loop {
            if !self.is_live(cur) {
                return NodeId::NIL;
            }
            let k = self.arena.key(cur);
            if key == k {
                return cur;
            }
            cur = if key < k {
                self.arena.left(cur)
            } else {
                self.arena.right(cur)
            };
        }
    }

    /// The smallest live key, if any.
    pub fn minimum(&self) -> Option<Key> {
        let id = self.min_from(self.root);
        if self.is_live(id) {
            Some(self.arena.key(id))
        } else {
            None
        }
    }

    /// The largest key, if the tree is non-empty.
    pub fn maximum(&self) -> Option<Key> {
        if !self.is_live(self.root) {
            return None;
        }
        Some(self.arena.key(self.max_from(self.root)))
    }

    /// Leftmost descent, refusing to step into a dead node: the last live
    /// node on the left spine is the floor.
    fn min_from(&self, start: NodeId) -> NodeId {
        if !self.is_live(start) {
            return start;
        }
        let mut id = start;
        loop {
            let left = self.arena.left(id);
            if left.is_nil() || !self.is_live(left) {
                return id;
            }
            id = left;
        }
    }

    fn max_from(&self, start: NodeId) -> NodeId {
        let mut id = start;
        while !self.arena.right(id).is_nil() {
            id = self.arena.right(id);
        }
        id
    }

    /// The smallest key strictly greater than `key` in this version.
    ///
    /// If `key` is present, this is the classic right-subtree-minimum /
    /// ancestor walk. If it is absent, an ordered descent still reports
    /// the smallest key above the probe, so successor queries stay
    /// meaningful for keys that were never inserted. Returns `None` when
    /// no key is greater.
    pub fn successor(&self, key: Key) -> Option<Key> {
        let x = self.find(key);
        if x.is_nil() {
            return self.smallest_above(key);
        }

        let right = self.arena.right(x);
        if !right.is_nil() {
            let m = self.min_from(right);
            return if m.is_nil() {
                None
            } else {
                Some(self.arena.key(m))
            };
        }

        // Walk up while we are a right child; the first ancestor we hang
        // off to the left of is the successor.
        let mut x = x;
        let mut y = self.arena.parent(x);
        while !y.is_nil() && x == self.arena.right(y) {
            x = y;
            y = self.arena.parent(y);
        }
        if y.is_nil() {
            None
        } else {
            Some(self.arena.key(y))
        }
    }

    fn smallest_above(&self, key: Key) -> Option<Key> {
        let mut best = None;
        let mut cur = self.root;
        while self.is_live(cur) {
            let k = self.arena.key(cur);
            if k > key {
                best = Some(k);
                cur = self.arena.left(cur);
            } else {
                cur = self.arena.right(cur);
            }
        }
        best
    }

    /// The largest key strictly smaller than `key`, or `None` if `key` is
    /// absent or has no predecessor.
    pub fn predecessor(&self, key: Key) -> Option<Key> {
        let x = self.find(key);
        if x.is_nil() {
            return None;
        }

        let left = self.arena.left(x);
        if !left.is_nil() {
            return Some(self.arena.key(self.max_from(left)));
        }

        let mut x = x;
        let mut y = self.arena.parent(x);
        while !y.is_nil() && x == self.arena.left(y) {
            x = y;
            y = self.arena.parent(y);
        }
        if y.is_nil() {
            None
        } else {
            Some(self.arena.key(y))
        }
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Inserts `key`. Duplicates descend right, so repeated inserts of the
    /// same key stack up in the right subtree.
    ///
    /// An out-of-domain key is a degenerate insert: the node is linked in,
    /// but every later read treats it as a dead end.
    pub(crate) fn insert(&mut self, key: Key) {
        let node = self.arena.alloc(key, Color::Red);

        // BST descent; a dead node ends the descent and its subtree link
        // is overwritten by the new node.
        let mut y = NodeId::NIL;
        let mut x = self.root;
        while !x.is_nil() && self.is_live(x) {
            y = x;
            x = if key < self.arena.key(x) {
                self.arena.left(x)
            } else {
                self.arena.right(x)
            };
        }

        self.arena.set_parent(node, y);
        if y.is_nil() {
            self.root = node;
        } else if key < self.arena.key(y) {
            self.arena.set_left(y, node);
        } else {
            self.arena.set_right(y, node);
        }

        // New root: recolor black, done.
        if self.arena.parent(node).is_nil() {
            self.arena.set_color(node, Color::Black);
            return;
        }

        // No grandparent: a red child of the black root cannot violate
        // the no-two-reds rule.
        if self.arena.parent(self.arena.parent(node)).is_nil() {
            return;
        }

        self.insert_fixup(node);
    }

    fn insert_fixup(&mut self, mut k: NodeId) {
        while self.arena.color(self.arena.parent(k)) == Color::Red {
            let parent = self.arena.parent(k);
            let grandparent = self.arena.parent(parent);

            if parent == self.arena.right(grandparent) {
                let uncle = self.arena.left(grandparent);
                if self.arena.color(uncle) == Color::Red {
                    self.arena.set_color(uncle, Color::Black);
                    self.arena.set_color(parent, Color::Black);
                    self.arena.set_color(grandparent, Color::Red);
                    k = grandparent;
                } else {
                    if k == self.arena.left(parent) {
                        k = parent;
                        self.rotate_right(k);
                    }
                    let parent = self.arena.parent(k);
                    let grandparent = self.arena.parent(parent);
                    self.arena.set_color(parent, Color::Black);
                    self.arena.set_color(grandparent, Color::Red);
                    self.rotate_left(grandparent);
                }
            } else {
                let uncle = self.arena.right(grandparent);
                if self.arena.color(uncle) == Color::Red {
                    self.arena.set_color(uncle, Color::Black);
                    self.arena.set_color(parent, Color::Black);
                    self.arena.set_color(grandparent, Color::Red);
                    k = grandparent;
                } else {
                    if k == self.arena.right(parent) {
                        k = parent;
                        self.rotate_left(k);
                    }
                    let parent = self.arena.parent(k);
                    let grandparent = self.arena.parent(parent);
                    self.arena.set_color(parent, Color::Black);
                    self.arena.set_color(grandparent, Color::Red);
                    self.rotate_right(grandparent);
                }
            }

            if k == self.root {
                break;
            }
        }
        self.arena.set_color(self.root, Color::Black);
    }

    /// Removes one occurrence of `key`.
    ///
    /// The locating descent treats equal keys as "go right", so with
    /// duplicates the rightmost occurrence is the one removed.
    pub(crate) fn remove(&mut self, key: Key) -> TreeResult<()> {
        let mut z = NodeId::NIL;
        let mut node = self.root;
        while !node.is_nil() {
            let k = self.arena.key(node);
            if k == key {
                z = node;
            }
            node = if k <= key {
                self.arena.right(node)
            } else {
                self.arena.left(node)
            };
        }

        if z.is_nil() {
            return Err(TreeError::KeyNotFound { key });
        }

        // Three-case splice. `x` is the node that takes the removed/moved
        // node's structural place; `x_parent` tracks its parent explicitly
        // so the fixup never has to read links through the sentinel.
        let mut y = z;
        let mut y_color = self.arena.color(y);
        let x;
        let x_parent;

        if self.arena.left(z).is_nil() {
            x = self.arena.right(z);
            x_parent = self.arena.parent(z);
            self.transplant(z, x);
        } else if self.arena.right(z).is_nil() {
            x = self.arena.left(z);
            x_parent = self.arena.parent(z);
            self.transplant(z, x);
        } else {
            y = self.min_from(self.arena.right(z));
            y_color = self.arena.color(y);
            x = self.arena.right(y);
            if self.arena.parent(y) == z {
                x_parent = y;
            } else {
                x_parent = self.arena.parent(y);
                self.transplant(y, x);
                let zr = self.arena.right(z);
                self.arena.set_right(y, zr);
                self.arena.set_parent(zr, y);
            }
            self.transplant(z, y);
            let zl = self.arena.left(z);
            self.arena.set_left(y, zl);
            self.arena.set_parent(zl, y);
            self.arena.set_color(y, self.arena.color(z));
        }

        // Removing a black node breaks black-height balance.
        if y_color == Color::Black {
            self.remove_fixup(x, x_parent);
        }
        Ok(())
    }

    /// Replaces the subtree rooted at `u` with the subtree rooted at `v`.
    fn transplant(&mut self, u: NodeId, v: NodeId) {
        let up = self.arena.parent(u);
        if up.is_nil() {
            self.root = v;
        } else if u == self.arena.left(up) {
            self.arena.set_left(up, v);
        } else {
            self.arena.set_right(up, v);
        }
        if !v.is_nil() {
            self.arena.set_parent(v, up);
        }
    }

    fn remove_fixup(&mut self, mut x: NodeId, mut parent: NodeId) {
        while x != self.root && self.arena.color(x) == Color::Black {
            if x == self.arena.left(parent) {
                let mut s = self.arena.right(parent);
                if self.arena.color(s) == Color::Red {
                    // Case 1: red sibling. Rotate toward x to expose a
                    // black sibling.
                    self.arena.set_color(s, Color::Black);
                    self.arena.set_color(parent, Color::Red);
                    self.rotate_left(parent);
                    s = self.arena.right(parent);
                }

                if self.arena.color(self.arena.left(s)) == Color::Black
                    && self.arena.color(self.arena.right(s)) == Color::Black
                {
                    // Case 2: both nephews black. Push the deficiency up.
                    self.arena.set_color(s, Color::Red);
                    x = parent;
                    parent = self.arena.parent(x);
                } else {
                    if self.arena.color(self.arena.right(s)) == Color::Black {
                        // Case 3: near nephew red. Rotate it to the far side.
                        self.arena.set_color(self.arena.left(s), Color::Black);
                        self.arena.set_color(s, Color::Red);
                        self.rotate_right(s);
                        s = self.arena.right(parent);
                    }
                    // Case 4: far nephew red. Terminates the loop.
                    self.arena.set_color(s, self.arena.color(parent));
                    self.arena.set_color(parent, Color::Black);
                    self.arena.set_color(self.arena.right(s), Color::Black);
                    self.rotate_left(parent);
                    x = self.root;
                    parent = NodeId::NIL;
                }
            } else {
                let mut s = self.arena.left(parent);
                if self.arena.color(s) == Color::Red {
                    self.arena.set_color(s, Color::Black);
                    self.arena.set_color(parent, Color::Red);
                    self.rotate_right(parent);
                    s = self.arena.left(parent);
                }

                if self.arena.color(self.arena.left(s)) == Color::Black
                    && self.arena.color(self.arena.right(s)) == Color::Black
                {
                    self.arena.set_color(s, Color::Red);
                    x = parent;
                    parent = self.arena.parent(x);
                } else {
                    if self.arena.color(self.arena.left(s)) == Color::Black {
                        self.arena.set_color(self.arena.right(s), Color::Black);
                        self.arena.set_color(s, Color::Red);
                        self.rotate_left(s);
                        s = self.arena.left(parent);
                    }
                    self.arena.set_color(s, self.arena.color(parent));
                    self.arena.set_color(parent, Color::Black);
                    self.arena.set_color(self.arena.left(s), Color::Black);
                    self.rotate_right(parent);
                    x = self.root;
                    parent = NodeId::NIL;
                }
            }
        }
        if !x.is_nil() {
            self.arena.set_color(x, Color::Black);
        }
    }

    fn rotate_left(&mut self, x: NodeId) {
        let y = self.arena.right(x);
        let yl = self.arena.left(y);

        self.arena.set_right(x, yl);
        if !yl.is_nil() {
            self.arena.set_parent(yl, x);
        }

        let xp = self.arena.parent(x);
        self.arena.set_parent(y, xp);
        if xp.is_nil() {
            self.root = y;
        } else if x == self.arena.left(xp) {
            self.arena.set_left(xp, y);
        } else {
            self.arena.set_right(xp, y);
        }

        self.arena.set_left(y, x);
        self.arena.set_parent(x, y);
    }

    fn rotate_right(&mut self, x: NodeId) {
        let y = self.arena.left(x);
        let yr = self.arena.right(y);

        self.arena.set_left(x, yr);
        if !yr.is_nil() {
            self.arena.set_parent(yr, x);
        }

        let xp = self.arena.parent(x);
        self.arena.set_parent(y, xp);
        if xp.is_nil() {
            self.root = y;
        } else if x == self.arena.right(xp) {
            self.arena.set_right(xp, y);
        } else {
            self.arena.set_left(xp, y);
        }

        self.arena.set_right(y, x);
        self.arena.set_parent(x, y);
    }

    // =========================================================================
    // Validation (for debugging and tests)
    // =========================================================================

    /// Checks the red-black and ordering invariants, returning a
    /// [`TreeError::Structure`] describing the first violation found.
    pub fn validate(&self) -> TreeResult<()> {
        if self.arena.color(NodeId::NIL) != Color::Black {
            return Err(TreeError::Structure("sentinel is not black".into()));
        }
        if self.is_live(self.root) && self.arena.color(self.root) == Color::Red {
            return Err(TreeError::Structure("root is red".into()));
        }
        self.black_height(self.root)?;

        let keys: Vec<Key> = self
            .traverse(crate::traverse::TraversalOrder::InOrder)
            .iter()
            .map(|e| e.key)
            .collect();
        if keys.windows(2).any(|w| w[0] > w[1]) {
            return Err(TreeError::Structure(
                "in-order traversal is not sorted".into(),
            ));
        }
        Ok(())
    }

    fn black_height(&self, id: NodeId) -> TreeResult<u32> {
        if !self.is_live(id) {
            return Ok(1);
        }
        if self.arena.color(id) == Color::Red {
            let left = self.arena.left(id);
            let right = self.arena.right(id);
            if self.arena.color(left) == Color::Red || self.arena.color(right) == Color::Red {
                return Err(TreeError::Structure(format!(
                    "red node {} has a red child",
                    self.arena.key(id)
                )));
            }
        }
        let lh = self.black_height(self.arena.left(id))?;
        let rh = self.black_height(self.arena.right(id))?;
        if lh != rh {
            return Err(TreeError::Structure(format!(
                "black-height mismatch at key {}: {} vs {}",
                self.arena.key(id),
                lh,
                rh
            )));
        }
        let own = if self.arena.color(id) == Color::Black {
            1
        } else {
            0
        };
        Ok(lh + own)
    }
}

impl Default for RbTree {
    fn default() -> Self {
        Self::new(TreeConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traverse::TraversalOrder;

    fn tree_with(keys: &[i64]) -> RbTree {
        let mut tree = RbTree::default();
        for &k in keys {
            tree.insert(Key::new(k));
        }
        tree
    }

    fn in_order_keys(tree: &RbTree) -> Vec<i64> {
        tree.traverse(TraversalOrder::InOrder)
            .iter()
            .map(|e| e.key.as_i64())
            .collect()
    }

    #[test]
    fn test_empty() {
        let tree = RbTree::default();
        assert!(tree.is_empty());
        assert_eq!(tree.len(), 0);
        assert!(tree.minimum().is_none());
        assert!(tree.maximum().is_none());
        tree.validate().unwrap();
    }

    #[test]
    fn test_insert_and_search() {
        let tree = tree_with(&[10, 20, 5, 15]);
        assert_eq!(tree.len(), 4);
        for k in [5, 10, 15, 20] {
            let found = tree.search(Key::new(k)).unwrap();
            assert_eq!(found.key().as_i64(), k);
        }
        assert!(tree.search(Key::new(7)).is_none());
        tree.validate().unwrap();
    }

    #[test]
    fn test_in_order_sorted_after_each_insert() {
        let mut tree = RbTree::default();
        let keys = [41, 38, 31, 12, 19, 8, 45, 30, 7, 22];
        for (i, &k) in keys.iter().enumerate() {
            tree.insert(Key::new(k));
            tree.validate().unwrap();
            let mut expected: Vec<i64> = keys[..=i].to_vec();
            expected.sort_unstable();
            assert_eq!(in_order_keys(&tree), expected);
        }
    }

    #[test]
    fn test_remove_each_shape() {
        // Leaf, one-child, and two-children removals.
        for victim in [5, 15, 10, 20, 25] {
            let mut tree = tree_with(&[10, 20, 5, 15, 25]);
            tree.remove(Key::new(victim)).unwrap();
            tree.validate().unwrap();
            assert!(!tree.contains(Key::new(victim)));
            assert_eq!(tree.len(), 4);
        }
    }

    #[test]
    fn test_remove_absent() {
        let mut tree = tree_with(&[10, 20]);
        let err = tree.remove(Key::new(999)).unwrap_err();
        assert!(matches!(err, TreeError::KeyNotFound { key } if key.as_i64() == 999));
        assert_eq!(in_order_keys(&tree), vec![10, 20]);
    }

    #[test]
    fn test_remove_until_empty() {
        let mut tree = tree_with(&[8, 4, 12, 2, 6, 10, 14]);
        for k in [8, 2, 14, 6, 10, 4, 12] {
            tree.remove(Key::new(k)).unwrap();
            tree.validate().unwrap();
        }
        assert!(tree.is_empty());
    }

    #[test]
    fn test_duplicates_go_right_and_remove_rightmost() {
        let mut tree = tree_with(&[10, 10, 10, 5]);
        assert_eq!(in_order_keys(&tree), vec![5, 10, 10, 10]);
        tree.remove(Key::new(10)).unwrap();
        tree.validate().unwrap();
        assert_eq!(in_order_keys(&tree), vec![5, 10, 10]);
    }

    #[test]
    fn test_min_max() {
        let tree = tree_with(&[10, 20, 5, 15]);
        assert_eq!(tree.minimum(), Some(Key::new(5)));
        assert_eq!(tree.maximum(), Some(Key::new(20)));
    }

    #[test]
    fn test_successor_present() {
        let tree = tree_with(&[10, 20, 5, 15]);
        assert_eq!(tree.successor(Key::new(10)), Some(Key::new(15)));
        assert_eq!(tree.successor(Key::new(5)), Some(Key::new(10)));
        assert_eq!(tree.successor(Key::new(20)), None);
    }

    #[test]
    fn test_successor_absent_falls_back() {
        let tree = tree_with(&[10, 20, 5, 15]);
        // 12 was never inserted; the smallest key above it is 15.
        assert_eq!(tree.successor(Key::new(12)), Some(Key::new(15)));
        assert_eq!(tree.successor(Key::new(21)), None);
        assert_eq!(tree.successor(Key::new(-3)), Some(Key::new(5)));
    }

    #[test]
    fn test_predecessor() {
        let tree = tree_with(&[10, 20, 5, 15]);
        assert_eq!(tree.predecessor(Key::new(15)), Some(Key::new(10)));
        assert_eq!(tree.predecessor(Key::new(5)), None);
        assert_eq!(tree.predecessor(Key::new(12)), None);
    }

    #[test]
    fn test_successor_predecessor_round_trip() {
        let tree = tree_with(&[10, 20, 5, 15, 25, 1]);
        for k in [1, 5, 10, 15, 20] {
            let s = tree.successor(Key::new(k)).unwrap();
            assert_eq!(tree.predecessor(s), Some(Key::new(k)));
        }
    }

    #[test]
    fn test_out_of_domain_key_is_dead_end() {
        let mut tree = RbTree::new(TreeConfig::for_testing());
        tree.insert(Key::new(10));
        tree.insert(Key::new(5_000)); // outside (0, 1000)
        tree.insert(Key::new(20));

        assert!(!tree.contains(Key::new(5_000)));
        assert_eq!(in_order_keys(&tree), vec![10, 20]);
        assert_eq!(tree.maximum(), Some(Key::new(20)));
    }

    #[test]
    fn test_validate_catches_red_root() {
        let mut tree = tree_with(&[10]);
        // Corrupt the tree deliberately.
        let root = tree.root_id();
        tree.arena.set_color(root, Color::Red);
        assert!(matches!(tree.validate(), Err(TreeError::Structure(_))));
    }
}
