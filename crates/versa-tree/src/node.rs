//! Node model: arena storage, colors, and the shared sentinel.
//!
//! Nodes live in an arena owned by their tree and are addressed by stable
//! `NodeId` indices rather than pointers. Slot 0 of every arena is the
//! shared sentinel ("nil") node: always black, key 0, with every link
//! pointing back at itself. All "absent child" and "absent parent" links
//! hold the sentinel id, so rebalancing code can read a node's color and
//! children unconditionally, without null checks.
//!
//! Because links are indices local to the owning arena, cloning the arena
//! yields a fully independent tree: a snapshot can never alias the live
//! version's nodes.

use std::fmt;

use versa_common::types::Key;

/// The color of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    /// A red node.
    Red,
    /// A black node.
    Black,
}

/// Index of a node within its owning arena.
///
/// Slot 0 is the sentinel, exposed as [`NodeId::NIL`].
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct NodeId(u32);

impl NodeId {
    /// The sentinel node id.
    pub const NIL: Self = Self(0);

    /// Creates a node id from a raw index.
    #[inline]
    #[must_use]
    pub(crate) const fn new(index: u32) -> Self {
        Self(index)
    }

    /// Returns the raw index.
    #[inline]
    #[must_use]
    pub const fn as_u32(self) -> u32 {
        self.0
    }

    /// Returns true if this is the sentinel id.
    #[inline]
    #[must_use]
    pub const fn is_nil(self) -> bool {
        self.0 == 0
    }

    #[inline]
    const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Debug for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_nil() {
            write!(f, "NodeId(NIL)")
        } else {
            write!(f, "NodeId({})", self.0)
        }
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One stored node: a key, a color, and three arena-local links.
#[derive(Debug, Clone)]
pub struct Node {
    /// The stored key.
    pub key: Key,
    /// The node's color.
    pub color: Color,
    /// Left child, or the sentinel.
    pub left: NodeId,
    /// Right child, or the sentinel.
    pub right: NodeId,
    /// Parent, or the sentinel for the root.
    pub parent: NodeId,
}

/// Arena of nodes with slot 0 reserved for the sentinel.
///
/// Allocation is append-only: nodes spliced out by deletion keep their
/// slot but become unreachable, and are reclaimed only when the owning
/// tree is dropped. Cloning the arena clones every slot, links included.
#[derive(Debug, Clone)]
pub struct NodeArena {
    nodes: Vec<Node>,
}

impl NodeArena {
    /// Creates an arena holding only the sentinel.
    pub fn new() -> Self {
        Self {
            nodes: vec![Node {
                key: Key::new(0),
                color: Color::Black,
                left: NodeId::NIL,
                right: NodeId::NIL,
                parent: NodeId::NIL,
            }],
        }
    }

    /// Allocates a new node with both children and parent set to the
    /// sentinel, returning its id.
    pub fn alloc(&mut self, key: Key, color: Color) -> NodeId {
        let id = NodeId::new(self.nodes.len() as u32);
        self.nodes.push(Node {
            key,
            color,
            left: NodeId::NIL,
            right: NodeId::NIL,
            parent: NodeId::NIL,
        });
        id
    }

    /// Number of nodes ever allocated, sentinel excluded. Includes slots
    /// that deletion has since made unreachable.
    pub fn allocated(&self) -> usize {
        self.nodes.len() - 1
    }

    /// Returns the node record for `id`.
    #[inline]
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }

    /// Returns the key of `id`.
    #[inline]
    pub fn key(&self, id: NodeId) -> Key {
        self.nodes[id.index()].key
    }

    /// Returns the color of `id`. The sentinel is always black.
    #[inline]
    pub fn color(&self, id: NodeId) -> Color {
        self.nodes[id.index()].color
    }

    /// Returns the left child of `id`.
    #[inline]
    pub fn left(&self, id: NodeId) -> NodeId {
        self.nodes[id.index()].left
    }

    /// Returns the right child of `id`.
    #[inline]
    pub fn right(&self, id: NodeId) -> NodeId {
        self.nodes[id.index()].right
    }

    /// Returns the parent of `id`.
    #[inline]
    pub fn parent(&self, id: NodeId) -> NodeId {
        self.nodes[id.index()].parent
    }

    /// Recolors `id`. The sentinel must stay black.
    #[inline]
    pub fn set_color(&mut self, id: NodeId, color: Color) {
        debug_assert!(!id.is_nil(), "sentinel color is immutable");
        self.nodes[id.index()].color = color;
    }

    /// Sets the left child of `id`.
    #[inline]
    pub fn set_left(&mut self, id: NodeId, child: NodeId) {
        debug_assert!(!id.is_nil(), "sentinel links are immutable");
        self.nodes[id.index()].left = child;
    }

    /// Sets the right child of `id`.
    #[inline]
    pub fn set_right(&mut self, id: NodeId, child: NodeId) {
        debug_assert!(!id.is_nil(), "sentinel links are immutable");
        self.nodes[id.index()].right = child;
    }

    /// Sets the parent of `id`.
    #[inline]
    pub fn set_parent(&mut self, id: NodeId, parent: NodeId) {
        debug_assert!(!id.is_nil(), "sentinel links are immutable");
        self.nodes[id.index()].parent = parent;
    }
}

impl Default for NodeArena {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sentinel() {
        let arena = NodeArena::new();
        assert_eq!(arena.allocated(), 0);
        assert_eq!(arena.color(NodeId::NIL), Color::Black);
        assert!(arena.left(NodeId::NIL).is_nil());
        assert!(arena.right(NodeId::NIL).is_nil());
        assert!(arena.parent(NodeId::NIL).is_nil());
    }

    #[test]
    fn test_alloc_links() {
        let mut arena = NodeArena::new();
        let a = arena.alloc(Key::new(10), Color::Red);
        let b = arena.alloc(Key::new(5), Color::Red);
        assert!(!a.is_nil());
        assert_ne!(a, b);

        arena.set_left(a, b);
        arena.set_parent(b, a);
        assert_eq!(arena.left(a), b);
        assert_eq!(arena.parent(b), a);
        assert!(arena.right(a).is_nil());
        assert_eq!(arena.allocated(), 2);
    }

    #[test]
    fn test_clone_is_independent() {
        let mut arena = NodeArena::new();
        let a = arena.alloc(Key::new(10), Color::Black);

        let mut copy = arena.clone();
        copy.set_color(a, Color::Red);
        let c = copy.alloc(Key::new(20), Color::Red);
        copy.set_right(a, c);

        // The original is untouched by mutations of the clone.
        assert_eq!(arena.color(a), Color::Black);
        assert!(arena.right(a).is_nil());
        assert_eq!(arena.allocated(), 1);
        assert_eq!(copy.allocated(), 2);
    }

    #[test]
    fn test_node_id_display() {
        assert_eq!(format!("{:?}", NodeId::NIL), "NodeId(NIL)");
        assert_eq!(format!("{:?}", NodeId::new(3)), "NodeId(3)");
    }
}
