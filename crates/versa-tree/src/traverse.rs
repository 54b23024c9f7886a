//! Ordered traversals.
//!
//! Traversals return structured entry sequences; rendering them is the
//! caller's business. Any subtree rooted at a dead node is skipped.

use versa_common::types::Key;

use crate::node::Color;
use crate::tree::RbTree;

/// Visit order for [`RbTree::traverse`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TraversalOrder {
    /// Self, left, right.
    PreOrder,
    /// Left, self, right; yields keys in ascending order.
    InOrder,
    /// Left, right, self.
    PostOrder,
}

/// One visited node: its key, its depth below the root, and its color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TraversalEntry {
    /// The node's key.
    pub key: Key,
    /// Distance from the root (the root is at depth 0).
    pub depth: u32,
    /// The node's color.
    pub color: Color,
}

impl RbTree {
    /// Visits every live node in the given order.
    pub fn traverse(&self, order: TraversalOrder) -> Vec<TraversalEntry> {
        let mut out = Vec::new();
        self.visit(self.root_id(), 0, order, &mut out);
        out
    }

    fn visit(
        &self,
        id: crate::node::NodeId,
        depth: u32,
        order: TraversalOrder,
        out: &mut Vec<TraversalEntry>,
    ) {
        if !self.is_live(id) {
            return;
        }
        let entry = TraversalEntry {
            key: self.arena().key(id),
            depth,
            color: self.arena().color(id),
        };
        let left = self.arena().left(id);
        let right = self.arena().right(id);
        match order {
            TraversalOrder::PreOrder => {
                out.push(entry);
                self.visit(left, depth + 1, order, out);
                self.visit(right, depth + 1, order, out);
            }
            TraversalOrder::InOrder => {
                self.visit(left, depth + 1, order, out);
                out.push(entry);
                self.visit(right, depth + 1, order, out);
            }
            TraversalOrder::PostOrder => {
                self.visit(left, depth + 1, order, out);
                self.visit(right, depth + 1, order, out);
                out.push(entry);
            }
        }
    }
}
