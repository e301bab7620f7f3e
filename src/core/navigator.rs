//! # Navigator
//!
//! Read-only traversal over a forest snapshot. Nothing here mutates.
//!
//! The outline renders in *flattened order*: a depth-first, pre-order walk
//! (root, its children recursively, next root, ...). Moving focus up or down
//! means stepping one row through that order, computed from the tree shape
//! without materializing the whole list:
//!
//! ```text
//! R1            up from R3  → lowest visible of R2 = C2
//! R2            down from C2 → no next sibling, climb to C1, R2,
//!   C1                        R2's next sibling is R3
//!     C2
//! R3
//! ```

use std::sync::Arc;

use crate::core::forest::{Forest, Node, NodeId};

/// Depth-first search across the roots in sibling order.
pub fn find_by_id<'a>(forest: &'a Forest, id: &NodeId) -> Option<&'a Node> {
    fn search<'a>(nodes: &'a [Arc<Node>], id: &NodeId) -> Option<&'a Node> {
        nodes.iter().find_map(|node| {
            if &node.id == id {
                Some(node.as_ref())
            } else {
                search(&node.children, id)
            }
        })
    }
    search(forest.roots(), id)
}

/// The node that renders last within `node`'s subtree: follow the last child
/// until reaching a leaf.
pub fn find_lowest_visible(node: &Node) -> &Node {
    let mut current = node;
    while let Some(last) = current.children.last() {
        current = last.as_ref();
    }
    current
}

/// The sibling list containing `node`: its parent's children, or the roots.
fn siblings_of<'a>(forest: &'a Forest, node: &Node) -> &'a [Arc<Node>] {
    match node.parent.as_ref().and_then(|p| find_by_id(forest, p)) {
        Some(parent) => parent.children.as_slice(),
        None => forest.roots(),
    }
}

fn position(siblings: &[Arc<Node>], id: &NodeId) -> Option<usize> {
    siblings.iter().position(|n| &n.id == id)
}

/// First node after `node`'s whole subtree in flattened order: its next
/// sibling, else the next sibling of the nearest ancestor that has one.
pub fn find_next_node<'a>(forest: &'a Forest, node: &'a Node) -> Option<&'a Node> {
    let mut current = node;
    loop {
        let siblings = siblings_of(forest, current);
        let index = position(siblings, &current.id)?;
        if let Some(next) = siblings.get(index + 1) {
            return Some(next.as_ref());
        }
        current = find_by_id(forest, current.parent.as_ref()?)?;
    }
}

/// The row above `id` in flattened order, if any.
pub fn move_up_target<'a>(forest: &'a Forest, id: &NodeId) -> Option<&'a Node> {
    let node = find_by_id(forest, id)?;
    let siblings = siblings_of(forest, node);
    let index = position(siblings, id)?;
    if index > 0 {
        return Some(find_lowest_visible(&siblings[index - 1]));
    }
    node.parent.as_ref().and_then(|p| find_by_id(forest, p))
}

/// The row below `id` in flattened order, if any.
pub fn move_down_target<'a>(forest: &'a Forest, id: &NodeId) -> Option<&'a Node> {
    let node = find_by_id(forest, id)?;
    match node.children.first() {
        Some(first) => Some(first.as_ref()),
        None => find_next_node(forest, node),
    }
}

/// One rendered row of the outline.
#[derive(Debug, Clone, Copy)]
pub struct Row<'a> {
    pub node: &'a Node,
    pub depth: usize,
}

/// Pre-order iterator over the forest, yielding each node with its depth.
pub struct Flatten<'a> {
    stack: Vec<(&'a Node, usize)>,
}

impl<'a> Iterator for Flatten<'a> {
    type Item = Row<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let (node, depth) = self.stack.pop()?;
        // Reverse push keeps siblings left-to-right
        for child in node.children.iter().rev() {
            self.stack.push((child.as_ref(), depth + 1));
        }
        Some(Row { node, depth })
    }
}

/// The forest in flattened (rendered) order.
pub fn flatten(forest: &Forest) -> Flatten<'_> {
    Flatten {
        stack: forest.roots().iter().rev().map(|n| (n.as_ref(), 0)).collect(),
    }
}
