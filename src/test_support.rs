//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use crate::core::forest::{Forest, Node, NodeId};
use crate::core::state::App;

pub fn id(s: &str) -> NodeId {
    NodeId::from(s)
}

/// R1; R2 > C1 > C2; R3. Flattened: [R1, R2, C1, C2, R3].
pub fn nav_forest() -> Forest {
    Forest::from_roots(vec![
        Node::new("R1", "r1"),
        Node::new("R2", "r2").with_child(Node::new("C1", "c1").with_child(Node::new("C2", "c2"))),
        Node::new("R3", "r3"),
    ])
}

pub fn root_ids(forest: &Forest) -> Vec<String> {
    forest.roots().iter().map(|n| n.id.to_string()).collect()
}

/// An App over `nav_forest()`.
pub fn test_app() -> App {
    App::new(nav_forest())
}
