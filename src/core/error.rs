//! # Errors
//!
//! Two families live here:
//!
//! - [`TreeError`]: why a structural action had no effect. These never reach
//!   the user. `forest::apply` swallows them and hands back the input snapshot.
//! - [`ForestError`]: a forest that breaks the shape invariants (duplicate ids,
//!   dangling parents). Returned by `Forest::validate` and when deserializing.

use std::fmt;

use crate::core::forest::NodeId;

/// Reasons a Tree Store action leaves the forest unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TreeError {
    /// The action references an id absent from the forest.
    NotFound(NodeId),
    /// The move is not legal at this position (e.g. indenting a first child).
    IllegalMove { id: NodeId, reason: &'static str },
    /// A freshly supplied id is already in use.
    DuplicateId(NodeId),
}

impl fmt::Display for TreeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TreeError::NotFound(id) => write!(f, "node not found: {id}"),
            TreeError::IllegalMove { id, reason } => {
                write!(f, "illegal move for {id}: {reason}")
            }
            TreeError::DuplicateId(id) => write!(f, "id already in use: {id}"),
        }
    }
}

impl std::error::Error for TreeError {}

/// Structural invariant violations found by `Forest::validate`.
#[derive(Debug)]
pub enum ForestError {
    DuplicateId(NodeId),
    /// A root carries a `parent` reference.
    RootHasParent { id: NodeId, parent: NodeId },
    /// A child's `parent` does not name the node that owns it.
    ParentMismatch {
        id: NodeId,
        expected: NodeId,
        found: Option<NodeId>,
    },
    Json(serde_json::Error),
}

impl fmt::Display for ForestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ForestError::DuplicateId(id) => write!(f, "duplicate node id: {id}"),
            ForestError::RootHasParent { id, parent } => {
                write!(f, "root {id} claims parent {parent}")
            }
            ForestError::ParentMismatch {
                id,
                expected,
                found,
            } => match found {
                Some(found) => write!(f, "node {id} is owned by {expected} but claims parent {found}"),
                None => write!(f, "node {id} is owned by {expected} but has no parent"),
            },
            ForestError::Json(e) => write!(f, "forest JSON error: {e}"),
        }
    }
}

impl std::error::Error for ForestError {}

impl From<serde_json::Error> for ForestError {
    fn from(e: serde_json::Error) -> Self {
        ForestError::Json(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tree_error_display() {
        let err = TreeError::IllegalMove {
            id: NodeId::from("a"),
            reason: "first child",
        };
        assert_eq!(err.to_string(), "illegal move for a: first child");
        assert_eq!(
            TreeError::NotFound(NodeId::from("x")).to_string(),
            "node not found: x"
        );
    }

    #[test]
    fn test_parent_mismatch_display_without_parent() {
        let err = ForestError::ParentMismatch {
            id: NodeId::from("c"),
            expected: NodeId::from("p"),
            found: None,
        };
        assert_eq!(err.to_string(), "node c is owned by p but has no parent");
    }
}
