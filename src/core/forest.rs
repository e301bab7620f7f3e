//! # Forest and Tree Store
//!
//! The outline is a `Forest`: an ordered list of root `Node`s, each owning an
//! ordered list of children. Every structural change goes through
//! [`apply`], which takes a snapshot and a [`TreeAction`] and returns the next
//! snapshot. The input is never touched.
//!
//! ```text
//! Forest ─ roots: Vec<Arc<Node>>
//!            ├── Node { id, text, parent: None, children }
//!            │     └── Node { id, text, parent: Some(..), children }
//!            └── Node { .. }
//! ```
//!
//! Children sit behind `Arc`, so cloning a forest is one `Vec` of refcount
//! bumps. A mutation walks the root-to-target path with `Arc::make_mut`,
//! which copies only the nodes on that path while they are shared with an
//! older snapshot. Untouched subtrees stay shared.
//!
//! `parent` is an id, not a pointer. Ownership runs strictly downward.

use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::core::error::{ForestError, TreeError};

/// Text given to every freshly inserted block.
pub const NEW_BLOCK_TEXT: &str = "New Text";

/// Opaque, stable node identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(String);

impl NodeId {
    /// A fresh UUIDv4 id.
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for NodeId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for NodeId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// One block of text in the outline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub id: NodeId,
    pub text: String,
    #[serde(default)]
    pub children: Vec<Arc<Node>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<NodeId>,
}

impl Node {
    /// A childless node with no parent.
    pub fn new(id: impl Into<NodeId>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            children: Vec::new(),
            parent: None,
        }
    }

    /// Appends `child` as the last child, pointing its `parent` here.
    pub fn with_child(mut self, mut child: Node) -> Self {
        child.parent = Some(self.id.clone());
        self.children.push(Arc::new(child));
        self
    }
}

/// A structural edit understood by the Tree Store.
#[derive(Debug, Clone, PartialEq)]
pub enum TreeAction {
    Edit { id: NodeId, text: String },
    InsertAfter { id: NodeId, new_id: NodeId },
    /// Adds a root at the end. The only way to create a block in an empty outline.
    AppendRoot { new_id: NodeId },
    Indent(NodeId),
    Unindent(NodeId),
    Delete(NodeId),
}

/// Ordered sequence of root nodes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Forest {
    roots: Vec<Arc<Node>>,
}

impl Forest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a forest from detached root nodes (their `parent` is cleared).
    pub fn from_roots(roots: Vec<Node>) -> Self {
        Self {
            roots: roots
                .into_iter()
                .map(|mut node| {
                    node.parent = None;
                    Arc::new(node)
                })
                .collect(),
        }
    }

    /// The demonstration outline shown on startup.
    pub fn sample() -> Self {
        Self::from_roots(vec![
            Node::new(NodeId::generate(), "Editable")
                .with_child(Node::new(NodeId::generate(), "Child 1")),
            Node::new(NodeId::generate(), "Editable 2").with_child(
                Node::new(NodeId::generate(), "Child 1")
                    .with_child(Node::new(NodeId::generate(), "Child 2")),
            ),
            Node::new(NodeId::generate(), "Editable 3"),
        ])
    }

    pub fn roots(&self) -> &[Arc<Node>] {
        &self.roots
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    /// Total number of nodes at every depth.
    pub fn len(&self) -> usize {
        fn count(nodes: &[Arc<Node>]) -> usize {
            nodes.iter().map(|n| 1 + count(&n.children)).sum()
        }
        count(&self.roots)
    }

    pub fn contains(&self, id: &NodeId) -> bool {
        locate(&self.roots, id).is_some()
    }

    /// Checks id uniqueness and that every `parent` names the owning node.
    pub fn validate(&self) -> Result<(), ForestError> {
        fn walk(
            nodes: &[Arc<Node>],
            owner: Option<&NodeId>,
            seen: &mut HashSet<NodeId>,
        ) -> Result<(), ForestError> {
            for node in nodes {
                if !seen.insert(node.id.clone()) {
                    return Err(ForestError::DuplicateId(node.id.clone()));
                }
                match (owner, &node.parent) {
                    (None, Some(parent)) => {
                        return Err(ForestError::RootHasParent {
                            id: node.id.clone(),
                            parent: parent.clone(),
                        });
                    }
                    (Some(expected), found) if found.as_ref() != Some(expected) => {
                        return Err(ForestError::ParentMismatch {
                            id: node.id.clone(),
                            expected: expected.clone(),
                            found: found.clone(),
                        });
                    }
                    _ => {}
                }
                walk(&node.children, Some(&node.id), seen)?;
            }
            Ok(())
        }
        walk(&self.roots, None, &mut HashSet::new())
    }

    /// Nested `{id, text, children, parent?}` records.
    pub fn to_json(&self) -> Result<String, ForestError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parses and validates a forest.
    pub fn from_json(json: &str) -> Result<Self, ForestError> {
        let forest: Forest = serde_json::from_str(json)?;
        forest.validate()?;
        Ok(forest)
    }

    fn edit(&mut self, id: &NodeId, text: &str) -> Result<(), TreeError> {
        let path = self.path_of(id)?;
        node_mut(&mut self.roots, &path).text = text.to_string();
        Ok(())
    }

    fn insert_after(&mut self, id: &NodeId, new_id: &NodeId) -> Result<(), TreeError> {
        self.ensure_unused(new_id)?;
        let path = self.path_of(id)?;
        let (index, parent_path) = split(&path);
        let parent = node_at(&self.roots, &path).parent.clone();

        let mut node = Node::new(new_id.clone(), NEW_BLOCK_TEXT);
        node.parent = parent;
        siblings_mut(&mut self.roots, parent_path).insert(index + 1, Arc::new(node));
        Ok(())
    }

    fn append_root(&mut self, new_id: &NodeId) -> Result<(), TreeError> {
        self.ensure_unused(new_id)?;
        self.roots
            .push(Arc::new(Node::new(new_id.clone(), NEW_BLOCK_TEXT)));
        Ok(())
    }

    fn indent(&mut self, id: &NodeId) -> Result<(), TreeError> {
        let path = self.path_of(id)?;
        let (index, parent_path) = split(&path);
        if index == 0 {
            return Err(TreeError::IllegalMove {
                id: id.clone(),
                reason: "no preceding sibling to indent under",
            });
        }

        let siblings = siblings_mut(&mut self.roots, parent_path);
        let mut moved = siblings.remove(index);
        let new_parent = Arc::make_mut(&mut siblings[index - 1]);
        Arc::make_mut(&mut moved).parent = Some(new_parent.id.clone());
        new_parent.children.push(moved);
        Ok(())
    }

    fn unindent(&mut self, id: &NodeId) -> Result<(), TreeError> {
        let path = self.path_of(id)?;
        let (index, parent_path) = split(&path);
        let Some((&parent_index, grand_path)) = parent_path.split_last() else {
            return Err(TreeError::IllegalMove {
                id: id.clone(),
                reason: "already top-level",
            });
        };
        let grandparent = node_at(&self.roots, parent_path).parent.clone();

        let mut moved = siblings_mut(&mut self.roots, parent_path).remove(index);
        Arc::make_mut(&mut moved).parent = grandparent;
        siblings_mut(&mut self.roots, grand_path).insert(parent_index + 1, moved);
        Ok(())
    }

    fn delete(&mut self, id: &NodeId) -> Result<(), TreeError> {
        let path = self.path_of(id)?;
        let (index, parent_path) = split(&path);
        siblings_mut(&mut self.roots, parent_path).remove(index);
        Ok(())
    }

    fn path_of(&self, id: &NodeId) -> Result<Vec<usize>, TreeError> {
        locate(&self.roots, id).ok_or_else(|| TreeError::NotFound(id.clone()))
    }

    fn ensure_unused(&self, id: &NodeId) -> Result<(), TreeError> {
        if self.contains(id) {
            Err(TreeError::DuplicateId(id.clone()))
        } else {
            Ok(())
        }
    }
}

/// Applies `action`, reporting why nothing changed when it is a no-op.
pub fn try_apply(forest: &Forest, action: &TreeAction) -> Result<Forest, TreeError> {
    let mut next = forest.clone();
    match action {
        TreeAction::Edit { id, text } => next.edit(id, text)?,
        TreeAction::InsertAfter { id, new_id } => next.insert_after(id, new_id)?,
        TreeAction::AppendRoot { new_id } => next.append_root(new_id)?,
        TreeAction::Indent(id) => next.indent(id)?,
        TreeAction::Unindent(id) => next.unindent(id)?,
        TreeAction::Delete(id) => next.delete(id)?,
    }
    Ok(next)
}

/// Total version of [`try_apply`]: a missing id or an illegal move yields
/// an unchanged copy of the input.
pub fn apply(forest: &Forest, action: &TreeAction) -> Forest {
    match try_apply(forest, action) {
        Ok(next) => next,
        Err(e) => {
            debug!("No-op {:?}: {}", action, e);
            forest.clone()
        }
    }
}

/// Index path from the roots down to `id`, depth-first in sibling order.
fn locate(nodes: &[Arc<Node>], id: &NodeId) -> Option<Vec<usize>> {
    for (i, node) in nodes.iter().enumerate() {
        if &node.id == id {
            return Some(vec![i]);
        }
        if let Some(mut path) = locate(&node.children, id) {
            path.insert(0, i);
            return Some(path);
        }
    }
    None
}

/// Splits a path into the node's index and its parent's path.
fn split(path: &[usize]) -> (usize, &[usize]) {
    match path.split_last() {
        Some((&index, parent_path)) => (index, parent_path),
        // locate never yields an empty path
        None => (0, path),
    }
}

fn node_at<'a>(roots: &'a [Arc<Node>], path: &[usize]) -> &'a Node {
    let (index, parent_path) = split(path);
    let siblings = parent_path
        .iter()
        .fold(roots, |siblings, &i| siblings[i].children.as_slice());
    &siblings[index]
}

/// The children list at `parent_path` (the roots when empty), unsharing every
/// node on the way down.
fn siblings_mut<'a>(roots: &'a mut Vec<Arc<Node>>, parent_path: &[usize]) -> &'a mut Vec<Arc<Node>> {
    let mut siblings = roots;
    for &i in parent_path {
        let node = &mut siblings[i];
        siblings = &mut Arc::make_mut(node).children;
    }
    siblings
}

fn node_mut<'a>(roots: &'a mut Vec<Arc<Node>>, path: &[usize]) -> &'a mut Node {
    let (index, parent_path) = split(path);
    Arc::make_mut(&mut siblings_mut(roots, parent_path)[index])
}
