//! # Actions
//!
//! Everything the user can do to the outline becomes an `Action`.
//! Enter on a block? That's `Action::InsertAfter`. Arrow up?
//! `Action::MoveFocusUp`.
//!
//! `update()` takes the current state and an action, runs structural changes
//! through the Tree Store, works out where focus goes via the Navigator, and
//! returns an `Effect` telling the adapter what to do next. No I/O here.
//!
//! ```text
//! App + Action  →  update()  →  App' (+ pending focus)  →  Effect
//! ```

use log::debug;

use crate::core::forest::{self, NodeId, TreeAction};
use crate::core::navigator;
use crate::core::state::App;

/// One user intent. Each variant carries exactly the ids and text it needs.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Replace a block's text. Empty text deletes the block.
    Edit { id: NodeId, text: String },
    InsertAfter { id: NodeId, new_id: NodeId },
    AppendRoot { new_id: NodeId },
    Indent(NodeId),
    Unindent(NodeId),
    Delete(NodeId),
    MoveFocusUp(NodeId),
    MoveFocusDown(NodeId),
    Quit,
}

impl Action {
    /// `InsertAfter` with a freshly generated id.
    pub fn insert_after(id: NodeId) -> Self {
        Action::InsertAfter {
            id,
            new_id: NodeId::generate(),
        }
    }

    /// `AppendRoot` with a freshly generated id.
    pub fn append_root() -> Self {
        Action::AppendRoot {
            new_id: NodeId::generate(),
        }
    }
}

/// What the adapter should do after an update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    /// Nothing changed.
    None,
    /// Snapshot or focus changed; redraw.
    Render,
    Quit,
}

pub fn update(app: &mut App, action: Action) -> Effect {
    debug!("Action: {:?}", action);
    match action {
        Action::Edit { id, text } if text.is_empty() => update(app, Action::Delete(id)),
        Action::Edit { id, text } => {
            if commit(app, TreeAction::Edit { id, text }) {
                Effect::Render
            } else {
                Effect::None
            }
        }
        Action::InsertAfter { id, new_id } => {
            let action = TreeAction::InsertAfter {
                id,
                new_id: new_id.clone(),
            };
            if !commit(app, action) {
                return Effect::None;
            }
            app.request_focus(new_id);
            app.status_message = String::from("Inserted block");
            Effect::Render
        }
        Action::AppendRoot { new_id } => {
            let action = TreeAction::AppendRoot {
                new_id: new_id.clone(),
            };
            if !commit(app, action) {
                return Effect::None;
            }
            app.request_focus(new_id);
            app.status_message = String::from("Inserted block");
            Effect::Render
        }
        Action::Indent(id) => {
            if !commit(app, TreeAction::Indent(id.clone())) {
                return Effect::None;
            }
            app.status_message = String::from("Indented");
            keep_focus(app, id)
        }
        Action::Unindent(id) => {
            if !commit(app, TreeAction::Unindent(id.clone())) {
                return Effect::None;
            }
            app.status_message = String::from("Unindented");
            keep_focus(app, id)
        }
        Action::Delete(id) => {
            let successor = focus_after_delete(app, &id);
            if commit(app, TreeAction::Delete(id)) {
                if let Some(next) = successor {
                    app.request_focus(next);
                }
                app.status_message = String::from("Deleted block");
                Effect::Render
            } else {
                Effect::None
            }
        }
        Action::MoveFocusUp(id) => {
            let target = navigator::move_up_target(app.forest(), &id).map(|n| n.id.clone());
            move_focus(app, target)
        }
        Action::MoveFocusDown(id) => {
            let target = navigator::move_down_target(app.forest(), &id).map(|n| n.id.clone());
            move_focus(app, target)
        }
        Action::Quit => Effect::Quit,
    }
}

/// Runs `action` through the Tree Store. Returns whether the snapshot changed.
fn commit(app: &mut App, action: TreeAction) -> bool {
    match forest::try_apply(app.forest(), &action) {
        Ok(next) => {
            app.replace_forest(next);
            true
        }
        Err(e) => {
            debug!("No-op {:?}: {}", action, e);
            false
        }
    }
}

/// A moved block keeps focus in its new position.
fn keep_focus(app: &mut App, id: NodeId) -> Effect {
    app.request_focus(id);
    Effect::Render
}

fn move_focus(app: &mut App, target: Option<NodeId>) -> Effect {
    match target {
        Some(id) => {
            app.request_focus(id);
            Effect::Render
        }
        None => Effect::None,
    }
}

/// The row above the doomed block, or else the first row after its subtree.
fn focus_after_delete(app: &App, id: &NodeId) -> Option<NodeId> {
    let forest = app.forest();
    let node = navigator::find_by_id(forest, id)?;
    navigator::move_up_target(forest, id)
        .or_else(|| navigator::find_next_node(forest, node))
        .map(|n| n.id.clone())
}
