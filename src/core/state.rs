//! # Application State
//!
//! The controller's state. No TUI-specific types live here; presentation
//! state (scroll offset, caret column) belongs to the `tui` module.
//!
//! ```text
//! App
//! ├── forest: Forest                 // current snapshot, replaced wholesale
//! ├── pending_focus: Option<NodeId>  // consumed once by the renderer
//! └── status_message: String         // title bar text
//! ```
//!
//! State changes only happen through `update(state, action)` in action.rs.

use crate::core::forest::{Forest, NodeId};

pub struct App {
    forest: Forest,
    pending_focus: Option<NodeId>,
    pub status_message: String,
}

impl App {
    /// Starts on `forest` with focus requested on its first block.
    pub fn new(forest: Forest) -> Self {
        let pending_focus = forest.roots().first().map(|n| n.id.clone());
        Self {
            forest,
            pending_focus,
            status_message: String::from("Welcome to Outline!"),
        }
    }

    /// The current snapshot.
    pub fn forest(&self) -> &Forest {
        &self.forest
    }

    pub fn pending_focus(&self) -> Option<&NodeId> {
        self.pending_focus.as_ref()
    }

    /// Hands the focus request to the renderer and clears it.
    pub fn take_focus(&mut self) -> Option<NodeId> {
        self.pending_focus.take()
    }

    pub(crate) fn replace_forest(&mut self, forest: Forest) {
        self.forest = forest;
    }

    pub(crate) fn request_focus(&mut self, id: NodeId) {
        self.pending_focus = Some(id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{id, nav_forest, test_app};

    #[test]
    fn test_app_new_defaults() {
        let app = test_app();
        assert_eq!(app.status_message, "Welcome to Outline!");
        assert_eq!(app.pending_focus(), Some(&id("R1")));
        assert_eq!(app.forest(), &nav_forest());
    }

    #[test]
    fn test_take_focus_consumes_once() {
        let mut app = test_app();
        assert_eq!(app.take_focus(), Some(id("R1")));
        assert_eq!(app.take_focus(), None);
    }

    #[test]
    fn test_empty_forest_has_no_focus() {
        let app = App::new(Forest::new());
        assert!(app.pending_focus().is_none());
    }
}
