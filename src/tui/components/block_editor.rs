//! # BlockEditor Component
//!
//! Edits the text of the focused block and turns keys into core `Action`s.
//!
//! ## Responsibilities
//!
//! - Track which block has focus and where the caret is
//! - Handle editing (typing, backspace, delete, caret movement, paste)
//! - Emit `Action::Edit` with the full new text after every change
//! - Map Enter / Tab / Shift+Tab / arrows / Ctrl+D to structural actions
//!
//! ## State Management
//!
//! The buffer mirrors the focused node's text, like an editable DOM element
//! mirrors its content. Focus arrives from `App::take_focus()` and places the
//! caret at the end of the text.

use log::debug;

use crate::core::action::Action;
use crate::core::forest::{Forest, NodeId};
use crate::core::navigator;
use crate::tui::component::EventHandler;
use crate::tui::event::TuiEvent;

#[derive(Debug, Default)]
pub struct BlockEditor {
    focused: Option<NodeId>,
    /// Text of the focused block (Internal State)
    pub buffer: String,
    /// Caret as a byte offset into `buffer` (0..=buffer.len())
    caret: usize,
}

impl BlockEditor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn focused(&self) -> Option<&NodeId> {
        self.focused.as_ref()
    }

    pub fn caret(&self) -> usize {
        self.caret
    }

    /// Moves focus to `id`, caret at the end. Returns false if the block
    /// is not in `forest`.
    pub fn focus(&mut self, forest: &Forest, id: &NodeId) -> bool {
        let Some(node) = navigator::find_by_id(forest, id) else {
            debug!("Focus target {} not in snapshot", id);
            return false;
        };
        self.focused = Some(node.id.clone());
        self.buffer = node.text.clone();
        self.caret = self.buffer.len();
        true
    }

    /// Drops focus when the block is gone and picks up text changed elsewhere.
    pub fn sync(&mut self, forest: &Forest) {
        let Some(id) = &self.focused else {
            return;
        };
        match navigator::find_by_id(forest, id) {
            None => {
                self.focused = None;
                self.buffer.clear();
                self.caret = 0;
            }
            Some(node) if node.text != self.buffer => {
                self.buffer = node.text.clone();
                self.caret = self.buffer.len();
            }
            Some(_) => {}
        }
    }

    fn edited(&self) -> Option<Action> {
        self.focused.clone().map(|id| Action::Edit {
            id,
            text: self.buffer.clone(),
        })
    }

    fn on_focused(&self, make: impl FnOnce(NodeId) -> Action) -> Option<Action> {
        self.focused.clone().map(make)
    }

    fn prev_boundary(&self) -> usize {
        self.buffer[..self.caret]
            .char_indices()
            .next_back()
            .map(|(i, _)| i)
            .unwrap_or(0)
    }

    fn next_boundary(&self) -> usize {
        self.buffer[self.caret..]
            .chars()
            .next()
            .map(|c| self.caret + c.len_utf8())
            .unwrap_or(self.buffer.len())
    }
}

impl EventHandler for BlockEditor {
    type Event = Action;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::InputChar(c) => {
                self.focused.as_ref()?;
                self.buffer.insert(self.caret, *c);
                self.caret += c.len_utf8();
                self.edited()
            }
            TuiEvent::Paste(text) => {
                self.focused.as_ref()?;
                // Blocks are single-line
                let text = text.replace(['\r', '\n'], " ");
                self.buffer.insert_str(self.caret, &text);
                self.caret += text.len();
                self.edited()
            }
            TuiEvent::Backspace => {
                if self.focused.is_none() || self.caret == 0 {
                    return None;
                }
                let prev = self.prev_boundary();
                self.buffer.drain(prev..self.caret);
                self.caret = prev;
                self.edited()
            }
            TuiEvent::Delete => {
                if self.focused.is_none() || self.caret >= self.buffer.len() {
                    return None;
                }
                let next = self.next_boundary();
                self.buffer.drain(self.caret..next);
                self.edited()
            }
            TuiEvent::CursorLeft => {
                self.caret = self.prev_boundary();
                None
            }
            TuiEvent::CursorRight => {
                self.caret = self.next_boundary();
                None
            }
            TuiEvent::CursorHome => {
                self.caret = 0;
                None
            }
            TuiEvent::CursorEnd => {
                self.caret = self.buffer.len();
                None
            }
            TuiEvent::Submit => match &self.focused {
                Some(id) => Some(Action::insert_after(id.clone())),
                None => Some(Action::append_root()),
            },
            TuiEvent::Indent => self.on_focused(Action::Indent),
            TuiEvent::Unindent => self.on_focused(Action::Unindent),
            TuiEvent::DeleteBlock => self.on_focused(Action::Delete),
            TuiEvent::CursorUp => self.on_focused(Action::MoveFocusUp),
            TuiEvent::CursorDown => self.on_focused(Action::MoveFocusDown),
            // Clicks are hit-tested by the event loop, which owns the layout
            TuiEvent::Quit | TuiEvent::Resize | TuiEvent::Click(..) => None,
        }
    }
}
