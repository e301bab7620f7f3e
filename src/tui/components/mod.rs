//! # TUI Components
//!
//! ### Stateless Components (Props-Based Rendering)
//!
//! - `TitleBar`: block count and status message
//! - `HelpBar`: key binding hints
//!
//! ### Stateful Components (Event-Driven)
//!
//! - `BlockEditor`: focus, caret and text of the block being edited; turns keys into `Action`s
//! - `OutlineView`: flattened rows with scroll state and caret placement
//!
//! Each component file contains its state types, rendering, event handling
//! and tests. Components receive external data as props rather than reaching
//! into `App`, which keeps them testable with `TestBackend`.

pub mod block_editor;
pub mod help_bar;
pub mod outline_view;
mod title_bar;

pub use block_editor::BlockEditor;
pub use help_bar::HelpBar;
pub use outline_view::{OutlineView, OutlineViewState};
pub use title_bar::TitleBar;
