//! # Core Application Logic
//!
//! This module contains the outliner's business logic.
//! It knows nothing about any specific UI technology.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • Forest (tree store)  │
//!                    │  • Navigator (reads)    │
//!                    │  • Action + update()    │
//!                    │                         │
//!                    │  No I/O. No UI. Pure.   │
//!                    └───────────┬─────────────┘
//!                                │ snapshot + focus
//!                                ▼
//!                         ┌────────────┐
//!                         │    TUI     │
//!                         │  Adapter   │
//!                         │ (ratatui)  │
//!                         └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`forest`]: `Node`, `Forest` and the pure `apply(forest, action)` Tree Store
//! - [`navigator`]: read-only traversal and focus targets in flattened order
//! - [`state`]: the `App` struct, current snapshot plus pending focus
//! - [`action`]: the `Action` enum and the `update()` reducer
//! - [`config`]: layered settings for the binary

pub mod action;
pub mod config;
pub mod error;
pub mod forest;
pub mod navigator;
pub mod state;
