//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the outline,
//! and translates keyboard and mouse events into core::Action values. A click
//! focuses the block under the pointer without going through the core, since
//! focus placement is the adapter's job.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Frame Order
//!
//! Each pass through the loop:
//!
//! 1. Consume `App::take_focus()` and move the editor there. The request is
//!    resolved against the snapshot that will be drawn, so a block inserted
//!    by the last action is already present when it receives focus.
//! 2. Sync the editor with the snapshot (focused block deleted, text changed).
//! 3. Draw, only if something changed.
//! 4. Poll one event, then drain everything pending before the next draw.
//!
//! A `SteadyBlock` cursor style is used instead of a blinking cursor because
//! ratatui's `set_cursor_position` resets the terminal's blink timer on every
//! `draw()` call.

mod component;
mod components;
mod event;
mod ui;

use log::{debug, info};
use std::io::stdout;
use std::time::Duration;

use crossterm::cursor::{Hide, SetCursorStyle, Show};
use crossterm::event::{
    DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
};
use crossterm::execute;
use ratatui::layout::Rect;

use crate::core::action::{Action, Effect, update};
use crate::core::config::ResolvedConfig;
use crate::core::forest::Forest;
use crate::core::navigator;
use crate::core::state::App;
use crate::tui::component::EventHandler;
use crate::tui::components::{BlockEditor, OutlineViewState};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};

const IDLE_POLL: Duration = Duration::from_millis(500);

/// TUI-specific presentation state (not part of core business logic)
pub struct TuiState {
    pub editor: BlockEditor,
    pub outline: OutlineViewState,
    // View settings from the resolved config
    pub indent_width: u16,
    pub bullet: String,
    pub show_help: bool,
}

impl TuiState {
    pub fn new(config: &ResolvedConfig) -> Self {
        Self {
            editor: BlockEditor::new(),
            outline: OutlineViewState::new(),
            indent_width: config.indent_width,
            bullet: config.bullet.clone(),
            show_help: config.show_help,
        }
    }

    /// Applies a pending focus request, then reconciles the editor with the
    /// current snapshot.
    pub fn place_focus(&mut self, app: &mut App) {
        if let Some(target) = app.take_focus() {
            debug!("Placing focus on {}", target);
            self.editor.focus(app.forest(), &target);
        }
        self.editor.sync(app.forest());
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        execute!(
            stdout(),
            EnableMouseCapture,
            EnableBracketedPaste,
            Show,                        // Caret marks the edit position
            SetCursorStyle::SteadyBlock, // Non-blinking: avoids blink timer reset on redraw
        )?;
        info!("Terminal modes enabled (mouse, bracketed paste, steady block cursor)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(stdout(), DisableMouseCapture, DisableBracketedPaste, Hide);
    }
}

/// Focuses the block drawn at screen row `screen_y`, if any.
fn focus_clicked(app: &App, tui: &mut TuiState, screen_y: u16, frame_area: Rect) {
    let Some(index) =
        ui::hit_test_row(screen_y, frame_area, tui.show_help, tui.outline.scroll_offset)
    else {
        return;
    };
    if let Some(row) = navigator::flatten(app.forest()).nth(index) {
        debug!("Click on row {} focuses {}", index, row.node.id);
        tui.editor.focus(app.forest(), &row.node.id);
    }
}

/// Routes one event through the editor into the core. Returns true on quit.
/// `frame_area` is the terminal area the last frame was laid out in.
fn dispatch(app: &mut App, tui: &mut TuiState, event: &TuiEvent, frame_area: Rect) -> bool {
    let action = match event {
        TuiEvent::Quit => Some(Action::Quit),
        // Resize just needs a redraw
        TuiEvent::Resize => None,
        TuiEvent::Click(_col, row) => {
            focus_clicked(app, tui, *row, frame_area);
            None
        }
        _ => tui.editor.handle_event(event),
    };
    let Some(action) = action else {
        return false;
    };
    debug!("Dispatching {:?}", action);
    update(app, action) == Effect::Quit
}

pub fn run(config: ResolvedConfig, forest: Forest) -> std::io::Result<()> {
    let mut app = App::new(forest);
    let mut tui = TuiState::new(&config);

    let mut terminal = ratatui::init();
    let _terminal_mode_guard = TerminalModeGuard::new();

    let mut needs_redraw = true; // Force first frame
    let result = loop {
        tui.place_focus(&mut app);

        if needs_redraw {
            if let Err(e) = terminal.draw(|f| ui::draw_ui(f, &app, &mut tui)) {
                break Err(e);
            }
            needs_redraw = false;
        }

        let first_event = match poll_event_timeout(IDLE_POLL) {
            Ok(event) => event,
            Err(e) => break Err(e),
        };
        if first_event.is_some() {
            needs_redraw = true;
        }

        // Process first event + drain ALL pending events before next draw.
        // Focus moves between events so each key acts on the right block.
        let frame_area = terminal.get_frame().area();
        let mut should_quit = false;
        let mut next = first_event;
        while let Some(event) = next {
            if dispatch(&mut app, &mut tui, &event, frame_area) {
                should_quit = true;
                break;
            }
            tui.place_focus(&mut app);
            next = match poll_event_immediate() {
                Ok(event) => event,
                Err(e) => {
                    debug!("Event poll failed while draining: {}", e);
                    None
                }
            };
        }

        if should_quit {
            break Ok(());
        }
    };

    info!("Shutting down with {} blocks", app.forest().len());
    ratatui::restore();
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::{CliOverrides, OutlineConfig, resolve};
    use crate::core::forest::NodeId;
    use crate::test_support::{id, test_app};

    const AREA: Rect = Rect::new(0, 0, 80, 10);

    fn tui_state() -> TuiState {
        TuiState::new(&resolve(&OutlineConfig::default(), &CliOverrides::default()))
    }

    fn focused(tui: &TuiState) -> Option<&NodeId> {
        tui.editor.focused()
    }

    #[test]
    fn test_initial_focus_is_first_block() {
        let mut app = test_app();
        let mut tui = tui_state();
        tui.place_focus(&mut app);
        assert_eq!(focused(&tui), Some(&id("R1")));
        assert!(app.pending_focus().is_none());
    }

    #[test]
    fn test_enter_focuses_inserted_block() {
        let mut app = test_app();
        let mut tui = tui_state();
        tui.place_focus(&mut app);

        assert!(!dispatch(&mut app, &mut tui, &TuiEvent::Submit, AREA));
        tui.place_focus(&mut app);

        let new_id = focused(&tui).cloned().unwrap();
        assert_ne!(new_id, id("R1"));
        assert_eq!(app.forest().roots()[1].id, new_id);
        assert_eq!(tui.editor.buffer, "New Text");
    }

    #[test]
    fn test_typing_then_arrow_moves_between_blocks() {
        let mut app = test_app();
        let mut tui = tui_state();
        tui.place_focus(&mut app);

        dispatch(&mut app, &mut tui, &TuiEvent::InputChar('!'), AREA);
        tui.place_focus(&mut app);
        dispatch(&mut app, &mut tui, &TuiEvent::CursorDown, AREA);
        tui.place_focus(&mut app);

        assert_eq!(app.forest().roots()[0].text, "r1!");
        assert_eq!(focused(&tui), Some(&id("R2")));
    }

    #[test]
    fn test_erasing_block_removes_it() {
        let mut app = test_app();
        let mut tui = tui_state();
        tui.place_focus(&mut app);
        dispatch(&mut app, &mut tui, &TuiEvent::CursorDown, AREA);
        tui.place_focus(&mut app);

        dispatch(&mut app, &mut tui, &TuiEvent::Backspace, AREA);
        tui.place_focus(&mut app);
        dispatch(&mut app, &mut tui, &TuiEvent::Backspace, AREA);
        tui.place_focus(&mut app);

        assert_eq!(app.forest().roots().len(), 2);
        assert_eq!(focused(&tui), Some(&id("R1")));
    }

    #[test]
    fn test_quit_event() {
        let mut app = test_app();
        let mut tui = tui_state();
        assert!(dispatch(&mut app, &mut tui, &TuiEvent::Quit, AREA));
        assert!(!dispatch(&mut app, &mut tui, &TuiEvent::Resize, AREA));
    }

    #[test]
    fn test_click_focuses_block_under_pointer() {
        let mut app = test_app();
        let mut tui = tui_state();
        tui.place_focus(&mut app);

        // Title takes row 0, so screen row 3 is the third flattened row
        assert!(!dispatch(&mut app, &mut tui, &TuiEvent::Click(10, 3), AREA));
        assert_eq!(focused(&tui), Some(&id("C1")));
        assert_eq!(tui.editor.buffer, "c1");

        tui.place_focus(&mut app);
        assert_eq!(focused(&tui), Some(&id("C1")));
    }

    #[test]
    fn test_click_respects_scroll_offset() {
        let mut app = test_app();
        let mut tui = tui_state();
        tui.place_focus(&mut app);
        tui.outline.scroll_offset = 2;

        dispatch(&mut app, &mut tui, &TuiEvent::Click(0, 1), AREA);
        assert_eq!(focused(&tui), Some(&id("C1")));
    }

    #[test]
    fn test_click_outside_rows_keeps_focus() {
        let mut app = test_app();
        let mut tui = tui_state();
        tui.place_focus(&mut app);

        // Title bar, then the empty space below the last row
        dispatch(&mut app, &mut tui, &TuiEvent::Click(0, 0), AREA);
        dispatch(&mut app, &mut tui, &TuiEvent::Click(0, 7), AREA);
        assert_eq!(focused(&tui), Some(&id("R1")));
    }

    #[test]
    fn test_clicked_block_is_what_the_next_key_edits() {
        let mut app = test_app();
        let mut tui = tui_state();
        tui.place_focus(&mut app);

        dispatch(&mut app, &mut tui, &TuiEvent::Click(0, 5), AREA);
        dispatch(&mut app, &mut tui, &TuiEvent::InputChar('!'), AREA);
        tui.place_focus(&mut app);

        assert_eq!(
            navigator::find_by_id(app.forest(), &id("R3")).unwrap().text,
            "r3!"
        );
    }
}
