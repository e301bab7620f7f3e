use std::io;
use std::time::Duration;

use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
    MouseEventKind,
};

/// TUI-specific input events
#[derive(Debug, Clone, PartialEq)]
pub enum TuiEvent {
    Quit,
    Resize,

    // Text editing inside the focused block
    InputChar(char),
    Paste(String), // Bracketed paste
    Backspace,
    Delete,
    CursorLeft,
    CursorRight,
    CursorHome,
    CursorEnd,

    // Structure and navigation
    Submit,      // Enter: new block below
    Indent,      // Tab
    Unindent,    // Shift+Tab
    DeleteBlock, // Ctrl+D
    CursorUp,
    CursorDown,

    // Mouse
    Click(u16, u16), // Left button down at (column, row)
}

/// Poll for an event without blocking (returns immediately)
pub fn poll_event_immediate() -> io::Result<Option<TuiEvent>> {
    poll_event_timeout(Duration::ZERO)
}

/// Poll for an event, blocking up to `timeout`.
pub fn poll_event_timeout(timeout: Duration) -> io::Result<Option<TuiEvent>> {
    if !event::poll(timeout)? {
        return Ok(None);
    }
    Ok(match event::read()? {
        Event::Key(key_event) if key_event.kind != KeyEventKind::Release => {
            log::debug!(
                "Key event: {:?} with modifiers {:?}",
                key_event.code,
                key_event.modifiers
            );
            map_key(key_event)
        }
        Event::Mouse(mouse_event) => map_mouse(mouse_event),
        Event::Paste(data) => Some(TuiEvent::Paste(data)),
        Event::Resize(_, _) => Some(TuiEvent::Resize),
        _ => None,
    })
}

pub fn map_key(key_event: KeyEvent) -> Option<TuiEvent> {
    match (key_event.modifiers, key_event.code) {
        (KeyModifiers::CONTROL, KeyCode::Char('c')) => Some(TuiEvent::Quit),
        (KeyModifiers::CONTROL, KeyCode::Char('d')) => Some(TuiEvent::DeleteBlock),
        // Some terminals report Shift+Tab as Tab with SHIFT instead of BackTab
        (_, KeyCode::BackTab) => Some(TuiEvent::Unindent),
        (m, KeyCode::Tab) if m.contains(KeyModifiers::SHIFT) => Some(TuiEvent::Unindent),
        (_, KeyCode::Tab) => Some(TuiEvent::Indent),
        (m, KeyCode::Char(c)) if !m.contains(KeyModifiers::CONTROL) => Some(TuiEvent::InputChar(c)),
        (_, KeyCode::Backspace) => Some(TuiEvent::Backspace),
        (_, KeyCode::Delete) => Some(TuiEvent::Delete),
        (_, KeyCode::Enter) => Some(TuiEvent::Submit),
        (_, KeyCode::Esc) => Some(TuiEvent::Quit),
        (_, KeyCode::Up) => Some(TuiEvent::CursorUp),
        (_, KeyCode::Down) => Some(TuiEvent::CursorDown),
        (_, KeyCode::Left) => Some(TuiEvent::CursorLeft),
        (_, KeyCode::Right) => Some(TuiEvent::CursorRight),
        (_, KeyCode::Home) => Some(TuiEvent::CursorHome),
        (_, KeyCode::End) => Some(TuiEvent::CursorEnd),
        _ => None,
    }
}

/// Clicks focus a block; the wheel steps focus like the arrow keys so the
/// view keeps following the focused row.
pub fn map_mouse(mouse_event: MouseEvent) -> Option<TuiEvent> {
    match mouse_event.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            Some(TuiEvent::Click(mouse_event.column, mouse_event.row))
        }
        MouseEventKind::ScrollUp => Some(TuiEvent::CursorUp),
        MouseEventKind::ScrollDown => Some(TuiEvent::CursorDown),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    #[test]
    fn test_structural_keys() {
        assert_eq!(map_key(key(KeyCode::Tab, KeyModifiers::NONE)), Some(TuiEvent::Indent));
        assert_eq!(map_key(key(KeyCode::BackTab, KeyModifiers::SHIFT)), Some(TuiEvent::Unindent));
        assert_eq!(map_key(key(KeyCode::Tab, KeyModifiers::SHIFT)), Some(TuiEvent::Unindent));
        assert_eq!(map_key(key(KeyCode::Enter, KeyModifiers::NONE)), Some(TuiEvent::Submit));
        assert_eq!(
            map_key(key(KeyCode::Char('d'), KeyModifiers::CONTROL)),
            Some(TuiEvent::DeleteBlock)
        );
    }

    #[test]
    fn test_shifted_char_is_input() {
        assert_eq!(
            map_key(key(KeyCode::Char('A'), KeyModifiers::SHIFT)),
            Some(TuiEvent::InputChar('A'))
        );
    }

    #[test]
    fn test_unbound_control_chord_is_ignored() {
        assert_eq!(map_key(key(KeyCode::Char('x'), KeyModifiers::CONTROL)), None);
    }

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    #[test]
    fn test_left_click_reports_position() {
        assert_eq!(
            map_mouse(mouse(MouseEventKind::Down(MouseButton::Left), 7, 3)),
            Some(TuiEvent::Click(7, 3))
        );
        assert_eq!(
            map_mouse(mouse(MouseEventKind::Down(MouseButton::Right), 7, 3)),
            None
        );
        assert_eq!(map_mouse(mouse(MouseEventKind::Moved, 7, 3)), None);
    }

    #[test]
    fn test_wheel_steps_focus() {
        assert_eq!(
            map_mouse(mouse(MouseEventKind::ScrollUp, 0, 0)),
            Some(TuiEvent::CursorUp)
        );
        assert_eq!(
            map_mouse(mouse(MouseEventKind::ScrollDown, 0, 0)),
            Some(TuiEvent::CursorDown)
        );
    }
}
