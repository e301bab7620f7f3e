//! # OutlineView Component
//!
//! Renders the forest as flattened rows and places the terminal cursor in
//! the focused block.
//!
//! `OutlineView` is a transient component (created each frame) that wraps
//! `&'a mut OutlineViewState` (persistent scroll state) plus the snapshot and
//! editor as props.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use unicode_width::UnicodeWidthStr;

use crate::core::forest::Forest;
use crate::core::navigator::{self, Row};
use crate::tui::component::Component;
use crate::tui::components::block_editor::BlockEditor;

const EMPTY_HINT: &str = "Empty outline. Press Enter to add a block.";

/// Scroll state for the outline. Must be persisted in the parent TuiState.
#[derive(Debug, Default)]
pub struct OutlineViewState {
    pub scroll_offset: u16,
}

impl OutlineViewState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adjusts the offset so `row` is inside a viewport of `height` rows,
    /// and never leaves blank space past the last of `total` rows.
    pub fn scroll_to(&mut self, row: u16, height: u16, total: u16) {
        if height == 0 {
            return;
        }
        let max_offset = total.saturating_sub(height);
        self.scroll_offset = self.scroll_offset.min(max_offset);
        if row < self.scroll_offset {
            self.scroll_offset = row;
        } else if row >= self.scroll_offset + height {
            self.scroll_offset = row.saturating_add(1) - height;
        }
    }
}

pub struct OutlineView<'a> {
    pub state: &'a mut OutlineViewState,
    pub forest: &'a Forest,
    pub editor: &'a BlockEditor,
    pub indent_width: u16,
    pub bullet: &'a str,
}

impl<'a> OutlineView<'a> {
    pub fn new(
        state: &'a mut OutlineViewState,
        forest: &'a Forest,
        editor: &'a BlockEditor,
        indent_width: u16,
        bullet: &'a str,
    ) -> Self {
        Self {
            state,
            forest,
            editor,
            indent_width,
            bullet,
        }
    }

    fn indent(&self, row: &Row<'_>) -> usize {
        row.depth * self.indent_width as usize
    }

    fn line(&self, row: &Row<'_>, is_focused: bool) -> Line<'static> {
        let (bullet_style, text_style, text) = if is_focused {
            (
                Style::default().fg(Color::Yellow),
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
                self.editor.buffer.clone(),
            )
        } else {
            (
                Style::default().fg(Color::DarkGray),
                Style::default(),
                row.node.text.clone(),
            )
        };
        Line::from(vec![
            Span::raw(" ".repeat(self.indent(row))),
            Span::styled(format!("{} ", self.bullet), bullet_style),
            Span::styled(text, text_style),
        ])
    }
}

impl<'a> Component for OutlineView<'a> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        if self.forest.is_empty() {
            let hint = Paragraph::new(EMPTY_HINT)
                .style(Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC));
            frame.render_widget(hint, area);
            return;
        }
        let rows: Vec<Row<'_>> = navigator::flatten(self.forest).collect();

        let focused_index = self
            .editor
            .focused()
            .and_then(|id| rows.iter().position(|row| &row.node.id == id));
        let total = u16::try_from(rows.len()).unwrap_or(u16::MAX);
        let focus_row = focused_index.map_or(0, |i| u16::try_from(i).unwrap_or(u16::MAX));
        self.state.scroll_to(focus_row, area.height, total);

        let lines: Vec<Line<'static>> = rows
            .iter()
            .enumerate()
            .map(|(i, row)| self.line(row, Some(i) == focused_index))
            .collect();
        frame.render_widget(
            Paragraph::new(lines).scroll((self.state.scroll_offset, 0)),
            area,
        );

        // Caret: after indent, bullet and space, plus the text before it
        if let Some(i) = focused_index
            && area.width > 0
        {
            let row = &rows[i];
            let prefix = self.indent(row) + self.bullet.width() + 1;
            let caret_col = self.editor.buffer[..self.editor.caret()].width();
            let x = (prefix + caret_col).min(area.width as usize - 1) as u16;
            let y = focus_row.saturating_sub(self.state.scroll_offset);
            if y < area.height {
                frame.set_cursor_position((area.x + x, area.y + y));
            }
        }
    }
}
