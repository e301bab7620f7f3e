//! # TitleBar Component
//!
//! Top status bar: block count and the latest status message.
//!
//! Stateless. It receives all data as props and renders a single line:
//!
//! 1. **Status message**: `"Outline (5 blocks) | Indented"`
//! 2. **Default**: `"Outline (5 blocks)"`

use crate::tui::component::Component;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::Span;

pub struct TitleBar {
    /// Number of blocks at every depth
    pub block_count: usize,
    /// Status message (e.g., "Deleted block")
    pub status_message: String,
}

impl TitleBar {
    pub fn new(block_count: usize, status_message: String) -> Self {
        Self {
            block_count,
            status_message,
        }
    }

    fn text(&self) -> String {
        let noun = if self.block_count == 1 { "block" } else { "blocks" };
        if self.status_message.is_empty() {
            format!("Outline ({} {})", self.block_count, noun)
        } else {
            format!(
                "Outline ({} {}) | {}",
                self.block_count, noun, self.status_message
            )
        }
    }
}

impl Component for TitleBar {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let span = Span::styled(self.text(), Style::default().add_modifier(Modifier::BOLD));
        frame.render_widget(span, area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn rendered(title_bar: &mut TitleBar) -> String {
        let backend = TestBackend::new(60, 1);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|f| {
                title_bar.render(f, f.area());
            })
            .unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect::<String>()
    }

    #[test]
    fn test_title_bar_with_status_message() {
        let text = rendered(&mut TitleBar::new(5, "Indented".to_string()));
        assert!(text.contains("Outline (5 blocks) | Indented"));
    }

    #[test]
    fn test_title_bar_default_no_status() {
        let text = rendered(&mut TitleBar::new(1, String::new()));
        assert!(text.contains("Outline (1 block)"));
        assert!(!text.contains('|'));
    }
}
