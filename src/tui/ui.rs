use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};

use crate::core::state::App;
use crate::tui::TuiState;
use crate::tui::component::Component;
use crate::tui::components::{HelpBar, OutlineView, TitleBar};

/// Title, outline and help areas. Shared by drawing and mouse hit-testing.
fn frame_areas(frame_area: Rect, show_help: bool) -> [Rect; 3] {
    use Constraint::{Length, Min};
    let help_height = if show_help { 1 } else { 0 };
    Layout::vertical([Length(1), Min(0), Length(help_height)]).areas(frame_area)
}

pub fn draw_ui(frame: &mut Frame, app: &App, tui: &mut TuiState) {
    let [title_area, outline_area, help_area] = frame_areas(frame.area(), tui.show_help);

    TitleBar::new(app.forest().len(), app.status_message.clone()).render(frame, title_area);

    OutlineView::new(
        &mut tui.outline,
        app.forest(),
        &tui.editor,
        tui.indent_width,
        &tui.bullet,
    )
    .render(frame, outline_area);

    if tui.show_help {
        HelpBar.render(frame, help_area);
    }
}

/// Maps a screen row to an index in the flattened outline, accounting for
/// the scroll offset. `None` outside the outline area.
pub fn hit_test_row(
    screen_y: u16,
    frame_area: Rect,
    show_help: bool,
    scroll_offset: u16,
) -> Option<usize> {
    let [_, outline_area, _] = frame_areas(frame_area, show_help);
    if screen_y < outline_area.y || screen_y >= outline_area.y + outline_area.height {
        return None;
    }
    Some(usize::from(screen_y - outline_area.y) + usize::from(scroll_offset))
}
