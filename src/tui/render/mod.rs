pub mod add_panel;
pub mod help_overlay;
mod helpers;
pub mod list_view;
pub mod status_row;
#[cfg(test)]
pub mod test_helpers;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::Style;
use ratatui::widgets::Block;

use super::app::App;

/// Main render function, dispatches to sub-renderers
pub fn render(frame: &mut Frame, app: &mut App) {
    let area = frame.area();

    // Background fill
    let bg_style = Style::default().bg(app.theme.background);
    frame.render_widget(Block::default().style(bg_style), area);

    // Layout: content | add panel (when shown) | status row (1 row)
    let panel_height = if app.show_add_panel {
        add_panel::ADD_PANEL_HEIGHT
    } else {
        0
    };
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // top margin
            Constraint::Min(1),    // list
            Constraint::Length(panel_height),
            Constraint::Length(1), // status row
        ])
        .split(area);

    list_view::render_list_view(frame, app, chunks[1]);

    if app.show_add_panel {
        add_panel::render_add_panel(frame, app, chunks[2]);
    }

    // Help overlay (rendered on top of everything)
    if app.show_help {
        help_overlay::render_help_overlay(frame, app, frame.area());
    }

    status_row::render_status_row(frame, app, chunks[3]);
}
