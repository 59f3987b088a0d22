use ratatui::Frame;
use ratatui::layout::{Position, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::tui::app::{App, Mode};
use crate::util::unicode;

/// Height of the add panel including its border
pub const ADD_PANEL_HEIGHT: u16 = 3;

/// Render the add panel: a bordered one-line input at the bottom
pub fn render_add_panel(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let active = app.mode == Mode::Add;
    let border_color = if active {
        app.theme.selection_border
    } else {
        app.theme.dim
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .title(Span::styled(" Add todo ", Style::default().fg(border_color).bg(bg)))
        .border_style(Style::default().fg(border_color).bg(bg))
        .style(Style::default().bg(bg));
    let inner = block.inner(area);

    let line = if active {
        Line::from(Span::styled(
            format!(" {}", app.edit_buffer),
            Style::default().fg(app.theme.text_bright).bg(bg),
        ))
    } else {
        Line::from(Span::styled(
            " press a to add",
            Style::default().fg(app.theme.dim).bg(bg),
        ))
    };

    frame.render_widget(Paragraph::new(line).block(block), area);

    if active && inner.width > 0 {
        let col = 1 + unicode::byte_offset_to_display_col(&app.edit_buffer, app.edit_cursor);
        let x = inner.x + (col as u16).min(inner.width - 1);
        frame.set_cursor_position(Position::new(x, inner.y));
    }
}
