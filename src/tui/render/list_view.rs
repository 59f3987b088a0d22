use ratatui::Frame;
use ratatui::layout::{Position, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::model::{Partition, TodoList, TodoRecord};
use crate::ops::partition::partition;
use crate::tui::app::{App, Mode};
use crate::util::unicode;

use super::helpers::checkbox;

/// Cells before the todo text: bar, space, checkbox, space
const TEXT_COL: usize = 6;

/// A row of the list view
enum ListRow<'a> {
    Header(Partition),
    Todo(&'a TodoRecord),
    Blank,
}

/// Flatten the list into rows: Important (only when it has todos, or when
/// `keep_important` is set) then Tasks.
fn build_rows(list: &TodoList, keep_important: bool) -> Vec<ListRow<'_>> {
    let parts = partition(&list.todos);
    let mut rows = Vec::new();
    if !parts.important.is_empty() || keep_important {
        rows.push(ListRow::Header(Partition::Important));
        rows.extend(parts.important.iter().copied().map(ListRow::Todo));
        rows.push(ListRow::Blank);
    }
    rows.push(ListRow::Header(Partition::Default));
    rows.extend(parts.default.iter().copied().map(ListRow::Todo));
    rows
}

/// Render the two sections, or the empty-state line
pub fn render_list_view(frame: &mut Frame, app: &mut App, area: Rect) {
    let bg = app.theme.background;
    let moving = app.mode == Mode::Move;

    if app.list.is_empty() {
        let empty = Paragraph::new(format!(" {}", app.config.ui.empty_message))
            .style(Style::default().fg(app.theme.dim).bg(bg));
        frame.render_widget(empty, area);
        return;
    }

    // While dragging, show the list as it would look after the drop
    let list = app.move_preview().unwrap_or_else(|| app.list.clone());
    let selected = match &app.move_state {
        Some(ms) => Some(ms.id.clone()),
        None => app.cursor_id(),
    };
    let rows = build_rows(&list, moving);

    let cursor_row = rows
        .iter()
        .position(|r| matches!(r, ListRow::Todo(t) if Some(&t.id) == selected.as_ref()))
        .unwrap_or(0);

    // Keep the cursor row on screen. The header above the first row stays
    // visible when scrolled to the top.
    let visible_height = area.height as usize;
    if cursor_row < app.scroll_offset {
        app.scroll_offset = cursor_row.saturating_sub(1);
    } else if visible_height > 0 && cursor_row >= app.scroll_offset + visible_height {
        app.scroll_offset = cursor_row + 1 - visible_height;
    }
    let scroll = app.scroll_offset.min(rows.len().saturating_sub(1));

    let width = area.width as usize;
    let mut lines: Vec<Line> = Vec::with_capacity(visible_height);
    let mut edit_cursor_pos: Option<Position> = None;

    for (row_idx, row) in rows.iter().enumerate().skip(scroll).take(visible_height) {
        let line = match row {
            ListRow::Header(section) => render_header(app, *section),
            ListRow::Blank => Line::from(""),
            ListRow::Todo(todo) => {
                let is_cursor = row_idx == cursor_row;
                let editing = app.mode == Mode::Edit
                    && app.edit_target.as_deref() == Some(todo.id.as_str());
                if editing {
                    let col = unicode::byte_offset_to_display_col(
                        &app.edit_buffer,
                        app.edit_cursor,
                    );
                    let x = area.x as usize + (TEXT_COL + col).min(width.saturating_sub(1));
                    let y = area.y as usize + (row_idx - scroll);
                    edit_cursor_pos = Some(Position::new(x as u16, y as u16));
                }
                render_todo_line(app, todo, is_cursor, editing, width)
            }
        };
        lines.push(line);
    }

    let paragraph = Paragraph::new(lines).style(Style::default().bg(bg));
    frame.render_widget(paragraph, area);

    if let Some(pos) = edit_cursor_pos {
        frame.set_cursor_position(pos);
    }
}

fn render_header(app: &App, section: Partition) -> Line<'static> {
    let color = match section {
        Partition::Important => app.theme.important,
        Partition::Default => app.theme.text_bright,
    };
    Line::from(Span::styled(
        format!(" {}", section.title()),
        Style::default()
            .fg(color)
            .bg(app.theme.background)
            .add_modifier(Modifier::BOLD),
    ))
}

fn render_todo_line(
    app: &App,
    todo: &TodoRecord,
    is_cursor: bool,
    editing: bool,
    width: usize,
) -> Line<'static> {
    let theme = &app.theme;
    let moving = app.mode == Mode::Move && is_cursor;
    let row_bg = if is_cursor {
        theme.selection_bg
    } else {
        theme.background
    };

    let mut spans: Vec<Span> = Vec::new();

    // Column 0: cursor bar (drag handle while moving)
    if moving {
        spans.push(Span::styled(
            "\u{258C}",
            Style::default().fg(theme.highlight).bg(row_bg),
        ));
    } else if is_cursor {
        spans.push(Span::styled(
            "\u{258E}",
            Style::default().fg(theme.selection_border).bg(row_bg),
        ));
    } else {
        spans.push(Span::styled(" ", Style::default().bg(row_bg)));
    }
    spans.push(Span::styled(" ", Style::default().bg(row_bg)));

    let check_color = if todo.completed { theme.done } else { theme.dim };
    spans.push(Span::styled(
        checkbox(todo.completed),
        Style::default().fg(check_color).bg(row_bg),
    ));
    spans.push(Span::styled(" ", Style::default().bg(row_bg)));

    let text_width = width.saturating_sub(TEXT_COL);
    if editing {
        spans.push(Span::styled(
            app.edit_buffer.clone(),
            Style::default().fg(theme.text_bright).bg(row_bg),
        ));
    } else {
        let mut style = Style::default().bg(row_bg);
        style = if todo.completed {
            style.fg(theme.dim).add_modifier(Modifier::CROSSED_OUT)
        } else if is_cursor {
            style.fg(theme.text_bright)
        } else {
            style.fg(theme.text)
        };
        spans.push(Span::styled(
            unicode::truncate_to_width(&todo.text, text_width),
            style,
        ));
    }

    // Fill the rest of the cursor row with its background
    if is_cursor {
        let used = super::helpers::spans_width(&spans);
        if used < width {
            spans.push(Span::styled(
                " ".repeat(width - used),
                Style::default().bg(row_bg),
            ));
        }
    }

    Line::from(spans)
}
