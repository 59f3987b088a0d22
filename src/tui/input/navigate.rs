use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::ops::todo_ops;
use crate::tui::app::{App, Mode};

use super::*;

pub(super) fn handle_navigate(app: &mut App, key: KeyEvent) {
    // Help overlay intercepts ? and Esc
    if app.show_help {
        if matches!(key.code, KeyCode::Char('?') | KeyCode::Esc) {
            app.show_help = false;
        }
        return;
    }

    match (key.modifiers, key.code) {
        // Quit
        (_, KeyCode::Char('q')) | (_, KeyCode::Esc) => app.should_quit = true,
        (m, KeyCode::Char('c')) if m.contains(KeyModifiers::CONTROL) => app.should_quit = true,

        // Cursor
        (_, KeyCode::Char('j')) | (_, KeyCode::Down) => app.cursor_down(),
        (_, KeyCode::Char('k')) | (_, KeyCode::Up) => app.cursor_up(),
        (_, KeyCode::Char('g')) | (_, KeyCode::Home) => {
            app.focus = crate::model::Partition::Important;
            app.cursor = 0;
            app.clamp_cursor();
        }
        (_, KeyCode::Char('G')) | (_, KeyCode::End) => {
            app.focus = crate::model::Partition::Default;
            app.cursor = usize::MAX;
            app.clamp_cursor();
        }

        // Flags
        (_, KeyCode::Char(' ')) | (_, KeyCode::Char('x')) => {
            if let Some(id) = app.cursor_id() {
                app.mutate(|list| todo_ops::toggle_complete(list, &id));
                app.select_id(&id);
            }
        }
        (_, KeyCode::Char('!')) | (_, KeyCode::Char('i')) => {
            if let Some(id) = app.cursor_id() {
                app.mutate(|list| todo_ops::toggle_important(list, &id));
                app.select_id(&id);
            }
        }

        // Edit
        (_, KeyCode::Char('e')) | (_, KeyCode::Enter) => begin_edit(app),

        // Delete
        (_, KeyCode::Char('d')) | (_, KeyCode::Delete) => app.delete_cursor_todo(),

        // Add panel
        (_, KeyCode::Char('a')) => begin_add(app),
        (_, KeyCode::Tab) => app.show_add_panel = !app.show_add_panel,

        // Move
        (_, KeyCode::Char('m')) => enter_move_mode(app),

        // Clear all
        (_, KeyCode::Char('C')) => {
            if !app.list.is_empty() {
                app.mode = Mode::ConfirmClear;
            }
        }

        (_, KeyCode::Char('?')) => app.show_help = true,
        _ => {}
    }
}
