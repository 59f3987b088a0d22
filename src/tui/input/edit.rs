use crossterm::event::{KeyCode, KeyEvent};

use crate::ops::todo_ops;
use crate::tui::app::{App, Mode};

use super::*;

// ---------------------------------------------------------------------------
// Add panel
// ---------------------------------------------------------------------------

/// Open the add panel and start typing into it
pub(super) fn begin_add(app: &mut App) {
    app.show_add_panel = true;
    reset_text_input(app);
    app.mode = Mode::Add;
}

pub(super) fn handle_add(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Enter => {
            let text = app.edit_buffer.clone();
            // Blank input adds nothing and keeps the panel open
            if let Some(Some(id)) = app.mutate(|list| Ok(todo_ops::add_todo(list, &text))) {
                app.select_id(&id);
            }
            reset_text_input(app);
        }
        KeyCode::Esc => {
            reset_text_input(app);
            app.mode = Mode::Navigate;
        }
        _ => {
            handle_text_key(app, key);
        }
    }
}

// ---------------------------------------------------------------------------
// Inline edit
// ---------------------------------------------------------------------------

/// Start editing the todo under the cursor
pub(super) fn begin_edit(app: &mut App) {
    let Some(todo) = app.cursor_todo() else {
        return;
    };
    let (id, text) = (todo.id.clone(), todo.text.clone());
    if todo_ops::start_edit(&mut app.list, &id).is_err() {
        return;
    }
    begin_text_input(app, &text);
    app.edit_target = Some(id);
    app.mode = Mode::Edit;
}

pub(super) fn handle_edit(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Enter => {
            if let Some(id) = app.edit_target.take() {
                let text = app.edit_buffer.clone();
                app.mutate(|list| todo_ops::save_edit(list, &id, &text));
                app.select_id(&id);
            }
            reset_text_input(app);
            app.mode = Mode::Navigate;
        }
        KeyCode::Esc => {
            if let Some(id) = app.edit_target.take() {
                let _ = todo_ops::cancel_edit(&mut app.list, &id);
            }
            reset_text_input(app);
            app.mode = Mode::Navigate;
        }
        _ => {
            handle_text_key(app, key);
        }
    }
}
