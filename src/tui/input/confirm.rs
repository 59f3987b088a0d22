use crossterm::event::{KeyCode, KeyEvent};

use crate::tui::app::{App, Mode};

/// y clears the list; any other key backs out
pub(super) fn handle_confirm_clear(app: &mut App, key: KeyEvent) {
    if matches!(key.code, KeyCode::Char('y') | KeyCode::Char('Y')) {
        app.clear_all();
    }
    app.mode = Mode::Navigate;
}
