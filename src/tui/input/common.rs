use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::tui::app::App;
use crate::util::unicode::{
    next_grapheme_boundary, prev_grapheme_boundary, word_boundary_left, word_boundary_right,
};

/// Map a shifted symbol key to the character it produces on a US layout
pub(super) fn shift_symbol(c: char) -> Option<char> {
    match c {
        '1' => Some('!'),
        '/' => Some('?'),
        _ => None,
    }
}

/// Some terminals report Shift+1 as `Char('1')` with SHIFT instead of
/// `Char('!')`; fold those into the character the user meant.
pub(super) fn normalize_key(mut key: KeyEvent) -> KeyEvent {
    if let KeyCode::Char(c) = key.code
        && key.modifiers.contains(KeyModifiers::SHIFT)
    {
        if c.is_ascii_lowercase() {
            // Shift+c → Char('C') with SHIFT preserved
            key.code = KeyCode::Char(c.to_ascii_uppercase());
        } else if let Some(shifted) = shift_symbol(c) {
            key.code = KeyCode::Char(shifted);
            key.modifiers.remove(KeyModifiers::SHIFT);
        }
    }
    key
}

/// Start a fresh text input holding `text`, cursor at the end
pub(super) fn begin_text_input(app: &mut App, text: &str) {
    app.edit_buffer = text.to_string();
    app.edit_cursor = app.edit_buffer.len();
}

pub(super) fn reset_text_input(app: &mut App) {
    app.edit_buffer.clear();
    app.edit_cursor = 0;
}

/// Apply a line-editing key to the input buffer.
/// Returns false when the key is not a text-editing key.
pub(super) fn handle_text_key(app: &mut App, key: KeyEvent) -> bool {
    let buf = &mut app.edit_buffer;
    let cur = app.edit_cursor.min(buf.len());
    let alt = key.modifiers.contains(KeyModifiers::ALT);
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

    app.edit_cursor = match key.code {
        KeyCode::Left if alt || ctrl => word_boundary_left(buf, cur),
        KeyCode::Right if alt || ctrl => word_boundary_right(buf, cur),
        KeyCode::Left => prev_grapheme_boundary(buf, cur).unwrap_or(cur),
        KeyCode::Right => next_grapheme_boundary(buf, cur).unwrap_or(cur),
        KeyCode::Home => 0,
        KeyCode::End => buf.len(),
        // Readline movement
        KeyCode::Char('a') if ctrl => 0,
        KeyCode::Char('e') if ctrl => buf.len(),
        KeyCode::Char('b') if alt => word_boundary_left(buf, cur),
        KeyCode::Char('f') if alt => word_boundary_right(buf, cur),
        KeyCode::Backspace if alt || ctrl => {
            let start = word_boundary_left(buf, cur);
            buf.drain(start..cur);
            start
        }
        KeyCode::Char('w') if ctrl => {
            let start = word_boundary_left(buf, cur);
            buf.drain(start..cur);
            start
        }
        KeyCode::Char('u') if ctrl => {
            buf.drain(..cur);
            0
        }
        KeyCode::Backspace => match prev_grapheme_boundary(buf, cur) {
            Some(prev) => {
                buf.drain(prev..cur);
                prev
            }
            None => cur,
        },
        KeyCode::Delete => {
            if let Some(next) = next_grapheme_boundary(buf, cur) {
                buf.drain(cur..next);
            }
            cur
        }
        KeyCode::Char(c) if !ctrl && !alt => {
            buf.insert(cur, c);
            cur + c.len_utf8()
        }
        _ => return false,
    };
    true
}
