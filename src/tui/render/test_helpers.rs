use ratatui::Terminal;
use ratatui::backend::TestBackend;
use ratatui::layout::Rect;

use crate::model::{Config, TodoList, TodoRecord};
use crate::tui::app::App;

pub const TERM_W: u16 = 80;

/// Render into an in-memory buffer and return plain text (no styles).
pub fn render_to_string<F>(w: u16, h: u16, f: F) -> String
where
    F: FnOnce(&mut ratatui::Frame, Rect),
{
    let backend = TestBackend::new(w, h);
    let mut terminal = Terminal::new(backend).unwrap();
    terminal
        .draw(|frame| {
            let area = frame.area();
            f(frame, area);
        })
        .unwrap();

    let buf = terminal.backend().buffer().clone();
    let w = buf.area.width as usize;
    let lines: Vec<String> = buf
        .content
        .chunks(w)
        .map(|row| {
            let s: String = row.iter().map(|cell| cell.symbol()).collect();
            s.trim_end().to_string()
        })
        .collect();

    // Trim trailing blank lines
    let end = lines
        .iter()
        .rposition(|l| !l.is_empty())
        .map_or(0, |i| i + 1);
    lines[..end].join("\n")
}

/// Build an in-memory App from `(text, important, completed)` tuples.
/// IDs are assigned 1, 2, 3... in order.
pub fn app_with_todos(todos: &[(&str, bool, bool)]) -> App {
    let todos = todos
        .iter()
        .enumerate()
        .map(|(i, (text, important, completed))| {
            let mut t = TodoRecord::new((i + 1).to_string(), text.to_string());
            t.important = *important;
            t.completed = *completed;
            t
        })
        .collect();
    App::new(TodoList::new(todos), Config::default())
}

