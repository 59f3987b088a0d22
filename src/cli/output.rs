use serde::Serialize;

use crate::model::todo::{Partition, TodoRecord};
use crate::ops::partition::Partitions;

// ---------------------------------------------------------------------------
// JSON output structs
// ---------------------------------------------------------------------------

#[derive(Serialize)]
pub struct TodoJson {
    pub id: String,
    pub text: String,
    pub completed: bool,
    pub important: bool,
    /// Index within its section
    pub index: usize,
}

#[derive(Serialize)]
pub struct ListJson {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub important: Option<Vec<TodoJson>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tasks: Option<Vec<TodoJson>>,
}

#[derive(Serialize)]
pub struct AddedJson {
    pub id: Option<String>,
}

// ---------------------------------------------------------------------------
// Conversions
// ---------------------------------------------------------------------------

pub fn todo_to_json(todo: &TodoRecord, index: usize) -> TodoJson {
    TodoJson {
        id: todo.id.clone(),
        text: todo.text.clone(),
        completed: todo.completed,
        important: todo.important,
        index,
    }
}

pub fn section_to_json(todos: &[&TodoRecord]) -> Vec<TodoJson> {
    todos
        .iter()
        .enumerate()
        .map(|(i, t)| todo_to_json(t, i))
        .collect()
}

/// Build list JSON for the requested sections (None = both)
pub fn list_to_json(parts: &Partitions, only: Option<Partition>) -> ListJson {
    let want = |p: Partition| only.is_none_or(|o| o == p);
    ListJson {
        important: want(Partition::Important).then(|| section_to_json(&parts.important)),
        tasks: want(Partition::Default).then(|| section_to_json(&parts.default)),
    }
}

// ---------------------------------------------------------------------------
// Text formatting
// ---------------------------------------------------------------------------

/// Format a single todo line: `  [x] 12  Buy milk`
pub fn format_todo_line(todo: &TodoRecord, id_width: usize) -> String {
    let check = if todo.completed { "[x]" } else { "[ ]" };
    format!(
        "  {} {:<width$}  {}",
        check,
        todo.id,
        todo.text,
        width = id_width
    )
}

/// Format the list as text. The Important heading is omitted when that
/// section is empty unless it was asked for explicitly.
pub fn format_list(parts: &Partitions, only: Option<Partition>, empty_message: &str) -> String {
    if only.is_none() && parts.is_empty() {
        return format!("{}\n", empty_message);
    }

    let id_width = parts
        .important
        .iter()
        .chain(parts.default.iter())
        .map(|t| t.id.chars().count())
        .max()
        .unwrap_or(0);

    let mut sections = Vec::new();
    for which in [Partition::Important, Partition::Default] {
        let todos = parts.get(which);
        let shown = match only {
            Some(o) => o == which,
            None => which == Partition::Default || !todos.is_empty(),
        };
        if !shown {
            continue;
        }
        let mut block = format!("{}\n", which.title());
        for todo in todos {
            block.push_str(&format_todo_line(todo, id_width));
            block.push('\n');
        }
        sections.push(block);
    }
    sections.join("\n")
}

/// Format one todo for `tk show`
pub fn format_todo_detail(todo: &TodoRecord, section: Partition, index: usize) -> String {
    format!(
        "{}\nid:        {}\nsection:   {} (#{})\ncompleted: {}\n",
        todo.text,
        todo.id,
        section,
        index,
        if todo.completed { "yes" } else { "no" },
    )
}
