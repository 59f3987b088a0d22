use std::collections::HashSet;

use crate::model::list::TodoList;
use crate::model::todo::TodoRecord;

/// Error type for todo operations
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum TodoError {
    #[error("todo not found: {0}")]
    NotFound(String),
}

// ---------------------------------------------------------------------------
// Create
// ---------------------------------------------------------------------------

/// Append a new todo. Text is trimmed; blank text is ignored.
/// Returns the assigned ID, or None if nothing was added.
pub fn add_todo(list: &mut TodoList, text: &str) -> Option<String> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    let id = next_id(list);
    list.todos.push(TodoRecord::new(id.clone(), text.to_string()));
    Some(id)
}

/// Next free ID: one past the largest numeric ID in the list.
///
/// Lists imported from the browser version carry millisecond timestamps as
/// IDs; those are numeric too, so new IDs always land above them. When the
/// largest ID is `u64::MAX` the smallest unused number is taken instead.
pub fn next_id(list: &TodoList) -> String {
    let used: HashSet<u64> = list
        .todos
        .iter()
        .filter_map(|t| t.id.parse::<u64>().ok())
        .collect();
    let max = used.iter().max().copied().unwrap_or(0);
    let id = match max.checked_add(1) {
        Some(id) => id,
        None => (1..=u64::MAX).find(|n| !used.contains(n)).unwrap_or(0),
    };
    id.to_string()
}

/// Give every repeated ID after its first use a fresh one, keeping order.
/// Returns `(old, new)` for each reassigned record.
pub fn reassign_duplicate_ids(list: &mut TodoList) -> Vec<(String, String)> {
    let mut seen = HashSet::new();
    let mut reassigned = Vec::new();
    for i in 0..list.todos.len() {
        if seen.insert(list.todos[i].id.clone()) {
            continue;
        }
        let fresh = next_id(list);
        let old = std::mem::replace(&mut list.todos[i].id, fresh.clone());
        seen.insert(fresh.clone());
        reassigned.push((old, fresh));
    }
    reassigned
}

// ---------------------------------------------------------------------------
// Flags
// ---------------------------------------------------------------------------

pub fn toggle_complete(list: &mut TodoList, id: &str) -> Result<(), TodoError> {
    let todo = find_todo_mut(list, id)?;
    todo.completed = !todo.completed;
    Ok(())
}

/// Flip the important flag, which moves the todo to the other section.
/// Its canonical position is unchanged.
pub fn toggle_important(list: &mut TodoList, id: &str) -> Result<(), TodoError> {
    let todo = find_todo_mut(list, id)?;
    todo.important = !todo.important;
    Ok(())
}

// ---------------------------------------------------------------------------
// Edit
// ---------------------------------------------------------------------------

pub fn start_edit(list: &mut TodoList, id: &str) -> Result<(), TodoError> {
    find_todo_mut(list, id)?.editing = true;
    Ok(())
}

pub fn cancel_edit(list: &mut TodoList, id: &str) -> Result<(), TodoError> {
    find_todo_mut(list, id)?.editing = false;
    Ok(())
}

/// Replace a todo's text and end editing. Blank text keeps the old text.
pub fn save_edit(list: &mut TodoList, id: &str, new_text: &str) -> Result<(), TodoError> {
    let todo = find_todo_mut(list, id)?;
    let new_text = new_text.trim();
    if !new_text.is_empty() {
        todo.text = new_text.to_string();
    }
    todo.editing = false;
    Ok(())
}

// ---------------------------------------------------------------------------
// Delete
// ---------------------------------------------------------------------------

/// Remove a todo, returning it. Relative order of the rest is preserved.
pub fn delete_todo(list: &mut TodoList, id: &str) -> Result<TodoRecord, TodoError> {
    let idx = list
        .position(id)
        .ok_or_else(|| TodoError::NotFound(id.to_string()))?;
    Ok(list.todos.remove(idx))
}

/// Remove every todo, returning what was removed.
pub fn clear_all(list: &mut TodoList) -> Vec<TodoRecord> {
    std::mem::take(&mut list.todos)
}

// ---------------------------------------------------------------------------
// Lookup
// ---------------------------------------------------------------------------

pub fn find_todo<'a>(list: &'a TodoList, id: &str) -> Option<&'a TodoRecord> {
    list.todos.iter().find(|t| t.id == id)
}

fn find_todo_mut<'a>(list: &'a mut TodoList, id: &str) -> Result<&'a mut TodoRecord, TodoError> {
    list.todos
        .iter_mut()
        .find(|t| t.id == id)
        .ok_or_else(|| TodoError::NotFound(id.to_string()))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
