use std::collections::HashSet;

use crate::model::list::TodoList;
use crate::model::todo::TodoRecord;
use crate::ops::todo_ops::next_id;

/// Error type for import operations
#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    #[error("could not parse import file: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Summary of an import
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportResult {
    /// IDs of the imported todos, as stored
    pub imported: Vec<String>,
    /// Original IDs that collided and were reassigned, with their new IDs
    pub reassigned: Vec<(String, String)>,
    /// Entries skipped because their text was blank
    pub skipped: usize,
}

/// Append todos from an exported JSON array (the browser list's storage
/// format) to the end of `list`, in file order.
///
/// IDs already taken (in the list or earlier in the file) are replaced with
/// fresh ones. Transient edit state is dropped.
pub fn import_todos(list: &mut TodoList, json: &str) -> Result<ImportResult, ImportError> {
    let incoming: Vec<TodoRecord> = serde_json::from_str(json)?;
    let mut result = ImportResult::default();
    let mut taken: HashSet<String> = list.todos.iter().map(|t| t.id.clone()).collect();

    for mut todo in incoming {
        let text = todo.text.trim().to_string();
        if text.is_empty() {
            result.skipped += 1;
            continue;
        }
        todo.text = text;
        todo.editing = false;

        if todo.id.trim().is_empty() || taken.contains(&todo.id) {
            let fresh = next_id(list);
            result.reassigned.push((todo.id.clone(), fresh.clone()));
            todo.id = fresh;
        }
        taken.insert(todo.id.clone());
        result.imported.push(todo.id.clone());
        list.todos.push(todo);
    }

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ops::todo_ops::add_todo;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_import_into_empty_list() {
        let mut list = TodoList::default();
        let json = r#"[
            {"id":"1700000000000","text":"Buy milk","completed":false,"editing":false,"important":true},
            {"id":"1700000000500","text":"Walk dog","completed":true,"editing":true,"important":false}
        ]"#;
        let result = import_todos(&mut list, json).unwrap();
        assert_eq!(result.imported, vec!["1700000000000", "1700000000500"]);
        assert!(result.reassigned.is_empty());
        assert_eq!(list.len(), 2);
        assert!(list.todos[0].important);
        assert!(list.todos[1].completed);
        assert!(!list.todos[1].editing);
    }

    #[test]
    fn test_import_reassigns_colliding_ids() {
        let mut list = TodoList::default();
        add_todo(&mut list, "Existing");
        let json = r#"[{"id":"1","text":"Clash"},{"id":"1","text":"Clash again"}]"#;
        let result = import_todos(&mut list, json).unwrap();
        assert_eq!(
            result.reassigned,
            vec![
                ("1".to_string(), "2".to_string()),
                ("1".to_string(), "3".to_string())
            ]
        );
        assert_eq!(list.ids(), vec!["1", "2", "3"]);
    }

    #[test]
    fn test_import_skips_blank_text() {
        let mut list = TodoList::default();
        let json = r#"[{"id":"5","text":"  "},{"id":"6","text":"Real"}]"#;
        let result = import_todos(&mut list, json).unwrap();
        assert_eq!(result.skipped, 1);
        assert_eq!(list.ids(), vec!["6"]);
    }

    #[test]
    fn test_import_malformed_is_error_and_leaves_list() {
        let mut list = TodoList::default();
        add_todo(&mut list, "Keep me");
        assert!(import_todos(&mut list, "{not json").is_err());
        assert_eq!(list.len(), 1);
    }
}
