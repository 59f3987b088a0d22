use super::todo::TodoRecord;

/// The canonical ordered sequence of todos.
///
/// Display order inside each section is derived from this order; nothing
/// else stores ordering.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TodoList {
    pub todos: Vec<TodoRecord>,
}

impl TodoList {
    pub fn new(todos: Vec<TodoRecord>) -> Self {
        TodoList { todos }
    }

    pub fn len(&self) -> usize {
        self.todos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.todos.is_empty()
    }

    /// Ids in canonical order
    pub fn ids(&self) -> Vec<&str> {
        self.todos.iter().map(|t| t.id.as_str()).collect()
    }

    pub fn position(&self, id: &str) -> Option<usize> {
        self.todos.iter().position(|t| t.id == id)
    }
}
