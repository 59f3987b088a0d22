pub mod import;
pub mod partition;
pub mod reorder;
pub mod todo_ops;
