use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::io::recovery::{self, RecoveryCategory, RecoveryEntry};
use crate::model::config::Config;
use crate::model::list::TodoList;
use crate::model::todo::TodoRecord;
use crate::ops::todo_ops::reassign_duplicate_ids;

/// Environment variable overriding the data directory
pub const DATA_DIR_ENV: &str = "TACK_DIR";

/// Error type for store I/O
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("could not write {path}: {source}")]
    WriteError { path: PathBuf, source: io::Error },
    #[error("could not remove {path}: {source}")]
    RemoveError { path: PathBuf, source: io::Error },
    #[error("could not serialize todos: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Resolve the data directory: explicit override, then `$TACK_DIR`, then
/// `$XDG_DATA_HOME/tack`, then `~/.local/share/tack`.
pub fn resolve_data_dir(override_dir: Option<&Path>) -> PathBuf {
    if let Some(dir) = override_dir {
        return dir.to_path_buf();
    }
    if let Some(dir) = std::env::var_os(DATA_DIR_ENV).filter(|v| !v.is_empty()) {
        return PathBuf::from(dir);
    }
    let data_home = std::env::var_os("XDG_DATA_HOME")
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| home_dir().join(".local/share"));
    data_home.join("tack")
}

fn home_dir() -> PathBuf {
    std::env::var_os("HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Path of the store file inside the data directory
pub fn store_path(data_dir: &Path, config: &Config) -> PathBuf {
    data_dir.join(&config.store.file)
}

/// Load the todo list. A missing store is an empty list; an unreadable or
/// malformed one is also an empty list, with its content kept in the
/// recovery log. Repeated IDs are made unique.
pub fn load_store(data_dir: &Path, config: &Config) -> TodoList {
    let path = store_path(data_dir, config);
    let content = match fs::read_to_string(&path) {
        Ok(c) => c,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return TodoList::default(),
        Err(e) => {
            eprintln!("warning: could not read {}: {}", path.display(), e);
            recovery::log_recovery(
                data_dir,
                RecoveryEntry::new(RecoveryCategory::Parser, "unreadable store")
                    .field("Source", &config.store.file)
                    .field("Error", e.to_string()),
            );
            return TodoList::default();
        }
    };

    if content.trim().is_empty() {
        return TodoList::default();
    }

    match parse_store(&content) {
        Ok(mut list) => {
            for (old, new) in reassign_duplicate_ids(&mut list) {
                eprintln!(
                    "warning: {} repeats id {}; loaded the later copy as {}",
                    path.display(),
                    old,
                    new
                );
            }
            list
        }
        Err(e) => {
            eprintln!(
                "warning: {} is malformed ({}); starting with an empty list",
                path.display(),
                e
            );
            recovery::log_recovery(
                data_dir,
                RecoveryEntry::new(RecoveryCategory::Parser, "malformed store")
                    .field("Source", &config.store.file)
                    .field("Error", e.to_string())
                    .body(content),
            );
            TodoList::default()
        }
    }
}

/// Parse store content. `null` is an empty list; edit state is not carried
/// across loads.
pub fn parse_store(content: &str) -> Result<TodoList, serde_json::Error> {
    let parsed: Option<Vec<TodoRecord>> = serde_json::from_str(content)?;
    let mut todos = parsed.unwrap_or_default();
    for todo in &mut todos {
        todo.editing = false;
    }
    Ok(TodoList::new(todos))
}

/// Serialize the whole list as a JSON array
pub fn serialize_store(list: &TodoList) -> Result<String, serde_json::Error> {
    let mut out = serde_json::to_string_pretty(&list.todos)?;
    out.push('\n');
    Ok(out)
}

/// Overwrite the store with the full list. On failure the content is kept in
/// the recovery log.
pub fn save_store(data_dir: &Path, config: &Config, list: &TodoList) -> Result<(), StoreError> {
    let path = store_path(data_dir, config);
    let content = serialize_store(list)?;
    let result = fs::create_dir_all(data_dir)
        .and_then(|_| recovery::atomic_write(&path, content.as_bytes()));
    if let Err(e) = result {
        recovery::log_recovery(
            data_dir,
            RecoveryEntry::new(RecoveryCategory::Write, "store write failed")
                .field("Target", &config.store.file)
                .field("Error", e.to_string())
                .body(content),
        );
        return Err(StoreError::WriteError { path, source: e });
    }
    Ok(())
}

/// Remove the store file. A missing store is already clear.
pub fn clear_store(data_dir: &Path, config: &Config) -> Result<(), StoreError> {
    let path = store_path(data_dir, config);
    match fs::remove_file(&path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(StoreError::RemoveError { path, source: e }),
    }
}
