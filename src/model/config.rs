use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Configuration from config.toml in the data directory
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// File name of the todo store, relative to the data directory
    #[serde(default = "default_store_file")]
    pub file: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        StoreConfig {
            file: default_store_file(),
        }
    }
}

fn default_store_file() -> String {
    "todos.json".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    #[serde(default = "default_true")]
    pub show_key_hints: bool,
    /// Whether the add panel starts open when there is no saved TUI state
    #[serde(default)]
    pub show_add_panel: bool,
    /// Line shown when both sections are empty
    #[serde(default = "default_empty_message")]
    pub empty_message: String,
    #[serde(default)]
    pub colors: HashMap<String, String>,
}

impl Default for UiConfig {
    fn default() -> Self {
        UiConfig {
            show_key_hints: true,
            show_add_panel: false,
            empty_message: default_empty_message(),
            colors: HashMap::new(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_empty_message() -> String {
    "No todo items yet.".to_string()
}
