use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::model::todo::Partition;

/// Persisted TUI state (written to .state.json)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiState {
    /// Whether the add panel is open
    #[serde(default)]
    pub show_add_panel: bool,
    /// Section holding the cursor
    #[serde(default = "default_focus")]
    pub focus: Partition,
    /// Cursor index within the focused section
    #[serde(default)]
    pub cursor: usize,
}

impl Default for UiState {
    fn default() -> Self {
        UiState {
            show_add_panel: false,
            focus: default_focus(),
            cursor: 0,
        }
    }
}

fn default_focus() -> Partition {
    Partition::Default
}

/// Read .state.json from the data directory
pub fn read_ui_state(data_dir: &Path) -> Option<UiState> {
    let content = fs::read_to_string(data_dir.join(".state.json")).ok()?;
    serde_json::from_str(&content).ok()
}

/// Write .state.json to the data directory
pub fn write_ui_state(data_dir: &Path, state: &UiState) -> Result<(), std::io::Error> {
    fs::create_dir_all(data_dir)?;
    let content = serde_json::to_string_pretty(state)?;
    fs::write(data_dir.join(".state.json"), content)
}
