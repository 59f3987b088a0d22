use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::io::recovery::atomic_write;
use crate::model::config::Config;

/// Commented template written by `tk config set` when no config exists yet.
const CONFIG_TEMPLATE: &str = r##"# tack configuration

[store]
# file = "todos.json"

[ui]
# show_key_hints = true
# show_add_panel = false
# empty_message = "No todo items yet."
#
# [ui.colors]
# background = "#0C001B"
# text = "#B0AAFF"
# text_bright = "#FFFFFF"
# highlight = "#FB4196"
# dim = "#7D78BF"
# important = "#FFD700"
# done = "#44FF88"
"##;

/// Error type for config I/O
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("could not read {path}: {source}")]
    ReadError { path: PathBuf, source: io::Error },
    #[error("could not write {path}: {source}")]
    WriteError { path: PathBuf, source: io::Error },
    #[error("could not parse config.toml: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("could not edit config.toml: {0}")]
    Edit(#[from] toml_edit::TomlError),
    #[error("unknown config key: {0}")]
    UnknownKey(String),
    #[error("invalid value for {key}: {value}")]
    InvalidValue { key: String, value: String },
}

pub fn config_path(data_dir: &Path) -> PathBuf {
    data_dir.join("config.toml")
}

/// Read config.toml, falling back to defaults when it does not exist.
/// A file that exists but does not parse is an error.
pub fn read_config(data_dir: &Path) -> Result<Config, ConfigError> {
    let path = config_path(data_dir);
    match fs::read_to_string(&path) {
        Ok(text) => Ok(toml::from_str(&text)?),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(Config::default()),
        Err(e) => Err(ConfigError::ReadError { path, source: e }),
    }
}

/// Read the raw config document for round-trip-safe editing.
/// Missing config starts from the commented template.
pub fn read_config_doc(data_dir: &Path) -> Result<toml_edit::DocumentMut, ConfigError> {
    let path = config_path(data_dir);
    let text = match fs::read_to_string(&path) {
        Ok(text) => text,
        Err(e) if e.kind() == io::ErrorKind::NotFound => CONFIG_TEMPLATE.to_string(),
        Err(e) => return Err(ConfigError::ReadError { path, source: e }),
    };
    Ok(text.parse()?)
}

/// Write the config document back to disk, preserving formatting.
pub fn write_config_doc(data_dir: &Path, doc: &toml_edit::DocumentMut) -> Result<(), ConfigError> {
    let path = config_path(data_dir);
    fs::create_dir_all(data_dir)
        .and_then(|_| atomic_write(&path, doc.to_string().as_bytes()))
        .map_err(|e| ConfigError::WriteError { path, source: e })
}

/// Set a dotted key such as `ui.show_add_panel` or `ui.colors.highlight`.
///
/// Keys and value types are checked against `Config` so a bad edit cannot
/// leave an unparseable file behind.
pub fn set_config_value(
    doc: &mut toml_edit::DocumentMut,
    key: &str,
    value: &str,
) -> Result<(), ConfigError> {
    let invalid = || ConfigError::InvalidValue {
        key: key.to_string(),
        value: value.to_string(),
    };

    let item = match key {
        "ui.show_key_hints" | "ui.show_add_panel" => {
            let flag: bool = value.parse().map_err(|_| invalid())?;
            toml_edit::value(flag)
        }
        "store.file" => {
            if value.trim().is_empty() || value.contains('/') {
                return Err(invalid());
            }
            toml_edit::value(value)
        }
        "ui.empty_message" => toml_edit::value(value),
        _ => match key.strip_prefix("ui.colors.") {
            Some(name) if !name.is_empty() && !name.contains('.') => {
                if !is_hex_color(value) {
                    return Err(invalid());
                }
                toml_edit::value(value)
            }
            _ => return Err(ConfigError::UnknownKey(key.to_string())),
        },
    };

    let mut parts: Vec<&str> = key.split('.').collect();
    let leaf = parts.pop().ok_or_else(|| ConfigError::UnknownKey(key.to_string()))?;
    let mut table = doc.as_table_mut();
    for part in parts {
        if !table.contains_key(part) {
            table.insert(part, toml_edit::Item::Table(toml_edit::Table::new()));
        }
        table = table[part]
            .as_table_mut()
            .ok_or_else(|| ConfigError::UnknownKey(key.to_string()))?;
    }
    table[leaf] = item;
    Ok(())
}

fn is_hex_color(value: &str) -> bool {
    value
        .strip_prefix('#')
        .is_some_and(|hex| hex.len() == 6 && hex.chars().all(|c| c.is_ascii_hexdigit()))
}
