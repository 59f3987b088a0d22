use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Which of the two list sections a todo is shown in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Partition {
    Important,
    Default,
}

impl Partition {
    /// Section heading shown above the partition
    pub fn title(self) -> &'static str {
        match self {
            Partition::Important => "Important",
            Partition::Default => "Tasks",
        }
    }

    /// The partition a record with this `important` flag belongs to
    pub fn of(important: bool) -> Self {
        if important {
            Partition::Important
        } else {
            Partition::Default
        }
    }

    pub fn is_important(self) -> bool {
        self == Partition::Important
    }
}

impl fmt::Display for Partition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Partition::Important => write!(f, "important"),
            Partition::Default => write!(f, "tasks"),
        }
    }
}

impl FromStr for Partition {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "important" | "i" => Ok(Partition::Important),
            "tasks" | "task" | "default" | "t" | "d" => Ok(Partition::Default),
            other => Err(format!(
                "unknown list \"{}\" (expected important or tasks)",
                other
            )),
        }
    }
}

/// A single to-do item.
///
/// Field names match the JSON written by the browser version of the list,
/// so exported data loads unchanged.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TodoRecord {
    pub id: String,
    pub text: String,
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub important: bool,
    /// Inline edit in progress. Transient: reset on load, ignored by `==`.
    #[serde(default)]
    pub editing: bool,
}

impl TodoRecord {
    /// A fresh, incomplete, non-important record
    pub fn new(id: String, text: String) -> Self {
        TodoRecord {
            id,
            text,
            completed: false,
            important: false,
            editing: false,
        }
    }

    pub fn partition(&self) -> Partition {
        Partition::of(self.important)
    }
}

impl PartialEq for TodoRecord {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
            && self.text == other.text
            && self.completed == other.completed
            && self.important == other.important
    }
}

impl Eq for TodoRecord {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_browser_export_shape() {
        let json = r#"{"id":"1700000000000","text":"Buy milk","completed":true,"editing":false,"important":true}"#;
        let todo: TodoRecord = serde_json::from_str(json).unwrap();
        assert_eq!(todo.id, "1700000000000");
        assert_eq!(todo.text, "Buy milk");
        assert!(todo.completed);
        assert!(todo.important);
        assert_eq!(todo.partition(), Partition::Important);
    }

    #[test]
    fn missing_flags_default_to_false() {
        let todo: TodoRecord = serde_json::from_str(r#"{"id":"1","text":"x"}"#).unwrap();
        assert!(!todo.completed);
        assert!(!todo.important);
        assert!(!todo.editing);
    }

    #[test]
    fn equality_ignores_editing() {
        let a = TodoRecord::new("1".into(), "x".into());
        let mut b = a.clone();
        b.editing = true;
        assert_eq!(a, b);
        b.completed = true;
        assert_ne!(a, b);
    }

    #[test]
    fn partition_parse() {
        assert_eq!("important".parse::<Partition>(), Ok(Partition::Important));
        assert_eq!("I".parse::<Partition>(), Ok(Partition::Important));
        assert_eq!("tasks".parse::<Partition>(), Ok(Partition::Default));
        assert_eq!("default".parse::<Partition>(), Ok(Partition::Default));
        assert!("later".parse::<Partition>().is_err());
    }

    #[test]
    fn partition_titles() {
        assert_eq!(Partition::Important.title(), "Important");
        assert_eq!(Partition::Default.title(), "Tasks");
    }
}
