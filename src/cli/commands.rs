use chrono::{DateTime, NaiveDate, Utc};
use clap::{Args, Parser, Subcommand};

use crate::model::todo::Partition;
use crate::ops::reorder::DragLocation;

#[derive(Parser)]
#[command(name = "tk", about = concat!("tack v", env!("CARGO_PKG_VERSION"), " - a to-do list that keeps the important things on top"), version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Use a different data directory
    #[arg(short = 'C', long = "dir", global = true)]
    pub data_dir: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Add a todo to the bottom of the list
    Add(AddArgs),
    /// List todos
    List(ListArgs),
    /// Show one todo
    Show(IdArgs),
    /// Toggle a todo's completed flag
    Done(IdArgs),
    /// Toggle a todo's important flag
    Star(IdArgs),
    /// Replace a todo's text
    Edit(EditArgs),
    /// Delete a todo
    Rm(IdArgs),
    /// Move a todo within or between sections
    Mv(MvArgs),
    /// Delete every todo
    Clear(ClearArgs),
    /// Append todos from an exported JSON list
    Import(ImportArgs),
    /// Show or edit config.toml
    Config(ConfigCmd),
    /// View or empty the recovery log
    Recovery(RecoveryArgs),
}

#[derive(Args)]
pub struct AddArgs {
    /// Todo text (words are joined with spaces)
    #[arg(required = true, num_args = 1..)]
    pub text: Vec<String>,
}

#[derive(Args)]
pub struct ListArgs {
    /// Only the Important section
    #[arg(long, conflicts_with = "tasks")]
    pub important: bool,
    /// Only the Tasks section
    #[arg(long)]
    pub tasks: bool,
}

#[derive(Args)]
pub struct IdArgs {
    /// Todo ID
    pub id: String,
}

#[derive(Args)]
pub struct EditArgs {
    /// Todo ID
    pub id: String,
    /// New text (words are joined with spaces)
    #[arg(required = true, num_args = 1..)]
    pub text: Vec<String>,
}

#[derive(Args)]
pub struct MvArgs {
    /// Where the todo is now: <section>:<index>, e.g. tasks:0
    #[arg(value_parser = parse_location)]
    pub from: DragLocation,
    /// Where it should go: <section>:<index>, e.g. important:2
    #[arg(value_parser = parse_location)]
    pub to: DragLocation,
}

#[derive(Args)]
pub struct ClearArgs {
    /// Confirm deleting every todo
    #[arg(long)]
    pub yes: bool,
}

#[derive(Args)]
pub struct ImportArgs {
    /// JSON file holding an array of todos
    pub file: String,
}

#[derive(Args)]
pub struct ConfigCmd {
    #[command(subcommand)]
    pub action: Option<ConfigAction>,
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Set a key, e.g. `ui.show_add_panel true`
    Set {
        key: String,
        value: String,
    },
    /// Print the data directory path
    Path,
}

#[derive(Args)]
pub struct RecoveryArgs {
    /// Show at most this many entries (most recent first)
    #[arg(long)]
    pub limit: Option<usize>,
    /// Remove entries (all of them unless --before is given)
    #[arg(long)]
    pub prune: bool,
    /// With --prune, only remove entries older than this date or RFC 3339 timestamp
    #[arg(long, requires = "prune", value_parser = parse_before)]
    pub before: Option<DateTime<Utc>>,
}

/// Parse `<section>:<index>` where section is important/tasks (or i/t/default).
pub fn parse_location(s: &str) -> Result<DragLocation, String> {
    let (section, index) = s
        .split_once(':')
        .ok_or_else(|| format!("expected <section>:<index>, got \"{}\"", s))?;
    let partition: Partition = section.parse()?;
    let index: usize = index
        .trim()
        .parse()
        .map_err(|_| format!("invalid index \"{}\"", index))?;
    Ok(DragLocation::new(partition, index))
}

/// Parse a prune cutoff: `YYYY-MM-DD` (midnight UTC) or an RFC 3339 timestamp.
pub fn parse_before(s: &str) -> Result<DateTime<Utc>, String> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(s) {
        return Ok(ts.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
        .ok_or_else(|| format!("expected YYYY-MM-DD or an RFC 3339 timestamp, got \"{}\"", s))
}
