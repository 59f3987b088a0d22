use std::path::{Path, PathBuf};

use crate::cli::commands::*;
use crate::cli::output::*;
use crate::io::config_io;
use crate::io::lock::FileLock;
use crate::io::recovery::{self, RecoveryCategory, RecoveryEntry};
use crate::io::store_io;
use crate::model::config::Config;
use crate::model::list::TodoList;
use crate::model::todo::Partition;
use crate::ops::import::import_todos;
use crate::ops::partition::partition;
use crate::ops::reorder::{DragResult, apply_drag};
use crate::ops::todo_ops;

type CmdResult = Result<(), Box<dyn std::error::Error>>;

/// Everything a command needs: where the data lives and how it is configured
struct Context {
    data_dir: PathBuf,
    config: Config,
}

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

pub fn dispatch(cli: Cli) -> CmdResult {
    let json = cli.json;
    let data_dir = store_io::resolve_data_dir(cli.data_dir.as_deref().map(Path::new));

    let Some(cmd) = cli.command else {
        return crate::tui::run(&data_dir);
    };

    // Config and recovery commands must work even when config.toml is broken
    match cmd {
        Commands::Config(args) => return cmd_config(&data_dir, args),
        Commands::Recovery(args) => return cmd_recovery(&data_dir, args, json),
        _ => {}
    }

    let ctx = Context {
        config: config_io::read_config(&data_dir)?,
        data_dir,
    };

    match cmd {
        // Read commands
        Commands::List(args) => cmd_list(&ctx, args, json),
        Commands::Show(args) => cmd_show(&ctx, args, json),

        // Write commands
        Commands::Add(args) => cmd_add(&ctx, args, json),
        Commands::Done(args) => mutate(&ctx, |list| {
            todo_ops::toggle_complete(list, &args.id).map_err(Into::into)
        }),
        Commands::Star(args) => mutate(&ctx, |list| {
            todo_ops::toggle_important(list, &args.id).map_err(Into::into)
        }),
        Commands::Edit(args) => cmd_edit(&ctx, args),
        Commands::Rm(args) => cmd_rm(&ctx, args),
        Commands::Mv(args) => cmd_mv(&ctx, args),
        Commands::Clear(args) => cmd_clear(&ctx, args),
        Commands::Import(args) => cmd_import(&ctx, args),

        Commands::Config(_) | Commands::Recovery(_) => unreachable!("handled above"),
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn load(ctx: &Context) -> TodoList {
    store_io::load_store(&ctx.data_dir, &ctx.config)
}

/// Load, apply `f`, and write the list back, all under the data dir lock.
/// Nothing is written when `f` fails.
fn mutate<F>(ctx: &Context, f: F) -> CmdResult
where
    F: FnOnce(&mut TodoList) -> CmdResult,
{
    let _lock = FileLock::acquire_default(&ctx.data_dir)?;
    let mut list = load(ctx);
    f(&mut list)?;
    store_io::save_store(&ctx.data_dir, &ctx.config, &list)?;
    Ok(())
}

fn print_json<T: serde::Serialize>(value: &T) -> CmdResult {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

// ---------------------------------------------------------------------------
// Read commands
// ---------------------------------------------------------------------------

fn cmd_list(ctx: &Context, args: ListArgs, json: bool) -> CmdResult {
    let list = load(ctx);
    let parts = partition(&list.todos);
    let only = if args.important {
        Some(Partition::Important)
    } else if args.tasks {
        Some(Partition::Default)
    } else {
        None
    };

    if json {
        print_json(&list_to_json(&parts, only))
    } else {
        print!("{}", format_list(&parts, only, &ctx.config.ui.empty_message));
        Ok(())
    }
}

fn cmd_show(ctx: &Context, args: IdArgs, json: bool) -> CmdResult {
    let list = load(ctx);
    let parts = partition(&list.todos);
    let (section, index) = parts
        .locate(&args.id)
        .ok_or_else(|| todo_ops::TodoError::NotFound(args.id.clone()))?;
    let todo = parts
        .at(section, index)
        .ok_or_else(|| todo_ops::TodoError::NotFound(args.id.clone()))?;

    if json {
        print_json(&todo_to_json(todo, index))
    } else {
        print!("{}", format_todo_detail(todo, section, index));
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Write commands
// ---------------------------------------------------------------------------

fn cmd_add(ctx: &Context, args: AddArgs, json: bool) -> CmdResult {
    let text = args.text.join(" ");
    let mut added = None;
    mutate(ctx, |list| {
        added = todo_ops::add_todo(list, &text);
        Ok(())
    })?;

    if json {
        print_json(&AddedJson { id: added })
    } else {
        if let Some(id) = added {
            println!("{}", id);
        }
        Ok(())
    }
}

fn cmd_edit(ctx: &Context, args: EditArgs) -> CmdResult {
    let text = args.text.join(" ");
    mutate(ctx, |list| {
        todo_ops::start_edit(list, &args.id)?;
        todo_ops::save_edit(list, &args.id, &text)?;
        Ok(())
    })
}

fn cmd_rm(ctx: &Context, args: IdArgs) -> CmdResult {
    mutate(ctx, |list| {
        let removed = todo_ops::delete_todo(list, &args.id)?;
        recovery::log_recovery(
            &ctx.data_dir,
            RecoveryEntry::new(RecoveryCategory::Delete, format!("todo {} deleted", removed.id))
                .body(serde_json::to_string_pretty(&removed)?),
        );
        Ok(())
    })
}

fn cmd_mv(ctx: &Context, args: MvArgs) -> CmdResult {
    mutate(ctx, |list| {
        apply_drag(list, &DragResult::new(args.from, args.to));
        Ok(())
    })
}

fn cmd_clear(ctx: &Context, args: ClearArgs) -> CmdResult {
    let _lock = FileLock::acquire_default(&ctx.data_dir)?;
    let mut list = load(ctx);
    if !args.yes {
        return Err(format!(
            "refusing to delete {} todo(s) without --yes",
            list.len()
        )
        .into());
    }

    let removed = todo_ops::clear_all(&mut list);
    if !removed.is_empty() {
        recovery::log_recovery(
            &ctx.data_dir,
            RecoveryEntry::new(RecoveryCategory::Delete, "list cleared")
                .field("Count", removed.len().to_string())
                .body(serde_json::to_string_pretty(&removed)?),
        );
    }
    store_io::clear_store(&ctx.data_dir, &ctx.config)?;
    Ok(())
}

fn cmd_import(ctx: &Context, args: ImportArgs) -> CmdResult {
    let content = std::fs::read_to_string(&args.file)
        .map_err(|e| format!("could not read {}: {}", args.file, e))?;
    let mut summary = None;
    mutate(ctx, |list| {
        summary = Some(import_todos(list, &content)?);
        Ok(())
    })?;

    if let Some(summary) = summary {
        println!("imported {} todo(s)", summary.imported.len());
        for (old, new) in &summary.reassigned {
            println!("  id {} already taken, stored as {}", old, new);
        }
        if summary.skipped > 0 {
            println!("  skipped {} blank todo(s)", summary.skipped);
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Config and recovery
// ---------------------------------------------------------------------------

fn cmd_config(data_dir: &Path, args: ConfigCmd) -> CmdResult {
    match args.action {
        None => {
            let doc = config_io::read_config_doc(data_dir)?;
            print!("{}", doc);
        }
        Some(ConfigAction::Path) => println!("{}", data_dir.display()),
        Some(ConfigAction::Set { key, value }) => {
            let mut doc = config_io::read_config_doc(data_dir)?;
            config_io::set_config_value(&mut doc, &key, &value)?;
            config_io::write_config_doc(data_dir, &doc)?;
        }
    }
    Ok(())
}

fn cmd_recovery(data_dir: &Path, args: RecoveryArgs, json: bool) -> CmdResult {
    if args.prune {
        let removed = recovery::prune_recovery(data_dir, args.before)?;
        println!("removed {} recovery entr{}", removed, if removed == 1 { "y" } else { "ies" });
        return Ok(());
    }

    let entries = recovery::read_recovery_entries(data_dir, args.limit);
    if json {
        let values: Vec<serde_json::Value> = entries.iter().map(|e| e.to_json()).collect();
        return print_json(&values);
    }
    if entries.is_empty() {
        println!("recovery log is empty");
        return Ok(());
    }
    for entry in &entries {
        println!(
            "{} [{}] {}",
            entry
                .timestamp
                .to_rfc3339_opts(chrono::SecondsFormat::Secs, true),
            entry.category,
            entry.description
        );
        for (key, value) in &entry.fields {
            println!("  {}: {}", key, value);
        }
        for line in entry.body.lines() {
            println!("  | {}", line);
        }
    }
    Ok(())
}
