//! Integration tests for the `tk` CLI.
//!
//! Each test creates a temp data directory, runs `tk -C <dir>` as a
//! subprocess, and verifies stdout and/or the files it leaves behind.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Get the path to the built `tk` binary.
fn tk_bin() -> PathBuf {
    // cargo test builds to target/debug/
    let mut path = std::env::current_exe().unwrap();
    path.pop(); // remove test binary name
    path.pop(); // remove deps/
    path.push("tk");
    path
}

/// Run `tk` against the given data dir, returning (stdout, stderr, success).
fn run_tk(dir: &Path, args: &[&str]) -> (String, String, bool) {
    let output = Command::new(tk_bin())
        .arg("-C")
        .arg(dir)
        .args(args)
        .env_remove("TACK_DIR")
        .output()
        .expect("failed to run tk");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    (stdout, stderr, output.status.success())
}

/// Run `tk` expecting success, return stdout.
fn run_tk_ok(dir: &Path, args: &[&str]) -> String {
    let (stdout, stderr, success) = run_tk(dir, args);
    if !success {
        panic!(
            "tk {:?} failed:\nstdout: {}\nstderr: {}",
            args, stdout, stderr
        );
    }
    stdout
}

/// Parse `tk list --json` into (important ids, tasks ids)
fn list_ids(dir: &Path) -> (Vec<String>, Vec<String>) {
    let out = run_tk_ok(dir, &["list", "--json"]);
    let parsed: serde_json::Value = serde_json::from_str(&out).unwrap();
    let ids = |key: &str| -> Vec<String> {
        parsed[key]
            .as_array()
            .unwrap()
            .iter()
            .map(|t| t["id"].as_str().unwrap().to_string())
            .collect()
    };
    (ids("important"), ids("tasks"))
}

/// Raw store content as JSON
fn store_json(dir: &Path) -> serde_json::Value {
    let content = fs::read_to_string(dir.join("todos.json")).unwrap();
    serde_json::from_str(&content).unwrap()
}

/// Add todos a, b, c... returning nothing; IDs are 1, 2, 3...
fn seed(dir: &Path, texts: &[&str]) {
    for text in texts {
        run_tk_ok(dir, &["add", text]);
    }
}

// ---------------------------------------------------------------------------
// Add and list
// ---------------------------------------------------------------------------

#[test]
fn test_empty_list_message() {
    let tmp = tempfile::TempDir::new().unwrap();
    let out = run_tk_ok(tmp.path(), &["list"]);
    assert_eq!(out, "No todo items yet.\n");
}

#[test]
fn test_add_prints_id_and_persists() {
    let tmp = tempfile::TempDir::new().unwrap();
    assert_eq!(run_tk_ok(tmp.path(), &["add", "Buy", "milk"]), "1\n");
    assert_eq!(run_tk_ok(tmp.path(), &["add", "Walk dog"]), "2\n");

    let store = store_json(tmp.path());
    assert_eq!(store[0]["text"], "Buy milk");
    assert_eq!(store[0]["completed"], false);
    assert_eq!(store[0]["important"], false);
    assert_eq!(store[1]["id"], "2");

    let out = run_tk_ok(tmp.path(), &["list"]);
    assert_eq!(out, "Tasks\n  [ ] 1  Buy milk\n  [ ] 2  Walk dog\n");
}

#[test]
fn test_blank_add_adds_nothing() {
    let tmp = tempfile::TempDir::new().unwrap();
    assert_eq!(run_tk_ok(tmp.path(), &["add", "   "]), "");
    let out = run_tk_ok(tmp.path(), &["add", "  ", "--json"]);
    let parsed: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert!(parsed["id"].is_null());
    assert_eq!(run_tk_ok(tmp.path(), &["list"]), "No todo items yet.\n");
}

#[test]
fn test_list_sections() {
    let tmp = tempfile::TempDir::new().unwrap();
    seed(tmp.path(), &["Buy milk", "Pay rent", "Walk dog"]);
    run_tk_ok(tmp.path(), &["star", "2"]);
    run_tk_ok(tmp.path(), &["done", "3"]);

    let out = run_tk_ok(tmp.path(), &["list"]);
    assert_eq!(
        out,
        "Important\n  [ ] 2  Pay rent\n\nTasks\n  [ ] 1  Buy milk\n  [x] 3  Walk dog\n"
    );

    let out = run_tk_ok(tmp.path(), &["list", "--important"]);
    assert_eq!(out, "Important\n  [ ] 2  Pay rent\n");

    let (important, tasks) = list_ids(tmp.path());
    assert_eq!(important, vec!["2"]);
    assert_eq!(tasks, vec!["1", "3"]);
}

// ---------------------------------------------------------------------------
// Toggles, edit, delete
// ---------------------------------------------------------------------------

#[test]
fn test_toggles_flip_back() {
    let tmp = tempfile::TempDir::new().unwrap();
    seed(tmp.path(), &["Buy milk"]);
    run_tk_ok(tmp.path(), &["done", "1"]);
    assert_eq!(store_json(tmp.path())[0]["completed"], true);
    run_tk_ok(tmp.path(), &["done", "1"]);
    assert_eq!(store_json(tmp.path())[0]["completed"], false);

    run_tk_ok(tmp.path(), &["star", "1"]);
    assert_eq!(store_json(tmp.path())[0]["important"], true);
}

#[test]
fn test_unknown_id_fails_and_leaves_store() {
    let tmp = tempfile::TempDir::new().unwrap();
    seed(tmp.path(), &["Buy milk"]);
    let before = fs::read_to_string(tmp.path().join("todos.json")).unwrap();

    for cmd in ["done", "star", "rm", "show"] {
        let (_stdout, stderr, success) = run_tk(tmp.path(), &[cmd, "42"]);
        assert!(!success, "{} should fail", cmd);
        assert!(stderr.contains("error: todo not found: 42"));
    }
    let (_stdout, _stderr, success) = run_tk(tmp.path(), &["edit", "42", "x"]);
    assert!(!success);

    let after = fs::read_to_string(tmp.path().join("todos.json")).unwrap();
    assert_eq!(before, after);
}

#[test]
fn test_edit_replaces_text() {
    let tmp = tempfile::TempDir::new().unwrap();
    seed(tmp.path(), &["Buy milk"]);
    run_tk_ok(tmp.path(), &["edit", "1", "Buy", "oat", "milk"]);
    let store = store_json(tmp.path());
    assert_eq!(store[0]["text"], "Buy oat milk");
    assert_eq!(store[0]["editing"], false);
}

#[test]
fn test_show() {
    let tmp = tempfile::TempDir::new().unwrap();
    seed(tmp.path(), &["Buy milk", "Pay rent"]);
    run_tk_ok(tmp.path(), &["star", "2"]);

    let out = run_tk_ok(tmp.path(), &["show", "2"]);
    assert!(out.starts_with("Pay rent\n"));
    assert!(out.contains("important"));

    let out = run_tk_ok(tmp.path(), &["show", "2", "--json"]);
    let parsed: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(parsed["id"], "2");
    assert_eq!(parsed["important"], true);
    assert_eq!(parsed["index"], 0);
}

#[test]
fn test_rm_keeps_copy_in_recovery_log() {
    let tmp = tempfile::TempDir::new().unwrap();
    seed(tmp.path(), &["Buy milk", "Walk dog"]);
    run_tk_ok(tmp.path(), &["rm", "1"]);

    let (_important, tasks) = list_ids(tmp.path());
    assert_eq!(tasks, vec!["2"]);

    let out = run_tk_ok(tmp.path(), &["recovery", "--json"]);
    let parsed: serde_json::Value = serde_json::from_str(&out).unwrap();
    let entries = parsed.as_array().unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0]["category"], "delete");
    assert!(entries[0]["body"].as_str().unwrap().contains("Buy milk"));
}

#[test]
fn test_new_id_follows_largest_remaining() {
    let tmp = tempfile::TempDir::new().unwrap();
    seed(tmp.path(), &["a", "b", "c"]);

    run_tk_ok(tmp.path(), &["rm", "1"]);
    assert_eq!(run_tk_ok(tmp.path(), &["add", "d"]), "4\n");

    // Deleting the newest todo frees its id for the next add
    run_tk_ok(tmp.path(), &["rm", "4"]);
    assert_eq!(run_tk_ok(tmp.path(), &["add", "e"]), "4\n");
}

#[test]
fn test_add_after_largest_possible_id() {
    let tmp = tempfile::TempDir::new().unwrap();
    fs::write(
        tmp.path().join("todos.json"),
        r#"[{"id":"18446744073709551615","text":"far future"}]"#,
    )
    .unwrap();
    assert_eq!(run_tk_ok(tmp.path(), &["add", "next"]), "1\n");
}

// ---------------------------------------------------------------------------
// Reorder
// ---------------------------------------------------------------------------

#[test]
fn test_mv_within_tasks() {
    let tmp = tempfile::TempDir::new().unwrap();
    seed(tmp.path(), &["a", "b", "c"]);
    run_tk_ok(tmp.path(), &["mv", "tasks:0", "tasks:2"]);
    let (_important, tasks) = list_ids(tmp.path());
    assert_eq!(tasks, vec!["2", "3", "1"]);
}

#[test]
fn test_mv_within_tasks_keeps_important_slots() {
    let tmp = tempfile::TempDir::new().unwrap();
    seed(tmp.path(), &["a", "b", "c", "d"]);
    run_tk_ok(tmp.path(), &["star", "2"]);
    run_tk_ok(tmp.path(), &["mv", "t:2", "t:0"]);

    let ids: Vec<String> = store_json(tmp.path())
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["id"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(ids, vec!["4", "2", "1", "3"]);
}

#[test]
fn test_mv_across_sections() {
    let tmp = tempfile::TempDir::new().unwrap();
    seed(tmp.path(), &["a", "b", "c"]);
    run_tk_ok(tmp.path(), &["star", "1"]);
    run_tk_ok(tmp.path(), &["mv", "tasks:1", "important:0"]);

    let (important, tasks) = list_ids(tmp.path());
    assert_eq!(important, vec!["3", "1"]);
    assert_eq!(tasks, vec!["2"]);
}

#[test]
fn test_mv_bad_location_is_usage_error() {
    let tmp = tempfile::TempDir::new().unwrap();
    seed(tmp.path(), &["a"]);
    let (_stdout, stderr, success) = run_tk(tmp.path(), &["mv", "someday:0", "tasks:0"]);
    assert!(!success);
    assert!(stderr.contains("someday"));
}

// ---------------------------------------------------------------------------
// Clear and import
// ---------------------------------------------------------------------------

#[test]
fn test_clear_requires_yes() {
    let tmp = tempfile::TempDir::new().unwrap();
    seed(tmp.path(), &["a", "b"]);

    let (_stdout, stderr, success) = run_tk(tmp.path(), &["clear"]);
    assert!(!success);
    assert!(stderr.contains("--yes"));
    assert!(tmp.path().join("todos.json").exists());

    run_tk_ok(tmp.path(), &["clear", "--yes"]);
    assert!(!tmp.path().join("todos.json").exists());
    assert_eq!(run_tk_ok(tmp.path(), &["list"]), "No todo items yet.\n");

    let out = run_tk_ok(tmp.path(), &["recovery"]);
    assert!(out.contains("[delete] list cleared"));
}

#[test]
fn test_import_reassigns_colliding_ids() {
    let tmp = tempfile::TempDir::new().unwrap();
    seed(tmp.path(), &["a"]);
    let export = tmp.path().join("export.json");
    fs::write(
        &export,
        r#"[
  {"id": "1", "text": "clash", "completed": true, "important": false, "editing": false},
  {"id": "1700000000000", "text": "from the browser", "completed": false, "important": true, "editing": true},
  {"id": "77", "text": "   ", "completed": false, "important": false, "editing": false}
]"#,
    )
    .unwrap();

    let out = run_tk_ok(tmp.path(), &["import", export.to_str().unwrap()]);
    assert!(out.contains("imported 2 todo(s)"));
    assert!(out.contains("skipped 1"));

    let store = store_json(tmp.path());
    let todos = store.as_array().unwrap();
    assert_eq!(todos.len(), 3);
    assert_eq!(todos[1]["text"], "clash");
    assert_ne!(todos[1]["id"], "1");
    assert_eq!(todos[2]["id"], "1700000000000");
    assert_eq!(todos[2]["editing"], false);
}

// ---------------------------------------------------------------------------
// Persistence edge cases
// ---------------------------------------------------------------------------

#[test]
fn test_loads_browser_export_as_store() {
    let tmp = tempfile::TempDir::new().unwrap();
    fs::write(
        tmp.path().join("todos.json"),
        r#"[{"id":"1","text":"Buy milk","completed":false,"editing":true,"important":true}]"#,
    )
    .unwrap();
    let out = run_tk_ok(tmp.path(), &["list"]);
    assert_eq!(out, "Important\n  [ ] 1  Buy milk\n\nTasks\n");
}

#[test]
fn test_repeated_ids_are_made_unique_on_load() {
    let tmp = tempfile::TempDir::new().unwrap();
    fs::write(
        tmp.path().join("todos.json"),
        r#"[{"id":"5","text":"a","important":true},{"id":"5","text":"b"}]"#,
    )
    .unwrap();

    let (_stdout, stderr, success) = run_tk(tmp.path(), &["list"]);
    assert!(success);
    assert!(stderr.contains("repeats id 5"));

    run_tk_ok(tmp.path(), &["mv", "tasks:0", "important:0"]);
    let (important, tasks) = list_ids(tmp.path());
    assert_eq!(important, vec!["6", "5"]);
    assert!(tasks.is_empty());
}

#[test]
fn test_malformed_store_is_empty_and_logged() {
    let tmp = tempfile::TempDir::new().unwrap();
    fs::write(tmp.path().join("todos.json"), "{not json").unwrap();

    let (stdout, stderr, success) = run_tk(tmp.path(), &["list"]);
    assert!(success);
    assert_eq!(stdout, "No todo items yet.\n");
    assert!(stderr.contains("warning:"));

    let out = run_tk_ok(tmp.path(), &["recovery"]);
    assert!(out.contains("[parser] malformed store"));
    assert!(out.contains("{not json"));
}

#[test]
fn test_recovery_prune_before() {
    let tmp = tempfile::TempDir::new().unwrap();
    seed(tmp.path(), &["a", "b"]);
    run_tk_ok(tmp.path(), &["rm", "1"]);
    run_tk_ok(tmp.path(), &["rm", "2"]);

    let out = run_tk_ok(tmp.path(), &["recovery", "--prune", "--before", "2000-01-01"]);
    assert_eq!(out, "removed 0 recovery entries\n");
    let out = run_tk_ok(tmp.path(), &["recovery", "--json"]);
    let parsed: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(parsed.as_array().unwrap().len(), 2);

    let out = run_tk_ok(tmp.path(), &["recovery", "--prune"]);
    assert_eq!(out, "removed 2 recovery entries\n");
    assert_eq!(run_tk_ok(tmp.path(), &["recovery"]), "recovery log is empty\n");
}

// ---------------------------------------------------------------------------
// Config
// ---------------------------------------------------------------------------

#[test]
fn test_config_set_and_custom_store_file() {
    let tmp = tempfile::TempDir::new().unwrap();
    run_tk_ok(tmp.path(), &["config", "set", "store.file", "list.json"]);
    run_tk_ok(
        tmp.path(),
        &["config", "set", "ui.empty_message", "All clear"],
    );
    assert_eq!(run_tk_ok(tmp.path(), &["list"]), "All clear\n");

    seed(tmp.path(), &["a"]);
    assert!(tmp.path().join("list.json").exists());
    assert!(!tmp.path().join("todos.json").exists());

    let out = run_tk_ok(tmp.path(), &["config"]);
    assert!(out.contains("list.json"));
}

#[test]
fn test_config_rejects_unknown_key() {
    let tmp = tempfile::TempDir::new().unwrap();
    let (_stdout, stderr, success) = run_tk(tmp.path(), &["config", "set", "ui.nope", "1"]);
    assert!(!success);
    assert!(stderr.starts_with("error:"));
}

#[test]
fn test_config_path() {
    let tmp = tempfile::TempDir::new().unwrap();
    let out = run_tk_ok(tmp.path(), &["config", "path"]);
    assert_eq!(out.trim(), tmp.path().display().to_string());
}
