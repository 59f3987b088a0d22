use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crossterm::event::{self, Event, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use crate::io::config_io::read_config;
use crate::io::lock::FileLock;
use crate::io::recovery::{self, RecoveryCategory, RecoveryEntry};
use crate::io::store_io::{clear_store, load_store, save_store};
use crate::model::{Config, Partition, TodoList, TodoRecord};
use crate::ops::partition::{Partitions, partition};
use crate::ops::reorder::{DragLocation, DragResult, apply_drag};
use crate::ops::todo_ops;

use super::input;
use super::render;
use super::theme::Theme;

/// Current interaction mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Navigate,
    /// Typing into the add panel
    Add,
    /// Inline edit of the selected todo
    Edit,
    /// Keyboard drag of the selected todo
    Move,
    /// Waiting for y/n before clearing the list
    ConfirmClear,
}

/// An in-progress keyboard drag
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveState {
    /// ID of the todo being dragged
    pub id: String,
    pub source: DragLocation,
    /// Current drop slot
    pub dest: DragLocation,
}

impl MoveState {
    pub fn drag(&self) -> DragResult {
        DragResult::new(self.source, self.dest)
    }
}

/// Main application state
pub struct App {
    pub list: TodoList,
    /// Where the list is persisted. None keeps everything in memory.
    pub data_dir: Option<PathBuf>,
    pub config: Config,
    pub theme: Theme,
    pub mode: Mode,
    pub should_quit: bool,
    /// Section holding the cursor
    pub focus: Partition,
    /// Cursor index within the focused section
    pub cursor: usize,
    /// First visible row of the list view
    pub scroll_offset: usize,
    pub show_add_panel: bool,
    pub show_help: bool,
    /// Text being typed in Add or Edit mode
    pub edit_buffer: String,
    /// Byte offset of the text cursor in `edit_buffer`
    pub edit_cursor: usize,
    /// ID of the todo being edited inline
    pub edit_target: Option<String>,
    pub move_state: Option<MoveState>,
    /// One-line message shown in the status row until the next key press
    pub status_message: Option<String>,
}

impl App {
    pub fn new(list: TodoList, config: Config) -> Self {
        let theme = Theme::from_config(&config.ui);
        let show_add_panel = config.ui.show_add_panel;
        let mut app = App {
            list,
            data_dir: None,
            config,
            theme,
            mode: Mode::Navigate,
            should_quit: false,
            focus: Partition::Default,
            cursor: 0,
            scroll_offset: 0,
            show_add_panel,
            show_help: false,
            edit_buffer: String::new(),
            edit_cursor: 0,
            edit_target: None,
            move_state: None,
            status_message: None,
        };
        app.clamp_cursor();
        app
    }

    /// Load config and store from a data directory and persist there
    pub fn open(data_dir: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        let config = read_config(data_dir)?;
        let list = load_store(data_dir, &config);
        let mut app = App::new(list, config);
        app.data_dir = Some(data_dir.to_path_buf());
        Ok(app)
    }

    pub fn partitions(&self) -> Partitions<'_> {
        partition(&self.list.todos)
    }

    /// Location of the cursor, if the list is not empty
    pub fn cursor_location(&self) -> Option<DragLocation> {
        (self.cursor < self.section_len(self.focus))
            .then(|| DragLocation::new(self.focus, self.cursor))
    }

    /// The todo under the cursor
    pub fn cursor_todo(&self) -> Option<&TodoRecord> {
        self.partitions().at(self.focus, self.cursor)
    }

    pub fn cursor_id(&self) -> Option<String> {
        self.cursor_todo().map(|t| t.id.clone())
    }

    /// Number of todos in a section
    pub fn section_len(&self, section: Partition) -> usize {
        self.partitions().len(section)
    }

    /// Keep the cursor on an existing row. An empty Important section
    /// hands focus to Tasks.
    pub fn clamp_cursor(&mut self) {
        let important = self.section_len(Partition::Important);
        let default = self.section_len(Partition::Default);
        if self.focus == Partition::Important && important == 0 {
            self.focus = Partition::Default;
        } else if self.focus == Partition::Default && default == 0 && important > 0 {
            self.focus = Partition::Important;
            self.cursor = important - 1;
        }
        let len = self.section_len(self.focus);
        self.cursor = self.cursor.min(len.saturating_sub(1));
    }

    /// Put the cursor on a todo by ID, wherever it now lives
    pub fn select_id(&mut self, id: &str) {
        let located = self.partitions().locate(id);
        if let Some((section, index)) = located {
            self.focus = section;
            self.cursor = index;
        }
        self.clamp_cursor();
    }

    pub fn cursor_down(&mut self) {
        if self.cursor + 1 < self.section_len(self.focus) {
            self.cursor += 1;
        } else if self.focus == Partition::Important
            && self.section_len(Partition::Default) > 0
        {
            self.focus = Partition::Default;
            self.cursor = 0;
        }
    }

    pub fn cursor_up(&mut self) {
        let important = self.section_len(Partition::Important);
        if self.cursor > 0 {
            self.cursor -= 1;
        } else if self.focus == Partition::Default && important > 0 {
            self.focus = Partition::Important;
            self.cursor = important - 1;
        }
    }

    /// Row of the cursor in the flattened list (Important rows first)
    pub fn cursor_row(&self) -> usize {
        match self.focus {
            Partition::Important => self.cursor,
            Partition::Default => self.section_len(Partition::Important) + self.cursor,
        }
    }

    // -----------------------------------------------------------------------
    // Write-through mutation
    // -----------------------------------------------------------------------

    /// Apply a change to the list and write it through to the store.
    ///
    /// The store is re-read under the lock first so changes made by `tk` while
    /// the TUI is open are not overwritten. Errors from `f` leave the list as
    /// it was on disk and are not reported: ops on a vanished ID are no-ops.
    pub fn mutate<F, T>(&mut self, f: F) -> Option<T>
    where
        F: FnOnce(&mut TodoList) -> Result<T, todo_ops::TodoError>,
    {
        let Some(dir) = self.data_dir.clone() else {
            return f(&mut self.list).ok();
        };

        let _lock = match FileLock::acquire_default(&dir) {
            Ok(lock) => lock,
            Err(e) => {
                self.status_message = Some(e.to_string());
                return None;
            }
        };
        self.list = load_store(&dir, &self.config);
        let result = f(&mut self.list).ok()?;
        if let Err(e) = save_store(&dir, &self.config, &self.list) {
            self.status_message = Some(e.to_string());
        }
        Some(result)
    }

    /// Delete the todo under the cursor, keeping a copy in the recovery log
    pub fn delete_cursor_todo(&mut self) {
        let Some(id) = self.cursor_id() else {
            return;
        };
        if let Some(removed) = self.mutate(|list| todo_ops::delete_todo(list, &id)) {
            self.log_deleted(&format!("todo {} deleted", removed.id), &[removed]);
        }
        self.clamp_cursor();
    }

    /// Remove every todo and the store file
    pub fn clear_all(&mut self) {
        let removed = match self.data_dir.clone() {
            None => todo_ops::clear_all(&mut self.list),
            Some(dir) => {
                let _lock = match FileLock::acquire_default(&dir) {
                    Ok(lock) => lock,
                    Err(e) => {
                        self.status_message = Some(e.to_string());
                        return;
                    }
                };
                self.list = load_store(&dir, &self.config);
                let removed = todo_ops::clear_all(&mut self.list);
                if let Err(e) = clear_store(&dir, &self.config) {
                    self.status_message = Some(e.to_string());
                }
                removed
            }
        };
        if !removed.is_empty() {
            self.log_deleted("list cleared", &removed);
        }
        self.focus = Partition::Default;
        self.cursor = 0;
    }

    fn log_deleted(&self, description: &str, removed: &[TodoRecord]) {
        let Some(dir) = &self.data_dir else {
            return;
        };
        let body = serde_json::to_string_pretty(removed).unwrap_or_default();
        recovery::log_recovery(
            dir,
            RecoveryEntry::new(RecoveryCategory::Delete, description)
                .field("Count", removed.len().to_string())
                .body(body),
        );
    }

    // -----------------------------------------------------------------------
    // Move mode
    // -----------------------------------------------------------------------

    /// Number of drop slots a section offers for the current drag
    pub fn drop_slots(&self, ms: &MoveState, section: Partition) -> usize {
        let len = self.section_len(section);
        if section == ms.source.partition {
            len
        } else {
            len + 1
        }
    }

    /// The list as it would look if the drag were dropped now
    pub fn move_preview(&self) -> Option<TodoList> {
        let ms = self.move_state.as_ref()?;
        let mut preview = self.list.clone();
        apply_drag(&mut preview, &ms.drag());
        Some(preview)
    }

    /// Drop the dragged todo at the current slot and write the result through
    pub fn commit_move(&mut self) {
        let Some(ms) = self.move_state.take() else {
            return;
        };
        let drag = ms.drag();
        let id = ms.id.clone();
        self.mutate(|list| {
            // The store may have changed under us; only drop if the source
            // slot still holds the dragged todo.
            let at_source = partition(&list.todos)
                .at(drag.source.partition, drag.source.index)
                .map(|t| t.id.clone());
            if at_source.as_deref() != Some(id.as_str()) {
                return Err(todo_ops::TodoError::NotFound(id.clone()));
            }
            apply_drag(list, &drag);
            Ok(())
        });
        self.mode = Mode::Navigate;
        self.select_id(&ms.id);
    }

    /// Abandon the drag. The list is left untouched.
    pub fn cancel_move(&mut self) {
        if let Some(ms) = self.move_state.take() {
            self.select_id(&ms.id);
        }
        self.mode = Mode::Navigate;
    }
}

/// Restore UI state from .state.json
pub fn restore_ui_state(app: &mut App) {
    use crate::io::state::read_ui_state;

    let Some(dir) = &app.data_dir else {
        return;
    };
    let Some(ui_state) = read_ui_state(dir) else {
        return;
    };
    app.show_add_panel = ui_state.show_add_panel;
    app.focus = ui_state.focus;
    app.cursor = ui_state.cursor;
    app.clamp_cursor();
}

/// Save UI state to .state.json
pub fn save_ui_state(app: &App) {
    use crate::io::state::{UiState, write_ui_state};

    let Some(dir) = &app.data_dir else {
        return;
    };
    let ui_state = UiState {
        show_add_panel: app.show_add_panel,
        focus: app.focus,
        cursor: app.cursor,
    };
    let _ = write_ui_state(dir, &ui_state);
}

/// Run the TUI application
pub fn run(data_dir: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let mut app = App::open(data_dir)?;

    // Restore saved UI state
    restore_ui_state(&mut app);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // Install panic hook to restore terminal on panic
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic_info);
    }));

    // Run event loop
    let result = run_event_loop(&mut terminal, &mut app);

    // Save UI state before exit
    save_ui_state(&app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut save_counter = 0u32;
    loop {
        terminal.draw(|frame| render::render(frame, app))?;

        if event::poll(Duration::from_millis(250))?
            && let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
        {
            input::handle_key(app, key);
            // Debounced state save: every ~5 key presses
            save_counter += 1;
            if save_counter >= 5 {
                save_ui_state(app);
                save_counter = 0;
            }
        }

        if app.should_quit {
            break;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::store_io::load_store;
    use tempfile::TempDir;

    fn todo(id: &str, text: &str, important: bool) -> TodoRecord {
        let mut t = TodoRecord::new(id.into(), text.into());
        t.important = important;
        t
    }

    fn sample_app() -> App {
        App::new(
            TodoList::new(vec![
                todo("1", "Buy milk", false),
                todo("2", "Pay rent", true),
                todo("3", "Walk dog", false),
            ]),
            Config::default(),
        )
    }

    #[test]
    fn cursor_walks_across_sections() {
        let mut app = sample_app();
        app.focus = Partition::Important;
        app.cursor = 0;
        assert_eq!(app.cursor_id().as_deref(), Some("2"));

        app.cursor_down();
        assert_eq!(app.focus, Partition::Default);
        assert_eq!(app.cursor_id().as_deref(), Some("1"));
        app.cursor_down();
        assert_eq!(app.cursor_id().as_deref(), Some("3"));
        app.cursor_down();
        assert_eq!(app.cursor_id().as_deref(), Some("3"));

        app.cursor_up();
        app.cursor_up();
        assert_eq!(app.cursor_id().as_deref(), Some("2"));
        assert_eq!(app.cursor_row(), 0);
    }

    #[test]
    fn clamp_moves_focus_off_empty_important() {
        let mut app = App::new(
            TodoList::new(vec![todo("1", "Buy milk", false)]),
            Config::default(),
        );
        app.focus = Partition::Important;
        app.cursor = 4;
        app.clamp_cursor();
        assert_eq!(app.focus, Partition::Default);
        assert_eq!(app.cursor, 0);
    }

    #[test]
    fn select_id_follows_todo_between_sections() {
        let mut app = sample_app();
        app.mutate(|list| todo_ops::toggle_important(list, "3"));
        app.select_id("3");
        assert_eq!(app.focus, Partition::Important);
        assert_eq!(app.cursor, 1);
    }

    #[test]
    fn mutate_writes_through_to_store() {
        let dir = TempDir::new().unwrap();
        let mut app = App::open(dir.path()).unwrap();
        let id = app.mutate(|list| Ok(todo_ops::add_todo(list, "Buy milk")));
        assert_eq!(id, Some(Some("1".to_string())));

        let on_disk = load_store(dir.path(), &app.config);
        assert_eq!(on_disk, app.list);
        assert_eq!(on_disk.todos[0].text, "Buy milk");
    }

    #[test]
    fn mutate_picks_up_changes_made_elsewhere() {
        let dir = TempDir::new().unwrap();
        let config = Config::default();
        let mut app = App::open(dir.path()).unwrap();

        // Another process adds a todo after the TUI loaded
        let mut other = TodoList::default();
        todo_ops::add_todo(&mut other, "From the CLI");
        save_store(dir.path(), &config, &other).unwrap();

        app.mutate(|list| Ok(todo_ops::add_todo(list, "From the TUI")));
        let texts: Vec<&str> = app.list.todos.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(texts, vec!["From the CLI", "From the TUI"]);
    }

    #[test]
    fn mutate_unknown_id_is_silent() {
        let mut app = sample_app();
        let before = app.list.clone();
        assert!(app.mutate(|list| todo_ops::toggle_complete(list, "99")).is_none());
        assert_eq!(app.list, before);
        assert!(app.status_message.is_none());
    }

    #[test]
    fn delete_logs_recovery_entry() {
        let dir = TempDir::new().unwrap();
        let mut app = App::open(dir.path()).unwrap();
        app.mutate(|list| Ok(todo_ops::add_todo(list, "Buy milk")));
        app.delete_cursor_todo();
        assert!(app.list.is_empty());

        let entries = recovery::read_recovery_entries(dir.path(), None);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].category, RecoveryCategory::Delete);
        assert!(entries[0].body.contains("Buy milk"));
    }

    #[test]
    fn clear_all_removes_store_file() {
        let dir = TempDir::new().unwrap();
        let mut app = App::open(dir.path()).unwrap();
        app.mutate(|list| Ok(todo_ops::add_todo(list, "Buy milk")));
        assert!(dir.path().join("todos.json").exists());

        app.clear_all();
        assert!(app.list.is_empty());
        assert!(!dir.path().join("todos.json").exists());
    }

    #[test]
    fn ui_state_round_trips_through_data_dir() {
        let dir = TempDir::new().unwrap();
        let mut app = App::open(dir.path()).unwrap();
        app.mutate(|list| Ok(todo_ops::add_todo(list, "Buy milk")));
        app.mutate(|list| Ok(todo_ops::add_todo(list, "Walk dog")));
        app.show_add_panel = true;
        app.cursor = 1;
        save_ui_state(&app);

        let mut reopened = App::open(dir.path()).unwrap();
        assert!(!reopened.show_add_panel);
        restore_ui_state(&mut reopened);
        assert!(reopened.show_add_panel);
        assert_eq!(reopened.cursor, 1);
    }
}
