use crossterm::event::{KeyCode, KeyEvent};

use crate::model::Partition;
use crate::ops::reorder::DragLocation;
use crate::tui::app::{App, Mode, MoveState};

/// Pick up the todo under the cursor
pub(super) fn enter_move_mode(app: &mut App) {
    let (Some(source), Some(id)) = (app.cursor_location(), app.cursor_id()) else {
        return;
    };
    app.move_state = Some(MoveState {
        id,
        source,
        dest: source,
    });
    app.mode = Mode::Move;
}

pub(super) fn handle_move(app: &mut App, key: KeyEvent) {
    match key.code {
        // Drop
        KeyCode::Enter | KeyCode::Char('m') => app.commit_move(),
        // Cancel: the drag ends with no destination
        KeyCode::Esc => app.cancel_move(),

        KeyCode::Char('j') | KeyCode::Down => step_drop_slot(app, true),
        KeyCode::Char('k') | KeyCode::Up => step_drop_slot(app, false),
        KeyCode::Char('g') | KeyCode::Home => {
            if let Some(mut ms) = app.move_state.take() {
                ms.dest = DragLocation::new(Partition::Important, 0);
                app.move_state = Some(ms);
            }
        }
        KeyCode::Char('G') | KeyCode::End => {
            if let Some(mut ms) = app.move_state.take() {
                let last = app.drop_slots(&ms, Partition::Default).saturating_sub(1);
                ms.dest = DragLocation::new(Partition::Default, last);
                app.move_state = Some(ms);
            }
        }
        _ => {}
    }
}

/// Move the drop slot one step, crossing between sections at the seam.
/// Important slots come first, then Tasks slots.
fn step_drop_slot(app: &mut App, down: bool) {
    let Some(mut ms) = app.move_state.take() else {
        return;
    };
    let important_slots = app.drop_slots(&ms, Partition::Important);
    let default_slots = app.drop_slots(&ms, Partition::Default);
    let slots = |p: Partition| match p {
        Partition::Important => important_slots,
        Partition::Default => default_slots,
    };

    let DragLocation { partition, index } = ms.dest;
    ms.dest = if down {
        if index + 1 < slots(partition) {
            DragLocation::new(partition, index + 1)
        } else if partition == Partition::Important && default_slots > 0 {
            DragLocation::new(Partition::Default, 0)
        } else {
            ms.dest
        }
    } else if index > 0 {
        DragLocation::new(partition, index - 1)
    } else if partition == Partition::Default && important_slots > 0 {
        DragLocation::new(Partition::Important, important_slots - 1)
    } else {
        ms.dest
    };
    app.move_state = Some(ms);
}
