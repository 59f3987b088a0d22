//! Drag-and-drop reconciliation.
//!
//! A drag is expressed in section coordinates (which section, which index in
//! that section). Sections are views over the canonical list, so applying a
//! drag means computing the new order inside the affected section(s) and
//! folding that back into canonical order.

use serde::{Deserialize, Serialize};

use crate::model::list::TodoList;
use crate::model::todo::{Partition, TodoRecord};
use crate::ops::partition::partition_ids;

/// A position inside one section
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DragLocation {
    pub partition: Partition,
    pub index: usize,
}

impl DragLocation {
    pub fn new(partition: Partition, index: usize) -> Self {
        DragLocation { partition, index }
    }
}

/// The outcome of a drag gesture. No destination means the drag was dropped
/// outside any section and is discarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DragResult {
    pub source: DragLocation,
    pub destination: Option<DragLocation>,
}

impl DragResult {
    pub fn new(source: DragLocation, destination: DragLocation) -> Self {
        DragResult {
            source,
            destination: Some(destination),
        }
    }

    pub fn cancelled(source: DragLocation) -> Self {
        DragResult {
            source,
            destination: None,
        }
    }
}

/// Apply a drag to the canonical list. Returns true if anything changed.
///
/// Out-of-range indices are clamped: a source index past the end picks the
/// last todo of the section, a destination index past the end appends.
pub fn apply_drag(list: &mut TodoList, drag: &DragResult) -> bool {
    let Some(dest) = drag.destination else {
        return false;
    };
    let src = drag.source;

    let mut source_ids = partition_ids(&list.todos, src.partition);
    if source_ids.is_empty() {
        return false;
    }
    let src_index = src.index.min(source_ids.len() - 1);

    if src.partition == dest.partition {
        let dest_index = dest.index.min(source_ids.len() - 1);
        if src_index == dest_index {
            return false;
        }
        let moved = source_ids.remove(src_index);
        source_ids.insert(dest_index, moved);
        splice_partition(&mut list.todos, src.partition, &source_ids);
        return true;
    }

    let moved_id = source_ids.remove(src_index);
    let dest_ids = partition_ids(&list.todos, dest.partition);
    let dest_index = dest.index.min(dest_ids.len());

    let Some(old_pos) = list.position(&moved_id) else {
        return false;
    };
    let mut moved = list.todos.remove(old_pos);
    moved.important = dest.partition.is_important();

    let canonical_pos = if let Some(next_id) = dest_ids.get(dest_index) {
        // Directly before the todo it now precedes
        list.position(next_id).unwrap_or(old_pos)
    } else if let Some(last_id) = dest_ids.last() {
        // Appended: directly after the section's last todo
        list.position(last_id).map_or(old_pos, |p| p + 1)
    } else {
        old_pos
    };
    list.todos.insert(canonical_pos.min(list.todos.len()), moved);
    true
}

/// Rewrite the members of one section to follow `new_order`, keeping them in
/// the canonical slots the section already occupied. Todos of the other
/// section do not move.
fn splice_partition(todos: &mut Vec<TodoRecord>, which: Partition, new_order: &[String]) {
    let slots: Vec<bool> = todos.iter().map(|t| t.partition() == which).collect();
    let (mut members, others): (Vec<TodoRecord>, Vec<TodoRecord>) = std::mem::take(todos)
        .into_iter()
        .partition(|t| t.partition() == which);

    let mut reordered = Vec::with_capacity(members.len());
    for id in new_order {
        if let Some(idx) = members.iter().position(|t| &t.id == id) {
            reordered.push(members.remove(idx));
        }
    }
    // Members missing from new_order keep their relative order at the end
    reordered.append(&mut members);

    let mut reordered = reordered.into_iter();
    let mut others = others.into_iter();
    for is_member in slots {
        let next = if is_member {
            reordered.next()
        } else {
            others.next()
        };
        todos.extend(next);
    }
}
