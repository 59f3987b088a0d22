use crate::model::todo::{Partition, TodoRecord};

/// The two section views of a todo sequence, each in canonical order.
#[derive(Debug, Clone, Default)]
pub struct Partitions<'a> {
    pub important: Vec<&'a TodoRecord>,
    pub default: Vec<&'a TodoRecord>,
}

impl<'a> Partitions<'a> {
    pub fn get(&self, partition: Partition) -> &[&'a TodoRecord] {
        match partition {
            Partition::Important => &self.important,
            Partition::Default => &self.default,
        }
    }

    pub fn len(&self, partition: Partition) -> usize {
        self.get(partition).len()
    }

    pub fn is_empty(&self) -> bool {
        self.important.is_empty() && self.default.is_empty()
    }

    /// Todo at `index` within a section
    pub fn at(&self, partition: Partition, index: usize) -> Option<&'a TodoRecord> {
        self.get(partition).get(index).copied()
    }

    /// Section and index of the todo with `id`
    pub fn locate(&self, id: &str) -> Option<(Partition, usize)> {
        [Partition::Important, Partition::Default]
            .into_iter()
            .find_map(|p| {
                self.get(p)
                    .iter()
                    .position(|t| t.id == id)
                    .map(|idx| (p, idx))
            })
    }
}

/// Split a todo sequence by the `important` flag, preserving relative order.
pub fn partition(todos: &[TodoRecord]) -> Partitions<'_> {
    let mut parts = Partitions::default();
    for todo in todos {
        match todo.partition() {
            Partition::Important => parts.important.push(todo),
            Partition::Default => parts.default.push(todo),
        }
    }
    parts
}

/// IDs of one section, in canonical order
pub fn partition_ids(todos: &[TodoRecord], which: Partition) -> Vec<String> {
    todos
        .iter()
        .filter(|t| t.partition() == which)
        .map(|t| t.id.clone())
        .collect()
}
