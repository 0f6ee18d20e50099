//! Priority Board
//!
//! The in-memory view the drag-and-drop board operates on: one ordered task
//! list per priority column. The reorder engine in [`reorder`] transforms a
//! board without mutating it; [`dispatch`] decides which engine operation a
//! drop maps to.

mod dispatch;
mod reorder;

pub use dispatch::{dispatch_drag, DragChanges, DragResult};
pub use reorder::{move_between_columns, reorder_within_column, MoveOutcome, PriorityChange, ReorderOutcome};

use crate::domain::{Priority, Task};

/// Tasks partitioned into priority columns
///
/// Invariants: every task appears in exactly one column, at the index equal
/// to its `position` field; positions within a column are contiguous from 0.
/// [`PriorityBoard::from_tasks`] normalizes arbitrary input into this shape.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PriorityBoard {
    high: Vec<Task>,
    medium: Vec<Task>,
    low: Vec<Task>,
    none: Vec<Task>,
}

impl PriorityBoard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Group tasks into columns ordered by stored position (ties broken by
    /// id, matching the repository's ordering) and renormalize positions.
    pub fn from_tasks(tasks: impl IntoIterator<Item = Task>) -> Self {
        let mut board = Self::new();
        for task in tasks {
            board.column_mut(task.priority).push(task);
        }
        for priority in Priority::ALL {
            let column = board.column_mut(priority);
            column.sort_by_key(|t| (t.position, t.id));
            renormalize(column, priority);
        }
        board
    }

    pub fn column(&self, priority: Priority) -> &[Task] {
        match priority {
            Priority::High => &self.high,
            Priority::Medium => &self.medium,
            Priority::Low => &self.low,
            Priority::None => &self.none,
        }
    }

    pub(crate) fn column_mut(&mut self, priority: Priority) -> &mut Vec<Task> {
        match priority {
            Priority::High => &mut self.high,
            Priority::Medium => &mut self.medium,
            Priority::Low => &mut self.low,
            Priority::None => &mut self.none,
        }
    }

    /// Find a task anywhere on the board
    pub fn find_task(&self, task_id: u32) -> Option<&Task> {
        Priority::ALL
            .iter()
            .flat_map(|p| self.column(*p).iter())
            .find(|t| t.id == task_id)
    }

    /// All tasks in column order, flattened high-to-none
    pub fn tasks(&self) -> Vec<Task> {
        Priority::ALL
            .iter()
            .flat_map(|p| self.column(*p).iter().cloned())
            .collect()
    }

    pub fn len(&self) -> usize {
        Priority::ALL.iter().map(|p| self.column(*p).len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Rewrite a column's position and priority fields to match its sequence
pub(crate) fn renormalize(column: &mut [Task], priority: Priority) {
    for (index, task) in column.iter_mut().enumerate() {
        task.position = index as i32;
        task.priority = priority;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn task(id: u32, priority: Priority, position: i32) -> Task {
        Task::with_priority(id, format!("task {}", id), 1, priority, position)
    }

    #[test]
    fn test_from_tasks_groups_and_sorts() {
        let board = PriorityBoard::from_tasks(vec![
            task(3, Priority::Medium, 1),
            task(1, Priority::High, 0),
            task(2, Priority::Medium, 0),
        ]);
        let medium: Vec<u32> = board.column(Priority::Medium).iter().map(|t| t.id).collect();
        assert_eq!(medium, vec![2, 3]);
        assert_eq!(board.column(Priority::High).len(), 1);
        assert_eq!(board.len(), 3);
    }

    #[test]
    fn test_from_tasks_renormalizes_gappy_positions() {
        let board = PriorityBoard::from_tasks(vec![
            task(1, Priority::Low, 7),
            task(2, Priority::Low, 3),
        ]);
        let positions: Vec<i32> = board.column(Priority::Low).iter().map(|t| t.position).collect();
        assert_eq!(positions, vec![0, 1]);
        let ids: Vec<u32> = board.column(Priority::Low).iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![2, 1]);
    }

    #[test]
    fn test_find_task() {
        let board = PriorityBoard::from_tasks(vec![task(5, Priority::None, 0)]);
        assert!(board.find_task(5).is_some());
        assert!(board.find_task(6).is_none());
    }
}
