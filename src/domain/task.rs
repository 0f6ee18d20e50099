//! Task Entity
//!
//! A to-do item owned by one user, ranked within a priority column.

use serde::{Deserialize, Serialize};

use super::entity::Entity;
use super::priority::Priority;

/// A to-do item
///
/// Invariant: within one `(owner_id, priority)` column, `position` values are
/// contiguous integers starting at 0. The board operations and the repository
/// reindexing keep this true after every mutation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    /// Unique identifier
    pub id: u32,
    /// Task text content
    pub text: String,
    /// Completion status
    pub completed: bool,
    /// Owning user ID (tasks are isolated per user)
    pub owner_id: u32,
    /// Board column
    pub priority: Priority,
    /// Rank within the priority column (for ordering)
    pub position: i32,
    pub created_at: Option<i64>,
    pub updated_at: Option<i64>,
}

impl Task {
    /// Create a new unprioritized task with default values
    pub fn new(id: u32, text: String, owner_id: u32) -> Self {
        Self {
            id,
            text,
            completed: false,
            owner_id,
            priority: Priority::None,
            position: 0,
            created_at: None,
            updated_at: None,
        }
    }

    /// Create a task directly in a priority column at a given rank
    pub fn with_priority(id: u32, text: String, owner_id: u32, priority: Priority, position: i32) -> Self {
        Self {
            priority,
            position,
            ..Self::new(id, text, owner_id)
        }
    }
}

impl Entity for Task {
    type Id = u32;

    fn id(&self) -> Self::Id {
        self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_task_creation() {
        let task = Task::new(1, "Test task".to_string(), 42);
        assert_eq!(task.id(), 1);
        assert_eq!(task.owner_id, 42);
        assert_eq!(task.priority, Priority::None);
        assert!(!task.completed);
    }

    #[test]
    fn test_task_with_priority() {
        let task = Task::with_priority(2, "Ranked".to_string(), 42, Priority::High, 3);
        assert_eq!(task.priority, Priority::High);
        assert_eq!(task.position, 3);
    }
}
