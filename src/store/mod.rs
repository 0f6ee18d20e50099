//! Task Store
//!
//! User-scoped task operations over the repository. Every mutation goes
//! through here so ownership checks and the position invariant are applied
//! in one place; nothing else writes tasks.

use std::sync::Arc;

use log::info;

use crate::board::{DragResult, PriorityBoard};
use crate::domain::{DomainError, DomainResult, Task};
use crate::repository::{Repository, TaskPositioningOperations, TaskRepository};

/// Per-user task counters (header display)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TaskStats {
    pub total: usize,
    pub active: usize,
    pub completed: usize,
}

pub struct TaskStore {
    tasks: Arc<TaskRepository>,
}

impl TaskStore {
    pub fn new(tasks: Arc<TaskRepository>) -> Self {
        Self { tasks }
    }

    /// Add a task for a user. Text is trimmed; empty text is rejected.
    pub async fn add_task(&self, owner_id: u32, text: &str) -> DomainResult<Task> {
        let text = text.trim();
        if text.is_empty() {
            return Err(DomainError::InvalidInput("task text cannot be empty".to_string()));
        }
        let created = self.tasks.create(&Task::new(0, text.to_string(), owner_id)).await?;
        info!("task {} created for user {}", created.id, owner_id);
        Ok(created)
    }

    /// Flip a task's completion status
    pub async fn toggle_task(&self, owner_id: u32, task_id: u32) -> DomainResult<Task> {
        let mut task = self.owned_task(owner_id, task_id).await?;
        task.completed = !task.completed;
        self.tasks.update(&task).await
    }

    /// Replace a task's text. Empty text is rejected.
    pub async fn update_task_text(&self, owner_id: u32, task_id: u32, text: &str) -> DomainResult<Task> {
        let text = text.trim();
        if text.is_empty() {
            return Err(DomainError::InvalidInput("task text cannot be empty".to_string()));
        }
        let mut task = self.owned_task(owner_id, task_id).await?;
        task.text = text.to_string();
        self.tasks.update(&task).await
    }

    /// Delete a task and close the position gap it leaves in its column
    pub async fn delete_task(&self, owner_id: u32, task_id: u32) -> DomainResult<()> {
        let task = self.owned_task(owner_id, task_id).await?;
        self.tasks.delete(task_id).await?;
        self.tasks.reindex_column(owner_id, task.priority).await
    }

    /// All of a user's tasks, board-ordered
    pub async fn user_tasks(&self, owner_id: u32) -> DomainResult<Vec<Task>> {
        self.tasks.list_by_owner(owner_id).await
    }

    pub async fn active_tasks(&self, owner_id: u32) -> DomainResult<Vec<Task>> {
        let mut tasks = self.user_tasks(owner_id).await?;
        tasks.retain(|t| !t.completed);
        Ok(tasks)
    }

    pub async fn completed_tasks(&self, owner_id: u32) -> DomainResult<Vec<Task>> {
        let mut tasks = self.user_tasks(owner_id).await?;
        tasks.retain(|t| t.completed);
        Ok(tasks)
    }

    pub async fn stats(&self, owner_id: u32) -> DomainResult<TaskStats> {
        let tasks = self.user_tasks(owner_id).await?;
        let completed = tasks.iter().filter(|t| t.completed).count();
        Ok(TaskStats {
            total: tasks.len(),
            active: tasks.len() - completed,
            completed,
        })
    }

    /// Snapshot of a user's tasks as a priority board
    pub async fn load_board(&self, owner_id: u32) -> DomainResult<PriorityBoard> {
        Ok(PriorityBoard::from_tasks(self.user_tasks(owner_id).await?))
    }

    /// Persist a dispatched drag result
    pub async fn apply_drag_result(&self, owner_id: u32, result: &DragResult) -> DomainResult<()> {
        self.tasks
            .apply_drag_changes(owner_id, &result.board, &result.changes)
            .await
    }

    /// Fetch a task, treating another user's task the same as a missing one
    async fn owned_task(&self, owner_id: u32, task_id: u32) -> DomainResult<Task> {
        match self.tasks.find_by_id(task_id).await? {
            Some(task) if task.owner_id == owner_id => Ok(task),
            _ => Err(DomainError::NotFound(format!("task {}", task_id))),
        }
    }
}
