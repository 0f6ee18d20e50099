//! Task Positioning Operations
//!
//! Keeps the per-column position invariant (contiguous from 0) true in the
//! database, and writes reorder-engine results back to durable storage.

use async_trait::async_trait;
use rusqlite::params;

use crate::board::{DragChanges, PriorityBoard};
use crate::domain::{DomainError, DomainResult, Priority};

/// Trait for task positioning operations
#[async_trait]
pub trait TaskPositioningOperations {
    /// Next free rank in a column (used in create)
    async fn next_position(&self, owner_id: u32, priority: Priority) -> DomainResult<i32>;

    /// Rewrite a column's positions to be sequential (0, 1, 2, ...)
    async fn reindex_column(&self, owner_id: u32, priority: Priority) -> DomainResult<()>;

    /// Persist the outcome of a drag: every column the engine reported as
    /// changed is written back with its new priority/position values.
    async fn apply_drag_changes(
        &self,
        owner_id: u32,
        board: &PriorityBoard,
        changes: &DragChanges,
    ) -> DomainResult<()>;
}

#[async_trait]
impl TaskPositioningOperations for super::task_repo::TaskRepository {
    async fn next_position(&self, owner_id: u32, priority: Priority) -> DomainResult<i32> {
        let conn = self.conn.lock().await;
        let mut stmt = conn
            .prepare("SELECT COALESCE(MAX(position), -1) + 1 FROM tasks WHERE owner_id = ?1 AND priority = ?2")
            .map_err(|e| DomainError::Internal(e.to_string()))?;
        stmt.query_row(params![owner_id, priority.as_str()], |row| row.get(0))
            .map_err(|e| DomainError::Internal(e.to_string()))
    }

    async fn reindex_column(&self, owner_id: u32, priority: Priority) -> DomainResult<()> {
        let conn = self.conn.lock().await;

        let mut ids = Vec::new();
        {
            let mut stmt = conn
                .prepare("SELECT id FROM tasks WHERE owner_id = ?1 AND priority = ?2 ORDER BY position, id")
                .map_err(|e| DomainError::Internal(e.to_string()))?;
            let mut rows = stmt
                .query(params![owner_id, priority.as_str()])
                .map_err(|e| DomainError::Internal(e.to_string()))?;
            while let Ok(Some(row)) = rows.next() {
                let id: u32 = row.get(0).map_err(|e| DomainError::Internal(e.to_string()))?;
                ids.push(id);
            }
        }

        for (new_pos, id) in ids.iter().enumerate() {
            conn.execute(
                "UPDATE tasks SET position = ?1, updated_at = ?2 WHERE id = ?3",
                params![new_pos as i32, chrono::Utc::now().timestamp_millis(), *id],
            )
            .map_err(|e| DomainError::Internal(e.to_string()))?;
        }

        Ok(())
    }

    async fn apply_drag_changes(
        &self,
        owner_id: u32,
        board: &PriorityBoard,
        changes: &DragChanges,
    ) -> DomainResult<()> {
        if changes.is_empty() {
            return Ok(());
        }

        let conn = self.conn.lock().await;
        let now = chrono::Utc::now().timestamp_millis();
        for &priority in &changes.reordered_columns {
            for (index, task) in board.column(priority).iter().enumerate() {
                conn.execute(
                    "UPDATE tasks SET priority = ?1, position = ?2, updated_at = ?3
                     WHERE id = ?4 AND owner_id = ?5",
                    params![priority.as_str(), index as i32, now, task.id, owner_id],
                )
                .map_err(|e| DomainError::Internal(e.to_string()))?;
            }
        }
        Ok(())
    }
}
