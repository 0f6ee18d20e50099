//! Task Repository - Core CRUD Operations
//!
//! SQLite-backed implementation for Task CRUD operations.
//! Position management lives in `task_positioning`.

use async_trait::async_trait;
use rusqlite::{params, Row};

use super::db::DbConnection;
use super::task_positioning::TaskPositioningOperations;
use super::traits::{Repository, SearchableRepository};
use crate::domain::{DomainError, DomainResult, Priority, Task};

const TASK_COLUMNS: &str = "id, text, completed, owner_id, priority, position, created_at, updated_at";

/// SQLite implementation of Task repository
pub struct TaskRepository {
    pub(super) conn: DbConnection,
}

impl TaskRepository {
    pub fn new(conn: DbConnection) -> Self {
        Self { conn }
    }

    /// All of one user's tasks, board-ordered
    pub async fn list_by_owner(&self, owner_id: u32) -> DomainResult<Vec<Task>> {
        let conn = self.conn.lock().await;
        let query = format!(
            "SELECT {} FROM tasks WHERE owner_id = ?1 ORDER BY priority, position, id",
            TASK_COLUMNS
        );
        let mut stmt = conn
            .prepare(&query)
            .map_err(|e| DomainError::Internal(e.to_string()))?;
        let rows = stmt
            .query_map(params![owner_id], row_to_task)
            .map_err(|e| DomainError::Internal(e.to_string()))?;

        let mut tasks = Vec::new();
        for row in rows {
            tasks.push(row.map_err(|e| DomainError::Internal(e.to_string()))?);
        }
        Ok(tasks)
    }
}

pub(super) fn row_to_task(row: &Row<'_>) -> rusqlite::Result<Task> {
    Ok(Task {
        id: row.get(0)?,
        text: row.get(1)?,
        completed: row.get(2)?,
        owner_id: row.get(3)?,
        priority: Priority::from_str(&row.get::<_, String>(4)?),
        position: row.get(5)?,
        created_at: row.get(6)?,
        updated_at: row.get(7)?,
    })
}

#[async_trait]
impl Repository<Task> for TaskRepository {
    async fn create(&self, entity: &Task) -> DomainResult<Task> {
        // New tasks rank after their column's current tail
        let position = self.next_position(entity.owner_id, entity.priority).await?;

        let conn = self.conn.lock().await;
        let now = chrono::Utc::now().timestamp_millis();
        conn.execute(
            "INSERT INTO tasks (text, completed, owner_id, priority, position, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?6)",
            params![
                entity.text,
                entity.completed,
                entity.owner_id,
                entity.priority.as_str(),
                position,
                now
            ],
        )
        .map_err(|e| DomainError::Internal(e.to_string()))?;

        let mut created = entity.clone();
        created.id = conn.last_insert_rowid() as u32;
        created.position = position;
        created.created_at = Some(now);
        created.updated_at = Some(now);
        Ok(created)
    }

    async fn find_by_id(&self, id: u32) -> DomainResult<Option<Task>> {
        let conn = self.conn.lock().await;
        let query = format!("SELECT {} FROM tasks WHERE id = ?1", TASK_COLUMNS);
        let mut stmt = conn
            .prepare(&query)
            .map_err(|e| DomainError::Internal(e.to_string()))?;
        let mut rows = stmt
            .query(params![id])
            .map_err(|e| DomainError::Internal(e.to_string()))?;

        if let Ok(Some(row)) = rows.next() {
            Ok(Some(row_to_task(row).map_err(|e| DomainError::Internal(e.to_string()))?))
        } else {
            Ok(None)
        }
    }

    async fn list(&self) -> DomainResult<Vec<Task>> {
        let conn = self.conn.lock().await;
        let query = format!(
            "SELECT {} FROM tasks ORDER BY owner_id, priority, position, id",
            TASK_COLUMNS
        );
        let mut stmt = conn
            .prepare(&query)
            .map_err(|e| DomainError::Internal(e.to_string()))?;
        let rows = stmt
            .query_map([], row_to_task)
            .map_err(|e| DomainError::Internal(e.to_string()))?;

        let mut tasks = Vec::new();
        for row in rows {
            tasks.push(row.map_err(|e| DomainError::Internal(e.to_string()))?);
        }
        Ok(tasks)
    }

    async fn update(&self, entity: &Task) -> DomainResult<Task> {
        let conn = self.conn.lock().await;
        let now = chrono::Utc::now().timestamp_millis();
        let changed = conn
            .execute(
                "UPDATE tasks SET text = ?1, completed = ?2, priority = ?3, position = ?4, updated_at = ?5
                 WHERE id = ?6",
                params![
                    entity.text,
                    entity.completed,
                    entity.priority.as_str(),
                    entity.position,
                    now,
                    entity.id
                ],
            )
            .map_err(|e| DomainError::Internal(e.to_string()))?;

        if changed == 0 {
            return Err(DomainError::NotFound(format!("task {}", entity.id)));
        }

        let mut updated = entity.clone();
        updated.updated_at = Some(now);
        Ok(updated)
    }

    async fn delete(&self, id: u32) -> DomainResult<()> {
        let conn = self.conn.lock().await;
        conn.execute("DELETE FROM tasks WHERE id = ?1", params![id])
            .map_err(|e| DomainError::Internal(e.to_string()))?;
        Ok(())
    }
}

#[async_trait]
impl SearchableRepository<Task> for TaskRepository {
    async fn search(&self, query: &str) -> DomainResult<Vec<Task>> {
        let conn = self.conn.lock().await;
        let sql = format!(
            "SELECT {} FROM tasks WHERE lower(text) LIKE '%' || lower(?1) || '%'
             ORDER BY owner_id, priority, position, id",
            TASK_COLUMNS
        );
        let mut stmt = conn
            .prepare(&sql)
            .map_err(|e| DomainError::Internal(e.to_string()))?;
        let rows = stmt
            .query_map(params![query], row_to_task)
            .map_err(|e| DomainError::Internal(e.to_string()))?;

        let mut tasks = Vec::new();
        for row in rows {
            tasks.push(row.map_err(|e| DomainError::Internal(e.to_string()))?);
        }
        Ok(tasks)
    }
}
