//! Session Repository
//!
//! SQLite-backed [`SessionStore`]: one row holding the current session
//! record, keyed to id 1 so a second session can never accumulate.

use async_trait::async_trait;
use rusqlite::params;

use super::db::DbConnection;
use crate::domain::{DomainError, DomainResult};
use crate::session::SessionStore;

pub struct SessionRepository {
    conn: DbConnection,
}

impl SessionRepository {
    pub fn new(conn: DbConnection) -> Self {
        Self { conn }
    }
}

#[async_trait]
impl SessionStore for SessionRepository {
    async fn get(&self) -> DomainResult<Option<String>> {
        let conn = self.conn.lock().await;
        let mut stmt = conn
            .prepare("SELECT record FROM session WHERE id = 1")
            .map_err(|e| DomainError::Internal(e.to_string()))?;
        let mut rows = stmt
            .query([])
            .map_err(|e| DomainError::Internal(e.to_string()))?;

        if let Ok(Some(row)) = rows.next() {
            let record: String = row.get(0).map_err(|e| DomainError::Internal(e.to_string()))?;
            Ok(Some(record))
        } else {
            Ok(None)
        }
    }

    async fn set(&self, raw: &str) -> DomainResult<()> {
        let conn = self.conn.lock().await;
        conn.execute(
            "INSERT INTO session (id, record) VALUES (1, ?1)
             ON CONFLICT(id) DO UPDATE SET record = excluded.record",
            params![raw],
        )
        .map_err(|e| DomainError::Internal(e.to_string()))?;
        Ok(())
    }

    async fn clear(&self) -> DomainResult<()> {
        let conn = self.conn.lock().await;
        conn.execute("DELETE FROM session WHERE id = 1", [])
            .map_err(|e| DomainError::Internal(e.to_string()))?;
        Ok(())
    }
}
