//! User Repository
//!
//! SQLite-backed implementation of Repository<User>.

use async_trait::async_trait;
use rusqlite::{params, Row};

use super::db::DbConnection;
use super::traits::Repository;
use crate::domain::{DomainError, DomainResult, User};

pub struct UserRepository {
    conn: DbConnection,
}

impl UserRepository {
    pub fn new(conn: DbConnection) -> Self {
        Self { conn }
    }

    /// Look up an account by email (emails are unique)
    pub async fn find_by_email(&self, email: &str) -> DomainResult<Option<User>> {
        let conn = self.conn.lock().await;
        let mut stmt = conn
            .prepare("SELECT id, email, password_hash, created_at FROM users WHERE email = ?1")
            .map_err(|e| DomainError::Internal(e.to_string()))?;
        let mut rows = stmt
            .query(params![email])
            .map_err(|e| DomainError::Internal(e.to_string()))?;

        if let Ok(Some(row)) = rows.next() {
            Ok(Some(row_to_user(row).map_err(|e| DomainError::Internal(e.to_string()))?))
        } else {
            Ok(None)
        }
    }
}

fn row_to_user(row: &Row<'_>) -> rusqlite::Result<User> {
    Ok(User {
        id: row.get(0)?,
        email: row.get(1)?,
        password_hash: row.get(2)?,
        created_at: row.get(3)?,
    })
}

#[async_trait]
impl Repository<User> for UserRepository {
    async fn create(&self, entity: &User) -> DomainResult<User> {
        let conn = self.conn.lock().await;
        let now = chrono::Utc::now().timestamp_millis();
        conn.execute(
            "INSERT INTO users (email, password_hash, created_at) VALUES (?1, ?2, ?3)",
            params![entity.email, entity.password_hash, now],
        )
        .map_err(|e| DomainError::Internal(e.to_string()))?;

        let mut created = entity.clone();
        created.id = conn.last_insert_rowid() as u32;
        created.created_at = Some(now);
        Ok(created)
    }

    async fn find_by_id(&self, id: u32) -> DomainResult<Option<User>> {
        let conn = self.conn.lock().await;
        let mut stmt = conn
            .prepare("SELECT id, email, password_hash, created_at FROM users WHERE id = ?1")
            .map_err(|e| DomainError::Internal(e.to_string()))?;
        let mut rows = stmt
            .query(params![id])
            .map_err(|e| DomainError::Internal(e.to_string()))?;

        if let Ok(Some(row)) = rows.next() {
            Ok(Some(row_to_user(row).map_err(|e| DomainError::Internal(e.to_string()))?))
        } else {
            Ok(None)
        }
    }

    async fn list(&self) -> DomainResult<Vec<User>> {
        let conn = self.conn.lock().await;
        let mut stmt = conn
            .prepare("SELECT id, email, password_hash, created_at FROM users ORDER BY id")
            .map_err(|e| DomainError::Internal(e.to_string()))?;
        let rows = stmt
            .query_map([], row_to_user)
            .map_err(|e| DomainError::Internal(e.to_string()))?;

        let mut users = Vec::new();
        for row in rows {
            users.push(row.map_err(|e| DomainError::Internal(e.to_string()))?);
        }
        Ok(users)
    }

    async fn update(&self, entity: &User) -> DomainResult<User> {
        let conn = self.conn.lock().await;
        let changed = conn
            .execute(
                "UPDATE users SET email = ?1, password_hash = ?2 WHERE id = ?3",
                params![entity.email, entity.password_hash, entity.id],
            )
            .map_err(|e| DomainError::Internal(e.to_string()))?;

        if changed == 0 {
            return Err(DomainError::NotFound(format!("user {}", entity.id)));
        }
        Ok(entity.clone())
    }

    async fn delete(&self, id: u32) -> DomainResult<()> {
        let conn = self.conn.lock().await;
        conn.execute("DELETE FROM users WHERE id = ?1", params![id])
            .map_err(|e| DomainError::Internal(e.to_string()))?;
        Ok(())
    }
}
