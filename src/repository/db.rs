//! Database Connection and Setup
//!
//! Manages the SQLite connection and migrations. The connection is shared
//! behind a tokio mutex; SQLite itself is single-writer, so one connection
//! per process is enough here.

use rusqlite::Connection;
use std::path::Path;
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::domain::{DomainError, DomainResult};

/// Shared database connection handle
pub type DbConnection = Arc<Mutex<Connection>>;

/// Open (or create) the database and bring the schema up to date.
/// `:memory:` is accepted for tests.
pub async fn init_db(db_path: &Path) -> DomainResult<DbConnection> {
    let conn = Connection::open(db_path)
        .map_err(|e| DomainError::Internal(format!("failed to open db: {}", e)))?;

    run_migrations(&conn)?;

    Ok(Arc::new(Mutex::new(conn)))
}

/// Check if a column exists in a table
fn column_exists(conn: &Connection, table: &str, column: &str) -> bool {
    let query = format!("PRAGMA table_info({})", table);
    let Ok(mut stmt) = conn.prepare(&query) else {
        return false;
    };
    let Ok(mut rows) = stmt.query([]) else {
        return false;
    };
    while let Ok(Some(row)) = rows.next() {
        if let Ok(name) = row.get::<_, String>(1) {
            if name == column {
                return true;
            }
        }
    }
    false
}

/// Run database migrations
fn run_migrations(conn: &Connection) -> DomainResult<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS users (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            email TEXT NOT NULL UNIQUE,
            password_hash TEXT NOT NULL,
            created_at INTEGER
        )",
        [],
    )
    .map_err(|e| DomainError::Internal(e.to_string()))?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS tasks (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            text TEXT NOT NULL,
            completed INTEGER NOT NULL DEFAULT 0,
            owner_id INTEGER NOT NULL,
            created_at INTEGER,
            updated_at INTEGER
        )",
        [],
    )
    .map_err(|e| DomainError::Internal(e.to_string()))?;

    // Board migrations: priority/position were added when the priority board
    // shipped, so existing databases get them via guarded ALTERs
    if !column_exists(conn, "tasks", "priority") {
        conn.execute(
            "ALTER TABLE tasks ADD COLUMN priority TEXT NOT NULL DEFAULT 'none'",
            [],
        )
        .map_err(|e| DomainError::Internal(format!("failed to add priority: {}", e)))?;
    }

    if !column_exists(conn, "tasks", "position") {
        conn.execute(
            "ALTER TABLE tasks ADD COLUMN position INTEGER NOT NULL DEFAULT 0",
            [],
        )
        .map_err(|e| DomainError::Internal(format!("failed to add position: {}", e)))?;
    }

    // Single-row session record
    conn.execute(
        "CREATE TABLE IF NOT EXISTS session (
            id INTEGER PRIMARY KEY CHECK (id = 1),
            record TEXT NOT NULL
        )",
        [],
    )
    .map_err(|e| DomainError::Internal(e.to_string()))?;

    // Index for the per-user board queries
    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_tasks_owner_column ON tasks(owner_id, priority, position)",
        [],
    )
    .map_err(|e| DomainError::Internal(e.to_string()))?;

    Ok(())
}
