//! Session Layer
//!
//! Client-side session lifecycle: login/logout through [`AuthService`], and
//! background expiry enforcement through [`SessionWatcher`]. Both talk to the
//! persisted session record only through the [`SessionStore`] trait, so the
//! SQLite-backed store and the in-memory test store are interchangeable.

mod auth;
mod memory;
pub mod validation;
mod watcher;

pub use auth::{hash_password, AuthService};
pub use memory::MemorySessionStore;
pub use watcher::{SessionWatcher, WatchHandle, WATCH_INTERVAL};

use async_trait::async_trait;

use crate::domain::DomainResult;

/// Read/write access to the single persisted session record
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// The raw record, if a session is persisted
    async fn get(&self) -> DomainResult<Option<String>>;

    /// Persist a record, replacing any existing one
    async fn set(&self, raw: &str) -> DomainResult<()>;

    /// Remove the record. Clearing an absent record is not an error.
    async fn clear(&self) -> DomainResult<()>;
}

/// Session lifecycle notifications
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    /// The session passed its expiry (or its record was unreadable) and was
    /// ended. Emitted exactly once per session.
    Expired,
}

/// Current time in unix milliseconds
pub fn now_ms() -> i64 {
    chrono::Utc::now().timestamp_millis()
}
