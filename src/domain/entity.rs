//! Domain Layer - Core Entity Trait
//!
//! The minimal contract the repositories need from an entity: a unique id
//! and thread-safety. Tasks and users both satisfy it.

use serde::{Deserialize, Serialize};

/// Something the repositories can store and look up by id
pub trait Entity: Sized + Send + Sync + Clone {
    /// The entity's unique identifier type
    type Id: Copy + Eq + std::hash::Hash + Send + Sync;

    fn id(&self) -> Self::Id;
}

/// Result type for domain and repository operations
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level errors, serializable so callers across an IPC boundary can
/// receive them as data
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum DomainError {
    NotFound(String),
    InvalidInput(String),
    Conflict(String),
    Internal(String),
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DomainError::NotFound(msg) => write!(f, "Not found: {}", msg),
            DomainError::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
            DomainError::Conflict(msg) => write!(f, "Conflict: {}", msg),
            DomainError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for DomainError {}
