//! Repository Layer
//!
//! Data access abstractions and implementations.

mod db;
mod session_repo;
mod task_positioning;
mod task_repo;
mod traits;
mod user_repo;

#[cfg(test)]
mod tests;

pub use db::{init_db, DbConnection};
pub use session_repo::SessionRepository;
pub use task_positioning::TaskPositioningOperations;
pub use task_repo::TaskRepository;
pub use traits::{Repository, SearchableRepository};
pub use user_repo::UserRepository;
