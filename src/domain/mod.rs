//! Domain Layer
//!
//! Contains all domain entities and core abstractions.
//! This layer has NO external dependencies (except serde for serialization).

mod entity;
mod priority;
mod session;
mod task;
mod user;

pub use entity::{DomainError, DomainResult, Entity};
pub use priority::Priority;
pub use session::{Session, TokenClaims, SESSION_TTL_MS};
pub use task::Task;
pub use user::User;
