//! Taskboard Core
//!
//! Layered architecture:
//! - domain: Core entities and business rules
//! - board: Priority board, reorder engine, drop dispatch
//! - repository: Data access abstractions and implementations
//! - session: Auth service, session store, expiry watcher
//! - store: User-scoped task operations
//! - search: Autocomplete search and debouncing
//!
//! The drag gesture state machine lives in the `dragdrop-core` crate; this
//! crate consumes its [`dragdrop_core::DropEvent`] in [`board::dispatch_drag`].

pub mod board;
pub mod domain;
pub mod repository;
pub mod search;
pub mod session;
pub mod store;

pub use board::{dispatch_drag, move_between_columns, reorder_within_column, DragResult, PriorityBoard};
pub use domain::{DomainError, DomainResult, Priority, Session, Task, TokenClaims, User};
pub use session::{AuthService, SessionEvent, SessionStore, SessionWatcher, WatchHandle};
pub use store::{TaskStats, TaskStore};
