//! Task Search
//!
//! Case-insensitive substring search over an in-memory task snapshot (the
//! autocomplete path), plus the debouncer that keeps per-keystroke searches
//! from piling up. Repository-level search (SQL LIKE) lives on
//! [`crate::repository::TaskRepository`].

use std::sync::Mutex;
use std::time::Duration;

use tokio::task::AbortHandle;

use crate::domain::Task;

/// Delay between the last keystroke and the search actually running
pub const SEARCH_DEBOUNCE_MS: u64 = 300;

/// Tasks whose text contains the query, case-insensitively.
/// A blank query matches nothing (an empty search box shows no suggestions).
pub fn search_tasks<'a>(tasks: &'a [Task], query: &str) -> Vec<&'a Task> {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return Vec::new();
    }
    tasks
        .iter()
        .filter(|t| t.text.to_lowercase().contains(&query))
        .collect()
}

/// The suggestion chosen when the user hits Enter: the first hit
pub fn first_match<'a>(tasks: &'a [Task], query: &str) -> Option<&'a Task> {
    search_tasks(tasks, query).into_iter().next()
}

/// Trailing-edge debouncer
///
/// Each call schedules the action after the delay and drops any action still
/// pending, so only the last call in a burst runs. Requires a tokio runtime.
pub struct Debouncer {
    delay: Duration,
    pending: Mutex<Option<AbortHandle>>,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: Mutex::new(None),
        }
    }

    /// Schedule `action`, replacing any previously scheduled one
    pub fn call<F>(&self, action: F)
    where
        F: FnOnce() + Send + 'static,
    {
        let delay = self.delay;
        let task = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            action();
        });
        let previous = self
            .pending
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .replace(task.abort_handle());
        if let Some(previous) = previous {
            previous.abort();
        }
    }

    /// Drop the pending action, if any. Idempotent.
    pub fn cancel(&self) {
        let previous = self
            .pending
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .take();
        if let Some(previous) = previous {
            previous.abort();
        }
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        self.cancel();
    }
}
