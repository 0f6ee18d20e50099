//! Reorder Engine
//!
//! Pure transformations of a [`PriorityBoard`] in response to a single drag
//! outcome. Both operations return a new board and report which columns
//! changed so a persistence collaborator can write the new ranks back.
//!
//! Missing ids never error: a stale snapshot racing a concurrent update is
//! normal here, and the safe degradation is to return the input unchanged.

use serde::{Deserialize, Serialize};

use super::{renormalize, PriorityBoard};
use crate::domain::Priority;

/// Result of an in-column reorder
#[derive(Debug, Clone, PartialEq)]
pub struct ReorderOutcome {
    pub board: PriorityBoard,
    /// Column whose ranks changed; None when the operation was a no-op
    pub reordered_column: Option<Priority>,
}

/// Record of a task changing column, for the persistence layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriorityChange {
    pub task_id: u32,
    pub from: Priority,
    pub to: Priority,
    pub new_position: i32,
}

/// Result of a cross-column move
#[derive(Debug, Clone, PartialEq)]
pub struct MoveOutcome {
    pub board: PriorityBoard,
    /// None when the task was absent from the source column
    pub change: Option<PriorityChange>,
    pub reordered_columns: Vec<Priority>,
}

/// Move a task to another rank within its column.
///
/// List-move semantics: the task is removed from its old index and inserted
/// at the index `target_id` occupied before the removal, then the column's
/// positions are renormalized to 0..n-1. Moving a task onto itself keeps the
/// order intact. If either id is absent the board is returned unchanged.
pub fn reorder_within_column(
    board: &PriorityBoard,
    column: Priority,
    moved_id: u32,
    target_id: u32,
) -> ReorderOutcome {
    let tasks = board.column(column);
    let old_index = tasks.iter().position(|t| t.id == moved_id);
    let new_index = tasks.iter().position(|t| t.id == target_id);

    let (Some(old_index), Some(new_index)) = (old_index, new_index) else {
        return ReorderOutcome {
            board: board.clone(),
            reordered_column: None,
        };
    };

    let mut board = board.clone();
    let column_tasks = board.column_mut(column);
    let moved = column_tasks.remove(old_index);
    column_tasks.insert(new_index, moved);
    renormalize(column_tasks, column);

    ReorderOutcome {
        board,
        reordered_column: Some(column),
    }
}

/// Move a task from one column to another.
///
/// The task is removed from the source column, retagged with the target
/// priority, and inserted at rank 0 of the target column (new arrivals always
/// rank first; fixed policy). Both columns are renormalized. If the task is
/// absent from the source column the board is returned unchanged with no
/// change record.
pub fn move_between_columns(
    board: &PriorityBoard,
    from: Priority,
    to: Priority,
    moved_id: u32,
) -> MoveOutcome {
    let Some(old_index) = board.column(from).iter().position(|t| t.id == moved_id) else {
        return MoveOutcome {
            board: board.clone(),
            change: None,
            reordered_columns: Vec::new(),
        };
    };

    let mut board = board.clone();
    let moved = board.column_mut(from).remove(old_index);
    renormalize(board.column_mut(from), from);

    let target = board.column_mut(to);
    target.insert(0, moved);
    renormalize(target, to);

    MoveOutcome {
        board,
        change: Some(PriorityChange {
            task_id: moved_id,
            from,
            to,
            new_position: 0,
        }),
        reordered_columns: vec![from, to],
    }
}
