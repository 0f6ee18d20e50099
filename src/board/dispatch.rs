//! Drop Dispatch
//!
//! Maps a completed drag gesture onto the right engine operation. The engine
//! itself never decides between reorder and cross-column move; that choice is
//! made here by comparing the source and drop-target column identity.

use dragdrop_core::{DragPayload, DropEvent};
use log::debug;

use super::reorder::{move_between_columns, reorder_within_column, PriorityChange};
use super::PriorityBoard;
use crate::domain::Priority;

/// Changes a drop produced, for the persistence collaborator
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DragChanges {
    pub priority_changes: Vec<PriorityChange>,
    pub reordered_columns: Vec<Priority>,
}

impl DragChanges {
    pub fn is_empty(&self) -> bool {
        self.priority_changes.is_empty() && self.reordered_columns.is_empty()
    }
}

/// New board state plus the change summary
#[derive(Debug, Clone, PartialEq)]
pub struct DragResult {
    pub board: PriorityBoard,
    pub changes: DragChanges,
}

/// Apply a drop to the board.
///
/// Same column and the drop target is a task: in-column reorder. Different
/// columns: cross-column move, whether the target is a task or the column
/// itself. Same column but the target is the column body: nothing to do
/// (the task is already there).
pub fn dispatch_drag(board: &PriorityBoard, drop: &DropEvent<Priority>) -> DragResult {
    let source = drop.source_priority;
    let target_priority = drop.target.priority();

    if source == target_priority {
        if let DragPayload::Task { id: target_id, .. } = drop.target {
            debug!("reorder task {} within {:?}", drop.task_id, source);
            let outcome = reorder_within_column(board, source, drop.task_id, target_id);
            return DragResult {
                board: outcome.board,
                changes: DragChanges {
                    priority_changes: Vec::new(),
                    reordered_columns: outcome.reordered_column.into_iter().collect(),
                },
            };
        }
        // Dropped on its own column's body
        return DragResult {
            board: board.clone(),
            changes: DragChanges::default(),
        };
    }

    debug!("move task {} from {:?} to {:?}", drop.task_id, source, target_priority);
    let outcome = move_between_columns(board, source, target_priority, drop.task_id);
    DragResult {
        board: outcome.board,
        changes: DragChanges {
            priority_changes: outcome.change.into_iter().collect(),
            reordered_columns: outcome.reordered_columns,
        },
    }
}
