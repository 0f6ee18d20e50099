//! Drag Gesture State Machine
//!
//! Tracks a single drag gesture from press to drop without touching any UI
//! toolkit. The surrounding view layer feeds pointer events in and receives a
//! typed [`DropEvent`] out; everything in between (activation thresholds,
//! hover tracking, cancellation) lives here.
//!
//! Activation policy: mouse drags start after the pointer moves more than
//! [`DRAG_THRESHOLD_PX`] on either axis (distinguishes click from drag);
//! touch drags start after a [`LONG_PRESS_MS`] hold, cancelled if the finger
//! drifts more than [`TOUCH_TOLERANCE_PX`] before the hold completes.

use log::debug;
use serde::{Deserialize, Serialize};

/// Movement threshold in pixels to start a mouse drag
pub const DRAG_THRESHOLD_PX: i32 = 3;

/// Hold duration in milliseconds to start a touch drag
pub const LONG_PRESS_MS: i64 = 150;

/// Allowed finger drift in pixels while waiting for a long press
pub const TOUCH_TOLERANCE_PX: i32 = 10;

/// Input device that initiated the gesture
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerKind {
    Mouse,
    Touch,
}

/// What the pointer is currently over, resolved to typed fields at the
/// framework boundary. `P` is the caller's column/priority type.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum DragPayload<P> {
    /// Over another draggable item
    Task { id: u32, priority: P, index: usize },
    /// Over a column's empty area
    Column { priority: P },
}

impl<P: Copy> DragPayload<P> {
    /// Column identity of this payload
    pub fn priority(&self) -> P {
        match self {
            DragPayload::Task { priority, .. } => *priority,
            DragPayload::Column { priority } => *priority,
        }
    }
}

/// Outcome of a completed drag: the grabbed task, where it started and
/// where it was dropped.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DropEvent<P> {
    pub task_id: u32,
    pub source_priority: P,
    pub target: DragPayload<P>,
}

#[derive(Clone, Copy, Debug)]
enum Phase<P> {
    Idle,
    /// Pressed but not yet activated
    Pending {
        task_id: u32,
        priority: P,
        kind: PointerKind,
        start_x: i32,
        start_y: i32,
        pressed_at_ms: i64,
    },
    /// Actively dragging; `over` is the payload under the pointer
    Dragging {
        task_id: u32,
        priority: P,
        over: Option<DragPayload<P>>,
    },
}

/// A single drag gesture: `Idle -> Pending (press) -> Dragging (activation)
/// -> Idle (release or cancel)`.
///
/// The machine is pure: callers pass coordinates and timestamps in, so it is
/// fully deterministic and testable without a display or a clock.
pub struct DragGesture<P> {
    phase: Phase<P>,
}

impl<P: Copy + PartialEq + std::fmt::Debug> DragGesture<P> {
    pub fn new() -> Self {
        Self { phase: Phase::Idle }
    }

    /// Pointer pressed on a task. Restarts the gesture if one was in flight.
    pub fn press(&mut self, task_id: u32, priority: P, kind: PointerKind, x: i32, y: i32, now_ms: i64) {
        self.phase = Phase::Pending {
            task_id,
            priority,
            kind,
            start_x: x,
            start_y: y,
            pressed_at_ms: now_ms,
        };
    }

    /// Pointer moved. Returns true if this motion activated the drag.
    ///
    /// Mouse: activates once movement exceeds the threshold on either axis.
    /// Touch: drift beyond tolerance before the hold completes abandons the
    /// pending gesture (the user is scrolling, not dragging).
    pub fn motion(&mut self, x: i32, y: i32, now_ms: i64) -> bool {
        let Phase::Pending { task_id, priority, kind, start_x, start_y, pressed_at_ms } = self.phase else {
            return false;
        };
        let dx = (x - start_x).abs();
        let dy = (y - start_y).abs();
        match kind {
            PointerKind::Mouse => {
                if dx > DRAG_THRESHOLD_PX || dy > DRAG_THRESHOLD_PX {
                    debug!("drag activated (mouse): task {}", task_id);
                    self.phase = Phase::Dragging { task_id, priority, over: None };
                    return true;
                }
            }
            PointerKind::Touch => {
                if dx > TOUCH_TOLERANCE_PX || dy > TOUCH_TOLERANCE_PX {
                    debug!("pending touch drag abandoned: task {}", task_id);
                    self.phase = Phase::Idle;
                } else if now_ms - pressed_at_ms >= LONG_PRESS_MS {
                    debug!("drag activated (long press): task {}", task_id);
                    self.phase = Phase::Dragging { task_id, priority, over: None };
                    return true;
                }
            }
        }
        false
    }

    /// Timer tick while a touch press is held in place. Returns true if the
    /// long press completed and the drag activated.
    pub fn poll(&mut self, now_ms: i64) -> bool {
        let Phase::Pending { task_id, priority, kind: PointerKind::Touch, pressed_at_ms, .. } = self.phase else {
            return false;
        };
        if now_ms - pressed_at_ms >= LONG_PRESS_MS {
            debug!("drag activated (long press): task {}", task_id);
            self.phase = Phase::Dragging { task_id, priority, over: None };
            true
        } else {
            false
        }
    }

    /// Pointer entered a potential drop target. Ignored unless dragging;
    /// dropping a task on itself is never a target.
    pub fn hover(&mut self, target: Option<DragPayload<P>>) {
        if let Phase::Dragging { task_id, over, .. } = &mut self.phase {
            *over = match target {
                Some(DragPayload::Task { id, .. }) if id == *task_id => None,
                other => other,
            };
        }
    }

    /// Pointer released. Yields a drop event only if a drag was active and a
    /// target was hovered; a plain click or a drop outside any target yields
    /// nothing. Always returns to idle.
    pub fn release(&mut self) -> Option<DropEvent<P>> {
        let result = match self.phase {
            Phase::Dragging { task_id, priority, over: Some(target) } => {
                debug!("drop: task {} onto {:?}", task_id, target);
                Some(DropEvent { task_id, source_priority: priority, target })
            }
            _ => None,
        };
        self.phase = Phase::Idle;
        result
    }

    /// Explicit cancel (Escape, teardown). Idempotent.
    pub fn cancel(&mut self) {
        self.phase = Phase::Idle;
    }

    /// Id of the task being dragged, if any
    pub fn dragging_id(&self) -> Option<u32> {
        match self.phase {
            Phase::Dragging { task_id, .. } => Some(task_id),
            _ => None,
        }
    }

    /// Column under the pointer, for transient visual feedback only
    pub fn over_priority(&self) -> Option<P> {
        match self.phase {
            Phase::Dragging { over: Some(payload), .. } => Some(payload.priority()),
            _ => None,
        }
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.phase, Phase::Dragging { .. })
    }
}

impl<P: Copy + PartialEq + std::fmt::Debug> Default for DragGesture<P> {
    fn default() -> Self {
        Self::new()
    }
}
