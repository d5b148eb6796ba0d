//! Drag-and-drop column transition state machine.
//!
//! The machine only sees stage signals, so any input source (pointer, touch,
//! keyboard) can drive it.

use crate::task::domain::{Stage, TaskId};
use serde::Serialize;

/// In-progress drag, if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DragSession {
    /// No drag in progress.
    #[default]
    Idle,
    /// A card picked up from `source` currently hovers `target`.
    Dragging {
        /// Column the drag started from.
        source: Stage,
        /// Column currently under the pointer.
        target: Stage,
    },
}

/// What a drop resolved into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropResolution {
    /// Move `task_id` to `target`.
    Move {
        /// Dragged task.
        task_id: TaskId,
        /// Column the task was dropped on.
        target: Stage,
    },
    /// The drop carried no task or no drag was active.
    Cancelled,
}

/// Read-only view of the session for presentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DragSnapshot {
    /// `true` while a drag is in progress.
    pub is_active: bool,
    /// Column the drag started from.
    pub source: Option<Stage>,
    /// Column currently hovered.
    pub target: Option<Stage>,
}

impl DragSnapshot {
    /// Returns `true` when the hovered column differs from the source.
    #[must_use]
    pub fn has_moved(&self) -> bool {
        self.is_active && self.source != self.target
    }
}

impl DragSession {
    /// Starts a drag from `source`, replacing any session in progress.
    pub const fn begin(&mut self, source: Stage) {
        *self = Self::Dragging {
            source,
            target: source,
        };
    }

    /// Records that the pointer entered `target`. Ignored while idle.
    pub const fn enter(&mut self, target: Stage) {
        if let Self::Dragging { source, .. } = *self {
            *self = Self::Dragging { source, target };
        }
    }

    /// Ends the session with a drop and reports the move to perform.
    pub const fn drop_task(&mut self, task_id: Option<TaskId>) -> DropResolution {
        let resolution = match (*self, task_id) {
            (Self::Dragging { target, .. }, Some(task_id)) => {
                DropResolution::Move { task_id, target }
            }
            _ => DropResolution::Cancelled,
        };
        *self = Self::Idle;
        resolution
    }

    /// Abandons the session without a move.
    pub const fn cancel(&mut self) {
        *self = Self::Idle;
    }

    /// Returns `true` while a drag is in progress.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        matches!(self, Self::Dragging { .. })
    }

    /// Returns the presentation view of the session.
    #[must_use]
    pub const fn snapshot(&self) -> DragSnapshot {
        match *self {
            Self::Idle => DragSnapshot {
                is_active: false,
                source: None,
                target: None,
            },
            Self::Dragging { source, target } => DragSnapshot {
                is_active: true,
                source: Some(source),
                target: Some(target),
            },
        }
    }
}
