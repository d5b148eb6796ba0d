//! Open-task editor lifecycle and focused-task detail panel state.
//!
//! The two concerns are independent: a task can be focused in the side panel
//! while another is open in the full editor.

use crate::task::domain::{Stage, Task, TaskId};
use chrono::{DateTime, Duration, Utc};

/// Time the editor stays mounted after closing so its exit can play out.
pub const EXIT_DELAY: Duration = Duration::milliseconds(200);

/// Full edit surface lifecycle.
///
/// Closing is two-phase: the surface becomes invisible at once but keeps its
/// target until [`EXIT_DELAY`] has elapsed.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum EditorState {
    /// Nothing is open.
    #[default]
    Closed,
    /// `task` is open and visible.
    Open(Task),
    /// The surface is hidden and releases `task` at `release_at`.
    Closing {
        /// Task still mounted during the exit.
        task: Task,
        /// Instant after which the target is cleared.
        release_at: DateTime<Utc>,
    },
}

impl EditorState {
    /// Opens `task`, cancelling any pending release.
    pub fn open(&mut self, task: Task) {
        *self = Self::Open(task);
    }

    /// Hides the surface and schedules the release of its target.
    pub fn close(&mut self, now: DateTime<Utc>) {
        if !self.is_visible() {
            return;
        }
        if let Self::Open(task) = std::mem::take(self) {
            *self = Self::Closing {
                task,
                release_at: now + EXIT_DELAY,
            };
        }
    }

    /// Clears the target once the exit delay has elapsed.
    ///
    /// Returns `true` when the state changed.
    pub fn settle(&mut self, now: DateTime<Utc>) -> bool {
        match self {
            Self::Closing { release_at, .. } if now >= *release_at => {
                *self = Self::Closed;
                true
            }
            _ => false,
        }
    }

    /// Closes immediately without an exit phase.
    pub fn dismiss(&mut self) {
        *self = Self::Closed;
    }

    /// Returns `true` while the surface is shown.
    #[must_use]
    pub const fn is_visible(&self) -> bool {
        matches!(self, Self::Open(_))
    }

    /// Returns the mounted task, visible or exiting.
    #[must_use]
    pub const fn target(&self) -> Option<&Task> {
        match self {
            Self::Closed => None,
            Self::Open(task) | Self::Closing { task, .. } => Some(task),
        }
    }

    /// Replaces the mounted snapshot when it matches `task`.
    pub fn refresh(&mut self, task: &Task) {
        match self {
            Self::Open(current) | Self::Closing { task: current, .. }
                if current.id() == task.id() =>
            {
                *current = task.clone();
            }
            _ => {}
        }
    }

    /// Drops the mounted task if it is `id`.
    pub fn forget(&mut self, id: TaskId) {
        if self.target().is_some_and(|task| task.id() == id) {
            self.dismiss();
        }
    }
}

/// Focused task and the detail panel's collapse flag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FocusState {
    focused: Option<Task>,
    panel_collapsed: bool,
}

impl Default for FocusState {
    fn default() -> Self {
        Self {
            focused: None,
            panel_collapsed: true,
        }
    }
}

impl FocusState {
    /// Returns the focused task snapshot.
    #[must_use]
    pub const fn focused(&self) -> Option<&Task> {
        self.focused.as_ref()
    }

    /// Returns `true` when the detail panel is collapsed.
    #[must_use]
    pub const fn is_panel_collapsed(&self) -> bool {
        self.panel_collapsed
    }

    /// Focuses `task`.
    ///
    /// Focusing the already-focused task toggles the panel; any other task is
    /// retargeted with the panel forced open.
    pub fn focus(&mut self, task: Task) {
        if self.focused.as_ref().is_some_and(|current| current.id() == task.id()) {
            self.panel_collapsed = !self.panel_collapsed;
            self.focused = Some(task);
        } else {
            self.focused = Some(task);
            self.panel_collapsed = false;
        }
    }

    /// Focuses `task` and expands the panel regardless of prior state.
    pub fn reveal(&mut self, task: Task) {
        self.focused = Some(task);
        self.panel_collapsed = false;
    }

    /// Flips the panel without changing focus.
    pub const fn toggle_panel(&mut self) {
        self.panel_collapsed = !self.panel_collapsed;
    }

    /// Clears focus and collapses the panel.
    pub fn clear_on_background(&mut self) {
        self.focused = None;
        self.panel_collapsed = true;
    }

    /// Drops focus if it is on `id`.
    pub fn forget(&mut self, id: TaskId) {
        if self.focused.as_ref().is_some_and(|task| task.id() == id) {
            self.focused = None;
        }
    }

    /// Mirrors a stage change of the focused task.
    pub fn on_moved(&mut self, id: TaskId, status: Stage) {
        if let Some(task) = self.focused.as_mut().filter(|task| task.id() == id) {
            task.set_status(status);
        }
    }

    /// Replaces the focused snapshot when `task` is the focused one.
    pub fn on_updated(&mut self, task: &Task) {
        if let Some(current) = self.focused.as_mut().filter(|current| current.id() == task.id()) {
            *current = task.clone();
        }
    }
}
