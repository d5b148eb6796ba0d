//! Board orchestration: projection, selection, drag, and chrome flags wired
//! to the task store.
//!
//! [`Board`] is the only component that touches more than one collaborator
//! per action. Creating a task, for instance, persists it through the store
//! and then opens and focuses the result with the detail panel expanded.

pub mod drag;
pub mod editor;
pub mod projection;
pub mod selection;

#[cfg(test)]
mod tests;

use crate::auth::{AuthProvider, AuthResult, AuthSession, AuthSnapshot, Identity};
use crate::task::{
    domain::{Platform, PlatformFilter, PriorityTag, Stage, Task, TaskDraft, TaskId},
    ports::TaskRecords,
    services::{LoadOutcome, PendingMutation, TaskStore},
};
use drag::{DragSession, DragSnapshot, DropResolution};
use editor::EditDraft;
use mockable::Clock;
use projection::{BoardFilter, BoardProjection, SearchQuery, StageColumns};
use selection::{EditorState, FocusState};
use std::sync::Arc;

/// Layout flags that live only for the process lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ChromeFlags {
    /// Navigation sidebar is collapsed.
    pub sidebar_collapsed: bool,
    /// Distraction-free mode hides everything but the columns.
    pub zen_mode: bool,
}

/// What the presentation layer should render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoardGate {
    /// Authentication or the first load has not resolved.
    Loading,
    /// No user is signed in.
    SignedOut,
    /// The board can be shown.
    Ready,
}

/// Board state and interaction model for the signed-in identity.
pub struct Board<R, C>
where
    R: TaskRecords + 'static,
    C: Clock + Send + Sync + 'static,
{
    store: TaskStore<R, C>,
    clock: Arc<C>,
    filter: BoardFilter,
    projection: BoardProjection,
    editor: EditorState,
    focus: FocusState,
    drag: DragSession,
    chrome: ChromeFlags,
    pending_delete: Option<TaskId>,
}

impl<R, C> Board<R, C>
where
    R: TaskRecords + 'static,
    C: Clock + Send + Sync + 'static,
{
    /// Creates a board over `store`; `clock` times the editor exit delay.
    #[must_use]
    pub fn new(store: TaskStore<R, C>, clock: Arc<C>) -> Self {
        Self {
            store,
            clock,
            filter: BoardFilter::default(),
            projection: BoardProjection::default(),
            editor: EditorState::default(),
            focus: FocusState::default(),
            drag: DragSession::default(),
            chrome: ChromeFlags::default(),
            pending_delete: None,
        }
    }

    /// Returns the underlying task store.
    #[must_use]
    pub const fn store(&self) -> &TaskStore<R, C> {
        &self.store
    }

    /// Returns the active filters.
    #[must_use]
    pub const fn filter(&self) -> &BoardFilter {
        &self.filter
    }

    /// Selects the platform filter.
    pub const fn set_platform_filter(&mut self, platform: PlatformFilter) {
        self.filter.platform = platform;
    }

    /// Replaces the search query.
    pub fn set_search_query(&mut self, raw: &str) {
        self.filter.query = SearchQuery::new(raw);
    }

    /// Returns the tasks grouped by stage under the active filters.
    pub fn columns(&mut self) -> Arc<StageColumns> {
        let Self {
            store,
            projection,
            filter,
            ..
        } = self;
        store.inspect(|tasks, revision| projection.columns(tasks, revision, filter))
    }

    /// Returns the full edit surface state.
    #[must_use]
    pub const fn editor(&self) -> &EditorState {
        &self.editor
    }

    /// Returns the focus and detail panel state.
    #[must_use]
    pub const fn focus_state(&self) -> &FocusState {
        &self.focus
    }

    /// Opens the task with `id` in the full edit surface.
    ///
    /// Returns `false` when the task is not on the board.
    pub fn open(&mut self, id: TaskId) -> bool {
        let Some(task) = self.store.find(id) else {
            return false;
        };
        self.editor.open(task);
        true
    }

    /// Starts a draft for the open task.
    #[must_use]
    pub fn edit_draft(&self) -> Option<EditDraft> {
        if !self.editor.is_visible() {
            return None;
        }
        self.editor.target().cloned().map(EditDraft::new)
    }

    /// Hides the edit surface; the target is released after the exit delay.
    pub fn close_editor(&mut self) {
        self.editor.close(self.clock.utc());
    }

    /// Releases a closed editor's target once the exit delay has elapsed.
    pub fn settle(&mut self) -> bool {
        self.editor.settle(self.clock.utc())
    }

    /// Focuses the task with `id` in the detail panel.
    ///
    /// Focusing the focused task again toggles the panel.
    pub fn focus(&mut self, id: TaskId) -> bool {
        let Some(task) = self.store.find(id) else {
            return false;
        };
        self.focus.focus(task);
        true
    }

    /// Handles a click on the board background.
    pub fn clear_focus_on_background(&mut self) {
        self.focus.clear_on_background();
    }

    /// Collapses or expands the detail panel.
    pub const fn toggle_details_panel(&mut self) {
        self.focus.toggle_panel();
    }

    /// Creates a task from the "new idea" template, then opens and focuses
    /// it with the detail panel expanded.
    pub async fn create_task(&mut self) -> Option<Task> {
        let task = self.store.create(TaskDraft::new_idea()).await?;
        self.editor.open(task.clone());
        self.focus.reveal(task.clone());
        Some(task)
    }

    /// Saves a full record and keeps the selection snapshots current.
    #[must_use = "the remote call runs only when the pending mutation is awaited"]
    pub fn update_task(&mut self, task: Task) -> PendingMutation {
        let id = task.id();
        let pending = self.store.update(task);
        if let Some(saved) = self.store.find(id) {
            self.focus.on_updated(&saved);
            self.editor.refresh(&saved);
        }
        pending
    }

    /// Commits an edit draft and closes the edit surface.
    #[must_use = "the remote call runs only when the pending mutation is awaited"]
    pub fn save_edit(&mut self, draft: EditDraft) -> PendingMutation {
        let pending = self.update_task(draft.commit());
        self.close_editor();
        pending
    }

    /// Toggles a tag on the focused task from the detail panel.
    ///
    /// Adding is limited to the tags the task's platform offers. Returns
    /// `None` when nothing is focused or the tag cannot be added.
    #[must_use = "the remote call runs only when the pending mutation is awaited"]
    pub fn toggle_focused_priority(&mut self, tag: PriorityTag) -> Option<PendingMutation> {
        let mut task = self.focus.focused()?.clone();
        if !task.priority().contains(tag) && !task.platform().offers(tag) {
            return None;
        }
        task.toggle_priority(tag);
        Some(self.update_task(task))
    }

    /// Switches the focused task's platform from the detail panel.
    ///
    /// Unlike the full edit surface, existing tags are kept.
    #[must_use = "the remote call runs only when the pending mutation is awaited"]
    pub fn change_focused_platform(&mut self, platform: Platform) -> Option<PendingMutation> {
        let mut task = self.focus.focused()?.clone();
        task.set_platform(platform);
        Some(self.update_task(task))
    }

    /// Inserts a copy of the task with `id`.
    pub async fn duplicate_task(&self, id: TaskId) -> Option<Task> {
        self.store.duplicate(id).await
    }

    /// Asks for confirmation before deleting `id`.
    pub const fn request_delete(&mut self, id: TaskId) {
        self.pending_delete = Some(id);
    }

    /// Returns the task awaiting delete confirmation.
    #[must_use]
    pub const fn pending_delete(&self) -> Option<TaskId> {
        self.pending_delete
    }

    /// Drops the pending delete request.
    pub const fn cancel_delete(&mut self) {
        self.pending_delete = None;
    }

    /// Deletes the task awaiting confirmation.
    #[must_use = "the remote call runs only when the pending mutation is awaited"]
    pub fn confirm_delete(&mut self) -> Option<PendingMutation> {
        let id = self.pending_delete.take()?;
        tracing::debug!(task_id = %id, "delete confirmed");
        Some(self.delete_task(id))
    }

    /// Deletes `id`, clearing it from the editor and the detail panel.
    ///
    /// An open editor on the deleted task closes without an exit phase.
    #[must_use = "the remote call runs only when the pending mutation is awaited"]
    pub fn delete_task(&mut self, id: TaskId) -> PendingMutation {
        self.editor.forget(id);
        self.focus.forget(id);
        if self.pending_delete == Some(id) {
            self.pending_delete = None;
        }
        self.store.remove(id)
    }

    /// Moves `id` to `status` and ends any drag in progress.
    #[must_use = "the remote call runs only when the pending mutation is awaited"]
    pub fn move_task(&mut self, id: TaskId, status: Stage) -> PendingMutation {
        self.focus.on_moved(id, status);
        self.drag.cancel();
        self.store.move_to(id, status)
    }

    /// Picks up a card from `source`.
    pub const fn drag_start(&mut self, source: Stage) {
        self.drag.begin(source);
    }

    /// Hovers the dragged card over `target`.
    pub const fn drag_enter(&mut self, target: Stage) {
        self.drag.enter(target);
    }

    /// Ends the drag without dropping.
    pub const fn drag_end(&mut self) {
        self.drag.cancel();
    }

    /// Drops the dragged card; a drop carrying a task id moves it to the
    /// hovered column.
    #[must_use = "the remote call runs only when the pending mutation is awaited"]
    pub fn drop_task(&mut self, task_id: Option<TaskId>) -> Option<PendingMutation> {
        match self.drag.drop_task(task_id) {
            DropResolution::Move { task_id, target } => Some(self.move_task(task_id, target)),
            DropResolution::Cancelled => None,
        }
    }

    /// Returns the drag state for presentation.
    #[must_use]
    pub const fn drag_snapshot(&self) -> DragSnapshot {
        self.drag.snapshot()
    }

    /// Returns the layout flags.
    #[must_use]
    pub const fn chrome(&self) -> ChromeFlags {
        self.chrome
    }

    /// Collapses or expands the sidebar.
    pub const fn toggle_sidebar(&mut self) {
        self.chrome.sidebar_collapsed = !self.chrome.sidebar_collapsed;
    }

    /// Enters or leaves zen mode.
    pub const fn toggle_zen_mode(&mut self) {
        self.chrome.zen_mode = !self.chrome.zen_mode;
    }

    /// Switches the board to `identity` and loads its tasks.
    ///
    /// Selection, drag, and pending delete state are cleared.
    pub async fn set_identity(&mut self, identity: Option<&Identity>) -> LoadOutcome {
        self.editor.dismiss();
        self.focus.clear_on_background();
        self.drag.cancel();
        self.pending_delete = None;
        self.store.set_identity(identity.map(Identity::id));
        self.store.list().await
    }

    /// Decides what to render for the current auth state.
    ///
    /// Only the first load for an identity holds the board back; reloads
    /// after a failed mutation keep it on screen.
    #[must_use]
    pub fn gate(&self, auth: &AuthSnapshot) -> BoardGate {
        if auth.loading || (auth.user.is_some() && !self.store.has_loaded()) {
            BoardGate::Loading
        } else if auth.user.is_none() {
            BoardGate::SignedOut
        } else {
            BoardGate::Ready
        }
    }

    /// Signs out and clears the board.
    ///
    /// # Errors
    ///
    /// Returns the provider's [`AuthError`](crate::auth::AuthError) when
    /// sign-out fails; the board is left untouched.
    pub async fn sign_out<P: AuthProvider>(&mut self, session: &AuthSession<P>) -> AuthResult<()> {
        session.sign_out().await?;
        self.set_identity(None).await;
        Ok(())
    }
}
