//! Canonical in-memory task collection with optimistic remote mutation.

use crate::task::{
    domain::{OwnerId, Stage, Task, TaskDraft, TaskId},
    ports::{TaskRecordError, TaskRecords},
};
use mockable::Clock;
use std::future::{Future, ready};
use std::pin::Pin;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Remote half of an optimistic mutation.
///
/// The local change is already visible when this future is returned; driving
/// it to completion performs the remote call and any reconciliation.
pub type PendingMutation = Pin<Box<dyn Future<Output = MutationOutcome> + Send>>;

/// Result of an optimistic mutation once its remote call has settled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationOutcome {
    /// The remote service accepted the change.
    Committed,
    /// The remote call failed; the error was recorded and the list reloaded.
    Reconciled,
    /// No identity is set; nothing was changed.
    Unauthenticated,
    /// The task is not in the local collection; nothing was changed.
    StaleReference,
}

/// Result of a list load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The collection was replaced with `count` tasks.
    Loaded {
        /// Number of tasks loaded.
        count: usize,
    },
    /// No identity is set; the collection was cleared.
    Unauthenticated,
    /// A newer load or identity change was issued; the response was dropped.
    Superseded,
    /// The remote call failed; the error was recorded.
    Failed,
}

#[derive(Debug)]
struct StoreState {
    owner: Option<OwnerId>,
    tasks: Vec<Task>,
    loading: bool,
    initial_load_resolved: bool,
    last_error: Option<TaskRecordError>,
    revision: u64,
}

impl StoreState {
    const fn bump(&mut self) {
        self.revision = self.revision.wrapping_add(1);
    }

    fn position(&self, id: TaskId) -> Option<usize> {
        self.tasks.iter().position(|task| task.id() == id)
    }
}

struct StoreInner<R, C> {
    records: Arc<R>,
    clock: Arc<C>,
    state: RwLock<StoreState>,
    load_seq: AtomicU64,
}

/// Owner-scoped task collection backed by a remote record service.
///
/// Updates, removals and moves apply to the local collection before the
/// remote call is issued. A failed remote call is recorded in the error slot
/// and followed by a full reload. Clones share the same collection.
pub struct TaskStore<R, C>
where
    R: TaskRecords + 'static,
    C: Clock + Send + Sync + 'static,
{
    inner: Arc<StoreInner<R, C>>,
}

impl<R, C> Clone for TaskStore<R, C>
where
    R: TaskRecords + 'static,
    C: Clock + Send + Sync + 'static,
{
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<R, C> TaskStore<R, C>
where
    R: TaskRecords + 'static,
    C: Clock + Send + Sync + 'static,
{
    /// Creates an empty store with no identity.
    #[must_use]
    pub fn new(records: Arc<R>, clock: Arc<C>) -> Self {
        Self {
            inner: Arc::new(StoreInner {
                records,
                clock,
                state: RwLock::new(StoreState {
                    owner: None,
                    tasks: Vec::new(),
                    loading: true,
                    initial_load_resolved: false,
                    last_error: None,
                    revision: 0,
                }),
                load_seq: AtomicU64::new(0),
            }),
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, StoreState> {
        self.inner.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, StoreState> {
        self.inner
            .state
            .write()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Returns the identity the collection belongs to.
    #[must_use]
    pub fn owner(&self) -> Option<OwnerId> {
        self.read().owner
    }

    /// Returns a snapshot of the tasks in creation order.
    #[must_use]
    pub fn tasks(&self) -> Vec<Task> {
        self.read().tasks.clone()
    }

    /// Runs `f` over the current tasks and their revision without copying
    /// the collection.
    #[must_use]
    pub fn inspect<T>(&self, f: impl FnOnce(&[Task], u64) -> T) -> T {
        let state = self.read();
        f(&state.tasks, state.revision)
    }

    /// Returns a copy of the task with `id`, if present.
    #[must_use]
    pub fn find(&self, id: TaskId) -> Option<Task> {
        self.read().tasks.iter().find(|task| task.id() == id).cloned()
    }

    /// Returns the revision counter, bumped on every local change.
    #[must_use]
    pub fn revision(&self) -> u64 {
        self.read().revision
    }

    /// Returns `true` until the latest load has resolved.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.read().loading
    }

    /// Returns `true` once a load has resolved for the current identity.
    ///
    /// Later reloads, including reconciliation after a failed mutation, do
    /// not clear it; only an identity change does.
    #[must_use]
    pub fn has_loaded(&self) -> bool {
        self.read().initial_load_resolved
    }

    /// Returns the most recent remote failure, if any.
    #[must_use]
    pub fn last_error(&self) -> Option<TaskRecordError> {
        self.read().last_error.clone()
    }

    /// Clears the error slot.
    pub fn clear_error(&self) {
        self.write().last_error = None;
    }

    /// Replaces the identity and clears the collection.
    ///
    /// Loads in flight for the previous identity are discarded when they
    /// resolve. Call [`Self::list`] afterwards to load the new identity's
    /// tasks.
    pub fn set_identity(&self, owner: Option<OwnerId>) {
        self.inner.load_seq.fetch_add(1, Ordering::SeqCst);
        let mut state = self.write();
        state.owner = owner;
        state.tasks.clear();
        state.loading = owner.is_some();
        state.initial_load_resolved = false;
        state.last_error = None;
        state.bump();
        tracing::debug!(has_identity = owner.is_some(), "task store identity changed");
    }

    /// Loads the identity's tasks, replacing the collection.
    ///
    /// Without an identity the collection is cleared and no remote call is
    /// made. A response that resolves after a newer load was issued is
    /// discarded.
    pub async fn list(&self) -> LoadOutcome {
        let seq = self.inner.load_seq.fetch_add(1, Ordering::SeqCst) + 1;
        let owner = {
            let mut state = self.write();
            let Some(owner) = state.owner else {
                state.tasks.clear();
                state.loading = false;
                state.initial_load_resolved = true;
                state.bump();
                return LoadOutcome::Unauthenticated;
            };
            state.loading = true;
            owner
        };

        let result = self.inner.records.list(&owner).await;

        let mut state = self.write();
        if self.inner.load_seq.load(Ordering::SeqCst) != seq || state.owner != Some(owner) {
            tracing::debug!(seq, "discarding superseded task list");
            return LoadOutcome::Superseded;
        }
        state.loading = false;
        state.initial_load_resolved = true;
        match result {
            Ok(tasks) => {
                let count = tasks.len();
                state.tasks = tasks;
                state.bump();
                tracing::debug!(count, "task list loaded");
                LoadOutcome::Loaded { count }
            }
            Err(err) => {
                tracing::warn!(error = %err, "task list load failed");
                state.last_error = Some(err);
                LoadOutcome::Failed
            }
        }
    }

    /// Reloads the collection from the remote service.
    ///
    /// This is the single recovery path after a failed optimistic mutation.
    pub async fn reconcile(&self) -> LoadOutcome {
        self.list().await
    }

    /// Inserts a new task and appends the persisted record.
    ///
    /// Returns `None` without an identity, when the draft is invalid, or when
    /// the remote insert fails (the error is recorded).
    pub async fn create(&self, draft: TaskDraft) -> Option<Task> {
        let owner = self.owner()?;
        if let Err(err) = draft.validate() {
            tracing::warn!(error = %err, "rejecting invalid task draft");
            return None;
        }

        match self.inner.records.insert(&owner, &draft).await {
            Ok(task) => {
                let mut state = self.write();
                if state.owner != Some(owner) {
                    return None;
                }
                state.tasks.push(task.clone());
                state.bump();
                tracing::debug!(task_id = %task.id(), "task created");
                Some(task)
            }
            Err(err) => {
                tracing::warn!(error = %err, "task insert failed");
                self.write().last_error = Some(err);
                None
            }
        }
    }

    /// Copies the task with `id` and inserts the copy.
    ///
    /// Returns `None` when the task is absent or the insert fails.
    pub async fn duplicate(&self, id: TaskId) -> Option<Task> {
        let source = self.find(id)?;
        self.create(TaskDraft::duplicate_of(&source)).await
    }

    /// Replaces a task locally and returns the pending remote update.
    ///
    /// The `updated_at` timestamp is stamped from the store's clock. The
    /// latest local edit wins when several updates target the same task.
    #[must_use = "the remote call runs only when the pending mutation is awaited"]
    pub fn update(&self, task: Task) -> PendingMutation {
        let mut task = task;
        task.touch(&*self.inner.clock);

        let owner = {
            let mut state = self.write();
            let Some(owner) = state.owner else {
                return settled(MutationOutcome::Unauthenticated);
            };
            let Some(position) = state.position(task.id()) else {
                return settled(MutationOutcome::StaleReference);
            };
            if let Some(slot) = state.tasks.get_mut(position) {
                *slot = task.clone();
            }
            state.bump();
            owner
        };

        let store = self.clone();
        Box::pin(async move {
            match store.inner.records.update(&owner, &task).await {
                Ok(()) => MutationOutcome::Committed,
                Err(err) => store.recover("update", err).await,
            }
        })
    }

    /// Removes a task locally and returns the pending remote delete.
    #[must_use = "the remote call runs only when the pending mutation is awaited"]
    pub fn remove(&self, id: TaskId) -> PendingMutation {
        let owner = {
            let mut state = self.write();
            let Some(owner) = state.owner else {
                return settled(MutationOutcome::Unauthenticated);
            };
            let Some(position) = state.position(id) else {
                return settled(MutationOutcome::StaleReference);
            };
            state.tasks.remove(position);
            state.bump();
            owner
        };

        let store = self.clone();
        Box::pin(async move {
            match store.inner.records.delete(&owner, id).await {
                Ok(()) => MutationOutcome::Committed,
                Err(err) => store.recover("delete", err).await,
            }
        })
    }

    /// Moves a task to `status` through [`Self::update`].
    #[must_use = "the remote call runs only when the pending mutation is awaited"]
    pub fn move_to(&self, id: TaskId, status: Stage) -> PendingMutation {
        match self.find(id) {
            Some(task) => self.update(task.with_status(status)),
            None if self.owner().is_none() => settled(MutationOutcome::Unauthenticated),
            None => settled(MutationOutcome::StaleReference),
        }
    }

    async fn recover(&self, operation: &'static str, err: TaskRecordError) -> MutationOutcome {
        tracing::warn!(operation, error = %err, "remote task mutation failed; reconciling");
        self.write().last_error = Some(err);
        self.reconcile().await;
        MutationOutcome::Reconciled
    }
}

fn settled(outcome: MutationOutcome) -> PendingMutation {
    Box::pin(ready(outcome))
}
