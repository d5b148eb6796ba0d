//! In-memory task records for tests and local demos.

use async_trait::async_trait;
use mockable::{Clock, DefaultClock};
use std::sync::{Arc, RwLock};

use crate::task::{
    domain::{OwnerId, PersistedTaskData, Task, TaskDraft, TaskId},
    ports::{TaskRecordError, TaskRecordResult, TaskRecords},
};

/// Thread-safe in-memory task record service.
///
/// Rows keep their insertion order, which stands in for creation-time
/// ordering.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTaskRecords {
    state: Arc<RwLock<InMemoryTaskState>>,
}

#[derive(Debug, Default)]
struct InMemoryTaskState {
    rows: Vec<StoredTask>,
}

#[derive(Debug, Clone)]
struct StoredTask {
    owner: OwnerId,
    task: Task,
}

impl InMemoryTaskRecords {
    /// Creates an empty record service.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of stored rows across all owners.
    #[must_use]
    pub fn row_count(&self) -> usize {
        self.state.read().map_or(0, |state| state.rows.len())
    }
}

fn lock_error(err: impl std::fmt::Display) -> TaskRecordError {
    TaskRecordError::persistence(std::io::Error::other(err.to_string()))
}

fn owned_position(state: &InMemoryTaskState, owner: &OwnerId, id: TaskId) -> Option<usize> {
    state
        .rows
        .iter()
        .position(|row| row.task.id() == id && row.owner == *owner)
}

#[async_trait]
impl TaskRecords for InMemoryTaskRecords {
    async fn list(&self, owner: &OwnerId) -> TaskRecordResult<Vec<Task>> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(state
            .rows
            .iter()
            .filter(|row| row.owner == *owner)
            .map(|row| row.task.clone())
            .collect())
    }

    async fn insert(&self, owner: &OwnerId, draft: &TaskDraft) -> TaskRecordResult<Task> {
        let timestamp = DefaultClock.utc();
        let task = Task::from_persisted(PersistedTaskData {
            id: TaskId::new(),
            fields: draft.clone(),
            created_at: timestamp,
            updated_at: timestamp,
        });

        let mut state = self.state.write().map_err(lock_error)?;
        state.rows.push(StoredTask {
            owner: *owner,
            task: task.clone(),
        });
        Ok(task)
    }

    async fn update(&self, owner: &OwnerId, task: &Task) -> TaskRecordResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        let position =
            owned_position(&state, owner, task.id()).ok_or(TaskRecordError::NotFound(task.id()))?;
        if let Some(row) = state.rows.get_mut(position) {
            row.task = task.clone();
        }
        Ok(())
    }

    async fn delete(&self, owner: &OwnerId, id: TaskId) -> TaskRecordResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        let position = owned_position(&state, owner, id).ok_or(TaskRecordError::NotFound(id))?;
        state.rows.remove(position);
        Ok(())
    }
}
