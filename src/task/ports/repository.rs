//! Persistence port for owner-scoped task records.

use crate::task::domain::{OwnerId, Task, TaskDraft, TaskId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for task record operations.
pub type TaskRecordResult<T> = Result<T, TaskRecordError>;

/// Remote record service holding the task table.
///
/// Every operation is scoped by the owning identity. Implementations assign
/// identifiers and timestamps on insert and return full records.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TaskRecords: Send + Sync {
    /// Returns every task owned by `owner`, ordered by creation time.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRecordError::Persistence`] when the service fails.
    async fn list(&self, owner: &OwnerId) -> TaskRecordResult<Vec<Task>>;

    /// Inserts a new task and returns the persisted record.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRecordError::Persistence`] when the service rejects the
    /// insert.
    async fn insert(&self, owner: &OwnerId, draft: &TaskDraft) -> TaskRecordResult<Task>;

    /// Replaces the stored fields of an existing task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRecordError::NotFound`] when the owner has no task with
    /// this identifier.
    async fn update(&self, owner: &OwnerId, task: &Task) -> TaskRecordResult<()>;

    /// Deletes a task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRecordError::NotFound`] when the owner has no task with
    /// this identifier.
    async fn delete(&self, owner: &OwnerId, id: TaskId) -> TaskRecordResult<()>;
}

/// Errors returned by task record implementations.
#[derive(Debug, Clone, Error)]
pub enum TaskRecordError {
    /// The task was not found for the owner.
    #[error("task not found: {0}")]
    NotFound(TaskId),

    /// A stored row could not be mapped onto the domain model.
    #[error("corrupt task record {id}: {reason}")]
    CorruptRecord {
        /// Identifier of the offending row.
        id: TaskId,
        /// Mapping failure description.
        reason: String,
    },

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl TaskRecordError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
