//! Shared world state for board behaviour scenarios.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use contentboard::auth::Identity;
use contentboard::board::Board;
use contentboard::task::{
    adapters::memory::InMemoryTaskRecords,
    domain::{OwnerId, Task, TaskDraft, TaskId},
    ports::{TaskRecordError, TaskRecordResult, TaskRecords},
    services::{MutationOutcome, TaskStore},
};
use mockable::DefaultClock;
use rstest::fixture;

/// In-memory records that can be told to reject deletes.
#[derive(Default)]
pub struct SwitchableRecords {
    inner: InMemoryTaskRecords,
    reject_deletes: AtomicBool,
}

impl SwitchableRecords {
    /// Makes every later delete fail.
    pub fn reject_deletes(&self) {
        self.reject_deletes.store(true, Ordering::SeqCst);
    }
}

#[async_trait]
impl TaskRecords for SwitchableRecords {
    async fn list(&self, owner: &OwnerId) -> TaskRecordResult<Vec<Task>> {
        self.inner.list(owner).await
    }

    async fn insert(&self, owner: &OwnerId, draft: &TaskDraft) -> TaskRecordResult<Task> {
        self.inner.insert(owner, draft).await
    }

    async fn update(&self, owner: &OwnerId, task: &Task) -> TaskRecordResult<()> {
        self.inner.update(owner, task).await
    }

    async fn delete(&self, owner: &OwnerId, id: TaskId) -> TaskRecordResult<()> {
        if self.reject_deletes.load(Ordering::SeqCst) {
            return Err(TaskRecordError::persistence(std::io::Error::other(
                "delete rejected",
            )));
        }
        self.inner.delete(owner, id).await
    }
}

/// Board type used by the scenarios.
pub type TestBoard = Board<SwitchableRecords, DefaultClock>;

/// Scenario world for board behaviour tests.
pub struct BoardWorld {
    pub records: Arc<SwitchableRecords>,
    pub board: TestBoard,
    pub identity: Identity,
    pub task_id: Option<TaskId>,
    pub last_outcome: Option<MutationOutcome>,
}

impl BoardWorld {
    /// Creates a world with an empty board and a fresh identity.
    #[must_use]
    pub fn new() -> Self {
        let records = Arc::new(SwitchableRecords::default());
        let clock = Arc::new(DefaultClock);
        let store = TaskStore::new(Arc::clone(&records), Arc::clone(&clock));
        Self {
            records,
            board: Board::new(store, clock),
            identity: Identity::new(OwnerId::new()),
            task_id: None,
            last_outcome: None,
        }
    }

    /// Returns the scenario's task identifier.
    ///
    /// # Errors
    ///
    /// Returns an error when no task was created by a previous step.
    pub fn task_id(&self) -> Result<TaskId, eyre::Report> {
        self.task_id
            .ok_or_else(|| eyre::eyre!("missing task in scenario world"))
    }
}

impl Default for BoardWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> BoardWorld {
    BoardWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
