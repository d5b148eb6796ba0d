//! Shared test helpers for in-memory board integration tests.

use std::sync::{Arc, Mutex, PoisonError};

use chrono::{DateTime, Duration, Local, TimeZone, Utc};
use contentboard::auth::Identity;
use contentboard::board::Board;
use contentboard::task::{
    adapters::memory::InMemoryTaskRecords,
    domain::{OwnerId, Stage, Task, TaskDraft},
    services::{LoadOutcome, TaskStore},
};
use mockable::Clock;
use rstest::fixture;

/// Clock that only moves when a test advances it.
#[derive(Debug)]
pub struct ManualClock {
    now: Mutex<DateTime<Utc>>,
}

impl ManualClock {
    /// Moves the clock forward by `by`.
    pub fn advance(&self, by: Duration) {
        let mut now = self.now.lock().unwrap_or_else(PoisonError::into_inner);
        *now += by;
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        let start = Utc
            .with_ymd_and_hms(2024, 3, 15, 9, 30, 0)
            .single()
            .expect("valid start instant");
        Self {
            now: Mutex::new(start),
        }
    }
}

impl Clock for ManualClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        *self.now.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Board wired to in-memory records and a manual clock.
pub type TestBoard = Board<InMemoryTaskRecords, ManualClock>;

/// Collaborators of a board under test.
pub struct BoardHarness {
    pub board: TestBoard,
    pub records: Arc<InMemoryTaskRecords>,
    pub clock: Arc<ManualClock>,
    pub identity: Identity,
}

impl BoardHarness {
    /// Creates a signed-out board over empty records.
    #[must_use]
    pub fn new() -> Self {
        let records = Arc::new(InMemoryTaskRecords::new());
        let clock = Arc::new(ManualClock::default());
        let store = TaskStore::new(Arc::clone(&records), Arc::clone(&clock));
        Self {
            board: Board::new(store, Arc::clone(&clock)),
            records,
            clock,
            identity: Identity::new(OwnerId::new()).with_email("creator@example.com"),
        }
    }

    /// Signs the harness identity in and loads its tasks.
    pub async fn sign_in(&mut self) -> LoadOutcome {
        let identity = self.identity.clone();
        self.board.set_identity(Some(&identity)).await
    }

    /// Inserts a task through the store without selecting it.
    pub async fn seed(&self, title: &str, status: Stage) -> Task {
        let mut draft = TaskDraft::new_idea();
        draft.title = title.to_owned();
        draft.status = status;
        self.board
            .store()
            .create(draft)
            .await
            .expect("seeded task should be created")
    }
}

impl Default for BoardHarness {
    fn default() -> Self {
        Self::new()
    }
}

/// Provides a fresh signed-out board for each test.
#[fixture]
pub fn harness() -> BoardHarness {
    BoardHarness::new()
}
