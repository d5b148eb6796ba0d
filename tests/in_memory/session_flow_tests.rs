//! In-memory integration tests for auth gating and identity switches.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use contentboard::auth::{
    AuthError, AuthSession, AuthSnapshot, Identity, memory::InMemoryAuthProvider,
};
use contentboard::board::{Board, BoardGate};
use contentboard::task::{
    adapters::memory::InMemoryTaskRecords,
    domain::{OwnerId, Stage, Task, TaskDraft, TaskId},
    ports::{TaskRecordError, TaskRecordResult, TaskRecords},
    services::{LoadOutcome, MutationOutcome, TaskStore},
};
use mockable::DefaultClock;
use rstest::rstest;
use tokio::sync::Notify;

use super::helpers::{BoardHarness, harness};

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn gate_follows_auth_and_first_load(mut harness: BoardHarness) {
    assert_eq!(harness.board.gate(&AuthSnapshot::pending()), BoardGate::Loading);

    let signed_in = AuthSnapshot::resolved(Some(harness.identity.clone()));
    assert_eq!(harness.board.gate(&signed_in), BoardGate::Loading);

    harness.sign_in().await;
    assert_eq!(harness.board.gate(&signed_in), BoardGate::Ready);
    assert_eq!(
        harness.board.gate(&AuthSnapshot::resolved(None)),
        BoardGate::SignedOut
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn restored_session_loads_existing_tasks(mut harness: BoardHarness) {
    harness.sign_in().await;
    harness.seed("Evergreen guide", Stage::Published).await;
    harness.board.set_identity(None).await;
    assert!(harness.board.store().tasks().is_empty());

    let session = AuthSession::new(Arc::new(InMemoryAuthProvider::signed_in(
        harness.identity.clone(),
    )));
    let snapshot = session.restore().await;
    let user = snapshot.user.clone().expect("session restored");

    let outcome = harness.board.set_identity(Some(&user)).await;

    assert_eq!(outcome, LoadOutcome::Loaded { count: 1 });
    assert_eq!(harness.board.gate(&snapshot), BoardGate::Ready);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn sign_out_clears_board_and_selection(mut harness: BoardHarness) {
    harness.sign_in().await;
    let task = harness.seed("Community poll", Stage::Ideas).await;
    assert!(harness.board.open(task.id()));
    assert!(harness.board.focus(task.id()));
    let session = AuthSession::new(Arc::new(InMemoryAuthProvider::signed_in(
        harness.identity.clone(),
    )));
    session.restore().await;

    harness
        .board
        .sign_out(&session)
        .await
        .expect("sign-out should succeed");

    assert!(session.user().is_none());
    assert!(harness.board.store().tasks().is_empty());
    assert!(harness.board.editor().target().is_none());
    assert!(harness.board.focus_state().focused().is_none());
    assert_eq!(harness.board.gate(&session.snapshot()), BoardGate::SignedOut);
    assert_eq!(harness.records.row_count(), 1);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn failed_sign_out_keeps_board(mut harness: BoardHarness) {
    harness.sign_in().await;
    harness.seed("Livestream plan", Stage::Script).await;
    let provider = Arc::new(InMemoryAuthProvider::signed_in(harness.identity.clone()));
    let session = AuthSession::new(Arc::clone(&provider));
    session.restore().await;
    provider.set_unavailable(true);

    let result = harness.board.sign_out(&session).await;

    assert!(matches!(result, Err(AuthError::SignOut(_))));
    assert!(session.user().is_some());
    assert_eq!(harness.board.store().tasks().len(), 1);
}

/// Records whose updates fail and whose next list can be held open.
#[derive(Default)]
struct FlakyRecords {
    inner: InMemoryTaskRecords,
    hold_next_list: AtomicBool,
    list_entered: Notify,
    list_release: Notify,
}

#[async_trait]
impl TaskRecords for FlakyRecords {
    async fn list(&self, owner: &OwnerId) -> TaskRecordResult<Vec<Task>> {
        let snapshot = self.inner.list(owner).await;
        if self.hold_next_list.swap(false, Ordering::SeqCst) {
            self.list_entered.notify_one();
            self.list_release.notified().await;
        }
        snapshot
    }

    async fn insert(&self, owner: &OwnerId, draft: &TaskDraft) -> TaskRecordResult<Task> {
        self.inner.insert(owner, draft).await
    }

    async fn update(&self, _owner: &OwnerId, _task: &Task) -> TaskRecordResult<()> {
        Err(TaskRecordError::persistence(std::io::Error::other(
            "update rejected",
        )))
    }

    async fn delete(&self, owner: &OwnerId, id: TaskId) -> TaskRecordResult<()> {
        self.inner.delete(owner, id).await
    }
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn board_stays_ready_while_failed_update_reconciles() {
    let records = Arc::new(FlakyRecords::default());
    let clock = Arc::new(DefaultClock);
    let store = TaskStore::new(Arc::clone(&records), Arc::clone(&clock));
    let mut board = Board::new(store, clock);
    let identity = Identity::new(OwnerId::new());
    let auth = AuthSnapshot::resolved(Some(identity.clone()));

    assert_eq!(
        board.set_identity(Some(&identity)).await,
        LoadOutcome::Loaded { count: 0 }
    );
    let task = board.create_task().await.expect("task should be created");
    assert_eq!(board.gate(&auth), BoardGate::Ready);

    records.hold_next_list.store(true, Ordering::SeqCst);
    let pending = board.update_task(task.with_status(Stage::Script));
    let reconcile = tokio::spawn(pending);
    records.list_entered.notified().await;

    assert!(board.store().is_loading());
    assert_eq!(board.gate(&auth), BoardGate::Ready);

    records.list_release.notify_one();
    assert_eq!(
        reconcile.await.expect("mutation task joins"),
        MutationOutcome::Reconciled
    );
    assert_eq!(board.gate(&auth), BoardGate::Ready);
    assert_eq!(
        board.store().find(task.id()).as_ref().map(Task::status),
        Some(Stage::Ideas)
    );
    assert!(board.store().last_error().is_some());
}
