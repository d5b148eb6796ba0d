//! In-memory integration tests for board task flows.

use chrono::Duration;
use contentboard::board::{ChromeFlags, editor::EditDraft, selection::EXIT_DELAY};
use contentboard::task::{
    domain::{COPY_MARKER, NEW_IDEA_TITLE, Platform, PlatformFilter, PriorityTag, Stage, Task},
    ports::TaskRecords,
    services::{LoadOutcome, MutationOutcome},
};
use rstest::rstest;

use super::helpers::{BoardHarness, harness};

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn creating_a_task_opens_and_focuses_it(mut harness: BoardHarness) {
    assert_eq!(harness.sign_in().await, LoadOutcome::Loaded { count: 0 });

    let created = harness
        .board
        .create_task()
        .await
        .expect("task should be created");

    assert_eq!(created.title(), NEW_IDEA_TITLE);
    assert_eq!(created.status(), Stage::Ideas);
    assert!(harness.board.editor().is_visible());
    assert_eq!(harness.board.editor().target(), Some(&created));
    assert_eq!(harness.board.focus_state().focused(), Some(&created));
    assert!(!harness.board.focus_state().is_panel_collapsed());
    assert_eq!(harness.records.row_count(), 1);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn create_without_identity_does_nothing(mut harness: BoardHarness) {
    assert!(harness.board.create_task().await.is_none());
    assert!(!harness.board.editor().is_visible());
    assert_eq!(harness.records.row_count(), 0);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn columns_follow_filters_and_mutations(mut harness: BoardHarness) {
    harness.sign_in().await;
    let vlog = harness.seed("Studio vlog", Stage::Ideas).await;
    harness.seed("Launch thread", Stage::Script).await;

    let columns = harness.board.columns();
    assert_eq!(columns.len(), 2);
    assert_eq!(columns.column(Stage::Script).len(), 1);

    harness.board.set_search_query("  VLOG ");
    let searched = harness.board.columns();
    assert_eq!(searched.len(), 1);
    assert_eq!(searched.column(Stage::Ideas).first(), Some(&vlog));

    harness.board.set_search_query("");
    harness
        .board
        .set_platform_filter(PlatformFilter::Only(Platform::Blog));
    assert!(harness.board.columns().is_empty());

    harness.board.set_platform_filter(PlatformFilter::All);
    let outcome = harness.board.move_task(vlog.id(), Stage::Published).await;
    assert_eq!(outcome, MutationOutcome::Committed);
    let moved = harness.board.columns();
    assert_eq!(moved.column(Stage::Published).len(), 1);
    assert!(moved.column(Stage::Ideas).is_empty());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn drag_with_several_hovers_moves_once(mut harness: BoardHarness) {
    harness.sign_in().await;
    let task = harness.seed("Gear review", Stage::Ideas).await;
    let before = harness.board.store().revision();

    harness.board.drag_start(Stage::Ideas);
    harness.board.drag_enter(Stage::Script);
    harness.board.drag_enter(Stage::Production);
    assert!(harness.board.drag_snapshot().has_moved());
    assert_eq!(harness.board.store().revision(), before);

    let pending = harness
        .board
        .drop_task(Some(task.id()))
        .expect("drop should move the task");
    assert_eq!(pending.await, MutationOutcome::Committed);

    assert_eq!(harness.board.store().revision(), before + 1);
    assert!(!harness.board.drag_snapshot().is_active);
    let stored = harness
        .records
        .list(&harness.identity.id())
        .await
        .expect("list should succeed");
    assert_eq!(stored.first().map(Task::status), Some(Stage::Production));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn saving_an_edit_persists_and_closes_after_delay(mut harness: BoardHarness) {
    harness.sign_in().await;
    let task = harness.seed("Podcast intro", Stage::Script).await;
    assert!(harness.board.open(task.id()));
    assert!(harness.board.focus(task.id()));

    let mut draft: EditDraft = harness.board.edit_draft().expect("editor is open");
    draft.set_title("Podcast intro v2");
    draft.set_platform(Platform::Blog);
    assert!(draft.toggle_priority(PriorityTag::Draft));
    assert!(draft.is_dirty());

    let outcome = harness.board.save_edit(draft).await;
    assert_eq!(outcome, MutationOutcome::Committed);

    let saved = harness.board.store().find(task.id()).expect("task kept");
    assert_eq!(saved.title(), "Podcast intro v2");
    assert_eq!(saved.platform(), Platform::Blog);
    assert_eq!(saved.priority().as_slice(), &[PriorityTag::Draft]);
    assert_eq!(harness.board.focus_state().focused(), Some(&saved));

    assert!(!harness.board.editor().is_visible());
    assert!(harness.board.editor().target().is_some());
    assert!(!harness.board.settle());
    harness.clock.advance(EXIT_DELAY + Duration::milliseconds(1));
    assert!(harness.board.settle());
    assert!(harness.board.editor().target().is_none());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn quick_edits_respect_platform_tags(mut harness: BoardHarness) {
    harness.sign_in().await;
    let task = harness.seed("Shorts teaser", Stage::Ideas).await;
    assert!(harness.board.focus(task.id()));

    let removed = harness
        .board
        .toggle_focused_priority(PriorityTag::Draft)
        .expect("removing an existing tag is allowed");
    assert_eq!(removed.await, MutationOutcome::Committed);
    assert!(
        harness
            .board
            .toggle_focused_priority(PriorityTag::Draft)
            .is_none(),
        "YouTube does not offer the Draft tag"
    );

    let added = harness
        .board
        .toggle_focused_priority(PriorityTag::Sponsored)
        .expect("Sponsored is offered on YouTube");
    assert_eq!(added.await, MutationOutcome::Committed);

    let switched = harness
        .board
        .change_focused_platform(Platform::Instagram)
        .expect("a task is focused");
    assert_eq!(switched.await, MutationOutcome::Committed);

    let focused = harness.board.focus_state().focused().expect("still focused");
    assert_eq!(focused.platform(), Platform::Instagram);
    assert_eq!(focused.priority().as_slice(), &[PriorityTag::Sponsored]);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn duplicate_appends_marked_copy(mut harness: BoardHarness) {
    harness.sign_in().await;
    let source = harness.seed("Unboxing", Stage::Production).await;

    let copy = harness
        .board
        .duplicate_task(source.id())
        .await
        .expect("copy should be created");

    assert_ne!(copy.id(), source.id());
    assert_eq!(copy.title(), format!("Unboxing{COPY_MARKER}"));
    assert_eq!(copy.status(), Stage::Production);
    assert_eq!(harness.board.store().tasks().last(), Some(&copy));
    assert_eq!(harness.records.row_count(), 2);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn deleting_the_selected_task_clears_selection(mut harness: BoardHarness) {
    harness.sign_in().await;
    let task = harness.seed("Behind the scenes", Stage::Script).await;
    let other = harness.seed("Q&A", Stage::Ideas).await;
    assert!(harness.board.open(task.id()));
    assert!(harness.board.focus(task.id()));

    harness.board.request_delete(task.id());
    assert_eq!(harness.board.pending_delete(), Some(task.id()));
    let outcome = harness
        .board
        .confirm_delete()
        .expect("delete is pending")
        .await;

    assert_eq!(outcome, MutationOutcome::Committed);
    assert!(harness.board.pending_delete().is_none());
    assert!(harness.board.editor().target().is_none());
    assert!(harness.board.focus_state().focused().is_none());
    assert_eq!(harness.board.store().tasks(), vec![other]);
    assert_eq!(harness.records.row_count(), 1);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn deleting_another_task_keeps_selection(mut harness: BoardHarness) {
    harness.sign_in().await;
    let kept = harness.seed("Collab pitch", Stage::Ideas).await;
    let doomed = harness.seed("Old draft", Stage::Ideas).await;
    assert!(harness.board.focus(kept.id()));

    let outcome = harness.board.delete_task(doomed.id()).await;

    assert_eq!(outcome, MutationOutcome::Committed);
    assert_eq!(harness.board.focus_state().focused(), Some(&kept));
}

#[rstest]
fn chrome_toggles_are_independent(mut harness: BoardHarness) {
    assert_eq!(harness.board.chrome(), ChromeFlags::default());

    harness.board.toggle_sidebar();
    harness.board.toggle_zen_mode();
    harness.board.toggle_sidebar();

    let chrome = harness.board.chrome();
    assert!(!chrome.sidebar_collapsed);
    assert!(chrome.zen_mode);
}
