//! Then steps for board behaviour scenarios.

use super::board_world::BoardWorld;
use contentboard::task::{domain::Stage, services::MutationOutcome};
use eyre::{WrapErr, eyre};
use rstest_bdd_macros::then;

#[then(r#"the task is in "{stage}""#)]
fn task_is_in(world: &BoardWorld, stage: String) -> Result<(), eyre::Report> {
    let expected = Stage::try_from(stage.as_str()).wrap_err("parse scenario stage")?;
    let id = world.task_id()?;
    let task = world
        .board
        .store()
        .find(id)
        .ok_or_else(|| eyre!("task {id} missing from the board"))?;

    if task.status() != expected {
        return Err(eyre!("expected stage {expected}, found {}", task.status()));
    }
    Ok(())
}

#[then("the drag session is idle")]
fn drag_session_idle(world: &BoardWorld) -> Result<(), eyre::Report> {
    if world.board.drag_snapshot().is_active {
        return Err(eyre!("drag session is still active"));
    }
    Ok(())
}

#[then(r#"the focused task shows stage "{stage}""#)]
fn focused_task_stage(world: &BoardWorld, stage: String) -> Result<(), eyre::Report> {
    let expected = Stage::try_from(stage.as_str()).wrap_err("parse scenario stage")?;
    let focused = world
        .board
        .focus_state()
        .focused()
        .ok_or_else(|| eyre!("nothing is focused"))?;

    if focused.status() != expected {
        return Err(eyre!("focused task shows {}, expected {expected}", focused.status()));
    }
    Ok(())
}

#[then("the task is no longer on the board")]
fn task_removed(world: &BoardWorld) -> Result<(), eyre::Report> {
    let id = world.task_id()?;
    if world.board.store().find(id).is_some() {
        return Err(eyre!("task {id} is still on the board"));
    }
    if world.last_outcome != Some(MutationOutcome::Committed) {
        return Err(eyre!("delete was not committed: {:?}", world.last_outcome));
    }
    Ok(())
}

#[then("the task is still on the board")]
fn task_still_present(world: &BoardWorld) -> Result<(), eyre::Report> {
    let id = world.task_id()?;
    if world.board.store().find(id).is_none() {
        return Err(eyre!("task {id} disappeared from the board"));
    }
    Ok(())
}

#[then("the editor is closed")]
fn editor_closed(world: &BoardWorld) -> Result<(), eyre::Report> {
    if world.board.editor().target().is_some() {
        return Err(eyre!("editor still holds a task"));
    }
    Ok(())
}

#[then("nothing is focused")]
fn nothing_focused(world: &BoardWorld) -> Result<(), eyre::Report> {
    if world.board.focus_state().focused().is_some() {
        return Err(eyre!("a task is still focused"));
    }
    Ok(())
}

#[then("no delete is pending")]
fn no_delete_pending(world: &BoardWorld) -> Result<(), eyre::Report> {
    if let Some(id) = world.board.pending_delete() {
        return Err(eyre!("delete of {id} is still pending"));
    }
    Ok(())
}

#[then("the board reports a remote failure")]
fn remote_failure_reported(world: &BoardWorld) -> Result<(), eyre::Report> {
    if world.last_outcome != Some(MutationOutcome::Reconciled) {
        return Err(eyre!("expected a reconciled outcome, got {:?}", world.last_outcome));
    }
    if world.board.store().last_error().is_none() {
        return Err(eyre!("no failure was recorded"));
    }
    Ok(())
}
