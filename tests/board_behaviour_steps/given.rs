//! Given steps for board behaviour scenarios.

use super::board_world::{BoardWorld, run_async};
use contentboard::task::{
    domain::{Stage, TaskDraft},
    services::LoadOutcome,
};
use eyre::{WrapErr, eyre};
use rstest_bdd_macros::given;

#[given(r#"a board with a task "{title}" in "{stage}""#)]
fn board_with_task(
    world: &mut BoardWorld,
    title: String,
    stage: String,
) -> Result<(), eyre::Report> {
    let status = Stage::try_from(stage.as_str()).wrap_err("parse scenario stage")?;
    let identity = world.identity.clone();
    let outcome = run_async(world.board.set_identity(Some(&identity)));
    if outcome != (LoadOutcome::Loaded { count: 0 }) {
        return Err(eyre!("unexpected initial load: {outcome:?}"));
    }

    let mut draft = TaskDraft::new_idea();
    draft.title = title;
    draft.status = status;
    let task = run_async(world.board.store().create(draft))
        .ok_or_else(|| eyre!("task was not created"))?;
    world.task_id = Some(task.id());
    Ok(())
}

#[given("the task is focused")]
fn task_is_focused(world: &mut BoardWorld) -> Result<(), eyre::Report> {
    let id = world.task_id()?;
    if !world.board.focus(id) {
        return Err(eyre!("task {id} is not on the board"));
    }
    Ok(())
}

#[given("the task is open and focused")]
fn task_is_open_and_focused(world: &mut BoardWorld) -> Result<(), eyre::Report> {
    let id = world.task_id()?;
    if !world.board.open(id) {
        return Err(eyre!("task {id} could not be opened"));
    }
    task_is_focused(world)
}

#[given("the record service rejects deletes")]
fn record_service_rejects_deletes(world: &mut BoardWorld) {
    world.records.reject_deletes();
}
